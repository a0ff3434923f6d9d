//! Board domain model.
//!
//! # Responsibility
//! - Define users, clients, projects and stickers.
//! - Convert each entity from and to its wire record.
//!
//! # Invariants
//! - Users, clients and projects are equal when their ids are equal.
//! - Stickers are equal when every field is equal.

pub mod client;
pub mod id;
pub mod project;
pub mod sticker;
pub mod user;
