//! Core planning-state model for a kanban board.
//! This crate owns the relational invariants between clients, projects and
//! the active-project set.

pub mod board;
pub mod error;
pub mod logging;
pub mod model;
pub mod record;
mod registry;
pub mod source;

pub use board::Board;
pub use error::{BoardError, BoardResult, IntegrityError, Lookup};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::client::Client;
pub use model::id::{ProjectRef, RecordId};
pub use model::project::{ClientLink, Project};
pub use model::sticker::{Position, Sticker};
pub use model::user::User;
pub use record::{
    BoardDocument, ClientRecord, PositionRecord, ProjectRecord, StickerRecord, UserRecord,
};
pub use source::{DataSource, FileDataSource, MemoryDataSource, SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
