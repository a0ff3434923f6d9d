//! Identifiers shared by every board entity.
//!
//! # Responsibility
//! - Accept ids as they appear in board documents (integer or string).
//! - Provide the tagged "identifier or handle" parameter for project APIs.
//!
//! # Invariants
//! - Equality, ordering and hashing use the canonical text form, so `10`
//!   and `"10"` name the same entity.
//! - Serialization writes back the original scalar form.

use crate::model::project::Project;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Loosely typed entity identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Canonical text form used for comparisons.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Int(value) => Cow::Owned(value.to_string()),
            Self::Text(value) => Cow::Borrowed(value.as_str()),
        }
    }

    /// Returns whether this id counts as "no id" in a reference field.
    ///
    /// `0`, `""` and `"0"` are blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Text(value) => value.is_empty() || value == "0",
        }
    }

    /// Returns whether `text` names this id.
    pub fn matches_text(&self, text: &str) -> bool {
        self.canonical() == text
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Self::Int(value),
            Err(_) => Self::Text(value.to_string()),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&RecordId> for RecordId {
    fn from(value: &RecordId) -> Self {
        value.clone()
    }
}

/// A project named either by raw id or by an already-resolved handle.
#[derive(Debug, Clone)]
pub enum ProjectRef<'a> {
    Id(RecordId),
    Handle(&'a Project),
}

impl ProjectRef<'_> {
    /// Returns the project id this reference names.
    pub fn id(&self) -> &RecordId {
        match self {
            Self::Id(id) => id,
            Self::Handle(project) => project.id(),
        }
    }
}

impl<'a> From<&'a Project> for ProjectRef<'a> {
    fn from(value: &'a Project) -> Self {
        Self::Handle(value)
    }
}

impl From<RecordId> for ProjectRef<'_> {
    fn from(value: RecordId) -> Self {
        Self::Id(value)
    }
}

impl From<&RecordId> for ProjectRef<'_> {
    fn from(value: &RecordId) -> Self {
        Self::Id(value.clone())
    }
}

impl From<i64> for ProjectRef<'_> {
    fn from(value: i64) -> Self {
        Self::Id(value.into())
    }
}

impl From<i32> for ProjectRef<'_> {
    fn from(value: i32) -> Self {
        Self::Id(value.into())
    }
}

impl From<&str> for ProjectRef<'_> {
    fn from(value: &str) -> Self {
        Self::Id(value.into())
    }
}
