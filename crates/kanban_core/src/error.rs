//! Board error taxonomy.
//!
//! # Invariants
//! - Every failure names the identifier or location involved.
//! - Errors are returned to the immediate caller; nothing is retried.

use crate::model::id::RecordId;
use crate::source::SourceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug)]
pub enum BoardError {
    /// The data source yielded no content.
    EmptySource { source: String },
    /// The data source itself failed.
    Source(SourceError),
    /// Content could not be decoded as a board document.
    Decode(String),
    /// Board state could not be encoded.
    Encode(String),
    /// A reference names an entity absent from the board.
    Integrity(IntegrityError),
    /// A lookup found no match.
    NotFound(Lookup),
}

impl BoardError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySource { .. } => "empty_source",
            Self::Source(_) => "source_failed",
            Self::Decode(_) => "decode_failed",
            Self::Encode(_) => "encode_failed",
            Self::Integrity(_) => "integrity_violation",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySource { source } => write!(f, "no data was loaded from {source}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Decode(message) => write!(f, "board document could not be decoded: {message}"),
            Self::Encode(message) => write!(f, "board document could not be encoded: {message}"),
            Self::Integrity(err) => write!(f, "{err}"),
            Self::NotFound(lookup) => write!(f, "{lookup}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Integrity(err) => Some(err),
            Self::NotFound(lookup) => Some(lookup),
            Self::EmptySource { .. } => None,
            Self::Decode(_) => None,
            Self::Encode(_) => None,
        }
    }
}

impl From<SourceError> for BoardError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<IntegrityError> for BoardError {
    fn from(value: IntegrityError) -> Self {
        Self::Integrity(value)
    }
}

impl From<Lookup> for BoardError {
    fn from(value: Lookup) -> Self {
        Self::NotFound(value)
    }
}

/// Broken reference between board entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// A project declares a client the board does not have.
    UnknownClient { project: RecordId, client: RecordId },
    /// The active-project list names a project the board does not have.
    UnknownActiveProject(RecordId),
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownClient { project, client } => write!(
                f,
                "no client exists on this board with id {client} (declared by project {project})"
            ),
            Self::UnknownActiveProject(id) => {
                write!(f, "active project {id} does not exist on this board")
            }
        }
    }
}

impl Error for IntegrityError {}

/// The lookup that found no match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Project(RecordId),
    Client(RecordId),
    /// User searched by id, email, name or API token.
    User(String),
    /// Project searched by id or name among one client's projects.
    ClientProject { client: RecordId, key: String },
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project(id) => {
                write!(f, "there is no project with identifier {id} on this board")
            }
            Self::Client(id) => write!(f, "this board has no client with id {id}"),
            Self::User(identifier) => {
                write!(f, "no user identified by {identifier} exists on this board")
            }
            Self::ClientProject { client, key } => {
                write!(f, "there is no project with id or name {key} for client {client}")
            }
        }
    }
}

impl Error for Lookup {}

#[cfg(test)]
mod tests {
    use super::{BoardError, IntegrityError, Lookup};
    use crate::model::id::RecordId;

    #[test]
    fn messages_name_the_identifier() {
        let err = BoardError::from(IntegrityError::UnknownActiveProject(RecordId::from(99)));
        assert!(err.to_string().contains("99"));
        assert_eq!(err.code(), "integrity_violation");

        let err = BoardError::from(Lookup::User("ada@example.com".to_string()));
        assert!(err.to_string().contains("ada@example.com"));
        assert_eq!(err.code(), "not_found");
    }
}
