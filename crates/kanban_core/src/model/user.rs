//! Board user accounts.
//!
//! # Invariants
//! - Users are immutable once constructed; updates replace them wholesale.
//! - Two users are the same account when their ids match, or when their
//!   secondary ids match.

use crate::model::id::RecordId;
use crate::record::UserRecord;

#[derive(Debug, Clone, Default)]
pub struct User {
    id: Option<RecordId>,
    uid: Option<RecordId>,
    name: Option<String>,
    email: Option<String>,
    api_token: Option<String>,
}

impl User {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_uid(mut self, uid: impl Into<RecordId>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Builds a user from its record. Missing fields stay absent.
    pub fn from_record(record: UserRecord) -> Self {
        Self {
            id: record.id,
            uid: record.uid,
            name: record.name,
            email: record.email,
            api_token: record.api_token,
        }
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.clone(),
            uid: self.uid.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            api_token: self.api_token.clone(),
            ..UserRecord::default()
        }
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Secondary external identifier.
    pub fn uid(&self) -> Option<&RecordId> {
        self.uid.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    /// Returns whether `other` names the same account.
    ///
    /// Absent ids never match.
    pub fn same_account(&self, other: &User) -> bool {
        let same = |left: Option<&RecordId>, right: Option<&RecordId>| {
            matches!((left, right), (Some(left), Some(right)) if left == right)
        };
        same(self.id(), other.id()) || same(self.uid(), other.uid())
    }

    /// Returns whether `identifier` equals this user's id, email, name or
    /// API token.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.matches_text(identifier))
            || self.email.as_deref() == Some(identifier)
            || self.name.as_deref() == Some(identifier)
            || self.api_token.as_deref() == Some(identifier)
    }
}
