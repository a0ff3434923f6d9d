//! Projects, the central board entity.
//!
//! # Responsibility
//! - Hold project attributes, the owning-client link and stickers.
//! - Keep sticker and per-project user collections duplicate-free.
//!
//! # Invariants
//! - Stickers keep insertion order; removal is stable.
//! - A client link set through `set_client` is mirrored on the client.

use crate::model::client::Client;
use crate::model::id::RecordId;
use crate::model::sticker::Sticker;
use crate::record::ProjectRecord;

/// A project's reference to its owning client.
///
/// Carries the client name so records can be written without the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLink {
    id: RecordId,
    name: Option<String>,
}

impl ClientLink {
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<&Client> for ClientLink {
    fn from(value: &Client) -> Self {
        Self {
            id: value.id().clone(),
            name: value.name().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    id: RecordId,
    name: Option<String>,
    hidden: bool,
    client: Option<ClientLink>,
    stickers: Vec<Sticker>,
    users: Vec<RecordId>,
}

impl Project {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            hidden: false,
            client: None,
            stickers: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Builds a project from its record.
    ///
    /// A declared client becomes an unresolved link; the board replaces it
    /// with its canonical client when the project joins the board.
    pub fn from_record(record: ProjectRecord) -> Self {
        let client = record.declared_client_id().map(|id| ClientLink {
            id: id.clone(),
            name: record.client_name.clone(),
        });
        let mut project = Self {
            id: record.id,
            name: record.name,
            hidden: record.hidden,
            client,
            stickers: Vec::new(),
            users: Vec::new(),
        };
        for sticker in record.stickers {
            project.add_sticker(Sticker::from_record(sticker));
        }
        for user_id in record.users {
            project.add_user(user_id);
        }
        project
    }

    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            hidden: self.hidden,
            client_id: self.client_id().cloned(),
            cid: None,
            client_name: self.client_name().map(str::to_string),
            stickers: self.stickers.iter().map(Sticker::to_record).collect(),
            users: self.users.clone(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Links this project to `client` and lists it on the client.
    pub fn set_client(&mut self, client: &mut Client) {
        self.client = Some(ClientLink::from(&*client));
        client.attach(self.id.clone());
    }

    /// Declares an owning client by id without resolving it.
    ///
    /// `Board::add_project` resolves the id against the board's clients.
    pub fn with_client_id(mut self, client_id: impl Into<RecordId>) -> Self {
        self.client = Some(ClientLink {
            id: client_id.into(),
            name: None,
        });
        self
    }

    pub(crate) fn clear_client(&mut self) {
        self.client = None;
    }

    pub fn client(&self) -> Option<&ClientLink> {
        self.client.as_ref()
    }

    pub fn client_id(&self) -> Option<&RecordId> {
        self.client.as_ref().map(ClientLink::id)
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().and_then(ClientLink::name)
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn has_sticker(&self, sticker: &Sticker) -> bool {
        self.stickers.contains(sticker)
    }

    /// Appends `sticker` unless an equal sticker is already attached.
    pub fn add_sticker(&mut self, sticker: Sticker) {
        if !self.has_sticker(&sticker) {
            self.stickers.push(sticker);
        }
    }

    /// Detaches the sticker equal to `sticker`, keeping the others in order.
    pub fn remove_sticker(&mut self, sticker: &Sticker) {
        if let Some(index) = self.stickers.iter().position(|item| item == sticker) {
            self.stickers.remove(index);
        }
    }

    /// Ids of users associated with this project.
    pub fn user_ids(&self) -> &[RecordId] {
        &self.users
    }

    pub fn has_user(&self, user_id: &RecordId) -> bool {
        self.users.contains(user_id)
    }

    pub fn add_user(&mut self, user_id: impl Into<RecordId>) {
        let user_id = user_id.into();
        if !self.has_user(&user_id) {
            self.users.push(user_id);
        }
    }

    pub fn remove_user(&mut self, user_id: &RecordId) {
        self.users.retain(|id| id != user_id);
    }

    /// Copies name, visibility, stickers and users from `other`.
    pub(crate) fn absorb(&mut self, other: Project) {
        self.name = other.name;
        self.hidden = other.hidden;
        self.stickers = other.stickers;
        self.users = other.users;
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Project {}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::id::RecordId;
    use crate::model::sticker::Sticker;
    use crate::record::ProjectRecord;
    use serde_json::json;

    #[test]
    fn from_record_reads_legacy_client_reference() {
        let record: ProjectRecord =
            serde_json::from_value(json!({ "id": 3, "name": "Old", "cid": 8 })).unwrap();
        let project = Project::from_record(record);
        assert_eq!(project.client_id(), Some(&RecordId::from(8)));
        assert_eq!(project.client_name(), None);
    }

    #[test]
    fn from_record_drops_duplicate_stickers() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": 3,
            "stickers": [
                { "label": "hot", "position": [1, 2] },
                { "label": "hot", "position": { "x": 1, "y": 2 } },
                { "label": "cold" }
            ]
        }))
        .unwrap();
        let project = Project::from_record(record);
        assert_eq!(project.stickers().len(), 2);
    }

    #[test]
    fn remove_sticker_is_stable_and_tolerates_absent_values() {
        let mut project = Project::new(1, "Site");
        let first = Sticker::new("a");
        let second = Sticker::new("b");
        let third = Sticker::new("c");
        project.add_sticker(first.clone());
        project.add_sticker(second.clone());
        project.add_sticker(third.clone());

        project.remove_sticker(&first);
        project.remove_sticker(&Sticker::new("missing"));

        assert_eq!(project.stickers(), &[second, third]);
    }

    #[test]
    fn visibility_toggles() {
        let mut project = Project::new(1, "Site");
        assert!(!project.is_hidden());
        project.hide();
        assert!(project.is_hidden());
        project.show();
        assert!(!project.is_hidden());
    }

    #[test]
    fn record_always_carries_client_fields() {
        let value = serde_json::to_value(Project::new(1, "Site").to_record()).unwrap();
        assert_eq!(value["clientID"], json!(null));
        assert_eq!(value["clientName"], json!(null));
        assert_eq!(value["hidden"], json!(false));
        assert_eq!(value["stickers"], json!([]));
        assert!(value.get("users").is_none());
    }
}
