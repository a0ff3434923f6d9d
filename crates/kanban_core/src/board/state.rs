//! Board state and load-time reconciliation.
//!
//! # Invariants
//! - A project's client link always names a client held in `clients`, and
//!   that client lists the project id.
//! - Every id in `active` names a project held in `projects`, once.
//! - Decoding builds a fresh state; callers swap it in only on success.

use crate::error::{BoardError, BoardResult, IntegrityError, Lookup};
use crate::model::client::Client;
use crate::model::id::RecordId;
use crate::model::project::Project;
use crate::model::sticker::Sticker;
use crate::model::user::User;
use crate::record::BoardDocument;
use crate::registry::Registry;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub(crate) struct BoardState {
    pub(crate) users: Vec<User>,
    pub(crate) clients: Registry<Client>,
    pub(crate) projects: Registry<Project>,
    pub(crate) active: Vec<RecordId>,
    pub(crate) palette: Vec<Sticker>,
}

impl BoardState {
    /// Decodes raw document bytes read from `location`.
    pub(crate) fn decode(bytes: &[u8], location: &str) -> BoardResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(BoardError::EmptySource {
                source: location.to_string(),
            });
        }
        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| BoardError::Decode(err.to_string()))?;
        let document = match value {
            Value::Object(map) if !map.is_empty() => {
                serde_json::from_value::<BoardDocument>(Value::Object(map))
                    .map_err(|err| BoardError::Decode(err.to_string()))?
            }
            Value::Object(_) | Value::Null => {
                return Err(BoardError::Decode("document is empty".to_string()));
            }
            other => {
                return Err(BoardError::Decode(format!(
                    "expected an object at the top level, found {}",
                    value_kind(&other)
                )));
            }
        };
        Self::from_document(document)
    }

    /// Builds and reconciles state from a decoded document.
    ///
    /// Clients are keyed last-write-wins; projects are linked in document
    /// order; active ids must name loaded projects.
    pub(crate) fn from_document(document: BoardDocument) -> BoardResult<Self> {
        let mut state = Self {
            users: document.users.into_iter().map(User::from_record).collect(),
            ..Self::default()
        };
        for record in document.clients {
            state.clients.upsert(Client::from_record(record));
        }
        for record in document.projects {
            state.replace_project(Project::from_record(record))?;
        }
        for id in document.active_projects {
            if !state.projects.contains(&id) {
                return Err(IntegrityError::UnknownActiveProject(id).into());
            }
            state.activate(id);
        }
        for record in document.stickers {
            state.add_palette_sticker(Sticker::from_record(record));
        }
        Ok(state)
    }

    pub(crate) fn to_document(&self) -> BoardDocument {
        BoardDocument {
            users: self.users.iter().map(User::to_record).collect(),
            clients: self.clients.iter().map(Client::to_record).collect(),
            projects: self.projects.iter().map(Project::to_record).collect(),
            active_projects: self.active.clone(),
            stickers: self.palette.iter().map(Sticker::to_record).collect(),
        }
    }

    pub(crate) fn add_user(&mut self, user: User) -> bool {
        if self.users.iter().any(|known| known.same_account(&user)) {
            return false;
        }
        self.users.push(user);
        true
    }

    /// Adds `client` unless its id is known.
    ///
    /// Project ids the client lists are kept only when the board's project
    /// links back to this client.
    pub(crate) fn add_client(&mut self, mut client: Client) -> bool {
        if self.clients.contains(client.id()) {
            return false;
        }
        let client_id = client.id().clone();
        let projects = &self.projects;
        client.retain_projects(|project_id| {
            projects
                .get(project_id)
                .and_then(Project::client_id)
                .is_some_and(|linked| *linked == client_id)
        });
        self.clients.insert_if_absent(client)
    }

    /// Adds `project` unless its id is known, linking its declared client.
    pub(crate) fn add_project(&mut self, mut project: Project) -> BoardResult<bool> {
        if self.projects.contains(project.id()) {
            return Ok(false);
        }
        self.link_client(&mut project)?;
        Ok(self.projects.insert_if_absent(project))
    }

    /// Stores `project`, replacing a project with the same id.
    fn replace_project(&mut self, mut project: Project) -> BoardResult<()> {
        self.link_client(&mut project)?;
        let linked = project.client_id().cloned();
        if let Some(previous) = self.projects.upsert(project) {
            self.release_client(previous.id(), previous.client_id(), linked.as_ref());
        }
        Ok(())
    }

    /// Replaces a known project's attributes and client link with `with`'s.
    pub(crate) fn update_project(&mut self, id: &RecordId, with: Project) -> BoardResult<()> {
        let target = declared_client(&with);
        if let Some(client_id) = &target {
            if !self.clients.contains(client_id) {
                return Err(IntegrityError::UnknownClient {
                    project: id.clone(),
                    client: client_id.clone(),
                }
                .into());
            }
        }
        let Some(project) = self.projects.get_mut(id) else {
            return Err(Lookup::Project(id.clone()).into());
        };
        let previous = project.client_id().cloned();
        project.absorb(with);
        let client = match &target {
            Some(client_id) => self.clients.get_mut(client_id),
            None => None,
        };
        match client {
            Some(client) => project.set_client(client),
            None => project.clear_client(),
        }
        self.release_client(id, previous.as_ref(), target.as_ref());
        Ok(())
    }

    /// Resolves `project`'s declared client to the board's client.
    ///
    /// A blank declared id leaves the project unowned, as a load would.
    fn link_client(&mut self, project: &mut Project) -> BoardResult<()> {
        let Some(client_id) = declared_client(project) else {
            project.clear_client();
            return Ok(());
        };
        let Some(client) = self.clients.get_mut(&client_id) else {
            return Err(IntegrityError::UnknownClient {
                project: project.id().clone(),
                client: client_id,
            }
            .into());
        };
        project.set_client(client);
        Ok(())
    }

    /// Drops `project_id` from its previous client when the link moved.
    fn release_client(
        &mut self,
        project_id: &RecordId,
        previous: Option<&RecordId>,
        current: Option<&RecordId>,
    ) {
        let Some(previous) = previous else {
            return;
        };
        if Some(previous) == current {
            return;
        }
        if let Some(client) = self.clients.get_mut(previous) {
            client.detach(project_id);
        }
    }

    pub(crate) fn is_active(&self, id: &RecordId) -> bool {
        self.active.contains(id)
    }

    pub(crate) fn activate(&mut self, id: RecordId) {
        if !self.is_active(&id) {
            self.active.push(id);
        }
    }

    pub(crate) fn deactivate(&mut self, id: &RecordId) {
        self.active.retain(|active| active != id);
    }

    pub(crate) fn add_palette_sticker(&mut self, sticker: Sticker) -> bool {
        if self.palette.contains(&sticker) {
            return false;
        }
        self.palette.push(sticker);
        true
    }
}

/// The project's client id, unless it is blank.
fn declared_client(project: &Project) -> Option<RecordId> {
    project
        .client_id()
        .filter(|client_id| !client_id.is_blank())
        .cloned()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::BoardState;
    use crate::error::{BoardError, IntegrityError};
    use crate::model::client::Client;
    use crate::model::id::RecordId;
    use crate::model::project::Project;

    #[test]
    fn decode_rejects_blank_and_non_object_documents() {
        assert!(matches!(
            BoardState::decode(b"  \n", "memory:test"),
            Err(BoardError::EmptySource { .. })
        ));
        assert!(matches!(
            BoardState::decode(b"{}", "memory:test"),
            Err(BoardError::Decode(_))
        ));
        assert!(matches!(
            BoardState::decode(b"[1, 2]", "memory:test"),
            Err(BoardError::Decode(message)) if message.contains("an array")
        ));
        assert!(matches!(
            BoardState::decode(b"{not json", "memory:test"),
            Err(BoardError::Decode(_))
        ));
    }

    #[test]
    fn replacing_a_project_moves_its_client_listing() {
        let mut state = BoardState::default();
        state.add_client(Client::new(1, "Acme"));
        state.add_client(Client::new(2, "Globex"));
        state
            .replace_project(Project::new(10, "Site").with_client_id(1))
            .unwrap();
        state
            .replace_project(Project::new(10, "Site v2").with_client_id(2))
            .unwrap();

        let acme = state.clients.get(&RecordId::from(1)).unwrap();
        let globex = state.clients.get(&RecordId::from(2)).unwrap();
        assert!(!acme.has_project(&RecordId::from(10)));
        assert!(globex.has_project(&RecordId::from(10)));
        assert_eq!(state.projects.len(), 1);
    }

    #[test]
    fn add_client_drops_project_ids_the_board_does_not_link() {
        let mut state = BoardState::default();
        let mut stray = Project::new(77, "Elsewhere");
        let mut client = Client::new(1, "Acme");
        client.add_project(&mut stray);

        assert!(state.add_client(client));
        let client = state.clients.get(&RecordId::from(1)).unwrap();
        assert!(client.project_ids().is_empty());
    }

    #[test]
    fn blank_client_reference_leaves_project_unowned() {
        let mut state = BoardState::default();
        state.add_client(Client::new(0, "Zero"));
        state
            .add_project(Project::new(10, "Site").with_client_id(0))
            .unwrap();

        assert!(state.projects.get(&RecordId::from(10)).unwrap().client().is_none());
        let zero = state.clients.get(&RecordId::from(0)).unwrap();
        assert!(!zero.has_project(&RecordId::from(10)));
    }

    #[test]
    fn update_project_rejects_unknown_client_without_mutating() {
        let mut state = BoardState::default();
        state.add_project(Project::new(10, "Site")).unwrap();

        let err = state
            .update_project(&RecordId::from(10), Project::new(10, "Renamed").with_client_id(5))
            .unwrap_err();
        assert!(matches!(
            err,
            BoardError::Integrity(IntegrityError::UnknownClient { .. })
        ));
        let project = state.projects.get(&RecordId::from(10)).unwrap();
        assert_eq!(project.name(), Some("Site"));
    }
}
