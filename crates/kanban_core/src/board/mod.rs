//! Board aggregate root.
//!
//! # Responsibility
//! - Load board state from a data source and save it back.
//! - Expose the typed query/mutation API over users, clients, projects,
//!   stickers and the active-project set.
//!
//! # Invariants
//! - Load is all-or-nothing: a failed load leaves the previous state intact.
//! - Adds are idempotent by identity and report whether anything changed.
//! - Lookups fail with `BoardError::NotFound` instead of returning nothing.
//! - The client/project link is symmetric after every mutation.

mod state;

use crate::error::{BoardError, BoardResult, Lookup};
use crate::model::client::Client;
use crate::model::id::{ProjectRef, RecordId};
use crate::model::project::Project;
use crate::model::sticker::Sticker;
use crate::model::user::User;
use crate::record::{BoardDocument, ClientRecord, ProjectRecord, UserRecord};
use crate::source::DataSource;
use log::{error, info};
use serde_json::Value;
use state::BoardState;
use std::time::Instant;

/// In-memory planning state of one kanban board.
#[derive(Debug)]
pub struct Board<S: DataSource> {
    source: S,
    state: BoardState,
}

impl<S: DataSource> Board<S> {
    /// Creates a board bound to `source` and loads it.
    pub fn open(source: S) -> BoardResult<Self> {
        let mut board = Self::empty(source);
        board.load()?;
        Ok(board)
    }

    /// Creates an empty board bound to `source` without reading it.
    pub fn empty(source: S) -> Self {
        Self {
            source,
            state: BoardState::default(),
        }
    }

    /// The data source this board loads from and saves to.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replaces the board's state with the content of its data source.
    ///
    /// # Errors
    /// - `EmptySource` when the source yields no content.
    /// - `Decode` when the content is not a board document.
    /// - `Integrity` when a project names an unknown client or an active id
    ///   names an unknown project.
    /// - `Source` when the medium itself fails.
    pub fn load(&mut self) -> BoardResult<()> {
        let started_at = Instant::now();
        info!("event=board_load module=board status=start");

        let loaded = self
            .source
            .read()
            .map_err(BoardError::from)
            .and_then(|bytes| BoardState::decode(&bytes, &self.source.describe()));

        match loaded {
            Ok(state) => {
                info!(
                    "event=board_load module=board status=ok duration_ms={} users={} clients={} projects={} active={}",
                    started_at.elapsed().as_millis(),
                    state.users.len(),
                    state.clients.len(),
                    state.projects.len(),
                    state.active.len()
                );
                self.state = state;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=board_load module=board status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Rebinds the board to `source`, then loads from it.
    ///
    /// The new source stays bound even when the load fails.
    pub fn load_from(&mut self, source: S) -> BoardResult<()> {
        self.source = source;
        self.load()
    }

    /// Writes the pretty-printed board document to the data source.
    ///
    /// # Errors
    /// - `Encode` when the document cannot be serialized.
    /// - `Source` when the medium rejects the write.
    pub fn save(&self) -> BoardResult<()> {
        let started_at = Instant::now();
        let text = self.to_json()?;
        match self.source.write(text.as_bytes()) {
            Ok(()) => {
                info!(
                    "event=board_save module=board status=ok duration_ms={} bytes={}",
                    started_at.elapsed().as_millis(),
                    text.len()
                );
                Ok(())
            }
            Err(err) => {
                let err = BoardError::from(err);
                error!(
                    "event=board_save module=board status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Snapshot of the board in its persisted document shape.
    pub fn to_document(&self) -> BoardDocument {
        self.state.to_document()
    }

    /// Returns the board document as a generic structured value.
    pub fn to_value(&self) -> BoardResult<Value> {
        serde_json::to_value(self.to_document())
            .map_err(|err| BoardError::Encode(err.to_string()))
    }

    /// Returns the board document as pretty-printed JSON, as `save` writes it.
    pub fn to_json(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|err| BoardError::Encode(err.to_string()))
    }

    // Users

    /// Users in load/insertion order.
    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// Adds `user` unless an account with the same id or uid exists.
    pub fn add_user(&mut self, user: User) -> bool {
        self.state.add_user(user)
    }

    /// Adds users whose record is flagged active and not inactive.
    ///
    /// Returns the number of users added.
    pub fn set_users(&mut self, records: impl IntoIterator<Item = UserRecord>) -> usize {
        records
            .into_iter()
            .filter(|record| record.active && !record.inactive)
            .map(|record| self.add_user(User::from_record(record)))
            .filter(|added| *added)
            .count()
    }

    /// Returns the user with `id`.
    ///
    /// # Errors
    /// - `NotFound(User)` when no user carries that id.
    pub fn get_user(&self, id: impl Into<RecordId>) -> BoardResult<&User> {
        let id = id.into();
        self.state
            .users
            .iter()
            .find(|user| user.id() == Some(&id))
            .ok_or_else(|| Lookup::User(id.to_string()).into())
    }

    /// Returns the first user with exactly this email.
    ///
    /// # Errors
    /// - `NotFound(User)` when no user matches.
    pub fn user_by_email(&self, email: &str) -> BoardResult<&User> {
        self.find_user_where(email, |user| user.email() == Some(email))
    }

    /// Returns the first user with exactly this name.
    ///
    /// # Errors
    /// - `NotFound(User)` when no user matches.
    pub fn user_by_name(&self, name: &str) -> BoardResult<&User> {
        self.find_user_where(name, |user| user.name() == Some(name))
    }

    /// Finds the first user whose id, email, name or API token equals
    /// `identifier`.
    ///
    /// # Errors
    /// - `NotFound(User)` when no user matches.
    pub fn find_user(&self, identifier: &str) -> BoardResult<&User> {
        self.find_user_where(identifier, |user| user.matches_identifier(identifier))
    }

    /// Returns the API token of the user `identifier` names.
    ///
    /// `Ok(None)` means the user exists but has no token.
    ///
    /// # Errors
    /// - `NotFound(User)` when no user matches.
    pub fn user_api_token(&self, identifier: &str) -> BoardResult<Option<&str>> {
        self.find_user(identifier).map(User::api_token)
    }

    fn find_user_where(
        &self,
        identifier: &str,
        predicate: impl Fn(&User) -> bool,
    ) -> BoardResult<&User> {
        self.state
            .users
            .iter()
            .find(|user| predicate(*user))
            .ok_or_else(|| Lookup::User(identifier.to_string()).into())
    }

    // Clients

    /// Clients in insertion order.
    pub fn clients(&self) -> impl Iterator<Item = &Client> + '_ {
        self.state.clients.iter()
    }

    /// Adds `client` unless a client with the same id exists.
    pub fn add_client(&mut self, client: Client) -> bool {
        self.state.add_client(client)
    }

    /// Adds every client in `records`. Returns the number added.
    pub fn set_clients(&mut self, records: impl IntoIterator<Item = ClientRecord>) -> usize {
        records
            .into_iter()
            .map(|record| self.add_client(Client::from_record(record)))
            .filter(|added| *added)
            .count()
    }

    /// Returns whether a client with `id` is on the board.
    pub fn has_client(&self, id: impl Into<RecordId>) -> bool {
        self.state.clients.contains(&id.into())
    }

    /// Returns the client with `id`.
    ///
    /// # Errors
    /// - `NotFound(Client)` when the id is unknown.
    pub fn get_client(&self, id: impl Into<RecordId>) -> BoardResult<&Client> {
        let id = id.into();
        match self.state.clients.get(&id) {
            Some(client) => Ok(client),
            None => Err(Lookup::Client(id).into()),
        }
    }

    /// Returns the client owning `project`, if any.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn client_of<'a>(
        &self,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<Option<&Client>> {
        let project = self.get_project(project)?;
        match project.client_id() {
            Some(client_id) => self.get_client(client_id).map(Some),
            None => Ok(None),
        }
    }

    /// Finds one of `client`'s projects by id, then by project name.
    ///
    /// # Errors
    /// - `NotFound(Client)` when the client is unknown.
    /// - `NotFound(ClientProject)` when none of its projects matches `key`.
    pub fn client_project(&self, client: impl Into<RecordId>, key: &str) -> BoardResult<&Project> {
        let client = self.get_client(client)?;
        let owned = || {
            client
                .project_ids()
                .iter()
                .filter_map(|id| self.state.projects.get(id))
        };
        owned()
            .find(|project| project.id().matches_text(key))
            .or_else(|| owned().find(|project| project.name() == Some(key)))
            .ok_or_else(|| {
                Lookup::ClientProject {
                    client: client.id().clone(),
                    key: key.to_string(),
                }
                .into()
            })
    }

    // Projects

    /// Projects in insertion order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> + '_ {
        self.state.projects.iter()
    }

    /// Adds `project` unless a project with the same id exists.
    ///
    /// A declared client is replaced by the board's client with that id.
    ///
    /// # Errors
    /// - `Integrity(UnknownClient)` when the declared client is not on the
    ///   board.
    pub fn add_project(&mut self, project: Project) -> BoardResult<bool> {
        self.state.add_project(project)
    }

    /// Adds every project in `records`. Returns the number added.
    ///
    /// # Errors
    /// - `Integrity(UnknownClient)` at the first project whose client is
    ///   unknown. Projects before it stay added.
    pub fn set_projects(
        &mut self,
        records: impl IntoIterator<Item = ProjectRecord>,
    ) -> BoardResult<usize> {
        let mut added = 0;
        for record in records {
            if self.add_project(Project::from_record(record))? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Returns whether the project is on the board.
    pub fn has_project<'a>(&self, project: impl Into<ProjectRef<'a>>) -> bool {
        self.state.projects.contains(project.into().id())
    }

    /// Returns the board's project for an id or handle.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the id is unknown.
    pub fn get_project<'a>(&self, project: impl Into<ProjectRef<'a>>) -> BoardResult<&Project> {
        let project = project.into();
        self.state
            .projects
            .get(project.id())
            .ok_or_else(|| Lookup::Project(project.id().clone()).into())
    }

    /// Replaces the name, visibility, stickers, users and client of a known
    /// project with those of `with`. The project keeps its id.
    ///
    /// A blank client id in `with` leaves the project unowned.
    ///
    /// # Errors
    /// - `NotFound(Project)` when `id` is unknown.
    /// - `Integrity(UnknownClient)` when `with` names an unknown client. The
    ///   project is left unchanged.
    pub fn update_project(&mut self, id: impl Into<RecordId>, with: Project) -> BoardResult<()> {
        let id = id.into();
        if !self.has_project(&id) {
            return Err(Lookup::Project(id).into());
        }
        self.state.update_project(&id, with)
    }

    /// Marks the project hidden.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn hide_project<'a>(&mut self, project: impl Into<ProjectRef<'a>>) -> BoardResult<()> {
        self.project_mut(project)?.hide();
        Ok(())
    }

    /// Clears the project's hidden flag.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn show_project<'a>(&mut self, project: impl Into<ProjectRef<'a>>) -> BoardResult<()> {
        self.project_mut(project)?.show();
        Ok(())
    }

    /// Attaches `sticker` to the project unless an equal sticker is there.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn add_sticker_to_project<'a>(
        &mut self,
        sticker: Sticker,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<()> {
        self.project_mut(project)?.add_sticker(sticker);
        Ok(())
    }

    /// Detaches the sticker equal to `sticker`; absent is a no-op.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn remove_sticker_from_project<'a>(
        &mut self,
        sticker: &Sticker,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<()> {
        self.project_mut(project)?.remove_sticker(sticker);
        Ok(())
    }

    /// Associates `user_id` with the project.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn add_user_to_project<'a>(
        &mut self,
        user_id: impl Into<RecordId>,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<()> {
        self.project_mut(project)?.add_user(user_id);
        Ok(())
    }

    /// Removes `user_id` from every project except `except`.
    pub fn remove_user_from_projects_except(
        &mut self,
        user_id: impl Into<RecordId>,
        except: Option<&RecordId>,
    ) {
        let user_id = user_id.into();
        for project in self.state.projects.values_mut() {
            if Some(project.id()) == except {
                continue;
            }
            project.remove_user(&user_id);
        }
    }

    fn project_mut<'a>(
        &mut self,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<&mut Project> {
        let project = project.into();
        match self.state.projects.get_mut(project.id()) {
            Some(found) => Ok(found),
            None => Err(Lookup::Project(project.id().clone()).into()),
        }
    }

    // Active projects

    /// Ids of active projects in activation order.
    pub fn active_project_ids(&self) -> &[RecordId] {
        &self.state.active
    }

    /// Active projects in activation order.
    pub fn active_projects(&self) -> BoardResult<Vec<&Project>> {
        self.state
            .active
            .iter()
            .map(|id| self.get_project(id))
            .collect()
    }

    /// Returns whether the project is in the active set. Unknown is `false`.
    pub fn is_active_project<'a>(&self, project: impl Into<ProjectRef<'a>>) -> bool {
        self.state.is_active(project.into().id())
    }

    /// Adds a known project to the active set; already active is a no-op.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn mark_project_active<'a>(
        &mut self,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<()> {
        let id = self.get_project(project)?.id().clone();
        self.state.activate(id);
        Ok(())
    }

    /// Removes a known project from the active set; inactive is a no-op.
    ///
    /// # Errors
    /// - `NotFound(Project)` when the project is unknown.
    pub fn mark_project_inactive<'a>(
        &mut self,
        project: impl Into<ProjectRef<'a>>,
    ) -> BoardResult<()> {
        let id = self.get_project(project)?.id().clone();
        self.state.deactivate(&id);
        Ok(())
    }

    // Sticker palette

    /// Board-level stickers available for attaching to projects.
    pub fn sticker_palette(&self) -> &[Sticker] {
        &self.state.palette
    }

    /// Adds `sticker` to the palette unless an equal one is there.
    pub fn add_palette_sticker(&mut self, sticker: Sticker) -> bool {
        self.state.add_palette_sticker(sticker)
    }

    /// Removes the first palette sticker equal to `sticker`.
    pub fn remove_palette_sticker(&mut self, sticker: &Sticker) {
        if let Some(index) = self.state.palette.iter().position(|item| item == sticker) {
            self.state.palette.remove(index);
        }
    }
}
