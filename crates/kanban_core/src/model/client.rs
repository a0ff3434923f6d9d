//! Clients that own projects.
//!
//! # Invariants
//! - A client lists each owned project id at most once.
//! - When a project is linked to a client, the client lists the project id
//!   and the project's client link carries the client's id.

use crate::model::id::RecordId;
use crate::model::project::Project;
use crate::record::ClientRecord;

#[derive(Debug, Clone)]
pub struct Client {
    id: RecordId,
    name: Option<String>,
    projects: Vec<RecordId>,
}

impl Client {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            projects: Vec::new(),
        }
    }

    /// Creates a client known only by id.
    pub fn unnamed(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            projects: Vec::new(),
        }
    }

    /// Builds a client from its record; owned projects are linked later.
    pub fn from_record(record: ClientRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            projects: Vec::new(),
        }
    }

    pub fn to_record(&self) -> ClientRecord {
        ClientRecord {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Ids of owned projects in link order.
    pub fn project_ids(&self) -> &[RecordId] {
        &self.projects
    }

    pub fn has_project(&self, project_id: &RecordId) -> bool {
        self.projects.contains(project_id)
    }

    /// Takes ownership of `project`.
    ///
    /// An unowned project is linked back to this client. A project already
    /// owned elsewhere keeps its link and is only listed here.
    pub fn add_project(&mut self, project: &mut Project) {
        if project.client().is_none() {
            project.set_client(self);
        } else {
            self.attach(project.id().clone());
        }
    }

    pub(crate) fn attach(&mut self, project_id: RecordId) {
        if !self.has_project(&project_id) {
            self.projects.push(project_id);
        }
    }

    pub(crate) fn detach(&mut self, project_id: &RecordId) {
        self.projects.retain(|id| id != project_id);
    }

    pub(crate) fn retain_projects(&mut self, keep: impl FnMut(&RecordId) -> bool) {
        self.projects.retain(keep);
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Client {}
