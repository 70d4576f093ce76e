//! In-memory repository for project documents.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    insertion_order: Vec<ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects projects in insertion order, keeping those matching `keep`.
fn ordered(state: &InMemoryProjectState, keep: impl Fn(&Project) -> bool) -> Vec<Project> {
    state
        .insertion_order
        .iter()
        .filter_map(|id| state.projects.get(id))
        .filter(|project| keep(project))
        .cloned()
        .collect()
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state.insertion_order.push(project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(ordered(&state, |_| true))
    }

    async fn list_assigned_to(&self, user_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(ordered(&state, |project| project.is_assigned(user_id)))
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.remove(&id).is_none() {
            return Err(ProjectRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }
}
