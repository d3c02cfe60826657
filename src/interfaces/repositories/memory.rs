use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert, ProjectOverview, ProjectSummary},
    errors::AppError,
    repositories::project::ProjectRepository,
};

/// Process-local project store, kept in insertion order.
///
/// Backs the `memory` storage mode and the test suite. Each operation
/// takes the lock once, so single-document writes are atomic.
#[derive(Clone, Default)]
pub struct InMemoryProjectRepo {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError> {
        Ok(self.projects.read().iter().map(Project::to_summary).collect())
    }

    async fn get_project_overview(&self, id: &Uuid) -> Result<ProjectOverview, AppError> {
        self.projects
            .read()
            .iter()
            .find(|p| p.id == *id)
            .map(Project::to_overview)
            .ok_or_else(|| AppError::NotFound("Project overview not found".into()))
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        self.projects
            .read()
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let now = Utc::now();
        let stored = Project {
            id: Uuid::new_v4(),
            website_name: project.website_name.clone(),
            website_type: project.website_type.clone(),
            scroll_image_url: project.scroll_image_url.clone(),
            overview: project.overview.clone(),
            images_url: project.images_url.clone(),
            created_at: now,
            updated_at: now,
        };

        self.projects.write().push(stored.clone());
        Ok(stored)
    }

    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError> {
        let mut projects = self.projects.write();
        let stored = projects
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        stored.website_name = project.website_name.clone();
        stored.website_type = project.website_type.clone();
        stored.scroll_image_url = project.scroll_image_url.clone();
        stored.overview = project.overview.clone();
        stored.images_url = project.images_url.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let mut projects = self.projects.write();
        let position = projects
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        projects.remove(position);
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}
