use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    entities::project::{
        Project, ProjectDraft, ProjectInsert, ProjectOverview, ProjectPatch, ProjectSummary,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

/// CRUD façade over project documents. Every write path goes through
/// validation before the repository sees it.
pub struct ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub project_repo: Arc<R>,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub fn new(project_repo: Arc<R>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Lists every project reduced to its summary fields
    pub async fn list_summaries(&self) -> Result<Vec<ProjectSummary>, AppError> {
        self.project_repo.list_project_summaries().await
    }

    /// Retrieves the overview projection of a project by its ID
    pub async fn get_overview(&self, id: &str) -> Result<ProjectOverview, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_overview(&valid_id).await
    }

    /// Retrieves a whole project by its ID
    pub async fn get_full(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_by_id(&valid_id).await
    }

    /// Validates and stores a new project
    pub async fn create(&self, candidate: ProjectDraft) -> Result<Project, AppError> {
        let insert = validated(candidate)?;

        let project = self.project_repo.create_project(&insert).await?;

        info!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Applies a partial or full update; the merged document must be valid
    pub async fn update(&self, id: &str, patch: ProjectPatch) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;

        let current = self.project_repo.get_project_by_id(&valid_id).await?;
        let insert = validated(patch.merge_into(current))?;

        let project = self.project_repo.update_project(&valid_id, &insert).await?;

        info!(project_id = %project.id, "project updated");
        Ok(project)
    }

    /// Deletes a project by its ID
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;

        self.project_repo.delete_project(&valid_id).await?;

        info!(project_id = %valid_id, "project deleted");
        Ok(())
    }
}

fn validated(candidate: ProjectDraft) -> Result<ProjectInsert, AppError> {
    ProjectInsert::try_from(candidate).map_err(|errors| {
        warn!(failures = errors.len(), "project rejected by validation");
        AppError::from(errors)
    })
}
