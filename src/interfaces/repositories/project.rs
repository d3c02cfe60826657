use async_trait::async_trait;
use sqlx::{self, types::Json, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::{
    entities::project::{
        Project, ProjectInsert, ProjectOverview, ProjectOverviewRow, ProjectRow, ProjectSummary,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = "id, website_name, website_type, scroll_image_url, \
     overview, images_url, created_at, updated_at";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists every project with only the summary columns, oldest first
    async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError>;

    /// Retrieves the overview projection of a project
    async fn get_project_overview(&self, id: &Uuid) -> Result<ProjectOverview, AppError>;

    /// Retrieves a whole project document
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;

    /// Stores a validated project, assigning its id and timestamps
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;

    /// Replaces the stored body of a project and refreshes `updated_at`
    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError>;

    /// Removes a project together with its embedded tree
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;

    async fn check_connection(&self) -> Result<(), AppError>;

    /// Releases the backing connections
    async fn close(&self);
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError> {
        let summaries = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT id, website_name, website_type, scroll_image_url
            FROM projects
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn get_project_overview(&self, id: &Uuid) -> Result<ProjectOverview, AppError> {
        let row = sqlx::query_as::<_, ProjectOverviewRow>(
            r#"
            SELECT id, website_name, overview
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project overview not found".into()))?;

        Ok(row.into())
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(row.into())
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (
                id, website_name, website_type, scroll_image_url, overview, images_url
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&project.website_name)
        .bind(&project.website_type)
        .bind(&project.scroll_image_url)
        .bind(Json(&project.overview))
        .bind(Json(&project.images_url))
        .fetch_one(&self.pool)
        .await?;

        debug!(project_id = %id, "project inserted");
        Ok(row.into())
    }

    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects SET
                website_name = $1,
                website_type = $2,
                scroll_image_url = $3,
                overview = $4,
                images_url = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.website_name)
        .bind(&project.website_type)
        .bind(&project.scroll_image_url)
        .bind(Json(&project.overview))
        .bind(Json(&project.images_url))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        debug!(project_id = %id, "project updated");
        Ok(row.into())
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        debug!(project_id = %id, "project deleted");
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
