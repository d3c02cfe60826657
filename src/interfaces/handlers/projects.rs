use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{ProjectDraft, ProjectPatch},
    errors::AppError,
    handlers::envelope::ApiResponse,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_projects(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_summaries().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(projects)))
}

#[instrument(skip(state))]
pub async fn get_project_overview_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let overview = state.project_handler.get_overview(&project_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(overview)))
}

#[instrument(skip(state))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_full(&project_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(project)))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<ProjectDraft>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(project)))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectPatch>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .update(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(project)))
}

#[instrument(skip(state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete(&project_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Project deleted successfully")))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::failure(
        "We're sorry, because the requested resource was not found!",
    ))
}
