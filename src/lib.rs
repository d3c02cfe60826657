use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases, validation};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, telemetry, utils, web};

use repositories::project::ProjectRepository;
use use_cases::project::ProjectHandler;

pub struct AppState {
    pub project_handler: AppProjectHandler,
}

pub type AppProjectHandler = ProjectHandler<dyn ProjectRepository>;

impl AppState {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo),
        }
    }
}
