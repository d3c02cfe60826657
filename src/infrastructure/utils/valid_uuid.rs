use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path identifier, rejecting anything that is not a UUID
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId)
}
