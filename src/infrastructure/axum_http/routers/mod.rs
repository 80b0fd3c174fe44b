pub mod events;
pub mod plans;
pub mod subscriptions;

use uuid::Uuid;

use super::error_responses::AppError;

/// Accepts only the canonical hyphenated form (`8-4-4-4-12`).
pub(crate) fn parse_uuid(raw: &str, field: &str) -> Result<Uuid, AppError> {
    if raw.len() != 36 {
        return Err(AppError::BadRequest(format!("invalid {field}")));
    }

    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid {field}")))
}
