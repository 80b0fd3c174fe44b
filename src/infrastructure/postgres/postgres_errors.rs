use anyhow::anyhow;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::RepositoryError;

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation => {
                    let detail = match info.constraint_name() {
                        Some(constraint) => constraint.to_string(),
                        None => info.message().to_string(),
                    };
                    RepositoryError::ConstraintViolation(detail)
                }
                DatabaseErrorKind::ClosedConnection => {
                    RepositoryError::StoreUnavailable(info.message().to_string())
                }
                _ => RepositoryError::Internal(anyhow!("database error: {}", info.message())),
            },
            other => RepositoryError::Internal(anyhow!(other)),
        }
    }
}
