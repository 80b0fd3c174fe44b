pub mod postgres_connection;
pub mod postgres_errors;
pub mod repositories;
pub mod schema;
