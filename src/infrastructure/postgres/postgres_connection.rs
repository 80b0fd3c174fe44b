use std::sync::Arc;

use anyhow::{Result, anyhow};
use diesel::{
    Connection, PgConnection,
    connection::CacheSize,
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};
use tokio::task;

use crate::domain::errors::{RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct DisablePreparedStatements;

impl CustomizeConnection<PgConnection, R2d2Error> for DisablePreparedStatements {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        conn.set_prepared_statement_cache_size(CacheSize::Disabled);
        Ok(())
    }
}

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

pub fn establish_connection(database_url: &str, max_size: u32) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(DisablePreparedStatements))
        .build(manager)?;
    Ok(pool)
}

/// Checks out a pooled connection and runs `query` on the blocking threadpool.
/// Diesel is synchronous and must not stall the Tokio workers.
pub async fn run_blocking<T, F>(db_pool: &Arc<PgPoolSquad>, query: F) -> RepositoryResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> diesel::QueryResult<T> + Send + 'static,
{
    let db_pool = Arc::clone(db_pool);

    task::spawn_blocking(move || -> RepositoryResult<T> {
        let mut conn = db_pool
            .get()
            .map_err(|err| RepositoryError::StoreUnavailable(err.to_string()))?;

        Ok(query(&mut conn)?)
    })
    .await
    .map_err(|err| RepositoryError::Internal(anyhow!("database task failed: {}", err)))?
}
