use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::events::EventUseCase,
    domain::repositories::events::EventRepository,
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{postgres_connection::PgPoolSquad, repositories::events::EventPostgres},
    },
};

use super::parse_uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let events_repository = EventPostgres::new(Arc::clone(&db_pool));
    let events_usecase = EventUseCase::new(Arc::new(events_repository));

    router(Arc::new(events_usecase))
}

pub fn router<E>(events_usecase: Arc<EventUseCase<E>>) -> Router
where
    E: EventRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/events/:resource_id", get(list_events::<E>))
        .with_state(events_usecase)
}

/// Audit trail of a plan or subscription, oldest first.
pub async fn list_events<E>(
    State(events_usecase): State<Arc<EventUseCase<E>>>,
    Path(resource_id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    E: EventRepository + Send + Sync + 'static,
{
    let resource_id = parse_uuid(&resource_id, "resource_id")?;
    let events = events_usecase.list_events(resource_id).await?;
    Ok((StatusCode::OK, Json(events)))
}
