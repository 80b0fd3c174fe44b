use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::events::InsertEventEntity,
    repositories::events::EventRepository,
    value_objects::events::EventModel,
};

#[derive(Debug, Error)]
pub enum EventError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl EventError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            EventError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct EventUseCase<E>
where
    E: EventRepository + Send + Sync + 'static,
{
    event_repo: Arc<E>,
}

impl<E> EventUseCase<E>
where
    E: EventRepository + Send + Sync + 'static,
{
    pub fn new(event_repo: Arc<E>) -> Self {
        Self { event_repo }
    }

    pub async fn list_events(&self, resource_id: Uuid) -> Result<Vec<EventModel>, EventError> {
        let events = self
            .event_repo
            .get_events_by_resource(resource_id)
            .await
            .map_err(|err| {
                error!(%resource_id, db_error = ?err, "events: failed to list events");
                EventError::Internal(err.into())
            })?;

        info!(%resource_id, event_count = events.len(), "events: events loaded");
        Ok(events.into_iter().map(EventModel::from).collect())
    }
}

/// Appends an audit event after the primary write has succeeded. A failure is
/// logged and swallowed: the primary write is already committed.
pub async fn record_event<E>(event_repo: &E, event_type: &str, resource_id: Uuid, payload: Value)
where
    E: EventRepository + Send + Sync + ?Sized,
{
    let insert_event_entity = InsertEventEntity {
        event_type: event_type.to_string(),
        resource_id,
        payload,
    };

    match event_repo.record_event(insert_event_entity).await {
        Ok(event) => info!(
            event_id = event.id,
            event_type,
            %resource_id,
            "events: event recorded"
        ),
        Err(err) => warn!(
            event_type,
            %resource_id,
            db_error = ?err,
            "events: failed to record event"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::events::EventEntity, errors::RepositoryError,
        repositories::events::MockEventRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::json;

    #[tokio::test]
    async fn record_event_swallows_store_failures() {
        let mut event_repo = MockEventRepository::new();
        event_repo
            .expect_record_event()
            .times(1)
            .returning(|_| Err(RepositoryError::StoreUnavailable("down".to_string())));

        record_event(&event_repo, "plan.created", Uuid::new_v4(), json!({})).await;
    }

    #[tokio::test]
    async fn list_events_maps_entities() {
        let resource_id = Uuid::new_v4();
        let mut event_repo = MockEventRepository::new();
        event_repo
            .expect_get_events_by_resource()
            .with(eq(resource_id))
            .returning(move |resource_id| {
                Ok(vec![EventEntity {
                    id: 7,
                    event_type: "subscription.created".to_string(),
                    resource_id,
                    payload: json!({ "status": "ACTIVE" }),
                    created_at: Utc::now(),
                }])
            });

        let usecase = EventUseCase::new(Arc::new(event_repo));
        let events = usecase.list_events(resource_id).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 7);
        assert_eq!(events[0].resource_id, resource_id);
    }

    #[tokio::test]
    async fn list_events_reports_store_errors_as_internal() {
        let mut event_repo = MockEventRepository::new();
        event_repo
            .expect_get_events_by_resource()
            .returning(|_| Err(RepositoryError::StoreUnavailable("down".to_string())));

        let usecase = EventUseCase::new(Arc::new(event_repo));
        let err = usecase.list_events(Uuid::new_v4()).await.unwrap_err();

        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
