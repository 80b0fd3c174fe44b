use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::events::{EventEntity, InsertEventEntity},
    errors::RepositoryResult,
};

#[automock]
#[async_trait]
pub trait EventRepository {
    async fn record_event(&self, insert_event_entity: InsertEventEntity) -> RepositoryResult<EventEntity>;
    async fn get_events_by_resource(&self, resource_id: Uuid) -> RepositoryResult<Vec<EventEntity>>;
}
