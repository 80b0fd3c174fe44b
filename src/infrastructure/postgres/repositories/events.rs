use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::events::{EventEntity, InsertEventEntity},
        errors::RepositoryResult,
        repositories::events::EventRepository,
    },
    infrastructure::postgres::{
        postgres_connection::{PgPoolSquad, run_blocking},
        schema::events,
    },
};

pub struct EventPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl EventPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl EventRepository for EventPostgres {
    async fn record_event(&self, insert_event_entity: InsertEventEntity) -> RepositoryResult<EventEntity> {
        run_blocking(&self.db_pool, move |conn| {
            insert_into(events::table)
                .values(&insert_event_entity)
                .returning(EventEntity::as_returning())
                .get_result::<EventEntity>(conn)
        })
        .await
    }

    async fn get_events_by_resource(&self, resource_id: Uuid) -> RepositoryResult<Vec<EventEntity>> {
        run_blocking(&self.db_pool, move |conn| {
            events::table
                .filter(events::resource_id.eq(resource_id))
                .select(EventEntity::as_select())
                .order(events::id.asc())
                .load::<EventEntity>(conn)
        })
        .await
    }
}
