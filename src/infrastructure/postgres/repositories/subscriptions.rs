use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        errors::{RepositoryError, RepositoryResult},
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus,
            pagination::{Page, PageRequest},
        },
    },
    infrastructure::postgres::{
        postgres_connection::{PgPoolSquad, run_blocking},
        schema::subscriptions,
    },
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn create_subscription(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> RepositoryResult<SubscriptionEntity> {
        run_blocking(&self.db_pool, move |conn| {
            insert_into(subscriptions::table)
                .values(&insert_subscription_entity)
                .returning(SubscriptionEntity::as_returning())
                .get_result::<SubscriptionEntity>(conn)
        })
        .await
    }

    async fn get_subscriptions_by_customer(
        &self,
        page_request: PageRequest,
        customer_id: Uuid,
    ) -> RepositoryResult<Page<SubscriptionEntity>> {
        run_blocking(&self.db_pool, move |conn| {
            let items = subscriptions::table
                .filter(subscriptions::customer_id.eq(customer_id))
                .select(SubscriptionEntity::as_select())
                .order((subscriptions::created_at.desc(), subscriptions::id.desc()))
                .limit(page_request.limit())
                .offset(page_request.offset())
                .load::<SubscriptionEntity>(conn)?;

            let total_count = subscriptions::table
                .filter(subscriptions::customer_id.eq(customer_id))
                .count()
                .get_result::<i64>(conn)?;

            Ok(Page::new(total_count, items))
        })
        .await
    }

    async fn get_active_subscription_by_customer(
        &self,
        customer_id: Uuid,
    ) -> RepositoryResult<SubscriptionEntity> {
        run_blocking(&self.db_pool, move |conn| {
            subscriptions::table
                .filter(subscriptions::customer_id.eq(customer_id))
                .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
                .select(SubscriptionEntity::as_select())
                .first::<SubscriptionEntity>(conn)
        })
        .await
    }

    async fn cancel_subscription(
        &self,
        subscription_id: Uuid,
        customer_id: Uuid,
    ) -> RepositoryResult<SubscriptionEntity> {
        let cancelled = run_blocking(&self.db_pool, move |conn| {
            // Single conditional UPDATE: concurrent cancels race in the store and
            // only one of them sees the ACTIVE row.
            update(
                subscriptions::table
                    .filter(subscriptions::id.eq(subscription_id))
                    .filter(subscriptions::customer_id.eq(customer_id))
                    .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string())),
            )
            .set((
                subscriptions::status.eq(SubscriptionStatus::Cancelled.to_string()),
                subscriptions::updated_at.eq(Utc::now()),
            ))
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(conn)
            .optional()
        })
        .await?;

        cancelled.ok_or(RepositoryError::NoMatch)
    }
}
