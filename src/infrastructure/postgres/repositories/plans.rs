use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity},
        errors::RepositoryResult,
        repositories::plans::PlanRepository,
        value_objects::pagination::{Page, PageRequest},
    },
    infrastructure::postgres::{
        postgres_connection::{PgPoolSquad, run_blocking},
        schema::plans,
    },
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create_plan(&self, insert_plan_entity: InsertPlanEntity) -> RepositoryResult<PlanEntity> {
        run_blocking(&self.db_pool, move |conn| {
            insert_into(plans::table)
                .values(&insert_plan_entity)
                .returning(PlanEntity::as_returning())
                .get_result::<PlanEntity>(conn)
        })
        .await
    }

    async fn get_plans(&self, page_request: PageRequest) -> RepositoryResult<Page<PlanEntity>> {
        run_blocking(&self.db_pool, move |conn| {
            let items = plans::table
                .select(PlanEntity::as_select())
                .order((plans::created_at.desc(), plans::id.desc()))
                .limit(page_request.limit())
                .offset(page_request.offset())
                .load::<PlanEntity>(conn)?;

            // Separate statement; may drift from `items` under concurrent inserts.
            let total_count = plans::table.count().get_result::<i64>(conn)?;

            Ok(Page::new(total_count, items))
        })
        .await
    }

    async fn get_plan(&self, plan_id: Uuid) -> RepositoryResult<PlanEntity> {
        run_blocking(&self.db_pool, move |conn| {
            plans::table
                .filter(plans::id.eq(plan_id))
                .select(PlanEntity::as_select())
                .first::<PlanEntity>(conn)
        })
        .await
    }

    async fn update_plan(
        &self,
        plan_id: Uuid,
        update_plan_entity: UpdatePlanEntity,
    ) -> RepositoryResult<PlanEntity> {
        run_blocking(&self.db_pool, move |conn| {
            update(plans::table.filter(plans::id.eq(plan_id)))
                .set(&update_plan_entity)
                .returning(PlanEntity::as_returning())
                .get_result::<PlanEntity>(conn)
        })
        .await
    }
}
