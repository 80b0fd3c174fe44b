use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity},
    errors::RepositoryResult,
    value_objects::pagination::{Page, PageRequest},
};

#[automock]
#[async_trait]
pub trait PlanRepository {
    async fn create_plan(&self, insert_plan_entity: InsertPlanEntity) -> RepositoryResult<PlanEntity>;
    async fn get_plans(&self, page_request: PageRequest) -> RepositoryResult<Page<PlanEntity>>;
    async fn get_plan(&self, plan_id: Uuid) -> RepositoryResult<PlanEntity>;
    async fn update_plan(
        &self,
        plan_id: Uuid,
        update_plan_entity: UpdatePlanEntity,
    ) -> RepositoryResult<PlanEntity>;
}
