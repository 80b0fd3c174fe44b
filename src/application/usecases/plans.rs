use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::events::record_event,
    domain::{
        errors::RepositoryError,
        repositories::{events::EventRepository, plans::PlanRepository},
        value_objects::{
            events::{PLAN_CREATED, PLAN_UPDATED},
            pagination::{Page, PageRequest},
            plans::{InsertPlanModel, PlanModel, UpdatePlanModel},
        },
    },
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid plan: {0}")]
    Invalid(String),
    #[error("plan not found")]
    NotFound,
    #[error("plan violates a store constraint: {0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PlanError::Invalid(_) | PlanError::Conflict(_) => StatusCode::BAD_REQUEST,
            PlanError::NotFound => StatusCode::NOT_FOUND,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for PlanError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound | RepositoryError::NoMatch => PlanError::NotFound,
            RepositoryError::ConstraintViolation(detail) => PlanError::Conflict(detail),
            other => PlanError::Internal(other.into()),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PlanError>;

pub struct PlanUseCase<P, E>
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    event_repo: Arc<E>,
}

impl<P, E> PlanUseCase<P, E>
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, event_repo: Arc<E>) -> Self {
        Self {
            plan_repo,
            event_repo,
        }
    }

    pub async fn create_plan(&self, insert_plan_model: InsertPlanModel) -> UseCaseResult<PlanModel> {
        info!(code = %insert_plan_model.code, "plans: create plan requested");

        insert_plan_model.validate().map_err(|err| {
            warn!(code = %insert_plan_model.code, reason = %err, "plans: rejected invalid plan");
            PlanError::Invalid(err.to_string())
        })?;

        let plan = self
            .plan_repo
            .create_plan(insert_plan_model.to_entity(Utc::now()))
            .await
            .map_err(|err| {
                error!(
                    code = %insert_plan_model.code,
                    db_error = ?err,
                    "plans: failed to create plan"
                );
                PlanError::from(err)
            })?;

        info!(plan_id = %plan.id, code = %plan.code, "plans: plan created");

        record_event(
            self.event_repo.as_ref(),
            PLAN_CREATED,
            plan.id,
            json!({
                "code": plan.code,
                "name": plan.name,
                "price_cents": plan.price_cents,
                "currency": plan.currency,
            }),
        )
        .await;

        Ok(PlanModel::from(plan))
    }

    pub async fn list_plans(&self, page_request: PageRequest) -> UseCaseResult<Page<PlanModel>> {
        info!(
            page = page_request.page(),
            page_size = page_request.page_size(),
            "plans: listing plans"
        );

        let page = self
            .plan_repo
            .get_plans(page_request)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "plans: failed to list plans");
                PlanError::from(err)
            })?;

        info!(
            total_count = page.total_count,
            item_count = page.items.len(),
            "plans: plans loaded"
        );
        Ok(page.map(PlanModel::from))
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> UseCaseResult<PlanModel> {
        let plan = self.plan_repo.get_plan(plan_id).await.map_err(|err| {
            match err {
                RepositoryError::NotFound => info!(%plan_id, "plans: plan not found"),
                _ => error!(%plan_id, db_error = ?err, "plans: failed to load plan"),
            }
            PlanError::from(err)
        })?;

        Ok(PlanModel::from(plan))
    }

    pub async fn update_plan(
        &self,
        plan_id: Uuid,
        update_plan_model: UpdatePlanModel,
    ) -> UseCaseResult<PlanModel> {
        info!(%plan_id, "plans: update plan requested");

        update_plan_model.validate().map_err(|err| {
            warn!(%plan_id, reason = %err, "plans: rejected invalid plan update");
            PlanError::Invalid(err.to_string())
        })?;

        let plan = self
            .plan_repo
            .update_plan(plan_id, update_plan_model.to_entity(Utc::now()))
            .await
            .map_err(|err| {
                match err {
                    RepositoryError::NotFound => info!(%plan_id, "plans: plan to update not found"),
                    _ => error!(%plan_id, db_error = ?err, "plans: failed to update plan"),
                }
                PlanError::from(err)
            })?;

        info!(%plan_id, "plans: plan updated");

        record_event(
            self.event_repo.as_ref(),
            PLAN_UPDATED,
            plan.id,
            json!({
                "name": update_plan_model.name,
                "price_cents": update_plan_model.price_cents,
                "active": update_plan_model.active,
            }),
        )
        .await;

        Ok(PlanModel::from(plan))
    }
}
