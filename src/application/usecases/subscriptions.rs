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
        repositories::{
            events::EventRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::{
            events::{SUBSCRIPTION_CANCELLED, SUBSCRIPTION_CREATED},
            pagination::{Page, PageRequest},
            subscriptions::{InsertSubscriptionModel, SubscriptionModel},
        },
    },
};

/// Partial unique index allowing one ACTIVE subscription per customer.
pub const ONE_ACTIVE_PER_CUSTOMER_CONSTRAINT: &str = "subscriptions_one_active_per_customer";

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("invalid subscription: {0}")]
    Invalid(String),
    #[error("plan {0} does not exist")]
    UnknownPlan(Uuid),
    #[error("customer already has an active subscription")]
    AlreadyActive,
    #[error("subscription violates a store constraint: {0}")]
    Conflict(String),
    #[error("no active subscription for customer")]
    NoActiveSubscription,
    /// Already cancelled, expired, owned by another customer or nonexistent:
    /// the conditional update cannot tell these apart.
    #[error("no matching active subscription to cancel")]
    NotCancellable,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::Invalid(_)
            | SubscriptionError::UnknownPlan(_)
            | SubscriptionError::AlreadyActive
            | SubscriptionError::Conflict(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::NoActiveSubscription => StatusCode::NOT_FOUND,
            SubscriptionError::NotCancellable | SubscriptionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<P, S, E>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
    event_repo: Arc<E>,
}

impl<P, S, E> SubscriptionUseCase<P, S, E>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, subscription_repo: Arc<S>, event_repo: Arc<E>) -> Self {
        Self {
            plan_repo,
            subscription_repo,
            event_repo,
        }
    }

    /// Reads the plan first (read-only, nothing to undo), then inserts. The
    /// foreign key still guards against a plan vanishing in between.
    pub async fn subscribe(
        &self,
        customer_id: Uuid,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<SubscriptionModel> {
        let plan_id = insert_subscription_model.plan_id;
        info!(%customer_id, %plan_id, "subscriptions: subscribe requested");

        let plan = match self.plan_repo.get_plan(plan_id).await {
            Ok(plan) => plan,
            Err(RepositoryError::NotFound) => {
                let err = SubscriptionError::UnknownPlan(plan_id);
                warn!(
                    %customer_id,
                    %plan_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: plan does not exist"
                );
                return Err(err);
            }
            Err(err) => {
                error!(
                    %customer_id,
                    %plan_id,
                    db_error = ?err,
                    "subscriptions: failed to load plan for subscribe"
                );
                return Err(SubscriptionError::Internal(err.into()));
            }
        };

        let insert_subscription_entity = insert_subscription_model
            .to_entity(customer_id, &plan, Utc::now())
            .map_err(|err| {
                warn!(%customer_id, %plan_id, reason = %err, "subscriptions: rejected invalid subscription");
                SubscriptionError::Invalid(err.to_string())
            })?;

        let subscription = self
            .subscription_repo
            .create_subscription(insert_subscription_entity)
            .await
            .map_err(|err| match err {
                RepositoryError::ConstraintViolation(detail)
                    if detail.contains(ONE_ACTIVE_PER_CUSTOMER_CONSTRAINT) =>
                {
                    warn!(%customer_id, %plan_id, "subscriptions: customer already has an active subscription");
                    SubscriptionError::AlreadyActive
                }
                RepositoryError::ConstraintViolation(detail) if detail.contains("plan_id") => {
                    warn!(%customer_id, %plan_id, "subscriptions: plan disappeared before insert");
                    SubscriptionError::UnknownPlan(plan_id)
                }
                RepositoryError::ConstraintViolation(detail) => {
                    warn!(%customer_id, %plan_id, constraint = %detail, "subscriptions: constraint violation on insert");
                    SubscriptionError::Conflict(detail)
                }
                err => {
                    error!(
                        %customer_id,
                        %plan_id,
                        db_error = ?err,
                        "subscriptions: failed to create subscription"
                    );
                    SubscriptionError::Internal(err.into())
                }
            })?;

        info!(
            %customer_id,
            %plan_id,
            subscription_id = %subscription.id,
            "subscriptions: subscription created"
        );

        record_event(
            self.event_repo.as_ref(),
            SUBSCRIPTION_CREATED,
            subscription.id,
            json!({
                "customer_id": subscription.customer_id,
                "plan_id": subscription.plan_id,
                "status": subscription.status,
                "start_date": subscription.start_date,
                "end_date": subscription.end_date,
            }),
        )
        .await;

        Ok(SubscriptionModel::from(subscription))
    }

    pub async fn list_subscriptions(
        &self,
        customer_id: Uuid,
        page_request: PageRequest,
    ) -> UseCaseResult<Page<SubscriptionModel>> {
        info!(
            %customer_id,
            page = page_request.page(),
            page_size = page_request.page_size(),
            "subscriptions: listing subscriptions for customer"
        );

        let page = self
            .subscription_repo
            .get_subscriptions_by_customer(page_request, customer_id)
            .await
            .map_err(|err| {
                error!(
                    %customer_id,
                    db_error = ?err,
                    "subscriptions: failed to list subscriptions"
                );
                SubscriptionError::Internal(err.into())
            })?;

        Ok(page.map(SubscriptionModel::from))
    }

    pub async fn get_active_subscription(
        &self,
        customer_id: Uuid,
    ) -> UseCaseResult<SubscriptionModel> {
        match self
            .subscription_repo
            .get_active_subscription_by_customer(customer_id)
            .await
        {
            Ok(subscription) => Ok(SubscriptionModel::from(subscription)),
            Err(RepositoryError::NotFound) => {
                info!(%customer_id, "subscriptions: no active subscription");
                Err(SubscriptionError::NoActiveSubscription)
            }
            Err(err) => {
                error!(
                    %customer_id,
                    db_error = ?err,
                    "subscriptions: failed to load active subscription"
                );
                Err(SubscriptionError::Internal(err.into()))
            }
        }
    }

    pub async fn cancel_subscription(
        &self,
        customer_id: Uuid,
        subscription_id: Uuid,
    ) -> UseCaseResult<()> {
        info!(%customer_id, %subscription_id, "subscriptions: cancel requested");

        let subscription = match self
            .subscription_repo
            .cancel_subscription(subscription_id, customer_id)
            .await
        {
            Ok(subscription) => subscription,
            Err(RepositoryError::NoMatch) | Err(RepositoryError::NotFound) => {
                let err = SubscriptionError::NotCancellable;
                warn!(
                    %customer_id,
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: nothing to cancel"
                );
                return Err(err);
            }
            Err(err) => {
                error!(
                    %customer_id,
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to cancel subscription"
                );
                return Err(SubscriptionError::Internal(err.into()));
            }
        };

        info!(%customer_id, %subscription_id, "subscriptions: subscription cancelled");

        record_event(
            self.event_repo.as_ref(),
            SUBSCRIPTION_CANCELLED,
            subscription.id,
            json!({
                "customer_id": subscription.customer_id,
                "plan_id": subscription.plan_id,
                "status": subscription.status,
            }),
        )
        .await;

        Ok(())
    }
}
