use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    domain::{
        repositories::{
            events::EventRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::{
            pagination::PaginationQuery,
            subscriptions::{CancelSubscriptionQuery, InsertSubscriptionModel},
        },
    },
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                events::EventPostgres, plans::PlanPostgres, subscriptions::SubscriptionPostgres,
            },
        },
    },
};

use super::parse_uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plans_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscriptions_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let events_repository = EventPostgres::new(Arc::clone(&db_pool));
    let subscriptions_usecase = SubscriptionUseCase::new(
        Arc::new(plans_repository),
        Arc::new(subscriptions_repository),
        Arc::new(events_repository),
    );

    router(Arc::new(subscriptions_usecase))
}

pub fn router<P, S, E>(subscriptions_usecase: Arc<SubscriptionUseCase<P, S, E>>) -> Router
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/customers/:customer_id/subscribe", post(subscribe::<P, S, E>))
        .route(
            "/customers/:customer_id/subscriptions",
            get(list_subscriptions::<P, S, E>),
        )
        .route(
            "/customers/:customer_id/subscriptions/active",
            get(get_active_subscription::<P, S, E>),
        )
        .route(
            "/customers/:customer_id/unsubscribe",
            post(cancel_subscription::<P, S, E>),
        )
        .with_state(subscriptions_usecase)
}

pub async fn subscribe<P, S, E>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, E>>>,
    Path(customer_id): Path<String>,
    payload: Result<Json<InsertSubscriptionModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let customer_id = parse_uuid(&customer_id, "customer_id")?;
    let Json(insert_subscription_model) = payload.map_err(|rejection| {
        warn!(%customer_id, reason = %rejection.body_text(), "subscriptions: invalid subscribe body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let subscription = subscriptions_usecase
        .subscribe(customer_id, insert_subscription_model)
        .await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn list_subscriptions<P, S, E>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, E>>>,
    Path(customer_id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let customer_id = parse_uuid(&customer_id, "customer_id")?;
    let page = subscriptions_usecase
        .list_subscriptions(customer_id, pagination.into())
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

pub async fn get_active_subscription<P, S, E>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, E>>>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let customer_id = parse_uuid(&customer_id, "customer_id")?;
    let subscription = subscriptions_usecase
        .get_active_subscription(customer_id)
        .await?;

    Ok((StatusCode::OK, Json(subscription)))
}

pub async fn cancel_subscription<P, S, E>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, E>>>,
    Path(customer_id): Path<String>,
    Query(query): Query<CancelSubscriptionQuery>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let customer_id = parse_uuid(&customer_id, "customer_id")?;
    let subscription_id = match query.subscription_id.as_deref() {
        Some(raw) if !raw.is_empty() => parse_uuid(raw, "subscription_id")?,
        _ => return Err(AppError::BadRequest("subscription_id is required".to_string())),
    };

    subscriptions_usecase
        .cancel_subscription(customer_id, subscription_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
