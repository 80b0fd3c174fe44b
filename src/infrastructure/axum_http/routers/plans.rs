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
    application::usecases::plans::PlanUseCase,
    domain::{
        repositories::{events::EventRepository, plans::PlanRepository},
        value_objects::{
            pagination::PaginationQuery,
            plans::{InsertPlanModel, UpdatePlanModel},
        },
    },
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{events::EventPostgres, plans::PlanPostgres},
        },
    },
};

use super::parse_uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plans_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let events_repository = EventPostgres::new(Arc::clone(&db_pool));
    let plans_usecase = PlanUseCase::new(Arc::new(plans_repository), Arc::new(events_repository));

    router(Arc::new(plans_usecase))
}

pub fn router<P, E>(plans_usecase: Arc<PlanUseCase<P, E>>) -> Router
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/plans", post(create_plan::<P, E>).get(list_plans::<P, E>))
        .route("/plans/:id", get(get_plan::<P, E>).put(update_plan::<P, E>))
        .with_state(plans_usecase)
}

pub async fn create_plan<P, E>(
    State(plans_usecase): State<Arc<PlanUseCase<P, E>>>,
    payload: Result<Json<InsertPlanModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let Json(insert_plan_model) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "plans: invalid create plan body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let plan = plans_usecase.create_plan(insert_plan_model).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn list_plans<P, E>(
    State(plans_usecase): State<Arc<PlanUseCase<P, E>>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let page = plans_usecase.list_plans(pagination.into()).await?;
    Ok((StatusCode::OK, Json(page)))
}

pub async fn get_plan<P, E>(
    State(plans_usecase): State<Arc<PlanUseCase<P, E>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let plan_id = parse_uuid(&id, "plan id")?;
    let plan = plans_usecase.get_plan(plan_id).await?;
    Ok((StatusCode::OK, Json(plan)))
}

pub async fn update_plan<P, E>(
    State(plans_usecase): State<Arc<PlanUseCase<P, E>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePlanModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    let plan_id = parse_uuid(&id, "plan id")?;
    let Json(update_plan_model) = payload.map_err(|rejection| {
        warn!(%plan_id, reason = %rejection.body_text(), "plans: invalid update plan body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let plan = plans_usecase.update_plan(plan_id, update_plan_model).await?;
    Ok((StatusCode::OK, Json(plan)))
}
