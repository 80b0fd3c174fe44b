#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum_test::TestServer;
use bss::{
    application::usecases::{
        events::EventUseCase, plans::PlanUseCase, subscriptions::SubscriptionUseCase,
    },
    domain::{
        entities::{
            events::{EventEntity, InsertEventEntity},
            plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity},
            subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        },
        errors::{RepositoryError, RepositoryResult},
        repositories::{
            events::EventRepository, plans::PlanRepository, subscriptions::SubscriptionRepository,
        },
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus,
            pagination::{Page, PageRequest},
        },
    },
    infrastructure::axum_http::{http_serve, routers},
};
use chrono::Utc;
use uuid::Uuid;

/// Store double that mirrors the table constraints: unique plan code, plan
/// foreign key and one ACTIVE subscription per customer.
#[derive(Default)]
pub struct InMemoryStore {
    plans: Mutex<Vec<PlanEntity>>,
    subscriptions: Mutex<Vec<SubscriptionEntity>>,
    events: Mutex<Vec<EventEntity>>,
    fail_events: AtomicBool,
}

impl InMemoryStore {
    pub fn fail_events(&self) {
        self.fail_events.store(true, Ordering::SeqCst);
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

/// Newest first. Rows are appended in creation order.
fn paginate<T: Clone>(rows: &[T], page_request: PageRequest) -> Page<T> {
    let items = rows
        .iter()
        .rev()
        .skip(page_request.offset() as usize)
        .take(page_request.limit() as usize)
        .cloned()
        .collect();

    Page::new(rows.len() as i64, items)
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn create_plan(&self, insert_plan_entity: InsertPlanEntity) -> RepositoryResult<PlanEntity> {
        let mut plans = self.plans.lock().unwrap();
        if plans.iter().any(|plan| plan.code == insert_plan_entity.code) {
            return Err(RepositoryError::ConstraintViolation("plans_code_key".to_string()));
        }

        let plan = PlanEntity {
            id: Uuid::new_v4(),
            code: insert_plan_entity.code,
            name: insert_plan_entity.name,
            price_cents: insert_plan_entity.price_cents,
            currency: insert_plan_entity.currency,
            duration_days: insert_plan_entity.duration_days,
            data_mb: insert_plan_entity.data_mb,
            active: insert_plan_entity.active,
            created_at: insert_plan_entity.created_at,
            updated_at: insert_plan_entity.updated_at,
        };
        plans.push(plan.clone());

        Ok(plan)
    }

    async fn get_plans(&self, page_request: PageRequest) -> RepositoryResult<Page<PlanEntity>> {
        Ok(paginate(self.plans.lock().unwrap().as_slice(), page_request))
    }

    async fn get_plan(&self, plan_id: Uuid) -> RepositoryResult<PlanEntity> {
        self.plans
            .lock()
            .unwrap()
            .iter()
            .find(|plan| plan.id == plan_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_plan(
        &self,
        plan_id: Uuid,
        update_plan_entity: UpdatePlanEntity,
    ) -> RepositoryResult<PlanEntity> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .iter_mut()
            .find(|plan| plan.id == plan_id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = update_plan_entity.name {
            plan.name = name;
        }
        if let Some(price_cents) = update_plan_entity.price_cents {
            plan.price_cents = price_cents;
        }
        if let Some(active) = update_plan_entity.active {
            plan.active = active;
        }
        plan.updated_at = update_plan_entity.updated_at;

        Ok(plan.clone())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn create_subscription(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> RepositoryResult<SubscriptionEntity> {
        let plan_exists = self
            .plans
            .lock()
            .unwrap()
            .iter()
            .any(|plan| plan.id == insert_subscription_entity.plan_id);
        if !plan_exists {
            return Err(RepositoryError::ConstraintViolation(
                "subscriptions_plan_id_fkey".to_string(),
            ));
        }

        let active = SubscriptionStatus::Active.to_string();
        let mut subscriptions = self.subscriptions.lock().unwrap();
        if insert_subscription_entity.status == active
            && subscriptions.iter().any(|subscription| {
                subscription.customer_id == insert_subscription_entity.customer_id
                    && subscription.status == active
            })
        {
            return Err(RepositoryError::ConstraintViolation(
                "subscriptions_one_active_per_customer".to_string(),
            ));
        }

        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            customer_id: insert_subscription_entity.customer_id,
            plan_id: insert_subscription_entity.plan_id,
            start_date: insert_subscription_entity.start_date,
            end_date: insert_subscription_entity.end_date,
            status: insert_subscription_entity.status,
            auto_renew: insert_subscription_entity.auto_renew,
            created_at: insert_subscription_entity.created_at,
            updated_at: insert_subscription_entity.updated_at,
        };
        subscriptions.push(subscription.clone());

        Ok(subscription)
    }

    async fn get_subscriptions_by_customer(
        &self,
        page_request: PageRequest,
        customer_id: Uuid,
    ) -> RepositoryResult<Page<SubscriptionEntity>> {
        let owned: Vec<SubscriptionEntity> = self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|subscription| subscription.customer_id == customer_id)
            .cloned()
            .collect();

        Ok(paginate(owned.as_slice(), page_request))
    }

    async fn get_active_subscription_by_customer(
        &self,
        customer_id: Uuid,
    ) -> RepositoryResult<SubscriptionEntity> {
        let active = SubscriptionStatus::Active.to_string();
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|subscription| {
                subscription.customer_id == customer_id && subscription.status == active
            })
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn cancel_subscription(
        &self,
        subscription_id: Uuid,
        customer_id: Uuid,
    ) -> RepositoryResult<SubscriptionEntity> {
        let active = SubscriptionStatus::Active.to_string();
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let subscription = subscriptions
            .iter_mut()
            .find(|subscription| {
                subscription.id == subscription_id
                    && subscription.customer_id == customer_id
                    && subscription.status == active
            })
            .ok_or(RepositoryError::NoMatch)?;

        subscription.status = SubscriptionStatus::Cancelled.to_string();
        subscription.updated_at = Utc::now();

        Ok(subscription.clone())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn record_event(&self, insert_event_entity: InsertEventEntity) -> RepositoryResult<EventEntity> {
        if self.fail_events.load(Ordering::SeqCst) {
            return Err(RepositoryError::StoreUnavailable("events table locked".to_string()));
        }

        let mut events = self.events.lock().unwrap();
        let event = EventEntity {
            id: events.len() as i64 + 1,
            event_type: insert_event_entity.event_type,
            resource_id: insert_event_entity.resource_id,
            payload: insert_event_entity.payload,
            created_at: Utc::now(),
        };
        events.push(event.clone());

        Ok(event)
    }

    async fn get_events_by_resource(&self, resource_id: Uuid) -> RepositoryResult<Vec<EventEntity>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.resource_id == resource_id)
            .cloned()
            .collect())
    }
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());

    let plans_usecase = PlanUseCase::new(Arc::clone(&store), Arc::clone(&store));
    let subscriptions_usecase =
        SubscriptionUseCase::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store));
    let events_usecase = EventUseCase::new(Arc::clone(&store));

    let app = http_serve::api_router(
        routers::plans::router(Arc::new(plans_usecase)),
        routers::subscriptions::router(Arc::new(subscriptions_usecase)),
        routers::events::router(Arc::new(events_usecase)),
    );

    let server = TestServer::new(app).expect("Failed to create test server");
    (server, store)
}
