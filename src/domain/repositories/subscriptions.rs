use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    errors::RepositoryResult,
    value_objects::pagination::{Page, PageRequest},
};

#[automock]
#[async_trait]
pub trait SubscriptionRepository {
    /// Fails with `ConstraintViolation` when the plan does not exist or the
    /// customer already holds an ACTIVE subscription.
    async fn create_subscription(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> RepositoryResult<SubscriptionEntity>;

    async fn get_subscriptions_by_customer(
        &self,
        page_request: PageRequest,
        customer_id: Uuid,
    ) -> RepositoryResult<Page<SubscriptionEntity>>;

    /// `NotFound` both when the customer has no subscriptions and when none of
    /// them is ACTIVE.
    async fn get_active_subscription_by_customer(
        &self,
        customer_id: Uuid,
    ) -> RepositoryResult<SubscriptionEntity>;

    /// Atomic ACTIVE -> CANCELLED transition. `NoMatch` when the subscription
    /// does not exist, belongs to another customer or is no longer ACTIVE.
    async fn cancel_subscription(
        &self,
        subscription_id: Uuid,
        customer_id: Uuid,
    ) -> RepositoryResult<SubscriptionEntity>;
}
