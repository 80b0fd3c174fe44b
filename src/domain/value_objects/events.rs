use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::events::EventEntity;

pub const PLAN_CREATED: &str = "plan.created";
pub const PLAN_UPDATED: &str = "plan.updated";
pub const SUBSCRIPTION_CREATED: &str = "subscription.created";
pub const SUBSCRIPTION_CANCELLED: &str = "subscription.cancelled";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventModel {
    pub id: i64,
    pub event_type: String,
    pub resource_id: Uuid,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

impl From<EventEntity> for EventModel {
    fn from(value: EventEntity) -> Self {
        Self {
            id: value.id,
            event_type: value.event_type,
            resource_id: value.resource_id,
            payload: value.payload,
            created_at: value.created_at,
        }
    }
}
