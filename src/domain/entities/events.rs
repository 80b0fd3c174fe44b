use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::events;

/// Append-only audit row. Never updated once written.
#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = events)]
pub struct EventEntity {
    pub id: i64,
    pub event_type: String,
    pub resource_id: Uuid,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = events)]
pub struct InsertEventEntity {
    pub event_type: String,
    pub resource_id: Uuid,
    pub payload: Value,
}
