use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::plans;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
    pub data_mb: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = plans)]
pub struct InsertPlanEntity {
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
    pub data_mb: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Only the mutable plan columns. `None` leaves the column untouched.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = plans)]
pub struct UpdatePlanEntity {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}
