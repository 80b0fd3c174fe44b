use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const MAX_PLAN_CODE_LEN: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanModel {
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

impl From<PlanEntity> for PlanModel {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id,
            code: value.code,
            name: value.name,
            price_cents: value.price_cents,
            currency: value.currency,
            duration_days: value.duration_days,
            data_mb: value.data_mb,
            active: value.active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_active() -> bool {
    true
}

/// Body of `POST /plans`. Identifier and timestamps are assigned server side,
/// so any such fields in the payload are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertPlanModel {
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub duration_days: i32,
    #[serde(default)]
    pub data_mb: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl InsertPlanModel {
    pub fn validate(&self) -> Result<()> {
        let code = self.code.trim();
        if code.is_empty() {
            bail!("code must not be empty");
        }
        if code.len() > MAX_PLAN_CODE_LEN {
            bail!("code must be at most {} characters", MAX_PLAN_CODE_LEN);
        }
        if self.name.trim().is_empty() {
            bail!("name must not be empty");
        }
        if self.price_cents < 0 {
            bail!("price_cents must not be negative");
        }
        if self.duration_days < 0 {
            bail!("duration_days must not be negative");
        }
        if self.data_mb < 0 {
            bail!("data_mb must not be negative");
        }
        validate_currency(&self.currency)?;
        Ok(())
    }

    pub fn to_entity(&self, now: DateTime<Utc>) -> InsertPlanEntity {
        InsertPlanEntity {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            price_cents: self.price_cents,
            currency: self.currency.trim().to_ascii_uppercase(),
            duration_days: self.duration_days,
            data_mb: self.data_mb,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /plans/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePlanModel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl UpdatePlanModel {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.price_cents.is_none() && self.active.is_none() {
            bail!("at least one of name, price_cents or active must be provided");
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                bail!("name must not be empty");
            }
        }
        if let Some(price_cents) = self.price_cents {
            if price_cents < 0 {
                bail!("price_cents must not be negative");
            }
        }
        Ok(())
    }

    pub fn to_entity(&self, now: DateTime<Utc>) -> UpdatePlanEntity {
        UpdatePlanEntity {
            name: self.name.as_ref().map(|name| name.trim().to_string()),
            price_cents: self.price_cents,
            active: self.active,
            updated_at: now,
        }
    }
}

fn validate_currency(currency: &str) -> Result<()> {
    let currency = currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("currency must be a three-letter ISO 4217 code");
    }
    Ok(())
}
