use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{plans::PlanEntity, subscriptions::{InsertSubscriptionEntity, SubscriptionEntity}};
use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub auto_renew: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            plan_id: value.plan_id,
            start_date: value.start_date,
            end_date: value.end_date,
            status: SubscriptionStatus::from_str(&value.status),
            auto_renew: value.auto_renew,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Body of `POST /customers/{customer_id}/subscribe`. The customer comes from
/// the path; a `customer_id` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertSubscriptionModel {
    pub plan_id: Uuid,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub auto_renew: Option<bool>,
}

impl InsertSubscriptionModel {
    /// Resolves the subscription window: `start_date` defaults to `now`,
    /// `end_date` to `start_date + plan.duration_days`.
    pub fn to_entity(
        &self,
        customer_id: Uuid,
        plan: &PlanEntity,
        now: DateTime<Utc>,
    ) -> Result<InsertSubscriptionEntity> {
        let start_date = self.start_date.unwrap_or(now);
        let end_date = match self.end_date {
            Some(end_date) => end_date,
            None => start_date
                .checked_add_signed(Duration::days(plan.duration_days.into()))
                .context("failed to compute subscription end date")?,
        };

        if end_date <= start_date {
            bail!("end_date must be after start_date");
        }

        Ok(InsertSubscriptionEntity {
            customer_id,
            plan_id: self.plan_id,
            start_date,
            end_date,
            status: self.status.unwrap_or_default().to_string(),
            auto_renew: self.auto_renew.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelSubscriptionQuery {
    pub subscription_id: Option<String>,
}
