use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// ACTIVE -> CANCELLED via cancellation, ACTIVE -> EXPIRED once the period has
/// elapsed. CANCELLED and EXPIRED are terminal.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Cancelled,
    Expired,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Expired => "EXPIRED",
        };
        write!(f, "{}", status)
    }
}

impl SubscriptionStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "ACTIVE" => SubscriptionStatus::Active,
            "CANCELLED" => SubscriptionStatus::Cancelled,
            "EXPIRED" => SubscriptionStatus::Expired,
            _ => SubscriptionStatus::Expired,
        }
    }
}
