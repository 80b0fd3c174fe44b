pub mod events;
pub mod plans;
pub mod subscriptions;
