pub mod enums;
pub mod events;
pub mod pagination;
pub mod plans;
pub mod subscriptions;
