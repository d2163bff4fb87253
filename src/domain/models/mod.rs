pub mod user;
pub mod plan;
pub mod membership;
pub mod payment;
pub mod checkin;
pub mod metrics;
pub mod reports;
