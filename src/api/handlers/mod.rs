pub mod health;
pub mod user;
pub mod plan;
pub mod membership;
pub mod payment;
pub mod checkin;
pub mod dashboard;
pub mod realtime;
