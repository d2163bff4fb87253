pub mod admission;
pub mod calendar;
pub mod checkin_service;
pub mod dashboard;
pub mod finance;
pub mod membership_service;
