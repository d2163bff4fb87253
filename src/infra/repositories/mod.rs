pub mod sqlite_user_repo;
pub mod sqlite_plan_repo;
pub mod sqlite_membership_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_checkin_repo;

pub mod postgres_user_repo;
pub mod postgres_plan_repo;
pub mod postgres_membership_repo;
pub mod postgres_payment_repo;
pub mod postgres_checkin_repo;
