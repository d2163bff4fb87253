use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Checkin {
    pub id: String,
    pub user_id: String,
    /// Membership that justified admission; None on a denied attempt.
    pub membership_id: Option<String>,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Checkin {
    pub fn allowed(user_id: String, membership_id: String, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            membership_id: Some(membership_id),
            status: "ALLOWED".to_string(),
            timestamp: Utc::now(),
            notes,
        }
    }

    pub fn denied(user_id: String, note: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            membership_id: None,
            status: "DENIED".to_string(),
            timestamp: Utc::now(),
            notes: Some(note.to_string()),
        }
    }
}
