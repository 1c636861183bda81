//! In-app notification model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// One of booking, cancellation, review, system, payout
    #[serde(default)]
    pub notif_type: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}
