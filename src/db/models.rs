use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub day: String,
    pub meal_type: String,
    pub item: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: i64,
    /// Submitter reference; null when the account is unknown.
    pub user_id: Option<i64>,
    pub name: String,
    pub meal_type: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
}

/// Feedback row joined with the submitter's username, for the admin view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackWithSubmitter {
    #[sqlx(flatten)]
    pub feedback: Feedback,
    pub username: Option<String>,
}

/// Per-meal-type rating aggregate shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: i64,
}
