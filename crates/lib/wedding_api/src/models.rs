//! Request and response shapes of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wedding_core::models::user::User;
use wedding_core::models::wedding::{CountdownStatus, Wedding};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public projection of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub partner_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            partner_name: u.partner_name.clone(),
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserView,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub user: UserView,
}

// ---------------------------------------------------------------------------
// Weddings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct WeddingView {
    pub id: i64,
    pub user_id: i64,
    pub venue_name: String,
    pub venue_address: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub max_guests: i32,
    pub current_guest_count: i32,
    pub days_remaining: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Wedding> for WeddingView {
    fn from(w: &Wedding) -> Self {
        Self {
            id: w.id,
            user_id: w.user_id,
            venue_name: w.venue_name.clone(),
            venue_address: w.venue_address.clone(),
            event_date: w.event_date,
            event_time: w.event_time.clone(),
            max_guests: w.max_guests,
            current_guest_count: w.current_guest_count,
            days_remaining: w.days_remaining(),
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// Reduced projection used by the list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WeddingSummary {
    pub id: i64,
    pub venue_name: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub max_guests: i32,
    pub guest_count: i32,
    pub days_remaining: i64,
}

impl From<&Wedding> for WeddingSummary {
    fn from(w: &Wedding) -> Self {
        Self {
            id: w.id,
            venue_name: w.venue_name.clone(),
            event_date: w.event_date,
            event_time: w.event_time.clone(),
            max_guests: w.max_guests,
            guest_count: w.current_guest_count,
            days_remaining: w.days_remaining(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeddingResponse {
    pub wedding: WeddingView,
}

#[derive(Debug, Serialize)]
pub struct WeddingChangedResponse {
    pub message: String,
    pub wedding: WeddingView,
}

#[derive(Debug, Serialize)]
pub struct WeddingListResponse {
    pub weddings: Vec<WeddingSummary>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CountdownResponse {
    pub event_date: DateTime<Utc>,
    pub days_remaining: i64,
    pub status: CountdownStatus,
}

impl CountdownResponse {
    pub fn at(wedding: &Wedding, now: DateTime<Utc>) -> Self {
        Self {
            event_date: wedding.event_date,
            days_remaining: wedding.days_remaining_at(now),
            status: wedding.countdown_status_at(now),
        }
    }
}
