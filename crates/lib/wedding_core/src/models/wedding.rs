//! Weddings owned by a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column widths of the `weddings` text fields, in characters.
pub const MAX_VENUE_NAME_CHARS: usize = 200;
pub const MAX_VENUE_ADDRESS_CHARS: usize = 500;
pub const MAX_EVENT_TIME_CHARS: usize = 10;

/// A wedding field the store cannot hold.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} must be at most {max} characters")]
pub struct InvalidWedding {
    pub field: &'static str,
    pub max: usize,
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), InvalidWedding> {
    if value.chars().count() > max {
        return Err(InvalidWedding { field, max });
    }
    Ok(())
}

fn check_text_fields(
    venue_name: Option<&str>,
    venue_address: Option<&str>,
    event_time: Option<&str>,
) -> Result<(), InvalidWedding> {
    if let Some(v) = venue_name {
        check_len("venue_name", v, MAX_VENUE_NAME_CHARS)?;
    }
    if let Some(v) = venue_address {
        check_len("venue_address", v, MAX_VENUE_ADDRESS_CHARS)?;
    }
    if let Some(v) = event_time {
        check_len("event_time", v, MAX_EVENT_TIME_CHARS)?;
    }
    Ok(())
}

/// Stored wedding row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Wedding {
    pub id: i64,
    pub user_id: i64,
    pub venue_name: String,
    pub venue_address: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub max_guests: i32,
    pub current_guest_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a wedding sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownStatus {
    Upcoming,
    Today,
    Past,
}

impl Wedding {
    /// Whole days until the event, truncated toward zero.
    pub fn days_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        (self.event_date - now).num_days()
    }

    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_at(Utc::now())
    }

    pub fn countdown_status_at(&self, now: DateTime<Utc>) -> CountdownStatus {
        match self.days_remaining_at(now) {
            d if d < 0 => CountdownStatus::Past,
            0 => CountdownStatus::Today,
            _ => CountdownStatus::Upcoming,
        }
    }
}

/// Creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWedding {
    pub venue_name: String,
    pub venue_address: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    #[serde(default)]
    pub max_guests: i32,
}

impl NewWedding {
    /// Trim the text fields and check they fit their columns.
    pub fn validate(mut self) -> Result<Self, InvalidWedding> {
        self.venue_name = self.venue_name.trim().to_string();
        self.venue_address = self.venue_address.trim().to_string();
        self.event_time = self.event_time.trim().to_string();
        check_text_fields(
            Some(&self.venue_name),
            Some(&self.venue_address),
            Some(&self.event_time),
        )?;
        Ok(self)
    }
}

/// Partial update; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeddingUpdate {
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_time: Option<String>,
    pub max_guests: Option<i32>,
}

impl WeddingUpdate {
    pub fn validate(&self) -> Result<(), InvalidWedding> {
        check_text_fields(
            self.venue_name.as_deref().map(str::trim),
            self.venue_address.as_deref().map(str::trim),
            self.event_time.as_deref().map(str::trim),
        )
    }

    pub fn apply(self, wedding: &mut Wedding) {
        if let Some(v) = self.venue_name {
            wedding.venue_name = v.trim().to_string();
        }
        if let Some(v) = self.venue_address {
            wedding.venue_address = v.trim().to_string();
        }
        if let Some(v) = self.event_date {
            wedding.event_date = v;
        }
        if let Some(v) = self.event_time {
            wedding.event_time = v.trim().to_string();
        }
        if let Some(v) = self.max_guests {
            wedding.max_guests = v;
        }
    }
}
