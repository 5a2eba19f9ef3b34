//! Planning records hanging off a wedding: guests, invites, budget,
//! expenses and fundraising.
//!
//! Shapes only. They mirror the tables created by the initial migration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Sent,
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub wedding_id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub invite_status: InviteStatus,
    /// How many people this guest may bring, themselves included.
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteChannel {
    Email,
    Whatsapp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub id: i64,
    pub wedding_id: i64,
    pub guest_id: i64,
    pub sent_at: Option<DateTime<Utc>>,
    pub sent_via: Option<InviteChannel>,
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One budget per wedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub wedding_id: i64,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_planned: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Decoration,
    Clothing,
    Photography,
    Music,
    Venue,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    #[default]
    Planned,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub wedding_id: i64,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
    pub status: ExpenseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of contribution. `Tie` and `Shoe` are the traditional auctions of
/// the groom's tie and the bride's shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundraisingKind {
    Gift,
    Tie,
    Shoe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fundraising {
    pub id: i64,
    pub wedding_id: i64,
    #[serde(rename = "type")]
    pub kind: FundraisingKind,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub observation: String,
    pub donor_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
