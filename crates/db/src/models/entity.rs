//! `FromRow` structs for the five importable entity tables.

use batohi_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

// ── Places ───────────────────────────────────────────────────────────

/// A row from the `places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Place {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub address: Option<String>,
    /// `{ "latitude": .., "longitude": .. }` when known.
    pub location: Option<serde_json::Value>,
    pub entry_fee: Option<f64>,
    pub opening_hours: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ── Hotels ───────────────────────────────────────────────────────────

/// A row from the `hotels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hotel {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub star_rating: Option<i32>,
    pub price_per_night: Option<f64>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub contact: Option<serde_json::Value>,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ── Restaurants ──────────────────────────────────────────────────────

/// A row from the `restaurants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub cuisines: Vec<String>,
    pub price_range: Option<String>,
    pub rating: Option<f64>,
    pub opening_hours: Option<String>,
    pub contact: Option<serde_json::Value>,
    pub is_vegetarian_friendly: bool,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ── Festivals ────────────────────────────────────────────────────────

/// A row from the `festivals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Festival {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub significance: Option<String>,
    pub images: Vec<String>,
    pub is_public_holiday: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ── Vehicles ─────────────────────────────────────────────────────────

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub name: String,
    pub vehicle_type: String,
    pub capacity: Option<i32>,
    pub price_per_day: Option<f64>,
    pub driver_included: bool,
    pub features: Vec<String>,
    pub contact: Option<serde_json::Value>,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
