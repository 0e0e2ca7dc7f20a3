//! Order types (read-only collaborator data)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// True if within valid WGS84 bounds
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Order entity as read from the orders collaborator.
///
/// This worker never writes orders; the fields beyond status and
/// coordinates are carried through for display only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub status: String,
    pub customer_name: Option<String>,
    pub address: Option<String>,

    // Coordinates (from geocoding; absent means the order is not routable)
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    pub amount: f64,
    pub payment_method: Option<String>,
    pub payment_breakdown: Option<serde_json::Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Coordinates when both components were geocoded
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            lat: self.lat?,
            lng: self.lng?,
        })
    }
}
