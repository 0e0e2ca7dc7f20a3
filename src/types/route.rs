//! Route types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Coordinates;

/// Optimization strategy requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "nearest")]
    NearestOnly,
    #[serde(rename = "2opt")]
    TwoOpt,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::NearestOnly => "nearest",
            Strategy::TwoOpt => "2opt",
        }
    }
}

/// A deliverable order candidate, built fresh for every optimization
/// request and discarded once the response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub payment_breakdown: Option<serde_json::Value>,
}

/// A stop with its position in the computed visiting order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopResult {
    #[serde(flatten)]
    pub stop: Stop,
    /// 1-based position after the depot
    pub sequence_index: usize,
    pub distance_from_prev_km: f64,
    pub drive_minutes_from_prev: f64,
    /// Cumulative minutes from depot departure at arrival, including
    /// service time of all prior stops but not this stop's own
    pub eta_minutes: i64,
}

/// Result of route optimization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub stops: Vec<RouteStopResult>,
    pub start: Coordinates,
    /// Strategy that actually ran: "nearest" or "2opt"
    pub method: String,
    pub total_distance_km: f64,
    /// Rounded sum of drive legs only; service time excluded
    pub total_drive_minutes: i64,
}

/// The most recently published route for one driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRoute {
    /// Same wire name as the publish request's driver field
    #[serde(rename = "driver")]
    pub driver_key: String,
    #[serde(flatten)]
    pub route: RouteResult,
    pub published_at: DateTime<Utc>,
}
