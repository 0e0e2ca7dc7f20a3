//! Route planning pipeline
//!
//! Glues the tour constructor, 2-opt improver and schedule projector
//! behind a single validated entry point. Pure computation: the
//! caller collects the stops, this module never touches the database.

use thiserror::Error;

use crate::services::{geo, schedule, tour};
use crate::types::{Coordinates, RouteResult, Stop, Strategy};

/// Planning failure
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Planning parameters taken from the compute request
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    pub round_trip: bool,
    pub service_minutes: f64,
    pub avg_speed_kmh: f64,
    pub strategy: Strategy,
}

/// Check request fields before any computation or collaborator read
pub fn validate(start: &Coordinates, options: &PlanOptions) -> Result<(), RouteError> {
    if !start.is_valid() {
        return Err(RouteError::InvalidRequest(format!(
            "start coordinates out of range: lat={}, lng={}",
            start.lat, start.lng
        )));
    }
    if options.avg_speed_kmh <= 0.0 || !options.avg_speed_kmh.is_finite() {
        return Err(RouteError::InvalidRequest(format!(
            "avgSpeedKmh must be positive, got {}",
            options.avg_speed_kmh
        )));
    }
    if options.service_minutes < 0.0 || !options.service_minutes.is_finite() {
        return Err(RouteError::InvalidRequest(format!(
            "serviceMin must be non-negative, got {}",
            options.service_minutes
        )));
    }
    Ok(())
}

/// Plan a single delivery route over the given stops.
///
/// Deterministic for a fixed input. With two stops or fewer no
/// improvement pass can run, so the method reports "nearest" even
/// when 2-opt was requested.
pub fn plan_route(
    start: Coordinates,
    stops: Vec<Stop>,
    options: &PlanOptions,
) -> Result<RouteResult, RouteError> {
    validate(&start, options)?;

    if stops.is_empty() {
        return Ok(schedule::project(
            start,
            vec![],
            options.service_minutes,
            options.avg_speed_kmh,
            options.round_trip,
            Strategy::NearestOnly.as_str(),
        ));
    }

    // Matrix row 0 is the depot, row i + 1 is stops[i]
    let mut points = vec![start];
    points.extend(stops.iter().map(|s| s.coordinates));
    let matrix = geo::distance_matrix(&points);

    let mut order = tour::nearest_neighbor(&matrix, stops.len());

    let improved = options.strategy == Strategy::TwoOpt && stops.len() > 2;
    if improved {
        order = tour::two_opt(&matrix, order, options.round_trip);
    }

    let method = if improved { Strategy::TwoOpt } else { Strategy::NearestOnly };

    // Rearrange stops into visiting order
    let mut slots: Vec<Option<Stop>> = stops.into_iter().map(Some).collect();
    let ordered: Vec<Stop> = order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    Ok(schedule::project(
        start,
        ordered,
        options.service_minutes,
        options.avg_speed_kmh,
        options.round_trip,
        method.as_str(),
    ))
}
