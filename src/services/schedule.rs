//! Schedule projection
//!
//! Walks a final visiting order and attaches per-stop distance,
//! drive time and ETA, plus route totals.

use crate::services::geo;
use crate::types::{Coordinates, RouteResult, RouteStopResult, Stop};

/// Project a visiting order into a scheduled route.
///
/// `eta_minutes` is the rounded arrival time in minutes from depot
/// departure; a stop's own service time elapses after its ETA, before
/// departing for the next stop. When `round_trip` is set a synthetic
/// return leg contributes to the totals without producing a stop
/// entry. `total_drive_minutes` covers driving only, never service.
pub fn project(
    start: Coordinates,
    ordered: Vec<Stop>,
    service_minutes: f64,
    avg_speed_kmh: f64,
    round_trip: bool,
    method: &str,
) -> RouteResult {
    let mut cumulative_minutes = 0.0;
    let mut total_drive_minutes = 0.0;
    let mut total_distance_km = 0.0;
    let mut previous = start;

    let mut stops = Vec::with_capacity(ordered.len());
    for (index, stop) in ordered.into_iter().enumerate() {
        let distance_from_prev_km = geo::haversine_distance(&previous, &stop.coordinates);
        let drive_minutes_from_prev = geo::drive_minutes(distance_from_prev_km, avg_speed_kmh);

        cumulative_minutes += drive_minutes_from_prev;
        let eta_minutes = cumulative_minutes.round() as i64;
        cumulative_minutes += service_minutes;

        total_drive_minutes += drive_minutes_from_prev;
        total_distance_km += distance_from_prev_km;
        previous = stop.coordinates;

        stops.push(RouteStopResult {
            stop,
            sequence_index: index + 1,
            distance_from_prev_km,
            drive_minutes_from_prev,
            eta_minutes,
        });
    }

    if round_trip && !stops.is_empty() {
        let return_km = geo::haversine_distance(&previous, &start);
        total_distance_km += return_km;
        total_drive_minutes += geo::drive_minutes(return_km, avg_speed_kmh);
    }

    RouteResult {
        stops,
        start,
        method: method.to_string(),
        total_distance_km,
        total_drive_minutes: total_drive_minutes.round() as i64,
    }
}
