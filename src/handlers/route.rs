//! Route optimization message handlers

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use sqlx::PgPool;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::db::queries;
use crate::defaults::{default_statuses, DEFAULT_AVG_SPEED_KMH, DEFAULT_SERVICE_MINUTES};
use crate::services::active_route::ActiveRouteStore;
use crate::services::planner::{self, PlanOptions, RouteError};
use crate::services::stops;
use crate::types::{
    Coordinates, ErrorResponse, Request, RouteResult, Strategy, SuccessResponse,
};

fn default_service_min() -> f64 {
    DEFAULT_SERVICE_MINUTES
}

fn default_avg_speed_kmh() -> f64 {
    DEFAULT_AVG_SPEED_KMH
}

fn default_strategy() -> Strategy {
    Strategy::TwoOpt
}

/// Request to compute a route from pending orders
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRouteRequest {
    pub start: Coordinates,
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,
    /// Optional explicit order subset; narrows eligibility, never widens it
    #[serde(default)]
    pub order_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub round_trip: bool,
    #[serde(default = "default_service_min")]
    pub service_min: f64,
    #[serde(default = "default_avg_speed_kmh")]
    pub avg_speed_kmh: f64,
    #[serde(default = "default_strategy")]
    pub opt: Strategy,
}

/// Handle route.compute messages
///
/// Collects geocoded orders matching the request and produces a
/// single ordered delivery route with per-stop distance, drive time
/// and ETA.
pub async fn handle_compute(
    client: Client,
    mut subscriber: Subscriber,
    pool: PgPool,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received route.compute message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<ComputeRouteRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse route.compute request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        let compute = &request.payload;
        let options = PlanOptions {
            round_trip: compute.round_trip,
            service_minutes: compute.service_min,
            avg_speed_kmh: compute.avg_speed_kmh,
            strategy: compute.opt,
        };

        // Reject bad requests before touching the collaborator
        if let Err(e) = planner::validate(&compute.start, &options) {
            warn!("Rejected route.compute request: {}", e);
            let error = ErrorResponse::new(request.id, "INVALID_REQUEST", e.to_string());
            let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
            continue;
        }

        // Read candidate orders from the collaborator
        let orders = match queries::order::list_orders_by_status(&pool, &compute.statuses).await {
            Ok(orders) => orders,
            Err(e) => {
                error!("Failed to load orders: {}", e);
                let error = ErrorResponse::new(request.id, "DATABASE_ERROR", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        let explicit_ids: Option<HashSet<Uuid>> = compute
            .order_ids
            .as_ref()
            .map(|ids| ids.iter().copied().collect());
        let eligible = stops::collect(orders, &compute.statuses, explicit_ids.as_ref());

        match planner::plan_route(compute.start, eligible, &options) {
            Ok(route) => {
                info!(
                    "Route computed: {} stops, {:.1} km, {} min, method={}",
                    route.stops.len(),
                    route.total_distance_km,
                    route.total_drive_minutes,
                    route.method
                );
                let response = SuccessResponse::new(request.id, route);
                let _ = client.publish(reply, serde_json::to_vec(&response)?.into()).await;
            }
            Err(e @ RouteError::InvalidRequest(_)) => {
                warn!("Rejected route.compute request: {}", e);
                let error = ErrorResponse::new(request.id, "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
            }
        }
    }

    Ok(())
}

/// Request to publish a driver's chosen route
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRouteRequest {
    pub driver: String,
    #[serde(flatten)]
    pub route: RouteResult,
}

/// Response after publishing a route
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRouteResponse {
    pub published: bool,
}

/// Handle route.publish messages
///
/// Overwrites the driver's previously published route, if any.
pub async fn handle_publish(
    client: Client,
    mut subscriber: Subscriber,
    store: Arc<ActiveRouteStore>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received route.publish message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<PublishRouteRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse route.publish request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        let payload = request.payload;
        if payload.driver.trim().is_empty() {
            let error = ErrorResponse::new(request.id, "INVALID_REQUEST", "driver key is required");
            let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
            continue;
        }

        let active = store.publish(&payload.driver, payload.route);
        info!(
            "Published route for driver '{}': {} stops, {:.1} km",
            active.driver_key,
            active.route.stops.len(),
            active.route.total_distance_km
        );

        let response = SuccessResponse::new(request.id, PublishRouteResponse { published: true });
        let _ = client.publish(reply, serde_json::to_vec(&response)?.into()).await;
    }

    Ok(())
}

/// Request for a driver's currently published route
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetActiveRouteRequest {
    pub driver: String,
}

/// Handle route.active messages
///
/// Replies with the last published route for the driver, or a
/// NOT_FOUND error when the driver never published one — callers
/// render that as an empty state, not a failure.
pub async fn handle_active(
    client: Client,
    mut subscriber: Subscriber,
    store: Arc<ActiveRouteStore>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received route.active message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<GetActiveRouteRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse route.active request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        let driver = &request.payload.driver;
        match store.get_active(driver) {
            Some(active) => {
                debug!("Returning active route for driver '{}'", driver);
                let response = SuccessResponse::new(request.id, active);
                let _ = client.publish(reply, serde_json::to_vec(&response)?.into()).await;
            }
            None => {
                debug!("No active route for driver '{}'", driver);
                let error = ErrorResponse::new(
                    request.id,
                    "NOT_FOUND",
                    format!("no active route published for driver '{}'", driver),
                );
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
            }
        }
    }

    Ok(())
}
