//! NATS message handlers

pub mod ping;
pub mod route;

use std::sync::Arc;

use anyhow::Result;
use async_nats::Client;
use sqlx::PgPool;
use tokio::select;
use tracing::{error, info};

use crate::services::active_route::ActiveRouteStore;

/// Start all message handlers
pub async fn start_handlers(client: Client, pool: PgPool) -> Result<()> {
    info!("Starting message handlers...");

    // The active route store is the only shared mutable state
    let store = Arc::new(ActiveRouteStore::new());

    // Subscribe to all subjects
    let ping_sub = client.subscribe("dispatch.ping").await?;
    let route_compute_sub = client.subscribe("dispatch.route.compute").await?;
    let route_publish_sub = client.subscribe("dispatch.route.publish").await?;
    let route_active_sub = client.subscribe("dispatch.route.active").await?;

    info!("Subscribed to NATS subjects");

    // Clone for each handler
    let client_ping = client.clone();
    let client_route_compute = client.clone();
    let client_route_publish = client.clone();
    let client_route_active = client.clone();

    let pool_route_compute = pool.clone();

    let store_publish = Arc::clone(&store);
    let store_active = Arc::clone(&store);

    // Spawn handlers
    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub).await
    });

    let route_compute_handle = tokio::spawn(async move {
        route::handle_compute(client_route_compute, route_compute_sub, pool_route_compute).await
    });

    let route_publish_handle = tokio::spawn(async move {
        route::handle_publish(client_route_publish, route_publish_sub, store_publish).await
    });

    let route_active_handle = tokio::spawn(async move {
        route::handle_active(client_route_active, route_active_sub, store_active).await
    });

    info!("All handlers started, waiting for messages...");

    // Wait for any handler to finish (which means an error occurred)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = route_compute_handle => {
            error!("Route compute handler finished: {:?}", result);
        }
        result = route_publish_handle => {
            error!("Route publish handler finished: {:?}", result);
        }
        result = route_active_handle => {
            error!("Route active handler finished: {:?}", result);
        }
    }

    Ok(())
}
