//! Active route store
//!
//! Keeps the most recently published route per driver key so the
//! admin board can observe the live route. Present/absent per key,
//! last write wins, entries are never deleted.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::types::{ActiveRoute, RouteResult};

/// In-memory keyed store, safe for concurrent publish and read.
///
/// A single lock is enough: writes happen once per driver per
/// route-planning session.
#[derive(Debug, Default)]
pub struct ActiveRouteStore {
    routes: RwLock<HashMap<String, ActiveRoute>>,
}

impl ActiveRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a route for a driver, replacing any prior route
    pub fn publish(&self, driver_key: &str, route: RouteResult) -> ActiveRoute {
        let active = ActiveRoute {
            driver_key: driver_key.to_string(),
            route,
            published_at: Utc::now(),
        };
        self.routes
            .write()
            .insert(driver_key.to_string(), active.clone());
        active
    }

    /// The currently published route, if the driver ever published one
    pub fn get_active(&self, driver_key: &str) -> Option<ActiveRoute> {
        self.routes.read().get(driver_key).cloned()
    }
}
