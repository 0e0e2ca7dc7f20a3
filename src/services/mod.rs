//! Business logic services

pub mod active_route;
pub mod geo;
pub mod planner;
pub mod schedule;
pub mod stops;
pub mod tour;
