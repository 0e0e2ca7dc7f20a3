//! Database queries

pub mod order;
