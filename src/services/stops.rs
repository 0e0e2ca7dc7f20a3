//! Geo stop collection
//!
//! Turns candidate orders into routable stops. Orders without
//! geocoding are silently excluded, and an explicit order-id subset
//! only ever narrows eligibility, never widens it.

use std::collections::HashSet;

use uuid::Uuid;

use crate::types::{Order, Stop};

/// Collect routable stops from candidate orders.
///
/// A stop is eligible when its order status is in `statuses`, it has
/// both coordinates, and (if `explicit_ids` is non-empty) its id is in
/// the explicit set. An empty result is a valid outcome, not an error.
pub fn collect(orders: Vec<Order>, statuses: &[String], explicit_ids: Option<&HashSet<Uuid>>) -> Vec<Stop> {
    let narrow = explicit_ids.filter(|ids| !ids.is_empty());

    orders
        .into_iter()
        .filter(|order| statuses.iter().any(|s| s == &order.status))
        .filter(|order| narrow.map(|ids| ids.contains(&order.id)).unwrap_or(true))
        .filter_map(|order| {
            let coordinates = order.coordinates()?;
            Some(Stop {
                id: order.id,
                name: order.customer_name.unwrap_or_default(),
                address: order.address.unwrap_or_default(),
                coordinates,
                amount: order.amount,
                payment_method: order.payment_method,
                payment_breakdown: order.payment_breakdown,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_order(status: &str, lat: Option<f64>, lng: Option<f64>) -> Order {
        Order {
            id: Uuid::new_v4(),
            status: status.to_string(),
            customer_name: Some("Customer".to_string()),
            address: Some("1 High Street".to_string()),
            lat,
            lng,
            amount: 12.5,
            payment_method: Some("card".to_string()),
            payment_breakdown: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pending() -> Vec<String> {
        vec!["pending".to_string()]
    }

    #[test]
    fn test_collect_excludes_ungeocode_orders() {
        let orders = vec![
            make_order("pending", Some(50.7), Some(-1.9)),
            make_order("pending", None, Some(-1.9)),
            make_order("pending", Some(50.7), None),
            make_order("pending", None, None),
        ];

        let stops = collect(orders, &pending(), None);

        assert_eq!(stops.len(), 1);
    }

    #[test]
    fn test_collect_filters_by_status() {
        let orders = vec![
            make_order("pending", Some(50.7), Some(-1.9)),
            make_order("delivered", Some(50.7), Some(-1.9)),
        ];

        let stops = collect(orders, &pending(), None);

        assert_eq!(stops.len(), 1);
    }

    #[test]
    fn test_explicit_ids_narrow_only() {
        let geocoded = make_order("pending", Some(50.7), Some(-1.9));
        let ungeocode = make_order("pending", None, None);
        let delivered = make_order("delivered", Some(50.7), Some(-1.9));

        let wanted: HashSet<Uuid> =
            [geocoded.id, ungeocode.id, delivered.id].into_iter().collect();
        let other = make_order("pending", Some(50.8), Some(-1.8));

        let stops = collect(
            vec![geocoded.clone(), ungeocode, delivered, other],
            &pending(),
            Some(&wanted),
        );

        // Only the geocoded pending order from the explicit set survives
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, geocoded.id);
    }

    #[test]
    fn test_empty_explicit_set_means_no_restriction() {
        let orders = vec![
            make_order("pending", Some(50.7), Some(-1.9)),
            make_order("pending", Some(50.8), Some(-1.8)),
        ];
        let empty = HashSet::new();

        let stops = collect(orders, &pending(), Some(&empty));

        assert_eq!(stops.len(), 2);
    }

    #[test]
    fn test_disjoint_explicit_set_yields_empty() {
        let orders = vec![make_order("pending", Some(50.7), Some(-1.9))];
        let unrelated: HashSet<Uuid> = [Uuid::new_v4()].into_iter().collect();

        let stops = collect(orders, &pending(), Some(&unrelated));

        assert!(stops.is_empty());
    }
}
