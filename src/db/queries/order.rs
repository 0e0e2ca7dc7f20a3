//! Order database queries (read-only collaborator access)

use anyhow::Result;
use sqlx::PgPool;

use crate::types::Order;

/// List orders whose status is in the given set.
///
/// Ordered by creation time so downstream tie-breaking stays
/// deterministic. Geocoding is not filtered here; the stop collector
/// decides eligibility.
pub async fn list_orders_by_status(pool: &PgPool, statuses: &[String]) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT
            id, status, customer_name, address,
            lat, lng,
            amount, payment_method, payment_breakdown,
            created_at, updated_at
        FROM orders
        WHERE status = ANY($1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(statuses)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}
