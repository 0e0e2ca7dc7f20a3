//! Geographic calculations
//!
//! All scheduling math uses great-circle distance; road-aware routing
//! is a map-visualization concern handled outside this worker.

use crate::types::Coordinates;

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate Haversine distance between two points in kilometers
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Convert a distance to drive time in minutes at a given average speed
pub fn drive_minutes(distance_km: f64, avg_speed_kmh: f64) -> f64 {
    distance_km / avg_speed_kmh * 60.0
}

/// Calculate distance matrix between all points.
/// Returns a 2D vector where matrix[i][j] is distance from point i to point j.
pub fn distance_matrix(points: &[Coordinates]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..n {
            if i != j {
                matrix[i][j] = haversine_distance(&points[i], &points[j]);
            }
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_london_paris() {
        let london = Coordinates { lat: 51.5074, lng: -0.1278 };
        let paris = Coordinates { lat: 48.8566, lng: 2.3522 };

        let distance = haversine_distance(&london, &paris);

        // London to Paris is approximately 344 km
        assert!((distance - 344.0).abs() < 5.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinates { lat: 50.0, lng: -1.9 };
        let distance = haversine_distance(&point, &point);
        assert!(distance.abs() < 0.001);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Coordinates { lat: 50.7071, lng: -1.9223 };
        let b = Coordinates { lat: 50.80, lng: -1.80 };
        assert!((haversine_distance(&a, &b) - haversine_distance(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_drive_minutes() {
        // 30 km at 30 km/h is exactly one hour
        assert!((drive_minutes(30.0, 30.0) - 60.0).abs() < 1e-9);
        assert!((drive_minutes(0.0, 40.0)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_matrix() {
        let points = vec![
            Coordinates { lat: 50.0, lng: 14.0 },
            Coordinates { lat: 50.1, lng: 14.1 },
            Coordinates { lat: 50.2, lng: 14.2 },
        ];

        let matrix = distance_matrix(&points);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[0].len(), 3);

        // Diagonal should be zero
        assert!(matrix[0][0].abs() < 0.001);
        assert!(matrix[1][1].abs() < 0.001);

        // Should be symmetric
        assert!((matrix[0][1] - matrix[1][0]).abs() < 0.001);
    }
}
