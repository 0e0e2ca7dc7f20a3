//! Tour construction and improvement
//!
//! Works on a distance matrix where row/column 0 is the depot and
//! row/column `i + 1` is stop `i`. The depot is a fixed anchor: it is
//! never reordered, only the stops are.

/// Upper bound on full 2-opt passes, so a request always terminates
/// in bounded time regardless of input size.
pub const MAX_TWO_OPT_PASSES: usize = 1000;

/// Minimum strict improvement in kilometers for a swap to be applied,
/// so floating-point noise cannot make the search oscillate.
const IMPROVEMENT_EPSILON_KM: f64 = 1e-9;

/// Build an initial visiting order with the nearest-neighbor heuristic.
///
/// Returns indices into the stop list. Ties are broken by input order.
pub fn nearest_neighbor(matrix: &[Vec<f64>], stop_count: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(stop_count);
    let mut visited = vec![false; stop_count];
    let mut current = 0usize; // depot row

    for _ in 0..stop_count {
        let mut best_next = None;
        let mut best_dist = f64::MAX;

        for i in 0..stop_count {
            if visited[i] {
                continue;
            }
            let dist = matrix[current][i + 1];
            if dist < best_dist {
                best_dist = dist;
                best_next = Some(i);
            }
        }

        match best_next {
            Some(next) => {
                visited[next] = true;
                order.push(next);
                current = next + 1;
            }
            None => break,
        }
    }

    order
}

/// Improve a visiting order with 2-opt edge swaps.
///
/// The tour is treated as a path anchored at the depot. The
/// depot-to-first-stop edge participates in swap evaluation; the
/// final stop-to-depot edge participates only when `round_trip` is
/// set. With two stops or fewer the input is returned unchanged.
pub fn two_opt(matrix: &[Vec<f64>], mut order: Vec<usize>, round_trip: bool) -> Vec<usize> {
    let n = order.len();
    if n <= 2 {
        return order;
    }

    let mut improved = true;
    let mut passes = 0;

    while improved && passes < MAX_TWO_OPT_PASSES {
        improved = false;
        passes += 1;

        for i in 0..n - 1 {
            for j in i + 1..n {
                // Reversing order[i..=j] replaces the edges entering
                // position i and leaving position j.
                let a = if i == 0 { 0 } else { order[i - 1] + 1 };
                let b = order[i] + 1;
                let c = order[j] + 1;

                let closes_path = j + 1 < n || round_trip;
                let d = if j + 1 < n { order[j + 1] + 1 } else { 0 };

                let (before, after) = if closes_path {
                    (matrix[a][b] + matrix[c][d], matrix[a][c] + matrix[b][d])
                } else {
                    // Open path: the segment after j has no outgoing edge
                    (matrix[a][b], matrix[a][c])
                };

                if after < before - IMPROVEMENT_EPSILON_KM {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    order
}

/// Total length of a visiting order, in the matrix's units
pub fn path_length(matrix: &[Vec<f64>], order: &[usize], round_trip: bool) -> f64 {
    let mut total = 0.0;
    let mut prev = 0usize;

    for &stop in order {
        total += matrix[prev][stop + 1];
        prev = stop + 1;
    }
    if round_trip && !order.is_empty() {
        total += matrix[prev][0];
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::geo;
    use crate::types::Coordinates;

    /// Matrix for a depot at the first coordinate and stops after it
    fn matrix_for(depot: Coordinates, stops: &[Coordinates]) -> Vec<Vec<f64>> {
        let mut points = vec![depot];
        points.extend_from_slice(stops);
        geo::distance_matrix(&points)
    }

    fn collinear() -> (Coordinates, Vec<Coordinates>) {
        let depot = Coordinates { lat: 50.0, lng: 14.0 };
        let stops = vec![
            Coordinates { lat: 50.0, lng: 14.01 },
            Coordinates { lat: 50.0, lng: 14.02 },
            Coordinates { lat: 50.0, lng: 14.03 },
        ];
        (depot, stops)
    }

    #[test]
    fn test_nearest_neighbor_walks_outward() {
        let (depot, stops) = collinear();
        let matrix = matrix_for(depot, &stops);

        let order = nearest_neighbor(&matrix, stops.len());

        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_nearest_neighbor_tie_breaks_by_input_order() {
        let depot = Coordinates { lat: 0.0, lng: 0.0 };
        // Two stops equidistant from the depot
        let stops = vec![
            Coordinates { lat: 0.01, lng: 0.0 },
            Coordinates { lat: -0.01, lng: 0.0 },
        ];
        let matrix = matrix_for(depot, &stops);

        let order = nearest_neighbor(&matrix, stops.len());

        assert_eq!(order[0], 0);
    }

    #[test]
    fn test_two_opt_unchanged_for_two_stops() {
        let (depot, stops) = collinear();
        let matrix = matrix_for(depot, &stops);

        assert_eq!(two_opt(&matrix, vec![1, 0], false), vec![1, 0]);
        assert_eq!(two_opt(&matrix, vec![0], false), vec![0]);
        assert!(two_opt(&matrix, vec![], false).is_empty());
    }

    #[test]
    fn test_two_opt_untangles_bad_order() {
        let (depot, stops) = collinear();
        let matrix = matrix_for(depot, &stops);

        // Visiting the far stop first forces backtracking
        let order = two_opt(&matrix, vec![2, 0, 1], false);

        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_two_opt_never_worse_than_input() {
        let depot = Coordinates { lat: 50.7071, lng: -1.9223 };
        let stops = vec![
            Coordinates { lat: 50.72, lng: -1.90 },
            Coordinates { lat: 50.71, lng: -1.95 },
            Coordinates { lat: 50.80, lng: -1.80 },
            Coordinates { lat: 50.75, lng: -1.88 },
        ];
        let matrix = matrix_for(depot, &stops);

        for round_trip in [false, true] {
            let initial = nearest_neighbor(&matrix, stops.len());
            let before = path_length(&matrix, &initial, round_trip);
            let improved = two_opt(&matrix, initial, round_trip);
            let after = path_length(&matrix, &improved, round_trip);

            assert!(after <= before + 1e-9);
        }
    }

    #[test]
    fn test_two_opt_round_trip_counts_return_edge() {
        let depot = Coordinates { lat: 0.0, lng: 0.0 };
        // Open path is happy ending far away; a round trip should not be
        let stops = vec![
            Coordinates { lat: 0.0, lng: 0.01 },
            Coordinates { lat: 0.0, lng: 0.03 },
            Coordinates { lat: 0.0, lng: 0.02 },
        ];
        let matrix = matrix_for(depot, &stops);

        let order = two_opt(&matrix, vec![0, 1, 2], true);

        let len = path_length(&matrix, &order, true);
        let best = path_length(&matrix, &[0, 2, 1], true);
        assert!((len - best).abs() < 1e-9);
    }
}
