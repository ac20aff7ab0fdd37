//! Turning solver samples into routes.
//!
//! Each selected variable `vehicle_vertex_step` places `vertex` in the slot
//! `(vehicle, step)`. Unfilled slots are dropped, then padding vertices are
//! stripped from both ends of every route.
//!
//! Known limitation: only a leading run and a trailing run of padding
//! vertices are removed. A padding vertex between two real stops is kept
//! and costs as a visit to the depot.

use crate::error::Result;
use crate::instance::DistanceMatrix;
use crate::model::VarKey;
use crate::sample::Sample;
use crate::solution::{Route, RoutingSolution};
use std::io::Write;

/// Decode `sample` into one route per vehicle.
///
/// Every label must parse as a key, but only values exactly equal to 1.0
/// select a variable, and only selected keys are checked against the
/// vehicle/step/vertex ranges. When two selected variables share a
/// `(vehicle, step)` slot the later one wins. The padding vertex is `num_steps`.
///
/// Steps without any selected vertex are dropped, so the stops on either side
/// of an interior gap become consecutive in the route.
pub fn decode_sample(sample: &Sample, num_vehicles: usize, num_steps: usize) -> Result<Vec<Route>> {
    let mut slots: Vec<Vec<Option<usize>>> = vec![vec![None; num_steps]; num_vehicles];

    for (label, value) in sample.iter() {
        let key: VarKey = label.parse()?;

        if value == 1.0 {
            key.check_bounds(num_vehicles, num_steps)?;
            let slot = &mut slots[key.vehicle][key.step];
            if let Some(previous) = *slot {
                log::debug!(
                    "Vehicle {} step {}: vertex {} overwritten by {}",
                    key.vehicle,
                    key.step,
                    previous,
                    key.vertex
                );
            }
            *slot = Some(key.vertex);
        }
    }

    let routes = slots
        .into_iter()
        .enumerate()
        .map(|(vehicle, row)| {
            let unvisited = row.iter().filter(|s| s.is_none()).count();
            if unvisited > 0 {
                log::warn!("Vehicle {}: {} step(s) without an assigned vertex", vehicle, unvisited);
            }
            let visited: Route = row.into_iter().flatten().collect();
            strip_padding(visited, num_steps)
        })
        .collect();

    Ok(routes)
}

/// Remove leading and trailing `padding` entries, leaving interior ones.
pub fn strip_padding(route: Route, padding: usize) -> Route {
    let start = route.iter().position(|&v| v != padding).unwrap_or(route.len());
    let end = route.iter().rposition(|&v| v != padding).map_or(start, |i| i + 1);
    route[start..end].to_vec()
}

/// Total length of all routes, each leaving from and returning to the depot
/// (last index of `distances`). Empty routes cost nothing.
///
/// # Panics
///
/// Panics if a route holds a vertex that is not below `distances.size()`.
pub fn compute_cost(routes: &[Route], distances: &DistanceMatrix) -> f64 {
    let depot = distances.depot();
    let mut cost = 0.0;

    for route in routes {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            continue;
        };

        for pair in route.windows(2) {
            cost += distances.distance(pair[0], pair[1]);
        }

        cost += distances.distance(depot, first);
        cost += distances.distance(last, depot);
    }

    cost
}

/// Write the route listing and total cost to `out`.
pub fn write_report<W: Write>(out: &mut W, routes: &[Route], distances: &DistanceMatrix) -> std::io::Result<()> {
    let solution = RoutingSolution::from_routes(routes.to_vec(), distances, "report");
    write!(out, "{}", solution)
}

/// Print the route listing and total cost to standard output.
pub fn report(routes: &[Route], distances: &DistanceMatrix) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, routes, distances)?;
    handle.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VrpError;

    fn create_test_matrix() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0.0, 1.0, 5.0],
            vec![1.0, 0.0, 3.0],
            vec![5.0, 3.0, 0.0],
        ])
        .unwrap()
    }

    fn sample_of(entries: &[(&str, f64)]) -> Sample {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_decode_and_cost() {
        let sample = sample_of(&[
            ("0_0_0", 1.0),
            ("0_1_0", 0.0),
            ("0_2_0", 0.0),
            ("0_0_1", 0.0),
            ("0_1_1", 1.0),
            ("0_2_1", 0.0),
        ]);

        let routes = decode_sample(&sample, 1, 2).unwrap();
        assert_eq!(routes, vec![vec![0, 1]]);
        assert!((compute_cost(&routes, &create_test_matrix()) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_leading_padding_stripped() {
        let sample = sample_of(&[("0_2_0", 1.0), ("0_1_1", 1.0)]);
        let routes = decode_sample(&sample, 1, 2).unwrap();
        assert_eq!(routes, vec![vec![1]]);
    }

    #[test]
    fn test_trailing_padding_stripped() {
        let sample = sample_of(&[("0_1_0", 1.0), ("0_2_1", 1.0)]);
        let routes = decode_sample(&sample, 1, 2).unwrap();
        assert_eq!(routes, vec![vec![1]]);
    }

    #[test]
    fn test_interior_padding_survives() {
        // 3 locations, padding vertex 3 sits between two real stops
        let sample = sample_of(&[("0_0_0", 1.0), ("0_3_1", 1.0), ("0_2_2", 1.0)]);
        let routes = decode_sample(&sample, 1, 3).unwrap();
        assert_eq!(routes, vec![vec![0, 3, 2]]);

        assert_eq!(strip_padding(vec![3, 3, 1, 3, 2, 3], 3), vec![1, 3, 2]);
        assert_eq!(strip_padding(vec![3, 3], 3), Vec::<usize>::new());
    }

    #[test]
    fn test_fractional_values_ignored() {
        let sample = sample_of(&[("0_0_0", 0.6), ("0_1_1", 0.9999), ("1_1_0", 1.0)]);
        let routes = decode_sample(&sample, 2, 2).unwrap();
        assert_eq!(routes, vec![vec![], vec![1]]);
    }

    #[test]
    fn test_last_write_wins() {
        let sample = sample_of(&[("0_0_0", 1.0), ("0_1_0", 1.0)]);
        let routes = decode_sample(&sample, 1, 2).unwrap();
        assert_eq!(routes, vec![vec![1]]);
    }

    #[test]
    fn test_round_trip() {
        let chosen = vec![vec![2, 0], vec![1, 3]];
        let sample = Sample::from_routes(&chosen, 2, 4).unwrap();
        let routes = decode_sample(&sample, 2, 4).unwrap();
        assert_eq!(routes, chosen);
    }

    #[test]
    fn test_malformed_key() {
        let sample = sample_of(&[("0_0", 0.0)]);
        assert!(matches!(decode_sample(&sample, 1, 2), Err(VrpError::InvalidKey { .. })));

        let sample = sample_of(&[("0_x_1", 1.0)]);
        assert!(matches!(decode_sample(&sample, 1, 2), Err(VrpError::InvalidKey { .. })));
    }

    #[test]
    fn test_unselected_foreign_keys_ignored() {
        let sample = sample_of(&[("0_0_0", 1.0), ("0_1_1", 1.0), ("1_0_0", 0.0), ("0_7_9", 0.4)]);
        let routes = decode_sample(&sample, 1, 2).unwrap();
        assert_eq!(routes, vec![vec![0, 1]]);

        // unselected labels still have to be well-formed
        let sample = sample_of(&[("0_0_0", 1.0), ("1_0", 0.0)]);
        assert!(matches!(decode_sample(&sample, 1, 2), Err(VrpError::InvalidKey { .. })));
    }

    #[test]
    fn test_interior_gap_joined() {
        let sample = sample_of(&[("0_0_0", 1.0), ("0_1_2", 1.0)]);
        let routes = decode_sample(&sample, 1, 3).unwrap();
        assert_eq!(routes, vec![vec![0, 1]]);

        let matrix = DistanceMatrix::new(vec![
            vec![0.0, 2.0, 9.0, 4.0],
            vec![2.0, 0.0, 6.0, 3.0],
            vec![9.0, 6.0, 0.0, 7.0],
            vec![4.0, 3.0, 7.0, 0.0],
        ])
        .unwrap();
        // depot -> 0 -> 1 -> depot, no detour through the depot for the gap
        assert!((compute_cost(&routes, &matrix) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_key() {
        let sample = sample_of(&[("1_0_0", 1.0)]);
        assert!(matches!(
            decode_sample(&sample, 1, 2),
            Err(VrpError::IndexOutOfRange { what: "vehicle", .. })
        ));
    }

    #[test]
    fn test_empty_cost() {
        let matrix = create_test_matrix();
        assert_eq!(compute_cost(&[], &matrix), 0.0);
        assert_eq!(compute_cost(&[vec![], vec![]], &matrix), 0.0);
    }

    #[test]
    fn test_reverse_symmetric() {
        let matrix = DistanceMatrix::new(vec![
            vec![0.0, 2.0, 7.0, 4.0],
            vec![2.0, 0.0, 3.0, 6.0],
            vec![7.0, 3.0, 0.0, 1.0],
            vec![4.0, 6.0, 1.0, 0.0],
        ])
        .unwrap();

        let forward = compute_cost(&[vec![0, 1, 2]], &matrix);
        let backward = compute_cost(&[vec![2, 1, 0]], &matrix);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_asymmetric() {
        let matrix = DistanceMatrix::new(vec![
            vec![0.0, 1.0, 1.0],
            vec![10.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();

        let forward = compute_cost(&[vec![0, 1]], &matrix);
        let backward = compute_cost(&[vec![1, 0]], &matrix);
        assert!((forward - 3.0).abs() < 1e-9);
        assert!((backward - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_report() {
        let mut out = Vec::new();
        write_report(&mut out, &[vec![0, 1]], &create_test_matrix()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Vehicle 0: [0, 1]"));
        assert!(text.contains("Best cost: 9"));
    }

    #[test]
    fn test_report_returns_result() {
        assert!(report(&[vec![0, 1]], &create_test_matrix()).is_ok());
    }
}
