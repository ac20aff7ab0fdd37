//! Decoded routing solutions.
//!
//! Routes list visited vertices only; the depot is implicit at both ends.

use crate::decoder::compute_cost;
use crate::instance::DistanceMatrix;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered vertices visited by one vehicle, depot omitted at start and end.
pub type Route = Vec<usize>;

/// Routes of every vehicle together with their evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingSolution {
    /// One route per vehicle, possibly empty
    pub routes: Vec<Route>,
    /// Total travel cost including depot legs
    pub cost: f64,
    /// Objective value of the sample the routes came from, if known
    pub energy: Option<f64>,
    /// Where the routes came from (sample file, baseline, ...)
    pub source: String,
}

impl RoutingSolution {
    pub fn from_routes(routes: Vec<Route>, distances: &DistanceMatrix, source: &str) -> Self {
        let cost = compute_cost(&routes, distances);
        RoutingSolution {
            routes,
            cost,
            energy: None,
            source: source.to_string(),
        }
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Check if every location `0..num_locations` is visited exactly once
    /// and nothing else appears in the routes.
    pub fn is_complete(&self, num_locations: usize) -> bool {
        let visits: Vec<usize> = self.routes.iter().flatten().copied().collect();
        if visits.len() != num_locations {
            return false;
        }

        let unique: HashSet<usize> = visits.iter().copied().collect();
        unique.len() == num_locations && visits.iter().all(|&v| v < num_locations)
    }

    pub fn num_vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }
}

impl std::fmt::Display for RoutingSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Best routes (depot omitted at start and end):")?;
        for (num, route) in self.routes.iter().enumerate() {
            writeln!(f, "\tVehicle {}: {:?}", num, route)?;
        }
        writeln!(f, "Best cost: {}", self.cost)
    }
}
