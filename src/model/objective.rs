//! Construction of the routing objective.
//!
//! The formulation uses binary variables `x[m][j][k]` (vehicle `m` on vertex `j`
//! at step `k`) and three families of terms:
//! - depot to first stop: `D[N][n] * x[m][n][0]`
//! - last stop to depot: `D[n][N] * x[m][n][N-1]`
//! - transitions: `D[i][j] * x[m][i][k] * x[m][j][k+1]` over all vertex pairs,
//!   the padding vertex `N` included
//!
//! One-hot and visit-once constraints are not part of the objective; the
//! solver-side encoding is expected to add them.

use crate::error::{Result, VrpError};
use crate::instance::DistanceMatrix;
use crate::model::VarKey;
use crate::sample::Sample;
use std::collections::{BTreeMap, HashSet};

/// A weighted term of the objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    Linear { var: VarKey, weight: f64 },
    Quadratic { u: VarKey, v: VarKey, weight: f64 },
}

/// Quadratic objective over binary variables, stored as a sparse term list.
#[derive(Debug, Clone)]
pub struct QuadraticModel {
    num_locations: usize,
    num_vehicles: usize,
    variables: Vec<VarKey>,
    terms: Vec<Term>,
}

impl QuadraticModel {
    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn variables(&self) -> &[VarKey] {
        &self.variables
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn num_linear(&self) -> usize {
        self.terms.iter().filter(|t| matches!(t, Term::Linear { .. })).count()
    }

    pub fn num_quadratic(&self) -> usize {
        self.terms.iter().filter(|t| matches!(t, Term::Quadratic { .. })).count()
    }

    /// Linear terms summed per variable.
    pub fn linear_biases(&self) -> BTreeMap<VarKey, f64> {
        let mut biases = BTreeMap::new();
        for term in &self.terms {
            if let Term::Linear { var, weight } = *term {
                *biases.entry(var).or_insert(0.0) += weight;
            }
        }
        biases
    }

    /// Quadratic terms summed per variable pair.
    pub fn quadratic_biases(&self) -> BTreeMap<(VarKey, VarKey), f64> {
        let mut biases = BTreeMap::new();
        for term in &self.terms {
            if let Term::Quadratic { u, v, weight } = *term {
                *biases.entry((u, v)).or_insert(0.0) += weight;
            }
        }
        biases
    }

    /// Objective value of a sample. A variable counts as 1 only when its value
    /// is exactly 1.0; unknown labels are ignored, malformed ones are errors.
    pub fn energy(&self, sample: &Sample) -> Result<f64> {
        let mut active: HashSet<VarKey> = HashSet::new();
        for (label, value) in sample.iter() {
            let key: VarKey = label.parse()?;
            if value == 1.0 {
                active.insert(key);
            } else {
                active.remove(&key);
            }
        }

        let energy = self
            .terms
            .iter()
            .map(|term| match *term {
                Term::Linear { var, weight } if active.contains(&var) => weight,
                Term::Quadratic { u, v, weight } if active.contains(&u) && active.contains(&v) => weight,
                _ => 0.0,
            })
            .sum();

        Ok(energy)
    }
}

/// Build the variable set and the objective for `num_locations` locations and
/// `num_vehicles` vehicles. `distances` must be `(N+1)x(N+1)` with the depot last.
pub fn construct_objective(
    num_locations: usize,
    distances: &DistanceMatrix,
    num_vehicles: usize,
) -> Result<(Vec<VarKey>, QuadraticModel)> {
    let n = num_locations;
    let m = num_vehicles;

    if n == 0 {
        return Err(VrpError::InvalidParameter("at least one location is required".to_string()));
    }
    if m == 0 {
        return Err(VrpError::InvalidParameter("at least one vehicle is required".to_string()));
    }
    if distances.size() != n + 1 {
        return Err(VrpError::DimensionMismatch { expected: n + 1, found: distances.size() });
    }

    let mut variables = Vec::with_capacity(m * (n + 1) * n);
    for k in 0..n {
        for j in 0..=n {
            for i in 0..m {
                variables.push(VarKey::new(i, j, k));
            }
        }
    }

    let mut terms = Vec::with_capacity(2 * m * n + m * (n - 1) * (n + 1) * (n + 1));

    for vehicle in 0..m {
        for loc in 0..n {
            terms.push(Term::Linear { var: VarKey::new(vehicle, loc, 0), weight: distances.distance(n, loc) });
        }
    }

    for vehicle in 0..m {
        for loc in 0..n {
            terms.push(Term::Linear { var: VarKey::new(vehicle, loc, n - 1), weight: distances.distance(loc, n) });
        }
    }

    for vehicle in 0..m {
        for step in 0..n - 1 {
            for i in 0..=n {
                for j in 0..=n {
                    terms.push(Term::Quadratic {
                        u: VarKey::new(vehicle, i, step),
                        v: VarKey::new(vehicle, j, step + 1),
                        weight: distances.distance(i, j),
                    });
                }
            }
        }
    }

    log::debug!(
        "Built routing objective: {} variables, {} terms ({} locations, {} vehicles)",
        variables.len(),
        terms.len(),
        n,
        m
    );

    let model = QuadraticModel {
        num_locations: n,
        num_vehicles: m,
        variables: variables.clone(),
        terms,
    };

    Ok((variables, model))
}
