//! Module for loading and representing VRP instances.
//!
//! An instance is a square distance matrix whose last row/column is the depot,
//! together with the number of vehicles available. Matrix files hold one row per
//! line with values separated by commas and/or whitespace.

use crate::error::{Result, VrpError};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Square matrix of travel distances.
///
/// Indices `0..size-1` are customer locations, index `size-1` is the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = VrpError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.rows
    }
}

impl DistanceMatrix {
    /// Build a matrix from rows, checking that it is square and that every
    /// entry is finite and non-negative.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(VrpError::InvalidParameter("distance matrix is empty".to_string()));
        }

        let size = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(VrpError::DimensionMismatch { expected: size, found: row.len() });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(VrpError::InvalidDistance { row: i, col: j, value });
                }
            }
        }

        Ok(DistanceMatrix { rows })
    }

    /// Parse a matrix file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .map_err(|e| VrpError::Io(format!("Cannot open {:?}: {}", path.as_ref(), e)))?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<f64>().map_err(|_| {
                        VrpError::Format(format!("line {}: invalid number '{}'", line_no + 1, part))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            rows.push(row);
        }

        Self::new(rows)
    }

    /// Side length of the matrix (locations + depot).
    #[inline]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Number of customer locations, i.e. everything but the depot.
    #[inline]
    pub fn num_locations(&self) -> usize {
        self.rows.len() - 1
    }

    /// Index of the depot row/column.
    #[inline]
    pub fn depot(&self) -> usize {
        self.rows.len() - 1
    }

    /// Get the distance between two vertices
    ///
    /// # Panics
    ///
    /// Panics if either index is not below `size()`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (i + 1..n).all(|j| self.rows[i][j] == self.rows[j][i]))
    }
}

/// A routing instance: distances plus fleet size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VrpInstance {
    /// Name of the instance (file stem when loaded from disk)
    pub name: String,
    /// Number of vehicles
    pub num_vehicles: usize,
    /// Distance matrix, depot last
    pub distances: DistanceMatrix,
}

impl VrpInstance {
    pub fn new(name: &str, num_vehicles: usize, distances: DistanceMatrix) -> Result<Self> {
        if num_vehicles == 0 {
            return Err(VrpError::InvalidParameter("at least one vehicle is required".to_string()));
        }
        if distances.num_locations() == 0 {
            return Err(VrpError::InvalidParameter(
                "distance matrix must contain at least one location besides the depot".to_string(),
            ));
        }

        Ok(VrpInstance {
            name: name.to_string(),
            num_vehicles,
            distances,
        })
    }

    /// Load the distance matrix from a file and attach a fleet size.
    pub fn from_file<P: AsRef<Path>>(path: P, num_vehicles: usize) -> Result<Self> {
        let distances = DistanceMatrix::from_file(&path)?;
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        log::debug!("Loaded {}x{} distance matrix from {:?}", distances.size(), distances.size(), path.as_ref());

        Self::new(&name, num_vehicles, distances)
    }

    /// Number of customer locations (N).
    pub fn num_locations(&self) -> usize {
        self.distances.num_locations()
    }

    /// Number of binary variables in the routing model, M * (N + 1) * N.
    pub fn num_variables(&self) -> usize {
        let n = self.num_locations();
        self.num_vehicles * (n + 1) * n
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let n = self.num_locations();
        let m = self.num_vehicles;

        let mut distances: Vec<f64> = Vec::new();
        for i in 0..self.distances.size() {
            for j in 0..self.distances.size() {
                if i != j {
                    distances.push(self.distances.distance(i, j));
                }
            }
        }

        let avg_distance = if distances.is_empty() {
            0.0
        } else {
            distances.iter().sum::<f64>() / distances.len() as f64
        };
        let max_distance = distances
            .iter()
            .copied()
            .max_by_key(|&d| OrderedFloat(d))
            .unwrap_or(0.0);

        InstanceStatistics {
            name: self.name.clone(),
            num_locations: n,
            num_vehicles: m,
            num_variables: self.num_variables(),
            num_linear_terms: 2 * m * n,
            num_quadratic_terms: m * n.saturating_sub(1) * (n + 1) * (n + 1),
            avg_distance,
            max_distance,
            symmetric: self.distances.is_symmetric(),
        }
    }
}

/// Statistics about a VRP instance and the size of its model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub num_locations: usize,
    pub num_vehicles: usize,
    pub num_variables: usize,
    pub num_linear_terms: usize,
    pub num_quadratic_terms: usize,
    pub avg_distance: f64,
    pub max_distance: f64,
    pub symmetric: bool,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Vertices: {} ({} locations + depot)", self.num_locations + 1, self.num_locations)?;
        writeln!(f, "  Vehicles: {}", self.num_vehicles)?;
        writeln!(f, "  Binary variables: {}", self.num_variables)?;
        writeln!(f, "  Linear terms: {}", self.num_linear_terms)?;
        writeln!(f, "  Quadratic terms: {}", self.num_quadratic_terms)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)?;
        writeln!(f, "  Symmetric: {}", self.symmetric)
    }
}
