//! Dense adjacency matrices built from edge-list CSV files.
//!
//! Each line is `source,target,weight`. Edges are undirected, node indices are
//! assigned in the order names first appear, and a later edge between the same
//! pair overwrites the earlier weight.

use crate::error::Result;
use crate::instance::DistanceMatrix;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One undirected weighted edge
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: &str, target: &str, weight: f64) -> Self {
        Edge {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        }
    }
}

/// Symmetric weight matrix over named nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    names: Vec<String>,
    index: HashMap<String, usize>,
    weights: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let edges: Vec<Edge> = edges.into_iter().collect();

        let mut names = Vec::new();
        let mut index = HashMap::new();
        for edge in &edges {
            for name in [&edge.source, &edge.target] {
                if !index.contains_key(name) {
                    index.insert(name.clone(), names.len());
                    names.push(name.clone());
                }
            }
        }

        let n = names.len();
        let mut weights = vec![vec![0.0; n]; n];
        for edge in &edges {
            let s = index[&edge.source];
            let t = index[&edge.target];
            weights[s][t] = edge.weight;
            weights[t][s] = edge.weight;
        }

        log::debug!("Built {}x{} adjacency matrix from {} edges", n, n, edges.len());

        AdjacencyMatrix { names, index, weights }
    }

    /// Read headerless `source,target,weight` records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut edges = Vec::new();
        for record in reader.deserialize() {
            let edge: Edge = record?;
            edges.push(edge);
        }

        Ok(Self::from_edges(edges))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)?;
        Self::from_reader(file)
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Node names in index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i][j]
    }

    /// Reuse the matrix as distances; the last node seen acts as the depot.
    pub fn to_distance_matrix(&self) -> Result<DistanceMatrix> {
        DistanceMatrix::new(self.weights.clone())
    }
}

impl std::fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.weights {
            let line: Vec<String> = row.iter().map(|w| w.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VrpError;

    #[test]
    fn test_first_seen_order() {
        let csv = "b, a, 4\na,c,2\nc,d,7\n";
        let matrix = AdjacencyMatrix::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(matrix.names(), &["b", "a", "c", "d"]);
        assert_eq!(matrix.node_index("c"), Some(2));
        assert_eq!(matrix.node_index("z"), None);
        assert_eq!(matrix.weight(0, 1), 4.0);
        assert_eq!(matrix.weight(1, 0), 4.0);
        assert_eq!(matrix.weight(1, 2), 2.0);
        assert_eq!(matrix.weight(0, 3), 0.0);
    }

    #[test]
    fn test_symmetric_and_overwrite() {
        let matrix = AdjacencyMatrix::from_edges(vec![
            Edge::new("x", "y", 1.0),
            Edge::new("y", "x", 9.0),
        ]);

        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.weight(0, 1), 9.0);
        assert_eq!(matrix.weight(1, 0), 9.0);
    }

    #[test]
    fn test_display() {
        let matrix = AdjacencyMatrix::from_reader("a,b,3\nb,c,1.5\n".as_bytes()).unwrap();
        assert_eq!(matrix.to_string(), "0 3 0\n3 0 1.5\n0 1.5 0\n");
    }

    #[test]
    fn test_bad_records() {
        let result = AdjacencyMatrix::from_reader("a,b\n".as_bytes());
        assert!(matches!(result, Err(VrpError::Format(_))));

        let result = AdjacencyMatrix::from_reader("a,b,heavy\n".as_bytes());
        assert!(matches!(result, Err(VrpError::Format(_))));
    }

    #[test]
    fn test_to_distance_matrix() {
        let matrix = AdjacencyMatrix::from_reader("a,b,3\nb,c,1\n".as_bytes()).unwrap();
        let distances = matrix.to_distance_matrix().unwrap();

        assert_eq!(distances.size(), 3);
        assert_eq!(distances.depot(), 2);
        assert!(distances.is_symmetric());
    }
}
