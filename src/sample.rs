//! Samples returned by an external solver.
//!
//! A sample maps variable labels (`"vehicle_vertex_step"`) to the value the solver
//! assigned. Entries keep the order in which they were read, so decoding is
//! deterministic when a sample asserts two vertices for the same slot.

use crate::error::{Result, VrpError};
use crate::model::VarKey;
use std::path::Path;

/// One solver assignment, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    entries: Vec<(String, f64)>,
}

impl Sample {
    pub fn new() -> Self {
        Sample { entries: Vec::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.entries.push((key.into(), value));
    }

    /// Set a variable to 1.0.
    pub fn select(&mut self, key: VarKey) {
        self.insert(key.to_string(), 1.0);
    }

    /// Encode routes as a full assignment over every variable of a model with
    /// `num_vehicles` vehicles and `num_steps` steps. Each route occupies the
    /// first steps and the remaining steps sit on the padding vertex.
    pub fn from_routes(routes: &[Vec<usize>], num_vehicles: usize, num_steps: usize) -> Result<Self> {
        if routes.len() > num_vehicles {
            return Err(VrpError::IndexOutOfRange { what: "vehicle", index: routes.len() - 1, bound: num_vehicles });
        }

        let mut slots = vec![vec![num_steps; num_steps]; num_vehicles];
        for (vehicle, route) in routes.iter().enumerate() {
            if route.len() > num_steps {
                return Err(VrpError::IndexOutOfRange { what: "step", index: route.len() - 1, bound: num_steps });
            }
            for (step, &vertex) in route.iter().enumerate() {
                if vertex > num_steps {
                    return Err(VrpError::IndexOutOfRange { what: "vertex", index: vertex, bound: num_steps + 1 });
                }
                slots[vehicle][step] = vertex;
            }
        }

        let mut sample = Sample::new();
        for step in 0..num_steps {
            for vertex in 0..=num_steps {
                for (vehicle, row) in slots.iter().enumerate() {
                    let value = if row[step] == vertex { 1.0 } else { 0.0 };
                    sample.insert(VarKey::new(vehicle, vertex, step).to_string(), value);
                }
            }
        }

        Ok(sample)
    }

    /// Parse a JSON object of `label: number` pairs.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| VrpError::Format("sample must be a JSON object".to_string()))?;

        let mut sample = Sample::new();
        for (key, value) in object {
            let number = match value {
                serde_json::Value::Bool(b) => {
                    if *b {
                        1.0
                    } else {
                        0.0
                    }
                }
                other => other
                    .as_f64()
                    .ok_or_else(|| VrpError::Format(format!("value of '{}' is not a number", key)))?,
            };
            sample.insert(key.clone(), number);
        }

        Ok(sample)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| VrpError::Io(format!("Cannot read {:?}: {}", path.as_ref(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Labels whose value is exactly 1.0.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(|(_, v)| *v == 1.0).map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for Sample {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Sample { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keeps_order() {
        let sample = Sample::from_json_str(r#"{"0_1_0": 1, "0_0_0": 0.0, "0_2_0": 1.0, "0_0_1": true}"#).unwrap();

        let keys: Vec<&str> = sample.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0_1_0", "0_0_0", "0_2_0", "0_0_1"]);

        let selected: Vec<&str> = sample.selected().collect();
        assert_eq!(selected, vec!["0_1_0", "0_2_0", "0_0_1"]);
    }

    #[test]
    fn test_json_rejects_non_numbers() {
        assert!(matches!(Sample::from_json_str("[1, 2]"), Err(VrpError::Format(_))));
        assert!(matches!(Sample::from_json_str(r#"{"0_0_0": "one"}"#), Err(VrpError::Format(_))));
        assert!(matches!(Sample::from_json_str("{"), Err(VrpError::Format(_))));
    }

    #[test]
    fn test_fractional_not_selected() {
        let sample: Sample = vec![("0_0_0".to_string(), 0.6), ("0_1_0".to_string(), 0.999)]
            .into_iter()
            .collect();
        assert_eq!(sample.selected().count(), 0);
    }

    #[test]
    fn test_from_routes() {
        let sample = Sample::from_routes(&[vec![1]], 1, 2).unwrap();

        // 1 vehicle * 3 vertices * 2 steps
        assert_eq!(sample.len(), 6);
        let selected: Vec<&str> = sample.selected().collect();
        assert_eq!(selected, vec!["0_1_0", "0_2_1"]);

        assert!(Sample::from_routes(&[vec![0, 1, 0]], 1, 2).is_err());
        assert!(Sample::from_routes(&[vec![3]], 1, 2).is_err());
    }
}
