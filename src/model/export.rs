//! Serializable form of the objective, handed to external samplers.

use crate::error::Result;
use crate::model::QuadraticModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Binary quadratic model with string-labelled variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Always "BINARY"
    pub vartype: String,
    pub num_locations: usize,
    pub num_vehicles: usize,
    /// Labels in enumeration order
    pub variables: Vec<String>,
    /// Linear biases, duplicate terms summed
    pub linear: BTreeMap<String, f64>,
    /// `(u, v, bias)` interactions
    pub quadratic: Vec<(String, String, f64)>,
    pub offset: f64,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl QuadraticModel {
    pub fn to_serializable(&self) -> SerializedModel {
        let linear = self
            .linear_biases()
            .into_iter()
            .map(|(key, bias)| (key.to_string(), bias))
            .collect();

        let quadratic = self
            .quadratic_biases()
            .into_iter()
            .map(|((u, v), bias)| (u.to_string(), v.to_string(), bias))
            .collect();

        SerializedModel {
            vartype: "BINARY".to_string(),
            num_locations: self.num_locations(),
            num_vehicles: self.num_vehicles(),
            variables: self.variables().iter().map(|v| v.to_string()).collect(),
            linear,
            quadratic,
            offset: 0.0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl SerializedModel {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
