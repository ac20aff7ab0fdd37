//! Decision variables of the routing model.
//!
//! A variable `x[i][j][k]` is 1 when vehicle `i` stands on vertex `j` at step `k`.
//! External solvers label variables with strings of the form `"i_j_k"`; the
//! `Display`/`FromStr` pair below is the only place that form is produced or read.

use crate::error::VrpError;
use std::fmt;
use std::str::FromStr;

/// Identity of one binary decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarKey {
    pub vehicle: usize,
    pub vertex: usize,
    pub step: usize,
}

impl VarKey {
    pub fn new(vehicle: usize, vertex: usize, step: usize) -> Self {
        VarKey { vehicle, vertex, step }
    }

    /// Check the key against a model with `num_vehicles` vehicles and
    /// `num_steps` steps. Vertex `num_steps` is the padding vertex and is valid.
    pub fn check_bounds(&self, num_vehicles: usize, num_steps: usize) -> Result<(), VrpError> {
        if self.vehicle >= num_vehicles {
            return Err(VrpError::IndexOutOfRange { what: "vehicle", index: self.vehicle, bound: num_vehicles });
        }
        if self.vertex > num_steps {
            return Err(VrpError::IndexOutOfRange { what: "vertex", index: self.vertex, bound: num_steps + 1 });
        }
        if self.step >= num_steps {
            return Err(VrpError::IndexOutOfRange { what: "step", index: self.step, bound: num_steps });
        }
        Ok(())
    }
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.vehicle, self.vertex, self.step)
    }
}

impl FromStr for VarKey {
    type Err = VrpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| VrpError::InvalidKey { key: s.to_string(), reason };

        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() != 3 {
            return Err(invalid(format!("expected 3 parts, found {}", parts.len())));
        }

        let mut values = [0usize; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|_| invalid(format!("'{}' is not a non-negative integer", part)))?;
        }

        Ok(VarKey::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let key = VarKey::new(1, 12, 3);
        assert_eq!(key.to_string(), "1_12_3");
        assert_eq!("1_12_3".parse::<VarKey>().unwrap(), key);
    }

    #[test]
    fn test_malformed_keys() {
        for bad in ["", "1_2", "1_2_3_4", "a_2_3", "1__3", "-1_2_3", "1.0_2_3"] {
            let result = bad.parse::<VarKey>();
            assert!(
                matches!(result, Err(VrpError::InvalidKey { .. })),
                "key {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_bounds() {
        assert!(VarKey::new(0, 2, 1).check_bounds(1, 2).is_ok());
        assert!(matches!(
            VarKey::new(1, 0, 0).check_bounds(1, 2),
            Err(VrpError::IndexOutOfRange { what: "vehicle", .. })
        ));
        assert!(matches!(
            VarKey::new(0, 3, 0).check_bounds(1, 2),
            Err(VrpError::IndexOutOfRange { what: "vertex", .. })
        ));
        assert!(matches!(
            VarKey::new(0, 0, 2).check_bounds(1, 2),
            Err(VrpError::IndexOutOfRange { what: "step", .. })
        ));
    }
}
