//! Train (multi-axle) loads.
//!
//! A train is an ordered set of axles. The lead axle sits at
//! `position × length` and every axle `k` sits at
//! `position × length + axles[k].offset_m`. Axles that end up off the beam
//! carry nothing onto it.

use serde::{Deserialize, Serialize};

use super::{validate_magnitude, validate_position, PointLoad};
use crate::errors::{CalcError, CalcResult};

/// One axle of a train
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axle {
    /// Axle load (kN)
    pub magnitude_kn: f64,
    /// Distance from the lead axle (m), non-negative
    pub offset_m: f64,
}

impl Axle {
    /// Create an axle
    pub fn new(magnitude_kn: f64, offset_m: f64) -> Self {
        Self {
            magnitude_kn,
            offset_m,
        }
    }
}

/// Multi-axle moving load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainLoad {
    /// Axles in order from the lead axle
    #[serde(default)]
    pub axles: Vec<Axle>,
    /// Normalized position of the lead axle
    pub position: f64,
}

impl TrainLoad {
    /// Create a train load
    pub fn new(axles: Vec<Axle>, position: f64) -> Self {
        Self { axles, position }
    }

    /// A train of `count` equal axles at a fixed spacing
    pub fn uniform(count: usize, magnitude_kn: f64, spacing_m: f64, position: f64) -> Self {
        let axles = (0..count)
            .map(|k| Axle::new(magnitude_kn, k as f64 * spacing_m))
            .collect();
        Self::new(axles, position)
    }

    /// Sum of all axle loads, on or off the beam (kN)
    pub fn gross_load_kn(&self) -> f64 {
        self.axles.iter().map(|a| a.magnitude_kn).sum()
    }

    /// Absolute location of every axle on a beam of `length_m` (m)
    pub fn axle_positions_m(&self, length_m: f64) -> Vec<f64> {
        let lead = self.position * length_m;
        self.axles.iter().map(|a| lead + a.offset_m).collect()
    }

    /// Equivalent point loads for the axles currently on a beam of `length_m`
    pub fn axle_loads(&self, length_m: f64) -> Vec<PointLoad> {
        self.axles
            .iter()
            .zip(self.axle_positions_m(length_m))
            .filter(|(_, x)| (0.0..=length_m).contains(x))
            .map(|(axle, x)| PointLoad::new(axle.magnitude_kn, x / length_m))
            .collect()
    }

    /// Validate input parameters
    pub fn validate(&self) -> CalcResult<()> {
        validate_position(self.position)?;
        for (k, axle) in self.axles.iter().enumerate() {
            validate_magnitude(&format!("axles[{k}].magnitude_kn"), axle.magnitude_kn)?;
            if !axle.offset_m.is_finite() || axle.offset_m < 0.0 {
                return Err(CalcError::invalid_load(
                    format!("axles[{k}].offset_m"),
                    axle.offset_m.to_string(),
                    "Axle offset must be a non-negative distance",
                ));
            }
        }
        Ok(())
    }
}
