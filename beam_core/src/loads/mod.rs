//! # Load Model
//!
//! Loads are positioned by a normalized `position` in [0, 1] along the beam so
//! the same load description can be swept across any span length.
//!
//! - [`PointLoad`] - concentrated force (kN) at `position × length`
//! - [`DistributedLoad`] - uniform intensity (kN/m) over `width_m`, centered on
//!   `position × length` and clamped to the beam
//! - [`TrainLoad`] - an ordered set of axles whose lead axle sits at
//!   `position × length`
//!
//! [`LoadCase`] is the tagged union handed to the solvers. [`SingleLoad`] is the
//! subset the single-load solver handles directly; trains are reduced to
//! single point loads and superposed.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::loads::{Axle, LoadCase, TrainLoad};
//!
//! let truck = LoadCase::Train(TrainLoad::new(
//!     vec![Axle::new(120.0, 0.0), Axle::new(120.0, 1.2)],
//!     0.0,
//! ));
//! let halfway = truck.with_position(0.5);
//! assert_eq!(halfway.position(), 0.5);
//! ```

pub mod train;

use serde::{Deserialize, Serialize};

pub use train::{Axle, TrainLoad};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KiloNewtonsPerMeter, Meters};

/// Validate a normalized load position
pub(crate) fn validate_position(position: f64) -> CalcResult<()> {
    if !position.is_finite() || !(0.0..=1.0).contains(&position) {
        return Err(CalcError::invalid_load(
            "position",
            position.to_string(),
            "Position must lie in [0, 1]",
        ));
    }
    Ok(())
}

/// Validate a load magnitude (loads act downward; direction is not encoded by sign)
pub(crate) fn validate_magnitude(field: &str, magnitude: f64) -> CalcResult<()> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(CalcError::invalid_load(
            field,
            magnitude.to_string(),
            "Magnitude must be a non-negative number",
        ));
    }
    Ok(())
}

// ============================================================================
// Point Load
// ============================================================================

/// Concentrated load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Magnitude (kN), positive downward
    pub magnitude_kn: f64,
    /// Normalized position along the beam, 0 = left end, 1 = right end
    pub position: f64,
}

impl PointLoad {
    /// Create a point load
    pub fn new(magnitude_kn: f64, position: f64) -> Self {
        Self {
            magnitude_kn,
            position,
        }
    }

    /// Absolute location on a beam of `length_m` (m)
    pub fn position_m(&self, length_m: f64) -> f64 {
        self.position * length_m
    }

    /// Validate input parameters
    pub fn validate(&self) -> CalcResult<()> {
        validate_magnitude("magnitude_kn", self.magnitude_kn)?;
        validate_position(self.position)
    }
}

// ============================================================================
// Distributed Load
// ============================================================================

/// Uniform load over part (or all) of the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Intensity (kN/m), positive downward
    pub magnitude_kn_per_m: f64,
    /// Loaded width before clamping to the beam (m)
    pub width_m: f64,
    /// Normalized position of the load centroid
    pub position: f64,
}

impl DistributedLoad {
    /// Create a distributed load
    pub fn new(magnitude_kn_per_m: f64, width_m: f64, position: f64) -> Self {
        Self {
            magnitude_kn_per_m,
            width_m,
            position,
        }
    }

    /// A load covering the whole of a beam of `length_m`
    pub fn full_span(magnitude_kn_per_m: f64, length_m: f64) -> Self {
        Self::new(magnitude_kn_per_m, length_m, 0.5)
    }

    /// Loaded extent `(a, b)` on a beam of `length_m`, clamped to `[0, length_m]`
    pub fn extent_m(&self, length_m: f64) -> (f64, f64) {
        let center = self.position * length_m;
        let half = self.width_m / 2.0;
        let a = (center - half).clamp(0.0, length_m);
        let b = (center + half).clamp(0.0, length_m);
        (a, b)
    }

    /// Resultant of the clamped load (kN)
    pub fn total_load_kn(&self, length_m: f64) -> f64 {
        let (a, b) = self.extent_m(length_m);
        (KiloNewtonsPerMeter(self.magnitude_kn_per_m) * Meters(b - a)).0
    }

    /// Validate input parameters against a beam of `length_m`
    pub fn validate(&self, length_m: f64) -> CalcResult<()> {
        validate_magnitude("magnitude_kn_per_m", self.magnitude_kn_per_m)?;
        validate_position(self.position)?;
        if !self.width_m.is_finite() || self.width_m <= 0.0 {
            return Err(CalcError::invalid_load(
                "width_m",
                self.width_m.to_string(),
                "Distributed load width must be positive",
            ));
        }
        let (a, b) = self.extent_m(length_m);
        if b - a <= f64::EPSILON * length_m {
            return Err(CalcError::invalid_load(
                "width_m",
                self.width_m.to_string(),
                "Distributed load has no extent on the beam",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Single Load
// ============================================================================

/// A load the single-load solver handles directly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SingleLoad {
    Point(PointLoad),
    Distributed(DistributedLoad),
}

impl SingleLoad {
    /// Create a point load
    pub fn point(magnitude_kn: f64, position: f64) -> Self {
        SingleLoad::Point(PointLoad::new(magnitude_kn, position))
    }

    /// Create a distributed load
    pub fn distributed(magnitude_kn_per_m: f64, width_m: f64, position: f64) -> Self {
        SingleLoad::Distributed(DistributedLoad::new(magnitude_kn_per_m, width_m, position))
    }

    /// Normalized position (the centroid for distributed loads)
    pub fn position(&self) -> f64 {
        match self {
            SingleLoad::Point(p) => p.position,
            SingleLoad::Distributed(d) => d.position,
        }
    }

    /// Total downward force applied to a beam of `length_m` (kN)
    pub fn total_load_kn(&self, length_m: f64) -> f64 {
        match self {
            SingleLoad::Point(p) => p.magnitude_kn,
            SingleLoad::Distributed(d) => d.total_load_kn(length_m),
        }
    }

    /// Validate input parameters against a beam of `length_m`
    pub fn validate(&self, length_m: f64) -> CalcResult<()> {
        match self {
            SingleLoad::Point(p) => p.validate(),
            SingleLoad::Distributed(d) => d.validate(length_m),
        }
    }
}

// ============================================================================
// Load Case
// ============================================================================

/// Load configuration for one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadCase {
    /// Concentrated load
    Point(PointLoad),
    /// Uniform load over a width
    Distributed(DistributedLoad),
    /// Multi-axle load, solved by superposition
    Train(TrainLoad),
}

impl LoadCase {
    /// Create a point load case
    pub fn point(magnitude_kn: f64, position: f64) -> Self {
        LoadCase::Point(PointLoad::new(magnitude_kn, position))
    }

    /// Create a distributed load case
    pub fn distributed(magnitude_kn_per_m: f64, width_m: f64, position: f64) -> Self {
        LoadCase::Distributed(DistributedLoad::new(magnitude_kn_per_m, width_m, position))
    }

    /// Create a train load case
    pub fn train(axles: Vec<Axle>, position: f64) -> Self {
        LoadCase::Train(TrainLoad::new(axles, position))
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCase::Point(_) => "Point",
            LoadCase::Distributed(_) => "Distributed",
            LoadCase::Train(_) => "Train",
        }
    }

    /// Normalized position of the load (centroid, or lead axle for trains)
    pub fn position(&self) -> f64 {
        match self {
            LoadCase::Point(p) => p.position,
            LoadCase::Distributed(d) => d.position,
            LoadCase::Train(t) => t.position,
        }
    }

    /// The same load moved to `position`
    pub fn with_position(&self, position: f64) -> Self {
        match self {
            LoadCase::Point(p) => LoadCase::Point(PointLoad { position, ..*p }),
            LoadCase::Distributed(d) => LoadCase::Distributed(DistributedLoad { position, ..*d }),
            LoadCase::Train(t) => LoadCase::Train(TrainLoad {
                axles: t.axles.clone(),
                position,
            }),
        }
    }

    /// The single-load view of this case, `None` for trains
    pub fn as_single(&self) -> Option<SingleLoad> {
        match self {
            LoadCase::Point(p) => Some(SingleLoad::Point(*p)),
            LoadCase::Distributed(d) => Some(SingleLoad::Distributed(*d)),
            LoadCase::Train(_) => None,
        }
    }

    /// Total downward force that lands on a beam of `length_m` (kN)
    pub fn total_load_kn(&self, length_m: f64) -> f64 {
        match self {
            LoadCase::Point(p) => p.magnitude_kn,
            LoadCase::Distributed(d) => d.total_load_kn(length_m),
            LoadCase::Train(t) => t.axle_loads(length_m).iter().map(|p| p.magnitude_kn).sum(),
        }
    }

    /// Validate input parameters against a beam of `length_m`
    pub fn validate(&self, length_m: f64) -> CalcResult<()> {
        match self {
            LoadCase::Point(p) => p.validate(),
            LoadCase::Distributed(d) => d.validate(length_m),
            LoadCase::Train(t) => t.validate(),
        }
    }
}

impl From<SingleLoad> for LoadCase {
    fn from(load: SingleLoad) -> Self {
        match load {
            SingleLoad::Point(p) => LoadCase::Point(p),
            SingleLoad::Distributed(d) => LoadCase::Distributed(d),
        }
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        LoadCase::point(100.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distributed_extent_is_clamped() {
        let load = DistributedLoad::new(10.0, 4.0, 0.0);
        assert_eq!(load.extent_m(10.0), (0.0, 2.0));
        assert!((load.total_load_kn(10.0) - 20.0).abs() < 1e-12);

        let load = DistributedLoad::new(10.0, 4.0, 0.5);
        assert_eq!(load.extent_m(10.0), (3.0, 7.0));

        let load = DistributedLoad::new(10.0, 40.0, 0.5);
        assert_eq!(load.extent_m(10.0), (0.0, 10.0));
    }

    #[test]
    fn test_rejects_position_out_of_range() {
        for bad in [-0.01, 1.01, f64::NAN] {
            let err = LoadCase::point(10.0, bad).validate(10.0).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_LOAD");
        }
        assert!(LoadCase::point(10.0, 0.0).validate(10.0).is_ok());
        assert!(LoadCase::point(10.0, 1.0).validate(10.0).is_ok());
    }

    #[test]
    fn test_rejects_negative_magnitude() {
        match LoadCase::point(-5.0, 0.5).validate(10.0) {
            Err(CalcError::InvalidLoad { field, .. }) => assert_eq!(field, "magnitude_kn"),
            other => panic!("expected InvalidLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_width() {
        match LoadCase::distributed(5.0, 0.0, 0.5).validate(10.0) {
            Err(CalcError::InvalidLoad { field, .. }) => assert_eq!(field, "width_m"),
            other => panic!("expected InvalidLoad, got {:?}", other),
        }
        assert!(LoadCase::distributed(5.0, -1.0, 0.5).validate(10.0).is_err());
        assert!(LoadCase::distributed(5.0, 1e-300, 0.5).validate(10.0).is_err());
    }

    #[test]
    fn test_with_position_keeps_shape() {
        let load = LoadCase::distributed(12.0, 3.0, 0.1);
        let moved = load.with_position(0.8);
        assert_eq!(moved, LoadCase::distributed(12.0, 3.0, 0.8));
        assert_eq!(moved.as_single(), Some(SingleLoad::distributed(12.0, 3.0, 0.8)));
    }

    #[test]
    fn test_load_case_json_shape() {
        let json = r#"{"type":"point","magnitude_kn":100.0,"position":0.5}"#;
        let load: LoadCase = serde_json::from_str(json).unwrap();
        assert_eq!(load, LoadCase::point(100.0, 0.5));

        let json = r#"{"type":"train","position":0.25,"axles":[{"magnitude_kn":50.0,"offset_m":0.0}]}"#;
        let load: LoadCase = serde_json::from_str(json).unwrap();
        assert_eq!(load.display_name(), "Train");
        assert_eq!(load.position(), 0.25);
    }
}
