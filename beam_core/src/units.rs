//! # Unit Types
//!
//! Type-safe wrappers for the SI units the engine works in. These are plain
//! f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Units at the API boundary
//!
//! - Length: meters (m); deflection output in millimeters (mm)
//! - Force: kilonewtons (kN); distributed load: kN/m
//! - Moment: kilonewton-meters (kN·m)
//! - Elastic modulus: gigapascals (GPa), internally pascals (Pa)
//! - Moment of inertia: cm⁴, internally m⁴
//! - Flexural rigidity: N·m² (Pa × m⁴); the formulas use kN·m²
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{CentimetersToFourth, Gigapascals, MetersToFourth, Pascals};
//!
//! let e: Pascals = Gigapascals(200.0).into();
//! assert_eq!(e.0, 200.0e9);
//!
//! let i: MetersToFourth = CentimetersToFourth(100_000.0).into();
//! assert!((i.0 - 1.0e-3).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force, Moment and Distributed Load Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Distributed load in kilonewtons per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonsPerMeter(pub f64);

impl Mul<Meters> for KiloNewtons {
    type Output = KiloNewtonMeters;
    fn mul(self, rhs: Meters) -> Self::Output {
        KiloNewtonMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for KiloNewtonsPerMeter {
    type Output = KiloNewtons;
    fn mul(self, rhs: Meters) -> Self::Output {
        KiloNewtons(self.0 * rhs.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

impl From<Gigapascals> for Pascals {
    fn from(gpa: Gigapascals) -> Self {
        Pascals(gpa.0 * 1.0e9)
    }
}

impl From<Pascals> for Gigapascals {
    fn from(pa: Pascals) -> Self {
        Gigapascals(pa.0 / 1.0e9)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Moment of inertia in cm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CentimetersToFourth(pub f64);

/// Moment of inertia in m⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetersToFourth(pub f64);

impl From<CentimetersToFourth> for MetersToFourth {
    fn from(cm4: CentimetersToFourth) -> Self {
        MetersToFourth(cm4.0 * 1.0e-8)
    }
}

impl From<MetersToFourth> for CentimetersToFourth {
    fn from(m4: MetersToFourth) -> Self {
        CentimetersToFourth(m4.0 * 1.0e8)
    }
}

/// Flexural rigidity EI in N·m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonSquareMeters(pub f64);

/// Flexural rigidity EI in kN·m², the unit the closed-form formulas expect
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonSquareMeters(pub f64);

impl Mul<MetersToFourth> for Pascals {
    type Output = NewtonSquareMeters;
    fn mul(self, rhs: MetersToFourth) -> Self::Output {
        NewtonSquareMeters(self.0 * rhs.0)
    }
}

impl From<NewtonSquareMeters> for KiloNewtonSquareMeters {
    fn from(ei: NewtonSquareMeters) -> Self {
        KiloNewtonSquareMeters(ei.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(KiloNewtonMeters);
impl_arithmetic!(KiloNewtonsPerMeter);
impl_arithmetic!(Pascals);
impl_arithmetic!(Gigapascals);
impl_arithmetic!(CentimetersToFourth);
impl_arithmetic!(MetersToFourth);
impl_arithmetic!(NewtonSquareMeters);
impl_arithmetic!(KiloNewtonSquareMeters);
