//! # Beam Configuration
//!
//! [`BeamConfig`] describes the structure: span length, support condition and
//! section stiffness. It is a plain JSON-serializable value; [`BeamConfig::model`]
//! validates it and derives the flexural rigidity once, producing the
//! [`BeamModel`] every solver works from.
//!
//! ## Support layouts
//!
//! ```text
//! SimplySupported   △━━━━━━━━━━━━━━━━━━○        pin at 0, roller at L
//! Cantilever        ▣━━━━━━━━━━━━━━━━━━         fixed at 0, free at L
//! FixedFixed        ▣━━━━━━━━━━━━━━━━━━▣        fixed at both ends
//! FixedPinned       ▣━━━━━━━━━━━━━━━━━━△        fixed at 0, pinned at L
//! MultiSpan{3}      △━━━━━━△━━━━━━△━━━━━━△      equal spans of L/3
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::beam::{BeamConfig, SupportCondition};
//!
//! let beam = BeamConfig::simply_supported(10.0, 200.0, 100_000.0);
//! let model = beam.model().unwrap();
//! assert_eq!(model.support, SupportCondition::SimplySupported);
//! assert!((model.flexural_rigidity_nm2() - 2.0e8).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{
    CentimetersToFourth, Gigapascals, KiloNewtonSquareMeters, MetersToFourth, NewtonSquareMeters,
    Pascals,
};

/// Shortest span the solver accepts (m). Guards divisions by L.
pub const MIN_LENGTH_M: f64 = 1.0e-6;

/// Smallest flexural rigidity the solver accepts (N·m²). Guards divisions by EI.
pub const MIN_FLEXURAL_RIGIDITY_NM2: f64 = 1.0e-6;

// =============================================================================
// SUPPORT CONDITION
// =============================================================================

/// Support condition of the beam.
///
/// The solvers match on this exhaustively, so every support type is handled
/// explicitly in every formula set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SupportCondition {
    /// Pin at x = 0, roller at x = L. Statically determinate.
    #[default]
    SimplySupported,

    /// Fixed at x = 0, free at x = L. Statically determinate.
    Cantilever,

    /// Fixed at both ends. Statically indeterminate.
    FixedFixed,

    /// Fixed at x = 0, pinned at x = L (propped cantilever). Statically indeterminate.
    FixedPinned,

    /// `segments` equal spans on `segments + 1` pinned supports.
    ///
    /// Analyzed by isolating each loaded span as a simply-supported beam;
    /// continuity over interior supports is ignored.
    MultiSpan { segments: u32 },
}

impl SupportCondition {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportCondition::SimplySupported => "Simply Supported",
            SupportCondition::Cantilever => "Cantilever",
            SupportCondition::FixedFixed => "Fixed-Fixed",
            SupportCondition::FixedPinned => "Fixed-Pinned",
            SupportCondition::MultiSpan { .. } => "Multi-Span",
        }
    }

    /// Returns true if reactions cannot be found from statics alone
    pub fn is_indeterminate(&self) -> bool {
        matches!(
            self,
            SupportCondition::FixedFixed
                | SupportCondition::FixedPinned
                | SupportCondition::MultiSpan { .. }
        )
    }

    /// Number of equal spans the beam is divided into
    pub fn span_count(&self) -> u32 {
        match self {
            SupportCondition::MultiSpan { segments } => *segments,
            _ => 1,
        }
    }
}

impl std::fmt::Display for SupportCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupportCondition::MultiSpan { segments } => {
                write!(f, "{} ({} spans)", self.display_name(), segments)
            }
            _ => write!(f, "{}", self.display_name()),
        }
    }
}

// =============================================================================
// BEAM CONFIG
// =============================================================================

/// Structure under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Total beam length (m)
    pub length_m: f64,

    /// Support condition
    #[serde(default)]
    pub support: SupportCondition,

    /// Modulus of elasticity (GPa)
    pub elastic_modulus_gpa: f64,

    /// Moment of inertia (cm⁴)
    pub moment_of_inertia_cm4: f64,
}

impl BeamConfig {
    /// Create a beam with an explicit support condition
    pub fn new(
        length_m: f64,
        support: SupportCondition,
        elastic_modulus_gpa: f64,
        moment_of_inertia_cm4: f64,
    ) -> Self {
        Self {
            length_m,
            support,
            elastic_modulus_gpa,
            moment_of_inertia_cm4,
        }
    }

    /// Create a simply-supported beam
    pub fn simply_supported(length_m: f64, elastic_modulus_gpa: f64, moment_of_inertia_cm4: f64) -> Self {
        Self::new(
            length_m,
            SupportCondition::SimplySupported,
            elastic_modulus_gpa,
            moment_of_inertia_cm4,
        )
    }

    /// Create a cantilever fixed at x = 0
    pub fn cantilever(length_m: f64, elastic_modulus_gpa: f64, moment_of_inertia_cm4: f64) -> Self {
        Self::new(
            length_m,
            SupportCondition::Cantilever,
            elastic_modulus_gpa,
            moment_of_inertia_cm4,
        )
    }

    /// Create a beam fixed at both ends
    pub fn fixed_fixed(length_m: f64, elastic_modulus_gpa: f64, moment_of_inertia_cm4: f64) -> Self {
        Self::new(
            length_m,
            SupportCondition::FixedFixed,
            elastic_modulus_gpa,
            moment_of_inertia_cm4,
        )
    }

    /// Create a propped cantilever (fixed at x = 0, pinned at x = L)
    pub fn fixed_pinned(length_m: f64, elastic_modulus_gpa: f64, moment_of_inertia_cm4: f64) -> Self {
        Self::new(
            length_m,
            SupportCondition::FixedPinned,
            elastic_modulus_gpa,
            moment_of_inertia_cm4,
        )
    }

    /// Create a beam of `segments` equal spans
    pub fn multi_span(
        length_m: f64,
        segments: u32,
        elastic_modulus_gpa: f64,
        moment_of_inertia_cm4: f64,
    ) -> Self {
        Self::new(
            length_m,
            SupportCondition::MultiSpan { segments },
            elastic_modulus_gpa,
            moment_of_inertia_cm4,
        )
    }

    /// Flexural rigidity EI = E(Pa) × I(m⁴), in N·m²
    pub fn flexural_rigidity(&self) -> NewtonSquareMeters {
        let e: Pascals = Gigapascals(self.elastic_modulus_gpa).into();
        let i: MetersToFourth = CentimetersToFourth(self.moment_of_inertia_cm4).into();
        e * i
    }

    /// Validate input parameters
    pub fn validate(&self) -> CalcResult<()> {
        if !self.length_m.is_finite() || self.length_m < MIN_LENGTH_M {
            return Err(CalcError::invalid_configuration(
                "length_m",
                self.length_m.to_string(),
                "Beam length must be positive",
            ));
        }
        if !self.elastic_modulus_gpa.is_finite() || self.elastic_modulus_gpa <= 0.0 {
            return Err(CalcError::invalid_configuration(
                "elastic_modulus_gpa",
                self.elastic_modulus_gpa.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if !self.moment_of_inertia_cm4.is_finite() || self.moment_of_inertia_cm4 <= 0.0 {
            return Err(CalcError::invalid_configuration(
                "moment_of_inertia_cm4",
                self.moment_of_inertia_cm4.to_string(),
                "Moment of inertia must be positive",
            ));
        }

        let ei = self.flexural_rigidity();
        if !ei.0.is_finite() || ei.0 < MIN_FLEXURAL_RIGIDITY_NM2 {
            return Err(CalcError::invalid_configuration(
                "flexural_rigidity",
                ei.0.to_string(),
                "EI is effectively zero - deflection is undefined",
            ));
        }

        if let SupportCondition::MultiSpan { segments } = self.support {
            if segments < 1 {
                return Err(CalcError::invalid_configuration(
                    "segments",
                    segments.to_string(),
                    "A multi-span beam needs at least one span",
                ));
            }
            let span = self.length_m / f64::from(segments);
            if span < MIN_LENGTH_M {
                return Err(CalcError::invalid_configuration(
                    "segments",
                    segments.to_string(),
                    format!("Individual span of {span} m is too short"),
                ));
            }
        }

        Ok(())
    }

    /// Validate and derive the solver model
    pub fn model(&self) -> CalcResult<BeamModel> {
        self.validate()?;
        let ei: KiloNewtonSquareMeters = self.flexural_rigidity().into();
        Ok(BeamModel {
            length_m: self.length_m,
            support: self.support,
            ei_knm2: ei.0,
        })
    }
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self::simply_supported(10.0, 200.0, 100_000.0)
    }
}

// =============================================================================
// BEAM MODEL
// =============================================================================

/// A validated beam with its flexural rigidity derived.
///
/// Built once per request by [`BeamConfig::model`] and shared by every solve
/// the request performs (all axles, all sweep positions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamModel {
    /// Total beam length (m)
    pub length_m: f64,
    /// Support condition
    pub support: SupportCondition,
    /// Flexural rigidity (kN·m²)
    pub ei_knm2: f64,
}

impl BeamModel {
    /// Flexural rigidity in N·m²
    pub fn flexural_rigidity_nm2(&self) -> f64 {
        self.ei_knm2 * 1000.0
    }

    /// Length of one span (the full length unless the beam is multi-span)
    pub fn span_length_m(&self) -> f64 {
        self.length_m / f64::from(self.support.span_count())
    }

    /// Positions of the supports from the left end (m)
    pub fn support_positions(&self) -> Vec<f64> {
        match self.support {
            SupportCondition::Cantilever => vec![0.0],
            SupportCondition::SimplySupported
            | SupportCondition::FixedFixed
            | SupportCondition::FixedPinned => vec![0.0, self.length_m],
            SupportCondition::MultiSpan { segments } => {
                let span = self.span_length_m();
                (0..=segments)
                    .map(|k| if k == segments { self.length_m } else { f64::from(k) * span })
                    .collect()
            }
        }
    }

    /// Index of the span containing `x_m`. Points on an interior support belong
    /// to the span on their right; the far end belongs to the last span.
    pub fn span_index(&self, x_m: f64) -> usize {
        let count = self.support.span_count() as usize;
        let idx = (x_m / self.span_length_m()).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(count - 1)
        }
    }

    /// Start and end of span `index` (m)
    pub fn span_bounds(&self, index: usize) -> (f64, f64) {
        let count = self.support.span_count() as usize;
        let span = self.span_length_m();
        let start = index as f64 * span;
        let end = if index + 1 >= count {
            self.length_m
        } else {
            (index + 1) as f64 * span
        };
        (start, end)
    }
}
