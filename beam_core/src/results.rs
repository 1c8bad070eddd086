//! # Result Types
//!
//! Every response is sampled on a [`StationGrid`]: `divisions + 1` uniform
//! stations `x_i = i / divisions × length`, both ends included. All sequences
//! in a [`ResultSet`] are aligned to the same grid.
//!
//! ## Sign Convention
//! - Positive moment: sagging (tension on the bottom fiber)
//! - Positive shear: left face pushed up
//! - Positive deflection: downward (mm)
//! - Positive reaction: upward (kN); support moments follow the moment convention

use serde::{Deserialize, Serialize};

use crate::beam::SupportCondition;
use crate::errors::{CalcError, CalcResult};

/// Default number of divisions along the span (101 stations)
pub const DEFAULT_DIVISIONS: usize = 100;

// =============================================================================
// STATION GRID
// =============================================================================

/// Uniform sampling stations along the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationGrid {
    /// Beam length (m)
    pub length_m: f64,
    /// Number of intervals; there are `divisions + 1` stations
    pub divisions: usize,
}

impl StationGrid {
    /// Create a grid, rejecting a zero division count
    pub fn new(length_m: f64, divisions: usize) -> CalcResult<Self> {
        if divisions == 0 {
            return Err(CalcError::invalid_configuration(
                "divisions",
                "0",
                "At least one division is required",
            ));
        }
        Ok(Self { length_m, divisions })
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.divisions + 1
    }

    /// Always false; a grid has at least two stations
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Location of station `i` (m)
    pub fn station(&self, i: usize) -> f64 {
        if i >= self.divisions {
            self.length_m
        } else {
            i as f64 / self.divisions as f64 * self.length_m
        }
    }

    /// All station locations (m)
    pub fn positions(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.station(i)).collect()
    }

    /// Index of the station closest to `x_m`
    pub fn nearest_index(&self, x_m: f64) -> usize {
        let t = (x_m / self.length_m * self.divisions as f64).round();
        if t <= 0.0 {
            0
        } else {
            (t as usize).min(self.divisions)
        }
    }
}

// =============================================================================
// APPROXIMATION NOTICES
// =============================================================================

/// Marks a result computed by a known-approximate branch.
///
/// Notices are warnings, not errors: the numbers are still returned, but a
/// consumer must not present them as exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApproximationNotice {
    /// Multi-span beam: each loaded span solved as an isolated simply-supported
    /// span, continuity over interior supports ignored
    IsolatedSpan { segments: u32 },

    /// Partial distributed load on an indeterminate beam replaced by its
    /// resultant at the centroid (reactions, moments, shears and deflections)
    EquivalentPointLoad { support: SupportCondition },

    /// Deflection under a partial distributed load summed from point-load
    /// slices rather than a closed form
    DiscretizedDeflection { support: SupportCondition },

    /// Influence line on an indeterminate beam derived from the
    /// simply-supported line instead of a compatibility solution
    ApproximateInfluenceLine { support: SupportCondition },
}

impl ApproximationNotice {
    /// Human-readable description
    pub fn message(&self) -> String {
        match self {
            ApproximationNotice::IsolatedSpan { segments } => format!(
                "Multi-span beam ({segments} spans) analyzed as isolated simply-supported spans; continuity ignored"
            ),
            ApproximationNotice::EquivalentPointLoad { support } => format!(
                "{support}: partial distributed load replaced by an equivalent point load at its centroid"
            ),
            ApproximationNotice::DiscretizedDeflection { support } => format!(
                "{support}: partial distributed load deflection summed from point-load slices"
            ),
            ApproximationNotice::ApproximateInfluenceLine { support } => format!(
                "{support}: influence line scaled from the simply-supported line, not derived"
            ),
        }
    }
}

impl std::fmt::Display for ApproximationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Add a notice unless it is already present
pub(crate) fn push_notice(notices: &mut Vec<ApproximationNotice>, notice: ApproximationNotice) {
    if !notices.contains(&notice) {
        notices.push(notice);
    }
}

// =============================================================================
// RESULT SET
// =============================================================================

/// Reaction at one support
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    /// Support location from the left end (m)
    pub position_m: f64,
    /// Vertical reaction (kN), positive upward
    pub force_kn: f64,
    /// Support moment (kN·m), zero at pins and rollers
    pub moment_knm: f64,
}

/// Moment, shear and deflection sampled along the beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Station locations (m)
    pub stations: Vec<f64>,
    /// Bending moment at each station (kN·m)
    pub bending_moment: Vec<f64>,
    /// Shear force at each station (kN)
    pub shear_force: Vec<f64>,
    /// Deflection at each station (mm)
    pub deflection: Vec<f64>,
    /// Reactions at each support, left to right
    pub reactions: Vec<SupportReaction>,
    /// Bending-moment influence line, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence_line: Option<Vec<f64>>,
    /// Envelope of maximum effects, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<Envelope>,
    /// Approximate branches used to produce this result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<ApproximationNotice>,
}

impl ResultSet {
    /// All-zero response on `grid` with unloaded supports at `support_positions`
    pub fn zeros(grid: &StationGrid, support_positions: &[f64]) -> Self {
        let n = grid.len();
        ResultSet {
            stations: grid.positions(),
            bending_moment: vec![0.0; n],
            shear_force: vec![0.0; n],
            deflection: vec![0.0; n],
            reactions: support_positions
                .iter()
                .map(|&position_m| SupportReaction {
                    position_m,
                    force_kn: 0.0,
                    moment_knm: 0.0,
                })
                .collect(),
            influence_line: None,
            envelope: None,
            notices: Vec::new(),
        }
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the result has no stations
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Add another response on the same grid and supports, elementwise
    pub fn superpose(mut self, other: &ResultSet) -> CalcResult<Self> {
        if other.len() != self.len() || other.reactions.len() != self.reactions.len() {
            return Err(CalcError::Internal {
                message: format!(
                    "Cannot superpose results on different grids ({} vs {} stations)",
                    self.len(),
                    other.len()
                ),
            });
        }
        for (acc, v) in self.bending_moment.iter_mut().zip(&other.bending_moment) {
            *acc += v;
        }
        for (acc, v) in self.shear_force.iter_mut().zip(&other.shear_force) {
            *acc += v;
        }
        for (acc, v) in self.deflection.iter_mut().zip(&other.deflection) {
            *acc += v;
        }
        for (acc, r) in self.reactions.iter_mut().zip(&other.reactions) {
            acc.force_kn += r.force_kn;
            acc.moment_knm += r.moment_knm;
        }
        for notice in &other.notices {
            push_notice(&mut self.notices, *notice);
        }
        Ok(self)
    }

    /// Sum of vertical reactions (kN)
    pub fn total_reaction_kn(&self) -> f64 {
        self.reactions.iter().map(|r| r.force_kn).sum()
    }

    /// Largest-magnitude bending moment as `(station, value)`
    pub fn max_abs_moment(&self) -> (f64, f64) {
        peak_abs(&self.stations, &self.bending_moment)
    }

    /// Largest-magnitude shear as `(station, value)`
    pub fn max_abs_shear(&self) -> (f64, f64) {
        peak_abs(&self.stations, &self.shear_force)
    }

    /// Largest-magnitude deflection as `(station, value)`
    pub fn max_abs_deflection(&self) -> (f64, f64) {
        peak_abs(&self.stations, &self.deflection)
    }

    /// True if any approximate branch contributed
    pub fn is_approximate(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Station and signed value of the largest |value|; the first wins on ties
fn peak_abs(stations: &[f64], values: &[f64]) -> (f64, f64) {
    stations
        .iter()
        .zip(values)
        .fold((0.0, 0.0), |(bx, bv), (&x, &v)| {
            if v.abs() > f64::abs(bv) {
                (x, v)
            } else {
                (bx, bv)
            }
        })
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// Maximum absolute effects seen at each station over a load sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Station locations (m)
    pub stations: Vec<f64>,
    /// max |M| at each station (kN·m)
    pub max_bending_moment: Vec<f64>,
    /// max |V| at each station (kN)
    pub max_shear_force: Vec<f64>,
    /// Number of sweep increments (positions solved = steps + 1)
    pub steps: usize,
    /// Approximate branches used anywhere in the sweep
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<ApproximationNotice>,
}

impl Envelope {
    /// Largest envelope moment as `(station, value)`
    pub fn peak_moment(&self) -> (f64, f64) {
        peak_abs(&self.stations, &self.max_bending_moment)
    }

    /// Largest envelope shear as `(station, value)`
    pub fn peak_shear(&self) -> (f64, f64) {
        peak_abs(&self.stations, &self.max_shear_force)
    }
}

// =============================================================================
// INFLUENCE LINE
// =============================================================================

/// Bending moment at a fixed observation point as a unit load crosses the beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceLine {
    /// Observation point from the left end (m)
    pub observation_m: f64,
    /// Unit-load locations (m)
    pub stations: Vec<f64>,
    /// Moment at the observation point per unit load at each station (kN·m/kN)
    pub ordinates: Vec<f64>,
    /// Set when the line comes from an approximate branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<ApproximationNotice>,
}

impl InfluenceLine {
    /// Largest ordinate as `(station, value)`
    pub fn peak(&self) -> (f64, f64) {
        peak_abs(&self.stations, &self.ordinates)
    }
}
