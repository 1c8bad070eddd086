//! # Cantilever Formulas
//!
//! Cantilever fixed at x = 0 and free at x = L. The fixed-end moment is
//! hogging and therefore negative in the sagging-positive convention.
//!
//! ```text
//!    ▣━━━━━━━━━━━━━━━┯━━━━━━━━
//!    ▣               ↓ P
//!    ▣←──── a ──────→
//!    ▣←──────────── L ───────→
//! ```
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1, Cases 1a/2a (left end fixed)

use super::simple::DEFLECTION_SLICES;

// =============================================================================
// POINT LOAD
// =============================================================================

/// Reaction and fixed-end moment for point load P at a
///
/// # Formulas
/// - R = P
/// - M_A = -P·a
#[inline]
pub fn point_load_reactions(p: f64, a: f64) -> (f64, f64) {
    (p, -p * a)
}

/// Shear at x: P between the support and the load, zero beyond it
#[inline]
pub fn point_load_shear(p: f64, a: f64, x: f64) -> f64 {
    if x < a {
        p
    } else {
        0.0
    }
}

/// Moment at x
///
/// # Formulas
/// - M(x) = -P(a-x)   for x < a
/// - M(x) = 0         for x ≥ a
#[inline]
pub fn point_load_moment(p: f64, a: f64, x: f64) -> f64 {
    if x < a {
        -p * (a - x)
    } else {
        0.0
    }
}

/// Deflection at x (positive downward)
///
/// # Formulas
/// - δ(x) = Px²(3a - x) / (6EI)   for x ≤ a
/// - δ(x) = Pa²(3x - a) / (6EI)   for x > a
#[inline]
pub fn point_load_deflection(p: f64, a: f64, x: f64, ei: f64) -> f64 {
    if x <= a {
        p * x * x * (3.0 * a - x) / (6.0 * ei)
    } else {
        p * a * a * (3.0 * x - a) / (6.0 * ei)
    }
}

// =============================================================================
// PARTIAL UNIFORM LOAD
// =============================================================================

/// Reaction and fixed-end moment for uniform load w from a to b
///
/// # Formulas
/// - R = W = w(b-a)
/// - M_A = -W·c, c = (a+b)/2
#[inline]
pub fn partial_uniform_reactions(w: f64, a: f64, b: f64) -> (f64, f64) {
    let total_load = w * (b - a);
    let centroid = (a + b) / 2.0;
    (total_load, -total_load * centroid)
}

/// Shear at x: the load still outboard of the section
#[inline]
pub fn partial_uniform_shear(w: f64, a: f64, b: f64, x: f64) -> f64 {
    if x <= a {
        w * (b - a)
    } else if x >= b {
        0.0
    } else {
        w * (b - x)
    }
}

/// Moment at x
///
/// # Formulas
/// - M(x) = -W(c-x)      for x ≤ a
/// - M(x) = -w(b-x)²/2   for a < x < b
/// - M(x) = 0            for x ≥ b
#[inline]
pub fn partial_uniform_moment(w: f64, a: f64, b: f64, x: f64) -> f64 {
    if x <= a {
        let total_load = w * (b - a);
        let centroid = (a + b) / 2.0;
        -total_load * (centroid - x)
    } else if x >= b {
        0.0
    } else {
        -w * (b - x).powi(2) / 2.0
    }
}

/// Deflection at x for uniform load over the full length
///
/// # Formula
/// δ(x) = wx²(6L² - 4Lx + x²) / (24EI)
///
/// Tip: δ_max = wL⁴ / (8EI)
#[inline]
pub fn uniform_load_deflection(w: f64, l: f64, x: f64, ei: f64) -> f64 {
    w * x * x * (6.0 * l * l - 4.0 * l * x + x * x) / (24.0 * ei)
}

/// Deflection at x for partial uniform load, summed from point-load slices
pub fn partial_uniform_deflection_sliced(w: f64, a: f64, b: f64, x: f64, ei: f64) -> f64 {
    let slice = (b - a) / DEFLECTION_SLICES as f64;
    let slice_load = w * slice;
    (0..DEFLECTION_SLICES)
        .map(|k| point_load_deflection(slice_load, a + (k as f64 + 0.5) * slice, x, ei))
        .sum()
}

// =============================================================================
// INFLUENCE LINE
// =============================================================================

/// Moment at c due to a unit load at x: -(x-c) once the load is outboard of c
#[inline]
pub fn moment_influence_ordinate(c: f64, x: f64) -> f64 {
    if x >= c {
        -(x - c)
    } else {
        0.0
    }
}
