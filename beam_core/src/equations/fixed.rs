//! # Fixed-End Beam Formulas
//!
//! Closed-form solutions for the two statically indeterminate single spans:
//!
//! - **Fixed-fixed**: both ends restrained against rotation
//! - **Fixed-pinned** (propped cantilever): fixed at x = 0, pinned at x = L
//!
//! End moments are hogging and returned negative (sagging-positive convention).
//! Only point loads and full-span uniform loads have exact forms here; partial
//! uniform loads are handled by the solver through an equivalent point load.
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1, Cases 1c/1e/2c/2e
//! - AISC Steel Construction Manual, Table 3-23, Cases 13-16

use super::cantilever;

// =============================================================================
// FIXED-FIXED: POINT LOAD
// =============================================================================

/// Reactions for point load P at a on a fixed-fixed span
///
/// # Formulas
/// - R_A = Pb²(3a + b)/L³
/// - R_B = Pa²(a + 3b)/L³
#[inline]
pub fn fixed_fixed_point_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let b = l - a;
    let l3 = l.powi(3);
    (p * b * b * (3.0 * a + b) / l3, p * a * a * (a + 3.0 * b) / l3)
}

/// End moments for point load P at a on a fixed-fixed span
///
/// # Formulas
/// - M_A = -Pab²/L²
/// - M_B = -Pa²b/L²
#[inline]
pub fn fixed_fixed_point_end_moments(p: f64, a: f64, l: f64) -> (f64, f64) {
    let b = l - a;
    let l2 = l * l;
    (-p * a * b * b / l2, -p * a * a * b / l2)
}

/// Shear at x for point load P at a on a fixed-fixed span
#[inline]
pub fn fixed_fixed_point_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (ra, _) = fixed_fixed_point_reactions(p, a, l);
    if x < a {
        ra
    } else {
        ra - p
    }
}

/// Moment at x for point load P at a on a fixed-fixed span
///
/// M(x) = M_A + R_A·x - P⟨x-a⟩
#[inline]
pub fn fixed_fixed_point_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (ra, _) = fixed_fixed_point_reactions(p, a, l);
    let (ma, _) = fixed_fixed_point_end_moments(p, a, l);
    if x <= a {
        ma + ra * x
    } else {
        ma + ra * x - p * (x - a)
    }
}

/// Deflection at x for point load P at a on a fixed-fixed span
///
/// # Formulas
/// For x ≤ a:
/// ```text
/// δ(x) = Pb²x²(3aL - (3a + b)x) / (6EIL³)
/// ```
/// For x > a the same form with the span mirrored (a ↔ b, x → L-x).
#[inline]
pub fn fixed_fixed_point_deflection(p: f64, a: f64, l: f64, x: f64, ei: f64) -> f64 {
    let b = l - a;
    let denom = 6.0 * ei * l.powi(3);
    if x <= a {
        p * b * b * x * x * (3.0 * a * l - (3.0 * a + b) * x) / denom
    } else {
        let xr = l - x;
        p * a * a * xr * xr * (3.0 * b * l - (3.0 * b + a) * xr) / denom
    }
}

// =============================================================================
// FIXED-FIXED: FULL-SPAN UNIFORM LOAD
// =============================================================================

/// Reactions for full-span uniform load: R_A = R_B = wL/2
#[inline]
pub fn fixed_fixed_uniform_reactions(w: f64, l: f64) -> (f64, f64) {
    let r = w * l / 2.0;
    (r, r)
}

/// End moments for full-span uniform load: M_A = M_B = -wL²/12
#[inline]
pub fn fixed_fixed_uniform_end_moments(w: f64, l: f64) -> (f64, f64) {
    let m = -w * l * l / 12.0;
    (m, m)
}

/// Shear at x for full-span uniform load: V(x) = w(L/2 - x)
#[inline]
pub fn fixed_fixed_uniform_shear(w: f64, l: f64, x: f64) -> f64 {
    w * (l / 2.0 - x)
}

/// Moment at x for full-span uniform load
///
/// M(x) = w(6Lx - 6x² - L²)/12, with +wL²/24 at midspan
#[inline]
pub fn fixed_fixed_uniform_moment(w: f64, l: f64, x: f64) -> f64 {
    w * (6.0 * l * x - 6.0 * x * x - l * l) / 12.0
}

/// Deflection at x for full-span uniform load
///
/// δ(x) = wx²(L-x)² / (24EI), δ_max = wL⁴/(384EI)
#[inline]
pub fn fixed_fixed_uniform_deflection(w: f64, l: f64, x: f64, ei: f64) -> f64 {
    w * x * x * (l - x).powi(2) / (24.0 * ei)
}

// =============================================================================
// FIXED-PINNED: POINT LOAD
// =============================================================================

/// Reactions for point load P at a on a propped cantilever
///
/// # Formulas
/// - R_B = Pa²(3L - a)/(2L³)
/// - R_A = P - R_B
#[inline]
pub fn fixed_pinned_point_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let rb = p * a * a * (3.0 * l - a) / (2.0 * l.powi(3));
    (p - rb, rb)
}

/// Fixed-end moment for point load P at a on a propped cantilever
///
/// M_A = -Pab(L + b)/(2L²)
#[inline]
pub fn fixed_pinned_point_end_moment(p: f64, a: f64, l: f64) -> f64 {
    let b = l - a;
    -p * a * b * (l + b) / (2.0 * l * l)
}

/// Shear at x for point load P at a on a propped cantilever
#[inline]
pub fn fixed_pinned_point_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (ra, _) = fixed_pinned_point_reactions(p, a, l);
    if x < a {
        ra
    } else {
        ra - p
    }
}

/// Moment at x for point load P at a on a propped cantilever
///
/// M(x) = M_A + R_A·x - P⟨x-a⟩, zero at the pin
#[inline]
pub fn fixed_pinned_point_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (ra, _) = fixed_pinned_point_reactions(p, a, l);
    let ma = fixed_pinned_point_end_moment(p, a, l);
    if x <= a {
        ma + ra * x
    } else {
        ma + ra * x - p * (x - a)
    }
}

/// Deflection at x for point load P at a on a propped cantilever
///
/// Cantilever deflection under P minus the cantilever deflection under the
/// prop reaction R_B acting upward at the tip.
#[inline]
pub fn fixed_pinned_point_deflection(p: f64, a: f64, l: f64, x: f64, ei: f64) -> f64 {
    let (_, rb) = fixed_pinned_point_reactions(p, a, l);
    cantilever::point_load_deflection(p, a, x, ei) - cantilever::point_load_deflection(rb, l, x, ei)
}

// =============================================================================
// FIXED-PINNED: FULL-SPAN UNIFORM LOAD
// =============================================================================

/// Reactions for full-span uniform load: R_A = 5wL/8, R_B = 3wL/8
#[inline]
pub fn fixed_pinned_uniform_reactions(w: f64, l: f64) -> (f64, f64) {
    (5.0 * w * l / 8.0, 3.0 * w * l / 8.0)
}

/// Fixed-end moment for full-span uniform load: M_A = -wL²/8
#[inline]
pub fn fixed_pinned_uniform_end_moment(w: f64, l: f64) -> f64 {
    -w * l * l / 8.0
}

/// Shear at x for full-span uniform load: V(x) = 5wL/8 - wx
#[inline]
pub fn fixed_pinned_uniform_shear(w: f64, l: f64, x: f64) -> f64 {
    5.0 * w * l / 8.0 - w * x
}

/// Moment at x for full-span uniform load
///
/// M(x) = -wL²/8 + 5wLx/8 - wx²/2, max positive 9wL²/128 at x = 5L/8
#[inline]
pub fn fixed_pinned_uniform_moment(w: f64, l: f64, x: f64) -> f64 {
    -w * l * l / 8.0 + 5.0 * w * l * x / 8.0 - w * x * x / 2.0
}

/// Deflection at x for full-span uniform load
///
/// δ(x) = wx²(L-x)(3L-2x) / (48EI)
#[inline]
pub fn fixed_pinned_uniform_deflection(w: f64, l: f64, x: f64, ei: f64) -> f64 {
    w * x * x * (l - x) * (3.0 * l - 2.0 * x) / (48.0 * ei)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 || (a - b).abs() / b.abs().max(1.0) < 1e-6
    }

    #[test]
    fn test_fixed_fixed_midspan_point() {
        // M_A = M_B = -PL/8, M_mid = +PL/8, δ_mid = PL³/(192EI)
        let (p, l, ei) = (80.0, 8.0, 1.0e4);
        let (ma, mb) = fixed_fixed_point_end_moments(p, l / 2.0, l);
        assert!(approx_eq(ma, -p * l / 8.0));
        assert!(approx_eq(mb, -p * l / 8.0));
        assert!(approx_eq(fixed_fixed_point_moment(p, l / 2.0, l, l / 2.0), p * l / 8.0));
        assert!(approx_eq(
            fixed_fixed_point_deflection(p, l / 2.0, l, l / 2.0, ei),
            p * l.powi(3) / (192.0 * ei)
        ));
    }

    #[test]
    fn test_fixed_fixed_point_end_conditions() {
        let (p, a, l, ei) = (50.0, 2.0, 9.0, 3.0e3);
        let (ra, rb) = fixed_fixed_point_reactions(p, a, l);
        assert!(approx_eq(ra + rb, p));
        let (_, mb) = fixed_fixed_point_end_moments(p, a, l);
        assert!(approx_eq(fixed_fixed_point_moment(p, a, l, l), mb));
        assert!(approx_eq(fixed_fixed_point_deflection(p, a, l, 0.0, ei), 0.0));
        assert!(approx_eq(fixed_fixed_point_deflection(p, a, l, l, ei), 0.0));
        // Both branches agree under the load
        let left = fixed_fixed_point_deflection(p, a, l, a, ei);
        let right = fixed_fixed_point_deflection(p, a, l, a + 1e-9, ei);
        assert!((left - right).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_fixed_uniform() {
        let (w, l, ei) = (12.0, 6.0, 2.0e3);
        assert!(approx_eq(fixed_fixed_uniform_moment(w, l, 0.0), -w * l * l / 12.0));
        assert!(approx_eq(fixed_fixed_uniform_moment(w, l, l / 2.0), w * l * l / 24.0));
        assert!(approx_eq(
            fixed_fixed_uniform_deflection(w, l, l / 2.0, ei),
            w * l.powi(4) / (384.0 * ei)
        ));
    }

    #[test]
    fn test_fixed_pinned_point_closure() {
        let (p, a, l, ei) = (40.0, 3.0, 10.0, 5.0e3);
        let (ra, rb) = fixed_pinned_point_reactions(p, a, l);
        assert!(approx_eq(ra + rb, p));
        assert!(fixed_pinned_point_moment(p, a, l, l).abs() < 1e-9);
        assert!(approx_eq(fixed_pinned_point_moment(p, a, l, 0.0), fixed_pinned_point_end_moment(p, a, l)));
        assert!(fixed_pinned_point_deflection(p, a, l, 0.0, ei).abs() < 1e-12);
        assert!(fixed_pinned_point_deflection(p, a, l, l, ei).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_pinned_midspan_point() {
        // Classic propped cantilever: M_A = -3PL/16, R_B = 5P/16
        let (p, l) = (16.0, 4.0);
        let (_, rb) = fixed_pinned_point_reactions(p, l / 2.0, l);
        assert!(approx_eq(rb, 5.0));
        assert!(approx_eq(fixed_pinned_point_end_moment(p, l / 2.0, l), -3.0 * p * l / 16.0));
    }

    #[test]
    fn test_fixed_pinned_uniform() {
        let (w, l, ei) = (8.0, 5.0, 1.0e3);
        assert!(fixed_pinned_uniform_moment(w, l, l).abs() < 1e-9);
        assert!(approx_eq(fixed_pinned_uniform_moment(w, l, 0.0), fixed_pinned_uniform_end_moment(w, l)));
        assert!(approx_eq(
            fixed_pinned_uniform_moment(w, l, 5.0 * l / 8.0),
            9.0 * w * l * l / 128.0
        ));
        let (ra, rb) = fixed_pinned_uniform_reactions(w, l);
        assert!(approx_eq(ra + rb, w * l));
        // Matches cantilever minus prop
        let x = 2.2;
        let by_superposition = cantilever::uniform_load_deflection(w, l, x, ei)
            - cantilever::point_load_deflection(rb, l, x, ei);
        assert!(approx_eq(fixed_pinned_uniform_deflection(w, l, x, ei), by_superposition));
    }
}
