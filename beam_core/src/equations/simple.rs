//! # Simply-Supported Beam Formulas
//!
//! Fundamental equations for simply-supported beams under various loading conditions.
//! All formulas assume a beam with pin support at left (x=0) and roller at right (x=L).
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `x` = Position along beam from left support
//! - `a` = Load position from left support
//! - `P` = Point load magnitude
//! - `w` = Uniform load intensity (force per unit length)
//! - `EI` = Flexural rigidity
//! - `R1` = Left reaction, `R2` = Right reaction
//!
//! Units must be consistent: the solver passes kN, m and kN·m², so
//! deflections come back in m.
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1
//! - Structural Analysis by R.C. Hibbeler

/// Number of point-load slices used to integrate partial uniform load deflection
pub const DEFLECTION_SLICES: usize = 20;

// =============================================================================
// POINT LOAD FORMULAS
// Simply-supported beam with concentrated load P at distance 'a' from left
// =============================================================================

/// Calculate reactions for point load P at position a on span L
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            △
///   R1  ←───────L────→ R2
/// ```
///
/// # Formulas (Roark's Table 8.1, Case 1a)
/// - R1 = P(L-a)/L
/// - R2 = Pa/L
#[inline]
pub fn point_load_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let r1 = p * (l - a) / l;
    let r2 = p * a / l;
    (r1, r2)
}

/// Calculate shear at position x for point load P at position a
///
/// # Formulas
/// - V(x) = R1           for x < a
/// - V(x) = R1 - P       for x ≥ a
#[inline]
pub fn point_load_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = point_load_reactions(p, a, l);
    if x < a {
        r1
    } else {
        r1 - p
    }
}

/// Calculate moment at position x for point load P at position a
///
/// # Formulas (Roark's Table 8.1, Case 1a)
/// - M(x) = R1·x           for x ≤ a
/// - M(x) = R1·x - P(x-a)  for x > a
///
/// Maximum moment occurs at the load point:
/// - M_max = Pa(L-a)/L
#[inline]
pub fn point_load_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = point_load_reactions(p, a, l);
    if x <= a {
        r1 * x
    } else {
        r1 * x - p * (x - a)
    }
}

/// Calculate deflection at position x for point load P at position a
///
/// # Formulas (Roark's Table 8.1, Case 1a)
///
/// For x ≤ a:
/// ```text
/// δ(x) = Pbx(L² - b² - x²) / (6EIL)
/// ```
///
/// For x > a:
/// ```text
/// δ(x) = Pa(L-x)(2Lx - x² - a²) / (6EIL)
/// ```
///
/// where b = L - a. Deflection is positive downward.
#[inline]
pub fn point_load_deflection(p: f64, a: f64, l: f64, x: f64, ei: f64) -> f64 {
    let b = l - a;

    if x <= a {
        p * b * x * (l * l - b * b - x * x) / (6.0 * ei * l)
    } else {
        p * a * (l - x) * (2.0 * l * x - x * x - a * a) / (6.0 * ei * l)
    }
}

// =============================================================================
// UNIFORM LOAD FORMULAS
// Simply-supported beam with uniform load w over entire span
// =============================================================================

/// Calculate deflection at position x for uniform load w over the full span
///
/// # Formula (Roark's Table 8.1, Case 2a)
/// δ(x) = wx(L³ - 2Lx² + x³) / (24EI)
///
/// Maximum at midspan: δ_max = 5wL⁴ / (384EI)
#[inline]
pub fn uniform_load_deflection(w: f64, l: f64, x: f64, ei: f64) -> f64 {
    w * x * (l.powi(3) - 2.0 * l * x * x + x.powi(3)) / (24.0 * ei)
}

// =============================================================================
// PARTIAL UNIFORM LOAD FORMULAS
// Simply-supported beam with uniform load w from position a to b
// =============================================================================

/// Calculate reactions for partial uniform load w from a to b
///
/// ```text
///          ↓↓↓↓↓↓↓↓↓ w
///    ══════════════════
///    △     a     b     △
///   R1  ←─────L─────→ R2
/// ```
///
/// # Formulas
/// Total load W = w(b-a)
/// Centroid at c = (a+b)/2
/// - R1 = W(L-c)/L
/// - R2 = Wc/L
#[inline]
pub fn partial_uniform_reactions(w: f64, a: f64, b: f64, l: f64) -> (f64, f64) {
    let total_load = w * (b - a);
    let centroid = (a + b) / 2.0;
    let r1 = total_load * (l - centroid) / l;
    let r2 = total_load * centroid / l;
    (r1, r2)
}

/// Calculate shear at position x for partial uniform load
///
/// # Formulas
/// - V(x) = R1                     for x ≤ a
/// - V(x) = R1 - w(x-a)            for a < x < b
/// - V(x) = R1 - w(b-a) = -R2      for x ≥ b
#[inline]
pub fn partial_uniform_shear(w: f64, a: f64, b: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = partial_uniform_reactions(w, a, b, l);

    if x <= a {
        r1
    } else if x >= b {
        r1 - w * (b - a)
    } else {
        r1 - w * (x - a)
    }
}

/// Calculate moment at position x for partial uniform load
///
/// # Formulas
/// - M(x) = R1·x                           for x ≤ a
/// - M(x) = R1·x - w(x-a)²/2               for a < x < b
/// - M(x) = R1·x - W(x-c)                  for x ≥ b
///   where W = w(b-a), c = (a+b)/2
#[inline]
pub fn partial_uniform_moment(w: f64, a: f64, b: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = partial_uniform_reactions(w, a, b, l);

    if x <= a {
        r1 * x
    } else if x >= b {
        let total_load = w * (b - a);
        let centroid = (a + b) / 2.0;
        r1 * x - total_load * (x - centroid)
    } else {
        r1 * x - w * (x - a).powi(2) / 2.0
    }
}

/// Deflection at x for partial uniform load, summed from point-load slices.
///
/// The load is cut into [`DEFLECTION_SLICES`] equal slices, each applied as a
/// point load at its midpoint. Exact for the full-span case only in the limit;
/// callers flag the result as approximate.
pub fn partial_uniform_deflection_sliced(w: f64, a: f64, b: f64, l: f64, x: f64, ei: f64) -> f64 {
    let slice = (b - a) / DEFLECTION_SLICES as f64;
    let slice_load = w * slice;
    (0..DEFLECTION_SLICES)
        .map(|k| {
            let pos = a + (k as f64 + 0.5) * slice;
            point_load_deflection(slice_load, pos, l, x, ei)
        })
        .sum()
}

// =============================================================================
// INFLUENCE LINE
// =============================================================================

/// Moment at c due to a unit load at x (Müller-Breslau)
///
/// # Formulas
/// - η(x) = x(L-c)/L    for x ≤ c
/// - η(x) = c(L-x)/L    for x > c
///
/// Peak at x = c: η = c(L-c)/L
#[inline]
pub fn moment_influence_ordinate(c: f64, l: f64, x: f64) -> f64 {
    if x <= c {
        x * (l - c) / l
    } else {
        c * (l - x) / l
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
