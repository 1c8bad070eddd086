//! Single-Load Solver
//!
//! Solves one point or distributed load on a beam and samples bending moment,
//! shear and deflection at every station of a [`StationGrid`]. The formula set
//! is selected by matching on [`SupportCondition`]:
//!
//! | Support | Point load | Full-span UDL | Partial UDL |
//! |---|---|---|---|
//! | SimplySupported | exact | exact | exact M/V, sliced deflection |
//! | Cantilever | exact | exact | exact M/V, sliced deflection |
//! | FixedFixed | exact | exact | equivalent point load at centroid |
//! | FixedPinned | exact | exact | equivalent point load at centroid |
//! | MultiSpan | isolated simply-supported span | split per span | split per span |
//!
//! Every approximate branch records an [`ApproximationNotice`] on the result.
//!
//! ## Example
//! ```rust
//! use beam_core::beam::BeamConfig;
//! use beam_core::calculations::single_load::solve_single;
//! use beam_core::loads::SingleLoad;
//! use beam_core::results::StationGrid;
//!
//! let model = BeamConfig::simply_supported(10.0, 200.0, 100_000.0).model().unwrap();
//! let grid = StationGrid::new(model.length_m, 100).unwrap();
//! let result = solve_single(&model, &SingleLoad::point(100.0, 0.5), &grid).unwrap();
//! assert!((result.bending_moment[50] - 250.0).abs() < 1e-9);
//! ```

use tracing::debug;

use crate::beam::{BeamModel, SupportCondition};
use crate::equations::{cantilever, fixed, simple};
use crate::errors::CalcResult;
use crate::loads::SingleLoad;
use crate::results::{push_notice, ApproximationNotice, ResultSet, StationGrid};
use crate::units::{Meters, Millimeters};

/// Relative tolerance for treating a distributed load as covering the full span
const FULL_SPAN_TOLERANCE: f64 = 1.0e-9;

/// A load in absolute coordinates (kN, kN/m, m)
#[derive(Debug, Clone, Copy, PartialEq)]
enum AppliedLoad {
    Point { p: f64, a: f64 },
    Uniform { w: f64, a: f64, b: f64 },
}

impl AppliedLoad {
    fn from_single(load: &SingleLoad, length_m: f64) -> Self {
        match load {
            SingleLoad::Point(point) => AppliedLoad::Point {
                p: point.magnitude_kn,
                a: point.position_m(length_m),
            },
            SingleLoad::Distributed(dist) => {
                let (a, b) = dist.extent_m(length_m);
                AppliedLoad::Uniform {
                    w: dist.magnitude_kn_per_m,
                    a,
                    b,
                }
            }
        }
    }

    /// True for a uniform load reaching both ends of a span of length `l`
    fn covers(&self, l: f64) -> bool {
        match *self {
            AppliedLoad::Point { .. } => false,
            AppliedLoad::Uniform { a, b, .. } => {
                a <= FULL_SPAN_TOLERANCE * l && b >= l - FULL_SPAN_TOLERANCE * l
            }
        }
    }

    /// Resultant `(P, a)` at the centroid
    fn resultant(&self) -> (f64, f64) {
        match *self {
            AppliedLoad::Point { p, a } => (p, a),
            AppliedLoad::Uniform { w, a, b } => (w * (b - a), (a + b) / 2.0),
        }
    }

    /// The part of this load on `[start, end]`, in coordinates local to `start`
    fn on_span(&self, start: f64, end: f64, owns_point: bool) -> Option<AppliedLoad> {
        match *self {
            AppliedLoad::Point { p, a } => owns_point.then_some(AppliedLoad::Point {
                p,
                a: (a - start).clamp(0.0, end - start),
            }),
            AppliedLoad::Uniform { w, a, b } => {
                let lo = a.max(start);
                let hi = b.min(end);
                (hi - lo > FULL_SPAN_TOLERANCE * (end - start)).then_some(AppliedLoad::Uniform {
                    w,
                    a: lo - start,
                    b: hi - start,
                })
            }
        }
    }
}

fn to_mm(deflection_m: f64) -> f64 {
    Millimeters::from(Meters(deflection_m)).0
}

/// Solve a single load.
///
/// The load is validated against the beam before anything is computed.
pub fn solve_single(model: &BeamModel, load: &SingleLoad, grid: &StationGrid) -> CalcResult<ResultSet> {
    load.validate(model.length_m)?;

    let applied = AppliedLoad::from_single(load, model.length_m);
    let mut result = ResultSet::zeros(grid, &model.support_positions());

    debug!(support = %model.support, load = ?applied, "solving single load");

    match model.support {
        SupportCondition::SimplySupported => {
            let indices: Vec<usize> = (0..result.len()).collect();
            let (r1, r2) = fill_simple_span(model, &applied, 0.0, model.length_m, &indices, &mut result);
            result.reactions[0].force_kn = r1;
            result.reactions[1].force_kn = r2;
        }
        SupportCondition::Cantilever => solve_cantilever(model, &applied, &mut result),
        SupportCondition::FixedFixed => solve_fixed_fixed(model, &applied, &mut result),
        SupportCondition::FixedPinned => solve_fixed_pinned(model, &applied, &mut result),
        SupportCondition::MultiSpan { segments } => solve_multi_span(model, segments, &applied, &mut result),
    }

    for notice in &result.notices {
        debug!(%notice, "approximate branch");
    }

    Ok(result)
}

// =============================================================================
// SIMPLY-SUPPORTED SPAN
// =============================================================================

/// Fill stations `indices` with the response of an isolated simply-supported
/// span `[start, start + l]` carrying `load` (local coordinates). Returns `(R1, R2)`.
fn fill_simple_span(
    model: &BeamModel,
    load: &AppliedLoad,
    start: f64,
    l: f64,
    indices: &[usize],
    result: &mut ResultSet,
) -> (f64, f64) {
    let ei = model.ei_knm2;

    match *load {
        AppliedLoad::Point { p, a } => {
            for &i in indices {
                let x = result.stations[i] - start;
                result.bending_moment[i] = simple::point_load_moment(p, a, l, x);
                result.shear_force[i] = simple::point_load_shear(p, a, l, x);
                result.deflection[i] = to_mm(simple::point_load_deflection(p, a, l, x, ei));
            }
            simple::point_load_reactions(p, a, l)
        }
        AppliedLoad::Uniform { w, a, b } => {
            let full = load.covers(l);
            if !full {
                push_notice(
                    &mut result.notices,
                    ApproximationNotice::DiscretizedDeflection { support: model.support },
                );
            }
            for &i in indices {
                let x = result.stations[i] - start;
                result.bending_moment[i] = simple::partial_uniform_moment(w, a, b, l, x);
                result.shear_force[i] = simple::partial_uniform_shear(w, a, b, l, x);
                let d = if full {
                    simple::uniform_load_deflection(w, l, x, ei)
                } else {
                    simple::partial_uniform_deflection_sliced(w, a, b, l, x, ei)
                };
                result.deflection[i] = to_mm(d);
            }
            simple::partial_uniform_reactions(w, a, b, l)
        }
    }
}

// =============================================================================
// CANTILEVER
// =============================================================================

fn solve_cantilever(model: &BeamModel, load: &AppliedLoad, result: &mut ResultSet) {
    let (l, ei) = (model.length_m, model.ei_knm2);

    let (reaction, fixed_moment) = match *load {
        AppliedLoad::Point { p, a } => {
            for (i, &x) in result.stations.iter().enumerate() {
                result.bending_moment[i] = cantilever::point_load_moment(p, a, x);
                result.shear_force[i] = cantilever::point_load_shear(p, a, x);
                result.deflection[i] = to_mm(cantilever::point_load_deflection(p, a, x, ei));
            }
            cantilever::point_load_reactions(p, a)
        }
        AppliedLoad::Uniform { w, a, b } => {
            let full = load.covers(l);
            if !full {
                push_notice(
                    &mut result.notices,
                    ApproximationNotice::DiscretizedDeflection { support: model.support },
                );
            }
            for (i, &x) in result.stations.iter().enumerate() {
                result.bending_moment[i] = cantilever::partial_uniform_moment(w, a, b, x);
                result.shear_force[i] = cantilever::partial_uniform_shear(w, a, b, x);
                let d = if full {
                    cantilever::uniform_load_deflection(w, l, x, ei)
                } else {
                    cantilever::partial_uniform_deflection_sliced(w, a, b, x, ei)
                };
                result.deflection[i] = to_mm(d);
            }
            cantilever::partial_uniform_reactions(w, a, b)
        }
    };

    result.reactions[0].force_kn = reaction;
    result.reactions[0].moment_knm = fixed_moment;
}

// =============================================================================
// FIXED-FIXED
// =============================================================================

fn solve_fixed_fixed(model: &BeamModel, load: &AppliedLoad, result: &mut ResultSet) {
    let (l, ei) = (model.length_m, model.ei_knm2);

    if let AppliedLoad::Uniform { w, .. } = *load {
        if load.covers(l) {
            for (i, &x) in result.stations.iter().enumerate() {
                result.bending_moment[i] = fixed::fixed_fixed_uniform_moment(w, l, x);
                result.shear_force[i] = fixed::fixed_fixed_uniform_shear(w, l, x);
                result.deflection[i] = to_mm(fixed::fixed_fixed_uniform_deflection(w, l, x, ei));
            }
            let (ra, rb) = fixed::fixed_fixed_uniform_reactions(w, l);
            let (ma, mb) = fixed::fixed_fixed_uniform_end_moments(w, l);
            set_end_reactions(result, (ra, ma), (rb, mb));
            return;
        }
        push_notice(
            &mut result.notices,
            ApproximationNotice::EquivalentPointLoad { support: model.support },
        );
    }

    let (p, a) = load.resultant();
    for (i, &x) in result.stations.iter().enumerate() {
        result.bending_moment[i] = fixed::fixed_fixed_point_moment(p, a, l, x);
        result.shear_force[i] = fixed::fixed_fixed_point_shear(p, a, l, x);
        result.deflection[i] = to_mm(fixed::fixed_fixed_point_deflection(p, a, l, x, ei));
    }
    let (ra, rb) = fixed::fixed_fixed_point_reactions(p, a, l);
    let (ma, mb) = fixed::fixed_fixed_point_end_moments(p, a, l);
    set_end_reactions(result, (ra, ma), (rb, mb));
}

// =============================================================================
// FIXED-PINNED
// =============================================================================

fn solve_fixed_pinned(model: &BeamModel, load: &AppliedLoad, result: &mut ResultSet) {
    let (l, ei) = (model.length_m, model.ei_knm2);

    let full_uniform = match *load {
        AppliedLoad::Uniform { w, .. } if load.covers(l) => Some(w),
        _ => None,
    };

    if let Some(w) = full_uniform {
        for (i, &x) in result.stations.iter().enumerate() {
            result.bending_moment[i] = fixed::fixed_pinned_uniform_moment(w, l, x);
            result.shear_force[i] = fixed::fixed_pinned_uniform_shear(w, l, x);
            result.deflection[i] = to_mm(fixed::fixed_pinned_uniform_deflection(w, l, x, ei));
        }
        let (ra, rb) = fixed::fixed_pinned_uniform_reactions(w, l);
        let ma = fixed::fixed_pinned_uniform_end_moment(w, l);
        set_end_reactions(result, (ra, ma), (rb, 0.0));
    } else {
        if matches!(load, AppliedLoad::Uniform { .. }) {
            push_notice(
                &mut result.notices,
                ApproximationNotice::EquivalentPointLoad { support: model.support },
            );
        }
        let (p, a) = load.resultant();
        for (i, &x) in result.stations.iter().enumerate() {
            result.bending_moment[i] = fixed::fixed_pinned_point_moment(p, a, l, x);
            result.shear_force[i] = fixed::fixed_pinned_point_shear(p, a, l, x);
            result.deflection[i] = to_mm(fixed::fixed_pinned_point_deflection(p, a, l, x, ei));
        }
        let (ra, rb) = fixed::fixed_pinned_point_reactions(p, a, l);
        let ma = fixed::fixed_pinned_point_end_moment(p, a, l);
        set_end_reactions(result, (ra, ma), (rb, 0.0));
    }

    // The pin carries no moment
    if let Some(last) = result.bending_moment.last_mut() {
        *last = 0.0;
    }
}

fn set_end_reactions(result: &mut ResultSet, left: (f64, f64), right: (f64, f64)) {
    result.reactions[0].force_kn = left.0;
    result.reactions[0].moment_knm = left.1;
    result.reactions[1].force_kn = right.0;
    result.reactions[1].moment_knm = right.1;
}

// =============================================================================
// MULTI-SPAN
// =============================================================================

/// Each span the load touches is solved as an isolated simply-supported span.
/// Spans without load keep a zero response.
fn solve_multi_span(model: &BeamModel, segments: u32, load: &AppliedLoad, result: &mut ResultSet) {
    push_notice(&mut result.notices, ApproximationNotice::IsolatedSpan { segments });

    let owner: Vec<usize> = result.stations.iter().map(|&x| model.span_index(x)).collect();
    let point_span = match *load {
        AppliedLoad::Point { a, .. } => Some(model.span_index(a)),
        AppliedLoad::Uniform { .. } => None,
    };

    for k in 0..segments as usize {
        let (start, end) = model.span_bounds(k);
        let Some(local) = load.on_span(start, end, point_span == Some(k)) else {
            continue;
        };
        let indices: Vec<usize> = owner
            .iter()
            .enumerate()
            .filter(|(_, &span)| span == k)
            .map(|(i, _)| i)
            .collect();

        let (r1, r2) = fill_simple_span(model, &local, start, end - start, &indices, result);
        result.reactions[k].force_kn += r1;
        result.reactions[k + 1].force_kn += r2;
        debug!(span = k, r1, r2, "isolated span solved");
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::beam::BeamConfig;
    use proptest::prelude::*;

    fn support_strategy() -> impl Strategy<Value = SupportCondition> {
        prop_oneof![
            Just(SupportCondition::SimplySupported),
            Just(SupportCondition::Cantilever),
            Just(SupportCondition::FixedFixed),
            Just(SupportCondition::FixedPinned),
            (1u32..6).prop_map(|segments| SupportCondition::MultiSpan { segments }),
        ]
    }

    fn solve(support: SupportCondition, length: f64, load: SingleLoad) -> ResultSet {
        let model = BeamConfig::new(length, support, 200.0, 50_000.0).model().unwrap();
        let grid = StationGrid::new(length, 50).unwrap();
        solve_single(&model, &load, &grid).unwrap()
    }

    proptest! {
        #[test]
        fn point_load_reactions_balance(
            support in support_strategy(),
            length in 1.0_f64..50.0,
            p in 0.0_f64..500.0,
            position in 0.0_f64..=1.0,
        ) {
            let r = solve(support, length, SingleLoad::point(p, position));
            prop_assert!((r.total_reaction_kn() - p).abs() <= 1e-8 * p.max(1.0));
        }

        #[test]
        fn distributed_load_reactions_balance(
            support in support_strategy(),
            length in 1.0_f64..50.0,
            w in 0.0_f64..50.0,
            width in 0.01_f64..60.0,
            position in 0.0_f64..=1.0,
        ) {
            let load = SingleLoad::distributed(w, width, position);
            let total = load.total_load_kn(length);
            let r = solve(support, length, load);
            prop_assert!((r.total_reaction_kn() - total).abs() <= 1e-8 * total.max(1.0));
        }

        #[test]
        fn response_scales_with_load(
            support in support_strategy(),
            p in 1.0_f64..200.0,
            k in 0.1_f64..10.0,
            position in 0.0_f64..=1.0,
        ) {
            let base = solve(support, 10.0, SingleLoad::point(p, position));
            let scaled = solve(support, 10.0, SingleLoad::point(k * p, position));
            for (a, b) in scaled.bending_moment.iter().zip(&base.bending_moment) {
                prop_assert!((a - k * b).abs() <= 1e-9 * (k * b).abs().max(1.0));
            }
            for (a, b) in scaled.deflection.iter().zip(&base.deflection) {
                prop_assert!((a - k * b).abs() <= 1e-9 * (k * b).abs().max(1.0));
            }
        }
    }
}
