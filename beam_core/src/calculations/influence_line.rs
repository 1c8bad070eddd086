//! Influence Line Solver
//!
//! Bending moment at a fixed observation point `c = observation × L` as a unit
//! load travels from x = 0 to x = L.
//!
//! Simply-supported and cantilever lines are exact. The indeterminate cases
//! are scaled from the simply-supported line and always carry an
//! [`ApproximationNotice::ApproximateInfluenceLine`]:
//!
//! - FixedFixed: 0.5 × simply-supported line
//! - FixedPinned: mean of the simply-supported and fixed-fixed lines (0.75 ×)
//! - MultiSpan: simply-supported line of the isolated span containing c, zero
//!   on every other span

use tracing::debug;

use crate::beam::{BeamModel, SupportCondition};
use crate::equations::{cantilever, simple};
use crate::errors::{CalcError, CalcResult};
use crate::results::{ApproximationNotice, InfluenceLine, StationGrid};

const FIXED_FIXED_SCALE: f64 = 0.5;

/// Compute the moment influence line for `observation_position` in [0, 1].
pub fn solve_influence_line(
    model: &BeamModel,
    observation_position: f64,
    grid: &StationGrid,
) -> CalcResult<InfluenceLine> {
    if !observation_position.is_finite() || !(0.0..=1.0).contains(&observation_position) {
        return Err(CalcError::invalid_configuration(
            "observation_position",
            observation_position.to_string(),
            "Observation position must lie in [0, 1]",
        ));
    }

    let l = model.length_m;
    let c = observation_position * l;
    let stations = grid.positions();

    let (ordinates, notice): (Vec<f64>, Option<ApproximationNotice>) = match model.support {
        SupportCondition::SimplySupported => (
            stations
                .iter()
                .map(|&x| simple::moment_influence_ordinate(c, l, x))
                .collect(),
            None,
        ),
        SupportCondition::Cantilever => (
            stations
                .iter()
                .map(|&x| cantilever::moment_influence_ordinate(c, x))
                .collect(),
            None,
        ),
        SupportCondition::FixedFixed => (
            stations
                .iter()
                .map(|&x| FIXED_FIXED_SCALE * simple::moment_influence_ordinate(c, l, x))
                .collect(),
            Some(ApproximationNotice::ApproximateInfluenceLine {
                support: model.support,
            }),
        ),
        SupportCondition::FixedPinned => (
            stations
                .iter()
                .map(|&x| {
                    let ss = simple::moment_influence_ordinate(c, l, x);
                    (ss + FIXED_FIXED_SCALE * ss) / 2.0
                })
                .collect(),
            Some(ApproximationNotice::ApproximateInfluenceLine {
                support: model.support,
            }),
        ),
        SupportCondition::MultiSpan { .. } => {
            let (start, end) = model.span_bounds(model.span_index(c));
            let span = end - start;
            (
                stations
                    .iter()
                    .map(|&x| {
                        if (start..=end).contains(&x) {
                            simple::moment_influence_ordinate(c - start, span, x - start)
                        } else {
                            0.0
                        }
                    })
                    .collect(),
                Some(ApproximationNotice::ApproximateInfluenceLine {
                    support: model.support,
                }),
            )
        }
    };

    debug!(support = %model.support, observation_m = c, "influence line computed");

    Ok(InfluenceLine {
        observation_m: c,
        stations,
        ordinates,
        notice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::BeamConfig;

    fn line(beam: BeamConfig, observation: f64) -> InfluenceLine {
        let model = beam.model().unwrap();
        let grid = StationGrid::new(model.length_m, 100).unwrap();
        solve_influence_line(&model, observation, &grid).unwrap()
    }

    #[test]
    fn test_simply_supported_shape() {
        let il = line(BeamConfig::default(), 0.3);
        assert!(il.notice.is_none());
        assert_eq!(il.ordinates[0], 0.0);
        assert_eq!(il.ordinates[100], 0.0);
        // c(L-c)/L = 3·7/10
        assert!((il.ordinates[30] - 2.1).abs() < 1e-9);
        let (x, peak) = il.peak();
        assert!((x - 3.0).abs() < 1e-9);
        assert!((peak - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_cantilever_outboard_only() {
        let il = line(BeamConfig::cantilever(10.0, 200.0, 100_000.0), 0.4);
        assert!(il.notice.is_none());
        for i in 0..=40 {
            assert_eq!(il.ordinates[i], 0.0);
        }
        assert!((il.ordinates[100] + 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_indeterminate_lines_flagged() {
        let ss = line(BeamConfig::default(), 0.5);
        let ff = line(BeamConfig::fixed_fixed(10.0, 200.0, 100_000.0), 0.5);
        let fp = line(BeamConfig::fixed_pinned(10.0, 200.0, 100_000.0), 0.5);

        assert!(matches!(
            ff.notice,
            Some(ApproximationNotice::ApproximateInfluenceLine { support: SupportCondition::FixedFixed })
        ));
        assert!(fp.notice.is_some());
        assert!((ff.ordinates[50] - 0.5 * ss.ordinates[50]).abs() < 1e-12);
        assert!((fp.ordinates[50] - 0.75 * ss.ordinates[50]).abs() < 1e-12);
    }

    #[test]
    fn test_multi_span_confined_to_observed_span() {
        // Two 5 m spans, observation at 7.5 m (middle of span 1)
        let il = line(BeamConfig::multi_span(10.0, 2, 200.0, 100_000.0), 0.75);
        assert!(il.notice.is_some());
        for i in 0..50 {
            assert_eq!(il.ordinates[i], 0.0, "station {}", i);
        }
        // Isolated 5 m span, c = 2.5: peak 1.25
        assert!((il.ordinates[75] - 1.25).abs() < 1e-9);
        assert!(il.ordinates[100].abs() < 1e-12);
    }

    #[test]
    fn test_rejects_observation_outside_beam() {
        let model = BeamConfig::default().model().unwrap();
        let grid = StationGrid::new(model.length_m, 100).unwrap();
        let err = solve_influence_line(&model, 1.2, &grid).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
        assert!(solve_influence_line(&model, f64::NAN, &grid).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::beam::BeamConfig;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn simply_supported_line_bounded_by_peak(
            length in 0.5_f64..80.0,
            observation in 0.0_f64..=1.0,
        ) {
            let model = BeamConfig::simply_supported(length, 200.0, 10_000.0).model().unwrap();
            let grid = StationGrid::new(length, 64).unwrap();
            let il = solve_influence_line(&model, observation, &grid).unwrap();

            let c = observation * length;
            let peak = c * (length - c) / length;
            prop_assert!(il.ordinates[0].abs() <= 1e-12);
            prop_assert!(il.ordinates[64].abs() <= 1e-12);
            for &eta in &il.ordinates {
                prop_assert!(eta >= -1e-12);
                prop_assert!(eta <= peak + 1e-9 * length);
            }
        }
    }
}
