//! End-to-end checks of the public API against hand-calculated beam cases.

use std::time::Duration;

use approx::{assert_abs_diff_eq, assert_relative_eq};

use beam_core::calculations::{envelope, influence_line, solve, solve_with};
use beam_core::{
    ApproximationNotice, AnalysisRequest, Axle, BeamConfig, LoadCase, SolveOptions,
    SupportCondition, SweepController, SweepState,
};

fn reference_beam() -> BeamConfig {
    BeamConfig::simply_supported(10.0, 200.0, 100_000.0)
}

#[test]
fn simply_supported_midspan_point_load() {
    let result = solve(&reference_beam(), &LoadCase::point(100.0, 0.5)).unwrap();

    assert_relative_eq!(result.reactions[0].force_kn, 50.0, epsilon = 1e-9);
    assert_relative_eq!(result.reactions[1].force_kn, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.bending_moment[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.bending_moment[100], 0.0, epsilon = 1e-12);

    let (x, m) = result.max_abs_moment();
    assert_relative_eq!(x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(m, 250.0, epsilon = 1e-9);

    // EI = 2e8 N·m² → δ = PL³/(48EI) = 10.4167 mm
    assert_relative_eq!(result.deflection[50], 10.416_666_666_666_666, max_relative = 1e-9);
    assert!(result.notices.is_empty());
}

#[test]
fn full_span_udl_deflection_is_exact() {
    let beam = reference_beam();
    let result = solve(&beam, &LoadCase::distributed(20.0, 10.0, 0.5)).unwrap();

    // 5wL⁴/(384EI) with EI = 2e5 kN·m², in mm
    let expected_mm = 5.0 * 20.0 * 10_000.0 / (384.0 * 2.0e5) * 1000.0;
    assert_relative_eq!(result.deflection[50], expected_mm, max_relative = 1e-9);
    assert_relative_eq!(result.bending_moment[50], 250.0, max_relative = 1e-12);
    assert!(result.notices.is_empty());
}

#[test]
fn statics_closure_for_every_support() {
    let supports = [
        SupportCondition::SimplySupported,
        SupportCondition::Cantilever,
        SupportCondition::FixedFixed,
        SupportCondition::FixedPinned,
        SupportCondition::MultiSpan { segments: 4 },
    ];
    let loads = [
        LoadCase::point(75.0, 0.0),
        LoadCase::point(75.0, 0.37),
        LoadCase::point(75.0, 1.0),
        LoadCase::distributed(12.0, 3.0, 0.2),
        LoadCase::distributed(12.0, 10.0, 0.5),
    ];

    for support in supports {
        let beam = BeamConfig::new(10.0, support, 200.0, 100_000.0);
        for load in &loads {
            let result = solve(&beam, load).unwrap();
            assert_relative_eq!(
                result.total_reaction_kn(),
                load.total_load_kn(beam.length_m),
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn boundary_conditions_hold() {
    let load = LoadCase::point(40.0, 0.35);

    let ss = solve(&reference_beam(), &load).unwrap();
    assert_abs_diff_eq!(ss.bending_moment[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ss.bending_moment[100], 0.0, epsilon = 1e-9);

    let fp = solve(&BeamConfig::fixed_pinned(10.0, 200.0, 100_000.0), &load).unwrap();
    assert_eq!(fp.bending_moment[100], 0.0);

    let cantilever = solve(&BeamConfig::cantilever(10.0, 200.0, 100_000.0), &load).unwrap();
    for i in 36..=100 {
        assert_eq!(cantilever.bending_moment[i], 0.0);
        assert_eq!(cantilever.shear_force[i], 0.0);
    }

    let ff = solve(&BeamConfig::fixed_fixed(10.0, 200.0, 100_000.0), &load).unwrap();
    assert_abs_diff_eq!(ff.deflection[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ff.deflection[100], 0.0, epsilon = 1e-12);
}

#[test]
fn train_is_sum_of_its_axles() {
    let beam = BeamConfig::fixed_pinned(15.0, 30.0, 2_000_000.0);
    let train = LoadCase::train(vec![Axle::new(110.0, 0.0), Axle::new(90.0, 3.0)], 0.4);

    let combined = solve(&beam, &train).unwrap();
    let first = solve(&beam, &LoadCase::point(110.0, 0.4)).unwrap();
    let second = solve(&beam, &LoadCase::point(90.0, 9.0 / 15.0)).unwrap();

    for i in 0..combined.len() {
        assert_relative_eq!(
            combined.bending_moment[i],
            first.bending_moment[i] + second.bending_moment[i],
            epsilon = 1e-9,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            combined.deflection[i],
            first.deflection[i] + second.deflection[i],
            epsilon = 1e-9,
            max_relative = 1e-9
        );
    }
}

#[test]
fn influence_line_shape() {
    let line = influence_line(&reference_beam(), 0.4).unwrap();

    assert_eq!(line.ordinates.len(), 101);
    assert_abs_diff_eq!(line.ordinates[0], 0.0);
    assert_abs_diff_eq!(line.ordinates[100], 0.0);
    assert_relative_eq!(line.ordinates[40], 2.4, max_relative = 1e-9);

    // Piecewise linear: constant slope on each side of c
    let slope_left = line.ordinates[10] - line.ordinates[9];
    let slope_right = line.ordinates[80] - line.ordinates[79];
    for i in 1..40 {
        assert_relative_eq!(line.ordinates[i] - line.ordinates[i - 1], slope_left, max_relative = 1e-6);
    }
    for i in 41..=100 {
        assert_relative_eq!(line.ordinates[i] - line.ordinates[i - 1], slope_right, max_relative = 1e-6);
    }
}

#[test]
fn envelope_monotonic_in_steps() {
    let beam = BeamConfig::fixed_fixed(20.0, 200.0, 300_000.0);
    let load = LoadCase::train(vec![Axle::new(120.0, 0.0), Axle::new(120.0, 1.2)], 0.0);

    let coarse = envelope(&beam, &load, 10).unwrap();
    let fine = envelope(&beam, &load, 100).unwrap();

    for i in 0..coarse.stations.len() {
        assert!(fine.max_bending_moment[i] >= coarse.max_bending_moment[i], "M at {}", i);
        assert!(fine.max_shear_force[i] >= coarse.max_shear_force[i], "V at {}", i);
    }
}

#[test]
fn multi_span_results_are_flagged() {
    let beam = BeamConfig::multi_span(30.0, 3, 200.0, 100_000.0);
    let result = solve(&beam, &LoadCase::point(50.0, 0.5)).unwrap();
    assert!(result.is_approximate());
    assert!(result
        .notices
        .contains(&ApproximationNotice::IsolatedSpan { segments: 3 }));

    let line = influence_line(&beam, 0.5).unwrap();
    assert!(line.notice.is_some());
}

#[test]
fn sweep_cancelled_at_thirty_percent() {
    let mut sweep = SweepController::new(
        &reference_beam(),
        LoadCase::point(100.0, 0.0),
        Duration::from_secs(10),
    )
    .unwrap();
    let handle = sweep.cancel_handle();

    let mut published = Vec::new();
    for tenth in 0..=10 {
        let elapsed = Duration::from_secs(tenth);
        if let Some(frame) = sweep.tick(elapsed).unwrap() {
            published.push(frame.progress);
        }
        if tenth == 3 {
            handle.cancel();
        }
    }

    assert_eq!(sweep.state(), SweepState::Cancelled);
    assert_eq!(published.len(), 4);
    let last = sweep.last_frame().unwrap();
    assert!(last.progress <= 0.3);
    assert_relative_eq!(last.position, 0.3);
}

#[test]
fn request_runs_end_to_end() {
    let json = r#"{
        "version": "0.1.0",
        "beam": {
            "length_m": 10.0,
            "support": { "type": "simply_supported" },
            "elastic_modulus_gpa": 200.0,
            "moment_of_inertia_cm4": 100000.0
        },
        "load": { "type": "train", "axles": [
            { "magnitude_kn": 50.0, "offset_m": 0.0 },
            { "magnitude_kn": 50.0, "offset_m": 2.0 }
        ], "position": 0.4 },
        "options": { "divisions": 50, "include_envelope": true, "envelope_steps": 20, "observation_position": 0.5 }
    }"#;
    let request: AnalysisRequest = serde_json::from_str(json).unwrap();
    let report = request.run().unwrap();

    assert_eq!(report.results.len(), 51);
    assert_relative_eq!(report.results.total_reaction_kn(), 100.0, max_relative = 1e-12);
    assert!(report.results.envelope.is_some());
    assert_eq!(report.results.influence_line.as_ref().map(Vec::len), Some(51));

    let options = SolveOptions { divisions: 50 };
    let direct = solve_with(&request.beam, &request.load, &options).unwrap();
    assert_eq!(direct.bending_moment, report.results.bending_moment);
}
