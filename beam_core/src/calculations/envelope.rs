//! Envelope Calculator
//!
//! Sweeps a load template across the beam at `steps + 1` uniform positions
//! `i / steps` and keeps, per station, the largest |M| and |V| seen. Cost is
//! O(steps × stations × axles).
//!
//! Because every position sampled with `steps = n` is also sampled with
//! `steps = k·n`, a finer sweep can only raise or hold each envelope value.

use tracing::info;

use super::solve_load;
use crate::beam::BeamModel;
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadCase;
use crate::results::{push_notice, Envelope, StationGrid};

/// Default number of sweep increments
pub const DEFAULT_ENVELOPE_STEPS: usize = 50;

/// Compute the moment and shear envelope of `template` swept over the beam.
///
/// The template's own position is ignored.
pub fn compute_envelope(
    model: &BeamModel,
    template: &LoadCase,
    steps: usize,
    grid: &StationGrid,
) -> CalcResult<Envelope> {
    if steps == 0 {
        return Err(CalcError::invalid_configuration(
            "steps",
            "0",
            "Envelope sweep needs at least one step",
        ));
    }

    info!(
        support = %model.support,
        load = template.display_name(),
        steps,
        "envelope sweep started"
    );

    let mut envelope = Envelope {
        stations: grid.positions(),
        max_bending_moment: vec![0.0; grid.len()],
        max_shear_force: vec![0.0; grid.len()],
        steps,
        notices: Vec::new(),
    };

    for i in 0..=steps {
        let position = i as f64 / steps as f64;
        let result = solve_load(model, &template.with_position(position), grid)?;

        for (max, m) in envelope.max_bending_moment.iter_mut().zip(&result.bending_moment) {
            *max = max.max(m.abs());
        }
        for (max, v) in envelope.max_shear_force.iter_mut().zip(&result.shear_force) {
            *max = max.max(v.abs());
        }
        for notice in result.notices {
            push_notice(&mut envelope.notices, notice);
        }
    }

    let (x, peak) = envelope.peak_moment();
    info!(peak_moment_knm = peak, at_m = x, "envelope sweep finished");

    Ok(envelope)
}
