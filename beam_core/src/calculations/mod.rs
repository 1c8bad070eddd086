//! # Structural Calculations
//!
//! Every entry point is a pure function: it validates the beam and load,
//! derives a [`BeamModel`] once, and returns a JSON-serializable result or a
//! structured [`CalcError`](crate::errors::CalcError). Nothing is cached between
//! calls, so independent requests may run in parallel freely.
//!
//! ## Available Calculations
//!
//! - [`solve`] - moment, shear, deflection and reactions for a load case
//! - [`influence_line`] - moment at a fixed point as a unit load crosses the beam
//! - [`envelope`] - maximum |M| and |V| per station over a load sweep
//! - [`sweep::SweepController`] - time-driven, cancellable stepping of a load
//!
//! ## Components
//!
//! - [`single_load`] - one point or distributed load, dispatched on support type
//! - [`superposition`] - fold of single-load responses (train axles)
//! - [`influence_line`](mod@influence_line) - Müller-Breslau lines
//! - [`envelope`](mod@envelope) - sweep and running maxima
//! - [`sweep`] - sweep scheduling and cancellation
//!
//! ## Example
//!
//! ```rust
//! use beam_core::beam::BeamConfig;
//! use beam_core::calculations::solve;
//! use beam_core::loads::LoadCase;
//!
//! let beam = BeamConfig::simply_supported(10.0, 200.0, 100_000.0);
//! let result = solve(&beam, &LoadCase::point(100.0, 0.5)).unwrap();
//!
//! let (x, m_max) = result.max_abs_moment();
//! assert!((x - 5.0).abs() < 1e-9);
//! assert!((m_max - 250.0).abs() < 1e-9);
//! ```

pub mod envelope;
pub mod influence_line;
pub mod single_load;
pub mod superposition;
pub mod sweep;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::beam::{BeamConfig, BeamModel};
use crate::errors::CalcResult;
use crate::loads::{LoadCase, SingleLoad};
use crate::results::{ApproximationNotice, Envelope, InfluenceLine, ResultSet, StationGrid, DEFAULT_DIVISIONS};

pub use envelope::DEFAULT_ENVELOPE_STEPS;
pub use single_load::solve_single;
pub use superposition::{solve_train, superpose};
pub use sweep::{CancelHandle, SweepController, SweepFrame, SweepState};

/// Sampling options shared by all entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Number of intervals along the beam; results have `divisions + 1` stations
    pub divisions: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            divisions: DEFAULT_DIVISIONS,
        }
    }
}

impl SolveOptions {
    /// The station grid these options produce on a beam
    pub fn grid(&self, model: &BeamModel) -> CalcResult<StationGrid> {
        StationGrid::new(model.length_m, self.divisions)
    }
}

/// Solve any load case on an already validated model.
///
/// Point and distributed loads go to the single-load solver; trains are
/// superposed axle by axle.
pub fn solve_load(model: &BeamModel, load: &LoadCase, grid: &StationGrid) -> CalcResult<ResultSet> {
    match load {
        LoadCase::Point(p) => solve_single(model, &SingleLoad::Point(*p), grid),
        LoadCase::Distributed(d) => solve_single(model, &SingleLoad::Distributed(*d), grid),
        LoadCase::Train(train) => solve_train(model, train, grid),
    }
}

/// Solve a load case with default options (101 stations)
pub fn solve(beam: &BeamConfig, load: &LoadCase) -> CalcResult<ResultSet> {
    solve_with(beam, load, &SolveOptions::default())
}

/// Solve a load case
pub fn solve_with(beam: &BeamConfig, load: &LoadCase, options: &SolveOptions) -> CalcResult<ResultSet> {
    let model = beam.model()?;
    load.validate(model.length_m)?;
    let grid = options.grid(&model)?;

    let result = solve_load(&model, load, &grid)?;
    warn_notices(&result.notices);
    Ok(result)
}

/// Moment influence line at `observation_position` with default options
pub fn influence_line(beam: &BeamConfig, observation_position: f64) -> CalcResult<InfluenceLine> {
    influence_line_with(beam, observation_position, &SolveOptions::default())
}

/// Moment influence line at `observation_position`
pub fn influence_line_with(
    beam: &BeamConfig,
    observation_position: f64,
    options: &SolveOptions,
) -> CalcResult<InfluenceLine> {
    let model = beam.model()?;
    let grid = options.grid(&model)?;

    let line = influence_line::solve_influence_line(&model, observation_position, &grid)?;
    warn_notices(line.notice.as_slice());
    Ok(line)
}

/// Envelope of `load` swept over `steps + 1` positions with default options
pub fn envelope(beam: &BeamConfig, load: &LoadCase, steps: usize) -> CalcResult<Envelope> {
    envelope_with(beam, load, steps, &SolveOptions::default())
}

/// Envelope of `load` swept over `steps + 1` positions
pub fn envelope_with(
    beam: &BeamConfig,
    load: &LoadCase,
    steps: usize,
    options: &SolveOptions,
) -> CalcResult<Envelope> {
    let model = beam.model()?;
    load.validate(model.length_m)?;
    let grid = options.grid(&model)?;

    let env = envelope::compute_envelope(&model, load, steps, &grid)?;
    warn_notices(&env.notices);
    Ok(env)
}

pub(crate) fn warn_notices(notices: &[ApproximationNotice]) {
    for notice in notices {
        warn!(%notice, "approximate result");
    }
}
