//! Sweep Controller
//!
//! Maps elapsed time onto load position and re-solves once per tick. The
//! controller owns no analysis logic: each tick computes
//! `progress = elapsed / duration` clamped to [0, 1], moves the load template
//! to `position = progress` and publishes the new [`SweepFrame`].
//!
//! Stepping is cooperative. The caller decides when to tick (a UI timer, a
//! fixed-step loop or [`SweepController::run_stepped`] in a batch tool).
//! Cancellation is immediate: once [`SweepController::cancel`] or a
//! [`CancelHandle`] fires, no further frame is published, including one whose
//! solve was already in progress.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use beam_core::beam::BeamConfig;
//! use beam_core::calculations::sweep::{SweepController, SweepState};
//! use beam_core::loads::LoadCase;
//!
//! let mut sweep = SweepController::new(
//!     &BeamConfig::default(),
//!     LoadCase::point(100.0, 0.0),
//!     Duration::from_secs(2),
//! ).unwrap();
//!
//! let frame = sweep.tick(Duration::from_secs(1)).unwrap().unwrap();
//! assert_eq!(frame.position, 0.5);
//!
//! sweep.cancel();
//! assert!(sweep.tick(Duration::from_millis(1500)).unwrap().is_none());
//! assert_eq!(sweep.state(), SweepState::Cancelled);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{solve_load, SolveOptions};
use crate::beam::{BeamConfig, BeamModel};
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadCase;
use crate::results::{ResultSet, StationGrid};

/// Shared cancellation flag for a running sweep.
///
/// Clones refer to the same flag and may be moved to other threads.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepState {
    Running,
    Finished,
    Cancelled,
}

/// One published step of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFrame {
    /// Fraction of the sweep completed, in [0, 1]
    pub progress: f64,
    /// Normalized load position solved for this frame
    pub position: f64,
    /// Response with the load at `position`
    pub result: ResultSet,
}

/// Time-driven stepping of a load template across the beam
#[derive(Debug)]
pub struct SweepController {
    model: BeamModel,
    template: LoadCase,
    grid: StationGrid,
    duration: Duration,
    cancel: CancelHandle,
    finished: bool,
    last_frame: Option<SweepFrame>,
}

impl SweepController {
    /// Create a sweep over `duration` with default solve options
    pub fn new(beam: &BeamConfig, template: LoadCase, duration: Duration) -> CalcResult<Self> {
        Self::with_options(beam, template, duration, &SolveOptions::default())
    }

    /// Create a sweep with explicit solve options
    pub fn with_options(
        beam: &BeamConfig,
        template: LoadCase,
        duration: Duration,
        options: &SolveOptions,
    ) -> CalcResult<Self> {
        if duration.is_zero() {
            return Err(CalcError::invalid_configuration(
                "duration",
                format!("{duration:?}"),
                "Sweep duration must be greater than zero",
            ));
        }
        let model = beam.model()?;
        template.validate(model.length_m)?;
        let grid = StationGrid::new(model.length_m, options.divisions)?;

        info!(
            support = %model.support,
            load = template.display_name(),
            duration_s = duration.as_secs_f64(),
            "sweep started"
        );

        Ok(Self {
            model,
            template,
            grid,
            duration,
            cancel: CancelHandle::default(),
            finished: false,
            last_frame: None,
        })
    }

    /// A handle that cancels this sweep from anywhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Cancel the sweep; no further frames are published
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Current lifecycle state
    pub fn state(&self) -> SweepState {
        if self.finished {
            SweepState::Finished
        } else if self.cancel.is_cancelled() {
            SweepState::Cancelled
        } else {
            SweepState::Running
        }
    }

    /// The most recently published frame
    pub fn last_frame(&self) -> Option<&SweepFrame> {
        self.last_frame.as_ref()
    }

    /// Configured sweep duration
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Progress corresponding to `elapsed`, clamped to [0, 1]
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Advance to `elapsed` and publish a frame.
    ///
    /// Returns `None` once the sweep is finished or cancelled.
    pub fn tick(&mut self, elapsed: Duration) -> CalcResult<Option<&SweepFrame>> {
        let progress = self.progress_at(elapsed);
        self.advance_to(progress)
    }

    /// Advance directly to `progress` (clamped to [0, 1]) and publish a frame.
    pub fn advance_to(&mut self, progress: f64) -> CalcResult<Option<&SweepFrame>> {
        if self.state() != SweepState::Running {
            return Ok(None);
        }

        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        let result = solve_load(&self.model, &self.template.with_position(progress), &self.grid)?;

        // A cancel that landed during the solve still wins
        if self.cancel.is_cancelled() {
            debug!(progress, "frame discarded after cancel");
            return Ok(None);
        }

        debug!(progress, "sweep tick");
        self.last_frame = Some(SweepFrame {
            progress,
            position: progress,
            result,
        });
        if progress >= 1.0 {
            self.finished = true;
            info!("sweep finished");
        }
        Ok(self.last_frame.as_ref())
    }

    /// Drive the sweep at a fixed step of `1 / frames`, calling `on_frame` for
    /// every published frame. Stops early on cancellation.
    pub fn run_stepped<F>(&mut self, frames: usize, mut on_frame: F) -> CalcResult<SweepState>
    where
        F: FnMut(&SweepFrame),
    {
        if frames == 0 {
            return Err(CalcError::invalid_configuration(
                "frames",
                "0",
                "Stepped sweep needs at least one frame",
            ));
        }

        for i in 0..=frames {
            match self.advance_to(i as f64 / frames as f64)? {
                Some(frame) => on_frame(frame),
                None => break,
            }
        }

        let state = self.state();
        if state == SweepState::Cancelled {
            info!(
                last_progress = self.last_frame.as_ref().map(|f| f.progress),
                "sweep cancelled"
            );
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn controller() -> SweepController {
        SweepController::new(
            &BeamConfig::default(),
            LoadCase::point(100.0, 0.0),
            Duration::from_secs(10),
        )
        .unwrap()
    }

    #[test]
    fn test_progress_clamped() {
        let sweep = controller();
        assert_eq!(sweep.progress_at(Duration::ZERO), 0.0);
        assert_eq!(sweep.progress_at(Duration::from_secs(5)), 0.5);
        assert_eq!(sweep.progress_at(Duration::from_secs(60)), 1.0);
    }

    #[test]
    fn test_tick_moves_load() {
        let mut sweep = controller();
        let frame = sweep.tick(Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(frame.position, 0.5);
        assert!((frame.result.bending_moment[50] - 250.0).abs() < 1e-9);
        assert_eq!(sweep.state(), SweepState::Running);
    }

    #[test]
    fn test_finishes_at_full_progress() {
        let mut sweep = controller();
        assert!(sweep.tick(Duration::from_secs(12)).unwrap().is_some());
        assert_eq!(sweep.state(), SweepState::Finished);
        assert!(sweep.tick(Duration::from_secs(13)).unwrap().is_none());
        assert_eq!(sweep.last_frame().unwrap().progress, 1.0);
    }

    #[test]
    fn test_cancel_stops_publishing() {
        let mut sweep = controller();
        sweep.tick(Duration::from_secs(3)).unwrap();
        sweep.cancel();
        assert!(sweep.tick(Duration::from_secs(4)).unwrap().is_none());
        assert_eq!(sweep.state(), SweepState::Cancelled);
        assert_eq!(sweep.last_frame().unwrap().progress, 0.3);
    }

    #[test]
    fn test_run_stepped_cancel_from_callback() {
        let mut sweep = controller();
        let handle = sweep.cancel_handle();
        let mut seen = Vec::new();

        let state = sweep
            .run_stepped(10, |frame| {
                seen.push(frame.progress);
                if frame.progress >= 0.3 {
                    handle.cancel();
                }
            })
            .unwrap();

        assert_eq!(state, SweepState::Cancelled);
        assert_eq!(seen.len(), 4);
        assert!(sweep.last_frame().unwrap().progress <= 0.3);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let mut sweep = controller();
        let handle = sweep.cancel_handle();
        sweep.tick(Duration::from_secs(1)).unwrap();

        thread::spawn(move || handle.cancel()).join().unwrap();

        assert!(sweep.tick(Duration::from_secs(2)).unwrap().is_none());
        assert_eq!(sweep.state(), SweepState::Cancelled);
        assert_eq!(sweep.last_frame().unwrap().progress, 0.1);
    }

    #[test]
    fn test_run_stepped_completes() {
        let mut sweep = controller();
        let mut count = 0;
        let state = sweep.run_stepped(20, |_| count += 1).unwrap();
        assert_eq!(state, SweepState::Finished);
        assert_eq!(count, 21);
    }

    #[test]
    fn test_rejects_zero_duration_and_bad_template() {
        let err = SweepController::new(&BeamConfig::default(), LoadCase::default(), Duration::ZERO)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");

        let err = SweepController::new(
            &BeamConfig::default(),
            LoadCase::point(-1.0, 0.0),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
    }
}
