//! # beam_core - Moving-Load Beam Analysis Engine
//!
//! `beam_core` computes bending moment, shear force, deflection and support
//! reactions along a single-span or multi-span beam under point, distributed
//! and multi-axle train loads. It also produces moment influence lines, moving
//! load envelopes and a cancellable time-driven sweep of a load across the span.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from (beam, load) to results
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Honest Approximations**: every approximate branch attaches an
//!   [`ApproximationNotice`] to its result
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{solve, BeamConfig, LoadCase};
//!
//! let beam = BeamConfig::simply_supported(10.0, 200.0, 100_000.0);
//! let result = solve(&beam, &LoadCase::point(100.0, 0.5)).unwrap();
//!
//! assert!((result.reactions[0].force_kn - 50.0).abs() < 1e-9);
//! assert!((result.bending_moment[50] - 250.0).abs() < 1e-9);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("bending_moment"));
//! ```
//!
//! ## Modules
//!
//! - [`beam`] - Beam geometry, supports and stiffness
//! - [`loads`] - Point, distributed and train loads
//! - [`calculations`] - Solvers, influence lines, envelopes and sweeps
//! - [`equations`] - Closed-form beam formulas by support condition
//! - [`results`] - Station grid and result containers
//! - [`request`] - Analysis requests and reports
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Request/report files with atomic saves

pub mod beam;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod request;
pub mod results;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use beam::{BeamConfig, BeamModel, SupportCondition};
pub use calculations::{
    envelope, influence_line, solve, solve_with, CancelHandle, SolveOptions, SweepController,
    SweepFrame, SweepState,
};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_request, save_report};
pub use loads::{Axle, DistributedLoad, LoadCase, PointLoad, SingleLoad, TrainLoad};
pub use request::{AnalysisOptions, AnalysisReport, AnalysisRequest, SCHEMA_VERSION};
pub use results::{ApproximationNotice, Envelope, InfluenceLine, ResultSet, StationGrid, SupportReaction};
