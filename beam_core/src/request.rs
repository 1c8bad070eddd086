//! # Analysis Requests and Reports
//!
//! An [`AnalysisRequest`] bundles everything one analysis needs (beam, load
//! and sampling options) into a single JSON document. Running it produces an
//! [`AnalysisReport`]: the request echoed back with a schema version, a
//! timestamp and the [`ResultSet`].
//!
//! ## Structure
//!
//! ```text
//! AnalysisRequest
//! ├── version: "0.1.0"
//! ├── beam: BeamConfig
//! ├── load: LoadCase (point | distributed | train)
//! └── options: AnalysisOptions
//!     ├── divisions (100)
//!     ├── envelope_steps (50)
//!     ├── observation_position (optional)
//!     └── include_envelope (false)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::beam::BeamConfig;
//! use beam_core::loads::LoadCase;
//! use beam_core::request::AnalysisRequest;
//!
//! let mut request = AnalysisRequest::new(BeamConfig::default(), LoadCase::point(100.0, 0.5));
//! request.options.include_envelope = true;
//!
//! let report = request.run().unwrap();
//! assert!(report.results.envelope.is_some());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::beam::BeamConfig;
use crate::calculations::envelope::{compute_envelope, DEFAULT_ENVELOPE_STEPS};
use crate::calculations::influence_line::solve_influence_line;
use crate::calculations::{solve_load, warn_notices, SolveOptions};
use crate::errors::CalcResult;
use crate::loads::LoadCase;
use crate::results::{push_notice, ResultSet, DEFAULT_DIVISIONS};

/// Current schema version for request and report files
pub const SCHEMA_VERSION: &str = "0.1.0";

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_divisions() -> usize {
    DEFAULT_DIVISIONS
}

fn default_envelope_steps() -> usize {
    DEFAULT_ENVELOPE_STEPS
}

/// What to compute beyond the basic response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Number of intervals along the beam
    #[serde(default = "default_divisions")]
    pub divisions: usize,

    /// Sweep increments used when the envelope is requested
    #[serde(default = "default_envelope_steps")]
    pub envelope_steps: usize,

    /// Normalized observation point for a moment influence line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_position: Option<f64>,

    /// Sweep the load across the beam and attach the envelope
    #[serde(default)]
    pub include_envelope: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            divisions: DEFAULT_DIVISIONS,
            envelope_steps: DEFAULT_ENVELOPE_STEPS,
            observation_position: None,
            include_envelope: false,
        }
    }
}

impl AnalysisOptions {
    /// Sampling options for the solvers
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            divisions: self.divisions,
        }
    }
}

/// One analysis: a beam, the load on it and what to compute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Schema version of the document
    #[serde(default = "default_version")]
    pub version: String,

    /// Structure under analysis
    pub beam: BeamConfig,

    /// Load case (its position is used as-is; the envelope sweeps it)
    pub load: LoadCase,

    /// Computation options
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    /// Create a request at the current schema version with default options
    pub fn new(beam: BeamConfig, load: LoadCase) -> Self {
        AnalysisRequest {
            version: SCHEMA_VERSION.to_string(),
            beam,
            load,
            options: AnalysisOptions::default(),
        }
    }

    /// Run every computation the request asks for.
    ///
    /// The beam is validated and its model derived once; the base solve, the
    /// influence line and the envelope all share it and the same station grid.
    pub fn run(&self) -> CalcResult<AnalysisReport> {
        let model = self.beam.model()?;
        self.load.validate(model.length_m)?;
        let grid = self.options.solve_options().grid(&model)?;

        let mut results = solve_load(&model, &self.load, &grid)?;

        if let Some(observation) = self.options.observation_position {
            let line = solve_influence_line(&model, observation, &grid)?;
            if let Some(notice) = line.notice {
                push_notice(&mut results.notices, notice);
            }
            results.influence_line = Some(line.ordinates);
        }

        if self.options.include_envelope {
            let envelope = compute_envelope(&model, &self.load, self.options.envelope_steps, &grid)?;
            for notice in &envelope.notices {
                push_notice(&mut results.notices, *notice);
            }
            results.envelope = Some(envelope);
        }

        warn_notices(&results.notices);

        Ok(AnalysisReport {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            request: self.clone(),
            results,
        })
    }
}

/// Output of [`AnalysisRequest::run`], consumed by renderers and exporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version of the document
    pub version: String,
    /// When the analysis ran
    pub generated_at: DateTime<Utc>,
    /// The request that produced these results
    pub request: AnalysisRequest,
    /// Computed response
    pub results: ResultSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ApproximationNotice;

    #[test]
    fn test_minimal_request_json_uses_defaults() {
        let json = r#"{
            "beam": { "length_m": 10.0, "elastic_modulus_gpa": 200.0, "moment_of_inertia_cm4": 100000.0 },
            "load": { "type": "point", "magnitude_kn": 100.0, "position": 0.5 }
        }"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.version, SCHEMA_VERSION);
        assert_eq!(request.options, AnalysisOptions::default());
        assert_eq!(request.beam, BeamConfig::default());
        assert_eq!(request.load, LoadCase::point(100.0, 0.5));
    }

    #[test]
    fn test_run_basic() {
        let request = AnalysisRequest::new(BeamConfig::default(), LoadCase::point(100.0, 0.5));
        let report = request.run().unwrap();

        assert_eq!(report.version, SCHEMA_VERSION);
        assert_eq!(report.request, request);
        assert_eq!(report.results.len(), 101);
        assert!(report.results.influence_line.is_none());
        assert!(report.results.envelope.is_none());
        assert!((report.results.bending_moment[50] - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_with_extras() {
        let mut request = AnalysisRequest::new(
            BeamConfig::fixed_fixed(10.0, 200.0, 100_000.0),
            LoadCase::point(100.0, 0.5),
        );
        request.options.observation_position = Some(0.5);
        request.options.include_envelope = true;
        request.options.envelope_steps = 10;
        request.options.divisions = 50;

        let report = request.run().unwrap();
        let results = &report.results;

        assert_eq!(results.len(), 51);
        assert_eq!(results.influence_line.as_ref().map(Vec::len), Some(51));
        assert_eq!(results.envelope.as_ref().map(|e| e.steps), Some(10));
        assert!(results.notices.contains(&ApproximationNotice::ApproximateInfluenceLine {
            support: crate::beam::SupportCondition::FixedFixed
        }));
    }

    #[test]
    fn test_run_rejects_invalid_request() {
        let mut request = AnalysisRequest::new(BeamConfig::default(), LoadCase::point(100.0, 0.5));
        request.options.observation_position = Some(-0.1);
        assert!(request.run().is_err());

        let request = AnalysisRequest::new(BeamConfig::default(), LoadCase::distributed(5.0, -1.0, 0.5));
        assert_eq!(request.run().unwrap_err().error_code(), "INVALID_LOAD");
    }

    #[test]
    fn test_report_serializes() {
        let report = AnalysisRequest::new(BeamConfig::default(), LoadCase::default())
            .run()
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"generated_at\""));
        assert!(json.contains("\"bending_moment\""));
        // No optional sections when not requested
        assert!(!json.contains("\"envelope\""));
        assert!(!json.contains("\"notices\""));
    }
}
