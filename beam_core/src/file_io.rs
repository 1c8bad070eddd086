//! # File I/O Module
//!
//! Reads analysis requests and writes analysis reports as JSON:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **Version validation**: reject documents from an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{load_request, save_report};
//! use std::path::Path;
//!
//! let request = load_request(Path::new("bridge.json"))?;
//! let report = request.run()?;
//! save_report(&report, Path::new("bridge.report.json"))?;
//! # Ok::<(), beam_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::request::{AnalysisReport, AnalysisRequest, SCHEMA_VERSION};

/// Load an analysis request from a JSON file.
///
/// # Returns
///
/// * `Ok(AnalysisRequest)` - Successfully loaded request
/// * `Err(CalcError::VersionMismatch)` - Document version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_request(path: &Path) -> CalcResult<AnalysisRequest> {
    let request: AnalysisRequest = read_json(path)?;
    validate_version(&request.version)?;
    debug!(path = %path.display(), load = request.load.display_name(), "request loaded");
    Ok(request)
}

/// Load a previously saved report
pub fn load_report(path: &Path) -> CalcResult<AnalysisReport> {
    let report: AnalysisReport = read_json(path)?;
    validate_version(&report.version)?;
    Ok(report)
}

/// Save an analysis request (atomic write)
pub fn save_request(request: &AnalysisRequest, path: &Path) -> CalcResult<()> {
    write_json_atomic(request, path)
}

/// Save an analysis report with atomic write semantics.
///
/// The save process:
/// 1. Serialize the report to JSON
/// 2. Write to a temporary file (`<name>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
///
/// An interrupted save never leaves a truncated report behind.
pub fn save_report(report: &AnalysisReport, path: &Path) -> CalcResult<()> {
    write_json_atomic(report, path)?;
    info!(path = %path.display(), stations = report.results.len(), "report saved");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_extension(
        path.extension()
            .map(|e| format!("{}.tmp", e.to_string_lossy()))
            .unwrap_or_else(|| "tmp".to_string()),
    );

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Validate that a document version is compatible with the current schema.
///
/// The major version must match. While the schema is `0.x`, a newer minor
/// version is also rejected.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let (Some(file_parts), Some(current_parts)) = (parse(file_version), parse(SCHEMA_VERSION)) else {
        return Err(mismatch());
    };

    if file_parts.first() != current_parts.first() {
        return Err(mismatch());
    }

    if current_parts[0] == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::BeamConfig;
    use crate::loads::{Axle, LoadCase};
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("beam_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_request_roundtrip() {
        let path = temp_path("request_roundtrip");
        let request = AnalysisRequest::new(
            BeamConfig::multi_span(30.0, 3, 35.0, 4_500_000.0),
            LoadCase::train(vec![Axle::new(145.0, 0.0), Axle::new(145.0, 4.3)], 0.1),
        );

        save_request(&request, &path).unwrap();
        let loaded = load_request(&path).unwrap();
        assert_eq!(loaded, request);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        let tmp_path = path.with_extension("json.tmp");

        let report = AnalysisRequest::new(BeamConfig::default(), LoadCase::default())
            .run()
            .unwrap();
        save_report(&report, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.request, report.request);
        assert_eq!(loaded.results.len(), report.results.len());
        for (a, b) in loaded.results.bending_moment.iter().zip(&report.results.bending_moment) {
            assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_path("newer_schema");
        fs::write(
            &path,
            r#"{ "version": "0.9.0",
                 "beam": { "length_m": 5.0, "elastic_modulus_gpa": 200.0, "moment_of_inertia_cm4": 1000.0 },
                 "load": { "type": "point", "magnitude_kn": 1.0, "position": 0.5 } }"#,
        )
        .unwrap();

        let err = load_request(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let err = load_request(Path::new("/nonexistent/beam_core/request.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        let err = load_request(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.3").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("").is_err());
        assert!(validate_version("zero.one").is_err());
    }
}
