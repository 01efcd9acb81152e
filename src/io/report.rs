//! Read/write report JSON files.
//!
//! A report file is the portable representation of one calculation:
//! - which model ran
//! - the fit result or the shear profile
//! - when it was written
//!
//! The schema is defined by `domain::ReportFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::domain::{FitResult, ModelKind, ReportFile, ShearProfile};
use crate::error::AppError;

pub const TOOL_NAME: &str = "trr";

/// Wrap a fit result in a report.
pub fn fit_report(fit: &FitResult) -> ReportFile {
    ReportFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Local::now().to_rfc3339(),
        kind: fit.model,
        fit: Some(fit.clone()),
        profile: None,
    }
}

/// Wrap a shear profile in a report.
pub fn profile_report(profile: &ShearProfile) -> ReportFile {
    ReportFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Local::now().to_rfc3339(),
        kind: ModelKind::Stream,
        fit: None,
        profile: Some(profile.clone()),
    }
}

/// Serialize a report as pretty JSON.
pub fn report_to_json(report: &ReportFile) -> Result<String, AppError> {
    serde_json::to_string_pretty(report).map_err(|e| AppError::io(format!("Failed to serialize report: {e}")))
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, report: &ReportFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::io(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid report JSON: {e}")))?;
    if report.fit.is_none() && report.profile.is_none() {
        return Err(AppError::io(format!(
            "Report JSON '{}' holds neither a fit nor a profile.",
            path.display()
        )));
    }
    Ok(report)
}
