//! Export a shear profile to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ShearProfile;
use crate::error::AppError;

/// Write one row per radius sample.
pub fn write_profile_csv(path: &Path, profile: &ShearProfile) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_profile_rows(&mut file, profile)
}

/// Write the CSV rows to any writer.
pub fn write_profile_rows<W: Write>(out: &mut W, profile: &ShearProfile) -> Result<(), AppError> {
    writeln!(out, "radius_kpc,drag_m_s2,normalized_shear,in_rupture_zone")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for s in &profile.samples {
        let in_zone = s.normalized_shear >= profile.threshold;
        writeln!(
            out,
            "{:.6},{:.10e},{:.6},{}",
            s.radius_kpc, s.drag, s.normalized_shear, in_zone
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
