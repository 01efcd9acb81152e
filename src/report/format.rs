//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)
//!
//! Accuracies and model values print with two decimals.

use crate::domain::{FitResult, ModelKind, NamedValue, ShearProfile};

/// Format a fit result as a short summary block.
pub fn format_fit_summary(fit: &FitResult) -> String {
    let unit = fit.model.unit();
    let mut out = String::new();

    out.push_str(&format!("=== trr - {} ===\n", fit.model.display_name()));
    out.push_str(&format!("Accuracy: {:.2}%\n", fit.accuracy_percent));
    out.push_str(&format!(
        "{}: {:.2} {unit} (Obs: {:.2} {unit})\n",
        predicted_label(fit.model),
        fit.predicted,
        fit.observed
    ));
    out.push_str(&format!("Baryonic: {:.2} {unit}\n", fit.baseline));

    out.push_str("\nBest fit:\n");
    for p in &fit.parameters {
        out.push_str(&format!("- {}: {:.3}\n", p.name, p.value));
    }

    if !fit.diagnostics.is_empty() {
        out.push_str("\nDiagnostics:\n");
        for d in &fit.diagnostics {
            out.push_str(&format!("- {}: {}\n", d.name, fmt_diagnostic(d)));
        }
    }

    out.push_str(&format!(
        "\nSearch: {} grid points | {} evaluated | {} skipped\n",
        fit.search.grid_points, fit.search.evaluated, fit.search.skipped
    ));

    out
}

/// Format a shear profile summary (rupture zone plus a coarse table).
pub fn format_shear_summary(profile: &ShearProfile, table_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== trr - {} ===\n", ModelKind::Stream.display_name()));

    if let (Some(first), Some(last)) = (profile.samples.first(), profile.samples.last()) {
        out.push_str(&format!(
            "Orbit: r=[{:.2}, {:.2}] kpc | samples={}\n",
            first.radius_kpc,
            last.radius_kpc,
            profile.samples.len()
        ));
    }
    out.push_str(&format!("Rupture threshold: {:.2}\n", profile.threshold));
    match profile.rupture {
        Some(zone) => out.push_str(&format!(
            "Rupture zone: {:.2} - {:.2} kpc\n",
            zone.min_kpc, zone.max_kpc
        )),
        None => out.push_str("Rupture zone: none\n"),
    }
    if let Some(r) = profile.peak_shear_radius_kpc {
        out.push_str(&format!("Peak shear at: {r:.2} kpc\n"));
    }

    if table_rows > 0 && !profile.samples.is_empty() {
        out.push('\n');
        out.push_str(&format!("{:>10} {:>14} {:>8}\n", "r_kpc", "drag_m_s2", "shear"));
        out.push_str(&format!("{:->10} {:->14} {:->8}\n", "", "", ""));
        for s in pick_rows(profile, table_rows) {
            out.push_str(&format!(
                "{:>10.2} {:>14.4e} {:>8.2}\n",
                s.radius_kpc, s.drag, s.normalized_shear
            ));
        }
    }

    out
}

fn pick_rows(profile: &ShearProfile, rows: usize) -> Vec<&crate::domain::ShearSample> {
    let n = profile.samples.len();
    if rows >= n {
        return profile.samples.iter().collect();
    }
    let rows = rows.max(2);
    (0..rows)
        .map(|i| &profile.samples[i * (n - 1) / (rows - 1)])
        .collect()
}

fn predicted_label(model: ModelKind) -> &'static str {
    match model {
        ModelKind::Dynamics => "V_TRR",
        ModelKind::Optics | ModelKind::Redshift => "Theta_TRR",
        ModelKind::Stream => "Shear",
    }
}

fn fmt_diagnostic(d: &NamedValue) -> String {
    let v = d.value;
    if v != 0.0 && (v.abs() < 1e-3 || v.abs() >= 1e6) {
        format!("{v:.4e}")
    } else {
        format!("{v:.5}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RuptureZone, SearchStats, ShearSample};

    fn optics_fit() -> FitResult {
        FitResult {
            model: ModelKind::Optics,
            parameters: vec![NamedValue::new("ml_factor", 1.67)],
            observed: 1.0,
            predicted: 0.99952,
            baseline: 0.97212,
            relative_error: 0.00048,
            accuracy_percent: 99.952,
            diagnostics: vec![
                NamedValue::new("eta_c", 1.0073477),
                NamedValue::new("g_bar", 1.24e-9),
            ],
            search: SearchStats {
                grid_points: 201,
                evaluated: 201,
                skipped: 0,
            },
        }
    }

    #[test]
    fn fit_summary_uses_two_decimal_convention() {
        let txt = format_fit_summary(&optics_fit());
        assert!(txt.contains("Accuracy: 99.95%\n"), "{txt}");
        assert!(txt.contains("Theta_TRR: 1.00 arcsec (Obs: 1.00 arcsec)\n"), "{txt}");
        assert!(txt.contains("- ml_factor: 1.670\n"));
        assert!(txt.contains("- eta_c: 1.00735\n"));
        assert!(txt.contains("- g_bar: 1.2400e-9\n"));
        assert!(txt.contains("Search: 201 grid points | 201 evaluated | 0 skipped\n"));
    }

    #[test]
    fn shear_summary_reports_none_without_rupture() {
        let profile = ShearProfile {
            samples: vec![
                ShearSample {
                    radius_kpc: 20.0,
                    drag: 0.0,
                    normalized_shear: 0.0,
                },
                ShearSample {
                    radius_kpc: 21.0,
                    drag: 0.0,
                    normalized_shear: 0.0,
                },
            ],
            threshold: 0.75,
            rupture: None,
            peak_shear_radius_kpc: None,
        };
        let txt = format_shear_summary(&profile, 0);
        assert!(txt.contains("Rupture zone: none\n"));
        assert!(txt.contains("Orbit: r=[20.00, 21.00] kpc | samples=2\n"));
    }

    #[test]
    fn shear_summary_table_includes_both_ends() {
        let samples: Vec<ShearSample> = (0..11)
            .map(|i| ShearSample {
                radius_kpc: 10.0 + i as f64,
                drag: 1e-11,
                normalized_shear: i as f64 / 10.0,
            })
            .collect();
        let profile = ShearProfile {
            samples,
            threshold: 0.75,
            rupture: Some(RuptureZone {
                min_kpc: 18.0,
                max_kpc: 20.0,
            }),
            peak_shear_radius_kpc: Some(20.0),
        };
        let txt = format_shear_summary(&profile, 3);
        assert!(txt.contains("Rupture zone: 18.00 - 20.00 kpc\n"));
        assert!(txt.contains("     10.00"));
        assert!(txt.contains("     15.00"));
        assert!(txt.contains("     20.00"));
    }
}
