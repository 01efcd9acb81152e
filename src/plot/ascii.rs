//! ASCII plotting of a stream shear profile.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - normalized shear: `-` line
//! - rupture threshold: `.` row
//! - samples inside the rupture zone: `#`

use crate::domain::ShearProfile;

/// Render normalized shear against radius.
pub fn render_shear_plot(profile: &ShearProfile, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (profile.samples.first(), profile.samples.last()) else {
        return "Plot: (no samples)\n".to_string();
    };
    let (r_min, r_max) = (first.radius_kpc, last.radius_kpc);
    if !(r_max > r_min) {
        return "Plot: (degenerate radius range)\n".to_string();
    }

    let mut grid = vec![vec![' '; width]; height];

    // Curve first, then the threshold only where the curve left blanks.
    let cells: Vec<(usize, usize)> = profile
        .samples
        .iter()
        .map(|s| (column(s.radius_kpc, r_min, r_max, width), row(s.normalized_shear, height)))
        .collect();
    draw_curve(&mut grid, &cells);

    if (0.0..=1.0).contains(&profile.threshold) {
        let threshold_row = row(profile.threshold, height);
        for cell in grid[threshold_row].iter_mut().filter(|c| **c == ' ') {
            *cell = '.';
        }
    }

    for s in profile.samples.iter().filter(|s| s.normalized_shear >= profile.threshold) {
        grid[row(s.normalized_shear, height)][column(s.radius_kpc, r_min, r_max, width)] = '#';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: r=[{r_min:.2}, {r_max:.2}] kpc | shear=[0, 1] | threshold={:.2}\n",
        profile.threshold
    ));
    for line in grid {
        out.extend(line);
        out.push('\n');
    }
    out
}

/// Index of `v` among `cells` evenly spaced cells covering `[lo, hi]`.
fn axis_cell(v: f64, lo: f64, hi: f64, cells: usize) -> usize {
    let last = cells.saturating_sub(1) as f64;
    (((v - lo) / (hi - lo)).clamp(0.0, 1.0) * last).round() as usize
}

fn column(radius_kpc: f64, r_min: f64, r_max: f64, width: usize) -> usize {
    axis_cell(radius_kpc, r_min, r_max, width)
}

/// Row 0 is shear 1.
fn row(normalized_shear: f64, height: usize) -> usize {
    axis_cell(1.0 - normalized_shear, 0.0, 1.0, height)
}

/// Join consecutive cells with `-` segments.
fn draw_curve(grid: &mut [Vec<char>], cells: &[(usize, usize)]) {
    for pair in cells.windows(2) {
        draw_segment(grid, pair[0], pair[1]);
    }
}

/// Bresenham segment between two `(column, row)` cells; only blank cells are painted.
fn draw_segment(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize)) {
    let (mut x, mut y) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let step_x = (x1 - x).signum();
    let step_y = (y1 - y).signum();
    let mut err = dx + dy;

    loop {
        if let Some(cell) = grid
            .get_mut(y as usize)
            .and_then(|r| r.get_mut(x as usize))
            .filter(|c| **c == ' ')
        {
            *cell = '-';
        }
        if (x, y) == (x1, y1) {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RuptureZone, ShearSample};

    fn sample(r: f64, n: f64) -> ShearSample {
        ShearSample {
            radius_kpc: r,
            drag: 0.0,
            normalized_shear: n,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let profile = ShearProfile {
            samples: vec![sample(0.0, 0.0), sample(1.0, 1.0)],
            threshold: 0.75,
            rupture: Some(RuptureZone {
                min_kpc: 1.0,
                max_kpc: 1.0,
            }),
            peak_shear_radius_kpc: Some(1.0),
        };

        let txt = render_shear_plot(&profile, 10, 5);
        let expected = concat!(
            "Plot: r=[0.00, 1.00] kpc | shear=[0, 1] | threshold=0.75\n",
            "        -#\n",
            "......--..\n",
            "    --    \n",
            "  --      \n",
            "--        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_curve_sits_on_bottom_row_without_rupture_marks() {
        let profile = ShearProfile {
            samples: vec![sample(2.0, 0.0), sample(4.0, 0.0), sample(6.0, 0.0)],
            threshold: 0.75,
            rupture: None,
            peak_shear_radius_kpc: None,
        };
        let txt = render_shear_plot(&profile, 10, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1], "..........");
        assert_eq!(rows[4], "----------");
        assert!(!txt.contains('#'));
    }

    #[test]
    fn empty_profile_renders_placeholder() {
        let profile = ShearProfile {
            samples: Vec::new(),
            threshold: 0.75,
            rupture: None,
            peak_shear_radius_kpc: None,
        };
        assert_eq!(render_shear_plot(&profile, 40, 10), "Plot: (no samples)\n");
    }
}
