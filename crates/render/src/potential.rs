//! The multiplicative potential of a set of deceleration zones.
//!
//! ```text
//! Λ(x, y) = Π_z [ 2 / (1 + exp(−decay_z · ‖(x, y) − center_z‖)) − 1 ]
//! ```
//!
//! `Λ` starts at 1 and every zone multiplies in a factor from `[0, 1)`, so
//! the field stays in `[0, 1]` as long as no decay is negative.

use crate::canvas::{Canvas, Stroke, BLACK};
use crate::colormap::bone;
use crate::error::RenderError;
use glam::Vec2;
use image::Rgba;
use model::{potential, validate_zones, Zone};
use rl::{linspace, Bounds};

/// Contour levels shared by the filled bands and the iso-lines.
pub const LEVELS: [f32; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// `Λ` sampled on a `resolution × resolution` mesh over `bounds`.
#[derive(Clone, Debug, PartialEq)]
pub struct PotentialField {
    bounds: Bounds,
    resolution: usize,
    xs: Vec<f32>,
    ys: Vec<f32>,
    /// Row-major over y: `values[j * resolution + i]` is `Λ(xs[i], ys[j])`.
    values: Vec<f32>,
}

/// Evaluates the potential of `zones` on a dense mesh over `bounds`.
///
/// # Errors
///
/// Negative or non-finite decay is rejected instead of producing values
/// outside `[0, 1]`; `resolution` must be at least 2.
pub fn compute_field(bounds: &Bounds, zones: &[Zone], resolution: usize) -> Result<PotentialField, RenderError> {
    validate_zones(zones)?;
    if resolution < 2 {
        return Err(RenderError::Resolution(resolution));
    }
    let xs = linspace(bounds.min_x, bounds.max_x, resolution);
    let ys = linspace(bounds.min_y, bounds.max_y, resolution);
    let values = ys.iter().flat_map(|&y| xs.iter().map(move |&x| potential(zones, x, y))).collect();
    Ok(PotentialField { bounds: *bounds, resolution, xs, ys, values })
}

impl PotentialField {
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[must_use]
    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mesh value at column `i`, row `j`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.values[j * self.resolution + i]
    }

    /// Bilinear interpolation of the mesh; `None` outside the bounds.
    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> Option<f32> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let n = self.resolution - 1;
        let gx = (x - self.bounds.min_x) / self.bounds.width() * n as f32;
        let gy = (y - self.bounds.min_y) / self.bounds.height() * n as f32;
        let (i, j) = ((gx.floor() as usize).min(n - 1), (gy.floor() as usize).min(n - 1));
        let (fx, fy) = (gx - i as f32, gy - j as f32);
        let bottom = self.at(i, j) * (1.0 - fx) + self.at(i + 1, j) * fx;
        let top = self.at(i, j + 1) * (1.0 - fx) + self.at(i + 1, j + 1) * fx;
        Some(bottom * (1.0 - fy) + top * fy)
    }

    /// Filled contour bands in the bone colormap, then dashed black
    /// iso-lines at every level.
    pub fn draw(&self, canvas: &mut Canvas) {
        self.fill(canvas);
        for &level in &LEVELS {
            self.iso_line(canvas, level);
        }
    }

    fn fill(&self, canvas: &mut Canvas) {
        for py in 0..canvas.height() {
            for px in 0..canvas.width() {
                let p = canvas.to_data(px, py);
                let Some(v) = self.sample(p.x, p.y) else {
                    continue;
                };
                canvas.put(px, py, band_color(v));
            }
        }
    }

    /// Marching squares at `level`; each cell contributes at most two
    /// segments.
    fn iso_line(&self, canvas: &mut Canvas, level: f32) {
        let style = Stroke::solid(BLACK).alpha(0.6).dashed(4.0, 3.0);
        let n = self.resolution;
        for j in 0..n - 1 {
            for i in 0..n - 1 {
                let corners = [
                    (Vec2::new(self.xs[i], self.ys[j]), self.at(i, j)),
                    (Vec2::new(self.xs[i + 1], self.ys[j]), self.at(i + 1, j)),
                    (Vec2::new(self.xs[i + 1], self.ys[j + 1]), self.at(i + 1, j + 1)),
                    (Vec2::new(self.xs[i], self.ys[j + 1]), self.at(i, j + 1)),
                ];
                let crossings: Vec<Vec2> = (0..4)
                    .filter_map(|k| {
                        let (pa, va) = corners[k];
                        let (pb, vb) = corners[(k + 1) % 4];
                        if (va < level) == (vb < level) {
                            return None;
                        }
                        Some(pa.lerp(pb, (level - va) / (vb - va)))
                    })
                    .collect();
                for pair in crossings.chunks_exact(2) {
                    canvas.line(pair[0], pair[1], style);
                }
            }
        }
    }
}

/// Colour of the band holding `v`, taken at the band's mid-level.
fn band_color(v: f32) -> Rgba<u8> {
    let bands = LEVELS.len() - 1;
    let band = ((v * bands as f32).floor().max(0.0) as usize).min(bands - 1);
    bone((band as f32 + 0.5) / bands as f32)
}
