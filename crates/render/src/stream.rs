//! Streamlines through a gridded vector field.
//!
//! Seeds are taken from a coarse occupancy mask, visited in a spiral from
//! the border inwards. Each streamline is integrated backwards and
//! forwards with the midpoint rule along the unit direction of the
//! bilinearly interpolated field, and stops when it leaves the grid, hits
//! a stagnation point, or enters a mask cell another line already
//! occupies. Lines shorter than [`MIN_LENGTH`] release their cells again.

use crate::canvas::{Canvas, Stroke};
use glam::Vec2;
use image::Rgba;
use rl::FieldGrid;

/// Mask cells per axis at density 1.
pub const MASK_CELLS: f32 = 30.0;
pub const DEFAULT_DENSITY: f32 = 1.2;
/// Minimum streamline length, as a fraction of the grid extent.
pub const MIN_LENGTH: f32 = 0.1;
/// Maximum streamline length, as a multiple of the grid extent.
const MAX_LENGTH: f32 = 4.0;
/// Integration step, as a fraction of one mask cell.
const STEP: f32 = 0.2;

pub const STREAM_COLOR: Rgba<u8> = Rgba([51, 0, 178, 255]);
pub const STREAM_ALPHA: f32 = 0.4;

/// Bilinear sampler over a [`FieldGrid`], in normalised `[0, 1]²`
/// coordinates.
struct Interpolator<'a> {
    grid: &'a FieldGrid,
    origin: Vec2,
    extent: Vec2,
}

impl<'a> Interpolator<'a> {
    fn new(grid: &'a FieldGrid) -> Option<Self> {
        let (first_x, last_x) = (*grid.xs.first()?, *grid.xs.last()?);
        let (first_y, last_y) = (*grid.ys.first()?, *grid.ys.last()?);
        let extent = Vec2::new(last_x - first_x, last_y - first_y);
        if grid.n < 2 || extent.x <= 0.0 || extent.y <= 0.0 {
            return None;
        }
        Some(Self { grid, origin: Vec2::new(first_x, first_y), extent })
    }

    fn to_data(&self, q: Vec2) -> Vec2 {
        self.origin + q * self.extent
    }

    /// Field direction at normalised point `q`, in normalised units per
    /// unit length. `None` off the grid or at a stagnation point.
    fn direction(&self, q: Vec2) -> Option<Vec2> {
        if !(0.0..=1.0).contains(&q.x) || !(0.0..=1.0).contains(&q.y) {
            return None;
        }
        let n = self.grid.n;
        let g = q * (n - 1) as f32;
        let i = (g.x.floor() as usize).min(n - 2);
        let j = (g.y.floor() as usize).min(n - 2);
        let f = g - Vec2::new(i as f32, j as f32);
        let lerp2 = |a: &[f32]| {
            let bottom = a[j * n + i] * (1.0 - f.x) + a[j * n + i + 1] * f.x;
            let top = a[(j + 1) * n + i] * (1.0 - f.x) + a[(j + 1) * n + i + 1] * f.x;
            bottom * (1.0 - f.y) + top * f.y
        };
        // data velocity expressed in normalised axes
        let v = Vec2::new(lerp2(&self.grid.u), lerp2(&self.grid.v)) / self.extent;
        let speed = v.length();
        if !speed.is_finite() || speed < 1e-9 {
            return None;
        }
        Some(v / speed)
    }
}

/// Which trajectory owns each mask cell.
struct Mask {
    cells: usize,
    taken: Vec<bool>,
}

impl Mask {
    fn new(cells: usize) -> Self {
        Self { cells, taken: vec![false; cells * cells] }
    }

    fn cell(&self, q: Vec2) -> (usize, usize) {
        let c = self.cells as f32;
        let x = ((q.x * c).floor().max(0.0) as usize).min(self.cells - 1);
        let y = ((q.y * c).floor().max(0.0) as usize).min(self.cells - 1);
        (x, y)
    }

    fn is_taken(&self, (x, y): (usize, usize)) -> bool {
        self.taken[y * self.cells + x]
    }

    fn set(&mut self, (x, y): (usize, usize), value: bool) {
        self.taken[y * self.cells + x] = value;
    }

    fn center(&self, (x, y): (usize, usize)) -> Vec2 {
        (Vec2::new(x as f32, y as f32) + 0.5) / self.cells as f32
    }
}

/// Mask cells from the border inwards, clockwise.
fn spiral(cells: usize) -> Vec<(usize, usize)> {
    if cells == 0 {
        return Vec::new();
    }
    let mut out: Vec<(i64, i64)> = Vec::with_capacity(cells * cells);
    let (mut lo_x, mut hi_x, mut lo_y, mut hi_y) = (0i64, cells as i64 - 1, 0i64, cells as i64 - 1);
    while lo_x <= hi_x && lo_y <= hi_y {
        for x in lo_x..=hi_x {
            out.push((x, lo_y));
        }
        for y in lo_y + 1..=hi_y {
            out.push((hi_x, y));
        }
        if lo_y < hi_y {
            for x in (lo_x..hi_x).rev() {
                out.push((x, hi_y));
            }
        }
        if lo_x < hi_x {
            for y in (lo_y + 1..hi_y).rev() {
                out.push((lo_x, y));
            }
        }
        lo_x += 1;
        hi_x -= 1;
        lo_y += 1;
        hi_y -= 1;
    }
    out.into_iter().map(|(x, y)| (x as usize, y as usize)).collect()
}

/// Integrates from `seed` in one direction, claiming mask cells on the
/// way. Returns the visited points (excluding the seed) and the length
/// travelled.
fn integrate(
    field: &Interpolator<'_>,
    mask: &mut Mask,
    claimed: &mut Vec<(usize, usize)>,
    seed: Vec2,
    sign: f32,
) -> (Vec<Vec2>, f32) {
    let h = STEP / mask.cells as f32;
    let max_steps = (MAX_LENGTH / h) as usize;
    let mut points = Vec::new();
    let mut length = 0.0;
    let mut q = seed;
    let mut cell = mask.cell(q);
    for _ in 0..max_steps {
        let Some(k1) = field.direction(q) else { break };
        let Some(k2) = field.direction(q + 0.5 * h * sign * k1) else { break };
        let next = q + h * sign * k2;
        if field.direction(next).is_none() {
            break;
        }
        let next_cell = mask.cell(next);
        if next_cell != cell {
            if mask.is_taken(next_cell) {
                break;
            }
            mask.set(next_cell, true);
            claimed.push(next_cell);
            cell = next_cell;
        }
        length += h;
        q = next;
        points.push(q);
    }
    (points, length)
}

/// Streamlines of `grid` in data coordinates, each with at least two
/// points. Grids smaller than 2×2 or with zero extent yield none.
#[must_use]
pub fn streamlines(grid: &FieldGrid, density: f32) -> Vec<Vec<Vec2>> {
    let Some(field) = Interpolator::new(grid) else {
        return Vec::new();
    };
    let cells = ((MASK_CELLS * density).round() as usize).max(1);
    let mut mask = Mask::new(cells);
    let mut lines = Vec::new();

    for seed_cell in spiral(cells) {
        if mask.is_taken(seed_cell) {
            continue;
        }
        let seed = mask.center(seed_cell);
        if field.direction(seed).is_none() {
            continue;
        }
        mask.set(seed_cell, true);
        let mut claimed = vec![seed_cell];

        let (backward, back_len) = integrate(&field, &mut mask, &mut claimed, seed, -1.0);
        let (forward, fwd_len) = integrate(&field, &mut mask, &mut claimed, seed, 1.0);

        if back_len + fwd_len < MIN_LENGTH {
            for c in claimed {
                mask.set(c, false);
            }
            continue;
        }
        let line: Vec<Vec2> = backward
            .into_iter()
            .rev()
            .chain(std::iter::once(seed))
            .chain(forward)
            .map(|q| field.to_data(q))
            .collect();
        lines.push(line);
    }
    tracing::debug!(lines = lines.len(), cells, "integrated streamlines");
    lines
}

/// Draws `lines` with an arrowhead halfway along each one, pointing in
/// the direction of flow.
pub fn draw_streamlines(canvas: &mut Canvas, lines: &[Vec<Vec2>], color: Rgba<u8>, alpha: f32) {
    let style = Stroke::solid(color).alpha(alpha).width(1.5);
    for line in lines {
        canvas.polyline(line, style);
        let mid = line.len() / 2;
        if mid >= 1 {
            canvas.arrow_head(line[mid], line[mid] - line[mid - 1], 6.0, style);
        }
    }
}
