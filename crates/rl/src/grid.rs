//! Dense 2-D state grids for sampling a policy over space.

use ml::Tensor;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("invalid grid bounds: x in [{min_x}, {max_x}], y in [{min_y}, {max_y}]")]
    InvalidBounds { min_x: f32, max_x: f32, min_y: f32, max_y: f32 },
    #[error("a grid needs at least one point per axis")]
    NoPoints,
    #[error("{count} samples do not form a square grid")]
    NotSquare { count: usize },
    #[error("{count} samples do not match a {npoints}x{npoints} grid")]
    Misaligned { count: usize, npoints: usize },
}

/// Axis-aligned rectangle, `min < max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Result<Self, GridError> {
        let finite = [min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite());
        if !finite || min_x >= max_x || min_y >= max_y {
            return Err(GridError::InvalidBounds { min_x, max_x, min_y, max_y });
        }
        Ok(Self { min_x, max_x, min_y, max_y })
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive. A single value
/// is `start`.
#[must_use]
pub fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f32;
            (0..n).map(|i| if i == n - 1 { end } else { start + step * i as f32 }).collect()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub bounds: Bounds,
    pub npoints: usize,
}

impl GridSpec {
    pub fn new(bounds: Bounds, npoints: usize) -> Result<Self, GridError> {
        if npoints == 0 {
            return Err(GridError::NoPoints);
        }
        Ok(Self { bounds, npoints })
    }

    /// The `npoints²` grid points, x in the outer loop and y in the inner.
    #[must_use]
    pub fn sample(&self) -> GridSamplePoints {
        let b = &self.bounds;
        let xs = linspace(b.min_x, b.max_x, self.npoints);
        let ys = linspace(b.min_y, b.max_y, self.npoints);
        let points = xs.iter().flat_map(|&x| ys.iter().map(move |&y| [x, y])).collect();
        GridSamplePoints { npoints: self.npoints, points }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridSamplePoints {
    npoints: usize,
    points: Vec<[f32; 2]>,
}

impl GridSamplePoints {
    /// Wraps externally produced points, checking they fill an
    /// `npoints × npoints` grid.
    pub fn new(npoints: usize, points: Vec<[f32; 2]>) -> Result<Self, GridError> {
        check_square(points.len(), npoints)?;
        Ok(Self { npoints, points })
    }

    #[must_use]
    pub fn npoints(&self) -> usize {
        self.npoints
    }

    #[must_use]
    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points as a `[npoints², 2]` state batch.
    #[must_use]
    pub fn to_tensor(&self) -> Tensor {
        let data = self.points.iter().flatten().copied().collect();
        Tensor::from_vec(vec![self.points.len(), 2], data)
    }
}

/// Checks that `count` samples reshape into an `npoints × npoints` grid.
pub fn check_square(count: usize, npoints: usize) -> Result<(), GridError> {
    let side = (count as f64).sqrt().round() as usize;
    if side * side != count {
        return Err(GridError::NotSquare { count });
    }
    if side != npoints {
        return Err(GridError::Misaligned { count, npoints });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_two_points() {
        let spec = GridSpec::new(Bounds::new(0.0, 1.0, 0.0, 1.0).unwrap(), 2).unwrap();
        let grid = spec.sample();
        assert_eq!(grid.points(), &[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn count_is_npoints_squared() {
        let bounds = Bounds::new(-5.0, 11.0, -2.0, 11.0).unwrap();
        for n in [1, 3, 20] {
            let grid = GridSpec::new(bounds, n).unwrap().sample();
            assert_eq!(grid.len(), n * n);
            assert_eq!(grid.to_tensor().shape(), &[n * n, 2]);
        }
    }

    #[test]
    fn single_point_is_lower_corner() {
        let grid = GridSpec::new(Bounds::new(-1.0, 1.0, 2.0, 3.0).unwrap(), 1).unwrap().sample();
        assert_eq!(grid.points(), &[[-1.0, 2.0]]);
    }

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(-5.0, 11.0, 20);
        assert_eq!(v.len(), 20);
        assert_eq!(v[0], -5.0);
        assert_eq!(v[19], 11.0);
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(Bounds::new(1.0, 1.0, 0.0, 1.0).is_err());
        assert!(Bounds::new(0.0, 1.0, 2.0, -2.0).is_err());
        assert!(Bounds::new(f32::NAN, 1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn rejects_zero_points() {
        let bounds = Bounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(GridSpec::new(bounds, 0), Err(GridError::NoPoints));
    }

    #[test]
    fn square_checks() {
        assert_eq!(check_square(16, 4), Ok(()));
        assert_eq!(check_square(15, 4), Err(GridError::NotSquare { count: 15 }));
        assert_eq!(check_square(9, 4), Err(GridError::Misaligned { count: 9, npoints: 4 }));
    }
}
