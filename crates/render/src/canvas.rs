//! Raster plotting surface with a data-to-pixel transform.
//!
//! A [`Canvas`] owns one RGBA panel and maps data coordinates onto it with
//! equal aspect, padding the data bounds by 10% on every side. The y axis
//! points up in data space and down in pixel space.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use rl::Bounds;

/// Fraction of the data extent added around the plotted region.
pub const PADDING: f32 = 0.1;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const GRID: Rgba<u8> = Rgba([220, 220, 220, 255]);
pub const DODGER_BLUE: Rgba<u8> = Rgba([30, 144, 255, 255]);
pub const LIME_GREEN: Rgba<u8> = Rgba([50, 205, 50, 255]);
pub const CRIMSON: Rgba<u8> = Rgba([220, 20, 60, 255]);

pub struct Canvas {
    image: RgbaImage,
    /// Data region actually visible, the padded bounds widened to the
    /// panel's aspect ratio.
    view: Bounds,
    /// Pixels per data unit, the same on both axes.
    scale: f32,
}

impl Canvas {
    /// A white panel showing `bounds` plus padding.
    #[must_use]
    pub fn new(width: u32, height: u32, bounds: Bounds) -> Self {
        let pad_x = bounds.width() * PADDING;
        let pad_y = bounds.height() * PADDING;
        let span = Vec2::new(bounds.width() + 2.0 * pad_x, bounds.height() + 2.0 * pad_y);
        let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let scale = (size.x / span.x).min(size.y / span.y);

        // centre the padded region, widening whichever axis has slack
        let center = Vec2::new(bounds.min_x + bounds.width() / 2.0, bounds.min_y + bounds.height() / 2.0);
        let half = size / scale / 2.0;
        let view = Bounds {
            min_x: center.x - half.x,
            max_x: center.x + half.x,
            min_y: center.y - half.y,
            max_y: center.y + half.y,
        };

        Self { image: RgbaImage::from_pixel(width, height, WHITE), view, scale }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Data coordinates to (sub)pixel coordinates.
    #[must_use]
    pub fn to_px(&self, p: Vec2) -> Vec2 {
        Vec2::new((p.x - self.view.min_x) * self.scale, (self.view.max_y - p.y) * self.scale)
    }

    /// Data coordinates of the centre of pixel `(px, py)`.
    #[must_use]
    pub fn to_data(&self, px: u32, py: u32) -> Vec2 {
        Vec2::new(
            self.view.min_x + (px as f32 + 0.5) / self.scale,
            self.view.max_y - (py as f32 + 0.5) / self.scale,
        )
    }

    /// Alpha-blends `color` over pixel `(x, y)`; out-of-range pixels are
    /// ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgba<u8>, alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let a = (alpha * f32::from(color[3]) / 255.0).clamp(0.0, 1.0);
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let under = f32::from(px[c]);
            px[c] = (under + (f32::from(color[c]) - under) * a).round() as u8;
        }
        px[3] = 255;
    }

    /// Overwrites pixel `(x, y)`.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    fn stamp(&mut self, p: Vec2, color: Rgba<u8>, alpha: f32, width: f32) {
        let r = (width / 2.0).max(0.5);
        let (x0, x1) = ((p.x - r).floor() as i64, (p.x + r).ceil() as i64);
        let (y0, y1) = ((p.y - r).floor() as i64, (p.y + r).ceil() as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                let c = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if c.distance_squared(p) <= r * r {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Straight segment between two pixel positions. `style.dash` is
    /// `(on, off)` in pixels along the segment, starting at `phase`.
    /// Returns the phase at the end of the segment.
    fn segment_px(&mut self, a: Vec2, b: Vec2, style: Stroke, phase: f32) -> f32 {
        let len = a.distance(b);
        let steps = (len * 2.0).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let s = len * i as f32 / steps as f32;
            if let Some((on, off)) = style.dash {
                if (phase + s) % (on + off) >= on {
                    continue;
                }
            }
            let p = a.lerp(b, i as f32 / steps as f32);
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            if style.width <= 1.0 {
                if last == Some(cell) {
                    continue;
                }
                last = Some(cell);
                self.blend(cell.0, cell.1, style.color, style.alpha);
            } else {
                self.stamp(p, style.color, style.alpha, style.width);
            }
        }
        phase + len
    }

    /// Segment between two data points.
    pub fn line(&mut self, a: Vec2, b: Vec2, style: Stroke) {
        self.segment_px(self.to_px(a), self.to_px(b), style, 0.0);
    }

    /// Connected segments through data points; dashes run continuously
    /// across vertices.
    pub fn polyline(&mut self, points: &[Vec2], style: Stroke) {
        let mut phase = 0.0;
        for pair in points.windows(2) {
            phase = self.segment_px(self.to_px(pair[0]), self.to_px(pair[1]), style, phase);
        }
    }

    /// Two-stroke arrowhead with its tip at data point `tip`, pointing along
    /// `dir`. `size` is in pixels.
    pub fn arrow_head(&mut self, tip: Vec2, dir: Vec2, size: f32, style: Stroke) {
        // pixel space flips y
        let d = Vec2::new(dir.x, -dir.y).normalize_or_zero();
        if d == Vec2::ZERO {
            return;
        }
        let t = self.to_px(tip);
        for side in [0.45f32, -0.45] {
            let back = Vec2::from_angle(std::f32::consts::PI + side).rotate(d);
            self.segment_px(t, t + back * size, Stroke { dash: None, ..style }, 0.0);
        }
    }

    /// Arrow from `from` to `to`, both in data units. The head scales with
    /// the shaft, up to `max_head` pixels.
    pub fn arrow(&mut self, from: Vec2, to: Vec2, max_head: f32, style: Stroke) {
        self.line(from, to, style);
        let shaft_px = self.to_px(from).distance(self.to_px(to));
        let head = (shaft_px * 0.35).min(max_head);
        if head >= 1.0 {
            self.arrow_head(to, to - from, head, style);
        }
    }

    /// Filled disc of `radius` pixels centred on a data point.
    pub fn dot(&mut self, center: Vec2, radius: f32, color: Rgba<u8>, alpha: f32) {
        self.stamp(self.to_px(center), color, alpha, radius * 2.0);
    }

    /// `X` marker of `size` pixels centred on a data point.
    pub fn x_marker(&mut self, center: Vec2, size: f32, color: Rgba<u8>, width: f32) {
        let c = self.to_px(center);
        let h = size / 2.0;
        let style = Stroke::solid(color).width(width);
        self.segment_px(c + Vec2::new(-h, -h), c + Vec2::new(h, h), style, 0.0);
        self.segment_px(c + Vec2::new(-h, h), c + Vec2::new(h, -h), style, 0.0);
    }

    /// Light grid lines at round data coordinates plus a black frame
    /// around the visible region.
    pub fn grid(&mut self) {
        let style = Stroke::solid(GRID);
        let v = self.view;
        for x in ticks(v.min_x, v.max_x) {
            self.line(Vec2::new(x, v.min_y), Vec2::new(x, v.max_y), style);
        }
        for y in ticks(v.min_y, v.max_y) {
            self.line(Vec2::new(v.min_x, y), Vec2::new(v.max_x, y), style);
        }
        self.frame();
    }

    fn frame(&mut self) {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return;
        }
        for x in 0..w {
            self.put(x, 0, BLACK);
            self.put(x, h - 1, BLACK);
        }
        for y in 0..h {
            self.put(0, y, BLACK);
            self.put(w - 1, y, BLACK);
        }
    }
}

/// Grid spacing of 1, 2 or 5 times a power of ten giving roughly ten
/// lines over `span`.
#[must_use]
pub fn nice_step(span: f32) -> f32 {
    let raw = span / 10.0;
    let magnitude = 10f32.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.5 {
        2.0
    } else if norm < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Upper bound on grid lines per axis.
pub const MAX_GRID_LINES: usize = 64;

/// Multiples of [`nice_step`] inside `[lo, hi]`, at most
/// [`MAX_GRID_LINES`] of them. Indexed by integer so the sequence ends
/// even when the step is below the float spacing at `lo`.
fn ticks(lo: f32, hi: f32) -> impl Iterator<Item = f32> {
    let step = f64::from(nice_step(hi - lo));
    let (first, last) = if step.is_finite() && step > 0.0 {
        ((f64::from(lo) / step).ceil() as i64, (f64::from(hi) / step).floor() as i64)
    } else {
        (1, 0)
    };
    (first..=last).take(MAX_GRID_LINES).map(move |k| (k as f64 * step) as f32)
}

/// How a line is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba<u8>,
    pub alpha: f32,
    /// Pixels.
    pub width: f32,
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    #[must_use]
    pub const fn solid(color: Rgba<u8>) -> Self {
        Self { color, alpha: 1.0, width: 1.0, dash: None }
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn dashed(mut self, on: f32, off: f32) -> Self {
        self.dash = Some((on, off));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(200, 100, Bounds::new(0.0, 10.0, 0.0, 5.0).unwrap())
    }

    #[test]
    fn transform_round_trips_pixel_centres() {
        let c = canvas();
        let p = c.to_data(37, 81);
        let back = c.to_px(p);
        assert!((back.x - 37.5).abs() < 1e-3);
        assert!((back.y - 81.5).abs() < 1e-3);
    }

    #[test]
    fn padding_keeps_bounds_inside() {
        let c = canvas();
        let lo = c.to_px(Vec2::new(0.0, 0.0));
        let hi = c.to_px(Vec2::new(10.0, 5.0));
        assert!(lo.x > 0.0 && lo.y < 100.0);
        assert!(hi.x < 200.0 && hi.y > 0.0);
    }

    #[test]
    fn equal_aspect() {
        let c = Canvas::new(300, 100, Bounds::new(0.0, 1.0, 0.0, 1.0).unwrap());
        let o = c.to_px(Vec2::ZERO);
        let dx = c.to_px(Vec2::X) - o;
        let dy = c.to_px(Vec2::Y) - o;
        assert!((dx.x - -dy.y).abs() < 1e-4);
    }

    #[test]
    fn blend_mixes_colours() {
        let mut c = canvas();
        c.blend(5, 5, BLACK, 0.5);
        let px = c.image().get_pixel(5, 5);
        assert!((127..=128).contains(&px[0]));
        c.blend(-1, 500, BLACK, 1.0);
    }

    #[test]
    fn ticks_stay_in_range() {
        let t: Vec<f32> = ticks(-0.5, 9.5).collect();
        assert_eq!(t.first(), Some(&0.0));
        assert_eq!(t.last(), Some(&9.0));
        assert_eq!(t.len(), 10);
    }

    #[test]
    fn grid_far_from_origin_terminates() {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let mut c = Canvas::new(100, 100, Bounds::new(1e8, 1e8 + 16.0, 0.0, 1.0).unwrap());
            c.grid();
            tx.send(c.image().get_pixel(0, 0)[0]).unwrap();
        });
        let corner = rx.recv_timeout(std::time::Duration::from_secs(10)).unwrap();
        assert_eq!(corner, 0);
        assert!(ticks(1e8, 1e8 + 16.0).count() <= MAX_GRID_LINES);
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(10.0), 1.0);
        assert_eq!(nice_step(20.0), 2.0);
        assert!((nice_step(0.5) - 0.05).abs() < 1e-6);
    }
}
