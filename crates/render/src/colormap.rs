use image::Rgba;

/// Piecewise-linear channel as `(x, y)` anchors, `x` ascending from 0 to 1.
type Channel = &'static [(f32, f32)];

const BONE_RED: Channel = &[(0.0, 0.0), (0.746_032, 0.652_778), (1.0, 1.0)];
const BONE_GREEN: Channel = &[(0.0, 0.0), (0.365_079, 0.319_444), (0.746_032, 0.777_778), (1.0, 1.0)];
const BONE_BLUE: Channel = &[(0.0, 0.0), (0.365_079, 0.444_444), (1.0, 1.0)];

fn channel(anchors: Channel, t: f32) -> f32 {
    for pair in anchors.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if t <= x1 {
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    anchors.last().map_or(0.0, |&(_, y)| y)
}

/// Grey-blue "bone" colormap, black at 0 and white at 1. `t` is clamped.
#[must_use]
pub fn bone(t: f32) -> Rgba<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let to_u8 = |v: f32| (v * 255.0).round() as u8;
    Rgba([to_u8(channel(BONE_RED, t)), to_u8(channel(BONE_GREEN, t)), to_u8(channel(BONE_BLUE, t)), 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(bone(0.0), Rgba([0, 0, 0, 255]));
        assert_eq!(bone(1.0), Rgba([255, 255, 255, 255]));
        assert_eq!(bone(7.0), bone(1.0));
    }

    #[test]
    fn blue_leads_in_the_dark_range() {
        let c = bone(0.3);
        assert!(c[2] > c[1] && c[1] >= c[0]);
    }
}
