//! CPU bloom chain: luminance threshold, separable Gaussian blur, combine.

use crate::scene::luminance;

use super::frame::Frame;

/// Width of the smoothstep ramp above the threshold.
const THRESHOLD_KNEE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Axis {
    Horizontal,
    Vertical,
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Keep pixels whose luminance exceeds `threshold`; fade the rest to black.
pub(super) fn threshold(src: &Frame, threshold: f32) -> Frame {
    let mut out = Frame::new(src.width(), src.height());
    for (x, y, p) in src.enumerate() {
        let k = smoothstep(threshold, threshold + THRESHOLD_KNEE, luminance(p));
        if k > 0.0 {
            out.set(x, y, [p[0] * k, p[1] * k, p[2] * k, 1.0]);
        }
    }
    out
}

/// One 1-D blur pass. `weights` is center-first and one-sided; samples
/// past the edge clamp to the border pixel.
pub(super) fn blur(src: &Frame, weights: &[f32], axis: Axis) -> Frame {
    let (w, h) = (src.width(), src.height());
    let mut out = Frame::new(w, h);
    if w == 0 || h == 0 || weights.is_empty() {
        return out;
    }

    let (dx, dy): (i64, i64) = match axis {
        Axis::Horizontal => (1, 0),
        Axis::Vertical => (0, 1),
    };
    let sample = |x: i64, y: i64| {
        let cx = x.clamp(0, w as i64 - 1) as u32;
        let cy = y.clamp(0, h as i64 - 1) as u32;
        src.get(cx, cy)
    };

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let center = sample(x, y);
            let mut sum = [
                center[0] * weights[0],
                center[1] * weights[0],
                center[2] * weights[0],
            ];
            for (i, weight) in weights.iter().enumerate().skip(1) {
                let i = i as i64;
                let a = sample(x + dx * i, y + dy * i);
                let b = sample(x - dx * i, y - dy * i);
                for c in 0..3 {
                    sum[c] += (a[c] + b[c]) * weight;
                }
            }
            out.set(x as u32, y as u32, [sum[0], sum[1], sum[2], 1.0]);
        }
    }
    out
}

/// `base + strength * bloom`, opaque.
pub(super) fn combine(base: &Frame, bloom: &Frame, strength: f32) -> Frame {
    let mut out = base.clone();
    for (x, y, b) in base.enumerate() {
        let g = bloom.get(x, y);
        out.set(
            x,
            y,
            [
                b[0] + strength * g[0],
                b[1] + strength * g[1],
                b[2] + strength * g[2],
                1.0,
            ],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_drops_dim_pixels() {
        let mut src = Frame::new(2, 1);
        src.set(0, 0, [0.05, 0.05, 0.05, 1.0]);
        src.set(1, 0, [1.0, 0.8, 0.2, 1.0]);
        let out = threshold(&src, 0.1);
        assert!(out.is_black(0, 0));
        assert_eq!(out.get(1, 0), [1.0, 0.8, 0.2, 1.0]);
    }

    #[test]
    fn blur_preserves_energy_away_from_edges() {
        let mut src = Frame::new(41, 1);
        src.set(20, 0, [1.0, 1.0, 1.0, 1.0]);
        let weights = [0.4, 0.2, 0.1];
        let out = blur(&src, &weights, Axis::Horizontal);
        let total: f32 = out.pixels().iter().map(|p| p[0]).sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!((out.get(20, 0)[0] - 0.4).abs() < 1e-6);
        assert!((out.get(22, 0)[0] - 0.1).abs() < 1e-6);
        assert!(out.is_black(23, 0));
    }

    #[test]
    fn vertical_blur_only_spreads_vertically() {
        let mut src = Frame::new(3, 3);
        src.set(1, 1, [1.0, 0.0, 0.0, 1.0]);
        let out = blur(&src, &[0.5, 0.25], Axis::Vertical);
        assert!(!out.is_black(1, 0));
        assert!(out.is_black(0, 1));
    }

    #[test]
    fn combine_with_zero_strength_is_base() {
        let mut base = Frame::new(2, 2);
        base.set(0, 1, [0.3, 0.2, 0.1, 1.0]);
        let mut bloom = Frame::new(2, 2);
        bloom.fill([5.0, 5.0, 5.0, 1.0]);
        assert_eq!(combine(&base, &bloom, 0.0), base);
    }

    #[test]
    fn combine_adds_scaled_bloom() {
        let base = Frame::new(1, 1);
        let mut bloom = Frame::new(1, 1);
        bloom.fill([0.5, 0.25, 0.0, 1.0]);
        assert_eq!(combine(&base, &bloom, 2.0).get(0, 0), [1.0, 0.5, 0.0, 1.0]);
    }
}
