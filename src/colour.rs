// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning a (root, iterations) pair into a colour.  Each root gets its
//! own hue; the longer a pixel took to converge, the darker it gets.
//! Pixels that never converged are black.

use kernel::PixelResult;

/// Converts HSV, each component in [0, 1], to 8-bit RGB using the
/// six-sector formula.  The hue wraps around.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let mut h = h % 1.0;
    if h < 0.0 {
        h += 1.0;
    }
    let i = (6.0 * h).floor();
    let f = 6.0 * h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match (i as i64) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [channel(r), channel(g), channel(b)]
}

#[inline]
fn channel(c: f64) -> u8 {
    (c * 255.0).round().max(0.0).min(255.0) as u8
}

/// The colour of one pixel.  `root_count` is the sentinel value.
pub fn shade(result: PixelResult, root_count: usize, max_iters: usize) -> [u8; 3] {
    if result.root >= root_count || max_iters == 0 {
        return [0, 0, 0];
    }
    let hue = result.root as f64 / root_count as f64;
    let value = 1.0 - result.iterations as f64 / max_iters as f64;
    hsv_to_rgb(hue, 1.0, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-0.5, 1.0, 1.0), hsv_to_rgb(0.5, 1.0, 1.0));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(hsv_to_rgb(0.3, 0.0, 0.5), [128, 128, 128]);
    }

    #[test]
    fn sentinel_is_black() {
        let r = PixelResult {
            iterations: 0,
            root: 3,
        };
        assert_eq!(shade(r, 3, 64), [0, 0, 0]);
    }

    #[test]
    fn slow_convergence_is_darker() {
        let fast = shade(PixelResult { iterations: 1, root: 0 }, 3, 64);
        let slow = shade(PixelResult { iterations: 40, root: 0 }, 3, 64);
        assert!(fast[0] > slow[0]);
        assert_eq!(shade(PixelResult { iterations: 0, root: 0 }, 3, 64), [255, 0, 0]);
    }
}
