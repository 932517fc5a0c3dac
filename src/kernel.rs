// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-point Newton iteration.  Given a starting point on the
//! complex plane, repeatedly apply
//!
//! ```text
//! z <- z - (z^n - 1) / (n z^(n-1))
//! ```
//!
//! and after every step check whether `z` has landed on one of the
//! roots of unity.  The index of that root and the step at which it
//! was reached are what the renderer colours.

use num::Complex;

use roots::{RootSet, TOLERANCE};

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelResult {
    /// The step (counting from zero) at which the point converged.
    pub iterations: usize,
    /// The index of the root reached, or the root count if none was.
    pub root: usize,
}

impl PixelResult {
    /// The result reported for a point that never settled on a root.
    /// The iteration count is reset to zero, not the budget.
    pub fn diverged(roots: &RootSet) -> PixelResult {
        PixelResult {
            iterations: 0,
            root: roots.count(),
        }
    }

    /// Whether this result carries the non-convergence sentinel.
    pub fn is_diverged(&self, roots: &RootSet) -> bool {
        self.root == roots.count()
    }
}

/// One Newton step for z^n - 1.  At z = 0 with n > 1 the derivative
/// vanishes and the result is NaN; that is left to propagate.  `n` is
/// at most `u32::MAX`, which `RootSet::new` guarantees.
#[inline]
pub fn newton_step(z: Complex<f64>, n: usize) -> Complex<f64> {
    let zn1 = z.powu((n - 1) as u32);
    let f = zn1 * z - 1.0;
    let df = zn1 * (n as f64);
    z - f / df
}

/// Iterates `start` for at most `max_iters` steps.  The first root, in
/// index order, within tolerance after a step wins.
pub fn iterate(start: Complex<f64>, roots: &RootSet, max_iters: usize) -> PixelResult {
    let n = roots.count();
    let mut z = start;
    for iter in 0..max_iters {
        z = newton_step(z, n);
        for k in 0..n {
            if roots.matches(z, k, TOLERANCE) {
                return PixelResult {
                    iterations: iter,
                    root: k,
                };
            }
        }
    }
    PixelResult::diverged(roots)
}
