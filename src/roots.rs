// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The roots of z^n - 1: the n-th roots of unity, spaced evenly on
//! the unit circle.  Their indices double as the colour categories of
//! the final image, so the ordering must never change during a run.

use num::Complex;
use std::f64::consts::PI;
use std::slice::Iter;

use error::{NewtonError, Result};

/// How close an iterate must come to a root before we call it
/// converged.  This is not checked against the spacing of the roots,
/// so for very large root counts neighbouring roots can both fall
/// inside it; the lowest index wins.
pub const TOLERANCE: f64 = 1e-6;

/// The ordered set of roots of unity for a fixed degree.
#[derive(Clone, Debug, PartialEq)]
pub struct RootSet {
    roots: Vec<Complex<f64>>,
}

impl RootSet {
    /// Builds the `n` roots of unity, root k at angle 2πk/n.
    pub fn new(n: usize) -> Result<RootSet> {
        if n == 0 {
            return Err(NewtonError::InvalidArgument(
                "the number of roots must be positive".to_string(),
            ));
        }
        if n > u32::MAX as usize {
            return Err(NewtonError::InvalidArgument(format!(
                "at most {} roots are supported",
                u32::MAX
            )));
        }
        let roots = (0..n)
            .map(|k| {
                let angle = 2.0 * PI * (k as f64) / (n as f64);
                Complex::new(angle.cos(), angle.sin())
            })
            .collect();
        Ok(RootSet { roots })
    }

    /// Number of roots, which is also the degree of the polynomial and
    /// the non-convergence sentinel.
    pub fn count(&self) -> usize {
        self.roots.len()
    }

    /// The root at index `k`.  Panics if `k` is out of range.
    pub fn at(&self, k: usize) -> Complex<f64> {
        self.roots[k]
    }

    /// Iterates the roots in index order.
    pub fn iter(&self) -> Iter<Complex<f64>> {
        self.roots.iter()
    }

    /// True when `sample` lies strictly within `tolerance` of root `k`.
    #[inline]
    pub fn matches(&self, sample: Complex<f64>, k: usize, tolerance: f64) -> bool {
        (sample - self.roots[k]).norm() < tolerance
    }
}
