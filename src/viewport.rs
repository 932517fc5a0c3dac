// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining its leftlower and rightupper corners.
use num::Complex;

use error::{NewtonError, Result};

/// Describes the column, row of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a width x height grid onto a window of the complex
/// plane.  Row 0 corresponds to the lower edge (`leftlower.im`), and the
/// first row written to the image is row 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Number of columns in the pixel grid.
    pub width: usize,
    /// Number of rows in the pixel grid.
    pub height: usize,
    /// Corner with the smallest real and imaginary parts.
    pub leftlower: Complex<f64>,
    /// Corner with the largest real and imaginary parts.
    pub rightupper: Complex<f64>,
    // The size of one pixel on the complex plane, horizontally and
    // vertically.
    step: (f64, f64),
}

impl Viewport {
    /// Builds a viewport from the grid size and the two corners of the
    /// complex window.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Viewport> {
        if width == 0 || height == 0 {
            return Err(NewtonError::InvalidViewport(format!(
                "the pixel grid {}x{} is empty",
                width, height
            )));
        }

        let corners = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(NewtonError::InvalidViewport(
                "the window corners must be finite".to_string(),
            ));
        }

        if rightupper.re <= leftlower.re {
            return Err(NewtonError::InvalidViewport(
                "the left lower corner is not to the left of the right upper corner".to_string(),
            ));
        }

        if rightupper.im <= leftlower.im {
            return Err(NewtonError::InvalidViewport(
                "the left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        let step = (
            (rightupper.re - leftlower.re) / (width as f64),
            (rightupper.im - leftlower.im) / (height as f64),
        );

        Ok(Viewport {
            width,
            height,
            leftlower,
            rightupper,
            step,
        })
    }

    /// The total number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// A validated viewport always has at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The linear offset of a pixel in a row-major buffer.
    #[inline]
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.width + pixel.0
    }

    /// Given a pixel on the integral plane, return the point of the
    /// complex plane it samples.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.leftlower.re + (pixel.0 as f64) * self.step.0,
            self.leftlower.im + (pixel.1 as f64) * self.step.1,
        )
    }
}
