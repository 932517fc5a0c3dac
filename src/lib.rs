#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Newton fractal renderer
//!
//! Newton's method, applied to z^n - 1 from every point of a window on
//! the complex plane, eventually lands on one of the n roots of unity.
//! Which root a point lands on, and how quickly, is smooth almost
//! everywhere but breaks into fractal filigree where the basins of
//! attraction of different roots meet.  Colour each point by its root,
//! and shade it by how many steps it took, and that filigree is the
//! Newton fractal.
//!
//! Every pixel is independent of every other, which makes the image a
//! convenient yardstick for parallel execution.  The crate renders the
//! same image serially, with one thread per band of rows, and with a
//! pool of threads pulling small batches of rows from a queue, checks
//! that all three agree bit for bit, and times them.

extern crate crossbeam;
extern crate image;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod bench;
pub mod colour;
pub mod error;
pub mod kernel;
pub mod ppm;
pub mod roots;
pub mod scheduler;
pub mod settings;
pub mod viewport;

pub use error::{NewtonError, Result};
pub use kernel::PixelResult;
pub use roots::RootSet;
pub use scheduler::{render, RenderBuffers, Strategy};
pub use settings::Settings;
pub use viewport::Viewport;
