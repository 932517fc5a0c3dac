// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error taxonomy shared by every stage of a render run.  Nothing here
//! is retried: a failing run is reported and the program exits.

use failure::Fail;
use std::io;

/// Everything the renderer can fail with.
#[derive(Debug, Fail)]
pub enum NewtonError {
    /// A numeric argument outside its domain, such as a root count of zero.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// The pixel grid or the complex window cannot be mapped.
    #[fail(display = "invalid viewport: {}", _0)]
    InvalidViewport(String),

    /// An environment override could not be parsed.
    #[fail(display = "invalid setting {}: {:?}", name, value)]
    InvalidSetting {
        /// Name of the environment variable.
        name: String,
        /// The raw value found in the environment.
        value: String,
    },

    /// The result buffers for the pixel grid could not be allocated.
    #[fail(display = "could not allocate result buffers for {} pixels", pixels)]
    Allocation {
        /// Number of pixels requested.
        pixels: usize,
    },

    /// A render thread panicked before finishing its share of the grid.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// Reading or writing an image failed.
    #[fail(display = "i/o error")]
    Io(#[cause] io::Error),
}

impl From<io::Error> for NewtonError {
    fn from(err: io::Error) -> NewtonError {
        NewtonError::Io(err)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = ::std::result::Result<T, NewtonError>;

/// The error followed by each of its causes, joined with `": "`.
pub fn cause_chain(err: &NewtonError) -> String {
    (err as &dyn Fail).iter_chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<String>>()
        .join(": ")
}
