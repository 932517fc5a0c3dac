// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render configuration.  The picture itself (grid, window, iteration
//! bound) is fixed; only how much hardware is thrown at it can be
//! changed, through the environment:
//!
//! * `NEWTON_THREADS`: threads for both parallel strategies.
//! * `NEWTON_ROWS_PER_TASK`: rows in each task of the batched strategy.

use num::Complex;
use num_cpus;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use error::{NewtonError, Result};
use scheduler::Strategy;
use viewport::Viewport;

/// Environment variable overriding the thread count.
pub const THREADS_VAR: &str = "NEWTON_THREADS";
/// Environment variable overriding the rows per batched task.
pub const ROWS_PER_TASK_VAR: &str = "NEWTON_ROWS_PER_TASK";

/// Everything a benchmark run needs besides the root count.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Columns in the image.
    pub width: usize,
    /// Rows in the image.
    pub height: usize,
    /// Newton steps allowed per pixel.
    pub max_iters: usize,
    /// Lower left corner of the complex window.
    pub leftlower: Complex<f64>,
    /// Upper right corner of the complex window.
    pub rightupper: Complex<f64>,
    /// Timed renders per strategy.
    pub repetitions: usize,
    /// Threads for the parallel strategies.
    pub threads: usize,
    /// Rows in each batched task.
    pub rows_per_task: usize,
    /// Where the images are written.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            width: 1024,
            height: 1024,
            max_iters: 64,
            leftlower: Complex::new(-2.5, -2.5),
            rightupper: Complex::new(2.5, 2.5),
            repetitions: 3,
            threads: num_cpus::get(),
            rows_per_task: 16,
            output_dir: PathBuf::from("."),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) => match T::from_str(raw.trim()) {
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(NewtonError::InvalidSetting {
                name: name.to_string(),
                value: raw,
            }),
        },
    }
}

fn positive(name: &str, value: usize) -> Result<usize> {
    if value == 0 {
        Err(NewtonError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        })
    } else {
        Ok(value)
    }
}

impl Settings {
    /// The defaults, with any environment overrides applied.
    pub fn from_env() -> Result<Settings> {
        Settings::default().with_overrides(
            env::var(THREADS_VAR).ok(),
            env::var(ROWS_PER_TASK_VAR).ok(),
        )
    }

    /// Applies raw override values as they would come from the
    /// environment.
    pub fn with_overrides(
        mut self,
        threads: Option<String>,
        rows_per_task: Option<String>,
    ) -> Result<Settings> {
        if let Some(threads) = parse_var(THREADS_VAR, threads)? {
            self.threads = positive(THREADS_VAR, threads)?;
        }
        if let Some(rows) = parse_var(ROWS_PER_TASK_VAR, rows_per_task)? {
            self.rows_per_task = positive(ROWS_PER_TASK_VAR, rows)?;
        }
        Ok(self)
    }

    /// The validated pixel-to-plane mapping.
    pub fn viewport(&self) -> Result<Viewport> {
        Viewport::new(self.width, self.height, self.leftlower, self.rightupper)
    }

    /// The three strategies, in the order they are benchmarked.
    pub fn strategies(&self) -> [Strategy; 3] {
        [
            Strategy::DataParallelFlat {
                lanes: self.threads,
            },
            Strategy::Serial,
            Strategy::DataParallelBatched {
                workers: self.threads,
                rows_per_task: self.rows_per_task,
            },
        ]
    }

    /// The image file written for `strategy`.
    pub fn output_path(&self, strategy: Strategy) -> PathBuf {
        let name = match strategy {
            Strategy::DataParallelFlat { .. } => "newton.ppm",
            Strategy::Serial => "newton_serial.ppm",
            Strategy::DataParallelBatched { .. } => "newton_tasks.ppm",
        };
        self.output_dir.join(name)
    }
}
