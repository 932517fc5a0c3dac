// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Best-of-k timing of the render strategies.
//!
//! Each strategy is rendered several times and only the fastest run is
//! kept, which filters out runs that lost the CPU to something else.
//! The harness never touches the buffers beyond handing back the ones
//! from the final run.

use std::fmt;
use std::time::{Duration, Instant};

use error::{NewtonError, Result};
use scheduler::{render, Job, RenderBuffers, Strategy};

/// A running monotonic timer.  Consumed by `stop`.
#[derive(Debug)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Starts timing now.
    pub fn start() -> Stopwatch {
        Stopwatch {
            started: Instant::now(),
        }
    }

    /// Stops the timer and returns the elapsed time.
    pub fn stop(self) -> Duration {
        self.started.elapsed()
    }
}

/// Milliseconds, with sub-millisecond precision, for reporting.
pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

/// The timings of one strategy and the image it produced.
#[derive(Debug)]
pub struct Measurement {
    /// The strategy measured.
    pub strategy: Strategy,
    /// Every repetition, in the order they ran.
    pub runs: Vec<Duration>,
    /// The fastest repetition.
    pub best: Duration,
    /// The output of the last repetition.
    pub buffers: RenderBuffers,
}

/// Renders `job` under `strategy` `repetitions` times and keeps the
/// best time.
pub fn measure(job: &Job, strategy: Strategy, repetitions: usize) -> Result<Measurement> {
    if repetitions == 0 {
        return Err(NewtonError::InvalidArgument(
            "at least one repetition is needed".to_string(),
        ));
    }

    let (first, mut buffers) = timed_render(job, strategy, 0)?;
    let mut runs = Vec::with_capacity(repetitions);
    runs.push(first);
    for rep in 1..repetitions {
        let (elapsed, out) = timed_render(job, strategy, rep)?;
        runs.push(elapsed);
        buffers = out;
    }

    let best = runs.iter().cloned().min().unwrap_or(first);
    Ok(Measurement {
        strategy,
        runs,
        best,
        buffers,
    })
}

fn timed_render(job: &Job, strategy: Strategy, rep: usize) -> Result<(Duration, RenderBuffers)> {
    let watch = Stopwatch::start();
    let out = render(job.viewport, job.max_iters, job.roots, strategy)?;
    let elapsed = watch.stop();
    debug!("{} repetition {}: {:.3} ms", strategy, rep, millis(elapsed));
    Ok((elapsed, out))
}

/// How much faster `fast` ran than `slow`, best against best.
#[derive(Copy, Clone, Debug)]
pub struct Speedup {
    /// Label of the slower strategy.
    pub slow: &'static str,
    /// Label of the faster strategy.
    pub fast: &'static str,
    /// best(slow) / best(fast).
    pub factor: f64,
}

impl Speedup {
    /// Compares two measurements.
    pub fn between(slow: &Measurement, fast: &Measurement) -> Speedup {
        Speedup {
            slow: slow.strategy.label(),
            fast: fast.strategy.label(),
            factor: millis(slow.best) / millis(fast.best),
        }
    }
}

impl fmt::Display for Speedup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({:.2}x speedup from {} over {})",
            self.factor, self.fast, self.slow
        )
    }
}

/// The three pairwise ratios: serial against flat, serial against
/// tasks, and flat against tasks.
pub fn speedups(serial: &Measurement, flat: &Measurement, tasks: &Measurement) -> [Speedup; 3] {
    [
        Speedup::between(serial, flat),
        Speedup::between(serial, tasks),
        Speedup::between(flat, tasks),
    ]
}
