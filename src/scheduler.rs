// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives the Newton kernel over every pixel of a viewport.
//!
//! There is exactly one way to compute a pixel, and exactly one way to
//! compute a run of rows: `Job::fill_band`.  What varies between
//! execution strategies is only how the output buffers are cut into
//! bands and which thread fills which band.  That policy lives behind
//! the `Partitioner` trait.  Bands are carved out of the buffers with
//! `chunks_mut` or `split_at_mut`, so no two execution units can ever see the same pixel,
//! and every strategy produces the same bytes as the serial one.

use crossbeam;
use crossbeam::channel;
use std::fmt;
use std::mem;

use error::{NewtonError, Result};
use kernel::{iterate, PixelResult};
use roots::RootSet;
use viewport::{Pixel, Viewport};

/// The two flat, row-major result buffers of one render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderBuffers {
    /// Step at which each pixel converged.
    pub iterations: Vec<usize>,
    /// Root index each pixel converged to, the root count if none.
    pub roots: Vec<usize>,
}

impl RenderBuffers {
    /// Allocates zeroed buffers for `pixels` results, reporting failure
    /// instead of aborting the process.
    pub fn allocate(pixels: usize) -> Result<RenderBuffers> {
        let mut iterations: Vec<usize> = Vec::new();
        let mut roots: Vec<usize> = Vec::new();
        iterations
            .try_reserve_exact(pixels)
            .and_then(|_| roots.try_reserve_exact(pixels))
            .map_err(|_| NewtonError::Allocation { pixels })?;
        iterations.resize(pixels, 0);
        roots.resize(pixels, 0);
        Ok(RenderBuffers { iterations, roots })
    }

    /// Number of pixels held.
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    /// True for a zero-pixel buffer pair.
    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// The result stored at a flat offset.
    pub fn get(&self, offset: usize) -> PixelResult {
        PixelResult {
            iterations: self.iterations[offset],
            root: self.roots[offset],
        }
    }

    /// Splits both buffers into bands of `rows` whole rows each.  The
    /// last band may be shorter.
    fn bands(&mut self, width: usize, rows: usize) -> Vec<Band> {
        let size = width * rows.max(1);
        self.iterations
            .chunks_mut(size)
            .zip(self.roots.chunks_mut(size))
            .enumerate()
            .map(|(i, (iterations, roots))| Band {
                first_row: i * rows.max(1),
                iterations,
                roots,
            })
            .collect()
    }

    /// Splits both buffers into consecutive bands holding `rows[i]`
    /// whole rows each.  The counts must add up to the grid height.
    fn carve(&mut self, width: usize, rows: &[usize]) -> Vec<Band> {
        let mut bands = Vec::with_capacity(rows.len());
        let mut iterations = &mut self.iterations[..];
        let mut roots = &mut self.roots[..];
        let mut first_row = 0;
        for &count in rows {
            let (band_iterations, rest_iterations) =
                mem::take(&mut iterations).split_at_mut(count * width);
            let (band_roots, rest_roots) = mem::take(&mut roots).split_at_mut(count * width);
            bands.push(Band {
                first_row,
                iterations: band_iterations,
                roots: band_roots,
            });
            iterations = rest_iterations;
            roots = rest_roots;
            first_row += count;
        }
        bands
    }
}

/// Row counts for splitting `height` rows over `lanes` lanes: the first
/// `height % lanes` lanes take one extra row, and lanes that would get
/// no rows are dropped.
fn lane_rows(height: usize, lanes: usize) -> Vec<usize> {
    let lanes = lanes.max(1);
    let (base, extra) = (height / lanes, height % lanes);
    (0..lanes)
        .map(|lane| if lane < extra { base + 1 } else { base })
        .filter(|&rows| rows > 0)
        .collect()
}

/// A contiguous run of whole rows together with the matching slices of
/// both output buffers.
pub struct Band<'a> {
    first_row: usize,
    iterations: &'a mut [usize],
    roots: &'a mut [usize],
}

/// Everything a band needs to compute its pixels.  Shared read-only by
/// all execution units.
#[derive(Copy, Clone, Debug)]
pub struct Job<'a> {
    /// The pixel grid and its complex window.
    pub viewport: &'a Viewport,
    /// The roots every pixel is classified against.
    pub roots: &'a RootSet,
    /// Newton steps allowed per pixel.
    pub max_iters: usize,
}

impl<'a> Job<'a> {
    /// Computes every pixel of `band` in row-major order.
    pub fn fill_band(&self, band: Band) {
        let width = self.viewport.width;
        let rows = band.iterations.len() / width;
        let cells = band.iterations.iter_mut().zip(band.roots.iter_mut());
        let pixels = iproduct!(band.first_row..band.first_row + rows, 0..width);
        for ((row, column), (iterations, root)) in pixels.zip(cells) {
            let point = self.viewport.pixel_to_point(&Pixel(column, row));
            let result = iterate(point, self.roots, self.max_iters);
            *iterations = result.iterations;
            *root = result.root;
        }
        trace!("filled rows {}..{}", band.first_row, band.first_row + rows);
    }
}

/// Decides how the output buffers are cut into bands and which
/// execution unit fills each one.
pub trait Partitioner {
    /// Fills every pixel of `buffers` using `job`.
    fn run(&self, job: &Job, buffers: &mut RenderBuffers) -> Result<()>;
}

/// The whole grid as a single band on the calling thread.
#[derive(Copy, Clone, Debug)]
pub struct SerialPartitioner;

impl Partitioner for SerialPartitioner {
    fn run(&self, job: &Job, buffers: &mut RenderBuffers) -> Result<()> {
        for band in buffers.bands(job.viewport.width, job.viewport.height) {
            job.fill_band(band);
        }
        Ok(())
    }
}

/// One contiguous band per lane, one scoped thread per band.
#[derive(Copy, Clone, Debug)]
pub struct FlatPartitioner {
    /// Number of lanes the rows are split across.
    pub lanes: usize,
}

impl Partitioner for FlatPartitioner {
    fn run(&self, job: &Job, buffers: &mut RenderBuffers) -> Result<()> {
        let rows = lane_rows(job.viewport.height, self.lanes);
        let bands = buffers.carve(job.viewport.width, &rows);
        debug!("flat partition: {} bands of {:?} rows", bands.len(), rows);
        crossbeam::scope(|spawner| {
            for band in bands {
                spawner.spawn(move |_| job.fill_band(band));
            }
        })
        .map_err(|_| NewtonError::WorkerPanicked)
    }
}

/// Many small bands (tasks) on a queue, drained by a fixed pool of
/// scoped worker threads.
#[derive(Copy, Clone, Debug)]
pub struct BatchedPartitioner {
    /// Number of worker threads in the pool.
    pub workers: usize,
    /// Rows in each task.
    pub rows_per_task: usize,
}

impl Partitioner for BatchedPartitioner {
    fn run(&self, job: &Job, buffers: &mut RenderBuffers) -> Result<()> {
        let bands = buffers.bands(job.viewport.width, self.rows_per_task.max(1));
        let workers = self.workers.max(1).min(bands.len());
        debug!(
            "batched partition: {} tasks of {} rows over {} workers",
            bands.len(),
            self.rows_per_task.max(1),
            workers
        );

        let (tasks, queue) = channel::unbounded();
        for band in bands {
            // The receiver is alive in this frame, so this cannot fail.
            tasks.send(band).map_err(|_| NewtonError::WorkerPanicked)?;
        }
        drop(tasks);

        let queue = &queue;
        crossbeam::scope(|spawner| {
            for _ in 0..workers {
                spawner.spawn(move |_| {
                    for band in queue.iter() {
                        job.fill_band(band);
                    }
                });
            }
        })
        .map_err(|_| NewtonError::WorkerPanicked)
    }
}

/// The execution strategies the renderer can be asked to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Single-threaded row-major traversal.
    Serial,
    /// The rows split evenly across `lanes` threads.
    DataParallelFlat {
        /// Number of threads.
        lanes: usize,
    },
    /// The rows cut into tasks of `rows_per_task` and pulled by a pool
    /// of `workers` threads.
    DataParallelBatched {
        /// Number of pool threads.
        workers: usize,
        /// Rows per task.
        rows_per_task: usize,
    },
}

impl Strategy {
    /// The partitioner implementing this strategy.
    pub fn partitioner(&self) -> Box<dyn Partitioner> {
        match *self {
            Strategy::Serial => Box::new(SerialPartitioner),
            Strategy::DataParallelFlat { lanes } => Box::new(FlatPartitioner { lanes }),
            Strategy::DataParallelBatched {
                workers,
                rows_per_task,
            } => Box::new(BatchedPartitioner {
                workers,
                rows_per_task,
            }),
        }
    }

    /// Short name used in reports and file names.
    pub fn label(&self) -> &'static str {
        match *self {
            Strategy::Serial => "serial",
            Strategy::DataParallelFlat { .. } => "flat",
            Strategy::DataParallelBatched { .. } => "tasks",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Strategy::Serial => write!(f, "serial"),
            Strategy::DataParallelFlat { lanes } => write!(f, "flat x{}", lanes),
            Strategy::DataParallelBatched {
                workers,
                rows_per_task,
            } => write!(f, "tasks x{} ({} rows/task)", workers, rows_per_task),
        }
    }
}

/// Renders the whole viewport with an explicit partitioner.
pub fn render_with(
    viewport: &Viewport,
    max_iters: usize,
    roots: &RootSet,
    partitioner: &dyn Partitioner,
) -> Result<RenderBuffers> {
    let mut buffers = RenderBuffers::allocate(viewport.len())?;
    let job = Job {
        viewport,
        roots,
        max_iters,
    };
    partitioner.run(&job, &mut buffers)?;
    Ok(buffers)
}

/// Renders the whole viewport under `strategy`.  The buffers are
/// identical whatever the strategy.
pub fn render(
    viewport: &Viewport,
    max_iters: usize,
    roots: &RootSet,
    strategy: Strategy,
) -> Result<RenderBuffers> {
    debug!(
        "rendering {}x{} with {} roots, {} iterations, {}",
        viewport.width,
        viewport.height,
        roots.count(),
        max_iters,
        strategy
    );
    render_with(viewport, max_iters, roots, &*strategy.partitioner())
}
