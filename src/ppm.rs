// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a rendered grid as a binary PPM (P6) image, top row first.
//! The header is always `P6\n<width> <height>\n255\n`.

use image::RgbImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use colour::shade;
use error::{NewtonError, Result};
use scheduler::RenderBuffers;
use viewport::Viewport;

/// Colours every pixel of `buffers` into packed RGB bytes.
pub fn pixelate(buffers: &RenderBuffers, root_count: usize, max_iters: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(buffers.len() * 3);
    for offset in 0..buffers.len() {
        pixels.extend_from_slice(&shade(buffers.get(offset), root_count, max_iters));
    }
    pixels
}

/// Packs `buffers` into an RGB image the size of `viewport`.
pub fn to_image(
    buffers: &RenderBuffers,
    viewport: &Viewport,
    root_count: usize,
    max_iters: usize,
) -> Result<RgbImage> {
    let pixels = pixelate(buffers, root_count, max_iters);
    RgbImage::from_raw(viewport.width as u32, viewport.height as u32, pixels).ok_or_else(|| {
        NewtonError::InvalidViewport(format!(
            "{} results do not fill a {}x{} image",
            buffers.len(),
            viewport.width,
            viewport.height
        ))
    })
}

/// Encodes `buffers` and writes them to `path`.  Any failure to create
/// or write the file is returned.
pub fn write_ppm<P: AsRef<Path>>(
    path: P,
    buffers: &RenderBuffers,
    viewport: &Viewport,
    root_count: usize,
    max_iters: usize,
) -> Result<()> {
    let image = to_image(buffers, viewport, root_count, max_iters)?;
    let mut output = BufWriter::new(File::create(path.as_ref())?);
    write!(output, "P6\n{} {}\n255\n", image.width(), image.height())?;
    output.write_all(&image.into_raw())?;
    output.flush()?;
    Ok(())
}
