use anyhow::{anyhow, ensure};

use crate::{
    error::{EncodingFailure, Result},
    image::{Dimensions, PixelSource},
};

/// Filter type tag written before every scanline. Only `None` is emitted.
pub(crate) const FILTER_NONE: u8 = 0;

/// Lays out `height` rows of `[filter byte, R, G, B, R, G, B, ...]`.
///
/// The source must already have been checked against `dims`. A buffer that
/// cannot be allocated is an [`EncodingFailure::OutOfMemory`].
pub(crate) fn build_raw(dims: &Dimensions, source: &PixelSource<'_>) -> Result<Vec<u8>> {
    let row_len = dims.row_len();
    let mut raw = Vec::new();
    raw.try_reserve_exact(dims.raw_len())
        .map_err(|_| EncodingFailure::OutOfMemory {
            requested: dims.raw_len(),
        })?;
    match source {
        PixelSource::Solid(color) => {
            raw.push(FILTER_NONE);
            for _ in 0..dims.width() {
                raw.extend_from_slice(&color.to_bytes());
            }
            for _ in 1..dims.height() {
                raw.extend_from_within(..row_len + 1);
            }
        }
        PixelSource::Buffer(pixels) => {
            for row in pixels.chunks_exact(row_len) {
                raw.push(FILTER_NONE);
                raw.extend_from_slice(row);
            }
        }
    }
    debug_assert_eq!(raw.len(), dims.raw_len());
    Ok(raw)
}

/// Inverse of [`build_raw`]: drops the per-row filter byte.
pub(crate) fn strip_filter_bytes(raw: &[u8], dims: &Dimensions) -> anyhow::Result<Vec<u8>> {
    ensure!(
        raw.len() == dims.raw_len(),
        "image data is {} bytes, expected {} for {}x{}",
        raw.len(),
        dims.raw_len(),
        dims.width(),
        dims.height()
    );
    let mut pixels = Vec::with_capacity(dims.pixel_len());
    for (row, scanline) in raw.chunks_exact(dims.row_len() + 1).enumerate() {
        match scanline[0] {
            FILTER_NONE => pixels.extend_from_slice(&scanline[1..]),
            i => return Err(anyhow!("We don't support filter type {i} (row {row})")),
        }
    }
    Ok(pixels)
}
