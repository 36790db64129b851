//! Truecolor PNG writer: one `IHDR`, one `IDAT`, one `IEND`.

use log::{debug, trace};

use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ParseableChunk, SIGNATURE},
    error::Result,
    image::{Dimensions, PixelSource},
    image_data::compress_data,
    pixel::Rgb,
    scanlines::build_raw,
};

/// Encoder for a fixed image size. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder {
    dims: Dimensions,
}
impl PngEncoder {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        Ok(Self::with_dimensions(Dimensions::new(width, height)?))
    }

    pub fn with_dimensions(dims: Dimensions) -> Self {
        Self { dims }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn encode<'a>(&self, source: impl Into<PixelSource<'a>>) -> Result<Vec<u8>> {
        let source = source.into();
        source.check(&self.dims)?;

        let raw = build_raw(&self.dims, &source)?;
        let compressed = compress_data(&raw);
        debug!(
            "{}x{}: {} raw bytes deflated to {}",
            self.dims.width(),
            self.dims.height(),
            raw.len(),
            compressed.len()
        );
        drop(raw);

        let mut png = Vec::with_capacity(SIGNATURE.len() + compressed.len() + 3 * 12 + 13);
        png.extend_from_slice(&SIGNATURE);
        IHDRChunk::truecolor(&self.dims).write_to(&mut png)?;
        IDATChunk { data: &compressed }.write_to(&mut png)?;
        IENDChunk.write_to(&mut png)?;
        trace!("wrote {} byte PNG", png.len());
        Ok(png)
    }
}

/// Encodes a `width` x `height` truecolor PNG.
///
/// Fails with [`EncodeError::InvalidDimensions`](crate::EncodeError::InvalidDimensions)
/// before allocating anything when either side is non-positive or too large,
/// and with [`EncodeError::EncodingFailure`](crate::EncodeError::EncodingFailure)
/// when an explicit pixel buffer has the wrong length.
pub fn encode<'a>(width: i64, height: i64, source: impl Into<PixelSource<'a>>) -> Result<Vec<u8>> {
    PngEncoder::new(width, height)?.encode(source)
}

pub fn encode_solid(width: i64, height: i64, color: Rgb) -> Result<Vec<u8>> {
    encode(width, height, PixelSource::Solid(color))
}
