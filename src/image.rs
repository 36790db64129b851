use crate::{
    error::{EncodeError, EncodingFailure, Result},
    pixel::Rgb,
};

/// Bytes per pixel for 8-bit truecolor.
pub(crate) const BYTES_PER_PIXEL: usize = 3;

/// Largest width or height a PNG header may carry.
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Validated image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: u32,
    height: u32,
}
impl Dimensions {
    /// Rejects non-positive sizes, sizes above [`MAX_DIMENSION`], and sizes whose
    /// scanline buffer would exceed `isize::MAX` bytes, the most a `Vec` can hold.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        let invalid = || EncodeError::InvalidDimensions { width, height };
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        if w == 0 || h == 0 || w > MAX_DIMENSION || h > MAX_DIMENSION {
            return Err(invalid());
        }
        let dims = Self {
            width: w,
            height: h,
        };
        dims.checked_raw_len().ok_or_else(invalid)?;
        Ok(dims)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn checked_raw_len(&self) -> Option<usize> {
        let stride = (self.width as usize)
            .checked_mul(BYTES_PER_PIXEL)?
            .checked_add(1)?;
        stride
            .checked_mul(self.height as usize)
            .filter(|&len| len <= isize::MAX as usize)
    }

    /// Bytes in one pixel row, without the filter byte.
    pub(crate) fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// `height * (1 + width * 3)`.
    pub(crate) fn raw_len(&self) -> usize {
        (self.row_len() + 1) * self.height as usize
    }

    /// `height * width * 3`.
    pub fn pixel_len(&self) -> usize {
        self.row_len() * self.height as usize
    }
}

/// Where pixel values come from.
#[derive(Debug, Clone, Copy)]
pub enum PixelSource<'a> {
    /// Every pixel has the same colour.
    Solid(Rgb),
    /// Row-major RGB bytes, top row first.
    Buffer(&'a [u8]),
}
impl PixelSource<'_> {
    pub(crate) fn check(&self, dims: &Dimensions) -> Result<()> {
        match self {
            Self::Solid(_) => Ok(()),
            Self::Buffer(buf) if buf.len() == dims.pixel_len() => Ok(()),
            Self::Buffer(buf) => Err(EncodingFailure::BufferSizeMismatch {
                expected: dims.pixel_len(),
                actual: buf.len(),
            }
            .into()),
        }
    }
}

impl From<Rgb> for PixelSource<'_> {
    fn from(color: Rgb) -> Self {
        Self::Solid(color)
    }
}

impl<'a> From<&'a [u8]> for PixelSource<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::Buffer(buf)
    }
}
