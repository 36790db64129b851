pub mod assets;
pub mod chunks;
mod crc;
pub mod decoder;
mod encoder;
mod error;
mod image;
mod image_data;
mod pixel;
mod scanlines;

pub use crc::calculate_crc;
pub use decoder::{decode, DecodedImage};
pub use encoder::{encode, encode_solid, PngEncoder};
pub use error::{EncodeError, EncodingFailure, Result};
pub use image::{Dimensions, PixelSource, MAX_DIMENSION};
pub use pixel::Rgb;
