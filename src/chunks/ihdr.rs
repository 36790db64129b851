use nom::{
    combinator::{all_consuming, map_res},
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::ParseableChunk;
use crate::image::Dimensions;

pub(crate) const HEADER: &[u8; 4] = b"IHDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: Interlacing,
}
impl IHDRChunk {
    /// 8-bit truecolor, deflate, filter method 0, no interlacing.
    pub fn truecolor(dims: &Dimensions) -> Self {
        Self {
            width: dims.width(),
            height: dims.height(),
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            compression_method: 0,
            filter_method: 0,
            interlace_method: Interlacing::None,
        }
    }
}
impl<'a> ParseableChunk<'a> for IHDRChunk {
    type Payload = [u8; 13];

    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, (width, height, bit_depth, color_type)) = tuple((
            be_u32,
            be_u32,
            u8,
            map_res(u8, ColorType::try_from),
        ))(chunk_data)?;
        let (rest, (compression_method, filter_method, interlace_method)) = all_consuming(
            tuple((u8, u8, map_res(u8, Interlacing::try_from))),
        )(rest)?;
        Ok((
            rest,
            IHDRChunk {
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            },
        ))
    }

    fn payload(&self) -> Self::Payload {
        let mut bytes = [0; 13];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8] = self.bit_depth;
        bytes[9] = self.color_type as u8;
        bytes[10] = self.compression_method;
        bytes[11] = self.filter_method;
        bytes[12] = self.interlace_method as u8;
        bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(anyhow::anyhow!("{i} is not a PNG colour type")),
        }
    }
}
impl ColorType {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlacing {
    None = 0,
    Adam7 = 1,
}
impl TryFrom<u8> for Interlacing {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            i => Err(anyhow::anyhow!("{i} is not a PNG interlace method")),
        }
    }
}
