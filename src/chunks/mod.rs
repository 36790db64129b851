//! Chunk framing: `[length][type][data][crc]`, both directions.

use nom::{
    bytes::complete::{tag, take},
    combinator::{map_opt, map_res},
    multi::length_data,
    number::complete::be_u32,
    sequence::{terminated, tuple},
    IResult,
};

use crate::{
    crc::{calculate_crc, Crc32},
    error::{EncodingFailure, Result},
};

pub mod idat;
pub mod iend;
pub mod ihdr;

pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Length, type and CRC fields around every payload.
const FRAMING_LEN: usize = 12;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}
impl Chunk<'_> {
    pub fn chunk_type(&self) -> &[u8; 4] {
        match self {
            Chunk::IHDR(_) => ihdr::HEADER,
            Chunk::IDAT(_) => idat::HEADER,
            Chunk::IEND => iend::HEADER,
            Chunk::Unknown(raw) => raw.chunk_type,
        }
    }
}

#[derive(Debug)]
pub struct RawChunk<'a> {
    pub chunk_type: &'a [u8; 4],
    pub data: &'a [u8],
}

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}

/// Iterates over CRC-checked chunks, stopping after `IEND` or the first error.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}
impl ChunkIter<'_> {
    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.source.len()
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.map_input(|i| i.len()).into()))
            }
        }
    }
}

pub(crate) fn parse_chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (rest, (header, chunk_data)) = valid_chunk(input)?;
    match header {
        ihdr::HEADER => Ok((
            rest,
            Chunk::IHDR(ihdr::IHDRChunk::from_bytes(chunk_data)?.1),
        )),
        idat::HEADER => Ok((
            rest,
            Chunk::IDAT(idat::IDATChunk::from_bytes(chunk_data)?.1),
        )),
        iend::HEADER => {
            iend::IENDChunk::from_bytes(chunk_data)?;
            Ok((rest, Chunk::IEND))
        }
        _ => Ok((
            rest,
            Chunk::Unknown(RawChunk {
                chunk_type: header,
                data: chunk_data,
            }),
        )),
    }
}

fn valid_chunk<'a, Error>(input: &'a [u8]) -> IResult<&'a [u8], (&'a [u8; 4], &'a [u8]), Error>
where
    Error: nom::error::ParseError<&'a [u8]>
        + nom::error::FromExternalError<&'a [u8], std::array::TryFromSliceError>,
{
    let (header_length, crc_length) = (4u32, 4u32);
    let (input, chunk_data) = length_data(map_opt(be_u32, |v| {
        v.checked_add(header_length + crc_length)
    }))(input)?;
    let crc = calculate_crc(&chunk_data[..chunk_data.len() - crc_length as usize]).to_be_bytes();
    let (_, data) = tuple((
        map_res(take(header_length), <&[u8; 4]>::try_from),
        terminated(
            take(chunk_data.len() - (header_length + crc_length) as usize),
            tag(&crc[..]),
        ),
    ))(chunk_data)?;
    Ok((input, data))
}

/// Serialises one chunk onto `out`.
pub(crate) fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len()).map_err(|_| EncodingFailure::ChunkTooLarge {
        kind: String::from_utf8_lossy(chunk_type).into_owned(),
        len: data.len(),
    })?;
    let mut crc = Crc32::new();
    crc.update(chunk_type);
    crc.update(data);

    out.reserve(FRAMING_LEN + data.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
    Ok(())
}

pub trait ParseableChunk<'a>: Sized {
    type Payload: AsRef<[u8]>;
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn payload(&self) -> Self::Payload;

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_chunk(out, Self::HEADER, self.payload().as_ref())
    }
}
