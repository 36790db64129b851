//! Reader for the files [`encode`](crate::encode) produces, used to verify output.

use std::marker::PhantomData;

use anyhow::{anyhow, bail, ensure, Context};
use log::debug;

use crate::{
    chunks::{
        ihdr::{ColorType, IHDRChunk, Interlacing},
        iter_chunks, parse_signature, Chunk, ChunkIter,
    },
    image::{Dimensions, BYTES_PER_PIXEL},
    image_data::decompress_data,
    pixel::Rgb,
    scanlines::strip_filter_bytes,
};

pub struct PngDecoder<'a, State>(ChunkIter<'a>, PhantomData<State>);

pub struct Start;
pub struct Header;

impl<'a> PngDecoder<'a, Start> {
    pub fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        let (rest, _) = parse_signature(data)
            .map_err(|_| anyhow!("input doesn't start with expected signature"))?;
        Ok(Self(iter_chunks(rest), PhantomData))
    }

    pub fn parse_ihdr(mut self) -> anyhow::Result<(PngDecoder<'a, Header>, IHDRChunk)> {
        match self.0.next() {
            Some(Ok(Chunk::IHDR(ihdr))) => Ok((PngDecoder(self.0, PhantomData), ihdr)),
            Some(Ok(other)) => bail!(
                "expected IHDR first, found {}",
                String::from_utf8_lossy(other.chunk_type())
            ),
            Some(Err(e)) => Err(e.context("malformed IHDR chunk")),
            None => bail!("no chunks after signature"),
        }
    }
}

impl<'a> PngDecoder<'a, Header> {
    /// Concatenates the consecutive `IDAT` payloads and consumes up to `IEND`.
    /// Bytes after `IEND` are ignored.
    pub fn read_image_data(self) -> anyhow::Result<Vec<u8>> {
        let mut data = vec![];
        let mut idat_done = false;
        let mut chunks = self.0;
        for chunk in chunks.by_ref() {
            match chunk? {
                Chunk::IDAT(idat) => {
                    ensure!(!idat_done, "IDAT chunks are not consecutive");
                    data.extend_from_slice(idat.data);
                }
                Chunk::IEND => {
                    ensure!(!data.is_empty(), "Couldn't find an IDAT");
                    if chunks.remaining() > 0 {
                        debug!("ignoring {} bytes after IEND", chunks.remaining());
                    }
                    return Ok(data);
                }
                Chunk::IHDR(_) => bail!("duplicate IHDR chunk"),
                Chunk::Unknown(raw) => {
                    idat_done |= !data.is_empty();
                    debug!(
                        "skipping {} chunk ({} bytes)",
                        String::from_utf8_lossy(raw.chunk_type),
                        raw.data.len()
                    );
                }
            }
        }
        bail!("missing IEND chunk")
    }
}

#[derive(Debug)]
pub struct DecodedImage {
    pub header: IHDRChunk,
    /// Row-major RGB bytes, top row first.
    pub pixels: Vec<u8>,
}
impl DecodedImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.header.width || y >= self.header.height {
            return None;
        }
        let offset = (y as usize * self.header.width as usize + x as usize) * BYTES_PER_PIXEL;
        let bytes = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        Some(Rgb::new(bytes[0], bytes[1], bytes[2]))
    }

    pub fn iter_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

fn check_supported(header: &IHDRChunk) -> anyhow::Result<Dimensions> {
    ensure!(header.bit_depth == 8, "unsupported bit depth {}", header.bit_depth);
    ensure!(
        header.color_type == ColorType::Truecolor,
        "unsupported colour type {:?}",
        header.color_type
    );
    ensure!(header.compression_method == 0, "unknown compression method");
    ensure!(header.filter_method == 0, "unknown filter method");
    ensure!(
        header.interlace_method == Interlacing::None,
        "interlaced images are not supported"
    );
    Ok(Dimensions::new(
        header.width.into(),
        header.height.into(),
    )?)
}

pub fn decode(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let decoder = PngDecoder::new(bytes)?;
    let (decoder, header) = decoder.parse_ihdr()?;
    let dims = check_supported(&header)?;
    let compressed = decoder.read_image_data()?;
    let raw = decompress_data(&compressed)?;
    let pixels = strip_filter_bytes(&raw, &dims).context("Failed to reconstruct scanlines.")?;
    Ok(DecodedImage { header, pixels })
}
