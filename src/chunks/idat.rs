use super::ParseableChunk;
use nom::IResult;

pub(crate) const HEADER: &[u8; 4] = b"IDAT";

/// Compressed image data. Borrowed both when parsing and when writing.
#[derive(Debug)]
pub struct IDATChunk<'a> {
    pub data: &'a [u8],
}
impl<'a> ParseableChunk<'a> for IDATChunk<'a> {
    type Payload = &'a [u8];

    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((&chunk_data[0..0], IDATChunk { data: chunk_data }))
    }

    fn payload(&self) -> Self::Payload {
        self.data
    }
}
