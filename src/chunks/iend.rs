use super::ParseableChunk;
use nom::{combinator::eof, IResult};

pub(crate) const HEADER: &[u8; 4] = b"IEND";

/// CRC of the empty `IEND` chunk; every PNG ends with it.
pub const IEND_CRC: u32 = 0xae426082;

#[derive(Debug)]
pub struct IENDChunk;
impl<'a> ParseableChunk<'a> for IENDChunk {
    type Payload = [u8; 0];

    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, _) = eof(chunk_data)?;
        Ok((rest, Self))
    }

    fn payload(&self) -> Self::Payload {
        []
    }
}
