//! CRC-32 as used by PNG chunk trailers (reflected, polynomial `0xEDB88320`).

/// Lookup table, evaluated once at compile time and shared by every caller.
const CRC_TABLE: [u32; 256] = {
    let mut table = [0; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut i = 0;
        while i < 8 {
            if c & 1 != 0 {
                c = 0xedb88320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            i += 1;
        }
        table[n as usize] = c;
        n += 1;
    }
    table
};

/// Running checksum, so a chunk's type and data can be fed separately.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Crc32(u32);

impl Crc32 {
    pub(crate) const fn new() -> Self {
        Self(0xffffffff)
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        let mut crc = self.0;
        for &b in data {
            let index = (crc ^ b as u32) & 0xff;
            crc = CRC_TABLE[index as usize] ^ (crc >> 8);
        }
        self.0 = crc;
    }

    pub(crate) const fn finalize(self) -> u32 {
        self.0 ^ 0xffffffff
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

pub fn calculate_crc(data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(data);
    crc.finalize()
}
