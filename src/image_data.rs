use anyhow::{anyhow, Context};
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

/// Highest zlib compression level.
const COMPRESSION_LEVEL: u8 = 9;

pub(crate) fn compress_data(raw: &[u8]) -> Vec<u8> {
    compress_to_vec_zlib(raw, COMPRESSION_LEVEL)
}

pub(crate) fn decompress_data(compressed_data: &[u8]) -> anyhow::Result<Vec<u8>> {
    decompress_to_vec_zlib(compressed_data)
        .map_err(|e| anyhow!("{:?}", e.status))
        .context("Failed to decompress image data.")
}

#[cfg(test)]
mod tests {
    use super::{compress_data, decompress_data};

    #[test]
    fn zlib_header_and_inflate() {
        let raw = [0, 26, 26, 46];
        let compressed = compress_data(&raw);
        // CMF: deflate with a 32K window.
        assert_eq!(compressed[0], 0x78);
        assert_eq!(u16::from_be_bytes([compressed[0], compressed[1]]) % 31, 0);
        assert_eq!(decompress_data(&compressed).unwrap(), raw);
    }

    #[test]
    fn solid_data_shrinks() {
        let raw = vec![7u8; 64 * 1024];
        assert!(compress_data(&raw).len() < 1024);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decompress_data(&[1, 2, 3, 4]).is_err());
    }
}
