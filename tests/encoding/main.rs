use placeholder_png::{
    calculate_crc, chunks::SIGNATURE, decode, encode, encode_solid, EncodeError, Rgb,
    MAX_DIMENSION,
};

const BACKGROUND: Rgb = Rgb::new(26, 26, 46);

/// Splits a PNG into `(type, data, stored crc)` triples without using the crate's parser.
fn split_chunks(png: &[u8]) -> Vec<([u8; 4], &[u8], u32)> {
    let mut rest = &png[8..];
    let mut chunks = vec![];
    while !rest.is_empty() {
        let len = u32::from_be_bytes(rest[0..4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = rest[4..8].try_into().unwrap();
        let data = &rest[8..8 + len];
        let crc = u32::from_be_bytes(rest[8 + len..12 + len].try_into().unwrap());
        chunks.push((kind, data, crc));
        rest = &rest[12 + len..];
    }
    chunks
}

#[test]
fn starts_with_signature() {
    for (w, h) in [(1, 1), (3, 7), (48, 48)] {
        let png = encode_solid(w, h, BACKGROUND).unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        assert_eq!(&png[..8], &SIGNATURE);
    }
}

#[test]
fn emits_exactly_ihdr_idat_iend() {
    let png = encode_solid(5, 4, BACKGROUND).unwrap();
    let kinds: Vec<_> = split_chunks(&png).into_iter().map(|(k, _, _)| k).collect();
    assert_eq!(kinds, [*b"IHDR", *b"IDAT", *b"IEND"]);
}

#[test]
fn every_crc_matches() {
    let pixels: Vec<u8> = (0..=255u8).cycle().take(13 * 9 * 3).collect();
    let png = encode(13, 9, &pixels[..]).unwrap();
    for (kind, data, stored) in split_chunks(&png) {
        let mut covered = kind.to_vec();
        covered.extend_from_slice(data);
        assert_eq!(calculate_crc(&covered), stored, "{}", String::from_utf8_lossy(&kind));
    }
}

#[test]
fn iend_is_empty_with_fixed_crc() {
    let png = encode_solid(2, 2, BACKGROUND).unwrap();
    let (kind, data, crc) = *split_chunks(&png).last().unwrap();
    assert_eq!(&kind, b"IEND");
    assert!(data.is_empty());
    assert_eq!(crc, 0xAE426082);
}

#[test]
fn ihdr_fields() {
    let png = encode_solid(48, 48, BACKGROUND).unwrap();
    let (_, ihdr, _) = split_chunks(&png)[0];
    assert_eq!(ihdr.len(), 13);
    assert_eq!(&ihdr[0..4], &48u32.to_be_bytes());
    assert_eq!(&ihdr[4..8], &48u32.to_be_bytes());
    assert_eq!(&ihdr[8..], &[8, 2, 0, 0, 0]);

    insta::assert_debug_snapshot!(decode(&png).unwrap().header, @r###"
    IHDRChunk {
        width: 48,
        height: 48,
        bit_depth: 8,
        color_type: Truecolor,
        compression_method: 0,
        filter_method: 0,
        interlace_method: None,
    }
    "###);
}

#[test]
fn single_pixel() {
    let png = encode(1, 1, BACKGROUND).unwrap();
    let image = decode(&png).unwrap();
    assert_eq!((image.header.width, image.header.height), (1, 1));
    assert_eq!(image.pixels, [26, 26, 46]);
    assert_eq!(image.pixel(0, 0), Some(BACKGROUND));
}

#[test]
fn solid_fills_at_asset_sizes() {
    for size in [48, 1024] {
        let png = encode_solid(size, size, BACKGROUND).unwrap();
        let image = decode(&png).unwrap();
        assert_eq!(i64::from(image.header.width), size);
        assert_eq!(i64::from(image.header.height), size);
        assert_eq!(image.pixels.len(), (size * size * 3) as usize);
        assert!(image.iter_pixels().all(|p| p == BACKGROUND));
    }
}

#[test]
fn explicit_buffer_round_trips() {
    let (w, h) = (31usize, 17usize);
    let pixels: Vec<u8> = (0..w * h * 3).map(|i| (i * 7 % 251) as u8).collect();
    let png = encode(w as i64, h as i64, &pixels[..]).unwrap();
    assert_eq!(decode(&png).unwrap().pixels, pixels);
}

#[test]
fn invalid_dimensions() {
    for (w, h) in [(0, 10), (-1, 10), (10, 0), (1 << 31, 1)] {
        match encode_solid(w, h, BACKGROUND) {
            Err(EncodeError::InvalidDimensions { width, height }) => {
                assert_eq!((width, height), (w, h))
            }
            other => panic!("{w}x{h} gave {other:?}"),
        }
    }
}

#[test]
fn absurd_sizes_fail_instead_of_allocating() {
    let max = i64::from(MAX_DIMENSION);
    for (w, h) in [(max, max), (max, 1 << 20), (1 << 20, max)] {
        let result = std::panic::catch_unwind(|| encode_solid(w, h, BACKGROUND));
        match result {
            Ok(Err(EncodeError::InvalidDimensions { .. })) => {}
            Ok(Err(EncodeError::EncodingFailure(_))) => {}
            other => panic!("{w}x{h} gave {other:?}"),
        }
    }
}

#[test]
fn concurrent_encodes_agree() {
    let expected = encode_solid(64, 32, BACKGROUND).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| encode_solid(64, 32, BACKGROUND).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
