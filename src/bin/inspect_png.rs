use anyhow::{anyhow, Context};
use placeholder_png::chunks::{iter_chunks, parse_signature, Chunk};

fn main() -> anyhow::Result<()> {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(String::as_str) == Some("-v") {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();
    let file_name = args
        .last()
        .filter(|arg| *arg != "-v")
        .context("usage: inspect-png [-v] <file.png>")?;
    let input = std::fs::read(file_name).with_context(|| format!("Failed to read {file_name}"))?;

    let (rest, _) = parse_signature(&input)
        .map_err(|_| anyhow!("{file_name} doesn't start with the PNG signature"))?;
    let mut chunks = iter_chunks(rest);
    for chunk in chunks.by_ref() {
        match chunk? {
            Chunk::IHDR(ihdr) => println!(
                "IHDR {}x{} depth={} color={:?} channels={} interlace={:?}",
                ihdr.width,
                ihdr.height,
                ihdr.bit_depth,
                ihdr.color_type,
                ihdr.color_type.channel_count(),
                ihdr.interlace_method
            ),
            Chunk::IDAT(idat) => println!("IDAT {} bytes", idat.data.len()),
            Chunk::IEND => println!("IEND"),
            Chunk::Unknown(raw) => println!(
                "{} {} bytes",
                String::from_utf8_lossy(raw.chunk_type),
                raw.data.len()
            ),
        }
    }

    if chunks.remaining() > 0 {
        log::warn!("{} bytes after IEND", chunks.remaining());
    }

    let image = placeholder_png::decode(&input)?;
    log::info!("decoded {} pixels", image.iter_pixels().count());
    Ok(())
}
