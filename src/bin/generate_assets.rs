use std::path::{Path, PathBuf};

use anyhow::Context;
use placeholder_png::assets::{self, AssetSet, MANIFEST_FILE};

const USAGE: &str = "usage: generate-assets [-v] [--verify] [--config <assets.json>] [output-dir]";

fn main() -> anyhow::Result<()> {
    let mut verbosity = log::LevelFilter::Error;
    let mut verify = false;
    let mut config: Option<PathBuf> = None;
    let mut output_dir = PathBuf::from("assets");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => verbosity = log::LevelFilter::Info,
            "-vv" => verbosity = log::LevelFilter::Debug,
            "--verify" => verify = true,
            "--config" => config = Some(args.next().context(USAGE)?.into()),
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            flag if flag.starts_with('-') => anyhow::bail!("unknown flag {flag}\n{USAGE}"),
            dir => output_dir = PathBuf::from(dir),
        }
    }
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    let set = match config {
        Some(path) => AssetSet::load(&path)?,
        None => AssetSet::default(),
    };
    let generated = assets::generate(&set)?;
    if verify {
        for asset in &generated {
            assets::verify(asset)?;
        }
        log::info!("Verified {} assets", generated.len());
    }
    assets::write_all(&output_dir, &generated)?;
    write_manifest(&output_dir, &generated)?;
    println!(
        "Wrote {} assets to {}",
        generated.len(),
        output_dir.display()
    );
    Ok(())
}

fn write_manifest(output_dir: &Path, generated: &[assets::GeneratedAsset]) -> anyhow::Result<()> {
    let manifest = assets::manifest(generated, time::OffsetDateTime::now_utc())?;
    let path = output_dir.join(MANIFEST_FILE);
    std::fs::write(&path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}
