//! The placeholder asset set written at build time: app icon, adaptive icon,
//! splash screen and favicon, all filled with the app background colour.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    thread,
};

use anyhow::{anyhow, bail, ensure, Context};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{decoder::decode, encoder::PngEncoder, image::Dimensions, pixel::Rgb};

/// `#1a1a2e`, the app's dark background.
pub const BACKGROUND: Rgb = Rgb::new(26, 26, 46);

pub const MANIFEST_FILE: &str = "asset-manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub file_name: String,
    pub width: i64,
    pub height: i64,
    #[serde(default = "default_color")]
    pub color: Rgb,
}
impl AssetSpec {
    pub fn new(file_name: impl Into<String>, width: i64, height: i64, color: Rgb) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            height,
            color,
        }
    }
}

fn default_color() -> Rgb {
    BACKGROUND
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSet {
    pub assets: Vec<AssetSpec>,
}
impl Default for AssetSet {
    fn default() -> Self {
        Self {
            assets: vec![
                AssetSpec::new("icon.png", 1024, 1024, BACKGROUND),
                AssetSpec::new("adaptive-icon.png", 1024, 1024, BACKGROUND),
                AssetSpec::new("splash.png", 1284, 2778, BACKGROUND),
                AssetSpec::new("favicon.png", 48, 48, BACKGROUND),
            ],
        }
    }
}
impl AssetSet {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let set: Self = serde_json::from_str(json).context("Failed to parse asset set.")?;
        set.validate()?;
        Ok(set)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid asset set in {}", path.display()))
    }

    /// File names must be unique plain names; sizes must be encodable.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.assets.is_empty(), "asset set is empty");
        let mut seen = HashSet::new();
        for spec in &self.assets {
            let name = Path::new(&spec.file_name);
            ensure!(
                name.file_name() == Some(name.as_os_str()),
                "{:?} is not a plain file name",
                spec.file_name
            );
            ensure!(
                seen.insert(spec.file_name.as_str()),
                "{:?} appears more than once",
                spec.file_name
            );
            Dimensions::new(spec.width, spec.height)
                .with_context(|| format!("bad size for {}", spec.file_name))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedAsset {
    pub spec: AssetSpec,
    pub bytes: Vec<u8>,
}

/// Encodes every asset, one thread each.
pub fn generate(set: &AssetSet) -> anyhow::Result<Vec<GeneratedAsset>> {
    thread::scope(|scope| {
        let handles: Vec<_> = set
            .assets
            .iter()
            .map(|spec| {
                let handle = scope.spawn(move || -> crate::Result<Vec<u8>> {
                    PngEncoder::new(spec.width, spec.height)?.encode(spec.color)
                });
                (spec, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(spec, handle)| -> anyhow::Result<GeneratedAsset> {
                let bytes = handle
                    .join()
                    .map_err(|_| anyhow!("encoder thread for {} panicked", spec.file_name))?
                    .with_context(|| format!("Failed to encode {}", spec.file_name))?;
                debug!("encoded {} ({} bytes)", spec.file_name, bytes.len());
                Ok(GeneratedAsset {
                    spec: spec.clone(),
                    bytes,
                })
            })
            .collect()
    })
}

/// Writes each asset into `out_dir`, creating it if needed.
pub fn write_all(out_dir: &Path, assets: &[GeneratedAsset]) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    assets
        .iter()
        .map(|asset| -> anyhow::Result<PathBuf> {
            let path = out_dir.join(&asset.spec.file_name);
            fs::write(&path, &asset.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                "Created {} ({}x{})",
                path.display(),
                asset.spec.width,
                asset.spec.height
            );
            Ok(path)
        })
        .collect()
}

/// Decodes the asset and checks its size and that every pixel has the requested colour.
pub fn verify(asset: &GeneratedAsset) -> anyhow::Result<()> {
    let spec = &asset.spec;
    let image =
        decode(&asset.bytes).with_context(|| format!("{} does not decode", spec.file_name))?;
    ensure!(
        i64::from(image.header.width) == spec.width
            && i64::from(image.header.height) == spec.height,
        "{} is {}x{}, expected {}x{}",
        spec.file_name,
        image.header.width,
        image.header.height,
        spec.width,
        spec.height
    );
    if let Some((index, found)) = image
        .iter_pixels()
        .enumerate()
        .find(|(_, pixel)| *pixel != spec.color)
    {
        bail!(
            "{}: pixel {} is {}, expected {}",
            spec.file_name,
            index,
            found,
            spec.color
        );
    }
    Ok(())
}

pub fn manifest(
    assets: &[GeneratedAsset],
    generated_at: time::OffsetDateTime,
) -> anyhow::Result<serde_json::Value> {
    let date = generated_at.format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let entries: Vec<_> = assets
        .iter()
        .map(|asset| {
            serde_json::json!({
                "file_name": asset.spec.file_name,
                "width": asset.spec.width,
                "height": asset.spec.height,
                "color": asset.spec.color,
                "bytes": asset.bytes.len(),
            })
        })
        .collect();
    Ok(serde_json::json!({
        "date": date,
        "assets": entries,
    }))
}
