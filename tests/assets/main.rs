use std::{fs, path::PathBuf};

use placeholder_png::{
    assets::{self, AssetSet, AssetSpec, BACKGROUND},
    decode,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("placeholder-png-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn default_set_generates_and_verifies() {
    let generated = assets::generate(&AssetSet::default()).unwrap();
    let sizes: Vec<_> = generated
        .iter()
        .map(|a| (a.spec.file_name.as_str(), a.spec.width, a.spec.height))
        .collect();
    assert_eq!(
        sizes,
        [
            ("icon.png", 1024, 1024),
            ("adaptive-icon.png", 1024, 1024),
            ("splash.png", 1284, 2778),
            ("favicon.png", 48, 48),
        ]
    );
    for asset in &generated {
        assets::verify(asset).unwrap();
    }
}

#[test]
fn writes_files_that_decode() {
    let dir = scratch_dir("write");
    let set = AssetSet {
        assets: vec![
            AssetSpec::new("favicon.png", 48, 48, BACKGROUND),
            AssetSpec::new("wide.png", 20, 3, "#ff8800".parse().unwrap()),
        ],
    };
    let generated = assets::generate(&set).unwrap();
    let paths = assets::write_all(&dir, &generated).unwrap();
    assert_eq!(paths, [dir.join("favicon.png"), dir.join("wide.png")]);

    let wide = decode(&fs::read(&paths[1]).unwrap()).unwrap();
    assert_eq!((wide.header.width, wide.header.height), (20, 3));
    assert!(wide.iter_pixels().all(|p| p.to_bytes() == [0xff, 0x88, 0x00]));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn loads_set_from_file() {
    let dir = scratch_dir("config");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("assets.json");
    fs::write(
        &path,
        r##"{"assets": [{"file_name": "icon.png", "width": 16, "height": 16, "color": "#000000"}]}"##,
    )
    .unwrap();
    let set = AssetSet::load(&path).unwrap();
    assert_eq!(set.assets.len(), 1);
    assert_eq!(set.assets[0].color.to_string(), "#000000");

    assert!(AssetSet::load(&dir.join("missing.json")).is_err());
    fs::remove_dir_all(&dir).unwrap();
}
