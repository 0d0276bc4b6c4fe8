//! Navigation config and gallery loaded from `data/config/museum.toml` and
//! `data/gallery.toml`. Missing files fall back to the built-in defaults.

use anyhow::{Context, Result};
use museum_core::{ExhibitCatalog, NavConfig};
use std::path::{Path, PathBuf};

pub struct Settings {
    pub config: NavConfig,
    pub catalog: ExhibitCatalog,
}

fn data_root() -> PathBuf {
    if let Ok(dir) = std::env::var("MUSEUM_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() {
        ws
    } else {
        here.join("data")
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("read {}", path.display()))
}

pub fn load_default() -> Result<Settings> {
    load_from(&data_root())
}

pub fn load_from(root: &Path) -> Result<Settings> {
    let cfg_path = root.join("config/museum.toml");
    let mut config = match read_optional(&cfg_path)? {
        Some(txt) => NavConfig::from_toml_str(&txt)
            .with_context(|| format!("parse {}", cfg_path.display()))?,
        None => NavConfig::default(),
    };

    // Env overrides for quick tuning (optional)
    if let Some(v) = env_f32("MOVE_SPEED") {
        config.movement.move_speed = v;
    }
    if let Some(v) = env_f32("ACTIVATION_RADIUS") {
        config.proximity.activation_radius = v;
    }
    config.validate().context("navigation config after env overrides")?;

    let gallery_path = root.join("gallery.toml");
    let catalog = match read_optional(&gallery_path)? {
        Some(txt) => ExhibitCatalog::from_toml_str(&txt)
            .with_context(|| format!("parse {}", gallery_path.display()))?,
        None => {
            log::info!("[museum] no {}; using built-in gallery", gallery_path.display());
            ExhibitCatalog::default_gallery()
        }
    };
    Ok(Settings { config, catalog })
}

fn env_f32(name: &str) -> Option<f32> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[museum] ignoring {name}={raw:?}: not a number");
            None
        }
    }
}
