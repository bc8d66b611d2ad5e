//! Configuration of the colormap editor.
//!
//! Sources, by decreasing priority:
//! 1. Environment variables (`COLORMAP_BACKGROUND`, `COLORMAP_STORE`)
//! 2. The JSON file named by `COLORMAP_CONFIG`, or else
//!    `colormap.json` in the current directory
//! 3. Built-in defaults

use std::{env, fs, path::{Path, PathBuf}};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use crate::{color::{ColorValue, BACKGROUND_CHOICES},
            error::{Error, Result},
            interval::Bounds,
            ramp::TICK_PRECISION};

/// Settings of an editing [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Background of a fresh or reset colormap
    #[serde(default = "ColorValue::background")]
    pub default_background: ColorValue,
    /// Bounds of a fresh or reset colormap
    #[serde(default)]
    pub default_bounds: Bounds,
    /// Catalog of saved colormaps; `None` keeps them in memory
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// Decimals of tick labels
    #[serde(default = "default_tick_precision")]
    pub tick_precision: usize,
    /// Backgrounds proposed to the user
    #[serde(default = "default_background_choices")]
    pub background_choices: Vec<ColorValue>,
}

fn default_tick_precision() -> usize { TICK_PRECISION }

fn default_background_choices() -> Vec<ColorValue> {
    BACKGROUND_CHOICES.iter().map(|&c| ColorValue::new(c)).collect()
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            default_background: ColorValue::background(),
            default_bounds: Bounds::default(),
            store_path: None,
            tick_precision: default_tick_precision(),
            background_choices: default_background_choices(),
        }
    }
}

impl EditorConfig {
    /// The background choices, with `current` appended when it is not
    /// one of them.
    pub fn background_options(&self, current: &ColorValue) -> Vec<ColorValue> {
        let mut opts = self.background_choices.clone();
        if !opts.contains(current) { opts.push(current.clone()) }
        opts
    }
}

/// Configuration loader with multiple source support
pub struct ConfigLoader;

impl ConfigLoader {
    pub const CONFIG_VAR: &'static str = "COLORMAP_CONFIG";
    pub const BACKGROUND_VAR: &'static str = "COLORMAP_BACKGROUND";
    pub const STORE_VAR: &'static str = "COLORMAP_STORE";

    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<EditorConfig> {
        let mut config = Self::load_from_files()?;
        Self::apply_environment_variables(&mut config);
        Ok(config)
    }

    fn load_from_files() -> Result<EditorConfig> {
        let mut paths = vec![];
        if let Ok(p) = env::var(Self::CONFIG_VAR) {
            paths.push(PathBuf::from(p));
        }
        if let Ok(dir) = env::current_dir() {
            paths.push(dir.join("colormap.json"));
        }
        for path in paths {
            if path.is_file() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(&path);
            }
        }
        debug!("No configuration file found, using defaults");
        Ok(EditorConfig::default())
    }

    /// Load configuration from a specific JSON file
    pub fn load_from_file(path: &Path) -> Result<EditorConfig> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(), message: e.to_string() })?;
        serde_json::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(), message: e.to_string() })
    }

    fn apply_environment_variables(config: &mut EditorConfig) {
        if let Ok(bg) = env::var(Self::BACKGROUND_VAR) {
            if bg.trim().is_empty() {
                warn!("Ignoring empty {}", Self::BACKGROUND_VAR);
            } else {
                config.default_background = ColorValue::new(bg.trim());
            }
        }
        if let Ok(store) = env::var(Self::STORE_VAR) {
            config.store_path = Some(PathBuf::from(store));
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colormap.json");
        fs::write(&path, r#"{"default_background": "black",
                             "default_bounds": {"min": -1, "max": 1}}"#)
            .unwrap();
        let c = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(c.default_background.as_str(), "black");
        assert_eq!(c.default_bounds, Bounds::new(-1., 1.).unwrap());
        assert_eq!(c.tick_precision, 2);
        assert_eq!(c.background_choices.len(), 5);
        assert_eq!(c.store_path, None);
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colormap.json");
        fs::write(&path, r#"{"default_bounds": {"min": 1, "max": 1}}"#)
            .unwrap();
        assert!(matches!(ConfigLoader::load_from_file(&path),
                         Err(Error::Config { .. })));
        assert!(ConfigLoader::load_from_file(&dir.path().join("none.json"))
                .is_err());
    }

    #[test]
    fn background_options_include_current() {
        let c = EditorConfig::default();
        assert_eq!(c.background_options(&"white".into()).len(), 5);
        let opts = c.background_options(&"pink".into());
        assert_eq!(opts.last().map(|c| c.as_str()), Some("pink"));
    }
}
