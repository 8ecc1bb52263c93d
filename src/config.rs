use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "POKECARD_CONFIG";

const DEFAULT_INTERVAL_SECS: f32 = 3.0;

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "pokecard.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Paths and tunables for the card viewer. Every field is optional in the
/// JSON file; missing ones fall back to [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the data file, card images and music.
    pub assets_dir: PathBuf,
    /// Record list, relative to `assets_dir`.
    pub data_file: String,
    /// Card images, relative to `assets_dir`.
    pub image_dir: String,
    pub image_ext: String,
    /// Background theme, relative to `assets_dir`.
    pub music_file: String,
    pub music_volume: f32,
    pub slideshow_interval_secs: f32,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            data_file: "pokemon_list.csv".to_string(),
            image_dir: "images".to_string(),
            image_ext: "gif".to_string(),
            music_file: "audio/pokemon_theme.mp3".to_string(),
            music_volume: 0.5,
            slideshow_interval_secs: DEFAULT_INTERVAL_SECS,
            window_size: [1024.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Load from `$POKECARD_CONFIG`, else `./pokecard.json`, else defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: AppConfig = serde_json::from_str(text).context("invalid JSON")?;
        config.music_volume = config.music_volume.clamp(0.0, 1.0);
        if !valid_interval(config.slideshow_interval_secs) {
            log::warn!(
                "slideshow_interval_secs must be a positive number of seconds, got {}; using default",
                config.slideshow_interval_secs
            );
            config.slideshow_interval_secs = Self::default().slideshow_interval_secs;
        }
        Ok(config)
    }

    /// Delay between slideshow cards. Falls back to the default when the
    /// field was set to something that is not a usable duration.
    pub fn slideshow_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.slideshow_interval_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(Duration::from_secs_f32(DEFAULT_INTERVAL_SECS))
    }

    /// Location of the card image for a record name.
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.assets_dir
            .join(&self.image_dir)
            .join(format!("{}.{}", name.to_lowercase(), self.image_ext))
    }

    pub fn music_path(&self) -> PathBuf {
        self.assets_dir.join(&self.music_file)
    }
}

fn valid_interval(secs: f32) -> bool {
    Duration::try_from_secs_f32(secs).is_ok_and(|d| !d.is_zero())
}
