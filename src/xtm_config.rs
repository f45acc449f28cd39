// User preferences
// Read from an optional TOML file in the platform config directory; never written

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::xtm_color::ColorDepth;
use crate::xtm_error::AppError;

/// Colour handling requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,      // probe the terminal
    TrueColor, // force 24-bit
    Ansi256,   // force the 256-colour palette
    Basic,     // force the 16 ANSI colours
}

impl ColorMode {
    /// Turn the preference into a concrete depth, probing the terminal for Auto
    pub fn resolve(self) -> ColorDepth {
        match self {
            ColorMode::Auto => ColorDepth::detect(),
            ColorMode::TrueColor => ColorDepth::TrueColor,
            ColorMode::Ansi256 => ColorDepth::Ansi256,
            ColorMode::Basic => ColorDepth::Basic,
        }
    }
}

/// User configuration
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,      // Language code ("en" or "zh")
    pub ascii_icons: bool,     // Use ASCII fallback glyphs
    pub color_mode: ColorMode, // Colour depth override
}

impl Default for Config {
    fn default() -> Self {
        // Follow the system language unless configured otherwise
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang = if system_lang.to_lowercase().starts_with("zh") {
            "zh".to_string()
        } else {
            "en".to_string()
        };

        Config {
            language: lang,
            ascii_icons: false,
            color_mode: ColorMode::Auto,
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Get the configuration file path
/// Uses platform-specific config directory (e.g., ~/.config/xtmole/xtmole.toml on Linux)
/// Falls back to current directory if ProjectDirs is unavailable
pub fn config_path() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let name = exe.file_stem().and_then(|s| s.to_str())?;
    match ProjectDirs::from("com", "xhbl", name) {
        Some(proj) => Some(proj.config_dir().join(format!("{}.toml", name))),
        None => env::current_dir()
            .ok()
            .map(|dir| dir.join(format!("{}.toml", name))),
    }
}

/// Load configuration from disk
/// A missing file yields the defaults; unreadable or malformed files are errors
pub fn load_config() -> Result<Config, AppError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    Config::from_toml(&s).map_err(|source| AppError::ConfigParse { path, source })
}
