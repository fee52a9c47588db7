//! Configuration and color scheme management for shellfolio.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.shellfolio/config.toml`
//! - Built-in color schemes (default, solarized, monokai, nord, dracula)
//!
//! # Configuration File
//!
//! ```toml
//! # Identity shown in the prompt
//! user = "moonshadow"
//! host = "portfolio"
//!
//! # Color scheme: default, solarized-dark, monokai, nord, dracula
//! color_scheme = "default"
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration load failure. Never fatal: callers fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User name shown in the prompt
    pub user: String,
    /// Host name shown in the prompt
    pub host: String,
    /// Color scheme name
    pub color_scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: "moonshadow".to_string(),
            host: "portfolio".to_string(),
            color_scheme: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".shellfolio").join("config.toml"))
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }

    /// Prompt string rendered before the input line.
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.user, self.host)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition.
///
/// `ansi` carries the sixteen standard foreground colors in SGR order
/// (black..white, then the bright variants); the formatter's color tags
/// index into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,

    /// Default output text
    pub foreground: Rgb,
    /// Screen background
    pub background: Rgb,
    /// Prompt (`user@host:~$`)
    pub prompt: Rgb,
    /// Login banner and highlights
    pub accent: Rgb,
    /// Hints and footer text
    pub muted: Rgb,

    /// The sixteen ANSI foreground colors
    pub ansi: [Rgb; 16],
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default scheme: phosphor green on black.
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),

            foreground: Rgb::new(214, 214, 214),
            background: Rgb::new(0, 0, 0),
            prompt: Rgb::new(0, 255, 159),
            accent: Rgb::new(0, 255, 159),
            muted: Rgb::new(110, 110, 110),

            ansi: [
                Rgb::new(0, 0, 0),
                Rgb::new(205, 49, 49),
                Rgb::new(13, 188, 121),
                Rgb::new(229, 229, 16),
                Rgb::new(36, 114, 200),
                Rgb::new(188, 63, 188),
                Rgb::new(17, 168, 205),
                Rgb::new(229, 229, 229),
                Rgb::new(102, 102, 102),
                Rgb::new(241, 76, 76),
                Rgb::new(35, 209, 139),
                Rgb::new(245, 245, 67),
                Rgb::new(59, 142, 234),
                Rgb::new(214, 112, 214),
                Rgb::new(41, 184, 219),
                Rgb::new(255, 255, 255),
            ],
        }
    }

    /// Solarized Dark scheme
    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),

            foreground: Rgb::new(131, 148, 150),
            background: Rgb::new(0, 43, 54),
            prompt: Rgb::new(133, 153, 0),
            accent: Rgb::new(38, 139, 210),
            muted: Rgb::new(88, 110, 117),

            ansi: [
                Rgb::new(7, 54, 66),
                Rgb::new(220, 50, 47),
                Rgb::new(133, 153, 0),
                Rgb::new(181, 137, 0),
                Rgb::new(38, 139, 210),
                Rgb::new(211, 54, 130),
                Rgb::new(42, 161, 152),
                Rgb::new(238, 232, 213),
                Rgb::new(0, 43, 54),
                Rgb::new(203, 75, 22),
                Rgb::new(88, 110, 117),
                Rgb::new(101, 123, 131),
                Rgb::new(131, 148, 150),
                Rgb::new(108, 113, 196),
                Rgb::new(147, 161, 161),
                Rgb::new(253, 246, 227),
            ],
        }
    }

    /// Monokai scheme
    pub fn monokai() -> Self {
        Self {
            name: "monokai".to_string(),

            foreground: Rgb::new(248, 248, 242),
            background: Rgb::new(39, 40, 34),
            prompt: Rgb::new(166, 226, 46),
            accent: Rgb::new(249, 38, 114),
            muted: Rgb::new(117, 113, 94),

            ansi: [
                Rgb::new(39, 40, 34),
                Rgb::new(249, 38, 114),
                Rgb::new(166, 226, 46),
                Rgb::new(230, 219, 116),
                Rgb::new(102, 217, 239),
                Rgb::new(174, 129, 255),
                Rgb::new(56, 180, 190),
                Rgb::new(248, 248, 242),
                Rgb::new(117, 113, 94),
                Rgb::new(255, 89, 149),
                Rgb::new(182, 232, 84),
                Rgb::new(236, 228, 141),
                Rgb::new(129, 223, 242),
                Rgb::new(190, 153, 255),
                Rgb::new(102, 197, 204),
                Rgb::new(249, 248, 245),
            ],
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),

            foreground: Rgb::new(216, 222, 233),
            background: Rgb::new(46, 52, 64),
            prompt: Rgb::new(136, 192, 208),
            accent: Rgb::new(129, 161, 193),
            muted: Rgb::new(97, 110, 136),

            ansi: [
                Rgb::new(59, 66, 82),
                Rgb::new(191, 97, 106),
                Rgb::new(163, 190, 140),
                Rgb::new(235, 203, 139),
                Rgb::new(129, 161, 193),
                Rgb::new(180, 142, 173),
                Rgb::new(136, 192, 208),
                Rgb::new(229, 233, 240),
                Rgb::new(76, 86, 106),
                Rgb::new(191, 97, 106),
                Rgb::new(163, 190, 140),
                Rgb::new(235, 203, 139),
                Rgb::new(129, 161, 193),
                Rgb::new(180, 142, 173),
                Rgb::new(143, 188, 187),
                Rgb::new(236, 239, 244),
            ],
        }
    }

    /// Dracula scheme
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),

            foreground: Rgb::new(248, 248, 242),
            background: Rgb::new(40, 42, 54),
            prompt: Rgb::new(80, 250, 123),
            accent: Rgb::new(189, 147, 249),
            muted: Rgb::new(98, 114, 164),

            ansi: [
                Rgb::new(33, 34, 44),
                Rgb::new(255, 85, 85),
                Rgb::new(80, 250, 123),
                Rgb::new(241, 250, 140),
                Rgb::new(189, 147, 249),
                Rgb::new(255, 121, 198),
                Rgb::new(139, 233, 253),
                Rgb::new(248, 248, 242),
                Rgb::new(98, 114, 164),
                Rgb::new(255, 110, 103),
                Rgb::new(105, 255, 148),
                Rgb::new(255, 255, 165),
                Rgb::new(214, 178, 255),
                Rgb::new(255, 146, 223),
                Rgb::new(164, 255, 255),
                Rgb::new(255, 255, 255),
            ],
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "solarized-dark" | "solarized_dark" | "solarized" => Self::solarized_dark(),
            "monokai" => Self::monokai(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_scheme(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "solarized-dark", "monokai", "nord", "dracula"]
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config: Config = toml::from_str(
            r#"
            user = "ada"
            host = "lovelace"
            color_scheme = "nord"
            "#,
        )
        .unwrap();
        assert_eq!(config.user, "ada");
        assert_eq!(config.host, "lovelace");
        assert_eq!(config.get_color_scheme().name, "nord");
        assert_eq!(config.prompt(), "ada@lovelace:~$");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = toml::from_str("user = \"ada\"").unwrap();
        assert_eq!(config.host, "portfolio");
        assert_eq!(config.color_scheme, "default");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let parsed = toml::from_str::<Config>("user = 42");
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_scheme_falls_back_to_default() {
        assert_eq!(ColorScheme::by_name("no-such-scheme").name, "default");
        assert_eq!(ColorScheme::by_name("DRACULA").name, "dracula");
    }

    #[test]
    fn every_listed_scheme_resolves_to_itself() {
        for name in ColorScheme::list() {
            assert_eq!(ColorScheme::by_name(name).name, name);
        }
    }
}
