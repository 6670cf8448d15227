//! Configuration file support
//!
//! Loads settings from ~/.screener-render.toml (or
//! %USERPROFILE%\.screener-render.toml on Windows)
//!
//! Example:
//! ```toml
//! theme = "paper"
//! font-size = 14
//! min-font-size = 8
//! max-font-size = 17
//! code-font-size-offset = -1
//! language = "python"
//!
//! [themes.paper]
//! base = "light"
//! text_bg = "#FDF6E3"
//! keyword = "#859900"
//! ```

use std::fs;
use std::path::PathBuf;

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::render::{RenderContext, DEFAULT_LANGUAGE};
use crate::style::{Color, FontLimits, Theme, ThemeSet, DEFAULT_FONT_SIZE, DEFAULT_THEME};

const CONFIG_FILE: &str = ".screener-render.toml";

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected theme name
    pub theme: String,
    /// Base font size, kept within `limits`
    pub font_size: u16,
    pub limits: FontLimits,
    /// Language for untagged code fences
    pub language: String,
    /// Built-in themes plus any defined in the file
    pub themes: ThemeSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            limits: FontLimits::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            themes: ThemeSet::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from file
    ///
    /// A missing file gives the defaults; a malformed one is logged and
    /// ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        let Ok(contents) = fs::read_to_string(&path) else {
            debug!("No config at {}", path.display());
            return Config::default();
        };

        match Self::parse(&contents) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table);
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) {
        if let Some(value) = table.get("min-font-size").and_then(as_u16) {
            self.limits.min = value.max(1);
        }

        if let Some(value) = table.get("max-font-size").and_then(as_u16) {
            self.limits.max = value.max(self.limits.min);
        }

        if let Some(value) = table.get("code-font-size-offset").and_then(Value::as_integer) {
            self.limits.code_offset = value.clamp(-8, 8) as i16;
        }

        if let Some(value) = table.get("font-size").and_then(as_u16) {
            self.font_size = value;
        }
        self.set_font_size(self.font_size);

        if let Some(value) = table.get("language").and_then(Value::as_str) {
            self.language = value.trim().to_lowercase();
        }

        if let Some(Value::Table(themes)) = table.get("themes") {
            for (name, value) in themes {
                match value {
                    Value::Table(def) => self.add_theme(name, def),
                    _ => warn!("Theme '{}' is not a table, skipping", name),
                }
            }
        }

        // Read last so it may name a theme defined above
        if let Some(value) = table.get("theme").and_then(Value::as_str) {
            self.theme = value.trim().to_lowercase();
        }
        if self.themes.get(&self.theme).is_none() {
            warn!("Unknown theme '{}', using '{}'", self.theme, DEFAULT_THEME);
            self.theme = DEFAULT_THEME.to_string();
        }
    }

    /// Define a theme from a `[themes.<name>]` table
    fn add_theme(&mut self, name: &str, def: &Table) {
        let base_name = def.get("base").and_then(Value::as_str).unwrap_or(DEFAULT_THEME);
        let base = match self.themes.get(base_name) {
            Some(theme) => theme.clone(),
            None => {
                warn!("Theme '{}' has unknown base '{}', using '{}'", name, base_name, DEFAULT_THEME);
                self.themes.default_theme().clone()
            }
        };

        let mut theme = Theme::derived(name, &base);
        for (key, value) in def.iter().filter(|(k, _)| k.as_str() != "base") {
            let parsed = value.as_str().map(Color::from_hex);
            match parsed {
                Some(Ok(color)) => theme.set(key, color),
                Some(Err(e)) => warn!("Theme '{}', key '{}': {}", name, key, e),
                None => warn!("Theme '{}', key '{}' is not a colour string", name, key),
            }
        }
        self.themes.insert(theme);
    }

    /// Set the base font size, clamped to the limits
    pub fn set_font_size(&mut self, size: u16) {
        let clamped = self.limits.clamp_base(size);
        if clamped != size {
            debug!("Font size {} clamped to {}", size, clamped);
        }
        self.font_size = clamped;
    }

    /// Render context for the current settings
    pub fn context(&self) -> RenderContext {
        RenderContext::themed(&self.themes, &self.theme, self.font_size)
            .with_language(&self.language)
            .with_limits(self.limits)
    }
}

fn as_u16(value: &Value) -> Option<u16> {
    value
        .as_integer()
        .map(|n| n.clamp(0, i64::from(u16::MAX)) as u16)
}
