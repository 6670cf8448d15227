//! Colour themes
//!
//! A theme maps semantic colour keys (`text_fg`, `heading1`, `keyword`,
//! ...) to concrete colours. Two themes are built in; more can be defined
//! in the config file on top of either of them.

use std::collections::HashMap;

use tracing::warn;

use super::color::Color;

/// Theme used when a requested theme is unknown
pub const DEFAULT_THEME: &str = "dark";

/// Key of the base foreground, the fallback for missing keys
pub const BASE_FOREGROUND: &str = "text_fg";

/// Key of the viewer background
pub const BASE_BACKGROUND: &str = "text_bg";

const LIGHT_COLORS: &[(&str, u32)] = &[
    ("text_bg", 0xFFFFFF),
    ("text_fg", 0x000000),
    ("heading1", 0x000080),
    ("heading2", 0x00008B),
    ("list_item", 0x228B22),
    ("inline_code_bg", 0xE0E0E0),
    ("inline_code_fg", 0xC7254E),
    ("code_block_bg", 0xF5F5F5),
    ("code_block_fg", 0x000000),
    ("code_block_border", 0xDDDDDD),
    ("keyword", 0x0000FF),
    ("keyword_constant", 0xAA22FF),
    ("keyword_namespace", 0x0077AA),
    ("builtin", 0xAA22FF),
    ("decorator", 0x795E26),
    ("string", 0x008000),
    ("docstring", 0x808080),
    ("comment", 0x808080),
    ("number", 0xA52A2A),
    ("function_name", 0x795E26),
    ("class_name", 0x267F99),
    ("operator", 0x555555),
];

const DARK_COLORS: &[(&str, u32)] = &[
    ("text_bg", 0x1E1E1E),
    ("text_fg", 0xD4D4D4),
    ("heading1", 0x569CD6),
    ("heading2", 0x4EC9B0),
    ("list_item", 0xB5CEA8),
    ("inline_code_bg", 0x3A3A3A),
    ("inline_code_fg", 0xD69D85),
    ("code_block_bg", 0x252525),
    ("code_block_fg", 0xD4D4D4),
    ("code_block_border", 0x444444),
    ("keyword", 0x569CD6),
    ("keyword_constant", 0xC586C0),
    ("keyword_namespace", 0x4EC9B0),
    ("builtin", 0xC586C0),
    ("decorator", 0xDCDCAA),
    ("string", 0xCE9178),
    ("docstring", 0x6A9955),
    ("comment", 0x6A9955),
    ("number", 0xB5CEA8),
    ("function_name", 0xDCDCAA),
    ("class_name", 0x4EC9B0),
    ("operator", 0xD4D4D4),
];

/// A named palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    colors: HashMap<String, Color>,
}

impl Theme {
    /// Create an empty theme
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            colors: HashMap::new(),
        }
    }

    fn from_table(name: &str, table: &[(&str, u32)]) -> Self {
        let mut theme = Self::new(name);
        for &(key, value) in table {
            theme.set(key, Color::hex(value));
        }
        theme
    }

    /// Built-in light theme
    pub fn light() -> Self {
        Self::from_table("light", LIGHT_COLORS)
    }

    /// Built-in dark theme
    pub fn dark() -> Self {
        Self::from_table("dark", DARK_COLORS)
    }

    /// Look up a built-in theme by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Copy another theme's palette under a new name
    pub fn derived(name: &str, base: &Theme) -> Self {
        Self {
            name: name.to_lowercase(),
            colors: base.colors.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a colour key
    pub fn set(&mut self, key: &str, color: Color) {
        self.colors.insert(key.to_string(), color);
    }

    /// Builder: set a colour key
    pub fn with(mut self, key: &str, color: Color) -> Self {
        self.set(key, color);
        self
    }

    /// Get a colour if the theme defines the key
    pub fn color(&self, key: &str) -> Option<Color> {
        self.colors.get(key).copied()
    }

    /// Get a colour, falling back to the base foreground
    pub fn lookup(&self, key: &str) -> Color {
        if let Some(color) = self.color(key) {
            return color;
        }
        warn!(
            "Theme color key '{}' not found in theme '{}', using base foreground",
            key, self.name
        );
        self.foreground()
    }

    /// Base text colour
    pub fn foreground(&self) -> Color {
        self.color(BASE_FOREGROUND).unwrap_or_else(|| {
            warn!("Theme '{}' has no base foreground, using default theme's", self.name);
            default_color(BASE_FOREGROUND)
        })
    }

    /// Viewer background colour
    pub fn background(&self) -> Color {
        self.color(BASE_BACKGROUND)
            .unwrap_or_else(|| default_color(BASE_BACKGROUND))
    }

    /// Defined colour keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.colors.keys().map(|k| k.as_str()).collect();
        keys.sort();
        keys
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Colour of a key in the default theme
fn default_color(key: &str) -> Color {
    DARK_COLORS
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(Color::BLACK, |&(_, value)| Color::hex(value))
}

/// The set of known themes
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: HashMap<String, Theme>,
    default: Theme,
}

impl ThemeSet {
    /// Create a set holding the built-in themes
    pub fn new() -> Self {
        let mut set = Self {
            themes: HashMap::new(),
            default: Theme::default(),
        };
        set.insert(Theme::light());
        set.insert(Theme::dark());
        set
    }

    /// Add or replace a theme
    pub fn insert(&mut self, theme: Theme) {
        if theme.name() == DEFAULT_THEME {
            self.default = theme.clone();
        }
        self.themes.insert(theme.name().to_string(), theme);
    }

    /// Get a theme if it is known
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(&name.to_lowercase())
    }

    /// Get a theme, falling back to the default theme
    pub fn resolve(&self, name: &str) -> &Theme {
        match self.get(name) {
            Some(theme) => theme,
            None => {
                warn!("Unknown theme '{}', using default '{}'", name, DEFAULT_THEME);
                &self.default
            }
        }
    }

    /// The designated default theme
    pub fn default_theme(&self) -> &Theme {
        &self.default
    }

    /// Known theme names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::new()
    }
}
