//! Color themes and the table of known themes.

use std::collections::BTreeMap;

/// Colors handed to the renderer. Values are CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Page background.
    pub bg: String,
    /// Raised surfaces such as the scrollbar track.
    pub bg_light: String,
    /// Prompt user name and highlights.
    pub primary: String,
    /// Prompt path.
    pub secondary: String,
    /// Body text.
    pub font: String,
}

impl Theme {
    pub fn new(
        bg: impl Into<String>,
        bg_light: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            bg: bg.into(),
            bg_light: bg_light.into(),
            primary: primary.into(),
            secondary: secondary.into(),
            font: font.into(),
        }
    }

    pub fn dark() -> Self {
        Self::new("#242424", "#383838", "#8adb2f", "#8adb2f", "#ffffffde")
    }

    pub fn retro() -> Self {
        Self::new("#0f0a01", "#2c1e03", "#ffab0b", "#ffab0b", "#c2c2c2")
    }
}

/// Result of [`ThemeTable::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated,
    AlreadyActive,
    Missing,
}

/// Named themes plus the active one. The active name always refers to an
/// entry and `current` mirrors that entry.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    themes: BTreeMap<String, Theme>,
    active: String,
    current: Theme,
}

pub const DEFAULT_THEME: &str = "dark";

impl Default for ThemeTable {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(DEFAULT_THEME.to_string(), Theme::dark());
        themes.insert("retro".to_string(), Theme::retro());
        Self {
            themes,
            active: DEFAULT_THEME.to_string(),
            current: Theme::dark(),
        }
    }
}

impl ThemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a theme.
    pub fn insert(&mut self, name: impl Into<String>, theme: Theme) {
        let name = name.into();
        if name == self.active {
            self.current = theme.clone();
        }
        self.themes.insert(name, theme);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn activate(&mut self, name: &str) -> Activation {
        let Some(theme) = self.themes.get(name) else {
            return Activation::Missing;
        };
        if self.active == name {
            return Activation::AlreadyActive;
        }
        self.current = theme.clone();
        self.active = name.to_string();
        Activation::Activated
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn active(&self) -> &Theme {
        &self.current
    }

    /// Theme names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}
