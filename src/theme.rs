//! # Brand Themes
//!
//! Color and font palettes for the designer's chrome (header, forms,
//! buttons). Themes are emitted as CSS custom properties on the page root.
//!
//! Label rendering never reads a theme: the label renderer takes no theme
//! argument and sets its typography inline, so switching palettes cannot
//! change what gets printed.

use serde::Serialize;

/// A named palette for the application chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandTheme {
    pub name: &'static str,
    /// Lightest tint, used for hover backgrounds
    pub tint: &'static str,
    /// Soft tint, used for pressed backgrounds
    pub soft: &'static str,
    /// Main accent
    pub accent: &'static str,
    /// Dark shade, used for headings
    pub shade: &'static str,
    /// CSS font stack for chrome text
    pub font: &'static str,
    /// Extra letter spacing for condensed display fonts
    pub letter_spacing: &'static str,
}

/// Built-in themes, in selector order. Index 0 is the default.
pub const THEMES: &[BrandTheme] = &[
    BrandTheme {
        name: "Pokémon Red",
        tint: "#fff5f5",
        soft: "#fed7d7",
        accent: "#CC0000",
        shade: "#742a2a",
        font: "'Press Start 2P', sans-serif",
        letter_spacing: "normal",
    },
    BrandTheme {
        name: "Pokémon Blue",
        tint: "#ebf0ff",
        soft: "#c2cbff",
        accent: "#3B4CCA",
        shade: "#232e7a",
        font: "'Press Start 2P', sans-serif",
        letter_spacing: "normal",
    },
    BrandTheme {
        name: "Pokémon Yellow",
        tint: "#fffdf0",
        soft: "#fff3c4",
        accent: "#FFCB05",
        shade: "#b58900",
        font: "'Press Start 2P', sans-serif",
        letter_spacing: "normal",
    },
    BrandTheme {
        name: "Baseball",
        tint: "#f9fafb",
        soft: "#f0f0f0",
        accent: "#BA3A26",
        shade: "#5a1b11",
        font: "'Bungee', cursive",
        letter_spacing: "0.5px",
    },
    BrandTheme {
        name: "Hockey",
        tint: "#f7f9fc",
        soft: "#eef2f9",
        accent: "#0B1736",
        shade: "#080e2a",
        font: "'Anton', sans-serif",
        letter_spacing: "0.9px",
    },
];

/// Look up a theme by index, falling back to the default.
pub fn by_index(index: usize) -> &'static BrandTheme {
    THEMES.get(index).unwrap_or(&THEMES[0])
}

/// Clamp a stored or submitted index into range.
pub fn normalize_index(index: usize) -> usize {
    if index < THEMES.len() { index } else { 0 }
}

impl BrandTheme {
    /// CSS custom property block for `:root`.
    pub fn css_variables(&self) -> String {
        format!(
            ":root {{ --brand-tint: {}; --brand-soft: {}; --brand-accent: {}; \
             --brand-shade: {}; --brand-font: {}; --brand-letter-spacing: {}; }}",
            self.tint, self.soft, self.accent, self.shade, self.font, self.letter_spacing
        )
    }
}
