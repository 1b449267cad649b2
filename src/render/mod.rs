//! # Rendering Module
//!
//! Turns the workspace into HTML whose geometry is expressed in inches, so
//! the browser's print pipeline reproduces it at physical size.
//!
//! ## Modules
//!
//! - [`label`]: one label box with the six text fields
//! - [`sheet`]: the 8.5in × 11in page with the label grid
//! - [`page`]: the complete designer document (screen or print)
//!
//! ## Usage Example
//!
//! ```
//! use slabel::render::{RenderMode, sheet::SheetView};
//! use slabel::{LabelRecord, SheetSettings};
//!
//! let labels = vec![LabelRecord::sample()];
//! let settings = SheetSettings::default();
//!
//! let html = SheetView::new(&labels, &settings, RenderMode::Print).render();
//! assert!(html.contains("Charizard"));
//! ```

pub mod label;
pub mod page;
pub mod sheet;

use serde::{Deserialize, Serialize};

/// Which surface a page is rendered for.
///
/// The layout engine ignores this; only the page composition differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Full designer: editor, settings, actions, and the sheet preview
    #[default]
    Screen,
    /// The sheet alone, nothing else on the page
    Print,
}

impl RenderMode {
    pub fn is_print(self) -> bool {
        self == RenderMode::Print
    }
}

/// Escape text for HTML content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
