//! # Global Layout Settings
//!
//! Two independent settings groups applied uniformly to every label:
//!
//! - [`BorderSettings`]: outline color and thickness (CSS pixels)
//! - [`LabelSize`]: physical label dimensions in inches
//!
//! Both travel together as [`SheetSettings`], which is what the renderer and
//! layout engine receive. Nothing reads settings from ambient state.

use serde::{Deserialize, Serialize};

use crate::error::SlabelError;
use crate::units;

/// Default label width in inches (slightly wider than a PSA insert, for trimming)
pub const DEFAULT_WIDTH_IN: f64 = 2.65;

/// Default label height in inches
pub const DEFAULT_HEIGHT_IN: f64 = 0.8;

// ============================================================================
// BORDER
// ============================================================================

/// Label outline settings.
///
/// A border is visible only when `size > 0` and `color` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderSettings {
    /// CSS color; empty means no border
    pub color: String,
    /// Thickness in CSS pixels; 0 means no border
    pub size: f64,
}

impl BorderSettings {
    /// Create border settings, clamping the size to a non-negative value.
    pub fn new(color: impl Into<String>, size: f64) -> Self {
        Self {
            color: color.into(),
            size: clamp_border_size(size),
        }
    }

    /// Whether a border should be drawn.
    pub fn is_visible(&self) -> bool {
        self.size > 0.0 && !self.color.is_empty() && is_css_color(&self.color)
    }

    /// Reject colors that could break out of a CSS declaration.
    pub fn validate(&self) -> Result<(), SlabelError> {
        if is_css_color(&self.color) {
            Ok(())
        } else {
            Err(SlabelError::Validation(format!(
                "'{}' is not a CSS color",
                self.color
            )))
        }
    }

    /// The CSS `border` declaration value (`none` when not visible).
    pub fn css(&self) -> String {
        if self.is_visible() {
            format!("{} solid {}", units::css_px(self.size), self.color)
        } else {
            "none".to_string()
        }
    }

    /// Rebuild from a stored value, treating missing, null, or unusable
    /// fields as unset.
    pub(crate) fn from_stored(stored: StoredBorder) -> Self {
        let color = stored
            .color
            .filter(|c| {
                let ok = is_css_color(c);
                if !ok {
                    tracing::warn!(color = %c, "ignoring stored border color");
                }
                ok
            })
            .unwrap_or_default();
        Self::new(color, stored.size.unwrap_or_default())
    }
}

/// Border size as persisted; either field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StoredBorder {
    color: Option<String>,
    size: Option<f64>,
}

/// Whether `color` can be placed in a CSS declaration as-is.
///
/// Accepts hex values, color names, and functional notations such as
/// `rgb(0 0 0 / 50%)`. The empty string (no border) is accepted.
///
/// ## Example
///
/// ```
/// use slabel::settings::is_css_color;
///
/// assert!(is_css_color("#1a2b3c"));
/// assert!(is_css_color("rgba(0, 0, 0, 0.5)"));
/// assert!(!is_css_color("red;width:9in"));
/// assert!(!is_css_color("red\" onclick=\"x"));
/// ```
pub fn is_css_color(color: &str) -> bool {
    color.len() <= MAX_COLOR_LEN
        && color.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | '/' | '-' | ' ')
        })
}

/// Longest accepted color value
const MAX_COLOR_LEN: usize = 64;

/// Clamp a border thickness into the valid range.
pub fn clamp_border_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 { size } else { 0.0 }
}

// ============================================================================
// LABEL SIZE
// ============================================================================

/// Physical label dimensions in inches.
///
/// These map 1:1 onto paper: a label measured with a ruler on the printed
/// sheet matches `width_in` × `height_in`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl Default for LabelSize {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_WIDTH_IN,
            height_in: DEFAULT_HEIGHT_IN,
        }
    }
}

impl LabelSize {
    /// Create a label size, rejecting non-positive or non-finite dimensions.
    ///
    /// ## Example
    ///
    /// ```
    /// use slabel::LabelSize;
    ///
    /// assert!(LabelSize::new(3.0, 1.0).is_ok());
    /// assert!(LabelSize::new(0.0, 1.0).is_err());
    /// ```
    pub fn new(width_in: f64, height_in: f64) -> Result<Self, SlabelError> {
        if !is_valid_dimension(width_in) {
            return Err(SlabelError::Validation(format!(
                "label width must be a positive number of inches, got {}",
                width_in
            )));
        }
        if !is_valid_dimension(height_in) {
            return Err(SlabelError::Validation(format!(
                "label height must be a positive number of inches, got {}",
                height_in
            )));
        }
        Ok(Self {
            width_in,
            height_in,
        })
    }

    /// Rebuild from a stored value; each bad or missing dimension falls
    /// back to its default independently.
    pub(crate) fn from_stored(stored: StoredLabelSize) -> Self {
        let defaults = Self::default();
        Self {
            width_in: stored
                .width_in
                .filter(|w| is_valid_dimension(*w))
                .unwrap_or(defaults.width_in),
            height_in: stored
                .height_in
                .filter(|h| is_valid_dimension(*h))
                .unwrap_or(defaults.height_in),
        }
    }
}

/// Label size as persisted; either field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct StoredLabelSize {
    width_in: Option<f64>,
    height_in: Option<f64>,
}

/// Whether a value is usable as a label dimension in inches.
pub fn is_valid_dimension(inches: f64) -> bool {
    inches.is_finite() && inches > 0.0
}

// ============================================================================
// SHEET SETTINGS
// ============================================================================

/// Everything the renderer and layout engine need to know about labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetSettings {
    pub border: BorderSettings,
    pub size: LabelSize,
}
