//! # Physical Units
//!
//! CSS length formatting for the browser print pipeline.
//!
//! ## Print Fidelity
//!
//! CSS defines an absolute inch as exactly 96 CSS pixels, and print output
//! maps CSS inches 1:1 onto paper. Label geometry is therefore always
//! emitted in `in` units; pixels only appear for border thickness, which is
//! configured in pixels.
//!
//! ```text
//! 1in = 96px = 72pt = 25.4mm
//!
//! 2.65in label  = 254.4px on screen
//! 8.5in page    = 816px on screen
//! ```

/// Decimal places kept when formatting lengths.
///
/// Four places is finer than any printer can resolve (0.0001in ≈ 2.5µm)
/// while keeping float noise like `2.6500000000000004` out of the markup.
const LENGTH_PRECISION: usize = 4;

/// Format a number without trailing zeros.
///
/// ## Example
///
/// ```
/// use slabel::units::format_number;
///
/// assert_eq!(format_number(2.65), "2.65");
/// assert_eq!(format_number(11.0), "11");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// ```
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.*}", LENGTH_PRECISION, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format an inch value as a CSS length (e.g. `2.65in`)
pub fn css_in(inches: f64) -> String {
    format!("{}in", format_number(inches))
}

/// Format a pixel value as a CSS length (e.g. `2px`)
pub fn css_px(px: f64) -> String {
    format!("{}px", format_number(px))
}
