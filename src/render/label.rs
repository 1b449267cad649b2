//! # Label Renderer
//!
//! Draws one label as a fixed-size box:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ 1999 Pokémon Base Set            #4  │  bold        bold, right
//! │ Charizard                      MINT  │  bold        bold, right
//! │ Holo                              9  │  regular     bold, right
//! └──────────────────────────────────────┘
//!   ← max 50% →               ← max 40% →
//! ```
//!
//! Empty fields are left out entirely and each column spaces the remaining
//! lines evenly (`justify-content: space-evenly`).
//!
//! Typography is fixed and written inline on the label element. The
//! renderer has no theme input, so the printed label looks the same under
//! every application theme.

use std::fmt::Write;

use super::escape;
use crate::label::LabelRecord;
use crate::settings::SheetSettings;
use crate::units;

/// Label font stack
pub const LABEL_FONT: &str = "Roboto, 'Helvetica Neue', Arial, sans-serif";

/// Label font size in CSS pixels
pub const LABEL_FONT_SIZE_PX: f64 = 14.0;

/// Inner padding in CSS pixels
pub const LABEL_PADDING_PX: f64 = 4.0;

/// Label text color
pub const LABEL_TEXT_COLOR: &str = "#171923";

/// Label background
pub const LABEL_BACKGROUND: &str = "#ffffff";

/// Renders a single label.
pub struct LabelView<'a> {
    label: &'a LabelRecord,
    settings: &'a SheetSettings,
}

impl<'a> LabelView<'a> {
    pub fn new(label: &'a LabelRecord, settings: &'a SheetSettings) -> Self {
        Self { label, settings }
    }

    /// Inline style for the outer box.
    ///
    /// `box-sizing: border-box` keeps the outer size equal to the configured
    /// inches regardless of border thickness.
    pub fn box_style(&self) -> String {
        let size = self.settings.size;
        format!(
            "width:{};height:{};box-sizing:border-box;border:{};\
             display:flex;flex-direction:row;justify-content:space-between;\
             padding:{};margin:0;background:{};overflow:hidden;\
             font-family:{};font-size:{};font-style:normal;font-weight:400;\
             letter-spacing:normal;line-height:1;text-transform:none;color:{};",
            units::css_in(size.width_in),
            units::css_in(size.height_in),
            self.settings.border.css(),
            units::css_px(LABEL_PADDING_PX),
            LABEL_BACKGROUND,
            LABEL_FONT,
            units::css_px(LABEL_FONT_SIZE_PX),
            LABEL_TEXT_COLOR,
        )
    }

    /// Render the label markup.
    pub fn render(&self) -> String {
        let mut html = String::new();
        self.write_to(&mut html);
        html
    }

    /// Append the label markup to `out`.
    pub fn write_to(&self, out: &mut String) {
        let _ = write!(
            out,
            r#"<div class="slab-label" style="{}">"#,
            escape(&self.box_style())
        );

        out.push_str(
            r#"<div class="slab-label-left" style="display:flex;flex-direction:column;justify-content:space-evenly;align-items:flex-start;max-width:50%;text-align:left;">"#,
        );
        for (bold, text) in self.label.left_lines() {
            write_line(out, text, bold, "left");
        }
        out.push_str("</div>");

        out.push_str(
            r#"<div class="slab-label-right" style="display:flex;flex-direction:column;justify-content:space-evenly;align-items:flex-end;max-width:40%;text-align:right;">"#,
        );
        for text in self.label.right_lines() {
            write_line(out, text, true, "right");
        }
        out.push_str("</div>");

        out.push_str("</div>");
    }
}

fn write_line(out: &mut String, text: &str, bold: bool, align: &str) {
    if text.is_empty() {
        return;
    }
    let weight = if bold { 700 } else { 400 };
    let _ = write!(
        out,
        r#"<span style="display:block;font-weight:{};line-height:1;text-align:{};">{}</span>"#,
        weight,
        align,
        escape(text)
    );
}
