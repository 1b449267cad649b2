//! # Designer Page
//!
//! Composes complete HTML documents.
//!
//! | Mode | Contents |
//! |------|----------|
//! | [`RenderMode::Screen`] | header, editor form, settings, actions, notices, sheet |
//! | [`RenderMode::Print`]  | the sheet alone |
//!
//! In screen mode every region except the sheet carries the `no-print`
//! class, and a print stylesheet hides those regions, so printing the
//! designer directly also yields only the sheet.

use std::fmt::Write;

use super::sheet::SheetView;
use super::{RenderMode, escape};
use crate::assets;
use crate::editor::Editor;
use crate::notify::Notification;
use crate::theme::THEMES;
use crate::units::format_number;
use crate::workspace::Workspace;

/// Page title
pub const TITLE: &str = "Slab Label Maker";

/// Web fonts for the chrome themes and the label face.
const FONT_LINKS: &str = concat!(
    r#"<link rel="preconnect" href="https://fonts.gstatic.com">"#,
    r#"<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Anton&family=Bungee&family=Press+Start+2P&family=Roboto:wght@400;700&display=swap">"#,
);

/// Print rules shared by both modes.
pub const PRINT_CSS: &str = "\
@page { size: 8.5in 11in; margin: 0; }
@media print {
  html, body { margin: 0 !important; padding: 0 !important; background: #ffffff !important; height: auto !important; overflow: visible !important; }
  .no-print { display: none !important; }
  .app-body, .labels-area { display: block !important; height: auto !important; overflow: visible !important; padding: 0 !important; background: none !important; }
  .paper-mock { box-shadow: none !important; margin: 0 !important; }
}
";

/// How the chrome stylesheet reaches the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stylesheet {
    /// `<link>` to a served asset
    Linked(String),
    /// Embedded `<style>` block, for standalone files
    Inline,
}

/// A full designer document.
pub struct DesignerPage<'a> {
    workspace: &'a Workspace,
    editor: Option<&'a Editor>,
    notices: &'a [Notification],
    mode: RenderMode,
    stylesheet: Stylesheet,
}

impl<'a> DesignerPage<'a> {
    pub fn new(workspace: &'a Workspace, mode: RenderMode) -> Self {
        Self {
            workspace,
            editor: None,
            notices: &[],
            mode,
            stylesheet: Stylesheet::Inline,
        }
    }

    /// Show this editor's buffers and mode.
    pub fn editor(mut self, editor: &'a Editor) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Show these notifications.
    pub fn notices(mut self, notices: &'a [Notification]) -> Self {
        self.notices = notices;
        self
    }

    /// Link the stylesheet instead of embedding it.
    pub fn linked_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Stylesheet::Linked(href.into());
        self
    }

    /// Render the document.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(16 * 1024);
        html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
        html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
        let _ = write!(html, "<title>{}</title>", TITLE);
        html.push_str(FONT_LINKS);

        match self.mode {
            RenderMode::Print => {
                let _ = write!(
                    html,
                    "<style>html, body {{ margin: 0; background: #ffffff; }}\n{}</style></head><body class=\"print-view\">",
                    PRINT_CSS
                );
                html.push_str(&self.sheet());
            }
            RenderMode::Screen => {
                self.write_styles(&mut html);
                html.push_str("</head><body>");
                self.write_header(&mut html);
                html.push_str(r#"<div class="app-body">"#);
                self.write_form_panel(&mut html);
                html.push_str(r#"<main class="labels-area">"#);
                html.push_str(&self.sheet());
                html.push_str("</main></div>");
                self.write_notices(&mut html);
                self.write_clear_dialog(&mut html);
            }
        }

        html.push_str("</body></html>");
        html
    }

    fn sheet(&self) -> String {
        let selected = match self.mode {
            RenderMode::Screen => self.editor.and_then(Editor::editing_index),
            RenderMode::Print => None,
        };
        SheetView::new(
            self.workspace.labels().as_slice(),
            self.workspace.settings(),
            self.mode,
        )
        .selected(selected)
        .render()
    }

    fn write_styles(&self, html: &mut String) {
        match &self.stylesheet {
            Stylesheet::Linked(href) => {
                let _ = write!(html, r#"<link rel="stylesheet" href="{}">"#, escape(href));
            }
            Stylesheet::Inline => {
                if let Some(css) = assets::text(assets::STYLESHEET) {
                    let _ = write!(html, "<style>{}</style>", css);
                }
            }
        }
        let _ = write!(
            html,
            "<style>{}\n{}</style>",
            self.workspace.theme().css_variables(),
            PRINT_CSS
        );
    }

    fn write_header(&self, html: &mut String) {
        let layout = self.workspace.layout();
        let count = self.workspace.labels().len();

        let _ = write!(
            html,
            r#"<header class="app-header no-print"><h1>{}</h1><span class="summary">{} label{} · {} columns · {} page{}</span><div class="actions">"#,
            TITLE,
            count,
            if count == 1 { "" } else { "s" },
            layout.grid.columns,
            layout.page_count,
            if layout.page_count == 1 { "" } else { "s" },
        );

        html.push_str(r#"<form method="post" action="/settings/theme"><select name="theme" aria-label="Theme" onchange="this.form.submit()">"#);
        for (i, theme) in THEMES.iter().enumerate() {
            let selected = if i == self.workspace.theme_index() { " selected" } else { "" };
            let _ = write!(html, r#"<option value="{}"{}>{}</option>"#, i, selected, escape(theme.name));
        }
        html.push_str(r#"</select><noscript><button type="submit" class="outline">Apply</button></noscript></form>"#);

        html.push_str(r#"<a class="button" href="/export" download="slab-labels.json">Export Data</a>"#);
        html.push_str(
            r#"<form method="post" action="/import" enctype="multipart/form-data"><input type="file" name="file" accept=".json,application/json" required><button type="submit">Import Data</button></form>"#,
        );
        html.push_str(r#"<button type="button" onclick="window.print()">Print</button>"#);
        html.push_str(r#"<a class="button" href="/print" target="_blank">Print View</a>"#);
        html.push_str("</div></header>");
    }

    fn write_form_panel(&self, html: &mut String) {
        let default_editor = Editor::default();
        let editor = self.editor.unwrap_or(&default_editor);
        let fields = editor.fields();
        let editing = editor.is_editing();

        html.push_str(r#"<aside class="form-panel no-print">"#);
        let _ = write!(
            html,
            "<h2>{}</h2>",
            if editing { "Edit Label" } else { "Create Label" }
        );

        html.push_str(r#"<form method="post" action="/editor/save">"#);
        for (name, label, value) in [
            ("yearSetLine", "Set / Year", &fields.year_set_line),
            ("playerLine", "Card Name", &fields.player_line),
            ("variationLine", "Variation", &fields.variation_line),
            ("cardNumber", "Card Number", &fields.card_number),
            ("gradeTerm", "Grade Term", &fields.grade_term),
            ("gradeNumber", "Grade Number", &fields.grade_number),
        ] {
            let _ = write!(
                html,
                r#"<label for="{n}">{l}</label><input type="text" id="{n}" name="{n}" value="{v}">"#,
                n = name,
                l = label,
                v = escape(value)
            );
        }

        html.push_str(r#"<div class="button-row">"#);
        let _ = write!(
            html,
            r#"<button type="submit">{}</button>"#,
            if editing { "Save" } else { "Add Label" }
        );
        if editing {
            html.push_str(r#"<button type="submit" class="outline" formaction="/editor/cancel">Cancel</button>"#);
        }
        html.push_str(r#"<button type="submit" class="outline danger" formaction="/editor/clear">Clear All</button>"#);
        html.push_str("</div></form>");

        let border = self.workspace.border();
        let color_value = if is_hex_color(&border.color) {
            border.color.as_str()
        } else {
            "#000000"
        };
        let _ = write!(
            html,
            r#"<form method="post" action="/settings/border"><fieldset><legend>Border Settings</legend><label for="borderColor">Color</label><input type="color" id="borderColor" name="color" value="{}"><label for="borderSize">Size (px)</label><input type="number" id="borderSize" name="size" min="0" step="1" value="{}" placeholder="e.g. 2"><div class="button-row"><button type="submit" class="outline">Apply Border</button></div></fieldset></form>"#,
            escape(color_value),
            format_number(border.size)
        );

        let size = self.workspace.label_size();
        let _ = write!(
            html,
            r#"<form method="post" action="/settings/size"><fieldset><legend>Label Size</legend><label for="widthIn">Label Width (inches)</label><input type="number" id="widthIn" name="widthIn" min="0.01" step="0.01" value="{}"><label for="heightIn">Label Height (inches)</label><input type="number" id="heightIn" name="heightIn" min="0.01" step="0.01" value="{}"><div class="button-row"><button type="submit" class="outline">Apply Size</button></div></fieldset></form>"#,
            format_number(size.width_in),
            format_number(size.height_in)
        );

        html.push_str("</aside>");
    }

    fn write_notices(&self, html: &mut String) {
        if self.notices.is_empty() {
            return;
        }
        html.push_str(r#"<div class="notices no-print" role="status">"#);
        for notice in self.notices {
            let _ = write!(
                html,
                r#"<div class="notice {}"><strong>{}</strong>"#,
                notice.level.css_class(),
                escape(&notice.title)
            );
            if let Some(description) = &notice.description {
                let _ = write!(html, "<p>{}</p>", escape(description));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    fn write_clear_dialog(&self, html: &mut String) {
        if !self.editor.is_some_and(Editor::is_confirming_clear) {
            return;
        }
        html.push_str(concat!(
            r#"<div class="modal-overlay no-print"><div class="modal" role="alertdialog" aria-labelledby="clear-title">"#,
            r#"<h3 id="clear-title">Clear All Labels</h3>"#,
            "<p>Are you sure? All labels will be permanently removed. You can\u{2019}t undo this action.</p>",
            r#"<div class="button-row">"#,
            r#"<form method="post" action="/editor/clear/dismiss"><button type="submit" class="outline" autofocus>Cancel</button></form>"#,
            r#"<form method="post" action="/editor/clear/confirm"><button type="submit" class="danger">Clear All</button></form>"#,
            "</div></div></div>",
        ));
    }
}

/// Whether `color` is a `#rrggbb` value usable by a color input.
fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
