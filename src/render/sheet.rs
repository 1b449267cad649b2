//! # Sheet Renderer
//!
//! Renders the simulated sheet of paper with every label placed by
//! [`SheetLayout`]. The grid tracks, gaps, and left offset are taken
//! straight from the layout so that what the engine computes is exactly
//! what the browser draws.

use std::fmt::Write;

use super::RenderMode;
use super::label::LabelView;
use crate::label::LabelRecord;
use crate::layout::SheetLayout;
use crate::settings::SheetSettings;
use crate::units::css_in;

/// Highlight color for the label being edited
const SELECTED_COLOR: &str = "#FFCB05";

/// Renders the label sheet.
pub struct SheetView<'a> {
    labels: &'a [LabelRecord],
    settings: &'a SheetSettings,
    mode: RenderMode,
    selected: Option<usize>,
}

impl<'a> SheetView<'a> {
    pub fn new(labels: &'a [LabelRecord], settings: &'a SheetSettings, mode: RenderMode) -> Self {
        Self {
            labels,
            settings,
            mode,
            selected: None,
        }
    }

    /// Highlight one label (screen mode only).
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    /// The layout this view will draw.
    pub fn layout(&self) -> SheetLayout {
        SheetLayout::compute(self.settings.size, self.labels.len())
    }

    /// Render the sheet markup.
    pub fn render(&self) -> String {
        let layout = self.layout();
        let page = layout.page;
        let grid = layout.grid;
        let mut html = String::new();

        let _ = write!(
            html,
            r#"<div class="paper-mock" data-columns="{}" data-pages="{}" style="width:{};min-height:{};box-sizing:border-box;padding:{} {} {} {};background:#ffffff;position:relative;">"#,
            grid.columns,
            layout.page_count,
            css_in(page.width_in),
            css_in(page.height_in),
            css_in(layout.origin_y_in),
            css_in(page.margin_in),
            css_in(page.margin_in),
            css_in(layout.origin_x_in),
        );

        let _ = write!(
            html,
            r#"<div class="label-grid" style="display:grid;grid-template-columns:repeat({}, {});grid-auto-rows:{};column-gap:{};row-gap:{};grid-auto-flow:row;justify-content:start;">"#,
            grid.columns,
            css_in(grid.cell_width_in),
            css_in(grid.cell_height_in),
            css_in(grid.column_gap_in),
            css_in(grid.row_gap_in),
        );

        for cell in &layout.cells {
            let label = &self.labels[cell.index];
            self.write_cell(&mut html, cell.index, label);
        }

        html.push_str("</div></div>");
        html
    }

    fn write_cell(&self, html: &mut String, index: usize, label: &LabelRecord) {
        let size = self.settings.size;
        let _ = write!(
            html,
            r#"<div class="label-cell" data-index="{}" style="width:{};height:{};position:relative;">"#,
            index,
            css_in(size.width_in),
            css_in(size.height_in),
        );

        LabelView::new(label, self.settings).write_to(html);

        if !self.mode.is_print() {
            if self.selected == Some(index) {
                let _ = write!(
                    html,
                    r#"<div class="selected-highlight no-print" style="position:absolute;inset:0;pointer-events:none;box-shadow:inset 0 0 0 4px {};"></div>"#,
                    SELECTED_COLOR
                );
            }
            let _ = write!(
                html,
                r#"<div class="card-icons no-print"><form method="post" action="/editor/edit/{i}"><button type="submit" title="Edit label" aria-label="Edit label">Edit</button></form><form method="post" action="/labels/{i}/delete"><button type="submit" class="danger" title="Delete label" aria-label="Delete label">Delete</button></form></div>"#,
                i = index
            );
        }

        html.push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LabelSize;

    fn labels(n: usize) -> Vec<LabelRecord> {
        (0..n)
            .map(|i| LabelRecord::new("2024", format!("Card {}", i)))
            .collect()
    }

    #[test]
    fn test_grid_template_three_columns() {
        let settings = SheetSettings::default();
        let list = labels(7);
        let html = SheetView::new(&list, &settings, RenderMode::Print).render();
        assert!(html.contains("grid-template-columns:repeat(3, 2.65in);grid-auto-rows:0.8in;column-gap:0.01in;row-gap:0.03in;"));
        assert!(html.contains("width:8.5in;min-height:11in;"));
        assert!(html.contains("padding:0.25in 0.25in 0.25in 0.265in;"));
        assert_eq!(html.matches(r#"class="label-cell""#).count(), 7);
    }

    #[test]
    fn test_grid_template_two_columns() {
        let settings = SheetSettings {
            size: LabelSize::new(3.5, 1.25).unwrap(),
            ..Default::default()
        };
        let list = labels(2);
        let html = SheetView::new(&list, &settings, RenderMode::Screen).render();
        assert!(html.contains("repeat(2, 3.5in);grid-auto-rows:1.25in;column-gap:0.2in;"));
        assert!(html.contains(r#"data-columns="2""#));
    }

    #[test]
    fn test_labels_in_list_order() {
        let settings = SheetSettings::default();
        let list = labels(4);
        let html = SheetView::new(&list, &settings, RenderMode::Print).render();
        let positions: Vec<usize> = (0..4)
            .map(|i| html.find(&format!(">Card {}<", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_sheet_renders_page() {
        let settings = SheetSettings::default();
        let html = SheetView::new(&[], &settings, RenderMode::Print).render();
        assert!(html.contains("paper-mock"));
        assert!(!html.contains("label-cell"));
    }

    #[test]
    fn test_print_mode_has_no_controls() {
        let settings = SheetSettings::default();
        let list = labels(2);
        let print = SheetView::new(&list, &settings, RenderMode::Print)
            .selected(Some(0))
            .render();
        assert!(!print.contains("<form"));
        assert!(!print.contains("selected-highlight"));

        let screen = SheetView::new(&list, &settings, RenderMode::Screen)
            .selected(Some(1))
            .render();
        assert_eq!(screen.matches("/delete").count(), 2);
        assert_eq!(screen.matches("selected-highlight").count(), 1);
    }
}
