//! # Export / Import
//!
//! Moves the whole working set in and out as a single JSON document:
//!
//! ```json
//! {
//!   "labels": [{ "yearSetLine": "...", "playerLine": "...", ... }],
//!   "borderColor": "#000000",
//!   "borderSize": 1,
//!   "labelWidthIn": 2.65,
//!   "labelHeightIn": 0.8
//! }
//! ```
//!
//! ## Import Rules
//!
//! Import is tolerant of partial documents (older exports carry only
//! `labels`, `borderColor`, and `borderSize`):
//!
//! - the top level must be a JSON object, otherwise nothing is applied
//! - `labels`, when an array, replaces the whole list
//! - every other key is applied only when present with the right type
//! - unknown keys are ignored
//!
//! The document is fully parsed into an [`ImportPatch`] before anything is
//! applied, so a bad file never half-applies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SlabelError;
use crate::label::LabelRecord;
use crate::notify::Notification;
use crate::settings::{self, BorderSettings};
use crate::workspace::{Workspace, WorkspaceUpdate};

/// Suggested file name for exports
pub const EXPORT_FILE_NAME: &str = "slab-labels.json";

/// The export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub labels: Vec<LabelRecord>,
    pub border_color: String,
    pub border_size: f64,
    pub label_width_in: f64,
    pub label_height_in: f64,
}

impl ExportDocument {
    /// Snapshot a workspace.
    pub fn from_workspace(workspace: &Workspace) -> Self {
        let settings = workspace.settings();
        Self {
            labels: workspace.labels().as_slice().to_vec(),
            border_color: settings.border.color.clone(),
            border_size: settings.border.size,
            label_width_in: settings.size.width_in,
            label_height_in: settings.size.height_in,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, SlabelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Export a workspace as pretty-printed JSON.
pub fn export_json(workspace: &Workspace) -> Result<String, SlabelError> {
    ExportDocument::from_workspace(workspace).to_json()
}

// ============================================================================
// IMPORT
// ============================================================================

/// The recognized parts of an import document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPatch {
    pub labels: Option<Vec<LabelRecord>>,
    pub border_color: Option<String>,
    pub border_size: Option<f64>,
    pub label_width_in: Option<f64>,
    pub label_height_in: Option<f64>,
}

impl ImportPatch {
    /// Parse import text.
    ///
    /// ## Example
    ///
    /// ```
    /// use slabel::transfer::ImportPatch;
    ///
    /// let patch = ImportPatch::parse(r#"{"labels": [{"playerLine": "Pikachu"}]}"#).unwrap();
    /// assert_eq!(patch.labels.unwrap()[0].player_line, "Pikachu");
    /// assert!(patch.border_color.is_none());
    ///
    /// assert!(ImportPatch::parse("not json").is_err());
    /// assert!(ImportPatch::parse("[1, 2, 3]").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SlabelError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SlabelError::Import(format!("not valid JSON: {}", e)))?;
        let Value::Object(root) = value else {
            return Err(SlabelError::Import(
                "expected a JSON object at the top level".to_string(),
            ));
        };
        Ok(Self::from_object(&root))
    }

    fn from_object(root: &Map<String, Value>) -> Self {
        let labels = root
            .get("labels")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(label_from_value).collect());

        let positive = |key: &str| {
            let value = root.get(key).and_then(Value::as_f64)?;
            if settings::is_valid_dimension(value) {
                Some(value)
            } else {
                tracing::warn!(key, value, "ignoring non-positive label dimension in import");
                None
            }
        };

        Self {
            labels,
            border_color: root
                .get("borderColor")
                .and_then(Value::as_str)
                .filter(|color| {
                    let ok = settings::is_css_color(color);
                    if !ok {
                        tracing::warn!(color, "ignoring unusable border color in import");
                    }
                    ok
                })
                .map(str::to_string),
            border_size: root.get("borderSize").and_then(Value::as_f64),
            label_width_in: positive("labelWidthIn"),
            label_height_in: positive("labelHeightIn"),
        }
    }

    /// Whether the document contained nothing applicable.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rebuild one label, defaulting each field independently.
fn label_from_value(value: &Value) -> LabelRecord {
    let field = |key: &str| match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    LabelRecord {
        year_set_line: field("yearSetLine"),
        player_line: field("playerLine"),
        variation_line: field("variationLine"),
        card_number: field("cardNumber"),
        grade_term: field("gradeTerm"),
        grade_number: field("gradeNumber"),
    }
}

/// What an import changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Number of labels loaded, if the list was replaced
    pub labels: Option<usize>,
    pub border: bool,
    pub label_size: bool,
}

/// Apply a parsed patch to a workspace.
///
/// Every affected key is written as one update, so a storage failure part
/// way through leaves both storage and memory as they were.
pub fn apply(workspace: &mut Workspace, patch: ImportPatch) -> Result<ImportSummary, SlabelError> {
    let mut summary = ImportSummary::default();
    let mut update = WorkspaceUpdate::default();

    if let Some(labels) = patch.labels {
        summary.labels = Some(labels.len());
        update.labels = Some(labels);
    }

    if patch.border_color.is_some() || patch.border_size.is_some() {
        let current = workspace.border();
        update.border = Some(BorderSettings::new(
            patch.border_color.unwrap_or_else(|| current.color.clone()),
            patch.border_size.unwrap_or(current.size),
        ));
        summary.border = true;
    }

    if patch.label_width_in.is_some() || patch.label_height_in.is_some() {
        let current = workspace.label_size();
        update.size = Some(settings::LabelSize::new(
            patch.label_width_in.unwrap_or(current.width_in),
            patch.label_height_in.unwrap_or(current.height_in),
        )?);
        summary.label_size = true;
    }

    workspace.apply_update(update)?;
    Ok(summary)
}

/// The notification shown for any file that cannot be imported.
pub fn import_failed() -> Notification {
    Notification::error("Import failed").describe("Invalid JSON file or structure.")
}

/// Parse and apply import text, producing the notification to show.
///
/// `file_name` is only used in the message.
pub fn import_text(workspace: &mut Workspace, file_name: &str, text: &str) -> Notification {
    let result = ImportPatch::parse(text).and_then(|patch| apply(workspace, patch));
    match result {
        Ok(summary) => {
            tracing::info!(file = file_name, ?summary, "import applied");
            Notification::success("Import successful!")
                .describe(format!("Imported labels from {}", file_name))
        }
        Err(e) => {
            tracing::warn!(file = file_name, error = %e, "import failed");
            import_failed()
        }
    }
}
