//! # Label Editor
//!
//! The form's state machine. It holds one set of field buffers and is
//! always in one of two modes:
//!
//! ```text
//!            begin_edit(i)
//!   ┌────────┐ ─────────────▶ ┌─────────┐
//!   │ Create │                │ Edit(i) │
//!   └────────┘ ◀───────────── └─────────┘
//!     │  ▲      save / cancel / clear-all
//!     └──┘
//!     save (append, buffers kept as a template)
//! ```
//!
//! Buffers survive saves and cancels so similar labels can be entered in
//! quick succession. Only a confirmed clear-all blanks them.

use serde::Serialize;

use crate::error::SlabelError;
use crate::label::LabelRecord;
use crate::notify::Notification;
use crate::store::LabelStore;

/// Storage the editor writes through.
pub trait LabelRecords {
    fn record(&self, index: usize) -> Option<&LabelRecord>;
    fn record_count(&self) -> usize;
    fn append(&mut self, label: LabelRecord) -> Result<(), SlabelError>;
    /// Returns `Ok(false)` when `index` is out of range.
    fn overwrite(&mut self, index: usize, label: LabelRecord) -> Result<bool, SlabelError>;
    fn clear(&mut self) -> Result<(), SlabelError>;
}

impl LabelRecords for LabelStore {
    fn record(&self, index: usize) -> Option<&LabelRecord> {
        self.get(index)
    }

    fn record_count(&self) -> usize {
        self.len()
    }

    fn append(&mut self, label: LabelRecord) -> Result<(), SlabelError> {
        self.add(label);
        Ok(())
    }

    fn overwrite(&mut self, index: usize, label: LabelRecord) -> Result<bool, SlabelError> {
        Ok(self.update(index, label))
    }

    fn clear(&mut self) -> Result<(), SlabelError> {
        LabelStore::clear(self);
        Ok(())
    }
}

/// Which record a save will write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "index", rename_all = "lowercase")]
pub enum EditorMode {
    /// Save appends a new label
    #[default]
    Create,
    /// Save overwrites the label at this index
    Edit(usize),
}

/// Form state for one label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    mode: EditorMode,
    fields: LabelRecord,
    confirming_clear: bool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    /// Index being edited, if any.
    pub fn editing_index(&self) -> Option<usize> {
        match self.mode {
            EditorMode::Edit(i) => Some(i),
            EditorMode::Create => None,
        }
    }

    /// Current field buffers.
    pub fn fields(&self) -> &LabelRecord {
        &self.fields
    }

    /// Replace the field buffers (form input).
    pub fn set_fields(&mut self, fields: LabelRecord) {
        self.fields = fields;
    }

    /// Whether the clear-all confirmation is open.
    pub fn is_confirming_clear(&self) -> bool {
        self.confirming_clear
    }

    /// Load record `index` into the buffers and switch to edit mode.
    ///
    /// An index outside the list leaves mode and buffers untouched.
    pub fn begin_edit(&mut self, records: &impl LabelRecords, index: usize) -> bool {
        match records.record(index) {
            Some(label) => {
                self.fields = label.clone();
                self.mode = EditorMode::Edit(index);
                true
            }
            None => {
                tracing::debug!(index, "edit ignored: index out of range");
                false
            }
        }
    }

    /// Validate the buffers and write them through.
    ///
    /// Returns the notification to show. Validation failures are reported as
    /// warnings; only storage failures surface as `Err`.
    pub fn save(&mut self, records: &mut impl LabelRecords) -> Result<Notification, SlabelError> {
        if !self.fields.has_identity() {
            return Ok(Notification::warning("Please enter at least a Card Name or Set!"));
        }

        match self.mode {
            EditorMode::Create => {
                records.append(self.fields.clone())?;
                Ok(Notification::success("Label added!")
                    .describe("Your label has been added to the list."))
            }
            EditorMode::Edit(index) => {
                records.overwrite(index, self.fields.clone())?;
                self.mode = EditorMode::Create;
                Ok(Notification::success("Label updated!")
                    .describe(format!("Label #{} has been updated.", index + 1)))
            }
        }
    }

    /// Leave edit mode without saving. Buffers are kept.
    pub fn cancel_edit(&mut self) {
        self.mode = EditorMode::Create;
    }

    /// Open the clear-all confirmation.
    pub fn request_clear_all(&mut self) {
        self.confirming_clear = true;
    }

    /// Close the clear-all confirmation without clearing.
    pub fn dismiss_clear_all(&mut self) {
        self.confirming_clear = false;
    }

    /// Clear every label, blank the buffers, and return to create mode.
    ///
    /// Does nothing unless [`request_clear_all`](Self::request_clear_all)
    /// was called first.
    pub fn confirm_clear_all(
        &mut self,
        records: &mut impl LabelRecords,
    ) -> Result<Option<Notification>, SlabelError> {
        if !self.confirming_clear {
            return Ok(None);
        }
        records.clear()?;
        self.confirming_clear = false;
        self.mode = EditorMode::Create;
        self.fields = LabelRecord::default();
        Ok(Some(Notification::info("All labels cleared.")))
    }

    /// Keep the edit index pointing at the same record after a deletion.
    ///
    /// Deleting the record being edited returns to create mode; deleting an
    /// earlier record shifts the index down by one.
    pub fn label_removed(&mut self, removed: usize) {
        if let EditorMode::Edit(index) = self.mode {
            if index == removed {
                self.mode = EditorMode::Create;
            } else if removed < index {
                self.mode = EditorMode::Edit(index - 1);
            }
        }
    }

    /// Drop edit mode if the index no longer exists (e.g. after an import).
    pub fn revalidate(&mut self, records: &impl LabelRecords) {
        if let EditorMode::Edit(index) = self.mode
            && index >= records.record_count()
        {
            self.mode = EditorMode::Create;
        }
    }
}
