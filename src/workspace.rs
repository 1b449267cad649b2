//! # Workspace
//!
//! The persisted working set: label list, border settings, label size, and
//! theme selection, bound to a storage backend.
//!
//! ## Loading
//!
//! Each entity loads once, independently. A missing or malformed key falls
//! back to that entity's default and never fails the load:
//!
//! | Key | Default |
//! |-----|---------|
//! | `labels` | one sample label |
//! | `globalBorder` | no border |
//! | `globalLabelSize` | 2.65in × 0.8in |
//! | `themeIndex` | 0 |
//!
//! ## Writing
//!
//! Every mutation writes the affected key before touching memory. If the
//! write fails the in-memory state is left as it was, so memory and storage
//! never disagree.

use serde::Serialize;

use crate::editor::LabelRecords;
use crate::error::SlabelError;
use crate::label::LabelRecord;
use crate::layout::SheetLayout;
use crate::settings::{BorderSettings, LabelSize, SheetSettings, StoredBorder, StoredLabelSize};
use crate::storage::{
    self, BORDER_KEY, KeyValueStore, LABEL_SIZE_KEY, LABELS_KEY, MemoryStore, THEME_KEY,
};
use crate::store::LabelStore;
use crate::theme::{self, BrandTheme};

/// The label designer's state, bound to durable storage.
pub struct Workspace {
    storage: Box<dyn KeyValueStore>,
    labels: LabelStore,
    settings: SheetSettings,
    theme_index: usize,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("labels", &self.labels)
            .field("settings", &self.settings)
            .field("theme_index", &self.theme_index)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Load every entity from `storage`, substituting defaults as needed.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let labels = storage::load_json::<Vec<LabelRecord>>(storage.as_ref(), LABELS_KEY)
            .unwrap_or_else(|| vec![LabelRecord::sample()]);

        let border = storage::load_object::<StoredBorder>(storage.as_ref(), BORDER_KEY)
            .map(BorderSettings::from_stored)
            .unwrap_or_default();

        let size = storage::load_object::<StoredLabelSize>(storage.as_ref(), LABEL_SIZE_KEY)
            .map(LabelSize::from_stored)
            .unwrap_or_default();

        let theme_index = storage::load_json::<usize>(storage.as_ref(), THEME_KEY)
            .map(theme::normalize_index)
            .unwrap_or(0);

        tracing::debug!(
            labels = labels.len(),
            width_in = size.width_in,
            height_in = size.height_in,
            "workspace loaded"
        );

        Self {
            storage,
            labels: LabelStore::from_labels(labels),
            settings: SheetSettings { border, size },
            theme_index,
        }
    }

    /// A workspace backed by volatile memory.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    pub fn settings(&self) -> &SheetSettings {
        &self.settings
    }

    pub fn border(&self) -> &BorderSettings {
        &self.settings.border
    }

    pub fn label_size(&self) -> LabelSize {
        self.settings.size
    }

    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    pub fn theme(&self) -> &'static BrandTheme {
        theme::by_index(self.theme_index)
    }

    /// Current sheet layout for the stored labels.
    pub fn layout(&self) -> SheetLayout {
        SheetLayout::compute(self.settings.size, self.labels.len())
    }

    // ========================================================================
    // LABEL MUTATIONS
    // ========================================================================

    /// Append a label.
    pub fn add_label(&mut self, label: LabelRecord) -> Result<(), SlabelError> {
        let mut next = self.labels.clone();
        next.add(label);
        self.commit_labels(next)?;
        tracing::info!(count = self.labels.len(), "label added");
        Ok(())
    }

    /// Replace the label at `index`. Out of range is a silent no-op
    /// returning `Ok(false)`.
    pub fn update_label(&mut self, index: usize, label: LabelRecord) -> Result<bool, SlabelError> {
        let mut next = self.labels.clone();
        if !next.update(index, label) {
            tracing::debug!(index, len = self.labels.len(), "update ignored: index out of range");
            return Ok(false);
        }
        self.commit_labels(next)?;
        tracing::info!(index, "label updated");
        Ok(true)
    }

    /// Remove the label at `index`. Out of range is a silent no-op
    /// returning `Ok(None)`.
    pub fn remove_label(&mut self, index: usize) -> Result<Option<LabelRecord>, SlabelError> {
        let mut next = self.labels.clone();
        let Some(removed) = next.remove(index) else {
            tracing::debug!(index, len = self.labels.len(), "remove ignored: index out of range");
            return Ok(None);
        };
        self.commit_labels(next)?;
        tracing::info!(index, count = self.labels.len(), "label removed");
        Ok(Some(removed))
    }

    /// Remove every label.
    pub fn clear_labels(&mut self) -> Result<(), SlabelError> {
        self.commit_labels(LabelStore::new())?;
        tracing::info!("all labels cleared");
        Ok(())
    }

    fn commit_labels(&mut self, next: LabelStore) -> Result<(), SlabelError> {
        self.persist(LABELS_KEY, next.as_slice())?;
        self.labels = next;
        Ok(())
    }

    // ========================================================================
    // SETTINGS MUTATIONS
    // ========================================================================

    /// Replace border settings. Colors that are not plain CSS color values
    /// are rejected.
    pub fn set_border(&mut self, border: BorderSettings) -> Result<(), SlabelError> {
        let border = BorderSettings::new(border.color, border.size);
        border.validate()?;
        self.persist(BORDER_KEY, &border)?;
        tracing::info!(color = %border.color, size = border.size, "border updated");
        self.settings.border = border;
        Ok(())
    }

    /// Change only the border color.
    pub fn set_border_color(&mut self, color: impl Into<String>) -> Result<(), SlabelError> {
        let size = self.settings.border.size;
        self.set_border(BorderSettings::new(color, size))
    }

    /// Change only the border thickness.
    pub fn set_border_size(&mut self, size: f64) -> Result<(), SlabelError> {
        let color = self.settings.border.color.clone();
        self.set_border(BorderSettings::new(color, size))
    }

    /// Replace the label size.
    pub fn set_label_size(&mut self, size: LabelSize) -> Result<(), SlabelError> {
        let size = LabelSize::new(size.width_in, size.height_in)?;
        self.persist(LABEL_SIZE_KEY, &size)?;
        self.settings.size = size;

        log_label_size(size);
        Ok(())
    }

    /// Change only the label width.
    pub fn set_label_width(&mut self, width_in: f64) -> Result<(), SlabelError> {
        let height_in = self.settings.size.height_in;
        self.set_label_size(LabelSize::new(width_in, height_in)?)
    }

    /// Change only the label height.
    pub fn set_label_height(&mut self, height_in: f64) -> Result<(), SlabelError> {
        let width_in = self.settings.size.width_in;
        self.set_label_size(LabelSize::new(width_in, height_in)?)
    }

    /// Select a theme; out-of-range indices select the default.
    pub fn set_theme(&mut self, index: usize) -> Result<(), SlabelError> {
        let index = theme::normalize_index(index);
        self.persist(THEME_KEY, &index)?;
        self.theme_index = index;
        tracing::info!(theme = self.theme().name, "theme selected");
        Ok(())
    }

    // ========================================================================
    // BATCH UPDATES
    // ========================================================================

    /// Apply several changes as one unit.
    ///
    /// Every value is validated before anything is written. If any key fails
    /// to write, keys already written are restored to their previous stored
    /// values and memory is left untouched.
    pub fn apply_update(&mut self, update: WorkspaceUpdate) -> Result<(), SlabelError> {
        let border = update
            .border
            .map(|b| {
                let border = BorderSettings::new(b.color, b.size);
                border.validate().map(|()| border)
            })
            .transpose()?;
        let size = update
            .size
            .map(|s| LabelSize::new(s.width_in, s.height_in))
            .transpose()?;

        let mut entries: Vec<(&'static str, String)> = Vec::new();
        if let Some(labels) = &update.labels {
            entries.push((LABELS_KEY, serde_json::to_string(labels)?));
        }
        if let Some(border) = &border {
            entries.push((BORDER_KEY, serde_json::to_string(border)?));
        }
        if let Some(size) = &size {
            entries.push((LABEL_SIZE_KEY, serde_json::to_string(size)?));
        }
        if entries.is_empty() {
            return Ok(());
        }
        self.persist_all(&entries)?;

        if let Some(labels) = update.labels {
            self.labels = LabelStore::from_labels(labels);
        }
        if let Some(border) = border {
            self.settings.border = border;
        }
        if let Some(size) = size {
            self.settings.size = size;
            log_label_size(size);
        }
        tracing::info!(keys = entries.len(), count = self.labels.len(), "workspace update applied");
        Ok(())
    }

    fn persist_all(&mut self, entries: &[(&'static str, String)]) -> Result<(), SlabelError> {
        let mut written: Vec<(&'static str, Option<String>)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key = *key;
            let result = self.storage.get(key).and_then(|previous| {
                self.storage.set(key, value)?;
                Ok(previous)
            });
            match result {
                Ok(previous) => written.push((key, previous)),
                Err(e) => {
                    tracing::error!(key, error = %e, "failed to persist, rolling back");
                    self.rollback(written);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn rollback(&mut self, written: Vec<(&'static str, Option<String>)>) {
        for (key, previous) in written.into_iter().rev() {
            let restored = match previous {
                Some(value) => self.storage.set(key, &value),
                None => self.storage.remove(key),
            };
            if let Err(e) = restored {
                tracing::error!(key, error = %e, "rollback failed, stored value may be stale");
            }
        }
    }

    fn persist<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), SlabelError> {
        storage::save_json(self.storage.as_mut(), key, value).inspect_err(|e| {
            tracing::error!(key, error = %e, "failed to persist");
        })
    }
}

/// Changes applied together by [`Workspace::apply_update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceUpdate {
    /// Replacement label list
    pub labels: Option<Vec<LabelRecord>>,
    pub border: Option<BorderSettings>,
    pub size: Option<LabelSize>,
}

fn log_label_size(size: LabelSize) {
    let layout = SheetLayout::compute(size, 0);
    tracing::info!(
        width_in = size.width_in,
        height_in = size.height_in,
        columns = layout.grid.columns,
        "label size updated"
    );
    if !layout.fits_width() {
        tracing::warn!(
            overflow_in = layout.overflow_x_in,
            "labels are wider than the printable area and will be clipped"
        );
    }
}

impl LabelRecords for Workspace {
    fn record(&self, index: usize) -> Option<&LabelRecord> {
        self.labels.get(index)
    }

    fn record_count(&self) -> usize {
        self.labels.len()
    }

    fn append(&mut self, label: LabelRecord) -> Result<(), SlabelError> {
        self.add_label(label)
    }

    fn overwrite(&mut self, index: usize, label: LabelRecord) -> Result<bool, SlabelError> {
        self.update_label(index, label)
    }

    fn clear(&mut self) -> Result<(), SlabelError> {
        self.clear_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: std::sync::Arc<std::sync::atomic::AtomicBool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, SlabelError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SlabelError> {
            if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(SlabelError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), SlabelError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_defaults_when_storage_empty() {
        let ws = Workspace::in_memory();
        assert_eq!(ws.labels().as_slice(), &[LabelRecord::sample()]);
        assert_eq!(ws.border(), &BorderSettings::default());
        assert_eq!(ws.label_size(), LabelSize::default());
        assert_eq!(ws.theme_index(), 0);
    }

    #[test]
    fn test_malformed_entries_fall_back_independently() {
        let store = MemoryStore::new()
            .with(LABELS_KEY, "not json")
            .with(BORDER_KEY, r##"{"color":"#123456","size":2}"##)
            .with(LABEL_SIZE_KEY, "[1, 2]")
            .with(THEME_KEY, "42");
        let ws = Workspace::load(Box::new(store));
        assert_eq!(ws.labels().as_slice(), &[LabelRecord::sample()]);
        assert_eq!(ws.border(), &BorderSettings::new("#123456", 2.0));
        assert_eq!(ws.label_size(), LabelSize::default());
        assert_eq!(ws.theme_index(), 0);
    }

    #[test]
    fn test_array_settings_fall_back() {
        let store = MemoryStore::new()
            .with(BORDER_KEY, r##"["#123456", 2]"##)
            .with(LABEL_SIZE_KEY, "[3.5, 1.25]");
        let ws = Workspace::load(Box::new(store));
        assert_eq!(ws.border(), &BorderSettings::default());
        assert_eq!(ws.label_size(), LabelSize::default());
    }

    #[test]
    fn test_stored_empty_list_is_respected() {
        let ws = Workspace::load(Box::new(MemoryStore::new().with(LABELS_KEY, "[]")));
        assert!(ws.labels().is_empty());
    }

    #[test]
    fn test_mutations_persist() {
        let mut ws = Workspace::in_memory();
        ws.clear_labels().unwrap();
        ws.add_label(LabelRecord::new("", "Pikachu")).unwrap();
        ws.set_border(BorderSettings::new("#000000", 1.0)).unwrap();
        ws.set_label_width(3.0).unwrap();
        ws.set_theme(2).unwrap();

        let stored = ws.storage.get(LABELS_KEY).unwrap().unwrap();
        let labels: Vec<LabelRecord> = serde_json::from_str(&stored).unwrap();
        assert_eq!(labels, vec![LabelRecord::new("", "Pikachu")]);

        let stored = ws.storage.get(BORDER_KEY).unwrap().unwrap();
        assert_eq!(stored, r##"{"color":"#000000","size":1.0}"##);

        let stored = ws.storage.get(LABEL_SIZE_KEY).unwrap().unwrap();
        assert_eq!(stored, r#"{"widthIn":3.0,"heightIn":0.8}"#);

        assert_eq!(ws.storage.get(THEME_KEY).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let mut ws = Workspace::in_memory();
        assert!(!ws.update_label(5, LabelRecord::default()).unwrap());
        assert_eq!(ws.remove_label(5).unwrap(), None);
        assert_eq!(ws.labels().len(), 1);
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let store = FlakyStore::default();
        let switch = store.fail_writes.clone();
        let mut ws = Workspace::load(Box::new(store));
        switch.store(true, std::sync::atomic::Ordering::SeqCst);

        assert!(ws.add_label(LabelRecord::new("", "Mew")).is_err());
        assert!(ws.clear_labels().is_err());
        assert!(ws.set_border_size(4.0).is_err());
        assert_eq!(ws.labels().as_slice(), &[LabelRecord::sample()]);
        assert_eq!(ws.border(), &BorderSettings::default());
    }

    #[test]
    fn test_unsafe_border_color_rejected() {
        let mut ws = Workspace::in_memory();
        let err = ws.set_border_color("red;width:9in").unwrap_err();
        assert!(matches!(err, SlabelError::Validation(_)));
        assert_eq!(ws.border(), &BorderSettings::default());
        assert_eq!(ws.storage.get(BORDER_KEY).unwrap(), None);
    }

    /// A store that refuses writes to one key.
    struct StubbornStore {
        inner: MemoryStore,
        failing_key: &'static str,
    }

    impl KeyValueStore for StubbornStore {
        fn get(&self, key: &str) -> Result<Option<String>, SlabelError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SlabelError> {
            if key == self.failing_key {
                return Err(SlabelError::Storage(format!("{} is read-only", key)));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), SlabelError> {
            self.inner.remove(key)
        }
    }

    fn full_update() -> WorkspaceUpdate {
        WorkspaceUpdate {
            labels: Some(vec![LabelRecord::new("", "Lapras")]),
            border: Some(BorderSettings::new("#00ff00", 3.0)),
            size: Some(LabelSize::new(3.0, 1.0).unwrap()),
        }
    }

    #[test]
    fn test_update_writes_every_key() {
        let mut ws = Workspace::in_memory();
        ws.apply_update(full_update()).unwrap();
        assert_eq!(ws.labels().as_slice(), &[LabelRecord::new("", "Lapras")]);
        assert_eq!(ws.border(), &BorderSettings::new("#00ff00", 3.0));
        assert_eq!(ws.label_size(), LabelSize::new(3.0, 1.0).unwrap());
        assert!(ws.storage.get(LABEL_SIZE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_failed_update_rolls_back_written_keys() {
        let store = StubbornStore {
            inner: MemoryStore::new(),
            failing_key: LABEL_SIZE_KEY,
        };
        let mut ws = Workspace::load(Box::new(store));
        ws.add_label(LabelRecord::new("", "Mew")).unwrap();
        let stored_labels = ws.storage.get(LABELS_KEY).unwrap();

        assert!(ws.apply_update(full_update()).is_err());

        assert_eq!(ws.storage.get(LABELS_KEY).unwrap(), stored_labels);
        assert_eq!(ws.storage.get(BORDER_KEY).unwrap(), None);
        assert_eq!(ws.labels().len(), 2);
        assert_eq!(ws.border(), &BorderSettings::default());
        assert_eq!(ws.label_size(), LabelSize::default());
    }

    #[test]
    fn test_update_validates_before_writing() {
        let mut ws = Workspace::in_memory();
        let update = WorkspaceUpdate {
            labels: Some(Vec::new()),
            border: Some(BorderSettings::new("red;width:9in", 2.0)),
            size: None,
        };
        assert!(ws.apply_update(update).is_err());
        assert_eq!(ws.storage.get(LABELS_KEY).unwrap(), None);
        assert_eq!(ws.labels().len(), 1);
    }

    #[test]
    fn test_invalid_label_size_rejected() {
        let mut ws = Workspace::in_memory();
        assert!(ws.set_label_width(0.0).is_err());
        assert!(ws.set_label_height(-1.0).is_err());
        assert_eq!(ws.label_size(), LabelSize::default());
    }

    #[test]
    fn test_layout_tracks_size() {
        let mut ws = Workspace::in_memory();
        assert_eq!(ws.layout().grid.columns, 3);
        ws.set_label_width(2.9).unwrap();
        assert_eq!(ws.layout().grid.columns, 2);
    }
}
