//! # Slabel - Trading Card Slab Label Designer
//!
//! Slabel lays out small text labels for graded trading-card slabs and
//! renders them as HTML in physical inches, so the browser prints them at
//! exact size on a letter sheet. It provides:
//!
//! - **Label records**: six-field label content in insertion order
//! - **Layout**: a 2- or 3-column grid on an 8.5in × 11in page
//! - **Rendering**: label, sheet, and full designer page markup
//! - **Persistence**: a key-value storage seam with file and memory backends
//! - **Transfer**: JSON export and tolerant import
//! - **Server**: an axum web designer with a small JSON API
//!
//! ## Quick Start
//!
//! ```
//! use slabel::{LabelRecord, Workspace};
//! use slabel::render::{RenderMode, page::DesignerPage};
//!
//! let mut workspace = Workspace::in_memory();
//! workspace.add_label(LabelRecord::new("2000 Neo Genesis", "Lugia").grade("PSA", "10"))?;
//!
//! let layout = workspace.layout();
//! assert_eq!(layout.grid.columns, 3);
//!
//! let html = DesignerPage::new(&workspace, RenderMode::Print).render();
//! assert!(html.contains("Lugia"));
//!
//! # Ok::<(), slabel::SlabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`label`] | Label record type |
//! | [`store`] | Ordered label list |
//! | [`settings`] | Border and label size |
//! | [`layout`] | Page grid geometry |
//! | [`render`] | HTML rendering |
//! | [`editor`] | Create/Edit state machine |
//! | [`workspace`] | Persisted working set |
//! | [`storage`] | Storage backends |
//! | [`transfer`] | Export and import |
//! | [`server`] | HTTP server |
//! | [`error`] | Error types |

pub mod assets;
pub mod editor;
pub mod error;
pub mod label;
pub mod layout;
pub mod notify;
pub mod render;
pub mod server;
pub mod settings;
pub mod storage;
pub mod store;
pub mod theme;
pub mod transfer;
pub mod units;
pub mod workspace;

// Re-exports for convenience
pub use editor::{Editor, EditorMode, LabelRecords};
pub use error::SlabelError;
pub use label::LabelRecord;
pub use layout::SheetLayout;
pub use notify::{Level, Notification};
pub use render::RenderMode;
pub use settings::{BorderSettings, LabelSize, SheetSettings};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::LabelStore;
pub use workspace::{Workspace, WorkspaceUpdate};
