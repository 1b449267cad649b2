//! Static assets embedded into the binary.

use include_dir::{Dir, include_dir};

/// Embedded `assets/` directory.
pub static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// File name of the designer stylesheet inside [`ASSETS`]
pub const STYLESHEET: &str = "designer.css";

/// Contents of a text asset, if present.
pub fn text(path: &str) -> Option<&'static str> {
    ASSETS.get_file(path).and_then(|f| f.contents_utf8())
}
