//! Server state and configuration.

use std::mem;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::editor::Editor;
use crate::notify::Notification;
use crate::workspace::Workspace;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
    /// Directory holding the persisted keys
    pub data_dir: PathBuf,
}

/// Everything one designer session mutates.
#[derive(Debug)]
pub struct Session {
    pub workspace: Workspace,
    pub editor: Editor,
    /// Notifications waiting for the next page render
    pub notices: Vec<Notification>,
}

impl Session {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            editor: Editor::new(),
            notices: Vec::new(),
        }
    }

    /// Queue a notification for the next render.
    pub fn notify(&mut self, notice: Notification) {
        self.notices.push(notice);
    }

    /// Take all queued notifications.
    pub fn drain_notices(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notices)
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn new(config: ServerConfig, workspace: Workspace) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            config,
            boot_time,
            session: RwLock::new(Session::new(workspace)),
        }
    }

    /// Stylesheet URL with the cache-busting suffix.
    pub fn stylesheet_href(&self) -> String {
        format!("/assets/{}?v={}", crate::assets::STYLESHEET, self.boot_time)
    }
}
