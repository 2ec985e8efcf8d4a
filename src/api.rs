//! HTTP API for the learning assistant
//!
//! Serves the static pages, the conversation endpoints backing the chat
//! widgets, and stateless access to the reply matcher.

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::RuntimeManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<RuntimeManager>,
    /// Directory searched for assets missing from the embedded bundle
    pub ui_dir: Arc<Path>,
}

impl AppState {
    pub fn new(runtime: RuntimeManager, ui_dir: PathBuf) -> Self {
        Self {
            runtime: Arc::new(runtime),
            ui_dir: Arc::from(ui_dir),
        }
    }
}
