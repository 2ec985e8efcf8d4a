//! Embedded static assets
//!
//! Anything missing from the embedded bundle is looked up under the
//! configured UI directory.

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Load an asset by its path relative to the UI root
pub fn load(ui_dir: &Path, path: &str) -> Option<Vec<u8>> {
    let path = path.trim_start_matches('/');
    if path.split('/').any(|part| part == "..") {
        return None;
    }

    if let Some(content) = Assets::get(path) {
        return Some(content.data.into_owned());
    }

    let fs_path = ui_dir.join(path);
    if fs_path.is_file() {
        return std::fs::read(&fs_path).ok();
    }
    None
}

/// Serve an asset with a content type guessed from its extension
pub fn serve(ui_dir: &Path, path: &str) -> Response<Body> {
    match load(ui_dir, path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref().to_string())], content).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
