use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// Front-end files served verbatim from the static directory.
/// A file missing on disk answers 404.
const ASSETS: [&str; 5] = [
    "styles.css",
    "script.js",
    "favicon.ico",
    "favicon.svg",
    "favicon.png",
];

pub fn asset_routes(static_dir: &Path) -> Router<AppState> {
    ASSETS.iter().fold(Router::new(), |router, name| {
        router.route_service(&format!("/{name}"), ServeFile::new(static_dir.join(name)))
    })
}
