pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod routes;
pub mod upstream;

use std::sync::Arc;

use carelead_contact::{ContactStore, FileStore};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use config::Config;
pub use routes::AppState;

/// Build application state from configuration
///
/// Submissions go to `<storage.data_dir>/contacts.json`; the file is only
/// created on first use.
pub fn create_state(config: &Config) -> anyhow::Result<AppState> {
    let store: Arc<dyn ContactStore> = Arc::new(FileStore::new(&config.storage.data_dir));

    Ok(AppState {
        store,
        email: email::EmailService::new(&config.email)?,
        upstream: upstream::UpstreamClient::new(&config.upstream)?,
    })
}

/// Create app router
///
/// Used by the server and by integration tests, which inject their own
/// store and email doubles through `AppState`.
pub fn create_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
