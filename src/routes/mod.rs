use std::sync::Arc;

use axum::{Router, routing::get};
use carelead_contact::ContactStore;

use crate::{email::EmailService, upstream::UpstreamClient};

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub email: EmailService,
    pub upstream: UpstreamClient,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/contact", get(contact::list).post(contact::create))
        .with_state(app_state)
}
