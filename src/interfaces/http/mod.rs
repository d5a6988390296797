//! HTTP boundary of the terminal.
//!
//! - POST /register-card - Register (or replace) a Visa or AMEX card
//! - POST /make-payment - Charge a registered card and return a ticket

pub mod error;
pub mod handlers;

use crate::application::engine::PosnetEngine;
use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every handler. All requests hit the same registry.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PosnetEngine>,
}

/// Build the terminal's routes on top of `engine`.
pub fn router(engine: Arc<PosnetEngine>) -> Router {
    Router::new()
        .route("/register-card", post(handlers::register_card))
        .route("/make-payment", post(handlers::make_payment))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { engine })
}
