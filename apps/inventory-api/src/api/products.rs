//! Inventory API routes

use axum::Router;
use domain_inventory::handlers;

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.service.clone())
}
