//! Route definitions for the creator aggregate.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::creator;
use crate::state::AppState;

/// Creator routes. The photo upload gets its own body limit; every other
/// route keeps axum's default.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/register", post(creator::register))
        .route("/get_creators", get(creator::list_by_type))
        .route("/get_creator_details", get(creator::get_details))
        .route(
            "/upload_profile_photo",
            post(creator::upload_profile_photo).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/add_services", post(creator::add_services))
        .route("/add_portfolio", post(creator::add_portfolio))
        .route("/add_payment_methods", post(creator::add_payment_methods))
        .route("/api/delete_creator", post(creator::delete))
        .route("/api/search", post(creator::search_by_email))
}
