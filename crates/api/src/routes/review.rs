use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit_review", post(review::submit))
        .route("/get_reviews", get(review::list))
}
