pub mod creator;
pub mod health;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except the probes in
/// [`health`]).
///
/// Paths are flat and match the contract the existing frontend calls:
///
/// ```text
/// POST /register                      register creator
/// GET  /get_creators?type=            list creators by type
/// GET  /get_creator_details?id=       creator aggregate
/// POST /upload_profile_photo          multipart photo upload
/// POST /add_services                  append services
/// POST /add_portfolio                 append portfolio links
/// POST /add_payment_methods           append payment methods
/// POST /api/delete_creator            cascade delete
/// POST /api/search                    lookup by email
///
/// POST /submit_review                 submit review
/// GET  /get_reviews                   list reviews
/// ```
pub fn app_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(creator::router(max_upload_bytes))
        .merge(review::router())
}
