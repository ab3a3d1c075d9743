//! Handlers for user reviews. Independent of the creator aggregate.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use creatorhub_core::review::ReviewDraft;
use creatorhub_db::models::review::Review;
use creatorhub_db::repositories::ReviewRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
}

/// POST /submit_review
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ReviewDraft>, JsonRejection>,
) -> AppResult<Json<SubmitReviewResponse>> {
    let Json(draft) = payload?;
    let review = draft.validate()?;

    let created = ReviewRepo::create(&state.pool, &review).await?;
    tracing::info!(review_id = created.id, name = %created.name, "Review submitted");

    Ok(Json(SubmitReviewResponse {
        message: "Review submitted successfully! Thank you for your review!",
    }))
}

/// GET /get_reviews -- newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ReviewList>> {
    let reviews = ReviewRepo::list_newest_first(&state.pool).await?;
    Ok(Json(ReviewList { reviews }))
}
