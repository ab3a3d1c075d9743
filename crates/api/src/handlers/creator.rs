//! Handlers for the creator aggregate.
//!
//! Every operation parses its input through `creatorhub_core`, delegates to
//! the repositories in `creatorhub_db`, and maps failures via [`AppError`].
//! Paths mirror the legacy frontend contract (see `routes::creator`).

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use creatorhub_core::creator::{
    parse_creator_id, parse_creator_id_str, parse_services, parse_text_entries,
    require_entries, RegistrationDraft,
};
use creatorhub_core::error::CoreError;
use creatorhub_core::photo::validate_photo_filename;
use creatorhub_core::types::DbId;
use creatorhub_db::models::creator::{CreatorAggregate, CreatorSummary, DeletedCounts};
use creatorhub_db::repositories::{CreatorRepo, PaymentMethodRepo, PortfolioRepo, ServiceRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    pub creator_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct CreatorList {
    pub creators: Vec<CreatorSummary>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub success: bool,
    pub message: &'static str,
    /// Rows actually inserted; malformed entries are not counted.
    pub inserted: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
    pub deleted: DeletedCounts,
}

#[derive(Debug, Deserialize)]
pub struct ListCreatorsParams {
    #[serde(rename = "type")]
    pub creator_type: Option<String>,
}

/// `id` is preferred; `creator_id` is the legacy spelling.
#[derive(Debug, Deserialize)]
pub struct CreatorDetailParams {
    pub id: Option<String>,
    pub creator_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddServicesRequest {
    #[serde(default)]
    pub creator_id: Value,
    #[serde(default)]
    pub services: Value,
}

#[derive(Debug, Deserialize)]
pub struct AddPortfolioRequest {
    #[serde(default)]
    pub creator_id: Value,
    #[serde(default, alias = "portfolio")]
    pub portfolio_links: Value,
}

#[derive(Debug, Deserialize)]
pub struct AddPaymentMethodsRequest {
    #[serde(default)]
    pub creator_id: Value,
    #[serde(default)]
    pub payment_methods: Value,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCreatorRequest {
    #[serde(default)]
    pub creator_id: Value,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub email: Option<String>,
}

fn creator_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Creator",
        id,
    })
}

/* --------------------------------------------------------------------------
Create / read
-------------------------------------------------------------------------- */

/// POST /register
///
/// Inserts the creator and any well-formed `services`, `portfolio`, and
/// `payment_methods` entries in one transaction.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationDraft>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(draft) = payload?;
    let registration = draft.validate()?;

    let creator_id = CreatorRepo::create(&state.pool, &registration).await?;
    tracing::info!(
        creator_id,
        services = registration.services.len(),
        portfolio = registration.portfolio.len(),
        payment_methods = registration.payment_methods.len(),
        "Creator registered",
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful",
            creator_id,
        }),
    ))
}

/// GET /get_creators?type=
pub async fn list_by_type(
    State(state): State<AppState>,
    params: Result<Query<ListCreatorsParams>, QueryRejection>,
) -> AppResult<Json<CreatorList>> {
    let Query(params) = params?;
    let creator_type = params.creator_type.unwrap_or_default();

    let creators = CreatorRepo::list_by_type(&state.pool, &creator_type).await?;
    tracing::debug!(%creator_type, count = creators.len(), "Listed creators");
    Ok(Json(CreatorList { creators }))
}

/// GET /get_creator_details?id= (or `creator_id=`)
pub async fn get_details(
    State(state): State<AppState>,
    params: Result<Query<CreatorDetailParams>, QueryRejection>,
) -> AppResult<Json<CreatorAggregate>> {
    let Query(params) = params?;
    let raw = params
        .id
        .filter(|v| !v.trim().is_empty())
        .or(params.creator_id)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("No creator ID provided".into()))?;
    let id = parse_creator_id_str(&raw)?;

    let aggregate = CreatorRepo::find_aggregate_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| creator_not_found(id))?;
    Ok(Json(aggregate))
}

/// POST /api/search
pub async fn search_by_email(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<CreatorAggregate>> {
    let Json(input) = payload?;
    let email = input
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| CoreError::Validation("Please provide an email address".into()))?;

    let aggregate = CreatorRepo::find_aggregate_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::info!(%email, "No creator found for email");
            CoreError::NotFoundByKey {
                entity: "Creator",
                key: "email",
                value: email.clone(),
            }
        })?;
    Ok(Json(aggregate))
}

/* --------------------------------------------------------------------------
Photo
-------------------------------------------------------------------------- */

/// POST /upload_profile_photo (multipart: `profile_photo` file + `creator_id`)
///
/// All validation happens before the database is touched. The update is
/// unconditional; an unknown creator id is logged, not rejected.
pub async fn upload_profile_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, axum::extract::multipart::MultipartRejection>,
) -> AppResult<Json<SuccessResponse>> {
    let mut multipart = multipart?;
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut creator_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "profile_photo" | "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                file = Some((filename, data.to_vec()));
            }
            "creator_id" => {
                creator_id = Some(field.text().await?);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) =
        file.ok_or_else(|| CoreError::Validation("No file part".into()))?;
    if filename.trim().is_empty() {
        return Err(CoreError::Validation("No selected file".into()).into());
    }
    let raw_id = creator_id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("No creator ID provided".into()))?;
    let id = parse_creator_id_str(&raw_id)?;
    let ext = validate_photo_filename(&filename)?;

    let touched = CreatorRepo::update_photo(&state.pool, id, &data).await?;
    if touched == 0 {
        tracing::warn!(creator_id = id, "Profile photo upload matched no creator");
    } else {
        tracing::info!(creator_id = id, bytes = data.len(), %ext, "Profile photo replaced");
    }

    Ok(Json(SuccessResponse {
        success: true,
        message: "Profile photo uploaded successfully",
    }))
}

/* --------------------------------------------------------------------------
Append children
-------------------------------------------------------------------------- */

/// POST /add_services
pub async fn add_services(
    State(state): State<AppState>,
    payload: Result<Json<AddServicesRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AppendResponse>)> {
    let Json(input) = payload?;
    require_entries(&input.services, "Creator ID and services array are required")?;
    let id = parse_creator_id(&input.creator_id)?;

    let services = parse_services(&input.services);
    let inserted = ServiceRepo::append(&state.pool, id, &services)
        .await?
        .ok_or_else(|| creator_not_found(id))?;
    tracing::info!(creator_id = id, inserted, "Services added");

    Ok((
        StatusCode::CREATED,
        Json(AppendResponse {
            success: true,
            message: "Services added successfully",
            inserted,
        }),
    ))
}

/// POST /add_portfolio
pub async fn add_portfolio(
    State(state): State<AppState>,
    payload: Result<Json<AddPortfolioRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AppendResponse>)> {
    let Json(input) = payload?;
    require_entries(
        &input.portfolio_links,
        "Creator ID and portfolio links array are required",
    )?;
    let id = parse_creator_id(&input.creator_id)?;

    let links = parse_text_entries(&input.portfolio_links);
    let inserted = PortfolioRepo::append(&state.pool, id, &links)
        .await?
        .ok_or_else(|| creator_not_found(id))?;
    tracing::info!(creator_id = id, inserted, "Portfolio links added");

    Ok((
        StatusCode::CREATED,
        Json(AppendResponse {
            success: true,
            message: "Portfolio links added successfully",
            inserted,
        }),
    ))
}

/// POST /add_payment_methods
pub async fn add_payment_methods(
    State(state): State<AppState>,
    payload: Result<Json<AddPaymentMethodsRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AppendResponse>)> {
    let Json(input) = payload?;
    require_entries(
        &input.payment_methods,
        "Creator ID and payment methods array are required",
    )?;
    let id = parse_creator_id(&input.creator_id)?;

    let methods = parse_text_entries(&input.payment_methods);
    let inserted = PaymentMethodRepo::append(&state.pool, id, &methods)
        .await?
        .ok_or_else(|| creator_not_found(id))?;
    tracing::info!(creator_id = id, inserted, "Payment methods added");

    Ok((
        StatusCode::CREATED,
        Json(AppendResponse {
            success: true,
            message: "Payment methods added successfully",
            inserted,
        }),
    ))
}

/* --------------------------------------------------------------------------
Delete
-------------------------------------------------------------------------- */

/// POST /api/delete_creator
///
/// Removes the creator and all dependent rows atomically.
pub async fn delete(
    State(state): State<AppState>,
    payload: Result<Json<DeleteCreatorRequest>, JsonRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let Json(input) = payload?;
    let id = parse_creator_id(&input.creator_id)?;

    let deleted = CreatorRepo::delete_aggregate(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(creator_id = id, "Delete requested for missing creator");
            creator_not_found(id)
        })?;
    tracing::info!(
        creator_id = id,
        services = deleted.services,
        portfolio = deleted.portfolio,
        payment_methods = deleted.payment_methods,
        "Creator and all related data deleted",
    );

    Ok(Json(DeleteResponse {
        success: true,
        message: "Creator and all related data deleted successfully",
        deleted,
    }))
}
