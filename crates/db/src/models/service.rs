use creatorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub creator_id: DbId,
    pub service_name: String,
    pub price: f64,
    pub unit: String,
    pub created_at: Timestamp,
}
