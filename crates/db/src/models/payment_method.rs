use creatorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payment_methods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentMethod {
    pub id: DbId,
    pub creator_id: DbId,
    pub method: String,
    pub created_at: Timestamp,
}
