use creatorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `portfolio` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioLink {
    pub id: DbId,
    pub creator_id: DbId,
    pub portfolio_link: String,
    pub created_at: Timestamp,
}
