//! Creator entity model and the aggregate returned by lookups.

use creatorhub_core::photo::serialize_photo;
use creatorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::payment_method::PaymentMethod;
use crate::models::portfolio::PortfolioLink;
use crate::models::service::Service;

/// A full row from the `creators` table.
///
/// `profile_photo` is raw bytes in storage and base64 text on the wire.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Creator {
    pub id: DbId,
    pub creator_type: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub experience: String,
    pub equipment: String,
    pub bio: String,
    pub website: String,
    pub instagram: String,
    pub availability: String,
    #[serde(serialize_with = "serialize_photo")]
    pub profile_photo: Option<Vec<u8>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection: just enough to render a creator card.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreatorSummary {
    pub id: DbId,
    pub full_name: String,
    pub location: String,
    #[serde(serialize_with = "serialize_photo")]
    pub profile_photo: Option<Vec<u8>>,
}

/// A creator together with all of its dependent rows.
#[derive(Debug, Clone, Serialize)]
pub struct CreatorAggregate {
    pub creator: Creator,
    pub services: Vec<Service>,
    pub portfolio: Vec<PortfolioLink>,
    pub payment_methods: Vec<PaymentMethod>,
}

/// Row counts removed by a cascade delete, one per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedCounts {
    pub services: u64,
    pub portfolio: u64,
    pub payment_methods: u64,
    pub creators: u64,
}

impl DeletedCounts {
    pub fn total(&self) -> u64 {
        self.services + self.portfolio + self.payment_methods + self.creators
    }
}
