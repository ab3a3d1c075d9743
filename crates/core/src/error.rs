use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (e.g. a creator's email) found nothing.
    #[error("Entity not found: {entity} with {key} {value}")]
    NotFoundByKey {
        entity: &'static str,
        key: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}
