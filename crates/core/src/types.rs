/// Primary key type for all tables (`BIGSERIAL` in PostgreSQL).
pub type DbId = i64;

/// Timestamp type for `TIMESTAMPTZ` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
