//! Domain logic for the creator marketplace backend.
//!
//! Storage-agnostic: nothing in this crate talks to the database or HTTP.
//! The DB and API crates lean on it for input parsing, validation rules,
//! and the shared error type.

pub mod creator;
pub mod error;
pub mod photo;
pub mod review;
pub mod types;
