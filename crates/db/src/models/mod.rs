//! Row structs for the creator aggregate and reviews.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct matching the
//! table's columns. Input shapes live in `creatorhub_core`.

pub mod creator;
pub mod payment_method;
pub mod portfolio;
pub mod review;
pub mod service;
