//! Creator registration input rules.
//!
//! Requests arrive loosely typed: scalar fields may be missing, and the
//! child arrays (`services`, `portfolio`, `payment_methods`) may contain
//! elements of the wrong shape. Missing required scalars reject the whole
//! request; malformed child elements are dropped one by one.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Scalar fields a registration must carry, in wire order.
pub const REQUIRED_CREATOR_FIELDS: &[&str] = &[
    "creator_type",
    "full_name",
    "email",
    "phone",
    "location",
    "experience",
    "equipment",
    "bio",
    "availability",
];

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// Raw registration payload as sent by clients.
///
/// Scalars are kept as raw JSON so that a missing or mistyped field
/// surfaces as a validation error naming it, rather than a deserialization
/// failure. Strings and numbers are both accepted (`"phone": 5550100`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationDraft {
    pub creator_type: Value,
    pub full_name: Value,
    pub email: Value,
    pub phone: Value,
    pub location: Value,
    pub experience: Value,
    pub equipment: Value,
    pub bio: Value,
    pub website: Value,
    pub instagram: Value,
    pub availability: Value,
    pub services: Value,
    pub portfolio: Value,
    pub payment_methods: Value,
}

/// Validated scalar attributes of a creator.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorProfile {
    pub creator_type: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub experience: String,
    pub equipment: String,
    pub bio: String,
    /// Empty when not supplied.
    pub website: String,
    /// Empty when not supplied.
    pub instagram: String,
    pub availability: String,
}

/// A well-formed service entry ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInput {
    pub service_name: String,
    pub price: f64,
    pub unit: String,
}

/// A validated registration: the creator row plus its initial children.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub profile: CreatorProfile,
    pub services: Vec<ServiceInput>,
    pub portfolio: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl RegistrationDraft {
    /// Check required scalars and filter the child arrays.
    ///
    /// The error lists every missing field, not just the first. Blank
    /// strings and values that are neither strings nor numbers count as
    /// missing.
    pub fn validate(self) -> Result<Registration, CoreError> {
        let mut missing = Vec::new();
        let mut take = |name: &'static str, value: Value| -> String {
            match scalar_text(value) {
                Some(v) if !v.trim().is_empty() => v,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let profile = CreatorProfile {
            creator_type: take("creator_type", self.creator_type),
            full_name: take("full_name", self.full_name),
            email: take("email", self.email),
            phone: take("phone", self.phone),
            location: take("location", self.location),
            experience: take("experience", self.experience),
            equipment: take("equipment", self.equipment),
            bio: take("bio", self.bio),
            website: scalar_text(self.website).unwrap_or_default(),
            instagram: scalar_text(self.instagram).unwrap_or_default(),
            availability: take("availability", self.availability),
        };

        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let profile = CreatorProfile {
            email: profile.email.trim().to_string(),
            ..profile
        };

        Ok(Registration {
            profile,
            services: parse_services(&self.services),
            portfolio: parse_text_entries(&self.portfolio),
            payment_methods: parse_text_entries(&self.payment_methods),
        })
    }
}

/// Text form of a JSON scalar. Numbers keep their JSON spelling.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/* --------------------------------------------------------------------------
Child array parsing
-------------------------------------------------------------------------- */

/// Keep the well-formed service objects from a JSON array.
///
/// Non-arrays yield nothing. An element is kept when it is an object whose
/// present fields have the right types; absent fields take their defaults
/// (`""`, `0`, `""`).
pub fn parse_services(value: &Value) -> Vec<ServiceInput> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(parse_service).collect())
        .unwrap_or_default()
}

fn parse_service(item: &Value) -> Option<ServiceInput> {
    let obj = item.as_object()?;

    let service_name = match obj.get("service_name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return None,
    };

    let price = match obj.get("price") {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        Some(_) => return None,
    };
    if !price.is_finite() {
        return None;
    }

    let unit = match obj.get("unit") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return None,
    };

    Some(ServiceInput {
        service_name,
        price,
        unit,
    })
}

/// Keep the string elements of a JSON array (portfolio links, payment
/// method labels). Non-arrays yield nothing.
pub fn parse_text_entries(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Require a non-empty JSON array for an append operation.
///
/// `message` is returned verbatim as the validation error so each endpoint
/// can name its own array.
pub fn require_entries<'a>(value: &'a Value, message: &str) -> Result<&'a [Value], CoreError> {
    match value.as_array() {
        Some(items) if !items.is_empty() => Ok(items.as_slice()),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

/* --------------------------------------------------------------------------
Creator identifiers
-------------------------------------------------------------------------- */

/// Parse a creator id from a JSON value: a positive integer, or a string
/// holding one.
pub fn parse_creator_id(value: &Value) -> Result<DbId, CoreError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .filter(|id| *id > 0)
            .ok_or_else(|| invalid_creator_id(&n.to_string())),
        Value::String(s) => parse_creator_id_str(s),
        Value::Null => Err(CoreError::Validation("Creator ID is required".into())),
        other => Err(invalid_creator_id(&other.to_string())),
    }
}

/// Parse a creator id from text (query strings, multipart fields).
pub fn parse_creator_id_str(raw: &str) -> Result<DbId, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Creator ID is required".into()));
    }
    trimmed
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_creator_id(trimmed))
}

fn invalid_creator_id(raw: &str) -> CoreError {
    CoreError::Validation(format!("Invalid creator ID '{raw}'"))
}
