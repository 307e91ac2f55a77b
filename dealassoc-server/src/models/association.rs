//! Association record and creation input
//!
//! Presence is the only check made here. Length limits and email
//! uniqueness belong to the store.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use super::ValidationError;

/// Column width of `associations.email`
pub const EMAIL_MAX_LEN: usize = 255;

/// Column width of `associations.deal_id`
pub const DEAL_ID_MAX_LEN: usize = 100;

/// Persisted association row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Association {
    pub id: i32,
    pub email: String,
    pub deal_id: String,
}

/// Input for creating an association, with both fields known to be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssociation {
    email: String,
    deal_id: String,
}

impl NewAssociation {
    /// Build from raw request fields.
    ///
    /// Missing and empty values are rejected alike. No format checks are
    /// applied to either field.
    ///
    /// # Example
    /// ```
    /// use dealassoc_server::models::NewAssociation;
    ///
    /// assert!(NewAssociation::new(Some("a@x.com"), Some("D1")).is_ok());
    /// assert!(NewAssociation::new(Some(""), Some("D1")).is_err());
    /// assert!(NewAssociation::new(Some("a@x.com"), None).is_err());
    /// ```
    pub fn new(email: Option<&str>, deal_id: Option<&str>) -> Result<Self, ValidationError> {
        match (present(email), present(deal_id)) {
            (Some(email), Some(deal_id)) => Ok(Self {
                email: email.to_owned(),
                deal_id: deal_id.to_owned(),
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }

    /// Build from untyped JSON fields.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) count as
    /// missing. Other scalars are stored as text, so `42` becomes `"42"`
    /// and `true` becomes `"True"`.
    pub fn from_json(
        email: Option<&Value>,
        deal_id: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        match (truthy_text(email), truthy_text(deal_id)) {
            (Some(email), Some(deal_id)) => Ok(Self { email, deal_id }),
            _ => Err(ValidationError::MissingFields),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn deal_id(&self) -> &str {
        &self.deal_id
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("True".to_owned()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => present(Some(s.as_str())).map(str::to_owned),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}
