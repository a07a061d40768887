//! Organisation (tenant) model

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DEFAULT_STATUS;

/// Organisation row sent to the row store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewOrganisation {
    pub name: String,
    pub status: i32,
    pub personal: bool,
    pub created_at: i64,
}

impl NewOrganisation {
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self {
            name: name.into(),
            status: DEFAULT_STATUS,
            personal: false,
            created_at,
        }
    }
}

/// Primary key of an organisation row, kept exactly as the row store returned it
///
/// Integer and text keys (UUIDs included) are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganisationId(Value);

impl OrganisationId {
    /// Read the identifier of the first row returned by an insert
    pub fn from_rows(rows: &[Value]) -> Option<Self> {
        let id = rows.first()?.get("id")?;
        let usable = match id {
            Value::Number(_) => true,
            Value::String(s) => !s.trim().is_empty(),
            _ => false,
        };
        usable.then(|| Self(id.clone()))
    }

    /// Value used in `column=eq.value` row filters
    pub fn as_filter(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<i64> for OrganisationId {
    fn from(id: i64) -> Self {
        Self(Value::from(id))
    }
}

impl fmt::Display for OrganisationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_filter())
    }
}
