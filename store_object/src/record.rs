//! Option rows

use crate::value::OptionValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub key: String,
    pub value: OptionValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OptionRecord {
    /// New record stamped with the current time
    pub fn new(key: impl Into<String>, value: OptionValue) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            value,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw row as stored in PostgreSQL
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OptionRow {
    pub key: String,
    pub value: sqlx::types::Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OptionRow> for OptionRecord {
    fn from(row: OptionRow) -> Self {
        Self {
            key: row.key,
            value: OptionValue::from_json(row.value.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
