use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error during {operation} on '{table}': {source}")]
    Database {
        table: String,
        operation: &'static str,
        source: sqlx::Error,
    },

    #[error("Invalid option key: {0}")]
    InvalidKey(ValidationError),

    #[error("Invalid table name: {0}")]
    InvalidTable(ValidationError),
}

impl StoreError {
    pub fn database_operation(table: &str, operation: &'static str, source: sqlx::Error) -> Self {
        StoreError::Database {
            table: table.to_string(),
            operation,
            source,
        }
    }
}
