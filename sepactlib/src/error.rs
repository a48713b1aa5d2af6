//! Единый тип ошибок публичного API.

use thiserror::Error;

use crate::model::Field;

#[derive(Debug, Error)]
pub enum SepaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: malformed amount '{value}': {reason}")]
    MalformedAmount {
        row: usize,
        value: String,
        reason: &'static str,
    },

    #[error("row {row}: amount must be positive, got '{value}'")]
    NonPositiveAmount { row: usize, value: String },

    #[error("row {row}: malformed account '{value}'")]
    MalformedAccount { row: usize, value: String },

    #[error("row {row}: creditor name is empty")]
    EmptyName { row: usize },

    #[error("row {row}: {field} is {len} characters long, at most {max} allowed")]
    FieldTooLong {
        row: usize,
        field: Field,
        len: usize,
        max: usize,
    },

    #[error("batch contains no transactions")]
    EmptyBatch,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("pattern error: {0}")]
    Pattern(String),
}

impl SepaError {
    /// Номер строки входного файла (с единицы), если ошибка к ней привязана.
    pub fn row(&self) -> Option<usize> {
        match self {
            SepaError::MalformedRow { row, .. }
            | SepaError::MalformedAmount { row, .. }
            | SepaError::NonPositiveAmount { row, .. }
            | SepaError::MalformedAccount { row, .. }
            | SepaError::EmptyName { row }
            | SepaError::FieldTooLong { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SepaError>;
