use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a triage batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriageError {
    /// The input header lacks one or more required columns.
    #[error("missing required columns: {}", .missing.join(", "))]
    Schema {
        /// Names of the absent columns, sorted.
        missing: Vec<String>,
    },

    /// A record could not be turned into an invoice.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Batch totals exceeded the decimal range.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Malformed delimited input or output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Summary serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure while reading input or writing artifacts.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TriageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single invalid field on an input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field (e.g. "amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// 1-based line in the input file, when the record came from a file.
    pub line: Option<u64>,
    /// Invoice the record belongs to, when known.
    pub invoice_id: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        if let Some(id) = &self.invoice_id {
            write!(f, "invoice '{id}': ")?;
        }
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Create a validation error without location context.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            line: None,
            invoice_id: None,
        }
    }

    /// Attach the input line the record was read from.
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the invoice identifier of the failing record.
    pub fn for_invoice(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }
}
