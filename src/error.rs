// Error kinds for the vector pipeline.
//
// Every stage fails fast: rows depend on the positional and dimensional
// consistency of every other row, so there is no skip-and-continue path.
// Zero-variance axes are not an error; the normalizer handles them.

use std::path::PathBuf;

use thiserror::Error;

use crate::corpus::documents::{ClusterLabel, DocumentId};

/// Failures raised by the core stages and the table loader/writer.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The keyword corpus cannot form bipolar axes (odd endpoint count,
    /// missing keyword column, empty keyword).
    #[error("Malformed keyword corpus: {0}")]
    MalformedCorpus(String),

    /// A keyword weight could not be coerced to a finite, non-negative float.
    #[error("Invalid weight {value:?} for keyword {keyword:?} in endpoint {endpoint:?}")]
    InvalidWeight {
        endpoint: String,
        keyword: String,
        value: String,
    },

    /// Row or vector length does not match what the previous stage produced.
    #[error("Dimension mismatch in {stage}: expected {expected}, got {actual}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A document references a cluster outside the declared label set.
    #[error("Document {document} references unknown cluster {label}")]
    UnknownClusterLabel {
        document: DocumentId,
        label: ClusterLabel,
    },

    /// Two stages disagree on which document sits at a position.
    #[error("Document order mismatch: expected {expected}, found {found}")]
    MisalignedDocument {
        expected: DocumentId,
        found: DocumentId,
    },

    /// An input table row could not be parsed into its typed schema.
    #[error("{}:{line}: {reason}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// The cluster table names a document the content table does not have.
    #[error("No raw text for document {0}")]
    MissingDocumentText(DocumentId),

    #[error("Invalid configuration: {0}")]
    MalformedConfig(String),

    /// Text that the legacy single-byte encoding cannot represent.
    #[error("Cannot encode {table} as {encoding}: unmappable character")]
    Encoding {
        table: String,
        encoding: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = VectorError> = std::result::Result<T, E>;
