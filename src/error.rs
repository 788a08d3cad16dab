//! Error types for arff2tree.
//!
//! Every failure in the conversion pipeline is fatal. The [`Error`] enum keeps
//! enough context to name the offending attribute, branch, or file, and
//! [`Error::category`] sorts each variant into one of four buckets: argument,
//! I/O, schema, and data errors.

use crate::arff::ArffError;
use crate::tree::LeafKind;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main error type for arff2tree.
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument Errors
    // ============================================================================
    #[error("you need to give an input file name and an output file name")]
    MissingPaths,

    #[error("invalid value for option '{option}': {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("could not open input file [{}]", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not set up {codec} decompression for [{}]", .path.display())]
    Decompress {
        codec: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create output file [{}]", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write tree [{tree}]")]
    WriteTree {
        tree: String,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("could not read tree file [{}]: {message}", .path.display())]
    ReadTree { path: PathBuf, message: String },

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("invalid type for attribute [{attribute}]: {kind}")]
    UnsupportedAttributeKind { attribute: String, kind: String },

    #[error("setting up branch for attribute [{branch}]: {message}")]
    Branch { branch: String, message: String },

    #[error("encoding tree metadata [{key}]")]
    Metadata {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error(transparent)]
    Arff(#[from] ArffError),

    #[error("nil value for attribute [{attribute}]")]
    MissingValue { attribute: String },

    #[error("type mismatch for attribute [{attribute}]: expected {expected} value, found {found}")]
    TypeMismatch {
        attribute: String,
        expected: LeafKind,
        found: &'static str,
    },

    #[error("filling tree [{tree}] at entry {entry}")]
    Fill {
        tree: String,
        entry: u64,
        #[source]
        source: arrow::error::ArrowError,
    },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or malformed command-line input.
    Argument,
    /// Input could not be opened or decompressed, or output could not be written.
    Io,
    /// The input header cannot be mapped onto an output tree.
    Schema,
    /// A data row could not be decoded or transferred.
    Data,
}

impl Error {
    /// Which bucket of the error taxonomy this error belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPaths | Self::InvalidOption { .. } => ErrorCategory::Argument,
            Self::OpenInput { .. }
            | Self::Decompress { .. }
            | Self::CreateOutput { .. }
            | Self::WriteTree { .. }
            | Self::ReadTree { .. } => ErrorCategory::Io,
            Self::UnsupportedAttributeKind { .. } | Self::Branch { .. } | Self::Metadata { .. } => {
                ErrorCategory::Schema
            }
            Self::Arff(e) => match e {
                ArffError::Io(_) => ErrorCategory::Io,
                ArffError::Header { .. } => ErrorCategory::Schema,
                ArffError::Row { .. } => ErrorCategory::Data,
            },
            Self::MissingValue { .. } | Self::TypeMismatch { .. } | Self::Fill { .. } => {
                ErrorCategory::Data
            }
        }
    }
}
