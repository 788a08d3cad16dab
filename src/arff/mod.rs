//! Streaming decoder for the attribute-relation file format (ARFF).
//!
//! This module provides:
//! - **Header model**: [`Header`], [`Attribute`], [`AttributeKind`]
//! - **Row model**: [`Row`] mapping attribute names to dynamically typed [`Value`]s
//! - **Streaming decode**: [`Decoder`] parses the header eagerly, then yields
//!   one record per [`Decoder::decode`] call
//!
//! # Notes
//! - Dense (`a,b,c`) and sparse (`{0 a, 2 c}`) rows are both accepted.
//! - End of input is reported as `Ok(false)` from [`Decoder::decode`], never
//!   as an error.
//! - Every error carries the 1-based input line it was raised on.

mod decoder;
mod header;
mod lexer;
mod value;

pub use decoder::Decoder;
pub use header::{Attribute, AttributeKind, Header};
pub use value::{Row, Value};

use thiserror::Error;

/// Errors raised while decoding ARFF input.
#[derive(Error, Debug)]
pub enum ArffError {
    #[error("reading ARFF input: {0}")]
    Io(#[from] std::io::Error),

    #[error("ARFF header, line {line}: {message}")]
    Header { line: usize, message: String },

    #[error("ARFF data, line {line}: {message}")]
    Row { line: usize, message: String },
}

impl ArffError {
    pub(crate) fn header(line: usize, message: impl Into<String>) -> Self {
        Self::Header {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn row(line: usize, message: impl Into<String>) -> Self {
        Self::Row {
            line,
            message: message.into(),
        }
    }
}
