//! Attribute kind to leaf kind mapping.
//!
//! | Attribute kind  | Slot    | Encoding | Tag | Initial |
//! |-----------------|---------|----------|-----|---------|
//! | integer         | `i64`   | `long`   | `L` | `0`     |
//! | real, numeric   | `f64`   | `double` | `D` | `-999`  |
//! | nominal         | text    | `string` | `C` | `""`    |
//!
//! Every other attribute kind is rejected. The same table decides both which
//! branch is declared for an attribute and which row values that branch
//! accepts.

use crate::arff::{Attribute, AttributeKind, Value};
use crate::error::{Error, Result};
use arrow::datatypes::DataType;
use std::fmt;

/// Storage type of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// 64-bit signed integer.
    Long,
    /// 64-bit IEEE float.
    Double,
    /// Variable-length UTF-8 text.
    String,
}

impl LeafKind {
    /// Select the leaf kind for an attribute.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedAttributeKind`] for string, date, and any
    /// other kind without a branch mapping.
    pub fn for_attribute(attr: &Attribute) -> Result<Self> {
        match attr.kind {
            AttributeKind::Integer => Ok(Self::Long),
            AttributeKind::Real | AttributeKind::Numeric => Ok(Self::Double),
            AttributeKind::Nominal { .. } => Ok(Self::String),
            AttributeKind::String | AttributeKind::Date { .. } => {
                Err(Error::UnsupportedAttributeKind {
                    attribute: attr.name.clone(),
                    kind: attr.kind.to_string(),
                })
            }
        }
    }

    /// Single-character leaf tag, as used in `name/tag` branch type strings.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            Self::Long => 'L',
            Self::Double => 'D',
            Self::String => 'C',
        }
    }

    #[must_use]
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'L' => Some(Self::Long),
            'D' => Some(Self::Double),
            'C' => Some(Self::String),
            _ => None,
        }
    }

    /// Encoding name: `long`, `double`, or `string`.
    #[must_use]
    pub fn encoding(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Arrow column type backing this leaf.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            Self::Long => DataType::Int64,
            Self::Double => DataType::Float64,
            Self::String => DataType::Utf8,
        }
    }

    #[must_use]
    pub fn from_data_type(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Int64 => Some(Self::Long),
            DataType::Float64 => Some(Self::Double),
            DataType::Utf8 => Some(Self::String),
            _ => None,
        }
    }

    /// Value a fresh slot holds before the first entry is transferred.
    #[must_use]
    pub fn initial_value(self) -> Scalar {
        match self {
            Self::Long => Scalar::Long(0),
            Self::Double => Scalar::Double(-999.0),
            Self::String => Scalar::Text(String::new()),
        }
    }

    /// Branch type string, e.g. `temp/D`.
    #[must_use]
    pub fn branch_type(self, name: &str) -> String {
        format!("{name}/{}", self.tag())
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding())
    }
}

/// The current-entry value of one branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Long(i64),
    Double(f64),
    Text(String),
}

impl Scalar {
    #[must_use]
    pub fn kind(&self) -> LeafKind {
        match self {
            Self::Long(_) => LeafKind::Long,
            Self::Double(_) => LeafKind::Double,
            Self::Text(_) => LeafKind::String,
        }
    }

    /// Overwrite the slot with `value`, reusing the text buffer.
    ///
    /// # Errors
    /// Returns the type name of `value` when it does not match the slot.
    pub fn assign(&mut self, value: &Value) -> Result<(), &'static str> {
        match (self, value) {
            (Self::Long(slot), Value::Integer(v)) => *slot = *v,
            (Self::Double(slot), Value::Real(v)) => *slot = *v,
            (Self::Text(slot), Value::Text(v)) => {
                slot.clear();
                slot.push_str(v);
            }
            (_, other) => return Err(other.type_name()),
        }
        Ok(())
    }
}
