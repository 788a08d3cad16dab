//! ARFF header model and parser.
//!
//! The header is everything before the `@data` line:
//!
//! ```text
//! % comment
//! @relation weather
//! @attribute outlook {sunny, overcast, rainy}
//! @attribute temperature real
//! @attribute humidity integer
//! @data
//! ```
//!
//! Keywords are case-insensitive. Names and nominal labels may be quoted.

use super::ArffError;
use super::lexer::Lexer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;

/// Declared kind of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeKind {
    Numeric,
    Real,
    Integer,
    /// Categorical attribute with its ordered label set.
    Nominal { labels: Vec<String> },
    String,
    /// Date attribute with its optional format pattern.
    Date { format: Option<String> },
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::Real => f.write_str("real"),
            Self::Integer => f.write_str("integer"),
            Self::Nominal { labels } => write!(f, "{{{}}}", labels.join(",")),
            Self::String => f.write_str("string"),
            Self::Date { format: None } => f.write_str("date"),
            Self::Date {
                format: Some(format),
            } => write!(f, "date {format}"),
        }
    }
}

/// A named, typed attribute declared in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.kind)
    }
}

/// Relation name and ordered attribute declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub relation: String,
    pub attributes: Vec<Attribute>,
}

impl Header {
    /// Number of declared attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Read header lines from `reader` up to and including `@data`.
///
/// `line` is advanced for every physical line consumed so the row decoder can
/// keep numbering from where the header ended.
pub(crate) fn read_header<R: BufRead>(
    reader: &mut R,
    line: &mut usize,
) -> Result<Header, ArffError> {
    let mut relation: Option<String> = None;
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut seen = HashSet::new();
    let mut buf = String::new();

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Err(ArffError::header(*line, "missing @data section"));
        }
        *line += 1;
        let text = if *line == 1 {
            buf.trim_start_matches('\u{feff}')
        } else {
            buf.as_str()
        }
        .trim();
        if text.is_empty() || text.starts_with('%') {
            continue;
        }

        let mut lx = Lexer::new(text);
        let keyword = lx
            .read_field(char::is_whitespace)
            .map_err(|m| ArffError::header(*line, m))?
            .text
            .to_ascii_lowercase();

        match keyword.as_str() {
            "@relation" => {
                if relation.is_some() {
                    return Err(ArffError::header(*line, "duplicate @relation declaration"));
                }
                let name = lx
                    .read_field(char::is_whitespace)
                    .map_err(|m| ArffError::header(*line, m))?;
                if name.text.is_empty() {
                    return Err(ArffError::header(*line, "@relation without a name"));
                }
                relation = Some(name.text);
            }
            "@attribute" => {
                if relation.is_none() {
                    return Err(ArffError::header(*line, "@attribute before @relation"));
                }
                let attr = parse_attribute(&mut lx).map_err(|m| ArffError::header(*line, m))?;
                if !seen.insert(attr.name.clone()) {
                    return Err(ArffError::header(
                        *line,
                        format!("duplicate attribute name [{}]", attr.name),
                    ));
                }
                attributes.push(attr);
            }
            "@data" => break,
            other => {
                return Err(ArffError::header(
                    *line,
                    format!("unexpected header line starting with {other:?}"),
                ));
            }
        }
    }

    let Some(relation) = relation else {
        return Err(ArffError::header(*line, "missing @relation declaration"));
    };
    if attributes.is_empty() {
        return Err(ArffError::header(*line, "no attributes declared before @data"));
    }
    Ok(Header {
        relation,
        attributes,
    })
}

fn parse_attribute(lx: &mut Lexer<'_>) -> Result<Attribute, String> {
    let name = lx.read_field(|c| c.is_whitespace() || c == '{')?;
    if name.text.is_empty() {
        return Err("@attribute without a name".to_string());
    }

    lx.skip_whitespace();
    let kind = if lx.eat('{') {
        let body = lx.rest().trim_end();
        let Some(inner) = body.strip_suffix('}') else {
            return Err(format!("unterminated nominal label list for [{}]", name.text));
        };
        let labels: Vec<String> = Lexer::new(inner)
            .read_list()?
            .into_iter()
            .map(|f| f.text)
            .collect();
        if labels.is_empty() || labels.iter().any(String::is_empty) {
            return Err(format!("empty nominal label for [{}]", name.text));
        }
        AttributeKind::Nominal { labels }
    } else {
        let ty = lx.read_field(char::is_whitespace)?.text.to_ascii_lowercase();
        match ty.as_str() {
            "numeric" => AttributeKind::Numeric,
            "real" => AttributeKind::Real,
            "integer" => AttributeKind::Integer,
            "string" => AttributeKind::String,
            "date" => {
                let format = lx.read_field(|_| false)?;
                AttributeKind::Date {
                    format: (!format.text.is_empty()).then_some(format.text),
                }
            }
            "relational" => {
                return Err(format!("relational attribute [{}] is not supported", name.text));
            }
            "" => return Err(format!("missing type for attribute [{}]", name.text)),
            other => return Err(format!("unknown type {other:?} for attribute [{}]", name.text)),
        }
    };

    Ok(Attribute {
        name: name.text,
        kind,
    })
}
