use super::header::{Attribute, AttributeKind, Header, read_header};
use super::lexer::{Field, Lexer};
use super::{ArffError, Row, Value};
use std::io::BufRead;

/// Streaming ARFF decoder.
///
/// The header is parsed by [`Decoder::new`]; data rows are then pulled one at
/// a time with [`Decoder::decode`].
///
/// # Example
/// ```
/// use arff2tree::arff::{Decoder, Row, Value};
/// # fn main() -> anyhow::Result<()> {
/// let input = "@relation w\n@attribute t real\n@data\n72.5\n";
/// let mut dec = Decoder::new(input.as_bytes())?;
/// let mut row = Row::new();
/// assert!(dec.decode(&mut row)?);
/// assert_eq!(row.get("t"), Some(&Value::Real(72.5)));
/// assert!(!dec.decode(&mut row)?);
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R> {
    reader: R,
    header: Header,
    line: usize,
    buf: String,
}

impl<R: BufRead> Decoder<R> {
    /// Parse the header from `reader` and position the decoder on the first data line.
    ///
    /// # Errors
    /// Returns [`ArffError::Header`] for a malformed header and [`ArffError::Io`]
    /// if the underlying reader fails.
    pub fn new(mut reader: R) -> Result<Self, ArffError> {
        let mut line = 0;
        let header = read_header(&mut reader, &mut line)?;
        Ok(Self {
            reader,
            header,
            line,
            buf: String::new(),
        })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Line number of the last line consumed.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Decode the next record into `row`, replacing its previous contents.
    ///
    /// Returns `Ok(false)` once the input is exhausted.
    ///
    /// # Errors
    /// Returns [`ArffError::Row`] when a record has the wrong number of fields,
    /// a value does not parse as its attribute's kind, or a nominal value is not
    /// a declared label.
    pub fn decode(&mut self, row: &mut Row) -> Result<bool, ArffError> {
        row.clear();
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;
            let text = self.buf.trim();
            if text.is_empty() || text.starts_with('%') {
                continue;
            }
            let line = self.line;
            let result = if text.starts_with('{') {
                decode_sparse(&self.header.attributes, text, row)
            } else {
                decode_dense(&self.header.attributes, text, row)
            };
            return result.map(|()| true).map_err(|m| ArffError::row(line, m));
        }
    }
}

fn decode_dense(attributes: &[Attribute], text: &str, row: &mut Row) -> Result<(), String> {
    let mut fields = Lexer::new(text).read_list()?;
    if fields.len() == attributes.len() + 1 && fields.last().is_some_and(is_weight) {
        fields.pop();
    }
    if fields.len() != attributes.len() {
        return Err(format!(
            "expected {} values, found {}",
            attributes.len(),
            fields.len()
        ));
    }
    for (attr, field) in attributes.iter().zip(&fields) {
        if let Some(value) = decode_value(attr, field)? {
            row.insert(attr.name.as_str(), value);
        }
    }
    Ok(())
}

fn decode_sparse(attributes: &[Attribute], text: &str, row: &mut Row) -> Result<(), String> {
    for attr in attributes {
        if let Some(value) = sparse_default(&attr.kind) {
            row.insert(attr.name.as_str(), value);
        }
    }

    let mut lx = Lexer::new(text);
    lx.eat('{');
    if !lx.eat('}') {
        loop {
            let index = lx.read_field(|c| c.is_whitespace() || c == '}')?;
            let index: usize = index
                .text
                .parse()
                .map_err(|_| format!("invalid sparse index {:?}", index.text))?;
            let Some(attr) = attributes.get(index) else {
                return Err(format!(
                    "sparse index {index} out of range for {} attributes",
                    attributes.len()
                ));
            };
            let field = lx.read_field(|c| c == ',' || c == '}')?;
            match decode_value(attr, &field)? {
                Some(value) => row.insert(attr.name.as_str(), value),
                None => {
                    row.remove(&attr.name);
                }
            }
            if lx.eat(',') {
                continue;
            }
            if lx.eat('}') {
                break;
            }
            return Err("unterminated sparse row (missing })".to_string());
        }
    }

    // Optional instance weight: `{...}, {w}`.
    if lx.eat(',') {
        let weight = lx.read_field(|_| false)?;
        if !is_weight(&weight) {
            return Err(format!("unexpected text after sparse row: {:?}", weight.text));
        }
    } else if !lx.at_end() {
        return Err(format!("unexpected text after sparse row: {:?}", lx.rest()));
    }
    Ok(())
}

fn is_weight(field: &Field) -> bool {
    !field.quoted && field.text.starts_with('{') && field.text.ends_with('}')
}

fn sparse_default(kind: &AttributeKind) -> Option<Value> {
    match kind {
        AttributeKind::Integer => Some(Value::Integer(0)),
        AttributeKind::Real | AttributeKind::Numeric => Some(Value::Real(0.0)),
        AttributeKind::Nominal { labels } => labels.first().map(|l| Value::Text(l.clone())),
        AttributeKind::String | AttributeKind::Date { .. } => None,
    }
}

fn decode_value(attr: &Attribute, field: &Field) -> Result<Option<Value>, String> {
    if field.is_missing() {
        return Ok(None);
    }
    let text = field.text.as_str();
    let value = match &attr.kind {
        AttributeKind::Integer => text
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| format!("invalid integer {text:?} for attribute [{}]: {e}", attr.name))?,
        AttributeKind::Real | AttributeKind::Numeric => text
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|e| format!("invalid number {text:?} for attribute [{}]: {e}", attr.name))?,
        AttributeKind::Nominal { labels } => {
            if !labels.iter().any(|l| l == text) {
                return Err(format!(
                    "value {text:?} is not a declared label of attribute [{}]",
                    attr.name
                ));
            }
            Value::Text(field.text.clone())
        }
        AttributeKind::String | AttributeKind::Date { .. } => Value::Text(field.text.clone()),
    };
    Ok(Some(value))
}
