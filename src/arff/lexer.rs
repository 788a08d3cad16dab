//! Character-level scanning shared by the header parser and the row decoder.
//!
//! ARFF values are either bare (terminated by a delimiter and trimmed) or quoted
//! with `'` or `"`, in which case backslash escapes are honored and the quotes
//! are stripped. Quoting matters downstream: a quoted `'?'` is the literal text
//! `?`, while a bare `?` marks a missing value.

/// One scanned value and whether it was quoted in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    pub text: String,
    pub quoted: bool,
}

impl Field {
    /// True for the bare `?` marker.
    pub fn is_missing(&self) -> bool {
        !self.quoted && self.text == "?"
    }
}

/// Cursor over a single input line.
pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Unconsumed remainder of the line.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Skip whitespace, then report whether the line is exhausted.
    pub fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.peek().is_none()
    }

    /// Consume `c` if it is the next non-whitespace character.
    pub fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Read a quoted or bare value. A bare value stops before the first
    /// character matching `stop` (or at end of line) and is trimmed.
    pub fn read_field(&mut self, stop: impl Fn(char) -> bool) -> Result<Field, String> {
        self.skip_whitespace();
        match self.peek() {
            Some(q @ ('\'' | '"')) => {
                self.bump();
                let text = self.read_quoted(q)?;
                Ok(Field { text, quoted: true })
            }
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if stop(c) {
                        break;
                    }
                    self.bump();
                }
                Ok(Field {
                    text: self.src[start..self.pos].trim().to_string(),
                    quoted: false,
                })
            }
        }
    }

    fn read_quoted(&mut self, quote: char) -> Result<String, String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(format!("unterminated quoted value (missing {quote})")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => out.push(other),
                    None => return Err("dangling escape at end of line".to_string()),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Split the remainder of the line into comma-separated fields.
    ///
    /// An empty remainder yields no fields.
    pub fn read_list(&mut self) -> Result<Vec<Field>, String> {
        let mut fields = Vec::new();
        if self.at_end() {
            return Ok(fields);
        }
        loop {
            fields.push(self.read_field(|c| c == ',')?);
            if self.eat(',') {
                continue;
            }
            if self.at_end() {
                return Ok(fields);
            }
            return Err(format!("unexpected text after value: {:?}", self.rest()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn splits_bare_and_quoted_values() {
        let fields = Lexer::new(" 1, 'a, b' ,\"c\\\"d\", ? ").read_list().unwrap();
        assert_eq!(texts(&fields), vec!["1", "a, b", "c\"d", "?"]);
        assert!(!fields[0].quoted);
        assert!(fields[1].quoted);
        assert!(fields[3].is_missing());
    }

    #[test]
    fn quoted_question_mark_is_not_missing() {
        let fields = Lexer::new("'?'").read_list().unwrap();
        assert!(!fields[0].is_missing());
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(Lexer::new("'abc, def").read_list().is_err());
    }

    #[test]
    fn rejects_text_after_quoted_value() {
        assert!(Lexer::new("'abc' def, 1").read_list().is_err());
    }

    #[test]
    fn empty_line_has_no_fields() {
        assert!(Lexer::new("   ").read_list().unwrap().is_empty());
    }
}
