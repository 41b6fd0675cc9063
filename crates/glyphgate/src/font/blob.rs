//! Parser for the nested integer-array notation the glyph asset is stored in.
//!
//! Grammar (only what the asset uses):
//!
//! ```text
//! value := "i:" int ";"
//!        | "a:" count ":{" (value value){count} "}"
//! ```
//!
//! Inside an array, entries alternate key then value. Keys must be integers.

use super::FontError;

/// A decoded node: an integer leaf or an ordered list of `(key, value)` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Int(i64),
    Array(Vec<(i64, Node)>),
}

impl Node {
    /// Entries of an array node, with keys required to be `0..len` in order.
    pub fn as_list(&self) -> Result<Vec<&Node>, FontError> {
        match self {
            Node::Array(entries) => entries
                .iter()
                .enumerate()
                .map(|(expected, (key, value))| {
                    if *key == expected as i64 {
                        Ok(value)
                    } else {
                        Err(FontError::Shape(format!(
                            "array key {key} out of sequence (expected {expected})"
                        )))
                    }
                })
                .collect(),
            Node::Int(_) => Err(FontError::Shape("expected array, found integer".into())),
        }
    }

    pub fn as_int(&self) -> Result<i64, FontError> {
        match self {
            Node::Int(v) => Ok(*v),
            Node::Array(_) => Err(FontError::Shape("expected integer, found array".into())),
        }
    }
}

/// Parse a complete document; trailing bytes are an error.
pub fn parse(input: &[u8]) -> Result<Node, FontError> {
    let mut parser = Parser { input, pos: 0 };
    let node = parser.value()?;
    if parser.pos != input.len() {
        return Err(parser.error("trailing data after root value"));
    }
    Ok(node)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, message: &'static str) -> FontError {
        FontError::Syntax {
            offset: self.pos,
            message,
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), FontError> {
        match self.input.get(self.pos) {
            Some(&b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error("unexpected byte")),
        }
    }

    /// Reads an optionally signed decimal integer up to (not including) `end`.
    fn integer(&mut self, end: u8) -> Result<i64, FontError> {
        let start = self.pos;
        let rest = &self.input[start..];
        let len = rest
            .iter()
            .position(|&b| b == end)
            .ok_or_else(|| self.error("unterminated integer"))?;
        let text = std::str::from_utf8(&rest[..len]).map_err(|_| self.error("invalid integer"))?;
        let value = text.parse().map_err(|_| self.error("invalid integer"))?;
        self.pos = start + len + 1;
        Ok(value)
    }

    fn value(&mut self) -> Result<Node, FontError> {
        match self.input.get(self.pos) {
            Some(b'i') => {
                self.pos += 1;
                self.expect(b':')?;
                Ok(Node::Int(self.integer(b';')?))
            }
            Some(b'a') => {
                self.pos += 1;
                self.expect(b':')?;
                let count = self.integer(b':')?;
                let count =
                    usize::try_from(count).map_err(|_| self.error("negative array length"))?;
                self.expect(b'{')?;
                let mut entries = Vec::with_capacity(count.min(64));
                for _ in 0..count {
                    let key = match self.value()? {
                        Node::Int(k) => k,
                        Node::Array(_) => return Err(self.error("array used as key")),
                    };
                    entries.push((key, self.value()?));
                }
                self.expect(b'}')?;
                Ok(Node::Array(entries))
            }
            Some(_) => Err(self.error("unknown value tag")),
            None => Err(self.error("unexpected end of input")),
        }
    }
}
