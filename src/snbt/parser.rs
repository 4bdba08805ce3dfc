//! Recursive-descent parser for the stringified format.
//!
//! Grammar, with tokens from the [`Lexer`](super::Lexer):
//!
//! ```text
//! value     := compound | list | array | STRING | NUMBER
//! compound  := '{' (key ':' value (',' key ':' value)* ','?)? '}'
//! list      := '[' (value (',' value)* ','?)? ']'
//! array     := '[' ARRAY_PREFIX ';' (value (',' value)* ','?)? ']'
//! ```
//!
//! Unlike the binary format, any kind of value may stand at the top level.

use super::lexer::{split_suffix, Lexer, Token, TokenKind};
use crate::{CompoundTag, Error, ListTag, ReadOptions, Result, Tag, TagKind, TagValue};

/// Parses one value from text, with one token of lookahead.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    peeked: Option<Token>,
    options: &'a ReadOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a ReadOptions) -> Self {
        Parser {
            input,
            lexer: Lexer::new(input),
            peeked: None,
            options,
            depth: 0,
        }
    }

    /// Parses the whole input as a single value.
    ///
    /// # Errors
    ///
    /// Returns lexical and syntax errors with the offset they occurred at,
    /// including for anything left over after the value.
    pub fn parse(mut self) -> Result<TagValue> {
        let value = self.parse_value()?;
        let token = self.next()?;
        if token.kind != TokenKind::Eof {
            return Err(self.error_at(&token, "unexpected trailing data"));
        }
        Ok(value)
    }

    fn next(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn error_at(&self, token: &Token, msg: &str) -> Error {
        Error::syntax(self.input, token.start, msg)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token> {
        let token = self.next()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.error_at(&token, &format!("expected {}", what)))
        }
    }

    fn parse_value(&mut self) -> Result<TagValue> {
        let token = self.next()?;
        match token.kind {
            TokenKind::LBrace => self.parse_compound(),
            TokenKind::LBracket => self.parse_list_or_array(),
            TokenKind::String { value, quoted } => Ok(match (value.as_str(), quoted) {
                ("true", false) => TagValue::Byte(1),
                ("false", false) => TagValue::Byte(0),
                _ => TagValue::String(value),
            }),
            TokenKind::Number(ref text) => self.parse_number(text, &token),
            TokenKind::Eof => Err(self.error_at(&token, "expected value, found end of input")),
            _ => Err(self.error_at(&token, "expected value")),
        }
    }

    fn parse_compound(&mut self) -> Result<TagValue> {
        self.enter()?;
        let mut compound = CompoundTag::new();

        if self.peek()?.kind == TokenKind::RBrace {
            self.next()?;
            self.depth -= 1;
            return Ok(TagValue::Compound(compound));
        }

        loop {
            let token = self.next()?;
            let key = match token.kind {
                TokenKind::String { value, .. } => value,
                TokenKind::Number(text) => text,
                _ => return Err(self.error_at(&token, "expected key")),
            };
            self.expect(TokenKind::Colon, "':' after key")?;
            let value = self.parse_value()?;
            compound.push(Tag::new(key, value));

            if self.close_or_continue(TokenKind::RBrace, "',' or '}'")? {
                break;
            }
        }

        self.depth -= 1;
        Ok(TagValue::Compound(compound))
    }

    fn parse_list_or_array(&mut self) -> Result<TagValue> {
        self.enter()?;
        let value = match self.peek()?.kind {
            TokenKind::ArrayPrefix(_) => {
                let prefix = self.next()?;
                self.expect(TokenKind::Semicolon, "';' after array type")?;
                self.parse_array(&prefix)?
            }
            _ => TagValue::List(self.parse_list()?),
        };
        self.depth -= 1;
        Ok(value)
    }

    fn parse_list(&mut self) -> Result<ListTag> {
        let mut list = ListTag::untyped();
        if self.peek()?.kind == TokenKind::RBracket {
            self.next()?;
            return Ok(list);
        }

        loop {
            let start = self.peek()?.clone();
            let value = self.parse_value()?;
            let kind = value.kind();
            if list.push(value).is_err() {
                return Err(self.error_at(
                    &start,
                    &format!(
                        "mixed-type list: expected {}, found {}",
                        list.element_kind(),
                        kind
                    ),
                ));
            }
            self.check_len(list.len(), &start)?;

            if self.close_or_continue(TokenKind::RBracket, "',' or ']'")? {
                return Ok(list);
            }
        }
    }

    fn parse_array(&mut self, prefix: &Token) -> Result<TagValue> {
        let element_kind = match prefix.kind {
            TokenKind::ArrayPrefix('B') => TagKind::Byte,
            TokenKind::ArrayPrefix('I') => TagKind::Int,
            TokenKind::ArrayPrefix('L') => TagKind::Long,
            TokenKind::ArrayPrefix(other) => {
                return Err(self.error_at(prefix, &format!("unknown array type '{}'", other)))
            }
            _ => return Err(self.error_at(prefix, "expected array type")),
        };

        let mut elements = Vec::new();
        if self.peek()?.kind == TokenKind::RBracket {
            self.next()?;
        } else {
            loop {
                let start = self.peek()?.clone();
                let value = self.parse_value()?;
                if value.kind() != element_kind {
                    return Err(self.error_at(
                        &start,
                        &format!(
                            "array of {} cannot contain {}",
                            element_kind,
                            value.kind()
                        ),
                    ));
                }
                elements.push(value);
                self.check_len(elements.len(), &start)?;

                if self.close_or_continue(TokenKind::RBracket, "',' or ']'")? {
                    break;
                }
            }
        }

        let values = elements.into_iter();
        Ok(match element_kind {
            TagKind::Byte => TagValue::ByteArray(values.filter_map(|v| v.as_byte()).collect()),
            TagKind::Int => TagValue::IntArray(values.filter_map(|v| v.as_int()).collect()),
            _ => TagValue::LongArray(values.filter_map(|v| v.as_long()).collect()),
        })
    }

    /// Consumes `,` or the closing token. Returns `true` once the container
    /// is closed; a trailing comma before the closing token is allowed.
    fn close_or_continue(&mut self, close: TokenKind, what: &str) -> Result<bool> {
        let token = self.next()?;
        if token.kind == close {
            return Ok(true);
        }
        if token.kind != TokenKind::Comma {
            return Err(self.error_at(&token, &format!("expected {}", what)));
        }
        if self.peek()?.kind == close {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn parse_number(&self, text: &str, token: &Token) -> Result<TagValue> {
        let (body, suffix) = split_suffix(text);
        let malformed = || Error::lexical(self.input, token.start, &format!("malformed number '{}'", text));
        let value = match suffix {
            Some('b') => TagValue::Byte(body.parse().map_err(|_| malformed())?),
            Some('s') => TagValue::Short(body.parse().map_err(|_| malformed())?),
            Some('l') => TagValue::Long(body.parse().map_err(|_| malformed())?),
            Some('f') => {
                let v = match special_float(body) {
                    Some(v) => v as f32,
                    None => body.parse().map_err(|_| malformed())?,
                };
                TagValue::Float(v)
            }
            Some('d') => TagValue::Double(parse_double(body).ok_or_else(malformed)?),
            _ if body.contains('.') || special_float(body).is_some() => {
                TagValue::Double(parse_double(body).ok_or_else(malformed)?)
            }
            _ => TagValue::Int(body.parse().map_err(|_| malformed())?),
        };
        Ok(value)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::DepthLimit {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn check_len(&self, len: usize, token: &Token) -> Result<()> {
        if len > self.options.max_len {
            return Err(self.error_at(
                token,
                &format!("more than {} elements", self.options.max_len),
            ));
        }
        Ok(())
    }
}

fn special_float(body: &str) -> Option<f64> {
    match body {
        "NaN" => Some(f64::NAN),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn parse_double(body: &str) -> Option<f64> {
    special_float(body).or_else(|| body.parse().ok())
}
