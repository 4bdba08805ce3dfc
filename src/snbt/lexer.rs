//! Tokenizer for the stringified format.
//!
//! [`Lexer`] turns the input into a flat sequence of [`Token`]s. It is lazy
//! (tokens are produced on demand through [`Iterator`]) and can be rewound to
//! the start with [`Lexer::reset`].
//!
//! ```rust
//! use nbt_codec::snbt::{Lexer, TokenKind};
//!
//! let kinds: Vec<TokenKind> = Lexer::new("[B; 1b]")
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::LBracket,
//!         TokenKind::ArrayPrefix('B'),
//!         TokenKind::Semicolon,
//!         TokenKind::Number("1b".to_string()),
//!         TokenKind::RBracket,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

use crate::{Error, Result};

/// What a token is, with its decoded text where it has one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    /// A quoted string (escapes already decoded) or a bare word.
    String { value: String, quoted: bool },
    /// Numeric text including sign and type suffix, e.g. `-1.5f`.
    Number(String),
    /// The `B`, `I` or `L` of `[B;`. Only emitted when `;` follows.
    ArrayPrefix(char),
    Eof,
    Unknown(char),
}

/// A token with its byte span in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

/// The tokenizer.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            finished: false,
        }
    }

    /// Rewinds to the beginning of the input.
    pub fn reset(&mut self) {
        self.position = 0;
        self.finished = false;
    }

    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Produces the next token. After the end of input this keeps returning
    /// [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lexical`] for unterminated strings and bad escapes.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let start = self.position;
        let ch = match self.next_char() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenKind::Eof, start)),
        };

        let kind = match ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '"' | '\'' => TokenKind::String {
                value: self.quoted_string(ch, start)?,
                quoted: true,
            },
            c if is_bare_char(c) => {
                while matches!(self.peek_char(), Some(c) if is_bare_char(c)) {
                    self.next_char();
                }
                self.classify_word(start)
            }
            other => TokenKind::Unknown(other),
        };
        Ok(self.token(kind, start))
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            start,
            end: self.position,
        }
    }

    fn classify_word(&self, start: usize) -> TokenKind {
        let word = &self.input[start..self.position];
        let mut chars = word.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            if letter.is_ascii_alphabetic() && self.input[self.position..].trim_start().starts_with(';') {
                return TokenKind::ArrayPrefix(letter);
            }
        }
        if is_number_literal(word) {
            TokenKind::Number(word.to_string())
        } else {
            TokenKind::String {
                value: word.to_string(),
                quoted: false,
            }
        }
    }

    fn quoted_string(&mut self, quote: char, start: usize) -> Result<String> {
        let mut result = String::new();
        loop {
            let ch = match self.next_char() {
                Some(ch) => ch,
                None => return Err(Error::lexical(self.input, start, "unterminated string")),
            };
            match ch {
                c if c == quote => return Ok(result),
                '\\' => {
                    let escape_at = self.position - 1;
                    match self.next_char() {
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('b') => result.push('\u{0008}'),
                        Some('f') => result.push('\u{000C}'),
                        Some('u') => result.push(self.unicode_escape(escape_at)?),
                        Some(_) => {
                            return Err(Error::lexical(self.input, escape_at, "invalid escape sequence"))
                        }
                        None => {
                            return Err(Error::lexical(
                                self.input,
                                escape_at,
                                "incomplete escape sequence",
                            ))
                        }
                    }
                }
                other => result.push(other),
            }
        }
    }

    /// Decodes the digits of `\uXXXX`, joining a surrogate pair written as
    /// two consecutive escapes.
    fn unicode_escape(&mut self, escape_at: usize) -> Result<char> {
        let high = self.hex4(escape_at)?;
        let code_point = if (0xD800..0xDC00).contains(&high) {
            if !self.input[self.position..].starts_with("\\u") {
                return Err(Error::lexical(self.input, escape_at, "unpaired surrogate in unicode escape"));
            }
            let low_at = self.position;
            self.position += 2;
            let low = self.hex4(low_at)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(Error::lexical(self.input, low_at, "unpaired surrogate in unicode escape"));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code_point)
            .ok_or_else(|| Error::lexical(self.input, escape_at, "invalid unicode code point"))
    }

    fn hex4(&mut self, escape_at: usize) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = self
                .next_char()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| {
                    Error::lexical(
                        self.input,
                        escape_at,
                        "invalid unicode escape sequence (expected 4 hex digits)",
                    )
                })?;
            value = value * 16 + digit;
        }
        Ok(value)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    /// Yields every token up to and including `Eof`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        match &token {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            })
            | Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(token)
    }
}

/// Characters allowed in an unquoted word.
pub(crate) fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

const NUMBER_SUFFIXES: &[char] = &['b', 'B', 's', 'S', 'l', 'L', 'f', 'F', 'd', 'D'];

/// Splits a trailing type suffix off numeric text.
pub(crate) fn split_suffix(text: &str) -> (&str, Option<char>) {
    match text.chars().last() {
        Some(c) if NUMBER_SUFFIXES.contains(&c) && text.len() > 1 => {
            (&text[..text.len() - 1], Some(c.to_ascii_lowercase()))
        }
        _ => (text, None),
    }
}

/// Returns `true` for words the lexer reads as numbers: an optional sign,
/// digits with at most one `.`, and an optional type suffix. `Infinity`,
/// `-Infinity` and `NaN` count as numbers too, bare or with a float suffix.
pub(crate) fn is_number_literal(word: &str) -> bool {
    let (body, suffix) = split_suffix(word);
    if matches!(body, "NaN" | "Infinity" | "+Infinity" | "-Infinity") {
        return matches!(suffix, None | Some('f') | Some('d'));
    }
    let digits = body.strip_prefix(&['+', '-'][..]).unwrap_or(body);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.unwrap().kind).collect()
    }

    fn bare(s: &str) -> TokenKind {
        TokenKind::String {
            value: s.to_string(),
            quoted: false,
        }
    }

    #[test]
    fn test_punctuation_and_words() {
        assert_eq!(
            kinds("{name: Steve, level: 42}"),
            vec![
                TokenKind::LBrace,
                bare("name"),
                TokenKind::Colon,
                bare("Steve"),
                TokenKind::Comma,
                bare("level"),
                TokenKind::Colon,
                TokenKind::Number("42".to_string()),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_shapes() {
        for word in ["1", "-1", "+1.5", "1.", ".5", "3b", "2S", "7l", "1.5f", "2D", "Infinityf", "-InfinityD", "NaN"] {
            assert!(is_number_literal(word), "{} should be a number", word);
        }
        for word in ["", "-", "b", "1.2.3", "1e5", "1bb", "abc", "0x10", "--1", "Infinityb", "NaNs", "-InfinityL"] {
            assert!(!is_number_literal(word), "{} should not be a number", word);
        }
    }

    #[test]
    fn test_special_word_with_integer_suffix_is_a_word() {
        assert_eq!(
            kinds("Infinityb NaNf"),
            vec![
                bare("Infinityb"),
                TokenKind::Number("NaNf".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_array_prefix_needs_semicolon() {
        assert_eq!(
            kinds("[I ;]"),
            vec![
                TokenKind::LBracket,
                TokenKind::ArrayPrefix('I'),
                TokenKind::Semicolon,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("[B]")[1], bare("B"));
    }

    #[test]
    fn test_quoted_escapes() {
        let tokens = kinds(r#""a\"b\\c\né" 'it\'s'"#);
        assert_eq!(
            tokens[0],
            TokenKind::String {
                value: "a\"b\\c\né".to_string(),
                quoted: true
            }
        );
        assert_eq!(
            tokens[1],
            TokenKind::String {
                value: "it's".to_string(),
                quoted: true
            }
        );
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let tokens = kinds(r#""\uD83D\uDE00""#);
        assert_eq!(
            tokens[0],
            TokenKind::String {
                value: "\u{1F600}".to_string(),
                quoted: true
            }
        );
    }

    #[test]
    fn test_unterminated_string_reports_opening_quote() {
        let err = Lexer::new("{a: \"open").find_map(|t| t.err()).unwrap();
        assert!(matches!(err, Error::Lexical { offset: 4, .. }));
    }

    #[test]
    fn test_bad_escapes() {
        assert!(Lexer::new(r#""\q""#).next().unwrap().is_err());
        assert!(Lexer::new(r#""\u12""#).next().unwrap().is_err());
        assert!(Lexer::new(r#""\ud83d""#).next().unwrap().is_err());
        assert!(Lexer::new("\"abc\\").next().unwrap().is_err());
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(kinds("@"), vec![TokenKind::Unknown('@'), TokenKind::Eof]);
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut lexer = Lexer::new("[1]");
        let first: Vec<_> = lexer.by_ref().map(|t| t.unwrap()).collect();
        assert!(lexer.next().is_none());
        lexer.reset();
        let second: Vec<_> = lexer.map(|t| t.unwrap()).collect();
        assert_eq!(first, second);
    }
}
