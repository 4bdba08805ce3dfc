//! Error types for the binary and text codecs.
//!
//! Every failure carries enough context to locate the problem in the input:
//!
//! ## Error Categories
//!
//! - **Lexical errors**: unterminated strings, broken escapes (character offset)
//! - **Syntax errors**: unexpected tokens, mixed lists, bad array prefixes
//!   (character offset plus an excerpt of the input)
//! - **Binary errors**: unknown kind ids, `End` at the root, bad lengths,
//!   truncated streams (bytes consumed, depth, current tag name and kind)
//! - **Type mismatches**: a payload, list element or replacement tag of the
//!   wrong kind
//!
//! ## Examples
//!
//! ```rust
//! use nbt_codec::{from_snbt, Error};
//!
//! let err = from_snbt("[B;1b,2]").unwrap_err();
//! assert!(matches!(err, Error::Syntax { .. }));
//! assert!(err.to_string().contains("<--[HERE]"));
//! ```

use crate::TagKind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed token in text input
    #[error("Lexical error at offset {offset}: {msg}\n{context}")]
    Lexical {
        offset: usize,
        msg: String,
        context: String,
    },

    /// Token sequence that does not match the text grammar
    #[error("Syntax error at offset {offset}: {msg}\n{context}")]
    Syntax {
        offset: usize,
        msg: String,
        context: String,
    },

    /// Structural problem in a binary stream
    #[error(
        "Binary format error after {offset} bytes (depth {depth}, tag \"{name}\" of kind {}): {msg}",
        .kind.map_or("unknown", TagKind::name)
    )]
    Binary {
        msg: String,
        offset: u64,
        depth: usize,
        name: String,
        kind: Option<TagKind>,
    },

    /// Value of the wrong kind supplied to a typed slot
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: TagKind, found: TagKind },

    /// Nesting deeper than the configured limit
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthLimit { limit: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a lexical error at a character offset of `input`.
    pub fn lexical(input: &str, byte_pos: usize, msg: &str) -> Self {
        Error::Lexical {
            offset: char_offset(input, byte_pos),
            msg: msg.to_string(),
            context: excerpt(input, byte_pos),
        }
    }

    /// Creates a syntax error at a character offset of `input`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::Error;
    ///
    /// let err = Error::syntax("{a: }", 4, "expected value");
    /// assert!(err.to_string().contains("offset 4"));
    /// assert!(err.to_string().contains("{a: <--[HERE]"));
    /// ```
    pub fn syntax(input: &str, byte_pos: usize, msg: &str) -> Self {
        Error::Syntax {
            offset: char_offset(input, byte_pos),
            msg: msg.to_string(),
            context: excerpt(input, byte_pos),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::{Error, TagKind};
    ///
    /// let err = Error::type_mismatch(TagKind::Int, TagKind::String);
    /// assert!(err.to_string().contains("expected TAG_Int"));
    /// ```
    pub fn type_mismatch(expected: TagKind, found: TagKind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the character offset for text errors.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Lexical { offset, .. } | Error::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

const EXCERPT_CHARS: usize = 32;
const EXCERPT_AFTER_CHARS: usize = 16;

fn char_offset(input: &str, byte_pos: usize) -> usize {
    let byte_pos = floor_boundary(input, byte_pos);
    input[..byte_pos].chars().count()
}

fn floor_boundary(input: &str, byte_pos: usize) -> usize {
    let mut pos = byte_pos.min(input.len());
    while !input.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Up to 32 characters leading to `byte_pos`, a `<--[HERE]` marker, then up
/// to 16 characters following it.
fn excerpt(input: &str, byte_pos: usize) -> String {
    let end = floor_boundary(input, byte_pos);
    let (before, after) = input.split_at(end);
    let skip = before.chars().count().saturating_sub(EXCERPT_CHARS);
    let mut out = String::new();
    if skip > 0 {
        out.push_str("...");
    }
    out.extend(before.chars().skip(skip));
    out.push_str("<--[HERE]");
    out.extend(after.chars().take(EXCERPT_AFTER_CHARS));
    if after.chars().count() > EXCERPT_AFTER_CHARS {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_input() {
        assert_eq!(excerpt("{a:b}", 3), "{a:<--[HERE]b}");
    }

    #[test]
    fn test_excerpt_truncates_long_suffix() {
        let input = format!("[{}]", "y".repeat(40));
        assert_eq!(
            excerpt(&input, 1),
            format!("[<--[HERE]{}...", "y".repeat(EXCERPT_AFTER_CHARS))
        );
    }

    #[test]
    fn test_excerpt_truncates_long_prefix() {
        let input = "x".repeat(100);
        let ex = excerpt(&input, 100);
        assert!(ex.starts_with("..."));
        assert_eq!(ex.len(), 3 + EXCERPT_CHARS + "<--[HERE]".len());
    }

    #[test]
    fn test_offset_counts_characters() {
        let err = Error::syntax("\"é\" x", 5, "trailing");
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_binary_display_without_kind() {
        let err = Error::Binary {
            msg: "unknown tag id 99".to_string(),
            offset: 1,
            depth: 0,
            name: String::new(),
            kind: None,
        };
        assert!(err.to_string().contains("kind unknown"));
    }
}
