//! The stringified text codec.
//!
//! Text form is the notation used in game commands: compounds in braces,
//! lists in brackets, typed arrays as `[B;…]`, `[I;…]` and `[L;…]`, and
//! numbers carrying a one-letter type suffix.
//!
//! ```rust
//! use nbt_codec::snbt;
//! use nbt_codec::{ReadOptions, SnbtOptions, TagValue};
//!
//! let value = snbt::from_str("{pos: [I; 1, 64, -3], name: \"Steve\"}", &ReadOptions::default())?;
//! assert_eq!(
//!     value.as_compound().and_then(|c| c.get_value("pos")),
//!     Some(&TagValue::IntArray(vec![1, 64, -3]))
//! );
//! assert_eq!(
//!     snbt::to_string(&value, &SnbtOptions::default()),
//!     "{pos: [I;1,64,-3], name: Steve}"
//! );
//! # Ok::<(), nbt_codec::Error>(())
//! ```

mod lexer;
mod parser;
mod ser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use ser::to_string;

use crate::{ReadOptions, Result, TagValue};

/// Parses a complete text document into a value of any kind.
pub fn from_str(input: &str, options: &ReadOptions) -> Result<TagValue> {
    let value = Parser::new(input, options).parse()?;
    tracing::trace!(kind = %value.kind(), bytes = input.len(), "parsed text tag");
    Ok(value)
}
