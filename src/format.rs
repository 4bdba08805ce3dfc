//! Tag Tree Format Reference
//!
//! This module documents the binary layout and the text notation as
//! implemented by this library. It contains no code.
//!
//! # Tag Kinds
//!
//! | Id | Kind | Payload | Text form |
//! |----|------|---------|-----------|
//! | 0 | `End` | none; terminates a compound | n/a |
//! | 1 | `Byte` | `i8` | `1b` |
//! | 2 | `Short` | `i16` | `1s` |
//! | 3 | `Int` | `i32` | `1` |
//! | 4 | `Long` | `i64` | `1l` |
//! | 5 | `Float` | IEEE-754 `f32` | `1.0f` |
//! | 6 | `Double` | IEEE-754 `f64` | `1.0` |
//! | 7 | `ByteArray` | `len: i32`, then `len` bytes | `[B;1b,2b]` |
//! | 8 | `String` | `len: u16`, then `len` bytes of UTF-8 | `abc` or `"a b"` |
//! | 9 | `List` | `kind: u8`, `len: i32`, then `len` bare payloads | `[ 1, 2 ]` |
//! | 10 | `Compound` | named tags, then one `End` byte | `{a: 1, b: 2}` |
//! | 11 | `IntArray` | `len: i32`, then `len` × `i32` | `[I;1,2]` |
//! | 12 | `LongArray` | `len: i32`, then `len` × `i64` | `[L;1l,2l]` |
//!
//! # Binary Layout
//!
//! All multi-byte integers and floats are big-endian.
//!
//! ```text
//! NamedTag := kind:u8 name_len:u16 name:[u8; name_len] payload
//! ```
//!
//! A stream contains exactly one named tag, which must be a compound. A
//! compound's children are full named tags; a list's elements are bare
//! payloads with no kind byte and no name.
//!
//! **Rules**:
//! - An empty list whose element kind was never set is written with element
//!   kind `Compound`. An empty list declared with element kind `End` reads
//!   back as such an untyped list; a non-empty one is an error.
//! - Negative lengths, lengths above [`ReadOptions::max_len`], unknown kind
//!   ids and `End` at the root are errors.
//! - Compound children may share a name. They are kept in stream order.
//! - Nothing may follow the root tag. For compressed streams this applies to
//!   the decompressed payload; bytes after the end of the compressed data
//!   are not inspected.
//!
//! ## Example
//!
//! A compound named `root` holding `level: 42` and `name: "Steve"`:
//!
//! ```text
//! 0A 00 04 'r' 'o' 'o' 't'
//!    03 00 05 'l' 'e' 'v' 'e' 'l'  00 00 00 2A
//!    08 00 04 'n' 'a' 'm' 'e'      00 05 'S' 't' 'e' 'v' 'e'
//! 00
//! ```
//!
//! # Compression
//!
//! Streams may be wrapped in gzip (first bytes `1F 8B`) or zlib (a deflate
//! CMF byte whose 16-bit header is a multiple of 31). Readers detect both;
//! writers pick one through [`Compression`].
//!
//! # Text Notation
//!
//! ```text
//! value     := compound | list | array | string | number
//! compound  := '{' (key ':' value (',' key ':' value)* ','?)? '}'
//! list      := '[' (value (',' value)* ','?)? ']'
//! array     := '[' ('B' | 'I' | 'L') ';' (number (',' number)* ','?)? ']'
//! key       := string | number
//! ```
//!
//! Whitespace between tokens is ignored. Any kind may appear at the top
//! level.
//!
//! ## Numbers
//!
//! An optional sign, digits with at most one `.`, and an optional suffix
//! (case-insensitive): `b` Byte, `s` Short, `l` Long, `f` Float, `d` Double.
//! Without a suffix, numbers with a `.` are Doubles and the rest are Ints.
//! `NaN`, `Infinity` and `-Infinity` are Doubles, or Floats with `f`.
//! Out-of-range values are errors, never wrapped.
//!
//! ## Strings
//!
//! Bare words use `A-Z a-z 0-9 _ - . +`. The bare words `true` and `false`
//! read as the Bytes `1b` and `0b`. Quoted strings use `"` or `'` and
//! understand these escapes:
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\"` `\'` `\\` | the quote or backslash |
//! | `\n` `\t` `\r` `\b` `\f` | control characters |
//! | `\uXXXX` | a UTF-16 unit; surrogate pairs combine |
//!
//! ## Canonical Output
//!
//! The serializer writes a string bare only when it is non-empty, made of
//! `A-Z a-z 0-9 _`, and would not read back as a number or a boolean.
//! Everything else is double-quoted, with control and non-ASCII characters
//! written as `\uXXXX`.
//!
//! ```text
//! {name: Steve, pos: [I;1,64,-3], tags: [ a, "b c" ], hp: 20.0f}
//! ```
//!
//! Finite floats always keep a `.` so that they read back as floats.
//!
//! [`ReadOptions::max_len`]: crate::ReadOptions::max_len
//! [`Compression`]: crate::Compression
