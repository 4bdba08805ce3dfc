//! # nbt_codec
//!
//! Readers and writers for the binary tag-tree format used by Minecraft
//! worlds, player data and structure files, and for its stringified text
//! notation.
//!
//! ## What is a tag tree?
//!
//! A tree of typed, optionally named values drawn from a closed set of
//! kinds: six numeric scalars, strings, three packed numeric arrays, and two
//! containers. A **compound** holds named children; a **list** holds unnamed
//! values that all share one kind. A persisted file always has a compound at
//! its root.
//!
//! ## Key Features
//!
//! - **Binary codec**: big-endian, length-prefixed, with gzip or zlib framing
//!   detected on read
//! - **Text codec**: the command-line notation, e.g. `{pos: [I;1,64,-3]}`,
//!   with canonical output that reads back to the same tree
//! - **Type Safe**: a list can never hold two kinds and a tag never changes
//!   kind through its setters
//! - **Bounded**: nesting depth and length fields are checked against
//!   [`ReadOptions`] before anything is allocated
//! - **Serde Compatible**: [`TagValue`] serializes into and deserializes from
//!   any self-describing serde format
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! nbt_codec = "0.1"
//! ```
//!
//! ### Binary round trip
//!
//! ```rust
//! use nbt_codec::{from_bytes, to_bytes, CompoundTag, Tag};
//!
//! let mut player = CompoundTag::new();
//! player.push(Tag::new("name", "Steve"));
//! player.push(Tag::new("level", 42));
//! let root = Tag::new("root", player);
//!
//! let bytes = to_bytes(&root)?;
//! assert_eq!(bytes[0], 0x0A);
//! assert_eq!(from_bytes(&bytes)?, root);
//! # Ok::<(), nbt_codec::Error>(())
//! ```
//!
//! ### Text round trip
//!
//! ```rust
//! use nbt_codec::{from_snbt, to_snbt, TagValue};
//!
//! let value = from_snbt("{name: Steve, level: 42, flags: [B; 1b, 0b]}")?;
//! let compound = value.as_compound().unwrap();
//! assert_eq!(compound.get_value("level"), Some(&TagValue::Int(42)));
//! assert_eq!(to_snbt(&value), "{name: Steve, level: 42, flags: [B;1b,0b]}");
//! # Ok::<(), nbt_codec::Error>(())
//! ```
//!
//! ### Compressed files
//!
//! ```rust,no_run
//! use nbt_codec::{read_file, write_file, Compression};
//!
//! let level = read_file("level.dat")?;
//! write_file("level-copy.dat", &level, Compression::Gzip)?;
//! # Ok::<(), nbt_codec::Error>(())
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Streams passed in are dropped before the call returns, on success or
//!   failure
//! - Untrusted input cannot trigger unbounded recursion or allocation
//!
//! ## Format Specification
//!
//! The byte layout and the text grammar are documented in [`format`].

pub mod binary;
pub mod compound;
pub mod compression;
pub mod error;
pub mod format;
pub mod kind;
pub mod list;
pub mod options;
pub mod snbt;
pub mod value;

pub use binary::{BinaryReader, BinaryWriter};
pub use compound::CompoundTag;
pub use compression::Compression;
pub use error::{Error, Result};
pub use kind::TagKind;
pub use list::ListTag;
pub use options::{ReadOptions, SnbtOptions};
pub use value::{Tag, TagValue};

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Decode a binary tag tree from bytes, uncompressed or gzip/zlib framed.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_bytes, TagKind};
///
/// let tag = from_bytes(&[0x0A, 0x00, 0x02, b'h', b'i', 0x00])?;
/// assert_eq!(tag.name(), "hi");
/// assert_eq!(tag.kind(), TagKind::Compound);
/// # Ok::<(), nbt_codec::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::Binary`] for structurally invalid or truncated input and
/// when the root is not a compound.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes(bytes: &[u8]) -> Result<Tag> {
    from_bytes_with_options(bytes, &ReadOptions::default())
}

/// Decode a binary tag tree from bytes with custom limits.
///
/// # Errors
///
/// As [`from_bytes`], plus [`Error::DepthLimit`] when the tree nests deeper
/// than `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes_with_options(bytes: &[u8], options: &ReadOptions) -> Result<Tag> {
    binary::read_tag(bytes, options)
}

/// Decode a binary tag tree from a byte stream.
///
/// The reader is consumed and dropped before this returns.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::from_reader;
/// use std::io::Cursor;
///
/// let tag = from_reader(Cursor::new(vec![0x0A, 0x00, 0x00, 0x00]))?;
/// assert!(tag.value().as_compound().unwrap().is_empty());
/// # Ok::<(), nbt_codec::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the stream is not a valid tag tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Tag> {
    from_reader_with_options(reader, &ReadOptions::default())
}

/// Decode a binary tag tree from a byte stream with custom limits.
///
/// # Errors
///
/// Returns an error if reading fails or the stream is not a valid tag tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R: io::Read>(reader: R, options: &ReadOptions) -> Result<Tag> {
    binary::read_tag(reader, options)
}

/// Encode a tag tree as uncompressed bytes.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `tag` is not a compound, or an error
/// if a name, string or array is too long for its length prefix.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes(tag: &Tag) -> Result<Vec<u8>> {
    to_bytes_with_compression(tag, Compression::None)
}

/// Encode a tag tree as bytes with the given framing.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_bytes, to_bytes_with_compression, CompoundTag, Compression, Tag};
///
/// let root = Tag::new("", CompoundTag::new());
/// let bytes = to_bytes_with_compression(&root, Compression::Gzip)?;
/// assert_eq!(Compression::detect(&bytes), Compression::Gzip);
/// assert_eq!(from_bytes(&bytes)?, root);
/// # Ok::<(), nbt_codec::Error>(())
/// ```
///
/// # Errors
///
/// As [`to_bytes`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes_with_compression(tag: &Tag, compression: Compression) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(128);
    binary::write_tag(&mut bytes, tag, compression)?;
    Ok(bytes)
}

/// Encode a tag tree, uncompressed, to a writer.
///
/// The writer is flushed and dropped before this returns.
///
/// # Errors
///
/// As [`to_bytes`], plus any error from the writer.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, tag: &Tag) -> Result<()> {
    to_writer_with_compression(writer, tag, Compression::None)
}

/// Encode a tag tree to a writer with the given framing.
///
/// # Errors
///
/// As [`to_bytes`], plus any error from the writer.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_compression<W: io::Write>(
    writer: W,
    tag: &Tag,
    compression: Compression,
) -> Result<()> {
    binary::write_tag(writer, tag, compression)
}

/// Parse a value from text. Any kind may appear at the top level.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_snbt, TagKind, TagValue};
///
/// let list = from_snbt("[1, 2, 3]")?;
/// assert_eq!(list.as_list().map(|l| l.element_kind()), Some(TagKind::Int));
///
/// assert_eq!(from_snbt("true")?, TagValue::Byte(1));
/// assert_eq!(from_snbt("\"true\"")?, TagValue::from("true"));
/// # Ok::<(), nbt_codec::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::Lexical`] or [`Error::Syntax`] with the character offset
/// of the problem.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_snbt(input: &str) -> Result<TagValue> {
    from_snbt_with_options(input, &ReadOptions::default())
}

/// Parse a value from text with custom limits.
///
/// # Errors
///
/// As [`from_snbt`], plus [`Error::DepthLimit`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_snbt_with_options(input: &str, options: &ReadOptions) -> Result<TagValue> {
    snbt::from_str(input, options)
}

/// Serialize a value, or the payload of a [`Tag`], to canonical text.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{to_snbt, TagValue};
///
/// assert_eq!(to_snbt(&TagValue::Float(f32::INFINITY)), "Infinityf");
/// assert_eq!(to_snbt(&TagValue::IntArray(vec![1, 2])), "[I;1,2]");
/// ```
#[must_use]
pub fn to_snbt<V: AsRef<TagValue> + ?Sized>(value: &V) -> String {
    to_snbt_with_options(value, &SnbtOptions::default())
}

/// Serialize to text with custom layout.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_snbt, to_snbt_with_options, SnbtOptions};
///
/// let value = from_snbt("{a: 1, b: {}}")?;
/// let text = to_snbt_with_options(&value, &SnbtOptions::pretty());
/// assert_eq!(text, "{\n  a: 1,\n  b: {}\n}");
/// # Ok::<(), nbt_codec::Error>(())
/// ```
#[must_use]
pub fn to_snbt_with_options<V: AsRef<TagValue> + ?Sized>(value: &V, options: &SnbtOptions) -> String {
    snbt::to_string(value.as_ref(), options)
}

/// Read a binary tag file, detecting its compression.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, otherwise as
/// [`from_bytes`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Tag> {
    let path = path.as_ref();
    let tag = from_reader(File::open(path)?)?;
    tracing::debug!(path = %path.display(), root = %tag.name(), "read tag file");
    Ok(tag)
}

/// Write a binary tag file, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written, otherwise
/// as [`to_bytes`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_file<P: AsRef<Path>>(path: P, tag: &Tag, compression: Compression) -> Result<()> {
    let path = path.as_ref();
    to_writer_with_compression(BufWriter::new(File::create(path)?), tag, compression)?;
    tracing::debug!(path = %path.display(), ?compression, "wrote tag file");
    Ok(())
}

/// Read a text tag file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read or is not UTF-8,
/// otherwise as [`from_snbt`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_snbt_file<P: AsRef<Path>>(path: P) -> Result<TagValue> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let value = from_snbt(&text)?;
    tracing::debug!(path = %path.display(), kind = %value.kind(), "read text tag file");
    Ok(value)
}

/// Write a value as canonical text followed by a single newline.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_snbt_file<P, V>(path: P, value: &V) -> Result<()>
where
    P: AsRef<Path>,
    V: AsRef<TagValue> + ?Sized,
{
    let path = path.as_ref();
    let mut text = to_snbt(value);
    text.push('\n');
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), "wrote text tag file");
    Ok(())
}
