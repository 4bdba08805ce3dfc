//! The binary codec.
//!
//! A stream holds exactly one named tag, which must be a compound:
//!
//! ```text
//! NamedTag := Kind:u8 [Kind != End: NameLen:u16 Name:NameLen*u8] Payload
//! ```
//!
//! All integers are big-endian. See the [`format`](crate::format) module for
//! the payload table.
//!
//! The entry points here accept and produce streams that may be wrapped in
//! gzip or zlib; the framing is detected on read and chosen on write.

mod reader;
mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;

use std::io::{BufReader, Read, Write};

use crate::compression::{decompressing_reader, CompressedWriter, Compression};
use crate::{Error, ReadOptions, Result, Tag};

/// Decodes a possibly compressed stream holding exactly one root tag. The
/// stream is consumed and dropped before this returns, whether decoding
/// succeeded or not.
pub fn read_tag<R: Read>(input: R, options: &ReadOptions) -> Result<Tag> {
    let (compression, decoded) =
        decompressing_reader(BufReader::new(input)).map_err(|e| Error::Binary {
            msg: format!("cannot read stream header: {}", e),
            offset: 0,
            depth: 0,
            name: String::new(),
            kind: None,
        })?;
    let mut reader = BinaryReader::new(decoded, options);
    let tag = reader.read_root()?;
    reader.finish()?;
    tracing::debug!(
        ?compression,
        root = %tag.name(),
        bytes = reader.bytes_read(),
        "decoded binary tag tree"
    );
    Ok(tag)
}

/// Encodes `tag` with the given framing. The sink is finished, flushed and
/// dropped before this returns.
pub fn write_tag<W: Write>(output: W, tag: &Tag, compression: Compression) -> Result<()> {
    let mut writer = BinaryWriter::new(CompressedWriter::new(output, compression));
    writer.write_root(tag)?;
    writer.into_inner().finish()?;
    tracing::debug!(?compression, root = %tag.name(), "encoded binary tag tree");
    Ok(())
}
