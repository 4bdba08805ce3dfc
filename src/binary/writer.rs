//! Binary encoding: [`Tag`] → bytes.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

use crate::options::DEFAULT_MAX_DEPTH;
use crate::{CompoundTag, Error, ListTag, Result, Tag, TagKind, TagValue};

/// Encodes a tag tree as uncompressed bytes.
///
/// The exact inverse of [`BinaryReader`](super::BinaryReader): every
/// compound child is written as a full named tag, list elements as bare
/// payloads, and each compound ends with a single `TAG_End` byte.
pub struct BinaryWriter<W> {
    output: W,
    depth: usize,
    max_depth: usize,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(output: W) -> Self {
        BinaryWriter {
            output,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the nesting limit, e.g. to write back a tree that was read with
    /// a raised [`ReadOptions::max_depth`](crate::ReadOptions::max_depth).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Writes `tag` as the root of a stream.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if `tag` is not a compound, and on
    /// names, strings or arrays too long for their length prefix.
    pub fn write_root(&mut self, tag: &Tag) -> Result<()> {
        if tag.kind() != TagKind::Compound {
            return Err(Error::type_mismatch(TagKind::Compound, tag.kind()));
        }
        self.write_named(tag)
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn write_named(&mut self, tag: &Tag) -> Result<()> {
        self.output.write_u8(tag.kind().id())?;
        self.write_string(tag.name())?;
        self.write_payload(tag.value())
    }

    fn write_payload(&mut self, value: &TagValue) -> Result<()> {
        match value {
            TagValue::Byte(v) => self.output.write_i8(*v)?,
            TagValue::Short(v) => self.output.write_i16::<BigEndian>(*v)?,
            TagValue::Int(v) => self.output.write_i32::<BigEndian>(*v)?,
            TagValue::Long(v) => self.output.write_i64::<BigEndian>(*v)?,
            TagValue::Float(v) => self.output.write_f32::<BigEndian>(*v)?,
            TagValue::Double(v) => self.output.write_f64::<BigEndian>(*v)?,
            TagValue::ByteArray(values) => {
                self.write_len(values.len())?;
                let bytes: Vec<u8> = values.iter().map(|b| *b as u8).collect();
                self.output.write_all(&bytes)?;
            }
            TagValue::String(s) => self.write_string(s)?,
            TagValue::List(list) => self.write_list(list)?,
            TagValue::Compound(compound) => self.write_compound(compound)?,
            TagValue::IntArray(values) => {
                self.write_len(values.len())?;
                for v in values {
                    self.output.write_i32::<BigEndian>(*v)?;
                }
            }
            TagValue::LongArray(values) => {
                self.write_len(values.len())?;
                for v in values {
                    self.output.write_i64::<BigEndian>(*v)?;
                }
            }
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &CompoundTag) -> Result<()> {
        self.enter()?;
        for tag in compound {
            self.write_named(tag)?;
        }
        self.output.write_u8(TagKind::End.id())?;
        self.depth -= 1;
        Ok(())
    }

    fn write_list(&mut self, list: &ListTag) -> Result<()> {
        self.enter()?;
        self.output.write_u8(list.element_kind().id())?;
        self.write_len(list.len())?;
        for value in list {
            self.write_payload(value)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimit {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len)
            .map_err(|_| Error::custom(format!("length {} does not fit in a signed int", len)))?;
        self.output.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let len = u16::try_from(s.len()).map_err(|_| {
            Error::custom(format!(
                "string of {} bytes is longer than {}",
                s.len(),
                u16::MAX
            ))
        })?;
        self.output.write_u16::<BigEndian>(len)?;
        self.output.write_all(s.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(tag: &Tag) -> Result<Vec<u8>> {
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_root(tag)?;
        Ok(writer.into_inner())
    }

    #[test]
    fn test_non_compound_root_is_rejected() {
        let err = encode(&Tag::new("x", 1)).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: TagKind::Compound,
                found: TagKind::Int
            }
        ));
    }

    #[test]
    fn test_list_writes_bare_payloads() {
        let mut root = CompoundTag::new();
        let list = ListTag::from_values(vec![TagValue::Short(1), TagValue::Short(2)]).unwrap();
        root.push(Tag::new("l", list));
        let bytes = encode(&Tag::new("", root)).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x0A, 0x00, 0x00, // root
                0x09, 0x00, 0x01, b'l', // list named "l"
                0x02, 0x00, 0x00, 0x00, 0x02, // of 2 shorts
                0x00, 0x01, 0x00, 0x02, // payloads
                0x00, // end of root
            ]
        );
    }

    #[test]
    fn test_untyped_empty_list_is_written_as_compound_list() {
        let mut root = CompoundTag::new();
        root.push(Tag::new("l", ListTag::untyped()));
        let bytes = encode(&Tag::new("", root)).unwrap();
        assert_eq!(&bytes[7..12], &[0x0A, 0x00, 0x00, 0x00, 0x00]);
    }

    fn nested_lists(depth: usize) -> Tag {
        let mut value = TagValue::List(ListTag::untyped());
        for _ in 1..depth {
            value = TagValue::List(ListTag::from_values(vec![value]).unwrap());
        }
        let mut root = CompoundTag::new();
        root.push(Tag::new("deep", value));
        Tag::new("", root)
    }

    #[test]
    fn test_depth_limit_is_configurable() {
        // root compound plus 200 lists
        let tag = nested_lists(200);
        assert!(matches!(
            encode(&tag),
            Err(Error::DepthLimit {
                limit: DEFAULT_MAX_DEPTH
            })
        ));

        let mut writer = BinaryWriter::new(Vec::new()).with_max_depth(201);
        writer.write_root(&tag).unwrap();
        assert!(!writer.into_inner().is_empty());

        let mut writer = BinaryWriter::new(Vec::new()).with_max_depth(200);
        assert!(matches!(
            writer.write_root(&tag),
            Err(Error::DepthLimit { limit: 200 })
        ));
    }

    #[test]
    fn test_overlong_name_is_rejected() {
        let mut root = CompoundTag::new();
        root.push(Tag::new("n".repeat(70_000), 1));
        assert!(encode(&Tag::new("", root)).is_err());
    }
}
