//! Binary decoding: bytes → [`Tag`].

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Read};

use crate::{CompoundTag, Error, ListTag, ReadOptions, Result, Tag, TagKind, TagValue};

/// Upper bound on speculative preallocation, whatever a length field claims.
const PREALLOC_LIMIT: usize = 4096;

/// Counts the bytes pulled from the wrapped reader.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Decodes one tag tree from a stream of uncompressed bytes.
///
/// The reader tracks how many bytes it consumed, how deep it is, and the name
/// and kind of the tag it is working on, and attaches all of it to any
/// [`Error::Binary`] it returns.
pub struct BinaryReader<'a, R> {
    input: CountingReader<R>,
    options: &'a ReadOptions,
    depth: usize,
    name: String,
    kind: Option<TagKind>,
}

impl<'a, R: Read> BinaryReader<'a, R> {
    pub fn new(input: R, options: &'a ReadOptions) -> Self {
        BinaryReader {
            input: CountingReader {
                inner: input,
                count: 0,
            },
            options,
            depth: 0,
            name: String::new(),
            kind: None,
        }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.input.count
    }

    /// Checks that the stream ends right after the root tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Binary`] if any byte follows.
    pub fn finish(&mut self) -> Result<()> {
        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(0) => Ok(()),
            Ok(_) => Err(self.error("trailing data after the root tag")),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Reads the root named tag, which must be a compound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Binary`] for any structural problem (including a
    /// truncated stream) and [`Error::DepthLimit`] for overly deep nesting.
    pub fn read_root(&mut self) -> Result<Tag> {
        let kind = self.read_kind()?;
        self.kind = Some(kind);
        match kind {
            TagKind::Compound => {}
            TagKind::End => return Err(self.error("TAG_End at the root of the stream")),
            other => {
                return Err(self.error(&format!("root tag must be a compound, found {}", other)))
            }
        }
        let name = self.read_string()?;
        self.name.clone_from(&name);
        let value = self.read_payload(kind)?;
        Ok(Tag::new(name, value))
    }

    fn read_payload(&mut self, kind: TagKind) -> Result<TagValue> {
        let value = match kind {
            TagKind::End => return Err(self.error("TAG_End has no payload")),
            TagKind::Byte => TagValue::Byte(self.input.read_i8().map_err(|e| self.io_error(e))?),
            TagKind::Short => TagValue::Short(
                self.input
                    .read_i16::<BigEndian>()
                    .map_err(|e| self.io_error(e))?,
            ),
            TagKind::Int => TagValue::Int(
                self.input
                    .read_i32::<BigEndian>()
                    .map_err(|e| self.io_error(e))?,
            ),
            TagKind::Long => TagValue::Long(
                self.input
                    .read_i64::<BigEndian>()
                    .map_err(|e| self.io_error(e))?,
            ),
            TagKind::Float => TagValue::Float(
                self.input
                    .read_f32::<BigEndian>()
                    .map_err(|e| self.io_error(e))?,
            ),
            TagKind::Double => TagValue::Double(
                self.input
                    .read_f64::<BigEndian>()
                    .map_err(|e| self.io_error(e))?,
            ),
            TagKind::ByteArray => {
                let len = self.read_len("byte array")?;
                let bytes = self.read_bytes(len)?;
                TagValue::ByteArray(bytes.into_iter().map(|b| b as i8).collect())
            }
            TagKind::String => TagValue::String(self.read_string()?),
            TagKind::List => TagValue::List(self.read_list()?),
            TagKind::Compound => TagValue::Compound(self.read_compound()?),
            TagKind::IntArray => {
                let len = self.read_len("int array")?;
                let mut values = Vec::with_capacity(len.min(PREALLOC_LIMIT));
                for _ in 0..len {
                    values.push(
                        self.input
                            .read_i32::<BigEndian>()
                            .map_err(|e| self.io_error(e))?,
                    );
                }
                TagValue::IntArray(values)
            }
            TagKind::LongArray => {
                let len = self.read_len("long array")?;
                let mut values = Vec::with_capacity(len.min(PREALLOC_LIMIT));
                for _ in 0..len {
                    values.push(
                        self.input
                            .read_i64::<BigEndian>()
                            .map_err(|e| self.io_error(e))?,
                    );
                }
                TagValue::LongArray(values)
            }
        };
        Ok(value)
    }

    fn read_compound(&mut self) -> Result<CompoundTag> {
        self.enter()?;
        let mut compound = CompoundTag::new();
        loop {
            let kind = self.read_kind()?;
            if kind == TagKind::End {
                break;
            }
            self.kind = Some(kind);
            let name = self.read_string()?;
            self.name.clone_from(&name);
            tracing::trace!(depth = self.depth, name = %name, kind = %kind, "reading tag");
            let value = self.read_payload(kind)?;
            compound.push(Tag::new(name, value));
        }
        self.depth -= 1;
        Ok(compound)
    }

    fn read_list(&mut self) -> Result<ListTag> {
        let element_kind = self.read_kind()?;
        let len = self.read_len("list")?;
        if element_kind == TagKind::End {
            if len == 0 {
                return Ok(ListTag::untyped());
            }
            return Err(self.error(&format!("list of TAG_End with {} elements", len)));
        }
        self.enter()?;
        let mut list = ListTag::new(element_kind)?;
        list.reserve(len.min(PREALLOC_LIMIT));
        self.kind = Some(element_kind);
        for _ in 0..len {
            let value = self.read_payload(element_kind)?;
            list.push_unchecked(value);
        }
        self.depth -= 1;
        Ok(list)
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

    fn read_kind(&mut self) -> Result<TagKind> {
        let id = self.input.read_u8().map_err(|e| self.io_error(e))?;
        TagKind::from_id(id).ok_or_else(|| self.error(&format!("unknown tag id {}", id)))
    }

    /// Reads a 4-byte signed length and checks it against the configured ceiling.
    fn read_len(&mut self, what: &str) -> Result<usize> {
        let len = self
            .input
            .read_i32::<BigEndian>()
            .map_err(|e| self.io_error(e))?;
        if len < 0 {
            return Err(self.error(&format!("negative {} length {}", what, len)));
        }
        let len = len as usize;
        if len > self.options.max_len {
            return Err(self.error(&format!(
                "{} length {} exceeds the limit of {}",
                what, len, self.options.max_len
            )));
        }
        Ok(len)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self
            .input
            .read_u16::<BigEndian>()
            .map_err(|e| self.io_error(e))?;
        let bytes = self.read_bytes(usize::from(len))?;
        String::from_utf8(bytes).map_err(|e| self.error(&format!("invalid UTF-8 in string: {}", e)))
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let result = (&mut self.input).take(len as u64).read_to_end(&mut bytes);
        let read = result.map_err(|e| self.io_error(e))?;
        if read < len {
            return Err(self.error("unexpected end of stream"));
        }
        Ok(bytes)
    }

    fn io_error(&self, e: io::Error) -> Error {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            self.error("unexpected end of stream")
        } else {
            self.error(&e.to_string())
        }
    }

    fn error(&self, msg: &str) -> Error {
        Error::Binary {
            msg: msg.to_string(),
            offset: self.input.count,
            depth: self.depth,
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}
