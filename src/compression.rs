//! Compression framing for binary streams.
//!
//! Files in the binary format are usually gzip-compressed, sometimes zlib, and
//! occasionally stored raw. [`Compression::detect`] tells them apart by their
//! first two bytes; the actual inflating and deflating is done by `flate2`.

use flate2::bufread::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use std::io::{self, BufRead, Read, Write};

/// Framing of a binary stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zlib,
}

impl Compression {
    /// Identifies the framing from the first bytes of a stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::Compression;
    ///
    /// assert_eq!(Compression::detect(&[0x1F, 0x8B, 0x08]), Compression::Gzip);
    /// assert_eq!(Compression::detect(&[0x78, 0x9C]), Compression::Zlib);
    /// assert_eq!(Compression::detect(&[0x0A, 0x00]), Compression::None);
    /// ```
    #[must_use]
    pub fn detect(header: &[u8]) -> Compression {
        match header {
            [0x1F, 0x8B, ..] => Compression::Gzip,
            [b0, b1, ..] if is_zlib_header(*b0, *b1) => Compression::Zlib,
            _ => Compression::None,
        }
    }
}

/// CMF/FLG check: the pair is a multiple of 31 and the method is deflate.
fn is_zlib_header(b0: u8, b1: u8) -> bool {
    let word = (u16::from(b0) << 8) | u16::from(b1);
    b0 & 0x0F == 8 && word % 31 == 0
}

/// Wraps `reader` in a decoder matching its framing, without consuming the
/// bytes used for detection.
pub fn decompressing_reader<'a, R>(mut reader: R) -> io::Result<(Compression, Box<dyn Read + 'a>)>
where
    R: BufRead + 'a,
{
    let compression = Compression::detect(reader.fill_buf()?);
    let boxed: Box<dyn Read + 'a> = match compression {
        Compression::None => Box::new(reader),
        Compression::Gzip => Box::new(GzDecoder::new(reader)),
        Compression::Zlib => Box::new(ZlibDecoder::new(reader)),
    };
    Ok((compression, boxed))
}

/// A sink that compresses according to a [`Compression`].
///
/// [`finish`](CompressedWriter::finish) must be called to write the trailer.
pub enum CompressedWriter<W: Write> {
    Plain(W),
    Gzip(GzEncoder<W>),
    Zlib(ZlibEncoder<W>),
}

impl<W: Write> CompressedWriter<W> {
    pub fn new(writer: W, compression: Compression) -> Self {
        let level = flate2::Compression::default();
        match compression {
            Compression::None => CompressedWriter::Plain(writer),
            Compression::Gzip => CompressedWriter::Gzip(GzEncoder::new(writer, level)),
            Compression::Zlib => CompressedWriter::Zlib(ZlibEncoder::new(writer, level)),
        }
    }

    /// Writes any trailer, flushes and hands back the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        let mut inner = match self {
            CompressedWriter::Plain(w) => w,
            CompressedWriter::Gzip(e) => e.finish()?,
            CompressedWriter::Zlib(e) => e.finish()?,
        };
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> Write for CompressedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            CompressedWriter::Plain(w) => w.write(buf),
            CompressedWriter::Gzip(e) => e.write(buf),
            CompressedWriter::Zlib(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            CompressedWriter::Plain(w) => w.flush(),
            CompressedWriter::Gzip(e) => e.flush(),
            CompressedWriter::Zlib(e) => e.flush(),
        }
    }
}
