use nbt_codec::{
    from_bytes, from_bytes_with_options, from_reader, read_file, to_bytes,
    to_bytes_with_compression, to_writer_with_compression, write_file, CompoundTag, Compression,
    Error, ListTag, ReadOptions, Tag, TagKind, TagValue,
};
use nbt_codec::compression::CompressedWriter;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;
use std::cell::Cell;

fn every_kind() -> Tag {
    let mut inner = CompoundTag::new();
    inner.push(Tag::new("nested", "deep"));

    let mut compounds = ListTag::new(TagKind::Compound).unwrap();
    compounds.push(TagValue::Compound(inner.clone())).unwrap();
    compounds.push(TagValue::Compound(CompoundTag::new())).unwrap();

    let lists = ListTag::from_values(vec![
        TagValue::List(ListTag::from_values(vec![TagValue::Long(1)]).unwrap()),
        TagValue::List(ListTag::untyped()),
    ])
    .unwrap();

    let mut root = CompoundTag::new();
    root.push(Tag::new("byte", TagValue::Byte(-128)));
    root.push(Tag::new("short", TagValue::Short(i16::MAX)));
    root.push(Tag::new("int", TagValue::Int(-1)));
    root.push(Tag::new("long", TagValue::Long(i64::MIN)));
    root.push(Tag::new("float", TagValue::Float(3.25)));
    root.push(Tag::new("double", TagValue::Double(-1e300)));
    root.push(Tag::new("bytes", TagValue::ByteArray(vec![0, 1, -1])));
    root.push(Tag::new("empty bytes", TagValue::ByteArray(vec![])));
    root.push(Tag::new("string", "héllo wörld"));
    root.push(Tag::new("empty string", ""));
    root.push(Tag::new("compounds", compounds));
    root.push(Tag::new("lists", lists));
    root.push(Tag::new("empty list", ListTag::untyped()));
    root.push(Tag::new("typed empty list", ListTag::new(TagKind::Short).unwrap()));
    root.push(Tag::new("inner", inner));
    root.push(Tag::new("empty compound", CompoundTag::new()));
    root.push(Tag::new("ints", TagValue::IntArray(vec![i32::MIN, 0, i32::MAX])));
    root.push(Tag::new("longs", TagValue::LongArray(vec![i64::MAX])));
    root.push(Tag::new("int", TagValue::Int(2)));
    Tag::new("Level", root)
}

#[test]
fn test_round_trip_every_kind() {
    let tag = every_kind();
    let bytes = to_bytes(&tag).unwrap();
    let decoded = from_bytes(&bytes).unwrap();
    assert_eq!(decoded, tag);
}

#[test]
fn test_duplicate_names_survive_round_trip() {
    let decoded = from_bytes(&to_bytes(&every_kind()).unwrap()).unwrap();
    let root = decoded.value().as_compound().unwrap();
    let ints: Vec<_> = root.get_all("int").map(Tag::value).collect();
    assert_eq!(ints, vec![&TagValue::Int(-1), &TagValue::Int(2)]);
    assert_eq!(root.get_value("int"), Some(&TagValue::Int(-1)));
}

#[test]
fn test_typed_empty_list_keeps_its_kind() {
    let decoded = from_bytes(&to_bytes(&every_kind()).unwrap()).unwrap();
    let root = decoded.value().as_compound().unwrap();
    let list = root.get_value("typed empty list").unwrap().as_list().unwrap();
    assert_eq!(list.element_kind(), TagKind::Short);
    assert!(list.is_typed());
}

#[test]
fn test_round_trip_through_each_framing() {
    let tag = every_kind();
    for compression in [Compression::None, Compression::Gzip, Compression::Zlib] {
        let bytes = to_bytes_with_compression(&tag, compression).unwrap();
        assert_eq!(Compression::detect(&bytes), compression);
        assert_eq!(from_bytes(&bytes).unwrap(), tag);
    }
}

#[test]
fn test_compressed_output_is_smaller_for_repetitive_data() {
    let mut root = CompoundTag::new();
    root.push(Tag::new("zeros", TagValue::IntArray(vec![0; 4096])));
    let tag = Tag::new("", root);
    let plain = to_bytes(&tag).unwrap();
    let gzip = to_bytes_with_compression(&tag, Compression::Gzip).unwrap();
    assert!(gzip.len() < plain.len() / 10);
}

#[test]
fn test_root_must_be_compound() {
    // an Int named "x" with value 1
    let bytes = [0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x01];
    match from_bytes(&bytes).unwrap_err() {
        Error::Binary { msg, kind, .. } => {
            assert!(msg.contains("root tag must be a compound"));
            assert_eq!(kind, Some(TagKind::Int));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let err = to_bytes(&Tag::new("x", 1)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_trailing_bytes_are_rejected() {
    let err = from_bytes(&[0x0A, 0x00, 0x00, 0x00, 0xDE, 0xAD]).unwrap_err();
    assert!(err.to_string().contains("trailing data after the root tag"));

    // garbage inside the compressed payload, after the root tag
    let mut writer = CompressedWriter::new(Vec::new(), Compression::Zlib);
    writer.write_all(&[0x0A, 0x00, 0x00, 0x00, 0x00, 0x01]).unwrap();
    let bytes = writer.finish().unwrap();
    assert!(from_bytes(&bytes).is_err());
}

/// Fails every read with a non-EOF error.
struct BrokenStream;

impl Read for BrokenStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}

#[test]
fn test_failing_source_is_a_binary_error() {
    match from_reader(BrokenStream).unwrap_err() {
        Error::Binary { msg, offset, .. } => {
            assert!(msg.contains("device unplugged"));
            assert_eq!(offset, 0);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_hostile_nesting_fails_cleanly_on_a_small_stack() {
    // root { list "l" of lists of lists ... }, far deeper than the default limit
    let mut bytes = vec![0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'l'];
    for _ in 0..600 {
        bytes.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
    }

    let result = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || {
            let binary = from_bytes(&bytes);
            let text = nbt_codec::from_snbt(&"[".repeat(600));
            (binary, text)
        })
        .unwrap()
        .join()
        .unwrap();

    assert!(matches!(result.0, Err(Error::DepthLimit { .. })));
    assert!(matches!(result.1, Err(Error::DepthLimit { .. })));
}

#[test]
fn test_default_depth_is_accepted_on_a_small_stack() {
    let mut value = TagValue::List(ListTag::untyped());
    for _ in 0..(nbt_codec::options::DEFAULT_MAX_DEPTH - 2) {
        value = TagValue::List(ListTag::from_values(vec![value]).unwrap());
    }
    let mut root = CompoundTag::new();
    root.push(Tag::new("deep", value));
    let tag = Tag::new("", root);
    let bytes = to_bytes(&tag).unwrap();
    let text = nbt_codec::to_snbt(&tag);

    let (binary, parsed) = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || (from_bytes(&bytes), nbt_codec::from_snbt(&text)))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(binary.unwrap(), tag);
    assert_eq!(&parsed.unwrap(), tag.value());
}

#[test]
fn test_empty_input_is_truncated() {
    let err = from_bytes(&[]).unwrap_err();
    assert!(err.to_string().contains("unexpected end of stream"));
}

#[test]
fn test_truncated_gzip_stream_fails() {
    let bytes = to_bytes_with_compression(&every_kind(), Compression::Gzip).unwrap();
    assert!(from_bytes(&bytes[..bytes.len() / 2]).is_err());
}

#[test]
fn test_error_carries_context() {
    // root "r" { compound "c" { byte "b" <missing payload>
    let bytes = [
        0x0A, 0x00, 0x01, b'r', 0x0A, 0x00, 0x01, b'c', 0x01, 0x00, 0x01, b'b',
    ];
    match from_bytes(&bytes).unwrap_err() {
        Error::Binary {
            offset,
            depth,
            name,
            kind,
            ..
        } => {
            assert_eq!(offset, 12);
            assert_eq!(depth, 2);
            assert_eq!(name, "b");
            assert_eq!(kind, Some(TagKind::Byte));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_max_len_guards_allocation() {
    // a byte array claiming i32::MAX elements
    let bytes = [
        0x0A, 0x00, 0x00, 0x07, 0x00, 0x01, b'a', 0x7F, 0xFF, 0xFF, 0xFF,
    ];
    let err = from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("exceeds the limit"));

    let options = ReadOptions::new().with_max_len(usize::MAX);
    let err = from_bytes_with_options(&bytes, &options).unwrap_err();
    assert!(err.to_string().contains("unexpected end of stream"));
}

#[test]
fn test_depth_limit_on_deep_input() {
    let mut value = TagValue::Compound(CompoundTag::new());
    for _ in 0..20 {
        let mut parent = CompoundTag::new();
        parent.push(Tag::new("c", value));
        value = TagValue::Compound(parent);
    }
    let bytes = to_bytes(&Tag::new("", value)).unwrap();

    assert!(from_bytes(&bytes).is_ok());
    let options = ReadOptions::new().with_max_depth(10);
    assert!(matches!(
        from_bytes_with_options(&bytes, &options),
        Err(Error::DepthLimit { limit: 10 })
    ));
}

#[test]
fn test_writer_refuses_runaway_nesting() {
    let mut value = TagValue::List(ListTag::untyped());
    for _ in 0..600 {
        value = TagValue::List(ListTag::from_values(vec![value]).unwrap());
    }
    let mut root = CompoundTag::new();
    root.push(Tag::new("deep", value));
    assert!(matches!(
        to_bytes(&Tag::new("", root)),
        Err(Error::DepthLimit { .. })
    ));
}

/// Records whether it has been dropped.
struct TrackedStream<T> {
    inner: T,
    dropped: Rc<Cell<bool>>,
}

impl<T> Drop for TrackedStream<T> {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

impl<T: Read> Read for TrackedStream<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<T: Write> Write for TrackedStream<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[test]
fn test_streams_are_released_on_failure() {
    let dropped = Rc::new(Cell::new(false));
    let stream = TrackedStream {
        inner: Cursor::new(vec![0x0A, 0x00]),
        dropped: Rc::clone(&dropped),
    };
    assert!(from_reader(stream).is_err());
    assert!(dropped.get());

    let dropped = Rc::new(Cell::new(false));
    let sink = TrackedStream {
        inner: Vec::new(),
        dropped: Rc::clone(&dropped),
    };
    assert!(to_writer_with_compression(sink, &Tag::new("x", 1), Compression::Gzip).is_err());
    assert!(dropped.get());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.dat");
    let tag = every_kind();

    write_file(&path, &tag, Compression::Gzip).unwrap();
    let raw = std::fs::read(&path).unwrap();
    assert_eq!(Compression::detect(&raw), Compression::Gzip);
    assert_eq!(read_file(&path).unwrap(), tag);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_file(dir.path().join("missing.dat")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
