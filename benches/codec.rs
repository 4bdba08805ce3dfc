use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nbt_codec::{
    from_bytes, from_snbt, to_bytes, to_bytes_with_compression, to_snbt, CompoundTag,
    Compression, ListTag, Tag, TagKind, TagValue,
};

fn chunk(sections: usize) -> Tag {
    let mut list = ListTag::new(TagKind::Compound).unwrap();
    for y in 0..sections {
        let mut section = CompoundTag::new();
        section.push(Tag::new("Y", TagValue::Byte(y as i8)));
        section.push(Tag::new("BlockStates", TagValue::LongArray(vec![y as i64; 256])));
        section.push(Tag::new("SkyLight", TagValue::ByteArray(vec![-1; 2048])));
        section.push(Tag::new("palette", format!("minecraft:block_{}", y)));
        list.push(TagValue::Compound(section)).unwrap();
    }

    let mut level = CompoundTag::new();
    level.push(Tag::new("xPos", 12));
    level.push(Tag::new("zPos", -4));
    level.push(Tag::new("LastUpdate", TagValue::Long(1_234_567)));
    level.push(Tag::new("Sections", list));
    let mut root = CompoundTag::new();
    root.push(Tag::new("Level", level));
    Tag::new("", root)
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_binary");

    for sections in [1, 4, 16].iter() {
        let tag = chunk(*sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &tag, |b, tag| {
            b.iter(|| to_bytes(black_box(tag)))
        });
    }
    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_binary");

    for sections in [1, 4, 16].iter() {
        let bytes = to_bytes(&chunk(*sections)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(sections), &bytes, |b, bytes| {
            b.iter(|| from_bytes(black_box(bytes)))
        });
    }
    group.finish();
}

fn benchmark_gzip(c: &mut Criterion) {
    let tag = chunk(4);
    let bytes = to_bytes_with_compression(&tag, Compression::Gzip).unwrap();

    c.bench_function("encode_gzip", |b| {
        b.iter(|| to_bytes_with_compression(black_box(&tag), Compression::Gzip))
    });
    c.bench_function("decode_gzip", |b| b.iter(|| from_bytes(black_box(&bytes))));
}

fn benchmark_text(c: &mut Criterion) {
    let value = chunk(2).into_value();
    let text = to_snbt(&value);

    c.bench_function("serialize_snbt", |b| b.iter(|| to_snbt(black_box(&value))));
    c.bench_function("parse_snbt", |b| b.iter(|| from_snbt(black_box(&text))));
}

criterion_group!(
    benches,
    benchmark_encode,
    benchmark_decode,
    benchmark_gzip,
    benchmark_text
);
criterion_main!(benches);
