//! Benchmarks for the import/dedup/export pipeline.
//!
//! Run with: cargo bench

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};

use epwing_json::export::{Exporter, JsonConfig, JsonExporter};
use epwing_json::io::MemorySource;
use epwing_json::source::{Catalog, PAGE_SIZE, PagedSource};
use epwing_json::transform::dedup_subbook;
use epwing_json::{Book, Entry, Importer, Position, PositionedText, Subbook};

const ENTRIES: u32 = 20_000;
const ENTRIES_PER_PAGE: u32 = 16;

/// A subbook where every entry appears under two search modes.
fn duplicated_subbook() -> Subbook {
    let mut subbook = Subbook::new();
    for _ in 0..2 {
        for i in 0..ENTRIES {
            let position = Position::new(1 + i / ENTRIES_PER_PAGE, (i % ENTRIES_PER_PAGE) * 128);
            subbook
                .push(Entry::new(
                    PositionedText::new(Some(format!("headword {i}")), position),
                    PositionedText::new(Some(format!("definition of headword {i}")), position),
                ))
                .unwrap();
        }
    }
    subbook
}

/// A volume whose text image holds one short entry every 128 bytes.
fn paged_volume() -> (String, Vec<u8>) {
    let pages = ENTRIES.div_ceil(ENTRIES_PER_PAGE) as usize;
    let mut data = vec![0u8; pages * PAGE_SIZE as usize];
    let mut hits: Vec<Value> = Vec::new();
    for i in 0..ENTRIES {
        let start = i as usize * 128;
        let text = format!("entry {i}");
        data[start..start + text.len()].copy_from_slice(text.as_bytes());
        let position = json!({
            "page": 1 + i / ENTRIES_PER_PAGE,
            "offset": (i % ENTRIES_PER_PAGE) * 128
        });
        hits.push(json!({"heading": position, "text": position}));
    }

    let catalog = json!({
        "charCode": "jisx0208",
        "discCode": "epwing",
        "subbooks": [{"code": 0, "hits": {"alphabetic": hits.clone(), "kana": hits}}]
    });
    (catalog.to_string(), data)
}

fn bench_dedup(c: &mut Criterion) {
    let subbook = duplicated_subbook();
    c.bench_function("dedup_subbook", |b| {
        b.iter_batched(
            || subbook.clone(),
            |mut subbook| dedup_subbook(&mut subbook),
            BatchSize::LargeInput,
        );
    });
}

fn bench_import(c: &mut Criterion) {
    let (catalog, data) = paged_volume();
    let catalog = Catalog::from_json(&catalog).unwrap();
    c.bench_function("import_paged", |b| {
        b.iter_batched(
            || PagedSource::new(catalog.clone(), MemorySource::new(data.clone())),
            |source| Importer::new().import(source).unwrap(),
            BatchSize::LargeInput,
        );
    });
}

fn bench_export(c: &mut Criterion) {
    let mut subbook = duplicated_subbook();
    dedup_subbook(&mut subbook);
    let mut book = Book::default();
    book.push_subbook(subbook);

    for (name, config) in [
        ("export_compact", JsonConfig::default()),
        (
            "export_pretty_positions",
            JsonConfig::default().with_pretty_print(true).with_positions(true),
        ),
    ] {
        let exporter = JsonExporter::with_config(config);
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut out = Vec::new();
                exporter.export(&book, &mut out).unwrap();
                out
            });
        });
    }
}

criterion_group!(benches, bench_dedup, bench_import, bench_export);
criterion_main!(benches);
