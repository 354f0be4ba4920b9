use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use zdf2dc::records::MappedRecord;
use zdf2dc::{Converter, DcBuilder, RdfBuilder, RecordBuilder, Variant};

const FILM_JSON: &str = include_str!("../tests/fixtures/film.json");

const MINIMAL_JSON: &str = r#"{"title": "Beispiel"}"#;

fn bench_build(c: &mut Criterion) {
    let doc: serde_json::Value = serde_json::from_str(FILM_JSON).unwrap();
    let dc = DcBuilder::default();
    let rdf = RdfBuilder::default();

    c.bench_function("build_dc", |b| {
        b.iter(|| {
            let _built = dc.build(black_box(&doc));
        });
    });

    c.bench_function("build_rdf", |b| {
        b.iter(|| {
            let _built = rdf.build(black_box(&doc));
        });
    });

    let record = dc.build(&doc).record;
    c.bench_function("render_dc", |b| {
        b.iter(|| {
            let _element = black_box(&record).to_element();
        });
    });
}

fn bench_convert(c: &mut Criterion) {
    let converter = Converter::new();

    c.bench_function("convert_minimal_dc", |b| {
        b.iter(|| {
            let _xml = converter.convert_str(black_box(MINIMAL_JSON), Variant::Dc).unwrap();
        });
    });

    for variant in [Variant::Dc, Variant::Rdf, Variant::Oai] {
        c.bench_function(&format!("convert_film_{}", variant), |b| {
            b.iter(|| {
                let _xml = converter.convert_str(black_box(FILM_JSON), variant).unwrap();
            });
        });
    }

    let reformatting = Converter::new().with_reformat(true);
    c.bench_function("convert_film_rdf_reformat", |b| {
        b.iter(|| {
            let _xml = reformatting
                .convert_str(black_box(FILM_JSON), Variant::Rdf)
                .unwrap();
        });
    });
}

fn bench_reformat(c: &mut Criterion) {
    let converter = Converter::new();
    let xml = converter.convert_str(FILM_JSON, Variant::Oai).unwrap();

    c.bench_function("reformat_oai", |b| {
        b.iter(|| {
            let _out = converter.reformat(black_box(&xml)).unwrap();
        });
    });

    // Many records in one envelope
    let docs: Vec<serde_json::Value> = (0..100)
        .map(|i| {
            let mut doc: serde_json::Value = serde_json::from_str(FILM_JSON).unwrap();
            doc["externalId"] = serde_json::Value::String(format!("SCMS_{}", i));
            doc
        })
        .collect();
    c.bench_function("oai_envelope_100", |b| {
        b.iter_batched(
            || docs.clone(),
            |docs| {
                let envelope = converter.oai_envelope(&docs);
                let _xml = converter.oai_xml(&envelope).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_build, bench_convert, bench_reformat);
criterion_main!(benches);
