// crates/geography-core/benches/benchmarks.rs

use criterion::{criterion_group, criterion_main, Criterion};
use geography_core::{validate, AirportFilter, Catalog, CsvSource, Importer};
use std::fmt::Write;
use std::hint::black_box;
use std::io::Cursor;

fn bench_validators(c: &mut Criterion) {
    c.bench_function("icao_airport_code", |b| {
        b.iter(|| validate::icao_airport_code(black_box(" eham "), false, false))
    });
    c.bench_function("latitude", |b| b.iter(|| validate::latitude(black_box("52.308601"), false)));
    c.bench_function("runway_heading_optional", |b| {
        b.iter(|| validate::optional(black_box(""), validate::runway_heading))
    });
}

/// One country, one region and `n` airports named `E000`.. in CSV form.
fn airport_csvs(n: usize) -> (String, String, String) {
    let countries = "id,code,name,continent\n1,NL,Netherlands,EU,\n".to_owned();
    let regions = "id,code,local,name,continent,country,wiki\n1,NL-NH,NH,North Holland,EU,NL,\n"
        .to_owned();
    let mut airports = "header\n".to_owned();
    for i in 0..n {
        let _ = writeln!(
            airports,
            "{i},E{i:03},small_airport,Field {i},52.1,4.1,3,EU,NL,NL-NH,,no,,,,,,"
        );
    }
    (countries, regions, airports)
}

fn load(n: usize) -> Catalog {
    let (countries, regions, airports) = airport_csvs(n);
    let mut catalog = Catalog::new();
    let mut importer = Importer::new(&mut catalog);
    let open = |s: String| CsvSource::open("bench", Cursor::new(s.into_bytes())).unwrap();
    importer.import_countries(open(countries)).unwrap();
    importer.import_regions(open(regions)).unwrap();
    importer.import_airports(open(airports)).unwrap();
    catalog
}

fn bench_import(c: &mut Criterion) {
    c.bench_function("import_1000_airports", |b| b.iter(|| load(black_box(1000))));
}

fn bench_queries(c: &mut Criterion) {
    let catalog = load(1000);
    let filter = AirportFilter {
        from: "E100".into(),
        until: "E199".into(),
        ..Default::default()
    };
    c.bench_function("airports_range_100", |b| {
        b.iter(|| catalog.airports(black_box(&filter)).map(|v| v.len()))
    });
    c.bench_function("search_folded", |b| {
        b.iter(|| catalog.search(black_box("field 99")).map(|h| h.airports.len()))
    });
}

criterion_group!(benches, bench_validators, bench_import, bench_queries);
criterion_main!(benches);
