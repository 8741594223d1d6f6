// crates/geography-core/tests/snapshot.rs

use geography_core::{Airport, Catalog, Country, Frequency, GeoError, Region, Runway, RunwaySide};

fn sample() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.countries.upsert(Country {
        code: "CH".into(),
        name: "Switzerland".into(),
        continent: "EU".into(),
        wikipedia: None,
        regions: vec![Region {
            code: "CH-ZH".into(),
            name: "Zürich".into(),
            wikipedia: Some("https://en.wikipedia.org/wiki/Canton_of_Z%C3%BCrich".into()),
        }],
    });
    catalog.airports.upsert(Airport {
        code: "LSZH".into(),
        name: "Zürich Airport".into(),
        kind: "large_airport".into(),
        latitude: 47.464699,
        longitude: 8.54917,
        elevation: Some(1417),
        country_code: "CH".into(),
        region_code: "CH-ZH".into(),
        municipality: Some("Zurich".into()),
        iata: Some("ZRH".into()),
        website: None,
        wikipedia: None,
        runways: vec![Runway {
            length: 8202,
            width: 197,
            surface: "CON".into(),
            lighted: true,
            closed: false,
            low_end: RunwaySide {
                code: "10".into(),
                latitude: Some(47.4577),
                longitude: Some(8.5349),
                elevation: Some(1390),
                heading: Some(95),
                threshold: None,
            },
            high_end: None,
        }],
        frequencies: vec![Frequency {
            kind: "TWR".into(),
            description: None,
            mhz: 118.1,
        }],
    });
    catalog
}

#[test]
fn save_then_load_restores_every_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/dir/geography.bin");
    let catalog = sample();

    catalog.save(&path).unwrap();
    let loaded = Catalog::load(&path).unwrap();

    assert_eq!(loaded.stats(), catalog.stats());
    assert_eq!(loaded.airports.get("LSZH"), catalog.airports.get("LSZH"));
    assert_eq!(loaded.countries.get("CH"), catalog.countries.get("CH"));
    assert!(!dir.path().join("nested/dir/geography.bin.tmp").exists());
}

#[test]
fn save_overwrites_an_existing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geography.bin");

    Catalog::new().save(&path).unwrap();
    sample().save(&path).unwrap();

    assert_eq!(Catalog::load(&path).unwrap().stats().airports, 1);
}

#[test]
fn open_or_default_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::open_or_default(dir.path().join("absent.bin")).unwrap();
    assert_eq!(catalog.stats().countries, 0);
}

#[test]
fn load_reports_missing_and_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Catalog::load(dir.path().join("absent.bin")),
        Err(GeoError::NotFound(_))
    ));

    let junk = dir.path().join("junk.bin");
    std::fs::write(&junk, b"definitely not a snapshot").unwrap();
    assert!(Catalog::load(&junk).is_err());
}
