//! Error handling example for geography-core
//!
//! This example demonstrates how bad rows and bad requests are reported:
//! - Row errors are collected in the import report, the pass keeps going
//! - Lookups distinguish "invalid", "not found" and "too many results"

use geography_core::{AirportFilter, Catalog, CsvSource, GeoError, Importer, Result};
use std::io::Cursor;

const COUNTRIES: &str = "\
id,code,name,continent,wikipedia_link
302672,NL,Netherlands,EU,
1,NLD,Not A Code,EU,
";

const REGIONS: &str = "\
id,code,local_code,name,continent,iso_country,wikipedia_link
306160,NL-NH,NH,North Holland,EU,NL,
999999,XX-01,01,Nowhere,EU,XX,
";

const AIRPORTS: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata_code,local_code,home_link,wikipedia_link
2513,EHAM,large_airport,Amsterdam Airport Schiphol,52.308601,4.76389,-11,EU,NL,NL-NH,Amsterdam,yes,EHAM,AMS,,,
2516,EHHO,small_airport,Hoogeveen Airfield,52.7308,6.51611,40,EU,NL,NL-NH,Hoogeveen,no,EHHO,,,,
3,EHXX,small_airport,Bad Latitude,95,4.1,,EU,NL,NL-NH,,no,,,,,
4,EHYY,small_airport,Wrong Region,52.1,4.1,,EU,NL,BE-VBR,,no,,,,,
";

fn csv(name: &str, body: &str) -> Result<CsvSource<Cursor<Vec<u8>>>> {
    CsvSource::open(name, Cursor::new(body.as_bytes().to_vec()))
}

fn explain(result: Result<impl std::fmt::Debug>) {
    match result {
        Ok(value) => println!("  ok: {value:?}"),
        Err(GeoError::Validation(e)) => println!("  invalid input: {e} ({:?})", e.input),
        Err(GeoError::NotFound(what)) => println!("  not found: {what}"),
        Err(e @ GeoError::TooManyResults { .. }) => println!("  {e}"),
        Err(e) => println!("  other error: {e}"),
    }
}

fn main() -> Result<()> {
    println!("=== geography-core Error Handling Example ===\n");

    // Example 1: Row errors do not abort a pass
    println!("--- Example 1: Import with bad rows ---");
    let mut catalog = Catalog::new().with_max_results(1);
    let mut importer = Importer::new(&mut catalog);
    for report in [
        importer.import_countries(csv("countries", COUNTRIES)?)?,
        importer.import_regions(csv("regions", REGIONS)?)?,
        importer.import_airports(csv("airports", AIRPORTS)?)?,
    ] {
        println!("{report}");
        for error in &report.errors {
            println!("  {error}");
        }
    }
    println!();

    // Example 2: A source that cannot be read is fatal
    println!("--- Example 2: Unreadable source ---");
    match CsvSource::from_path("does/not/exist.csv") {
        Ok(_) => println!("  unexpectedly opened"),
        Err(e) => println!("  {e}"),
    }
    println!();

    // Example 3: Request errors
    println!("--- Example 3: Lookups ---");
    explain(catalog.country("NLD").map(|c| c.name.clone()));
    explain(catalog.country("DE").map(|c| c.name.clone()));
    explain(catalog.airport("eham").map(|a| a.name.clone()));
    explain(
        catalog
            .airports(&AirportFilter {
                country: "NL".into(),
                ..Default::default()
            })
            .map(|v| v.len()),
    );

    println!("\n=== Example completed successfully ===");
    Ok(())
}
