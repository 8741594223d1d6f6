//! Basic usage example for geography-core
//!
//! This example demonstrates how to:
//! - Import countries, regions and airports from CSV
//! - Look up records by code
//! - List records in a code range
//! - Walk the runway ends of an airport

use geography_core::{AirportFilter, Catalog, CsvSource, Importer, Result, RunwayFilter};
use std::io::Cursor;

const COUNTRIES: &str = "\
id,code,name,continent,wikipedia_link
302672,NL,Netherlands,EU,https://en.wikipedia.org/wiki/Netherlands
302618,BE,Belgium,EU,https://en.wikipedia.org/wiki/Belgium
";

const REGIONS: &str = "\
id,code,local_code,name,continent,iso_country,wikipedia_link
306160,NL-NH,NH,North Holland,EU,NL,
306161,NL-ZH,ZH,South Holland,EU,NL,
303209,BE-VBR,VBR,Vlaams-Brabant,EU,BE,
";

const AIRPORTS: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata_code,local_code,home_link,wikipedia_link
2513,EHAM,large_airport,Amsterdam Airport Schiphol,52.308601,4.76389,-11,EU,NL,NL-NH,Amsterdam,yes,EHAM,AMS,,,
2522,EHRD,medium_airport,Rotterdam The Hague Airport,51.956902,4.43722,-15,EU,NL,NL-ZH,Rotterdam,yes,EHRD,RTM,,,
2184,EBBR,large_airport,Brussels Airport,50.901402,4.48444,184,EU,BE,BE-VBR,Brussels,yes,EBBR,BRU,,,
";

const RUNWAYS: &str = "\
id,airport_ref,airport_ident,length_ft,width_ft,surface,lighted,closed,le_ident,le_latitude_deg,le_longitude_deg,le_elevation_ft,le_heading_degT,le_displaced_threshold_ft,he_ident,he_latitude_deg,he_longitude_deg,he_elevation_ft,he_heading_degT,he_displaced_threshold_ft
1,2513,EHAM,11329,148,ASP,1,0,09,52.3166,4.7466,-12,87,,27,52.3185,4.7966,-11,267,
2,2513,EHAM,10827,148,ASP,1,0,18C,52.3314,4.7400,-12,183,,36C,52.3008,4.7371,-13,3,
";

fn csv(name: &str, body: &str) -> Result<CsvSource<Cursor<Vec<u8>>>> {
    CsvSource::open(name, Cursor::new(body.as_bytes().to_vec()))
}

fn main() -> Result<()> {
    println!("=== geography-core Basic Usage Example ===\n");

    // Import
    println!("Importing CSV sources...");
    let mut catalog = Catalog::new();
    let mut importer = Importer::new(&mut catalog);
    for report in [
        importer.import_countries(csv("countries", COUNTRIES)?)?,
        importer.import_regions(csv("regions", REGIONS)?)?,
        importer.import_airports(csv("airports", AIRPORTS)?)?,
        importer.import_runways(csv("runways", RUNWAYS)?)?,
    ] {
        println!("  {report}");
    }
    println!();

    // Example 1: Lookup by code
    println!("--- Example 1: Find country by ISO code ---");
    let nl = catalog.country("nl")?;
    println!("Found: {} ({}), {} regions", nl.name, nl.code, nl.regions.len());
    println!();

    // Example 2: Range listing
    println!("--- Example 2: Regions of NL ---");
    for view in catalog.regions("NL", "", "")? {
        println!("- {} {}", view.region.code, view.region.name);
    }
    println!();

    // Example 3: Combined airport filters
    println!("--- Example 3: Airports with IATA codes from A to M ---");
    let filter = AirportFilter {
        from_iata: "A".into(),
        until_iata: "M".into(),
        ..Default::default()
    };
    for airport in catalog.airports(&filter)? {
        println!(
            "- {} / {} {}",
            airport.code,
            airport.iata.as_deref().unwrap_or("-"),
            airport.name
        );
    }
    println!();

    // Example 4: Runway ends
    println!("--- Example 4: Runway ends at EHAM ---");
    for end in catalog.runways("EHAM", &RunwayFilter::default())? {
        println!(
            "- {} (opposite {}), heading {:?}",
            end.code(),
            end.alternate_code().unwrap_or("-"),
            end.side.heading
        );
    }
    println!();

    // Example 5: Accent-insensitive search
    println!("--- Example 5: Search 'rotterdam' ---");
    let hits = catalog.search("rotterdam")?;
    for airport in hits.airports {
        println!("- {} {}", airport.code, airport.name);
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
