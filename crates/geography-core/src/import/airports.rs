// crates/geography-core/src/import/airports.rs

//! `airports.csv`
//!
//! | col | field | policy |
//! |---|---|---|
//! | 2 | ICAO code | required; rows with non-ICAO idents fail |
//! | 3 | type | required |
//! | 4 | name | required |
//! | 5, 6 | latitude, longitude | required |
//! | 7 | elevation | optional |
//! | 9 | country code | must resolve |
//! | 10 | region key `CC-RR` | exactly two parts, `CC` is the airport's country, must resolve |
//! | 11 | municipality | optional |
//! | 14 | IATA code | optional |
//! | 16, 17 | website, reference URL | optional |

use super::{Row, RowFault, RowResult};
use crate::model::Airport;
use crate::store::{Catalog, Upsert};
use crate::validate;

pub(super) fn import_row(catalog: &mut Catalog, row: &Row<'_>) -> RowResult<Upsert> {
    let code = row.validate(2, "ICAO-Airport", |s| validate::icao_airport_code(s, false, false))?;
    let iata = row.validate(14, "IATA-Airport", |s| validate::iata_airport_code(s, false, true))?;

    let country_code =
        row.validate(9, "Country", |s| validate::iso_country_code(s, false, false))?;
    let country = catalog
        .countries
        .get(&country_code)
        .ok_or_else(|| row.unresolved("Country", &country_code, "country"))?;

    let raw_region = row.col(10, "Region")?;
    let region_key = validate::iso_region_code(raw_region, false, false)
        .map_err(|e| row.fail("Region", raw_region, RowFault::Validation(e)))?;
    match region_key.split('-').collect::<Vec<_>>().as_slice() {
        [prefix, _] if *prefix == country.code => {}
        [_, _] => {
            return Err(row.fail(
                "Region",
                raw_region,
                RowFault::Malformed(format!("region key is not in country {}", country.code)),
            ))
        }
        _ => {
            return Err(row.fail(
                "Region",
                raw_region,
                RowFault::Malformed("Bad region key".to_owned()),
            ))
        }
    }
    let region_code = country
        .find_region(&region_key)
        .map(|r| r.code.clone())
        .ok_or_else(|| row.unresolved("Region", raw_region, "region"))?;

    let mut airport = Airport {
        code,
        kind: row.required_text(3, "Type")?,
        name: row.required_text(4, "Name")?,
        latitude: row.validate(5, "Latitude", |s| validate::latitude(s, false))?,
        longitude: row.validate(6, "Longitude", |s| validate::longitude(s, false))?,
        elevation: row.validate(7, "Elevation", |s| validate::optional(s, validate::elevation))?,
        country_code,
        region_code,
        municipality: row.text(11, "Municipality")?,
        iata: (!iata.is_empty()).then_some(iata),
        website: row.text(16, "Website")?,
        wikipedia: row.text(17, "Wikipedia")?,
        runways: Vec::new(),
        frequencies: Vec::new(),
    };

    // Runways and frequencies are owned by their own sources.
    if let Some((runways, frequencies)) = catalog.airports.update(&airport.code, |a| {
        (
            std::mem::take(&mut a.runways),
            std::mem::take(&mut a.frequencies),
        )
    }) {
        airport.runways = runways;
        airport.frequencies = frequencies;
    }

    Ok(catalog.airports.upsert(airport))
}
