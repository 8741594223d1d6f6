// crates/geography-core/src/import/frequencies.rs

//! `airport-frequencies.csv`: col3 airport, col4 type, col5 description,
//! col6 MHz. Keyed by type within the airport.
//!
//! The type is a free-text tag: stored trimmed as written, matched ignoring
//! ASCII case.

use super::{upsert_nested_by, Row, RowResult};
use crate::model::Frequency;
use crate::store::{Catalog, Upsert};
use crate::validate;

pub(super) fn import_row(catalog: &mut Catalog, row: &Row<'_>) -> RowResult<Upsert> {
    let airport_code =
        row.validate(3, "AirportCode", |s| validate::icao_airport_code(s, false, false))?;
    if catalog.airports.get(&airport_code).is_none() {
        return Err(row.unresolved("AirportCode", &airport_code, "airport"));
    }

    let frequency = Frequency {
        kind: row.required_text(4, "Type")?,
        description: row.text(5, "Description")?,
        mhz: row.validate(6, "Frequency", |s| validate::frequency(s, false))?,
    };

    catalog
        .airports
        .update(&airport_code, |a| {
            upsert_nested_by(&mut a.frequencies, frequency, |x, y| {
                x.kind.eq_ignore_ascii_case(&y.kind)
            })
        })
        .ok_or_else(|| row.unresolved("AirportCode", &airport_code, "airport"))
}

#[cfg(test)]
mod tests {
    use super::super::testing::source;
    use super::super::{Importer, RowFault};
    use crate::model::fixtures::airport;
    use crate::store::Catalog;
    use crate::validate::FieldKind;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.airports.upsert(airport("EHAM", "NL", "NL-NH"));
        catalog
    }

    #[test]
    fn same_type_replaces_in_place() {
        let mut catalog = catalog();
        Importer::new(&mut catalog)
            .import_frequencies(source(
                "1,2513,EHAM,TWR,Schiphol Tower,118.1\n2,2513,EHAM,ATIS,Schiphol Arrival ATIS,132.975\n",
            ))
            .unwrap();
        let report = Importer::new(&mut catalog)
            .import_frequencies(source("3,2513,EHAM,twr,Tower West,119.225\n"))
            .unwrap();

        assert_eq!(report.replaced, 1);
        let eham = catalog.airports.get("EHAM").unwrap();
        assert_eq!(eham.frequencies.len(), 2);
        let twr = eham.find_frequency("TWR").unwrap();
        assert_eq!(twr.kind, "twr");
        assert_eq!(twr.description.as_deref(), Some("Tower West"));
        assert_eq!(twr.mhz, 119.225);
    }

    #[test]
    fn type_is_stored_as_written() {
        let mut catalog = catalog();
        Importer::new(&mut catalog)
            .import_frequencies(source("1,2513,EHAM, A/D ,Schiphol Apron,121.65\n"))
            .unwrap();

        let eham = catalog.airports.get("EHAM").unwrap();
        assert_eq!(eham.frequencies[0].kind, "A/D");
        assert!(eham.find_frequency("a/d").is_some());
    }

    #[test]
    fn out_of_band_frequency_is_rejected() {
        let mut catalog = catalog();
        let report = Importer::new(&mut catalog)
            .import_frequencies(source("1,2513,EHAM,TWR,Tower,117.9\n"))
            .unwrap();

        assert!(matches!(
            &report.errors[0].reason,
            RowFault::Validation(e) if e.kind == FieldKind::Frequency
        ));
        assert!(catalog.airports.get("EHAM").unwrap().frequencies.is_empty());
    }
}
