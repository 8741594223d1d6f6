// crates/geography-core/src/import/runways.rs

//! `runways.csv`: col3 airport, col4 length, col5 width, col6 surface,
//! col7 lighted, col8 closed, col9..14 low end, col15..20 high end.
//!
//! Each end is `code, latitude, longitude, elevation, heading, threshold`.
//! The high end is dropped when blank or equal to the low end (heliports and
//! single-direction strips). Runways are keyed by low-end code within their
//! airport.

use super::{upsert_nested, Row, RowFault, RowResult};
use crate::model::{Runway, RunwaySide};
use crate::store::{Catalog, Upsert};
use crate::validate;

/// Column names of one runway end, in CSV order.
struct SideColumns {
    code: &'static str,
    latitude: &'static str,
    longitude: &'static str,
    elevation: &'static str,
    heading: &'static str,
    threshold: &'static str,
}

const LOW_END: SideColumns = SideColumns {
    code: "Lowend.Code",
    latitude: "Lowend.Latitude",
    longitude: "Lowend.Longitude",
    elevation: "Lowend.Elevation",
    heading: "Lowend.Heading",
    threshold: "Lowend.Threshold",
};

const HIGH_END: SideColumns = SideColumns {
    code: "Highend.Code",
    latitude: "Highend.Latitude",
    longitude: "Highend.Longitude",
    elevation: "Highend.Elevation",
    heading: "Highend.Heading",
    threshold: "Highend.Threshold",
};

/// Reads the six columns starting at `first`. `None` if the code is blank.
fn side(row: &Row<'_>, first: usize, names: &SideColumns) -> RowResult<Option<RunwaySide>> {
    let raw_code = row.col(first, names.code)?;
    if raw_code.trim().is_empty() {
        return Ok(None);
    }
    let code = row.validate(first, names.code, |s| validate::runway_code(s, false, false))?;

    Ok(Some(RunwaySide {
        code,
        latitude: row.validate(first + 1, names.latitude, |s| {
            validate::optional(s, validate::latitude)
        })?,
        longitude: row.validate(first + 2, names.longitude, |s| {
            validate::optional(s, validate::longitude)
        })?,
        elevation: row.validate(first + 3, names.elevation, |s| {
            validate::optional(s, validate::elevation)
        })?,
        heading: row.validate(first + 4, names.heading, |s| {
            validate::optional(s, validate::runway_heading)
        })?,
        threshold: row.validate(first + 5, names.threshold, |s| {
            validate::optional(s, validate::runway_threshold)
        })?,
    }))
}

pub(super) fn import_row(catalog: &mut Catalog, row: &Row<'_>) -> RowResult<Upsert> {
    let airport_code =
        row.validate(3, "AirportCode", |s| validate::icao_airport_code(s, false, false))?;
    if catalog.airports.get(&airport_code).is_none() {
        return Err(row.unresolved("AirportCode", &airport_code, "airport"));
    }

    let length = row.validate(4, "Length", |s| validate::runway_length(s, false))?;
    let width = row.validate(5, "Width", |s| validate::runway_width(s, true))?;
    let surface = row.col(6, "Surface")?.trim().to_owned();
    let lighted = row.validate(7, "Lighted", |s| validate::runway_lighted(s, true))?;
    let closed = row.validate(8, "Closed", |s| validate::runway_closed(s, true))?;

    let low_end = side(row, 9, &LOW_END)?
        .ok_or_else(|| row.fail(LOW_END.code, "", RowFault::Missing))?;
    let high_end = side(row, 15, &HIGH_END)?.filter(|high| high.code != low_end.code);

    let runway = Runway {
        length,
        width,
        surface,
        lighted,
        closed,
        low_end,
        high_end,
    };

    catalog
        .airports
        .update(&airport_code, |a| {
            upsert_nested(&mut a.runways, runway, |r| r.low_end.code.as_str())
        })
        .ok_or_else(|| row.unresolved("AirportCode", &airport_code, "airport"))
}

#[cfg(test)]
mod tests {
    use super::super::testing::source;
    use super::super::{ImportReport, Importer, RowFault};
    use crate::model::fixtures::airport;
    use crate::store::Catalog;

    const EHAM_09_27: &str = "1,2513,EHAM,11329,148,ASP,1,0,09,52.3166,4.7466,-12,87,,27,52.3185,4.7966,-11,267,\n";

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.airports.upsert(airport("EHAM", "NL", "NL-NH"));
        catalog
    }

    fn import(catalog: &mut Catalog, body: &str) -> ImportReport {
        Importer::new(catalog).import_runways(source(body)).unwrap()
    }

    #[test]
    fn imports_both_ends() {
        let mut catalog = catalog();
        let report = import(&mut catalog, EHAM_09_27);
        assert!(report.is_clean(), "{:?}", report.errors);

        let eham = catalog.airports.get("EHAM").unwrap();
        let rwy = &eham.runways[0];
        assert_eq!(rwy.length, 11_329);
        assert_eq!(rwy.width, 148);
        assert!(rwy.lighted);
        assert!(!rwy.closed);
        assert_eq!(rwy.low_end.code, "09");
        assert_eq!(rwy.low_end.heading, Some(87));
        assert_eq!(rwy.low_end.threshold, None);
        assert_eq!(rwy.high_end.as_ref().unwrap().code, "27");
    }

    #[test]
    fn reimporting_the_same_row_keeps_one_entry() {
        let mut catalog = catalog();
        import(&mut catalog, EHAM_09_27);
        let report = import(&mut catalog, EHAM_09_27);

        assert_eq!(report.replaced, 1);
        assert_eq!(catalog.airports.get("EHAM").unwrap().runways.len(), 1);
    }

    #[test]
    fn replacing_a_middle_runway_does_not_append() {
        let mut catalog = catalog();
        import(
            &mut catalog,
            "1,2513,EHAM,11329,148,ASP,1,0,09,,,,,,27,,,,,\n\
             2,2513,EHAM,10827,148,ASP,1,0,18C,,,,,,36C,,,,,\n\
             3,2513,EHAM,6608,148,ASP,1,0,04,,,,,,22,,,,,\n",
        );
        import(&mut catalog, "4,2513,EHAM,10800,148,ASP,1,1,18C,,,,,,36C,,,,,\n");

        let runways = &catalog.airports.get("EHAM").unwrap().runways;
        assert_eq!(runways.len(), 3);
        assert_eq!(runways[1].length, 10_800);
        assert!(runways[1].closed);
    }

    #[test]
    fn identical_high_end_is_dropped() {
        let mut catalog = catalog();
        import(&mut catalog, "1,2513,EHAM,60,60,CON,0,0,H1,,,,,,H1,,,,,\n");
        let rwy = &catalog.airports.get("EHAM").unwrap().runways[0];
        assert_eq!(rwy.low_end.code, "H1");
        assert!(rwy.high_end.is_none());
    }

    #[test]
    fn missing_low_end_is_a_row_error() {
        let mut catalog = catalog();
        let report = import(&mut catalog, "1,2513,EHAM,3000,45,ASP,0,0,,,,,,,27,,,,,\n");
        assert_eq!(report.errors[0].reason, RowFault::Missing);
        assert_eq!(report.errors[0].column, "Lowend.Code");
    }

    #[test]
    fn zero_length_is_rejected() {
        let mut catalog = catalog();
        let report = import(&mut catalog, "1,2513,EHAM,0,45,ASP,0,0,09,,,,,,27,,,,,\n");
        assert_eq!(
            report.errors[0].to_string(),
            "Runway[2].Length(0): Invalid Runway Length"
        );
    }

    #[test]
    fn unknown_airport_is_unresolved() {
        let mut catalog = catalog();
        let report = import(&mut catalog, "1,1,EHXX,3000,45,ASP,0,0,09,,,,,,27,,,,,\n");
        assert_eq!(report.errors[0].reason, RowFault::Unresolved { what: "airport" });
    }
}
