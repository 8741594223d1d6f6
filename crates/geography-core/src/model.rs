// crates/geography-core/src/model.rs

//! # The Document Model
//!
//! Two top-level documents, each keyed by its natural code:
//!
//! **Structure:** `Country` -> `Vec<Region>` and `Airport` -> `Vec<Runway>` + `Vec<Frequency>`
//!
//! Sub-records are owned by exactly one parent and only change when the
//! parent's CSV source is re-imported. Optional physical attributes are
//! `Option`s: a missing elevation is `None`, never `0`.
//!
//! These types are serialized into the snapshot with bincode, which is not
//! self-describing: do not add `skip_serializing_if` here. JSON shaping
//! lives in [`crate::api`].

use serde::{Deserialize, Serialize};

/// A document stored in a [`Collection`](crate::store::Collection),
/// addressed by its natural business code.
pub trait Document {
    /// Lower-case noun used in log lines and "not found" messages.
    const KIND: &'static str;

    fn key(&self) -> &str;
}

/// A country, keyed by its two-letter ISO code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub continent: String,
    pub wikipedia: Option<String>,

    /// Regions owned by this country, at most one per region code.
    pub regions: Vec<Region>,
}

/// A first-level administrative subdivision. The code is the composite,
/// globally unique ISO 3166-2 code (e.g. `US-CA`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub wikipedia: Option<String>,
}

/// An airport, keyed by its ICAO code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    /// Source type tag, e.g. `large_airport`, `heliport`.
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<i32>,
    pub country_code: String,
    pub region_code: String,
    pub municipality: Option<String>,
    pub iata: Option<String>,
    pub website: Option<String>,
    pub wikipedia: Option<String>,

    /// At most one entry per low-end runway code.
    pub runways: Vec<Runway>,
    /// At most one entry per frequency type.
    pub frequencies: Vec<Frequency>,
}

/// A physical runway with one or two usable ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    pub length: i32,
    pub width: i32,
    pub surface: String,
    pub lighted: bool,
    pub closed: bool,
    pub low_end: RunwaySide,
    /// Absent for single-direction runways and heliports.
    pub high_end: Option<RunwaySide>,
}

/// One end (threshold) of a runway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunwaySide {
    pub code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<i32>,
    pub heading: Option<i32>,
    pub threshold: Option<i32>,
}

/// A radio frequency published for an airport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    /// Type tag (`TWR`, `ATIS`, ...). Unique within one airport.
    pub kind: String,
    pub description: Option<String>,
    pub mhz: f64,
}

impl Document for Country {
    const KIND: &'static str = "country";

    fn key(&self) -> &str {
        &self.code
    }
}

impl Document for Airport {
    const KIND: &'static str = "airport";

    fn key(&self) -> &str {
        &self.code
    }
}

impl Country {
    pub fn find_region(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }
}

impl Airport {
    /// Flattens every runway into one view per usable end.
    pub fn runway_views(&self) -> impl Iterator<Item = RunwayView<'_>> {
        self.runways.iter().flat_map(move |r| RunwayView::both(self, r))
    }

    /// Frequency by type tag, ignoring ASCII case.
    pub fn find_frequency(&self, kind: &str) -> Option<&Frequency> {
        self.frequencies
            .iter()
            .find(|f| f.kind.eq_ignore_ascii_case(kind))
    }
}

impl Runway {
    /// Code of the end opposite `side`, if the runway has one.
    fn opposite(&self, side: &RunwaySide) -> Option<&RunwaySide> {
        match &self.high_end {
            Some(high) if std::ptr::eq(side, &self.low_end) => Some(high),
            Some(_) => Some(&self.low_end),
            None => None,
        }
    }
}

// -----------------------------------------------------------------------------
// COMPUTED JOINS
// -----------------------------------------------------------------------------
// Borrowed views pairing a sub-record with its owner. Built at query time and
// never stored, so they cannot drift from the owning document.

/// A region together with the country that owns it.
#[derive(Clone, Copy, Debug)]
pub struct RegionView<'a> {
    pub country: &'a Country,
    pub region: &'a Region,
}

/// One runway end, seen from that end.
#[derive(Clone, Copy, Debug)]
pub struct RunwayView<'a> {
    pub airport: &'a Airport,
    pub runway: &'a Runway,
    pub side: &'a RunwaySide,
}

impl<'a> RunwayView<'a> {
    fn both(airport: &'a Airport, runway: &'a Runway) -> impl Iterator<Item = RunwayView<'a>> {
        std::iter::once(&runway.low_end)
            .chain(runway.high_end.as_ref())
            .map(move |side| RunwayView {
                airport,
                runway,
                side,
            })
    }

    pub fn code(&self) -> &'a str {
        &self.side.code
    }

    /// The code of the opposite end (`27` when seen from `09`).
    pub fn alternate_code(&self) -> Option<&'a str> {
        self.runway.opposite(self.side).map(|s| s.code.as_str())
    }
}

/// A frequency together with the airport that publishes it.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyView<'a> {
    pub airport: &'a Airport,
    pub frequency: &'a Frequency,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn runway_views_cover_each_usable_end() {
        let mut eham = airport("EHAM", "NL", "NL-NH");
        eham.runways.push(runway("09", Some("27"), 11_329));
        eham.runways.push(runway("H1", None, 60));

        let views: Vec<_> = eham.runway_views().collect();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].code(), "09");
        assert_eq!(views[0].alternate_code(), Some("27"));
        assert_eq!(views[1].code(), "27");
        assert_eq!(views[1].alternate_code(), Some("09"));
        assert_eq!(views[2].code(), "H1");
        assert_eq!(views[2].alternate_code(), None);
    }

    #[test]
    fn find_region_matches_exact_code() {
        let nl = country("NL", "Netherlands", &["NL-NH", "NL-ZH"]);
        assert!(nl.find_region("NL-ZH").is_some());
        assert!(nl.find_region("ZH").is_none());
    }
}
