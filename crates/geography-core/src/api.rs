// crates/geography-core/src/api.rs

//! JSON views for REST and CLI output.
//!
//! Field names follow the established REST wire format
//! (`iso-country-code`, `icao-airport-code`, `frequency-mhz`, ...). Absent
//! optionals are omitted instead of being rendered as `null` or `0`.

use crate::model::{self, Airport, Country, Frequency, Region, Runway, RunwaySide};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CountryView {
    pub iso_country_code: String,
    pub country_name: String,
    pub continent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<RegionEntry>,
}

/// A region as embedded in its country.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegionEntry {
    pub iso_region_code: String,
    pub region_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
}

/// A region flattened with its owning country code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegionView {
    pub iso_country_code: String,
    pub iso_region_code: String,
    pub region_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AirportView {
    pub icao_airport_code: String,
    pub airport_name: String,
    pub airport_type: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,
    pub iso_country_code: String,
    pub iso_region_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iata_airport_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runways: Vec<RunwayEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frequencies: Vec<FrequencyEntry>,
}

/// A runway as embedded in its airport.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunwayEntry {
    pub length: i32,
    pub width: i32,
    pub surface: String,
    pub lighted: bool,
    pub closed: bool,
    pub low_end: RunwaySideEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_end: Option<RunwaySideEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunwaySideEntry {
    pub runway_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i32>,
}

/// One runway end, flattened with its airport and the opposite end's code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunwayView {
    pub icao_airport_code: String,
    pub runway_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_runway_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i32>,
    pub length: i32,
    pub width: i32,
    pub surface: String,
    pub lighted: bool,
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FrequencyEntry {
    pub frequency_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency_mhz: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FrequencyView {
    pub icao_airport_code: String,
    pub frequency_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency_mhz: f64,
}

// -----------------------------------------------------------------------------
// CONVERSIONS
// -----------------------------------------------------------------------------

impl From<&Country> for CountryView {
    fn from(c: &Country) -> Self {
        CountryView {
            iso_country_code: c.code.clone(),
            country_name: c.name.clone(),
            continent: c.continent.clone(),
            wikipedia: c.wikipedia.clone(),
            regions: c.regions.iter().map(RegionEntry::from).collect(),
        }
    }
}

impl From<&Region> for RegionEntry {
    fn from(r: &Region) -> Self {
        RegionEntry {
            iso_region_code: r.code.clone(),
            region_name: r.name.clone(),
            wikipedia: r.wikipedia.clone(),
        }
    }
}

impl From<model::RegionView<'_>> for RegionView {
    fn from(v: model::RegionView<'_>) -> Self {
        RegionView {
            iso_country_code: v.country.code.clone(),
            iso_region_code: v.region.code.clone(),
            region_name: v.region.name.clone(),
            wikipedia: v.region.wikipedia.clone(),
        }
    }
}

impl From<&Airport> for AirportView {
    fn from(a: &Airport) -> Self {
        AirportView {
            icao_airport_code: a.code.clone(),
            airport_name: a.name.clone(),
            airport_type: a.kind.clone(),
            latitude: a.latitude,
            longitude: a.longitude,
            elevation: a.elevation,
            iso_country_code: a.country_code.clone(),
            iso_region_code: a.region_code.clone(),
            municipality: a.municipality.clone(),
            iata_airport_code: a.iata.clone(),
            website: a.website.clone(),
            wikipedia: a.wikipedia.clone(),
            runways: a.runways.iter().map(RunwayEntry::from).collect(),
            frequencies: a.frequencies.iter().map(FrequencyEntry::from).collect(),
        }
    }
}

impl From<&Runway> for RunwayEntry {
    fn from(r: &Runway) -> Self {
        RunwayEntry {
            length: r.length,
            width: r.width,
            surface: r.surface.clone(),
            lighted: r.lighted,
            closed: r.closed,
            low_end: RunwaySideEntry::from(&r.low_end),
            high_end: r.high_end.as_ref().map(RunwaySideEntry::from),
        }
    }
}

impl From<&RunwaySide> for RunwaySideEntry {
    fn from(s: &RunwaySide) -> Self {
        RunwaySideEntry {
            runway_code: s.code.clone(),
            latitude: s.latitude,
            longitude: s.longitude,
            elevation: s.elevation,
            heading: s.heading,
            threshold: s.threshold,
        }
    }
}

impl From<model::RunwayView<'_>> for RunwayView {
    fn from(v: model::RunwayView<'_>) -> Self {
        RunwayView {
            icao_airport_code: v.airport.code.clone(),
            runway_code: v.side.code.clone(),
            alt_runway_code: v.alternate_code().map(str::to_owned),
            latitude: v.side.latitude,
            longitude: v.side.longitude,
            elevation: v.side.elevation,
            heading: v.side.heading,
            threshold: v.side.threshold,
            length: v.runway.length,
            width: v.runway.width,
            surface: v.runway.surface.clone(),
            lighted: v.runway.lighted,
            closed: v.runway.closed,
        }
    }
}

impl From<&Frequency> for FrequencyEntry {
    fn from(f: &Frequency) -> Self {
        FrequencyEntry {
            frequency_type: f.kind.clone(),
            description: f.description.clone(),
            frequency_mhz: f.mhz,
        }
    }
}

impl From<model::FrequencyView<'_>> for FrequencyView {
    fn from(v: model::FrequencyView<'_>) -> Self {
        FrequencyView {
            icao_airport_code: v.airport.code.clone(),
            frequency_type: v.frequency.kind.clone(),
            description: v.frequency.description.clone(),
            frequency_mhz: v.frequency.mhz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::*;

    #[test]
    fn airport_json_uses_wire_names_and_omits_absent_fields() {
        let mut eham = airport("EHAM", "NL", "NL-NH");
        eham.iata = Some("AMS".to_owned());
        eham.elevation = None;
        eham.runways.push(runway("H1", None, 60));

        let json = serde_json::to_value(AirportView::from(&eham)).unwrap();
        assert_eq!(json["icao-airport-code"], "EHAM");
        assert_eq!(json["iata-airport-code"], "AMS");
        assert!(json.get("elevation").is_none());
        assert!(json.get("frequencies").is_none());
        assert!(json["runways"][0].get("high-end").is_none());
        assert_eq!(json["runways"][0]["low-end"]["runway-code"], "H1");
    }

    #[test]
    fn sea_level_elevation_is_still_rendered() {
        let mut a = airport("EHRD", "NL", "NL-ZH");
        a.elevation = Some(0);
        let json = serde_json::to_value(AirportView::from(&a)).unwrap();
        assert_eq!(json["elevation"], 0);
    }
}
