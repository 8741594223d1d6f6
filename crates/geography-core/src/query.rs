// crates/geography-core/src/query.rs

//! Read-side queries over a [`Catalog`].
//!
//! Every parameter arrives as raw text and is validated here, so the REST,
//! GraphQL and CLI surfaces all apply the same rules:
//!
//! * lookups: `partial = false, empty = false`
//! * equality filters: `partial = false, empty = true`
//! * range bounds: `partial = true, empty = true`
//!
//! Top-level listings fail with `NotFound` on zero rows and `TooManyResults`
//! above the ceiling. Nested listings (runways, frequencies) of an existing
//! airport return an empty list when nothing matches.

use crate::error::{GeoError, Result};
use crate::model::{Airport, Country, FrequencyView, RegionView, RunwayView};
use crate::store::{bounded, Catalog, CodeRange};
use crate::text::{contains_folded, fold_key};
use crate::validate::{self, Validated};
use serde::Deserialize;

// -----------------------------------------------------------------------------
// FILTERS
// -----------------------------------------------------------------------------

/// Airport listing filter. All supplied fields are AND-ed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AirportFilter {
    pub country: String,
    pub region: String,
    /// ICAO range.
    pub from: String,
    pub until: String,
    pub from_iata: String,
    pub until_iata: String,
}

/// Runway listing filter, applied per runway end.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RunwayFilter {
    /// Runway code range.
    pub from: String,
    pub until: String,
    pub from_heading: String,
    pub until_heading: String,
    pub from_length: String,
    pub until_length: String,
    /// `0` or `1`.
    pub closed: String,
}

/// Frequency listing filter on the type tag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrequencyFilter {
    pub from: String,
    pub until: String,
}

/// Result of a free-text [`Catalog::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchHits<'a> {
    pub countries: Vec<&'a Country>,
    pub airports: Vec<&'a Airport>,
}

impl SearchHits<'_> {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.airports.is_empty()
    }
}

type CodeValidator = fn(&str, bool, bool) -> Validated<String>;

fn code_range(from: &str, until: &str, validator: CodeValidator) -> Validated<CodeRange> {
    Ok(CodeRange::new(
        validator(from, true, true)?,
        validator(until, true, true)?,
    ))
}

/// Inclusive numeric bounds; a blank side is open.
fn within<T: PartialOrd>(value: T, from: Option<T>, until: Option<T>) -> bool {
    from.map_or(true, |f| value >= f) && until.map_or(true, |u| value <= u)
}

fn not_found(what: &str, code: &str) -> GeoError {
    GeoError::NotFound(format!("{what} {code}"))
}

// -----------------------------------------------------------------------------
// QUERIES
// -----------------------------------------------------------------------------

impl Catalog {
    pub fn country(&self, code: &str) -> Result<&Country> {
        let code = validate::iso_country_code(code, false, false)?;
        self.countries
            .get(&code)
            .ok_or_else(|| not_found("country", &code))
    }

    pub fn countries(&self, from: &str, until: &str) -> Result<Vec<&Country>> {
        let range = code_range(from, until, validate::iso_country_code)?;
        self.countries.find(&range, |_| true, self.max_results())
    }

    /// Region by composite code (`US-CA`); the owning country is the prefix.
    pub fn region(&self, code: &str) -> Result<RegionView<'_>> {
        let code = validate::iso_region_code(code, false, false)?;
        let (country_code, _) = code
            .split_once('-')
            .ok_or_else(|| not_found("region", &code))?;
        let country = self
            .countries
            .get(country_code)
            .ok_or_else(|| not_found("region", &code))?;
        let region = country
            .find_region(&code)
            .ok_or_else(|| not_found("region", &code))?;
        Ok(RegionView { country, region })
    }

    /// Regions in code order, optionally limited to one country.
    pub fn regions(&self, country: &str, from: &str, until: &str) -> Result<Vec<RegionView<'_>>> {
        let country = validate::iso_country_code(country, false, true)?;
        let range = code_range(from, until, validate::iso_region_code)?;

        let owners: Vec<&Country> = if country.is_empty() {
            self.countries.iter().collect()
        } else {
            vec![self.country(&country)?]
        };

        let mut views: Vec<RegionView<'_>> = owners
            .into_iter()
            .flat_map(|c| c.regions.iter().map(move |r| RegionView { country: c, region: r }))
            .filter(|v| range.contains(&v.region.code))
            .collect();
        views.sort_by(|a, b| a.region.code.cmp(&b.region.code));

        let views = bounded(views.into_iter(), self.max_results())?;
        if views.is_empty() {
            return Err(GeoError::NotFound("no region matches the filter".to_owned()));
        }
        Ok(views)
    }

    pub fn airport(&self, icao: &str) -> Result<&Airport> {
        let code = validate::icao_airport_code(icao, false, false)?;
        self.airports
            .get(&code)
            .ok_or_else(|| not_found("airport", &code))
    }

    pub fn airport_by_iata(&self, iata: &str) -> Result<&Airport> {
        let code = validate::iata_airport_code(iata, false, false)?;
        self.airports
            .iter()
            .find(|a| a.iata.as_deref() == Some(code.as_str()))
            .ok_or_else(|| not_found("airport", &code))
    }

    /// Airport by ICAO code, falling back to IATA for three-letter input.
    pub fn airport_by_code(&self, code: &str) -> Result<&Airport> {
        match self.airport(code) {
            Err(GeoError::NotFound(_)) | Err(GeoError::Validation(_))
                if validate::iata_airport_code(code, false, false).is_ok() =>
            {
                self.airport_by_iata(code)
            }
            other => other,
        }
    }

    pub fn airports(&self, filter: &AirportFilter) -> Result<Vec<&Airport>> {
        let country = validate::iso_country_code(&filter.country, false, true)?;
        let region = validate::iso_region_code(&filter.region, false, true)?;
        let icao = code_range(&filter.from, &filter.until, validate::icao_airport_code)?;
        let iata = code_range(&filter.from_iata, &filter.until_iata, validate::iata_airport_code)?;
        let iata_filtered = iata != CodeRange::all();

        self.airports.find(
            &icao,
            |a| {
                (country.is_empty() || a.country_code == country)
                    && (region.is_empty() || a.region_code == region)
                    && (!iata_filtered || a.iata.as_deref().is_some_and(|c| iata.contains(c)))
            },
            self.max_results(),
        )
    }

    /// Runway ends of one airport. Unknown airport is `NotFound`; no match is
    /// an empty list.
    pub fn runways(&self, icao: &str, filter: &RunwayFilter) -> Result<Vec<RunwayView<'_>>> {
        let airport = self.airport(icao)?;
        let codes = code_range(&filter.from, &filter.until, validate::runway_code)?;
        let from_heading = validate::optional(&filter.from_heading, validate::runway_heading)?;
        let until_heading = validate::optional(&filter.until_heading, validate::runway_heading)?;
        let from_length = validate::optional(&filter.from_length, validate::runway_length)?;
        let until_length = validate::optional(&filter.until_length, validate::runway_length)?;
        let closed = validate::optional(&filter.closed, validate::runway_closed)?;
        let heading_filtered = from_heading.is_some() || until_heading.is_some();

        let views = airport.runway_views().filter(|v| {
            codes.contains(v.code())
                && within(v.runway.length, from_length, until_length)
                && closed.map_or(true, |c| v.runway.closed == c)
                && (!heading_filtered
                    || v.side
                        .heading
                        .is_some_and(|h| within(h, from_heading, until_heading)))
        });
        bounded(views, self.max_results())
    }

    /// One runway end by its code (either end of the physical runway).
    pub fn runway(&self, icao: &str, code: &str) -> Result<RunwayView<'_>> {
        let airport = self.airport(icao)?;
        let code = validate::runway_code(code, false, false)?;
        airport
            .runway_views()
            .find(|v| v.code() == code)
            .ok_or_else(|| not_found("runway", &format!("{}/{code}", airport.code)))
    }

    pub fn frequencies(
        &self,
        icao: &str,
        filter: &FrequencyFilter,
    ) -> Result<Vec<FrequencyView<'_>>> {
        let airport = self.airport(icao)?;
        let range = CodeRange::new(
            filter.from.trim().to_uppercase(),
            filter.until.trim().to_uppercase(),
        );
        let views = airport
            .frequencies
            .iter()
            .filter(|f| range.contains(&f.kind.to_uppercase()))
            .map(|frequency| FrequencyView { airport, frequency });
        bounded(views, self.max_results())
    }

    pub fn frequency(&self, icao: &str, kind: &str) -> Result<FrequencyView<'_>> {
        let airport = self.airport(icao)?;
        let kind = kind.trim();
        airport
            .find_frequency(kind)
            .map(|frequency| FrequencyView { airport, frequency })
            .ok_or_else(|| not_found("frequency", &format!("{}/{kind}", airport.code)))
    }

    /// Accent- and case-insensitive substring search over country names and
    /// codes, and airport names, municipalities and codes.
    pub fn search(&self, text: &str) -> Result<SearchHits<'_>> {
        let needle = fold_key(text.trim());
        if needle.is_empty() {
            return Err(GeoError::NotFound("empty search".to_owned()));
        }

        let countries = self
            .countries
            .iter()
            .filter(|c| contains_folded(&c.name, &needle) || fold_key(&c.code) == needle);
        let airports = self.airports.iter().filter(|a| {
            contains_folded(&a.name, &needle)
                || a.municipality
                    .as_deref()
                    .is_some_and(|m| contains_folded(m, &needle))
                || fold_key(&a.code) == needle
                || a.iata.as_deref().is_some_and(|c| fold_key(c) == needle)
        });

        let hits = SearchHits {
            countries: bounded(countries, self.max_results())?,
            airports: bounded(airports, self.max_results())?,
        };
        if hits.is_empty() {
            return Err(not_found("anything matching", text.trim()));
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::*;
    use crate::model::Frequency;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new().with_max_results(3);
        catalog
            .countries
            .upsert(country("NL", "Netherlands", &["NL-NH", "NL-ZH"]));
        catalog.countries.upsert(country("BE", "Belgium", &["BE-VAN"]));
        catalog.countries.upsert(country("CH", "Switzerland", &[]));

        let mut eham = airport("EHAM", "NL", "NL-NH");
        eham.iata = Some("AMS".to_owned());
        eham.runways.push(runway("09", Some("27"), 11_329));
        eham.runways.push(runway("18C", Some("36C"), 10_827));
        eham.runways[1].closed = true;
        eham.frequencies.push(Frequency {
            kind: "TWR".to_owned(),
            description: None,
            mhz: 118.1,
        });
        catalog.airports.upsert(eham);

        let mut ehrd = airport("EHRD", "NL", "NL-ZH");
        ehrd.iata = Some("RTM".to_owned());
        catalog.airports.upsert(ehrd);

        let mut ebbr = airport("EBBR", "BE", "BE-VAN");
        ebbr.iata = Some("BRU".to_owned());
        ebbr.name = "Brussels Airport".to_owned();
        catalog.airports.upsert(ebbr);

        let mut lszh = airport("LSZH", "CH", "CH-ZH");
        lszh.name = "Zürich Airport".to_owned();
        lszh.iata = Some("ZRH".to_owned());
        catalog.airports.upsert(lszh);
        catalog
    }

    #[test]
    fn country_lookup_normalizes_and_validates() {
        let c = catalog();
        assert_eq!(c.country(" nl ").unwrap().name, "Netherlands");
        assert!(matches!(c.country("NLD"), Err(GeoError::Validation(_))));
        assert!(matches!(c.country("XX"), Err(GeoError::NotFound(_))));
    }

    #[test]
    fn countries_until_only() {
        let c = catalog();
        let codes: Vec<_> = c.countries("", "CH").unwrap().iter().map(|c| &c.code).collect();
        assert_eq!(codes, ["BE", "CH"]);
    }

    #[test]
    fn region_lookup_uses_country_prefix() {
        let c = catalog();
        let view = c.region("nl-zh").unwrap();
        assert_eq!(view.country.code, "NL");
        assert!(matches!(c.region("ZH"), Err(GeoError::NotFound(_))));
    }

    #[test]
    fn regions_filter_by_country_and_range() {
        let c = catalog();
        assert_eq!(c.regions("NL", "", "").unwrap().len(), 2);
        assert_eq!(c.regions("", "NL-Z", "").unwrap().len(), 1);
        assert!(matches!(c.regions("CH", "", ""), Err(GeoError::NotFound(_))));
    }

    #[test]
    fn airports_and_filters_and_ceiling() {
        let c = catalog();
        let nl = AirportFilter {
            country: "nl".into(),
            ..Default::default()
        };
        assert_eq!(c.airports(&nl).unwrap().len(), 2);

        let zh = AirportFilter {
            country: "NL".into(),
            region: "NL-ZH".into(),
            ..Default::default()
        };
        assert_eq!(c.airports(&zh).unwrap()[0].code, "EHRD");

        let iata = AirportFilter {
            from_iata: "B".into(),
            until_iata: "S".into(),
            ..Default::default()
        };
        let codes: Vec<_> = c.airports(&iata).unwrap().iter().map(|a| &a.code).collect();
        assert_eq!(codes, ["EBBR", "EHRD"]);

        assert!(matches!(
            c.airports(&AirportFilter::default()),
            Err(GeoError::TooManyResults { limit: 3 })
        ));
    }

    #[test]
    fn airport_by_code_falls_back_to_iata() {
        let c = catalog();
        assert_eq!(c.airport_by_code("AMS").unwrap().code, "EHAM");
        assert_eq!(c.airport_by_code("EHAM").unwrap().code, "EHAM");
        assert_eq!(c.airport_by_iata("zrh").unwrap().code, "LSZH");
    }

    #[test]
    fn runway_filters_apply_per_end() {
        let c = catalog();
        // two runways, four ends, ceiling of three
        assert!(matches!(
            c.runways("EHAM", &RunwayFilter::default()),
            Err(GeoError::TooManyResults { limit: 3 })
        ));

        let west = RunwayFilter {
            from_heading: "180".into(),
            ..Default::default()
        };
        let codes: Vec<_> = c
            .runways("EHAM", &west)
            .unwrap()
            .iter()
            .map(|v| v.code())
            .collect();
        assert_eq!(codes, ["27", "36C"]);

        let open = RunwayFilter {
            closed: "0".into(),
            ..Default::default()
        };
        assert_eq!(c.runways("EHAM", &open).unwrap().len(), 2);
    }

    #[test]
    fn nested_listing_of_existing_airport_may_be_empty() {
        let c = catalog();
        let none = RunwayFilter {
            from_length: "20000".into(),
            ..Default::default()
        };
        assert!(c.runways("EHAM", &none).unwrap().is_empty());
        assert!(c.frequencies("EHRD", &FrequencyFilter::default()).unwrap().is_empty());
        assert!(matches!(
            c.frequencies("EHXX", &FrequencyFilter::default()),
            Err(GeoError::NotFound(_))
        ));
    }

    #[test]
    fn single_runway_and_frequency() {
        let c = catalog();
        let view = c.runway("EHAM", "36c").unwrap();
        assert_eq!(view.alternate_code(), Some("18C"));
        assert!(c.runway("EHAM", "04").is_err());
        assert_eq!(c.frequency("EHAM", "twr").unwrap().frequency.mhz, 118.1);
    }

    #[test]
    fn search_folds_accents() {
        let c = catalog();
        let hits = c.search("zurich").unwrap();
        assert_eq!(hits.airports[0].code, "LSZH");
        assert!(hits.countries.is_empty());
        assert!(matches!(c.search("atlantis"), Err(GeoError::NotFound(_))));
    }
}
