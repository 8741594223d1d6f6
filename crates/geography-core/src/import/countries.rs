// crates/geography-core/src/import/countries.rs

//! `countries.csv`: col2 code, col3 name, col4 continent, col5 reference URL.

use super::{Row, RowResult};
use crate::model::Country;
use crate::store::{Catalog, Upsert};
use crate::validate;

pub(super) fn import_row(catalog: &mut Catalog, row: &Row<'_>) -> RowResult<Upsert> {
    let code = row.validate(2, "CountryCode", |s| validate::iso_country_code(s, false, false))?;

    let mut country = Country {
        name: row.required_text(3, "CountryName")?,
        continent: row.required_text(4, "Continent")?,
        wikipedia: row.text(5, "Wikipedia")?,
        regions: Vec::new(),
        code,
    };

    // Regions come from their own source; keep them across a re-import.
    if let Some(regions) = catalog
        .countries
        .update(&country.code, |c| std::mem::take(&mut c.regions))
    {
        country.regions = regions;
    }

    Ok(catalog.countries.upsert(country))
}

#[cfg(test)]
mod tests {
    use super::super::testing::source;
    use super::super::{Importer, RowFault};
    use crate::model::fixtures::country;
    use crate::store::Catalog;

    #[test]
    fn imports_and_normalizes_codes() {
        let mut catalog = Catalog::new();
        let report = Importer::new(&mut catalog)
            .import_countries(source(
                "302672,nl,Netherlands,EU,https://en.wikipedia.org/wiki/Netherlands\n\
                 302618,BE,Belgium,EU,\n",
            ))
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.inserted, 2);
        let nl = catalog.countries.get("NL").unwrap();
        assert_eq!(nl.name, "Netherlands");
        assert_eq!(nl.continent, "EU");
        assert!(nl.wikipedia.is_some());
        assert_eq!(catalog.countries.get("BE").unwrap().wikipedia, None);
    }

    #[test]
    fn reimport_replaces_fields_and_keeps_regions() {
        let mut catalog = Catalog::new();
        catalog
            .countries
            .upsert(country("NL", "Holland", &["NL-NH", "NL-ZH"]));

        let report = Importer::new(&mut catalog)
            .import_countries(source("1,NL,Netherlands,EU,\n"))
            .unwrap();

        assert_eq!(report.replaced, 1);
        let nl = catalog.countries.get("NL").unwrap();
        assert_eq!(nl.name, "Netherlands");
        assert_eq!(nl.regions.len(), 2);
    }

    #[test]
    fn bad_code_fails_only_its_row() {
        let mut catalog = Catalog::new();
        let report = Importer::new(&mut catalog)
            .import_countries(source("1,NLD,Netherlands,EU,\n2,BE,Belgium,EU,\n"))
            .unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.imported, 1);
        assert_eq!(
            report.errors[0].to_string(),
            "Country[2].CountryCode(NLD): Invalid ISO Country Code"
        );
        assert!(matches!(report.errors[0].reason, RowFault::Validation(_)));
        assert!(catalog.countries.get("BE").is_some());
    }
}
