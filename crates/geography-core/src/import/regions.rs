// crates/geography-core/src/import/regions.rs

//! `regions.csv`: col2 composite region code (`US-CA`), col4 name,
//! col6 owning country code, col7 reference URL.
//!
//! The code prefix names the owner, so a region code can only ever live in
//! one country and [`Catalog::region`] can find it from the code alone.

use super::{upsert_nested, Row, RowFault, RowResult};
use crate::model::Region;
use crate::store::{Catalog, Upsert};
use crate::validate;

pub(super) fn import_row(catalog: &mut Catalog, row: &Row<'_>) -> RowResult<Upsert> {
    let code = row.validate(2, "RegionCode", |s| validate::iso_region_code(s, false, false))?;
    let country_code =
        row.validate(6, "CountryCode", |s| validate::iso_country_code(s, false, false))?;

    match code.split_once('-') {
        Some((prefix, rest)) if prefix == country_code && !rest.is_empty() => {}
        Some((_, rest)) if !rest.is_empty() => {
            return Err(row.fail(
                "RegionCode",
                &code,
                RowFault::Malformed(format!("region code is not in country {country_code}")),
            ))
        }
        _ => {
            return Err(row.fail(
                "RegionCode",
                &code,
                RowFault::Malformed("Bad region code".to_owned()),
            ))
        }
    }

    let region = Region {
        code,
        name: row.required_text(4, "RegionName")?,
        wikipedia: row.text(7, "Wikipedia")?,
    };

    catalog
        .countries
        .update(&country_code, |c| {
            upsert_nested(&mut c.regions, region, |r| r.code.as_str())
        })
        .ok_or_else(|| row.unresolved("CountryCode", &country_code, "country"))
}
