// crates/geography-core/src/lib.rs

//! Geography reference data: countries, regions, airports, runways and
//! radio frequencies.
//!
//! **Pipeline:** CSV sources -> [`validate`] -> [`import`] -> [`Catalog`] ->
//! snapshot file -> queries ([`query`]) -> JSON views ([`api`]).
//!
//! ```no_run
//! use geography_core::{import, Catalog, Settings};
//!
//! # fn main() -> geography_core::Result<()> {
//! let settings = Settings::load_or_default(None)?;
//! let mut catalog = Catalog::open_or_default(&settings.database)?;
//! for report in import::load_all(&mut catalog, &settings.source).into_result()? {
//!     println!("{report}");
//! }
//! catalog.save(&settings.database)?;
//!
//! let eham = catalog.airport("eham")?;
//! println!("{} ({})", eham.name, eham.country_code);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod fetch;
pub mod import;
pub mod model;
pub mod query;
pub mod settings;
pub mod store;
pub mod text;
pub mod validate;

// Re-exports
pub use crate::error::{GeoError, Result};
pub use crate::import::{
    CsvSource, Entity, ImportReport, Importer, LoadOutcome, RowError, RowFault,
};
pub use crate::model::{
    Airport, Country, Document, Frequency, FrequencyView, Region, RegionView, Runway,
    RunwaySide, RunwayView,
};
pub use crate::query::{AirportFilter, FrequencyFilter, RunwayFilter, SearchHits};
pub use crate::settings::{ServerSettings, Settings, SourceSettings};
pub use crate::store::{Catalog, CatalogStats, CodeRange, Collection, Upsert, DEFAULT_MAX_RESULTS};
pub use crate::text::fold_key;
pub use crate::validate::{FieldKind, ValidationError};
