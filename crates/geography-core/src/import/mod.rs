// crates/geography-core/src/import/mod.rs

//! # Import Reconciler
//!
//! One pass per entity CSV, strictly sequential:
//!
//! 1. blank rows are skipped,
//! 2. columns are validated fail-fast (first bad column aborts the row only),
//! 3. parent documents are resolved by exact normalized code,
//! 4. the record is built and upserted by natural key.
//!
//! Row failures become [`RowError`]s in the [`ImportReport`] and are logged;
//! they never abort the pass. Only an unreadable source (cannot open, no
//! header, I/O failure mid-stream) is an `Err`. There is no rollback: rows
//! applied before a fatal error stay applied.
//!
//! Re-importing a parent (country, airport) replaces its own fields but keeps
//! the sub-records owned by another source (regions, runways, frequencies).

mod airports;
mod countries;
mod frequencies;
mod regions;
mod runways;

use crate::error::{GeoError, Result};
use crate::fetch;
use crate::settings::SourceSettings;
use crate::store::{Catalog, Upsert};
use crate::text::non_blank;
use crate::validate::{ValidationError, Validated};
use csv::StringRecord;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

// -----------------------------------------------------------------------------
// ENTITIES
// -----------------------------------------------------------------------------

/// The five CSV sources, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Country,
    Region,
    Airport,
    Runway,
    Frequency,
}

impl Entity {
    /// Import order: every entity comes after the parents it references.
    pub const ALL: [Entity; 5] = [
        Entity::Country,
        Entity::Region,
        Entity::Airport,
        Entity::Runway,
        Entity::Frequency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Entity::Country => "Country",
            Entity::Region => "Region",
            Entity::Airport => "Airport",
            Entity::Runway => "Runway",
            Entity::Frequency => "Frequency",
        }
    }

    /// Plural topic name, also the CSV file stem (`countries.csv`).
    pub fn topic(self) -> &'static str {
        match self {
            Entity::Country => "countries",
            Entity::Region => "regions",
            Entity::Airport => "airports",
            Entity::Runway => "runways",
            Entity::Frequency => "frequencies",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Entity {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Entity::ALL
            .into_iter()
            .find(|e| e.topic().eq_ignore_ascii_case(s) || e.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeoError::Config(format!("unknown entity '{s}'")))
    }
}

// -----------------------------------------------------------------------------
// ROW ERRORS
// -----------------------------------------------------------------------------

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RowFault {
    Validation(ValidationError),
    /// The referenced parent (`country`, `region`, `airport`) does not exist.
    Unresolved { what: &'static str },
    /// A required column is absent or blank.
    Missing,
    Malformed(String),
}

impl fmt::Display for RowFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFault::Validation(e) => write!(f, "{e}"),
            RowFault::Unresolved { what } => write!(f, "{what} not found"),
            RowFault::Missing => f.write_str("Missing"),
            RowFault::Malformed(msg) => f.write_str(msg),
        }
    }
}

/// A rejected row, rendered as `Airport[12].Latitude(91): Invalid Latitude`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{entity}[{row}].{column}({input}): {reason}")]
pub struct RowError {
    pub entity: Entity,
    /// 1-based record number; the header is record 1. Empty lines the
    /// reader drops are not counted.
    pub row: usize,
    pub column: &'static str,
    pub input: String,
    pub reason: RowFault,
}

pub type RowResult<T> = std::result::Result<T, RowError>;

// -----------------------------------------------------------------------------
// SOURCES AND ROWS
// -----------------------------------------------------------------------------

/// A header-checked CSV stream for one entity.
pub struct CsvSource<R> {
    location: String,
    reader: csv::Reader<R>,
    header: StringRecord,
}

impl<R: Read> CsvSource<R> {
    /// Wraps `reader` and consumes the header row. A missing or unreadable
    /// header is a source error.
    pub fn open(location: impl Into<String>, reader: R) -> Result<Self> {
        let location = location.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut header = StringRecord::new();
        match reader.read_record(&mut header) {
            Ok(true) => {}
            Ok(false) => return Err(GeoError::unreadable(location, "missing header row")),
            Err(e) => return Err(GeoError::unreadable(location, e)),
        }

        Ok(CsvSource {
            location,
            reader,
            header,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn header(&self) -> &StringRecord {
        &self.header
    }
}

impl CsvSource<Box<dyn Read>> {
    /// Opens a local file (`.gz` is decompressed under `compact`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::open(path.display().to_string(), fetch::open_file(path)?)
    }

    /// Opens a local path or, with the `fetch` feature, an `http(s)://` URL.
    pub fn from_location(location: &str) -> Result<Self> {
        Self::open(location, fetch::open_source(location)?)
    }
}

/// One data row. Column indices are 1-based, matching the CSV layouts.
pub struct Row<'r> {
    entity: Entity,
    number: usize,
    record: &'r StringRecord,
}

impl<'r> Row<'r> {
    pub fn new(entity: Entity, number: usize, record: &'r StringRecord) -> Self {
        Row {
            entity,
            number,
            record,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn is_blank(&self) -> bool {
        self.record.iter().all(|f| f.trim().is_empty())
    }

    /// Raw column, or a `Missing` error if the row is too short.
    pub fn col(&self, index: usize, column: &'static str) -> RowResult<&'r str> {
        index
            .checked_sub(1)
            .and_then(|i| self.record.get(i))
            .ok_or_else(|| self.fail(column, "", RowFault::Missing))
    }

    /// Column run through `validator`; failures carry the raw input.
    pub fn validate<T>(
        &self,
        index: usize,
        column: &'static str,
        validator: impl FnOnce(&str) -> Validated<T>,
    ) -> RowResult<T> {
        let raw = self.col(index, column)?;
        validator(raw).map_err(|e| self.fail(column, raw, RowFault::Validation(e)))
    }

    /// Trimmed free text; blank is `None`.
    pub fn text(&self, index: usize, column: &'static str) -> RowResult<Option<String>> {
        Ok(non_blank(self.col(index, column)?))
    }

    /// Trimmed free text that must not be blank.
    pub fn required_text(&self, index: usize, column: &'static str) -> RowResult<String> {
        let raw = self.col(index, column)?;
        non_blank(raw).ok_or_else(|| self.fail(column, raw, RowFault::Missing))
    }

    pub fn fail(&self, column: &'static str, input: &str, reason: RowFault) -> RowError {
        RowError {
            entity: self.entity,
            row: self.number,
            column,
            input: input.to_owned(),
            reason,
        }
    }

    pub fn unresolved(&self, column: &'static str, input: &str, what: &'static str) -> RowError {
        self.fail(column, input, RowFault::Unresolved { what })
    }
}

// -----------------------------------------------------------------------------
// REPORT
// -----------------------------------------------------------------------------

/// Outcome of one import pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub entity: Entity,
    /// Data rows read (header excluded).
    pub rows: usize,
    pub imported: usize,
    pub inserted: usize,
    pub replaced: usize,
    /// Blank rows.
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn new(entity: Entity) -> Self {
        ImportReport {
            entity,
            rows: 0,
            imported: 0,
            inserted: 0,
            replaced: 0,
            skipped: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: Upsert) {
        self.imported += 1;
        match outcome {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Replaced => self.replaced += 1,
        }
    }

    fn reject(&mut self, error: RowError) {
        self.failed += 1;
        self.errors.push(error);
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows, {} imported ({} new, {} replaced), {} skipped, {} failed",
            self.entity.topic(),
            self.rows,
            self.imported,
            self.inserted,
            self.replaced,
            self.skipped,
            self.failed
        )
    }
}

// -----------------------------------------------------------------------------
// IMPORTER
// -----------------------------------------------------------------------------

/// Replaces the entry with the same key, or appends.
///
/// The found/not-found decision is the `Option` returned by the scan itself,
/// never a position compared against the length afterwards.
pub(crate) fn upsert_nested<T, K>(list: &mut Vec<T>, item: T, key: impl Fn(&T) -> &K) -> Upsert
where
    K: PartialEq + ?Sized,
{
    upsert_nested_by(list, item, |a, b| key(a) == key(b))
}

/// [`upsert_nested`] with a caller-supplied identity test.
pub(crate) fn upsert_nested_by<T>(
    list: &mut Vec<T>,
    item: T,
    same: impl Fn(&T, &T) -> bool,
) -> Upsert {
    match list.iter_mut().find(|existing| same(existing, &item)) {
        Some(slot) => {
            *slot = item;
            Upsert::Replaced
        }
        None => {
            list.push(item);
            Upsert::Inserted
        }
    }
}

type RowFn = fn(&mut Catalog, &Row<'_>) -> RowResult<Upsert>;

/// Applies CSV passes to a catalog it borrows for the duration of the import.
pub struct Importer<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> Importer<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Importer { catalog }
    }

    pub fn import_countries<R: Read>(&mut self, source: CsvSource<R>) -> Result<ImportReport> {
        self.run(Entity::Country, source, countries::import_row)
    }

    pub fn import_regions<R: Read>(&mut self, source: CsvSource<R>) -> Result<ImportReport> {
        self.run(Entity::Region, source, regions::import_row)
    }

    pub fn import_airports<R: Read>(&mut self, source: CsvSource<R>) -> Result<ImportReport> {
        self.run(Entity::Airport, source, airports::import_row)
    }

    pub fn import_runways<R: Read>(&mut self, source: CsvSource<R>) -> Result<ImportReport> {
        self.run(Entity::Runway, source, runways::import_row)
    }

    pub fn import_frequencies<R: Read>(&mut self, source: CsvSource<R>) -> Result<ImportReport> {
        self.run(Entity::Frequency, source, frequencies::import_row)
    }

    /// Dispatches to the pass for `entity`.
    pub fn import<R: Read>(&mut self, entity: Entity, source: CsvSource<R>) -> Result<ImportReport> {
        match entity {
            Entity::Country => self.import_countries(source),
            Entity::Region => self.import_regions(source),
            Entity::Airport => self.import_airports(source),
            Entity::Runway => self.import_runways(source),
            Entity::Frequency => self.import_frequencies(source),
        }
    }

    fn run<R: Read>(
        &mut self,
        entity: Entity,
        mut source: CsvSource<R>,
        apply: RowFn,
    ) -> Result<ImportReport> {
        info!(entity = entity.topic(), source = source.location(), "import started");

        let mut report = ImportReport::new(entity);
        let mut record = StringRecord::new();
        let mut number = 1;

        loop {
            number += 1;
            match source.reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    warn!(entity = entity.topic(), row = number, error = %e, "import aborted");
                    return Err(GeoError::unreadable(source.location(), e));
                }
                Err(e) => {
                    report.rows += 1;
                    let error = RowError {
                        entity,
                        row: number,
                        column: "Record",
                        input: String::new(),
                        reason: RowFault::Malformed(e.to_string()),
                    };
                    warn!(entity = entity.topic(), row = number, "{error}");
                    report.reject(error);
                    continue;
                }
            }

            report.rows += 1;
            let row = Row::new(entity, number, &record);
            if row.is_blank() {
                report.skipped += 1;
                continue;
            }

            match apply(self.catalog, &row) {
                Ok(outcome) => {
                    debug!(entity = entity.topic(), row = number, ?outcome, "row applied");
                    report.record(outcome);
                }
                Err(error) => {
                    warn!(entity = entity.topic(), row = number, column = error.column, "{error}");
                    report.reject(error);
                }
            }
        }

        info!(
            entity = entity.topic(),
            rows = report.rows,
            inserted = report.inserted,
            replaced = report.replaced,
            skipped = report.skipped,
            failed = report.failed,
            "import finished"
        );
        Ok(report)
    }
}

/// Result of a multi-pass load: the reports of every pass that finished, and
/// the source failure that ended the run early, if any.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub reports: Vec<ImportReport>,
    pub error: Option<GeoError>,
}

impl LoadOutcome {
    /// The reports, or the failure when the run stopped early.
    pub fn into_result(self) -> Result<Vec<ImportReport>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.reports),
        }
    }
}

/// Runs the passes for `entities` in dependency order, reading each from its
/// configured location. Stops at the first source failure; rows already
/// applied stay in the catalog and finished passes keep their reports.
pub fn load(catalog: &mut Catalog, sources: &SourceSettings, entities: &[Entity]) -> LoadOutcome {
    let mut importer = Importer::new(catalog);
    let mut outcome = LoadOutcome::default();
    for entity in Entity::ALL.into_iter().filter(|e| entities.contains(e)) {
        let pass = CsvSource::from_location(sources.location(entity))
            .and_then(|source| importer.import(entity, source));
        match pass {
            Ok(report) => outcome.reports.push(report),
            Err(err) => {
                warn!(entity = entity.topic(), error = %err, "load stopped");
                outcome.error = Some(err);
                break;
            }
        }
    }
    outcome
}

/// All five passes: countries, regions, airports, runways, frequencies.
pub fn load_all(catalog: &mut Catalog, sources: &SourceSettings) -> LoadOutcome {
    load(catalog, sources, &Entity::ALL)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::io::Cursor;

    /// Header plus `body`, as a source over an in-memory buffer.
    pub fn source(body: &str) -> CsvSource<Cursor<Vec<u8>>> {
        let text = format!("header\n{body}");
        CsvSource::open("memory", Cursor::new(text.into_bytes())).unwrap()
    }

    pub fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }
}
