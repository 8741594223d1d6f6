// crates/geography-core/src/store.rs

//! # Document Store
//!
//! Keyed collections with exact lookup, inclusive range scans and a result
//! ceiling, plus snapshot persistence of the whole [`Catalog`].
//!
//! **Range semantics:** `[from, until]`, both inclusive, compared on the
//! normalized code. A missing bound is unbounded on that side. An inverted
//! range yields nothing.
//!
//! **Ceiling:** a scan that matches more than `max_results` documents fails
//! with [`GeoError::TooManyResults`] instead of returning a truncated list.
//! A scan that matches nothing fails with [`GeoError::NotFound`].
//!
//! **Snapshot format:** bincode (`DefaultOptions`, size limited), gzip-wrapped
//! when the `compact` feature is on. Saves go through a temporary sibling file
//! that is renamed over the target, so readers never observe a half-written
//! snapshot.

use crate::error::{GeoError, Result};
use crate::model::{Airport, Country, Document};
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::ops::Bound;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Default ceiling for range queries.
pub const DEFAULT_MAX_RESULTS: usize = 250;

/// Bumped whenever the stored document layout changes.
const SNAPSHOT_VERSION: u32 = 1;

/// Refuse snapshots that would decode to more than this many bytes.
const SNAPSHOT_LIMIT: u64 = 512 * 1024 * 1024;

fn snapshot_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SNAPSHOT_LIMIT)
}

// -----------------------------------------------------------------------------
// RANGES
// -----------------------------------------------------------------------------

/// Inclusive code range. `None` on either side means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeRange {
    pub from: Option<String>,
    pub until: Option<String>,
}

impl CodeRange {
    /// Builds a range; empty strings count as "no bound".
    pub fn new(from: impl Into<String>, until: impl Into<String>) -> Self {
        let bound = |s: String| (!s.is_empty()).then_some(s);
        CodeRange {
            from: bound(from.into()),
            until: bound(until.into()),
        }
    }

    pub fn all() -> Self {
        CodeRange::default()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((&self.from, &self.until), (Some(f), Some(u)) if f > u)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.from.as_deref().map_or(true, |f| code >= f)
            && self.until.as_deref().map_or(true, |u| code <= u)
    }

    fn bounds(&self) -> (Bound<&str>, Bound<&str>) {
        fn side(b: Option<&str>) -> Bound<&str> {
            b.map_or(Bound::Unbounded, Bound::Included)
        }
        (side(self.from.as_deref()), side(self.until.as_deref()))
    }
}

/// Collects at most `max_results` items; one more is an error.
pub(crate) fn bounded<I: Iterator>(items: I, max_results: usize) -> Result<Vec<I::Item>> {
    let rows: Vec<_> = items.take(max_results.saturating_add(1)).collect();
    if rows.len() > max_results {
        return Err(GeoError::TooManyResults { limit: max_results });
    }
    Ok(rows)
}

// -----------------------------------------------------------------------------
// COLLECTION
// -----------------------------------------------------------------------------

/// Outcome of a whole-document upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Documents of one kind, ordered by natural code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    docs: BTreeMap<String, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            docs: BTreeMap::new(),
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.docs.values()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.docs.get(key)
    }

    /// Replaces the document with the same key, or inserts it.
    pub fn upsert(&mut self, doc: T) -> Upsert {
        let key = doc.key().to_owned();
        match self.docs.insert(key, doc) {
            Some(_) => Upsert::Replaced,
            None => Upsert::Inserted,
        }
    }

    /// Mutates the document stored under `key` in place.
    ///
    /// `f` must not change the document's key. Returns `None` when no such
    /// document exists.
    pub fn update<R>(&mut self, key: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let doc = self.docs.get_mut(key)?;
        let out = f(&mut *doc);
        debug_assert_eq!(doc.key(), key);
        Some(out)
    }

    /// Documents whose key lies in `range`, in code order.
    pub fn scan<'a>(&'a self, range: &CodeRange) -> impl Iterator<Item = &'a T> + 'a {
        // BTreeMap::range panics on inverted bounds.
        let hits = (!range.is_inverted()).then(|| self.docs.range::<str, _>(range.bounds()));
        hits.into_iter().flatten().map(|(_, doc)| doc)
    }

    /// Range scan with an AND-ed predicate and the result ceiling applied.
    pub fn find<'a>(
        &'a self,
        range: &CodeRange,
        predicate: impl Fn(&T) -> bool,
        max_results: usize,
    ) -> Result<Vec<&'a T>> {
        let rows = bounded(self.scan(range).filter(|doc| predicate(doc)), max_results)?;
        if rows.is_empty() {
            return Err(GeoError::NotFound(format!("no {} matches the filter", T::KIND)));
        }
        Ok(rows)
    }
}

// -----------------------------------------------------------------------------
// CATALOG
// -----------------------------------------------------------------------------

/// Counts over the whole catalog, sub-records included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub countries: usize,
    pub regions: usize,
    pub airports: usize,
    pub runways: usize,
    pub frequencies: usize,
}

/// All reference data: countries (with regions) and airports (with runways
/// and frequencies).
#[derive(Debug, Clone)]
pub struct Catalog {
    pub countries: Collection<Country>,
    pub airports: Collection<Airport>,
    max_results: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            countries: Collection::new(),
            airports: Collection::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    countries: &'a Collection<Country>,
    airports: &'a Collection<Airport>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    countries: Collection<Country>,
    airports: Collection<Airport>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            countries: self.countries.len(),
            airports: self.airports.len(),
            ..CatalogStats::default()
        };
        for country in self.countries.iter() {
            stats.regions += country.regions.len();
        }
        for airport in self.airports.iter() {
            stats.runways += airport.runways.len();
            stats.frequencies += airport.frequencies.len();
        }
        stats
    }

    // --- Persistence ---

    /// Writes the snapshot atomically (temporary sibling + rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = temp_sibling(path);
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            countries: &self.countries,
            airports: &self.airports,
        };
        if let Err(e) = write_snapshot(&tmp, &snapshot) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, path)?;

        info!(path = %path.display(), stats = ?self.stats(), "snapshot saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            GeoError::NotFound(format!("Snapshot not found at {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);

        #[cfg(feature = "compact")]
        let reader = GzDecoder::new(reader);

        let snapshot: Snapshot = snapshot_options().deserialize_from(reader)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GeoError::unreadable(
                path.display().to_string(),
                format!(
                    "snapshot version {} (expected {SNAPSHOT_VERSION}), reload the data",
                    snapshot.version
                ),
            ));
        }

        let catalog = Catalog {
            countries: snapshot.countries,
            airports: snapshot.airports,
            max_results: DEFAULT_MAX_RESULTS,
        };
        debug!(path = %path.display(), stats = ?catalog.stats(), "snapshot loaded");
        Ok(catalog)
    }

    /// Loads the snapshot, or starts empty when none has been written yet.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no snapshot yet, starting with an empty catalog");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);

    #[cfg(feature = "compact")]
    let mut file = {
        let mut encoder = GzEncoder::new(file, Compression::default());
        snapshot_options().serialize_into(&mut encoder, value)?;
        encoder.finish()?
    };

    #[cfg(not(feature = "compact"))]
    let mut file = {
        let mut file = file;
        snapshot_options().serialize_into(&mut file, value)?;
        file
    };

    file.flush()?;
    Ok(())
}
