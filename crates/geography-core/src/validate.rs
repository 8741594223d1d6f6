// crates/geography-core/src/validate.rs

//! # Field Validators
//!
//! Pure functions that turn one raw textual field into one normalized,
//! bounds-checked value. Every import pass and every query parameter goes
//! through these, so format and range policy lives in exactly one place.
//!
//! Codes share one normalization pass: whitespace is dropped, letters are
//! uppercased and any character outside the code's class is rejected.
//! Numbers are trimmed, parsed as floating point and range-checked; integer
//! fields are truncated toward zero *before* the range check.
//!
//! The `partial` flag relaxes the minimum length of a code (used for range
//! bounds such as `from=E`), `empty` allows a blank input.
//!
//! ```rust
//! use geography_core::validate;
//!
//! assert_eq!(validate::icao_airport_code(" eham ", false, false).unwrap(), "EHAM");
//! assert!(validate::latitude("90.0001", false).is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// The kind of field a validator checks. Used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    IsoCountryCode,
    IsoRegionCode,
    IcaoAirportCode,
    IataAirportCode,
    RunwayCode,
    Latitude,
    Longitude,
    Elevation,
    RunwayLength,
    RunwayWidth,
    RunwayHeading,
    RunwayThreshold,
    RunwayLighted,
    RunwayClosed,
    Frequency,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::IsoCountryCode => "ISO Country Code",
            FieldKind::IsoRegionCode => "ISO Region Code",
            FieldKind::IcaoAirportCode => "ICAO Airport Code",
            FieldKind::IataAirportCode => "IATA Airport Code",
            FieldKind::RunwayCode => "Runway Code",
            FieldKind::Latitude => "Latitude",
            FieldKind::Longitude => "Longitude",
            FieldKind::Elevation => "Elevation",
            FieldKind::RunwayLength => "Runway Length",
            FieldKind::RunwayWidth => "Runway Width",
            FieldKind::RunwayHeading => "Runway Heading",
            FieldKind::RunwayThreshold => "Runway Threshold",
            FieldKind::RunwayLighted => "Runway Lighted",
            FieldKind::RunwayClosed => "Runway Closed",
            FieldKind::Frequency => "Frequency",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single field failed its format or range check.
///
/// Carries the field kind and the raw input so callers can attach row or
/// parameter context without re-parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}")]
pub struct ValidationError {
    pub kind: FieldKind,
    pub input: String,
}

impl ValidationError {
    fn new(kind: FieldKind, input: &str) -> Self {
        ValidationError {
            kind,
            input: input.to_owned(),
        }
    }
}

pub type Validated<T> = std::result::Result<T, ValidationError>;

// -----------------------------------------------------------------------------
// CODES
// -----------------------------------------------------------------------------

/// Character classes accepted inside a code (whitespace is always dropped).
#[derive(Debug, Clone, Copy)]
enum CodeClass {
    Letters,
    Alphanumeric,
    /// Letters, digits, hyphen and underscore.
    Identifier,
}

impl CodeClass {
    fn admits(self, c: char) -> bool {
        match self {
            CodeClass::Letters => c.is_alphabetic(),
            CodeClass::Alphanumeric => c.is_alphanumeric(),
            CodeClass::Identifier => c.is_alphanumeric() || c == '-' || c == '_',
        }
    }
}

/// Length policy for a code: `min` applies unless `partial`, `max` always.
#[derive(Debug, Clone, Copy)]
struct CodeLength {
    min: usize,
    max: Option<usize>,
}

fn normalize_code(
    raw: &str,
    kind: FieldKind,
    class: CodeClass,
    length: CodeLength,
    partial: bool,
    empty: bool,
) -> Validated<String> {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars().filter(|c| !c.is_whitespace()) {
        if !class.admits(c) {
            return Err(ValidationError::new(kind, raw));
        }
        out.extend(c.to_uppercase());
    }

    let len = out.chars().count();
    if len == 0 {
        return if empty {
            Ok(out)
        } else {
            Err(ValidationError::new(kind, raw))
        };
    }
    if len < length.min && !partial {
        return Err(ValidationError::new(kind, raw));
    }
    if length.max.is_some_and(|max| len > max) {
        return Err(ValidationError::new(kind, raw));
    }
    Ok(out)
}

/// Two-letter ISO 3166 country code (`nl` → `NL`).
pub fn iso_country_code(raw: &str, partial: bool, empty: bool) -> Validated<String> {
    normalize_code(
        raw,
        FieldKind::IsoCountryCode,
        CodeClass::Letters,
        CodeLength {
            min: 2,
            max: Some(2),
        },
        partial,
        empty,
    )
}

/// Composite ISO 3166-2 region code (`us-ca` → `US-CA`). No length limits
/// are known beyond being non-empty.
pub fn iso_region_code(raw: &str, partial: bool, empty: bool) -> Validated<String> {
    normalize_code(
        raw,
        FieldKind::IsoRegionCode,
        CodeClass::Identifier,
        CodeLength { min: 1, max: None },
        partial,
        empty,
    )
}

/// ICAO airport code, 2 to 4 letters or digits.
pub fn icao_airport_code(raw: &str, partial: bool, empty: bool) -> Validated<String> {
    normalize_code(
        raw,
        FieldKind::IcaoAirportCode,
        CodeClass::Alphanumeric,
        CodeLength {
            min: 2,
            max: Some(4),
        },
        partial,
        empty,
    )
}

/// IATA airport code, exactly 3 letters.
pub fn iata_airport_code(raw: &str, partial: bool, empty: bool) -> Validated<String> {
    normalize_code(
        raw,
        FieldKind::IataAirportCode,
        CodeClass::Letters,
        CodeLength {
            min: 3,
            max: Some(3),
        },
        partial,
        empty,
    )
}

/// Runway end identifier (`09L`, `H1`, `N-E`). No declared maximum length.
pub fn runway_code(raw: &str, partial: bool, empty: bool) -> Validated<String> {
    normalize_code(
        raw,
        FieldKind::RunwayCode,
        CodeClass::Identifier,
        CodeLength { min: 1, max: None },
        partial,
        empty,
    )
}

// -----------------------------------------------------------------------------
// NUMBERS & FLAGS
// -----------------------------------------------------------------------------

/// Parses a trimmed number. `Ok(None)` means the field was blank and blanks
/// are allowed.
fn parse_number(raw: &str, kind: FieldKind, empty: bool) -> Validated<Option<f64>> {
    let text = raw.trim();
    if text.is_empty() {
        return if empty {
            Ok(None)
        } else {
            Err(ValidationError::new(kind, raw))
        };
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ValidationError::new(kind, raw)),
    }
}

fn bounded_float(raw: &str, kind: FieldKind, empty: bool, min: f64, max: f64) -> Validated<f64> {
    match parse_number(raw, kind, empty)? {
        None => Ok(0.0),
        Some(v) if (min..=max).contains(&v) => Ok(v),
        Some(_) => Err(ValidationError::new(kind, raw)),
    }
}

fn bounded_int(raw: &str, kind: FieldKind, empty: bool, min: i32, max: i32) -> Validated<i32> {
    match parse_number(raw, kind, empty)? {
        None => Ok(0),
        Some(v) => {
            let truncated = v.trunc();
            if truncated < f64::from(min) || truncated > f64::from(max) {
                return Err(ValidationError::new(kind, raw));
            }
            // In range, so the cast cannot saturate.
            Ok(truncated as i32)
        }
    }
}

fn flag(raw: &str, kind: FieldKind, empty: bool) -> Validated<bool> {
    match raw.trim() {
        "" if empty => Ok(false),
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(ValidationError::new(kind, raw)),
    }
}

/// Latitude in degrees, `[-90, 90]`.
pub fn latitude(raw: &str, empty: bool) -> Validated<f64> {
    bounded_float(raw, FieldKind::Latitude, empty, -90.0, 90.0)
}

/// Longitude in degrees, `[-180, 180]`.
pub fn longitude(raw: &str, empty: bool) -> Validated<f64> {
    bounded_float(raw, FieldKind::Longitude, empty, -180.0, 180.0)
}

/// Elevation in feet, `[-45000, 30000]`.
pub fn elevation(raw: &str, empty: bool) -> Validated<i32> {
    bounded_int(raw, FieldKind::Elevation, empty, -45_000, 30_000)
}

/// Runway length in feet, `(0, 30000]`.
///
/// A length of zero is only meaningful as "unknown", so it is accepted only
/// when blanks are accepted.
pub fn runway_length(raw: &str, empty: bool) -> Validated<i32> {
    let length = bounded_int(raw, FieldKind::RunwayLength, empty, 0, 30_000)?;
    if length == 0 && !empty {
        return Err(ValidationError::new(FieldKind::RunwayLength, raw));
    }
    Ok(length)
}

/// Runway width in feet, `[0, 30000]`.
pub fn runway_width(raw: &str, empty: bool) -> Validated<i32> {
    bounded_int(raw, FieldKind::RunwayWidth, empty, 0, 30_000)
}

/// Runway heading in degrees, `[0, 360]`.
pub fn runway_heading(raw: &str, empty: bool) -> Validated<i32> {
    bounded_int(raw, FieldKind::RunwayHeading, empty, 0, 360)
}

/// Displaced threshold in feet, `[0, 30000]`.
pub fn runway_threshold(raw: &str, empty: bool) -> Validated<i32> {
    bounded_int(raw, FieldKind::RunwayThreshold, empty, 0, 30_000)
}

/// Literal `"1"` / `"0"` flag.
pub fn runway_lighted(raw: &str, empty: bool) -> Validated<bool> {
    flag(raw, FieldKind::RunwayLighted, empty)
}

/// Literal `"1"` / `"0"` flag.
pub fn runway_closed(raw: &str, empty: bool) -> Validated<bool> {
    flag(raw, FieldKind::RunwayClosed, empty)
}

/// Radio frequency in MHz, restricted to the civil aircraft band `[118, 137]`.
pub fn frequency(raw: &str, empty: bool) -> Validated<f64> {
    bounded_float(raw, FieldKind::Frequency, empty, 118.0, 137.0)
}

/// Presence-aware wrapper: a blank field is `None`, anything else must pass
/// `validator` with blanks disallowed.
///
/// Used for optional physical attributes so that "absent" is never stored
/// as a zero (an elevation of 0 ft is a real value).
pub fn optional<T>(raw: &str, validator: fn(&str, bool) -> Validated<T>) -> Validated<Option<T>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        validator(raw, false).map(Some)
    }
}
