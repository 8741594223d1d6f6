// crates/geography-core/src/fetch.rs

//! Opening CSV sources: local files (gzip-transparent for `.gz` under
//! `compact`) and, with the `fetch` feature, `http(s)://` URLs.

use crate::error::{GeoError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Opens a local CSV file.
pub fn open_file(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)
        .map_err(|e| GeoError::unreadable(path.display().to_string(), e))?;
    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    if path.extension().is_some_and(|ext| ext == "gz") {
        return Ok(Box::new(GzDecoder::new(reader)));
    }

    Ok(Box::new(reader))
}

/// Opens `location`, downloading it first when it is a URL.
pub fn open_source(location: &str) -> Result<Box<dyn Read>> {
    if is_url(location) {
        download(location)
    } else {
        open_file(Path::new(location))
    }
}

#[cfg(feature = "fetch")]
fn download(url: &str) -> Result<Box<dyn Read>> {
    tracing::info!(url, "downloading source");
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| GeoError::unreadable(url, e))?;
    let body = response.bytes().map_err(|e| GeoError::unreadable(url, e))?;
    tracing::debug!(url, bytes = body.len(), "source downloaded");
    Ok(Box::new(std::io::Cursor::new(body)))
}

#[cfg(not(feature = "fetch"))]
fn download(url: &str) -> Result<Box<dyn Read>> {
    Err(GeoError::unreadable(
        url,
        "URL sources need the 'fetch' feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_a_source_error() {
        let err = open_source("/nonexistent/countries.csv").err().unwrap();
        assert!(matches!(err, GeoError::Source { .. }));
    }

    #[test]
    fn reads_plain_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,code").unwrap();
        let mut text = String::new();
        open_file(file.path()).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "id,code\n");
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gz_files_are_decompressed() {
        use flate2::{write::GzEncoder, Compression};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.csv.gz");
        let mut gz = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        gz.write_all(b"id,code\n1,NL\n").unwrap();
        gz.finish().unwrap();

        let mut text = String::new();
        open_file(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "id,code\n1,NL\n");
    }
}
