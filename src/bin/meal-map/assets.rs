//! Bundled sample data and listing file loading.

use meal_map::Listing;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Embeds the sample listings from the assets/ directory into the binary.
/// In debug mode they are read from the filesystem instead.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

const SAMPLE_LISTINGS: &str = "listings.ron";

/// Errors that can occur when loading listings.
#[derive(Error, Debug)]
pub enum ListingLoadError {
    #[error("listings.ron not found in embedded assets")]
    SampleNotFound,
    #[error("invalid UTF-8 in listings.ron: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Ron {
        origin: String,
        source: ron::de::SpannedError,
    },
    #[error("failed to parse {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },
    #[error("unsupported listings format for {} (expected .ron or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Loads listings from `path`, or the bundled sample when no path is given.
pub fn load_listings(path: Option<&Path>) -> Result<Vec<Listing>, ListingLoadError> {
    let listings = match path {
        Some(path) => load_listings_file(path)?,
        None => load_sample_listings()?,
    };
    log::info!("Loaded {} listings", listings.len());
    Ok(listings)
}

fn load_sample_listings() -> Result<Vec<Listing>, ListingLoadError> {
    let file = Assets::get(SAMPLE_LISTINGS).ok_or(ListingLoadError::SampleNotFound)?;
    let source = std::str::from_utf8(&file.data)?;
    parse_ron(source, SAMPLE_LISTINGS)
}

fn load_listings_file(path: &Path) -> Result<Vec<Listing>, ListingLoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    if !matches!(extension.as_deref(), Some("ron" | "json")) {
        return Err(ListingLoadError::UnsupportedFormat(path.to_path_buf()));
    }

    let source = std::fs::read_to_string(path).map_err(|source| ListingLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();

    match extension.as_deref() {
        Some("json") => parse_json(&source, &origin),
        _ => parse_ron(&source, &origin),
    }
}

fn parse_ron(source: &str, origin: &str) -> Result<Vec<Listing>, ListingLoadError> {
    ron::from_str(source).map_err(|source| ListingLoadError::Ron {
        origin: origin.to_owned(),
        source,
    })
}

fn parse_json(source: &str, origin: &str) -> Result<Vec<Listing>, ListingLoadError> {
    serde_json::from_str(source).map_err(|source| ListingLoadError::Json {
        origin: origin.to_owned(),
        source,
    })
}
