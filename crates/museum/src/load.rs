//! Turns the static journey records into the normalized [`Museum`] model.
//!
//! Asset references in the records are either absolute URLs or paths relative to the site
//! root. Relative ones are prefixed with the deployment base path exactly once, here, so
//! everything downstream can use them as-is.

use anyhow::Context;
use std::{collections::HashSet, fs, path::Path};

use crate::{
    error::Result,
    model::{EntryImage, Journey, JourneyEntry, Museum},
};

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http:") || path.starts_with("https:")
}

/// Join a base path and a path with exactly one separating slash.
pub fn join_base(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);

    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Rewrite an asset path against the deployment base path.
///
/// Absolute `http`/`https` URLs are returned unchanged. Missing or empty paths have no asset.
pub fn with_base(base: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|path| !path.is_empty())?;

    if is_absolute_url(path) {
        return Some(String::from(path));
    }

    Some(join_base(base, path))
}

/// Normalize raw journey records against the deployment base path.
pub fn journeys(records: Vec<Journey>, base: &str) -> Vec<Journey> {
    let journeys: Vec<_> = records
        .into_iter()
        .map(|journey| normalize_journey(journey, base))
        .collect();

    check_journeys(&journeys);

    journeys
}

fn normalize_journey(journey: Journey, base: &str) -> Journey {
    let cover_art = with_base(base, journey.cover_art.as_deref());
    let entries = journey
        .entries
        .into_iter()
        .map(|entry| normalize_entry(entry, base))
        .collect();

    Journey {
        cover_art,
        entries,
        ..journey
    }
}

fn normalize_entry(entry: JourneyEntry, base: &str) -> JourneyEntry {
    let images = entry
        .images
        .iter()
        .filter_map(|src| with_base(base, Some(src)))
        .collect();
    let image = entry.image.and_then(|image| {
        with_base(base, Some(&image.src)).map(|src| EntryImage { src, ..image })
    });

    JourneyEntry {
        images,
        image,
        ..entry
    }
}

/// The data source is trusted, but some shapes make for a broken site. Point them out
/// without refusing to build.
fn check_journeys(journeys: &[Journey]) {
    let mut slugs = HashSet::new();

    for journey in journeys {
        if !slugs.insert(journey.slug.as_str()) {
            tracing::warn!(
                slug = %journey.slug,
                "duplicate journey slug, only the first journey will be reachable"
            );
        }

        let start = crate::date::parse(&journey.start_date);
        let end = crate::date::parse(&journey.end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                tracing::warn!(
                    slug = %journey.slug,
                    "journey ends before it starts, its progress will stay at zero"
                );
            }
        }
    }
}

/// Parse a JSON array of journey records and normalize it.
pub fn from_str(source: &str, base: &str) -> Result<Museum> {
    let records: Vec<Journey> =
        serde_json::from_str(source).with_context(|| "Attempted to parse invalid journey data")?;

    Ok(Museum::new(journeys(records, base)))
}

/// Load journey records from a JSON file on disk and normalize them.
pub fn from_file(path: impl AsRef<Path>, base: &str) -> Result<Museum> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to open journey data: {}", path.display()))?;

    let museum = from_str(&source, base)
        .with_context(|| format!("Failed to load journey data: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        journeys = museum.journeys.len(),
        "loaded journey data"
    );

    Ok(museum)
}
