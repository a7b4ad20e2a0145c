use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::TimelineConfig, date, progress::TimeSummary};

/// A `Journey` is one long-running goal, rendered as a single timeline item on the home page
/// and as its own detail page.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    /// Stable identifier, used to track the active timeline item.
    pub id: String,
    /// URL slug of the detail page. Expected to be unique across journeys.
    pub slug: String,
    pub title: String,
    /// Raw start date. Empty when the journey spans the whole timeline.
    #[serde(default)]
    pub start_date: String,
    /// Raw end date. Empty when the journey spans the whole timeline.
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub short_description: String,
    /// Longer narrative, written in CommonMark.
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub mission: String,
    /// Short reminders listed beside the narrative.
    #[serde(default)]
    pub anchors: Vec<String>,
    /// Cover art asset. `None` when the record has no usable path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    /// CSS background used behind the journey hero.
    #[serde(default)]
    pub background: String,
    /// CSS color token used to accent the journey.
    #[serde(default)]
    pub accent: String,
    /// The journey's log, in the order given by the data source.
    #[serde(default)]
    pub entries: Vec<JourneyEntry>,
}

impl Journey {
    /// The journey's date range, falling back to the overall timeline for any missing or
    /// unparseable bound.
    pub fn range(&self, timeline: &TimelineConfig) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = timeline.range();
        let start = date::parse(&self.start_date).unwrap_or(start);
        let end = date::parse(&self.end_date).unwrap_or(end);

        (start, end)
    }

    pub fn time_summary(&self, timeline: &TimelineConfig, now: DateTime<Utc>) -> TimeSummary {
        let (start, end) = self.range(timeline);

        TimeSummary::new(start, end, now)
    }
}

/// An image attached directly to an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One image of an entry's gallery, paired with its alt text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub alt: Option<String>,
}

fn one() -> u8 {
    1
}

/// A single dated update in a journey's log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JourneyEntry {
    pub id: String,
    /// Raw entry date. May be missing or unparseable, in which case the entry is "Undated".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Entry body, written in CommonMark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EntryImage>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Grid column span hint.
    #[serde(default = "one")]
    pub columns: u8,
    /// Grid row span hint.
    #[serde(default = "one")]
    pub rows: u8,
    #[serde(default)]
    pub highlight: bool,
}

impl Default for JourneyEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            entry_date: None,
            title: None,
            text: None,
            image: None,
            images: Vec::new(),
            columns: 1,
            rows: 1,
            highlight: false,
        }
    }
}

impl JourneyEntry {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.entry_date.as_deref().and_then(date::parse)
    }

    /// Display label for the entry date, `Undated` when it is missing or invalid.
    pub fn date_label(&self) -> String {
        date::label_or_undated(self.entry_date.as_deref())
    }

    /// Column span clamped to the supported `1..=2`.
    pub fn columns(&self) -> u8 {
        self.columns.clamp(1, 2)
    }

    /// Row span clamped to the supported `1..=2`.
    pub fn rows(&self) -> u8 {
        self.rows.clamp(1, 2)
    }

    /// Number of images in the entry's gallery.
    pub fn gallery_len(&self) -> usize {
        self.images.len() + usize::from(self.image.is_some())
    }

    /// The gallery image set: the image sequence (captioned with the entry title) followed by
    /// the single entry image, if any.
    pub fn gallery_images(&self) -> Vec<GalleryImage> {
        let sequence = self.images.iter().map(|src| GalleryImage {
            src: src.clone(),
            alt: self.title.clone(),
        });
        let single = self.image.iter().map(|image| GalleryImage {
            src: image.src.clone(),
            alt: image.alt.clone(),
        });

        sequence.chain(single).collect()
    }
}
