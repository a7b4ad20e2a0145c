//! Page view models. Everything the templates print is computed here, so the templates
//! stay free of logic.

use serde::Serialize;

use super::super::RenderContext;
use crate::{
    cmark, date,
    gallery::{GalleryControls, GalleryState},
    model::{Journey, JourneyEntry},
    progress::TimeSummary,
    route::Route,
    tracker,
};

#[derive(Debug, Serialize)]
pub struct LayoutView<'a> {
    pub site_title: &'a str,
    pub site_subtitle: &'a str,
    pub page_title: String,
    pub home_href: String,
    pub timeline_href: String,
    pub stylesheet_href: String,
    pub is_home: bool,
    pub content: String,
}

impl<'a> LayoutView<'a> {
    pub fn new(ctx: &'a RenderContext, page_title: Option<&str>, content: String) -> Self {
        let site = &ctx.config.site;
        let page_title = match page_title {
            Some(title) => format!("{title} · {}", site.title),
            None => site.title.clone(),
        };

        Self {
            site_title: &site.title,
            site_subtitle: &site.subtitle,
            page_title,
            home_href: Route::home().href(&site.base_path),
            timeline_href: Route::timeline().href(&site.base_path),
            stylesheet_href: crate::load::join_base(&site.base_path, "style.css"),
            is_home: false,
            content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeView<'a> {
    pub title: &'a str,
    pub quote: &'a str,
    pub exhibition_end_label: Option<String>,
    pub timeline: TimelineView<'a>,
}

#[derive(Debug, Serialize)]
pub struct TimelineView<'a> {
    pub start_label: String,
    pub end_label: String,
    pub percent: u8,
    /// Fill of the vertical track, driven by the active item.
    pub track_progress: f64,
    pub items: Vec<TimelineItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TimelineItem<'a> {
    pub id: &'a str,
    pub href: String,
    pub title: &'a str,
    pub mission: &'a str,
    pub short_description: &'a str,
    pub accent: &'a str,
    pub background: &'a str,
    pub cover_art: Option<&'a str>,
    pub is_active: bool,
}

pub fn home(ctx: &RenderContext) -> HomeView<'_> {
    let site = &ctx.config.site;
    let timeline = &ctx.config.timeline;
    let (start, end) = timeline.range();
    let summary = TimeSummary::new(start, end, ctx.now);

    let journeys = &ctx.museum.journeys;
    let ids: Vec<_> = journeys.iter().map(|journey| journey.id.as_str()).collect();
    // NOTE: Before any scrolling happens the first journey is the active one.
    let active = ids.first().copied();

    let items = journeys
        .iter()
        .map(|journey| TimelineItem {
            id: &journey.id,
            href: Route::journey(&journey.slug).href(&site.base_path),
            title: &journey.title,
            mission: &journey.mission,
            short_description: &journey.short_description,
            accent: &journey.accent,
            background: &journey.background,
            cover_art: journey.cover_art.as_deref(),
            is_active: active == Some(journey.id.as_str()),
        })
        .collect();

    HomeView {
        title: &site.title,
        quote: &site.quote,
        exhibition_end_label: timeline
            .first_exhibition_end
            .map(|end| date::label(&date::midnight(end))),
        timeline: TimelineView {
            start_label: summary.start_label.clone(),
            end_label: summary.end_label.clone(),
            percent: summary.percent(),
            track_progress: tracker::track_progress(active, &ids),
            items,
        },
    }
}

#[derive(Debug, Serialize)]
pub struct JourneyView<'a> {
    pub title: &'a str,
    pub mission: &'a str,
    pub background: &'a str,
    pub accent: &'a str,
    pub start_label: String,
    pub end_label: String,
    /// Width of the progress bar, in percent.
    pub completion: f64,
    pub short_description: &'a str,
    pub long_description_html: String,
    pub anchors: &'a [String],
    pub home_href: String,
    pub timeline_href: String,
    pub entries: Vec<EntryView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EntryView<'a> {
    pub id: &'a str,
    pub anchor: String,
    pub class_name: String,
    pub date_label: String,
    pub title: Option<&'a str>,
    pub text_html: Option<String>,
    pub image: Option<ImageView<'a>>,
    pub highlight: bool,
    /// Link opening the gallery at its first image. Only set for entries with images.
    pub gallery_href: Option<String>,
    pub gallery_label: String,
    pub slides: Vec<SlideView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ImageView<'a> {
    pub src: &'a str,
    pub alt: &'a str,
}

/// One gallery overlay, addressed by its fragment and showing a single image.
#[derive(Debug, Serialize)]
pub struct SlideView<'a> {
    pub anchor: String,
    pub close_href: String,
    pub src: String,
    pub alt: String,
    pub show_stage: bool,
    pub show_arrows: bool,
    pub previous_href: String,
    pub next_href: String,
    pub show_thumbnails: bool,
    pub thumbnails: Vec<ThumbnailView>,
    pub entry_title: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ThumbnailView {
    pub href: String,
    pub src: String,
    pub alt: String,
    pub label: String,
    pub is_active: bool,
}

pub fn journey<'a>(ctx: &'a RenderContext, journey: &'a Journey) -> JourneyView<'a> {
    let base = &ctx.config.site.base_path;
    let summary = journey.time_summary(&ctx.config.timeline, ctx.now);

    JourneyView {
        title: &journey.title,
        mission: &journey.mission,
        background: &journey.background,
        accent: &journey.accent,
        start_label: summary.start_label.clone(),
        end_label: summary.end_label.clone(),
        completion: summary.completion * 100.0,
        short_description: &journey.short_description,
        long_description_html: cmark::to_html(&journey.long_description),
        anchors: &journey.anchors,
        home_href: Route::home().href(base),
        timeline_href: Route::timeline().href(base),
        entries: journey.entries.iter().map(entry).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundView {
    pub home_href: String,
}

pub fn not_found(ctx: &RenderContext) -> NotFoundView {
    NotFoundView {
        home_href: Route::home().href(&ctx.config.site.base_path),
    }
}

fn entry_anchor(entry: &JourneyEntry) -> String {
    format!("entry-{}", entry.id)
}

fn slide_anchor(entry: &JourneyEntry, index: usize) -> String {
    format!("entry-{}-{}", entry.id, index)
}

fn entry(entry: &JourneyEntry) -> EntryView<'_> {
    let mut class_name = format!(
        "journey__entry journey__entry--columns-{} journey__entry--rows-{}",
        entry.columns(),
        entry.rows()
    );
    if entry.highlight {
        class_name.push_str(" journey__entry--highlight");
    }

    let image = entry.image.as_ref().map(|image| ImageView {
        src: &image.src,
        alt: image
            .alt
            .as_deref()
            .or(entry.title.as_deref())
            .unwrap_or("Journey entry image"),
    });

    let gallery_label = match &entry.title {
        Some(title) => format!("Open entry details for {title}"),
        None => String::from("Open entry details"),
    };

    let slides = slides(entry);
    let gallery_href = slides.first().map(|slide| format!("#{}", slide.anchor));

    EntryView {
        id: &entry.id,
        anchor: entry_anchor(entry),
        class_name,
        date_label: entry.date_label(),
        title: entry.title.as_deref(),
        text_html: entry.text.as_deref().map(cmark::to_html),
        image,
        highlight: entry.highlight,
        gallery_href,
        gallery_label,
        slides,
    }
}

fn slide_href(entry: &JourneyEntry, state: GalleryState<'_>) -> String {
    state
        .index()
        .map(|index| format!("#{}", slide_anchor(entry, index)))
        .unwrap_or_default()
}

/// One overlay per gallery image. Navigation links are the gallery transitions taken from
/// that image, so following them browses the gallery cyclically.
fn slides(entry: &JourneyEntry) -> Vec<SlideView<'_>> {
    let images = entry.gallery_images();
    let len = images.len();
    let opened = GalleryState::Closed.open(entry);
    let controls = GalleryControls::for_len(len);

    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let current = opened.jump_to(index);

            let thumbnails = images
                .iter()
                .enumerate()
                .map(|(target, thumbnail)| ThumbnailView {
                    href: slide_href(entry, current.jump_to(target)),
                    src: thumbnail.src.clone(),
                    alt: thumbnail
                        .alt
                        .clone()
                        .unwrap_or_else(|| String::from("Journey entry thumbnail")),
                    label: match &thumbnail.alt {
                        Some(alt) => format!("View {alt}"),
                        None => format!("View image {} of {}", target + 1, len),
                    },
                    is_active: target == index,
                })
                .collect();

            SlideView {
                anchor: slide_anchor(entry, index),
                close_href: format!("#{}", entry_anchor(entry)),
                src: image.src.clone(),
                alt: image
                    .alt
                    .clone()
                    .unwrap_or_else(|| String::from("Journey entry visual")),
                show_stage: controls.stage,
                show_arrows: controls.arrows,
                previous_href: slide_href(entry, current.previous()),
                next_href: slide_href(entry, current.next()),
                show_thumbnails: controls.thumbnails,
                thumbnails,
                entry_title: entry.title.as_deref(),
            }
        })
        .collect()
}
