use chrono::{TimeZone, Utc};
use museum::build::MuseumBuilder;
use std::{fs, path::Path};
use tempfile::TempDir;

mod common;

fn render_site() -> TempDir {
    let output = tempfile::tempdir().expect("failed to create temp dir");
    let mut museum_builder = MuseumBuilder::load(common::test_dir()).expect("failed to load museum");

    museum_builder
        .with_now(Utc.with_ymd_and_hms(2025, 10, 21, 0, 0, 0).unwrap())
        .with_destination(output.path());
    museum_builder.build().expect("failed to build museum");

    output
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|_| panic!("missing output file {}", path.as_ref().display()))
}

#[test]
fn it_writes_every_page() {
    let output = render_site();
    let root = output.path();

    for page in [
        "index.html",
        "marathon/index.html",
        "piano/index.html",
        "404.html",
        "style.css",
        "images/README.txt",
    ] {
        assert!(root.join(page).is_file(), "{page} was not written");
    }
}

#[test]
fn it_renders_the_timeline() {
    let output = render_site();
    let index = read(output.path().join("index.html"));

    assert!(index.contains("Charting every attempt from Sep 21, 2025 to Sep 21, 2026."));
    assert!(index.contains("--progressPerc: 8%"));
    assert!(index.contains(r#"href="/fog/marathon/""#));
    assert!(index.contains(r#"href="/fog/style.css""#));
    assert!(index.contains("Dec 31, 2025"));
    assert_eq!(1, index.matches("is-active").count());
    assert!(!index.contains("data-root-margin"));
}

#[test]
fn it_highlights_hovered_and_focused_timeline_items() {
    let output = render_site();
    let style = read(output.path().join("style.css"));

    assert!(style.contains(
        ".timeline__item.is-active,\n.timeline__item:hover,\n.timeline__item:focus-within {"
    ));
}

fn render_journeys(journeys: &str) -> (TempDir, TempDir) {
    let site = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(site.path().join("journeys.json"), journeys).expect("failed to write journeys");

    let output = tempfile::tempdir().expect("failed to create temp dir");
    let mut museum_builder = MuseumBuilder::load(site.path()).expect("failed to load museum");
    museum_builder.with_destination(output.path());
    museum_builder.build().expect("failed to build museum");

    (site, output)
}

#[test]
fn it_publishes_the_first_journey_for_a_duplicate_slug() {
    let (_site, output) = render_journeys(
        r#"[
            { "id": "one", "slug": "same", "title": "First Journey" },
            { "id": "two", "slug": "same", "title": "Second Journey" }
        ]"#,
    );
    let page = read(output.path().join("same/index.html"));

    assert!(page.contains("First Journey"));
    assert!(!page.contains("Second Journey"));
}

#[test]
fn it_skips_slugs_that_shadow_generated_files() {
    let (_site, output) = render_journeys(
        r#"[
            { "id": "bad", "slug": "404.html", "title": "Shadow" },
            { "id": "good", "slug": "good", "title": "Good Journey" }
        ]"#,
    );

    assert!(read(output.path().join("404.html")).contains("Lost in the fog"));
    assert!(read(output.path().join("good/index.html")).contains("Good Journey"));
}

#[test]
fn it_renders_journey_pages() {
    let output = render_site();
    let marathon = read(output.path().join("marathon/index.html"));

    assert!(marathon.contains("Run a Marathon"));
    assert!(marathon.contains("<em>injuries</em>"));
    assert!(marathon.contains("journey__entry--columns-2"));
    assert!(marathon.contains("Undated"));
    assert!(marathon.contains(r#"id="entry-first-long-run-0""#));
    assert!(marathon.contains(r#"id="entry-first-long-run-1""#));
    assert!(!marathon.contains(r#"id="entry-first-long-run-2""#));
    assert!(marathon.contains(r#"id="entry-shin-splints-0""#));

    let piano = read(output.path().join("piano/index.html"));
    assert!(piano.contains("No entries logged yet. Check back soon."));
}

#[test]
fn it_renders_the_not_found_page() {
    let output = render_site();
    let not_found = read(output.path().join("404.html"));

    assert!(not_found.contains("Lost in the fog"));
    assert!(not_found.contains(r#"href="/fog/""#));
}
