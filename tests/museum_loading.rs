use crate::common::TestRenderer;
use museum::{
    build::MuseumBuilder,
    model::{EntryImage, View},
    route::Route,
};

mod common;

#[test]
fn it_loads_the_museum_as_expected() {
    let renderer = TestRenderer::default();
    let mut museum_builder = MuseumBuilder::load(common::test_dir()).expect("failed to load museum");

    museum_builder.with_renderer(renderer.clone());
    museum_builder.build().expect("failed to build museum");

    let museum = renderer.museum();
    let slugs: Vec<_> = museum.journeys.iter().map(|journey| journey.slug.as_str()).collect();

    assert_eq!(vec!["marathon", "piano"], slugs);
    assert_eq!(2, museum.journeys[0].entries.len());
    assert!(museum.journeys[1].entries.is_empty());
}

#[test]
fn it_rewrites_relative_assets_against_the_base_path() {
    let museum_builder = MuseumBuilder::load(common::test_dir()).expect("failed to load museum");
    let museum = museum_builder.museum();

    let marathon = museum.by_slug("marathon").expect("marathon should exist");
    assert_eq!(Some("/fog/images/marathon.png"), marathon.cover_art.as_deref());

    let first = &marathon.entries[0];
    assert_eq!(
        vec![
            String::from("/fog/images/run-1.png"),
            String::from("https://cdn.example.com/run-2.png"),
        ],
        first.images
    );

    let second = &marathon.entries[1];
    assert_eq!(
        Some(EntryImage {
            src: String::from("/fog/images/physio.png"),
            alt: Some(String::from("Physio notes")),
        }),
        second.image
    );

    let piano = museum.by_slug("piano").expect("piano should exist");
    assert_eq!(
        Some("https://cdn.example.com/piano.png"),
        piano.cover_art.as_deref()
    );
}

#[test]
fn it_resolves_routes_to_views() {
    let museum_builder = MuseumBuilder::load(common::test_dir()).expect("failed to load museum");
    let museum = museum_builder.museum();
    let base = &museum_builder.config().site.base_path;

    assert_eq!(View::Home, museum.view(&Route::resolve("/fog/", base)));
    assert_eq!(View::Home, museum.view(&Route::resolve("/fog/#timeline", base)));

    let View::Journey(journey) = museum.view(&Route::resolve("/fog/piano/", base)) else {
        panic!("piano should resolve to its journey page")
    };
    assert_eq!("Learn the Piano", journey.title);

    assert_eq!(View::NotFound, museum.view(&Route::resolve("/fog/unknown", base)));
    assert_eq!(View::NotFound, museum.view(&Route::resolve("/fog/piano/extra", base)));
}

#[test]
fn it_keeps_undated_entries() {
    let museum_builder = MuseumBuilder::load(common::test_dir()).expect("failed to load museum");
    let marathon = museum_builder
        .museum()
        .by_slug("marathon")
        .expect("marathon should exist");

    assert_eq!("Oct 5, 2025", marathon.entries[0].date_label());
    assert_eq!("Undated", marathon.entries[1].date_label());
}
