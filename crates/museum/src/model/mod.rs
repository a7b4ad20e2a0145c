mod journey;

pub use journey::*;

use serde::{Deserialize, Serialize};

use crate::route::Route;

/// The normalized, in-memory content of the site. Built once by the loader and never
/// mutated afterwards.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Museum {
    /// Journeys in timeline order.
    pub journeys: Vec<Journey>,
}

/// The view a route resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Home,
    Journey(&'a Journey),
    NotFound,
}

impl Museum {
    pub fn new(journeys: Vec<Journey>) -> Self {
        Self { journeys }
    }

    /// Find the first journey with the given slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Journey> {
        self.journeys.iter().find(|journey| journey.slug == slug)
    }

    /// Pick the view for a route. Unknown slugs land on the not-found view.
    pub fn view(&self, route: &Route) -> View<'_> {
        match route {
            Route::Home { .. } => View::Home,
            Route::Journey { slug } => self.by_slug(slug).map_or(View::NotFound, View::Journey),
            Route::NotFound => View::NotFound,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }
}
