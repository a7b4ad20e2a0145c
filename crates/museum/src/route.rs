use crate::load::join_base;

/// Anchor of the timeline section on the home page.
pub const TIMELINE_FRAGMENT: &str = "timeline";

/// A location within the site, relative to the deployment base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The journey list. An optional fragment names an in-page anchor to scroll to.
    Home { fragment: Option<String> },
    /// A journey detail page.
    Journey { slug: String },
    NotFound,
}

impl Route {
    pub fn home() -> Self {
        Route::Home { fragment: None }
    }

    pub fn timeline() -> Self {
        Route::Home {
            fragment: Some(String::from(TIMELINE_FRAGMENT)),
        }
    }

    pub fn journey(slug: impl Into<String>) -> Self {
        Route::Journey { slug: slug.into() }
    }

    /// Resolve a request path (which may carry a query or a fragment) against the deployment
    /// base path.
    pub fn resolve(path: &str, base: &str) -> Route {
        let (path, fragment) = match path.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (path, None),
        };
        let path = path.split_once('?').map_or(path, |(path, _)| path);

        let base = base.trim_end_matches('/');
        let path = match path.strip_prefix(base) {
            // NOTE: Only strip the base when it ends on a segment boundary.
            Some(rest) if base.is_empty() || rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        };

        let segments: Vec<_> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments[..] {
            [] => Route::Home {
                fragment: fragment
                    .filter(|fragment| !fragment.is_empty())
                    .map(String::from),
            },
            [slug] => Route::Journey {
                slug: String::from(slug),
            },
            _ => Route::NotFound,
        }
    }

    /// The link to this route under the given base path. Journey pages are emitted as
    /// directories, so their links end in a slash.
    pub fn href(&self, base: &str) -> String {
        match self {
            Route::Home { fragment: None } => join_base(base, "/"),
            Route::Home {
                fragment: Some(fragment),
            } => join_base(base, &format!("/#{fragment}")),
            Route::Journey { slug } => join_base(base, &format!("{slug}/")),
            Route::NotFound => join_base(base, "404.html"),
        }
    }
}
