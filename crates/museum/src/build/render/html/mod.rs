mod views;

use anyhow::Context;
use handlebars::Handlebars;
use serde::Serialize;
use std::{
    collections::HashSet,
    fs,
    path::{Component, Path},
};

use super::{RenderContext, Renderer};
use crate::{error::Result, model::Journey};

use self::views::LayoutView;

const STYLESHEET: &str = include_str!("style.css");

/// Files the renderer writes at the top of the output directory.
const RESERVED_NAMES: [&str; 3] = ["index.html", "404.html", "style.css"];

/// Renders the site as static HTML: the home page, one directory per journey and a
/// not-found page.
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string("layout", include_str!("templates/layout.hbs"))?;
        registry.register_template_string("home", include_str!("templates/home.hbs"))?;
        registry.register_template_string("journey", include_str!("templates/journey.hbs"))?;
        registry.register_template_string("not_found", include_str!("templates/not_found.hbs"))?;

        Ok(Self { registry })
    }

    fn render_page(
        &self,
        ctx: &RenderContext,
        template: &str,
        data: &impl Serialize,
        page_title: Option<&str>,
    ) -> Result<String> {
        let content = self
            .registry
            .render(template, data)
            .with_context(|| format!("Failed to render the {template} template"))?;

        let mut layout = LayoutView::new(ctx, page_title, content);
        layout.is_home = template == "home";

        let page = self
            .registry
            .render("layout", &layout)
            .with_context(|| "Failed to render the page layout")?;

        Ok(page)
    }

    fn render_journey(&self, ctx: &RenderContext, journey: &Journey) -> Result<()> {
        if !is_page_slug(&journey.slug) {
            tracing::warn!(slug = %journey.slug, "skipping journey whose slug cannot name a page directory");
            return Ok(());
        }

        let view = views::journey(ctx, journey);
        let page = self.render_page(ctx, "journey", &view, Some(journey.title.as_str()))?;

        write_file(
            ctx.destination.join(&journey.slug).join("index.html"),
            &page,
        )
    }
}

impl Renderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn render(&self, ctx: RenderContext) -> Result<()> {
        fs::create_dir_all(&ctx.destination).with_context(|| {
            format!(
                "Unable to create output directory: {}",
                ctx.destination.display()
            )
        })?;

        let static_dir = ctx.root.join(&ctx.config.site.static_dir);
        if static_dir.is_dir() {
            copy_dir(&static_dir, &ctx.destination)?;
        }

        write_file(ctx.destination.join("style.css"), STYLESHEET)?;

        let home = views::home(&ctx);
        let page = self.render_page(&ctx, "home", &home, None)?;
        write_file(ctx.destination.join("index.html"), &page)?;

        // NOTE: Routing resolves a slug to its first journey, so only that one gets a page.
        let mut written = HashSet::new();
        for journey in &ctx.museum.journeys {
            if !written.insert(journey.slug.as_str()) {
                tracing::warn!(slug = %journey.slug, "skipping page for duplicate journey slug");
                continue;
            }

            self.render_journey(&ctx, journey)?;
        }

        let not_found = views::not_found(&ctx);
        let page = self.render_page(&ctx, "not_found", &not_found, Some("Lost in the fog"))?;
        write_file(ctx.destination.join("404.html"), &page)?;

        tracing::info!(
            pages = written.len() + 2,
            destination = %ctx.destination.display(),
            "rendered html"
        );

        Ok(())
    }
}

/// Slugs become directory names, so they must not climb out of the output directory nor
/// collide with the files written next to them.
fn is_page_slug(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    let single_segment = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    single_segment && !RESERVED_NAMES.contains(&slug)
}

fn write_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create directory: {}", parent.display()))?;
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote file");

    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)
        .with_context(|| format!("Unable to create directory: {}", to.display()))?;

    let entries =
        fs::read_dir(from).with_context(|| format!("Failed to read {}", from.display()))?;

    for entry in entries {
        let entry = entry?;
        let source = entry.path();
        let target = to.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir(&source, &target)?;
        } else {
            fs::copy(&source, &target)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
            tracing::debug!(path = %target.display(), "copied static file");
        }
    }

    Ok(())
}
