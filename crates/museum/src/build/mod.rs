use chrono::{DateTime, Utc};
use std::path::PathBuf;
use toml::Value;

use crate::{config::Config, error::Result, load, model::Museum};

use self::render::{CommandRenderer, HtmlRenderer, RenderContext, Renderer};

pub mod render;

// - When a new MuseumBuilder is loaded
//    - Load config (or fall back to the defaults)
//    - Load the journey data and normalize asset paths against the base path
// - When build is called
//    - Configure renderers from [output], unless some were given explicitly
//    - Run every renderer against the same, immutable museum

pub struct MuseumBuilder {
    root: PathBuf,
    config: Config,
    museum: Museum,
    now: DateTime<Utc>,
    destination: Option<PathBuf>,
    renderers: Vec<Box<dyn Renderer>>,
}

impl MuseumBuilder {
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = Config::discover(&root)?;

        MuseumBuilder::load_with_config(root, config)
    }

    pub fn load_with_config(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();
        let data = root.join(&config.site.data);
        let museum = load::from_file(data, &config.site.base_path)?;

        tracing::info!(
            root = %root.display(),
            journeys = museum.journeys.len(),
            "loaded museum"
        );

        let builder = Self {
            root,
            config,
            museum,
            now: Utc::now(),
            destination: None,
            renderers: Vec::new(),
        };

        Ok(builder)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn museum(&self) -> &Museum {
        &self.museum
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Add a renderer. Once any renderer is added, the `[output]` configuration is ignored.
    pub fn with_renderer(&mut self, renderer: impl Renderer + 'static) -> &mut Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Pin the instant progress bars are computed for.
    pub fn with_now(&mut self, now: DateTime<Utc>) -> &mut Self {
        self.now = now;
        self
    }

    /// Write output somewhere other than the configured build directory.
    pub fn with_destination(&mut self, destination: impl Into<PathBuf>) -> &mut Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn build(self) -> Result<()> {
        let renderers = if self.renderers.is_empty() {
            configured_renderers(&self.config)?
        } else {
            self.renderers
        };

        let destination = self
            .destination
            .unwrap_or_else(|| self.root.join(&self.config.site.build_dir));

        for renderer in &renderers {
            // NOTE: A single renderer owns the whole build directory.
            let destination = if renderers.len() == 1 {
                destination.clone()
            } else {
                destination.join(renderer.name())
            };

            tracing::info!(
                renderer = renderer.name(),
                destination = %destination.display(),
                "rendering"
            );

            let ctx = RenderContext::new(
                self.root.clone(),
                destination,
                self.config.clone(),
                self.museum.clone(),
                self.now,
            );
            renderer.render(ctx)?;
        }

        Ok(())
    }
}

fn configured_renderers(config: &Config) -> Result<Vec<Box<dyn Renderer>>> {
    let outputs = config.outputs();
    if outputs.is_empty() {
        return Ok(vec![Box::new(HtmlRenderer::new()?)]);
    }

    let mut renderers: Vec<Box<dyn Renderer>> = Vec::new();
    for (name, table) in outputs {
        match table.get("command") {
            Some(Value::String(command)) => {
                renderers.push(Box::new(CommandRenderer::new(name, command.clone())));
            }
            Some(_) => anyhow::bail!("The command of renderer {name} must be a string"),
            None if name == "html" => renderers.push(Box::new(HtmlRenderer::new()?)),
            None => anyhow::bail!("Unknown renderer {name} has no command"),
        }
    }

    Ok(renderers)
}
