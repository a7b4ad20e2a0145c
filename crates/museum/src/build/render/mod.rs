mod command;
mod html;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{config::Config, error::Result, model::Museum};

pub use command::*;
pub use html::*;

pub trait Renderer {
    fn name(&self) -> &str;

    fn render(&self, ctx: RenderContext) -> Result<()>;
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderContext {
    /// The root directory of the site, where museum.toml lives.
    pub root: PathBuf,
    /// The directory where the renderer **must** put its output.
    /// This directory is not guaranteed to be empty nor to exist.
    pub destination: PathBuf,
    /// The configuration of the site.
    pub config: Config,
    /// The normalized site content.
    pub museum: Museum,
    /// The instant progress is measured against.
    pub now: DateTime<Utc>,
}

impl RenderContext {
    pub fn new(
        root: PathBuf,
        destination: PathBuf,
        config: Config,
        museum: Museum,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            root,
            destination,
            config,
            museum,
            now,
        }
    }
}
