use anyhow::Context;
use shlex::Shlex;
use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use super::{RenderContext, Renderer};
use crate::error::Result;

/// Hands the render context, as JSON on stdin, to an external program.
pub struct CommandRenderer {
    name: String,
    command: String,
}

impl CommandRenderer {
    pub fn new(name: String, command: String) -> Self {
        Self { name, command }
    }

    fn build_command(&self, root: &Path) -> Result<Command> {
        let mut parts = Shlex::new(&self.command);
        let Some(bin) = parts.next() else {
            anyhow::bail!("Provided command string was empty");
        };

        let bin = PathBuf::from(bin);
        let bin = if bin.components().count() == 1 {
            // NOTE: Search for the binary in PATH.
            bin
        } else {
            // NOTE: Search for the binary relative to the site root.
            root.join(bin)
        };

        let mut command = Command::new(bin);
        command.args(parts).current_dir(root);

        Ok(command)
    }
}

impl Renderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, ctx: RenderContext) -> Result<()> {
        tracing::info!(renderer = %self.name, command = %self.command, "running external renderer");

        let mut process = self
            .build_command(&ctx.root)?
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Unable to start renderer {}", self.name))?;

        let Some(mut stdin) = process.stdin.take() else {
            anyhow::bail!("Renderer {} has no stdin", self.name);
        };

        let written = serde_json::to_writer(&mut stdin, &ctx)
            .map_err(anyhow::Error::from)
            .and_then(|_| stdin.flush().map_err(anyhow::Error::from));

        // NOTE: Explicitly drop stdin to close it, even when writing failed.
        drop(stdin);

        let status = process.wait()?;
        written.with_context(|| format!("Failed to send the site to renderer {}", self.name))?;

        if !status.success() {
            anyhow::bail!("Renderer {} failed ({}).", self.name, status);
        }

        Ok(())
    }
}
