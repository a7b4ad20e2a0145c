use anyhow::Result;
use clap::{Parser, Subcommand};
use museum::{build::MuseumBuilder, config::Config, date};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the site into its build directory.
    Build {
        #[clap(default_value = ".")]
        root: PathBuf,
        /// Write output here instead of the configured build directory
        #[clap(short, long)]
        dest: Option<PathBuf>,
        /// Override the path the site is deployed under
        #[clap(short, long)]
        base_path: Option<String>,
        /// Compute progress for this instant (YYYY-MM-DD or RFC 3339) instead of now
        #[clap(long)]
        now: Option<String>,
    },
    /// Print every journey with its completion.
    List {
        #[clap(default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Build {
            root,
            dest,
            base_path,
            now,
        } => {
            let mut config = Config::discover(&root)?;
            if let Some(base_path) = base_path {
                config.site.base_path = base_path;
            }

            let mut builder = MuseumBuilder::load_with_config(root, config)?;
            if let Some(now) = now {
                let Some(now) = date::parse(&now) else {
                    anyhow::bail!("Unable to parse --now value: {now}");
                };
                builder.with_now(now);
            }
            if let Some(dest) = dest {
                builder.with_destination(dest);
            }

            builder.build()?;
        }
        Commands::List { root } => {
            let builder = MuseumBuilder::load(root)?;
            let timeline = &builder.config().timeline;

            for journey in &builder.museum().journeys {
                let summary = journey.time_summary(timeline, builder.now());
                println!(
                    "{:<24} {:<40} {:>3} entries {:>3}%",
                    journey.slug,
                    journey.title,
                    journey.entries.len(),
                    summary.percent()
                );
            }
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .without_time()
        .init();
}
