pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, Paths};

#[derive(Parser, Debug)]
#[command(name = "rss2email", version)]
#[command(about = "Email new entries from a list of feeds", long_about = None)]
pub struct Cli {
    /// Log progress for every feed and entry
    #[arg(short, long)]
    pub verbose: bool,

    /// Feed list to read instead of ~/.rss2email/feeds
    #[arg(long)]
    pub feeds: Option<PathBuf>,

    /// Directory for seen markers instead of ~/.rss2email/seen
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Config file instead of ~/.rss2email/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Default filter directive when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "rss2email=debug"
        } else {
            "rss2email=warn"
        }
    }

    /// `~/.rss2email` layout with any command-line overrides applied.
    pub fn paths(&self) -> Result<Paths, ConfigError> {
        let mut paths = Paths::under(&Paths::default_root()?);
        if let Some(feeds) = &self.feeds {
            paths.feeds = feeds.clone();
        }
        if let Some(state_dir) = &self.state_dir {
            paths.seen_dir = state_dir.clone();
        }
        if let Some(config) = &self.config {
            paths.config = config.clone();
        }
        Ok(paths)
    }
}
