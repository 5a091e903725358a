use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rss2email::app::AppContext;
use rss2email::cli::{commands, Cli};
use rss2email::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let paths = cli.paths()?;
    let config = Config::load(&paths.config)?;
    let ctx = AppContext::new(paths, config)?;

    commands::run(&ctx).await?;

    Ok(())
}
