mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let level = cli.log_level();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("homebase_core={level},homebase_record={level}").into()
            }),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    app::run(cli).await
}
