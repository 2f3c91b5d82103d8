use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use barometer::config::AppConfig;
use barometer::site::{build_site, BuildContext};

#[derive(Parser)]
#[command(name = "barometer", about = "Static status dashboards for an open-source ecosystem")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    tracing::info!(
        projects_file = %config.site.projects_file.display(),
        templates_dir = %config.site.templates_dir.display(),
        output_dir = %config.site.output_dir.display(),
        "Starting site build"
    );

    let ctx = BuildContext::new(config)?;
    let summary = build_site(&ctx).await?;

    tracing::info!(
        projects = summary.projects,
        pages = summary.pages_written,
        fetch_failures = summary.fetch_failures,
        "Site build complete"
    );

    Ok(())
}
