use std::path::PathBuf;

use clap::Parser;

use trivia_api::configuration::get_configuration;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Alternate configuration file
    #[clap(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let settings = get_configuration(cli.config.as_deref())?;
    let pool = db::establish_connection(&settings.database.path).await?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(&settings.application, pool).await
}
