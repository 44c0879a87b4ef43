//! GrubDash API server
//!
//! ```text
//! grub_dash                      # config/dev.yaml, port from config
//! grub_dash --env prod --port 8080
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use grub_dash::config::AppConfig;
use grub_dash::gateway::handlers::VERSION;

#[derive(Parser, Debug)]
#[command(name = "grub_dash", version = VERSION, about = "GrubDash dishes and orders API")]
struct Cli {
    /// Config environment; loads `<config-dir>/<env>.yaml`
    #[arg(short, long, default_value = "dev")]
    env: String,

    /// Directory holding the YAML config files
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.config_dir, &cli.env)?;
    let _log_guard = grub_dash::logging::init_logging(&app_config);

    tracing::info!("Starting GrubDash {} in {} mode", VERSION, cli.env);

    // Fixture paths in the config are relative to the working directory
    let state = grub_dash::seed::build_state(&app_config.seed, ".")?;

    let port = cli.port.unwrap_or(app_config.server.port);
    grub_dash::gateway::run_server(&app_config.server.host, port, Arc::new(state)).await
}
