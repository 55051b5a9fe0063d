pub mod api;
pub mod cli;
pub mod clients;
pub mod comparison;
pub mod config;
pub mod domain;
pub mod models;
pub mod services;

use anyhow::Context;
pub use cli::Cli;
use cli::Commands;
pub use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    if cli.needs_config() {
        config.validate()?;
    }

    init_tracing(&config);

    let Some(command) = cli.command else {
        print_help();
        return Ok(());
    };

    match command {
        Commands::Compare {
            user_a,
            user_b,
            format,
        } => cli::cmd_compare(&config, &user_a, &user_b, format).await,

        Commands::Web => {
            let prometheus_handle = install_metrics_recorder(&config)?;
            cli::cmd_web(config, prometheus_handle).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let (json_layer, text_layer) = if config.general.json_logs {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn install_metrics_recorder(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

fn print_help() {
    println!("AniDiff - Compare two AniList users' anime lists");
    println!();
    println!("USAGE:");
    println!("  anidiff <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  compare <user_a> <user_b> [--format text|json]");
    println!("                    Show what both users have seen, what only one");
    println!("                    has seen, and what both plan to watch");
    println!("  web               Start the HTTP server");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  anidiff compare alice bob          # Compare two users");
    println!("  anidiff compare alice bob -f json  # Same, as JSON");
    println!("  anidiff web                        # Serve GET /api/compare");
}
