//! Lectern CLI entry point.

use anyhow::Result;
use clap::Parser;
use lectern::cli::{commands, log_directive, Cli, Commands};
use lectern::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let directive = log_directive(
        cli.verbose,
        &settings.general.log_level,
        std::env::var("RUST_LOG").ok(),
    );

    tracing_subscriber::registry()
        .with(EnvFilter::new(directive))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Study {
            input,
            text,
            id,
            format,
            max_notes,
            questions,
            output,
        } => {
            commands::run_study(
                input.clone(),
                text.clone(),
                id.clone(),
                format,
                *max_notes,
                *questions,
                output.clone(),
                &settings,
            )
            .await?;
        }

        Commands::Faculty {
            topic,
            team,
            api_key,
            serpapi_key,
            model,
            output_dir,
            no_save,
        } => {
            commands::run_faculty(
                topic,
                *team,
                api_key.clone(),
                serpapi_key.clone(),
                model.clone(),
                output_dir.clone(),
                *no_save,
                settings,
            )
            .await?;
        }

        Commands::Agents => {
            commands::run_agents(&settings)?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
