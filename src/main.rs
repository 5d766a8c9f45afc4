mod error_mapping;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use classy_core::{AppError, Config};
use classy_weather::{
    Endpoints, FilePreferenceStore, ForecastWorkflow, PendingLookup, WeatherProvider,
    WorkflowState,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

/// Look up a place and print its daily forecast.
///
/// Without --once, every line typed on stdin replaces the location, the way
/// editing the search field does. EOF quits.
#[derive(Debug, Parser)]
#[command(name = "classy", version)]
struct Cli {
    /// Place to look up (defaults to the last searched location)
    location: Option<String>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a single forecast and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    classy_core::init().map_err(AppError::from_anyhow)?;

    let (config, _) =
        Config::load_validated(cli.config.as_deref()).map_err(AppError::from_anyhow)?;
    let workflow = Arc::new(build_workflow(&config)?);

    println!("{}", render::TITLE);

    if cli.once {
        return Ok(run_once(&workflow, cli.location.as_deref()).await);
    }
    run_interactive(workflow, cli.location).await?;
    Ok(ExitCode::SUCCESS)
}

fn build_workflow(config: &Config) -> Result<ForecastWorkflow, AppError> {
    let provider = WeatherProvider::with_endpoints(
        Endpoints {
            geocoding: config.weather.geocoding_url.clone(),
            forecast: config.weather.forecast_url.clone(),
        },
        Duration::from_secs(config.weather.request_timeout_secs),
    )
    .map_err(|e| error_mapping::to_app_error(&e))?;
    let preferences = Arc::new(FilePreferenceStore::new(
        config.preferences_path(),
        config.weather.default_location.clone(),
    ));

    tracing::debug!("Preferences at {}", preferences.path().display());
    Ok(ForecastWorkflow::new(provider, preferences))
}

/// The rendered state already carries the error message, so a failure only
/// changes the exit code.
async fn run_once(workflow: &ForecastWorkflow, location: Option<&str>) -> ExitCode {
    let state = match location {
        Some(q) => workflow.set_query(q).await,
        None => workflow.start().await,
    };

    if let Some(text) = render::render_state(&state) {
        println!("{}", text);
    }

    match state {
        WorkflowState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

async fn run_interactive(
    workflow: Arc<ForecastWorkflow>,
    location: Option<String>,
) -> anyhow::Result<()> {
    let mut states = workflow.subscribe();
    let renderer = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if let Some(text) = render::render_state(&state) {
                println!("{}", text);
            }
        }
    });

    // Lookups run as separate tasks so a new line can supersede one in flight.
    // Queries are accepted before their task is spawned, so input order decides
    // which one wins.
    let mut lookups = JoinSet::new();
    let initial = match location.as_deref() {
        Some(q) => workflow.submit(q),
        None => workflow.submit_saved(),
    };
    spawn_lookup(&workflow, initial, &mut lookups);

    submit_lines(BufReader::new(tokio::io::stdin()), &workflow, &mut lookups)
        .await
        .context("Failed to read stdin")?;

    while let Some(joined) = lookups.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Lookup task failed: {}", e);
        }
    }

    // Closing the channel ends the renderer after its last update
    drop(workflow);
    renderer.await?;

    Ok(())
}

/// Submit each line of `input` as a query. `next_line` removes the `\n` or
/// `\r\n` terminator; the rest of the line is used as typed.
async fn submit_lines<R>(
    input: R,
    workflow: &Arc<ForecastWorkflow>,
    lookups: &mut JoinSet<WorkflowState>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        spawn_lookup(workflow, workflow.submit(&line), lookups);
    }
    Ok(())
}

fn spawn_lookup(
    workflow: &Arc<ForecastWorkflow>,
    pending: Option<PendingLookup>,
    lookups: &mut JoinSet<WorkflowState>,
) {
    if let Some(pending) = pending {
        let workflow = workflow.clone();
        lookups.spawn(async move { workflow.run(pending).await });
    }
}
