//! clockdeck - a terminal clock dashboard
//!
//! A digital or analog clock for a chosen timezone, world clocks, a
//! stopwatch, a countdown timer, themes, an ambient drone, and weather and
//! quote panels.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};

use clockdeck::app::{run_dashboard, App};
use clockdeck::cli::{ClockArgs, Cli, Commands, DashboardArgs, Display, WeatherArgs};
use clockdeck::clock::{digital_time, parse_timezone, ClockDisplay, ClockFields, HandAngles};
use clockdeck::config::AppConfig;
use clockdeck::services::{
    fallback_quote, fetch_weather_or_fallback, load_panels, weather_summary, ConfiguredLocation,
    GeminiQuoteClient, OpenMeteoClient, PanelUpdate,
};
use clockdeck::sound::AmbientSound;
use clockdeck::types::{ClockMode, Coordinates, QuoteData, WeatherData};
use clockdeck::TerminalBell;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug and the default is
/// warn. Logs go to stderr so they never mix with dashboard frames.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("failed to load configuration")
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Dashboard(args)) => {
            let config = load_config(config_path)?;
            dashboard(config, args).await?;
        }
        Some(Commands::Clock(args)) => {
            let config = load_config(config_path)?;
            print!("{}", clock(&config, &args)?);
        }
        Some(Commands::World) => {
            let config = load_config(config_path)?;
            let mut display = ClockDisplay::new(
                parse_timezone(&config.timezone)?,
                config.timezone_label.clone(),
                &config.cities,
            )?;
            display.sample(Utc::now());
            print!("{}", Display::render_world(&display.world_rows()));
        }
        Some(Commands::Weather(args)) => {
            let config = load_config(config_path)?;
            let weather = weather(&config, &args).await;
            println!(
                "{} ({})",
                weather_summary(&weather),
                if weather.is_day { "day" } else { "night" }
            );
        }
        Some(Commands::Quote) => {
            let config = load_config(config_path)?;
            print!("{}", Display::render_quote(&quote(&config).await));
        }
        Some(Commands::Themes) => {
            let config = load_config(config_path)?;
            print!("{}", Display::render_themes(&config.theme));
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

async fn dashboard(config: AppConfig, args: DashboardArgs) -> Result<()> {
    let (mut app, events) = App::from_config(
        &config,
        Arc::new(TerminalBell::new()),
        AmbientSound::rodio(),
    )?;

    if let Some(tab) = args.tab {
        app.shell.tab = tab.into();
    }
    if args.analog {
        app.shell.clock_mode = ClockMode::Analog;
    }
    app.sample_clock(Utc::now());

    run_dashboard(app, events, config, args.offline).await
}

fn clock(config: &AppConfig, args: &ClockArgs) -> Result<String> {
    let (tz, label) = match &args.tz {
        Some(name) => (parse_timezone(name)?, name.clone()),
        None => (
            parse_timezone(&config.timezone)?,
            config.timezone_label.clone(),
        ),
    };
    let now = Utc::now();

    let mut out = String::new();
    if args.analog {
        let hands = HandAngles::from_fields(ClockFields::observe(now, tz));
        for line in Display::render_dial(&hands) {
            out.push_str(&line);
            out.push('\n');
        }
    } else {
        out.push_str(&digital_time(now, tz));
        out.push('\n');
    }
    out.push_str(&format!(
        "{} · {}\n",
        label,
        now.with_timezone(&tz).format("%A, %B %-d")
    ));
    Ok(out)
}

async fn weather(config: &AppConfig, args: &WeatherArgs) -> WeatherData {
    let coords = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
        _ => config.coordinates(),
    };
    if !config.services.enabled {
        return WeatherData::FALLBACK;
    }
    match OpenMeteoClient::from_config(&config.services) {
        Ok(client) => fetch_weather_or_fallback(&client, coords).await,
        Err(e) => {
            tracing::warn!("Failed to build weather client: {}", e);
            WeatherData::FALLBACK
        }
    }
}

async fn quote(config: &AppConfig) -> QuoteData {
    if !config.services.enabled {
        return fallback_quote();
    }
    let clients = OpenMeteoClient::from_config(&config.services).and_then(|weather| {
        GeminiQuoteClient::from_config(&config.services).map(|quotes| (weather, quotes))
    });
    let (weather, quotes) = match clients {
        Ok(clients) => clients,
        Err(e) => {
            tracing::warn!("Failed to build HTTP clients: {}", e);
            return fallback_quote();
        }
    };

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let hour = ClockFields::from_time(&chrono::Local::now()).hour;
    load_panels(
        &ConfiguredLocation(config.location),
        &weather,
        &quotes,
        hour,
        &tx,
    )
    .await;
    drop(tx);

    let mut result = fallback_quote();
    while let Some(update) = rx.recv().await {
        if let PanelUpdate::Quote(quote) = update {
            result = quote;
        }
    }
    result
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
