//! Interactive dashboard event loop.
//!
//! One `tokio::select!` loop multiplexes:
//! - the 1 s wall-clock sampler
//! - the 5 s visitor simulation
//! - stopwatch and countdown engine events
//! - the weather/quote loader
//! - commands typed on stdin
//! - Ctrl+C
//!
//! Frames are redrawn at most every [`RENDER_INTERVAL`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{interval, interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{App, Flow};
use crate::cli::Display;
use crate::config::AppConfig;
use crate::engine::TimerEvent;
use crate::services::{
    fallback_quote, load_panels, ConfiguredLocation, GeminiQuoteClient, OpenMeteoClient,
    PanelUpdate,
};
use crate::shell::parse_command;
use crate::types::WeatherData;

/// Wall-clock sampling period.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);
/// Visitor simulation period.
pub const VISITOR_INTERVAL: Duration = Duration::from_secs(5);
/// Minimum time between two redraws.
pub const RENDER_INTERVAL: Duration = Duration::from_millis(50);

/// ANSI: clear screen and move the cursor home.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Reads stdin lines on a dedicated thread, outside the tokio blocking
/// pool, so a pending read never holds up runtime shutdown. The channel
/// closes at end of input.
fn spawn_stdin_reader() -> Result<mpsc::UnboundedReceiver<std::io::Result<String>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("clockdeck-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        })
        .context("failed to spawn stdin reader")?;
    Ok(rx)
}

/// Fetches the weather and quote panels, or sends fallbacks when network
/// access is off.
async fn load_initial_panels(
    config: AppConfig,
    offline: bool,
    hour: u32,
    tx: mpsc::UnboundedSender<PanelUpdate>,
) {
    if offline || !config.services.enabled {
        debug!("Services disabled, using fallback panels");
        let _ = tx.send(PanelUpdate::Weather(WeatherData::FALLBACK));
        let _ = tx.send(PanelUpdate::Quote(fallback_quote()));
        return;
    }

    let clients = OpenMeteoClient::from_config(&config.services).and_then(|weather| {
        GeminiQuoteClient::from_config(&config.services).map(|quotes| (weather, quotes))
    });
    match clients {
        Ok((weather, quotes)) => {
            let location = ConfiguredLocation(config.location);
            load_panels(&location, &weather, &quotes, hour, &tx).await;
        }
        Err(e) => {
            warn!("Failed to build HTTP clients, using fallback panels: {}", e);
            let _ = tx.send(PanelUpdate::Weather(WeatherData::FALLBACK));
            let _ = tx.send(PanelUpdate::Quote(fallback_quote()));
        }
    }
}

fn draw(app: &App) -> Result<()> {
    let frame = Display::render_frame(&app.frame());
    let mut out = std::io::stdout().lock();
    write!(out, "{}{}", CLEAR, frame).context("failed to write frame")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

/// Runs the interactive dashboard until the user quits, stdin closes or
/// Ctrl+C is pressed.
pub async fn run_dashboard(
    mut app: App,
    mut timer_events: mpsc::UnboundedReceiver<TimerEvent>,
    config: AppConfig,
    offline: bool,
) -> Result<()> {
    info!("Dashboard started");

    if config.ambient_sound {
        app.set_sound(true);
    }

    let (panel_tx, mut panel_rx) = mpsc::unbounded_channel();
    let loader = load_initial_panels(config, offline, app.clock.local_hour(), panel_tx);
    tokio::pin!(loader);
    let mut loader_done = false;

    let mut clock_tick = interval(CLOCK_INTERVAL);
    clock_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut visitor_tick = interval_at(Instant::now() + VISITOR_INTERVAL, VISITOR_INTERVAL);
    let mut render_tick = interval(RENDER_INTERVAL);
    render_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut input = spawn_stdin_reader()?;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut rng = rand::thread_rng();
    draw(&app)?;
    let mut dirty = false;

    loop {
        tokio::select! {
            _ = clock_tick.tick() => {
                app.sample_clock(Utc::now());
                dirty = true;
            }
            _ = visitor_tick.tick() => {
                let count = app.step_visitors(&mut rng);
                debug!(count, "Visitor count updated");
                dirty = true;
            }
            Some(event) = timer_events.recv() => {
                dirty |= app.on_timer_event(event);
            }
            () = &mut loader, if !loader_done => {
                loader_done = true;
            }
            Some(update) = panel_rx.recv() => {
                app.on_panel(update);
                dirty = true;
            }
            line = input.recv() => {
                match line.transpose().context("failed to read stdin")? {
                    Some(line) => {
                        match parse_command(&line) {
                            Some(command) => {
                                if app.dispatch(command) == Flow::Quit {
                                    break;
                                }
                            }
                            None => app.notify(format!(
                                "Unknown command '{}', type h for help",
                                line.trim()
                            )),
                        }
                        dirty = true;
                    }
                    None => {
                        debug!("stdin closed");
                        break;
                    }
                }
            }
            _ = render_tick.tick() => {
                if dirty {
                    draw(&app)?;
                    dirty = false;
                }
            }
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl+C")?;
                info!("Interrupted");
                break;
            }
        }
    }

    app.shutdown();
    info!("Dashboard stopped");
    Ok(())
}
