//! Component integration tests.
//!
//! Wires the timer engines, alert sink, ambient sound and app state
//! together the way the dashboard does, using test doubles for time,
//! audio and alerts.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::time::Duration;

use clockdeck::alert::MockAlertSink;
use clockdeck::app::{App, Flow, TIMES_UP};
use clockdeck::config::AppConfig;
use clockdeck::engine::{CountdownEngine, StopwatchEngine, TimerEvent};
use clockdeck::services::{
    load_panels, ConfiguredLocation, MockQuoteProvider, MockWeatherProvider, PanelUpdate,
};
use clockdeck::shell::{parse_command, Command};
use clockdeck::sound::{AmbientSound, AmbientState, MockAmbientBackend};
use clockdeck::timing::{Countdown, ManualTimeSource};
use clockdeck::types::{QuoteData, RunState, Tab, WeatherData};

fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

/// Builds an app with a manual clock and a 2 s countdown.
fn create_app() -> (
    App<ManualTimeSource>,
    Arc<ManualTimeSource>,
    Arc<MockAlertSink>,
    MockAmbientBackend,
    mpsc::UnboundedReceiver<TimerEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let source = Arc::new(ManualTimeSource::new(0));
    let alert = Arc::new(MockAlertSink::new());
    let backend = MockAmbientBackend::new();

    let stopwatch = StopwatchEngine::new(source.clone(), tx.clone());
    let countdown = CountdownEngine::new(Countdown::with_duration(2_000), alert.clone(), tx);
    let app = App::new(
        &AppConfig::default(),
        stopwatch,
        countdown,
        AmbientSound::new(Box::new(backend.clone())),
    )
    .unwrap();

    (app, source, alert, backend, rx)
}

// ============================================================================
// Countdown + alert
// ============================================================================

mod countdown_alert_integration {
    use super::*;

    #[tokio::test]
    async fn test_countdown_completion_alerts_once_and_notifies() {
        let (mut app, _source, alert, _backend, mut rx) = create_app();
        app.dispatch(Command::SelectTab(Tab::Timer));
        assert_eq!(app.dispatch(Command::ToggleRun), Flow::Continue);

        tokio::time::sleep(Duration::from_millis(2_400)).await;

        let events = drain(&mut rx);
        assert!(events.contains(&TimerEvent::CountdownStarted { remaining_ms: 2_000 }));
        assert!(events.contains(&TimerEvent::CountdownTick { remaining_ms: 1_000 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == TimerEvent::CountdownCompleted)
                .count(),
            1
        );
        assert_eq!(alert.alert_count(), 1);

        for event in events {
            app.on_timer_event(event);
        }
        assert_eq!(app.frame().notice.as_deref(), Some(TIMES_UP));

        let countdown = app.countdown();
        assert_eq!(countdown.state(), RunState::Stopped);
        assert!(countdown.is_finished());
        assert_eq!(countdown.display(), "00:00");
    }

    #[tokio::test]
    async fn test_reset_after_completion_allows_restart() {
        let (mut app, _source, alert, _backend, _rx) = create_app();
        app.dispatch(Command::SelectTab(Tab::Timer));
        app.dispatch(Command::ToggleRun);
        tokio::time::sleep(Duration::from_millis(2_400)).await;

        app.dispatch(Command::ToggleRun);
        assert_eq!(app.countdown().state(), RunState::Stopped);

        app.dispatch(Command::Reset);
        assert_eq!(app.countdown().remaining_ms(), 2_000);
        app.dispatch(Command::ToggleRun);
        assert!(app.countdown().is_running());

        app.shutdown();
        assert_eq!(alert.alert_count(), 1);
    }

    #[tokio::test]
    async fn test_paused_countdown_keeps_remaining() {
        let (mut app, _source, alert, _backend, _rx) = create_app();
        app.dispatch(Command::SelectTab(Tab::Timer));
        app.dispatch(Command::ConfigureTimer {
            minutes: 0,
            seconds: 5,
        });
        app.dispatch(Command::ToggleRun);
        tokio::time::sleep(Duration::from_millis(1_300)).await;
        app.dispatch(Command::ToggleRun);

        let remaining = app.countdown().remaining_ms();
        assert_eq!(remaining, 4_000);
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        assert_eq!(app.countdown().remaining_ms(), remaining);
        assert_eq!(alert.alert_count(), 0);
    }
}

// ============================================================================
// Stopwatch
// ============================================================================

mod stopwatch_integration {
    use super::*;

    #[tokio::test]
    async fn test_laps_follow_manual_clock() {
        let (mut app, source, _alert, _backend, mut rx) = create_app();
        app.dispatch(Command::SelectTab(Tab::Stopwatch));
        app.dispatch(Command::ToggleRun);

        source.advance(1_250);
        tokio::time::sleep(Duration::from_millis(40)).await;
        app.dispatch(Command::Lap);

        source.advance(2_000);
        tokio::time::sleep(Duration::from_millis(40)).await;
        app.dispatch(Command::Lap);

        let stopwatch = app.stopwatch();
        let laps: Vec<u64> = stopwatch.laps().iter().map(|l| l.elapsed_ms).collect();
        assert_eq!(laps, vec![3_250, 1_250]);

        app.dispatch(Command::ToggleRun);
        assert_eq!(app.stopwatch().display(), "00:03.25");

        let events = drain(&mut rx);
        assert!(events.contains(&TimerEvent::LapRecorded {
            number: 2,
            elapsed_ms: 3_250
        }));
        assert!(events.iter().any(|e| e.is_tick()));
    }

    #[tokio::test]
    async fn test_reset_clears_laps() {
        let (mut app, source, _alert, _backend, _rx) = create_app();
        app.dispatch(Command::SelectTab(Tab::Stopwatch));
        app.dispatch(Command::ToggleRun);
        source.advance(500);
        tokio::time::sleep(Duration::from_millis(40)).await;
        app.dispatch(Command::Lap);
        app.dispatch(Command::Reset);

        let stopwatch = app.stopwatch();
        assert!(stopwatch.laps().is_empty());
        assert_eq!(stopwatch.elapsed_ms(), 0);
        assert_eq!(stopwatch.state(), RunState::Stopped);
    }
}

// ============================================================================
// Command line to app state
// ============================================================================

mod command_flow_integration {
    use super::*;

    fn run(app: &mut App<ManualTimeSource>, lines: &[&str]) -> Flow {
        for line in lines {
            let command = parse_command(line).unwrap();
            if app.dispatch(command) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    #[tokio::test]
    async fn test_typed_commands_drive_the_dashboard() {
        let (mut app, _source, _alert, backend, _rx) = create_app();

        let flow = run(&mut app, &["n", "n", "set 1 30", "theme ocean", "m", "q"]);

        assert_eq!(flow, Flow::Quit);
        let frame = app.frame();
        assert_eq!(frame.tab, Tab::Timer);
        assert_eq!(frame.theme_id, "ocean");
        assert_eq!(frame.countdown.duration_ms(), 90_000);
        assert!(frame.sound_on);
        assert_eq!(backend.create_count(), 1);
    }

    #[test]
    fn test_swipe_moves_between_tabs() {
        let (mut app, _source, _alert, _backend, _rx) = create_app();
        run(&mut app, &["swipe 300 100"]);
        assert_eq!(app.shell.tab, Tab::Stopwatch);
        run(&mut app, &["swipe 100 130"]);
        assert_eq!(app.shell.tab, Tab::Stopwatch);
        run(&mut app, &["swipe 100 300", "swipe 100 300"]);
        assert_eq!(app.shell.tab, Tab::Clock);
    }

    #[test]
    fn test_sound_toggle_reuses_backend() {
        let (mut app, _source, _alert, backend, _rx) = create_app();
        run(&mut app, &["m", "m", "m"]);

        assert!(app.sound_on());
        assert_eq!(backend.create_count(), 1);
        assert_eq!(backend.start_count(), 2);
        assert_eq!(backend.stop_count(), 1);

        app.shutdown();
        assert_eq!(backend.dispose_count(), 1);
    }

    #[test]
    fn test_sound_failure_is_silent() {
        let backend = MockAmbientBackend::new();
        backend.set_fail_create(true);
        let mut sound = AmbientSound::new(Box::new(backend.clone()));

        assert!(!sound.set_enabled(true));
        assert_eq!(sound.state(), AmbientState::Unavailable);
        assert!(!sound.set_enabled(true));
        assert_eq!(backend.create_count(), 1);
    }

    #[test]
    fn test_clock_sample_drives_frame() {
        let (mut app, _source, _alert, _backend, _rx) = create_app();
        let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        app.sample_clock(noon);

        let frame = app.frame();
        assert!(frame.digital.ends_with("PM"));
        assert_eq!(frame.world.len(), 5);
    }
}

// ============================================================================
// Panels
// ============================================================================

#[tokio::test]
async fn test_panels_reach_the_frame() {
    let (mut app, _source, _alert, _backend, _rx) = create_app();
    let weather = MockWeatherProvider::returning(WeatherData {
        temperature: -3.6,
        condition_code: 73,
        is_day: false,
    });
    let quotes = MockQuoteProvider::returning(QuoteData::new("Cold hands, warm tea.", "Yuki"));
    let (tx, mut rx) = mpsc::unbounded_channel();

    load_panels(&ConfiguredLocation(None), &weather, &quotes, 23, &tx).await;
    drop(tx);
    while let Some(update) = rx.recv().await {
        assert!(matches!(
            update,
            PanelUpdate::Weather(_) | PanelUpdate::Quote(_)
        ));
        app.on_panel(update);
    }

    let frame = app.frame();
    assert_eq!(frame.weather_line.as_deref(), Some("-4°C • Snow"));
    assert_eq!(frame.quote.author, "Yuki");
    assert_eq!(weather.call_count(), 1);
    assert_eq!(quotes.call_count(), 1);
}
