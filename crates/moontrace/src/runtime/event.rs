use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::app::App;
use crate::runtime::{EventResult, key_handler};

pub(crate) fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<Event>,
    shutdown: Arc<AtomicBool>,
) {
    std::thread::spawn(move || {
        while !shutdown.load(Ordering::Relaxed) {
            match crossterm::event::poll(Duration::from_millis(250)) {
                Ok(true) => {
                    if let Ok(event) = crossterm::event::read()
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(error) => {
                    tracing::error!(%error, "terminal event polling failed");

                    break;
                }
            }
        }
    });
}

pub(crate) async fn process_events(
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    tick: &mut tokio::time::Interval,
) -> EventResult {
    enum LoopSignal {
        App(crate::app::AppEvent),
        Event(Option<Event>),
        Tick,
    }

    // Wake on a terminal event, an assistant update, or the redraw tick.
    let signal = tokio::select! {
        biased;
        event = event_rx.recv() => LoopSignal::Event(event),
        Some(app_event) = app.next_app_event() => LoopSignal::App(app_event),
        _ = tick.tick() => LoopSignal::Tick,
    };

    let maybe_event = match signal {
        LoopSignal::App(app_event) => {
            app.apply_app_events(app_event);

            None
        }
        LoopSignal::Event(event) => event,
        LoopSignal::Tick => None,
    };

    if matches!(process_event(app, maybe_event), EventResult::Quit) {
        return EventResult::Quit;
    }

    // Drain queued input before re-rendering so fast typing is not handled
    // one key per frame.
    while let Ok(event) = event_rx.try_recv() {
        if matches!(process_event(app, Some(event)), EventResult::Quit) {
            return EventResult::Quit;
        }
    }

    EventResult::Continue
}

fn process_event(app: &mut App, event: Option<Event>) -> EventResult {
    match event {
        Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            key_handler::handle_key_event(app, key)
        }
        Some(Event::Paste(text)) => {
            key_handler::handle_paste(app, &text);

            EventResult::Continue
        }
        _ => EventResult::Continue,
    }
}
