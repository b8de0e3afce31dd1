use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// What the event loop sees each iteration. A quiet interval surfaces
/// as `Tick`; every phase transition in a session matures on a timer,
/// so ticks are events in their own right, not the absence of one.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where the loop pulls its next event from, at the cadence it asks
/// for. Implementations fold "nothing arrived within `wait`" into
/// `Tick` so timer polling never stalls behind input.
pub trait EventSource {
    fn next_event(&mut self, wait: Duration) -> io::Result<AppEvent>;
}

/// Production source reading crossterm's input stream directly.
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next_event(&mut self, wait: Duration) -> io::Result<AppEvent> {
        if !event::poll(wait)? {
            return Ok(AppEvent::Tick);
        }
        match event::read()? {
            CtEvent::Key(key) => Ok(AppEvent::Key(key)),
            CtEvent::Resize(_, _) => Ok(AppEvent::Resize),
            // Mouse/focus noise still counts as a tick so the loop
            // keeps its polling cadence.
            _ => Ok(AppEvent::Tick),
        }
    }
}

/// Scripted source for headless tests. Pops queued events in order and
/// reports `Tick` once the queue runs dry, never blocking.
#[derive(Debug, Default)]
pub struct TestEventSource {
    queue: VecDeque<AppEvent>,
}

impl TestEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AppEvent) {
        self.queue.push_back(event);
    }
}

impl EventSource for TestEventSource {
    fn next_event(&mut self, _wait: Duration) -> io::Result<AppEvent> {
        Ok(self.queue.pop_front().unwrap_or(AppEvent::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::present::RecordingPresenter;
    use crate::random::ScriptedPicker;
    use crate::session::Session;
    use crate::timers::ManualClock;
    use crate::trial::Phase;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_empty_source_yields_ticks() {
        let mut events = TestEventSource::new();
        assert!(matches!(
            events.next_event(Duration::from_millis(1)).unwrap(),
            AppEvent::Tick
        ));
    }

    #[test]
    fn test_queued_events_come_out_in_order() {
        let mut events = TestEventSource::new();
        events.push(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('1'),
            KeyModifiers::NONE,
        )));
        events.push(AppEvent::Resize);

        let wait = Duration::from_millis(1);
        assert!(matches!(events.next_event(wait).unwrap(), AppEvent::Key(_)));
        assert!(matches!(events.next_event(wait).unwrap(), AppEvent::Resize));
        assert!(matches!(events.next_event(wait).unwrap(), AppEvent::Tick));
    }

    #[test]
    fn test_ticks_drive_session_timer_polling() {
        let config = SessionConfig {
            stimulus_duration_ms: 30,
            mask_duration_ms: 30,
            total_rounds: 1,
        };
        let clock = ManualClock::new();
        let mut session = Session::new(config, ScriptedPicker::new([]), clock.clone());
        let mut presenter = RecordingPresenter::new();
        session.start(config, &mut presenter);

        // Four quiet 15ms intervals carry the round through stimulus
        // and mask into the response window.
        let mut events = TestEventSource::new();
        let tick = Duration::from_millis(15);
        for _ in 0..4 {
            if let AppEvent::Tick = events.next_event(tick).unwrap() {
                clock.advance(tick);
                session.poll(&mut presenter);
            }
        }
        assert_eq!(session.phase(), Phase::AwaitingResponse);
    }
}
