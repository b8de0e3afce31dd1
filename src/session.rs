use std::time::{Duration, Instant};

use crate::config::SessionConfig;
use crate::emotion::{EmotionCategory, MASK_GLYPH, PROMPT_GLYPH, READY_GLYPH};
use crate::present::{FeedbackTone, HighlightKind, Presenter};
use crate::random::Picker;
use crate::summary::{summarize, SessionSummary};
use crate::timers::{Clock, TimerAction, TimerRegistry};
use crate::trial::{Phase, TrialRecord};

/// Pause between a resolved round and the next stimulus, so feedback
/// stays readable before the stage changes again.
pub const INTER_ROUND_DELAY_MS: u64 = 650;

/// Round state machine for one session.
///
/// Owns all session state exclusively; collaborators only hear about it
/// through the [`Presenter`] passed into each entry point. Delayed phase
/// transitions go through the timer registry and fire from `poll`, which
/// the event loop calls every tick. There is no response timeout: once a
/// round awaits a response it waits indefinitely.
pub struct Session<P: Picker, C: Clock> {
    config: SessionConfig,
    phase: Phase,
    round_index: u32,
    score: u32,
    target: Option<EmotionCategory>,
    response_started_at: Option<Instant>,
    history: Vec<TrialRecord>,
    timers: TimerRegistry,
    picker: P,
    clock: C,
}

impl<P: Picker, C: Clock> Session<P, C> {
    pub fn new(config: SessionConfig, picker: P, clock: C) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            round_index: 0,
            score: 0,
            target: None,
            response_started_at: None,
            history: Vec::new(),
            timers: TimerRegistry::new(),
            picker,
            clock,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn history(&self) -> &[TrialRecord] {
        &self.history
    }

    pub fn current_target(&self) -> Option<EmotionCategory> {
        self.target
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    pub fn summary(&self) -> SessionSummary {
        summarize(&self.history)
    }

    /// Starts (or restarts) a session with a fresh config.
    ///
    /// Outstanding timers are cancelled before anything else so that no
    /// transition from an abandoned session can fire into the new one.
    pub fn start(&mut self, config: SessionConfig, presenter: &mut dyn Presenter) {
        self.timers.cancel_all();

        self.config = config;
        self.phase = Phase::Idle;
        self.round_index = 0;
        self.score = 0;
        self.target = None;
        self.response_started_at = None;
        self.history.clear();

        presenter.reset_choices();
        presenter.set_feedback("", FeedbackTone::Neutral);
        presenter.update_latency(None);
        presenter.show_glyph(READY_GLYPH);
        presenter.set_response_enabled(false);
        presenter.update_status(0, self.config.total_rounds, 0);

        self.advance(presenter);
    }

    /// Runs whatever scheduled transitions have come due.
    pub fn poll(&mut self, presenter: &mut dyn Presenter) {
        let now = self.clock.now();
        for action in self.timers.due(now) {
            self.apply(action, presenter);
        }
    }

    /// Submits a choice. Accepted only while awaiting a response;
    /// anything else is silently ignored and leaves the session as-is.
    pub fn choose(
        &mut self,
        chosen: EmotionCategory,
        presenter: &mut dyn Presenter,
    ) -> Option<TrialRecord> {
        if self.phase != Phase::AwaitingResponse {
            return None;
        }
        let target = self.target?;

        self.phase = Phase::Resolved;
        presenter.set_response_enabled(false);

        let now = self.clock.now();
        let rt_ms = self
            .response_started_at
            .map(|start| round_ms(now.saturating_duration_since(start)))
            .unwrap_or(0);
        self.response_started_at = None;

        let correct = chosen == target;
        if correct {
            self.score += 1;
        }

        let record = TrialRecord {
            round: self.round_index,
            target,
            chosen,
            correct,
            rt_ms,
        };
        self.history.push(record);

        presenter.update_latency(Some(rt_ms));
        presenter.update_status(self.round_index, self.config.total_rounds, self.score);
        presenter.highlight_choice(target, HighlightKind::Correct);
        if correct {
            presenter.set_feedback("correct!", FeedbackTone::Ok);
        } else {
            presenter.highlight_choice(chosen, HighlightKind::Wrong);
            presenter.set_feedback(
                &format!("wrong, it was {}", target.label()),
                FeedbackTone::Bad,
            );
        }

        self.timers.schedule(
            now,
            Duration::from_millis(INTER_ROUND_DELAY_MS),
            TimerAction::NextRound,
        );

        Some(record)
    }

    /// Begins the next round, or ends the session when the round count
    /// is exhausted.
    fn advance(&mut self, presenter: &mut dyn Presenter) {
        if self.round_index == self.config.total_rounds {
            self.finish(presenter);
            return;
        }

        presenter.reset_choices();
        presenter.set_feedback("", FeedbackTone::Neutral);
        presenter.update_latency(None);
        presenter.set_response_enabled(false);

        self.round_index += 1;
        presenter.update_status(self.round_index, self.config.total_rounds, self.score);

        let target = self.picker.pick(&EmotionCategory::ALL);
        let glyph = self.picker.pick(target.glyphs());
        self.target = Some(target);

        self.phase = Phase::StimulusShown;
        presenter.show_glyph(glyph);
        self.timers.schedule(
            self.clock.now(),
            Duration::from_millis(self.config.stimulus_duration_ms),
            TimerAction::ShowMask,
        );
    }

    fn apply(&mut self, action: TimerAction, presenter: &mut dyn Presenter) {
        match action {
            TimerAction::ShowMask => {
                self.phase = Phase::Masked;
                // A zero mask duration shows nothing but still passes
                // through the masked phase.
                if self.config.mask_duration_ms > 0 {
                    presenter.show_glyph(MASK_GLYPH);
                } else {
                    presenter.show_glyph("");
                }
                self.timers.schedule(
                    self.clock.now(),
                    Duration::from_millis(self.config.mask_duration_ms),
                    TimerAction::OpenResponse,
                );
            }
            TimerAction::OpenResponse => {
                self.phase = Phase::AwaitingResponse;
                presenter.show_prompt(PROMPT_GLYPH);
                self.response_started_at = Some(self.clock.now());
                presenter.set_response_enabled(true);
            }
            TimerAction::NextRound => self.advance(presenter),
        }
    }

    fn finish(&mut self, presenter: &mut dyn Presenter) {
        self.phase = Phase::Finished;
        self.target = None;
        presenter.set_response_enabled(false);

        let summary = self.summary();
        presenter.set_feedback(
            &format!("session over! accuracy {}%", summary.accuracy_percent),
            FeedbackTone::Ok,
        );
        presenter.render_summary(&summary);
    }
}

/// Rounded, non-negative milliseconds.
fn round_ms(d: Duration) -> u64 {
    (d.as_secs_f64() * 1000.0).round() as u64
}
