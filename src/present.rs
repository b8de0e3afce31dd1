use crate::emotion::EmotionCategory;
use crate::summary::SessionSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTone {
    Ok,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Correct,
    Wrong,
}

/// Presentation collaborator consumed by the session core.
///
/// The TUI implements this on its view model; tests implement it with
/// recording/null stand-ins. The core never touches widgets directly.
pub trait Presenter {
    /// Puts a glyph on the stage (stimulus, mask, or ready text).
    fn show_glyph(&mut self, text: &str);
    /// Puts the response prompt on the stage.
    fn show_prompt(&mut self, text: &str);
    fn set_feedback(&mut self, text: &str, tone: FeedbackTone);
    fn highlight_choice(&mut self, category: EmotionCategory, kind: HighlightKind);
    /// Clears all choice highlights between rounds.
    fn reset_choices(&mut self);
    /// Latest measured response latency, or None when not yet measured.
    fn update_latency(&mut self, rt_ms: Option<u64>);
    fn render_summary(&mut self, summary: &SessionSummary);
    fn update_status(&mut self, round: u32, total: u32, score: u32);
    fn set_response_enabled(&mut self, enabled: bool);
}

/// Presenter that drops everything; for headless runs that only care
/// about session state.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_glyph(&mut self, _text: &str) {}
    fn show_prompt(&mut self, _text: &str) {}
    fn set_feedback(&mut self, _text: &str, _tone: FeedbackTone) {}
    fn highlight_choice(&mut self, _category: EmotionCategory, _kind: HighlightKind) {}
    fn reset_choices(&mut self) {}
    fn update_latency(&mut self, _rt_ms: Option<u64>) {}
    fn render_summary(&mut self, _summary: &SessionSummary) {}
    fn update_status(&mut self, _round: u32, _total: u32, _score: u32) {}
    fn set_response_enabled(&mut self, _enabled: bool) {}
}

/// Presenter that records what the core asked for; the unit and
/// integration tests assert against these fields.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub glyphs: Vec<String>,
    pub prompts: Vec<String>,
    pub feedback: Vec<(String, FeedbackTone)>,
    pub highlights: Vec<(EmotionCategory, HighlightKind)>,
    pub choice_resets: usize,
    pub latencies: Vec<Option<u64>>,
    pub summaries: Vec<SessionSummary>,
    pub statuses: Vec<(u32, u32, u32)>,
    pub response_enabled: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_glyph(&self) -> Option<&str> {
        self.glyphs.last().map(String::as_str)
    }
}

impl Presenter for RecordingPresenter {
    fn show_glyph(&mut self, text: &str) {
        self.glyphs.push(text.to_string());
    }

    fn show_prompt(&mut self, text: &str) {
        self.prompts.push(text.to_string());
    }

    fn set_feedback(&mut self, text: &str, tone: FeedbackTone) {
        self.feedback.push((text.to_string(), tone));
    }

    fn highlight_choice(&mut self, category: EmotionCategory, kind: HighlightKind) {
        self.highlights.push((category, kind));
    }

    fn reset_choices(&mut self) {
        self.highlights.clear();
        self.choice_resets += 1;
    }

    fn update_latency(&mut self, rt_ms: Option<u64>) {
        self.latencies.push(rt_ms);
    }

    fn render_summary(&mut self, summary: &SessionSummary) {
        self.summaries.push(summary.clone());
    }

    fn update_status(&mut self, round: u32, total: u32, score: u32) {
        self.statuses.push((round, total, score));
    }

    fn set_response_enabled(&mut self, enabled: bool) {
        self.response_enabled = enabled;
    }
}
