use std::collections::HashMap;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::emotion::EmotionCategory;
use crate::present::{FeedbackTone, HighlightKind, Presenter};
use crate::summary::SessionSummary;
use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// View model the session core drives through the [`Presenter`] trait.
/// Rendering reads from this; the core never touches widgets.
#[derive(Debug)]
pub struct StageView {
    pub glyph: String,
    pub feedback: String,
    pub feedback_tone: FeedbackTone,
    pub highlights: HashMap<EmotionCategory, HighlightKind>,
    pub latency_ms: Option<u64>,
    pub summary: Option<SessionSummary>,
    pub round: u32,
    pub total: u32,
    pub score: u32,
    pub responses_enabled: bool,
}

impl Default for StageView {
    fn default() -> Self {
        Self {
            glyph: String::new(),
            feedback: String::new(),
            feedback_tone: FeedbackTone::Neutral,
            highlights: HashMap::new(),
            latency_ms: None,
            summary: None,
            round: 0,
            total: 0,
            score: 0,
            responses_enabled: false,
        }
    }
}

impl Presenter for StageView {
    fn show_glyph(&mut self, text: &str) {
        self.glyph = text.to_string();
    }

    fn show_prompt(&mut self, text: &str) {
        self.glyph = text.to_string();
    }

    fn set_feedback(&mut self, text: &str, tone: FeedbackTone) {
        self.feedback = text.to_string();
        self.feedback_tone = tone;
    }

    fn highlight_choice(&mut self, category: EmotionCategory, kind: HighlightKind) {
        self.highlights.insert(category, kind);
    }

    fn reset_choices(&mut self) {
        self.highlights.clear();
    }

    fn update_latency(&mut self, rt_ms: Option<u64>) {
        self.latency_ms = rt_ms;
    }

    fn render_summary(&mut self, summary: &SessionSummary) {
        self.summary = Some(summary.clone());
    }

    fn update_status(&mut self, round: u32, total: u32, score: u32) {
        self.round = round;
        self.total = total;
        self.score = score;
    }

    fn set_response_enabled(&mut self, enabled: bool) {
        self.responses_enabled = enabled;
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Welcome => render_welcome(self, area, buf),
            AppState::Running => render_stage(self, area, buf),
            AppState::Summary => render_summary_screen(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn render_welcome(app: &App, area: Rect, buf: &mut Buffer) {
    let cfg = app.session.config();
    let lines = vec![
        Line::from(Span::styled("emoflash", bold().fg(Color::Magenta))),
        Line::from(""),
        Line::from(Span::styled(
            "an emoji flashes, gets masked, and you name the emotion",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "flash {}ms / mask {}ms / {} rounds",
                cfg.stimulus_duration_ms, cfg.mask_duration_ms, cfg.total_rounds
            ),
            dim(),
        )),
        Line::from(""),
        Line::from(Span::styled("(space) start  (esc) quit", dim())),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    widget.render(centered_vertically(area, 7), buf);
}

fn render_stage(app: &App, area: Rect, buf: &mut Buffer) {
    let view = &app.view;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Min(1),    // stage
            Constraint::Length(1), // feedback
            Constraint::Length(2), // choices
            Constraint::Length(1), // help
        ])
        .split(area);

    let rt_text = view
        .latency_ms
        .map(|ms| format!("{} ms", ms))
        .unwrap_or_else(|| "-".to_string());
    let status = Paragraph::new(Span::styled(
        format!(
            "round {}/{}   score {}   rt {}",
            view.round.min(view.total),
            view.total,
            view.score,
            rt_text
        ),
        dim().patch(bold()),
    ))
    .alignment(Alignment::Center);
    status.render(chunks[0], buf);

    let glyph = Paragraph::new(Span::styled(view.glyph.clone(), bold()))
        .alignment(Alignment::Center);
    glyph.render(centered_vertically(chunks[1], 1), buf);

    let feedback_style = match view.feedback_tone {
        FeedbackTone::Ok => bold().fg(Color::Green),
        FeedbackTone::Bad => bold().fg(Color::Red),
        FeedbackTone::Neutral => dim(),
    };
    let feedback = Paragraph::new(Span::styled(view.feedback.clone(), feedback_style))
        .alignment(Alignment::Center);
    feedback.render(chunks[2], buf);

    render_choices(view, chunks[3], buf);

    let help = Paragraph::new(Span::styled("(1-6) answer  (r) restart  (esc) quit", dim()))
        .alignment(Alignment::Center);
    help.render(chunks[4], buf);
}

/// One entry per category, keyed 1-6. Highlights mark the correct and
/// (when different) the chosen category after a resolution; the whole
/// row dims while responses are disabled.
fn render_choices(view: &StageView, area: Rect, buf: &mut Buffer) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, cat) in EmotionCategory::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let text = format!("[{}] {}", i + 1, cat.label());
        let style = match view.highlights.get(cat) {
            Some(HighlightKind::Correct) => bold().fg(Color::Green),
            Some(HighlightKind::Wrong) => bold().fg(Color::Red),
            None if view.responses_enabled => bold(),
            None => dim(),
        };
        spans.push(Span::styled(text, style));
    }

    let row_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let widget = Paragraph::new(Line::from(spans))
        .alignment(if row_width <= area.width as usize {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    widget.render(area, buf);
}

fn render_summary_screen(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(summary) = app.view.summary.as_ref() else {
        // Summary state without data only happens transiently; show
        // nothing rather than stale stage content.
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // headline stats
            Constraint::Length(1), // padding
            Constraint::Min(1),    // breakdown
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled("session results", bold().fg(Color::Magenta)))
        .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    let mean_text = summary
        .mean_correct_rt_ms
        .map(|ms| format!("{} ms", ms))
        .unwrap_or_else(|| "-".to_string());
    let mut headline = format!(
        "accuracy {}%   mean rt {}",
        summary.accuracy_percent, mean_text
    );
    if let Some(sd) = summary.rt_std_dev_ms {
        headline.push_str(&format!("   sd {:.0} ms", sd));
    }
    if let Some((fastest, slowest)) = summary.rt_range_ms {
        headline.push_str(&format!("   fastest {} / slowest {} ms", fastest, slowest));
    }
    let stats = Paragraph::new(Span::styled(headline, bold())).alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    let label_width = EmotionCategory::ALL
        .iter()
        .map(|c| c.label().width())
        .max()
        .unwrap_or(0);
    let rows: Vec<Line> = summary
        .rounds
        .iter()
        .map(|r| {
            let mark = if r.correct { "✔" } else { "✘" };
            let style = if r.correct {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Line::from(Span::styled(
                format!(
                    "{:02} | target {:<w$} chose {:<w$} | {} | rt {}ms",
                    r.round,
                    r.target.label(),
                    r.chosen.label(),
                    mark,
                    r.rt_ms,
                    w = label_width,
                ),
                style,
            ))
        })
        .collect();
    let breakdown = Paragraph::new(rows).alignment(Alignment::Center);
    breakdown.render(chunks[3], buf);

    let legend = Paragraph::new(Span::styled("(space/r) go again  (esc) quit", dim()))
        .alignment(Alignment::Center);
    legend.render(chunks[4], buf);
}

/// Shrinks `area` to `height` rows vertically centered within it.
fn centered_vertically(area: Rect, height: u16) -> Rect {
    if area.height <= height {
        return area;
    }
    let top = (area.height - height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height,
    }
}
