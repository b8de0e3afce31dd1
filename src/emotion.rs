use serde::{Deserialize, Serialize};

/// Neutral glyph shown between stimulus and prompt so no afterimage
/// of the stimulus survives into the response window.
pub const MASK_GLYPH: &str = "😐";

/// Glyph shown while a response is being awaited.
pub const PROMPT_GLYPH: &str = "?";

/// Glyph shown on the stage before the first round of a session.
pub const READY_GLYPH: &str = "ready";

/// The closed set of emotions a stimulus can represent.
///
/// The variant order is canonical: it drives uniform random target
/// selection and the 1-6 keyboard mapping.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum EmotionCategory {
    Joy,
    Anger,
    Sadness,
    Fear,
    Disgust,
    Surprise,
}

impl EmotionCategory {
    pub const ALL: [EmotionCategory; 6] = [
        EmotionCategory::Joy,
        EmotionCategory::Anger,
        EmotionCategory::Sadness,
        EmotionCategory::Fear,
        EmotionCategory::Disgust,
        EmotionCategory::Surprise,
    ];

    /// Short label used in the status bar and summary breakdown.
    pub fn label(&self) -> &'static str {
        match self {
            EmotionCategory::Joy => "joy",
            EmotionCategory::Anger => "anger",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Disgust => "disgust",
            EmotionCategory::Surprise => "surprise",
        }
    }

    /// Exemplar glyphs; any one of these may stand in for the category
    /// in a trial. Never empty.
    pub fn glyphs(&self) -> &'static [&'static str] {
        match self {
            EmotionCategory::Joy => &["😀", "😄", "😁", "😊", "😃", "🙂"],
            EmotionCategory::Anger => &["😠", "😡", "😤", "🤬"],
            EmotionCategory::Sadness => &["😢", "😞", "😔", "😭", "☹️"],
            EmotionCategory::Fear => &["😱", "😨", "😰", "😧"],
            EmotionCategory::Disgust => &["🤢", "🤮", "😖", "😣"],
            EmotionCategory::Surprise => &["😮", "😯", "😲", "😳"],
        }
    }

    /// Maps the digit keys 1-6 onto categories in canonical order.
    pub fn from_digit(d: char) -> Option<EmotionCategory> {
        let idx = d.to_digit(10)? as usize;
        if (1..=Self::ALL.len()).contains(&idx) {
            Some(Self::ALL[idx - 1])
        } else {
            None
        }
    }
}
