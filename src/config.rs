use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Bounds and defaults for the timing knobs. Values outside the bounds
/// are clamped, unparsable values fall back to the default.
pub const MIN_DURATION_MS: u64 = 30;
pub const MAX_DURATION_MS: u64 = 2000;
pub const DEFAULT_DURATION_MS: u64 = 250;
pub const DEFAULT_MASK_MS: u64 = 300;
pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 100;
pub const DEFAULT_ROUNDS: u32 = 12;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Novice,
    Intermediate,
    Expert,
    Custom,
}

impl Difficulty {
    /// Preset flash duration, or None for Custom (resolved from raw input).
    fn preset_flash_ms(&self) -> Option<u64> {
        match self {
            Difficulty::Novice => Some(500),
            Difficulty::Intermediate => Some(300),
            Difficulty::Expert => Some(200),
            Difficulty::Custom => None,
        }
    }
}

/// Raw selections as read from the configuration source (the CLI here).
/// Durations and round count stay unparsed strings so that invalid input
/// degrades to a default instead of failing.
#[derive(Debug, Clone)]
pub struct RawSettings {
    pub difficulty: Difficulty,
    pub flash_ms: Option<String>,
    pub mask_ms: Option<String>,
    pub rounds: Option<String>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Novice,
            flash_ms: None,
            mask_ms: None,
            rounds: None,
        }
    }
}

/// Resolved, immutable timings for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub stimulus_duration_ms: u64,
    pub mask_duration_ms: u64,
    pub total_rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig::resolve(&RawSettings::default())
    }
}

impl SessionConfig {
    /// Pure and total: always yields a valid config, whatever the input.
    pub fn resolve(raw: &RawSettings) -> Self {
        let stimulus_duration_ms = match raw.difficulty.preset_flash_ms() {
            Some(ms) => ms,
            None => clamp_ms(raw.flash_ms.as_deref(), DEFAULT_DURATION_MS),
        };

        Self {
            stimulus_duration_ms,
            mask_duration_ms: mask_ms(raw.mask_ms.as_deref()),
            total_rounds: clamp_rounds(raw.rounds.as_deref()),
        }
    }
}

/// Absent input takes `absent_default`, unparsable input takes the
/// 250ms fallback, anything else is clamped into [30, 2000].
fn clamp_ms(raw: Option<&str>, absent_default: u64) -> u64 {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return absent_default,
    };
    match raw.parse::<i64>() {
        Ok(ms) => (ms.max(0) as u64).clamp(MIN_DURATION_MS, MAX_DURATION_MS),
        Err(_) => DEFAULT_DURATION_MS,
    }
}

/// Mask duration follows the same policy except that an explicit zero
/// (or anything below it) means "no mask" and is kept as 0 rather than
/// clamped up to the floor.
fn mask_ms(raw: Option<&str>) -> u64 {
    if let Some(s) = raw.map(str::trim) {
        if let Ok(ms) = s.parse::<i64>() {
            if ms <= 0 {
                return 0;
            }
        }
    }
    clamp_ms(raw, DEFAULT_MASK_MS)
}

fn clamp_rounds(raw: Option<&str>) -> u32 {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<i64>() {
            Ok(n) => n.clamp(MIN_ROUNDS as i64, MAX_ROUNDS as i64) as u32,
            Err(_) => DEFAULT_ROUNDS,
        },
        _ => DEFAULT_ROUNDS,
    }
}
