use crate::emotion::EmotionCategory;
use serde::{Deserialize, Serialize};

/// Phases a round moves through. Transitions are strictly sequential;
/// a response is accepted only in `AwaitingResponse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    StimulusShown,
    Masked,
    AwaitingResponse,
    Resolved,
    Finished,
}

/// One completed round. Created exactly once when a response resolves
/// and never mutated afterwards; the session history is append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based round number within the session.
    pub round: u32,
    pub target: EmotionCategory,
    pub chosen: EmotionCategory,
    pub correct: bool,
    pub rt_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_record_serde_roundtrip() {
        let record = TrialRecord {
            round: 3,
            target: EmotionCategory::Fear,
            chosen: EmotionCategory::Surprise,
            correct: false,
            rt_ms: 412,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<TrialRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_phase_is_a_closed_ordering() {
        // Sanity on the variants the session steps through
        let order = [
            Phase::Idle,
            Phase::StimulusShown,
            Phase::Masked,
            Phase::AwaitingResponse,
            Phase::Resolved,
            Phase::Finished,
        ];
        for (i, a) in order.iter().enumerate() {
            for b in order.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
