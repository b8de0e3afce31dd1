use crate::trial::TrialRecord;
use crate::util::{mean, std_dev};
use itertools::Itertools;
use itertools::MinMaxResult;
use serde::{Deserialize, Serialize};

/// Aggregate result of one session, computed from the trial history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// round(100 * correct / rounds played); 0 when nothing was played.
    pub accuracy_percent: u32,
    /// Mean latency over correct responses; None when none were correct.
    pub mean_correct_rt_ms: Option<u64>,
    /// Spread of correct-response latencies.
    pub rt_std_dev_ms: Option<f64>,
    /// Fastest and slowest correct response.
    pub rt_range_ms: Option<(u64, u64)>,
    /// Per-round records in play order.
    pub rounds: Vec<TrialRecord>,
}

/// Pure aggregation over the history; no side effects.
pub fn summarize(history: &[TrialRecord]) -> SessionSummary {
    let correct_rts: Vec<u64> = history
        .iter()
        .filter(|r| r.correct)
        .map(|r| r.rt_ms)
        .collect();
    let correct_rts_f: Vec<f64> = correct_rts.iter().map(|&rt| rt as f64).collect();

    let accuracy_percent = if history.is_empty() {
        0
    } else {
        (100.0 * correct_rts.len() as f64 / history.len() as f64).round() as u32
    };

    let rt_range_ms = match correct_rts.iter().copied().minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(rt) => Some((rt, rt)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    };

    SessionSummary {
        accuracy_percent,
        mean_correct_rt_ms: mean(&correct_rts_f).map(|m| m.round() as u64),
        rt_std_dev_ms: std_dev(&correct_rts_f),
        rt_range_ms,
        rounds: history.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionCategory;

    fn record(round: u32, correct: bool, rt_ms: u64) -> TrialRecord {
        TrialRecord {
            round,
            target: EmotionCategory::Joy,
            chosen: if correct {
                EmotionCategory::Joy
            } else {
                EmotionCategory::Anger
            },
            correct,
            rt_ms,
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.accuracy_percent, 0);
        assert_eq!(summary.mean_correct_rt_ms, None);
        assert_eq!(summary.rt_std_dev_ms, None);
        assert_eq!(summary.rt_range_ms, None);
        assert!(summary.rounds.is_empty());
    }

    #[test]
    fn test_all_correct() {
        let history = vec![record(1, true, 400), record(2, true, 200)];
        let summary = summarize(&history);
        assert_eq!(summary.accuracy_percent, 100);
        assert_eq!(summary.mean_correct_rt_ms, Some(300));
        assert_eq!(summary.rt_range_ms, Some((200, 400)));
        assert_eq!(summary.rounds, history);
    }

    #[test]
    fn test_all_incorrect_has_no_mean_rt() {
        let history = vec![
            record(1, false, 500),
            record(2, false, 600),
            record(3, false, 700),
        ];
        let summary = summarize(&history);
        assert_eq!(summary.accuracy_percent, 0);
        assert_eq!(summary.mean_correct_rt_ms, None);
        assert_eq!(summary.rt_std_dev_ms, None);
        assert_eq!(summary.rt_range_ms, None);
        assert_eq!(summary.rounds.len(), 3);
    }

    #[test]
    fn test_accuracy_rounds_to_nearest() {
        // 2 of 3 correct -> 66.67 -> 67
        let history = vec![record(1, true, 300), record(2, true, 300), record(3, false, 300)];
        assert_eq!(summarize(&history).accuracy_percent, 67);

        // 1 of 3 correct -> 33.33 -> 33
        let history = vec![record(1, true, 300), record(2, false, 300), record(3, false, 300)];
        assert_eq!(summarize(&history).accuracy_percent, 33);
    }

    #[test]
    fn test_mean_rounds_to_nearest_ms() {
        let history = vec![record(1, true, 100), record(2, true, 101)];
        // 100.5 rounds to 101 (round half away from zero)
        assert_eq!(summarize(&history).mean_correct_rt_ms, Some(101));
    }

    #[test]
    fn test_single_correct_round() {
        let history = vec![record(1, true, 345)];
        let summary = summarize(&history);
        assert_eq!(summary.accuracy_percent, 100);
        assert_eq!(summary.mean_correct_rt_ms, Some(345));
        assert_eq!(summary.rt_std_dev_ms, Some(0.0));
        assert_eq!(summary.rt_range_ms, Some((345, 345)));
    }

    #[test]
    fn test_incorrect_latencies_do_not_pollute_mean() {
        let history = vec![record(1, true, 200), record(2, false, 9000)];
        let summary = summarize(&history);
        assert_eq!(summary.accuracy_percent, 50);
        assert_eq!(summary.mean_correct_rt_ms, Some(200));
    }

    #[test]
    fn test_summary_serializes() {
        let summary = summarize(&[record(1, true, 250)]);
        let json = serde_json::to_string(&summary).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
