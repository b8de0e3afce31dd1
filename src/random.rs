use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::VecDeque;

/// Uniform choice from a non-empty slice. Injectable so tests can
/// script the target and glyph a round will pick.
pub trait Picker {
    /// Panics if `items` is empty; callers only pass the fixed category
    /// set and its glyph lists, which are non-empty by construction.
    fn pick<T: Copy>(&mut self, items: &[T]) -> T;
}

/// Production picker backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct RngPicker {
    rng: ThreadRng,
}

impl RngPicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Picker for RngPicker {
    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }
}

/// Deterministic picker that replays a queue of indices, falling back
/// to the first element once the script runs dry.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    indices: VecDeque<usize>,
}

impl ScriptedPicker {
    pub fn new<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }
}

impl Picker for ScriptedPicker {
    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        let idx = self.indices.pop_front().unwrap_or(0);
        items[idx % items.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_picker_stays_in_bounds() {
        let mut picker = RngPicker::new();
        let items = [10, 20, 30];
        for _ in 0..100 {
            assert!(items.contains(&picker.pick(&items)));
        }
    }

    #[test]
    fn test_scripted_picker_replays_indices() {
        let mut picker = ScriptedPicker::new([2, 0, 1]);
        let items = ["a", "b", "c"];
        assert_eq!(picker.pick(&items), "c");
        assert_eq!(picker.pick(&items), "a");
        assert_eq!(picker.pick(&items), "b");
        // Script exhausted: falls back to the first element
        assert_eq!(picker.pick(&items), "a");
    }

    #[test]
    fn test_scripted_picker_wraps_oversized_indices() {
        let mut picker = ScriptedPicker::new([7]);
        let items = [1, 2, 3];
        assert_eq!(picker.pick(&items), 2);
    }
}
