use std::collections::HashSet;

/// Numeric rating sent to the backend: 1 for helpful, 0 for not
pub fn feedback_value(good: bool) -> u8 {
    if good { 1 } else { 0 }
}

/// Tracks which transcript positions have already been rated.
///
/// Enforces the at-most-one-rating-per-message rule on the client side;
/// the rated state is session-local and intentionally not persisted.
#[derive(Debug, Default)]
pub struct FeedbackRecorder {
    rated: HashSet<usize>,
}

impl FeedbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a message as rated. Returns false if it was already rated,
    /// in which case no request must be sent.
    pub fn record(&mut self, index: usize) -> bool {
        self.rated.insert(index)
    }

    pub fn is_rated(&self, index: usize) -> bool {
        self.rated.contains(&index)
    }

    pub fn reset(&mut self) {
        self.rated.clear();
    }
}
