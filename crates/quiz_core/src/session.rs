use shared::domain::PuzzleDescriptor;

/// Score, attempt count and the active puzzle for one quiz session.
///
/// Only the controller mutates this. `attempts >= score` holds after every call.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    score: u32,
    attempts: u32,
    active_puzzle: Option<PuzzleDescriptor>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn active_puzzle(&self) -> Option<&PuzzleDescriptor> {
        self.active_puzzle.as_ref()
    }

    pub fn install_puzzle(&mut self, puzzle: PuzzleDescriptor) {
        self.active_puzzle = Some(puzzle);
    }

    pub fn clear_puzzle(&mut self) {
        self.active_puzzle = None;
    }

    /// Judges `answer` against the active puzzle and counts the attempt.
    ///
    /// Returns `None` without touching the counters when there is nothing to judge.
    pub fn judge(&mut self, answer: &str) -> Option<bool> {
        let correct = self.active_puzzle.as_ref()?.solution.matches(answer);
        self.attempts = self.attempts.saturating_add(1);
        if correct {
            self.score = self.score.saturating_add(1);
        }
        Some(correct)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
