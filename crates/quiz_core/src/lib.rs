//! Puzzle quiz core: fetches puzzles, judges answers and advances on success.

pub mod controller;
pub mod events;
pub mod identity;
pub mod presenter;
pub mod puzzle_source;
pub mod session;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use controller::{ControllerOptions, Judgment, QuizController, QuizPhase};
pub use events::{ControllerStopped, QuizHandle, UiTrigger};
pub use identity::{AuthWiring, IdentityProvider, LocalIdentityProvider};
pub use presenter::{placeholder_image_uri, stats_readout, Presenter};
pub use puzzle_source::{HttpPuzzleSource, PuzzleSource, DEFAULT_API_URL};
pub use session::SessionState;
