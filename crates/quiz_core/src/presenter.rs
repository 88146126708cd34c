//! Presentation boundary consumed by the controller and the auth wiring.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::domain::{FeedbackKind, SessionView};

const PLACEHOLDER_SVG: &str = concat!(
    r##"<svg width="200" height="150" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<rect width="100%" height="100%" fill="#ddd"/>"##,
    r##"<text x="50%" y="50%" font-family="Arial" font-size="14" fill="#666" "##,
    r##"text-anchor="middle" dy=".3em">No question loaded</text></svg>"##,
);

/// Writes go straight to whatever surface renders the quiz. Implementations hold no
/// quiz logic and use interior mutability so the controller and the auth wiring can
/// share one instance.
pub trait Presenter: Send + Sync {
    fn answer_text(&self) -> String;
    fn clear_answer(&self);
    fn show_image(&self, image_reference: &str);
    fn show_feedback(&self, message: &str, kind: FeedbackKind);
    fn show_stats(&self, readout: &str);
    fn show_score(&self, _score: u32) {}
    fn show_attempts(&self, _attempts: u32) {}
    fn set_session_view(&self, view: &SessionView);
}

/// Static "No question loaded" graphic shown when a load fails.
pub fn placeholder_image_uri() -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(PLACEHOLDER_SVG))
}

pub fn stats_readout(score: u32, attempts: u32) -> String {
    format!("Score: {score} | Attempts: {attempts}")
}
