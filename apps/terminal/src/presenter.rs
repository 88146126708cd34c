//! Line-oriented rendering of the quiz for a terminal.

use std::{
    io::{self, Write},
    sync::Mutex,
};

use quiz_core::Presenter;
use shared::domain::{FeedbackKind, SessionView};

pub struct TerminalPresenter<W: Write + Send> {
    answer: Mutex<String>,
    out: Mutex<W>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            answer: Mutex::new(String::new()),
            out: Mutex::new(out),
        }
    }

    /// Equivalent of typing into the answer field.
    pub fn set_answer(&self, text: &str) {
        if let Ok(mut answer) = self.answer.lock() {
            *answer = text.to_string();
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{text}");
            let _ = out.flush();
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn describe_image(image_reference: &str) -> &str {
    if image_reference.starts_with("data:") {
        "<no question loaded>"
    } else {
        image_reference
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn answer_text(&self) -> String {
        self.answer
            .lock()
            .map(|answer| answer.clone())
            .unwrap_or_default()
    }

    fn clear_answer(&self) {
        self.set_answer("");
    }

    fn show_image(&self, image_reference: &str) {
        self.line(&format!("puzzle: {}", describe_image(image_reference)));
    }

    fn show_feedback(&self, message: &str, kind: FeedbackKind) {
        let tag = match kind {
            FeedbackKind::Neutral => "[..]",
            FeedbackKind::Positive => "[ok]",
            FeedbackKind::Negative => "[!!]",
        };
        self.line(&format!("{tag} {message}"));
    }

    fn show_stats(&self, readout: &str) {
        self.line(readout);
    }

    fn set_session_view(&self, view: &SessionView) {
        match view {
            SessionView::SignedIn { identifier } => {
                self.line(&format!("signed in as {} (:logout to sign out)", identifier.0))
            }
            SessionView::Guest => self.line("playing as guest"),
        }
    }
}
