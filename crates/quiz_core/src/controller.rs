//! Question lifecycle: load, await input, judge, advance.
//!
//! The controller is the single consumer of its event queue. UI triggers, finished loads
//! and advance timers all arrive as events and each one is handled to completion before
//! the next, so the session state needs no locking. Every load is tagged with a
//! generation; results and timers from an older generation are dropped.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{FeedbackKind, PuzzleDescriptor},
    error::PuzzleSourceError,
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    events::{ControllerEvent, QuizHandle, UiTrigger, SUBMIT_KEY},
    presenter::{placeholder_image_uri, stats_readout, Presenter},
    puzzle_source::PuzzleSource,
    session::SessionState,
};

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

const MSG_LOADED: &str = "Question loaded! Enter your answer.";
const MSG_LOADING: &str = "Loading new question...";
const MSG_NO_PUZZLE: &str = "No question loaded yet!";
const MSG_CORRECT: &str = "Correct! 🎉 Loading next question...";
const MSG_INCORRECT: &str = "Try again! ❌";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub advance_delay: Duration,
    pub placeholder_image: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            placeholder_image: placeholder_image_uri(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Loading,
    Ready,
    Judging,
    Advancing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    /// No usable puzzle; nothing was counted.
    Unjudgeable,
    Correct,
    Incorrect,
}

pub struct QuizController {
    source: Arc<dyn PuzzleSource>,
    presenter: Arc<dyn Presenter>,
    options: ControllerOptions,
    session: SessionState,
    phase: QuizPhase,
    generation: u64,
    load_in_flight: bool,
    pending_advance: Option<JoinHandle<()>>,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
}

impl QuizController {
    pub fn new(
        source: Arc<dyn PuzzleSource>,
        presenter: Arc<dyn Presenter>,
        options: ControllerOptions,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            source,
            presenter,
            options,
            session: SessionState::new(),
            phase: QuizPhase::Idle,
            generation: 0,
            load_in_flight: false,
            pending_advance: None,
            events_tx,
            events_rx,
        }
    }

    pub fn handle(&self) -> QuizHandle {
        QuizHandle::new(self.events_tx.clone())
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Kicks off the first load. Only has an effect while idle.
    pub fn start(&mut self) {
        if self.phase == QuizPhase::Idle {
            info!("quiz: starting");
            self.begin_load();
        }
    }

    /// Starts the quiz and processes events until a shutdown is requested.
    pub async fn run(mut self) {
        self.start();
        while self.process_next().await {}
        self.cancel_pending_advance();
        info!(
            score = self.session.score(),
            attempts = self.session.attempts(),
            "quiz: stopped"
        );
    }

    /// Waits for the next event and handles it. Returns `false` once shut down.
    pub async fn process_next(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    pub(crate) fn dispatch(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::Trigger(trigger) => self.on_trigger(trigger),
            ControllerEvent::LoadFinished { generation, result } => {
                self.finish_load(generation, result)
            }
            ControllerEvent::AdvanceDue { generation } => self.on_advance_due(generation),
            ControllerEvent::Shutdown => return false,
        }
        true
    }

    fn on_trigger(&mut self, trigger: UiTrigger) {
        match trigger {
            UiTrigger::Submit => {
                self.submit_answer();
            }
            UiTrigger::SubmitText(answer) => {
                self.judge_answer(&answer);
            }
            UiTrigger::KeyPress(key) if key == SUBMIT_KEY => {
                self.submit_answer();
            }
            UiTrigger::KeyPress(_) => {}
            UiTrigger::NewPuzzle => self.request_new_puzzle(),
        }
    }

    /// Reads the answer field and judges it against the active puzzle.
    pub fn submit_answer(&mut self) -> Judgment {
        let answer = self.presenter.answer_text();
        self.judge_answer(&answer)
    }

    pub fn judge_answer(&mut self, answer: &str) -> Judgment {
        self.phase = QuizPhase::Judging;

        let judgment = match self.session.judge(answer) {
            None => {
                self.presenter
                    .show_feedback(MSG_NO_PUZZLE, FeedbackKind::Negative);
                debug!("quiz: submission ignored, no question loaded");
                self.settle_phase();
                return Judgment::Unjudgeable;
            }
            Some(true) => {
                self.presenter.show_feedback(MSG_CORRECT, FeedbackKind::Positive);
                self.presenter.clear_answer();
                self.schedule_advance();
                Judgment::Correct
            }
            Some(false) => {
                self.presenter
                    .show_feedback(MSG_INCORRECT, FeedbackKind::Negative);
                Judgment::Incorrect
            }
        };

        info!(
            correct = judgment == Judgment::Correct,
            score = self.session.score(),
            attempts = self.session.attempts(),
            "quiz: answer judged"
        );
        self.update_stats();
        self.settle_phase();
        judgment
    }

    /// Manual "new puzzle": supersedes any pending advance and loads right away.
    pub fn request_new_puzzle(&mut self) {
        self.cancel_pending_advance();
        self.presenter.clear_answer();
        self.presenter.show_feedback(MSG_LOADING, FeedbackKind::Neutral);
        self.begin_load();
    }

    fn begin_load(&mut self) {
        self.generation += 1;
        self.load_in_flight = true;
        self.phase = QuizPhase::Loading;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        debug!(generation, "quiz: loading question");
        tokio::spawn(async move {
            let result = source.fetch_puzzle().await;
            let _ = events.send(ControllerEvent::LoadFinished { generation, result });
        });
    }

    fn finish_load(
        &mut self,
        generation: u64,
        result: Result<PuzzleDescriptor, PuzzleSourceError>,
    ) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "quiz: discarding superseded load"
            );
            return;
        }
        self.load_in_flight = false;

        match result {
            Ok(puzzle) => {
                info!(generation, image = %puzzle.image_reference, "quiz: question loaded");
                self.presenter.show_image(&puzzle.image_reference);
                self.session.install_puzzle(puzzle);
                self.presenter.show_feedback(MSG_LOADED, FeedbackKind::Neutral);
            }
            Err(err) => {
                warn!(
                    generation,
                    kind = ?err.kind(),
                    "quiz: failed to load question: {err}"
                );
                self.session.clear_puzzle();
                self.presenter.show_image(&self.options.placeholder_image);
                self.presenter
                    .show_feedback(&format!("Error: {err}"), FeedbackKind::Negative);
            }
        }
        self.settle_phase();
    }

    fn schedule_advance(&mut self) {
        // A second correct answer before the timer fires rides on the existing timer.
        if self.pending_advance.is_some() {
            return;
        }
        let generation = self.generation;
        let delay = self.options.advance_delay;
        let events = self.events_tx.clone();
        debug!(generation, delay_ms = delay.as_millis() as u64, "quiz: advance scheduled");
        self.pending_advance = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(ControllerEvent::AdvanceDue { generation });
        }));
    }

    fn on_advance_due(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "quiz: ignoring stale advance"
            );
            return;
        }
        self.pending_advance = None;
        self.begin_load();
    }

    fn cancel_pending_advance(&mut self) {
        if let Some(task) = self.pending_advance.take() {
            task.abort();
        }
    }

    fn update_stats(&self) {
        let score = self.session.score();
        let attempts = self.session.attempts();
        self.presenter.show_stats(&stats_readout(score, attempts));
        self.presenter.show_score(score);
        self.presenter.show_attempts(attempts);
    }

    fn settle_phase(&mut self) {
        self.phase = if self.load_in_flight {
            QuizPhase::Loading
        } else if self.pending_advance.is_some() {
            QuizPhase::Advancing
        } else {
            QuizPhase::Ready
        };
    }
}

impl Drop for QuizController {
    fn drop(&mut self) {
        self.cancel_pending_advance();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
