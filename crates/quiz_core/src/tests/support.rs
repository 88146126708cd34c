//! Test doubles shared by the controller and identity tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use shared::{
    domain::{FeedbackKind, PuzzleDescriptor, SessionView},
    error::PuzzleSourceError,
};
use tokio::sync::oneshot;

use crate::{presenter::Presenter, puzzle_source::PuzzleSource};

pub(crate) type FetchResult = Result<PuzzleDescriptor, PuzzleSourceError>;

pub(crate) enum Scripted {
    Ready(FetchResult),
    /// Resolves once the test sends on the paired sender.
    Gated(oneshot::Receiver<FetchResult>),
}

pub(crate) fn ready(image: &str, solution: i32) -> Scripted {
    Scripted::Ready(Ok(PuzzleDescriptor::new(image, solution)))
}

pub(crate) fn failing(err: PuzzleSourceError) -> Scripted {
    Scripted::Ready(Err(err))
}

pub(crate) struct ScriptedSource {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PuzzleSource for ScriptedSource {
    async fn fetch_puzzle(&self) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("script").pop_front();
        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(PuzzleSourceError::network("gate dropped"))),
            None => Err(PuzzleSourceError::network("script exhausted")),
        }
    }
}

#[derive(Default)]
struct Recorded {
    answer: String,
    image: Option<String>,
    feedback: Vec<(String, FeedbackKind)>,
    stats: Option<String>,
    score: Option<u32>,
    attempts: Option<u32>,
    views: Vec<SessionView>,
}

#[derive(Default)]
pub(crate) struct RecordingPresenter {
    inner: Mutex<Recorded>,
}

impl RecordingPresenter {
    pub(crate) fn type_answer(&self, text: &str) {
        self.inner.lock().expect("presenter").answer = text.to_string();
    }

    pub(crate) fn image(&self) -> Option<String> {
        self.inner.lock().expect("presenter").image.clone()
    }

    pub(crate) fn last_feedback(&self) -> Option<(String, FeedbackKind)> {
        self.inner.lock().expect("presenter").feedback.last().cloned()
    }

    pub(crate) fn feedback_count(&self) -> usize {
        self.inner.lock().expect("presenter").feedback.len()
    }

    pub(crate) fn stats(&self) -> Option<String> {
        self.inner.lock().expect("presenter").stats.clone()
    }

    pub(crate) fn score_and_attempts(&self) -> (Option<u32>, Option<u32>) {
        let inner = self.inner.lock().expect("presenter");
        (inner.score, inner.attempts)
    }

    pub(crate) fn views(&self) -> Vec<SessionView> {
        self.inner.lock().expect("presenter").views.clone()
    }
}

impl Presenter for RecordingPresenter {
    fn answer_text(&self) -> String {
        self.inner.lock().expect("presenter").answer.clone()
    }

    fn clear_answer(&self) {
        self.inner.lock().expect("presenter").answer.clear();
    }

    fn show_image(&self, image_reference: &str) {
        self.inner.lock().expect("presenter").image = Some(image_reference.to_string());
    }

    fn show_feedback(&self, message: &str, kind: FeedbackKind) {
        self.inner
            .lock()
            .expect("presenter")
            .feedback
            .push((message.to_string(), kind));
    }

    fn show_stats(&self, readout: &str) {
        self.inner.lock().expect("presenter").stats = Some(readout.to_string());
    }

    fn show_score(&self, score: u32) {
        self.inner.lock().expect("presenter").score = Some(score);
    }

    fn show_attempts(&self, attempts: u32) {
        self.inner.lock().expect("presenter").attempts = Some(attempts);
    }

    fn set_session_view(&self, view: &SessionView) {
        self.inner.lock().expect("presenter").views.push(view.clone());
    }
}
