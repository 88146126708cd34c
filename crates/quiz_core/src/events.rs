//! Events consumed by the quiz controller and the handle UI code uses to queue them.

use shared::{domain::PuzzleDescriptor, error::PuzzleSourceError};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

pub const SUBMIT_KEY: &str = "Enter";

/// User-facing triggers coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiTrigger {
    /// Submit whatever the answer field holds when the event is handled.
    Submit,
    /// Submit this exact text, e.g. one line of terminal input.
    SubmitText(String),
    /// Key pressed while the answer field has focus.
    KeyPress(String),
    NewPuzzle,
}

pub(crate) enum ControllerEvent {
    Trigger(UiTrigger),
    LoadFinished {
        generation: u64,
        result: Result<PuzzleDescriptor, PuzzleSourceError>,
    },
    AdvanceDue {
        generation: u64,
    },
    Shutdown,
}

#[derive(Debug, Error)]
#[error("quiz controller is no longer running")]
pub struct ControllerStopped;

/// Cloneable sender side of the controller's event queue.
#[derive(Clone)]
pub struct QuizHandle {
    tx: UnboundedSender<ControllerEvent>,
}

impl QuizHandle {
    pub(crate) fn new(tx: UnboundedSender<ControllerEvent>) -> Self {
        Self { tx }
    }

    pub fn trigger(&self, trigger: UiTrigger) -> Result<(), ControllerStopped> {
        let name = match &trigger {
            UiTrigger::Submit => "submit",
            UiTrigger::SubmitText(_) => "submit_text",
            UiTrigger::KeyPress(_) => "key_press",
            UiTrigger::NewPuzzle => "new_puzzle",
        };
        self.tx
            .send(ControllerEvent::Trigger(trigger))
            .map_err(|_| ControllerStopped)?;
        tracing::debug!(trigger = name, "queued ui->controller trigger");
        Ok(())
    }

    pub fn submit(&self) -> Result<(), ControllerStopped> {
        self.trigger(UiTrigger::Submit)
    }

    pub fn submit_text(&self, answer: impl Into<String>) -> Result<(), ControllerStopped> {
        self.trigger(UiTrigger::SubmitText(answer.into()))
    }

    pub fn key_press(&self, key: impl Into<String>) -> Result<(), ControllerStopped> {
        self.trigger(UiTrigger::KeyPress(key.into()))
    }

    pub fn new_puzzle(&self) -> Result<(), ControllerStopped> {
        self.trigger(UiTrigger::NewPuzzle)
    }

    pub fn shutdown(&self) -> Result<(), ControllerStopped> {
        self.tx
            .send(ControllerEvent::Shutdown)
            .map_err(|_| ControllerStopped)
    }
}
