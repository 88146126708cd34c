//! Identity provider seam and the wiring that maps session changes onto the
//! signed-in / guest toggles. The quiz state machine never consults this.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::{SessionView, UserIdentity};
use tokio::{sync::watch, task::JoinHandle};
use tracing::info;

use crate::presenter::Presenter;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;
    /// Receiver that observes every session change.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;
    async fn sign_out(&self) -> Result<()>;
}

/// In-process provider for front ends without a hosted identity service.
pub struct LocalIdentityProvider {
    state: watch::Sender<Option<UserIdentity>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    pub async fn sign_in(&self, identifier: &str) -> Result<UserIdentity> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(anyhow!("identifier must not be empty"));
        }
        let user = UserIdentity(identifier.to_string());
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn current_user(&self) -> Option<UserIdentity> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.state.subscribe()
    }

    async fn sign_out(&self) -> Result<()> {
        self.state.send_replace(None);
        Ok(())
    }
}

pub struct AuthWiring {
    provider: Arc<dyn IdentityProvider>,
    presenter: Arc<dyn Presenter>,
}

impl AuthWiring {
    pub fn new(provider: Arc<dyn IdentityProvider>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            provider,
            presenter,
        }
    }

    pub fn apply(&self, user: Option<UserIdentity>) -> SessionView {
        let view = SessionView::from_user(user);
        match &view {
            SessionView::SignedIn { identifier } => {
                info!(user = %identifier.0, "auth: showing signed-in view");
            }
            SessionView::Guest => info!("auth: showing guest view"),
        }
        self.presenter.set_session_view(&view);
        view
    }

    /// Applies the current session, then follows every change until the provider goes away.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.provider.subscribe();
        self.apply(changes.borrow_and_update().clone());
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let user = changes.borrow_and_update().clone();
                self.apply(user);
            }
        })
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.provider.sign_out().await
    }
}

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
mod tests;
