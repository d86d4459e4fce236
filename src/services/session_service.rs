use thiserror::Error;
use tracing::info;
use crate::models::session::ViewState;
use crate::utils::storage::{LoginFlagStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} from the {from} view")]
    InvalidTransition { from: ViewState, action: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Login / signup / main view switching.
///
/// The persisted flag is read once in `init` and only written by the
/// login, signup and logout transitions.
#[derive(Debug)]
pub struct SessionModel {
    view: ViewState,
    store: LoginFlagStore,
}

impl SessionModel {
    pub fn init(store: LoginFlagStore) -> Self {
        let view = if store.is_logged_in() {
            ViewState::Main
        } else {
            ViewState::LoggedOut
        };
        info!("Starting in {} view", view);
        Self { view, store }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn show_signup(&mut self) -> Result<ViewState, SessionError> {
        self.transition(&[ViewState::LoggedOut], "open the signup form", ViewState::SigningUp)
    }

    pub fn show_login(&mut self) -> Result<ViewState, SessionError> {
        self.transition(&[ViewState::SigningUp], "open the login form", ViewState::LoggedOut)
    }

    /// Apply a successful `POST /login/`
    pub fn complete_login(&mut self) -> Result<ViewState, SessionError> {
        self.ensure(&[ViewState::LoggedOut], "log in")?;
        self.store.set_logged_in()?;
        Ok(self.enter(ViewState::Main))
    }

    /// Apply a successful `POST /signup/`; the server logs the new user in
    pub fn complete_signup(&mut self) -> Result<ViewState, SessionError> {
        self.ensure(&[ViewState::SigningUp], "sign up")?;
        self.store.set_logged_in()?;
        Ok(self.enter(ViewState::Main))
    }

    /// Apply a successful `POST /logout/`
    pub fn complete_logout(&mut self) -> Result<ViewState, SessionError> {
        self.ensure(&[ViewState::Main], "log out")?;
        self.store.clear()?;
        Ok(self.enter(ViewState::LoggedOut))
    }

    fn transition(
        &mut self,
        allowed: &[ViewState],
        action: &'static str,
        to: ViewState,
    ) -> Result<ViewState, SessionError> {
        self.ensure(allowed, action)?;
        Ok(self.enter(to))
    }

    fn ensure(&self, allowed: &[ViewState], action: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { from: self.view, action })
        }
    }

    fn enter(&mut self, to: ViewState) -> ViewState {
        tracing::debug!("View {} -> {}", self.view, to);
        self.view = to;
        to
    }
}
