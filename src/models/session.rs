//! View state models

use std::fmt;

/// Which screen the client is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    LoggedOut,
    SigningUp,
    Main,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::LoggedOut => f.write_str("login"),
            ViewState::SigningUp => f.write_str("signup"),
            ViewState::Main => f.write_str("main"),
        }
    }
}
