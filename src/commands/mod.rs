pub mod help;
pub mod login;
pub mod logout;
pub mod rates;
pub mod signup;

use std::io::Write;
use crate::models::session::ViewState;
use crate::App;

/// Whether the command loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn print_prompt(app: &App) {
    let marker = if app.loading { "…" } else { ">" };
    print!("[{}] {} ", app.session.view(), marker);
    let _ = std::io::stdout().flush();
}

/// Work done whenever the main view is (re)entered
pub async fn on_enter_view(app: &mut App) {
    match app.session.view() {
        ViewState::Main => {
            if let Err(e) = rates::options(app).await {
                tracing::warn!("Could not load options: {}", e);
                println!("{}", e);
            }
        }
        view => println!("🔐 {} form. Type `help` for commands.", view),
    }
}

/// Reject commands that don't belong to the current view
pub(crate) fn require_view(app: &App, expected: ViewState, command: &str) -> Result<(), String> {
    let current = app.session.view();
    if current == expected {
        Ok(())
    } else {
        Err(format!(
            "❌ `{}` is only available from the {} view (currently {})",
            command, expected, current
        ))
    }
}

pub async fn handle_line(app: &mut App, line: &str) -> Flow {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Flow::Continue;
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "help" | "?" => help::execute(app),
        "quit" | "exit" => return Flow::Quit,
        "login" => login::execute(app, args).await,
        "show-login" => login::show(app),
        "signup" => signup::execute(app, args).await,
        "show-signup" => signup::show(app),
        "logout" => logout::execute(app).await,
        "options" => rates::options(app).await,
        "pairs" => rates::pairs(app),
        "base" => rates::base(app, args),
        "quote" => rates::quote(app, args),
        "ticker" => rates::ticker(app, args),
        "interval" => rates::interval(app, args),
        "rows" => rates::rows(app, args),
        "submit" => rates::submit(app).await,
        other => Err(format!("❌ Unknown command '{}'. Type `help` for usage", other)),
    };

    if let Err(e) = result {
        tracing::warn!("Command {} failed: {}", command, e);
        println!("{}", e);
    }

    Flow::Continue
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quit_and_unknown_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_support::app("http://127.0.0.1:9", dir.path(), "interactive");

        assert_eq!(handle_line(&mut app, "   ").await, Flow::Continue);
        assert_eq!(handle_line(&mut app, "frobnicate").await, Flow::Continue);
        assert_eq!(handle_line(&mut app, "EXIT").await, Flow::Quit);
        assert_eq!(handle_line(&mut app, "quit").await, Flow::Quit);
    }

    #[tokio::test]
    async fn test_main_commands_need_login() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_support::app("http://127.0.0.1:9", dir.path(), "interactive");

        assert_eq!(app.session.view(), ViewState::LoggedOut);
        handle_line(&mut app, "base GBP").await;
        assert_eq!(app.form.base_currency, "EUR");
        assert!(require_view(&app, ViewState::Main, "base").is_err());
    }

    #[tokio::test]
    async fn test_form_switching() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_support::app("http://127.0.0.1:9", dir.path(), "interactive");

        handle_line(&mut app, "show-signup").await;
        assert_eq!(app.session.view(), ViewState::SigningUp);
        handle_line(&mut app, "show-signup").await;
        assert_eq!(app.session.view(), ViewState::SigningUp);
        handle_line(&mut app, "show-login").await;
        assert_eq!(app.session.view(), ViewState::LoggedOut);
    }
}
