use crate::models::session::ViewState;
use crate::App;
use super::{on_enter_view, require_view};

pub async fn execute(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::LoggedOut, "login")?;

    let (username, password) = match args {
        [username, password] => (*username, *password),
        _ => return Err("❌ Usage: `login <username> <password>`".to_string()),
    };

    tracing::info!("🔐 Logging in as {}", username);
    let response = app.client.login(username, password).await.map_err(|e| {
        tracing::error!("Login failed for {}: {}", username, e);
        format!("❌ Login failed: {}", e)
    })?;

    app.session
        .complete_login()
        .map_err(|e| format!("❌ {}", e))?;

    println!(
        "✅ {}",
        response.message.unwrap_or_else(|| format!("Logged in as {}", username))
    );
    on_enter_view(app).await;
    Ok(())
}

/// Switch back from the signup form
pub fn show(app: &mut App) -> Result<(), String> {
    let view = app.session.show_login().map_err(|e| format!("❌ {}", e))?;
    println!("🔐 Showing the {} form", view);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::utils::storage::LoginFlagStore;

    #[tokio::test]
    async fn test_login_success_enters_main_view() {
        let mut server = mockito::Server::new_async().await;
        let login = server
            .mock("POST", "/login/")
            .with_status(200)
            .with_body(r#"{"message": "Login successful"}"#)
            .create_async()
            .await;
        let _options = server
            .mock("GET", "/get-options/")
            .with_status(200)
            .with_body(r#"{"tickers": ["EURUSD"], "intervals": {"Within 2 days": "1"}}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut app = test_support::app(&server.url(), dir.path(), "interactive");

        execute(&mut app, &["alice", "secret"]).await.unwrap();

        login.assert_async().await;
        assert_eq!(app.session.view(), ViewState::Main);
        assert!(LoginFlagStore::new(dir.path().join("session.json")).is_logged_in());
        assert_eq!(app.form.interval.as_deref(), Some("Within 2 days"));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_login_view() {
        let mut server = mockito::Server::new_async().await;
        let _login = server
            .mock("POST", "/login/")
            .with_status(400)
            .with_body(r#"{"__all__": ["Please enter a correct username and password."]}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut app = test_support::app(&server.url(), dir.path(), "interactive");

        let err = execute(&mut app, &["alice", "wrong"]).await.unwrap_err();
        assert!(err.contains("Please enter a correct username and password."));
        assert_eq!(app.session.view(), ViewState::LoggedOut);
        assert!(!LoginFlagStore::new(dir.path().join("session.json")).is_logged_in());
    }

    #[tokio::test]
    async fn test_login_usage() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_support::app("http://127.0.0.1:9", dir.path(), "interactive");
        assert!(execute(&mut app, &["alice"]).await.is_err());
    }
}
