use crate::models::session::ViewState;
use crate::App;
use super::require_view;

/// Log out on the server first; the local view only changes if that worked
pub async fn execute(app: &mut App) -> Result<(), String> {
    require_view(app, ViewState::Main, "logout")?;

    app.client.logout().await.map_err(|e| {
        tracing::error!("Logout failed: {}", e);
        format!("❌ Logout failed: {}", e)
    })?;

    app.session
        .complete_logout()
        .map_err(|e| format!("❌ {}", e))?;

    println!("👋 Logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::utils::storage::LoginFlagStore;

    #[tokio::test]
    async fn test_logout_clears_flag() {
        let mut server = mockito::Server::new_async().await;
        let _logout = server
            .mock("POST", "/logout/")
            .with_status(200)
            .with_body(r#"{"message": "Logout successful"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = LoginFlagStore::new(dir.path().join("session.json"));
        store.set_logged_in().unwrap();
        let mut app = test_support::app(&server.url(), dir.path(), "interactive");
        assert_eq!(app.session.view(), ViewState::Main);

        execute(&mut app).await.unwrap();
        assert_eq!(app.session.view(), ViewState::LoggedOut);
        assert!(!store.is_logged_in());
    }

    #[tokio::test]
    async fn test_failed_logout_stays_logged_in() {
        let mut server = mockito::Server::new_async().await;
        let _logout = server
            .mock("POST", "/logout/")
            .with_status(500)
            .with_body(r#"{"error": "session backend unavailable"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = LoginFlagStore::new(dir.path().join("session.json"));
        store.set_logged_in().unwrap();
        let mut app = test_support::app(&server.url(), dir.path(), "interactive");

        let err = execute(&mut app).await.unwrap_err();
        assert!(err.contains("session backend unavailable"));
        assert_eq!(app.session.view(), ViewState::Main);
        assert!(store.is_logged_in());
    }
}
