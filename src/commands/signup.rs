use crate::api::forex::SignupForm;
use crate::models::session::ViewState;
use crate::App;
use super::{on_enter_view, require_view};

pub async fn execute(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::SigningUp, "signup")?;

    let form = match args {
        [username, email, password1, password2] => SignupForm {
            username: username.to_string(),
            email: email.to_string(),
            password1: password1.to_string(),
            password2: password2.to_string(),
        },
        _ => {
            return Err(
                "❌ Usage: `signup <username> <email> <password> <confirm>`".to_string(),
            )
        }
    };

    tracing::info!("📝 Signing up {} <{}>", form.username, form.email);
    let response = app.client.signup(&form).await.map_err(|e| {
        tracing::error!("Signup failed for {}: {}", form.username, e);
        format!("❌ Signup failed: {}", e)
    })?;

    // The server logs new accounts straight in
    app.session
        .complete_signup()
        .map_err(|e| format!("❌ {}", e))?;

    println!(
        "✅ {}",
        response
            .message
            .unwrap_or_else(|| format!("Account {} created", form.username))
    );
    on_enter_view(app).await;
    Ok(())
}

pub fn show(app: &mut App) -> Result<(), String> {
    let view = app.session.show_signup().map_err(|e| format!("❌ {}", e))?;
    println!("📝 Showing the {} form", view);
    Ok(())
}
