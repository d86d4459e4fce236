use serde_json::Value;

/// Extract a readable message from an API error body
///
/// Handles the shapes the prediction server sends:
/// `{"error": "MetaTrader5 login failed"}` -> "MetaTrader5 login failed"
/// `{"password2": ["The two password fields didn't match."]}`
///     -> "password2: The two password fields didn't match."
///
/// Anything else is returned trimmed.
pub fn extract_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty response)".to_string();
    }

    let fields = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(fields)) => fields,
        _ => return trimmed.to_string(),
    };

    for key in ["error", "message", "detail"] {
        if let Some(Value::String(msg)) = fields.get(key) {
            return msg.clone();
        }
    }

    // Form validation errors: field -> [messages]
    let mut parts = Vec::new();
    for (field, value) in &fields {
        let text = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Object(obj) => obj
                        .get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string()),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        if field == "__all__" || field == "non_field_errors" {
            parts.push(text);
        } else {
            parts.push(format!("{}: {}", field, text));
        }
    }

    if parts.is_empty() {
        trimmed.to_string()
    } else {
        parts.join("; ")
    }
}
