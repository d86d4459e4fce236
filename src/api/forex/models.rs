use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::models::interval::IntervalOption;

/// Raw body of `GET /get-options/`
#[derive(Debug, Clone, Deserialize)]
pub struct RawOptionsResponse {
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub intervals: Map<String, Value>,
}

/// Tickers and interval options, interval values normalized to strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsResponse {
    pub tickers: Vec<String>,
    pub intervals: Vec<IntervalOption>,
}

impl From<RawOptionsResponse> for OptionsResponse {
    fn from(raw: RawOptionsResponse) -> Self {
        let intervals = raw
            .intervals
            .into_iter()
            .map(|(label, value)| IntervalOption {
                label,
                value: match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect();

        Self {
            tickers: raw.tickers,
            intervals,
        }
    }
}

/// Form body for `POST /login/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Form body for `POST /signup/`
#[derive(Debug, Clone, Serialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

/// Success body of the auth endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    pub message: Option<String>,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400 Bad Request, usually form validation
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden, e.g. a missing CSRF token
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
