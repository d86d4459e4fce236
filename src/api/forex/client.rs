use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Url};
use std::sync::Arc;
use super::models::{
    ApiError, LoginForm, MessageResponse, OptionsResponse, RawOptionsResponse, SignupForm,
};
use crate::models::form::RatesRequest;
use crate::models::rates::RatesPayload;
use crate::services::projection_service;
use crate::utils::errors::extract_error_message;
use tracing::{debug, warn};

const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "x-csrftoken";

/// Client for the prediction server's `/api` endpoints.
///
/// Keeps a cookie jar so the session cookie set by login and the CSRF cookie
/// travel with later requests.
pub struct ForexApiClient {
    http_client: HttpClient,
    cookie_jar: Arc<Jar>,
    base_url: String,
}

impl ForexApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000/api";

    /// Create a client with a custom base URL, e.g. `https://host/api`
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let cookie_jar = Arc::new(Jar::default());
        let http_client = HttpClient::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            cookie_jar,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path)
    }

    /// Value of the `csrftoken` cookie for the API host, if the server has set one
    fn csrf_token(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let cookies = self.cookie_jar.cookies(&url)?;
        let cookies = cookies.to_str().ok()?;

        cookies
            .split(';')
            .map(str::trim)
            .find_map(|cookie| cookie.strip_prefix(CSRF_COOKIE)?.strip_prefix('='))
            .map(str::to_string)
    }

    /// Headers sent with every POST
    fn create_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.csrf_token() {
            match HeaderValue::from_str(&token) {
                Ok(value) => {
                    headers.insert(CSRF_HEADER, value);
                }
                Err(e) => warn!("Ignoring unusable CSRF cookie: {}", e),
            }
        }
        headers
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            Err(Self::handle_error_response(status, response).await)
        }
    }

    /// Any 2xx counts as success; the body is only kept for logging
    async fn read_message(response: reqwest::Response) -> MessageResponse {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str(&body).unwrap_or_default()
    }

    /// GET /get-options/
    ///
    /// Tickers the server can quote and the interval options, in server order.
    pub async fn get_options(&self) -> Result<OptionsResponse, ApiError> {
        let url = self.endpoint("get-options");

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        let raw = response
            .json::<RawOptionsResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        let options = OptionsResponse::from(raw);
        debug!(
            "Loaded {} tickers and {} intervals",
            options.tickers.len(),
            options.intervals.len()
        );
        Ok(options)
    }

    /// POST /get-rates/
    ///
    /// # Returns
    /// * `Ok(RatesPayload)` - the raw response object, one entry per model plus the majority fields
    /// * `Err(ApiError)` - transport, status or decoding failure
    pub async fn get_rates(&self, request: &RatesRequest) -> Result<RatesPayload, ApiError> {
        let url = self.endpoint("get-rates");

        let response = self.http_client
            .post(&url)
            .headers(self.create_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        projection_service::payload_from_value(body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// POST /login/ (form-encoded)
    pub async fn login(&self, username: &str, password: &str) -> Result<MessageResponse, ApiError> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_form("login", &form).await
    }

    /// POST /signup/ (form-encoded). The server logs the new account in.
    pub async fn signup(&self, form: &SignupForm) -> Result<MessageResponse, ApiError> {
        self.post_form("signup", form).await
    }

    /// POST /logout/
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint("logout");

        let response = self.http_client
            .post(&url)
            .headers(self.create_headers())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        Ok(Self::read_message(response).await)
    }

    async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        form: &T,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(path);

        let response = self.http_client
            .post(&url)
            .headers(self.create_headers())
            .form(form)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        Ok(Self::read_message(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> ForexApiClient {
        ForexApiClient::with_base_url(format!("{}/api", server.url())).unwrap()
    }

    #[tokio::test]
    async fn test_get_options_keeps_interval_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/get-options/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tickers": ["EURUSD", "GBPUSD"], "intervals": {"Within 2 days": 1, "Within 2 Months": 16408, "Within 1 Month": "16388"}}"#)
            .create_async()
            .await;

        let options = client_for(&server).get_options().await.unwrap();

        assert_eq!(options.tickers, vec!["EURUSD", "GBPUSD"]);
        let labels: Vec<&str> = options.intervals.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Within 2 days", "Within 2 Months", "Within 1 Month"]);
        let values: Vec<&str> = options.intervals.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["1", "16408", "16388"]);
    }

    #[tokio::test]
    async fn test_get_rates_posts_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/get-rates/")
            .match_body(Matcher::Json(json!({"ticker": "EURUSD", "interval": "Within 2 days"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"10_rows": {"historical": [[0, 1.1]], "predicted": [[60, 1.2]], "trend": "neutral", "message": "Neutral Trend"}, "majority_trend": "neutral", "majority_message": "anytime"}"#)
            .create_async()
            .await;

        let request = RatesRequest {
            ticker: "EURUSD".to_string(),
            interval: "Within 2 days".to_string(),
            no_of_rows: None,
        };
        let payload = client_for(&server).get_rates(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload.series().count(), 1);
        assert_eq!(payload.majority_message(), "anytime");
    }

    #[tokio::test]
    async fn test_get_rates_sends_row_count_when_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/get-rates/")
            .match_body(Matcher::Json(json!({"ticker": "EURUSD", "interval": "1440", "no_of_rows": 30})))
            .with_status(200)
            .with_body(r#"{"historical": [], "predicted": []}"#)
            .create_async()
            .await;

        let request = RatesRequest {
            ticker: "EURUSD".to_string(),
            interval: "1440".to_string(),
            no_of_rows: Some(30),
        };
        let payload = client_for(&server).get_rates(&request).await.unwrap();

        mock.assert_async().await;
        assert!(payload.is_single_series());
    }

    #[tokio::test]
    async fn test_get_rates_rejects_non_object_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/get-rates/")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let request = RatesRequest {
            ticker: "EURUSD".to_string(),
            interval: "Within 2 days".to_string(),
            no_of_rows: None,
        };
        let err = client_for(&server).get_rates(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_error_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/get-rates/")
            .with_status(500)
            .with_body(r#"{"error": "MetaTrader5 login failed"}"#)
            .create_async()
            .await;

        let request = RatesRequest {
            ticker: "EURUSD".to_string(),
            interval: "Within 2 days".to_string(),
            no_of_rows: None,
        };
        let err = client_for(&server).get_rates(&request).await.unwrap_err();
        assert_eq!(err, ApiError::ServerError(500, "MetaTrader5 login failed".to_string()));
    }

    #[tokio::test]
    async fn test_login_is_form_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/login/")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "alice".into()),
                Matcher::UrlEncoded("password".into(), "s3cret".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"message": "User logged in successfully"}"#)
            .create_async()
            .await;

        let reply = client_for(&server).login("alice", "s3cret").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply.message.as_deref(), Some("User logged in successfully"));
    }

    #[tokio::test]
    async fn test_signup_validation_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/signup/")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "bob".into()),
                Matcher::UrlEncoded("email".into(), "bob@example.com".into()),
                Matcher::UrlEncoded("password1".into(), "a".into()),
                Matcher::UrlEncoded("password2".into(), "b".into()),
            ]))
            .with_status(400)
            .with_body(r#"{"password2": ["The two password fields didn't match."]}"#)
            .create_async()
            .await;

        let form = SignupForm {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password1: "a".to_string(),
            password2: "b".to_string(),
        };
        let err = client_for(&server).signup(&form).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err,
            ApiError::BadRequest("password2: The two password fields didn't match.".to_string())
        );
    }

    #[tokio::test]
    async fn test_csrf_cookie_is_echoed_on_post() {
        let mut server = mockito::Server::new_async().await;
        let _options = server
            .mock("GET", "/api/get-options/")
            .with_status(200)
            .with_header("set-cookie", "csrftoken=tok123; Path=/")
            .with_body(r#"{"tickers": [], "intervals": {}}"#)
            .create_async()
            .await;
        let logout = server
            .mock("POST", "/api/logout/")
            .match_header("x-csrftoken", "tok123")
            .with_status(200)
            .with_body(r#"{"message": "User logged out successfully"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.get_options().await.unwrap();
        client.logout().await.unwrap();

        logout.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        // Nothing listens on port 9 locally
        let client = ForexApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        let err = client.logout().await.unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
