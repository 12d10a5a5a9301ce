//! JSON-over-HTTP implementation of [`AuthService`].
//!
//! Requests run on tokio's blocking pool so the terminal's event loop stays
//! free while the backend answers. Every endpoint replies with the envelope
//! `{ success, data, error: { message } }`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{AuthError, AuthResult, AuthService, LoginData, User};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    message: Option<String>,
}

/// Registration replies carry either a bare message or `{ message }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegisterData {
    Text(String),
    Message(MessageData),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: Value,
    email: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    id: Value,
    email: String,
    token: String,
}

/// Backends disagree on numeric vs string ids; keep them as text.
fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode an envelope response body.
///
/// Non-2xx statuses and `success: false` map to [`AuthError::Rejected`] with
/// the backend's message, or `fallback` when it sent none.
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str, fallback: &str) -> AuthResult<T> {
    decode_optional(status, body, fallback)?
        .ok_or_else(|| AuthError::Decode("response had no data".to_string()))
}

/// Like [`decode_envelope`], but a successful reply may omit `data`.
fn decode_optional<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> AuthResult<Option<T>> {
    let ok_status = (200..300).contains(&status);
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(e) if ok_status => return Err(AuthError::Decode(format!("bad response: {e}"))),
        Err(_) => return Err(AuthError::Rejected(fallback.to_string())),
    };

    if !ok_status || !envelope.success {
        let message = envelope
            .error
            .and_then(|e| e.message)
            .unwrap_or_else(|| fallback.to_string());
        return Err(AuthError::Rejected(message));
    }

    Ok(envelope.data)
}

/// Decode the registration endpoint. A missing or empty message falls back
/// to a generic confirmation.
fn decode_register(status: u16, body: &str) -> AuthResult<String> {
    let data: Option<RegisterData> = decode_optional(status, body, "Failed to register")?;
    let message = match data {
        Some(RegisterData::Text(text)) => Some(text),
        Some(RegisterData::Message(m)) => m.message,
        Some(RegisterData::Other(value)) => {
            log::debug!("register reply carried unexpected data: {value}");
            None
        },
        None => None,
    };
    Ok(message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Registration successful.".to_string()))
}

/// Decode the verification endpoint, which answers `{ message }` directly.
fn decode_verify(status: u16, body: &str) -> AuthResult<String> {
    let parsed: Option<MessageData> = serde_json::from_str(body).ok();
    let message = parsed.and_then(|m| m.message);
    if (200..300).contains(&status) {
        Ok(message.unwrap_or_else(|| "Email verified.".to_string()))
    } else {
        Err(AuthError::Rejected(
            message.unwrap_or_else(|| "Verification failed.".to_string()),
        ))
    }
}

/// Perform a request and return the status and body text, error statuses
/// included.
fn send(request: ureq::Request, body: Option<Value>) -> AuthResult<(u16, String)> {
    let result = match body {
        Some(json) => request.send_json(json),
        None => request.call(),
    };
    let response = match result {
        Ok(resp) => resp,
        Err(ureq::Error::Status(_, resp)) => resp,
        Err(ureq::Error::Transport(t)) => return Err(AuthError::Transport(t.to_string())),
    };
    let status = response.status();
    let text = response
        .into_string()
        .map_err(|e| AuthError::Transport(format!("reading response: {e}")))?;
    Ok((status, text))
}

/// HTTP client for the auth backend.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpAuthClient {
    /// `base_url` must end with `/`; endpoint names are appended to it.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Run a blocking request on the blocking pool.
    async fn blocking<T, F>(&self, job: F) -> AuthResult<T>
    where
        F: FnOnce(ureq::Agent) -> AuthResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || job(agent))
            .await
            .map_err(|e| AuthError::Transport(format!("request task failed: {e}")))?
    }
}

#[async_trait]
impl AuthService for HttpAuthClient {
    async fn register(&self, email: &str, password: &str) -> AuthResult<String> {
        let url = self.url("register");
        let body = json!({ "email": email, "password": password });
        log::debug!("POST {url}");
        let (status, text) = self
            .blocking(move |agent| send(agent.post(&url), Some(body)))
            .await?;
        decode_register(status, &text)
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<LoginData> {
        let url = self.url("login");
        let body = json!({ "email": email, "password": password });
        log::debug!("POST {url}");
        let (status, text) = self
            .blocking(move |agent| send(agent.post(&url), Some(body)))
            .await?;
        let data: LoginBody = decode_envelope(status, &text, "Failed to log in")?;
        Ok(LoginData {
            user: User::new(id_text(&data.id), data.email),
            token: data.token,
        })
    }

    async fn fetch_user(&self, token: &str) -> AuthResult<User> {
        let url = self.url("user");
        let bearer = format!("Bearer {token}");
        log::debug!("GET {url}");
        let (status, text) = self
            .blocking(move |agent| send(agent.get(&url).set("Authorization", &bearer), None))
            .await?;
        let data: UserData = decode_envelope(status, &text, "Failed to fetch user data")?;
        Ok(User::new(id_text(&data.id), data.email))
    }

    async fn verify(&self, token: &str) -> AuthResult<String> {
        let url = self.url("verify");
        let token = token.to_string();
        log::debug!("GET {url}");
        let (status, text) = self
            .blocking(move |agent| send(agent.get(&url).query("token", &token), None))
            .await?;
        decode_verify(status, &text)
    }
}
