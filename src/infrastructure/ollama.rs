//! HTTP client for an Ollama-compatible inference server
//!
//! Uses two endpoints:
//! - `GET /api/tags` to probe reachability and list installed models
//! - `POST /api/generate` with streaming disabled for each summary

use super::backend::{BackendError, SummaryBackend};
use serde::{Deserialize, Serialize};
use std::io;
use std::time::Duration;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Timeout for the model listing call made before a batch
const PROBE_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client for one base URL and model
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout: Duration,
    agent: ureq::Agent,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&format!("jdigest/{}", env!("CARGO_PKG_VERSION")))
            .build();

        OllamaClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a ureq failure onto the backend error taxonomy
    fn classify(&self, err: ureq::Error, timeout: Duration) -> BackendError {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                self.classify_status(status, &body)
            }
            ureq::Error::Transport(transport) => {
                if transport_timed_out(&transport) {
                    BackendError::Timeout {
                        seconds: timeout.as_secs(),
                    }
                } else {
                    BackendError::Connection {
                        url: self.base_url.clone(),
                        message: transport.to_string(),
                    }
                }
            }
        }
    }

    fn classify_status(&self, status: u16, body: &str) -> BackendError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.trim().to_string());

        if status == 404 && message.contains("not found") {
            BackendError::ModelUnavailable {
                model: self.model.clone(),
                message,
            }
        } else {
            BackendError::Http { status, message }
        }
    }

    fn read_body(
        &self,
        response: ureq::Response,
        timeout: Duration,
    ) -> Result<String, BackendError> {
        response.into_string().map_err(|e| {
            if is_timeout(&e) {
                BackendError::Timeout {
                    seconds: timeout.as_secs(),
                }
            } else {
                BackendError::MalformedResponse(format!("failed to read body: {}", e))
            }
        })
    }
}

impl SummaryBackend for OllamaClient {
    fn probe(&self) -> Result<(), BackendError> {
        let timeout = Duration::from_secs(PROBE_TIMEOUT_SECONDS);
        tracing::debug!(url = %self.base_url, model = %self.model, "probing backend");

        let response = self
            .agent
            .get(&self.endpoint("/api/tags"))
            .timeout(timeout)
            .call()
            .map_err(|e| self.classify(e, timeout))?;
        let body = self.read_body(response, timeout)?;

        let installed = parse_model_list(&body)?;
        if installed.iter().any(|name| model_matches(&self.model, name)) {
            Ok(())
        } else {
            Err(BackendError::ModelUnavailable {
                model: self.model.clone(),
                message: format!("installed models: {}", installed.join(", ")),
            })
        }
    }

    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let payload = serde_json::to_string(&GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        })
        .map_err(|e| BackendError::MalformedResponse(format!("cannot encode request: {}", e)))?;

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending generate request");

        let response = self
            .agent
            .post(&self.endpoint("/api/generate"))
            .set("Content-Type", "application/json")
            .timeout(self.timeout)
            .send_string(&payload)
            .map_err(|e| self.classify(e, self.timeout))?;
        let body = self.read_body(response, self.timeout)?;

        parse_generate_body(&body, &self.model)
    }
}

/// Extract generated text from a `/api/generate` response body
pub fn parse_generate_body(body: &str, model: &str) -> Result<String, BackendError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    if let Some(error) = parsed.error {
        if error.contains("not found") {
            return Err(BackendError::ModelUnavailable {
                model: model.to_string(),
                message: error,
            });
        }
        return Err(BackendError::MalformedResponse(error));
    }

    parsed
        .response
        .ok_or_else(|| BackendError::MalformedResponse("missing 'response' field".to_string()))
}

/// Extract installed model names from a `/api/tags` response body
pub fn parse_model_list(body: &str) -> Result<Vec<String>, BackendError> {
    let parsed: TagsResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(format!("invalid model list: {}", e)))?;

    Ok(parsed
        .models
        .into_iter()
        .flat_map(|m| std::iter::once(m.name).chain(m.model))
        .collect())
}

/// Whether a requested model name refers to an installed one.
///
/// An untagged request matches the `:latest` tag.
pub fn model_matches(requested: &str, installed: &str) -> bool {
    if requested == installed {
        return true;
    }
    !requested.contains(':') && installed == format!("{}:latest", requested)
}

fn transport_timed_out(transport: &ureq::Transport) -> bool {
    let mut source = std::error::Error::source(transport);
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if is_timeout(io_err) {
                return true;
            }
        }
        source = err.source();
    }
    false
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}
