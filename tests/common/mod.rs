#![allow(dead_code)]

use assert_cmd::Command;
use std::net::TcpListener;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{matchers, Mock, MockServer, Request, ResponseTemplate};

pub fn jdigest_cmd() -> Command {
    let mut cmd = Command::cargo_bin("jdigest").unwrap();
    cmd.env_remove("JDIGEST_MODEL");
    cmd.env_remove("JDIGEST_URL");
    cmd.env_remove("JDIGEST_CONFIG");
    cmd.env_remove("JDIGEST_LOG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// How the mock answers a generate request
pub enum Reply {
    Text(String),
    Status(u16, String),
    Hang(Duration),
}

/// Ollama-compatible mock server usable from blocking tests.
///
/// The server itself runs on wiremock's background thread, so the binary and
/// the blocking client can talk to it while the test thread is outside the
/// runtime.
pub struct StubBackend {
    pub url: String,
    server: MockServer,
    runtime: Runtime,
}

impl StubBackend {
    /// Serve `models` from /api/tags and answer /api/generate with `reply(prompt)`
    pub fn start<F>(models: &[&str], reply: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());

        let listed: Vec<serde_json::Value> = models
            .iter()
            .map(|m| serde_json::json!({ "name": m, "model": m }))
            .collect();

        runtime.block_on(async {
            Mock::given(matchers::method("GET"))
                .and(matchers::path("/api/tags"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({ "models": listed })),
                )
                .mount(&server)
                .await;

            Mock::given(matchers::method("POST"))
                .and(matchers::path("/api/generate"))
                .respond_with(move |request: &Request| generate_response(request, &reply))
                .mount(&server)
                .await;
        });

        StubBackend {
            url: server.uri(),
            server,
            runtime,
        }
    }

    /// Echo backend: "Summary of: <prompt>"
    pub fn echo(models: &[&str]) -> Self {
        Self::start(models, |prompt| Reply::Text(format!("Summary of: {}", prompt)))
    }

    /// Requests seen so far, as "METHOD /path"
    pub fn requests(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }

    pub fn generate_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.as_str() == "POST /api/generate")
            .count()
    }
}

fn generate_response<F>(request: &Request, reply: &F) -> ResponseTemplate
where
    F: Fn(&str) -> Reply,
{
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap_or_default();
    let prompt = body["prompt"].as_str().unwrap_or("");

    match reply(prompt) {
        Reply::Text(text) => ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": body["model"],
            "response": text,
            "done": true
        })),
        Reply::Status(code, message) => {
            ResponseTemplate::new(code).set_body_json(serde_json::json!({ "error": message }))
        }
        Reply::Hang(duration) => ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "response": "too late", "done": true }))
            .set_delay(duration),
    }
}

/// A URL nothing is listening on
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
