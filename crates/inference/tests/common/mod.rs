//! Fake Ollama endpoint for driver tests

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const GENERATE_PATH: &str = "/api/generate";

pub struct FakeOllama {
    server: MockServer,
}

impl FakeOllama {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Full URL of the fake generate endpoint.
    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), GENERATE_PATH)
    }

    /// Reply `text` to every prompt not matched by a more specific mock.
    pub async fn reply_to_all(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "codellama",
                "response": text,
                "done": true
            })))
            .with_priority(10)
            .mount(&self.server)
            .await;
    }

    /// Reply `text` when the prompt is exactly `prompt`.
    pub async fn reply_to(&self, prompt: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({ "prompt": prompt })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "codellama",
                "response": text,
                "done": true
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer `prompt` with a bare status code and no JSON body.
    pub async fn fail_on(&self, prompt: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({ "prompt": prompt })))
            .respond_with(ResponseTemplate::new(status).set_body_string("model not loaded"))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer `prompt` with a 200 whose body lacks the `response` field.
    pub async fn empty_body_on(&self, prompt: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({ "prompt": prompt })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
