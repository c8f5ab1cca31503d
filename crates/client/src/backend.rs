use anyhow::{anyhow, Result};
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::api::{
    ActionRequest, AnalysisReport, DirectoryNode, FinetuneResponse, ModelInfo, TestingReport,
};
use std::sync::LazyLock;
use tokio::sync::mpsc::UnboundedSender;

use crate::ndjson::NdjsonParser;

// No request timeout: long-running actions (testing pipeline, fine-tune
// kickoff) are bounded only by the transport.
static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

#[derive(Debug, Serialize)]
struct DirectoryPathRequest<'a> {
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Error bodies carry a `detail` string, surfaced verbatim in the UI.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Event delivered to the UI while a chat response streams in.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Token(String),
    Done,
}

/// Client for the analysis/testing backend.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base: String,
}

impl BackendClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            base: base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base.trim_end_matches('/'), path)
    }

    /// Maps a non-success response to the backend's `detail` message, or a
    /// generic fallback when the body isn't the expected error shape.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.detail);
        match detail {
            Some(detail) => Err(anyhow!(detail)),
            None => Err(anyhow!("Backend returned {}", status)),
        }
    }

    /// Fetches the local Ollama model list proxied by the backend.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let resp = self.http.get(self.url("/ollama/models")).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Requests a fresh directory listing rooted at `path`.
    pub async fn list_directory(&self, path: &str) -> Result<DirectoryNode> {
        let resp = self
            .http
            .post(self.url("/list-directory"))
            .json(&DirectoryPathRequest { path })
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn analysis_report(&self, req: &ActionRequest) -> Result<AnalysisReport> {
        let resp = self
            .http
            .post(self.url("/code-analysis-report"))
            .json(req)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn run_testing_pipeline(&self, req: &ActionRequest) -> Result<TestingReport> {
        let resp = self
            .http
            .post(self.url("/run-testing-pipeline"))
            .json(req)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn finetune(&self, req: &ActionRequest) -> Result<FinetuneResponse> {
        let resp = self
            .http
            .post(self.url("/finetune"))
            .json(req)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Streams a chat completion, sending one `Token` per parsed line and
    /// `Done` when the body ends. Transport failures propagate as `Err`;
    /// the caller decides whether to surface them (the chat page only
    /// logs them).
    pub async fn chat_stream(
        &self,
        model: &str,
        prompt: &str,
        tx: UnboundedSender<StreamEvent>,
    ) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/ollama/chat"))
            .json(&ChatRequest { model, prompt })
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let mut stream = resp.bytes_stream();
        let mut parser = NdjsonParser::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| anyhow!("stream read error: {}", e))?;
            for parsed in parser.feed(&bytes) {
                if let Some(token) = parsed.token {
                    if tx.send(StreamEvent::Token(token)).is_err() {
                        // Receiver dropped; nobody is rendering this stream.
                        return Ok(());
                    }
                }
            }
        }

        let _ = tx.send(StreamEvent::Done);
        Ok(())
    }
}
