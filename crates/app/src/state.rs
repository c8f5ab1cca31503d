//! State transitions and background execution for the Code Workbench app
//!
//! Every network call runs on a spawned thread that owns its own tokio
//! runtime and reports back over a channel polled once per frame.

use crate::types::*;
use client::{BackendClient, StreamEvent};
use shared::api::ActionRequest;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;

const TOAST_DURATION: Duration = Duration::from_secs(4);

impl AppState {
    fn client(&self) -> BackendClient {
        BackendClient::new(self.settings.backend_url.clone())
    }

    // --- Toasts ---

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    /// Called each frame; drops the toast once its display time is up.
    pub fn expire_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed() >= TOAST_DURATION {
                self.toast = None;
            }
        }
    }

    // --- Report navigation ---

    /// Back button from either report view. Selection survives; only a
    /// fresh directory load clears it.
    pub fn close_reports(&mut self) {
        self.analysis_report = None;
        self.testing_report = None;
    }

    // --- Directory loader ---

    /// Validates the path input and resets tree + selection. Returns
    /// false (with a toast) when the input is blank.
    pub(crate) fn begin_directory_load(&mut self) -> bool {
        if self.path_input.trim().is_empty() {
            self.show_error("Please enter a directory path.");
            return false;
        }
        self.tree = None;
        self.selected.clear();
        self.busy = true;
        self.busy_label = "Loading directory...".to_string();
        true
    }

    pub fn load_directory(&mut self) {
        if !self.begin_directory_load() {
            return;
        }
        let (tx, rx) = channel();
        self.tree_rx = Some(rx);
        let client = self.client();
        let path = self.path_input.trim().to_string();

        std::thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt
                    .block_on(client.list_directory(&path))
                    .map_err(|e| e.to_string()),
                Err(e) => Err(format!("Failed to start async runtime: {}", e)),
            };
            let _ = tx.send(result);
        });
    }

    pub fn poll_directory(&mut self) {
        if let Some(rx) = &self.tree_rx {
            if let Ok(result) = rx.try_recv() {
                self.tree_rx = None;
                self.busy = false;
                self.busy_label.clear();
                match result {
                    Ok(tree) => self.tree = Some(tree),
                    Err(e) => self.show_error(e),
                }
            }
        }
    }

    // --- Action dispatcher ---

    /// Precondition check for the three action endpoints. Returns `None`
    /// (with a validation toast) when nothing is selected; no request is
    /// issued in that case.
    pub(crate) fn build_action_request(&mut self) -> Option<ActionRequest> {
        if self.selected.is_empty() {
            self.show_error("Please select at least one file or folder.");
            return None;
        }
        let mut selected_items: Vec<String> = self.selected.iter().cloned().collect();
        selected_items.sort();
        Some(ActionRequest {
            base_path: self.path_input.trim().to_string(),
            selected_items,
            ollama_model_name: self
                .selected_model
                .clone()
                .unwrap_or_else(|| self.settings.default_model.clone()),
        })
    }

    pub fn run_action(&mut self, kind: ActionKind) {
        let Some(req) = self.build_action_request() else {
            return;
        };
        self.busy = true;
        self.busy_label = kind.progress_label().to_string();
        let (tx, rx) = channel();
        self.action_rx = Some(rx);
        let client = self.client();

        std::thread::spawn(move || {
            let output = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt
                    .block_on(async {
                        match kind {
                            ActionKind::Analysis => client
                                .analysis_report(&req)
                                .await
                                .map(ActionOutput::Analysis),
                            ActionKind::Testing => client
                                .run_testing_pipeline(&req)
                                .await
                                .map(ActionOutput::Testing),
                            ActionKind::Finetune => {
                                client.finetune(&req).await.map(ActionOutput::Finetune)
                            }
                        }
                    })
                    .map_err(|e| e.to_string()),
                Err(e) => Err(format!("Failed to start async runtime: {}", e)),
            };
            let _ = tx.send(ActionResult { output });
        });
    }

    pub fn poll_action(&mut self) {
        if let Some(rx) = &self.action_rx {
            if let Ok(result) = rx.try_recv() {
                self.action_rx = None;
                self.busy = false;
                self.busy_label.clear();
                match result.output {
                    Ok(ActionOutput::Analysis(report)) => self.analysis_report = Some(report),
                    Ok(ActionOutput::Testing(report)) => self.testing_report = Some(report),
                    Ok(ActionOutput::Finetune(resp)) => self.show_info(resp.message),
                    Err(e) => self.show_error(e),
                }
            }
        }
    }

    // --- Model list ---

    pub fn fetch_models(&mut self) {
        if self.models_rx.is_some() {
            return;
        }
        let (tx, rx) = channel();
        self.models_rx = Some(rx);
        let client = self.client();

        std::thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt
                    .block_on(client.list_models())
                    .map(|models| models.into_iter().map(|m| m.name).collect::<Vec<_>>())
                    .map_err(|e| e.to_string()),
                Err(e) => Err(format!("Failed to start async runtime: {}", e)),
            };
            let _ = tx.send(result);
        });
    }

    pub fn poll_models(&mut self) {
        if let Some(rx) = &self.models_rx {
            if let Ok(result) = rx.try_recv() {
                self.models_rx = None;
                match result {
                    Ok(models) => {
                        // An empty list leaves the selector empty and the
                        // chat submit path inert.
                        if self.selected_model.is_none() {
                            self.selected_model = if models.contains(&self.settings.default_model)
                            {
                                Some(self.settings.default_model.clone())
                            } else {
                                models.first().cloned()
                            };
                        }
                        self.models = models;
                    }
                    Err(e) => self.show_error(format!("Could not load models: {}", e)),
                }
            }
        }
    }

    // --- Chat ---

    pub fn send_prompt(&mut self) {
        let prompt = self.chat_input.trim().to_string();
        if prompt.is_empty() || self.streaming {
            return;
        }
        let Some(model) = self.selected_model.clone() else {
            return;
        };
        self.chat_input.clear();
        self.chat_history.push(ChatMessage::user(prompt.clone()));
        // Placeholder, overwritten in place as tokens arrive.
        self.chat_history
            .push(ChatMessage::assistant("...".to_string()));
        self.assistant_response.clear();
        self.streaming = true;

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        self.chat_rx = Some(rx);
        let client = self.client();

        std::thread::spawn(move || match tokio::runtime::Runtime::new() {
            Ok(rt) => {
                // The chat path surfaces no toast on transport failure;
                // the placeholder message just stays put.
                if let Err(e) = rt.block_on(client.chat_stream(&model, &prompt, tx)) {
                    tracing::warn!("chat stream failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("failed to start async runtime: {}", e),
        });
    }

    pub fn poll_chat(&mut self) {
        let Some(mut rx) = self.chat_rx.take() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(StreamEvent::Token(token)) => {
                    self.assistant_response.push_str(&token);
                    if let Some(last) = self.chat_history.last_mut() {
                        last.content = self.assistant_response.clone();
                    }
                }
                Ok(StreamEvent::Done) => {
                    self.streaming = false;
                    if let Some(code) = client::extract_code_block(&self.assistant_response) {
                        self.editor_content = code;
                    }
                    return;
                }
                Err(TryRecvError::Empty) => {
                    self.chat_rx = Some(rx);
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    // Stream thread ended without a Done (transport
                    // failure); leave the transcript as-is.
                    self.streaming = false;
                    return;
                }
            }
        }
    }
}
