//! Core types for the Code Workbench app
//!
//! Type definitions for pages, chat messages, backend action results, and
//! the main AppState.

use client::StreamEvent;
use shared::api::{AnalysisReport, DirectoryNode, FinetuneResponse, TestingReport};
use shared::settings::AppSettings;
use std::collections::HashSet;
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// Current top-level page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Analyzer,
    Chat,
}

/// One of the three backend actions triggered from the Analyzer page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Analysis,
    Testing,
    Finetune,
}

impl ActionKind {
    pub fn progress_label(&self) -> &'static str {
        match self {
            ActionKind::Analysis => "Analyzing code...",
            ActionKind::Testing => "Running testing pipeline...",
            ActionKind::Finetune => "Starting fine-tuning...",
        }
    }
}

/// A chat message as rendered in the history pane.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: String, // "user" or "assistant"
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
            timestamp: chrono::Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
            timestamp: chrono::Local::now().format("%H:%M").to_string(),
        }
    }
}

/// Parsed payload of a completed backend action.
#[derive(Debug)]
pub enum ActionOutput {
    Analysis(AnalysisReport),
    Testing(TestingReport),
    Finetune(FinetuneResponse),
}

/// Result from a background action thread.
#[derive(Debug)]
pub struct ActionResult {
    pub output: Result<ActionOutput, String>,
}

/// Transient notification, auto-dismissed after a fixed delay.
#[derive(Debug)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

/// Main application state
pub struct AppState {
    pub settings: AppSettings,
    pub current_page: Page,

    // Analyzer page
    pub path_input: String,
    /// Last loaded directory tree, replaced wholesale per listing.
    pub tree: Option<DirectoryNode>,
    /// Paths currently checked. Presence-only; a folder's entry is
    /// independent of its children's entries.
    pub selected: HashSet<String>,
    /// One in-flight action or directory load at a time.
    pub busy: bool,
    pub busy_label: String,
    pub analysis_report: Option<AnalysisReport>,
    pub testing_report: Option<TestingReport>,

    // Chat page
    pub models: Vec<String>,
    pub selected_model: Option<String>,
    pub chat_history: Vec<ChatMessage>,
    pub chat_input: String,
    /// Accumulator for the streaming assistant reply; mirrored into the
    /// last history entry as tokens arrive.
    pub assistant_response: String,
    pub streaming: bool,
    pub editor_content: String,

    pub toast: Option<Toast>,

    // Background result channels, polled each frame
    pub tree_rx: Option<Receiver<Result<DirectoryNode, String>>>,
    pub action_rx: Option<Receiver<ActionResult>>,
    pub models_rx: Option<Receiver<Result<Vec<String>, String>>>,
    pub chat_rx: Option<tokio::sync::mpsc::UnboundedReceiver<StreamEvent>>,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            current_page: Page::Analyzer,
            path_input: String::new(),
            tree: None,
            selected: HashSet::new(),
            busy: false,
            busy_label: String::new(),
            analysis_report: None,
            testing_report: None,
            models: Vec::new(),
            selected_model: None,
            chat_history: Vec::new(),
            chat_input: String::new(),
            assistant_response: String::new(),
            streaming: false,
            editor_content: String::new(),
            toast: None,
            tree_rx: None,
            action_rx: None,
            models_rx: None,
            chat_rx: None,
        }
    }
}
