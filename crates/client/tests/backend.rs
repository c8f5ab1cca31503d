//! Integration tests against an in-process mock backend.

use client::{BackendClient, StreamEvent};
use shared::api::ActionRequest;
use tiny_http::{Response, Server, StatusCode};

/// Spins up a one-shot HTTP server on an ephemeral port and returns its
/// base URL. The handler runs for every request until the test ends.
fn spawn_backend<F>(handler: F) -> String
where
    F: Fn(tiny_http::Request) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind mock server");
    let port = server
        .server_addr()
        .to_ip()
        .expect("mock server has an IP address")
        .port();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            handler(request);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn sample_request() -> ActionRequest {
    ActionRequest {
        base_path: "/home/user/project".to_string(),
        selected_items: vec!["/home/user/project/main.py".to_string()],
        ollama_model_name: "custom-deepseek-coder".to_string(),
    }
}

#[tokio::test]
async fn list_directory_parses_tree() {
    let base = spawn_backend(|req| {
        assert_eq!(req.url(), "/api/v1/list-directory");
        let body = r#"{
            "name": "project",
            "path": "/home/user/project",
            "type": "folder",
            "children": [
                {"name": "main.py", "path": "/home/user/project/main.py", "type": "file"}
            ]
        }"#;
        let _ = req.respond(Response::from_string(body));
    });

    let client = BackendClient::new(base);
    let tree = client.list_directory("/home/user/project").await.unwrap();
    assert!(tree.is_folder());
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].path, "/home/user/project/main.py");
}

#[tokio::test]
async fn error_detail_is_surfaced_verbatim() {
    let base = spawn_backend(|req| {
        let resp = Response::from_string(r#"{"detail": "Directory not found."}"#)
            .with_status_code(StatusCode(404));
        let _ = req.respond(resp);
    });

    let client = BackendClient::new(base);
    let err = client.list_directory("/nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Directory not found.");
}

#[tokio::test]
async fn error_without_detail_gets_generic_message() {
    let base = spawn_backend(|req| {
        let resp =
            Response::from_string("Internal Server Error").with_status_code(StatusCode(500));
        let _ = req.respond(resp);
    });

    let client = BackendClient::new(base);
    let err = client.list_directory("/x").await.unwrap_err();
    assert!(err.to_string().starts_with("Backend returned"));
}

#[tokio::test]
async fn list_models_reads_names() {
    let base = spawn_backend(|req| {
        assert_eq!(req.url(), "/api/v1/ollama/models");
        let body = r#"[{"name": "deepseek-coder:6.7b"}, {"name": "llama3.2:3b"}]"#;
        let _ = req.respond(Response::from_string(body));
    });

    let client = BackendClient::new(base);
    let models = client.list_models().await.unwrap();
    let names: Vec<String> = models.into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["deepseek-coder:6.7b", "llama3.2:3b"]);
}

#[tokio::test]
async fn finetune_returns_message() {
    let base = spawn_backend(|req| {
        let body = r#"{"message": "Finetuning process started.", "files_for_training": 3}"#;
        let _ = req.respond(Response::from_string(body));
    });

    let client = BackendClient::new(base);
    let resp = client.finetune(&sample_request()).await.unwrap();
    assert_eq!(resp.message, "Finetuning process started.");
    assert_eq!(resp.files_for_training, Some(3));
}

#[tokio::test]
async fn chat_stream_delivers_tokens_then_done() {
    let base = spawn_backend(|req| {
        assert_eq!(req.url(), "/api/v1/ollama/chat");
        let body = "{\"token\":\"Hel\"}\n{\"token\":\"lo\"}\n{\"error\":\"ignored\"}\n";
        let _ = req.respond(Response::from_string(body));
    });

    let client = BackendClient::new(base);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client
        .chat_stream("llama3.2:3b", "say hello", tx)
        .await
        .unwrap();

    let mut transcript = String::new();
    let mut done = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            StreamEvent::Token(t) => transcript.push_str(&t),
            StreamEvent::Done => done = true,
        }
    }
    assert_eq!(transcript, "Hello");
    assert!(done);
}

#[tokio::test]
async fn chat_stream_propagates_http_errors() {
    let base = spawn_backend(|req| {
        let resp = Response::from_string(r#"{"detail": "Could not connect to Ollama"}"#)
            .with_status_code(StatusCode(503));
        let _ = req.respond(resp);
    });

    let client = BackendClient::new(base);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let err = client.chat_stream("m", "p", tx).await.unwrap_err();
    assert_eq!(err.to_string(), "Could not connect to Ollama");
    // No Done event: the receiver just sees the channel close.
    assert!(rx.try_recv().is_err());
}
