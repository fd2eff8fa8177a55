//! Drives the chat REPL with scripted input against a mock chat API.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use roadmap_agent::app::{run_repl, ChatSession};
use roadmap_agent::{ChatClient, RoadmapAgent, SchedulerConfig};

async fn session_for(server: &MockServer) -> ChatSession {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .mount(server)
        .await;

    let chat = ChatClient::new(reqwest::Client::new(), server.uri(), "token", "gpt-4o");
    ChatSession {
        agent: RoadmapAgent::new(chat.clone(), "You plan roadmaps."),
        client: Arc::new(chat),
        scheduler: SchedulerConfig::default(),
        tools: None,
    }
}

#[tokio::test]
async fn test_repl_chats_and_runs_load_test() {
    let server = MockServer::start().await;
    let session = session_for(&server).await;

    let script = "I want to learn Go\n/search golang\n/test\n2\n/exit\nnever sent\n";
    let mut lines = BufReader::new(script.as_bytes()).lines();
    run_repl(&session, &mut lines, &CancellationToken::new())
        .await
        .unwrap();

    // One chat turn plus two load test requests; nothing after /exit
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["messages"][1]["content"], "I want to learn Go");
}

#[tokio::test]
async fn test_repl_blank_count_uses_default() {
    let server = MockServer::start().await;
    let session = session_for(&server).await;

    // Blank answer to the count prompt means 10 requests: two batches with a
    // 20s pause, so use a config without delay for the test
    let session = ChatSession {
        scheduler: SchedulerConfig {
            requests_per_minute: 600,
            batch_size: 10,
            max_concurrency: 10,
            ..SchedulerConfig::default()
        },
        ..session
    };

    let mut lines = BufReader::new("/test\n\n".as_bytes()).lines();
    run_repl(&session, &mut lines, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_repl_stops_when_cancelled() {
    let server = MockServer::start().await;
    let session = session_for(&server).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut lines = BufReader::new("hello\n".as_bytes()).lines();
    run_repl(&session, &mut lines, &cancel).await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_repl_cancel_while_waiting_for_count() {
    let server = MockServer::start().await;
    let session = session_for(&server).await;
    let cancel = CancellationToken::new();

    // The count answer never arrives; cancellation must end the session
    let (reader, mut writer) = tokio::io::duplex(64);
    tokio::io::AsyncWriteExt::write_all(&mut writer, b"/test\n")
        .await
        .unwrap();
    let mut lines = BufReader::new(reader).lines();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        canceller.cancel();
    });

    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        run_repl(&session, &mut lines, &cancel),
    )
    .await
    .expect("repl ignored cancellation")
    .unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
    drop(writer);
}
