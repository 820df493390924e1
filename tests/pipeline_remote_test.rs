//! End-to-end tests of the remote publishing path against a mock service

use aisler_push::adapters::board::{BoardSnapshot, Layer};
use aisler_push::config::{PushConfig, ServiceConfig};
use aisler_push::core::export::{Delivery, PushCoordinator};
use aisler_push::core::progress::ProgressReporter;
use aisler_push::domain::PushError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;

fn remote_board(design_dir: &TempDir) -> BoardSnapshot {
    let mut board = BoardSnapshot::new(design_dir.path().join("widget.kicad_pcb"));
    board.title = "Widget".to_string();
    board.enabled_layers.insert(Layer::FrontCopper);
    board.enabled_layers.insert(Layer::EdgeCuts);
    board
}

fn config_for(server: &mockito::ServerGuard) -> PushConfig {
    PushConfig {
        service: ServiceConfig {
            base_url: server.url(),
            poll_interval_ms: 10,
            open_redirect: false,
            ..ServiceConfig::default()
        },
        ..PushConfig::default()
    }
}

#[tokio::test]
async fn test_first_push_creates_project_and_links_design() {
    let mut server = mockito::Server::new_async().await;
    let new_project = server
        .mock("GET", "/p/new.json")
        .match_query(mockito::Matcher::UrlEncoded(
            "ref".into(),
            "KiCadPush".into(),
        ))
        .with_status(200)
        .with_body(format!(
            r#"{{"project_id": "QRSTUVWX", "upload_url": "{}/p/QRSTUVWX/uploads.json"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/p/QRSTUVWX/uploads.json")
        .with_status(200)
        .with_body(format!(
            r#"{{"callback": "{0}/cb", "redirect": "{0}/p/QRSTUVWX"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    let poll = server
        .mock("GET", "/cb")
        .with_status(200)
        .with_body(r#"{"progress": 100}"#)
        .create_async()
        .await;

    let design_dir = TempDir::new().unwrap();
    let board = remote_board(&design_dir);

    let (handle, mut progress) = PushCoordinator::spawn(board, config_for(&server)).unwrap();

    let mut statuses = Vec::new();
    while let Some(event) = progress.recv().await {
        statuses.push(event.as_status());
    }

    let (board, result) = handle.wait().await;
    let outcome = result.unwrap();

    // Pipeline stages, the upload baseline, the scaled final poll, and the
    // terminal event, in order
    assert_eq!(statuses, vec![10, 15, 20, 25, 30, 40, 98, -1]);

    assert_eq!(
        outcome.project.map(|p| p.as_str().to_string()),
        Some("QRSTUVWX".to_string())
    );
    let Delivery::Remote { redirect } = outcome.delivery else {
        panic!("expected remote delivery");
    };
    assert!(redirect.ends_with("/p/QRSTUVWX"));

    // The fresh project link lands on the designated comment line
    assert_eq!(board.comments, vec!["AISLER Project ID: QRSTUVWX"]);

    new_project.assert_async().await;
    upload.assert_async().await;
    poll.assert_async().await;
}

#[tokio::test]
async fn test_linked_design_uploads_revision_without_new_project() {
    let mut server = mockito::Server::new_async().await;
    let new_project = server
        .mock("GET", "/p/new.json")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/p/ABCDEFGH/uploads.json")
        .with_status(200)
        .with_body(format!(
            r#"{{"callback": "{0}/cb", "redirect": "{0}/p/ABCDEFGH"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/cb")
        .with_status(200)
        .with_body(r#"{"progress": 100}"#)
        .create_async()
        .await;

    let design_dir = TempDir::new().unwrap();
    let mut board = remote_board(&design_dir);
    board
        .comments
        .push("AISLER Project ID: ABCDEFGH".to_string());

    let (handle, mut progress) = PushCoordinator::spawn(board, config_for(&server)).unwrap();
    while progress.recv().await.is_some() {}

    let (board, result) = handle.wait().await;
    let outcome = result.unwrap();

    assert_eq!(
        outcome.project.map(|p| p.as_str().to_string()),
        Some("ABCDEFGH".to_string())
    );
    // The existing link is left alone
    assert_eq!(board.comments, vec!["AISLER Project ID: ABCDEFGH"]);

    new_project.assert_async().await;
    upload.assert_async().await;
}

#[tokio::test]
async fn test_poll_progress_is_rescaled() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/p/new.json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(format!(
            r#"{{"project_id": "QRSTUVWX", "upload_url": "{}/p/QRSTUVWX/uploads.json"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    server
        .mock("POST", "/p/QRSTUVWX/uploads.json")
        .with_status(200)
        .with_body(format!(
            r#"{{"callback": "{0}/cb", "redirect": "{0}/p/QRSTUVWX"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    // First poll mid-build, every later poll complete
    let polls = Arc::new(AtomicUsize::new(0));
    let poll_counter = Arc::clone(&polls);
    server
        .mock("GET", "/cb")
        .with_status(200)
        .with_body_from_request(move |_| {
            if poll_counter.fetch_add(1, Ordering::SeqCst) == 0 {
                br#"{"progress": 50}"#.to_vec()
            } else {
                br#"{"progress": 100}"#.to_vec()
            }
        })
        .create_async()
        .await;

    let design_dir = TempDir::new().unwrap();
    let board = remote_board(&design_dir);

    let (handle, mut progress) = PushCoordinator::spawn(board, config_for(&server)).unwrap();
    let mut statuses = Vec::new();
    while let Some(event) = progress.recv().await {
        statuses.push(event.as_status());
    }

    let (_board, result) = handle.wait().await;
    result.unwrap();

    // 50% remote build maps to 40 + 50/1.7 = 69
    assert_eq!(statuses, vec![10, 15, 20, 25, 30, 40, 69, 98, -1]);
}

#[tokio::test]
async fn test_upstream_failure_is_fatal() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/p/new.json")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let design_dir = TempDir::new().unwrap();
    let board = remote_board(&design_dir);

    let (handle, mut progress) = PushCoordinator::spawn(board, config_for(&server)).unwrap();
    while progress.recv().await.is_some() {}

    let (_board, result) = handle.wait().await;
    assert!(matches!(result, Err(PushError::Service(_))));
}

#[tokio::test]
async fn test_pre_asserted_cancellation_stops_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let new_project = server
        .mock("GET", "/p/new.json")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let design_dir = TempDir::new().unwrap();
    let mut board = remote_board(&design_dir);

    let (reporter, _progress) = ProgressReporter::channel(16);
    let (cancel_tx, cancel_rx) = watch::channel(true);
    let coordinator =
        PushCoordinator::new(config_for(&server), reporter, cancel_rx).unwrap();

    let result = coordinator.run(&mut board).await;
    assert!(matches!(result, Err(PushError::Cancelled)));
    drop(cancel_tx);

    new_project.assert_async().await;
}

#[tokio::test]
async fn test_cancellation_during_poll_loop() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/p/new.json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(format!(
            r#"{{"project_id": "QRSTUVWX", "upload_url": "{}/p/QRSTUVWX/uploads.json"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    server
        .mock("POST", "/p/QRSTUVWX/uploads.json")
        .with_status(200)
        .with_body(format!(
            r#"{{"callback": "{0}/cb", "redirect": "{0}/p/QRSTUVWX"}}"#,
            server.url()
        ))
        .create_async()
        .await;
    // The build never completes on its own
    server
        .mock("GET", "/cb")
        .with_status(200)
        .with_body(r#"{"progress": 10}"#)
        .create_async()
        .await;

    let design_dir = TempDir::new().unwrap();
    let board = remote_board(&design_dir);

    let mut config = config_for(&server);
    config.service.poll_interval_ms = 50;

    let (handle, mut progress) = PushCoordinator::spawn(board, config).unwrap();

    // Cancel once the pipeline reaches the remote phase
    let canceller = handle.canceller();
    tokio::spawn(async move {
        while let Some(event) = progress.recv().await {
            if event.as_status() >= 40 {
                canceller.cancel();
            }
        }
    });

    let (_board, result) = handle.wait().await;
    assert!(matches!(result, Err(PushError::Cancelled)));
}
