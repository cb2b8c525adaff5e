//! Concurrency and lifecycle tests.
//!
//! - Concurrent keyboard requests must never interleave on the wire: every
//!   press is immediately followed by its release.
//! - A class whose write is stalled does not hold up other classes, and a
//!   failing transport only affects its own class.
//! - The real listener serves a request and stops on the shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use openctrl_bridge::application::{
    dispatch, DeviceRegistry, HidTransport, TransportError, JSON_MEDIA_TYPE,
};
use openctrl_bridge::infrastructure::serve;
use openctrl_bridge::infrastructure::transport::RecordingTransport;
use openctrl_core::DeviceClass;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

const JSON: Option<&str> = Some(JSON_MEDIA_TYPE);

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_keyboard_requests_keep_press_release_pairs() {
    // Arrange
    let keyboard = RecordingTransport::new("keyboard");
    let registry = Arc::new(
        DeviceRegistry::builder()
            .bind(DeviceClass::Keyboard, Box::new(keyboard.clone()))
            .build(),
    );

    // Act: 32 requests, each pressing a different key
    let tasks: Vec<_> = (0..32u8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let body = format!(r#"{{"keys":[{}]}}"#, 4 + i);
                dispatch(&registry, DeviceClass::Keyboard, JSON, body.as_bytes()).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    // Assert: 64 reports, alternating press / release
    let reports = keyboard.reports();
    assert_eq!(reports.len(), 64);
    for pair in reports.chunks(2) {
        assert_ne!(pair[0][2], 0, "press must carry a key: {pair:?}");
        assert_eq!(pair[1], vec![0u8; 8], "press must be followed by release");
    }
    let mut pressed: Vec<u8> = reports.chunks(2).map(|pair| pair[0][2]).collect();
    pressed.sort_unstable();
    assert_eq!(pressed, (4..36).collect::<Vec<u8>>());
}

/// Blocks inside `write_report` until released, reporting when it gets there.
struct StalledTransport {
    entered: Option<oneshot::Sender<()>>,
    release: Option<oneshot::Receiver<()>>,
}

#[async_trait]
impl HidTransport for StalledTransport {
    async fn write_report(&mut self, _report: &[u8]) -> Result<(), TransportError> {
        if let Some(entered) = self.entered.take() {
            let _ = entered.send(());
        }
        if let Some(release) = self.release.take() {
            let _ = release.await;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "stalled".to_string()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_classes_do_not_block_each_other() {
    // Arrange: keyboard write hangs until released, mouse healthy
    let (entered_tx, entered_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    let mouse = RecordingTransport::new("mouse");
    let registry = Arc::new(
        DeviceRegistry::builder()
            .bind(
                DeviceClass::Keyboard,
                Box::new(StalledTransport {
                    entered: Some(entered_tx),
                    release: Some(release_rx),
                }),
            )
            .bind(DeviceClass::Mouse, Box::new(mouse.clone()))
            .build(),
    );
    let kb = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            dispatch(&registry, DeviceClass::Keyboard, JSON, br#"{"keys":[4]}"#).await
        })
    };
    entered_rx.await.unwrap();

    // Act: mouse request while the keyboard channel holds its lock
    let ms = tokio::time::timeout(
        Duration::from_secs(2),
        dispatch(&registry, DeviceClass::Mouse, JSON, br#"{"dx":1}"#),
    )
    .await;

    // Assert
    assert!(ms.expect("mouse must not wait on keyboard").is_ok());
    assert!(!kb.is_finished(), "keyboard write must still be in flight");
    assert_eq!(mouse.reports(), vec![vec![0, 1, 0, 0, 0]]);

    release_tx.send(()).unwrap();
    let kb = tokio::time::timeout(Duration::from_secs(2), kb).await;
    assert!(kb.expect("keyboard must finish once released").unwrap().is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_transport_failure_is_isolated_per_class() {
    // Arrange: keyboard transport down, mouse healthy
    let keyboard = RecordingTransport::new("keyboard");
    let mouse = RecordingTransport::new("mouse");
    keyboard.set_down(true);
    let registry = Arc::new(
        DeviceRegistry::builder()
            .bind(DeviceClass::Keyboard, Box::new(keyboard.clone()))
            .bind(DeviceClass::Mouse, Box::new(mouse.clone()))
            .build(),
    );

    // Act
    let kb = dispatch(&registry, DeviceClass::Keyboard, JSON, b"{}").await;
    let ms = dispatch(&registry, DeviceClass::Mouse, JSON, br#"{"dx":1}"#).await;

    // Assert
    assert!(kb.is_err());
    assert!(ms.is_ok());
    assert_eq!(mouse.reports(), vec![vec![0, 1, 0, 0, 0]]);
}

#[tokio::test]
async fn test_listener_serves_and_shuts_down_gracefully() {
    // Arrange
    let mouse = RecordingTransport::new("mouse");
    let registry = Arc::new(
        DeviceRegistry::builder()
            .bind(DeviceClass::Mouse, Box::new(mouse.clone()))
            .build(),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, registry, async move {
        let _ = stop_rx.await;
    }));

    // Act: one raw HTTP/1.1 request
    let body = r#"{"dx":5}"#;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "POST /mouse HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    stop_tx.send(()).unwrap();
    let stopped = tokio::time::timeout(Duration::from_secs(5), server).await;

    // Assert
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("Mouse report received\n"), "{response}");
    assert_eq!(mouse.reports(), vec![vec![0, 5, 0, 0, 0]]);
    assert!(stopped.expect("server must stop").unwrap().is_ok());
}
