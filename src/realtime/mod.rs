//! Realtime note listener
//!
//! One connection per signed-in session, keyed by client id. Each
//! `nota:creada` event shows a local notification and tells subscribed views
//! to refetch their note list.

mod protocol;
mod transport;

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast, mpsc};
use tokio::task::JoinHandle;

pub use transport::{NoteTransport, WebSocketTransport, socket_url};

use crate::error::Result;

/// Longest note preview shown in a notification, in characters
pub const PREVIEW_CHARS: usize = 120;

/// Pause before reconnecting after the channel drops
pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Payload of `nota:creada`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub id_expediente: i64,
    pub id_nota: i64,
    #[serde(default)]
    pub contenido: Option<String>,
}

/// What the user sees when a note arrives
#[derive(Debug, Clone, PartialEq)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
}

impl LocalNotification {
    pub fn for_event(event: &NoteEvent) -> Self {
        Self {
            title: format!("New note in case file #{}", event.id_expediente),
            body: preview(event.contenido.as_deref().unwrap_or_default()),
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `content`
pub fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}

/// Displays local notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &LocalNotification);
}

/// Prints notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &LocalNotification) {
        eprintln!(
            "{} {}\n  {}",
            "●".cyan(),
            notification.title.bold(),
            notification.body
        );
    }
}

struct Connection {
    client_id: i64,
    task: JoinHandle<()>,
}

/// Owns the realtime connection for the current session.
///
/// Built after login and shut down on logout; views receive it by
/// reference and [`subscribe`](Self::subscribe) to refetch signals.
pub struct RealtimeListener {
    base_url: String,
    transport: Arc<dyn NoteTransport>,
    notifier: Arc<dyn Notifier>,
    refetch: broadcast::Sender<NoteEvent>,
    connection: Mutex<Option<Connection>>,
}

impl RealtimeListener {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn NoteTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (refetch, _) = broadcast::channel(64);
        Self {
            base_url: base_url.into(),
            transport,
            notifier,
            refetch,
            connection: Mutex::new(None),
        }
    }

    /// Websocket transport with terminal notifications
    pub fn websocket(base_url: impl Into<String>) -> Self {
        Self::new(
            base_url,
            Arc::new(WebSocketTransport),
            Arc::new(TerminalNotifier),
        )
    }

    /// Connect for `client_id`. Returns `false` without doing anything when
    /// a connection is already live.
    ///
    /// A dropped connection is retried every [`RECONNECT_DELAY`] and the
    /// listener stays connected until [`shutdown`](Self::shutdown).
    pub async fn init(&self, client_id: i64) -> Result<bool> {
        let mut connection = self.connection.lock().await;
        if let Some(live) = connection.as_ref().filter(|c| !c.task.is_finished()) {
            debug!(
                "Realtime already connected for client {}, ignoring init for {}",
                live.client_id, client_id
            );
            return Ok(false);
        }

        let url = socket_url(&self.base_url, client_id)?;
        info!("Starting realtime listener for client {}", client_id);

        let transport = Arc::clone(&self.transport);
        let notifier = Arc::clone(&self.notifier);
        let refetch = self.refetch.clone();

        let task = tokio::spawn(async move {
            let (tx, mut rx) = mpsc::unbounded_channel();

            let pump = async {
                while let Some(event) = rx.recv().await {
                    notifier.notify(&LocalNotification::for_event(&event));
                    // No subscribers is fine
                    let _ = refetch.send(event);
                }
            };

            // Runs until `shutdown` aborts the task.
            let connect = async {
                let mut failures = 0u32;
                while !tx.is_closed() {
                    match transport.run(&url, tx.clone()).await {
                        Ok(()) => {
                            failures = 0;
                            info!("Realtime channel closed, reconnecting");
                        }
                        Err(e) if failures == 0 => {
                            failures += 1;
                            warn!("Realtime channel failed: {}", e);
                        }
                        Err(e) => {
                            failures += 1;
                            debug!("Realtime reconnect attempt {} failed: {}", failures, e);
                        }
                    }
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            };

            tokio::join!(connect, pump);
        });

        *connection = Some(Connection { client_id, task });
        Ok(true)
    }

    /// Receiver signalled once per note event
    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.refetch.subscribe()
    }

    pub async fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .await
            .as_ref()
            .is_some_and(|c| !c.task.is_finished())
    }

    /// Tear the connection down. Safe to call when not connected.
    pub async fn shutdown(&self) {
        if let Some(connection) = self.connection.lock().await.take() {
            debug!("Stopping realtime listener for client {}", connection.client_id);
            connection.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedSender;

    /// Emits its events, then stays connected until aborted.
    #[derive(Default)]
    struct FakeTransport {
        events: Vec<NoteEvent>,
        runs: AtomicUsize,
        urls: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl NoteTransport for FakeTransport {
        async fn run(&self, url: &str, events: UnboundedSender<NoteEvent>) -> Result<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            for event in &self.events {
                events.send(event.clone()).unwrap();
            }
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: StdMutex<Vec<LocalNotification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &LocalNotification) {
            self.seen.lock().unwrap().push(notification.clone());
        }
    }

    fn event(case: i64, note: i64, content: &str) -> NoteEvent {
        NoteEvent {
            id_expediente: case,
            id_nota: note,
            contenido: Some(content.to_string()),
        }
    }

    #[test]
    fn test_notification_title_and_preview() {
        let long = "á".repeat(200);
        let n = LocalNotification::for_event(&event(12, 1, &long));
        assert_eq!(n.title, "New note in case file #12");
        assert_eq!(n.body.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_notification_without_content() {
        let ev: NoteEvent =
            serde_json::from_str(r#"{"id_expediente":3,"id_nota":4}"#).unwrap();
        assert_eq!(LocalNotification::for_event(&ev).body, "");
    }

    #[test]
    fn test_short_preview_unchanged() {
        assert_eq!(preview("Audiencia mañana"), "Audiencia mañana");
    }

    #[tokio::test]
    async fn test_event_notifies_and_signals_refetch() {
        let transport = Arc::new(FakeTransport {
            events: vec![event(9, 1, "Primera"), event(9, 2, "Segunda")],
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let listener = RealtimeListener::new(
            "http://localhost:3000",
            transport.clone(),
            notifier.clone(),
        );
        let mut refetch = listener.subscribe();

        assert!(listener.init(42).await.unwrap());

        let first = tokio::time::timeout(Duration::from_secs(2), refetch.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.id_nota, 1);
        let second = tokio::time::timeout(Duration::from_secs(2), refetch.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.id_nota, 2);

        let seen = notifier.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].body, "Primera");
        assert!(transport.urls.lock().unwrap()[0].ends_with("id_cliente=42"));

        listener.shutdown().await;
    }

    #[tokio::test]
    async fn test_init_is_idempotent_while_connected() {
        let transport = Arc::new(FakeTransport::default());
        let listener = RealtimeListener::new(
            "http://localhost:3000",
            transport.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        assert!(listener.init(1).await.unwrap());
        assert!(!listener.init(1).await.unwrap());
        assert!(!listener.init(2).await.unwrap());
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(transport.runs.load(Ordering::SeqCst), 1);
        assert!(listener.is_connected().await);
        listener.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_then_reinit() {
        let transport = Arc::new(FakeTransport::default());
        let listener = RealtimeListener::new(
            "http://localhost:3000",
            transport.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        listener.init(1).await.unwrap();
        listener.shutdown().await;
        assert!(!listener.is_connected().await);
        listener.shutdown().await;

        assert!(listener.init(1).await.unwrap());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(transport.runs.load(Ordering::SeqCst), 2);
        listener.shutdown().await;
    }

    /// Drops the first connection; later connections deliver `events`.
    #[derive(Default)]
    struct DropsFirstTransport {
        events: Vec<NoteEvent>,
        runs: AtomicUsize,
    }

    #[async_trait]
    impl NoteTransport for DropsFirstTransport {
        async fn run(&self, _url: &str, events: UnboundedSender<NoteEvent>) -> Result<()> {
            if self.runs.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok(());
            }
            for event in &self.events {
                events.send(event.clone()).unwrap();
            }
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dropped_connection_reconnects() {
        let transport = Arc::new(DropsFirstTransport {
            events: vec![event(5, 11, "Tras reconexión")],
            ..Default::default()
        });
        let listener = RealtimeListener::new(
            "http://localhost:3000",
            transport.clone(),
            Arc::new(RecordingNotifier::default()),
        );
        let mut refetch = listener.subscribe();

        listener.init(7).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(listener.is_connected().await);
        assert!(!listener.init(7).await.unwrap());

        let received = tokio::time::timeout(RECONNECT_DELAY * 5, refetch.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.id_nota, 11);
        assert_eq!(transport.runs.load(Ordering::SeqCst), 2);
        listener.shutdown().await;
        assert!(!listener.is_connected().await);
    }

    #[tokio::test]
    async fn test_failed_connection_keeps_retrying() {
        struct Refused(AtomicUsize);

        #[async_trait]
        impl NoteTransport for Refused {
            async fn run(&self, url: &str, _events: UnboundedSender<NoteEvent>) -> Result<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Err(crate::error::ApiError::Network {
                    host: url.to_string(),
                    message: "connection refused".to_string(),
                }
                .into())
            }
        }

        let transport = Arc::new(Refused(AtomicUsize::new(0)));
        let listener = RealtimeListener::new(
            "http://localhost:3000",
            transport.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        listener.init(1).await.unwrap();
        tokio::time::sleep(RECONNECT_DELAY + Duration::from_millis(300)).await;
        assert!(listener.is_connected().await);
        assert!(transport.0.load(Ordering::SeqCst) >= 2);
        listener.shutdown().await;
    }
}
