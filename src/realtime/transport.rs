//! Websocket transport for the note channel

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use reqwest::Url;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::NoteEvent;
use super::protocol::{self, CONNECT_FRAME, ENGINE_IO_VERSION, PONG_FRAME, Packet};
use crate::error::{ApiError, ConfigError, Result};

/// Event emitted by the backend when a note is created
pub const NOTE_CREATED: &str = "nota:creada";

/// A connection that forwards note events.
#[async_trait]
pub trait NoteTransport: Send + Sync + 'static {
    /// Stay connected to `url`, sending each note event to `events`, until
    /// the server closes the connection or it fails.
    async fn run(&self, url: &str, events: UnboundedSender<NoteEvent>) -> Result<()>;
}

/// Build the socket.io websocket URL for `base_url`, keyed by client id.
pub fn socket_url(base_url: &str, client_id: i64) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ConfigError::Invalid(format!("invalid realtime URL '{}': {}", base_url, e)))?;

    let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
    url.set_scheme(scheme)
        .map_err(|_| ConfigError::Invalid(format!("cannot use '{}' for websockets", base_url)))?;
    url.set_path("/socket.io/");
    url.query_pairs_mut()
        .clear()
        .append_pair("EIO", ENGINE_IO_VERSION)
        .append_pair("transport", "websocket")
        .append_pair("id_cliente", &client_id.to_string());

    Ok(url.to_string())
}

/// socket.io client over `tokio-tungstenite`.
///
/// One connection per call to `run`; the listener reconnects when it returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

#[async_trait]
impl NoteTransport for WebSocketTransport {
    async fn run(&self, url: &str, events: UnboundedSender<NoteEvent>) -> Result<()> {
        let network = |e: tokio_tungstenite::tungstenite::Error| ApiError::Network {
            host: url.to_string(),
            message: e.to_string(),
        };

        let (mut socket, _) = connect_async(url).await.map_err(network)?;
        info!("Realtime channel open: {}", url);

        while let Some(message) = socket.next().await {
            let text = match message.map_err(network)? {
                Message::Text(text) => text,
                Message::Close(frame) => {
                    debug!("Realtime channel closed by server: {:?}", frame);
                    break;
                }
                _ => continue,
            };

            match protocol::parse(&text) {
                Packet::Open(handshake) => {
                    debug!("Engine handshake: {}", handshake);
                    socket
                        .send(Message::Text(CONNECT_FRAME.into()))
                        .await
                        .map_err(network)?;
                }
                Packet::Ping => {
                    socket
                        .send(Message::Text(PONG_FRAME.into()))
                        .await
                        .map_err(network)?;
                }
                Packet::Connected => debug!("Joined default namespace"),
                Packet::ConnectError(message) => {
                    return Err(ApiError::Network {
                        host: url.to_string(),
                        message,
                    }
                    .into());
                }
                Packet::Event { name, payload } if name == NOTE_CREATED => {
                    match serde_json::from_value::<NoteEvent>(payload) {
                        Ok(event) => {
                            if events.send(event).is_err() {
                                // Listener gone
                                break;
                            }
                        }
                        Err(e) => warn!("Ignoring malformed {} payload: {}", NOTE_CREATED, e),
                    }
                }
                Packet::Close | Packet::Disconnected => break,
                other => debug!("Ignoring frame {:?}", other),
            }
        }

        let _ = socket.close(None).await;
        Ok(())
    }
}
