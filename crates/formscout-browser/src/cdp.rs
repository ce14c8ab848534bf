//! WebSocket CDP client with JSON-RPC 2.0 command/response correlation.
//!
//! Commands get auto-incrementing ids; a background reader task resolves
//! responses back to the waiting caller via oneshot channels and forwards
//! unsolicited events (messages with `method` but no `id`) to an unbounded
//! event channel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::BrowserError;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;
type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<CdpResponse>>>>;

/// An unsolicited CDP event (e.g. `Page.loadEventFired`).
#[derive(Debug, Clone)]
pub struct CdpEvent {
    pub method: String,
    pub params: Value,
}

/// A response correlated to a previously sent command.
#[derive(Debug, Clone)]
pub struct CdpResponse {
    pub id: u64,
    pub result: Option<Value>,
    pub error: Option<CdpError>,
}

/// Error object inside a CDP response.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CdpError {
    pub code: i64,
    pub message: String,
}

#[derive(serde::Serialize)]
struct OutboundCommand<'a> {
    id: u64,
    method: &'a str,
    params: Value,
}

/// CDP client over one DevTools WebSocket connection.
pub struct CdpClient {
    next_id: AtomicU64,
    pending: Pending,
    writer: Mutex<WsSink>,
    event_rx: Mutex<mpsc::UnboundedReceiver<CdpEvent>>,
    command_timeout: Duration,
    _reader: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to a DevTools page target WebSocket
    /// (`ws://host:port/devtools/page/{target_id}`).
    pub async fn connect(ws_url: &str, command_timeout: Duration) -> Result<Self, BrowserError> {
        tracing::info!(url = ws_url, "connecting to DevTools WebSocket");

        let (stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| BrowserError::ConnectionFailed {
                url: ws_url.to_string(),
                reason: e.to_string(),
            })?;
        let (writer, reader) = stream.split();

        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let reader_pending = Arc::clone(&pending);
        let reader = tokio::spawn(dispatch_loop(reader, reader_pending, event_tx));

        Ok(Self {
            next_id: AtomicU64::new(1),
            pending,
            writer: Mutex::new(writer),
            event_rx: Mutex::new(event_rx),
            command_timeout,
            _reader: reader,
        })
    }

    /// Send a command and wait for its correlated response.
    pub async fn send(&self, method: &str, params: Value) -> Result<Value, BrowserError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let json = serde_json::to_string(&OutboundCommand { id, method, params }).map_err(|e| {
            BrowserError::Protocol {
                detail: format!("failed to serialize command: {e}"),
            }
        })?;

        tracing::debug!(id, method, "sending CDP command");

        // Register before sending so a fast response cannot race the insert.
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        self.writer
            .lock()
            .await
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| BrowserError::Protocol {
                detail: format!("WebSocket send failed: {e}"),
            })?;

        let response = tokio::time::timeout(self.command_timeout, rx)
            .await
            .map_err(|_| BrowserError::CommandTimeout {
                method: method.to_string(),
                duration: self.command_timeout,
            })?
            .map_err(|_| BrowserError::Protocol {
                detail: "response channel closed unexpectedly".to_string(),
            })?;

        if let Some(err) = response.error {
            return Err(BrowserError::Cdp {
                code: err.code,
                message: err.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    /// Enable a CDP domain (`Page`, `DOM`, `Runtime`, ...).
    pub async fn enable(&self, domain: &str) -> Result<(), BrowserError> {
        self.send(&format!("{domain}.enable"), serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Wait until an event with the given method arrives, discarding others.
    ///
    /// Returns `PageLoadTimeout` if the deadline passes first and `Protocol`
    /// if the connection drops while waiting.
    pub async fn wait_for_event(
        &self,
        method: &str,
        timeout: Duration,
    ) -> Result<CdpEvent, BrowserError> {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut rx = self.event_rx.lock().await;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Err(BrowserError::PageLoadTimeout { duration: timeout });
            }
            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(event)) if event.method == method => return Ok(event),
                Ok(Some(_)) => continue,
                Ok(None) => {
                    return Err(BrowserError::Protocol {
                        detail: "WebSocket closed while waiting for event".to_string(),
                    })
                }
                Err(_) => return Err(BrowserError::PageLoadTimeout { duration: timeout }),
            }
        }
    }
}

/// Background task: read WebSocket frames and route them.
///
/// Messages with an `id` resolve a pending command; messages with only a
/// `method` are forwarded as events. On disconnect, all pending commands are
/// failed so callers do not hang.
async fn dispatch_loop(mut reader: WsSource, pending: Pending, events: mpsc::UnboundedSender<CdpEvent>) {
    while let Some(frame) = reader.next().await {
        let text = match frame {
            Ok(Message::Text(t)) => t.to_string(),
            Ok(Message::Binary(b)) => match String::from_utf8(b.to_vec()) {
                Ok(s) => s,
                Err(_) => continue,
            },
            Ok(Message::Close(_)) => {
                tracing::info!("DevTools WebSocket closed by remote");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "WebSocket read error, stopping reader");
                break;
            }
        };

        let json: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable CDP frame dropped");
                continue;
            }
        };

        if let Some(response) = parse_response(&json) {
            if let Some(tx) = pending.lock().await.remove(&response.id) {
                let _ = tx.send(response);
            } else {
                tracing::debug!(id = response.id, "response for unknown command id");
            }
        } else if let Some(event) = parse_event(&json) {
            // Nobody listening is fine; the event is simply dropped.
            let _ = events.send(event);
        }
    }

    // Fail anything still in flight so callers see the disconnect.
    for (id, tx) in pending.lock().await.drain() {
        let _ = tx.send(CdpResponse {
            id,
            result: None,
            error: Some(CdpError {
                code: -1,
                message: "WebSocket connection closed".to_string(),
            }),
        });
    }
}

/// Parse a frame as a command response (requires an `id` field).
pub fn parse_response(json: &Value) -> Option<CdpResponse> {
    let id = json.get("id")?.as_u64()?;
    Some(CdpResponse {
        id,
        result: json.get("result").cloned(),
        error: json
            .get("error")
            .and_then(|e| serde_json::from_value(e.clone()).ok()),
    })
}

/// Parse a frame as an event (requires `method`, forbids `id`).
pub fn parse_event(json: &Value) -> Option<CdpEvent> {
    if json.get("id").is_some() {
        return None;
    }
    Some(CdpEvent {
        method: json.get("method")?.as_str()?.to_string(),
        params: json.get("params").cloned().unwrap_or(Value::Null),
    })
}
