//! Realtime notification client with bounded auto-reconnect.
//!
//! At most one live WebSocket connection exists per client. The session
//! token is attached to the connection URL as a `?token=` query credential.
//! Inbound text frames are parsed as [`Notificacion`] and fanned out to the
//! registered listeners; unparseable frames are logged and dropped.
//!
//! Reconnection happens only after an abnormal closure (anything but close
//! code 1000 or a client-initiated shutdown), at most `max_attempts` times
//! with a fixed delay between attempts. The attempt counter resets on every
//! successful open. `disconnect()` clears the recorded token, which renders
//! any pending reconnect inert.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use incidentes_shared::Notificacion;

/// Connection state of the realtime client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closing,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }
}

/// Reconnect policy for abnormal closures.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of reconnect attempts after an abnormal closure.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_secs(3),
        }
    }
}

type Listener = Arc<dyn Fn(&Notificacion) + Send + Sync>;

struct Inner {
    endpoint: String,
    reconnect: ReconnectConfig,
    state: Mutex<ConnectionState>,
    /// Token recorded by `connect`; cleared by `disconnect` to cancel any
    /// pending reconnect.
    token: Mutex<Option<String>>,
    attempts: AtomicU32,
    /// Bumped by every `connect` call; a connection task whose generation
    /// is stale must not touch shared state.
    generation: AtomicU64,
    /// Close signal for the live connection, tagged with its generation.
    closer: Mutex<Option<(u64, mpsc::UnboundedSender<()>)>>,
    listeners: Mutex<HashMap<String, Listener>>,
}

impl Inner {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_state(&self, generation: u64, state: ConnectionState) {
        if self.is_current(generation) {
            *self.state.lock().unwrap() = state;
        }
    }

    /// The recorded token, or `None` if a `disconnect` or a newer `connect`
    /// has made this generation obsolete.
    fn token_for(&self, generation: u64) -> Option<String> {
        if !self.is_current(generation) {
            return None;
        }
        self.token.lock().unwrap().clone()
    }

    fn clear_closer(&self, generation: u64) {
        let mut closer = self.closer.lock().unwrap();
        if matches!(*closer, Some((gen, _)) if gen == generation) {
            *closer = None;
        }
    }

    fn dispatch(&self, raw: &str) {
        match serde_json::from_str::<Notificacion>(raw) {
            Ok(notificacion) => {
                tracing::debug!(
                    tipo = ?notificacion.tipo,
                    incidente_id = %notificacion.incidente_id,
                    "realtime: notification received"
                );
                let listeners: Vec<Listener> =
                    self.listeners.lock().unwrap().values().cloned().collect();
                for listener in listeners {
                    listener(&notificacion);
                }
            }
            Err(err) => {
                tracing::warn!("realtime: discarding unparseable frame: {err}");
            }
        }
    }
}

/// Client for the realtime notification endpoint.
///
/// Cheap to clone; all clones share the same connection and listener set.
#[derive(Clone)]
pub struct RealtimeClient {
    inner: Arc<Inner>,
}

impl RealtimeClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_reconnect(endpoint, ReconnectConfig::default())
    }

    pub fn with_reconnect(endpoint: impl Into<String>, reconnect: ReconnectConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                endpoint: endpoint.into(),
                reconnect,
                state: Mutex::new(ConnectionState::Disconnected),
                token: Mutex::new(None),
                attempts: AtomicU32::new(0),
                generation: AtomicU64::new(0),
                closer: Mutex::new(None),
                listeners: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Open a connection authenticated with `token`.
    ///
    /// A no-op while a connection is active, even if `token` differs from
    /// the live connection's; callers needing a token change must
    /// `disconnect()` first. Must be called within a tokio runtime.
    pub fn connect(&self, token: &str) {
        {
            let state = self.inner.state.lock().unwrap();
            if matches!(*state, ConnectionState::Open | ConnectionState::Connecting) {
                tracing::debug!("realtime: connection already active, ignoring connect");
                return;
            }
        }
        *self.inner.token.lock().unwrap() = Some(token.to_owned());
        *self.inner.state.lock().unwrap() = ConnectionState::Connecting;
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::spawn(run_connection(self.inner.clone(), generation));
    }

    /// Close the connection intentionally (close code 1000).
    ///
    /// Clears the recorded token — cancelling any pending reconnect — and
    /// the entire listener set. Safe to call in any state.
    pub fn disconnect(&self) {
        *self.inner.token.lock().unwrap() = None;
        if let Some((_, close_tx)) = self.inner.closer.lock().unwrap().take() {
            tracing::info!("realtime: closing connection");
            let mut state = self.inner.state.lock().unwrap();
            if *state == ConnectionState::Open {
                *state = ConnectionState::Closing;
            }
            let _ = close_tx.send(());
        }
        self.inner.listeners.lock().unwrap().clear();
    }

    /// Register a listener under a stable key.
    ///
    /// Registering the same key again replaces the previous listener, so a
    /// listener is invoked at most once per inbound notification.
    pub fn add_listener(&self, key: impl Into<String>, listener: impl Fn(&Notificacion) + Send + Sync + 'static) {
        self.inner
            .listeners
            .lock()
            .unwrap()
            .insert(key.into(), Arc::new(listener));
    }

    /// Remove a listener; a no-op for unknown keys.
    pub fn remove_listener(&self, key: &str) {
        self.inner.listeners.lock().unwrap().remove(key);
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.lock().unwrap()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }
}

/// One connection session: connect, read until closed, retry within budget.
async fn run_connection(inner: Arc<Inner>, generation: u64) {
    loop {
        let Some(token) = inner.token_for(generation) else {
            inner.set_state(generation, ConnectionState::Disconnected);
            return;
        };
        inner.set_state(generation, ConnectionState::Connecting);

        let url = format!("{}?token={}", inner.endpoint, urlencoding::encode(&token));
        tracing::info!(endpoint = %inner.endpoint, "realtime: connecting");

        let intentional = match connect_async(url.as_str()).await {
            Ok((stream, _response)) => {
                // A disconnect may have raced the handshake; close right away.
                if inner.token_for(generation).is_none() {
                    close_quietly(stream).await;
                    inner.set_state(generation, ConnectionState::Disconnected);
                    return;
                }
                inner.attempts.store(0, Ordering::SeqCst);
                inner.set_state(generation, ConnectionState::Open);
                tracing::info!("realtime: connection established");

                let (close_tx, close_rx) = mpsc::unbounded_channel();
                *inner.closer.lock().unwrap() = Some((generation, close_tx));
                let intentional = read_until_closed(&inner, stream, close_rx).await;
                inner.clear_closer(generation);
                intentional
            }
            Err(err) => {
                tracing::warn!("realtime: connection failed: {err}");
                false
            }
        };

        inner.set_state(generation, ConnectionState::Disconnected);

        if intentional {
            tracing::info!("realtime: connection closed intentionally");
            return;
        }
        let attempts = inner.attempts.load(Ordering::SeqCst);
        if attempts >= inner.reconnect.max_attempts {
            tracing::warn!(
                attempts,
                "realtime: reconnect budget exhausted, staying disconnected"
            );
            return;
        }
        inner.attempts.store(attempts + 1, Ordering::SeqCst);
        tracing::info!(
            "realtime: retrying connection ({}/{})",
            attempts + 1,
            inner.reconnect.max_attempts
        );
        tokio::time::sleep(inner.reconnect.retry_delay).await;
    }
}

fn intentional_close_frame() -> CloseFrame {
    CloseFrame {
        code: CloseCode::Normal,
        reason: "cierre intencional".into(),
    }
}

async fn close_quietly(stream: WebSocketStream<MaybeTlsStream<TcpStream>>) {
    let (mut write, _read) = stream.split();
    let _ = write
        .send(Message::Close(Some(intentional_close_frame())))
        .await;
}

/// Pump the socket until it closes. Returns whether the closure was
/// intentional (requested by us, or close code 1000 from the peer).
async fn read_until_closed(
    inner: &Inner,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut close_rx: mpsc::UnboundedReceiver<()>,
) -> bool {
    let (mut write, mut read) = stream.split();
    let mut requested_close = false;

    loop {
        tokio::select! {
            _ = close_rx.recv(), if !requested_close => {
                requested_close = true;
                if write
                    .send(Message::Close(Some(intentional_close_frame())))
                    .await
                    .is_err()
                {
                    return true;
                }
                // Keep draining until the peer acknowledges the close.
            }
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => inner.dispatch(text.as_str()),
                Some(Ok(Message::Close(frame))) => {
                    let normal = frame
                        .as_ref()
                        .map(|f| f.code == CloseCode::Normal)
                        .unwrap_or(false);
                    tracing::info!(?frame, "realtime: close frame received");
                    return requested_close || normal;
                }
                // Binary frames are not part of the protocol; ping/pong is
                // handled by the transport.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    // The error alone never drives recovery; the stream
                    // ending right after it does.
                    tracing::error!("realtime: transport error: {err}");
                    return requested_close;
                }
                None => {
                    tracing::info!("realtime: stream ended");
                    return requested_close;
                }
            }
        }
    }
}
