//! WebSocket-backed [`RealtimeChannel`]
//!
//! `connect` performs the Engine.IO open and joins the default Socket.IO
//! namespace, then hands the socket to two tasks: a writer draining an
//! outbound queue and a reader that answers pings and dispatches events to
//! subscribers. Malformed frames are logged and skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use calstats_core::{ListenerRegistry, RealtimeChannel, Subscription, SubscriptionId};
use calstats_domain::constants::{MSG_CHANNEL_NOT_CONNECTED, SOCKET_IO_PATH};
use calstats_domain::{CalStatsError, ChannelConfig, InboundEvent, OutboundEvent, Result};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

use super::packet::Packet;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build the Socket.IO WebSocket endpoint for a service base URL.
///
/// `http`/`https` become `ws`/`wss`; the Socket.IO path and the Engine.IO
/// query are appended.
pub fn socket_io_endpoint(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| CalStatsError::Config(format!("Invalid channel URL '{base}': {e}")))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(CalStatsError::Config(format!("Unsupported channel URL scheme: {other}")))
        }
    };
    url.set_scheme(scheme)
        .map_err(|()| CalStatsError::Config(format!("Cannot use scheme {scheme} for {base}")))?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    let mut url = url
        .join(SOCKET_IO_PATH)
        .map_err(|e| CalStatsError::Config(format!("Invalid channel URL '{base}': {e}")))?;
    url.set_query(Some("EIO=4&transport=websocket"));
    Ok(url)
}

struct Session {
    outbound: mpsc::UnboundedSender<String>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// Socket.IO client over `tokio-tungstenite`
pub struct WebSocketChannel {
    config: ChannelConfig,
    listeners: Arc<ListenerRegistry>,
    connected: Arc<AtomicBool>,
    session: Mutex<Option<Session>>,
}

impl WebSocketChannel {
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            config,
            listeners: Arc::new(ListenerRegistry::new()),
            connected: Arc::new(AtomicBool::new(false)),
            session: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    async fn open(&self) -> Result<Socket> {
        let endpoint = socket_io_endpoint(&self.config.url)?;
        debug!(endpoint = %endpoint, "opening channel");

        let (mut socket, _) = connect_async(endpoint.as_str())
            .await
            .map_err(|e| CalStatsError::Channel(format!("WebSocket connect failed: {e}")))?;

        loop {
            match next_packet(&mut socket).await? {
                Packet::Open(data) => {
                    debug!(sid = %data["sid"], "engine.io session opened");
                    break;
                }
                Packet::Ping => send_frame(&mut socket, Packet::Pong.encode()).await?,
                other => debug!(packet = ?other, "ignored before open"),
            }
        }

        send_frame(&mut socket, Packet::Connect(None).encode()).await?;

        loop {
            match next_packet(&mut socket).await? {
                Packet::Connect(_) => return Ok(socket),
                Packet::ConnectError(data) => {
                    return Err(CalStatsError::Channel(format!("Namespace connect refused: {data}")))
                }
                Packet::Ping => send_frame(&mut socket, Packet::Pong.encode()).await?,
                other => debug!(packet = ?other, "ignored before namespace connect"),
            }
        }
    }
}

#[async_trait]
impl RealtimeChannel for WebSocketChannel {
    async fn connect(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        if session.is_some() && self.is_connected() {
            return Ok(());
        }
        if let Some(stale) = session.take() {
            stale.reader.abort();
            stale.writer.abort();
        }

        let timeout = Duration::from_secs(self.config.connect_timeout_secs);
        let socket = tokio::time::timeout(timeout, self.open()).await.map_err(|_| {
            CalStatsError::Channel(format!(
                "Timed out connecting to {} after {}s",
                self.config.url, self.config.connect_timeout_secs
            ))
        })??;

        let (sink, stream) = socket.split();
        let (outbound, queue) = mpsc::unbounded_channel();

        self.connected.store(true, Ordering::SeqCst);
        let writer = tokio::spawn(write_loop(sink, queue));
        let reader = tokio::spawn(read_loop(
            stream,
            outbound.clone(),
            Arc::clone(&self.listeners),
            Arc::clone(&self.connected),
        ));

        *session = Some(Session { outbound, reader, writer });
        info!(url = %self.config.url, "channel connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        let Some(session) = self.session.lock().await.take() else {
            return Ok(());
        };
        self.connected.store(false, Ordering::SeqCst);

        let Session { outbound, reader, writer } = session;
        // The writer sends the leave frame, then closes once the queue is dropped.
        let _ = outbound.send(Packet::Disconnect.encode());
        drop(outbound);
        reader.abort();
        if let Err(err) = writer.await {
            if !err.is_cancelled() {
                warn!(error = %err, "channel writer ended abnormally");
            }
        }

        info!("channel disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn emit(&self, event: OutboundEvent) -> Result<()> {
        if !self.is_connected() {
            return Err(CalStatsError::Channel(MSG_CHANNEL_NOT_CONNECTED.to_string()));
        }
        let frame = Packet::event(event.name(), event.payload()?).encode();

        let session = self.session.lock().await;
        let outbound = session
            .as_ref()
            .map(|session| &session.outbound)
            .ok_or_else(|| CalStatsError::Channel(MSG_CHANNEL_NOT_CONNECTED.to_string()))?;
        outbound
            .send(frame)
            .map_err(|_| CalStatsError::Channel(MSG_CHANNEL_NOT_CONNECTED.to_string()))?;

        debug!(event = event.name(), "event emitted");
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.listeners.register()
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

async fn write_loop(
    mut sink: SplitSink<Socket, Message>,
    mut queue: mpsc::UnboundedReceiver<String>,
) {
    while let Some(frame) = queue.recv().await {
        if let Err(err) = sink.send(Message::text(frame)).await {
            warn!(error = %err, "channel write failed");
            return;
        }
    }
    let _ = sink.close().await;
}

async fn read_loop(
    mut stream: SplitStream<Socket>,
    outbound: mpsc::UnboundedSender<String>,
    listeners: Arc<ListenerRegistry>,
    connected: Arc<AtomicBool>,
) {
    while let Some(message) = stream.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                debug!("server closed the socket");
                break;
            }
            Ok(_) => continue,
            Err(err) => {
                warn!(error = %err, "channel read failed");
                break;
            }
        };

        let packet = match Packet::parse(text.as_str()) {
            Ok(packet) => packet,
            Err(err) => {
                warn!(error = %err, "skipping malformed frame");
                continue;
            }
        };

        match packet {
            Packet::Ping => {
                let _ = outbound.send(Packet::Pong.encode());
            }
            Packet::Event { name, payload } => match InboundEvent::from_named(&name, payload) {
                Ok(Some(event)) => {
                    listeners.dispatch(&event);
                }
                Ok(None) => debug!(event = %name, "ignoring unknown event"),
                Err(err) => warn!(event = %name, error = %err, "skipping undecodable event"),
            },
            Packet::Close | Packet::Disconnect => {
                info!("server ended the session");
                break;
            }
            Packet::ConnectError(data) => {
                warn!(data = %data, "server reported a connect error");
                break;
            }
            other => debug!(packet = ?other, "ignored"),
        }
    }
    connected.store(false, Ordering::SeqCst);
}

async fn next_packet(socket: &mut Socket) -> Result<Packet> {
    loop {
        match socket.next().await {
            Some(Ok(Message::Text(text))) => return Packet::parse(text.as_str()),
            Some(Ok(Message::Close(_))) | None => {
                return Err(CalStatsError::Channel("Socket closed during handshake".to_string()))
            }
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                return Err(CalStatsError::Channel(format!("Handshake read failed: {err}")))
            }
        }
    }
}

async fn send_frame(socket: &mut Socket, frame: String) -> Result<()> {
    socket
        .send(Message::text(frame))
        .await
        .map_err(|e| CalStatsError::Channel(format!("Handshake write failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_urls_become_websocket_endpoints() {
        let url = socket_io_endpoint("http://localhost:5001").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:5001/socket.io/?EIO=4&transport=websocket");

        let url = socket_io_endpoint("https://stats.example.com/api").unwrap();
        assert_eq!(url.as_str(), "wss://stats.example.com/api/socket.io/?EIO=4&transport=websocket");

        let url = socket_io_endpoint("ws://127.0.0.1:9000/").unwrap();
        assert_eq!(url.as_str(), "ws://127.0.0.1:9000/socket.io/?EIO=4&transport=websocket");
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(matches!(socket_io_endpoint("ftp://host"), Err(CalStatsError::Config(_))));
        assert!(matches!(socket_io_endpoint("not a url"), Err(CalStatsError::Config(_))));
    }

    #[tokio::test]
    async fn emit_before_connect_fails() {
        let channel = WebSocketChannel::new(ChannelConfig::default());
        let event = OutboundEvent::Upload(calstats_domain::UploadPayload { file: String::new() });

        let err = channel.emit(event).await.unwrap_err();
        assert_eq!(err.user_message(), MSG_CHANNEL_NOT_CONNECTED);
        assert!(!channel.is_connected());
        assert!(channel.disconnect().await.is_ok());
    }
}
