//! WebSocket channel against a local Socket.IO-speaking server.

use std::time::Duration;

use calstats_core::RealtimeChannel;
use calstats_domain::{ChannelConfig, InboundEvent, OutboundEvent, UploadPayload};
use calstats_infra::WebSocketChannel;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

const OPEN: &str =
    r#"0{"sid":"engine-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
const RESULT: &str = r#"42["result",{"timeline":[{"id":0,"content":"Paris","start":"2024-03-17T00:00:00+00:00","end":"2024-03-20T00:00:00+00:00"}],"days_last_year":3,"events_last_year":[],"days_last_5_years":3,"events_last_5_years":[]}]"#;
const WAIT: Duration = Duration::from_secs(5);

enum Script {
    /// Full session: ack, ping, answer every upload with a result.
    Serve,
    /// Refuse the namespace.
    Refuse,
    /// Ack, then end the session from the server side.
    HangUp,
}

async fn spawn_server(script: Script) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (seen_tx, seen_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let socket = accept_async(stream).await.unwrap();
        let (mut tx, mut rx) = socket.split();

        tx.send(Message::text(OPEN)).await.unwrap();
        let Some(Ok(Message::Text(join))) = rx.next().await else { return };
        seen_tx.send(join.to_string()).ok();

        match script {
            Script::Refuse => {
                tx.send(Message::text(r#"44{"message":"Invalid namespace"}"#)).await.ok();
                return;
            }
            Script::HangUp => {
                tx.send(Message::text(r#"40{"sid":"ns-1"}"#)).await.unwrap();
                tx.send(Message::text("41")).await.ok();
                return;
            }
            Script::Serve => {
                tx.send(Message::text(r#"40{"sid":"ns-1"}"#)).await.unwrap();
                tx.send(Message::text("2")).await.unwrap();
            }
        }

        while let Some(Ok(message)) = rx.next().await {
            let Message::Text(text) = message else { continue };
            let text = text.to_string();
            seen_tx.send(text.clone()).ok();
            if text.starts_with(r#"42["upload""#) {
                // Garbage first: the client must skip it and keep reading.
                tx.send(Message::text("42{\"not\":\"an array\"}")).await.unwrap();
                tx.send(Message::text(r#"42["progress",{}]"#)).await.unwrap();
                tx.send(Message::text(RESULT)).await.unwrap();
            }
        }
    });

    (format!("http://{addr}"), seen_rx)
}

fn channel_for(url: String) -> WebSocketChannel {
    WebSocketChannel::new(ChannelConfig { url, connect_timeout_secs: 2 })
}

fn upload() -> OutboundEvent {
    OutboundEvent::Upload(UploadPayload { file: "BEGIN:VCALENDAR".into() })
}

/// Channel logs go to the test output; `RUST_LOG` picks the level.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn wait_for_frame(seen: &mut mpsc::UnboundedReceiver<String>, frame: &str) {
    loop {
        let next = timeout(WAIT, seen.recv()).await.expect("server frame").expect("server alive");
        if next == frame {
            return;
        }
    }
}

#[tokio::test]
async fn full_session_round_trip() {
    init_tracing();
    let (url, mut seen) = spawn_server(Script::Serve).await;
    let channel = channel_for(url);
    let mut first = channel.subscribe();
    let mut second = channel.subscribe();

    channel.connect().await.unwrap();
    assert!(channel.is_connected());
    wait_for_frame(&mut seen, "40").await;
    wait_for_frame(&mut seen, "3").await;

    channel.emit(upload()).await.unwrap();
    wait_for_frame(&mut seen, r#"42["upload",{"file":"BEGIN:VCALENDAR"}]"#).await;

    let result = match timeout(WAIT, first.recv()).await.unwrap() {
        Some(InboundEvent::Result(result)) => result,
        other => panic!("expected result, got {other:?}"),
    };
    assert_eq!(result.days_last_year, 3);
    assert_eq!(result.timeline[0].content, "Paris");
    assert!(matches!(timeout(WAIT, second.recv()).await.unwrap(), Some(InboundEvent::Result(_))));

    assert!(channel.unsubscribe(first.id));
    channel.emit(upload()).await.unwrap();
    assert!(matches!(timeout(WAIT, second.recv()).await.unwrap(), Some(InboundEvent::Result(_))));
    assert_eq!(timeout(WAIT, first.recv()).await.unwrap(), None);

    channel.disconnect().await.unwrap();
    assert!(!channel.is_connected());
    wait_for_frame(&mut seen, "41").await;
    assert!(channel.emit(upload()).await.is_err());
}

#[tokio::test]
async fn refused_namespace_fails_connect() {
    init_tracing();
    let (url, _seen) = spawn_server(Script::Refuse).await;
    let channel = channel_for(url);

    let err = channel.connect().await.unwrap_err();
    assert_eq!(err.label(), "channel");
    assert!(!channel.is_connected());
}

#[tokio::test]
async fn server_hang_up_marks_disconnected() {
    init_tracing();
    let (url, _seen) = spawn_server(Script::HangUp).await;
    let channel = channel_for(url);
    channel.connect().await.unwrap();

    timeout(WAIT, async {
        while channel.is_connected() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("channel should notice the server leaving");
    assert!(channel.emit(upload()).await.is_err());
}

#[tokio::test]
async fn silent_server_times_out() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept the TCP connection but never answer the WebSocket upgrade.
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let channel = WebSocketChannel::new(ChannelConfig {
        url: format!("http://{addr}"),
        connect_timeout_secs: 1,
    });
    let err = channel.connect().await.unwrap_err();
    assert!(err.to_string().contains("Timed out"));
}

#[tokio::test]
async fn unreachable_service_is_a_channel_error() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = channel_for(format!("http://{addr}")).connect().await.unwrap_err();
    assert_eq!(err.label(), "channel");
}
