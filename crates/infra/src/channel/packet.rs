//! Engine.IO / Socket.IO text packet codec
//!
//! Only what the analysis service uses: the default namespace, text frames,
//! events without acknowledgements.
//!
//! | frame            | meaning                         |
//! |------------------|---------------------------------|
//! | `0{...}`         | Engine.IO open (handshake data) |
//! | `1`              | Engine.IO close                 |
//! | `2` / `3`        | ping / pong                     |
//! | `6`              | noop                            |
//! | `40` / `40{...}` | namespace connect               |
//! | `41`             | namespace disconnect            |
//! | `42["name",..]`  | event                           |
//! | `44{...}`        | connect error                   |

use calstats_domain::{CalStatsError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(Value),
    Close,
    Ping,
    Pong,
    Noop,
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, payload: Value },
    ConnectError(Value),
}

impl Packet {
    pub fn event(name: impl Into<String>, payload: Value) -> Self {
        Self::Event { name: name.into(), payload }
    }

    /// Decode one text frame.
    pub fn parse(frame: &str) -> Result<Self> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or_else(|| protocol("empty frame"))?;
        let rest = chars.as_str();

        match kind {
            '0' => Ok(Self::Open(parse_json(rest)?)),
            '1' => Ok(Self::Close),
            // Probe payloads ("2probe") only matter for transport upgrades.
            '2' => Ok(Self::Ping),
            '3' => Ok(Self::Pong),
            '6' => Ok(Self::Noop),
            '4' => parse_message(rest),
            other => Err(protocol(format!("unknown engine.io packet type '{other}'"))),
        }
    }

    /// Encode as a text frame.
    pub fn encode(&self) -> String {
        match self {
            Self::Open(data) => format!("0{data}"),
            Self::Close => "1".to_string(),
            Self::Ping => "2".to_string(),
            Self::Pong => "3".to_string(),
            Self::Noop => "6".to_string(),
            Self::Connect(None) => "40".to_string(),
            Self::Connect(Some(data)) => format!("40{data}"),
            Self::Disconnect => "41".to_string(),
            Self::Event { name, payload } => {
                format!("42{}", Value::Array(vec![Value::String(name.clone()), payload.clone()]))
            }
            Self::ConnectError(data) => format!("44{data}"),
        }
    }
}

fn parse_message(body: &str) -> Result<Packet> {
    let mut chars = body.chars();
    let kind = chars.next().ok_or_else(|| protocol("empty socket.io packet"))?;
    let rest = skip_ack_id(skip_namespace(chars.as_str()));

    match kind {
        '0' if rest.is_empty() => Ok(Packet::Connect(None)),
        '0' => Ok(Packet::Connect(Some(parse_json(rest)?))),
        '1' => Ok(Packet::Disconnect),
        '2' => parse_event(rest),
        '4' => Ok(Packet::ConnectError(parse_json(rest)?)),
        other => Err(protocol(format!("unsupported socket.io packet type '{other}'"))),
    }
}

fn parse_event(body: &str) -> Result<Packet> {
    let Value::Array(mut items) = parse_json(body)? else {
        return Err(protocol("event body is not an array"));
    };
    if items.is_empty() {
        return Err(protocol("event without a name"));
    }
    let Value::String(name) = items.remove(0) else {
        return Err(protocol("event name is not a string"));
    };
    let payload = if items.is_empty() { Value::Null } else { items.remove(0) };
    Ok(Packet::Event { name, payload })
}

/// `/admin,rest` → `rest`. The default namespace has no prefix.
fn skip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        body.split_once(',').map_or("", |(_, rest)| rest)
    } else {
        body
    }
}

fn skip_ack_id(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn parse_json(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| protocol(format!("invalid packet data: {e}")))
}

fn protocol(message: impl Into<String>) -> CalStatsError {
    CalStatsError::Protocol(message.into())
}
