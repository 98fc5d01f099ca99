//! Real-time channel adapter
//!
//! Socket.IO v5 over Engine.IO v4, carried on a WebSocket.

pub mod packet;
pub mod websocket;

pub use packet::Packet;
pub use websocket::{socket_io_endpoint, WebSocketChannel};
