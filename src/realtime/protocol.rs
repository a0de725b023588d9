//! Minimal socket.io v5 / engine.io v4 framing over a websocket
//!
//! Only what a listen-only client needs: the open handshake, heartbeats,
//! namespace connect and event frames. Binary attachments are not supported.

use serde_json::Value;

/// Engine.io protocol revision sent in the handshake query
pub const ENGINE_IO_VERSION: &str = "4";

/// Frame that joins the default namespace
pub const CONNECT_FRAME: &str = "40";

/// Heartbeat reply
pub const PONG_FRAME: &str = "3";

/// A decoded text frame
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Engine handshake carrying session parameters
    Open(Value),
    Close,
    Ping,
    Pong,
    /// Namespace joined
    Connected,
    Disconnected,
    ConnectError(String),
    Event { name: String, payload: Value },
    /// Anything this client does not act on
    Unknown,
}

/// Decode one websocket text frame.
pub fn parse(frame: &str) -> Packet {
    let mut chars = frame.chars();
    match chars.next() {
        Some('0') => Packet::Open(serde_json::from_str(chars.as_str()).unwrap_or(Value::Null)),
        Some('1') => Packet::Close,
        Some('2') => Packet::Ping,
        Some('3') => Packet::Pong,
        Some('4') => parse_message(chars.as_str()),
        _ => Packet::Unknown,
    }
}

fn parse_message(body: &str) -> Packet {
    let mut chars = body.chars();
    let kind = chars.next();
    let rest = strip_namespace(chars.as_str());

    match kind {
        Some('0') => Packet::Connected,
        Some('1') => Packet::Disconnected,
        Some('2') => parse_event(rest),
        Some('4') => {
            let message = serde_json::from_str::<Value>(rest)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| rest.to_string());
            Packet::ConnectError(message)
        }
        _ => Packet::Unknown,
    }
}

/// Drop an optional `/namespace,` prefix and ack id.
fn strip_namespace(s: &str) -> &str {
    let s = match s.strip_prefix('/') {
        Some(ns) => ns.split_once(',').map(|(_, rest)| rest).unwrap_or(""),
        None => s,
    };
    s.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn parse_event(rest: &str) -> Packet {
    let Ok(Value::Array(mut items)) = serde_json::from_str::<Value>(rest) else {
        return Packet::Unknown;
    };
    if items.is_empty() {
        return Packet::Unknown;
    }

    let name = match items.remove(0) {
        Value::String(name) => name,
        _ => return Packet::Unknown,
    };
    let payload = if items.is_empty() {
        Value::Null
    } else {
        items.remove(0)
    };
    Packet::Event { name, payload }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_handshake() {
        let packet = parse(r#"0{"sid":"abc","pingInterval":25000,"pingTimeout":20000}"#);
        match packet {
            Packet::Open(v) => assert_eq!(v["sid"], "abc"),
            other => panic!("expected Open, got {:?}", other),
        }
    }

    #[test]
    fn test_heartbeat() {
        assert_eq!(parse("2"), Packet::Ping);
        assert_eq!(parse("3"), Packet::Pong);
    }

    #[test]
    fn test_namespace_connect() {
        assert_eq!(parse(r#"40{"sid":"xyz"}"#), Packet::Connected);
        assert_eq!(parse("41"), Packet::Disconnected);
    }

    #[test]
    fn test_note_event() {
        let packet = parse(r#"42["nota:creada",{"id_expediente":9,"id_nota":3,"contenido":"Hola"}]"#);
        assert_eq!(
            packet,
            Packet::Event {
                name: "nota:creada".to_string(),
                payload: json!({"id_expediente": 9, "id_nota": 3, "contenido": "Hola"}),
            }
        );
    }

    #[test]
    fn test_event_with_namespace_and_ack() {
        let packet = parse(r#"42/admin,17["ping",1]"#);
        assert_eq!(
            packet,
            Packet::Event {
                name: "ping".to_string(),
                payload: json!(1),
            }
        );
    }

    #[test]
    fn test_connect_error_message() {
        assert_eq!(
            parse(r#"44{"message":"Not authorized"}"#),
            Packet::ConnectError("Not authorized".to_string())
        );
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse(""), Packet::Unknown);
        assert_eq!(parse("42not json"), Packet::Unknown);
        assert_eq!(parse("x"), Packet::Unknown);
    }
}
