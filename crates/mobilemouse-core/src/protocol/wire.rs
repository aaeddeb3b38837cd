//! JSON wire format spoken with the phone client.
//!
//! Every frame is a JSON object whose `"type"` field names the message.  All
//! other fields are flat in the same object:
//!
//! ```json
//! {"type":"mouse_move","dx":3.4,"dy":-1}
//! {"type":"key_event","key":"c","action":"down","mod":{"ctrl":true}}
//! {"type":"pinch","dscale":0.25}
//! ```
//!
//! # Tolerance
//!
//! Phones send whatever their UI layer produced, so decoding is lenient:
//! missing numeric fields are `0`, missing modifier flags are `false`, a
//! missing or unknown button is `left`.  Only two things are errors: a frame
//! that is not a JSON object with a string `"type"`, and a field present with
//! the wrong JSON kind.  An unrecognised `"type"` is reported separately as
//! [`DecodeError::Unsupported`] so the channel can answer with an
//! `UNSUPPORTED` error frame.
//!
//! # Why not `#[serde(tag = "type")]` directly?
//!
//! An internally tagged enum would fold "unknown type" and "bad field" into
//! one opaque serde error.  Reading the tag first keeps them apart and lets
//! each payload be a small struct with `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::events::{ButtonAction, ControlEvent, KeyAction, ModifierSet, MouseButton};

/// Version string advertised in the server `hello` frame.
pub const SERVER_VERSION: &str = "1.0.0";

/// Capabilities advertised in the server `hello` frame.
pub const SERVER_FEATURES: [&str; 4] = ["mouse", "keyboard", "text", "gestures"];

/// Error code sent back for an unrecognised message type.
pub const ERROR_CODE_UNSUPPORTED: &str = "UNSUPPORTED";

/// Errors produced while decoding a client frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The frame is JSON but has no string `"type"` field.
    #[error("message has no \"type\" field")]
    MissingType,

    /// The `"type"` is not one this server understands.
    #[error("unsupported message type: {type_name}")]
    Unsupported { type_name: String },

    /// A known message carried a field of the wrong kind.
    #[error("malformed {type_name} message: {source}")]
    Malformed {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A decoded client frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// The client introduced itself; nothing to do.
    Hello,
    /// Keepalive; must be answered with a `pong` echoing `ts`.
    Ping { ts: Option<Value> },
    /// An input instruction for the injection engine.
    Control(ControlEvent),
    /// A recognised message whose payload asks for nothing (for example a
    /// `mouse_button` with an unknown action).
    Ignored { type_name: String },
}

/// Messages the server sends to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Hello {
        #[serde(rename = "serverVersion")]
        server_version: String,
        features: Vec<String>,
    },
    Pong {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ts: Option<Value>,
    },
    Error { code: String, message: String },
}

impl ServerMessage {
    /// The greeting sent right after the WebSocket handshake.
    pub fn hello() -> Self {
        ServerMessage::Hello {
            server_version: SERVER_VERSION.to_string(),
            features: SERVER_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// The reply to a message with an unrecognised type.
    pub fn unsupported(type_name: &str) -> Self {
        ServerMessage::Error {
            code: ERROR_CODE_UNSUPPORTED.to_string(),
            message: format!("Unknown type: {type_name}"),
        }
    }

    /// Serialises to a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ── Payloads ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeltaPayload {
    dx: f64,
    dy: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PingPayload {
    ts: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ButtonPayload {
    button: Option<String>,
    action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeyPayload {
    key: Option<String>,
    action: Option<String>,
    #[serde(rename = "mod")]
    modifiers: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextPayload {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PinchPayload {
    dscale: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RotatePayload {
    dr: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TwoFingerPayload {
    ds: f64,
    dy: f64,
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decodes one client text frame.
///
/// # Errors
///
/// See [`DecodeError`].  Missing optional fields never produce an error.
pub fn decode_client_message(text: &str) -> Result<Inbound, DecodeError> {
    let root: Value = serde_json::from_str(text)?;
    let type_name = root
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingType)?
        .to_string();

    let inbound = match type_name.as_str() {
        "hello" => Inbound::Hello,
        "ping" => {
            let p: PingPayload = payload(&type_name, &root)?;
            Inbound::Ping { ts: p.ts }
        }
        "mouse_move" => {
            let (dx, dy) = delta(&type_name, &root)?;
            Inbound::Control(ControlEvent::MouseMove { dx, dy })
        }
        "drag" => {
            let (dx, dy) = delta(&type_name, &root)?;
            Inbound::Control(ControlEvent::Drag { dx, dy })
        }
        "touch_move" => {
            let (dx, dy) = delta(&type_name, &root)?;
            Inbound::Control(ControlEvent::TouchMove { dx, dy })
        }
        "scroll" => {
            let (dx, dy) = delta(&type_name, &root)?;
            Inbound::Control(ControlEvent::Scroll { dx, dy })
        }
        "mouse_button" => {
            let p: ButtonPayload = payload(&type_name, &root)?;
            let button = parse_button(p.button.as_deref());
            match parse_button_action(p.action.as_deref()) {
                Some(action) => Inbound::Control(ControlEvent::MouseButton { button, action }),
                None => Inbound::Ignored { type_name },
            }
        }
        "key_event" => {
            let p: KeyPayload = payload(&type_name, &root)?;
            // A `mod` that is not an object counts as "no modifiers".
            let modifiers = p
                .modifiers
                .filter(Value::is_object)
                .map(serde_json::from_value::<ModifierSet>)
                .transpose()
                .map_err(|source| DecodeError::Malformed {
                    type_name: type_name.clone(),
                    source,
                })?
                .unwrap_or_default();
            match parse_key_action(p.action.as_deref()) {
                Some(action) => Inbound::Control(ControlEvent::KeyEvent {
                    key: p.key.unwrap_or_default(),
                    action,
                    modifiers,
                }),
                None => Inbound::Ignored { type_name },
            }
        }
        "text_input" => {
            let p: TextPayload = payload(&type_name, &root)?;
            match p.text.filter(|t| !t.is_empty()) {
                Some(text) => Inbound::Control(ControlEvent::TextInput { text }),
                None => Inbound::Ignored { type_name },
            }
        }
        "tap" => Inbound::Control(ControlEvent::Tap),
        "double_tap" => Inbound::Control(ControlEvent::DoubleTap),
        "long_press" => Inbound::Control(ControlEvent::LongPress),
        "touch_start" => Inbound::Control(ControlEvent::TouchStart),
        "touch_end" => Inbound::Control(ControlEvent::TouchEnd),
        "pinch" => {
            let p: PinchPayload = payload(&type_name, &root)?;
            Inbound::Control(ControlEvent::Pinch { dscale: p.dscale })
        }
        "rotate" => {
            let p: RotatePayload = payload(&type_name, &root)?;
            Inbound::Control(ControlEvent::Rotate { dr: p.dr })
        }
        "two_finger_move" => {
            let p: TwoFingerPayload = payload(&type_name, &root)?;
            Inbound::Control(ControlEvent::TwoFingerMove { ds: p.ds, dy: p.dy })
        }
        _ => return Err(DecodeError::Unsupported { type_name }),
    };
    Ok(inbound)
}

fn payload<T: DeserializeOwned>(type_name: &str, root: &Value) -> Result<T, DecodeError> {
    T::deserialize(root).map_err(|source| DecodeError::Malformed {
        type_name: type_name.to_string(),
        source,
    })
}

fn delta(type_name: &str, root: &Value) -> Result<(i32, i32), DecodeError> {
    let d: DeltaPayload = payload(type_name, root)?;
    Ok((round_px(d.dx), round_px(d.dy)))
}

/// Rounds a client delta to whole pixels; non-finite values become 0.
pub fn round_px(v: f64) -> i32 {
    if v.is_finite() {
        v.round() as i32
    } else {
        0
    }
}

fn parse_button(s: Option<&str>) -> MouseButton {
    match s {
        Some("right") => MouseButton::Right,
        Some("middle") => MouseButton::Middle,
        _ => MouseButton::Left,
    }
}

fn parse_button_action(s: Option<&str>) -> Option<ButtonAction> {
    match s {
        None | Some("") | Some("down") => Some(ButtonAction::Down),
        Some("up") => Some(ButtonAction::Up),
        Some("click") => Some(ButtonAction::Click),
        Some(_) => None,
    }
}

fn parse_key_action(s: Option<&str>) -> Option<KeyAction> {
    match s {
        None | Some("down") => Some(KeyAction::Down),
        Some("up") => Some(KeyAction::Up),
        Some(_) => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
