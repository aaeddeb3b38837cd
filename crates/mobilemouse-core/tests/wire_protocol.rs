//! Integration tests for the client wire protocol.
//!
//! These go through the crate's public API only: decode a frame the way the
//! message channel does, then check the resulting control event together
//! with the key mapper and the server replies.

use mobilemouse_core::{
    decode_client_message, ButtonAction, ControlEvent, DecodeError, Inbound, KeyAction,
    KeyMapper, ModifierSet, MouseButton, ServerMessage,
};
use serde_json::Value;

fn decode_control(text: &str) -> ControlEvent {
    match decode_client_message(text).expect("decode must succeed") {
        Inbound::Control(ev) => ev,
        other => panic!("expected a control event, got {other:?}"),
    }
}

#[test]
fn test_every_control_type_decodes_from_minimal_frame() {
    let types = [
        "mouse_move",
        "mouse_button",
        "scroll",
        "drag",
        "key_event",
        "text_input",
        "tap",
        "double_tap",
        "long_press",
        "pinch",
        "rotate",
        "two_finger_move",
        "touch_start",
        "touch_move",
        "touch_end",
    ];

    for t in types {
        // Arrange: text_input needs a non-empty text to produce an event.
        let frame = if t == "text_input" {
            format!(r#"{{"type":"{t}","text":"x"}}"#)
        } else {
            format!(r#"{{"type":"{t}"}}"#)
        };

        // Act
        let ev = decode_control(&frame);

        // Assert
        assert_eq!(ev.kind(), t);
    }
}

#[test]
fn test_key_event_name_maps_to_physical_key() {
    // Arrange
    let ev = decode_control(
        r#"{"type":"key_event","key":"ArrowLeft","action":"down","mod":{"ctrl":true,"shift":true}}"#,
    );

    // Act
    let ControlEvent::KeyEvent {
        key,
        action,
        modifiers,
    } = ev
    else {
        panic!("expected key_event");
    };

    // Assert
    assert_eq!(action, KeyAction::Down);
    assert_eq!(modifiers, ModifierSet::CTRL.union(ModifierSet::SHIFT));
    assert!(KeyMapper::map_key_name(&key).is_some());
}

#[test]
fn test_click_on_middle_button() {
    assert_eq!(
        decode_control(r#"{"type":"mouse_button","button":"middle","action":"click"}"#),
        ControlEvent::MouseButton {
            button: MouseButton::Middle,
            action: ButtonAction::Click,
        }
    );
}

#[test]
fn test_extra_fields_are_ignored() {
    assert_eq!(
        decode_control(r#"{"type":"tap","x":10,"y":20,"pressure":0.7}"#),
        ControlEvent::Tap
    );
}

#[test]
fn test_ping_reply_echoes_timestamp() {
    // Arrange
    let Inbound::Ping { ts } =
        decode_client_message(r#"{"type":"ping","ts":1700000000123}"#).expect("decode")
    else {
        panic!("expected ping");
    };

    // Act
    let reply = ServerMessage::Pong { ts }.to_json().expect("encode");

    // Assert
    let json: Value = serde_json::from_str(&reply).expect("parse");
    assert_eq!(json["type"], "pong");
    assert_eq!(json["ts"], 1_700_000_000_123u64);
}

#[test]
fn test_unsupported_type_produces_error_reply() {
    // Act
    let err = decode_client_message(r#"{"type":"clipboard_sync"}"#).expect_err("must fail");

    // Assert
    let DecodeError::Unsupported { type_name } = err else {
        panic!("expected Unsupported, got {err:?}");
    };
    assert_eq!(
        ServerMessage::unsupported(&type_name),
        ServerMessage::Error {
            code: "UNSUPPORTED".to_string(),
            message: "Unknown type: clipboard_sync".to_string(),
        }
    );
}

#[test]
fn test_hello_from_client_is_recognised() {
    assert_eq!(
        decode_client_message(r#"{"type":"hello","client":"android"}"#).expect("decode"),
        Inbound::Hello
    );
}

#[test]
fn test_server_messages_round_trip_through_json() {
    for msg in [
        ServerMessage::hello(),
        ServerMessage::Pong { ts: None },
        ServerMessage::unsupported("x"),
    ] {
        let text = msg.to_json().expect("encode");
        let back: ServerMessage = serde_json::from_str(&text).expect("decode");
        assert_eq!(back, msg);
    }
}
