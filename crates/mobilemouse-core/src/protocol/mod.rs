//! Protocol module: typed control events and the JSON wire format.

pub mod events;
pub mod wire;

pub use events::{ButtonAction, ControlEvent, KeyAction, ModifierSet, MouseButton};
pub use wire::{decode_client_message, DecodeError, Inbound, ServerMessage};
