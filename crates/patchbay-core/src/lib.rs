//! # patchbay-core
//!
//! Core abstractions for the Patchbay native plugin framework.
//!
//! This crate provides the format-agnostic pieces a plugin is written
//! against. It has no external dependencies; the C ABI lives in
//! `patchbay-native`.
//!
//! ## Main Traits
//!
//! - [`Plugin`] - Per-block processing entry point
//! - [`HasParams`] - Access to a plugin's parameter collection
//! - [`Parameters`] - Index-addressed parameter collection
//! - [`MidiSink`] - Destination for emitted MIDI events
//!
//! ## Types
//!
//! - [`MidiEvent`] - Raw MIDI event (time, port, up to four bytes)
//! - [`MidiBuffer`] - Fixed-capacity event collector
//! - [`ParamInfo`] - Parameter metadata
//! - [`BoolParam`] - Atomic on/off parameter
//! - [`Buffer`] - Audio I/O view
//! - [`PluginConfig`] - Static plugin metadata
//! - [`PluginError`] - Error types

pub mod buffer;
pub mod config;
pub mod error;
pub mod midi;
pub mod param_types;
pub mod params;
pub mod plugin;
pub mod types;

// Re-exports for convenience
pub use buffer::Buffer;
pub use config::{MidiSupport, PluginCategory, PluginConfig, PluginHints};
pub use error::{PluginError, PluginResult};
pub use midi::{
    is_channel_message, ports, status, status_from_data, MidiBuffer, MidiChannel,
    MidiMessageKind, MidiEvent, MidiNote, MidiSink, MAX_MIDI_EVENTS, MAX_MIDI_EVENT_SIZE,
};
pub use param_types::BoolParam;
pub use params::{NoParams, ParamFlags, ParamInfo, ParamRanges, Parameters, ScalePoint, TOGGLE_SCALE_POINTS};
pub use plugin::{HasParams, Plugin};
pub use types::{ParamValue, MAX_CHANNELS, MAX_MIDI_CHANNELS};
