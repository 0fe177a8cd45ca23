//! # Patchbay
//!
//! Native plugin framework for Rust.
//!
//! Patchbay builds real-time MIDI and audio plugins that load through the
//! native C plugin ABI: a static plugin descriptor with a table of
//! `extern "C"` callbacks, and a host descriptor supplying callbacks such as
//! `write_midi_event`.
//!
//! ## Architecture
//!
//! ```text
//! Your Plugin (implements Plugin trait)
//!        ↓
//! NativeProcessor<P> (generic extern "C" wrapper)
//!        ↓
//! NativePluginDescriptor (C ABI)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use patchbay::prelude::*;
//!
//! #[derive(Default, HasParams)]
//! pub struct Thru {
//!     #[params]
//!     params: NoParams,
//! }
//!
//! impl Plugin for Thru {
//!     fn process(&mut self, _: &mut Buffer, midi_in: &[MidiEvent], midi_out: &mut dyn MidiSink) {
//!         for event in midi_in {
//!             midi_out.write(event);
//!         }
//!     }
//! }
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("Thru", "thru").with_midi_ports(1, 1);
//! export_native!(CONFIG, Thru);
//! ```

// Re-export sub-crates
pub use patchbay_core as core;
pub use patchbay_native as native;

// Re-export derive macros when feature is enabled
#[cfg(feature = "derive")]
pub use patchbay_macros::HasParams;

/// Prelude module for convenient imports.
///
/// Import everything you need to build a plugin:
/// ```rust,ignore
/// use patchbay::prelude::*;
/// ```
pub mod prelude {
    // Core traits and types
    pub use patchbay_core::{
        // Traits
        HasParams, MidiSink, Parameters, Plugin,
        // Buffers
        Buffer, MidiBuffer,
        // Parameter types
        BoolParam, NoParams, ParamFlags, ParamInfo, ParamRanges, ParamValue, ScalePoint,
        // Plugin metadata
        MidiSupport, PluginCategory, PluginConfig, PluginHints,
        // Error types
        PluginError, PluginResult,
        // MIDI types
        ports, status, MidiChannel, MidiEvent, MidiMessageKind, MidiNote, MAX_MIDI_CHANNELS,
    };

    // Native ABI implementation
    pub use patchbay_native::{export_native, NativeProcessor};

    // Derive macro (when feature enabled)
    #[cfg(feature = "derive")]
    pub use patchbay_macros::HasParams;
}
