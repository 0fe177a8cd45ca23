//! # patchbay-native
//!
//! Native C ABI layer for the Patchbay framework.
//!
//! This crate wraps `patchbay-core` plugins in the C structures a native
//! host loads:
//!
//! - `#[repr(C)]` descriptor, parameter and event types ([`abi`])
//! - Generic callback table ([`NativeProcessor`])
//! - Host MIDI output ([`HostMidiSink`])
//! - Descriptor construction and the library entry point ([`export_native!`])
//!
//! ## Architecture
//!
//! ```text
//! User Plugin (implements patchbay_core::Plugin)
//!        ↓
//! NativeProcessor<P> (extern "C" callbacks)
//!        ↓
//! NativePluginDescriptor (returned by patchbay_plugin_descriptor)
//! ```
//!
//! ## Usage
//!
//! 1. Implement `patchbay_core::Plugin` for your plugin type
//! 2. Use the `export_native!` macro to generate the entry point
//!
//! ```rust,ignore
//! use patchbay_core::PluginConfig;
//! use patchbay_native::export_native;
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Plugin", "myplugin")
//!     .with_maker("My Company");
//!
//! export_native!(CONFIG, MyPlugin);
//! ```

pub mod abi;
pub mod descriptor;
pub mod export;
pub mod host;
pub mod processor;
pub mod util;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports
pub use abi::{NativeHostDescriptor, NativeMidiEvent, NativeParameter, NativePluginDescriptor};
pub use descriptor::Descriptor;
pub use host::HostMidiSink;
pub use processor::{NativePlugin, NativeProcessor};

// Re-export shared PluginConfig from patchbay-core
pub use patchbay_core::PluginConfig;
