//! Core plugin trait definitions.
//!
//! A native plugin is a single object: the host instantiates it, talks to
//! its parameters by index and calls `process` once per block on the audio
//! thread. There is no prepare/unprepare phase, since the native ABI hands
//! nothing to the plugin before the first block that a plugin without audio
//! ports would need.

use crate::buffer::Buffer;
use crate::midi::{MidiEvent, MidiSink};
use crate::params::Parameters;

// =============================================================================
// HasParams Trait (Shared Parameter Access)
// =============================================================================

/// Trait for types that hold parameters.
///
/// # Derive Macro
///
/// Use `#[derive(HasParams)]` to implement this trait for a struct with a
/// `#[params]` field annotation:
///
/// ```ignore
/// #[derive(Default, HasParams)]
/// pub struct RouterPlugin {
///     #[params]
///     params: RouterParams,
/// }
/// ```
pub trait HasParams: Send + 'static {
    /// The parameter collection type.
    type Params: Parameters;

    /// Returns a reference to the parameters.
    fn params(&self) -> &Self::Params;

    /// Returns a mutable reference to the parameters.
    fn params_mut(&mut self) -> &mut Self::Params;
}

// =============================================================================
// Plugin Trait
// =============================================================================

/// A plugin that can be exposed through the native ABI.
///
/// `Default` is the constructor: the wrapper calls `P::default()` when the
/// host instantiates the plugin, so every parameter starts at its default.
///
/// # Real-Time Safety
///
/// [`process`](Plugin::process) runs on the host's audio thread. It must
/// not allocate, lock, perform I/O or log.
///
/// # Example
///
/// ```
/// use patchbay_core::{Buffer, HasParams, MidiEvent, MidiSink, NoParams, Plugin};
///
/// #[derive(Default)]
/// struct Thru {
///     params: NoParams,
/// }
///
/// impl HasParams for Thru {
///     type Params = NoParams;
///     fn params(&self) -> &NoParams { &self.params }
///     fn params_mut(&mut self) -> &mut NoParams { &mut self.params }
/// }
///
/// impl Plugin for Thru {
///     fn process(
///         &mut self,
///         _buffer: &mut Buffer,
///         midi_in: &[MidiEvent],
///         midi_out: &mut dyn MidiSink,
///     ) {
///         for event in midi_in {
///             midi_out.write(event);
///         }
///     }
/// }
/// ```
pub trait Plugin: HasParams + Default {
    /// Process one block.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Audio channels for the declared audio ports (possibly none)
    /// * `midi_in` - Incoming events for this block, in host order
    /// * `midi_out` - Destination for outgoing events
    fn process(&mut self, buffer: &mut Buffer, midi_in: &[MidiEvent], midi_out: &mut dyn MidiSink);
}
