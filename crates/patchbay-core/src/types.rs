//! Common types used throughout the Patchbay framework.

// =============================================================================
// Port Limits
// =============================================================================

/// Maximum number of audio channels per direction.
///
/// Plugins declaring more audio ports than this are rejected by
/// [`PluginConfig::validate`](crate::PluginConfig::validate).
pub const MAX_CHANNELS: usize = 32;

/// Number of MIDI channels, and therefore of addressable MIDI ports in the
/// native event format.
pub const MAX_MIDI_CHANNELS: usize = 16;

/// Plain parameter value. The native ABI uses single-precision floats.
pub type ParamValue = f32;
