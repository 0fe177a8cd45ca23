//! Static plugin configuration.
//!
//! This module provides the metadata a native host reads from the plugin
//! descriptor before instantiating anything: names, category, capability
//! hints and port counts.
//!
//! # Example
//!
//! ```
//! use patchbay_core::{PluginCategory, PluginConfig, PluginHints};
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Plugin", "myplugin")
//!     .with_maker("My Company")
//!     .with_copyright("MIT")
//!     .with_category(PluginCategory::Utility)
//!     .with_hints(PluginHints::RTSAFE)
//!     .with_audio_ports(0, 0)
//!     .with_midi_ports(1, 1);
//!
//! assert!(CONFIG.validate().is_ok());
//! ```

use crate::error::{PluginError, PluginResult};
use crate::types::MAX_CHANNELS;

/// Plugin category shown by the host's plugin browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginCategory {
    #[default]
    None,
    Synth,
    Delay,
    Eq,
    Filter,
    Distortion,
    Dynamics,
    Modulator,
    Utility,
    Other,
}

/// Capability hints about the plugin as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PluginHints {
    /// `process` never blocks, allocates or performs I/O.
    pub is_rtsafe: bool,
    /// The plugin is an instrument.
    pub is_synth: bool,
    /// The plugin has a custom UI.
    pub has_ui: bool,
    /// `process` requires the host's fixed buffer size.
    pub needs_fixed_buffers: bool,
    /// UI callbacks must run on the host's main thread.
    pub needs_ui_main_thread: bool,
    /// The plugin exposes one MIDI program per channel.
    pub uses_multi_progs: bool,
}

impl PluginHints {
    /// No hints.
    pub const NONE: Self = Self {
        is_rtsafe: false,
        is_synth: false,
        has_ui: false,
        needs_fixed_buffers: false,
        needs_ui_main_thread: false,
        uses_multi_progs: false,
    };

    /// Real-time safe, nothing else.
    pub const RTSAFE: Self = Self {
        is_rtsafe: true,
        ..Self::NONE
    };
}

/// Which incoming MIDI message types the plugin wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MidiSupport {
    pub program_changes: bool,
    pub control_changes: bool,
    pub channel_pressure: bool,
    pub note_aftertouch: bool,
    pub pitchbend: bool,
    pub all_sound_off: bool,
}

impl MidiSupport {
    /// Only notes (and system messages).
    pub const NONE: Self = Self {
        program_changes: false,
        control_changes: false,
        channel_pressure: false,
        note_aftertouch: false,
        pitchbend: false,
        all_sound_off: false,
    };

    /// Every message type.
    pub const EVERYTHING: Self = Self {
        program_changes: true,
        control_changes: true,
        channel_pressure: true,
        note_aftertouch: true,
        pitchbend: true,
        all_sound_off: true,
    };
}

/// Static plugin configuration.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin name displayed by the host.
    pub name: &'static str,

    /// Short unique label (e.g., "midiportswitch").
    pub label: &'static str,

    /// Author or company name.
    pub maker: &'static str,

    /// License or copyright notice.
    pub copyright: &'static str,

    pub category: PluginCategory,
    pub hints: PluginHints,
    pub supports: MidiSupport,

    pub audio_ins: u32,
    pub audio_outs: u32,
    pub midi_ins: u32,
    pub midi_outs: u32,

    /// Number of control-rate parameter inputs (CV style), not host parameters.
    pub param_ins: u32,
    /// Number of control-rate parameter outputs.
    pub param_outs: u32,
}

impl PluginConfig {
    /// Create a new plugin configuration with default values.
    ///
    /// Defaults: stereo audio in/out, no MIDI, real-time safe hint off,
    /// category [`PluginCategory::None`].
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            maker: "Unknown",
            copyright: "",
            category: PluginCategory::None,
            hints: PluginHints::NONE,
            supports: MidiSupport::NONE,
            audio_ins: 2,
            audio_outs: 2,
            midi_ins: 0,
            midi_outs: 0,
            param_ins: 0,
            param_outs: 0,
        }
    }

    /// Set the maker name.
    pub const fn with_maker(mut self, maker: &'static str) -> Self {
        self.maker = maker;
        self
    }

    /// Set the copyright notice.
    pub const fn with_copyright(mut self, copyright: &'static str) -> Self {
        self.copyright = copyright;
        self
    }

    /// Set the plugin category.
    pub const fn with_category(mut self, category: PluginCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the capability hints.
    pub const fn with_hints(mut self, hints: PluginHints) -> Self {
        self.hints = hints;
        self
    }

    /// Set which MIDI message types the plugin accepts.
    pub const fn with_midi_support(mut self, supports: MidiSupport) -> Self {
        self.supports = supports;
        self
    }

    /// Set the number of audio input and output channels.
    pub const fn with_audio_ports(mut self, ins: u32, outs: u32) -> Self {
        self.audio_ins = ins;
        self.audio_outs = outs;
        self
    }

    /// Set the number of MIDI input and output ports.
    pub const fn with_midi_ports(mut self, ins: u32, outs: u32) -> Self {
        self.midi_ins = ins;
        self.midi_outs = outs;
        self
    }

    /// Set the number of control-rate parameter ports.
    pub const fn with_param_ports(mut self, ins: u32, outs: u32) -> Self {
        self.param_ins = ins;
        self.param_outs = outs;
        self
    }

    /// Check that the metadata can be handed to a host.
    pub fn validate(&self) -> PluginResult<()> {
        if self.name.is_empty() {
            return Err(PluginError::InvalidConfig("name is empty".into()));
        }
        if self.label.is_empty() {
            return Err(PluginError::InvalidConfig("label is empty".into()));
        }
        for (field, value) in [
            ("name", self.name),
            ("label", self.label),
            ("maker", self.maker),
            ("copyright", self.copyright),
        ] {
            if value.contains('\0') {
                return Err(PluginError::InvalidConfig(format!(
                    "{} contains a NUL byte",
                    field
                )));
            }
        }
        if self.audio_ins as usize > MAX_CHANNELS || self.audio_outs as usize > MAX_CHANNELS {
            return Err(PluginError::InvalidConfig(format!(
                "{} audio ins / {} audio outs exceeds the {} channel limit",
                self.audio_ins, self.audio_outs, MAX_CHANNELS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_builder() {
        const CONFIG: PluginConfig = PluginConfig::new("Test", "test")
            .with_maker("Someone")
            .with_category(PluginCategory::Utility)
            .with_hints(PluginHints::RTSAFE)
            .with_midi_support(MidiSupport::EVERYTHING)
            .with_audio_ports(0, 0)
            .with_midi_ports(1, 16);

        assert_eq!(CONFIG.maker, "Someone");
        assert_eq!(CONFIG.category, PluginCategory::Utility);
        assert!(CONFIG.hints.is_rtsafe);
        assert!(!CONFIG.hints.is_synth);
        assert!(CONFIG.supports.pitchbend);
        assert_eq!(CONFIG.audio_ins, 0);
        assert_eq!(CONFIG.midi_outs, 16);
        assert!(CONFIG.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = PluginConfig::new("Test", "test");
        assert_eq!(config.audio_ins, 2);
        assert_eq!(config.midi_ins, 0);
        assert_eq!(config.hints, PluginHints::NONE);
        assert_eq!(config.supports, MidiSupport::NONE);
    }

    #[test]
    fn test_validate_rejects_bad_metadata() {
        assert!(PluginConfig::new("", "test").validate().is_err());
        assert!(PluginConfig::new("Test", "").validate().is_err());
        assert!(PluginConfig::new("Te\0st", "test").validate().is_err());
        assert!(PluginConfig::new("Test", "test")
            .with_maker("a\0b")
            .validate()
            .is_err());
        assert_eq!(
            PluginConfig::new("Test", "test")
                .with_audio_ports(64, 2)
                .validate(),
            Err(PluginError::InvalidConfig(
                "64 audio ins / 2 audio outs exceeds the 32 channel limit".into()
            ))
        );
    }
}
