//! Plugin descriptor construction.
//!
//! A [`Descriptor`] is the long-lived `NativePluginDescriptor` a host reads
//! after loading the library. It owns the C strings its metadata points at.

use std::ffi::CString;

use log::{debug, error};
use patchbay_core::PluginResult;

use crate::abi::{category_value, plugin_hint_bits, support_bits, NativePluginDescriptor};
use crate::processor::{NativePlugin, NativeProcessor};
use crate::util::to_cstring;

/// An owned plugin descriptor.
pub struct Descriptor {
    raw: NativePluginDescriptor,
    _name: CString,
    _label: CString,
    _maker: CString,
    _copyright: CString,
}

// SAFETY: the raw descriptor only holds pointers to the CStrings owned
// alongside it and to `extern "C"` functions. Nothing is mutated after
// construction.
unsafe impl Send for Descriptor {}
unsafe impl Sync for Descriptor {}

impl Descriptor {
    /// Build the descriptor from `P`'s static configuration.
    ///
    /// Callbacks the framework does not support (MIDI programs, custom
    /// data, UI, activation, state) are left null.
    pub fn new<P: NativePlugin>() -> PluginResult<Self> {
        let config = P::config();
        if let Err(err) = config.validate() {
            error!("Refusing to describe plugin '{}': {}", config.name, err);
            return Err(err);
        }

        let name = to_cstring("name", config.name)?;
        let label = to_cstring("label", config.label)?;
        let maker = to_cstring("maker", config.maker)?;
        let copyright = to_cstring("copyright", config.copyright)?;

        let raw = NativePluginDescriptor {
            category: category_value(config.category),
            hints: plugin_hint_bits(&config.hints),
            supports: support_bits(&config.supports),
            audio_ins: config.audio_ins,
            audio_outs: config.audio_outs,
            midi_ins: config.midi_ins,
            midi_outs: config.midi_outs,
            param_ins: config.param_ins,
            param_outs: config.param_outs,
            name: name.as_ptr(),
            label: label.as_ptr(),
            maker: maker.as_ptr(),
            copyright: copyright.as_ptr(),

            instantiate: Some(NativeProcessor::<P>::instantiate),
            cleanup: Some(NativeProcessor::<P>::cleanup),

            get_parameter_count: Some(NativeProcessor::<P>::get_parameter_count),
            get_parameter_info: Some(NativeProcessor::<P>::get_parameter_info),
            get_parameter_value: Some(NativeProcessor::<P>::get_parameter_value),

            get_midi_program_count: None,
            get_midi_program_info: None,

            set_parameter_value: Some(NativeProcessor::<P>::set_parameter_value),
            set_midi_program: None,
            set_custom_data: None,

            ui_show: None,
            ui_idle: None,

            ui_set_parameter_value: None,
            ui_set_midi_program: None,
            ui_set_custom_data: None,

            activate: None,
            deactivate: None,
            process: Some(NativeProcessor::<P>::process),

            get_state: None,
            set_state: None,

            dispatcher: None,
        };

        debug!("Built descriptor for '{}' ({})", config.name, config.label);
        Ok(Self {
            raw,
            _name: name,
            _label: label,
            _maker: maker,
            _copyright: copyright,
        })
    }

    /// The descriptor as the host sees it.
    pub fn raw(&self) -> &NativePluginDescriptor {
        &self.raw
    }

    /// Pointer to hand to the host. Valid for the lifetime of `self`.
    pub fn as_ptr(&self) -> *const NativePluginDescriptor {
        &self.raw
    }
}
