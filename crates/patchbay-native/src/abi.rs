//! `#[repr(C)]` mirrors of the native plugin ABI.
//!
//! Field order and widths follow the host headers exactly. Enumerations the
//! host declares as C enums are carried as `u32` bit sets or values.

use std::ffi::{c_char, c_void};

use patchbay_core::{MidiEvent, MidiSupport, ParamFlags, PluginCategory, PluginHints};

/// Opaque per-instance pointer handed back to every plugin callback.
pub type NativePluginHandle = *mut c_void;

/// Opaque host pointer passed back to every host callback.
pub type NativeHostHandle = *mut c_void;

/// Dispatcher opcode (host or plugin side). Unused by Patchbay plugins.
pub type NativeDispatcherOpcode = i32;

// =============================================================================
// Bit Values
// =============================================================================

/// Plugin category values.
pub mod category {
    pub const NONE: u32 = 0;
    pub const SYNTH: u32 = 1;
    pub const DELAY: u32 = 2;
    pub const EQ: u32 = 3;
    pub const FILTER: u32 = 4;
    pub const DISTORTION: u32 = 5;
    pub const DYNAMICS: u32 = 6;
    pub const MODULATOR: u32 = 7;
    pub const UTILITY: u32 = 8;
    pub const OTHER: u32 = 9;
}

/// Plugin hint bits.
pub mod plugin_hints {
    pub const IS_RTSAFE: u32 = 1 << 0;
    pub const IS_SYNTH: u32 = 1 << 1;
    pub const HAS_UI: u32 = 1 << 2;
    pub const NEEDS_FIXED_BUFFERS: u32 = 1 << 3;
    pub const NEEDS_UI_MAIN_THREAD: u32 = 1 << 4;
    pub const USES_MULTI_PROGS: u32 = 1 << 5;
}

/// Supported MIDI message bits.
pub mod supports {
    pub const PROGRAM_CHANGES: u32 = 1 << 0;
    pub const CONTROL_CHANGES: u32 = 1 << 1;
    pub const CHANNEL_PRESSURE: u32 = 1 << 2;
    pub const NOTE_AFTERTOUCH: u32 = 1 << 3;
    pub const PITCHBEND: u32 = 1 << 4;
    pub const ALL_SOUND_OFF: u32 = 1 << 5;
    pub const EVERYTHING: u32 = (1 << 6) - 1;
}

/// Parameter hint bits.
pub mod parameter_hints {
    pub const IS_OUTPUT: u32 = 1 << 0;
    pub const IS_ENABLED: u32 = 1 << 1;
    pub const IS_AUTOMABLE: u32 = 1 << 2;
    pub const IS_BOOLEAN: u32 = 1 << 3;
    pub const IS_INTEGER: u32 = 1 << 4;
    pub const IS_LOGARITHMIC: u32 = 1 << 5;
    pub const USES_SAMPLE_RATE: u32 = 1 << 6;
    pub const USES_SCALEPOINTS: u32 = 1 << 7;
}

pub(crate) fn category_value(category: PluginCategory) -> u32 {
    match category {
        PluginCategory::None => category::NONE,
        PluginCategory::Synth => category::SYNTH,
        PluginCategory::Delay => category::DELAY,
        PluginCategory::Eq => category::EQ,
        PluginCategory::Filter => category::FILTER,
        PluginCategory::Distortion => category::DISTORTION,
        PluginCategory::Dynamics => category::DYNAMICS,
        PluginCategory::Modulator => category::MODULATOR,
        PluginCategory::Utility => category::UTILITY,
        PluginCategory::Other => category::OTHER,
    }
}

pub(crate) fn plugin_hint_bits(hints: &PluginHints) -> u32 {
    [
        (hints.is_rtsafe, plugin_hints::IS_RTSAFE),
        (hints.is_synth, plugin_hints::IS_SYNTH),
        (hints.has_ui, plugin_hints::HAS_UI),
        (hints.needs_fixed_buffers, plugin_hints::NEEDS_FIXED_BUFFERS),
        (hints.needs_ui_main_thread, plugin_hints::NEEDS_UI_MAIN_THREAD),
        (hints.uses_multi_progs, plugin_hints::USES_MULTI_PROGS),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .fold(0, |bits, (_, bit)| bits | bit)
}

pub(crate) fn support_bits(midi: &MidiSupport) -> u32 {
    [
        (midi.program_changes, supports::PROGRAM_CHANGES),
        (midi.control_changes, supports::CONTROL_CHANGES),
        (midi.channel_pressure, supports::CHANNEL_PRESSURE),
        (midi.note_aftertouch, supports::NOTE_AFTERTOUCH),
        (midi.pitchbend, supports::PITCHBEND),
        (midi.all_sound_off, supports::ALL_SOUND_OFF),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .fold(0, |bits, (_, bit)| bits | bit)
}

pub(crate) fn parameter_hint_bits(flags: &ParamFlags) -> u32 {
    [
        (flags.is_output, parameter_hints::IS_OUTPUT),
        (flags.is_enabled, parameter_hints::IS_ENABLED),
        (flags.can_automate, parameter_hints::IS_AUTOMABLE),
        (flags.is_boolean, parameter_hints::IS_BOOLEAN),
        (flags.is_integer, parameter_hints::IS_INTEGER),
        (flags.is_logarithmic, parameter_hints::IS_LOGARITHMIC),
        (flags.uses_scale_points, parameter_hints::USES_SCALEPOINTS),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .fold(0, |bits, (_, bit)| bits | bit)
}

// =============================================================================
// MIDI
// =============================================================================

/// Host-side MIDI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct NativeMidiEvent {
    pub time: u32,
    pub port: u8,
    pub size: u8,
    pub data: [u8; 4],
}

// Host event arrays are viewed as `&[MidiEvent]` in place.
const _: () = {
    assert!(std::mem::size_of::<NativeMidiEvent>() == std::mem::size_of::<MidiEvent>());
    assert!(std::mem::align_of::<NativeMidiEvent>() == std::mem::align_of::<MidiEvent>());
};

impl From<MidiEvent> for NativeMidiEvent {
    fn from(event: MidiEvent) -> Self {
        Self {
            time: event.time,
            port: event.port,
            size: event.size,
            data: event.data,
        }
    }
}

impl From<NativeMidiEvent> for MidiEvent {
    fn from(event: NativeMidiEvent) -> Self {
        MidiEvent {
            time: event.time,
            port: event.port,
            size: event.size,
            data: event.data,
        }
    }
}

/// MIDI program entry. Patchbay plugins expose none.
#[derive(Debug)]
#[repr(C)]
pub struct NativeMidiProgram {
    pub bank: u32,
    pub program: u32,
    pub name: *const c_char,
}

/// Host transport info. Only ever handled by pointer.
#[repr(C)]
pub struct NativeTimeInfo {
    _private: [u8; 0],
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct NativeParameterScalePoint {
    pub label: *const c_char,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct NativeParameterRanges {
    pub def: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub step_small: f32,
    pub step_large: f32,
}

/// Parameter description returned by `get_parameter_info`.
///
/// `unit` may be null. `scale_points` points at `scale_point_count` entries.
#[derive(Debug)]
#[repr(C)]
pub struct NativeParameter {
    pub hints: u32,
    pub name: *const c_char,
    pub unit: *const c_char,
    pub ranges: NativeParameterRanges,
    pub scale_point_count: u32,
    pub scale_points: *const NativeParameterScalePoint,
}

// =============================================================================
// Descriptors
// =============================================================================

/// Host descriptor passed to `instantiate`.
#[repr(C)]
pub struct NativeHostDescriptor {
    pub handle: NativeHostHandle,
    pub resource_dir: *const c_char,
    pub ui_name: *const c_char,
    pub ui_parent_id: usize,

    pub get_buffer_size: Option<unsafe extern "C" fn(NativeHostHandle) -> u32>,
    pub get_sample_rate: Option<unsafe extern "C" fn(NativeHostHandle) -> f64>,
    pub is_offline: Option<unsafe extern "C" fn(NativeHostHandle) -> bool>,

    pub get_time_info: Option<unsafe extern "C" fn(NativeHostHandle) -> *const NativeTimeInfo>,
    pub write_midi_event:
        Option<unsafe extern "C" fn(NativeHostHandle, *const NativeMidiEvent) -> bool>,

    pub ui_parameter_changed: Option<unsafe extern "C" fn(NativeHostHandle, u32, f32)>,
    pub ui_midi_program_changed: Option<unsafe extern "C" fn(NativeHostHandle, u8, u32, u32)>,
    pub ui_custom_data_changed:
        Option<unsafe extern "C" fn(NativeHostHandle, *const c_char, *const c_char)>,
    pub ui_closed: Option<unsafe extern "C" fn(NativeHostHandle)>,

    pub ui_open_file: Option<
        unsafe extern "C" fn(NativeHostHandle, bool, *const c_char, *const c_char) -> *const c_char,
    >,
    pub ui_save_file: Option<
        unsafe extern "C" fn(NativeHostHandle, bool, *const c_char, *const c_char) -> *const c_char,
    >,

    pub dispatcher: Option<
        unsafe extern "C" fn(NativeHostHandle, NativeDispatcherOpcode, i32, isize, *mut c_void, f32) -> isize,
    >,
}

/// Plugin descriptor: static metadata plus the callback table.
///
/// Entries the plugin does not implement are `None` (null to the host).
#[repr(C)]
pub struct NativePluginDescriptor {
    pub category: u32,
    pub hints: u32,
    pub supports: u32,
    pub audio_ins: u32,
    pub audio_outs: u32,
    pub midi_ins: u32,
    pub midi_outs: u32,
    pub param_ins: u32,
    pub param_outs: u32,
    pub name: *const c_char,
    pub label: *const c_char,
    pub maker: *const c_char,
    pub copyright: *const c_char,

    pub instantiate: Option<unsafe extern "C" fn(*const NativeHostDescriptor) -> NativePluginHandle>,
    pub cleanup: Option<unsafe extern "C" fn(NativePluginHandle)>,

    pub get_parameter_count: Option<unsafe extern "C" fn(NativePluginHandle) -> u32>,
    pub get_parameter_info:
        Option<unsafe extern "C" fn(NativePluginHandle, u32) -> *const NativeParameter>,
    pub get_parameter_value: Option<unsafe extern "C" fn(NativePluginHandle, u32) -> f32>,

    pub get_midi_program_count: Option<unsafe extern "C" fn(NativePluginHandle) -> u32>,
    pub get_midi_program_info:
        Option<unsafe extern "C" fn(NativePluginHandle, u32) -> *const NativeMidiProgram>,

    pub set_parameter_value: Option<unsafe extern "C" fn(NativePluginHandle, u32, f32)>,
    pub set_midi_program: Option<unsafe extern "C" fn(NativePluginHandle, u8, u32, u32)>,
    pub set_custom_data:
        Option<unsafe extern "C" fn(NativePluginHandle, *const c_char, *const c_char)>,

    pub ui_show: Option<unsafe extern "C" fn(NativePluginHandle, bool)>,
    pub ui_idle: Option<unsafe extern "C" fn(NativePluginHandle)>,

    pub ui_set_parameter_value: Option<unsafe extern "C" fn(NativePluginHandle, u32, f32)>,
    pub ui_set_midi_program: Option<unsafe extern "C" fn(NativePluginHandle, u8, u32, u32)>,
    pub ui_set_custom_data:
        Option<unsafe extern "C" fn(NativePluginHandle, *const c_char, *const c_char)>,

    pub activate: Option<unsafe extern "C" fn(NativePluginHandle)>,
    pub deactivate: Option<unsafe extern "C" fn(NativePluginHandle)>,
    pub process: Option<
        unsafe extern "C" fn(
            NativePluginHandle,
            *mut *mut f32,
            *mut *mut f32,
            u32,
            *const NativeMidiEvent,
            u32,
        ),
    >,

    pub get_state: Option<unsafe extern "C" fn(NativePluginHandle) -> *mut c_char>,
    pub set_state: Option<unsafe extern "C" fn(NativePluginHandle, *const c_char)>,

    pub dispatcher: Option<
        unsafe extern "C" fn(NativePluginHandle, NativeDispatcherOpcode, i32, isize, *mut c_void, f32) -> isize,
    >,
}
