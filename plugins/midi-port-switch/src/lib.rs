//! MIDI Channel Switch - fans MIDI out to a selectable set of output ports.
//!
//! The plugin has one MIDI input and sixteen MIDI outputs, one on/off
//! parameter per output. Every channel message (note, controller, program,
//! pressure, pitch bend) is copied to each enabled output port, in
//! ascending port order. Everything else (system messages, and events whose
//! first byte is not a status byte) is passed through once, untouched,
//! whatever the switches say.
//!
//! # Example
//!
//! ```
//! use midi_port_switch::MidiPortSwitchPlugin;
//! use patchbay::prelude::*;
//!
//! let mut plugin = MidiPortSwitchPlugin::default();
//! plugin.params().set_value(0, 0.0);
//!
//! let mut out = MidiBuffer::new();
//! plugin.process(&mut Buffer::empty(64), &[MidiEvent::note_on(0, 0, 60, 100)], &mut out);
//! assert_eq!(out.len(), 15);
//! assert_eq!(out.as_slice()[0].port, 1);
//! ```

use patchbay::prelude::*;

// =============================================================================
// Plugin Configuration
// =============================================================================

/// Number of switchable output ports.
pub const NUM_OUTPUTS: usize = MAX_MIDI_CHANNELS;

/// Plugin configuration exported through the native descriptor.
pub static CONFIG: PluginConfig = PluginConfig::new("MIDI Channel Switch", "midiportswitch")
    .with_maker("jalxes")
    .with_copyright("GNU GPL v2+")
    .with_category(PluginCategory::Utility)
    .with_hints(PluginHints::RTSAFE)
    .with_midi_support(MidiSupport::EVERYTHING)
    .with_audio_ports(0, 0)
    .with_midi_ports(1, NUM_OUTPUTS as u32);

/// Parameter names: the 1-based output port number.
const OUTPUT_NAMES: [&str; NUM_OUTPUTS] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
];

// =============================================================================
// Parameters
// =============================================================================

/// One switch per output port. Parameter index = output port number.
pub struct PortSwitchParams {
    outputs: [BoolParam; NUM_OUTPUTS],
}

impl PortSwitchParams {
    /// Whether `port` currently receives channel messages.
    ///
    /// Ports outside `0..16` are never enabled.
    #[inline]
    pub fn is_enabled(&self, port: usize) -> bool {
        self.outputs.get(port).is_some_and(BoolParam::get)
    }

    /// Switch every output on or off at once.
    pub fn set_all(&self, enabled: bool) {
        for output in &self.outputs {
            output.set(enabled);
        }
    }
}

impl Default for PortSwitchParams {
    fn default() -> Self {
        Self {
            outputs: std::array::from_fn(|port| BoolParam::new(OUTPUT_NAMES[port], true)),
        }
    }
}

impl Parameters for PortSwitchParams {
    fn count(&self) -> usize {
        NUM_OUTPUTS
    }

    fn info(&self, index: usize) -> Option<&ParamInfo> {
        self.outputs.get(index).map(BoolParam::info)
    }

    fn get_value(&self, index: usize) -> ParamValue {
        self.outputs.get(index).map_or(0.0, BoolParam::value)
    }

    fn set_value(&self, index: usize, value: ParamValue) {
        if let Some(output) = self.outputs.get(index) {
            output.set_value(value);
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

/// The MIDI Channel Switch plugin.
#[derive(Default, HasParams)]
pub struct MidiPortSwitchPlugin {
    #[params]
    params: PortSwitchParams,
}

impl Plugin for MidiPortSwitchPlugin {
    fn process(&mut self, _buffer: &mut Buffer, midi_in: &[MidiEvent], midi_out: &mut dyn MidiSink) {
        for event in midi_in {
            if !event.is_channel_message() {
                midi_out.write(event);
                continue;
            }

            for port in ports() {
                if self.params.is_enabled(port.into()) {
                    midi_out.write(&event.with_port(port));
                }
            }
        }
    }
}

export_native!(CONFIG, MidiPortSwitchPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay::native::abi::{category, parameter_hints, plugin_hints, supports};
    use patchbay_native::testing::FakeHost;
    use patchbay_native::NativeMidiEvent;
    use std::ffi::CStr;
    use std::ptr;

    fn run(plugin: &mut MidiPortSwitchPlugin, events: &[MidiEvent]) -> Vec<MidiEvent> {
        let mut out = MidiBuffer::new();
        plugin.process(&mut Buffer::empty(256), events, &mut out);
        assert!(!out.has_overflowed());
        out.as_slice().to_vec()
    }

    fn port_list(events: &[MidiEvent]) -> Vec<u8> {
        events.iter().map(|e| e.port).collect()
    }

    #[test]
    fn test_defaults() {
        let plugin = MidiPortSwitchPlugin::default();
        let params = plugin.params();

        assert_eq!(params.count(), 16);
        for index in 0..16 {
            assert_eq!(params.get_value(index), 1.0);

            let info = params.info(index).unwrap();
            assert_eq!(info.name, (index + 1).to_string());
            assert_eq!(info.unit, "");
            assert_eq!(info.ranges.default, 1.0);
            assert_eq!(info.ranges.min, 0.0);
            assert_eq!(info.ranges.max, 1.0);
            assert_eq!(info.ranges.step, 1.0);
            assert!(info.flags.is_boolean);
            assert!(info.flags.can_automate);
            assert_eq!(info.scale_points.len(), 2);
            assert_eq!(info.scale_points[0].label, "Off");
            assert_eq!(info.scale_points[1].value, 1.0);
        }
    }

    #[test]
    fn test_index_sixteen_is_out_of_range() {
        let plugin = MidiPortSwitchPlugin::default();
        let params = plugin.params();

        assert!(params.info(16).is_none());
        assert_eq!(params.get_value(16), 0.0);
        params.set_value(16, 0.0);
        params.set_value(u32::MAX as usize, 0.0);
        assert!((0..16).all(|i| params.get_value(i) == 1.0));
    }

    #[test]
    fn test_set_value_threshold() {
        let plugin = MidiPortSwitchPlugin::default();
        let params = plugin.params();

        params.set_value(3, 0.0);
        assert_eq!(params.get_value(3), 0.0);
        params.set_value(3, 0.5);
        assert_eq!(params.get_value(3), 1.0);
        params.set_value(3, 0.49);
        assert_eq!(params.get_value(3), 0.0);
        params.set_value(3, 1.0);
        assert_eq!(params.get_value(3), 1.0);
        params.set_value(3, f32::NAN);
        assert_eq!(params.get_value(3), 0.0);

        // Other ports untouched
        assert!((0..16).filter(|&i| i != 3).all(|i| params.get_value(i) == 1.0));
    }

    #[test]
    fn test_every_index_round_trips() {
        let plugin = MidiPortSwitchPlugin::default();
        let params = plugin.params();

        for index in 0..NUM_OUTPUTS {
            params.set_value(index, 0.0);
            assert_eq!(params.get_value(index), 0.0, "port {}", index);
            assert!(!params.is_enabled(index));
            params.set_value(index, 1.0);
            assert_eq!(params.get_value(index), 1.0, "port {}", index);
            assert!(params.is_enabled(index));
        }
    }

    #[test]
    fn test_every_mask_and_first_byte() {
        let mut plugin = MidiPortSwitchPlugin::default();
        let masks = [
            0x0000u16, 0xFFFF, 0x0001, 0x8000, 0x5555, 0xAAAA, 0x00FF, 0xFF00, 0x1248, 0xFFFE,
        ];

        for mask in masks {
            for index in 0..NUM_OUTPUTS {
                let value = if mask & (1 << index) != 0 { 1.0 } else { 0.0 };
                plugin.params().set_value(index, value);
            }
            let enabled: Vec<u8> = (0..16u8).filter(|&p| mask & (1 << p) != 0).collect();

            for first in 0..=255u8 {
                let event = MidiEvent::from_bytes(7, &[first, 0x40, 0x7F]).unwrap().with_port(5);
                let out = run(&mut plugin, &[event]);

                let expected: Vec<MidiEvent> = if (0x80..0xF0).contains(&first) {
                    enabled.iter().map(|&p| event.with_port(p)).collect()
                } else {
                    vec![event]
                };
                assert_eq!(out, expected, "mask {:#06x}, first byte {:#04x}", mask, first);
            }
        }
    }

    #[test]
    fn test_note_on_fans_out_to_all_ports() {
        let mut plugin = MidiPortSwitchPlugin::default();
        let note_on = MidiEvent::note_on(12, 0, 60, 100);

        let out = run(&mut plugin, &[note_on]);

        assert_eq!(out.len(), 16);
        assert_eq!(port_list(&out), (0..16).collect::<Vec<u8>>());
        for event in &out {
            assert_eq!(event.time, 12);
            assert_eq!(event.size, 3);
            assert_eq!(event.data, [0x90, 60, 100, 0]);
        }
    }

    #[test]
    fn test_disabled_ports_are_skipped() {
        let mut plugin = MidiPortSwitchPlugin::default();
        for index in [0, 2, 4] {
            plugin.params().set_value(index, 0.0);
        }

        let out = run(&mut plugin, &[MidiEvent::control_change(5, 9, 7, 64)]);

        assert_eq!(out.len(), 13);
        assert_eq!(
            port_list(&out),
            vec![1, 3, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );
        assert!(out.iter().all(|e| e.data[0] == 0xB9 && e.time == 5));
    }

    #[test]
    fn test_system_message_passes_once_unchanged() {
        let mut plugin = MidiPortSwitchPlugin::default();
        let sysex = MidiEvent::from_bytes(3, &[0xF0, 0x7E, 0x7F, 0xF7]).unwrap().with_port(7);

        let out = run(&mut plugin, &[sysex]);

        assert_eq!(out, vec![sysex]);
    }

    #[test]
    fn test_data_byte_passes_once() {
        let mut plugin = MidiPortSwitchPlugin::default();
        let running = MidiEvent::from_bytes(0, &[0x40, 0x7F]).unwrap();

        assert_eq!(run(&mut plugin, &[running]), vec![running]);
    }

    #[test]
    fn test_all_disabled_drops_channel_messages_only() {
        let mut plugin = MidiPortSwitchPlugin::default();
        plugin.params().set_all(false);

        let clock = MidiEvent::from_bytes(8, &[0xF8]).unwrap();
        let events = [
            MidiEvent::note_on(0, 0, 60, 100),
            clock,
            MidiEvent::pitch_bend(16, 15, 8192),
        ];

        assert_eq!(run(&mut plugin, &events), vec![clock]);
    }

    #[test]
    fn test_arrival_order_is_preserved() {
        let mut plugin = MidiPortSwitchPlugin::default();
        plugin.params().set_all(false);
        plugin.params().set_value(4, 1.0);
        plugin.params().set_value(9, 1.0);

        let start = MidiEvent::from_bytes(0, &[0xFA]).unwrap();
        let note_on = MidiEvent::note_on(1, 2, 64, 90);
        let note_off = MidiEvent::note_off(2, 2, 64, 0);

        let out = run(&mut plugin, &[start, note_on, note_off]);

        assert_eq!(
            out,
            vec![
                start,
                note_on.with_port(4),
                note_on.with_port(9),
                note_off.with_port(4),
                note_off.with_port(9),
            ]
        );
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let mut plugin = MidiPortSwitchPlugin::default();
        assert!(run(&mut plugin, &[]).is_empty());
    }

    #[test]
    fn test_exported_descriptor() {
        let descriptor = patchbay_plugin_descriptor();
        assert!(!descriptor.is_null());
        let raw = unsafe { &*descriptor };

        assert_eq!(raw.category, category::UTILITY);
        assert_eq!(raw.hints, plugin_hints::IS_RTSAFE);
        assert_eq!(raw.supports, supports::EVERYTHING);
        assert_eq!((raw.audio_ins, raw.audio_outs), (0, 0));
        assert_eq!((raw.midi_ins, raw.midi_outs), (1, 16));
        assert_eq!((raw.param_ins, raw.param_outs), (0, 0));

        let text = |ptr| unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        assert_eq!(text(raw.name), "MIDI Channel Switch");
        assert_eq!(text(raw.label), "midiportswitch");
        assert_eq!(text(raw.maker), "jalxes");
        assert_eq!(text(raw.copyright), "GNU GPL v2+");

        assert!(raw.get_state.is_none());
        assert!(raw.set_state.is_none());
        assert!(raw.activate.is_none());

        // Same descriptor on every call
        assert_eq!(patchbay_plugin_descriptor(), descriptor);
    }

    #[test]
    fn test_native_callbacks_end_to_end() {
        let raw = unsafe { &*patchbay_plugin_descriptor() };
        let host = FakeHost::new();
        let events: Vec<NativeMidiEvent> = [
            MidiEvent::note_on(0, 0, 60, 100),
            MidiEvent::from_bytes(4, &[0xF8]).unwrap(),
        ]
        .into_iter()
        .map(NativeMidiEvent::from)
        .collect();

        unsafe {
            let handle = (raw.instantiate.unwrap())(host.descriptor());
            assert!(!handle.is_null());

            assert_eq!((raw.get_parameter_count.unwrap())(handle), 16);

            let info = &*(raw.get_parameter_info.unwrap())(handle, 15);
            assert_eq!(CStr::from_ptr(info.name).to_str().unwrap(), "16");
            assert!(info.unit.is_null());
            assert_eq!(
                info.hints,
                parameter_hints::IS_ENABLED
                    | parameter_hints::IS_AUTOMABLE
                    | parameter_hints::IS_BOOLEAN
                    | parameter_hints::USES_SCALEPOINTS
            );
            assert_eq!(info.scale_point_count, 2);
            assert!((raw.get_parameter_info.unwrap())(handle, 16).is_null());

            for index in 1..16 {
                (raw.set_parameter_value.unwrap())(handle, index, 0.0);
            }
            (raw.set_parameter_value.unwrap())(handle, 16, 0.0);
            assert_eq!((raw.get_parameter_value.unwrap())(handle, 0), 1.0);
            assert_eq!((raw.get_parameter_value.unwrap())(handle, 1), 0.0);
            assert_eq!((raw.get_parameter_value.unwrap())(handle, 16), 0.0);

            (raw.process.unwrap())(
                handle,
                ptr::null_mut(),
                ptr::null_mut(),
                64,
                events.as_ptr(),
                events.len() as u32,
            );
            (raw.process.unwrap())(handle, ptr::null_mut(), ptr::null_mut(), 64, ptr::null(), 0);

            (raw.cleanup.unwrap())(handle);
        }

        assert_eq!(
            host.events(),
            vec![
                MidiEvent::note_on(0, 0, 60, 100).with_port(0),
                MidiEvent::from_bytes(4, &[0xF8]).unwrap(),
            ]
        );
    }

    #[test]
    fn test_host_refusal_does_not_stop_routing() {
        let raw = unsafe { &*patchbay_plugin_descriptor() };
        let host = FakeHost::with_limit(3);
        let events = [NativeMidiEvent::from(MidiEvent::note_on(0, 0, 60, 100))];

        unsafe {
            let handle = (raw.instantiate.unwrap())(host.descriptor());
            (raw.process.unwrap())(handle, ptr::null_mut(), ptr::null_mut(), 64, events.as_ptr(), 1);
            (raw.cleanup.unwrap())(handle);
        }

        assert_eq!(port_list(&host.events()), vec![0, 1, 2]);
    }
}
