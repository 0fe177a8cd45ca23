//! Host-side MIDI output.

use patchbay_core::{MidiEvent, MidiSink};

use crate::abi::{NativeHostDescriptor, NativeHostHandle, NativeMidiEvent};

type WriteMidiEvent = unsafe extern "C" fn(NativeHostHandle, *const NativeMidiEvent) -> bool;

/// [`MidiSink`] that forwards every event to the host's `write_midi_event`.
///
/// Built on the stack for each `process` call. A host without a
/// `write_midi_event` callback gets nothing; writes report `false`.
pub struct HostMidiSink {
    handle: NativeHostHandle,
    write_midi_event: Option<WriteMidiEvent>,
}

impl HostMidiSink {
    /// Create a sink for the given host.
    ///
    /// # Safety
    ///
    /// `host` must be null or point to a host descriptor that outlives the
    /// sink. The host's callback must accept its own handle.
    pub unsafe fn new(host: *const NativeHostDescriptor) -> Self {
        match host.as_ref() {
            Some(host) => Self {
                handle: host.handle,
                write_midi_event: host.write_midi_event,
            },
            None => Self::disconnected(),
        }
    }

    /// A sink that drops everything.
    pub fn disconnected() -> Self {
        Self {
            handle: std::ptr::null_mut(),
            write_midi_event: None,
        }
    }
}

impl MidiSink for HostMidiSink {
    #[inline]
    fn write(&mut self, event: &MidiEvent) -> bool {
        let Some(write) = self.write_midi_event else {
            return false;
        };
        let native = NativeMidiEvent::from(*event);
        // SAFETY: `native` lives until the call returns; the handle and the
        // callback come from the same host descriptor (see `new`).
        unsafe { write(self.handle, &native) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_forwards_to_host() {
        let host = FakeHost::new();
        let mut sink = unsafe { HostMidiSink::new(host.descriptor()) };

        assert!(sink.write(&MidiEvent::note_on(3, 0, 60, 100).with_port(4)));
        assert!(sink.write(&MidiEvent::note_off(9, 0, 60, 0)));

        let received = host.events();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].port, 4);
        assert_eq!(received[0].time, 3);
        assert_eq!(received[1].data[0], 0x80);
    }

    #[test]
    fn test_missing_callback_drops_events() {
        let mut sink = HostMidiSink::disconnected();
        assert!(!sink.write(&MidiEvent::note_on(0, 0, 60, 100)));

        let mut sink = unsafe { HostMidiSink::new(std::ptr::null()) };
        assert!(!sink.write(&MidiEvent::note_on(0, 0, 60, 100)));

        let host = FakeHost::without_midi_output();
        let mut sink = unsafe { HostMidiSink::new(host.descriptor()) };
        assert!(!sink.write(&MidiEvent::note_on(0, 0, 60, 100)));
        assert!(host.events().is_empty());
    }

    #[test]
    fn test_refused_and_cleared_events() {
        let host = FakeHost::with_limit(1);
        let mut sink = unsafe { HostMidiSink::new(host.descriptor()) };

        assert!(sink.write(&MidiEvent::note_on(0, 0, 60, 100)));
        assert!(!sink.write(&MidiEvent::note_off(1, 0, 60, 0)));
        assert_eq!(host.events().len(), 1);

        host.clear();
        assert!(host.events().is_empty());
        assert!(sink.write(&MidiEvent::note_off(2, 0, 60, 0)));
        assert_eq!(host.events(), vec![MidiEvent::note_off(2, 0, 60, 0)]);
    }
}
