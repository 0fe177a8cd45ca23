//! In-process fake host for driving the C callback table in tests.
//!
//! Available to this crate's tests and, with the `testing` feature, to
//! plugin crates as a dev-dependency.

use std::sync::Mutex;

use patchbay_core::MidiEvent;

use crate::abi::{NativeHostDescriptor, NativeHostHandle, NativeMidiEvent};

struct Recorder {
    events: Mutex<Vec<MidiEvent>>,
    limit: Option<usize>,
}

/// A host that records every event written through `write_midi_event`.
pub struct FakeHost {
    // Boxed so the addresses handed to the plugin stay put.
    recorder: Box<Recorder>,
    descriptor: Box<NativeHostDescriptor>,
}

unsafe extern "C" fn record_midi_event(handle: NativeHostHandle, event: *const NativeMidiEvent) -> bool {
    let (Some(recorder), Some(event)) = ((handle as *const Recorder).as_ref(), event.as_ref()) else {
        return false;
    };
    let Ok(mut events) = recorder.events.lock() else {
        return false;
    };
    if recorder.limit.is_some_and(|limit| events.len() >= limit) {
        return false;
    }
    events.push(MidiEvent::from(*event));
    true
}

impl FakeHost {
    /// A host that accepts every event.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A host that refuses events once `limit` have been written.
    pub fn with_limit(limit: usize) -> Self {
        Self::build(Some(limit))
    }

    /// A host descriptor with no `write_midi_event` callback.
    pub fn without_midi_output() -> Self {
        let mut host = Self::new();
        host.descriptor.write_midi_event = None;
        host
    }

    fn build(limit: Option<usize>) -> Self {
        let recorder = Box::new(Recorder {
            events: Mutex::new(Vec::new()),
            limit,
        });
        let descriptor = Box::new(NativeHostDescriptor {
            handle: &*recorder as *const Recorder as NativeHostHandle,
            resource_dir: std::ptr::null(),
            ui_name: std::ptr::null(),
            ui_parent_id: 0,
            get_buffer_size: None,
            get_sample_rate: None,
            is_offline: None,
            get_time_info: None,
            write_midi_event: Some(record_midi_event),
            ui_parameter_changed: None,
            ui_midi_program_changed: None,
            ui_custom_data_changed: None,
            ui_closed: None,
            ui_open_file: None,
            ui_save_file: None,
            dispatcher: None,
        });
        Self { recorder, descriptor }
    }

    /// Pointer to pass to `instantiate`. Valid while `self` is alive.
    pub fn descriptor(&self) -> *const NativeHostDescriptor {
        &*self.descriptor
    }

    /// Events received so far, in arrival order.
    pub fn events(&self) -> Vec<MidiEvent> {
        self.recorder
            .events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Forget all received events.
    pub fn clear(&self) {
        if let Ok(mut events) = self.recorder.events.lock() {
            events.clear();
        }
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}
