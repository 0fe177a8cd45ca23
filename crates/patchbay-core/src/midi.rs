//! Raw MIDI event types for native plugins.
//!
//! Native hosts exchange MIDI as short raw messages: a frame offset, a
//! destination port and up to four data bytes. [`MidiEvent`] mirrors that
//! shape as a `Copy` value, so events can be duplicated and re-addressed on
//! the audio thread without heap allocation.
//!
//! ## Status Classification
//!
//! Status extraction follows the host convention:
//!
//! - A first byte in `0x80..0xF0` is a channel-voice status; its low nibble
//!   (the channel) is masked off.
//! - Any other first byte (system messages `0xF0..=0xFF`, or a bare data
//!   byte below `0x80`) is returned unchanged and is *not* a channel message.
//!
//! ```
//! use patchbay_core::midi::{is_channel_message, status, status_from_data};
//!
//! assert_eq!(status_from_data(0x93), status::NOTE_ON);
//! assert!(is_channel_message(status_from_data(0x93)));
//! assert!(!is_channel_message(status_from_data(status::SYSTEM_EXCLUSIVE)));
//! ```

use crate::types::MAX_MIDI_CHANNELS;

// =============================================================================
// Basic MIDI Types
// =============================================================================

/// Maximum number of data bytes carried by a single event.
pub const MAX_MIDI_EVENT_SIZE: usize = 4;

/// MIDI channel (0-15).
pub type MidiChannel = u8;

/// MIDI note number (0-127, where 60 = middle C).
pub type MidiNote = u8;

/// MIDI 1.0 status bytes.
///
/// Channel-voice statuses are given with the channel nibble cleared.
pub mod status {
    /// Note Off (channel voice).
    pub const NOTE_OFF: u8 = 0x80;
    /// Note On (channel voice).
    pub const NOTE_ON: u8 = 0x90;
    /// Polyphonic key pressure (channel voice).
    pub const POLY_PRESSURE: u8 = 0xA0;
    /// Control Change (channel voice).
    pub const CONTROL_CHANGE: u8 = 0xB0;
    /// Program Change (channel voice).
    pub const PROGRAM_CHANGE: u8 = 0xC0;
    /// Channel pressure (channel voice).
    pub const CHANNEL_PRESSURE: u8 = 0xD0;
    /// Pitch bend (channel voice).
    pub const PITCH_BEND: u8 = 0xE0;

    /// Start of a System Exclusive message.
    pub const SYSTEM_EXCLUSIVE: u8 = 0xF0;
    /// MIDI Time Code quarter frame.
    pub const TIME_CODE: u8 = 0xF1;
    /// Song Position Pointer.
    pub const SONG_POSITION: u8 = 0xF2;
    /// Song Select.
    pub const SONG_SELECT: u8 = 0xF3;
    /// Tune Request.
    pub const TUNE_REQUEST: u8 = 0xF6;
    /// End of a System Exclusive message.
    pub const END_OF_EXCLUSIVE: u8 = 0xF7;
    /// Timing Clock (real-time).
    pub const TIMING_CLOCK: u8 = 0xF8;
    /// Start (real-time).
    pub const START: u8 = 0xFA;
    /// Continue (real-time).
    pub const CONTINUE: u8 = 0xFB;
    /// Stop (real-time).
    pub const STOP: u8 = 0xFC;
    /// Active Sensing (real-time).
    pub const ACTIVE_SENSING: u8 = 0xFE;
    /// System Reset (real-time).
    pub const RESET: u8 = 0xFF;

    /// Mask selecting the status nibble of a channel-voice byte.
    pub const STATUS_MASK: u8 = 0xF0;
    /// Mask selecting the channel nibble of a channel-voice byte.
    pub const CHANNEL_MASK: u8 = 0x0F;
}

/// Returns true if `status` is a channel-voice status (`0x80..0xF0`).
#[inline]
pub const fn is_channel_message(status: u8) -> bool {
    status >= status::NOTE_OFF && status < status::SYSTEM_EXCLUSIVE
}

/// Extract the status from the first data byte of an event.
///
/// Channel-voice bytes lose their channel nibble; everything else is
/// returned as-is.
#[inline]
pub const fn status_from_data(first_byte: u8) -> u8 {
    if is_channel_message(first_byte) {
        first_byte & status::STATUS_MASK
    } else {
        first_byte
    }
}

/// Classification of a MIDI message by its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessageKind {
    NoteOff,
    NoteOn,
    PolyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
    /// System common, system real-time or System Exclusive.
    System,
    /// First byte is not a status byte (running-status data, empty event).
    Data,
}

impl MidiMessageKind {
    /// Classify an extracted status (see [`status_from_data`]).
    pub const fn from_status(status: u8) -> Self {
        match status {
            status::NOTE_OFF => Self::NoteOff,
            status::NOTE_ON => Self::NoteOn,
            status::POLY_PRESSURE => Self::PolyPressure,
            status::CONTROL_CHANGE => Self::ControlChange,
            status::PROGRAM_CHANGE => Self::ProgramChange,
            status::CHANNEL_PRESSURE => Self::ChannelPressure,
            status::PITCH_BEND => Self::PitchBend,
            0xF0..=0xFF => Self::System,
            _ => Self::Data,
        }
    }

    /// Returns true for the seven channel-voice kinds.
    pub const fn is_channel_voice(self) -> bool {
        !matches!(self, Self::System | Self::Data)
    }
}

// =============================================================================
// MIDI Event
// =============================================================================

/// A raw MIDI event as exchanged with a native host.
///
/// `time` is the frame offset inside the current block, `port` the MIDI
/// port the event arrived on (input) or should leave through (output).
/// Only the first `size` bytes of `data` are meaningful.
///
/// The layout is `#[repr(C)]` and matches the native ABI's event struct, so
/// the wrapper can view a host event array as `&[MidiEvent]` without copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct MidiEvent {
    /// Frame offset within the current processing block.
    pub time: u32,
    /// MIDI port index.
    pub port: u8,
    /// Number of valid bytes in `data`.
    pub size: u8,
    /// Raw message bytes.
    pub data: [u8; MAX_MIDI_EVENT_SIZE],
}

impl MidiEvent {
    /// Create an event from its raw parts. The port defaults to 0.
    pub const fn new(time: u32, data: [u8; MAX_MIDI_EVENT_SIZE], size: u8) -> Self {
        Self {
            time,
            port: 0,
            size,
            data,
        }
    }

    /// Create an event from a byte slice.
    ///
    /// Returns `None` if the message is longer than [`MAX_MIDI_EVENT_SIZE`].
    pub fn from_bytes(time: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() > MAX_MIDI_EVENT_SIZE {
            return None;
        }
        let mut data = [0u8; MAX_MIDI_EVENT_SIZE];
        data[..bytes.len()].copy_from_slice(bytes);
        Some(Self::new(time, data, bytes.len() as u8))
    }

    /// Build a three-byte channel-voice message.
    const fn channel_voice(time: u32, status: u8, channel: MidiChannel, d1: u8, d2: u8) -> Self {
        Self::new(
            time,
            [status | (channel & status::CHANNEL_MASK), d1 & 0x7F, d2 & 0x7F, 0],
            3,
        )
    }

    /// Create a Note On event. Velocity is the raw 7-bit value.
    pub const fn note_on(time: u32, channel: MidiChannel, note: MidiNote, velocity: u8) -> Self {
        Self::channel_voice(time, status::NOTE_ON, channel, note, velocity)
    }

    /// Create a Note Off event.
    pub const fn note_off(time: u32, channel: MidiChannel, note: MidiNote, velocity: u8) -> Self {
        Self::channel_voice(time, status::NOTE_OFF, channel, note, velocity)
    }

    /// Create a polyphonic key pressure event.
    pub const fn poly_pressure(time: u32, channel: MidiChannel, note: MidiNote, pressure: u8) -> Self {
        Self::channel_voice(time, status::POLY_PRESSURE, channel, note, pressure)
    }

    /// Create a Control Change event.
    pub const fn control_change(time: u32, channel: MidiChannel, controller: u8, value: u8) -> Self {
        Self::channel_voice(time, status::CONTROL_CHANGE, channel, controller, value)
    }

    /// Create a Program Change event (two bytes).
    pub const fn program_change(time: u32, channel: MidiChannel, program: u8) -> Self {
        Self::new(
            time,
            [status::PROGRAM_CHANGE | (channel & status::CHANNEL_MASK), program & 0x7F, 0, 0],
            2,
        )
    }

    /// Create a channel pressure event (two bytes).
    pub const fn channel_pressure(time: u32, channel: MidiChannel, pressure: u8) -> Self {
        Self::new(
            time,
            [status::CHANNEL_PRESSURE | (channel & status::CHANNEL_MASK), pressure & 0x7F, 0, 0],
            2,
        )
    }

    /// Create a pitch bend event from a 14-bit value (8192 = center).
    pub const fn pitch_bend(time: u32, channel: MidiChannel, value: u16) -> Self {
        let lsb = (value & 0x7F) as u8;
        let msb = ((value >> 7) & 0x7F) as u8;
        Self::channel_voice(time, status::PITCH_BEND, channel, lsb, msb)
    }

    /// The extracted status of this event (see [`status_from_data`]).
    #[inline]
    pub const fn status(&self) -> u8 {
        status_from_data(self.data[0])
    }

    /// Returns true if this is a channel-voice message.
    #[inline]
    pub const fn is_channel_message(&self) -> bool {
        is_channel_message(self.status())
    }

    /// The MIDI channel of a channel-voice message, `None` otherwise.
    #[inline]
    pub const fn channel(&self) -> Option<MidiChannel> {
        if self.is_channel_message() {
            Some(self.data[0] & status::CHANNEL_MASK)
        } else {
            None
        }
    }

    /// Classify this event.
    #[inline]
    pub const fn kind(&self) -> MidiMessageKind {
        MidiMessageKind::from_status(self.status())
    }

    /// The valid message bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        let len = (self.size as usize).min(MAX_MIDI_EVENT_SIZE);
        &self.data[..len]
    }

    // =========================================================================
    // Event transformation
    // =========================================================================

    /// Copy of this event addressed to another port.
    ///
    /// Time, size and data are preserved.
    ///
    /// # Example
    /// ```
    /// use patchbay_core::MidiEvent;
    ///
    /// let event = MidiEvent::note_on(12, 0, 60, 100);
    /// let routed = event.with_port(5);
    /// assert_eq!(routed.port, 5);
    /// assert_eq!(routed.data, event.data);
    /// assert_eq!(routed.time, 12);
    /// ```
    #[inline]
    pub const fn with_port(self, port: u8) -> Self {
        Self { port, ..self }
    }
}

// =============================================================================
// Event output
// =============================================================================

/// Destination for MIDI events emitted during processing.
///
/// Native hosts hand plugins a `write_midi_event` callback instead of an
/// output list; this trait is the Rust-side shape of that callback. Writes
/// happen on the audio thread, so implementations must not block or
/// allocate.
pub trait MidiSink {
    /// Emit one event. Returns `false` if the event could not be delivered.
    fn write(&mut self, event: &MidiEvent) -> bool;
}

/// Maximum number of MIDI events per buffer.
/// This is a reasonable limit for real-time processing.
pub const MAX_MIDI_EVENTS: usize = 1024;

/// A buffer for collecting MIDI events during processing.
///
/// Uses a fixed-size array to avoid heap allocation during processing.
/// Events are kept in the order they were written.
#[derive(Debug, Clone)]
pub struct MidiBuffer {
    events: [MidiEvent; MAX_MIDI_EVENTS],
    len: usize,
    /// Set to true when a push fails due to buffer exhaustion
    overflowed: bool,
}

impl MidiBuffer {
    /// Create a new empty MIDI buffer.
    pub fn new() -> Self {
        Self {
            events: [MidiEvent::default(); MAX_MIDI_EVENTS],
            len: 0,
            overflowed: false,
        }
    }

    /// Clear all events from the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Returns the number of events in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if any push failed since the last clear.
    #[inline]
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Push an event to the buffer.
    ///
    /// Returns `true` if the event was added, `false` if the buffer is full.
    /// Sets the overflow flag when the buffer is exhausted.
    #[inline]
    pub fn push(&mut self, event: MidiEvent) -> bool {
        if self.len < MAX_MIDI_EVENTS {
            self.events[self.len] = event;
            self.len += 1;
            true
        } else {
            self.overflowed = true;
            false
        }
    }

    /// Iterate over events in the buffer.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MidiEvent> {
        self.events[..self.len].iter()
    }

    /// Get the events as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[MidiEvent] {
        &self.events[..self.len]
    }
}

impl Default for MidiBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiSink for MidiBuffer {
    #[inline]
    fn write(&mut self, event: &MidiEvent) -> bool {
        self.push(*event)
    }
}

/// Iterator over the MIDI port indices `0..MAX_MIDI_CHANNELS`.
#[inline]
pub fn ports() -> impl Iterator<Item = u8> {
    0..MAX_MIDI_CHANNELS as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strips_channel() {
        for channel in 0..16u8 {
            assert_eq!(status_from_data(0x90 | channel), status::NOTE_ON);
            assert_eq!(status_from_data(0xE0 | channel), status::PITCH_BEND);
        }
    }

    #[test]
    fn test_system_status_is_unchanged() {
        for byte in 0xF0..=0xFFu8 {
            assert_eq!(status_from_data(byte), byte);
            assert!(!is_channel_message(status_from_data(byte)));
        }
    }

    #[test]
    fn test_data_byte_is_not_channel_message() {
        // Running-status data byte in first position
        let event = MidiEvent::new(0, [0x3C, 0x64, 0, 0], 2);
        assert_eq!(event.status(), 0x3C);
        assert!(!event.is_channel_message());
        assert_eq!(event.kind(), MidiMessageKind::Data);
        assert_eq!(event.channel(), None);
    }

    #[test]
    fn test_channel_voice_kinds() {
        assert_eq!(MidiEvent::note_on(0, 3, 60, 100).kind(), MidiMessageKind::NoteOn);
        assert_eq!(MidiEvent::note_off(0, 3, 60, 0).kind(), MidiMessageKind::NoteOff);
        assert_eq!(MidiEvent::poly_pressure(0, 3, 60, 5).kind(), MidiMessageKind::PolyPressure);
        assert_eq!(MidiEvent::control_change(0, 3, 7, 127).kind(), MidiMessageKind::ControlChange);
        assert_eq!(MidiEvent::program_change(0, 3, 12).kind(), MidiMessageKind::ProgramChange);
        assert_eq!(MidiEvent::channel_pressure(0, 3, 40).kind(), MidiMessageKind::ChannelPressure);
        assert_eq!(MidiEvent::pitch_bend(0, 3, 8192).kind(), MidiMessageKind::PitchBend);

        let event = MidiEvent::note_on(0, 3, 60, 100);
        assert_eq!(event.channel(), Some(3));
        assert!(event.kind().is_channel_voice());
    }

    #[test]
    fn test_note_on_layout() {
        let event = MidiEvent::note_on(42, 0, 60, 100);
        assert_eq!(event.time, 42);
        assert_eq!(event.port, 0);
        assert_eq!(event.bytes(), &[0x90, 60, 100]);
    }

    #[test]
    fn test_pitch_bend_center() {
        let event = MidiEvent::pitch_bend(0, 0, 8192);
        assert_eq!(event.bytes(), &[0xE0, 0x00, 0x40]);
    }

    #[test]
    fn test_from_bytes_rejects_long_messages() {
        assert!(MidiEvent::from_bytes(0, &[0xF0, 1, 2, 3, 0xF7]).is_none());

        let sysex = MidiEvent::from_bytes(7, &[0xF0, 0x7E, 0x7F, 0xF7]).unwrap();
        assert_eq!(sysex.size, 4);
        assert_eq!(sysex.kind(), MidiMessageKind::System);
    }

    #[test]
    fn test_with_port_preserves_payload() {
        let event = MidiEvent::control_change(9, 1, 64, 127);
        let routed = event.with_port(15);
        assert_eq!(routed.port, 15);
        assert_eq!(routed.time, event.time);
        assert_eq!(routed.size, event.size);
        assert_eq!(routed.data, event.data);
    }

    #[test]
    fn test_midi_buffer_overflow() {
        let mut buffer = MidiBuffer::new();
        let event = MidiEvent::note_on(0, 0, 60, 100);
        for _ in 0..MAX_MIDI_EVENTS {
            assert!(buffer.write(&event));
        }
        assert!(!buffer.has_overflowed());
        assert!(!buffer.write(&event));
        assert!(buffer.has_overflowed());
        assert_eq!(buffer.len(), MAX_MIDI_EVENTS);

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(!buffer.has_overflowed());
    }

    #[test]
    fn test_ports_cover_all_channels() {
        let all: Vec<u8> = ports().collect();
        assert_eq!(all.len(), MAX_MIDI_CHANNELS);
        assert_eq!(all.first(), Some(&0));
        assert_eq!(all.last(), Some(&15));
    }
}
