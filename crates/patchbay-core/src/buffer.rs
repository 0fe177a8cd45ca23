//! Audio buffer view handed to [`Plugin::process`](crate::Plugin::process).
//!
//! Native hosts always pass audio pointer arrays to `process`, even when a
//! plugin declares zero audio ports. The wrapper turns those pointers into a
//! [`Buffer`] sized from the plugin's declared port counts, so plugins only
//! ever see the channels they asked for.
//!
//! # Real-Time Safety
//!
//! The channel tables are fixed-size arrays on the stack. Building or using
//! a [`Buffer`] never allocates.

use crate::types::MAX_CHANNELS;

/// Audio input/output channel slices for one processing block.
///
/// The `'a` lifetime ties the buffer to the host's audio data. Buffers are
/// only valid within a single `process()` call.
pub struct Buffer<'a> {
    /// Option<&[f32]> is Copy, so [None; N] works
    inputs: [Option<&'a [f32]>; MAX_CHANNELS],
    outputs: [Option<&'a mut [f32]>; MAX_CHANNELS],
    num_input_channels: usize,
    num_output_channels: usize,
    num_samples: usize,
}

impl<'a> Buffer<'a> {
    /// Create a new buffer from channel slices.
    ///
    /// This is called by the native wrapper, not by plugin code.
    /// Channels beyond [`MAX_CHANNELS`] are silently ignored.
    #[inline]
    pub fn new(
        inputs: impl IntoIterator<Item = &'a [f32]>,
        outputs: impl IntoIterator<Item = &'a mut [f32]>,
        num_samples: usize,
    ) -> Self {
        let mut input_arr: [Option<&'a [f32]>; MAX_CHANNELS] = [None; MAX_CHANNELS];
        let mut num_input_channels = 0;
        for (i, slice) in inputs.into_iter().take(MAX_CHANNELS).enumerate() {
            input_arr[i] = Some(slice);
            num_input_channels = i + 1;
        }

        // Can't use [None; N] for &mut because it's not Copy
        let mut output_arr: [Option<&'a mut [f32]>; MAX_CHANNELS] = std::array::from_fn(|_| None);
        let mut num_output_channels = 0;
        for (i, slice) in outputs.into_iter().take(MAX_CHANNELS).enumerate() {
            output_arr[i] = Some(slice);
            num_output_channels = i + 1;
        }

        Self {
            inputs: input_arr,
            outputs: output_arr,
            num_input_channels,
            num_output_channels,
            num_samples,
        }
    }

    /// Create a buffer with no audio channels.
    ///
    /// Used for MIDI-only plugins and for blocks where the host passed null
    /// audio pointers.
    #[inline]
    pub fn empty(num_samples: usize) -> Self {
        Self::new(std::iter::empty(), std::iter::empty(), num_samples)
    }

    /// Number of samples in this processing block.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Number of input channels.
    #[inline]
    pub fn num_input_channels(&self) -> usize {
        self.num_input_channels
    }

    /// Number of output channels.
    #[inline]
    pub fn num_output_channels(&self) -> usize {
        self.num_output_channels
    }

    /// Returns true if the buffer carries no audio channels at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_input_channels == 0 && self.num_output_channels == 0
    }

    /// Get an input channel by index.
    ///
    /// Returns an empty slice if the channel doesn't exist.
    #[inline]
    pub fn input(&self, channel: usize) -> &[f32] {
        let n = self.num_samples;
        self.inputs
            .get(channel)
            .and_then(|opt| opt.as_ref())
            .map(|ch| &ch[..n.min(ch.len())])
            .unwrap_or(&[])
    }

    /// Try to get a mutable output channel by index.
    ///
    /// Returns `None` if the channel doesn't exist.
    #[inline]
    pub fn output_checked(&mut self, channel: usize) -> Option<&mut [f32]> {
        let n = self.num_samples;
        self.outputs
            .get_mut(channel)
            .and_then(|opt| opt.as_mut())
            .map(|ch| {
                let len = n.min(ch.len());
                &mut ch[..len]
            })
    }

    /// Clear all output channels to silence.
    pub fn clear_outputs(&mut self) {
        let n = self.num_samples;
        for output in self.outputs[..self.num_output_channels].iter_mut().flatten() {
            let len = n.min(output.len());
            output[..len].fill(0.0);
        }
    }
}
