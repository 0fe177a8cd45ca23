//! Generic native plugin wrapper.
//!
//! [`NativeProcessor<P>`] provides the `extern "C"` callbacks the plugin
//! descriptor points at. Each callback recovers the boxed [`Instance`]
//! behind the opaque handle and forwards to the plugin's Rust traits.
//!
//! # Threading
//!
//! `process` runs on the host's audio thread and holds `&mut P` for the
//! whole block. Parameter callbacks may come from a control thread, but the
//! host must not run them for an instance while its `process` call is in
//! flight. Between blocks they only take shared references, and the flag
//! stores are atomic, so control and audio threads may alternate freely.

use std::cell::UnsafeCell;
use std::ffi::CString;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;

use log::{debug, error, warn};
use patchbay_core::{
    Buffer, MidiEvent, ParamInfo, Parameters, Plugin, PluginConfig, PluginError, PluginResult,
    MAX_CHANNELS,
};

use crate::abi::{
    parameter_hint_bits, NativeHostDescriptor, NativeMidiEvent, NativeParameter,
    NativeParameterRanges, NativeParameterScalePoint, NativePluginHandle,
};
use crate::host::HostMidiSink;
use crate::util::{ptr_or_null, to_cstring, to_optional_cstring};

/// A [`Plugin`] that knows its static metadata.
///
/// Implemented by [`export_native!`](crate::export_native); the wrapper
/// reads the declared audio port counts from here at instantiate time.
pub trait NativePlugin: Plugin {
    /// The plugin's static configuration.
    fn config() -> &'static PluginConfig;
}

// =============================================================================
// Parameter metadata cache
// =============================================================================

/// C view of one parameter, plus the strings it points into.
///
/// The pointers target heap data owned by the sibling fields, so moving a
/// `CachedParameter` keeps them valid.
struct CachedParameter {
    native: NativeParameter,
    _name: CString,
    _unit: Option<CString>,
    _labels: Vec<CString>,
    _scale_points: Vec<NativeParameterScalePoint>,
}

impl CachedParameter {
    fn new(info: &ParamInfo) -> PluginResult<Self> {
        let name = to_cstring("parameter name", info.name)?;
        let unit = to_optional_cstring("parameter unit", info.unit)?;
        let labels = info
            .scale_points
            .iter()
            .map(|point| to_cstring("scale point label", point.label))
            .collect::<PluginResult<Vec<_>>>()?;
        let scale_points: Vec<NativeParameterScalePoint> = info
            .scale_points
            .iter()
            .zip(&labels)
            .map(|(point, label)| NativeParameterScalePoint {
                label: label.as_ptr(),
                value: point.value,
            })
            .collect();

        let native = NativeParameter {
            hints: parameter_hint_bits(&info.flags),
            name: name.as_ptr(),
            unit: ptr_or_null(&unit),
            ranges: NativeParameterRanges {
                def: info.ranges.default,
                min: info.ranges.min,
                max: info.ranges.max,
                step: info.ranges.step,
                step_small: info.ranges.step_small,
                step_large: info.ranges.step_large,
            },
            scale_point_count: scale_points.len() as u32,
            scale_points: if scale_points.is_empty() {
                ptr::null()
            } else {
                scale_points.as_ptr()
            },
        };

        Ok(Self {
            native,
            _name: name,
            _unit: unit,
            _labels: labels,
            _scale_points: scale_points,
        })
    }
}

// =============================================================================
// Instance
// =============================================================================

/// Everything behind one `NativePluginHandle`.
struct Instance<P> {
    host: *const NativeHostDescriptor,
    /// The plugin. Mutably borrowed only inside `process`.
    plugin: UnsafeCell<P>,
    parameters: Box<[CachedParameter]>,
    audio_ins: usize,
    audio_outs: usize,
}

impl<P: NativePlugin> Instance<P> {
    fn new(host: *const NativeHostDescriptor) -> PluginResult<Self> {
        if host.is_null() {
            return Err(PluginError::HostError("null host descriptor".into()));
        }

        let plugin = P::default();
        let parameters = {
            let params = plugin.params();
            (0..params.count())
                .map(|index| {
                    params
                        .info(index)
                        .ok_or_else(|| {
                            PluginError::InitializationFailed(format!(
                                "parameter {} has no metadata",
                                index
                            ))
                        })
                        .and_then(CachedParameter::new)
                })
                .collect::<PluginResult<Box<[_]>>>()?
        };

        let config = P::config();
        Ok(Self {
            host,
            plugin: UnsafeCell::new(plugin),
            parameters,
            audio_ins: config.audio_ins as usize,
            audio_outs: config.audio_outs as usize,
        })
    }

    /// Shared access for the parameter callbacks.
    ///
    /// # Safety
    /// No `&mut P` from [`plugin_mut`](Self::plugin_mut) may be alive, so the
    /// host must not call this instance's `process` concurrently.
    #[inline]
    unsafe fn plugin(&self) -> &P {
        &*self.plugin.get()
    }

    /// Exclusive access for `process`.
    ///
    /// # Safety
    /// Hosts call `process` for an instance from one thread at a time and
    /// never overlap it with that instance's parameter callbacks.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    unsafe fn plugin_mut(&self) -> &mut P {
        &mut *self.plugin.get()
    }
}

/// Up to `count` non-null channel pointers from a host pointer table.
unsafe fn channel_ptrs<'a>(table: *mut *mut f32, count: usize) -> impl Iterator<Item = *mut f32> + 'a {
    let table: &'a [*mut f32] = if table.is_null() || count == 0 {
        &[]
    } else {
        slice::from_raw_parts(table, count.min(MAX_CHANNELS))
    };
    table.iter().copied().filter(|ptr| !ptr.is_null())
}

// =============================================================================
// NativeProcessor
// =============================================================================

/// The `extern "C"` callback table for plugin type `P`.
///
/// Never constructed; it only namespaces the generic callbacks that
/// [`Descriptor`](crate::Descriptor) stores as function pointers.
pub struct NativeProcessor<P> {
    _marker: PhantomData<P>,
}

impl<P: NativePlugin> NativeProcessor<P> {
    #[inline]
    unsafe fn instance<'a>(handle: NativePluginHandle) -> Option<&'a Instance<P>> {
        (handle as *const Instance<P>).as_ref()
    }

    /// Create an instance. Returns null on failure.
    ///
    /// # Safety
    /// `host` must be null or point to a host descriptor that outlives the
    /// returned handle.
    pub unsafe extern "C" fn instantiate(host: *const NativeHostDescriptor) -> NativePluginHandle {
        let name = P::config().name;
        match panic::catch_unwind(AssertUnwindSafe(|| Instance::<P>::new(host))) {
            Ok(Ok(instance)) => {
                debug!("Instantiated '{}' ({} parameters)", name, instance.parameters.len());
                Box::into_raw(Box::new(instance)) as NativePluginHandle
            }
            Ok(Err(err)) => {
                error!("Failed to instantiate '{}': {}", name, err);
                ptr::null_mut()
            }
            Err(_) => {
                error!("Failed to instantiate '{}': plugin panicked during construction", name);
                ptr::null_mut()
            }
        }
    }

    /// Destroy an instance. Null handles are ignored.
    ///
    /// # Safety
    /// `handle` must be null or come from [`instantiate`](Self::instantiate)
    /// and not have been cleaned up already.
    pub unsafe extern "C" fn cleanup(handle: NativePluginHandle) {
        if handle.is_null() {
            return;
        }
        drop(Box::from_raw(handle as *mut Instance<P>));
        debug!("Cleaned up '{}'", P::config().name);
    }

    /// # Safety
    /// `handle` must be null or a live instance handle.
    pub unsafe extern "C" fn get_parameter_count(handle: NativePluginHandle) -> u32 {
        Self::instance(handle).map_or(0, |instance| instance.parameters.len() as u32)
    }

    /// Parameter metadata, or null for an out-of-range index.
    ///
    /// The pointer stays valid until `cleanup`.
    ///
    /// # Safety
    /// `handle` must be null or a live instance handle.
    pub unsafe extern "C" fn get_parameter_info(
        handle: NativePluginHandle,
        index: u32,
    ) -> *const NativeParameter {
        Self::instance(handle)
            .and_then(|instance| instance.parameters.get(index as usize))
            .map_or(ptr::null(), |param| &param.native as *const NativeParameter)
    }

    /// # Safety
    /// `handle` must be null or a live instance handle.
    pub unsafe extern "C" fn get_parameter_value(handle: NativePluginHandle, index: u32) -> f32 {
        match Self::instance(handle) {
            Some(instance) => instance.plugin().params().get_value(index as usize),
            None => 0.0,
        }
    }

    /// # Safety
    /// `handle` must be null or a live instance handle.
    pub unsafe extern "C" fn set_parameter_value(handle: NativePluginHandle, index: u32, value: f32) {
        let Some(instance) = Self::instance(handle) else {
            return;
        };
        let params = instance.plugin().params();
        if !params.contains(index as usize) {
            warn!(
                "Ignoring value {} for parameter {} of '{}' ({} parameters)",
                value,
                index,
                P::config().name,
                params.count()
            );
            return;
        }
        params.set_value(index as usize, value);
    }

    /// Run one block.
    ///
    /// Audio tables are read only up to the declared port counts, so a
    /// plugin without audio ports never dereferences them.
    ///
    /// # Safety
    /// `handle` must be null or a live instance handle. `events` must be
    /// null or point to `event_count` events. Audio tables must hold at
    /// least the declared number of channel pointers, each to `frames`
    /// samples.
    pub unsafe extern "C" fn process(
        handle: NativePluginHandle,
        in_buffer: *mut *mut f32,
        out_buffer: *mut *mut f32,
        frames: u32,
        events: *const NativeMidiEvent,
        event_count: u32,
    ) {
        let Some(instance) = Self::instance(handle) else {
            return;
        };
        let num_samples = frames as usize;

        // NativeMidiEvent and MidiEvent share one #[repr(C)] layout.
        let events: &[MidiEvent] = if events.is_null() || event_count == 0 {
            &[]
        } else {
            slice::from_raw_parts(events.cast::<MidiEvent>(), event_count as usize)
        };

        let inputs = channel_ptrs(in_buffer, instance.audio_ins)
            .map(|ptr| slice::from_raw_parts(ptr as *const f32, num_samples));
        let outputs = channel_ptrs(out_buffer, instance.audio_outs)
            .map(|ptr| slice::from_raw_parts_mut(ptr, num_samples));
        let mut buffer = Buffer::new(inputs, outputs, num_samples);

        let mut midi_out = HostMidiSink::new(instance.host);
        instance.plugin_mut().process(&mut buffer, events, &mut midi_out);
    }
}
