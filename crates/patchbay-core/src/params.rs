//! Parameter system for native plugins.
//!
//! Native hosts address parameters by index and exchange plain `f32` values
//! within each parameter's declared range. This module describes those
//! parameters ([`ParamInfo`]) and the collection interface the wrapper talks
//! to ([`Parameters`]).
//!
//! # Thread Safety
//!
//! The [`Parameters`] trait requires `Send + Sync` because parameters may be
//! accessed from multiple threads:
//! - Audio thread: reads parameter values during processing
//! - Control thread: host automation and UI changes
//!
//! Setters take `&self`; use atomic storage (see
//! [`BoolParam`](crate::param_types::BoolParam)) for lock-free access.

use crate::types::ParamValue;

/// A labelled value shown by the host instead of a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePoint {
    /// Display label (e.g., "Off").
    pub label: &'static str,
    /// Plain value the label stands for.
    pub value: ParamValue,
}

impl ScalePoint {
    /// Create a new scale point.
    pub const fn new(label: &'static str, value: ParamValue) -> Self {
        Self { label, value }
    }
}

/// Scale points used by every on/off parameter.
pub const TOGGLE_SCALE_POINTS: [ScalePoint; 2] =
    [ScalePoint::new("Off", 0.0), ScalePoint::new("On", 1.0)];

/// Value range of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRanges {
    /// Default value.
    pub default: ParamValue,
    /// Minimum value.
    pub min: ParamValue,
    /// Maximum value.
    pub max: ParamValue,
    /// Regular step used by host controls.
    pub step: ParamValue,
    /// Fine step.
    pub step_small: ParamValue,
    /// Coarse step.
    pub step_large: ParamValue,
}

impl ParamRanges {
    /// Continuous range `[min, max]` with 1% steps.
    pub const fn new(default: ParamValue, min: ParamValue, max: ParamValue) -> Self {
        let span = max - min;
        Self {
            default,
            min,
            max,
            step: span / 100.0,
            step_small: span / 1000.0,
            step_large: span / 10.0,
        }
    }

    /// `[0, 1]` range with every step set to 1.
    pub const fn toggle(default: bool) -> Self {
        Self {
            default: if default { 1.0 } else { 0.0 },
            min: 0.0,
            max: 1.0,
            step: 1.0,
            step_small: 1.0,
            step_large: 1.0,
        }
    }
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Flags controlling parameter behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags {
    /// Parameter is written by the plugin, not the host.
    pub is_output: bool,
    /// Parameter is active and shown by the host.
    pub is_enabled: bool,
    /// Parameter can be automated by the host.
    pub can_automate: bool,
    /// Parameter only takes the values min and max.
    pub is_boolean: bool,
    /// Parameter only takes whole-number values.
    pub is_integer: bool,
    /// Host controls should use a logarithmic scale.
    pub is_logarithmic: bool,
    /// Host should present the scale points instead of a number.
    pub uses_scale_points: bool,
}

impl ParamFlags {
    /// Enabled and automatable, nothing else.
    pub const fn new() -> Self {
        Self {
            is_output: false,
            is_enabled: true,
            can_automate: true,
            is_boolean: false,
            is_integer: false,
            is_logarithmic: false,
            uses_scale_points: false,
        }
    }

    /// Flags for an on/off switch presented with scale points.
    pub const fn toggle() -> Self {
        Self {
            is_boolean: true,
            uses_scale_points: true,
            ..Self::new()
        }
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    /// Parameter name shown by the host.
    pub name: &'static str,
    /// Unit label (e.g., "dB"). Empty when there is none.
    pub unit: &'static str,
    /// Value range.
    pub ranges: ParamRanges,
    /// Behavioral flags.
    pub flags: ParamFlags,
    /// Labelled values, used when `flags.uses_scale_points` is set.
    pub scale_points: &'static [ScalePoint],
}

impl ParamInfo {
    /// Create a new continuous `[0, 1]` parameter with default flags.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            unit: "",
            ranges: ParamRanges::new(0.0, 0.0, 1.0),
            flags: ParamFlags::new(),
            scale_points: &[],
        }
    }

    /// Create an on/off parameter.
    ///
    /// - Range `[0, 1]` with step 1
    /// - Boolean, enabled, automatable
    /// - "Off" = 0.0 and "On" = 1.0 scale points
    pub const fn toggle(name: &'static str, default: bool) -> Self {
        Self {
            name,
            unit: "",
            ranges: ParamRanges::toggle(default),
            flags: ParamFlags::toggle(),
            scale_points: &TOGGLE_SCALE_POINTS,
        }
    }

    /// Set the unit label.
    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Set the value range.
    pub const fn with_ranges(mut self, ranges: ParamRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the scale points and flag the parameter as using them.
    pub const fn with_scale_points(mut self, points: &'static [ScalePoint]) -> Self {
        self.scale_points = points;
        self.flags.uses_scale_points = true;
        self
    }
}

/// Trait for plugin parameter collections.
///
/// The native wrapper uses this to answer the host's parameter queries.
/// Indices run from 0 to `count() - 1`; anything else is out of range and
/// must be handled quietly (no panic, no error).
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use patchbay_core::{ParamInfo, ParamValue, Parameters};
///
/// pub struct GainParams {
///     gain: AtomicU32,
///     gain_info: ParamInfo,
/// }
///
/// impl Parameters for GainParams {
///     fn count(&self) -> usize { 1 }
///
///     fn info(&self, index: usize) -> Option<&ParamInfo> {
///         match index {
///             0 => Some(&self.gain_info),
///             _ => None,
///         }
///     }
///
///     fn get_value(&self, index: usize) -> ParamValue {
///         match index {
///             0 => f32::from_bits(self.gain.load(Ordering::Relaxed)),
///             _ => 0.0,
///         }
///     }
///
///     fn set_value(&self, index: usize, value: ParamValue) {
///         if index == 0 {
///             self.gain.store(value.to_bits(), Ordering::Relaxed);
///         }
///     }
/// }
///
/// let params = GainParams {
///     gain: AtomicU32::new(0.5f32.to_bits()),
///     gain_info: ParamInfo::new("Gain"),
/// };
/// params.set_value(0, 0.75);
/// assert_eq!(params.get_value(0), 0.75);
/// assert_eq!(params.get_value(1), 0.0);
/// ```
pub trait Parameters: Send + Sync {
    /// Returns the number of parameters.
    fn count(&self) -> usize;

    /// Returns parameter info by index (0 to count-1).
    ///
    /// Returns `None` if index is out of bounds.
    fn info(&self, index: usize) -> Option<&ParamInfo>;

    /// Gets the current plain value of a parameter.
    ///
    /// Returns 0.0 for out-of-range indices. Must be lock-free and safe to
    /// call from the audio thread.
    fn get_value(&self, index: usize) -> ParamValue;

    /// Sets the plain value of a parameter.
    ///
    /// Does nothing for out-of-range indices. Must be lock-free and safe to
    /// call from the audio thread.
    fn set_value(&self, index: usize, value: ParamValue);

    /// Returns true if `index` addresses an existing parameter.
    fn contains(&self, index: usize) -> bool {
        index < self.count()
    }
}

/// Empty parameter collection for plugins with no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParams;

impl Parameters for NoParams {
    fn count(&self) -> usize {
        0
    }

    fn info(&self, _index: usize) -> Option<&ParamInfo> {
        None
    }

    fn get_value(&self, _index: usize) -> ParamValue {
        0.0
    }

    fn set_value(&self, _index: usize, _value: ParamValue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_info() {
        const INFO: ParamInfo = ParamInfo::toggle("1", true);

        assert_eq!(INFO.name, "1");
        assert_eq!(INFO.unit, "");
        assert_eq!(INFO.ranges.default, 1.0);
        assert_eq!(INFO.ranges.min, 0.0);
        assert_eq!(INFO.ranges.max, 1.0);
        assert_eq!(INFO.ranges.step, 1.0);
        assert_eq!(INFO.ranges.step_small, 1.0);
        assert_eq!(INFO.ranges.step_large, 1.0);
        assert!(INFO.flags.is_enabled);
        assert!(INFO.flags.can_automate);
        assert!(INFO.flags.is_boolean);
        assert!(INFO.flags.uses_scale_points);
        assert!(!INFO.flags.is_output);
        assert_eq!(INFO.scale_points, &TOGGLE_SCALE_POINTS);
    }

    #[test]
    fn test_toggle_scale_points() {
        assert_eq!(TOGGLE_SCALE_POINTS[0], ScalePoint::new("Off", 0.0));
        assert_eq!(TOGGLE_SCALE_POINTS[1], ScalePoint::new("On", 1.0));
    }

    #[test]
    fn test_builder() {
        let info = ParamInfo::new("Gain")
            .with_unit("dB")
            .with_ranges(ParamRanges::new(0.0, -60.0, 12.0))
            .with_scale_points(&TOGGLE_SCALE_POINTS);

        assert_eq!(info.unit, "dB");
        assert_eq!(info.ranges.min, -60.0);
        assert!(info.flags.uses_scale_points);
        assert!(!info.flags.is_boolean);
    }

    #[test]
    fn test_no_params() {
        let params = NoParams;
        assert_eq!(params.count(), 0);
        assert!(params.info(0).is_none());
        assert!(!params.contains(0));
        assert_eq!(params.get_value(0), 0.0);
    }
}
