//! Concrete parameter types with atomic storage.
//!
//! # Example
//!
//! ```
//! use patchbay_core::param_types::BoolParam;
//!
//! let enabled = BoolParam::new("Enabled", true);
//! assert!(enabled.get());
//!
//! enabled.set_value(0.2);
//! assert!(!enabled.get());
//! assert_eq!(enabled.value(), 0.0);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::params::ParamInfo;
use crate::types::ParamValue;

// =============================================================================
// BoolParam - Boolean parameter
// =============================================================================

/// Boolean parameter (toggle).
///
/// Stored in an `AtomicBool` with relaxed ordering: the control thread may
/// flip it while the audio thread reads it, without locks and without torn
/// values. No ordering relative to other memory is implied.
#[derive(Debug)]
pub struct BoolParam {
    /// Parameter metadata (name, ranges, flags, scale points)
    info: ParamInfo,
    value: AtomicBool,
}

impl BoolParam {
    /// Values at or above this threshold switch the parameter on.
    pub const THRESHOLD: ParamValue = 0.5;

    /// Create a boolean parameter with "Off"/"On" scale points.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `default` - Default value
    pub const fn new(name: &'static str, default: bool) -> Self {
        Self {
            info: ParamInfo::toggle(name, default),
            value: AtomicBool::new(default),
        }
    }

    /// Disable automation for this parameter.
    pub const fn non_automatable(mut self) -> Self {
        self.info.flags.can_automate = false;
        self
    }

    /// Get the parameter metadata.
    pub fn info(&self) -> &ParamInfo {
        &self.info
    }

    /// Get the current value.
    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Relaxed)
    }

    /// Set the current value.
    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// The current value as a plain host value (1.0 or 0.0).
    #[inline]
    pub fn value(&self) -> ParamValue {
        if self.get() {
            1.0
        } else {
            0.0
        }
    }

    /// Set from a plain host value: on if `value >= 0.5`.
    ///
    /// NaN is below every threshold and switches the parameter off.
    #[inline]
    pub fn set_value(&self, value: ParamValue) {
        self.set(value >= Self::THRESHOLD);
    }

    /// Restore the default value.
    pub fn reset(&self) {
        self.set(self.info.ranges.default >= Self::THRESHOLD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value() {
        assert!(BoolParam::new("On", true).get());
        assert!(!BoolParam::new("Off", false).get());
    }

    #[test]
    fn test_threshold() {
        let param = BoolParam::new("Switch", false);

        param.set_value(0.5);
        assert!(param.get());
        assert_eq!(param.value(), 1.0);

        param.set_value(0.4999);
        assert!(!param.get());
        assert_eq!(param.value(), 0.0);

        param.set_value(7.0);
        assert!(param.get());

        param.set_value(-1.0);
        assert!(!param.get());
    }

    #[test]
    fn test_nan_switches_off() {
        let param = BoolParam::new("Switch", true);
        param.set_value(f32::NAN);
        assert!(!param.get());
    }

    #[test]
    fn test_reset() {
        let param = BoolParam::new("Switch", true);
        param.set(false);
        param.reset();
        assert!(param.get());
    }

    #[test]
    fn test_non_automatable() {
        let param = BoolParam::new("Switch", true).non_automatable();
        assert!(!param.info().flags.can_automate);
        assert!(param.info().flags.is_boolean);
    }
}
