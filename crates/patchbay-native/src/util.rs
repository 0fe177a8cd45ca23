//! C string helpers for descriptor and parameter metadata.
//!
//! Everything the host reads through a `const char*` is owned by a
//! [`CString`] stored next to the struct that points at it.

use std::ffi::{c_char, CString};

use patchbay_core::{PluginError, PluginResult};

/// Convert metadata text to an owned C string.
///
/// Fails with [`PluginError::InvalidConfig`] on an interior NUL byte.
pub fn to_cstring(field: &str, text: &str) -> PluginResult<CString> {
    CString::new(text)
        .map_err(|_| PluginError::InvalidConfig(format!("{} {:?} contains a NUL byte", field, text)))
}

/// Like [`to_cstring`], but an empty string becomes `None` (a null pointer).
pub fn to_optional_cstring(field: &str, text: &str) -> PluginResult<Option<CString>> {
    if text.is_empty() {
        Ok(None)
    } else {
        to_cstring(field, text).map(Some)
    }
}

/// Pointer to an optional C string, null for `None`.
#[inline]
pub fn ptr_or_null(text: &Option<CString>) -> *const c_char {
    text.as_ref().map_or(std::ptr::null(), |s| s.as_ptr())
}
