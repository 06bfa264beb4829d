//! Text and array conversions across the native boundary.
//!
//! Outgoing text is encoded per function: most GLFW entry points take UTF-8, a few
//! (extension names, GL procedure names, gamepad mappings, X11 hints) are ASCII only.
//! Incoming strings and arrays are always copied; native buffers are never retained.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Text encoding mandated by a native function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

/// Encodes `text` into a NUL-terminated buffer for a native call.
pub fn encode(text: &str, encoding: Encoding) -> Result<CString> {
    if encoding == Encoding::Ascii && !text.is_ascii() {
        return Err(Error::NonAscii(text.to_string()));
    }
    CString::new(text).map_err(|_| Error::InteriorNul)
}

pub fn encode_utf8(text: &str) -> Result<CString> {
    encode(text, Encoding::Utf8)
}

pub fn encode_ascii(text: &str) -> Result<CString> {
    encode(text, Encoding::Ascii)
}

/// Decodes a NUL-terminated UTF-8 string. Null yields `None`; invalid sequences are replaced.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated buffer valid for the duration of the call.
pub unsafe fn decode(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let bytes = CStr::from_ptr(ptr).to_bytes();
    Some(match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_owned(),
        Cow::Owned(text) => text,
    })
}

/// Like [`decode`], but null decodes to the empty string.
///
/// # Safety
///
/// Same contract as [`decode`].
pub unsafe fn decode_or_empty(ptr: *const c_char) -> String {
    decode(ptr).unwrap_or_default()
}

/// Copies `count` elements out of a natively owned array.
///
/// A null pointer or a non-positive count yields an empty vector.
///
/// # Safety
///
/// When non-null, `ptr` must be valid for `count` reads of `T`.
pub unsafe fn copy_array<T: Copy>(ptr: *const T, count: c_int) -> Vec<T> {
    if ptr.is_null() || count <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, count as usize).to_vec()
}

/// Copies an array of `count` C strings. Null entries are skipped.
///
/// # Safety
///
/// When non-null, `ptr` must be valid for `count` reads, each entry null or NUL-terminated.
pub unsafe fn copy_string_array(ptr: *const *const c_char, count: c_int) -> Vec<String> {
    copy_array(ptr, count)
        .into_iter()
        .filter_map(|entry| decode(entry))
        .collect()
}

/// Copies the file-drop path list delivered by `glfwSetDropCallback`.
///
/// # Safety
///
/// Same contract as [`copy_string_array`].
pub unsafe fn copy_paths(ptr: *const *const c_char, count: c_int) -> Vec<PathBuf> {
    copy_string_array(ptr, count)
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

/// Converts a codepoint from the char callbacks; invalid scalars are dropped.
pub fn codepoint_to_char(codepoint: u32) -> Option<char> {
    char::from_u32(codepoint)
}
