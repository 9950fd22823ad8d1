// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Reading through the raw pointers of Vulkan structures.

use ash::vk;
use std::{
    ffi::{c_char, c_void, CStr},
    slice,
};

/// Views `len` elements starting at `ptr`, or nothing if `ptr` is null.
///
/// # Safety
///
/// - If `ptr` is not null, it must be valid for reads of `len` elements of `T` for `'a`.
#[inline]
pub(crate) unsafe fn slice_or_empty<'a, T>(ptr: *const T, len: u32) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len as usize) }
    }
}

/// Dereferences `ptr` if it is not null.
///
/// # Safety
///
/// - If `ptr` is not null, it must be valid for reads of a `T` for `'a`.
#[inline]
pub(crate) unsafe fn as_ref<'a, T>(ptr: *const T) -> Option<&'a T> {
    unsafe { ptr.as_ref() }
}

/// Returns the bytes of a nul-terminated string, without the terminator.
///
/// # Safety
///
/// - `ptr` must be non-null and point to a nul-terminated string.
#[inline]
pub(crate) unsafe fn c_str_bytes<'a>(ptr: *const c_char) -> &'a [u8] {
    unsafe { CStr::from_ptr(ptr) }.to_bytes()
}

/// Iterates over the non-null strings of an array of string pointers, such as
/// `ppEnabledExtensionNames`.
///
/// # Safety
///
/// - `ptr` must be null or valid for reads of `count` pointers, each of which must be null or
///   point to a nul-terminated string that lives for `'a`.
pub(crate) unsafe fn c_str_array<'a>(
    ptr: *const *const c_char,
    count: u32,
) -> impl Iterator<Item = &'a CStr> {
    unsafe { slice_or_empty(ptr, count) }
        .iter()
        .filter(|string| !string.is_null())
        .map(|&string| unsafe { CStr::from_ptr(string) })
}

/// Returns the `sType` of the structure at `ptr`.
///
/// # Safety
///
/// - `ptr` must be non-null and point to a Vulkan structure.
#[inline]
pub(crate) unsafe fn structure_type(ptr: *const c_void) -> vk::StructureType {
    unsafe { (*ptr.cast::<vk::BaseInStructure<'_>>()).s_type }
}

/// Returns the `pNext` of the structure at `ptr`.
///
/// # Safety
///
/// - `ptr` must be non-null and point to a Vulkan structure.
#[inline]
pub(crate) unsafe fn next_structure(ptr: *const c_void) -> *const c_void {
    unsafe { (*ptr.cast::<vk::BaseInStructure<'_>>()).p_next.cast() }
}

/// The structure type that `T` must be tagged with.
#[inline]
pub(crate) fn stype_of<T: vk::TaggedStructure>() -> vk::StructureType {
    T::STRUCTURE_TYPE
}
