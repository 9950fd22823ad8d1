// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The primitive checks that every command validator is built from.
//!
//! Each check reports at most one diagnostic per violated element and returns whether it
//! reported an error. Most callers ignore the return value and read the verdict from the
//! context at the end of the call.

use crate::{
    chain::StructureTypeToken,
    context::ValidationContext,
    diagnostics::{vuid, ObjectType, Severity},
    enums::KnownValues,
    ffi,
    flags::{FlagSet, KnownFlags},
    name::ParameterName,
};
use ash::vk;
use std::{ffi::c_char, fmt::Display};

/// The longest string, terminator excluded, accepted for layer and extension names.
pub(crate) const MAX_STRING_LENGTH: usize = 256;

/// How a flags value is constrained beyond its bits being known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlagKind {
    /// At least one bit must be set.
    RequiredMask,
    /// Any combination of bits, including none.
    OptionalMask,
    /// Exactly one bit must be set.
    RequiredSingleBit,
    /// At most one bit may be set.
    OptionalSingleBit,
}

impl FlagKind {
    #[inline]
    fn is_required(self) -> bool {
        matches!(self, FlagKind::RequiredMask | FlagKind::RequiredSingleBit)
    }

    #[inline]
    fn is_single_bit(self) -> bool {
        matches!(self, FlagKind::RequiredSingleBit | FlagKind::OptionalSingleBit)
    }
}

/// Returns `a % b`, or 0 when `b` is 0.
#[inline]
pub(crate) fn safe_modulo(a: u64, b: u64) -> u64 {
    a.checked_rem(b).unwrap_or(0)
}

impl ValidationContext<'_> {
    /// Checks that a required pointer is not null.
    pub(crate) fn required_pointer<T>(
        &mut self,
        name: impl Into<ParameterName>,
        ptr: *const T,
        vuid: &'static str,
    ) -> bool {
        if !ptr.is_null() {
            return false;
        }

        let api_name = self.api_name();
        self.error_unattached(
            vuid,
            format_args!(
                "{}: required parameter {} specified as NULL.",
                api_name,
                name.into(),
            ),
        )
    }

    /// Checks that a required handle is not `VK_NULL_HANDLE`.
    pub(crate) fn required_handle(
        &mut self,
        name: impl Into<ParameterName>,
        handle: impl vk::Handle,
    ) -> bool {
        if handle.as_raw() != 0 {
            return false;
        }

        let api_name = self.api_name();
        self.error_unattached(
            vuid::REQUIRED_PARAMETER,
            format_args!(
                "{}: required parameter {} specified as VK_NULL_HANDLE",
                api_name,
                name.into(),
            ),
        )
    }

    /// Checks a count together with the array it describes.
    ///
    /// A required count must not be 0, and a required array must not be null unless the count
    /// is 0.
    pub(crate) fn array<T>(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: u32,
        ptr: *const T,
        count_required: bool,
        array_required: bool,
        count_required_vuid: &'static str,
        array_required_vuid: &'static str,
    ) -> bool {
        let api_name = self.api_name();
        let mut skip = false;

        if count_required && count == 0 {
            skip |= self.error_unattached(
                count_required_vuid,
                format_args!(
                    "{}: parameter {} must be greater than 0.",
                    api_name,
                    count_name.into(),
                ),
            );
        }

        if array_required && count != 0 && ptr.is_null() {
            skip |= self.error_unattached(
                array_required_vuid,
                format_args!(
                    "{}: required parameter {} specified as NULL.",
                    api_name,
                    array_name.into(),
                ),
            );
        }

        skip
    }

    /// Like `array`, for queries where the count is passed by pointer.
    ///
    /// A null array pointer means the caller only asks for the count, so the count value is
    /// then treated as 0.
    ///
    /// # Safety
    ///
    /// - `count` must be null or valid for reads.
    pub(crate) unsafe fn array_with_count_ptr<T>(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: *const u32,
        ptr: *const T,
        count_ptr_required: bool,
        count_value_required: bool,
        array_required: bool,
        count_required_vuid: &'static str,
        array_required_vuid: &'static str,
    ) -> bool {
        let Some(&count) = (unsafe { ffi::as_ref(count) }) else {
            if !count_ptr_required {
                return false;
            }

            let api_name = self.api_name();
            return self.error_unattached(
                vuid::REQUIRED_PARAMETER,
                format_args!(
                    "{}: required parameter {} specified as NULL",
                    api_name,
                    count_name.into(),
                ),
            );
        };

        self.array(
            count_name,
            array_name,
            if ptr.is_null() { 0 } else { count },
            ptr,
            count_value_required,
            array_required,
            count_required_vuid,
            array_required_vuid,
        )
    }

    /// Like `array`, and additionally every handle in the array must be non-null.
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or valid for reads of `count` handles.
    pub(crate) unsafe fn handle_array<H: vk::Handle + Copy>(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: u32,
        ptr: *const H,
        count_required: bool,
        array_required: bool,
    ) -> bool {
        if count == 0 || ptr.is_null() {
            return self.array(
                count_name,
                array_name,
                count,
                ptr,
                count_required,
                array_required,
                vuid::UNDEFINED,
                vuid::UNDEFINED,
            );
        }

        let api_name = self.api_name();
        let array_name = array_name.into();
        let mut skip = false;

        for (index, &handle) in unsafe { ffi::slice_or_empty(ptr, count) }
            .iter()
            .enumerate()
        {
            if handle.as_raw() == 0 {
                skip |= self.error_unattached(
                    vuid::REQUIRED_PARAMETER,
                    format_args!(
                        "{}: required parameter {}[{}] specified as VK_NULL_HANDLE",
                        api_name, array_name, index,
                    ),
                );
            }
        }

        skip
    }

    /// Like `array`, and additionally every string pointer in the array must be non-null.
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or valid for reads of `count` pointers.
    pub(crate) unsafe fn string_array(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: u32,
        ptr: *const *const c_char,
        count_required: bool,
        array_required: bool,
        count_required_vuid: &'static str,
        array_required_vuid: &'static str,
    ) -> bool {
        if count == 0 || ptr.is_null() {
            return self.array(
                count_name,
                array_name,
                count,
                ptr,
                count_required,
                array_required,
                count_required_vuid,
                array_required_vuid,
            );
        }

        let api_name = self.api_name();
        let array_name = array_name.into();
        let mut skip = false;

        for (index, string) in unsafe { ffi::slice_or_empty(ptr, count) }
            .iter()
            .enumerate()
        {
            if string.is_null() {
                skip |= self.error_unattached(
                    vuid::REQUIRED_PARAMETER,
                    format_args!(
                        "{}: required parameter {}[{}] specified as NULL",
                        api_name, array_name, index,
                    ),
                );
            }
        }

        skip
    }

    /// Checks that a string is terminated within `MAX_STRING_LENGTH` bytes and is well-formed
    /// UTF-8 without control characters.
    ///
    /// A null string is not checked.
    ///
    /// # Safety
    ///
    /// - `string` must be null, or valid for reads up to its terminator or
    ///   `MAX_STRING_LENGTH` bytes, whichever comes first.
    pub(crate) unsafe fn valid_string(
        &mut self,
        name: impl Into<ParameterName>,
        vuid: &'static str,
        string: *const c_char,
    ) -> bool {
        if string.is_null() {
            return false;
        }

        let bytes = unsafe { bounded_c_str(string, MAX_STRING_LENGTH) };

        self.string_contents(name, vuid, bytes)
    }

    /// Checks a string stored in a fixed-size array, such as the name in
    /// `VkExtensionProperties`.
    pub(crate) fn valid_fixed_string(
        &mut self,
        name: impl Into<ParameterName>,
        vuid: &'static str,
        array: &[c_char],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(array);
        let bytes = bytes[..bytes.len().min(MAX_STRING_LENGTH)]
            .iter()
            .position(|&b| b == 0)
            .map(|end| &bytes[..end]);

        self.string_contents(name, vuid, bytes)
    }

    /// Reports a string that has no terminator within `MAX_STRING_LENGTH` bytes (`None`), or
    /// whose bytes are not well-formed.
    fn string_contents(
        &mut self,
        name: impl Into<ParameterName>,
        vuid: &'static str,
        bytes: Option<&[u8]>,
    ) -> bool {
        let api_name = self.api_name();
        let Some(bytes) = bytes else {
            return self.error_unattached(
                vuid,
                format_args!(
                    "{}: string {} exceeds max length {}",
                    api_name,
                    name.into(),
                    MAX_STRING_LENGTH,
                ),
            );
        };

        let has_control_bytes = bytes.iter().any(|&b| b < 0x0a || b == 0x7f);

        if has_control_bytes || std::str::from_utf8(bytes).is_err() {
            return self.error_unattached(
                vuid,
                format_args!(
                    "{}: string {} contains invalid characters or is badly formed",
                    api_name,
                    name.into(),
                ),
            );
        }

        false
    }

    /// Checks a pointer to a structure: if required it must be non-null, and if non-null its
    /// `sType` must match `T`.
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or point to a readable Vulkan structure header.
    pub(crate) unsafe fn struct_type<T: vk::TaggedStructure>(
        &mut self,
        name: impl Into<ParameterName>,
        ptr: *const T,
        required: bool,
        struct_vuid: &'static str,
        stype_vuid: &'static str,
    ) -> bool {
        let api_name = self.api_name();

        if ptr.is_null() {
            if !required {
                return false;
            }

            return self.error_unattached(
                struct_vuid,
                format_args!(
                    "{}: required parameter {} specified as NULL",
                    api_name,
                    name.into(),
                ),
            );
        }

        if unsafe { ffi::structure_type(ptr.cast()) } != T::STRUCTURE_TYPE {
            return self.error_unattached(
                stype_vuid,
                format_args!(
                    "{}: parameter {}->sType must be {}.",
                    api_name,
                    name.into(),
                    StructureTypeToken(T::STRUCTURE_TYPE),
                ),
            );
        }

        false
    }

    /// Checks an array of structures: the count and pointer are checked as by `array`, and
    /// every element's `sType` must match `T`.
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or valid for reads of `count` elements.
    pub(crate) unsafe fn struct_type_array<T: vk::TaggedStructure>(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: u32,
        ptr: *const T,
        count_required: bool,
        array_required: bool,
        stype_vuid: &'static str,
        array_required_vuid: &'static str,
        count_required_vuid: &'static str,
    ) -> bool {
        if count == 0 || ptr.is_null() {
            return self.array(
                count_name,
                array_name,
                count,
                ptr,
                count_required,
                array_required,
                count_required_vuid,
                array_required_vuid,
            );
        }

        let api_name = self.api_name();
        let array_name = array_name.into();
        let mut skip = false;

        for index in 0..count as usize {
            let element = unsafe { ptr.add(index) };

            if unsafe { ffi::structure_type(element.cast()) } != T::STRUCTURE_TYPE {
                skip |= self.error_unattached(
                    stype_vuid,
                    format_args!(
                        "{}: parameter {}[{}].sType must be {}",
                        api_name,
                        array_name,
                        index,
                        StructureTypeToken(T::STRUCTURE_TYPE),
                    ),
                );
            }
        }

        skip
    }

    /// Warns if a `VkBool32` is neither `VK_TRUE` nor `VK_FALSE`.
    pub(crate) fn bool32(&mut self, name: impl Into<ParameterName>, value: vk::Bool32) -> bool {
        if value != vk::TRUE && value != vk::FALSE {
            let api_name = self.api_name();
            self.warning_unattached(
                vuid::UNRECOGNIZED_VALUE,
                format_args!(
                    "{}: value of {} ({}) is neither VK_TRUE nor VK_FALSE",
                    api_name,
                    name.into(),
                    value,
                ),
            );
        }

        false
    }

    /// Checks that an enumeration value is one of the known tokens.
    pub(crate) fn ranged_enum<E: KnownValues>(
        &mut self,
        name: impl Into<ParameterName>,
        value: E,
        vuid: &'static str,
    ) -> bool {
        if value.is_known() {
            return false;
        }

        let api_name = self.api_name();
        self.error_unattached(
            vuid,
            format_args!(
                "{}: value of {} ({}) does not fall within the begin..end range of the core {} \
                enumeration tokens and is not an extension added token.",
                api_name,
                name.into(),
                value.as_raw(),
                E::NAME,
            ),
        )
    }

    /// Checks an array of enumeration values.
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or valid for reads of `count` elements.
    pub(crate) unsafe fn ranged_enum_array<E: KnownValues>(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: u32,
        ptr: *const E,
        count_required: bool,
        array_required: bool,
    ) -> bool {
        if count == 0 || ptr.is_null() {
            return self.array(
                count_name,
                array_name,
                count,
                ptr,
                count_required,
                array_required,
                vuid::UNDEFINED,
                vuid::UNDEFINED,
            );
        }

        let api_name = self.api_name();
        let array_name = array_name.into();
        let mut skip = false;

        for (index, &value) in unsafe { ffi::slice_or_empty(ptr, count) }
            .iter()
            .enumerate()
        {
            if !value.is_known() {
                skip |= self.error_unattached(
                    vuid::UNRECOGNIZED_VALUE,
                    format_args!(
                        "{}: value of {}[{}] ({}) does not fall within the begin..end range of \
                        the core {} enumeration tokens and is not an extension added token",
                        api_name,
                        array_name,
                        index,
                        value.as_raw(),
                        E::NAME,
                    ),
                );
            }
        }

        skip
    }

    /// Checks that a flags value reserved for future use is 0.
    pub(crate) fn reserved_flags(
        &mut self,
        name: impl Into<ParameterName>,
        value: u32,
        vuid: &'static str,
    ) -> bool {
        if value == 0 {
            return false;
        }

        let api_name = self.api_name();
        self.error_unattached(
            vuid,
            format_args!("{}: parameter {} must be 0.", api_name, name.into()),
        )
    }

    /// Checks a flags value: its bits must be known, and it must satisfy the zero and
    /// single-bit rules of `kind`.
    ///
    /// `zero_vuid` is used when a required mask is 0. The single-bit kinds use `vuid` for
    /// everything.
    pub(crate) fn flags<F: KnownFlags>(
        &mut self,
        name: impl Into<ParameterName>,
        value: F,
        kind: FlagKind,
        vuid: &'static str,
        zero_vuid: &'static str,
    ) -> bool {
        let api_name = self.api_name();
        let name = name.into();
        let value = value.into_flag_set();
        let mut skip = false;

        if !value.is_subset_of(F::ALL) {
            skip |= self.error_unattached(
                vuid,
                format_args!(
                    "{}: value of {} contains flag bits that are not recognized members of {}",
                    api_name,
                    name,
                    F::NAME,
                ),
            );
        }

        if kind.is_required() && value.is_empty() {
            let zero_vuid = if kind == FlagKind::RequiredMask {
                zero_vuid
            } else {
                vuid
            };

            skip |= self.error_unattached(
                zero_vuid,
                format_args!("{}: value of {} must not be 0.", api_name, name),
            );
        }

        if kind.is_single_bit() && !value.is_single_bit_or_zero() {
            skip |= self.error_unattached(
                vuid,
                format_args!(
                    "{}: value of {} contains multiple members of {} when only a single value \
                    is allowed",
                    api_name,
                    name,
                    F::NAME,
                ),
            );
        }

        skip
    }

    /// Checks an array of flags values. Zero elements are only rejected if the array is
    /// required.
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or valid for reads of `count` elements.
    pub(crate) unsafe fn flags_array<F: KnownFlags>(
        &mut self,
        count_name: impl Into<ParameterName>,
        array_name: impl Into<ParameterName>,
        count: u32,
        ptr: *const F,
        count_required: bool,
        array_required: bool,
    ) -> bool {
        if count == 0 || ptr.is_null() {
            return self.array(
                count_name,
                array_name,
                count,
                ptr,
                count_required,
                array_required,
                vuid::UNDEFINED,
                vuid::UNDEFINED,
            );
        }

        let api_name = self.api_name();
        let array_name = array_name.into();
        let mut skip = false;

        for (index, &value) in unsafe { ffi::slice_or_empty(ptr, count) }
            .iter()
            .enumerate()
        {
            let value: FlagSet = value.into_flag_set();

            if value.is_empty() {
                if array_required {
                    skip |= self.error_unattached(
                        vuid::REQUIRED_PARAMETER,
                        format_args!(
                            "{}: value of {}[{}] must not be 0",
                            api_name, array_name, index,
                        ),
                    );
                }
            } else if !value.is_subset_of(F::ALL) {
                skip |= self.error_unattached(
                    vuid::UNRECOGNIZED_VALUE,
                    format_args!(
                        "{}: value of {}[{}] contains flag bits that are not recognized members \
                        of {}",
                        api_name,
                        array_name,
                        index,
                        F::NAME,
                    ),
                );
            }
        }

        skip
    }

    /// Checks that `value` is strictly greater than `lower_bound`, reporting against the
    /// current object.
    pub(crate) fn greater_than<T: PartialOrd + Display>(
        &mut self,
        name: impl Into<ParameterName>,
        value: T,
        lower_bound: T,
        vuid: &'static str,
    ) -> bool {
        if value > lower_bound {
            return false;
        }

        let api_name = self.api_name();
        self.error(
            vuid,
            format_args!(
                "{}: parameter {} (= {}) must be greater than {}",
                api_name,
                name.into(),
                value,
                lower_bound,
            ),
        )
    }

    #[inline]
    pub(crate) fn greater_than_zero<T: PartialOrd + Display + Default>(
        &mut self,
        name: impl Into<ParameterName>,
        value: T,
        vuid: &'static str,
    ) -> bool {
        self.greater_than(name, value, T::default(), vuid)
    }

    /// Reports that a command was used although the extension providing it is not enabled.
    pub(crate) fn require_device_extension(
        &mut self,
        enabled: bool,
        extension_name: &'static str,
    ) -> bool {
        if enabled {
            return false;
        }

        let api_name = self.api_name();
        self.report(
            Severity::Error,
            ObjectType::Unknown,
            0,
            vuid::EXTENSION_NOT_ENABLED,
            format_args!(
                "{}() called even though the {} extension was not enabled for this VkDevice.",
                api_name, extension_name,
            ),
        )
    }

    /// Checks the queue family list of a resource shared with `VK_SHARING_MODE_CONCURRENT`: it
    /// must name more than one family and the array must be present. Other sharing modes ignore
    /// the list.
    pub(crate) fn concurrent_sharing(
        &mut self,
        sharing_mode: vk::SharingMode,
        queue_family_index_count: u32,
        queue_family_indices: *const u32,
        count_vuid: &'static str,
        indices_vuid: &'static str,
    ) -> bool {
        if sharing_mode != vk::SharingMode::CONCURRENT {
            return false;
        }

        let api_name = self.api_name();
        let mut skip = false;

        if queue_family_index_count <= 1 {
            skip |= self.error_unattached(
                count_vuid,
                format_args!(
                    "{}: if pCreateInfo->sharingMode is VK_SHARING_MODE_CONCURRENT, \
                    pCreateInfo->queueFamilyIndexCount must be greater than 1.",
                    api_name,
                ),
            );
        }

        if queue_family_indices.is_null() {
            skip |= self.error_unattached(
                indices_vuid,
                format_args!(
                    "{}: if pCreateInfo->sharingMode is VK_SHARING_MODE_CONCURRENT, \
                    pCreateInfo->pQueueFamilyIndices must be a pointer to an array of \
                    pCreateInfo->queueFamilyIndexCount uint32_t values.",
                    api_name,
                ),
            );
        }

        skip
    }
}

/// Returns the bytes of the string before its terminator, or `None` if no terminator is found
/// within `max_length` bytes.
///
/// # Safety
///
/// - `string` must be valid for reads up to its terminator or `max_length` bytes.
unsafe fn bounded_c_str<'a>(string: *const c_char, max_length: usize) -> Option<&'a [u8]> {
    let bytes = string.cast::<u8>();
    let len = (0..max_length).find(|&i| unsafe { *bytes.add(i) } == 0)?;

    Some(unsafe { std::slice::from_raw_parts(bytes, len) })
}

#[cfg(test)]
mod tests {
    use super::{safe_modulo, FlagKind, MAX_STRING_LENGTH};
    use crate::{
        context::{ValidationContext, ValidatorConfig},
        diagnostics::{vuid, CollectingSink, Severity},
    };
    use ash::vk::{self, Handle};
    use std::{ffi::c_char, ptr, sync::Arc};

    fn harness() -> (Arc<CollectingSink>, ValidatorConfig) {
        let sink = Arc::new(CollectingSink::new());
        let config = ValidatorConfig {
            sink: sink.clone(),
            ..ValidatorConfig::default()
        };

        (sink, config)
    }

    #[test]
    fn required_pointer() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");

        assert!(ctx.required_pointer("pThing", ptr::null::<u32>(), "VUID-x"));
        assert!(!ctx.required_pointer("pThing", &5u32, "VUID-x"));

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].vuid, "VUID-x");
        assert_eq!(
            diagnostics[0].message,
            "vkTest: required parameter pThing specified as NULL.",
        );
    }

    #[test]
    fn array_pairing() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");
        let values = [1u32];

        ctx.array("count", "pValues", 0, ptr::null::<u32>(), true, true, "count", "array");
        ctx.array("count", "pValues", 2, ptr::null::<u32>(), false, true, "count", "array");
        ctx.array("count", "pValues", 1, values.as_ptr(), true, true, "count", "array");
        ctx.array("count", "pValues", 3, ptr::null::<u32>(), false, false, "count", "array");

        assert_eq!(sink.vuids(Severity::Error), ["count", "array"]);
    }

    #[test]
    fn array_with_count_ptr() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");
        let count = 4u32;

        unsafe {
            ctx.array_with_count_ptr(
                "pCount", "pValues", ptr::null(), ptr::null::<u32>(), true, false, false, "a", "b",
            );
            // Querying the count only.
            ctx.array_with_count_ptr(
                "pCount", "pValues", &count, ptr::null::<u32>(), true, false, true, "a", "b",
            );
        }

        assert_eq!(
            sink.vuids(Severity::Error),
            [vuid::REQUIRED_PARAMETER],
        );
    }

    #[test]
    fn handles() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");
        let handles = [vk::Sampler::from_raw(1), vk::Sampler::null(), vk::Sampler::null()];

        assert!(ctx.required_handle("sampler", vk::Sampler::null()));
        unsafe { ctx.handle_array("count", "pSamplers", 3, handles.as_ptr(), true, true) };

        assert_eq!(sink.error_count(), 3);
        assert!(sink.diagnostics()[2].message.ends_with("pSamplers[2] specified as VK_NULL_HANDLE"));
    }

    #[test]
    fn strings() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");

        let good = c"VK_KHR_swapchain";
        let control = c"VK_\x07bell";
        let bad_utf8 = [b'V', 0xc3, 0x28, 0];
        let long = [b'a' as c_char; MAX_STRING_LENGTH + 1];
        let mut exact = [b'a' as c_char; MAX_STRING_LENGTH];
        exact[MAX_STRING_LENGTH - 1] = 0;

        unsafe {
            assert!(!ctx.valid_string("name", "good", good.as_ptr()));
            assert!(!ctx.valid_string("name", "exact", exact.as_ptr()));
            assert!(ctx.valid_string("name", "control", control.as_ptr()));
            assert!(ctx.valid_string("name", "utf8", bad_utf8.as_ptr().cast()));
            assert!(ctx.valid_string("name", "long", long.as_ptr()));
            assert!(!ctx.valid_string("name", "null", ptr::null()));
        }

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics[2].message.contains("exceeds max length 256"));
    }

    #[test]
    fn struct_types() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");

        let good = vk::ImageCreateInfo::default();
        let mut bad = vk::ImageCreateInfo::default();
        bad.s_type = vk::StructureType::BUFFER_CREATE_INFO;
        let array = [good, bad, good];

        unsafe {
            ctx.struct_type("pCreateInfo", &good, true, "missing", "stype");
            ctx.struct_type("pCreateInfo", &bad, true, "missing", "stype");
            ctx.struct_type("pCreateInfo", ptr::null::<vk::ImageCreateInfo<'_>>(), true, "missing", "stype");
            ctx.struct_type_array(
                "count", "pInfos", 3, array.as_ptr(), true, true, "stype", "array", "count",
            );
        }

        assert_eq!(
            sink.vuids(Severity::Error),
            ["stype", "missing", "stype"],
        );
        assert_eq!(
            sink.diagnostics()[0].message,
            "vkTest: parameter pCreateInfo->sType must be VK_STRUCTURE_TYPE_IMAGE_CREATE_INFO.",
        );
    }

    #[test]
    fn bool32_is_a_warning() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");

        ctx.bool32("enable", vk::TRUE);
        ctx.bool32("enable", 2);

        assert!(!ctx.finish());
        assert_eq!(sink.vuids(Severity::Warning), [vuid::UNRECOGNIZED_VALUE]);
    }

    #[test]
    fn enums() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");
        let values = [vk::CompareOp::LESS, vk::CompareOp::from_raw(42)];

        assert!(!ctx.ranged_enum("op", vk::CompareOp::ALWAYS, "op"));
        assert!(ctx.ranged_enum("op", vk::CompareOp::from_raw(9), "op"));
        unsafe { ctx.ranged_enum_array("count", "pOps", 2, values.as_ptr(), true, true) };

        assert_eq!(
            sink.vuids(Severity::Error),
            ["op", vuid::UNRECOGNIZED_VALUE],
        );
    }

    #[test]
    fn flag_kinds() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");
        let samples = vk::SampleCountFlags::TYPE_1 | vk::SampleCountFlags::TYPE_4;

        ctx.flags("mask", vk::ColorComponentFlags::empty(), FlagKind::OptionalMask, "v", "z");
        ctx.flags("mask", vk::ColorComponentFlags::empty(), FlagKind::RequiredMask, "v", "z");
        ctx.flags("mask", vk::ColorComponentFlags::from_raw(0x10), FlagKind::OptionalMask, "v", "z");
        ctx.flags("samples", samples, FlagKind::RequiredSingleBit, "s", "z");
        ctx.flags("samples", vk::SampleCountFlags::empty(), FlagKind::RequiredSingleBit, "s", "z");
        ctx.flags("samples", vk::SampleCountFlags::empty(), FlagKind::OptionalSingleBit, "s", "z");

        assert_eq!(sink.vuids(Severity::Error), ["z", "v", "s", "s"]);
    }

    #[test]
    fn flag_arrays() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");
        let masks = [
            vk::ColorComponentFlags::R,
            vk::ColorComponentFlags::empty(),
            vk::ColorComponentFlags::from_raw(0x20),
        ];

        unsafe {
            ctx.flags_array("count", "pMasks", 3, masks.as_ptr(), true, false);
            ctx.flags_array("count", "pMasks", 3, masks.as_ptr(), true, true);
        }

        assert_eq!(
            sink.vuids(Severity::Error),
            [
                vuid::UNRECOGNIZED_VALUE,
                vuid::REQUIRED_PARAMETER,
                vuid::UNRECOGNIZED_VALUE,
            ],
        );
    }

    #[test]
    fn reserved_and_bounds() {
        let (sink, config) = harness();
        let mut ctx = ValidationContext::new(&config, "vkTest");

        ctx.reserved_flags("flags", 0, "r");
        ctx.reserved_flags("flags", 1, "r");
        ctx.greater_than_zero("size", 0u64, "g");
        ctx.greater_than_zero("size", 1u64, "g");
        ctx.greater_than("count", 3u32, 3, "g");

        assert_eq!(sink.vuids(Severity::Error), ["r", "g", "g"]);
        assert_eq!(
            sink.diagnostics()[1].message,
            "vkTest: parameter size (= 0) must be greater than 0",
        );
    }

    #[test]
    fn modulo() {
        assert_eq!(safe_modulo(10, 4), 2);
        assert_eq!(safe_modulo(10, 0), 0);
    }
}
