// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Instance creation and the other instance-level calls.

use crate::{
    checks::FlagKind,
    diagnostics::{vuid, ObjectType, Severity},
    extensions::{ExtensionScope, InstanceExtensions},
    ffi,
    validator::InstanceValidator,
    RecordError, Version,
};
use ash::vk;
use std::ffi::c_char;

const INSTANCE_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    DebugReportCallbackCreateInfoEXT,
    DebugUtilsMessengerCreateInfoEXT,
    ValidationFeaturesEXT,
    ValidationFlagsEXT,
];

/// Returns the API version requested by an instance creation. A missing application info or a
/// version of 0 both mean 1.0.
///
/// # Safety
///
/// - `create_info.p_application_info` must be null or valid for reads.
unsafe fn requested_api_version(create_info: &vk::InstanceCreateInfo<'_>) -> Version {
    match unsafe { ffi::as_ref(create_info.p_application_info) } {
        Some(application_info) if application_info.api_version != 0 => {
            Version::from_vulkan_version(application_info.api_version)
        }
        _ => Version::V1_0,
    }
}

impl InstanceValidator {
    /// Validates the parameters of `vkCreateInstance`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_instance(&self, create_info: &vk::InstanceCreateInfo<'_>) -> bool {
        let mut ctx = self.context("vkCreateInstance");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateInstance-pCreateInfo-parameter",
                "VUID-VkInstanceCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                INSTANCE_CREATE_INFO_NEXT,
                "VUID-VkInstanceCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkInstanceCreateInfo-flags-parameter",
            vuid::NONE,
        );
        unsafe {
            ctx.struct_type(
                "pCreateInfo->pApplicationInfo",
                create_info.p_application_info,
                false,
                "VUID-VkInstanceCreateInfo-pApplicationInfo-parameter",
                "VUID-VkApplicationInfo-sType-sType",
            )
        };

        if let Some(application_info) = unsafe { ffi::as_ref(create_info.p_application_info) } {
            unsafe {
                ctx.struct_pnext(
                    "pCreateInfo->pApplicationInfo->pNext",
                    application_info.p_next,
                    &[],
                    "VUID-VkApplicationInfo-pNext-pNext",
                )
            };
        }

        unsafe {
            ctx.string_array(
                "pCreateInfo->enabledLayerCount",
                "pCreateInfo->ppEnabledLayerNames",
                create_info.enabled_layer_count,
                create_info.pp_enabled_layer_names,
                false,
                true,
                vuid::REQUIRED_PARAMETER,
                "VUID-VkInstanceCreateInfo-ppEnabledLayerNames-parameter",
            )
        };
        unsafe {
            ctx.string_array(
                "pCreateInfo->enabledExtensionCount",
                "pCreateInfo->ppEnabledExtensionNames",
                create_info.enabled_extension_count,
                create_info.pp_enabled_extension_names,
                false,
                true,
                vuid::REQUIRED_PARAMETER,
                "VUID-VkInstanceCreateInfo-ppEnabledExtensionNames-parameter",
            )
        };

        let requested = unsafe { requested_api_version(create_info) };
        let effective = requested.effective();

        if requested.without_patch() != effective {
            let packed = requested.into_vulkan_version();

            if requested.without_patch() < Version::V1_0 {
                ctx.report(
                    Severity::Error,
                    ObjectType::Instance,
                    0,
                    vuid::UNDEFINED,
                    format_args!(
                        "Invalid CreateInstance->pCreateInfo->pApplicationInfo.apiVersion number \
                        ({:#010x}). Using VK_API_VERSION_{}_{}.",
                        packed, effective.major, effective.minor,
                    ),
                );
            } else {
                ctx.report(
                    Severity::Warning,
                    ObjectType::Instance,
                    0,
                    vuid::UNDEFINED,
                    format_args!(
                        "Unrecognized CreateInstance->pCreateInfo->pApplicationInfo.apiVersion \
                        number ({:#010x}). Assuming VK_API_VERSION_{}_{}.",
                        packed, effective.major, effective.minor,
                    ),
                );
            }
        }

        let extensions = InstanceExtensions::from_names(unsafe {
            ffi::c_str_array(
                create_info.pp_enabled_extension_names,
                create_info.enabled_extension_count,
            )
        });

        for name in unsafe {
            ffi::c_str_array(
                create_info.pp_enabled_extension_names,
                create_info.enabled_extension_count,
            )
        } {
            let name = name.to_bytes();
            let missing = extensions.missing_requirements(name);
            ctx.extension_requirements(
                ExtensionScope::Instance,
                name,
                &missing,
                "VUID-vkCreateInstance-ppEnabledExtensionNames-01388",
            );
        }

        ctx.finish()
    }

    /// Captures the enabled extensions and the effective API version of an instance created
    /// by `vkCreateInstance`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn record_create_instance(
        &mut self,
        create_info: &vk::InstanceCreateInfo<'_>,
        result: vk::Result,
    ) -> Result<(), RecordError> {
        if result != vk::Result::SUCCESS {
            return Err(RecordError::CreationFailed { result });
        }

        self.extensions = InstanceExtensions::from_names(unsafe {
            ffi::c_str_array(
                create_info.pp_enabled_extension_names,
                create_info.enabled_extension_count,
            )
        });
        self.api_version = unsafe { requested_api_version(create_info) }.effective();

        log::debug!(
            "published instance state: API version {}, extensions {:?}",
            self.api_version,
            self.extensions,
        );

        Ok(())
    }

    /// Validates the parameters of `vkEnumerateDeviceExtensionProperties`.
    ///
    /// # Safety
    ///
    /// - `property_count` must be null or valid for reads.
    /// - If `properties` is not null, it must be valid for reads of `*property_count`
    ///   elements.
    pub unsafe fn validate_enumerate_device_extension_properties(
        &self,
        _physical_device: vk::PhysicalDevice,
        layer_name: *const c_char,
        property_count: *const u32,
        properties: *const vk::ExtensionProperties,
    ) -> bool {
        let mut ctx = self.context("vkEnumerateDeviceExtensionProperties");

        unsafe {
            ctx.valid_string(
                "pLayerName",
                "VUID-vkEnumerateDeviceExtensionProperties-pLayerName-parameter",
                layer_name,
            )
        };
        unsafe {
            ctx.array_with_count_ptr(
                "pPropertyCount",
                "pProperties",
                property_count,
                properties,
                true,
                false,
                false,
                vuid::UNDEFINED,
                "VUID-vkEnumerateDeviceExtensionProperties-pProperties-parameter",
            )
        };

        if let Some(&count) = unsafe { ffi::as_ref(property_count) } {
            let properties = unsafe { ffi::slice_or_empty(properties, count) };

            for (index, property) in properties.iter().enumerate() {
                ctx.valid_fixed_string(
                    param!("pProperties[%i].extensionName", index),
                    "VUID-vkEnumerateDeviceExtensionProperties-pProperties-parameter",
                    &property.extension_name,
                );
            }
        }

        ctx.finish()
    }
}
