// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Device creation, and the state captured from it.

use crate::{
    chain,
    diagnostics::{vuid, ObjectType},
    extensions::{DeviceExtensions, ExtensionScope, InstanceExtensions},
    features::DeviceFeatures,
    ffi,
    properties::{
        MeshShaderProperties, PhysicalDeviceProperties, RayTracingProperties,
        ShadingRateImageProperties,
    },
    validator::{DeviceValidator, InstanceValidator},
    RecordError, Version,
};
use ash::vk;
use foldhash::HashSet;
use std::sync::Arc;

/// Everything that device-level validation consults. Written once, when the device is
/// recorded.
#[derive(Clone, Debug, Default)]
pub(crate) struct DeviceState {
    pub(crate) api_version: Version,
    pub(crate) instance_extensions: InstanceExtensions,
    pub(crate) extensions: DeviceExtensions,
    pub(crate) features: DeviceFeatures,
    pub(crate) limits: vk::PhysicalDeviceLimits,
    pub(crate) shading_rate_image: ShadingRateImageProperties,
    pub(crate) mesh_shader: MeshShaderProperties,
    pub(crate) ray_tracing: RayTracingProperties,
}

impl DeviceState {
    /// Returns whether viewports may have a negative height.
    #[inline]
    pub(crate) fn negative_viewport_height(&self) -> bool {
        self.api_version >= Version::V1_1
            || self.extensions.khr_maintenance1
            || self.extensions.amd_negative_viewport_height
    }
}

/// The structures that may be chained to `VkDeviceCreateInfo`.
const DEVICE_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    DeviceGroupDeviceCreateInfo,
    PhysicalDeviceFeatures2,
    PhysicalDevice16BitStorageFeatures,
    PhysicalDeviceMultiviewFeatures,
    PhysicalDeviceVariablePointersFeatures,
    PhysicalDeviceProtectedMemoryFeatures,
    PhysicalDeviceSamplerYcbcrConversionFeatures,
    PhysicalDeviceShaderDrawParametersFeatures,
    PhysicalDevice8BitStorageFeatures,
    PhysicalDeviceDescriptorIndexingFeatures,
    PhysicalDeviceScalarBlockLayoutFeatures,
    PhysicalDeviceBufferDeviceAddressFeatures,
    PhysicalDeviceImagelessFramebufferFeatures,
    PhysicalDeviceHostQueryResetFeatures,
    PhysicalDeviceTimelineSemaphoreFeatures,
    PhysicalDeviceInlineUniformBlockFeatures,
    PhysicalDeviceTransformFeedbackFeaturesEXT,
    PhysicalDeviceConditionalRenderingFeaturesEXT,
    PhysicalDeviceVertexAttributeDivisorFeaturesEXT,
    PhysicalDeviceLineRasterizationFeaturesEXT,
    PhysicalDeviceIndexTypeUint8FeaturesEXT,
    PhysicalDeviceMemoryPriorityFeaturesEXT,
    PhysicalDeviceBlendOperationAdvancedFeaturesEXT,
    PhysicalDeviceShadingRateImageFeaturesNV,
    PhysicalDeviceMeshShaderFeaturesNV,
    PhysicalDeviceExclusiveScissorFeaturesNV,
    PhysicalDeviceComputeShaderDerivativesFeaturesNV,
    PhysicalDeviceCornerSampledImageFeaturesNV,
    PhysicalDeviceRepresentativeFragmentTestFeaturesNV,
    PhysicalDeviceFragmentDensityMapFeaturesEXT,
    PhysicalDeviceVulkan11Features,
    PhysicalDeviceVulkan12Features,
    PhysicalDeviceVulkan13Features,
];

impl InstanceValidator {
    /// Validates the parameters of `vkCreateDevice`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_device(
        &self,
        physical_device: vk::PhysicalDevice,
        create_info: &vk::DeviceCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self.context("vkCreateDevice");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateDevice-pCreateInfo-parameter",
                "VUID-VkDeviceCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                DEVICE_CREATE_INFO_NEXT,
                "VUID-VkDeviceCreateInfo-pNext-pNext",
            )
        };
        ctx.reserved_flags(
            "pCreateInfo->flags",
            create_info.flags.as_raw(),
            "VUID-VkDeviceCreateInfo-flags-zerobitmask",
        );
        unsafe {
            ctx.struct_type_array(
                "pCreateInfo->queueCreateInfoCount",
                "pCreateInfo->pQueueCreateInfos",
                create_info.queue_create_info_count,
                create_info.p_queue_create_infos,
                true,
                true,
                "VUID-VkDeviceQueueCreateInfo-sType-sType",
                "VUID-VkDeviceCreateInfo-pQueueCreateInfos-parameter",
                "VUID-VkDeviceCreateInfo-queueCreateInfoCount-arraylength",
            )
        };
        unsafe {
            ctx.string_array(
                "pCreateInfo->enabledLayerCount",
                "pCreateInfo->ppEnabledLayerNames",
                create_info.enabled_layer_count,
                create_info.pp_enabled_layer_names,
                false,
                true,
                vuid::REQUIRED_PARAMETER,
                "VUID-VkDeviceCreateInfo-ppEnabledLayerNames-parameter",
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
                "VUID-VkDeviceCreateInfo-ppEnabledExtensionNames-parameter",
            )
        };

        let layer_names = unsafe {
            ffi::slice_or_empty(
                create_info.pp_enabled_layer_names,
                create_info.enabled_layer_count,
            )
        };

        for &name in layer_names {
            unsafe {
                ctx.valid_string(
                    "pCreateInfo->ppEnabledLayerNames",
                    "VUID-VkDeviceCreateInfo-ppEnabledLayerNames-parameter",
                    name,
                )
            };
        }

        let extension_names = unsafe {
            ffi::slice_or_empty(
                create_info.pp_enabled_extension_names,
                create_info.enabled_extension_count,
            )
        };
        let extensions = DeviceExtensions::from_names(unsafe {
            ffi::c_str_array(
                create_info.pp_enabled_extension_names,
                create_info.enabled_extension_count,
            )
        });

        for &name in extension_names {
            unsafe {
                ctx.valid_string(
                    "pCreateInfo->ppEnabledExtensionNames",
                    "VUID-VkDeviceCreateInfo-ppEnabledExtensionNames-parameter",
                    name,
                )
            };

            if name.is_null() {
                continue;
            }

            let name = unsafe { ffi::c_str_bytes(name) };
            let missing = extensions.missing_requirements(&self.extensions, name);
            ctx.extension_requirements(
                ExtensionScope::Device,
                name,
                &missing,
                "VUID-vkCreateDevice-ppEnabledExtensionNames-01387",
            );
        }

        if extensions.khr_maintenance1 && extensions.amd_negative_viewport_height {
            ctx.error_unattached(
                "VUID-VkDeviceCreateInfo-ppEnabledExtensionNames-00374",
                format_args!(
                    "VkDeviceCreateInfo->ppEnabledExtensionNames must not simultaneously \
                    include VK_KHR_maintenance1 and VK_AMD_negative_viewport_height.",
                ),
            );
        }

        let features2 = unsafe {
            chain::find_in_chain::<vk::PhysicalDeviceFeatures2<'_>>(create_info.p_next)
        };

        if features2.is_some() {
            if !create_info.p_enabled_features.is_null() {
                ctx.error_unattached(
                    vuid::INVALID_USAGE,
                    format_args!(
                        "VkDeviceCreateInfo->pNext includes a VkPhysicalDeviceFeatures2KHR \
                        struct when pCreateInfo->pEnabledFeatures is non-NULL.",
                    ),
                );
            }

            if !self.extensions.khr_get_physical_device_properties2 {
                ctx.error_unattached(
                    vuid::EXTENSION_NOT_ENABLED,
                    format_args!(
                        "VkDeviceCreateInfo->pNext includes a VkPhysicalDeviceFeatures2 struct, \
                        VK_KHR_get_physical_device_properties2 must be enabled when it creates \
                        an instance.",
                    ),
                );
            }
        }

        let vertex_attribute_divisor_features = unsafe {
            chain::find_in_chain::<vk::PhysicalDeviceVertexAttributeDivisorFeaturesEXT<'_>>(
                create_info.p_next,
            )
        };

        if vertex_attribute_divisor_features.is_some() && !extensions.ext_vertex_attribute_divisor
        {
            ctx.error_unattached(
                vuid::EXTENSION_NOT_ENABLED,
                format_args!(
                    "VkDeviceCreateInfo->pNext includes a \
                    VkPhysicalDeviceVertexAttributeDivisorFeaturesEXT struct, \
                    VK_EXT_vertex_attribute_divisor must be enabled when it creates a device.",
                ),
            );
        }

        let queue_create_infos = unsafe {
            ffi::slice_or_empty(
                create_info.p_queue_create_infos,
                create_info.queue_create_info_count,
            )
        };
        let mut queue_families = HashSet::default();

        for (index, queue_create_info) in queue_create_infos.iter().enumerate() {
            let queue_family_index = queue_create_info.queue_family_index;

            if queue_family_index == vk::QUEUE_FAMILY_IGNORED {
                ctx.error_for(
                    ObjectType::PhysicalDevice,
                    physical_device,
                    "VUID-VkDeviceQueueCreateInfo-queueFamilyIndex-00381",
                    format_args!(
                        "vkCreateDevice: pCreateInfo->pQueueCreateInfos[{}].queueFamilyIndex is \
                        VK_QUEUE_FAMILY_IGNORED, but it is required to provide a valid queue \
                        family index value.",
                        index,
                    ),
                );
            } else if !queue_families.insert(queue_family_index) {
                ctx.error_for(
                    ObjectType::PhysicalDevice,
                    physical_device,
                    "VUID-VkDeviceCreateInfo-queueFamilyIndex-00372",
                    format_args!(
                        "vkCreateDevice: pCreateInfo->pQueueCreateInfos[{}].queueFamilyIndex \
                        (={}) is not unique within pCreateInfo->pQueueCreateInfos array.",
                        index, queue_family_index,
                    ),
                );
            }

            ctx.array(
                param!("pCreateInfo->pQueueCreateInfos[%i].queueCount", index),
                param!("pCreateInfo->pQueueCreateInfos[%i].pQueuePriorities", index),
                queue_create_info.queue_count,
                queue_create_info.p_queue_priorities,
                true,
                true,
                "VUID-VkDeviceQueueCreateInfo-queueCount-arraylength",
                "VUID-VkDeviceQueueCreateInfo-pQueuePriorities-parameter",
            );

            let priorities = unsafe {
                ffi::slice_or_empty(
                    queue_create_info.p_queue_priorities,
                    queue_create_info.queue_count,
                )
            };

            for (priority_index, &priority) in priorities.iter().enumerate() {
                if !(0.0..=1.0).contains(&priority) {
                    ctx.error_for(
                        ObjectType::PhysicalDevice,
                        physical_device,
                        "VUID-VkDeviceQueueCreateInfo-pQueuePriorities-00383",
                        format_args!(
                            "vkCreateDevice: pCreateInfo->pQueueCreateInfos[{}]\
                            .pQueuePriorities[{}] (={}) is not between 0 and 1 (inclusive).",
                            index, priority_index, priority,
                        ),
                    );
                }
            }
        }

        ctx.finish()
    }

    /// Captures the state of a device created by `vkCreateDevice`, and returns the validator
    /// for its device-level calls.
    ///
    /// `properties` is what the driver reports for the physical device. Its extension records
    /// must be present for each of `VK_NV_shading_rate_image`, `VK_NV_mesh_shader` and
    /// `VK_NV_ray_tracing` that is enabled on the device.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn record_create_device(
        &self,
        create_info: &vk::DeviceCreateInfo<'_>,
        device: vk::Device,
        properties: &PhysicalDeviceProperties,
        result: vk::Result,
    ) -> Result<DeviceValidator, RecordError> {
        if result != vk::Result::SUCCESS {
            return Err(RecordError::CreationFailed { result });
        }

        let extensions = DeviceExtensions::from_names(unsafe {
            ffi::c_str_array(
                create_info.pp_enabled_extension_names,
                create_info.enabled_extension_count,
            )
        });

        let state = DeviceState {
            api_version: self.api_version.min(properties.api_version),
            instance_extensions: self.extensions,
            extensions,
            features: unsafe { DeviceFeatures::from_create_info(create_info) },
            limits: properties.limits,
            shading_rate_image: extension_properties(
                extensions.nv_shading_rate_image,
                properties.shading_rate_image,
                "VK_NV_shading_rate_image",
            )?,
            mesh_shader: extension_properties(
                extensions.nv_mesh_shader,
                properties.mesh_shader,
                "VK_NV_mesh_shader",
            )?,
            ray_tracing: extension_properties(
                extensions.nv_ray_tracing,
                properties.ray_tracing,
                "VK_NV_ray_tracing",
            )?,
        };

        log::debug!(
            "published state of {:?}: API version {}, extensions {:?}, feature structures {:?}",
            device,
            state.api_version,
            state.extensions,
            state.features.chain,
        );

        Ok(DeviceValidator::new(Arc::clone(&self.config), device, state))
    }
}

fn extension_properties<T: Default>(
    enabled: bool,
    properties: Option<T>,
    extension: &'static str,
) -> Result<T, RecordError> {
    match properties {
        Some(properties) => Ok(properties),
        None if enabled => Err(RecordError::MissingProperties { extension }),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        diagnostics::{vuid, CollectingSink},
        InstanceValidator, MeshShaderProperties, PhysicalDeviceProperties, RecordError,
        Severity, ValidatorCreateInfo, Version,
    };
    use ash::vk::{self, Handle};
    use std::{ffi::c_char, sync::Arc};

    fn instance_validator() -> (Arc<CollectingSink>, InstanceValidator) {
        let sink = Arc::new(CollectingSink::new());
        let validator = InstanceValidator::new(ValidatorCreateInfo {
            sink: sink.clone(),
            ..Default::default()
        });

        (sink, validator)
    }

    #[test]
    fn valid_device() {
        let (sink, validator) = instance_validator();

        let priorities = [1.0, 0.5];
        let queue_create_info = vk::DeviceQueueCreateInfo::default()
            .queue_family_index(0)
            .queue_priorities(&priorities);
        let extensions = [c"VK_KHR_maintenance1".as_ptr()];
        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .enabled_extension_names(&extensions);

        assert!(!unsafe { validator.validate_create_device(vk::PhysicalDevice::null(), &create_info) });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn queue_families() {
        let (sink, validator) = instance_validator();

        let priorities = [1.0];
        let bad_priorities = [1.5, -0.0];
        let queue_create_infos = [
            vk::DeviceQueueCreateInfo::default()
                .queue_family_index(1)
                .queue_priorities(&priorities),
            vk::DeviceQueueCreateInfo::default()
                .queue_family_index(1)
                .queue_priorities(&bad_priorities),
            vk::DeviceQueueCreateInfo::default()
                .queue_family_index(vk::QUEUE_FAMILY_IGNORED)
                .queue_priorities(&priorities),
        ];
        let create_info = vk::DeviceCreateInfo::default().queue_create_infos(&queue_create_infos);

        assert!(unsafe {
            validator.validate_create_device(vk::PhysicalDevice::from_raw(0x42), &create_info)
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkDeviceCreateInfo-queueFamilyIndex-00372",
                "VUID-VkDeviceQueueCreateInfo-pQueuePriorities-00383",
                "VUID-VkDeviceQueueCreateInfo-queueFamilyIndex-00381",
            ],
        );
        assert!(sink
            .diagnostics()
            .iter()
            .all(|d| d.object_type == crate::ObjectType::PhysicalDevice && d.object_handle == 0x42));
    }

    #[test]
    fn extension_rules() {
        let (sink, validator) = instance_validator();

        let priorities = [1.0];
        let queue_create_info = vk::DeviceQueueCreateInfo::default().queue_priorities(&priorities);
        let extensions: [*const c_char; 3] = [
            c"VK_KHR_maintenance1".as_ptr(),
            c"VK_AMD_negative_viewport_height".as_ptr(),
            c"VK_EXT_line_rasterization".as_ptr(),
        ];
        let mut divisor_features = vk::PhysicalDeviceVertexAttributeDivisorFeaturesEXT::default();
        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .enabled_extension_names(&extensions)
            .push_next(&mut divisor_features);

        assert!(unsafe { validator.validate_create_device(vk::PhysicalDevice::null(), &create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCreateDevice-ppEnabledExtensionNames-01387",
                "VUID-VkDeviceCreateInfo-ppEnabledExtensionNames-00374",
                vuid::EXTENSION_NOT_ENABLED,
            ],
        );
    }

    #[test]
    fn features2_rules() {
        let (sink, validator) = instance_validator();

        let priorities = [1.0];
        let queue_create_info = vk::DeviceQueueCreateInfo::default().queue_priorities(&priorities);
        let features = vk::PhysicalDeviceFeatures::default();
        let mut features2 = vk::PhysicalDeviceFeatures2::default();
        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .enabled_features(&features)
            .push_next(&mut features2);

        assert!(unsafe { validator.validate_create_device(vk::PhysicalDevice::null(), &create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [vuid::INVALID_USAGE, vuid::EXTENSION_NOT_ENABLED],
        );
    }

    #[test]
    fn features2_requires_properties2_extension() {
        let (sink, mut validator) = instance_validator();

        let application_info = vk::ApplicationInfo::default().api_version(vk::API_VERSION_1_1);
        let instance_create_info =
            vk::InstanceCreateInfo::default().application_info(&application_info);
        unsafe {
            validator.record_create_instance(&instance_create_info, vk::Result::SUCCESS)
        }
        .unwrap();

        let priorities = [1.0];
        let queue_create_info = vk::DeviceQueueCreateInfo::default().queue_priorities(&priorities);
        let mut features2 = vk::PhysicalDeviceFeatures2::default();
        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .push_next(&mut features2);

        assert!(unsafe { validator.validate_create_device(vk::PhysicalDevice::null(), &create_info) });
        assert_eq!(sink.vuids(Severity::Error), [vuid::EXTENSION_NOT_ENABLED]);
    }

    #[test]
    fn record() {
        let (_sink, mut validator) = instance_validator();

        let application_info = vk::ApplicationInfo::default().api_version(vk::API_VERSION_1_2);
        let instance_create_info =
            vk::InstanceCreateInfo::default().application_info(&application_info);
        unsafe {
            validator.record_create_instance(&instance_create_info, vk::Result::SUCCESS)
        }
        .unwrap();

        let extensions = [c"VK_NV_mesh_shader".as_ptr()];
        let mut features2 = vk::PhysicalDeviceFeatures2 {
            features: vk::PhysicalDeviceFeatures {
                multi_viewport: vk::TRUE,
                ..Default::default()
            },
            ..Default::default()
        };
        let create_info = vk::DeviceCreateInfo::default()
            .enabled_extension_names(&extensions)
            .push_next(&mut features2);

        let properties = PhysicalDeviceProperties {
            api_version: Version::V1_1,
            ..Default::default()
        };
        let error = unsafe {
            validator.record_create_device(
                &create_info,
                vk::Device::from_raw(1),
                &properties,
                vk::Result::SUCCESS,
            )
        }
        .unwrap_err();
        assert_eq!(
            error,
            RecordError::MissingProperties {
                extension: "VK_NV_mesh_shader",
            },
        );

        let properties = PhysicalDeviceProperties {
            mesh_shader: Some(MeshShaderProperties {
                max_draw_mesh_tasks_count: 64,
                ..Default::default()
            }),
            ..properties
        };
        let device = unsafe {
            validator.record_create_device(
                &create_info,
                vk::Device::from_raw(1),
                &properties,
                vk::Result::SUCCESS,
            )
        }
        .unwrap();

        assert_eq!(device.api_version(), Version::V1_1);
        assert!(device.enabled_extensions().nv_mesh_shader);
        assert!(device.enabled_features().core.multi_viewport);
        assert_eq!(device.state.mesh_shader.max_draw_mesh_tasks_count, 64);
        assert!(device.state.negative_viewport_height());

        assert!(unsafe {
            validator.record_create_device(
                &create_info,
                vk::Device::null(),
                &properties,
                vk::Result::ERROR_INITIALIZATION_FAILED,
            )
        }
        .is_err());
    }
}
