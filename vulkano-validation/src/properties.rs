// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{chain, NonExhaustive, Version};
use ash::vk;

/// The properties of `VK_NV_shading_rate_image` that validation uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadingRateImageProperties {
    pub shading_rate_texel_size: [u32; 2],
    pub shading_rate_palette_size: u32,
    pub shading_rate_max_coarse_samples: u32,
}

impl From<&vk::PhysicalDeviceShadingRateImagePropertiesNV<'_>> for ShadingRateImageProperties {
    #[inline]
    fn from(val: &vk::PhysicalDeviceShadingRateImagePropertiesNV<'_>) -> Self {
        Self {
            shading_rate_texel_size: [
                val.shading_rate_texel_size.width,
                val.shading_rate_texel_size.height,
            ],
            shading_rate_palette_size: val.shading_rate_palette_size,
            shading_rate_max_coarse_samples: val.shading_rate_max_coarse_samples,
        }
    }
}

/// The properties of `VK_NV_mesh_shader` that validation uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshShaderProperties {
    pub max_draw_mesh_tasks_count: u32,
    pub max_task_work_group_invocations: u32,
    pub max_task_work_group_size: [u32; 3],
    pub max_mesh_work_group_invocations: u32,
    pub max_mesh_work_group_size: [u32; 3],
    pub max_mesh_output_vertices: u32,
    pub max_mesh_output_primitives: u32,
}

impl From<&vk::PhysicalDeviceMeshShaderPropertiesNV<'_>> for MeshShaderProperties {
    #[inline]
    fn from(val: &vk::PhysicalDeviceMeshShaderPropertiesNV<'_>) -> Self {
        Self {
            max_draw_mesh_tasks_count: val.max_draw_mesh_tasks_count,
            max_task_work_group_invocations: val.max_task_work_group_invocations,
            max_task_work_group_size: val.max_task_work_group_size,
            max_mesh_work_group_invocations: val.max_mesh_work_group_invocations,
            max_mesh_work_group_size: val.max_mesh_work_group_size,
            max_mesh_output_vertices: val.max_mesh_output_vertices,
            max_mesh_output_primitives: val.max_mesh_output_primitives,
        }
    }
}

/// The properties of `VK_NV_ray_tracing` that validation uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayTracingProperties {
    pub shader_group_handle_size: u32,
    pub max_recursion_depth: u32,
    pub max_shader_group_stride: u32,
    pub shader_group_base_alignment: u32,
    pub max_geometry_count: u64,
    pub max_instance_count: u64,
    pub max_triangle_count: u64,
    pub max_descriptor_set_acceleration_structures: u32,
}

impl From<&vk::PhysicalDeviceRayTracingPropertiesNV<'_>> for RayTracingProperties {
    #[inline]
    fn from(val: &vk::PhysicalDeviceRayTracingPropertiesNV<'_>) -> Self {
        Self {
            shader_group_handle_size: val.shader_group_handle_size,
            max_recursion_depth: val.max_recursion_depth,
            max_shader_group_stride: val.max_shader_group_stride,
            shader_group_base_alignment: val.shader_group_base_alignment,
            max_geometry_count: val.max_geometry_count,
            max_instance_count: val.max_instance_count,
            max_triangle_count: val.max_triangle_count,
            max_descriptor_set_acceleration_structures: val
                .max_descriptor_set_acceleration_structures,
        }
    }
}

/// What the driver reported about a physical device, as needed by validation.
///
/// The caller queries these with `vkGetPhysicalDeviceProperties2` before recording the creation
/// of a device. The extension records only need to be filled when their extension is enabled on
/// the device.
#[derive(Clone, Debug)]
pub struct PhysicalDeviceProperties {
    /// The API version supported by the physical device.
    ///
    /// The default value is [`Version::V1_0`].
    pub api_version: Version,

    /// The limits of the physical device.
    ///
    /// The default value is all zeroes, which makes most limit checks fail.
    pub limits: vk::PhysicalDeviceLimits,

    /// The properties of `VK_NV_shading_rate_image`.
    ///
    /// The default value is `None`.
    pub shading_rate_image: Option<ShadingRateImageProperties>,

    /// The properties of `VK_NV_mesh_shader`.
    ///
    /// The default value is `None`.
    pub mesh_shader: Option<MeshShaderProperties>,

    /// The properties of `VK_NV_ray_tracing`.
    ///
    /// The default value is `None`.
    pub ray_tracing: Option<RayTracingProperties>,

    pub _ne: NonExhaustive,
}

impl Default for PhysicalDeviceProperties {
    #[inline]
    fn default() -> Self {
        Self {
            api_version: Version::V1_0,
            limits: vk::PhysicalDeviceLimits::default(),
            shading_rate_image: None,
            mesh_shader: None,
            ray_tracing: None,
            _ne: NonExhaustive(()),
        }
    }
}

impl From<&vk::PhysicalDeviceProperties> for PhysicalDeviceProperties {
    #[inline]
    fn from(val: &vk::PhysicalDeviceProperties) -> Self {
        Self {
            api_version: Version::from_vulkan_version(val.api_version),
            limits: val.limits,
            ..Default::default()
        }
    }
}

impl PhysicalDeviceProperties {
    /// Builds the properties from the output of `vkGetPhysicalDeviceProperties2`, picking the
    /// extension records out of its `pNext` chain.
    ///
    /// # Safety
    ///
    /// - `properties.p_next` must be null or the head of a chain of readable Vulkan
    ///   structures.
    pub unsafe fn from_properties2(properties: &vk::PhysicalDeviceProperties2<'_>) -> Self {
        let next = properties.p_next.cast_const();

        Self {
            shading_rate_image: unsafe {
                chain::find_in_chain::<vk::PhysicalDeviceShadingRateImagePropertiesNV<'_>>(next)
            }
            .map(ShadingRateImageProperties::from),
            mesh_shader: unsafe {
                chain::find_in_chain::<vk::PhysicalDeviceMeshShaderPropertiesNV<'_>>(next)
            }
            .map(MeshShaderProperties::from),
            ray_tracing: unsafe {
                chain::find_in_chain::<vk::PhysicalDeviceRayTracingPropertiesNV<'_>>(next)
            }
            .map(RayTracingProperties::from),
            ..Self::from(&properties.properties)
        }
    }
}
