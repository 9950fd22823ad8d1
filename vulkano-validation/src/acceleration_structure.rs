// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Validation of `VK_NV_ray_tracing` acceleration structures.
//!
//! The same `VkAccelerationStructureInfoNV` rules apply when an acceleration structure is
//! created and when it is built. Geometries are only inspected for bottom-level structures,
//! since a top-level structure has none.

use crate::{
    checks::{safe_modulo, FlagKind},
    context::ValidationContext,
    diagnostics::{vuid, ObjectType},
    ffi,
    name::ParameterName,
    validator::DeviceValidator,
};
use ash::vk;
use std::ffi::c_void;

/// Reported when the geometries of a bottom-level structure are not all of the same type. The
/// rule has no assigned VUID.
pub(crate) const GEOMETRY_TYPE_MISMATCH: &str = "UNASSIGNED-VkAccelerationStructureInfoNV-pGeometries";

/// The parameter names of the members of an acceleration structure info, as the info is
/// reached from different commands.
struct InfoNames {
    next: &'static str,
    ty: &'static str,
    flags: &'static str,
    geometry_count: &'static str,
    geometries: &'static str,
    geometry_type: &'static str,
    geometry_flags: &'static str,
}

macro_rules! info_names {
    ($base:literal) => {
        InfoNames {
            next: concat!($base, "->pNext"),
            ty: concat!($base, "->type"),
            flags: concat!($base, "->flags"),
            geometry_count: concat!($base, "->geometryCount"),
            geometries: concat!($base, "->pGeometries"),
            geometry_type: concat!($base, "->pGeometries[%i].geometryType"),
            geometry_flags: concat!($base, "->pGeometries[%i].flags"),
        }
    };
}

impl DeviceValidator {
    /// Validates the parameters of `vkCreateAccelerationStructureNV`.
    ///
    /// # Safety
    ///
    /// - `create_info` must be null or point to a valid structure, whose pointers must be null
    ///   or valid for reads.
    pub unsafe fn validate_create_acceleration_structure_nv(
        &self,
        create_info: *const vk::AccelerationStructureCreateInfoNV<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCreateAccelerationStructureNV")
            .with_object(
                ObjectType::AccelerationStructure,
                vk::AccelerationStructureNV::null(),
            );

        ctx.require_device_extension(self.state.extensions.nv_ray_tracing, "VK_NV_ray_tracing");
        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateAccelerationStructureNV-pCreateInfo-parameter",
                "VUID-VkAccelerationStructureCreateInfoNV-sType-sType",
            )
        };

        let Some(create_info) = (unsafe { ffi::as_ref(create_info) }) else {
            return ctx.finish();
        };

        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                &[],
                "VUID-VkAccelerationStructureCreateInfoNV-pNext-pNext",
            )
        };

        if create_info.compacted_size != 0
            && (create_info.info.geometry_count != 0 || create_info.info.instance_count != 0)
        {
            let api_name = ctx.api_name();
            ctx.error_unattached(
                "VUID-VkAccelerationStructureCreateInfoNV-compactedSize-02421",
                format_args!(
                    "{}(): pCreateInfo->compactedSize nonzero ({}) with info.geometryCount ({}) \
                    or info.instanceCount ({}) nonzero.",
                    api_name,
                    create_info.compacted_size,
                    create_info.info.geometry_count,
                    create_info.info.instance_count,
                ),
            );
        }

        let info: *const vk::AccelerationStructureInfoNV<'_> = &create_info.info;
        unsafe {
            self.check_acceleration_structure_info(
                &mut ctx,
                info,
                &info_names!("pCreateInfo->info"),
            )
        };

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdBuildAccelerationStructureNV`.
    ///
    /// # Safety
    ///
    /// - `info` must be null or point to a valid structure, whose pointers must be null or
    ///   valid for reads.
    pub unsafe fn validate_cmd_build_acceleration_structure_nv(
        &self,
        _command_buffer: vk::CommandBuffer,
        info: *const vk::AccelerationStructureInfoNV<'_>,
        _instance_data: vk::Buffer,
        _instance_offset: vk::DeviceSize,
        update: vk::Bool32,
        dst: vk::AccelerationStructureNV,
        _src: vk::AccelerationStructureNV,
        scratch: vk::Buffer,
        _scratch_offset: vk::DeviceSize,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdBuildAccelerationStructureNV")
            .with_object(ObjectType::AccelerationStructure, dst);

        ctx.require_device_extension(self.state.extensions.nv_ray_tracing, "VK_NV_ray_tracing");
        ctx.bool32("update", update);
        ctx.required_handle("dst", dst);
        ctx.required_handle("scratch", scratch);
        unsafe {
            ctx.struct_type(
                "pInfo",
                info,
                true,
                "VUID-vkCmdBuildAccelerationStructureNV-pInfo-parameter",
                "VUID-VkAccelerationStructureInfoNV-sType-sType",
            )
        };

        if !info.is_null() {
            unsafe { self.check_acceleration_structure_info(&mut ctx, info, &info_names!("pInfo")) };
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkGetAccelerationStructureHandleNV`.
    pub fn validate_get_acceleration_structure_handle_nv(
        &self,
        acceleration_structure: vk::AccelerationStructureNV,
        data_size: usize,
        data: *const c_void,
    ) -> bool {
        let mut ctx = self
            .context("vkGetAccelerationStructureHandleNV")
            .with_object(ObjectType::AccelerationStructure, acceleration_structure);

        ctx.require_device_extension(self.state.extensions.nv_ray_tracing, "VK_NV_ray_tracing");
        ctx.required_handle("accelerationStructure", acceleration_structure);
        ctx.required_pointer(
            "pData",
            data,
            "VUID-vkGetAccelerationStructureHandleNV-pData-parameter",
        );

        if data_size < 8 {
            let api_name = ctx.api_name();
            ctx.error(
                "VUID-vkGetAccelerationStructureHandleNV-dataSize-02240",
                format_args!(
                    "{}(): dataSize ({}) must be greater than or equal to 8.",
                    api_name, data_size,
                ),
            );
        }

        ctx.finish()
    }

    /// Checks an acceleration structure info. Errors are reported against the current object of
    /// `ctx`.
    ///
    /// # Safety
    ///
    /// - `info` must point to a valid structure, whose pointers must be null or valid for reads.
    unsafe fn check_acceleration_structure_info(
        &self,
        ctx: &mut ValidationContext<'_>,
        info: *const vk::AccelerationStructureInfoNV<'_>,
        names: &InfoNames,
    ) {
        let Some(info) = (unsafe { ffi::as_ref(info) }) else {
            return;
        };

        unsafe {
            ctx.struct_pnext(
                names.next,
                info.p_next,
                &[],
                "VUID-VkAccelerationStructureInfoNV-pNext-pNext",
            )
        };
        ctx.ranged_enum(
            names.ty,
            info.ty,
            "VUID-VkAccelerationStructureInfoNV-type-parameter",
        );
        ctx.flags(
            names.flags,
            info.flags,
            FlagKind::OptionalMask,
            "VUID-VkAccelerationStructureInfoNV-flags-parameter",
            vuid::NONE,
        );
        unsafe {
            ctx.struct_type_array(
                names.geometry_count,
                names.geometries,
                info.geometry_count,
                info.p_geometries,
                false,
                true,
                "VUID-VkGeometryNV-sType-sType",
                "VUID-VkAccelerationStructureInfoNV-pGeometries-parameter",
                vuid::UNDEFINED,
            )
        };

        let geometries = unsafe { ffi::slice_or_empty(info.p_geometries, info.geometry_count) };

        for (index, geometry) in geometries.iter().enumerate() {
            let indices = [index as u32];

            ctx.ranged_enum(
                ParameterName::with_indices(names.geometry_type, &indices),
                geometry.geometry_type,
                "VUID-VkGeometryNV-geometryType-parameter",
            );
            ctx.flags(
                ParameterName::with_indices(names.geometry_flags, &indices),
                geometry.flags,
                FlagKind::OptionalMask,
                "VUID-VkGeometryNV-flags-parameter",
                vuid::NONE,
            );
        }

        let properties = &self.state.ray_tracing;

        if info.ty == vk::AccelerationStructureTypeNV::TOP_LEVEL && info.geometry_count != 0 {
            ctx.error(
                "VUID-VkAccelerationStructureInfoNV-type-02425",
                format_args!(
                    "VkAccelerationStructureInfoNV: If type is \
                    VK_ACCELERATION_STRUCTURE_TYPE_TOP_LEVEL_NV then geometryCount must be 0.",
                ),
            );
        }

        if info.ty == vk::AccelerationStructureTypeNV::BOTTOM_LEVEL && info.instance_count != 0 {
            ctx.error(
                "VUID-VkAccelerationStructureInfoNV-type-02426",
                format_args!(
                    "VkAccelerationStructureInfoNV: If type is \
                    VK_ACCELERATION_STRUCTURE_TYPE_BOTTOM_LEVEL_NV then instanceCount must be 0.",
                ),
            );
        }

        if info.flags.contains(
            vk::BuildAccelerationStructureFlagsNV::PREFER_FAST_TRACE
                | vk::BuildAccelerationStructureFlagsNV::PREFER_FAST_BUILD,
        ) {
            ctx.error(
                "VUID-VkAccelerationStructureInfoNV-flags-02592",
                format_args!(
                    "VkAccelerationStructureInfoNV: If flags has the \
                    VK_BUILD_ACCELERATION_STRUCTURE_PREFER_FAST_TRACE_BIT_NV bit set, then it must \
                    not have the VK_BUILD_ACCELERATION_STRUCTURE_PREFER_FAST_BUILD_BIT_NV bit set.",
                ),
            );
        }

        if u64::from(info.geometry_count) > properties.max_geometry_count {
            ctx.error(
                "VUID-VkAccelerationStructureInfoNV-geometryCount-02422",
                format_args!(
                    "VkAccelerationStructureInfoNV: geometryCount ({}) must be less than or equal \
                    to VkPhysicalDeviceRayTracingPropertiesNV::maxGeometryCount ({}).",
                    info.geometry_count, properties.max_geometry_count,
                ),
            );
        }

        if u64::from(info.instance_count) > properties.max_instance_count {
            ctx.error(
                "VUID-VkAccelerationStructureInfoNV-instanceCount-02423",
                format_args!(
                    "VkAccelerationStructureInfoNV: instanceCount ({}) must be less than or equal \
                    to VkPhysicalDeviceRayTracingPropertiesNV::maxInstanceCount ({}).",
                    info.instance_count, properties.max_instance_count,
                ),
            );
        }

        if info.ty != vk::AccelerationStructureTypeNV::BOTTOM_LEVEL || geometries.is_empty() {
            return;
        }

        let api_name = ctx.api_name();
        let mut total_triangle_count = 0u64;

        for (index, geometry) in geometries.iter().enumerate() {
            match geometry.geometry_type {
                vk::GeometryTypeNV::TRIANGLES => {
                    let triangles = &geometry.geometry.triangles;
                    check_geometry_triangles(ctx, api_name, index, triangles);
                    total_triangle_count += u64::from(triangles.index_count / 3);
                }
                vk::GeometryTypeNV::AABBS => {
                    check_geometry_aabbs(ctx, api_name, index, &geometry.geometry.aabbs);
                }
                _ => (),
            }
        }

        if total_triangle_count > properties.max_triangle_count {
            ctx.error(
                "VUID-VkAccelerationStructureInfoNV-maxTriangleCount-02424",
                format_args!(
                    "VkAccelerationStructureInfoNV: The total number of triangles in all \
                    geometries ({}) must be less than or equal to \
                    VkPhysicalDeviceRayTracingPropertiesNV::maxTriangleCount ({}).",
                    total_triangle_count, properties.max_triangle_count,
                ),
            );
        }

        let first_type = geometries[0].geometry_type;

        for (index, geometry) in geometries.iter().enumerate().skip(1) {
            if geometry.geometry_type != first_type {
                ctx.error_for(
                    ObjectType::AccelerationStructure,
                    vk::AccelerationStructureNV::null(),
                    GEOMETRY_TYPE_MISMATCH,
                    format_args!(
                        "VkAccelerationStructureInfoNV: info.pGeometries[{}].geometryType does \
                        not match info.pGeometries[0].geometryType.",
                        index,
                    ),
                );
            }
        }
    }
}

fn check_geometry_triangles(
    ctx: &mut ValidationContext<'_>,
    api_name: &str,
    index: usize,
    triangles: &vk::GeometryTrianglesNV<'_>,
) {
    let vertex_component_size = match triangles.vertex_format {
        vk::Format::R32G32B32_SFLOAT | vk::Format::R32G32_SFLOAT => Some(4),
        vk::Format::R16G16B16_SFLOAT
        | vk::Format::R16G16B16_SNORM
        | vk::Format::R16G16_SFLOAT
        | vk::Format::R16G16_SNORM => Some(2),
        _ => None,
    };

    match vertex_component_size {
        None => {
            ctx.error(
                "VUID-VkGeometryTrianglesNV-vertexFormat-02430",
                format_args!(
                    "{}(): pGeometries[{}].geometry.triangles.vertexFormat ({:?}) is not a \
                    supported vertex format.",
                    api_name, index, triangles.vertex_format,
                ),
            );
        }
        Some(size) => {
            if safe_modulo(triangles.vertex_offset, size) != 0 {
                ctx.error(
                    "VUID-VkGeometryTrianglesNV-vertexOffset-02429",
                    format_args!(
                        "{}(): pGeometries[{}].geometry.triangles.vertexOffset ({}) is not a \
                        multiple of the component size of {:?} ({}).",
                        api_name, index, triangles.vertex_offset, triangles.vertex_format, size,
                    ),
                );
            }
        }
    }

    let index_size = match triangles.index_type {
        vk::IndexType::UINT32 => Some(4),
        vk::IndexType::UINT16 => Some(2),
        vk::IndexType::NONE_NV => Some(0),
        _ => None,
    };

    match index_size {
        None => {
            ctx.error(
                "VUID-VkGeometryTrianglesNV-indexType-02433",
                format_args!(
                    "{}(): pGeometries[{}].geometry.triangles.indexType ({:?}) must be \
                    VK_INDEX_TYPE_UINT16, VK_INDEX_TYPE_UINT32 or VK_INDEX_TYPE_NONE_NV.",
                    api_name, index, triangles.index_type,
                ),
            );
        }
        Some(size) => {
            if safe_modulo(triangles.index_offset, size) != 0 {
                ctx.error(
                    "VUID-VkGeometryTrianglesNV-indexOffset-02432",
                    format_args!(
                        "{}(): pGeometries[{}].geometry.triangles.indexOffset ({}) is not a \
                        multiple of the index size ({}).",
                        api_name, index, triangles.index_offset, size,
                    ),
                );
            }
        }
    }

    if triangles.index_type == vk::IndexType::NONE_NV {
        if triangles.index_count != 0 {
            ctx.error(
                "VUID-VkGeometryTrianglesNV-indexCount-02436",
                format_args!(
                    "{}(): pGeometries[{}].geometry.triangles.indexType is \
                    VK_INDEX_TYPE_NONE_NV, but indexCount ({}) is not 0.",
                    api_name, index, triangles.index_count,
                ),
            );
        }

        if triangles.index_data != vk::Buffer::null() {
            ctx.error(
                "VUID-VkGeometryTrianglesNV-indexData-02434",
                format_args!(
                    "{}(): pGeometries[{}].geometry.triangles.indexType is \
                    VK_INDEX_TYPE_NONE_NV, but indexData is not VK_NULL_HANDLE.",
                    api_name, index,
                ),
            );
        }
    }

    if safe_modulo(triangles.transform_offset, 16) != 0 {
        ctx.error(
            "VUID-VkGeometryTrianglesNV-transformOffset-02438",
            format_args!(
                "{}(): pGeometries[{}].geometry.triangles.transformOffset ({}) is not a multiple \
                of 16.",
                api_name, index, triangles.transform_offset,
            ),
        );
    }
}

fn check_geometry_aabbs(
    ctx: &mut ValidationContext<'_>,
    api_name: &str,
    index: usize,
    aabbs: &vk::GeometryAABBNV<'_>,
) {
    if safe_modulo(aabbs.offset, 8) != 0 {
        ctx.error(
            "VUID-VkGeometryAABBNV-offset-02440",
            format_args!(
                "{}(): pGeometries[{}].geometry.aabbs.offset ({}) is not a multiple of 8.",
                api_name, index, aabbs.offset,
            ),
        );
    }

    if safe_modulo(u64::from(aabbs.stride), 8) != 0 {
        ctx.error(
            "VUID-VkGeometryAABBNV-stride-02441",
            format_args!(
                "{}(): pGeometries[{}].geometry.aabbs.stride ({}) is not a multiple of 8.",
                api_name, index, aabbs.stride,
            ),
        );
    }
}
