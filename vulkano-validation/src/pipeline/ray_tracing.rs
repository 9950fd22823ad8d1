// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{check_creation_feedback_count, check_shader_stage, stage_names};
use crate::{
    checks::FlagKind,
    diagnostics::{vuid, ObjectType},
    ffi,
    validator::DeviceValidator,
};
use ash::vk;

const RAY_TRACING_PIPELINE_CREATE_INFO_NEXT: &[vk::StructureType] =
    stypes![PipelineCreationFeedbackCreateInfo];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateRayTracingPipelinesNV`.
    ///
    /// # Safety
    ///
    /// - `create_infos` must be null or valid for reads of `create_info_count` elements.
    /// - Every pointer reachable from the elements must be null or valid for reads.
    pub unsafe fn validate_create_ray_tracing_pipelines_nv(
        &self,
        create_info_count: u32,
        create_infos: *const vk::RayTracingPipelineCreateInfoNV<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCreateRayTracingPipelinesNV")
            .with_object(ObjectType::Pipeline, vk::Pipeline::null());

        ctx.require_device_extension(self.state.extensions.nv_ray_tracing, "VK_NV_ray_tracing");
        unsafe {
            ctx.struct_type_array(
                "createInfoCount",
                "pCreateInfos",
                create_info_count,
                create_infos,
                true,
                true,
                "VUID-VkRayTracingPipelineCreateInfoNV-sType-sType",
                "VUID-vkCreateRayTracingPipelinesNV-pCreateInfos-parameter",
                "VUID-vkCreateRayTracingPipelinesNV-createInfoCount-arraylength",
            )
        };

        let create_infos = unsafe { ffi::slice_or_empty(create_infos, create_info_count) };

        for (index, create_info) in create_infos.iter().enumerate() {
            unsafe {
                ctx.struct_pnext(
                    param!("pCreateInfos[%i].pNext", index),
                    create_info.p_next,
                    RAY_TRACING_PIPELINE_CREATE_INFO_NEXT,
                    "VUID-VkRayTracingPipelineCreateInfoNV-pNext-pNext",
                )
            };
            ctx.flags(
                param!("pCreateInfos[%i].flags", index),
                create_info.flags,
                FlagKind::OptionalMask,
                "VUID-VkRayTracingPipelineCreateInfoNV-flags-parameter",
                vuid::NONE,
            );
            unsafe {
                ctx.struct_type_array(
                    param!("pCreateInfos[%i].stageCount", index),
                    param!("pCreateInfos[%i].pStages", index),
                    create_info.stage_count,
                    create_info.p_stages,
                    true,
                    true,
                    "VUID-VkPipelineShaderStageCreateInfo-sType-sType",
                    "VUID-VkRayTracingPipelineCreateInfoNV-pStages-parameter",
                    "VUID-VkRayTracingPipelineCreateInfoNV-stageCount-arraylength",
                )
            };

            let stages =
                unsafe { ffi::slice_or_empty(create_info.p_stages, create_info.stage_count) };
            let names = stage_names!("pCreateInfos[%i].pStages[%i]");

            for (stage_index, stage) in stages.iter().enumerate() {
                unsafe {
                    check_shader_stage(
                        &mut ctx,
                        stage,
                        &names,
                        &[index as u32, stage_index as u32],
                        "VUID-VkPipelineShaderStageCreateInfo-pName-parameter",
                    )
                };
            }

            unsafe {
                ctx.struct_type_array(
                    param!("pCreateInfos[%i].groupCount", index),
                    param!("pCreateInfos[%i].pGroups", index),
                    create_info.group_count,
                    create_info.p_groups,
                    true,
                    true,
                    "VUID-VkRayTracingShaderGroupCreateInfoNV-sType-sType",
                    "VUID-VkRayTracingPipelineCreateInfoNV-pGroups-parameter",
                    "VUID-VkRayTracingPipelineCreateInfoNV-groupCount-arraylength",
                )
            };

            let groups =
                unsafe { ffi::slice_or_empty(create_info.p_groups, create_info.group_count) };

            for (group_index, group) in groups.iter().enumerate() {
                unsafe {
                    ctx.struct_pnext(
                        param!("pCreateInfos[%i].pGroups[%i].pNext", index, group_index),
                        group.p_next,
                        &[],
                        "VUID-VkRayTracingShaderGroupCreateInfoNV-pNext-pNext",
                    )
                };
                ctx.ranged_enum(
                    param!("pCreateInfos[%i].pGroups[%i].type", index, group_index),
                    group.ty,
                    "VUID-VkRayTracingShaderGroupCreateInfoNV-type-parameter",
                );
            }

            ctx.required_handle(param!("pCreateInfos[%i].layout", index), create_info.layout);

            unsafe {
                check_creation_feedback_count(
                    &mut ctx,
                    create_info.p_next,
                    index,
                    create_info.stage_count,
                    "VkRayTracingPipelineCreateInfoNV",
                    "VUID-VkPipelineCreationFeedbackCreateInfo-pipelineStageCreationFeedbackCount-02670",
                )
            };
        }

        ctx.finish()
    }
}
