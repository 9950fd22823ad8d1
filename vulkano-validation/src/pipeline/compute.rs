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

const COMPUTE_PIPELINE_CREATE_INFO_NEXT: &[vk::StructureType] =
    stypes![PipelineCreationFeedbackCreateInfo];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateComputePipelines`.
    ///
    /// # Safety
    ///
    /// - `create_infos` must be null or valid for reads of `create_info_count` elements.
    /// - Every pointer reachable from the elements must be null or valid for reads.
    pub unsafe fn validate_create_compute_pipelines(
        &self,
        create_info_count: u32,
        create_infos: *const vk::ComputePipelineCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCreateComputePipelines")
            .with_object(ObjectType::Pipeline, vk::Pipeline::null());

        unsafe {
            ctx.struct_type_array(
                "createInfoCount",
                "pCreateInfos",
                create_info_count,
                create_infos,
                true,
                true,
                "VUID-VkComputePipelineCreateInfo-sType-sType",
                "VUID-vkCreateComputePipelines-pCreateInfos-parameter",
                "VUID-vkCreateComputePipelines-createInfoCount-arraylength",
            )
        };

        let create_infos = unsafe { ffi::slice_or_empty(create_infos, create_info_count) };

        for (index, create_info) in create_infos.iter().enumerate() {
            unsafe {
                ctx.struct_pnext(
                    param!("pCreateInfos[%i].pNext", index),
                    create_info.p_next,
                    COMPUTE_PIPELINE_CREATE_INFO_NEXT,
                    "VUID-VkComputePipelineCreateInfo-pNext-pNext",
                )
            };
            ctx.flags(
                param!("pCreateInfos[%i].flags", index),
                create_info.flags,
                FlagKind::OptionalMask,
                "VUID-VkComputePipelineCreateInfo-flags-parameter",
                vuid::NONE,
            );

            let stage: *const vk::PipelineShaderStageCreateInfo<'_> = &create_info.stage;
            unsafe {
                ctx.struct_type(
                    param!("pCreateInfos[%i].stage", index),
                    stage,
                    false,
                    vuid::UNDEFINED,
                    "VUID-VkPipelineShaderStageCreateInfo-sType-sType",
                )
            };
            unsafe {
                check_shader_stage(
                    &mut ctx,
                    &create_info.stage,
                    &stage_names!("pCreateInfos[%i].stage"),
                    &[index as u32],
                    "VUID-VkPipelineShaderStageCreateInfo-pName-parameter",
                )
            };

            ctx.required_handle(param!("pCreateInfos[%i].layout", index), create_info.layout);

            // A compute pipeline always has exactly one stage.
            unsafe {
                check_creation_feedback_count(
                    &mut ctx,
                    create_info.p_next,
                    index,
                    1,
                    "VkComputePipelineCreateInfo",
                    "VUID-VkPipelineCreationFeedbackCreateInfo-pipelineStageCreationFeedbackCount-02669",
                )
            };
        }

        ctx.finish()
    }
}
