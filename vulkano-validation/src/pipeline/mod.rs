// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Validation of pipeline creation.
//!
//! Graphics pipelines carry most of the rules: which pieces of fixed-function state must be
//! present depends on the active shader stages, on whether rasterization is discarded, on the
//! dynamic states and on the attachments used by the subpass. Compute and ray tracing
//! pipelines share the shader stage and creation feedback checks.

use crate::{
    chain,
    checks::FlagKind,
    context::ValidationContext,
    diagnostics::{vuid, ObjectType},
    ffi,
    name::ParameterName,
};
use ash::vk;
use std::ffi::c_void;

mod coarse_sample_order;
mod compute;
mod graphics;
mod ray_tracing;
mod viewport;

const SHADER_STAGE_NEXT: &[vk::StructureType] =
    stypes![PipelineShaderStageRequiredSubgroupSizeCreateInfo];

/// The parameter names of the members of one `VkPipelineShaderStageCreateInfo`, as templates
/// sharing the indices of the stage.
pub(crate) struct StageNames {
    pub(crate) next: &'static str,
    pub(crate) flags: &'static str,
    pub(crate) stage: &'static str,
    pub(crate) module: &'static str,
    pub(crate) name: &'static str,
    pub(crate) map_entry_count: &'static str,
    pub(crate) map_entries: &'static str,
}

macro_rules! stage_names {
    ($base:literal) => {
        $crate::pipeline::StageNames {
            next: concat!($base, ".pNext"),
            flags: concat!($base, ".flags"),
            stage: concat!($base, ".stage"),
            module: concat!($base, ".module"),
            name: concat!($base, ".pName"),
            map_entry_count: concat!($base, ".pSpecializationInfo->mapEntryCount"),
            map_entries: concat!($base, ".pSpecializationInfo->pMapEntries"),
        }
    };
}
pub(crate) use stage_names;

/// Checks the members of a shader stage. The `sType` is checked by the caller, since stages
/// come both alone and in arrays.
///
/// # Safety
///
/// - Every pointer reachable from `stage` must be null or valid for reads.
pub(crate) unsafe fn check_shader_stage(
    ctx: &mut ValidationContext<'_>,
    stage: &vk::PipelineShaderStageCreateInfo<'_>,
    names: &StageNames,
    indices: &[u32],
    name_vuid: &'static str,
) {
    let name = |template| ParameterName::with_indices(template, indices);

    unsafe {
        ctx.struct_pnext(
            name(names.next),
            stage.p_next,
            SHADER_STAGE_NEXT,
            "VUID-VkPipelineShaderStageCreateInfo-pNext-pNext",
        )
    };
    ctx.flags(
        name(names.flags),
        stage.flags,
        FlagKind::OptionalMask,
        "VUID-VkPipelineShaderStageCreateInfo-flags-parameter",
        vuid::NONE,
    );
    ctx.flags(
        name(names.stage),
        stage.stage,
        FlagKind::RequiredSingleBit,
        "VUID-VkPipelineShaderStageCreateInfo-stage-parameter",
        vuid::NONE,
    );
    ctx.required_handle(name(names.module), stage.module);

    if !ctx.required_pointer(
        name(names.name),
        stage.p_name,
        "VUID-VkPipelineShaderStageCreateInfo-pName-parameter",
    ) {
        unsafe { ctx.valid_string(name(names.name), name_vuid, stage.p_name) };
    }

    if let Some(specialization) = unsafe { ffi::as_ref(stage.p_specialization_info) } {
        ctx.array(
            name(names.map_entry_count),
            name(names.map_entries),
            specialization.map_entry_count,
            specialization.p_map_entries,
            false,
            true,
            vuid::UNDEFINED,
            "VUID-VkSpecializationInfo-pMapEntries-parameter",
        );
    }
}

/// Returns the union of the stages of `stages`.
pub(crate) fn active_stages(stages: &[vk::PipelineShaderStageCreateInfo<'_>]) -> vk::ShaderStageFlags {
    stages
        .iter()
        .fold(vk::ShaderStageFlags::empty(), |union, stage| union | stage.stage)
}

/// Checks that a creation feedback structure in the chain of a pipeline create info has one
/// stage entry per shader stage.
///
/// # Safety
///
/// - `next` must be null or the head of a chain of readable Vulkan structures.
pub(crate) unsafe fn check_creation_feedback_count(
    ctx: &mut ValidationContext<'_>,
    next: *const c_void,
    index: usize,
    stage_count: u32,
    info_name: &'static str,
    vuid: &'static str,
) {
    let Some(feedback) = (unsafe { chain::find_in_chain::<vk::PipelineCreationFeedbackCreateInfo<'_>>(next) })
    else {
        return;
    };

    if feedback.pipeline_stage_creation_feedback_count != stage_count {
        let api_name = ctx.api_name();
        ctx.error_for(
            ObjectType::Pipeline,
            vk::Pipeline::null(),
            vuid,
            format_args!(
                "{}(): in pCreateInfo[{}], \
                VkPipelineCreationFeedbackCreateInfo::pipelineStageCreationFeedbackCount (={}) \
                must equal {}::stageCount (={}).",
                api_name, index, feedback.pipeline_stage_creation_feedback_count, info_name,
                stage_count,
            ),
        );
    }
}

/// The dynamic states of a graphics pipeline that change which static state is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DynamicStates {
    pub(crate) viewport: bool,
    pub(crate) scissor: bool,
    pub(crate) line_width: bool,
    pub(crate) viewport_w_scaling: bool,
    pub(crate) discard_rectangle: bool,
    pub(crate) sample_locations: bool,
    pub(crate) exclusive_scissor: bool,
    pub(crate) shading_rate_palette: bool,
    pub(crate) line_stipple: bool,
}

impl DynamicStates {
    pub(crate) fn from_states(states: &[vk::DynamicState]) -> Self {
        let mut dynamic = DynamicStates::default();

        for &state in states {
            match state {
                vk::DynamicState::VIEWPORT => dynamic.viewport = true,
                vk::DynamicState::SCISSOR => dynamic.scissor = true,
                vk::DynamicState::LINE_WIDTH => dynamic.line_width = true,
                vk::DynamicState::VIEWPORT_W_SCALING_NV => dynamic.viewport_w_scaling = true,
                vk::DynamicState::DISCARD_RECTANGLE_EXT => dynamic.discard_rectangle = true,
                vk::DynamicState::SAMPLE_LOCATIONS_EXT => dynamic.sample_locations = true,
                vk::DynamicState::EXCLUSIVE_SCISSOR_NV => dynamic.exclusive_scissor = true,
                vk::DynamicState::VIEWPORT_SHADING_RATE_PALETTE_NV => {
                    dynamic.shading_rate_palette = true
                }
                vk::DynamicState::LINE_STIPPLE_EXT => dynamic.line_stipple = true,
                _ => (),
            }
        }

        dynamic
    }
}

#[cfg(test)]
mod tests {
    use super::{active_stages, check_shader_stage, DynamicStates};
    use crate::{context::ValidatorConfig, diagnostics::CollectingSink, vuid, Severity};
    use ash::vk;
    use std::sync::Arc;

    #[test]
    fn dynamic_states() {
        let dynamic = DynamicStates::from_states(&[
            vk::DynamicState::SCISSOR,
            vk::DynamicState::BLEND_CONSTANTS,
            vk::DynamicState::LINE_STIPPLE_EXT,
        ]);

        assert_eq!(
            dynamic,
            DynamicStates {
                scissor: true,
                line_stipple: true,
                ..DynamicStates::default()
            },
        );
    }

    #[test]
    fn stage_union() {
        let stages = [
            vk::PipelineShaderStageCreateInfo::default().stage(vk::ShaderStageFlags::VERTEX),
            vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::TESSELLATION_EVALUATION),
        ];

        assert_eq!(
            active_stages(&stages),
            vk::ShaderStageFlags::VERTEX | vk::ShaderStageFlags::TESSELLATION_EVALUATION,
        );
    }

    #[test]
    fn shader_stage() {
        let sink = Arc::new(CollectingSink::new());
        let config = ValidatorConfig {
            sink: sink.clone(),
            ..ValidatorConfig::default()
        };
        let mut ctx = crate::context::ValidationContext::new(&config, "vkCreateComputePipelines");

        let stage = vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::VERTEX | vk::ShaderStageFlags::FRAGMENT)
            .module(vk::ShaderModule::null());
        unsafe {
            check_shader_stage(
                &mut ctx,
                &stage,
                &stage_names!("pCreateInfos[%i].stage"),
                &[0],
                "VUID-VkPipelineShaderStageCreateInfo-pName-parameter",
            )
        };

        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkPipelineShaderStageCreateInfo-stage-parameter",
                vuid::REQUIRED_PARAMETER,
                "VUID-VkPipelineShaderStageCreateInfo-pName-parameter",
            ],
        );
        assert_eq!(
            sink.diagnostics()[2].message,
            "vkCreateComputePipelines: required parameter pCreateInfos[0].stage.pName specified \
            as NULL.",
        );
    }
}
