// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    active_stages, check_creation_feedback_count, check_shader_stage, stage_names, DynamicStates,
};
use crate::{
    chain,
    checks::FlagKind,
    context::ValidationContext,
    diagnostics::{vuid, ObjectType},
    ffi,
    name::ParameterName,
    validator::DeviceValidator,
};
use ash::vk;
use foldhash::HashSet;

const GRAPHICS_PIPELINE_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    PipelineCreationFeedbackCreateInfo,
    PipelineDiscardRectangleStateCreateInfoEXT,
    PipelineRepresentativeFragmentTestStateCreateInfoNV,
];

const TESSELLATION_STATE_NEXT: &[vk::StructureType] =
    stypes![PipelineTessellationDomainOriginStateCreateInfo];

const VERTEX_INPUT_STATE_NEXT: &[vk::StructureType] =
    stypes![PipelineVertexInputDivisorStateCreateInfoEXT];

const RASTERIZATION_STATE_NEXT: &[vk::StructureType] = stypes![
    PipelineRasterizationConservativeStateCreateInfoEXT,
    PipelineRasterizationDepthClipStateCreateInfoEXT,
    PipelineRasterizationLineStateCreateInfoEXT,
    PipelineRasterizationStateRasterizationOrderAMD,
    PipelineRasterizationStateStreamCreateInfoEXT,
];

const VIEWPORT_STATE_NEXT: &[vk::StructureType] = stypes![
    PipelineViewportSwizzleStateCreateInfoNV,
    PipelineViewportWScalingStateCreateInfoNV,
    PipelineViewportExclusiveScissorStateCreateInfoNV,
    PipelineViewportShadingRateImageStateCreateInfoNV,
    PipelineViewportCoarseSampleOrderStateCreateInfoNV,
];

const MULTISAMPLE_STATE_NEXT: &[vk::StructureType] = stypes![
    PipelineCoverageModulationStateCreateInfoNV,
    PipelineCoverageToColorStateCreateInfoNV,
    PipelineSampleLocationsStateCreateInfoEXT,
];

const COLOR_BLEND_STATE_NEXT: &[vk::StructureType] =
    stypes![PipelineColorBlendAdvancedStateCreateInfoEXT];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateGraphicsPipelines`.
    ///
    /// Which pieces of state are looked at follows the rules of the API: tessellation state
    /// only with both tessellation stages, vertex input and input assembly only without a mesh
    /// shader, and viewport, multisample, depth-stencil and color blend state only when
    /// rasterization is enabled. The depth-stencil and color blend states are only required if
    /// the subpass uses the corresponding attachments, which is known for render passes whose
    /// creation was recorded.
    ///
    /// # Safety
    ///
    /// - `create_infos` must be null or valid for reads of `create_info_count` elements.
    /// - Every pointer reachable from the elements must be null or valid for reads.
    pub unsafe fn validate_create_graphics_pipelines(
        &self,
        create_info_count: u32,
        create_infos: *const vk::GraphicsPipelineCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCreateGraphicsPipelines")
            .with_object(ObjectType::Pipeline, vk::Pipeline::null());

        unsafe {
            ctx.struct_type_array(
                "createInfoCount",
                "pCreateInfos",
                create_info_count,
                create_infos,
                true,
                true,
                "VUID-VkGraphicsPipelineCreateInfo-sType-sType",
                "VUID-vkCreateGraphicsPipelines-pCreateInfos-parameter",
                "VUID-vkCreateGraphicsPipelines-createInfoCount-arraylength",
            )
        };

        let create_infos = unsafe { ffi::slice_or_empty(create_infos, create_info_count) };

        for (index, create_info) in create_infos.iter().enumerate() {
            unsafe { self.validate_graphics_pipeline_create_info(&mut ctx, index, create_info) };
        }

        ctx.finish()
    }

    unsafe fn validate_graphics_pipeline_create_info(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        create_info: &vk::GraphicsPipelineCreateInfo<'_>,
    ) {
        unsafe {
            ctx.struct_pnext(
                param!("pCreateInfos[%i].pNext", index),
                create_info.p_next,
                GRAPHICS_PIPELINE_CREATE_INFO_NEXT,
                "VUID-VkGraphicsPipelineCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            param!("pCreateInfos[%i].flags", index),
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkGraphicsPipelineCreateInfo-flags-parameter",
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
                "VUID-VkGraphicsPipelineCreateInfo-pStages-parameter",
                "VUID-VkGraphicsPipelineCreateInfo-stageCount-arraylength",
            )
        };

        let stages = unsafe { ffi::slice_or_empty(create_info.p_stages, create_info.stage_count) };
        let names = stage_names!("pCreateInfos[%i].pStages[%i]");

        for (stage_index, stage) in stages.iter().enumerate() {
            unsafe {
                check_shader_stage(
                    ctx,
                    stage,
                    &names,
                    &[index as u32, stage_index as u32],
                    "VUID-VkGraphicsPipelineCreateInfo-pStages-parameter",
                )
            };
        }

        ctx.required_handle(param!("pCreateInfos[%i].layout", index), create_info.layout);
        ctx.required_handle(
            param!("pCreateInfos[%i].renderPass", index),
            create_info.render_pass,
        );

        let dynamic = unsafe { check_dynamic_state(ctx, index, create_info.p_dynamic_state) };

        unsafe {
            check_creation_feedback_count(
                ctx,
                create_info.p_next,
                index,
                create_info.stage_count,
                "VkGraphicsPipelineCreateInfo",
                "VUID-VkPipelineCreationFeedbackCreateInfo-pipelineStageCreationFeedbackCount-02668",
            )
        };

        let active_stages = active_stages(stages);

        if active_stages.contains(
            vk::ShaderStageFlags::TESSELLATION_CONTROL | vk::ShaderStageFlags::TESSELLATION_EVALUATION,
        ) {
            unsafe { self.check_tessellation_state(ctx, index, create_info.p_tessellation_state) };
        }

        if !active_stages.contains(vk::ShaderStageFlags::MESH_NV) {
            unsafe { check_input_assembly_state(ctx, index, create_info.p_input_assembly_state) };
            unsafe { self.check_vertex_input_state(ctx, index, create_info.p_vertex_input_state) };
        }

        let rasterization =
            unsafe { check_rasterization_state(ctx, index, create_info.p_rasterization_state) };

        if let Some(rasterization) =
            rasterization.filter(|state| state.rasterizer_discard_enable == vk::FALSE)
        {
            unsafe { self.check_viewport_state(ctx, index, create_info.p_viewport_state, &dynamic) };
            unsafe {
                self.check_multisample_state(
                    ctx,
                    index,
                    create_info.p_multisample_state,
                    rasterization,
                    &dynamic,
                )
            };

            // Render passes created before the validator existed are treated as using nothing.
            let (uses_color, uses_depth_stencil) = self
                .render_passes
                .subpass(create_info.render_pass, create_info.subpass)
                .unwrap_or((false, false));

            if uses_depth_stencil {
                unsafe { check_depth_stencil_state(ctx, index, create_info.p_depth_stencil_state) };
            }

            if uses_color {
                unsafe { check_color_blend_state(ctx, index, create_info.p_color_blend_state) };
            }
        }

        check_derivative(ctx, create_info);

        if let Some(rasterization) = rasterization {
            self.check_polygon_mode(ctx, rasterization);

            if !dynamic.line_width
                && !self.state.features.core.wide_lines
                && rasterization.line_width != 1.0
            {
                let api_name = ctx.api_name();
                ctx.error(
                    "VUID-VkGraphicsPipelineCreateInfo-pDynamicStates-00749",
                    format_args!(
                        "{}: the line width state is static (pCreateInfos[{1}].pDynamicState->\
                        pDynamicStates does not contain VK_DYNAMIC_STATE_LINE_WIDTH) and \
                        VkPhysicalDeviceFeatures::wideLines is disabled, but \
                        pCreateInfos[{1}].pRasterizationState->lineWidth (={2}) is not 1.0.",
                        api_name, index, rasterization.line_width,
                    ),
                );
            }
        }
    }

    unsafe fn check_tessellation_state(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        tessellation_state: *const vk::PipelineTessellationStateCreateInfo<'_>,
    ) {
        let api_name = ctx.api_name();

        let Some(tessellation) = (unsafe { ffi::as_ref(tessellation_state) }) else {
            ctx.error_unattached(
                "VUID-VkGraphicsPipelineCreateInfo-pStages-00731",
                format_args!(
                    "{0}: if pCreateInfos[{1}].pStages includes a tessellation control shader \
                    stage and a tessellation evaluation shader stage, \
                    pCreateInfos[{1}].pTessellationState must not be NULL.",
                    api_name, index,
                ),
            );
            return;
        };

        unsafe {
            ctx.struct_type(
                param!("pCreateInfos[%i].pTessellationState", index),
                tessellation_state,
                false,
                vuid::UNDEFINED,
                "VUID-VkPipelineTessellationStateCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                param!("pCreateInfos[%i].pTessellationState->pNext", index),
                tessellation.p_next,
                TESSELLATION_STATE_NEXT,
                "VUID-VkPipelineTessellationStateCreateInfo-pNext-pNext",
            )
        };
        ctx.reserved_flags(
            param!("pCreateInfos[%i].pTessellationState->flags", index),
            tessellation.flags.as_raw(),
            "VUID-VkPipelineTessellationStateCreateInfo-flags-zerobitmask",
        );

        let max_patch_size = self.state.limits.max_tessellation_patch_size;

        if tessellation.patch_control_points == 0
            || tessellation.patch_control_points > max_patch_size
        {
            ctx.error_unattached(
                "VUID-VkPipelineTessellationStateCreateInfo-patchControlPoints-01214",
                format_args!(
                    "{}: invalid parameter pCreateInfos[{}].pTessellationState->\
                    patchControlPoints value {}. patchControlPoints should be >0 and <={}.",
                    api_name, index, tessellation.patch_control_points, max_patch_size,
                ),
            );
        }
    }

    unsafe fn check_vertex_input_state(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        vertex_input_state: *const vk::PipelineVertexInputStateCreateInfo<'_>,
    ) {
        let api_name = ctx.api_name();

        let Some(vertex_input) = (unsafe { ffi::as_ref(vertex_input_state) }) else {
            ctx.error_unattached(
                "VUID-VkGraphicsPipelineCreateInfo-pStages-02097",
                format_args!(
                    "{0}: pCreateInfos[{1}].pStages does not include a mesh shader stage, but \
                    pCreateInfos[{1}].pVertexInputState is NULL.",
                    api_name, index,
                ),
            );
            return;
        };

        if vertex_input.flags.as_raw() != 0 {
            ctx.error_unattached(
                "VUID-VkPipelineVertexInputStateCreateInfo-flags-zerobitmask",
                format_args!(
                    "{}: parameter pCreateInfos[{}].pVertexInputState->flags ({}) is reserved \
                    and must be zero.",
                    api_name,
                    index,
                    vertex_input.flags.as_raw(),
                ),
            );
        }

        unsafe {
            ctx.struct_pnext(
                param!("pCreateInfos[%i].pVertexInputState->pNext", index),
                vertex_input.p_next,
                VERTEX_INPUT_STATE_NEXT,
                "VUID-VkPipelineVertexInputStateCreateInfo-pNext-pNext",
            )
        };
        unsafe {
            ctx.struct_type(
                param!("pCreateInfos[%i].pVertexInputState", index),
                vertex_input_state,
                false,
                vuid::UNDEFINED,
                "VUID-VkPipelineVertexInputStateCreateInfo-sType-sType",
            )
        };
        ctx.array(
            param!("pCreateInfos[%i].pVertexInputState->vertexBindingDescriptionCount", index),
            param!("pCreateInfos[%i].pVertexInputState->pVertexBindingDescriptions", index),
            vertex_input.vertex_binding_description_count,
            vertex_input.p_vertex_binding_descriptions,
            false,
            true,
            vuid::UNDEFINED,
            "VUID-VkPipelineVertexInputStateCreateInfo-pVertexBindingDescriptions-parameter",
        );
        ctx.array(
            param!("pCreateInfos[%i].pVertexInputState->vertexAttributeDescriptionCount", index),
            param!("pCreateInfos[%i].pVertexInputState->pVertexAttributeDescriptions", index),
            vertex_input.vertex_attribute_description_count,
            vertex_input.p_vertex_attribute_descriptions,
            false,
            true,
            vuid::UNDEFINED,
            "VUID-VkPipelineVertexInputStateCreateInfo-pVertexAttributeDescriptions-parameter",
        );

        let bindings = unsafe {
            ffi::slice_or_empty(
                vertex_input.p_vertex_binding_descriptions,
                vertex_input.vertex_binding_description_count,
            )
        };
        let attributes = unsafe {
            ffi::slice_or_empty(
                vertex_input.p_vertex_attribute_descriptions,
                vertex_input.vertex_attribute_description_count,
            )
        };

        for (binding_index, binding) in bindings.iter().enumerate() {
            ctx.ranged_enum(
                param!(
                    "pCreateInfos[%i].pVertexInputState->pVertexBindingDescriptions[%i].inputRate",
                    index,
                    binding_index,
                ),
                binding.input_rate,
                "VUID-VkVertexInputBindingDescription-inputRate-parameter",
            );
        }

        for (attribute_index, attribute) in attributes.iter().enumerate() {
            ctx.ranged_enum(
                param!(
                    "pCreateInfos[%i].pVertexInputState->pVertexAttributeDescriptions[%i].format",
                    index,
                    attribute_index,
                ),
                attribute.format,
                "VUID-VkVertexInputAttributeDescription-format-parameter",
            );
        }

        let limits = &self.state.limits;

        if vertex_input.vertex_binding_description_count > limits.max_vertex_input_bindings {
            ctx.error_unattached(
                "VUID-VkPipelineVertexInputStateCreateInfo-vertexBindingDescriptionCount-00613",
                format_args!(
                    "{}: parameter pCreateInfos[{}].pVertexInputState->\
                    vertexBindingDescriptionCount ({}) is greater than \
                    VkPhysicalDeviceLimits::maxVertexInputBindings ({}).",
                    api_name,
                    index,
                    vertex_input.vertex_binding_description_count,
                    limits.max_vertex_input_bindings,
                ),
            );
        }

        if vertex_input.vertex_attribute_description_count > limits.max_vertex_input_attributes {
            ctx.error_unattached(
                "VUID-VkPipelineVertexInputStateCreateInfo-vertexAttributeDescriptionCount-00614",
                format_args!(
                    "{}: parameter pCreateInfos[{}].pVertexInputState->\
                    vertexAttributeDescriptionCount ({}) is greater than \
                    VkPhysicalDeviceLimits::maxVertexInputAttributes ({}).",
                    api_name,
                    index,
                    vertex_input.vertex_attribute_description_count,
                    limits.max_vertex_input_attributes,
                ),
            );
        }

        let mut declared_bindings = HashSet::default();

        for (binding_index, binding) in bindings.iter().enumerate() {
            if !declared_bindings.insert(binding.binding) {
                ctx.error_unattached(
                    "VUID-VkPipelineVertexInputStateCreateInfo-pVertexBindingDescriptions-00616",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexBindingDescriptions[{}].binding ({}) is not distinct.",
                        api_name, index, binding_index, binding.binding,
                    ),
                );
            }

            if binding.binding >= limits.max_vertex_input_bindings {
                ctx.error_unattached(
                    "VUID-VkVertexInputBindingDescription-binding-00618",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexBindingDescriptions[{}].binding ({}) is greater than or equal to \
                        VkPhysicalDeviceLimits::maxVertexInputBindings ({}).",
                        api_name,
                        index,
                        binding_index,
                        binding.binding,
                        limits.max_vertex_input_bindings,
                    ),
                );
            }

            if binding.stride > limits.max_vertex_input_binding_stride {
                ctx.error_unattached(
                    "VUID-VkVertexInputBindingDescription-stride-00619",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexBindingDescriptions[{}].stride ({}) is greater than \
                        VkPhysicalDeviceLimits::maxVertexInputBindingStride ({}).",
                        api_name,
                        index,
                        binding_index,
                        binding.stride,
                        limits.max_vertex_input_binding_stride,
                    ),
                );
            }
        }

        let mut locations = HashSet::default();

        for (attribute_index, attribute) in attributes.iter().enumerate() {
            if !locations.insert(attribute.location) {
                ctx.error_unattached(
                    "VUID-VkPipelineVertexInputStateCreateInfo-pVertexAttributeDescriptions-00617",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexAttributeDescriptions[{}].location ({}) is not distinct.",
                        api_name, index, attribute_index, attribute.location,
                    ),
                );
            }

            if !declared_bindings.contains(&attribute.binding) {
                ctx.error_unattached(
                    "VUID-VkPipelineVertexInputStateCreateInfo-binding-00615",
                    format_args!(
                        "{0}: parameter pCreateInfos[{1}].pVertexInputState->\
                        pVertexAttributeDescriptions[{2}].binding ({3}) does not exist in any \
                        pCreateInfos[{1}].pVertexInputState->pVertexBindingDescriptions.",
                        api_name, index, attribute_index, attribute.binding,
                    ),
                );
            }

            if attribute.location >= limits.max_vertex_input_attributes {
                ctx.error_unattached(
                    "VUID-VkVertexInputAttributeDescription-location-00620",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexAttributeDescriptions[{}].location ({}) is greater than or equal \
                        to VkPhysicalDeviceLimits::maxVertexInputAttributes ({}).",
                        api_name,
                        index,
                        attribute_index,
                        attribute.location,
                        limits.max_vertex_input_attributes,
                    ),
                );
            }

            if attribute.binding >= limits.max_vertex_input_bindings {
                ctx.error_unattached(
                    "VUID-VkVertexInputAttributeDescription-binding-00621",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexAttributeDescriptions[{}].binding ({}) is greater than or equal \
                        to VkPhysicalDeviceLimits::maxVertexInputBindings ({}).",
                        api_name,
                        index,
                        attribute_index,
                        attribute.binding,
                        limits.max_vertex_input_bindings,
                    ),
                );
            }

            if attribute.offset > limits.max_vertex_input_attribute_offset {
                ctx.error_unattached(
                    "VUID-VkVertexInputAttributeDescription-offset-00622",
                    format_args!(
                        "{}: parameter pCreateInfos[{}].pVertexInputState->\
                        pVertexAttributeDescriptions[{}].offset ({}) is greater than \
                        VkPhysicalDeviceLimits::maxVertexInputAttributeOffset ({}).",
                        api_name,
                        index,
                        attribute_index,
                        attribute.offset,
                        limits.max_vertex_input_attribute_offset,
                    ),
                );
            }
        }
    }

    unsafe fn check_viewport_state(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        viewport_state: *const vk::PipelineViewportStateCreateInfo<'_>,
        dynamic: &DynamicStates,
    ) {
        let api_name = ctx.api_name();

        let Some(viewport_state) = (unsafe { ffi::as_ref(viewport_state) }) else {
            ctx.error(
                "VUID-VkGraphicsPipelineCreateInfo-rasterizerDiscardEnable-00750",
                format_args!(
                    "{0}: rasterization is enabled (pCreateInfos[{1}].pRasterizationState->\
                    rasterizerDiscardEnable is VK_FALSE), but pCreateInfos[{1}].pViewportState \
                    (=NULL) is not a valid pointer.",
                    api_name, index,
                ),
            );
            return;
        };

        if viewport_state.s_type != vk::StructureType::PIPELINE_VIEWPORT_STATE_CREATE_INFO {
            ctx.error(
                "VUID-VkPipelineViewportStateCreateInfo-sType-sType",
                format_args!(
                    "{}: pCreateInfos[{}].pViewportState->sType is not \
                    VK_STRUCTURE_TYPE_PIPELINE_VIEWPORT_STATE_CREATE_INFO.",
                    api_name, index,
                ),
            );
        }

        unsafe {
            ctx.struct_pnext(
                param!("pCreateInfos[%i].pViewportState->pNext", index),
                viewport_state.p_next,
                VIEWPORT_STATE_NEXT,
                "VUID-VkPipelineViewportStateCreateInfo-pNext-pNext",
            )
        };
        ctx.reserved_flags(
            param!("pCreateInfos[%i].pViewportState->flags", index),
            viewport_state.flags.as_raw(),
            "VUID-VkPipelineViewportStateCreateInfo-flags-zerobitmask",
        );

        let next = viewport_state.p_next;
        let exclusive_scissor = unsafe {
            chain::find_in_chain::<vk::PipelineViewportExclusiveScissorStateCreateInfoNV<'_>>(next)
        };
        let shading_rate_image = unsafe {
            chain::find_in_chain::<vk::PipelineViewportShadingRateImageStateCreateInfoNV<'_>>(next)
        };
        let coarse_sample_order = unsafe {
            chain::find_in_chain::<vk::PipelineViewportCoarseSampleOrderStateCreateInfoNV<'_>>(next)
        };
        let swizzle =
            unsafe { chain::find_in_chain::<vk::PipelineViewportSwizzleStateCreateInfoNV<'_>>(next) };

        let max_viewports = self.state.limits.max_viewports;
        let viewport_count = viewport_state.viewport_count;
        let scissor_count = viewport_state.scissor_count;

        if self.state.features.core.multi_viewport {
            if viewport_count == 0 {
                ctx.error(
                    "VUID-VkPipelineViewportStateCreateInfo-viewportCount-arraylength",
                    format_args!(
                        "{}: pCreateInfos[{}].pViewportState->viewportCount is 0.",
                        api_name, index,
                    ),
                );
            } else if viewport_count > max_viewports {
                ctx.error(
                    "VUID-VkPipelineViewportStateCreateInfo-viewportCount-01218",
                    format_args!(
                        "{}: pCreateInfos[{}].pViewportState->viewportCount (={}) is greater \
                        than VkPhysicalDeviceLimits::maxViewports (={}).",
                        api_name, index, viewport_count, max_viewports,
                    ),
                );
            }

            if scissor_count == 0 {
                ctx.error(
                    "VUID-VkPipelineViewportStateCreateInfo-scissorCount-arraylength",
                    format_args!(
                        "{}: pCreateInfos[{}].pViewportState->scissorCount is 0.",
                        api_name, index,
                    ),
                );
            } else if scissor_count > max_viewports {
                ctx.error(
                    "VUID-VkPipelineViewportStateCreateInfo-scissorCount-01219",
                    format_args!(
                        "{}: pCreateInfos[{}].pViewportState->scissorCount (={}) is greater \
                        than VkPhysicalDeviceLimits::maxViewports (={}).",
                        api_name, index, scissor_count, max_viewports,
                    ),
                );
            }
        } else {
            if viewport_count != 1 {
                ctx.error(
                    "VUID-VkPipelineViewportStateCreateInfo-viewportCount-01216",
                    format_args!(
                        "{}: the VkPhysicalDeviceFeatures::multiViewport feature is disabled, \
                        but pCreateInfos[{}].pViewportState->viewportCount (={}) is not 1.",
                        api_name, index, viewport_count,
                    ),
                );
            }

            if scissor_count != 1 {
                ctx.error(
                    "VUID-VkPipelineViewportStateCreateInfo-scissorCount-01217",
                    format_args!(
                        "{}: the VkPhysicalDeviceFeatures::multiViewport feature is disabled, \
                        but pCreateInfos[{}].pViewportState->scissorCount (={}) is not 1.",
                        api_name, index, scissor_count,
                    ),
                );
            }

            if let Some(exclusive_scissor) =
                exclusive_scissor.filter(|state| state.exclusive_scissor_count > 1)
            {
                ctx.error(
                    "VUID-VkPipelineViewportExclusiveScissorStateCreateInfoNV-exclusiveScissorCount-02027",
                    format_args!(
                        "{}: the VkPhysicalDeviceFeatures::multiViewport feature is disabled, \
                        but pCreateInfos[{}] \
                        VkPipelineViewportExclusiveScissorStateCreateInfoNV::\
                        exclusiveScissorCount (={}) is not 1.",
                        api_name, index, exclusive_scissor.exclusive_scissor_count,
                    ),
                );
            }

            if let Some(shading_rate_image) =
                shading_rate_image.filter(|state| state.viewport_count > 1)
            {
                ctx.error(
                    "VUID-VkPipelineViewportShadingRateImageStateCreateInfoNV-viewportCount-02054",
                    format_args!(
                        "{}: the VkPhysicalDeviceFeatures::multiViewport feature is disabled, \
                        but pCreateInfos[{}] \
                        VkPipelineViewportShadingRateImageStateCreateInfoNV::viewportCount (={}) \
                        is neither 0 nor 1.",
                        api_name, index, shading_rate_image.viewport_count,
                    ),
                );
            }
        }

        if let Some(exclusive_scissor) = exclusive_scissor {
            let count = exclusive_scissor.exclusive_scissor_count;

            if count > max_viewports {
                ctx.error(
                    "VUID-VkPipelineViewportExclusiveScissorStateCreateInfoNV-exclusiveScissorCount-02028",
                    format_args!(
                        "{}: pCreateInfos[{}] exclusiveScissorCount (={}) is greater than \
                        VkPhysicalDeviceLimits::maxViewports (={}).",
                        api_name, index, count, max_viewports,
                    ),
                );
            }
        }

        if let Some(shading_rate_image) = shading_rate_image {
            if shading_rate_image.viewport_count > max_viewports {
                ctx.error(
                    "VUID-VkPipelineViewportShadingRateImageStateCreateInfoNV-viewportCount-02055",
                    format_args!(
                        "{}: pCreateInfos[{}] VkPipelineViewportShadingRateImageStateCreateInfoNV \
                        viewportCount (={}) is greater than VkPhysicalDeviceLimits::maxViewports \
                        (={}).",
                        api_name, index, shading_rate_image.viewport_count, max_viewports,
                    ),
                );
            }
        }

        if scissor_count != viewport_count {
            ctx.error(
                "VUID-VkPipelineViewportStateCreateInfo-scissorCount-01220",
                format_args!(
                    "{0}: pCreateInfos[{1}].pViewportState->scissorCount (={2}) is not identical \
                    to pCreateInfos[{1}].pViewportState->viewportCount (={3}).",
                    api_name, index, scissor_count, viewport_count,
                ),
            );
        }

        if let Some(exclusive_scissor) = exclusive_scissor {
            let count = exclusive_scissor.exclusive_scissor_count;

            if count != 0 && count != viewport_count {
                ctx.error(
                    "VUID-VkPipelineViewportExclusiveScissorStateCreateInfoNV-exclusiveScissorCount-02029",
                    format_args!(
                        "{0}: pCreateInfos[{1}] exclusiveScissorCount (={2}) must be zero or \
                        identical to pCreateInfos[{1}].pViewportState->viewportCount (={3}).",
                        api_name, index, count, viewport_count,
                    ),
                );
            }
        }

        if let Some(shading_rate_image) = shading_rate_image {
            if shading_rate_image.shading_rate_image_enable != vk::FALSE
                && shading_rate_image.viewport_count != viewport_count
            {
                ctx.error(
                    "VUID-VkPipelineViewportShadingRateImageStateCreateInfoNV-shadingRateImageEnable-02056",
                    format_args!(
                        "{0}: if shadingRateImageEnable is enabled, pCreateInfos[{1}] \
                        VkPipelineViewportShadingRateImageStateCreateInfoNV viewportCount (={2}) \
                        must be identical to pCreateInfos[{1}].pViewportState->viewportCount \
                        (={3}).",
                        api_name, index, shading_rate_image.viewport_count, viewport_count,
                    ),
                );
            }
        }

        if !dynamic.viewport && viewport_count > 0 && viewport_state.p_viewports.is_null() {
            ctx.error(
                "VUID-VkGraphicsPipelineCreateInfo-pDynamicStates-00747",
                format_args!(
                    "{0}: the viewport state is static (pCreateInfos[{1}].pDynamicState->\
                    pDynamicStates does not contain VK_DYNAMIC_STATE_VIEWPORT), but \
                    pCreateInfos[{1}].pViewportState->pViewports (=NULL) is an invalid pointer.",
                    api_name, index,
                ),
            );
        }

        if !dynamic.scissor && scissor_count > 0 && viewport_state.p_scissors.is_null() {
            ctx.error(
                "VUID-VkGraphicsPipelineCreateInfo-pDynamicStates-00748",
                format_args!(
                    "{0}: the scissor state is static (pCreateInfos[{1}].pDynamicState->\
                    pDynamicStates does not contain VK_DYNAMIC_STATE_SCISSOR), but \
                    pCreateInfos[{1}].pViewportState->pScissors (=NULL) is an invalid pointer.",
                    api_name, index,
                ),
            );
        }

        if let Some(exclusive_scissor) = exclusive_scissor {
            if !dynamic.exclusive_scissor
                && exclusive_scissor.exclusive_scissor_count > 0
                && exclusive_scissor.p_exclusive_scissors.is_null()
            {
                ctx.error(
                    "VUID-VkPipelineViewportExclusiveScissorStateCreateInfoNV-pDynamicStates-02030",
                    format_args!(
                        "{0}: the exclusive scissor state is static (pCreateInfos[{1}].\
                        pDynamicState->pDynamicStates does not contain \
                        VK_DYNAMIC_STATE_EXCLUSIVE_SCISSOR_NV), but pCreateInfos[{1}] \
                        pExclusiveScissors (=NULL) is an invalid pointer.",
                        api_name, index,
                    ),
                );
            }
        }

        if let Some(shading_rate_image) = shading_rate_image {
            if !dynamic.shading_rate_palette
                && shading_rate_image.viewport_count > 0
                && shading_rate_image.p_shading_rate_palettes.is_null()
            {
                ctx.error(
                    "VUID-VkPipelineViewportShadingRateImageStateCreateInfoNV-pDynamicStates-02057",
                    format_args!(
                        "{0}: the shading rate palette state is static (pCreateInfos[{1}].\
                        pDynamicState->pDynamicStates does not contain \
                        VK_DYNAMIC_STATE_VIEWPORT_SHADING_RATE_PALETTE_NV), but \
                        pCreateInfos[{1}] pShadingRatePalettes (=NULL) is an invalid pointer.",
                        api_name, index,
                    ),
                );
            }
        }

        if let Some(swizzle) = swizzle {
            if swizzle.viewport_count != viewport_count {
                ctx.error(
                    "VUID-VkPipelineViewportSwizzleStateCreateInfoNV-viewportCount-01215",
                    format_args!(
                        "{}: the viewport swizzle state viewport count of {} does not match the \
                        viewport count of {} in VkPipelineViewportStateCreateInfo.",
                        api_name, swizzle.viewport_count, viewport_count,
                    ),
                );
            }
        }

        if !dynamic.viewport {
            let viewports =
                unsafe { ffi::slice_or_empty(viewport_state.p_viewports, viewport_count) };

            for (viewport_index, viewport) in viewports.iter().enumerate() {
                self.check_viewport(
                    ctx,
                    viewport,
                    &param!(
                        "pCreateInfos[%i].pViewportState->pViewports[%i]",
                        index,
                        viewport_index,
                    ),
                    ObjectType::Pipeline,
                    0,
                );
            }
        }

        let extensions = &self.state.extensions;

        for (used, enabled, token, extension) in [
            (
                dynamic.viewport_w_scaling,
                extensions.nv_clip_space_w_scaling,
                "VK_DYNAMIC_STATE_VIEWPORT_W_SCALING_NV",
                "VK_NV_clip_space_w_scaling",
            ),
            (
                dynamic.discard_rectangle,
                extensions.ext_discard_rectangles,
                "VK_DYNAMIC_STATE_DISCARD_RECTANGLE_EXT",
                "VK_EXT_discard_rectangles",
            ),
            (
                dynamic.sample_locations,
                extensions.ext_sample_locations,
                "VK_DYNAMIC_STATE_SAMPLE_LOCATIONS_EXT",
                "VK_EXT_sample_locations",
            ),
            (
                dynamic.exclusive_scissor,
                extensions.nv_scissor_exclusive,
                "VK_DYNAMIC_STATE_EXCLUSIVE_SCISSOR_NV",
                "VK_NV_scissor_exclusive",
            ),
        ] {
            if used && !enabled {
                ctx.error(
                    vuid::EXTENSION_NOT_ENABLED,
                    format_args!(
                        "{}: pCreateInfos[{}].pDynamicState->pDynamicStates contains {}, but the \
                        {} extension is not enabled.",
                        api_name, index, token, extension,
                    ),
                );
            }
        }

        if let Some(coarse_sample_order) = coarse_sample_order {
            if coarse_sample_order.sample_order_type != vk::CoarseSampleOrderTypeNV::CUSTOM
                && coarse_sample_order.custom_sample_order_count != 0
            {
                ctx.error(
                    "VUID-VkPipelineViewportCoarseSampleOrderStateCreateInfoNV-sampleOrderType-02072",
                    format_args!(
                        "{}: pCreateInfos[{}] VkPipelineViewportCoarseSampleOrderStateCreateInfoNV \
                        sampleOrderType is not VK_COARSE_SAMPLE_ORDER_TYPE_CUSTOM_NV and \
                        customSampleOrderCount is not 0.",
                        api_name, index,
                    ),
                );
            }

            let orders = unsafe {
                ffi::slice_or_empty(
                    coarse_sample_order.p_custom_sample_orders,
                    coarse_sample_order.custom_sample_order_count,
                )
            };

            for (order_index, order) in orders.iter().enumerate() {
                unsafe {
                    self.check_coarse_sample_order(
                        ctx,
                        order,
                        &param!(
                            "pCreateInfos[%i].pViewportState->pNext<\
                            VkPipelineViewportCoarseSampleOrderStateCreateInfoNV>.\
                            pCustomSampleOrders[%i]",
                            index,
                            order_index,
                        ),
                    )
                };
            }
        }
    }

    unsafe fn check_multisample_state(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        multisample_state: *const vk::PipelineMultisampleStateCreateInfo<'_>,
        rasterization: &vk::PipelineRasterizationStateCreateInfo<'_>,
        dynamic: &DynamicStates,
    ) {
        let api_name = ctx.api_name();

        let Some(multisample) = (unsafe { ffi::as_ref(multisample_state) }) else {
            ctx.error_unattached(
                "VUID-VkGraphicsPipelineCreateInfo-rasterizerDiscardEnable-00751",
                format_args!(
                    "{0}: if pCreateInfos[{1}].pRasterizationState->rasterizerDiscardEnable is \
                    VK_FALSE, pCreateInfos[{1}].pMultisampleState must not be NULL.",
                    api_name, index,
                ),
            );
            return;
        };

        unsafe {
            ctx.struct_pnext(
                param!("pCreateInfos[%i].pMultisampleState->pNext", index),
                multisample.p_next,
                MULTISAMPLE_STATE_NEXT,
                "VUID-VkPipelineMultisampleStateCreateInfo-pNext-pNext",
            )
        };
        ctx.reserved_flags(
            param!("pCreateInfos[%i].pMultisampleState->flags", index),
            multisample.flags.as_raw(),
            "VUID-VkPipelineMultisampleStateCreateInfo-flags-zerobitmask",
        );
        ctx.bool32(
            param!("pCreateInfos[%i].pMultisampleState->sampleShadingEnable", index),
            multisample.sample_shading_enable,
        );
        ctx.flags(
            param!("pCreateInfos[%i].pMultisampleState->rasterizationSamples", index),
            multisample.rasterization_samples,
            FlagKind::RequiredSingleBit,
            "VUID-VkPipelineMultisampleStateCreateInfo-rasterizationSamples-parameter",
            vuid::NONE,
        );
        ctx.bool32(
            param!("pCreateInfos[%i].pMultisampleState->alphaToCoverageEnable", index),
            multisample.alpha_to_coverage_enable,
        );
        ctx.bool32(
            param!("pCreateInfos[%i].pMultisampleState->alphaToOneEnable", index),
            multisample.alpha_to_one_enable,
        );

        if multisample.s_type != vk::StructureType::PIPELINE_MULTISAMPLE_STATE_CREATE_INFO {
            ctx.error_unattached(
                vuid::INVALID_STRUCT_STYPE,
                format_args!(
                    "{}: parameter pCreateInfos[{}].pMultisampleState->sType must be \
                    VK_STRUCTURE_TYPE_PIPELINE_MULTISAMPLE_STATE_CREATE_INFO",
                    api_name, index,
                ),
            );
        }

        if multisample.sample_shading_enable == vk::TRUE {
            if !self.state.features.core.sample_rate_shading {
                ctx.error_unattached(
                    "VUID-VkPipelineMultisampleStateCreateInfo-sampleShadingEnable-00784",
                    format_args!(
                        "{}(): parameter pCreateInfos[{}].pMultisampleState->\
                        sampleShadingEnable is VK_TRUE, but the sampleRateShading feature is \
                        not enabled.",
                        api_name, index,
                    ),
                );
            }

            if !(0.0..=1.0).contains(&multisample.min_sample_shading) {
                ctx.error_unattached(
                    "VUID-VkPipelineMultisampleStateCreateInfo-minSampleShading-00786",
                    format_args!(
                        "{}(): parameter pCreateInfos[{}].pMultisampleState->minSampleShading \
                        (={}) is not in the range [0.0, 1.0].",
                        api_name, index, multisample.min_sample_shading,
                    ),
                );
            }
        }

        let Some(line_state) = (unsafe {
            chain::find_in_chain::<vk::PipelineRasterizationLineStateCreateInfoEXT<'_>>(
                rasterization.p_next,
            )
        }) else {
            return;
        };

        let mode = line_state.line_rasterization_mode;

        if matches!(
            mode,
            vk::LineRasterizationModeEXT::BRESENHAM | vk::LineRasterizationModeEXT::RECTANGULAR_SMOOTH
        ) {
            for (enabled, member) in [
                (multisample.alpha_to_coverage_enable, "alphaToCoverageEnable"),
                (multisample.alpha_to_one_enable, "alphaToOneEnable"),
                (multisample.sample_shading_enable, "sampleShadingEnable"),
            ] {
                if enabled != vk::FALSE {
                    ctx.error_unattached(
                        "VUID-VkGraphicsPipelineCreateInfo-lineRasterizationMode-02766",
                        format_args!(
                            "{}(): Bresenham/Smooth line rasterization not supported with \
                            pCreateInfos[{}].pMultisampleState->{} == VK_TRUE.",
                            api_name, index, member,
                        ),
                    );
                }
            }
        }

        let stippled = line_state.stippled_line_enable != vk::FALSE;

        if stippled
            && !dynamic.line_stipple
            && !(1..=256).contains(&line_state.line_stipple_factor)
        {
            ctx.error_unattached(
                "VUID-VkGraphicsPipelineCreateInfo-stippledLineEnable-02767",
                format_args!(
                    "{}(): pCreateInfos[{}] lineStippleFactor = {} must be in the range [1,256].",
                    api_name, index, line_state.line_stipple_factor,
                ),
            );
        }

        let features = self
            .state
            .features
            .get::<vk::PhysicalDeviceLineRasterizationFeaturesEXT<'static>>()
            .unwrap_or_default();

        let (mode_name, supported, mode_vuid, stipple_supported, stipple_vuid, stipple_feature) =
            match mode {
                vk::LineRasterizationModeEXT::RECTANGULAR => (
                    "VK_LINE_RASTERIZATION_MODE_RECTANGULAR_EXT requires the rectangularLines \
                    feature",
                    features.rectangular_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-lineRasterizationMode-02768",
                    features.stippled_rectangular_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-stippledLineEnable-02771",
                    "VK_LINE_RASTERIZATION_MODE_RECTANGULAR_EXT with stipple requires the \
                    stippledRectangularLines feature",
                ),
                vk::LineRasterizationModeEXT::BRESENHAM => (
                    "VK_LINE_RASTERIZATION_MODE_BRESENHAM_EXT requires the bresenhamLines feature",
                    features.bresenham_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-lineRasterizationMode-02769",
                    features.stippled_bresenham_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-stippledLineEnable-02772",
                    "VK_LINE_RASTERIZATION_MODE_BRESENHAM_EXT with stipple requires the \
                    stippledBresenhamLines feature",
                ),
                vk::LineRasterizationModeEXT::RECTANGULAR_SMOOTH => (
                    "VK_LINE_RASTERIZATION_MODE_RECTANGULAR_SMOOTH_EXT requires the smoothLines \
                    feature",
                    features.smooth_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-lineRasterizationMode-02770",
                    features.stippled_smooth_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-stippledLineEnable-02773",
                    "VK_LINE_RASTERIZATION_MODE_RECTANGULAR_SMOOTH_EXT with stipple requires the \
                    stippledSmoothLines feature",
                ),
                vk::LineRasterizationModeEXT::DEFAULT => (
                    "",
                    vk::TRUE,
                    vuid::NONE,
                    features.stippled_rectangular_lines & self.state.limits.strict_lines,
                    "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-stippledLineEnable-02774",
                    "VK_LINE_RASTERIZATION_MODE_DEFAULT_EXT with stipple requires the \
                    stippledRectangularLines and strictLines features",
                ),
                // Unknown modes are reported by the structure chain.
                _ => return,
            };

        if supported == vk::FALSE {
            ctx.error_unattached(
                mode_vuid,
                format_args!(
                    "{}(): pCreateInfos[{}] lineRasterizationMode = {}.",
                    api_name, index, mode_name,
                ),
            );
        }

        if stippled && stipple_supported == vk::FALSE {
            ctx.error_unattached(
                stipple_vuid,
                format_args!(
                    "{}(): pCreateInfos[{}] lineRasterizationMode = {}.",
                    api_name, index, stipple_feature,
                ),
            );
        }
    }

    fn check_polygon_mode(
        &self,
        ctx: &mut ValidationContext<'_>,
        rasterization: &vk::PipelineRasterizationStateCreateInfo<'_>,
    ) {
        let api_name = ctx.api_name();
        let polygon_mode = rasterization.polygon_mode;
        let fill_mode_non_solid = self.state.features.core.fill_mode_non_solid;

        if !self.state.extensions.nv_fill_rectangle {
            if polygon_mode == vk::PolygonMode::FILL_RECTANGLE_NV {
                ctx.error_unattached(
                    "VUID-VkPipelineRasterizationStateCreateInfo-polygonMode-01414",
                    format_args!(
                        "{} parameter, VkPolygonMode pCreateInfos->pRasterizationState->\
                        polygonMode cannot be VK_POLYGON_MODE_FILL_RECTANGLE_NV if the extension \
                        VK_NV_fill_rectangle is not enabled.",
                        api_name,
                    ),
                );
            } else if polygon_mode != vk::PolygonMode::FILL && !fill_mode_non_solid {
                ctx.error_unattached(
                    vuid::DEVICE_FEATURE,
                    format_args!(
                        "{} parameter, VkPolygonMode pCreateInfos->pRasterizationState->\
                        polygonMode cannot be VK_POLYGON_MODE_POINT or VK_POLYGON_MODE_LINE if \
                        VkPhysicalDeviceFeatures->fillModeNonSolid is false.",
                        api_name,
                    ),
                );
            }
        } else if polygon_mode != vk::PolygonMode::FILL
            && polygon_mode != vk::PolygonMode::FILL_RECTANGLE_NV
            && !fill_mode_non_solid
        {
            ctx.error_unattached(
                "VUID-VkPipelineRasterizationStateCreateInfo-polygonMode-01507",
                format_args!(
                    "{} parameter, VkPolygonMode pCreateInfos->pRasterizationState->polygonMode \
                    must be VK_POLYGON_MODE_FILL or VK_POLYGON_MODE_FILL_RECTANGLE_NV if \
                    VkPhysicalDeviceFeatures->fillModeNonSolid is false.",
                    api_name,
                ),
            );
        }
    }
}

/// Checks the dynamic state of a pipeline and returns which of the states that matter to the
/// other checks are dynamic.
unsafe fn check_dynamic_state(
    ctx: &mut ValidationContext<'_>,
    index: usize,
    dynamic_state: *const vk::PipelineDynamicStateCreateInfo<'_>,
) -> DynamicStates {
    unsafe {
        ctx.struct_type(
            param!("pCreateInfos[%i].pDynamicState", index),
            dynamic_state,
            false,
            vuid::UNDEFINED,
            "VUID-VkPipelineDynamicStateCreateInfo-sType-sType",
        )
    };

    let Some(dynamic_state) = (unsafe { ffi::as_ref(dynamic_state) }) else {
        return DynamicStates::default();
    };

    unsafe {
        ctx.struct_pnext(
            param!("pCreateInfos[%i].pDynamicState->pNext", index),
            dynamic_state.p_next,
            &[],
            "VUID-VkPipelineDynamicStateCreateInfo-pNext-pNext",
        )
    };
    ctx.reserved_flags(
        param!("pCreateInfos[%i].pDynamicState->flags", index),
        dynamic_state.flags.as_raw(),
        "VUID-VkPipelineDynamicStateCreateInfo-flags-zerobitmask",
    );
    unsafe {
        ctx.ranged_enum_array(
            param!("pCreateInfos[%i].pDynamicState->dynamicStateCount", index),
            param!("pCreateInfos[%i].pDynamicState->pDynamicStates", index),
            dynamic_state.dynamic_state_count,
            dynamic_state.p_dynamic_states,
            false,
            true,
        )
    };

    DynamicStates::from_states(unsafe {
        ffi::slice_or_empty(
            dynamic_state.p_dynamic_states,
            dynamic_state.dynamic_state_count,
        )
    })
}

unsafe fn check_input_assembly_state(
    ctx: &mut ValidationContext<'_>,
    index: usize,
    input_assembly_state: *const vk::PipelineInputAssemblyStateCreateInfo<'_>,
) {
    let Some(input_assembly) = (unsafe { ffi::as_ref(input_assembly_state) }) else {
        let api_name = ctx.api_name();
        ctx.error_unattached(
            "VUID-VkGraphicsPipelineCreateInfo-pStages-02098",
            format_args!(
                "{0}: pCreateInfos[{1}].pStages does not include a mesh shader stage, but \
                pCreateInfos[{1}].pInputAssemblyState is NULL.",
                api_name, index,
            ),
        );
        return;
    };

    unsafe {
        ctx.struct_type(
            param!("pCreateInfos[%i].pInputAssemblyState", index),
            input_assembly_state,
            false,
            vuid::UNDEFINED,
            "VUID-VkPipelineInputAssemblyStateCreateInfo-sType-sType",
        )
    };
    unsafe {
        ctx.struct_pnext(
            param!("pCreateInfos[%i].pInputAssemblyState->pNext", index),
            input_assembly.p_next,
            &[],
            "VUID-VkPipelineInputAssemblyStateCreateInfo-pNext-pNext",
        )
    };
    ctx.reserved_flags(
        param!("pCreateInfos[%i].pInputAssemblyState->flags", index),
        input_assembly.flags.as_raw(),
        "VUID-VkPipelineInputAssemblyStateCreateInfo-flags-zerobitmask",
    );
    ctx.ranged_enum(
        param!("pCreateInfos[%i].pInputAssemblyState->topology", index),
        input_assembly.topology,
        "VUID-VkPipelineInputAssemblyStateCreateInfo-topology-parameter",
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pInputAssemblyState->primitiveRestartEnable", index),
        input_assembly.primitive_restart_enable,
    );
}

/// Checks the rasterization state, which every graphics pipeline has. Returns it if it is
/// present.
unsafe fn check_rasterization_state<'a>(
    ctx: &mut ValidationContext<'_>,
    index: usize,
    rasterization_state: *const vk::PipelineRasterizationStateCreateInfo<'a>,
) -> Option<&'a vk::PipelineRasterizationStateCreateInfo<'a>> {
    unsafe {
        ctx.struct_type(
            param!("pCreateInfos[%i].pRasterizationState", index),
            rasterization_state,
            true,
            "VUID-VkGraphicsPipelineCreateInfo-pRasterizationState-parameter",
            "VUID-VkPipelineRasterizationStateCreateInfo-sType-sType",
        )
    };

    let rasterization = unsafe { ffi::as_ref(rasterization_state) }?;

    unsafe {
        ctx.struct_pnext(
            param!("pCreateInfos[%i].pRasterizationState->pNext", index),
            rasterization.p_next,
            RASTERIZATION_STATE_NEXT,
            "VUID-VkPipelineRasterizationStateCreateInfo-pNext-pNext",
        )
    };
    ctx.reserved_flags(
        param!("pCreateInfos[%i].pRasterizationState->flags", index),
        rasterization.flags.as_raw(),
        "VUID-VkPipelineRasterizationStateCreateInfo-flags-zerobitmask",
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pRasterizationState->depthClampEnable", index),
        rasterization.depth_clamp_enable,
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pRasterizationState->rasterizerDiscardEnable", index),
        rasterization.rasterizer_discard_enable,
    );
    ctx.ranged_enum(
        param!("pCreateInfos[%i].pRasterizationState->polygonMode", index),
        rasterization.polygon_mode,
        "VUID-VkPipelineRasterizationStateCreateInfo-polygonMode-parameter",
    );
    ctx.flags(
        param!("pCreateInfos[%i].pRasterizationState->cullMode", index),
        rasterization.cull_mode,
        FlagKind::OptionalMask,
        "VUID-VkPipelineRasterizationStateCreateInfo-cullMode-parameter",
        vuid::NONE,
    );
    ctx.ranged_enum(
        param!("pCreateInfos[%i].pRasterizationState->frontFace", index),
        rasterization.front_face,
        "VUID-VkPipelineRasterizationStateCreateInfo-frontFace-parameter",
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pRasterizationState->depthBiasEnable", index),
        rasterization.depth_bias_enable,
    );

    Some(rasterization)
}

unsafe fn check_depth_stencil_state(
    ctx: &mut ValidationContext<'_>,
    index: usize,
    depth_stencil_state: *const vk::PipelineDepthStencilStateCreateInfo<'_>,
) {
    let api_name = ctx.api_name();

    let Some(depth_stencil) = (unsafe { ffi::as_ref(depth_stencil_state) }) else {
        ctx.error_unattached(
            "VUID-VkGraphicsPipelineCreateInfo-rasterizerDiscardEnable-00752",
            format_args!(
                "{0}: pCreateInfos[{1}].subpass uses a depth/stencil attachment and \
                rasterization is enabled, but pCreateInfos[{1}].pDepthStencilState is NULL.",
                api_name, index,
            ),
        );
        return;
    };

    unsafe {
        ctx.struct_pnext(
            param!("pCreateInfos[%i].pDepthStencilState->pNext", index),
            depth_stencil.p_next,
            &[],
            "VUID-VkPipelineDepthStencilStateCreateInfo-pNext-pNext",
        )
    };
    ctx.reserved_flags(
        param!("pCreateInfos[%i].pDepthStencilState->flags", index),
        depth_stencil.flags.as_raw(),
        "VUID-VkPipelineDepthStencilStateCreateInfo-flags-zerobitmask",
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pDepthStencilState->depthTestEnable", index),
        depth_stencil.depth_test_enable,
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pDepthStencilState->depthWriteEnable", index),
        depth_stencil.depth_write_enable,
    );
    ctx.ranged_enum(
        param!("pCreateInfos[%i].pDepthStencilState->depthCompareOp", index),
        depth_stencil.depth_compare_op,
        "VUID-VkPipelineDepthStencilStateCreateInfo-depthCompareOp-parameter",
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pDepthStencilState->depthBoundsTestEnable", index),
        depth_stencil.depth_bounds_test_enable,
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pDepthStencilState->stencilTestEnable", index),
        depth_stencil.stencil_test_enable,
    );

    for (face, names) in [
        (
            &depth_stencil.front,
            [
                "pCreateInfos[%i].pDepthStencilState->front.failOp",
                "pCreateInfos[%i].pDepthStencilState->front.passOp",
                "pCreateInfos[%i].pDepthStencilState->front.depthFailOp",
                "pCreateInfos[%i].pDepthStencilState->front.compareOp",
            ],
        ),
        (
            &depth_stencil.back,
            [
                "pCreateInfos[%i].pDepthStencilState->back.failOp",
                "pCreateInfos[%i].pDepthStencilState->back.passOp",
                "pCreateInfos[%i].pDepthStencilState->back.depthFailOp",
                "pCreateInfos[%i].pDepthStencilState->back.compareOp",
            ],
        ),
    ] {
        let indices = [index as u32];
        let name = |template| ParameterName::with_indices(template, &indices);

        ctx.ranged_enum(
            name(names[0]),
            face.fail_op,
            "VUID-VkStencilOpState-failOp-parameter",
        );
        ctx.ranged_enum(
            name(names[1]),
            face.pass_op,
            "VUID-VkStencilOpState-passOp-parameter",
        );
        ctx.ranged_enum(
            name(names[2]),
            face.depth_fail_op,
            "VUID-VkStencilOpState-depthFailOp-parameter",
        );
        ctx.ranged_enum(
            name(names[3]),
            face.compare_op,
            "VUID-VkPipelineDepthStencilStateCreateInfo-depthCompareOp-parameter",
        );
    }

    if depth_stencil.s_type != vk::StructureType::PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO {
        ctx.error_unattached(
            vuid::INVALID_STRUCT_STYPE,
            format_args!(
                "{}: parameter pCreateInfos[{}].pDepthStencilState->sType must be \
                VK_STRUCTURE_TYPE_PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO",
                api_name, index,
            ),
        );
    }
}

unsafe fn check_color_blend_state(
    ctx: &mut ValidationContext<'_>,
    index: usize,
    color_blend_state: *const vk::PipelineColorBlendStateCreateInfo<'_>,
) {
    let api_name = ctx.api_name();

    let Some(color_blend) = (unsafe { ffi::as_ref(color_blend_state) }) else {
        ctx.error_unattached(
            "VUID-VkGraphicsPipelineCreateInfo-rasterizerDiscardEnable-00753",
            format_args!(
                "{0}: pCreateInfos[{1}].subpass uses color attachments and rasterization is \
                enabled, but pCreateInfos[{1}].pColorBlendState is NULL.",
                api_name, index,
            ),
        );
        return;
    };

    // The sType is checked once, through the generic structure check.
    unsafe {
        ctx.struct_type(
            param!("pCreateInfos[%i].pColorBlendState", index),
            color_blend_state,
            false,
            vuid::UNDEFINED,
            "VUID-VkPipelineColorBlendStateCreateInfo-sType-sType",
        )
    };
    unsafe {
        ctx.struct_pnext(
            param!("pCreateInfos[%i].pColorBlendState->pNext", index),
            color_blend.p_next,
            COLOR_BLEND_STATE_NEXT,
            "VUID-VkPipelineColorBlendStateCreateInfo-pNext-pNext",
        )
    };
    ctx.reserved_flags(
        param!("pCreateInfos[%i].pColorBlendState->flags", index),
        color_blend.flags.as_raw(),
        "VUID-VkPipelineColorBlendStateCreateInfo-flags-zerobitmask",
    );
    ctx.bool32(
        param!("pCreateInfos[%i].pColorBlendState->logicOpEnable", index),
        color_blend.logic_op_enable,
    );
    ctx.array(
        param!("pCreateInfos[%i].pColorBlendState->attachmentCount", index),
        param!("pCreateInfos[%i].pColorBlendState->pAttachments", index),
        color_blend.attachment_count,
        color_blend.p_attachments,
        false,
        true,
        vuid::UNDEFINED,
        vuid::UNDEFINED,
    );

    let attachments =
        unsafe { ffi::slice_or_empty(color_blend.p_attachments, color_blend.attachment_count) };

    for (attachment_index, attachment) in attachments.iter().enumerate() {
        ctx.bool32(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].blendEnable",
                index,
                attachment_index,
            ),
            attachment.blend_enable,
        );
        ctx.ranged_enum(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].srcColorBlendFactor",
                index,
                attachment_index,
            ),
            attachment.src_color_blend_factor,
            "VUID-VkPipelineColorBlendAttachmentState-srcColorBlendFactor-parameter",
        );
        ctx.ranged_enum(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].dstColorBlendFactor",
                index,
                attachment_index,
            ),
            attachment.dst_color_blend_factor,
            "VUID-VkPipelineColorBlendAttachmentState-dstColorBlendFactor-parameter",
        );
        ctx.ranged_enum(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].colorBlendOp",
                index,
                attachment_index,
            ),
            attachment.color_blend_op,
            "VUID-VkPipelineColorBlendAttachmentState-colorBlendOp-parameter",
        );
        ctx.ranged_enum(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].srcAlphaBlendFactor",
                index,
                attachment_index,
            ),
            attachment.src_alpha_blend_factor,
            "VUID-VkPipelineColorBlendAttachmentState-srcAlphaBlendFactor-parameter",
        );
        ctx.ranged_enum(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].dstAlphaBlendFactor",
                index,
                attachment_index,
            ),
            attachment.dst_alpha_blend_factor,
            "VUID-VkPipelineColorBlendAttachmentState-dstAlphaBlendFactor-parameter",
        );
        ctx.ranged_enum(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].alphaBlendOp",
                index,
                attachment_index,
            ),
            attachment.alpha_blend_op,
            "VUID-VkPipelineColorBlendAttachmentState-alphaBlendOp-parameter",
        );
        ctx.flags(
            param!(
                "pCreateInfos[%i].pColorBlendState->pAttachments[%i].colorWriteMask",
                index,
                attachment_index,
            ),
            attachment.color_write_mask,
            FlagKind::OptionalMask,
            "VUID-VkPipelineColorBlendAttachmentState-colorWriteMask-parameter",
            vuid::NONE,
        );
    }

    if color_blend.logic_op_enable == vk::TRUE {
        ctx.ranged_enum(
            param!("pCreateInfos[%i].pColorBlendState->logicOp", index),
            color_blend.logic_op,
            "VUID-VkPipelineColorBlendStateCreateInfo-logicOpEnable-00607",
        );
    }
}

/// A derivative pipeline names its base either by handle or by index, never both.
fn check_derivative(
    ctx: &mut ValidationContext<'_>,
    create_info: &vk::GraphicsPipelineCreateInfo<'_>,
) {
    if !create_info.flags.contains(vk::PipelineCreateFlags::DERIVATIVE)
        || create_info.base_pipeline_index == -1
        || create_info.base_pipeline_handle == vk::Pipeline::null()
    {
        return;
    }

    let api_name = ctx.api_name();
    ctx.error_unattached(
        "VUID-VkGraphicsPipelineCreateInfo-flags-00724",
        format_args!(
            "{} parameter, pCreateInfos->basePipelineHandle, must be VK_NULL_HANDLE if \
            pCreateInfos->flags contains the VK_PIPELINE_CREATE_DERIVATIVE_BIT flag and \
            pCreateInfos->basePipelineIndex is not -1.",
            api_name,
        ),
    );
    ctx.error_unattached(
        "VUID-VkGraphicsPipelineCreateInfo-flags-00725",
        format_args!(
            "{} parameter, pCreateInfos->basePipelineIndex, must be -1 if pCreateInfos->flags \
            contains the VK_PIPELINE_CREATE_DERIVATIVE_BIT flag and \
            pCreateInfos->basePipelineHandle is not VK_NULL_HANDLE.",
            api_name,
        ),
    );
}

#[cfg(test)]
mod tests {
    use crate::{diagnostics::vuid, Severity};
    use ash::vk::{self, Handle};
    use std::ptr;

    const SUBPASS_COLOR: vk::AttachmentReference = vk::AttachmentReference {
        attachment: 0,
        layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
    };

    /// Registers a render pass whose only subpass writes one color attachment.
    fn color_render_pass(validator: &crate::DeviceValidator) -> vk::RenderPass {
        let color_attachments = [SUBPASS_COLOR];
        let subpasses = [vk::SubpassDescription::default()
            .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
            .color_attachments(&color_attachments)];
        let create_info = vk::RenderPassCreateInfo::default().subpasses(&subpasses);
        let render_pass = vk::RenderPass::from_raw(0x40);

        unsafe { validator.record_create_render_pass(&create_info, render_pass, vk::Result::SUCCESS) }
            .unwrap();

        render_pass
    }

    fn stages() -> [vk::PipelineShaderStageCreateInfo<'static>; 2] {
        [
            vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::VERTEX)
                .module(vk::ShaderModule::from_raw(1))
                .name(c"main"),
            vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::FRAGMENT)
                .module(vk::ShaderModule::from_raw(2))
                .name(c"main"),
        ]
    }

    fn viewport() -> vk::Viewport {
        vk::Viewport {
            x: 0.0,
            y: 0.0,
            width: 1024.0,
            height: 768.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    fn scissor() -> vk::Rect2D {
        vk::Rect2D {
            offset: vk::Offset2D { x: 0, y: 0 },
            extent: vk::Extent2D {
                width: 1024,
                height: 768,
            },
        }
    }

    #[test]
    fn dynamic_viewport_with_multi_viewport() {
        let (sink, validator) = device_validator!(
            features: crate::Features {
                multi_viewport: true,
                ..crate::Features::none()
            },
        );
        let render_pass = color_render_pass(&validator);

        let stages = stages();
        let bindings = [vk::VertexInputBindingDescription {
            binding: 0,
            stride: 16,
            input_rate: vk::VertexInputRate::VERTEX,
        }];
        let attributes = [vk::VertexInputAttributeDescription {
            location: 0,
            binding: 0,
            format: vk::Format::R32G32B32A32_SFLOAT,
            offset: 0,
        }];
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default()
            .vertex_binding_descriptions(&bindings)
            .vertex_attribute_descriptions(&attributes);
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(vk::PrimitiveTopology::TRIANGLE_LIST);
        let scissors = [scissor(), scissor()];
        let mut viewport_state = vk::PipelineViewportStateCreateInfo::default().scissors(&scissors);
        viewport_state.viewport_count = 2;
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default().line_width(1.0);
        let multisample = vk::PipelineMultisampleStateCreateInfo::default()
            .rasterization_samples(vk::SampleCountFlags::TYPE_1);
        let blend_attachments = [vk::PipelineColorBlendAttachmentState::default()
            .color_write_mask(vk::ColorComponentFlags::RGBA)];
        let color_blend =
            vk::PipelineColorBlendStateCreateInfo::default().attachments(&blend_attachments);
        let dynamic_states = [vk::DynamicState::VIEWPORT];
        let dynamic_state =
            vk::PipelineDynamicStateCreateInfo::default().dynamic_states(&dynamic_states);

        let create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .viewport_state(&viewport_state)
            .rasterization_state(&rasterization)
            .multisample_state(&multisample)
            .color_blend_state(&color_blend)
            .dynamic_state(&dynamic_state)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(render_pass)
            .subpass(0);

        let skip = unsafe { validator.validate_create_graphics_pipelines(1, &create_info) };
        assert!(!skip);
        assert_eq!(sink.error_count(), 0);
    }

    #[test]
    fn static_viewports_required() {
        let (sink, validator) = device_validator!();
        let render_pass = color_render_pass(&validator);

        let stages = stages();
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default();
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(vk::PrimitiveTopology::TRIANGLE_LIST);
        let scissors = [scissor()];
        let mut viewport_state = vk::PipelineViewportStateCreateInfo::default().scissors(&scissors);
        viewport_state.viewport_count = 1;
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default().line_width(1.0);
        let multisample = vk::PipelineMultisampleStateCreateInfo::default()
            .rasterization_samples(vk::SampleCountFlags::TYPE_1);

        let create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .viewport_state(&viewport_state)
            .rasterization_state(&rasterization)
            .multisample_state(&multisample)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(render_pass);

        assert!(unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });

        let diagnostics = sink.take();
        let errors: Vec<_> = diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .collect();
        assert_eq!(
            errors.iter().map(|diagnostic| diagnostic.vuid).collect::<Vec<_>>(),
            [
                "VUID-VkGraphicsPipelineCreateInfo-pDynamicStates-00747",
                "VUID-VkGraphicsPipelineCreateInfo-rasterizerDiscardEnable-00753",
            ],
        );
        assert_eq!(errors[0].object_type, crate::ObjectType::Pipeline);
    }

    #[test]
    fn discarded_rasterization_skips_fragment_state() {
        let (sink, validator) = device_validator!();
        let render_pass = color_render_pass(&validator);

        let stages = stages();
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default();
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(vk::PrimitiveTopology::POINT_LIST);
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
            .rasterizer_discard_enable(true)
            .line_width(1.0);

        let create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .rasterization_state(&rasterization)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(render_pass);

        assert!(!unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn vertex_input_limits() {
        let (sink, validator) = device_validator!();

        let stages = stages();
        let bindings = [
            vk::VertexInputBindingDescription {
                binding: 0,
                stride: 16,
                input_rate: vk::VertexInputRate::VERTEX,
            },
            vk::VertexInputBindingDescription {
                binding: 0,
                stride: 4096,
                input_rate: vk::VertexInputRate::INSTANCE,
            },
        ];
        let attributes = [
            vk::VertexInputAttributeDescription {
                location: 1,
                binding: 0,
                format: vk::Format::R32_SFLOAT,
                offset: 0,
            },
            vk::VertexInputAttributeDescription {
                location: 1,
                binding: 40,
                format: vk::Format::R32_SFLOAT,
                offset: 4096,
            },
        ];
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default()
            .vertex_binding_descriptions(&bindings)
            .vertex_attribute_descriptions(&attributes);
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default();
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
            .rasterizer_discard_enable(true)
            .line_width(1.0);

        let create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .rasterization_state(&rasterization)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(vk::RenderPass::from_raw(0x41));

        assert!(unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkPipelineVertexInputStateCreateInfo-pVertexBindingDescriptions-00616",
                "VUID-VkVertexInputBindingDescription-stride-00619",
                "VUID-VkPipelineVertexInputStateCreateInfo-pVertexAttributeDescriptions-00617",
                "VUID-VkPipelineVertexInputStateCreateInfo-binding-00615",
                "VUID-VkVertexInputAttributeDescription-binding-00621",
                "VUID-VkVertexInputAttributeDescription-offset-00622",
            ],
        );
    }

    #[test]
    fn tessellation_patch_size() {
        let (sink, validator) = device_validator!();

        let stages = [
            vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::VERTEX)
                .module(vk::ShaderModule::from_raw(1))
                .name(c"main"),
            vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::TESSELLATION_CONTROL)
                .module(vk::ShaderModule::from_raw(2))
                .name(c"main"),
            vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::TESSELLATION_EVALUATION)
                .module(vk::ShaderModule::from_raw(3))
                .name(c"main"),
        ];
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default();
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(vk::PrimitiveTopology::PATCH_LIST);
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
            .rasterizer_discard_enable(true)
            .line_width(1.0);
        let tessellation =
            vk::PipelineTessellationStateCreateInfo::default().patch_control_points(33);

        let mut create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .rasterization_state(&rasterization)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(vk::RenderPass::from_raw(0x41));

        assert!(unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });
        assert_eq!(
            sink.take().iter().map(|d| d.vuid).collect::<Vec<_>>(),
            ["VUID-VkGraphicsPipelineCreateInfo-pStages-00731"],
        );

        create_info = create_info.tessellation_state(&tessellation);
        assert!(unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkPipelineTessellationStateCreateInfo-patchControlPoints-01214"],
        );
    }

    #[test]
    fn line_rasterization_features() {
        let (sink, validator) = device_validator!(
            features: crate::Features {
                sample_rate_shading: true,
                ..crate::Features::none()
            },
            feature_chain: feature_chain![vk::PhysicalDeviceLineRasterizationFeaturesEXT {
                rectangular_lines: vk::TRUE,
                ..Default::default()
            }],
        );
        let render_pass = vk::RenderPass::from_raw(0x41);

        let stages = stages();
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default();
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(vk::PrimitiveTopology::LINE_LIST);
        let viewports = [viewport()];
        let scissors = [scissor()];
        let viewport_state = vk::PipelineViewportStateCreateInfo::default()
            .viewports(&viewports)
            .scissors(&scissors);
        let mut line_state = vk::PipelineRasterizationLineStateCreateInfoEXT::default()
            .line_rasterization_mode(vk::LineRasterizationModeEXT::BRESENHAM)
            .stippled_line_enable(true)
            .line_stipple_factor(0);
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
            .line_width(1.0)
            .push_next(&mut line_state);
        let multisample = vk::PipelineMultisampleStateCreateInfo::default()
            .rasterization_samples(vk::SampleCountFlags::TYPE_1)
            .sample_shading_enable(true)
            .min_sample_shading(0.5);

        let create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .viewport_state(&viewport_state)
            .rasterization_state(&rasterization)
            .multisample_state(&multisample)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(render_pass);

        assert!(unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkGraphicsPipelineCreateInfo-lineRasterizationMode-02766",
                "VUID-VkGraphicsPipelineCreateInfo-stippledLineEnable-02767",
                "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-lineRasterizationMode-02769",
                "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-stippledLineEnable-02772",
            ],
        );
    }

    #[test]
    fn derivative_and_polygon_mode() {
        let (sink, validator) = device_validator!();

        let stages = stages();
        let vertex_input = vk::PipelineVertexInputStateCreateInfo::default();
        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default();
        let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
            .rasterizer_discard_enable(true)
            .polygon_mode(vk::PolygonMode::LINE)
            .line_width(2.0);

        let create_info = vk::GraphicsPipelineCreateInfo::default()
            .flags(vk::PipelineCreateFlags::DERIVATIVE)
            .stages(&stages)
            .vertex_input_state(&vertex_input)
            .input_assembly_state(&input_assembly)
            .rasterization_state(&rasterization)
            .layout(vk::PipelineLayout::from_raw(3))
            .render_pass(vk::RenderPass::from_raw(0x41))
            .base_pipeline_handle(vk::Pipeline::from_raw(7))
            .base_pipeline_index(0);

        assert!(unsafe { validator.validate_create_graphics_pipelines(1, &create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkGraphicsPipelineCreateInfo-flags-00724",
                "VUID-VkGraphicsPipelineCreateInfo-flags-00725",
                vuid::DEVICE_FEATURE,
                "VUID-VkGraphicsPipelineCreateInfo-pDynamicStates-00749",
            ],
        );
    }

    #[test]
    fn missing_create_infos() {
        let (sink, validator) = device_validator!();

        assert!(unsafe { validator.validate_create_graphics_pipelines(0, ptr::null()) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-vkCreateGraphicsPipelines-createInfoCount-arraylength"],
        );
    }
}
