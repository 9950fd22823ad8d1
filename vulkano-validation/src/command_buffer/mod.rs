// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Validation of command buffer allocation, recording and the `vkCmd*` commands.
//!
//! Commands are grouped the same way as their recording methods usually are:
//!
//! - `dynamic_state`: the `vkCmdSet*` commands.
//! - `pipeline`: draws and dispatches.
//! - `bind_push`: binding of vertex input state.
//! - `clear`: clearing attachments inside a render pass.
//! - `transfer` and `image`: copies, blits, buffer updates and fills.
//!
//! None of these validators know the state of the command buffer; they only look at the
//! arguments and the device they were created for.

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

mod bind_push;
mod clear;
mod dynamic_state;
mod image;
mod pipeline;
mod transfer;

const COMMAND_BUFFER_BEGIN_INFO_NEXT: &[vk::StructureType] =
    stypes![DeviceGroupCommandBufferBeginInfo];

const COMMAND_BUFFER_INHERITANCE_INFO_NEXT: &[vk::StructureType] =
    stypes![CommandBufferInheritanceConditionalRenderingInfoEXT];

impl DeviceValidator {
    /// Validates the parameters of `vkFreeCommandBuffers`.
    pub fn validate_free_command_buffers(
        &self,
        command_pool: vk::CommandPool,
        command_buffer_count: u32,
        command_buffers: *const vk::CommandBuffer,
    ) -> bool {
        let mut ctx = self.context("vkFreeCommandBuffers");

        ctx.required_handle("commandPool", command_pool);
        // Individual elements may be null, freeing them is a no-op.
        ctx.array(
            "commandBufferCount",
            "pCommandBuffers",
            command_buffer_count,
            command_buffers,
            true,
            true,
            vuid::UNDEFINED,
            vuid::UNDEFINED,
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkBeginCommandBuffer`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `begin_info` must be null or valid for reads.
    pub unsafe fn validate_begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        begin_info: *const vk::CommandBufferBeginInfo<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkBeginCommandBuffer")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        unsafe {
            ctx.struct_type(
                "pBeginInfo",
                begin_info,
                true,
                "VUID-vkBeginCommandBuffer-pBeginInfo-parameter",
                "VUID-VkCommandBufferBeginInfo-sType-sType",
            )
        };

        let Some(begin_info) = (unsafe { ffi::as_ref(begin_info) }) else {
            return ctx.finish();
        };

        unsafe {
            ctx.struct_pnext(
                "pBeginInfo->pNext",
                begin_info.p_next,
                COMMAND_BUFFER_BEGIN_INFO_NEXT,
                "VUID-VkCommandBufferBeginInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pBeginInfo->flags",
            begin_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkCommandBufferBeginInfo-flags-parameter",
            vuid::NONE,
        );

        // The inheritance info is ignored for primary command buffers, so it's not required.
        unsafe {
            ctx.struct_type(
                "pBeginInfo->pInheritanceInfo",
                begin_info.p_inheritance_info,
                false,
                vuid::UNDEFINED,
                "VUID-VkCommandBufferInheritanceInfo-sType-sType",
            )
        };

        if let Some(inheritance_info) = unsafe { ffi::as_ref(begin_info.p_inheritance_info) } {
            unsafe { self.check_inheritance_info(&mut ctx, inheritance_info) };
        }

        ctx.finish()
    }

    unsafe fn check_inheritance_info(
        &self,
        ctx: &mut ValidationContext<'_>,
        inheritance_info: &vk::CommandBufferInheritanceInfo<'_>,
    ) {
        let features = &self.state.features.core;
        let api_name = ctx.api_name();

        unsafe {
            ctx.struct_pnext(
                "pBeginInfo->pInheritanceInfo->pNext",
                inheritance_info.p_next,
                COMMAND_BUFFER_INHERITANCE_INFO_NEXT,
                "VUID-VkCommandBufferInheritanceInfo-pNext-pNext",
            )
        };
        ctx.bool32(
            "pBeginInfo->pInheritanceInfo->occlusionQueryEnable",
            inheritance_info.occlusion_query_enable,
        );

        if !features.inherited_queries && inheritance_info.occlusion_query_enable == vk::TRUE {
            ctx.error(
                "VUID-VkCommandBufferInheritanceInfo-occlusionQueryEnable-00056",
                format_args!(
                    "{}: Inherited queries feature is disabled, but \
                    pBeginInfo->pInheritanceInfo->occlusionQueryEnable is VK_TRUE.",
                    api_name,
                ),
            );
        }

        if features.inherited_queries {
            ctx.flags(
                "pBeginInfo->pInheritanceInfo->queryFlags",
                inheritance_info.query_flags,
                FlagKind::OptionalMask,
                "VUID-VkCommandBufferInheritanceInfo-queryFlags-00057",
                vuid::NONE,
            );
        } else {
            ctx.reserved_flags(
                "pBeginInfo->pInheritanceInfo->queryFlags",
                inheritance_info.query_flags.as_raw(),
                "VUID-VkCommandBufferInheritanceInfo-queryFlags-02788",
            );
        }

        if features.pipeline_statistics_query {
            ctx.flags(
                "pBeginInfo->pInheritanceInfo->pipelineStatistics",
                inheritance_info.pipeline_statistics,
                FlagKind::OptionalMask,
                "VUID-VkCommandBufferInheritanceInfo-pipelineStatistics-02789",
                vuid::NONE,
            );
        } else {
            ctx.reserved_flags(
                "pBeginInfo->pInheritanceInfo->pipelineStatistics",
                inheritance_info.pipeline_statistics.as_raw(),
                "VUID-VkCommandBufferInheritanceInfo-pipelineStatistics-00058",
            );
        }

        let conditional_rendering = unsafe {
            chain::find_in_chain::<vk::CommandBufferInheritanceConditionalRenderingInfoEXT<'_>>(
                inheritance_info.p_next,
            )
        };

        if let Some(conditional_rendering) = conditional_rendering {
            let inherited_conditional_rendering = self
                .state
                .features
                .get::<vk::PhysicalDeviceConditionalRenderingFeaturesEXT<'static>>()
                .is_some_and(|f| f.inherited_conditional_rendering == vk::TRUE);

            if !inherited_conditional_rendering
                && conditional_rendering.conditional_rendering_enable == vk::TRUE
            {
                ctx.error(
                    "VUID-VkCommandBufferInheritanceConditionalRenderingInfoEXT-conditionalRenderingEnable-01977",
                    format_args!(
                        "{}: Inherited conditional rendering is disabled, but \
                        pBeginInfo->pInheritanceInfo->pNext<\
                        VkCommandBufferInheritanceConditionalRenderingInfoEXT> is VK_TRUE.",
                        api_name,
                    ),
                );
            }
        }
    }
}

/// Checks that an aspect mask of a copy or blit region names at least one aspect that is legal
/// for the device.
fn check_aspect_mask(
    ctx: &mut ValidationContext<'_>,
    legal: vk::ImageAspectFlags,
    aspect_mask: vk::ImageAspectFlags,
    name: &ParameterName,
    vuid: &'static str,
) -> bool {
    if aspect_mask.intersects(legal) {
        return false;
    }

    let api_name = ctx.api_name();
    ctx.error_unattached(
        vuid,
        format_args!(
            "{}() parameter, VkImageAspect {}.aspectMask, is an unrecognized enumerator",
            api_name,
            name,
        ),
    )
}

impl DeviceValidator {
    /// The aspects that copy and blit regions may name on this device.
    fn legal_copy_aspects(&self) -> vk::ImageAspectFlags {
        let mut legal = vk::ImageAspectFlags::COLOR
            | vk::ImageAspectFlags::DEPTH
            | vk::ImageAspectFlags::STENCIL
            | vk::ImageAspectFlags::METADATA;

        if self.state.extensions.khr_sampler_ycbcr_conversion {
            legal |= vk::ImageAspectFlags::PLANE_0
                | vk::ImageAspectFlags::PLANE_1
                | vk::ImageAspectFlags::PLANE_2;
        }

        legal
    }
}

/// Checks that a value is a multiple of 4, as most buffer offsets and sizes of commands must be.
#[inline]
fn is_multiple_of_four(value: u64) -> bool {
    value & 3 == 0
}

#[cfg(test)]
mod tests {
    use crate::{Features, Severity};
    use ash::vk::{self, Handle};
    use std::ptr;

    #[test]
    fn free_command_buffers() {
        let (sink, validator) = device_validator!();
        let command_buffers = [vk::CommandBuffer::from_raw(2), vk::CommandBuffer::null()];

        assert!(!validator.validate_free_command_buffers(
            vk::CommandPool::from_raw(1),
            2,
            command_buffers.as_ptr(),
        ));
        assert!(sink.diagnostics().is_empty());

        assert!(validator.validate_free_command_buffers(
            vk::CommandPool::from_raw(1),
            0,
            ptr::null(),
        ));
        assert!(validator.validate_free_command_buffers(
            vk::CommandPool::from_raw(1),
            1,
            ptr::null(),
        ));
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn occlusion_query_needs_inherited_queries() {
        let (sink, validator) = device_validator!();
        let inheritance_info =
            vk::CommandBufferInheritanceInfo::default().occlusion_query_enable(true);
        let begin_info = vk::CommandBufferBeginInfo::default().inheritance_info(&inheritance_info);

        assert!(unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::from_raw(7), &begin_info)
        });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].vuid,
            "VUID-VkCommandBufferInheritanceInfo-occlusionQueryEnable-00056",
        );
        assert_eq!(diagnostics[0].object_type, crate::ObjectType::CommandBuffer);
        assert_eq!(diagnostics[0].object_handle, 7);
    }

    #[test]
    fn query_flags_without_inherited_queries() {
        let (sink, validator) = device_validator!();
        let inheritance_info = vk::CommandBufferInheritanceInfo::default()
            .query_flags(vk::QueryControlFlags::PRECISE)
            .pipeline_statistics(vk::QueryPipelineStatisticFlags::VERTEX_SHADER_INVOCATIONS);
        let begin_info = vk::CommandBufferBeginInfo::default().inheritance_info(&inheritance_info);

        assert!(unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::null(), &begin_info)
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkCommandBufferInheritanceInfo-queryFlags-02788",
                "VUID-VkCommandBufferInheritanceInfo-pipelineStatistics-00058",
            ],
        );

        let (sink, validator) = device_validator!(
            features: Features {
                inherited_queries: true,
                pipeline_statistics_query: true,
                ..Features::none()
            },
        );

        assert!(!unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::null(), &begin_info)
        });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn inherited_conditional_rendering() {
        let mut conditional_rendering =
            vk::CommandBufferInheritanceConditionalRenderingInfoEXT::default()
                .conditional_rendering_enable(true);
        let inheritance_info =
            vk::CommandBufferInheritanceInfo::default().push_next(&mut conditional_rendering);
        let begin_info = vk::CommandBufferBeginInfo::default().inheritance_info(&inheritance_info);

        let (sink, validator) = device_validator!();
        assert!(unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::null(), &begin_info)
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkCommandBufferInheritanceConditionalRenderingInfoEXT-conditionalRenderingEnable-01977"],
        );

        let (sink, validator) = device_validator!(
            feature_chain: feature_chain![
                vk::PhysicalDeviceConditionalRenderingFeaturesEXT::default()
                    .conditional_rendering(true)
                    .inherited_conditional_rendering(true),
            ],
        );
        assert!(!unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::null(), &begin_info)
        });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn primary_without_inheritance() {
        let (sink, validator) = device_validator!();
        let begin_info = vk::CommandBufferBeginInfo::default()
            .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

        assert!(!unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::null(), &begin_info)
        });
        assert!(unsafe {
            validator.validate_begin_command_buffer(vk::CommandBuffer::null(), ptr::null())
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-vkBeginCommandBuffer-pBeginInfo-parameter"],
        );
    }
}
