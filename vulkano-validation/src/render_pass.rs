// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Render pass creation, and the record of which subpasses use color and depth/stencil
//! attachments.

use crate::{
    context::ValidationContext,
    diagnostics::ObjectType,
    ffi,
    validator::DeviceValidator,
    RecordError,
};
use ash::vk;
use foldhash::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;

/// Which subpasses of a render pass reference a color attachment, and which reference a
/// depth/stencil attachment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubpassUsage {
    color: SmallVec<[u32; 4]>,
    depth_stencil: SmallVec<[u32; 4]>,
}

impl SubpassUsage {
    /// Returns whether `subpass` references at least one color attachment.
    #[inline]
    pub fn uses_color(&self, subpass: u32) -> bool {
        self.color.binary_search(&subpass).is_ok()
    }

    /// Returns whether `subpass` references a depth/stencil attachment.
    #[inline]
    pub fn uses_depth_stencil(&self, subpass: u32) -> bool {
        self.depth_stencil.binary_search(&subpass).is_ok()
    }

    /// Returns the subpasses that reference a color attachment, in ascending order.
    #[inline]
    pub fn color_subpasses(&self) -> &[u32] {
        &self.color
    }

    /// Returns the subpasses that reference a depth/stencil attachment, in ascending order.
    #[inline]
    pub fn depth_stencil_subpasses(&self) -> &[u32] {
        &self.depth_stencil
    }

    fn from_subpasses(subpasses: impl Iterator<Item = SubpassInfo>) -> Self {
        let mut usage = SubpassUsage::default();

        // Subpasses are visited in index order, so the lists stay sorted.
        for (index, subpass) in (0..).zip(subpasses) {
            if subpass.uses_color {
                usage.color.push(index);
            }

            if subpass.uses_depth_stencil {
                usage.depth_stencil.push(index);
            }
        }

        usage
    }
}

/// The subpass usage of every live render pass of a device.
#[derive(Debug, Default)]
pub(crate) struct RenderPassUsageCache {
    inner: RwLock<HashMap<vk::RenderPass, SubpassUsage>>,
}

impl RenderPassUsageCache {
    pub(crate) fn insert(&self, render_pass: vk::RenderPass, usage: SubpassUsage) {
        self.inner.write().insert(render_pass, usage);
    }

    pub(crate) fn remove(&self, render_pass: vk::RenderPass) -> bool {
        self.inner.write().remove(&render_pass).is_some()
    }

    pub(crate) fn get(&self, render_pass: vk::RenderPass) -> Option<SubpassUsage> {
        self.inner.read().get(&render_pass).cloned()
    }

    /// Looks up the usage of one subpass, as `(uses_color, uses_depth_stencil)`.
    pub(crate) fn subpass(&self, render_pass: vk::RenderPass, subpass: u32) -> Option<(bool, bool)> {
        self.inner
            .read()
            .get(&render_pass)
            .map(|usage| (usage.uses_color(subpass), usage.uses_depth_stencil(subpass)))
    }
}

/// The two versions of `vkCreateRenderPass`, which differ only in their VUIDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenderPassVersion {
    V1,
    V2,
}

impl RenderPassVersion {
    fn api_name(self) -> &'static str {
        match self {
            Self::V1 => "vkCreateRenderPass",
            Self::V2 => "vkCreateRenderPass2KHR",
        }
    }

    fn format_vuid(self) -> &'static str {
        match self {
            Self::V1 => "VUID-VkAttachmentDescription-format-parameter",
            Self::V2 => "VUID-VkAttachmentDescription2KHR-format-parameter",
        }
    }

    fn final_layout_vuid(self) -> &'static str {
        match self {
            Self::V1 => "VUID-VkAttachmentDescription-finalLayout-00843",
            Self::V2 => "VUID-VkAttachmentDescription2KHR-finalLayout-03061",
        }
    }

    fn color_attachment_count_vuid(self) -> &'static str {
        match self {
            Self::V1 => "VUID-VkSubpassDescription-colorAttachmentCount-00845",
            Self::V2 => "VUID-VkSubpassDescription2KHR-colorAttachmentCount-03063",
        }
    }

    fn src_stage_vuid(self) -> &'static str {
        match self {
            Self::V1 => "VUID-VkRenderPassCreateInfo-pDependencies-00837",
            Self::V2 => "VUID-VkRenderPassCreateInfo2KHR-pDependencies-03054",
        }
    }

    fn dst_stage_vuid(self) -> &'static str {
        match self {
            Self::V1 => "VUID-VkRenderPassCreateInfo-pDependencies-00838",
            Self::V2 => "VUID-VkRenderPassCreateInfo2KHR-pDependencies-03055",
        }
    }
}

struct AttachmentInfo {
    format: vk::Format,
    final_layout: vk::ImageLayout,
}

struct SubpassInfo {
    pipeline_bind_point: vk::PipelineBindPoint,
    color_attachment_count: u32,
    uses_color: bool,
    uses_depth_stencil: bool,
}

struct DependencyInfo {
    src_subpass: u32,
    dst_subpass: u32,
    src_stage_mask: vk::PipelineStageFlags,
    dst_stage_mask: vk::PipelineStageFlags,
}

/// The parts of a render pass create info that validation looks at, for both versions of the
/// structure.
///
/// # Safety
///
/// The accessors read through the raw pointers of the create info. Every such pointer must be
/// null or valid for reads.
trait RenderPassCreateInfoGeneric {
    const VERSION: RenderPassVersion;

    unsafe fn attachments(&self) -> impl Iterator<Item = AttachmentInfo>;

    unsafe fn subpasses(&self) -> impl Iterator<Item = SubpassInfo>;

    unsafe fn dependencies(&self) -> impl Iterator<Item = DependencyInfo>;
}

impl RenderPassCreateInfoGeneric for vk::RenderPassCreateInfo<'_> {
    const VERSION: RenderPassVersion = RenderPassVersion::V1;

    unsafe fn attachments(&self) -> impl Iterator<Item = AttachmentInfo> {
        unsafe { ffi::slice_or_empty(self.p_attachments, self.attachment_count) }
            .iter()
            .map(|attachment| AttachmentInfo {
                format: attachment.format,
                final_layout: attachment.final_layout,
            })
    }

    unsafe fn subpasses(&self) -> impl Iterator<Item = SubpassInfo> {
        unsafe { ffi::slice_or_empty(self.p_subpasses, self.subpass_count) }
            .iter()
            .map(|subpass| {
                let color_attachments = unsafe {
                    ffi::slice_or_empty(subpass.p_color_attachments, subpass.color_attachment_count)
                };
                let depth_stencil = unsafe { ffi::as_ref(subpass.p_depth_stencil_attachment) };

                SubpassInfo {
                    pipeline_bind_point: subpass.pipeline_bind_point,
                    color_attachment_count: subpass.color_attachment_count,
                    uses_color: color_attachments
                        .iter()
                        .any(|reference| reference.attachment != vk::ATTACHMENT_UNUSED),
                    uses_depth_stencil: depth_stencil
                        .is_some_and(|reference| reference.attachment != vk::ATTACHMENT_UNUSED),
                }
            })
    }

    unsafe fn dependencies(&self) -> impl Iterator<Item = DependencyInfo> {
        unsafe { ffi::slice_or_empty(self.p_dependencies, self.dependency_count) }
            .iter()
            .map(|dependency| DependencyInfo {
                src_subpass: dependency.src_subpass,
                dst_subpass: dependency.dst_subpass,
                src_stage_mask: dependency.src_stage_mask,
                dst_stage_mask: dependency.dst_stage_mask,
            })
    }
}

impl RenderPassCreateInfoGeneric for vk::RenderPassCreateInfo2<'_> {
    const VERSION: RenderPassVersion = RenderPassVersion::V2;

    unsafe fn attachments(&self) -> impl Iterator<Item = AttachmentInfo> {
        unsafe { ffi::slice_or_empty(self.p_attachments, self.attachment_count) }
            .iter()
            .map(|attachment| AttachmentInfo {
                format: attachment.format,
                final_layout: attachment.final_layout,
            })
    }

    unsafe fn subpasses(&self) -> impl Iterator<Item = SubpassInfo> {
        unsafe { ffi::slice_or_empty(self.p_subpasses, self.subpass_count) }
            .iter()
            .map(|subpass| {
                let color_attachments = unsafe {
                    ffi::slice_or_empty(subpass.p_color_attachments, subpass.color_attachment_count)
                };
                let depth_stencil = unsafe { ffi::as_ref(subpass.p_depth_stencil_attachment) };

                SubpassInfo {
                    pipeline_bind_point: subpass.pipeline_bind_point,
                    color_attachment_count: subpass.color_attachment_count,
                    uses_color: color_attachments
                        .iter()
                        .any(|reference| reference.attachment != vk::ATTACHMENT_UNUSED),
                    uses_depth_stencil: depth_stencil
                        .is_some_and(|reference| reference.attachment != vk::ATTACHMENT_UNUSED),
                }
            })
    }

    unsafe fn dependencies(&self) -> impl Iterator<Item = DependencyInfo> {
        unsafe { ffi::slice_or_empty(self.p_dependencies, self.dependency_count) }
            .iter()
            .map(|dependency| DependencyInfo {
                src_subpass: dependency.src_subpass,
                dst_subpass: dependency.dst_subpass,
                src_stage_mask: dependency.src_stage_mask,
                dst_stage_mask: dependency.dst_stage_mask,
            })
    }
}

const fn stages(flags: &[vk::PipelineStageFlags]) -> u32 {
    let mut bits = 0;
    let mut i = 0;

    while i < flags.len() {
        bits |= flags[i].as_raw();
        i += 1;
    }

    bits
}

const COMMON_STAGES: u32 = stages(&[
    vk::PipelineStageFlags::TOP_OF_PIPE,
    vk::PipelineStageFlags::BOTTOM_OF_PIPE,
]);

const FRAMEBUFFER_STAGES: u32 = stages(&[
    vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS,
    vk::PipelineStageFlags::FRAGMENT_SHADER,
    vk::PipelineStageFlags::LATE_FRAGMENT_TESTS,
    vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
]);

const PRIMITIVE_SHADING_STAGES: u32 = COMMON_STAGES
    | FRAMEBUFFER_STAGES
    | stages(&[
        vk::PipelineStageFlags::DRAW_INDIRECT,
        vk::PipelineStageFlags::VERTEX_INPUT,
        vk::PipelineStageFlags::VERTEX_SHADER,
        vk::PipelineStageFlags::TESSELLATION_CONTROL_SHADER,
        vk::PipelineStageFlags::TESSELLATION_EVALUATION_SHADER,
        vk::PipelineStageFlags::GEOMETRY_SHADER,
        vk::PipelineStageFlags::TRANSFORM_FEEDBACK_EXT,
        vk::PipelineStageFlags::SHADING_RATE_IMAGE_NV,
    ]);

const MESH_SHADING_STAGES: u32 = COMMON_STAGES
    | FRAMEBUFFER_STAGES
    | stages(&[
        vk::PipelineStageFlags::DRAW_INDIRECT,
        vk::PipelineStageFlags::TASK_SHADER_NV,
        vk::PipelineStageFlags::MESH_SHADER_NV,
        vk::PipelineStageFlags::SHADING_RATE_IMAGE_NV,
    ]);

const COMMAND_PROCESSING_STAGES: u32 =
    COMMON_STAGES | vk::PipelineStageFlags::COMMAND_PREPROCESS_NV.as_raw();

/// The pipeline stages that may appear in a dependency of a graphics subpass.
const GRAPHICS_STAGES: u32 = vk::PipelineStageFlags::ALL_GRAPHICS.as_raw()
    | PRIMITIVE_SHADING_STAGES
    | MESH_SHADING_STAGES
    | vk::PipelineStageFlags::FRAGMENT_DENSITY_PROCESS_EXT.as_raw()
    | vk::PipelineStageFlags::CONDITIONAL_RENDERING_EXT.as_raw()
    | COMMAND_PROCESSING_STAGES;

impl DeviceValidator {
    /// Validates the parameters of `vkCreateRenderPass`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_render_pass(
        &self,
        create_info: &vk::RenderPassCreateInfo<'_>,
    ) -> bool {
        unsafe { self.validate_create_render_pass_generic(create_info) }
    }

    /// Validates the parameters of `vkCreateRenderPass2` and `vkCreateRenderPass2KHR`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_render_pass2(
        &self,
        create_info: &vk::RenderPassCreateInfo2<'_>,
    ) -> bool {
        unsafe { self.validate_create_render_pass_generic(create_info) }
    }

    unsafe fn validate_create_render_pass_generic<C: RenderPassCreateInfoGeneric>(
        &self,
        create_info: &C,
    ) -> bool {
        let version = C::VERSION;
        let api_name = version.api_name();
        let max_color_attachments = self.state.limits.max_color_attachments;
        let mut ctx = self.context(api_name);

        for (index, attachment) in unsafe { create_info.attachments() }.enumerate() {
            if attachment.format == vk::Format::UNDEFINED {
                ctx.warning_unattached(
                    version.format_vuid(),
                    format_args!(
                        "{}: pCreateInfo->pAttachments[{}].format is VK_FORMAT_UNDEFINED. ",
                        api_name, index,
                    ),
                );
            }

            if matches!(
                attachment.final_layout,
                vk::ImageLayout::UNDEFINED | vk::ImageLayout::PREINITIALIZED,
            ) {
                ctx.error_unattached(
                    version.final_layout_vuid(),
                    format_args!(
                        "pCreateInfo->pAttachments[{}].finalLayout must not be \
                        VK_IMAGE_LAYOUT_UNDEFINED or VK_IMAGE_LAYOUT_PREINITIALIZED.",
                        index,
                    ),
                );
            }
        }

        let subpasses: SmallVec<[SubpassInfo; 4]> = unsafe { create_info.subpasses() }.collect();

        for subpass in &subpasses {
            if subpass.color_attachment_count > max_color_attachments {
                ctx.error_unattached(
                    version.color_attachment_count_vuid(),
                    format_args!(
                        "Cannot create a render pass with {} color attachments. Max is {}.",
                        subpass.color_attachment_count, max_color_attachments,
                    ),
                );
            }
        }

        for (index, dependency) in unsafe { create_info.dependencies() }.enumerate() {
            subpass_graphics_stages(
                &mut ctx,
                &subpasses,
                index,
                dependency.src_subpass,
                dependency.src_stage_mask,
                version.src_stage_vuid(),
                "src",
            );
            subpass_graphics_stages(
                &mut ctx,
                &subpasses,
                index,
                dependency.dst_subpass,
                dependency.dst_stage_mask,
                version.dst_stage_vuid(),
                "dst",
            );
        }

        ctx.finish()
    }

    /// Records the subpass usage of a render pass created by `vkCreateRenderPass`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn record_create_render_pass(
        &self,
        create_info: &vk::RenderPassCreateInfo<'_>,
        render_pass: vk::RenderPass,
        result: vk::Result,
    ) -> Result<(), RecordError> {
        unsafe { self.record_create_render_pass_generic(create_info, render_pass, result) }
    }

    /// Records the subpass usage of a render pass created by `vkCreateRenderPass2`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn record_create_render_pass2(
        &self,
        create_info: &vk::RenderPassCreateInfo2<'_>,
        render_pass: vk::RenderPass,
        result: vk::Result,
    ) -> Result<(), RecordError> {
        unsafe { self.record_create_render_pass_generic(create_info, render_pass, result) }
    }

    unsafe fn record_create_render_pass_generic<C: RenderPassCreateInfoGeneric>(
        &self,
        create_info: &C,
        render_pass: vk::RenderPass,
        result: vk::Result,
    ) -> Result<(), RecordError> {
        if result != vk::Result::SUCCESS {
            return Err(RecordError::CreationFailed { result });
        }

        let usage = SubpassUsage::from_subpasses(unsafe { create_info.subpasses() });
        log::trace!("recorded subpass usage of {:?}: {:?}", render_pass, usage);
        self.render_passes.insert(render_pass, usage);

        Ok(())
    }

    /// Forgets a render pass destroyed by `vkDestroyRenderPass`.
    pub fn record_destroy_render_pass(&self, render_pass: vk::RenderPass) {
        if self.render_passes.remove(render_pass) {
            log::trace!("erased subpass usage of {:?}", render_pass);
        }
    }

    /// Returns the recorded subpass usage of a live render pass.
    #[inline]
    pub fn render_pass_usage(&self, render_pass: vk::RenderPass) -> Option<SubpassUsage> {
        self.render_passes.get(render_pass)
    }
}

fn subpass_graphics_stages(
    ctx: &mut ValidationContext<'_>,
    subpasses: &[SubpassInfo],
    dependency_index: usize,
    subpass: u32,
    stages: vk::PipelineStageFlags,
    vuid: &'static str,
    target: &str,
) {
    // `VK_SUBPASS_EXTERNAL` and out-of-range indices have no bind point to check against.
    let is_graphics = subpasses
        .get(subpass as usize)
        .is_some_and(|info| info.pipeline_bind_point == vk::PipelineBindPoint::GRAPHICS);
    let non_graphics = stages.as_raw() & !GRAPHICS_STAGES;

    if is_graphics && non_graphics != 0 {
        ctx.error_for(
            ObjectType::RenderPass,
            vk::RenderPass::null(),
            vuid,
            format_args!(
                "Dependency pDependencies[{}] specifies a {}StageMask that contains stages ({:?}) \
                that are not part of the Graphics pipeline, as specified by the {}Subpass (= {}) \
                in pipelineBindPoint.",
                dependency_index,
                target,
                vk::PipelineStageFlags::from_raw(non_graphics),
                target,
                subpass,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderPassUsageCache, SubpassUsage, GRAPHICS_STAGES};
    use crate::Severity;
    use ash::vk::{self, Handle};
    use std::{ptr, sync::Arc, thread};

    fn color_subpass(reference: &vk::AttachmentReference) -> vk::SubpassDescription<'static> {
        vk::SubpassDescription {
            pipeline_bind_point: vk::PipelineBindPoint::GRAPHICS,
            color_attachment_count: 1,
            p_color_attachments: ptr::from_ref(reference),
            ..Default::default()
        }
    }

    #[test]
    fn graphics_stages() {
        assert_ne!(GRAPHICS_STAGES & vk::PipelineStageFlags::VERTEX_SHADER.as_raw(), 0);
        assert_ne!(GRAPHICS_STAGES & vk::PipelineStageFlags::MESH_SHADER_NV.as_raw(), 0);
        assert_eq!(GRAPHICS_STAGES & vk::PipelineStageFlags::COMPUTE_SHADER.as_raw(), 0);
        assert_eq!(GRAPHICS_STAGES & vk::PipelineStageFlags::TRANSFER.as_raw(), 0);
        assert_eq!(
            GRAPHICS_STAGES & vk::PipelineStageFlags::RAY_TRACING_SHADER_NV.as_raw(),
            0,
        );
    }

    #[test]
    fn ray_tracing_stage_in_graphics_subpass() {
        let (sink, validator) = device_validator!();

        let reference = vk::AttachmentReference {
            attachment: 0,
            layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        };
        let attachment = vk::AttachmentDescription {
            format: vk::Format::R8G8B8A8_UNORM,
            final_layout: vk::ImageLayout::PRESENT_SRC_KHR,
            ..Default::default()
        };
        let subpass = color_subpass(&reference);
        let dependency = vk::SubpassDependency {
            src_subpass: 0,
            dst_subpass: vk::SUBPASS_EXTERNAL,
            src_stage_mask: vk::PipelineStageFlags::RAY_TRACING_SHADER_NV,
            dst_stage_mask: vk::PipelineStageFlags::COMPUTE_SHADER,
            ..Default::default()
        };
        let create_info = vk::RenderPassCreateInfo::default()
            .attachments(std::slice::from_ref(&attachment))
            .subpasses(std::slice::from_ref(&subpass))
            .dependencies(std::slice::from_ref(&dependency));

        assert!(unsafe { validator.validate_create_render_pass(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkRenderPassCreateInfo-pDependencies-00837"],
        );
        assert!(sink.diagnostics()[0].message.contains("srcStageMask"));
    }

    #[test]
    fn attachment_descriptions() {
        let (sink, validator) = device_validator!();

        let attachments = [
            vk::AttachmentDescription2 {
                format: vk::Format::UNDEFINED,
                final_layout: vk::ImageLayout::GENERAL,
                ..Default::default()
            },
            vk::AttachmentDescription2 {
                format: vk::Format::D32_SFLOAT,
                final_layout: vk::ImageLayout::PREINITIALIZED,
                ..Default::default()
            },
        ];
        let create_info = vk::RenderPassCreateInfo2::default().attachments(&attachments);

        assert!(unsafe { validator.validate_create_render_pass2(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Warning),
            ["VUID-VkAttachmentDescription2KHR-format-parameter"],
        );
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkAttachmentDescription2KHR-finalLayout-03061"],
        );
    }

    #[test]
    fn too_many_color_attachments() {
        let (sink, validator) = device_validator!(limits: vk::PhysicalDeviceLimits {
            max_color_attachments: 1,
            ..Default::default()
        });

        let references = [vk::AttachmentReference::default(); 2];
        let subpass = vk::SubpassDescription::default()
            .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
            .color_attachments(&references);
        let create_info =
            vk::RenderPassCreateInfo::default().subpasses(std::slice::from_ref(&subpass));

        assert!(unsafe { validator.validate_create_render_pass(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkSubpassDescription-colorAttachmentCount-00845"],
        );
    }

    #[test]
    fn usage_lifecycle() {
        let (_sink, validator) = device_validator!();

        let color = vk::AttachmentReference {
            attachment: 0,
            ..Default::default()
        };
        let unused = vk::AttachmentReference {
            attachment: vk::ATTACHMENT_UNUSED,
            ..Default::default()
        };
        let depth = vk::AttachmentReference {
            attachment: 1,
            ..Default::default()
        };
        let subpasses = [
            color_subpass(&color),
            vk::SubpassDescription {
                p_depth_stencil_attachment: &depth,
                ..color_subpass(&unused)
            },
            vk::SubpassDescription {
                p_depth_stencil_attachment: &unused,
                ..Default::default()
            },
        ];
        let create_info = vk::RenderPassCreateInfo::default().subpasses(&subpasses);
        let render_pass = vk::RenderPass::from_raw(0x10);

        assert!(unsafe {
            validator.record_create_render_pass(
                &create_info,
                render_pass,
                vk::Result::ERROR_OUT_OF_HOST_MEMORY,
            )
        }
        .is_err());
        assert!(validator.render_pass_usage(render_pass).is_none());

        unsafe { validator.record_create_render_pass(&create_info, render_pass, vk::Result::SUCCESS) }
            .unwrap();

        let usage = validator.render_pass_usage(render_pass).unwrap();
        assert_eq!(usage.color_subpasses(), [0]);
        assert_eq!(usage.depth_stencil_subpasses(), [1]);
        assert!(!usage.uses_color(2));

        validator.record_destroy_render_pass(render_pass);
        assert!(validator.render_pass_usage(render_pass).is_none());
    }

    #[test]
    fn concurrent_access() {
        let cache = Arc::new(RenderPassUsageCache::default());

        let writers: Vec<_> = (1..=8u64)
            .map(|raw| {
                let cache = cache.clone();
                thread::spawn(move || {
                    let usage = SubpassUsage {
                        color: [0].into_iter().collect(),
                        ..SubpassUsage::default()
                    };
                    cache.insert(vk::RenderPass::from_raw(raw), usage);
                    cache.subpass(vk::RenderPass::from_raw(raw), 0)
                })
            })
            .collect();

        for writer in writers {
            assert_eq!(writer.join().unwrap(), Some((true, false)));
        }

        assert!(cache.remove(vk::RenderPass::from_raw(3)));
        assert!(cache.get(vk::RenderPass::from_raw(3)).is_none());
        assert!(cache.get(vk::RenderPass::from_raw(4)).is_some());
    }
}
