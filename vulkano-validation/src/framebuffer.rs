// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{checks::FlagKind, diagnostics::vuid, validator::DeviceValidator};
use ash::vk;

const FRAMEBUFFER_CREATE_INFO_NEXT: &[vk::StructureType] =
    stypes![FramebufferAttachmentsCreateInfo];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateFramebuffer`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_framebuffer(
        &self,
        create_info: &vk::FramebufferCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self.context("vkCreateFramebuffer");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateFramebuffer-pCreateInfo-parameter",
                "VUID-VkFramebufferCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                FRAMEBUFFER_CREATE_INFO_NEXT,
                "VUID-VkFramebufferCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkFramebufferCreateInfo-flags-parameter",
            vuid::NONE,
        );
        ctx.required_handle("pCreateInfo->renderPass", create_info.render_pass);

        // Imageless framebuffers receive their attachments at render pass begin.
        if !create_info
            .flags
            .contains(vk::FramebufferCreateFlags::IMAGELESS)
        {
            ctx.array(
                "attachmentCount",
                "pAttachments",
                create_info.attachment_count,
                create_info.p_attachments,
                false,
                true,
                vuid::UNDEFINED,
                vuid::UNDEFINED,
            );
        }

        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use ash::vk::{self, Handle};

    #[test]
    fn attachments() {
        let (sink, validator) = device_validator!();

        let mut create_info = vk::FramebufferCreateInfo::default()
            .render_pass(vk::RenderPass::from_raw(1))
            .width(64)
            .height(64)
            .layers(1);
        create_info.attachment_count = 2;
        assert!(unsafe { validator.validate_create_framebuffer(&create_info) });
        assert_eq!(sink.error_count(), 1);
        sink.take();

        let create_info = create_info.flags(vk::FramebufferCreateFlags::IMAGELESS);
        assert!(!unsafe { validator.validate_create_framebuffer(&create_info) });

        let views = [vk::ImageView::from_raw(2), vk::ImageView::from_raw(3)];
        let create_info = vk::FramebufferCreateInfo::default()
            .render_pass(vk::RenderPass::from_raw(1))
            .attachments(&views)
            .width(64)
            .height(64)
            .layers(1);
        assert!(!unsafe { validator.validate_create_framebuffer(&create_info) });
        assert!(sink.diagnostics().is_empty());
    }
}
