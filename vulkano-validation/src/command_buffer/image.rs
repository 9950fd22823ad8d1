// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::check_aspect_mask;
use crate::{diagnostics::vuid, ffi, validator::DeviceValidator};
use ash::vk;

impl DeviceValidator {
    /// Validates the parameters of `vkCmdCopyImage`.
    ///
    /// # Safety
    ///
    /// - `regions` must be null or valid for reads of `region_count` elements.
    pub unsafe fn validate_cmd_copy_image(
        &self,
        _command_buffer: vk::CommandBuffer,
        src_image: vk::Image,
        src_image_layout: vk::ImageLayout,
        dst_image: vk::Image,
        dst_image_layout: vk::ImageLayout,
        region_count: u32,
        regions: *const vk::ImageCopy,
    ) -> bool {
        let mut ctx = self.context("vkCmdCopyImage");
        let legal = self.legal_copy_aspects();

        ctx.required_handle("srcImage", src_image);
        ctx.ranged_enum(
            "srcImageLayout",
            src_image_layout,
            "VUID-vkCmdCopyImage-srcImageLayout-parameter",
        );
        ctx.required_handle("dstImage", dst_image);
        ctx.ranged_enum(
            "dstImageLayout",
            dst_image_layout,
            "VUID-vkCmdCopyImage-dstImageLayout-parameter",
        );
        ctx.array(
            "regionCount",
            "pRegions",
            region_count,
            regions,
            true,
            true,
            "VUID-vkCmdCopyImage-regionCount-arraylength",
            "VUID-vkCmdCopyImage-pRegions-parameter",
        );

        for (index, region) in unsafe { ffi::slice_or_empty(regions, region_count) }
            .iter()
            .enumerate()
        {
            check_aspect_mask(
                &mut ctx,
                legal,
                region.src_subresource.aspect_mask,
                &param!("pRegions[%i].srcSubresource", index),
                "VUID-VkImageSubresourceLayers-aspectMask-parameter",
            );
            check_aspect_mask(
                &mut ctx,
                legal,
                region.dst_subresource.aspect_mask,
                &param!("pRegions[%i].dstSubresource", index),
                "VUID-VkImageSubresourceLayers-aspectMask-parameter",
            );
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdBlitImage`.
    ///
    /// # Safety
    ///
    /// - `regions` must be null or valid for reads of `region_count` elements.
    pub unsafe fn validate_cmd_blit_image(
        &self,
        _command_buffer: vk::CommandBuffer,
        src_image: vk::Image,
        src_image_layout: vk::ImageLayout,
        dst_image: vk::Image,
        dst_image_layout: vk::ImageLayout,
        region_count: u32,
        regions: *const vk::ImageBlit,
        filter: vk::Filter,
    ) -> bool {
        let mut ctx = self.context("vkCmdBlitImage");
        let legal = self.legal_copy_aspects();

        ctx.required_handle("srcImage", src_image);
        ctx.ranged_enum(
            "srcImageLayout",
            src_image_layout,
            "VUID-vkCmdBlitImage-srcImageLayout-parameter",
        );
        ctx.required_handle("dstImage", dst_image);
        ctx.ranged_enum(
            "dstImageLayout",
            dst_image_layout,
            "VUID-vkCmdBlitImage-dstImageLayout-parameter",
        );
        ctx.array(
            "regionCount",
            "pRegions",
            region_count,
            regions,
            true,
            true,
            "VUID-vkCmdBlitImage-regionCount-arraylength",
            "VUID-vkCmdBlitImage-pRegions-parameter",
        );

        for (index, region) in unsafe { ffi::slice_or_empty(regions, region_count) }
            .iter()
            .enumerate()
        {
            check_aspect_mask(
                &mut ctx,
                legal,
                region.src_subresource.aspect_mask,
                &param!("pRegions[%i].srcSubresource", index),
                vuid::UNRECOGNIZED_VALUE,
            );
            check_aspect_mask(
                &mut ctx,
                legal,
                region.dst_subresource.aspect_mask,
                &param!("pRegions[%i].dstSubresource", index),
                vuid::UNRECOGNIZED_VALUE,
            );
        }

        ctx.ranged_enum("filter", filter, "VUID-vkCmdBlitImage-filter-parameter");

        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Severity;
    use ash::vk::{self, Handle};

    fn subresource(aspect_mask: vk::ImageAspectFlags) -> vk::ImageSubresourceLayers {
        vk::ImageSubresourceLayers {
            aspect_mask,
            mip_level: 0,
            base_array_layer: 0,
            layer_count: 1,
        }
    }

    #[test]
    fn copy_image_aspects() {
        let (sink, validator) = device_validator!();
        let regions = [
            vk::ImageCopy {
                src_subresource: subresource(vk::ImageAspectFlags::DEPTH),
                dst_subresource: subresource(vk::ImageAspectFlags::DEPTH),
                ..Default::default()
            },
            vk::ImageCopy {
                src_subresource: subresource(vk::ImageAspectFlags::COLOR),
                dst_subresource: subresource(vk::ImageAspectFlags::PLANE_0),
                ..Default::default()
            },
        ];

        assert!(unsafe {
            validator.validate_cmd_copy_image(
                vk::CommandBuffer::null(),
                vk::Image::from_raw(1),
                vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
                vk::Image::from_raw(2),
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                2,
                regions.as_ptr(),
            )
        });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].vuid,
            "VUID-VkImageSubresourceLayers-aspectMask-parameter",
        );
        assert!(diagnostics[0]
            .message
            .contains("pRegions[1].dstSubresource.aspectMask"));
    }

    #[test]
    fn blit_image() {
        let (sink, validator) = device_validator!();
        let regions = [vk::ImageBlit {
            src_subresource: subresource(vk::ImageAspectFlags::COLOR),
            dst_subresource: subresource(vk::ImageAspectFlags::empty()),
            ..Default::default()
        }];

        assert!(unsafe {
            validator.validate_cmd_blit_image(
                vk::CommandBuffer::null(),
                vk::Image::from_raw(1),
                vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
                vk::Image::from_raw(2),
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                1,
                regions.as_ptr(),
                vk::Filter::from_raw(7),
            )
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [crate::vuid::UNRECOGNIZED_VALUE, "VUID-vkCmdBlitImage-filter-parameter"],
        );
    }
}
