// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{check_aspect_mask, is_multiple_of_four};
use crate::{context::ValidationContext, diagnostics::vuid, ffi, validator::DeviceValidator};
use ash::vk;
use std::ffi::c_void;

/// The largest amount of data that `vkCmdUpdateBuffer` can write.
const MAX_UPDATE_DATA_SIZE: vk::DeviceSize = 65536;

impl DeviceValidator {
    /// Validates the parameters of `vkCmdUpdateBuffer`.
    ///
    /// `data` is only checked for null, it is never read.
    pub fn validate_cmd_update_buffer(
        &self,
        _command_buffer: vk::CommandBuffer,
        dst_buffer: vk::Buffer,
        dst_offset: vk::DeviceSize,
        data_size: vk::DeviceSize,
        data: *const c_void,
    ) -> bool {
        let mut ctx = self.context("vkCmdUpdateBuffer");

        ctx.required_handle("dstBuffer", dst_buffer);

        if data_size != 0 {
            ctx.required_pointer("pData", data, "VUID-vkCmdUpdateBuffer-pData-parameter");
        }

        if !is_multiple_of_four(dst_offset) {
            ctx.error_unattached(
                "VUID-vkCmdUpdateBuffer-dstOffset-00036",
                format_args!(
                    "vkCmdUpdateBuffer() parameter, VkDeviceSize dstOffset ({:#x}), is not a \
                    multiple of 4.",
                    dst_offset,
                ),
            );
        }

        if data_size == 0 || data_size > MAX_UPDATE_DATA_SIZE {
            ctx.error_unattached(
                "VUID-vkCmdUpdateBuffer-dataSize-00037",
                format_args!(
                    "vkCmdUpdateBuffer() parameter, VkDeviceSize dataSize ({}), must be greater \
                    than zero and less than or equal to 65536.",
                    data_size,
                ),
            );
        } else if !is_multiple_of_four(data_size) {
            ctx.error_unattached(
                "VUID-vkCmdUpdateBuffer-dataSize-00038",
                format_args!(
                    "vkCmdUpdateBuffer() parameter, VkDeviceSize dataSize ({:#x}), is not a \
                    multiple of 4.",
                    data_size,
                ),
            );
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdFillBuffer`.
    pub fn validate_cmd_fill_buffer(
        &self,
        _command_buffer: vk::CommandBuffer,
        dst_buffer: vk::Buffer,
        dst_offset: vk::DeviceSize,
        size: vk::DeviceSize,
        _data: u32,
    ) -> bool {
        let mut ctx = self.context("vkCmdFillBuffer");

        ctx.required_handle("dstBuffer", dst_buffer);

        if !is_multiple_of_four(dst_offset) {
            ctx.error_unattached(
                "VUID-vkCmdFillBuffer-dstOffset-00025",
                format_args!(
                    "vkCmdFillBuffer() parameter, VkDeviceSize dstOffset ({:#x}), is not a \
                    multiple of 4.",
                    dst_offset,
                ),
            );
        }

        if size != vk::WHOLE_SIZE {
            if size == 0 {
                ctx.error_unattached(
                    "VUID-vkCmdFillBuffer-size-00026",
                    format_args!(
                        "vkCmdFillBuffer() parameter, VkDeviceSize size ({:#x}), must be greater \
                        than zero.",
                        size,
                    ),
                );
            } else if !is_multiple_of_four(size) {
                ctx.error_unattached(
                    "VUID-vkCmdFillBuffer-size-00028",
                    format_args!(
                        "vkCmdFillBuffer() parameter, VkDeviceSize size ({:#x}), is not a \
                        multiple of 4.",
                        size,
                    ),
                );
            }
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdCopyBufferToImage`.
    ///
    /// # Safety
    ///
    /// - `regions` must be null or valid for reads of `region_count` elements.
    pub unsafe fn validate_cmd_copy_buffer_to_image(
        &self,
        _command_buffer: vk::CommandBuffer,
        src_buffer: vk::Buffer,
        dst_image: vk::Image,
        dst_image_layout: vk::ImageLayout,
        region_count: u32,
        regions: *const vk::BufferImageCopy,
    ) -> bool {
        let mut ctx = self.context("vkCmdCopyBufferToImage");

        ctx.required_handle("srcBuffer", src_buffer);
        ctx.required_handle("dstImage", dst_image);
        ctx.ranged_enum(
            "dstImageLayout",
            dst_image_layout,
            "VUID-vkCmdCopyBufferToImage-dstImageLayout-parameter",
        );
        unsafe {
            self.check_buffer_image_copies(
                &mut ctx,
                region_count,
                regions,
                (
                    "VUID-vkCmdCopyBufferToImage-regionCount-arraylength",
                    "VUID-vkCmdCopyBufferToImage-pRegions-parameter",
                ),
            )
        };

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdCopyImageToBuffer`.
    ///
    /// # Safety
    ///
    /// - `regions` must be null or valid for reads of `region_count` elements.
    pub unsafe fn validate_cmd_copy_image_to_buffer(
        &self,
        _command_buffer: vk::CommandBuffer,
        src_image: vk::Image,
        src_image_layout: vk::ImageLayout,
        dst_buffer: vk::Buffer,
        region_count: u32,
        regions: *const vk::BufferImageCopy,
    ) -> bool {
        let mut ctx = self.context("vkCmdCopyImageToBuffer");

        ctx.required_handle("srcImage", src_image);
        ctx.ranged_enum(
            "srcImageLayout",
            src_image_layout,
            "VUID-vkCmdCopyImageToBuffer-srcImageLayout-parameter",
        );
        ctx.required_handle("dstBuffer", dst_buffer);
        unsafe {
            self.check_buffer_image_copies(
                &mut ctx,
                region_count,
                regions,
                (
                    "VUID-vkCmdCopyImageToBuffer-regionCount-arraylength",
                    "VUID-vkCmdCopyImageToBuffer-pRegions-parameter",
                ),
            )
        };

        ctx.finish()
    }

    unsafe fn check_buffer_image_copies(
        &self,
        ctx: &mut ValidationContext<'_>,
        region_count: u32,
        regions: *const vk::BufferImageCopy,
        (count_vuid, array_vuid): (&'static str, &'static str),
    ) {
        let legal = self.legal_copy_aspects();

        ctx.array(
            "regionCount",
            "pRegions",
            region_count,
            regions,
            true,
            true,
            count_vuid,
            array_vuid,
        );

        for (index, region) in unsafe { ffi::slice_or_empty(regions, region_count) }
            .iter()
            .enumerate()
        {
            check_aspect_mask(
                ctx,
                legal,
                region.image_subresource.aspect_mask,
                &param!("pRegions[%i].imageSubresource", index),
                vuid::UNRECOGNIZED_VALUE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{DeviceExtensions, Severity};
    use ash::vk::{self, Handle};
    use std::ptr;

    #[test]
    fn update_buffer_sizes() {
        let (sink, validator) = device_validator!();
        let buffer = vk::Buffer::from_raw(1);
        let data = [0u8; 4];
        let data = data.as_ptr().cast();

        let cb = vk::CommandBuffer::null();

        assert!(!validator.validate_cmd_update_buffer(cb, buffer, 0, 65536, data));
        assert!(validator.validate_cmd_update_buffer(cb, buffer, 0, 65537, data));
        assert!(validator.validate_cmd_update_buffer(cb, buffer, 4, 0, data));
        assert!(validator.validate_cmd_update_buffer(cb, buffer, 6, 6, data));

        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdUpdateBuffer-dataSize-00037",
                "VUID-vkCmdUpdateBuffer-dataSize-00037",
                "VUID-vkCmdUpdateBuffer-dstOffset-00036",
                "VUID-vkCmdUpdateBuffer-dataSize-00038",
            ],
        );
    }

    #[test]
    fn update_buffer_without_data() {
        let (sink, validator) = device_validator!();

        assert!(validator.validate_cmd_update_buffer(
            vk::CommandBuffer::null(),
            vk::Buffer::from_raw(1),
            0,
            4,
            ptr::null(),
        ));
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-vkCmdUpdateBuffer-pData-parameter"],
        );
    }

    #[test]
    fn fill_buffer_sizes() {
        let (sink, validator) = device_validator!();
        let buffer = vk::Buffer::from_raw(1);

        let cb = vk::CommandBuffer::null();

        assert!(!validator.validate_cmd_fill_buffer(cb, buffer, 0, vk::WHOLE_SIZE, 0));
        assert!(!validator.validate_cmd_fill_buffer(cb, buffer, 8, 64, 0));
        assert!(validator.validate_cmd_fill_buffer(cb, buffer, 1, 0, 0));
        assert!(validator.validate_cmd_fill_buffer(cb, buffer, 0, 5, 0));

        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdFillBuffer-dstOffset-00025",
                "VUID-vkCmdFillBuffer-size-00026",
                "VUID-vkCmdFillBuffer-size-00028",
            ],
        );
    }

    #[test]
    fn buffer_image_copy_aspects() {
        let region = |aspect_mask| vk::BufferImageCopy {
            image_subresource: vk::ImageSubresourceLayers {
                aspect_mask,
                mip_level: 0,
                base_array_layer: 0,
                layer_count: 1,
            },
            ..Default::default()
        };
        let regions = [
            region(vk::ImageAspectFlags::COLOR),
            region(vk::ImageAspectFlags::PLANE_1),
        ];

        let (sink, validator) = device_validator!();
        assert!(unsafe {
            validator.validate_cmd_copy_buffer_to_image(
                vk::CommandBuffer::null(),
                vk::Buffer::from_raw(1),
                vk::Image::from_raw(2),
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                2,
                regions.as_ptr(),
            )
        });
        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].vuid, crate::vuid::UNRECOGNIZED_VALUE);
        assert_eq!(
            diagnostics[0].message,
            "vkCmdCopyBufferToImage() parameter, VkImageAspect \
            pRegions[1].imageSubresource.aspectMask, is an unrecognized enumerator",
        );

        let (sink, validator) = device_validator!(
            extensions: DeviceExtensions {
                khr_sampler_ycbcr_conversion: true,
                ..DeviceExtensions::empty()
            },
        );
        assert!(!unsafe {
            validator.validate_cmd_copy_image_to_buffer(
                vk::CommandBuffer::null(),
                vk::Image::from_raw(2),
                vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
                vk::Buffer::from_raw(1),
                2,
                regions.as_ptr(),
            )
        });
        assert!(sink.diagnostics().is_empty());
    }
}
