// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{checks::FlagKind, diagnostics::ObjectType, ffi, validator::DeviceValidator};
use ash::vk;

impl DeviceValidator {
    /// Validates the parameters of `vkCmdClearAttachments`.
    ///
    /// # Safety
    ///
    /// - `attachments` must be null or valid for reads of `attachment_count` elements.
    /// - `rects` must be null or valid for reads of `rect_count` elements.
    pub unsafe fn validate_cmd_clear_attachments(
        &self,
        command_buffer: vk::CommandBuffer,
        attachment_count: u32,
        attachments: *const vk::ClearAttachment,
        rect_count: u32,
        rects: *const vk::ClearRect,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdClearAttachments")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.array(
            "attachmentCount",
            "pAttachments",
            attachment_count,
            attachments,
            true,
            true,
            "VUID-vkCmdClearAttachments-attachmentCount-arraylength",
            "VUID-vkCmdClearAttachments-pAttachments-parameter",
        );

        for (index, attachment) in unsafe { ffi::slice_or_empty(attachments, attachment_count) }
            .iter()
            .enumerate()
        {
            ctx.flags(
                param!("pAttachments[%i].aspectMask", index),
                attachment.aspect_mask,
                FlagKind::RequiredMask,
                "VUID-VkClearAttachment-aspectMask-parameter",
                "VUID-VkClearAttachment-aspectMask-requiredbitmask",
            );
        }

        ctx.array(
            "rectCount",
            "pRects",
            rect_count,
            rects,
            true,
            true,
            "VUID-vkCmdClearAttachments-rectCount-arraylength",
            "VUID-vkCmdClearAttachments-pRects-parameter",
        );

        for (index, rect) in unsafe { ffi::slice_or_empty(rects, rect_count) }
            .iter()
            .enumerate()
        {
            if rect.layer_count == 0 {
                ctx.error(
                    "VUID-vkCmdClearAttachments-layerCount-01934",
                    format_args!("vkCmdClearAttachments(): pRects[{}].layerCount is zero.", index),
                );
            }
        }

        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ObjectType, Severity};
    use ash::vk::{self, Handle};

    #[test]
    fn zero_layer_count() {
        let (sink, validator) = device_validator!();
        let attachments = [vk::ClearAttachment {
            aspect_mask: vk::ImageAspectFlags::COLOR,
            color_attachment: 0,
            clear_value: vk::ClearValue::default(),
        }];
        let rects = [
            vk::ClearRect {
                rect: vk::Rect2D::default(),
                base_array_layer: 0,
                layer_count: 1,
            },
            vk::ClearRect {
                rect: vk::Rect2D::default(),
                base_array_layer: 0,
                layer_count: 0,
            },
        ];

        assert!(unsafe {
            validator.validate_cmd_clear_attachments(
                vk::CommandBuffer::from_raw(3),
                1,
                attachments.as_ptr(),
                2,
                rects.as_ptr(),
            )
        });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].vuid, "VUID-vkCmdClearAttachments-layerCount-01934");
        assert_eq!(diagnostics[0].object_type, ObjectType::CommandBuffer);
        assert_eq!(
            diagnostics[0].message,
            "vkCmdClearAttachments(): pRects[1].layerCount is zero.",
        );
    }

    #[test]
    fn empty_aspect_mask() {
        let (sink, validator) = device_validator!();
        let attachments = [vk::ClearAttachment::default()];
        let rects = [vk::ClearRect {
            rect: vk::Rect2D::default(),
            base_array_layer: 0,
            layer_count: 1,
        }];

        assert!(unsafe {
            validator.validate_cmd_clear_attachments(
                vk::CommandBuffer::null(),
                1,
                attachments.as_ptr(),
                1,
                rects.as_ptr(),
            )
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkClearAttachment-aspectMask-requiredbitmask"],
        );
    }
}
