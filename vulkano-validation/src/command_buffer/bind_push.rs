// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{diagnostics::ObjectType, validator::DeviceValidator};
use ash::vk;

impl DeviceValidator {
    /// Validates the parameters of `vkCmdBindIndexBuffer`.
    pub fn validate_cmd_bind_index_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
        _offset: vk::DeviceSize,
        index_type: vk::IndexType,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdBindIndexBuffer")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.required_handle("buffer", buffer);
        ctx.ranged_enum(
            "indexType",
            index_type,
            "VUID-vkCmdBindIndexBuffer-indexType-parameter",
        );

        if index_type == vk::IndexType::NONE_KHR {
            ctx.error(
                "VUID-vkCmdBindIndexBuffer-indexType-02507",
                format_args!("vkCmdBindIndexBuffer() indexType must not be VK_INDEX_TYPE_NONE_NV."),
            );
        }

        if index_type == vk::IndexType::UINT8_EXT {
            let index_type_uint8 = self
                .state
                .features
                .get::<vk::PhysicalDeviceIndexTypeUint8FeaturesEXT<'static>>()
                .is_some_and(|f| f.index_type_uint8 == vk::TRUE);

            if !index_type_uint8 {
                ctx.error(
                    "VUID-vkCmdBindIndexBuffer-indexType-02765",
                    format_args!(
                        "vkCmdBindIndexBuffer() indexType is VK_INDEX_TYPE_UINT8_EXT but \
                        indexTypeUint8 feature is not enabled.",
                    ),
                );
            }
        }

        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Severity;
    use ash::vk::{self, Handle};

    #[test]
    fn index_types() {
        let buffer = vk::Buffer::from_raw(1);

        let (sink, validator) = device_validator!();
        assert!(!validator.validate_cmd_bind_index_buffer(
            vk::CommandBuffer::null(),
            buffer,
            0,
            vk::IndexType::UINT16,
        ));
        assert!(validator.validate_cmd_bind_index_buffer(
            vk::CommandBuffer::null(),
            buffer,
            0,
            vk::IndexType::NONE_KHR,
        ));
        assert!(validator.validate_cmd_bind_index_buffer(
            vk::CommandBuffer::null(),
            buffer,
            0,
            vk::IndexType::UINT8_EXT,
        ));
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdBindIndexBuffer-indexType-02507",
                "VUID-vkCmdBindIndexBuffer-indexType-02765",
            ],
        );

        let (sink, validator) = device_validator!(
            feature_chain: feature_chain![
                vk::PhysicalDeviceIndexTypeUint8FeaturesEXT::default().index_type_uint8(true),
            ],
        );
        assert!(!validator.validate_cmd_bind_index_buffer(
            vk::CommandBuffer::null(),
            buffer,
            0,
            vk::IndexType::UINT8_EXT,
        ));
        assert!(sink.diagnostics().is_empty());
    }
}
