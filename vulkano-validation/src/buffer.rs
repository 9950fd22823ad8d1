// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{
    checks::FlagKind,
    diagnostics::{vuid, ObjectType},
    validator::DeviceValidator,
};
use ash::vk;

const BUFFER_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    BufferDeviceAddressCreateInfoEXT,
    BufferOpaqueCaptureAddressCreateInfo,
    DedicatedAllocationBufferCreateInfoNV,
    ExternalMemoryBufferCreateInfo,
];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateBuffer`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_buffer(&self, create_info: &vk::BufferCreateInfo<'_>) -> bool {
        let mut ctx = self
            .context("vkCreateBuffer")
            .with_object(ObjectType::Buffer, vk::Buffer::null());

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateBuffer-pCreateInfo-parameter",
                "VUID-VkBufferCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                BUFFER_CREATE_INFO_NEXT,
                "VUID-VkBufferCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkBufferCreateInfo-flags-parameter",
            vuid::NONE,
        );
        ctx.flags(
            "pCreateInfo->usage",
            create_info.usage,
            FlagKind::RequiredMask,
            "VUID-VkBufferCreateInfo-usage-parameter",
            "VUID-VkBufferCreateInfo-usage-requiredbitmask",
        );
        ctx.ranged_enum(
            "pCreateInfo->sharingMode",
            create_info.sharing_mode,
            "VUID-VkBufferCreateInfo-sharingMode-parameter",
        );

        ctx.greater_than_zero(
            "pCreateInfo->size",
            create_info.size,
            "VUID-VkBufferCreateInfo-size-00912",
        );
        ctx.concurrent_sharing(
            create_info.sharing_mode,
            create_info.queue_family_index_count,
            create_info.p_queue_family_indices,
            "VUID-VkBufferCreateInfo-sharingMode-00914",
            "VUID-VkBufferCreateInfo-sharingMode-00913",
        );

        let sparse_usage =
            vk::BufferCreateFlags::SPARSE_RESIDENCY | vk::BufferCreateFlags::SPARSE_ALIASED;

        if create_info.flags.intersects(sparse_usage)
            && !create_info
                .flags
                .contains(vk::BufferCreateFlags::SPARSE_BINDING)
        {
            ctx.error_unattached(
                "VUID-VkBufferCreateInfo-flags-00918",
                format_args!(
                    "vkCreateBuffer: if pCreateInfo->flags contains \
                    VK_BUFFER_CREATE_SPARSE_RESIDENCY_BIT or VK_BUFFER_CREATE_SPARSE_ALIASED_BIT, \
                    it must also contain VK_BUFFER_CREATE_SPARSE_BINDING_BIT.",
                ),
            );
        }

        ctx.finish()
    }
}
