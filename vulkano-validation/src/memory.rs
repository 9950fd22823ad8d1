// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::validator::DeviceValidator;
use ash::vk;

const MEMORY_ALLOCATE_INFO_NEXT: &[vk::StructureType] = stypes![
    DedicatedAllocationMemoryAllocateInfoNV,
    ExportMemoryAllocateInfo,
    ExportMemoryAllocateInfoNV,
    MemoryAllocateFlagsInfo,
    MemoryDedicatedAllocateInfo,
    MemoryOpaqueCaptureAddressAllocateInfo,
    MemoryPriorityAllocateInfoEXT,
];

impl DeviceValidator {
    /// Validates the parameters of `vkAllocateMemory`.
    ///
    /// The range of a chained `VkMemoryPriorityAllocateInfoEXT::priority` is checked by the
    /// chain walk.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `allocate_info` must be null or valid for reads.
    pub unsafe fn validate_allocate_memory(
        &self,
        allocate_info: &vk::MemoryAllocateInfo<'_>,
    ) -> bool {
        let mut ctx = self.context("vkAllocateMemory");

        unsafe {
            ctx.struct_type(
                "pAllocateInfo",
                allocate_info,
                true,
                "VUID-vkAllocateMemory-pAllocateInfo-parameter",
                "VUID-VkMemoryAllocateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pAllocateInfo->pNext",
                allocate_info.p_next,
                MEMORY_ALLOCATE_INFO_NEXT,
                "VUID-VkMemoryAllocateInfo-pNext-pNext",
            )
        };

        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Severity;
    use ash::vk;

    #[test]
    fn memory_priority() {
        let (sink, validator) = device_validator!();

        let mut priority = vk::MemoryPriorityAllocateInfoEXT::default().priority(1.0);
        let allocate_info = vk::MemoryAllocateInfo::default()
            .allocation_size(1 << 20)
            .push_next(&mut priority);
        assert!(!unsafe { validator.validate_allocate_memory(&allocate_info) });

        let mut priority = vk::MemoryPriorityAllocateInfoEXT::default().priority(1.5);
        let allocate_info = vk::MemoryAllocateInfo::default()
            .allocation_size(1 << 20)
            .push_next(&mut priority);
        assert!(unsafe { validator.validate_allocate_memory(&allocate_info) });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].vuid,
            "VUID-VkMemoryPriorityAllocateInfoEXT-priority-02602",
        );
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("(=1.5)"));
    }

    #[test]
    fn negative_priority() {
        let (sink, validator) = device_validator!();

        let mut priority = vk::MemoryPriorityAllocateInfoEXT::default().priority(-0.25);
        let allocate_info = vk::MemoryAllocateInfo::default()
            .allocation_size(256)
            .push_next(&mut priority);

        assert!(unsafe { validator.validate_allocate_memory(&allocate_info) });
        assert_eq!(sink.error_count(), 1);
    }
}
