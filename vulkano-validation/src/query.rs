// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{flags::KnownFlags, validator::DeviceValidator};
use ash::vk;

const QUERY_POOL_CREATE_INFO_NEXT: &[vk::StructureType] =
    stypes![QueryPoolPerformanceCreateInfoKHR];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateQueryPool`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_query_pool(
        &self,
        create_info: &vk::QueryPoolCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self.context("vkCreateQueryPool");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateQueryPool-pCreateInfo-parameter",
                "VUID-VkQueryPoolCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                QUERY_POOL_CREATE_INFO_NEXT,
                "VUID-VkQueryPoolCreateInfo-pNext-pNext",
            )
        };
        ctx.reserved_flags(
            "pCreateInfo->flags",
            create_info.flags.as_raw(),
            "VUID-VkQueryPoolCreateInfo-flags-zerobitmask",
        );
        ctx.ranged_enum(
            "pCreateInfo->queryType",
            create_info.query_type,
            "VUID-VkQueryPoolCreateInfo-queryType-parameter",
        );

        if create_info.query_type == vk::QueryType::PIPELINE_STATISTICS {
            let statistics = create_info.pipeline_statistics.into_flag_set();
            let known = <vk::QueryPipelineStatisticFlags as KnownFlags>::ALL;

            if statistics.is_empty() || !statistics.is_subset_of(known) {
                ctx.error_unattached(
                    "VUID-VkQueryPoolCreateInfo-queryType-00792",
                    format_args!(
                        "vkCreateQueryPool(): if pCreateInfo->queryType is \
                        VK_QUERY_TYPE_PIPELINE_STATISTICS, pCreateInfo->pipelineStatistics must \
                        be a valid combination of VkQueryPipelineStatisticFlagBits values.",
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
    use ash::vk;

    #[test]
    fn pipeline_statistics() {
        let (sink, validator) = device_validator!();

        let create_info = vk::QueryPoolCreateInfo::default()
            .query_type(vk::QueryType::PIPELINE_STATISTICS)
            .query_count(4)
            .pipeline_statistics(vk::QueryPipelineStatisticFlags::VERTEX_SHADER_INVOCATIONS);
        assert!(!unsafe { validator.validate_create_query_pool(&create_info) });

        let create_info = create_info.pipeline_statistics(vk::QueryPipelineStatisticFlags::empty());
        assert!(unsafe { validator.validate_create_query_pool(&create_info) });

        let create_info = create_info
            .pipeline_statistics(vk::QueryPipelineStatisticFlags::from_raw(0x4000_0000));
        assert!(unsafe { validator.validate_create_query_pool(&create_info) });

        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkQueryPoolCreateInfo-queryType-00792",
                "VUID-VkQueryPoolCreateInfo-queryType-00792",
            ],
        );
    }

    #[test]
    fn occlusion() {
        let (sink, validator) = device_validator!();

        let create_info = vk::QueryPoolCreateInfo::default()
            .query_type(vk::QueryType::OCCLUSION)
            .query_count(1);
        assert!(!unsafe { validator.validate_create_query_pool(&create_info) });
        assert!(sink.diagnostics().is_empty());

        let create_info = vk::QueryPoolCreateInfo::default()
            .query_type(vk::QueryType::from_raw(0x1234))
            .query_count(1);
        assert!(unsafe { validator.validate_create_query_pool(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkQueryPoolCreateInfo-queryType-parameter"],
        );
    }
}
