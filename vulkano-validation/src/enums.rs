// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use ash::vk;
use std::ops::RangeInclusive;

/// An `ash` enumeration whose valid values are known.
///
/// Values added by extensions count as valid, whether or not the extension is enabled. Rules
/// that depend on the extension being enabled are checked separately.
pub(crate) trait KnownValues: Copy {
    /// The name of the C enumeration, for diagnostics.
    const NAME: &'static str;

    fn is_known(self) -> bool;

    fn as_raw(self) -> i32;
}

known_values! {
    vk::CompareOp = "VkCompareOp" {
        NEVER, LESS, EQUAL, LESS_OR_EQUAL, GREATER, NOT_EQUAL, GREATER_OR_EQUAL, ALWAYS,
    }

    vk::StencilOp = "VkStencilOp" {
        KEEP,
        ZERO,
        REPLACE,
        INCREMENT_AND_CLAMP,
        DECREMENT_AND_CLAMP,
        INVERT,
        INCREMENT_AND_WRAP,
        DECREMENT_AND_WRAP,
    }

    vk::BlendFactor = "VkBlendFactor" {
        ZERO,
        ONE,
        SRC_COLOR,
        ONE_MINUS_SRC_COLOR,
        DST_COLOR,
        ONE_MINUS_DST_COLOR,
        SRC_ALPHA,
        ONE_MINUS_SRC_ALPHA,
        DST_ALPHA,
        ONE_MINUS_DST_ALPHA,
        CONSTANT_COLOR,
        ONE_MINUS_CONSTANT_COLOR,
        CONSTANT_ALPHA,
        ONE_MINUS_CONSTANT_ALPHA,
        SRC_ALPHA_SATURATE,
        SRC1_COLOR,
        ONE_MINUS_SRC1_COLOR,
        SRC1_ALPHA,
        ONE_MINUS_SRC1_ALPHA,
    }

    vk::LogicOp = "VkLogicOp" {
        CLEAR,
        AND,
        AND_REVERSE,
        COPY,
        AND_INVERTED,
        NO_OP,
        XOR,
        OR,
        NOR,
        EQUIVALENT,
        INVERT,
        OR_REVERSE,
        COPY_INVERTED,
        OR_INVERTED,
        NAND,
        SET,
    }

    vk::PrimitiveTopology = "VkPrimitiveTopology" {
        POINT_LIST,
        LINE_LIST,
        LINE_STRIP,
        TRIANGLE_LIST,
        TRIANGLE_STRIP,
        TRIANGLE_FAN,
        LINE_LIST_WITH_ADJACENCY,
        LINE_STRIP_WITH_ADJACENCY,
        TRIANGLE_LIST_WITH_ADJACENCY,
        TRIANGLE_STRIP_WITH_ADJACENCY,
        PATCH_LIST,
    }

    vk::VertexInputRate = "VkVertexInputRate" { VERTEX, INSTANCE }

    vk::BorderColor = "VkBorderColor" {
        FLOAT_TRANSPARENT_BLACK,
        INT_TRANSPARENT_BLACK,
        FLOAT_OPAQUE_BLACK,
        INT_OPAQUE_BLACK,
        FLOAT_OPAQUE_WHITE,
        INT_OPAQUE_WHITE,
        FLOAT_CUSTOM_EXT,
        INT_CUSTOM_EXT,
    }

    vk::ImageLayout = "VkImageLayout" {
        UNDEFINED,
        GENERAL,
        COLOR_ATTACHMENT_OPTIMAL,
        DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
        DEPTH_STENCIL_READ_ONLY_OPTIMAL,
        SHADER_READ_ONLY_OPTIMAL,
        TRANSFER_SRC_OPTIMAL,
        TRANSFER_DST_OPTIMAL,
        PREINITIALIZED,
        DEPTH_READ_ONLY_STENCIL_ATTACHMENT_OPTIMAL,
        DEPTH_ATTACHMENT_STENCIL_READ_ONLY_OPTIMAL,
        DEPTH_ATTACHMENT_OPTIMAL,
        DEPTH_READ_ONLY_OPTIMAL,
        STENCIL_ATTACHMENT_OPTIMAL,
        STENCIL_READ_ONLY_OPTIMAL,
        READ_ONLY_OPTIMAL,
        ATTACHMENT_OPTIMAL,
        PRESENT_SRC_KHR,
        SHARED_PRESENT_KHR,
        FRAGMENT_SHADING_RATE_ATTACHMENT_OPTIMAL_KHR,
        FRAGMENT_DENSITY_MAP_OPTIMAL_EXT,
    }

    vk::IndexType = "VkIndexType" { UINT16, UINT32, NONE_KHR, UINT8_EXT }

    vk::Filter = "VkFilter" { NEAREST, LINEAR, CUBIC_EXT }

    vk::SamplerMipmapMode = "VkSamplerMipmapMode" { NEAREST, LINEAR }

    vk::SamplerAddressMode = "VkSamplerAddressMode" {
        REPEAT, MIRRORED_REPEAT, CLAMP_TO_EDGE, CLAMP_TO_BORDER, MIRROR_CLAMP_TO_EDGE,
    }

    vk::PolygonMode = "VkPolygonMode" { FILL, LINE, POINT, FILL_RECTANGLE_NV }

    vk::LineRasterizationModeEXT = "VkLineRasterizationModeEXT" {
        DEFAULT, RECTANGULAR, BRESENHAM, RECTANGULAR_SMOOTH,
    }

    vk::TessellationDomainOrigin = "VkTessellationDomainOrigin" { UPPER_LEFT, LOWER_LEFT }

    vk::BlendOverlapEXT = "VkBlendOverlapEXT" { UNCORRELATED, DISJOINT, CONJOINT }

    vk::CoverageModulationModeNV = "VkCoverageModulationModeNV" { NONE, RGB, ALPHA, RGBA }

    vk::ViewportCoordinateSwizzleNV = "VkViewportCoordinateSwizzleNV" {
        POSITIVE_X,
        NEGATIVE_X,
        POSITIVE_Y,
        NEGATIVE_Y,
        POSITIVE_Z,
        NEGATIVE_Z,
        POSITIVE_W,
        NEGATIVE_W,
    }

    vk::CoarseSampleOrderTypeNV = "VkCoarseSampleOrderTypeNV" {
        DEFAULT, CUSTOM, PIXEL_MAJOR, SAMPLE_MAJOR,
    }

    vk::ShadingRatePaletteEntryNV = "VkShadingRatePaletteEntryNV" {
        NO_INVOCATIONS,
        TYPE_16_INVOCATIONS_PER_PIXEL,
        TYPE_8_INVOCATIONS_PER_PIXEL,
        TYPE_4_INVOCATIONS_PER_PIXEL,
        TYPE_2_INVOCATIONS_PER_PIXEL,
        TYPE_1_INVOCATION_PER_PIXEL,
        TYPE_1_INVOCATION_PER_2X1_PIXELS,
        TYPE_1_INVOCATION_PER_1X2_PIXELS,
        TYPE_1_INVOCATION_PER_2X2_PIXELS,
        TYPE_1_INVOCATION_PER_4X2_PIXELS,
        TYPE_1_INVOCATION_PER_2X4_PIXELS,
        TYPE_1_INVOCATION_PER_4X4_PIXELS,
    }

    vk::GeometryTypeKHR = "VkGeometryTypeNV" { TRIANGLES, AABBS }

    vk::AccelerationStructureTypeKHR = "VkAccelerationStructureTypeNV" {
        TOP_LEVEL, BOTTOM_LEVEL,
    }

    vk::RayTracingShaderGroupTypeKHR = "VkRayTracingShaderGroupTypeNV" {
        GENERAL, TRIANGLES_HIT_GROUP, PROCEDURAL_HIT_GROUP,
    }

    vk::ImageType = "VkImageType" { TYPE_1D, TYPE_2D, TYPE_3D }

    vk::ImageTiling = "VkImageTiling" { OPTIMAL, LINEAR, DRM_FORMAT_MODIFIER_EXT }

    vk::SharingMode = "VkSharingMode" { EXCLUSIVE, CONCURRENT }

    vk::FrontFace = "VkFrontFace" { COUNTER_CLOCKWISE, CLOCKWISE }

    vk::PipelineBindPoint = "VkPipelineBindPoint" { GRAPHICS, COMPUTE, RAY_TRACING_KHR }

    vk::CommandBufferLevel = "VkCommandBufferLevel" { PRIMARY, SECONDARY }

    vk::DescriptorType = "VkDescriptorType" {
        SAMPLER,
        COMBINED_IMAGE_SAMPLER,
        SAMPLED_IMAGE,
        STORAGE_IMAGE,
        UNIFORM_TEXEL_BUFFER,
        STORAGE_TEXEL_BUFFER,
        UNIFORM_BUFFER,
        STORAGE_BUFFER,
        UNIFORM_BUFFER_DYNAMIC,
        STORAGE_BUFFER_DYNAMIC,
        INPUT_ATTACHMENT,
        INLINE_UNIFORM_BLOCK,
        ACCELERATION_STRUCTURE_NV,
    }

    vk::QueryType = "VkQueryType" {
        OCCLUSION,
        PIPELINE_STATISTICS,
        TIMESTAMP,
        TRANSFORM_FEEDBACK_STREAM_EXT,
        PERFORMANCE_QUERY_KHR,
        ACCELERATION_STRUCTURE_COMPACTED_SIZE_NV,
    }

    vk::DynamicState = "VkDynamicState" {
        VIEWPORT,
        SCISSOR,
        LINE_WIDTH,
        DEPTH_BIAS,
        BLEND_CONSTANTS,
        DEPTH_BOUNDS,
        STENCIL_COMPARE_MASK,
        STENCIL_WRITE_MASK,
        STENCIL_REFERENCE,
        VIEWPORT_W_SCALING_NV,
        DISCARD_RECTANGLE_EXT,
        SAMPLE_LOCATIONS_EXT,
        VIEWPORT_SHADING_RATE_PALETTE_NV,
        VIEWPORT_COARSE_SAMPLE_ORDER_NV,
        EXCLUSIVE_SCISSOR_NV,
        LINE_STIPPLE_EXT,
    }

    vk::PresentModeKHR = "VkPresentModeKHR" {
        IMMEDIATE,
        MAILBOX,
        FIFO,
        FIFO_RELAXED,
        SHARED_DEMAND_REFRESH,
        SHARED_CONTINUOUS_REFRESH,
    }

    vk::ColorSpaceKHR = "VkColorSpaceKHR" {
        SRGB_NONLINEAR,
        DISPLAY_P3_NONLINEAR_EXT,
        EXTENDED_SRGB_LINEAR_EXT,
        DISPLAY_P3_LINEAR_EXT,
        DCI_P3_NONLINEAR_EXT,
        BT709_LINEAR_EXT,
        BT709_NONLINEAR_EXT,
        BT2020_LINEAR_EXT,
        HDR10_ST2084_EXT,
        DOLBYVISION_EXT,
        HDR10_HLG_EXT,
        ADOBERGB_LINEAR_EXT,
        ADOBERGB_NONLINEAR_EXT,
        PASS_THROUGH_EXT,
        EXTENDED_SRGB_NONLINEAR_EXT,
        DISPLAY_NATIVE_AMD,
    }
}

/// Ranges of raw values, for enumerations too large to list one by one.
const BLEND_OP_RANGES: &[RangeInclusive<i32>] = &[
    // ADD..=MAX
    0..=4,
    // VK_EXT_blend_operation_advanced
    1000148000..=1000148045,
];

const FORMAT_RANGES: &[RangeInclusive<i32>] = &[
    // Core formats, UNDEFINED..=ASTC_12X12_SRGB_BLOCK
    0..=184,
    // VK_IMG_format_pvrtc
    1000054000..=1000054007,
    // VK_EXT_texture_compression_astc_hdr
    1000066000..=1000066013,
    // VK_KHR_sampler_ycbcr_conversion
    1000156000..=1000156033,
    // VK_EXT_ycbcr_2plane_444_formats
    1000330000..=1000330003,
    // VK_EXT_4444_formats
    1000340000..=1000340001,
    // VK_NV_optical_flow
    1000464000..=1000464000,
    // VK_KHR_maintenance5
    1000470000..=1000470001,
];

impl KnownValues for vk::BlendOp {
    const NAME: &'static str = "VkBlendOp";

    #[inline]
    fn is_known(self) -> bool {
        BLEND_OP_RANGES.iter().any(|r| r.contains(&self.as_raw()))
    }

    #[inline]
    fn as_raw(self) -> i32 {
        vk::BlendOp::as_raw(self)
    }
}

impl KnownValues for vk::Format {
    const NAME: &'static str = "VkFormat";

    #[inline]
    fn is_known(self) -> bool {
        FORMAT_RANGES.iter().any(|r| r.contains(&self.as_raw()))
    }

    #[inline]
    fn as_raw(self) -> i32 {
        vk::Format::as_raw(self)
    }
}

/// Returns whether a format has a depth or stencil component.
pub(crate) fn is_depth_or_stencil_format(format: vk::Format) -> bool {
    matches!(
        format,
        vk::Format::D16_UNORM
            | vk::Format::X8_D24_UNORM_PACK32
            | vk::Format::D32_SFLOAT
            | vk::Format::S8_UINT
            | vk::Format::D16_UNORM_S8_UINT
            | vk::Format::D24_UNORM_S8_UINT
            | vk::Format::D32_SFLOAT_S8_UINT
    )
}

#[cfg(test)]
mod tests {
    use super::{is_depth_or_stencil_format, KnownValues};
    use ash::vk;

    #[test]
    fn listed_values() {
        assert!(vk::CompareOp::ALWAYS.is_known());
        assert!(!vk::CompareOp::from_raw(8).is_known());
        assert!(vk::LogicOp::SET.is_known());
        assert!(!vk::LogicOp::from_raw(-1).is_known());
        assert!(vk::IndexType::NONE_KHR.is_known());
        assert_eq!(<vk::CompareOp as KnownValues>::NAME, "VkCompareOp");
    }

    #[test]
    fn ranged_values() {
        assert!(vk::Format::ASTC_12X12_SRGB_BLOCK.is_known());
        assert!(vk::Format::G8_B8_R8_3PLANE_420_UNORM.is_known());
        assert!(!vk::Format::from_raw(185).is_known());
        assert!(vk::BlendOp::MAX.is_known());
        assert!(vk::BlendOp::from_raw(1000148045).is_known());
        assert!(!vk::BlendOp::from_raw(5).is_known());
    }

    #[test]
    fn depth_stencil_formats() {
        assert!(is_depth_or_stencil_format(vk::Format::D24_UNORM_S8_UINT));
        assert!(!is_depth_or_stencil_format(vk::Format::R8G8B8A8_UNORM));
    }
}
