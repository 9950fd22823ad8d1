// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use ash::vk;
use std::{fmt, ops};

/// An untyped set of bits, wide enough for every Vulkan flags type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct FlagSet(u64);

impl FlagSet {
    #[inline]
    pub(crate) const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub(crate) const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub(crate) const fn bits(self) -> u64 {
        self.0
    }

    /// Returns the number of bits set in `self`.
    #[inline]
    pub(crate) const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub(crate) const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns whether any bits are set in both `self` and `other`.
    #[inline]
    pub(crate) const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns whether all bits in `other` are set in `self`.
    #[inline]
    pub(crate) const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether every bit of `self` is also set in `other`.
    #[inline]
    pub(crate) const fn is_subset_of(self, other: Self) -> bool {
        other.contains(self)
    }

    #[inline]
    pub(crate) const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub(crate) const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the bits of `self` that are not in `other`.
    #[inline]
    pub(crate) const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub(crate) const fn is_single_bit_or_zero(self) -> bool {
        self.0 & self.0.wrapping_sub(1) == 0
    }

    /// Returns whether exactly one bit is set.
    #[inline]
    pub(crate) const fn is_power_of_two(self) -> bool {
        self.0.is_power_of_two()
    }
}

impl ops::BitOr for FlagSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl ops::BitAnd for FlagSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl ops::Sub for FlagSet {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// An `ash` flags type whose valid bits are known.
pub(crate) trait KnownFlags: Copy {
    /// The name of the corresponding `Vk*FlagBits` type, for diagnostics.
    const NAME: &'static str;

    /// All the bits that are defined for the type.
    const ALL: FlagSet;

    fn into_flag_set(self) -> FlagSet;
}

known_flags! {
    vk::ColorComponentFlags = "VkColorComponentFlagBits" { R, G, B, A }

    vk::SampleCountFlags = "VkSampleCountFlagBits" {
        TYPE_1, TYPE_2, TYPE_4, TYPE_8, TYPE_16, TYPE_32, TYPE_64,
    }

    vk::ShaderStageFlags = "VkShaderStageFlagBits" {
        VERTEX,
        TESSELLATION_CONTROL,
        TESSELLATION_EVALUATION,
        GEOMETRY,
        FRAGMENT,
        COMPUTE,
        ALL_GRAPHICS,
        RAYGEN_KHR,
        ANY_HIT_KHR,
        CLOSEST_HIT_KHR,
        MISS_KHR,
        INTERSECTION_KHR,
        CALLABLE_KHR,
        TASK_EXT,
        MESH_EXT,
    }

    vk::ImageAspectFlags = "VkImageAspectFlagBits" {
        COLOR, DEPTH, STENCIL, METADATA, PLANE_0, PLANE_1, PLANE_2,
    }

    vk::QueryControlFlags = "VkQueryControlFlagBits" { PRECISE }

    vk::QueryPipelineStatisticFlags = "VkQueryPipelineStatisticFlagBits" {
        INPUT_ASSEMBLY_VERTICES,
        INPUT_ASSEMBLY_PRIMITIVES,
        VERTEX_SHADER_INVOCATIONS,
        GEOMETRY_SHADER_INVOCATIONS,
        GEOMETRY_SHADER_PRIMITIVES,
        CLIPPING_INVOCATIONS,
        CLIPPING_PRIMITIVES,
        FRAGMENT_SHADER_INVOCATIONS,
        TESSELLATION_CONTROL_SHADER_PATCHES,
        TESSELLATION_EVALUATION_SHADER_INVOCATIONS,
        COMPUTE_SHADER_INVOCATIONS,
    }

    vk::CullModeFlags = "VkCullModeFlagBits" { FRONT, BACK }

    vk::PipelineShaderStageCreateFlags = "VkPipelineShaderStageCreateFlagBits" {
        ALLOW_VARYING_SUBGROUP_SIZE, REQUIRE_FULL_SUBGROUPS,
    }

    vk::BuildAccelerationStructureFlagsKHR = "VkBuildAccelerationStructureFlagBitsNV" {
        ALLOW_UPDATE, ALLOW_COMPACTION, PREFER_FAST_TRACE, PREFER_FAST_BUILD, LOW_MEMORY,
    }

    vk::GeometryFlagsKHR = "VkGeometryFlagBitsNV" { OPAQUE, NO_DUPLICATE_ANY_HIT_INVOCATION }

    vk::InstanceCreateFlags = "VkInstanceCreateFlagBits" { ENUMERATE_PORTABILITY_KHR }

    vk::BufferCreateFlags = "VkBufferCreateFlagBits" {
        SPARSE_BINDING,
        SPARSE_RESIDENCY,
        SPARSE_ALIASED,
        PROTECTED,
        DEVICE_ADDRESS_CAPTURE_REPLAY,
    }

    vk::BufferUsageFlags = "VkBufferUsageFlagBits" {
        TRANSFER_SRC,
        TRANSFER_DST,
        UNIFORM_TEXEL_BUFFER,
        STORAGE_TEXEL_BUFFER,
        UNIFORM_BUFFER,
        STORAGE_BUFFER,
        INDEX_BUFFER,
        VERTEX_BUFFER,
        INDIRECT_BUFFER,
        SHADER_DEVICE_ADDRESS,
        TRANSFORM_FEEDBACK_BUFFER_EXT,
        TRANSFORM_FEEDBACK_COUNTER_BUFFER_EXT,
        CONDITIONAL_RENDERING_EXT,
        SHADER_BINDING_TABLE_KHR,
    }

    vk::ImageCreateFlags = "VkImageCreateFlagBits" {
        SPARSE_BINDING,
        SPARSE_RESIDENCY,
        SPARSE_ALIASED,
        MUTABLE_FORMAT,
        CUBE_COMPATIBLE,
        ALIAS,
        SPLIT_INSTANCE_BIND_REGIONS,
        TYPE_2D_ARRAY_COMPATIBLE,
        BLOCK_TEXEL_VIEW_COMPATIBLE,
        EXTENDED_USAGE,
        PROTECTED,
        DISJOINT,
        CORNER_SAMPLED_NV,
        SAMPLE_LOCATIONS_COMPATIBLE_DEPTH_EXT,
        SUBSAMPLED_EXT,
    }

    vk::ImageUsageFlags = "VkImageUsageFlagBits" {
        TRANSFER_SRC,
        TRANSFER_DST,
        SAMPLED,
        STORAGE,
        COLOR_ATTACHMENT,
        DEPTH_STENCIL_ATTACHMENT,
        TRANSIENT_ATTACHMENT,
        INPUT_ATTACHMENT,
        SHADING_RATE_IMAGE_NV,
        FRAGMENT_DENSITY_MAP_EXT,
    }

    vk::PipelineCreateFlags = "VkPipelineCreateFlagBits" {
        DISABLE_OPTIMIZATION,
        ALLOW_DERIVATIVES,
        DERIVATIVE,
        VIEW_INDEX_FROM_DEVICE_INDEX,
        DISPATCH_BASE,
        DEFER_COMPILE_NV,
        CAPTURE_STATISTICS_KHR,
        CAPTURE_INTERNAL_REPRESENTATIONS_KHR,
    }

    vk::CommandBufferUsageFlags = "VkCommandBufferUsageFlagBits" {
        ONE_TIME_SUBMIT, RENDER_PASS_CONTINUE, SIMULTANEOUS_USE,
    }

    vk::DescriptorPoolCreateFlags = "VkDescriptorPoolCreateFlagBits" {
        FREE_DESCRIPTOR_SET, UPDATE_AFTER_BIND,
    }

    vk::DescriptorSetLayoutCreateFlags = "VkDescriptorSetLayoutCreateFlagBits" {
        PUSH_DESCRIPTOR_KHR, UPDATE_AFTER_BIND_POOL,
    }

    vk::FramebufferCreateFlags = "VkFramebufferCreateFlagBits" { IMAGELESS }

    vk::SwapchainCreateFlagsKHR = "VkSwapchainCreateFlagBitsKHR" {
        SPLIT_INSTANCE_BIND_REGIONS, PROTECTED, MUTABLE_FORMAT,
    }

    vk::SurfaceTransformFlagsKHR = "VkSurfaceTransformFlagBitsKHR" {
        IDENTITY,
        ROTATE_90,
        ROTATE_180,
        ROTATE_270,
        HORIZONTAL_MIRROR,
        HORIZONTAL_MIRROR_ROTATE_90,
        HORIZONTAL_MIRROR_ROTATE_180,
        HORIZONTAL_MIRROR_ROTATE_270,
        INHERIT,
    }

    vk::CompositeAlphaFlagsKHR = "VkCompositeAlphaFlagBitsKHR" {
        OPAQUE, PRE_MULTIPLIED, POST_MULTIPLIED, INHERIT,
    }
}
