// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Walking `pNext` chains.
//!
//! Every structure type the validator knows about has an entry in a reflection table, giving
//! its name and, for most of them, a function that checks the structure's own members. The
//! walker looks nodes up in that table, so the rules of each extension structure stay local to
//! its entry no matter which anchor the structure is chained to.

use crate::{
    context::ValidationContext,
    diagnostics::vuid,
    ffi,
    name::ParameterName,
};
use ash::vk;
use smallvec::SmallVec;
use std::{ffi::c_void, fmt};

/// Checks the members of a structure found in a chain.
type ContentValidator = unsafe fn(&mut ValidationContext<'_>, *const c_void);

struct StructureInfo {
    stype: vk::StructureType,
    name: &'static str,
    validate: Option<ContentValidator>,
}

macro_rules! structures {
    (@validate $validate:ident) => { Some($validate as ContentValidator) };
    (@validate) => { None };
    {
        $(
            $ty:ident $(=> $validate:ident)?,
        )+
    } => {
        static STRUCTURES: &[StructureInfo] = &[
            $(
                StructureInfo {
                    stype: <vk::$ty<'static> as vk::TaggedStructure>::STRUCTURE_TYPE,
                    name: concat!("Vk", stringify!($ty)),
                    validate: structures!(@validate $($validate)?),
                },
            )+
        ];
    };
}

structures! {
    // Instance and device creation
    DebugReportCallbackCreateInfoEXT,
    DebugUtilsMessengerCreateInfoEXT,
    ValidationFeaturesEXT,
    ValidationFlagsEXT,
    DeviceGroupDeviceCreateInfo,
    PhysicalDeviceFeatures2 => validate_physical_device_features2,
    PhysicalDevice16BitStorageFeatures,
    PhysicalDeviceMultiviewFeatures,
    PhysicalDeviceVariablePointersFeatures,
    PhysicalDeviceProtectedMemoryFeatures,
    PhysicalDeviceSamplerYcbcrConversionFeatures,
    PhysicalDeviceShaderDrawParametersFeatures,
    PhysicalDevice8BitStorageFeatures,
    PhysicalDeviceDescriptorIndexingFeatures,
    PhysicalDeviceScalarBlockLayoutFeatures,
    PhysicalDeviceBufferDeviceAddressFeatures,
    PhysicalDeviceImagelessFramebufferFeatures => validate_imageless_framebuffer_features,
    PhysicalDeviceHostQueryResetFeatures,
    PhysicalDeviceTimelineSemaphoreFeatures,
    PhysicalDeviceInlineUniformBlockFeatures,
    PhysicalDeviceTransformFeedbackFeaturesEXT,
    PhysicalDeviceConditionalRenderingFeaturesEXT => validate_conditional_rendering_features,
    PhysicalDeviceVertexAttributeDivisorFeaturesEXT => validate_vertex_attribute_divisor_features,
    PhysicalDeviceLineRasterizationFeaturesEXT => validate_line_rasterization_features,
    PhysicalDeviceIndexTypeUint8FeaturesEXT => validate_index_type_uint8_features,
    PhysicalDeviceMemoryPriorityFeaturesEXT => validate_memory_priority_features,
    PhysicalDeviceBlendOperationAdvancedFeaturesEXT,
    PhysicalDeviceShadingRateImageFeaturesNV => validate_shading_rate_image_features,
    PhysicalDeviceMeshShaderFeaturesNV => validate_mesh_shader_features,
    PhysicalDeviceExclusiveScissorFeaturesNV,
    PhysicalDeviceComputeShaderDerivativesFeaturesNV,
    PhysicalDeviceCornerSampledImageFeaturesNV,
    PhysicalDeviceRepresentativeFragmentTestFeaturesNV,
    PhysicalDeviceFragmentDensityMapFeaturesEXT,
    PhysicalDeviceVulkan11Features,
    PhysicalDeviceVulkan12Features,
    PhysicalDeviceVulkan13Features,

    // Resources
    ExternalMemoryBufferCreateInfo,
    BufferDeviceAddressCreateInfoEXT,
    BufferOpaqueCaptureAddressCreateInfo,
    DedicatedAllocationBufferCreateInfoNV,
    DedicatedAllocationImageCreateInfoNV,
    ExternalMemoryImageCreateInfo,
    ExternalMemoryImageCreateInfoNV,
    ImageFormatListCreateInfo,
    ImageStencilUsageCreateInfo,
    ImageSwapchainCreateInfoKHR,
    ImageDrmFormatModifierListCreateInfoEXT,
    ImageDrmFormatModifierExplicitCreateInfoEXT,
    SamplerReductionModeCreateInfo,
    SamplerYcbcrConversionInfo,
    SamplerCustomBorderColorCreateInfoEXT,
    FramebufferAttachmentsCreateInfo,

    // Memory
    MemoryAllocateFlagsInfo,
    MemoryDedicatedAllocateInfo,
    DedicatedAllocationMemoryAllocateInfoNV,
    ExportMemoryAllocateInfo,
    ExportMemoryAllocateInfoNV,
    MemoryOpaqueCaptureAddressAllocateInfo,
    MemoryPriorityAllocateInfoEXT => validate_memory_priority,

    // Pipelines
    PipelineCreationFeedbackCreateInfo => validate_creation_feedback,
    PipelineDiscardRectangleStateCreateInfoEXT,
    PipelineRepresentativeFragmentTestStateCreateInfoNV,
    PipelineVertexInputDivisorStateCreateInfoEXT => validate_vertex_input_divisor_state,
    PipelineTessellationDomainOriginStateCreateInfo => validate_tessellation_domain_origin,
    PipelineRasterizationStateRasterizationOrderAMD,
    PipelineRasterizationConservativeStateCreateInfoEXT,
    PipelineRasterizationDepthClipStateCreateInfoEXT,
    PipelineRasterizationStateStreamCreateInfoEXT,
    PipelineRasterizationLineStateCreateInfoEXT => validate_line_state,
    PipelineColorBlendAdvancedStateCreateInfoEXT => validate_color_blend_advanced,
    PipelineCoverageModulationStateCreateInfoNV => validate_coverage_modulation,
    PipelineCoverageToColorStateCreateInfoNV => validate_coverage_to_color,
    PipelineSampleLocationsStateCreateInfoEXT => validate_sample_locations,
    PipelineViewportSwizzleStateCreateInfoNV => validate_viewport_swizzle,
    PipelineViewportWScalingStateCreateInfoNV => validate_viewport_w_scaling,
    PipelineViewportExclusiveScissorStateCreateInfoNV,
    PipelineViewportShadingRateImageStateCreateInfoNV => validate_shading_rate_image_state,
    PipelineViewportCoarseSampleOrderStateCreateInfoNV => validate_coarse_sample_order_state,
    PipelineShaderStageRequiredSubgroupSizeCreateInfo,

    // Descriptors
    DescriptorSetLayoutBindingFlagsCreateInfo,
    DescriptorPoolInlineUniformBlockCreateInfo,
    WriteDescriptorSetInlineUniformBlock,
    WriteDescriptorSetAccelerationStructureNV,

    // Render passes
    RenderPassMultiviewCreateInfo,
    RenderPassInputAttachmentAspectCreateInfo,
    RenderPassFragmentDensityMapCreateInfoEXT,

    // Command buffers
    CommandBufferInheritanceConditionalRenderingInfoEXT => validate_conditional_rendering_inheritance,
    DeviceGroupCommandBufferBeginInfo,

    // Swapchains and presentation
    SwapchainCounterCreateInfoEXT,
    DeviceGroupSwapchainCreateInfoKHR,
    DeviceGroupPresentInfoKHR,
    DisplayPresentInfoKHR,
    PresentRegionsKHR => validate_present_regions,
    PresentTimesInfoGOOGLE,

    // Queries
    QueryPoolPerformanceCreateInfoKHR,
}

fn structure_info(stype: vk::StructureType) -> Option<&'static StructureInfo> {
    STRUCTURES.iter().find(|info| info.stype == stype)
}

/// Displays a structure type as its `VK_STRUCTURE_TYPE_*` token, or as its raw value if it is
/// unknown.
#[derive(Clone, Copy)]
pub(crate) struct StructureTypeToken(pub(crate) vk::StructureType);

impl StructureTypeToken {
    /// Returns whether the structure type is defined in the headers that `ash` was built from.
    pub(crate) fn is_known(self) -> bool {
        // `Debug` falls back to the raw value for types it has no name for.
        structure_info(self.0).is_some()
            || !format!("{:?}", self.0).starts_with(|c: char| c == '-' || c.is_ascii_digit())
    }
}

impl fmt::Display for StructureTypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "VK_STRUCTURE_TYPE_{:?}", self.0)
        } else {
            write!(f, "{}", self.0.as_raw())
        }
    }
}

/// Displays a list of structure types by their structure names.
struct AllowedNames<'a>(&'a [vk::StructureType]);

impl fmt::Display for AllowedNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, &stype) in self.0.iter().enumerate() {
            if index != 0 {
                f.write_str(", ")?;
            }

            match structure_info(stype) {
                Some(info) => f.write_str(info.name)?,
                None => write!(f, "{}", StructureTypeToken(stype))?,
            }
        }

        Ok(())
    }
}

struct Disclaimer<'a> {
    header_version: u32,
    name: &'a ParameterName,
}

impl fmt::Display for Disclaimer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This warning is based on the Valid Usage documentation for version {} of the Vulkan \
            header. It is possible that you are using a struct from a private extension or an \
            extension that was added to a later version of the Vulkan header, in which case your \
            use of {} is perfectly valid but is not guaranteed to work correctly with validation \
            enabled",
            self.header_version, self.name,
        )
    }
}

impl ValidationContext<'_> {
    /// Walks the chain starting at `next`, which hangs off the parameter `name`.
    ///
    /// Cycles and duplicate structure types are errors. Structures whose type is not in
    /// `allowed` are warned about, since they may come from a newer header. The members of every
    /// structure with a reflection entry are checked. The loader's own structures are skipped
    /// inside `vkCreateInstance` and `vkCreateDevice`.
    ///
    /// # Safety
    ///
    /// - `next` must be null or the head of a chain of readable Vulkan structures.
    pub(crate) unsafe fn struct_pnext(
        &mut self,
        name: impl Into<ParameterName>,
        next: *const c_void,
        allowed: &[vk::StructureType],
        vuid: &'static str,
    ) -> bool {
        if next.is_null() {
            return false;
        }

        let api_name = self.api_name();
        let name = name.into();
        let disclaimer = Disclaimer {
            header_version: self.header_version(),
            name: &name,
        };

        if allowed.is_empty() {
            self.warning_unattached(
                vuid,
                format_args!("{}: value of {} must be NULL. {}", api_name, name, disclaimer),
            );

            return self.has_error();
        }

        let skip_loader_type = match api_name {
            "vkCreateInstance" => Some(vk::StructureType::LOADER_INSTANCE_CREATE_INFO),
            "vkCreateDevice" => Some(vk::StructureType::LOADER_DEVICE_CREATE_INFO),
            _ => None,
        };

        let mut visited: SmallVec<[*const c_void; 8]> = SmallVec::new();
        let mut seen_types: SmallVec<[vk::StructureType; 8]> = SmallVec::new();
        let mut skip = false;
        let mut current = next;
        visited.push(next);

        while !current.is_null() {
            let stype = unsafe { ffi::structure_type(current) };
            let following = unsafe { ffi::next_structure(current) };

            if visited.contains(&following) {
                skip |= self.error_unattached(
                    vuid::INVALID_STRUCT_PNEXT,
                    format_args!(
                        "{}: {} chain contains a cycle -- pNext pointer {:p} is repeated.",
                        api_name, name, following,
                    ),
                );
                break;
            }

            visited.push(following);

            if Some(stype) != skip_loader_type {
                let token = StructureTypeToken(stype);

                if seen_types.contains(&stype) {
                    skip |= self.error_unattached(
                        vuid::INVALID_STRUCT_PNEXT,
                        format_args!(
                            "{}: {} chain contains duplicate structure types: {} appears \
                            multiple times.",
                            api_name, name, token,
                        ),
                    );
                } else {
                    seen_types.push(stype);
                }

                if !allowed.contains(&stype) {
                    if token.is_known() {
                        self.warning_unattached(
                            vuid,
                            format_args!(
                                "{}: {} chain includes a structure with unexpected \
                                VkStructureType {}; Allowed structures are [{}]. {}",
                                api_name,
                                name,
                                token,
                                AllowedNames(allowed),
                                disclaimer,
                            ),
                        );
                    } else {
                        self.warning_unattached(
                            vuid,
                            format_args!(
                                "{}: {} chain includes a structure with unknown \
                                VkStructureType ({}); Allowed structures are [{}]. {}",
                                api_name,
                                name,
                                stype.as_raw(),
                                AllowedNames(allowed),
                                disclaimer,
                            ),
                        );
                    }
                }

                if let Some(validate) = structure_info(stype).and_then(|info| info.validate) {
                    unsafe { validate(self, current) };
                }
            }

            current = following;
        }

        skip | self.has_error()
    }
}

/// Returns the first structure of type `T` in the chain starting at `next`.
///
/// # Safety
///
/// - `next` must be null or the head of a chain of readable Vulkan structures, that stay
///   valid for `'a`.
pub(crate) unsafe fn find_in_chain<'a, T: vk::TaggedStructure>(next: *const c_void) -> Option<&'a T> {
    unsafe { chain_iter(next) }
        .find(|&node| unsafe { ffi::structure_type(node) } == T::STRUCTURE_TYPE)
        .map(|node| unsafe { &*node.cast::<T>() })
}

/// Iterates over the nodes of a chain, stopping early if the chain loops back on itself.
///
/// # Safety
///
/// - `next` must be null or the head of a chain of readable Vulkan structures.
pub(crate) unsafe fn chain_iter(next: *const c_void) -> impl Iterator<Item = *const c_void> {
    let mut visited: SmallVec<[*const c_void; 8]> = SmallVec::new();
    let mut current = next;

    std::iter::from_fn(move || {
        if current.is_null() || visited.contains(&current) {
            return None;
        }

        let node = current;
        visited.push(node);
        current = unsafe { ffi::next_structure(node) };

        Some(node)
    })
}

/// Defines a content validator that checks `VkBool32` members.
macro_rules! bool32_validator {
    ($fn_name:ident, $ty:ident { $($field:ident = $c_field:literal),+ $(,)? }) => {
        unsafe fn $fn_name(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
            let info = unsafe { &*ptr.cast::<vk::$ty<'_>>() };

            $(
                ctx.bool32(concat!("Vk", stringify!($ty), "::", $c_field), info.$field);
            )+
        }
    };
}

unsafe fn validate_physical_device_features2(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PhysicalDeviceFeatures2<'_>>() };

    for (name, value) in crate::features::Features::raw_members(&info.features) {
        ctx.bool32(name, value);
    }
}

bool32_validator!(validate_imageless_framebuffer_features, PhysicalDeviceImagelessFramebufferFeatures {
    imageless_framebuffer = "imagelessFramebuffer",
});

bool32_validator!(validate_conditional_rendering_features, PhysicalDeviceConditionalRenderingFeaturesEXT {
    conditional_rendering = "conditionalRendering",
    inherited_conditional_rendering = "inheritedConditionalRendering",
});

bool32_validator!(validate_vertex_attribute_divisor_features, PhysicalDeviceVertexAttributeDivisorFeaturesEXT {
    vertex_attribute_instance_rate_divisor = "vertexAttributeInstanceRateDivisor",
    vertex_attribute_instance_rate_zero_divisor = "vertexAttributeInstanceRateZeroDivisor",
});

bool32_validator!(validate_line_rasterization_features, PhysicalDeviceLineRasterizationFeaturesEXT {
    rectangular_lines = "rectangularLines",
    bresenham_lines = "bresenhamLines",
    smooth_lines = "smoothLines",
    stippled_rectangular_lines = "stippledRectangularLines",
    stippled_bresenham_lines = "stippledBresenhamLines",
    stippled_smooth_lines = "stippledSmoothLines",
});

bool32_validator!(validate_index_type_uint8_features, PhysicalDeviceIndexTypeUint8FeaturesEXT {
    index_type_uint8 = "indexTypeUint8",
});

bool32_validator!(validate_memory_priority_features, PhysicalDeviceMemoryPriorityFeaturesEXT {
    memory_priority = "memoryPriority",
});

bool32_validator!(validate_shading_rate_image_features, PhysicalDeviceShadingRateImageFeaturesNV {
    shading_rate_image = "shadingRateImage",
    shading_rate_coarse_sample_order = "shadingRateCoarseSampleOrder",
});

bool32_validator!(validate_mesh_shader_features, PhysicalDeviceMeshShaderFeaturesNV {
    task_shader = "taskShader",
    mesh_shader = "meshShader",
});

bool32_validator!(validate_viewport_w_scaling, PipelineViewportWScalingStateCreateInfoNV {
    viewport_w_scaling_enable = "viewportWScalingEnable",
});

bool32_validator!(validate_shading_rate_image_state, PipelineViewportShadingRateImageStateCreateInfoNV {
    shading_rate_image_enable = "shadingRateImageEnable",
});

bool32_validator!(validate_conditional_rendering_inheritance, CommandBufferInheritanceConditionalRenderingInfoEXT {
    conditional_rendering_enable = "conditionalRenderingEnable",
});

unsafe fn validate_memory_priority(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::MemoryPriorityAllocateInfoEXT<'_>>() };

    if !(0.0..=1.0).contains(&info.priority) {
        let api_name = ctx.api_name();
        ctx.error_unattached(
            "VUID-VkMemoryPriorityAllocateInfoEXT-priority-02602",
            format_args!(
                "{}: VkMemoryPriorityAllocateInfoEXT::priority (={}) must be between 0 and 1, \
                inclusive.",
                api_name, info.priority,
            ),
        );
    }
}

unsafe fn validate_creation_feedback(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineCreationFeedbackCreateInfo<'_>>() };

    ctx.required_pointer(
        "VkPipelineCreationFeedbackCreateInfo::pPipelineCreationFeedback",
        info.p_pipeline_creation_feedback,
        "VUID-VkPipelineCreationFeedbackCreateInfo-pPipelineCreationFeedback-parameter",
    );
    ctx.array(
        "VkPipelineCreationFeedbackCreateInfo::pipelineStageCreationFeedbackCount",
        "VkPipelineCreationFeedbackCreateInfo::pPipelineStageCreationFeedbacks",
        info.pipeline_stage_creation_feedback_count,
        info.p_pipeline_stage_creation_feedbacks,
        false,
        true,
        vuid::UNDEFINED,
        "VUID-VkPipelineCreationFeedbackCreateInfo-pPipelineStageCreationFeedbacks-parameter",
    );
}

unsafe fn validate_vertex_input_divisor_state(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineVertexInputDivisorStateCreateInfoEXT<'_>>() };

    ctx.array(
        "VkPipelineVertexInputDivisorStateCreateInfoEXT::vertexBindingDivisorCount",
        "VkPipelineVertexInputDivisorStateCreateInfoEXT::pVertexBindingDivisors",
        info.vertex_binding_divisor_count,
        info.p_vertex_binding_divisors,
        true,
        true,
        "VUID-VkPipelineVertexInputDivisorStateCreateInfoEXT-vertexBindingDivisorCount-arraylength",
        "VUID-VkPipelineVertexInputDivisorStateCreateInfoEXT-pVertexBindingDivisors-parameter",
    );
}

unsafe fn validate_tessellation_domain_origin(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineTessellationDomainOriginStateCreateInfo<'_>>() };

    ctx.ranged_enum(
        "VkPipelineTessellationDomainOriginStateCreateInfo::domainOrigin",
        info.domain_origin,
        "VUID-VkPipelineTessellationDomainOriginStateCreateInfo-domainOrigin-parameter",
    );
}

unsafe fn validate_line_state(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineRasterizationLineStateCreateInfoEXT<'_>>() };

    ctx.ranged_enum(
        "VkPipelineRasterizationLineStateCreateInfoEXT::lineRasterizationMode",
        info.line_rasterization_mode,
        "VUID-VkPipelineRasterizationLineStateCreateInfoEXT-lineRasterizationMode-parameter",
    );
    ctx.bool32(
        "VkPipelineRasterizationLineStateCreateInfoEXT::stippledLineEnable",
        info.stippled_line_enable,
    );
}

unsafe fn validate_color_blend_advanced(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineColorBlendAdvancedStateCreateInfoEXT<'_>>() };

    ctx.bool32(
        "VkPipelineColorBlendAdvancedStateCreateInfoEXT::srcPremultiplied",
        info.src_premultiplied,
    );
    ctx.bool32(
        "VkPipelineColorBlendAdvancedStateCreateInfoEXT::dstPremultiplied",
        info.dst_premultiplied,
    );
    ctx.ranged_enum(
        "VkPipelineColorBlendAdvancedStateCreateInfoEXT::blendOverlap",
        info.blend_overlap,
        "VUID-VkPipelineColorBlendAdvancedStateCreateInfoEXT-blendOverlap-parameter",
    );
}

unsafe fn validate_coverage_modulation(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineCoverageModulationStateCreateInfoNV<'_>>() };

    ctx.reserved_flags(
        "VkPipelineCoverageModulationStateCreateInfoNV::flags",
        info.flags.as_raw(),
        "VUID-VkPipelineCoverageModulationStateCreateInfoNV-flags-zerobitmask",
    );
    ctx.ranged_enum(
        "VkPipelineCoverageModulationStateCreateInfoNV::coverageModulationMode",
        info.coverage_modulation_mode,
        "VUID-VkPipelineCoverageModulationStateCreateInfoNV-coverageModulationMode-parameter",
    );
    ctx.bool32(
        "VkPipelineCoverageModulationStateCreateInfoNV::coverageModulationTableEnable",
        info.coverage_modulation_table_enable,
    );
    ctx.array(
        "VkPipelineCoverageModulationStateCreateInfoNV::coverageModulationTableCount",
        "VkPipelineCoverageModulationStateCreateInfoNV::pCoverageModulationTable",
        info.coverage_modulation_table_count,
        info.p_coverage_modulation_table,
        false,
        info.coverage_modulation_table_enable == vk::TRUE,
        vuid::UNDEFINED,
        "VUID-VkPipelineCoverageModulationStateCreateInfoNV-coverageModulationTableEnable-01405",
    );
}

unsafe fn validate_coverage_to_color(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineCoverageToColorStateCreateInfoNV<'_>>() };

    ctx.reserved_flags(
        "VkPipelineCoverageToColorStateCreateInfoNV::flags",
        info.flags.as_raw(),
        "VUID-VkPipelineCoverageToColorStateCreateInfoNV-flags-zerobitmask",
    );
    ctx.bool32(
        "VkPipelineCoverageToColorStateCreateInfoNV::coverageToColorEnable",
        info.coverage_to_color_enable,
    );
}

unsafe fn validate_sample_locations(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineSampleLocationsStateCreateInfoEXT<'_>>() };

    ctx.bool32(
        "VkPipelineSampleLocationsStateCreateInfoEXT::sampleLocationsEnable",
        info.sample_locations_enable,
    );
    unsafe {
        ctx.struct_type(
            "VkPipelineSampleLocationsStateCreateInfoEXT::sampleLocationsInfo",
            &info.sample_locations_info,
            false,
            vuid::UNDEFINED,
            "VUID-VkSampleLocationsInfoEXT-sType-sType",
        )
    };
}

unsafe fn validate_viewport_swizzle(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineViewportSwizzleStateCreateInfoNV<'_>>() };

    ctx.reserved_flags(
        "VkPipelineViewportSwizzleStateCreateInfoNV::flags",
        info.flags.as_raw(),
        "VUID-VkPipelineViewportSwizzleStateCreateInfoNV-flags-zerobitmask",
    );
    ctx.array(
        "VkPipelineViewportSwizzleStateCreateInfoNV::viewportCount",
        "VkPipelineViewportSwizzleStateCreateInfoNV::pViewportSwizzles",
        info.viewport_count,
        info.p_viewport_swizzles,
        true,
        true,
        "VUID-VkPipelineViewportSwizzleStateCreateInfoNV-viewportCount-arraylength",
        "VUID-VkPipelineViewportSwizzleStateCreateInfoNV-pViewportSwizzles-parameter",
    );

    let swizzles = unsafe { ffi::slice_or_empty(info.p_viewport_swizzles, info.viewport_count) };

    for (index, swizzle) in swizzles.iter().enumerate() {
        ctx.ranged_enum(
            param!("VkPipelineViewportSwizzleStateCreateInfoNV::pViewportSwizzles[%i].x", index),
            swizzle.x,
            "VUID-VkViewportSwizzleNV-x-parameter",
        );
        ctx.ranged_enum(
            param!("VkPipelineViewportSwizzleStateCreateInfoNV::pViewportSwizzles[%i].y", index),
            swizzle.y,
            "VUID-VkViewportSwizzleNV-y-parameter",
        );
        ctx.ranged_enum(
            param!("VkPipelineViewportSwizzleStateCreateInfoNV::pViewportSwizzles[%i].z", index),
            swizzle.z,
            "VUID-VkViewportSwizzleNV-z-parameter",
        );
        ctx.ranged_enum(
            param!("VkPipelineViewportSwizzleStateCreateInfoNV::pViewportSwizzles[%i].w", index),
            swizzle.w,
            "VUID-VkViewportSwizzleNV-w-parameter",
        );
    }
}

unsafe fn validate_coarse_sample_order_state(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PipelineViewportCoarseSampleOrderStateCreateInfoNV<'_>>() };

    ctx.ranged_enum(
        "VkPipelineViewportCoarseSampleOrderStateCreateInfoNV::sampleOrderType",
        info.sample_order_type,
        "VUID-VkPipelineViewportCoarseSampleOrderStateCreateInfoNV-sampleOrderType-parameter",
    );
    ctx.array(
        "VkPipelineViewportCoarseSampleOrderStateCreateInfoNV::customSampleOrderCount",
        "VkPipelineViewportCoarseSampleOrderStateCreateInfoNV::pCustomSampleOrders",
        info.custom_sample_order_count,
        info.p_custom_sample_orders,
        false,
        true,
        vuid::UNDEFINED,
        "VUID-VkPipelineViewportCoarseSampleOrderStateCreateInfoNV-pCustomSampleOrders-parameter",
    );
}

unsafe fn validate_present_regions(ctx: &mut ValidationContext<'_>, ptr: *const c_void) {
    let info = unsafe { &*ptr.cast::<vk::PresentRegionsKHR<'_>>() };

    ctx.array(
        "VkPresentRegionsKHR::swapchainCount",
        "VkPresentRegionsKHR::pRegions",
        info.swapchain_count,
        info.p_regions,
        true,
        false,
        "VUID-VkPresentRegionsKHR-swapchainCount-arraylength",
        "VUID-VkPresentRegionsKHR-pRegions-parameter",
    );
}
