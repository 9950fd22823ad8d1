// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{chain, ffi};
use ash::vk;
use smallvec::SmallVec;
use std::{
    ffi::c_void,
    fmt,
    mem::{self, MaybeUninit},
    ptr,
};

macro_rules! features {
    {
        $($member:ident => $ffi_field:ident = $c_name:literal,)*
    } => {
        /// The core Vulkan 1.0 features enabled on a device.
        ///
        /// # Example
        ///
        /// ```
        /// use vulkano_validation::Features;
        ///
        /// let minimal_features = Features {
        ///     geometry_shader: true,
        ///     ..Features::none()
        /// };
        ///
        /// let optimal_features = Features {
        ///     geometry_shader: true,
        ///     tessellation_shader: true,
        ///     ..Features::none()
        /// };
        ///
        /// assert!(optimal_features.superset_of(&minimal_features));
        /// ```
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub struct Features {
            $(pub $member: bool,)*
        }

        impl Features {
            /// Builds a `Features` object with all values to false.
            #[inline]
            pub const fn none() -> Features {
                Features {
                    $($member: false,)*
                }
            }

            /// Builds a `Features` object with all values to true.
            #[inline]
            pub const fn all() -> Features {
                Features {
                    $($member: true,)*
                }
            }

            /// Returns true if `self` is a superset of the parameter.
            ///
            /// That is, for each feature of the parameter that is true, the corresponding value
            /// in self is true as well.
            #[inline]
            pub fn superset_of(&self, other: &Features) -> bool {
                $((self.$member || !other.$member))&&+
            }

            /// Builds a `Features` that is the intersection of `self` and another `Features`
            /// object.
            #[inline]
            pub fn intersection(&self, other: &Features) -> Features {
                Features {
                    $($member: self.$member && other.$member,)*
                }
            }

            /// Builds a `Features` that is the difference of another `Features` object from
            /// `self`.
            #[inline]
            pub fn difference(&self, other: &Features) -> Features {
                Features {
                    $($member: self.$member && !other.$member,)*
                }
            }

            /// Returns the C name and raw value of every member of the FFI structure.
            pub(crate) fn raw_members(
                features: &vk::PhysicalDeviceFeatures,
            ) -> impl Iterator<Item = (&'static str, vk::Bool32)> {
                [
                    $((
                        concat!("VkPhysicalDeviceFeatures2::features.", $c_name),
                        features.$ffi_field,
                    ),)*
                ]
                .into_iter()
            }
        }

        impl From<&vk::PhysicalDeviceFeatures> for Features {
            #[inline]
            fn from(features: &vk::PhysicalDeviceFeatures) -> Self {
                Features {
                    $($member: features.$ffi_field != vk::FALSE,)*
                }
            }
        }

        impl From<&Features> for vk::PhysicalDeviceFeatures {
            #[inline]
            fn from(features: &Features) -> Self {
                vk::PhysicalDeviceFeatures {
                    $($ffi_field: features.$member as vk::Bool32,)*
                }
            }
        }
    };
}

features! {
    robust_buffer_access => robust_buffer_access = "robustBufferAccess",
    full_draw_index_uint32 => full_draw_index_uint32 = "fullDrawIndexUint32",
    image_cube_array => image_cube_array = "imageCubeArray",
    independent_blend => independent_blend = "independentBlend",
    geometry_shader => geometry_shader = "geometryShader",
    tessellation_shader => tessellation_shader = "tessellationShader",
    sample_rate_shading => sample_rate_shading = "sampleRateShading",
    dual_src_blend => dual_src_blend = "dualSrcBlend",
    logic_op => logic_op = "logicOp",
    multi_draw_indirect => multi_draw_indirect = "multiDrawIndirect",
    draw_indirect_first_instance => draw_indirect_first_instance = "drawIndirectFirstInstance",
    depth_clamp => depth_clamp = "depthClamp",
    depth_bias_clamp => depth_bias_clamp = "depthBiasClamp",
    fill_mode_non_solid => fill_mode_non_solid = "fillModeNonSolid",
    depth_bounds => depth_bounds = "depthBounds",
    wide_lines => wide_lines = "wideLines",
    large_points => large_points = "largePoints",
    alpha_to_one => alpha_to_one = "alphaToOne",
    multi_viewport => multi_viewport = "multiViewport",
    sampler_anisotropy => sampler_anisotropy = "samplerAnisotropy",
    texture_compression_etc2 => texture_compression_etc2 = "textureCompressionETC2",
    texture_compression_astc_ldr => texture_compression_astc_ldr = "textureCompressionASTC_LDR",
    texture_compression_bc => texture_compression_bc = "textureCompressionBC",
    occlusion_query_precise => occlusion_query_precise = "occlusionQueryPrecise",
    pipeline_statistics_query => pipeline_statistics_query = "pipelineStatisticsQuery",
    vertex_pipeline_stores_and_atomics => vertex_pipeline_stores_and_atomics = "vertexPipelineStoresAndAtomics",
    fragment_stores_and_atomics => fragment_stores_and_atomics = "fragmentStoresAndAtomics",
    shader_tessellation_and_geometry_point_size => shader_tessellation_and_geometry_point_size = "shaderTessellationAndGeometryPointSize",
    shader_image_gather_extended => shader_image_gather_extended = "shaderImageGatherExtended",
    shader_storage_image_extended_formats => shader_storage_image_extended_formats = "shaderStorageImageExtendedFormats",
    shader_storage_image_multisample => shader_storage_image_multisample = "shaderStorageImageMultisample",
    shader_storage_image_read_without_format => shader_storage_image_read_without_format = "shaderStorageImageReadWithoutFormat",
    shader_storage_image_write_without_format => shader_storage_image_write_without_format = "shaderStorageImageWriteWithoutFormat",
    shader_uniform_buffer_array_dynamic_indexing => shader_uniform_buffer_array_dynamic_indexing = "shaderUniformBufferArrayDynamicIndexing",
    shader_sampled_image_array_dynamic_indexing => shader_sampled_image_array_dynamic_indexing = "shaderSampledImageArrayDynamicIndexing",
    shader_storage_buffer_array_dynamic_indexing => shader_storage_buffer_array_dynamic_indexing = "shaderStorageBufferArrayDynamicIndexing",
    shader_storage_image_array_dynamic_indexing => shader_storage_image_array_dynamic_indexing = "shaderStorageImageArrayDynamicIndexing",
    shader_clip_distance => shader_clip_distance = "shaderClipDistance",
    shader_cull_distance => shader_cull_distance = "shaderCullDistance",
    shader_float64 => shader_float64 = "shaderFloat64",
    shader_int64 => shader_int64 = "shaderInt64",
    shader_int16 => shader_int16 = "shaderInt16",
    shader_resource_residency => shader_resource_residency = "shaderResourceResidency",
    shader_resource_min_lod => shader_resource_min_lod = "shaderResourceMinLod",
    sparse_binding => sparse_binding = "sparseBinding",
    sparse_residency_buffer => sparse_residency_buffer = "sparseResidencyBuffer",
    sparse_residency_image2d => sparse_residency_image2_d = "sparseResidencyImage2D",
    sparse_residency_image3d => sparse_residency_image3_d = "sparseResidencyImage3D",
    sparse_residency2_samples => sparse_residency2_samples = "sparseResidency2Samples",
    sparse_residency4_samples => sparse_residency4_samples = "sparseResidency4Samples",
    sparse_residency8_samples => sparse_residency8_samples = "sparseResidency8Samples",
    sparse_residency16_samples => sparse_residency16_samples = "sparseResidency16Samples",
    sparse_residency_aliased => sparse_residency_aliased = "sparseResidencyAliased",
    variable_multisample_rate => variable_multisample_rate = "variableMultisampleRate",
    inherited_queries => inherited_queries = "inheritedQueries",
}

macro_rules! feature_structures {
    ($($ty:ident,)+) => {
        /// The feature structures that are kept when copying a device creation chain, with
        /// their sizes.
        const FEATURE_STRUCTURES: &[(vk::StructureType, usize)] = &[
            $((
                <vk::$ty<'static> as vk::TaggedStructure>::STRUCTURE_TYPE,
                mem::size_of::<vk::$ty<'static>>(),
            ),)+
        ];
    };
}

feature_structures! {
    PhysicalDeviceFeatures2,
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
    PhysicalDeviceImagelessFramebufferFeatures,
    PhysicalDeviceHostQueryResetFeatures,
    PhysicalDeviceTimelineSemaphoreFeatures,
    PhysicalDeviceInlineUniformBlockFeatures,
    PhysicalDeviceTransformFeedbackFeaturesEXT,
    PhysicalDeviceConditionalRenderingFeaturesEXT,
    PhysicalDeviceVertexAttributeDivisorFeaturesEXT,
    PhysicalDeviceLineRasterizationFeaturesEXT,
    PhysicalDeviceIndexTypeUint8FeaturesEXT,
    PhysicalDeviceMemoryPriorityFeaturesEXT,
    PhysicalDeviceBlendOperationAdvancedFeaturesEXT,
    PhysicalDeviceShadingRateImageFeaturesNV,
    PhysicalDeviceMeshShaderFeaturesNV,
    PhysicalDeviceExclusiveScissorFeaturesNV,
    PhysicalDeviceComputeShaderDerivativesFeaturesNV,
    PhysicalDeviceCornerSampledImageFeaturesNV,
    PhysicalDeviceRepresentativeFragmentTestFeaturesNV,
    PhysicalDeviceFragmentDensityMapFeaturesEXT,
    PhysicalDeviceVulkan11Features,
    PhysicalDeviceVulkan12Features,
    PhysicalDeviceVulkan13Features,
}

fn feature_structure_size(stype: vk::StructureType) -> Option<usize> {
    FEATURE_STRUCTURES
        .iter()
        .find(|&&(known, _)| known == stype)
        .map(|&(_, size)| size)
}

struct FeatureNode {
    stype: vk::StructureType,
    bytes: Box<[MaybeUninit<u8>]>,
}

/// An owned copy of the feature structures that were chained to a device creation.
///
/// The copied structures have their `p_next` set to null, and can be read back by type.
#[derive(Default)]
pub struct FeatureChain {
    nodes: SmallVec<[FeatureNode; 4]>,
}

impl FeatureChain {
    /// Copies the known feature structures of a `pNext` chain. Other structures are ignored,
    /// and only the first structure of each type is kept.
    ///
    /// # Safety
    ///
    /// - `next` must be null or the head of a chain of readable Vulkan structures.
    pub unsafe fn from_chain(next: *const c_void) -> Self {
        let mut chain = FeatureChain::default();

        for node in unsafe { chain::chain_iter(next) } {
            let stype = unsafe { ffi::structure_type(node) };

            if let Some(size) = feature_structure_size(stype) {
                unsafe { chain.push_raw(stype, node.cast(), size) };
            }
        }

        chain
    }

    /// Adds a copy of a feature structure, unless a structure of the same type is already in
    /// the chain.
    pub fn push<T: vk::TaggedStructure + Copy>(&mut self, structure: T) {
        let ptr: *const T = &structure;
        unsafe { self.push_raw(T::STRUCTURE_TYPE, ptr.cast(), mem::size_of::<T>()) };
    }

    unsafe fn push_raw(&mut self, stype: vk::StructureType, src: *const u8, size: usize) {
        if self.contains(stype) {
            return;
        }

        let mut bytes: Box<[MaybeUninit<u8>]> = vec![MaybeUninit::uninit(); size].into();

        unsafe {
            ptr::copy_nonoverlapping(src.cast::<MaybeUninit<u8>>(), bytes.as_mut_ptr(), size);

            let p_next_offset = mem::offset_of!(vk::BaseOutStructure<'static>, p_next);
            bytes
                .as_mut_ptr()
                .add(p_next_offset)
                .cast::<*mut c_void>()
                .write_unaligned(ptr::null_mut());
        }

        self.nodes.push(FeatureNode { stype, bytes });
    }

    /// Returns whether a structure of the given type was copied.
    #[inline]
    pub fn contains(&self, stype: vk::StructureType) -> bool {
        self.nodes.iter().any(|node| node.stype == stype)
    }

    /// Returns a copy of the structure of type `T`, if the chain had one.
    pub fn get<T: vk::TaggedStructure + Copy>(&self) -> Option<T> {
        let node = self
            .nodes
            .iter()
            .find(|node| node.stype == T::STRUCTURE_TYPE)?;

        if node.bytes.len() != mem::size_of::<T>() {
            return None;
        }

        Some(unsafe { node.bytes.as_ptr().cast::<T>().read_unaligned() })
    }

    /// Returns the structure types in the chain, in chain order.
    pub fn structure_types(&self) -> impl Iterator<Item = vk::StructureType> + '_ {
        self.nodes.iter().map(|node| node.stype)
    }
}

impl Clone for FeatureChain {
    fn clone(&self) -> Self {
        FeatureChain {
            nodes: self
                .nodes
                .iter()
                .map(|node| FeatureNode {
                    stype: node.stype,
                    bytes: node.bytes.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for FeatureChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.structure_types()).finish()
    }
}

/// The features enabled on a device: the core features, plus the feature structures that were
/// chained to `VkDeviceCreateInfo`.
#[derive(Clone, Debug, Default)]
pub struct DeviceFeatures {
    /// The core features, from `VkPhysicalDeviceFeatures2` if it was chained, otherwise from
    /// `pEnabledFeatures`.
    pub core: Features,

    /// The copied feature structures.
    pub chain: FeatureChain,
}

impl DeviceFeatures {
    /// Captures the features enabled by a device creation.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn from_create_info(create_info: &vk::DeviceCreateInfo<'_>) -> Self {
        let chain = unsafe { FeatureChain::from_chain(create_info.p_next) };

        let core = match chain.get::<vk::PhysicalDeviceFeatures2<'static>>() {
            Some(features2) => Features::from(&features2.features),
            None => unsafe { ffi::as_ref(create_info.p_enabled_features) }
                .map(Features::from)
                .unwrap_or_default(),
        };

        DeviceFeatures { core, chain }
    }

    /// Returns the feature structure of type `T`, if it was chained.
    #[inline]
    pub fn get<T: vk::TaggedStructure + Copy>(&self) -> Option<T> {
        self.chain.get()
    }
}
