// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The extensions known to the validator, and what they require of each other.

use crate::{
    context::ValidationContext,
    diagnostics::{ObjectType, Severity},
    NonExhaustive,
};
use smallvec::SmallVec;
use std::{ffi::CStr, fmt};

/// The other extensions that must be enabled together with an extension.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExtensionRequirements {
    pub(crate) instance_extensions: &'static [&'static str],
    pub(crate) device_extensions: &'static [&'static str],
}

macro_rules! extensions {
    {
        $(#[doc = $doc:literal])*
        $ty:ident,
        $($member:ident => {
            raw: $raw:literal,
            requires_instance_extensions: [$($requires_instance:literal),* $(,)?],
            requires_device_extensions: [$($requires_device:literal),* $(,)?],
        },)*
    } => {
        $(#[doc = $doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $ty {
            $(
                #[doc = concat!("`", $raw, "`")]
                pub $member: bool,
            )*
            pub _ne: NonExhaustive,
        }

        impl $ty {
            /// The names of all the extensions in this set.
            pub(crate) const NAMES: &'static [&'static str] = &[$($raw),*];

            /// Returns an extension set with nothing enabled.
            #[inline]
            pub const fn empty() -> Self {
                $ty {
                    $($member: false,)*
                    _ne: NonExhaustive(()),
                }
            }

            /// Builds the set of the extensions named in a create info. Unknown names are
            /// ignored.
            pub fn from_names<'a>(names: impl IntoIterator<Item = &'a CStr>) -> Self {
                let mut extensions = Self::empty();

                for name in names {
                    let name = name.to_bytes();
                    $(
                        if name == $raw.as_bytes() {
                            extensions.$member = true;
                        }
                    )*
                }

                extensions
            }

            /// Returns whether the extension with the given name is enabled. Unknown names are
            /// never enabled.
            #[inline]
            pub fn is_enabled_by_name(&self, name: &CStr) -> bool {
                self.is_enabled_by_bytes(name.to_bytes())
            }

            pub(crate) fn is_enabled_by_bytes(&self, name: &[u8]) -> bool {
                $(
                    if name == $raw.as_bytes() {
                        return self.$member;
                    }
                )*

                false
            }

            /// Returns whether the validator knows an extension with this name.
            pub(crate) fn is_known(name: &[u8]) -> bool {
                Self::NAMES.iter().any(|raw| raw.as_bytes() == name)
            }

            /// Returns the names of the enabled extensions.
            pub fn enabled_names(&self) -> impl Iterator<Item = &'static str> {
                [$((self.$member, $raw)),*]
                    .into_iter()
                    .filter_map(|(enabled, raw)| enabled.then_some(raw))
            }

            /// Returns what the extension with the given name requires, if it is known.
            pub(crate) fn requirements(name: &[u8]) -> Option<ExtensionRequirements> {
                $(
                    if name == $raw.as_bytes() {
                        return Some(ExtensionRequirements {
                            instance_extensions: &[$($requires_instance),*],
                            device_extensions: &[$($requires_device),*],
                        });
                    }
                )*

                None
            }
        }

        impl Default for $ty {
            #[inline]
            fn default() -> Self {
                Self::empty()
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.enabled_names()).finish()
            }
        }
    };
}

extensions! {
    /// The instance extensions known to the validator.
    InstanceExtensions,
    khr_surface => {
        raw: "VK_KHR_surface",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_display => {
        raw: "VK_KHR_display",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_android_surface => {
        raw: "VK_KHR_android_surface",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_wayland_surface => {
        raw: "VK_KHR_wayland_surface",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_win32_surface => {
        raw: "VK_KHR_win32_surface",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_xcb_surface => {
        raw: "VK_KHR_xcb_surface",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_xlib_surface => {
        raw: "VK_KHR_xlib_surface",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_get_physical_device_properties2 => {
        raw: "VK_KHR_get_physical_device_properties2",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_get_surface_capabilities2 => {
        raw: "VK_KHR_get_surface_capabilities2",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_device_group_creation => {
        raw: "VK_KHR_device_group_creation",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_external_memory_capabilities => {
        raw: "VK_KHR_external_memory_capabilities",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_external_semaphore_capabilities => {
        raw: "VK_KHR_external_semaphore_capabilities",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_external_fence_capabilities => {
        raw: "VK_KHR_external_fence_capabilities",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_portability_enumeration => {
        raw: "VK_KHR_portability_enumeration",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_debug_report => {
        raw: "VK_EXT_debug_report",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_debug_utils => {
        raw: "VK_EXT_debug_utils",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_display_surface_counter => {
        raw: "VK_EXT_display_surface_counter",
        requires_instance_extensions: ["VK_KHR_display"],
        requires_device_extensions: [],
    },
    ext_swapchain_colorspace => {
        raw: "VK_EXT_swapchain_colorspace",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    ext_validation_features => {
        raw: "VK_EXT_validation_features",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_validation_flags => {
        raw: "VK_EXT_validation_flags",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_external_memory_capabilities => {
        raw: "VK_NV_external_memory_capabilities",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
}

extensions! {
    /// The device extensions known to the validator.
    DeviceExtensions,
    khr_swapchain => {
        raw: "VK_KHR_swapchain",
        requires_instance_extensions: ["VK_KHR_surface"],
        requires_device_extensions: [],
    },
    khr_display_swapchain => {
        raw: "VK_KHR_display_swapchain",
        requires_instance_extensions: ["VK_KHR_display"],
        requires_device_extensions: ["VK_KHR_swapchain"],
    },
    khr_incremental_present => {
        raw: "VK_KHR_incremental_present",
        requires_instance_extensions: [],
        requires_device_extensions: ["VK_KHR_swapchain"],
    },
    khr_shared_presentable_image => {
        raw: "VK_KHR_shared_presentable_image",
        requires_instance_extensions: [
            "VK_KHR_get_physical_device_properties2",
            "VK_KHR_get_surface_capabilities2",
        ],
        requires_device_extensions: ["VK_KHR_swapchain"],
    },
    khr_maintenance1 => {
        raw: "VK_KHR_maintenance1",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_maintenance2 => {
        raw: "VK_KHR_maintenance2",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_maintenance3 => {
        raw: "VK_KHR_maintenance3",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_bind_memory2 => {
        raw: "VK_KHR_bind_memory2",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_get_memory_requirements2 => {
        raw: "VK_KHR_get_memory_requirements2",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_dedicated_allocation => {
        raw: "VK_KHR_dedicated_allocation",
        requires_instance_extensions: [],
        requires_device_extensions: ["VK_KHR_get_memory_requirements2"],
    },
    khr_external_memory => {
        raw: "VK_KHR_external_memory",
        requires_instance_extensions: ["VK_KHR_external_memory_capabilities"],
        requires_device_extensions: [],
    },
    khr_device_group => {
        raw: "VK_KHR_device_group",
        requires_instance_extensions: ["VK_KHR_device_group_creation"],
        requires_device_extensions: [],
    },
    khr_multiview => {
        raw: "VK_KHR_multiview",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_create_renderpass2 => {
        raw: "VK_KHR_create_renderpass2",
        requires_instance_extensions: [],
        requires_device_extensions: ["VK_KHR_multiview", "VK_KHR_maintenance2"],
    },
    khr_image_format_list => {
        raw: "VK_KHR_image_format_list",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_imageless_framebuffer => {
        raw: "VK_KHR_imageless_framebuffer",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: ["VK_KHR_maintenance2", "VK_KHR_image_format_list"],
    },
    khr_sampler_mirror_clamp_to_edge => {
        raw: "VK_KHR_sampler_mirror_clamp_to_edge",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_sampler_ycbcr_conversion => {
        raw: "VK_KHR_sampler_ycbcr_conversion",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [
            "VK_KHR_maintenance1",
            "VK_KHR_bind_memory2",
            "VK_KHR_get_memory_requirements2",
        ],
    },
    khr_draw_indirect_count => {
        raw: "VK_KHR_draw_indirect_count",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    khr_push_descriptor => {
        raw: "VK_KHR_push_descriptor",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_timeline_semaphore => {
        raw: "VK_KHR_timeline_semaphore",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_buffer_device_address => {
        raw: "VK_KHR_buffer_device_address",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_performance_query => {
        raw: "VK_KHR_performance_query",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    khr_portability_subset => {
        raw: "VK_KHR_portability_subset",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    amd_negative_viewport_height => {
        raw: "VK_AMD_negative_viewport_height",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    amd_rasterization_order => {
        raw: "VK_AMD_rasterization_order",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_blend_operation_advanced => {
        raw: "VK_EXT_blend_operation_advanced",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_conditional_rendering => {
        raw: "VK_EXT_conditional_rendering",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_conservative_rasterization => {
        raw: "VK_EXT_conservative_rasterization",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_custom_border_color => {
        raw: "VK_EXT_custom_border_color",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_depth_range_unrestricted => {
        raw: "VK_EXT_depth_range_unrestricted",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_discard_rectangles => {
        raw: "VK_EXT_discard_rectangles",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_display_control => {
        raw: "VK_EXT_display_control",
        requires_instance_extensions: ["VK_EXT_display_surface_counter"],
        requires_device_extensions: ["VK_KHR_swapchain"],
    },
    ext_filter_cubic => {
        raw: "VK_EXT_filter_cubic",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_host_query_reset => {
        raw: "VK_EXT_host_query_reset",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_index_type_uint8 => {
        raw: "VK_EXT_index_type_uint8",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_inline_uniform_block => {
        raw: "VK_EXT_inline_uniform_block",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: ["VK_KHR_maintenance1"],
    },
    ext_line_rasterization => {
        raw: "VK_EXT_line_rasterization",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_memory_priority => {
        raw: "VK_EXT_memory_priority",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_pipeline_creation_feedback => {
        raw: "VK_EXT_pipeline_creation_feedback",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    ext_sample_locations => {
        raw: "VK_EXT_sample_locations",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_transform_feedback => {
        raw: "VK_EXT_transform_feedback",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    ext_vertex_attribute_divisor => {
        raw: "VK_EXT_vertex_attribute_divisor",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    google_display_timing => {
        raw: "VK_GOOGLE_display_timing",
        requires_instance_extensions: [],
        requires_device_extensions: ["VK_KHR_swapchain"],
    },
    img_filter_cubic => {
        raw: "VK_IMG_filter_cubic",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_clip_space_w_scaling => {
        raw: "VK_NV_clip_space_w_scaling",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_dedicated_allocation => {
        raw: "VK_NV_dedicated_allocation",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_fill_rectangle => {
        raw: "VK_NV_fill_rectangle",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_fragment_coverage_to_color => {
        raw: "VK_NV_fragment_coverage_to_color",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_framebuffer_mixed_samples => {
        raw: "VK_NV_framebuffer_mixed_samples",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
    nv_mesh_shader => {
        raw: "VK_NV_mesh_shader",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    nv_ray_tracing => {
        raw: "VK_NV_ray_tracing",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: ["VK_KHR_get_memory_requirements2"],
    },
    nv_scissor_exclusive => {
        raw: "VK_NV_scissor_exclusive",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    nv_shading_rate_image => {
        raw: "VK_NV_shading_rate_image",
        requires_instance_extensions: ["VK_KHR_get_physical_device_properties2"],
        requires_device_extensions: [],
    },
    nv_viewport_swizzle => {
        raw: "VK_NV_viewport_swizzle",
        requires_instance_extensions: [],
        requires_device_extensions: [],
    },
}

impl InstanceExtensions {
    /// Returns the prerequisites of the instance extension `name` that are not enabled.
    pub(crate) fn missing_requirements(&self, name: &[u8]) -> SmallVec<[&'static str; 4]> {
        let Some(requirements) = Self::requirements(name) else {
            return SmallVec::new();
        };

        requirements
            .instance_extensions
            .iter()
            .copied()
            .filter(|required| !self.is_enabled_by_bytes(required.as_bytes()))
            .collect()
    }
}

impl DeviceExtensions {
    /// Returns the prerequisites of the device extension `name` that are not enabled. Instance
    /// extension prerequisites are looked up in `instance_extensions`.
    pub(crate) fn missing_requirements(
        &self,
        instance_extensions: &InstanceExtensions,
        name: &[u8],
    ) -> SmallVec<[&'static str; 4]> {
        let Some(requirements) = Self::requirements(name) else {
            return SmallVec::new();
        };

        let missing_instance = requirements
            .instance_extensions
            .iter()
            .copied()
            .filter(|required| !instance_extensions.is_enabled_by_bytes(required.as_bytes()));
        let missing_device = requirements
            .device_extensions
            .iter()
            .copied()
            .filter(|required| !self.is_enabled_by_bytes(required.as_bytes()));

        missing_instance.chain(missing_device).collect()
    }
}

/// Whether an extension is enabled on an instance or on a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExtensionScope {
    Instance,
    Device,
}

impl fmt::Display for ExtensionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Instance => "instance",
            Self::Device => "device",
        })
    }
}

struct NameList<'a>(&'a [&'static str]);

impl fmt::Display for NameList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.0.iter().enumerate() {
            if index != 0 {
                f.write_str(", ")?;
            }

            f.write_str(name)?;
        }

        Ok(())
    }
}

impl ValidationContext<'_> {
    /// Reports, in one diagnostic, the prerequisites of an enabled extension that are missing.
    pub(crate) fn extension_requirements(
        &mut self,
        scope: ExtensionScope,
        extension_name: &[u8],
        missing: &[&'static str],
        vuid: &'static str,
    ) -> bool {
        if missing.is_empty() {
            return false;
        }

        self.report(
            Severity::Error,
            ObjectType::Instance,
            0,
            vuid,
            format_args!(
                "Missing extension{} required by the {} extension {}: {}.",
                if missing.len() > 1 { "s" } else { "" },
                scope,
                String::from_utf8_lossy(extension_name),
                NameList(missing),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceExtensions, ExtensionScope, InstanceExtensions};
    use crate::{
        context::{ValidationContext, ValidatorConfig},
        diagnostics::CollectingSink,
    };
    use std::sync::Arc;

    #[test]
    fn from_names() {
        let extensions =
            DeviceExtensions::from_names([c"VK_KHR_swapchain", c"VK_FOO_unknown", c"VK_NV_mesh_shader"]);

        assert!(extensions.khr_swapchain);
        assert!(extensions.nv_mesh_shader);
        assert!(!extensions.khr_maintenance1);
        assert!(extensions.is_enabled_by_name(c"VK_KHR_swapchain"));
        assert!(!extensions.is_enabled_by_name(c"VK_FOO_unknown"));
        assert_eq!(
            extensions.enabled_names().collect::<Vec<_>>(),
            ["VK_KHR_swapchain", "VK_NV_mesh_shader"],
        );
    }

    #[test]
    fn requirements_name_known_extensions() {
        let all_requirements = InstanceExtensions::NAMES
            .iter()
            .map(|name| InstanceExtensions::requirements(name.as_bytes()).unwrap())
            .chain(
                DeviceExtensions::NAMES
                    .iter()
                    .map(|name| DeviceExtensions::requirements(name.as_bytes()).unwrap()),
            );

        for requirements in all_requirements {
            for required in requirements.instance_extensions {
                assert!(InstanceExtensions::is_known(required.as_bytes()), "{}", required);
            }

            for required in requirements.device_extensions {
                assert!(DeviceExtensions::is_known(required.as_bytes()), "{}", required);
            }
        }
    }

    #[test]
    fn missing_requirements() {
        let instance = InstanceExtensions {
            khr_surface: true,
            ..InstanceExtensions::empty()
        };
        let device = DeviceExtensions {
            khr_maintenance2: true,
            ..DeviceExtensions::empty()
        };

        assert!(device.missing_requirements(&instance, b"VK_KHR_swapchain").is_empty());
        assert_eq!(
            device
                .missing_requirements(&instance, b"VK_KHR_imageless_framebuffer")
                .as_slice(),
            ["VK_KHR_get_physical_device_properties2", "VK_KHR_image_format_list"],
        );
        assert!(device.missing_requirements(&instance, b"VK_FOO_unknown").is_empty());
        assert_eq!(
            InstanceExtensions::empty()
                .missing_requirements(b"VK_KHR_display")
                .as_slice(),
            ["VK_KHR_surface"],
        );
    }

    #[test]
    fn requirement_message() {
        let sink = Arc::new(CollectingSink::new());
        let config = ValidatorConfig {
            sink: sink.clone(),
            ..ValidatorConfig::default()
        };
        let mut ctx = ValidationContext::new(&config, "vkCreateDevice");

        assert!(!ctx.extension_requirements(ExtensionScope::Device, b"VK_KHR_swapchain", &[], "VUID-a"));
        assert!(ctx.extension_requirements(
            ExtensionScope::Device,
            b"VK_KHR_sampler_ycbcr_conversion",
            &["VK_KHR_maintenance1", "VK_KHR_bind_memory2"],
            "VUID-a",
        ));
        assert_eq!(
            sink.diagnostics()[0].message,
            "Missing extensions required by the device extension \
            VK_KHR_sampler_ycbcr_conversion: VK_KHR_maintenance1, VK_KHR_bind_memory2.",
        );
    }
}
