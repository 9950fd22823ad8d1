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

const SAMPLER_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    SamplerCustomBorderColorCreateInfoEXT,
    SamplerReductionModeCreateInfo,
    SamplerYcbcrConversionInfo,
];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateSampler`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_sampler(&self, create_info: &vk::SamplerCreateInfo<'_>) -> bool {
        let features = &self.state.features.core;
        let limits = &self.state.limits;
        let extensions = &self.state.extensions;
        let mut ctx = self
            .context("vkCreateSampler")
            .with_object(ObjectType::Sampler, vk::Sampler::null());

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateSampler-pCreateInfo-parameter",
                "VUID-VkSamplerCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                SAMPLER_CREATE_INFO_NEXT,
                "VUID-VkSamplerCreateInfo-pNext-pNext",
            )
        };
        ctx.ranged_enum(
            "pCreateInfo->magFilter",
            create_info.mag_filter,
            "VUID-VkSamplerCreateInfo-magFilter-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->minFilter",
            create_info.min_filter,
            "VUID-VkSamplerCreateInfo-minFilter-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->mipmapMode",
            create_info.mipmap_mode,
            "VUID-VkSamplerCreateInfo-mipmapMode-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->addressModeU",
            create_info.address_mode_u,
            "VUID-VkSamplerCreateInfo-addressModeU-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->addressModeV",
            create_info.address_mode_v,
            "VUID-VkSamplerCreateInfo-addressModeV-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->addressModeW",
            create_info.address_mode_w,
            "VUID-VkSamplerCreateInfo-addressModeW-parameter",
        );
        ctx.bool32("pCreateInfo->anisotropyEnable", create_info.anisotropy_enable);
        ctx.bool32("pCreateInfo->compareEnable", create_info.compare_enable);
        ctx.bool32(
            "pCreateInfo->unnormalizedCoordinates",
            create_info.unnormalized_coordinates,
        );

        let anisotropy_enable = create_info.anisotropy_enable == vk::TRUE;

        if anisotropy_enable {
            if !(1.0..=limits.max_sampler_anisotropy).contains(&create_info.max_anisotropy) {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-anisotropyEnable-01071",
                    format_args!(
                        "vkCreateSampler(): value of pCreateInfo->maxAnisotropy must be in range \
                        [1.0, {}] VkPhysicalDeviceLimits::maxSamplerAnistropy, but {} found.",
                        limits.max_sampler_anisotropy, create_info.max_anisotropy,
                    ),
                );
            }

            if !features.sampler_anisotropy {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-anisotropyEnable-01070",
                    format_args!(
                        "vkCreateSampler(): Anisotropic sampling feature is not enabled, \
                        pCreateInfo->anisotropyEnable must be VK_FALSE.",
                    ),
                );
            }
        }

        if create_info.unnormalized_coordinates == vk::TRUE {
            if create_info.min_filter != create_info.mag_filter {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01072",
                    format_args!(
                        "vkCreateSampler(): when pCreateInfo->unnormalizedCoordinates is VK_TRUE, \
                        pCreateInfo->minFilter ({:?}) and pCreateInfo->magFilter ({:?}) must be \
                        equal.",
                        create_info.min_filter, create_info.mag_filter,
                    ),
                );
            }

            if create_info.mipmap_mode != vk::SamplerMipmapMode::NEAREST {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01073",
                    format_args!(
                        "vkCreateSampler(): when pCreateInfo->unnormalizedCoordinates is VK_TRUE, \
                        pCreateInfo->mipmapMode ({:?}) must be VK_SAMPLER_MIPMAP_MODE_NEAREST.",
                        create_info.mipmap_mode,
                    ),
                );
            }

            if create_info.min_lod != 0.0 || create_info.max_lod != 0.0 {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01074",
                    format_args!(
                        "vkCreateSampler(): when pCreateInfo->unnormalizedCoordinates is VK_TRUE, \
                        pCreateInfo->minLod ({}) and pCreateInfo->maxLod ({}) must both be zero.",
                        create_info.min_lod, create_info.max_lod,
                    ),
                );
            }

            let is_clamp = |mode| {
                matches!(
                    mode,
                    vk::SamplerAddressMode::CLAMP_TO_EDGE | vk::SamplerAddressMode::CLAMP_TO_BORDER,
                )
            };

            if !is_clamp(create_info.address_mode_u) || !is_clamp(create_info.address_mode_v) {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01075",
                    format_args!(
                        "vkCreateSampler(): when pCreateInfo->unnormalizedCoordinates is VK_TRUE, \
                        pCreateInfo->addressModeU ({:?}) and pCreateInfo->addressModeV ({:?}) \
                        must both be VK_SAMPLER_ADDRESS_MODE_CLAMP_TO_EDGE or \
                        VK_SAMPLER_ADDRESS_MODE_CLAMP_TO_BORDER.",
                        create_info.address_mode_u, create_info.address_mode_v,
                    ),
                );
            }

            if anisotropy_enable {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01076",
                    format_args!(
                        "vkCreateSampler(): pCreateInfo->anisotropyEnable and \
                        pCreateInfo->unnormalizedCoordinates must not both be VK_TRUE.",
                    ),
                );
            }

            if create_info.compare_enable == vk::TRUE {
                ctx.error_unattached(
                    "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01077",
                    format_args!(
                        "vkCreateSampler(): pCreateInfo->compareEnable and \
                        pCreateInfo->unnormalizedCoordinates must not both be VK_TRUE.",
                    ),
                );
            }
        }

        if create_info.compare_enable == vk::TRUE {
            ctx.ranged_enum(
                "pCreateInfo->compareOp",
                create_info.compare_op,
                "VUID-VkSamplerCreateInfo-compareEnable-01080",
            );
        }

        let address_modes = [
            create_info.address_mode_u,
            create_info.address_mode_v,
            create_info.address_mode_w,
        ];

        if address_modes.contains(&vk::SamplerAddressMode::CLAMP_TO_BORDER) {
            ctx.ranged_enum(
                "pCreateInfo->borderColor",
                create_info.border_color,
                "VUID-VkSamplerCreateInfo-addressModeU-01078",
            );
        }

        if !extensions.khr_sampler_mirror_clamp_to_edge
            && address_modes.contains(&vk::SamplerAddressMode::MIRROR_CLAMP_TO_EDGE)
        {
            ctx.error_unattached(
                "VUID-VkSamplerCreateInfo-addressModeU-01079",
                format_args!(
                    "vkCreateSampler(): A VkSamplerAddressMode value is set to \
                    VK_SAMPLER_ADDRESS_MODE_MIRROR_CLAMP_TO_EDGE but the \
                    VK_KHR_sampler_mirror_clamp_to_edge extension has not been enabled.",
                ),
            );
        }

        if extensions.img_filter_cubic
            && anisotropy_enable
            && (create_info.min_filter == vk::Filter::CUBIC_EXT
                || create_info.mag_filter == vk::Filter::CUBIC_EXT)
        {
            ctx.error_unattached(
                "VUID-VkSamplerCreateInfo-magFilter-01081",
                format_args!(
                    "vkCreateSampler(): Anisotropic sampling must not be VK_TRUE when either \
                    minFilter or magFilter are VK_FILTER_CUBIC_IMG.",
                ),
            );
        }

        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{DeviceExtensions, Features, Severity};
    use ash::vk;

    fn sampler_create_info() -> vk::SamplerCreateInfo<'static> {
        vk::SamplerCreateInfo::default()
            .mag_filter(vk::Filter::LINEAR)
            .min_filter(vk::Filter::LINEAR)
            .mipmap_mode(vk::SamplerMipmapMode::LINEAR)
            .address_mode_u(vk::SamplerAddressMode::REPEAT)
            .address_mode_v(vk::SamplerAddressMode::REPEAT)
            .address_mode_w(vk::SamplerAddressMode::REPEAT)
            .max_lod(vk::LOD_CLAMP_NONE)
    }

    #[test]
    fn valid() {
        let (sink, validator) = device_validator!();

        assert!(!unsafe { validator.validate_create_sampler(&sampler_create_info()) });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn anisotropy() {
        let create_info = sampler_create_info()
            .anisotropy_enable(true)
            .max_anisotropy(32.0);

        let (sink, validator) = device_validator!();
        assert!(unsafe { validator.validate_create_sampler(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkSamplerCreateInfo-anisotropyEnable-01071",
                "VUID-VkSamplerCreateInfo-anisotropyEnable-01070",
            ],
        );

        let (sink, validator) = device_validator!(features: Features {
            sampler_anisotropy: true,
            ..Features::none()
        });
        let create_info = create_info.max_anisotropy(16.0);
        assert!(!unsafe { validator.validate_create_sampler(&create_info) });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn unnormalized_coordinates() {
        let (sink, validator) = device_validator!();
        let create_info = sampler_create_info()
            .unnormalized_coordinates(true)
            .min_filter(vk::Filter::NEAREST)
            .compare_enable(true)
            .compare_op(vk::CompareOp::LESS);

        assert!(unsafe { validator.validate_create_sampler(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01072",
                "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01073",
                "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01074",
                "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01075",
                "VUID-VkSamplerCreateInfo-unnormalizedCoordinates-01077",
            ],
        );
    }

    #[test]
    fn address_modes() {
        let (sink, validator) = device_validator!();
        let create_info = sampler_create_info()
            .address_mode_w(vk::SamplerAddressMode::MIRROR_CLAMP_TO_EDGE)
            .address_mode_u(vk::SamplerAddressMode::CLAMP_TO_BORDER)
            .border_color(vk::BorderColor::from_raw(42));

        assert!(unsafe { validator.validate_create_sampler(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkSamplerCreateInfo-addressModeU-01078",
                "VUID-VkSamplerCreateInfo-addressModeU-01079",
            ],
        );

        let (sink, validator) = device_validator!(extensions: DeviceExtensions {
            khr_sampler_mirror_clamp_to_edge: true,
            ..DeviceExtensions::empty()
        });
        let create_info = create_info.border_color(vk::BorderColor::FLOAT_OPAQUE_BLACK);
        assert!(!unsafe { validator.validate_create_sampler(&create_info) });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn cubic_anisotropy() {
        let (sink, validator) = device_validator!(
            extensions: DeviceExtensions {
                img_filter_cubic: true,
                ..DeviceExtensions::empty()
            },
            features: Features {
                sampler_anisotropy: true,
                ..Features::none()
            },
        );
        let create_info = sampler_create_info()
            .mag_filter(vk::Filter::CUBIC_EXT)
            .anisotropy_enable(true)
            .max_anisotropy(4.0);

        assert!(unsafe { validator.validate_create_sampler(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkSamplerCreateInfo-magFilter-01081"],
        );
    }
}
