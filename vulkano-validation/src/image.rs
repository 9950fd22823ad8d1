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
    context::ValidationContext,
    diagnostics::{vuid, ObjectType},
    enums::is_depth_or_stencil_format,
    validator::DeviceValidator,
};
use ash::vk;

const IMAGE_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    DedicatedAllocationImageCreateInfoNV,
    ExternalMemoryImageCreateInfo,
    ExternalMemoryImageCreateInfoNV,
    ImageDrmFormatModifierExplicitCreateInfoEXT,
    ImageDrmFormatModifierListCreateInfoEXT,
    ImageFormatListCreateInfo,
    ImageStencilUsageCreateInfo,
    ImageSwapchainCreateInfoKHR,
];

/// Returns the number of levels in a complete mipmap chain for an image whose largest
/// dimension is `max_dimension`.
///
/// Corner-sampled images have one level less when the dimension is a power of two.
fn max_mip_levels(max_dimension: u32, corner_sampled: bool) -> u32 {
    if max_dimension == 0 {
        0
    } else if corner_sampled {
        u32::BITS - (max_dimension - 1).leading_zeros()
    } else {
        u32::BITS - max_dimension.leading_zeros()
    }
}

impl DeviceValidator {
    /// Validates the parameters of `vkCreateImage`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_image(&self, create_info: &vk::ImageCreateInfo<'_>) -> bool {
        let features = &self.state.features.core;
        let mut ctx = self
            .context("vkCreateImage")
            .with_object(ObjectType::Image, vk::Image::null());

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateImage-pCreateInfo-parameter",
                "VUID-VkImageCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                IMAGE_CREATE_INFO_NEXT,
                "VUID-VkImageCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkImageCreateInfo-flags-parameter",
            vuid::NONE,
        );
        ctx.ranged_enum(
            "pCreateInfo->imageType",
            create_info.image_type,
            "VUID-VkImageCreateInfo-imageType-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->format",
            create_info.format,
            "VUID-VkImageCreateInfo-format-parameter",
        );
        ctx.flags(
            "pCreateInfo->samples",
            create_info.samples,
            FlagKind::RequiredSingleBit,
            "VUID-VkImageCreateInfo-samples-parameter",
            "VUID-VkImageCreateInfo-samples-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->tiling",
            create_info.tiling,
            "VUID-VkImageCreateInfo-tiling-parameter",
        );
        ctx.flags(
            "pCreateInfo->usage",
            create_info.usage,
            FlagKind::RequiredMask,
            "VUID-VkImageCreateInfo-usage-parameter",
            "VUID-VkImageCreateInfo-usage-requiredbitmask",
        );
        ctx.ranged_enum(
            "pCreateInfo->sharingMode",
            create_info.sharing_mode,
            "VUID-VkImageCreateInfo-sharingMode-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->initialLayout",
            create_info.initial_layout,
            "VUID-VkImageCreateInfo-initialLayout-parameter",
        );

        ctx.concurrent_sharing(
            create_info.sharing_mode,
            create_info.queue_family_index_count,
            create_info.p_queue_family_indices,
            "VUID-VkImageCreateInfo-sharingMode-00942",
            "VUID-VkImageCreateInfo-sharingMode-00941",
        );

        let extent = create_info.extent;
        ctx.greater_than_zero(
            "pCreateInfo->extent.width",
            extent.width,
            "VUID-VkImageCreateInfo-extent-00944",
        );
        ctx.greater_than_zero(
            "pCreateInfo->extent.height",
            extent.height,
            "VUID-VkImageCreateInfo-extent-00945",
        );
        ctx.greater_than_zero(
            "pCreateInfo->extent.depth",
            extent.depth,
            "VUID-VkImageCreateInfo-extent-00946",
        );
        ctx.greater_than_zero(
            "pCreateInfo->mipLevels",
            create_info.mip_levels,
            "VUID-VkImageCreateInfo-mipLevels-00947",
        );
        ctx.greater_than_zero(
            "pCreateInfo->arrayLayers",
            create_info.array_layers,
            "VUID-VkImageCreateInfo-arrayLayers-00948",
        );

        if !matches!(
            create_info.initial_layout,
            vk::ImageLayout::UNDEFINED | vk::ImageLayout::PREINITIALIZED,
        ) {
            ctx.error_unattached(
                "VUID-VkImageCreateInfo-initialLayout-00993",
                format_args!(
                    "vkCreateImage(): initialLayout is {:?}, must be VK_IMAGE_LAYOUT_UNDEFINED or \
                    VK_IMAGE_LAYOUT_PREINITIALIZED.",
                    create_info.initial_layout,
                ),
            );
        }

        let flags = create_info.flags;
        let cube_compatible = flags.contains(vk::ImageCreateFlags::CUBE_COMPATIBLE);

        match create_info.image_type {
            vk::ImageType::TYPE_1D if extent.height != 1 || extent.depth != 1 => {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-imageType-00956",
                    format_args!(
                        "vkCreateImage(): if pCreateInfo->imageType is VK_IMAGE_TYPE_1D, both \
                        pCreateInfo->extent.height and pCreateInfo->extent.depth must be 1.",
                    ),
                );
            }
            vk::ImageType::TYPE_2D => {
                if cube_compatible {
                    if extent.width != extent.height {
                        ctx.error(
                            "VUID-VkImageCreateInfo-imageType-00954",
                            format_args!(
                                "vkCreateImage(): pCreateInfo->flags contains \
                                VK_IMAGE_CREATE_CUBE_COMPATIBLE_BIT, but pCreateInfo->extent.width \
                                (={}) and pCreateInfo->extent.height (={}) are not equal.",
                                extent.width, extent.height,
                            ),
                        );
                    }

                    if create_info.array_layers < 6 {
                        ctx.error(
                            "VUID-VkImageCreateInfo-imageType-00954",
                            format_args!(
                                "vkCreateImage(): pCreateInfo->flags contains \
                                VK_IMAGE_CREATE_CUBE_COMPATIBLE_BIT, but pCreateInfo->arrayLayers \
                                (={}) is not greater than or equal to 6.",
                                create_info.array_layers,
                            ),
                        );
                    }
                }

                if extent.depth != 1 {
                    ctx.error_unattached(
                        "VUID-VkImageCreateInfo-imageType-00957",
                        format_args!(
                            "vkCreateImage(): if pCreateInfo->imageType is VK_IMAGE_TYPE_2D, \
                            pCreateInfo->extent.depth must be 1.",
                        ),
                    );
                }
            }
            vk::ImageType::TYPE_3D if create_info.array_layers != 1 => {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-imageType-00961",
                    format_args!(
                        "vkCreateImage(): if pCreateInfo->imageType is VK_IMAGE_TYPE_3D, \
                        pCreateInfo->arrayLayers must be 1.",
                    ),
                );
            }
            _ => {}
        }

        if create_info.samples != vk::SampleCountFlags::TYPE_1
            && (create_info.image_type != vk::ImageType::TYPE_2D
                || cube_compatible
                || create_info.mip_levels != 1
                || create_info.tiling != vk::ImageTiling::OPTIMAL)
        {
            ctx.error_unattached(
                "VUID-VkImageCreateInfo-samples-02257",
                format_args!(
                    "vkCreateImage(): Multi-sample image with incompatible type, usage, tiling, \
                    or mips.",
                ),
            );
        }

        let usage = create_info.usage;

        if usage.contains(vk::ImageUsageFlags::TRANSIENT_ATTACHMENT) {
            let attachment_usage = vk::ImageUsageFlags::COLOR_ATTACHMENT
                | vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT
                | vk::ImageUsageFlags::INPUT_ATTACHMENT;

            if !usage.intersects(attachment_usage) {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-usage-00966",
                    format_args!(
                        "vkCreateImage(): Transient attachment image without a compatible \
                        attachment flag set.",
                    ),
                );
            }

            if !(attachment_usage | vk::ImageUsageFlags::TRANSIENT_ATTACHMENT).contains(usage) {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-usage-00963",
                    format_args!(
                        "vkCreateImage(): Transient attachment image with incompatible usage \
                        flags set.",
                    ),
                );
            }
        }

        let corner_sampled = flags.contains(vk::ImageCreateFlags::CORNER_SAMPLED_NV);
        let max_dimension = extent.width.max(extent.height).max(extent.depth);

        if max_dimension > 0 && create_info.mip_levels > max_mip_levels(max_dimension, corner_sampled)
        {
            ctx.error_unattached(
                "VUID-VkImageCreateInfo-mipLevels-00958",
                format_args!(
                    "vkCreateImage(): pCreateInfo->mipLevels must be less than or equal to \
                    floor(log2(max(pCreateInfo->extent.width, pCreateInfo->extent.height, \
                    pCreateInfo->extent.depth)))+1.",
                ),
            );
        }

        if flags.contains(vk::ImageCreateFlags::TYPE_2D_ARRAY_COMPATIBLE)
            && create_info.image_type != vk::ImageType::TYPE_3D
        {
            ctx.error(
                "VUID-VkImageCreateInfo-flags-00950",
                format_args!(
                    "vkCreateImage(): pCreateInfo->flags contains \
                    VK_IMAGE_CREATE_2D_ARRAY_COMPATIBLE_BIT but pCreateInfo->imageType is not \
                    VK_IMAGE_TYPE_3D.",
                ),
            );
        }

        if flags.contains(vk::ImageCreateFlags::SPARSE_BINDING) && !features.sparse_binding {
            ctx.error(
                "VUID-VkImageCreateInfo-flags-00969",
                format_args!(
                    "vkCreateImage(): pCreateInfo->flags contains \
                    VK_IMAGE_CREATE_SPARSE_BINDING_BIT, but the \
                    VkPhysicalDeviceFeatures::sparseBinding feature is disabled.",
                ),
            );
        }

        if flags.intersects(
            vk::ImageCreateFlags::SPARSE_RESIDENCY | vk::ImageCreateFlags::SPARSE_ALIASED,
        ) && !flags.contains(vk::ImageCreateFlags::SPARSE_BINDING)
        {
            ctx.error_unattached(
                "VUID-VkImageCreateInfo-flags-00987",
                format_args!(
                    "vkCreateImage: if pCreateInfo->flags contains \
                    VK_IMAGE_CREATE_SPARSE_RESIDENCY_BIT or VK_IMAGE_CREATE_SPARSE_ALIASED_BIT, it \
                    must also contain VK_IMAGE_CREATE_SPARSE_BINDING_BIT.",
                ),
            );
        }

        if flags.contains(vk::ImageCreateFlags::SPARSE_RESIDENCY) {
            self.validate_sparse_residency_image(&mut ctx, create_info);
        }

        if usage.contains(vk::ImageUsageFlags::SHADING_RATE_IMAGE_NV) {
            if create_info.image_type != vk::ImageType::TYPE_2D {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-imageType-02082",
                    format_args!(
                        "vkCreateImage: if usage includes VK_IMAGE_USAGE_SHADING_RATE_IMAGE_BIT_NV, \
                        imageType must be VK_IMAGE_TYPE_2D.",
                    ),
                );
            }

            if create_info.samples != vk::SampleCountFlags::TYPE_1 {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-samples-02083",
                    format_args!(
                        "vkCreateImage: if usage includes VK_IMAGE_USAGE_SHADING_RATE_IMAGE_BIT_NV, \
                        samples must be VK_SAMPLE_COUNT_1_BIT.",
                    ),
                );
            }

            if create_info.tiling != vk::ImageTiling::OPTIMAL {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-tiling-02084",
                    format_args!(
                        "vkCreateImage: if usage includes VK_IMAGE_USAGE_SHADING_RATE_IMAGE_BIT_NV, \
                        tiling must be VK_IMAGE_TILING_OPTIMAL.",
                    ),
                );
            }
        }

        if corner_sampled {
            if !matches!(
                create_info.image_type,
                vk::ImageType::TYPE_2D | vk::ImageType::TYPE_3D,
            ) {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-flags-02050",
                    format_args!(
                        "vkCreateImage: If flags contains VK_IMAGE_CREATE_CORNER_SAMPLED_BIT_NV, \
                        imageType must be VK_IMAGE_TYPE_2D or VK_IMAGE_TYPE_3D.",
                    ),
                );
            }

            if cube_compatible || is_depth_or_stencil_format(create_info.format) {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-flags-02051",
                    format_args!(
                        "vkCreateImage: If flags contains VK_IMAGE_CREATE_CORNER_SAMPLED_BIT_NV, \
                        it must not also contain VK_IMAGE_CREATE_CUBE_COMPATIBLE_BIT and format \
                        must not be a depth/stencil format.",
                    ),
                );
            }

            if create_info.image_type == vk::ImageType::TYPE_2D
                && (extent.width == 1 || extent.height == 1)
            {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-flags-02052",
                    format_args!(
                        "vkCreateImage: If flags contains VK_IMAGE_CREATE_CORNER_SAMPLED_BIT_NV and \
                        imageType is VK_IMAGE_TYPE_2D, extent.width and extent.height must be \
                        greater than 1.",
                    ),
                );
            } else if create_info.image_type == vk::ImageType::TYPE_3D
                && (extent.width == 1 || extent.height == 1 || extent.depth == 1)
            {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-flags-02053",
                    format_args!(
                        "vkCreateImage: If flags contains VK_IMAGE_CREATE_CORNER_SAMPLED_BIT_NV and \
                        imageType is VK_IMAGE_TYPE_3D, extent.width, extent.height, and \
                        extent.depth must be greater than 1.",
                    ),
                );
            }
        }

        ctx.finish()
    }

    /// The combinations that sparse residency does not support, or that need a feature.
    fn validate_sparse_residency_image(
        &self,
        ctx: &mut ValidationContext<'_>,
        create_info: &vk::ImageCreateInfo<'_>,
    ) {
        let features = &self.state.features.core;

        if create_info.tiling == vk::ImageTiling::LINEAR {
            ctx.error_unattached(
                vuid::INVALID_USAGE,
                format_args!(
                    "vkCreateImage: if pCreateInfo->flags contains \
                    VK_IMAGE_CREATE_SPARSE_RESIDENCY_BIT then image tiling of \
                    VK_IMAGE_TILING_LINEAR is not supported",
                ),
            );
        }

        match create_info.image_type {
            vk::ImageType::TYPE_1D => {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-imageType-00970",
                    format_args!(
                        "vkCreateImage: cannot specify VK_IMAGE_CREATE_SPARSE_BINDING_BIT for 1D \
                        image.",
                    ),
                );
            }
            vk::ImageType::TYPE_2D => {
                if !features.sparse_residency_image2d {
                    ctx.error_unattached(
                        "VUID-VkImageCreateInfo-imageType-00971",
                        format_args!(
                            "vkCreateImage: cannot specify VK_IMAGE_CREATE_SPARSE_BINDING_BIT for \
                            2D image if corresponding feature is not enabled on the device.",
                        ),
                    );
                }

                let sample_rule = match create_info.samples {
                    vk::SampleCountFlags::TYPE_2 => Some((
                        features.sparse_residency2_samples,
                        "VUID-VkImageCreateInfo-imageType-00973",
                        2,
                    )),
                    vk::SampleCountFlags::TYPE_4 => Some((
                        features.sparse_residency4_samples,
                        "VUID-VkImageCreateInfo-imageType-00974",
                        4,
                    )),
                    vk::SampleCountFlags::TYPE_8 => Some((
                        features.sparse_residency8_samples,
                        "VUID-VkImageCreateInfo-imageType-00975",
                        8,
                    )),
                    vk::SampleCountFlags::TYPE_16 => Some((
                        features.sparse_residency16_samples,
                        "VUID-VkImageCreateInfo-imageType-00976",
                        16,
                    )),
                    _ => None,
                };

                if let Some((false, vuid, samples)) = sample_rule {
                    ctx.error_unattached(
                        vuid,
                        format_args!(
                            "vkCreateImage: cannot specify VK_IMAGE_CREATE_SPARSE_BINDING_BIT for \
                            {}-sample image if corresponding feature is not enabled on the device.",
                            samples,
                        ),
                    );
                }
            }
            vk::ImageType::TYPE_3D if !features.sparse_residency_image3d => {
                ctx.error_unattached(
                    "VUID-VkImageCreateInfo-imageType-00972",
                    format_args!(
                        "vkCreateImage: cannot specify VK_IMAGE_CREATE_SPARSE_BINDING_BIT for 3D \
                        image if corresponding feature is not enabled on the device.",
                    ),
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::max_mip_levels;
    use crate::{Features, Severity};
    use ash::vk;

    fn image_create_info() -> vk::ImageCreateInfo<'static> {
        vk::ImageCreateInfo::default()
            .image_type(vk::ImageType::TYPE_2D)
            .format(vk::Format::R8G8B8A8_UNORM)
            .extent(vk::Extent3D {
                width: 64,
                height: 64,
                depth: 1,
            })
            .mip_levels(1)
            .array_layers(1)
            .samples(vk::SampleCountFlags::TYPE_1)
            .tiling(vk::ImageTiling::OPTIMAL)
            .usage(vk::ImageUsageFlags::SAMPLED)
            .initial_layout(vk::ImageLayout::UNDEFINED)
    }

    #[test]
    fn mip_levels() {
        assert_eq!(max_mip_levels(1, false), 1);
        assert_eq!(max_mip_levels(64, false), 7);
        assert_eq!(max_mip_levels(65, false), 7);
        assert_eq!(max_mip_levels(64, true), 6);
        assert_eq!(max_mip_levels(65, true), 7);
        assert_eq!(max_mip_levels(1, true), 0);
    }

    #[test]
    fn valid() {
        let (sink, validator) = device_validator!();

        assert!(!unsafe { validator.validate_create_image(&image_create_info()) });
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn cube_compatible_layers() {
        let (sink, validator) = device_validator!();
        let create_info = image_create_info()
            .flags(vk::ImageCreateFlags::CUBE_COMPATIBLE)
            .array_layers(5);

        assert!(unsafe { validator.validate_create_image(&create_info) });
        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].vuid, "VUID-VkImageCreateInfo-imageType-00954");
        assert!(diagnostics[0].message.contains("arrayLayers (=5)"));

        let create_info = create_info.array_layers(6);
        assert!(!unsafe { validator.validate_create_image(&create_info) });
    }

    #[test]
    fn dimensions() {
        let (sink, validator) = device_validator!();

        let create_info = image_create_info().image_type(vk::ImageType::TYPE_1D);
        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkImageCreateInfo-imageType-00956"],
        );
        sink.take();

        let create_info = image_create_info()
            .image_type(vk::ImageType::TYPE_3D)
            .array_layers(2);
        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkImageCreateInfo-imageType-00961"],
        );
        sink.take();

        let create_info = image_create_info().mip_levels(8);
        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkImageCreateInfo-mipLevels-00958"],
        );
    }

    #[test]
    fn multisample() {
        let (sink, validator) = device_validator!();
        let create_info = image_create_info()
            .samples(vk::SampleCountFlags::TYPE_4)
            .mip_levels(2);

        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkImageCreateInfo-samples-02257"],
        );
    }

    #[test]
    fn transient_attachment() {
        let (sink, validator) = device_validator!();
        let create_info = image_create_info()
            .usage(vk::ImageUsageFlags::TRANSIENT_ATTACHMENT | vk::ImageUsageFlags::SAMPLED);

        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkImageCreateInfo-usage-00966",
                "VUID-VkImageCreateInfo-usage-00963",
            ],
        );
    }

    #[test]
    fn sparse_residency() {
        let create_info = image_create_info().flags(
            vk::ImageCreateFlags::SPARSE_BINDING | vk::ImageCreateFlags::SPARSE_RESIDENCY,
        );

        let (sink, validator) = device_validator!();
        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkImageCreateInfo-flags-00969",
                "VUID-VkImageCreateInfo-imageType-00971",
            ],
        );

        let (sink, validator) = device_validator!(features: Features {
            sparse_binding: true,
            sparse_residency_image2d: true,
            ..Features::none()
        });
        assert!(!unsafe { validator.validate_create_image(&create_info) });
        assert!(sink.diagnostics().is_empty());

        let create_info = create_info.samples(vk::SampleCountFlags::TYPE_4);
        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkImageCreateInfo-imageType-00974"],
        );
    }

    #[test]
    fn corner_sampled() {
        let (sink, validator) = device_validator!();
        let create_info = image_create_info()
            .flags(vk::ImageCreateFlags::CORNER_SAMPLED_NV)
            .format(vk::Format::D32_SFLOAT)
            .extent(vk::Extent3D {
                width: 1,
                height: 64,
                depth: 1,
            });

        assert!(unsafe { validator.validate_create_image(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkImageCreateInfo-flags-02051",
                "VUID-VkImageCreateInfo-flags-02052",
            ],
        );
    }
}
