// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{context::ValidationContext, ffi, name::ParameterName, validator::DeviceValidator};
use ash::vk;

/// Returns the size in pixels of the fragments generated with `shading_rate`, if they cover
/// more than one pixel.
fn fragment_size(shading_rate: vk::ShadingRatePaletteEntryNV) -> Option<(u32, u32)> {
    Some(match shading_rate {
        vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_1X2_PIXELS => (1, 2),
        vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_2X1_PIXELS => (2, 1),
        vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_2X2_PIXELS => (2, 2),
        vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_4X2_PIXELS => (4, 2),
        vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_2X4_PIXELS => (2, 4),
        vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_4X4_PIXELS => (4, 4),
        _ => return None,
    })
}

impl DeviceValidator {
    /// Checks a custom coarse sample order: the sample count and location count must fit the
    /// shading rate, and the locations must cover every (pixel, sample) pair of a fragment
    /// exactly once.
    ///
    /// # Safety
    ///
    /// - `order.p_sample_locations` must be null or valid for reads of
    ///   `order.sample_location_count` elements.
    pub(crate) unsafe fn check_coarse_sample_order(
        &self,
        ctx: &mut ValidationContext<'_>,
        order: &vk::CoarseSampleOrderCustomNV<'_>,
        name: &ParameterName,
    ) -> bool {
        let api_name = ctx.api_name();
        let mut skip = false;

        let Some((width, height)) = fragment_size(order.shading_rate) else {
            return ctx.error_unattached(
                "VUID-VkCoarseSampleOrderCustomNV-shadingRate-02073",
                format_args!(
                    "{}: {}.shadingRate must be a shading rate that generates fragments with \
                    more than one pixel.",
                    api_name, name,
                ),
            );
        };

        let sample_count = order.sample_count;
        let supported_counts = self
            .state
            .limits
            .framebuffer_no_attachments_sample_counts
            .as_raw();

        if !sample_count.is_power_of_two() || sample_count & supported_counts == 0 {
            skip |= ctx.error_unattached(
                "VUID-VkCoarseSampleOrderCustomNV-sampleCount-02074",
                format_args!(
                    "{}: {}.sampleCount (={}) must correspond to a sample count enumerated in \
                    VkSampleCountFlags whose corresponding bit is set in \
                    framebufferNoAttachmentsSampleCounts.",
                    api_name, name, sample_count,
                ),
            );
        }

        let location_count = order.sample_location_count;
        let expected_count = u64::from(sample_count) * u64::from(width) * u64::from(height);

        if u64::from(location_count) != expected_count {
            skip |= ctx.error_unattached(
                "VUID-VkCoarseSampleOrderCustomNV-sampleLocationCount-02075",
                format_args!(
                    "{}: {}.sampleLocationCount (={}) must be equal to the product of \
                    sampleCount (={}), the fragment width for shadingRate (={}), and the \
                    fragment height for shadingRate (={}).",
                    api_name, name, location_count, sample_count, width, height,
                ),
            );
        }

        let max_coarse_samples = self.state.shading_rate_image.shading_rate_max_coarse_samples;

        if location_count > max_coarse_samples {
            skip |= ctx.error_unattached(
                "VUID-VkCoarseSampleOrderCustomNV-sampleLocationCount-02076",
                format_args!(
                    "{}: {}.sampleLocationCount (={}) must be less than or equal to \
                    VkPhysicalDeviceShadingRateImagePropertiesNV::shadingRateMaxCoarseSamples \
                    (={}).",
                    api_name, name, location_count, max_coarse_samples,
                ),
            );
        }

        // One bit per (x, y, sample) triple. Triples past bit 63 are not tracked.
        let mut seen = 0u64;

        for (index, location) in unsafe { ffi::slice_or_empty(order.p_sample_locations, location_count) }
            .iter()
            .enumerate()
        {
            if location.pixel_x >= width {
                skip |= ctx.error_unattached(
                    "VUID-VkCoarseSampleLocationNV-pixelX-02078",
                    format_args!(
                        "{}: {}.pSampleLocations[{}].pixelX (={}) must be less than the width \
                        (in pixels) of the fragment (={}).",
                        api_name, name, index, location.pixel_x, width,
                    ),
                );
            }

            if location.pixel_y >= height {
                skip |= ctx.error_unattached(
                    "VUID-VkCoarseSampleLocationNV-pixelY-02079",
                    format_args!(
                        "{}: {}.pSampleLocations[{}].pixelY (={}) must be less than the height \
                        (in pixels) of the fragment (={}).",
                        api_name, name, index, location.pixel_y, height,
                    ),
                );
            }

            if location.sample >= sample_count {
                skip |= ctx.error_unattached(
                    "VUID-VkCoarseSampleLocationNV-sample-02080",
                    format_args!(
                        "{}: {}.pSampleLocations[{}].sample (={}) must be less than the number \
                        of coverage samples in each pixel belonging to the fragment (={}).",
                        api_name, name, index, location.sample, sample_count,
                    ),
                );
            }

            let bit = u64::from(location.sample)
                + u64::from(sample_count)
                    * (u64::from(location.pixel_x) + u64::from(width) * u64::from(location.pixel_y));
            seen |= u32::try_from(bit)
                .ok()
                .and_then(|bit| 1u64.checked_shl(bit))
                .unwrap_or(0);
        }

        let expected = if location_count >= 64 {
            u64::MAX
        } else {
            (1u64 << location_count) - 1
        };

        if seen != expected {
            skip |= ctx.error_unattached(
                "VUID-VkCoarseSampleOrderCustomNV-pSampleLocations-02077",
                format_args!(
                    "{}: {}.pSampleLocations must contain exactly one entry for every \
                    combination of valid values for pixelX, pixelY, and sample in the structure \
                    VkCoarseSampleOrderCustomNV.",
                    api_name, name,
                ),
            );
        }

        skip
    }
}

#[cfg(test)]
mod tests {
    use super::fragment_size;
    use crate::{properties::ShadingRateImageProperties, Severity};
    use ash::vk;

    fn locations(width: u32, height: u32, samples: u32) -> Vec<vk::CoarseSampleLocationNV> {
        let mut locations = Vec::new();

        for pixel_y in 0..height {
            for pixel_x in 0..width {
                for sample in 0..samples {
                    locations.push(vk::CoarseSampleLocationNV {
                        pixel_x,
                        pixel_y,
                        sample,
                    });
                }
            }
        }

        locations
    }

    fn shading_rate_image() -> ShadingRateImageProperties {
        ShadingRateImageProperties {
            shading_rate_texel_size: [16, 16],
            shading_rate_palette_size: 16,
            shading_rate_max_coarse_samples: 32,
        }
    }

    #[test]
    fn sizes() {
        assert_eq!(
            fragment_size(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_4X2_PIXELS),
            Some((4, 2)),
        );
        assert_eq!(
            fragment_size(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_PIXEL),
            None,
        );
    }

    #[test]
    fn complete_order() {
        let (sink, validator) = device_validator!(shading_rate_image: shading_rate_image());
        let mut ctx = validator.context("vkCmdSetCoarseSampleOrderNV");

        let locations = locations(2, 2, 4);
        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_2X2_PIXELS)
            .sample_count(4)
            .sample_locations(&locations);

        let skip = unsafe {
            validator.check_coarse_sample_order(&mut ctx, &order, &param!("pCustomSampleOrders[%i]", 0))
        };
        assert!(!skip);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn duplicate_location() {
        let (sink, validator) = device_validator!(shading_rate_image: shading_rate_image());
        let mut ctx = validator.context("vkCmdSetCoarseSampleOrderNV");

        let mut locations = locations(1, 2, 2);
        locations[3] = locations[0];
        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_1X2_PIXELS)
            .sample_count(2)
            .sample_locations(&locations);

        let skip = unsafe {
            validator.check_coarse_sample_order(&mut ctx, &order, &param!("pCustomSampleOrders[%i]", 0))
        };
        assert!(skip);
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkCoarseSampleOrderCustomNV-pSampleLocations-02077"],
        );
    }

    #[test]
    fn sixty_four_locations() {
        let (sink, validator) = device_validator!(shading_rate_image: ShadingRateImageProperties {
            shading_rate_max_coarse_samples: 64,
            ..shading_rate_image()
        });
        let mut ctx = validator.context("vkCmdSetCoarseSampleOrderNV");

        let mut locations = locations(4, 4, 4);
        assert_eq!(locations.len(), 64);
        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_4X4_PIXELS)
            .sample_count(4)
            .sample_locations(&locations);

        let skip = unsafe {
            validator.check_coarse_sample_order(&mut ctx, &order, &param!("pCustomSampleOrders[%i]", 0))
        };
        assert!(!skip);
        assert!(sink.diagnostics().is_empty());

        locations[63] = locations[0];
        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_4X4_PIXELS)
            .sample_count(4)
            .sample_locations(&locations);

        let skip = unsafe {
            validator.check_coarse_sample_order(&mut ctx, &order, &param!("pCustomSampleOrders[%i]", 1))
        };
        assert!(skip);
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkCoarseSampleOrderCustomNV-pSampleLocations-02077"],
        );
    }

    #[test]
    fn invalid_order() {
        let (sink, validator) = device_validator!(shading_rate_image: shading_rate_image());
        let mut ctx = validator.context("vkCmdSetCoarseSampleOrderNV");

        // Single-pixel rates are rejected before anything else is looked at.
        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_PIXEL)
            .sample_count(3);
        unsafe {
            validator.check_coarse_sample_order(&mut ctx, &order, &param!("pCustomSampleOrders[%i]", 0))
        };
        assert_eq!(
            sink.take().iter().map(|d| d.vuid).collect::<Vec<_>>(),
            ["VUID-VkCoarseSampleOrderCustomNV-shadingRate-02073"],
        );

        let locations = [vk::CoarseSampleLocationNV {
            pixel_x: 2,
            pixel_y: 0,
            sample: 3,
        }];
        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_2X1_PIXELS)
            .sample_count(3)
            .sample_locations(&locations);
        unsafe {
            validator.check_coarse_sample_order(&mut ctx, &order, &param!("pCustomSampleOrders[%i]", 1))
        };
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkCoarseSampleOrderCustomNV-sampleCount-02074",
                "VUID-VkCoarseSampleOrderCustomNV-sampleLocationCount-02075",
                "VUID-VkCoarseSampleLocationNV-pixelX-02078",
                "VUID-VkCoarseSampleLocationNV-sample-02080",
                "VUID-VkCoarseSampleOrderCustomNV-pSampleLocations-02077",
            ],
        );
    }
}
