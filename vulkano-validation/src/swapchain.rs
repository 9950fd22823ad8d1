// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Swapchain creation and presentation.

use crate::{
    chain,
    checks::FlagKind,
    diagnostics::{vuid, ObjectType},
    ffi,
    validator::DeviceValidator,
};
use ash::vk::{self, Handle};

const SWAPCHAIN_CREATE_INFO_NEXT: &[vk::StructureType] = stypes![
    DeviceGroupSwapchainCreateInfoKHR,
    ImageFormatListCreateInfo,
    SwapchainCounterCreateInfoEXT,
];

const PRESENT_INFO_NEXT: &[vk::StructureType] = stypes![
    DeviceGroupPresentInfoKHR,
    DisplayPresentInfoKHR,
    PresentRegionsKHR,
    PresentTimesInfoGOOGLE,
];

impl DeviceValidator {
    /// Validates the parameters of `vkCreateSwapchainKHR`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_swapchain(
        &self,
        create_info: &vk::SwapchainCreateInfoKHR<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCreateSwapchainKHR")
            .with_object(ObjectType::Swapchain, vk::SwapchainKHR::null());

        ctx.require_device_extension(self.state.extensions.khr_swapchain, "VK_KHR_swapchain");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateSwapchainKHR-pCreateInfo-parameter",
                "VUID-VkSwapchainCreateInfoKHR-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                SWAPCHAIN_CREATE_INFO_NEXT,
                "VUID-VkSwapchainCreateInfoKHR-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkSwapchainCreateInfoKHR-flags-parameter",
            vuid::NONE,
        );
        ctx.required_handle("pCreateInfo->surface", create_info.surface);
        ctx.ranged_enum(
            "pCreateInfo->imageFormat",
            create_info.image_format,
            "VUID-VkSwapchainCreateInfoKHR-imageFormat-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->imageColorSpace",
            create_info.image_color_space,
            "VUID-VkSwapchainCreateInfoKHR-imageColorSpace-parameter",
        );
        ctx.flags(
            "pCreateInfo->imageUsage",
            create_info.image_usage,
            FlagKind::RequiredMask,
            "VUID-VkSwapchainCreateInfoKHR-imageUsage-parameter",
            "VUID-VkSwapchainCreateInfoKHR-imageUsage-requiredbitmask",
        );
        ctx.ranged_enum(
            "pCreateInfo->imageSharingMode",
            create_info.image_sharing_mode,
            "VUID-VkSwapchainCreateInfoKHR-imageSharingMode-parameter",
        );
        ctx.flags(
            "pCreateInfo->preTransform",
            create_info.pre_transform,
            FlagKind::RequiredSingleBit,
            "VUID-VkSwapchainCreateInfoKHR-preTransform-parameter",
            "VUID-VkSwapchainCreateInfoKHR-preTransform-parameter",
        );
        ctx.flags(
            "pCreateInfo->compositeAlpha",
            create_info.composite_alpha,
            FlagKind::RequiredSingleBit,
            "VUID-VkSwapchainCreateInfoKHR-compositeAlpha-parameter",
            "VUID-VkSwapchainCreateInfoKHR-compositeAlpha-parameter",
        );
        ctx.ranged_enum(
            "pCreateInfo->presentMode",
            create_info.present_mode,
            "VUID-VkSwapchainCreateInfoKHR-presentMode-parameter",
        );
        ctx.bool32("pCreateInfo->clipped", create_info.clipped);

        ctx.concurrent_sharing(
            create_info.image_sharing_mode,
            create_info.queue_family_index_count,
            create_info.p_queue_family_indices,
            "VUID-VkSwapchainCreateInfoKHR-imageSharingMode-01278",
            "VUID-VkSwapchainCreateInfoKHR-imageSharingMode-01277",
        );
        ctx.greater_than_zero(
            "pCreateInfo->imageArrayLayers",
            create_info.image_array_layers,
            "VUID-VkSwapchainCreateInfoKHR-imageArrayLayers-01275",
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkQueuePresentKHR`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `present_info` must be null or valid for reads.
    pub unsafe fn validate_queue_present(&self, present_info: &vk::PresentInfoKHR<'_>) -> bool {
        let mut ctx = self.context("vkQueuePresentKHR");

        ctx.require_device_extension(self.state.extensions.khr_swapchain, "VK_KHR_swapchain");

        unsafe {
            ctx.struct_type(
                "pPresentInfo",
                present_info,
                true,
                "VUID-vkQueuePresentKHR-pPresentInfo-parameter",
                "VUID-VkPresentInfoKHR-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pPresentInfo->pNext",
                present_info.p_next,
                PRESENT_INFO_NEXT,
                "VUID-VkPresentInfoKHR-pNext-pNext",
            )
        };
        unsafe {
            ctx.handle_array(
                "pPresentInfo->waitSemaphoreCount",
                "pPresentInfo->pWaitSemaphores",
                present_info.wait_semaphore_count,
                present_info.p_wait_semaphores,
                false,
                true,
            )
        };
        unsafe {
            ctx.handle_array(
                "pPresentInfo->swapchainCount",
                "pPresentInfo->pSwapchains",
                present_info.swapchain_count,
                present_info.p_swapchains,
                true,
                true,
            )
        };
        ctx.array(
            "pPresentInfo->swapchainCount",
            "pPresentInfo->pImageIndices",
            present_info.swapchain_count,
            present_info.p_image_indices,
            true,
            true,
            "VUID-VkPresentInfoKHR-swapchainCount-arraylength",
            "VUID-VkPresentInfoKHR-pImageIndices-parameter",
        );

        let present_regions =
            unsafe { chain::find_in_chain::<vk::PresentRegionsKHR<'_>>(present_info.p_next) };

        if let Some(present_regions) = present_regions {
            ctx.require_device_extension(
                self.state.extensions.khr_incremental_present,
                "VK_KHR_incremental_present",
            );

            if present_regions.swapchain_count != present_info.swapchain_count {
                ctx.error_unattached(
                    vuid::INVALID_USAGE,
                    format_args!(
                        "vkQueuePresentKHR(): pPresentInfo->swapchainCount has a value of {} but \
                        VkPresentRegionsKHR extension swapchainCount is {}. These values must be \
                        equal.",
                        present_info.swapchain_count, present_regions.swapchain_count,
                    ),
                );
            }

            let regions = unsafe {
                ffi::slice_or_empty(present_regions.p_regions, present_regions.swapchain_count)
            };

            for (index, region) in regions.iter().enumerate() {
                ctx.array(
                    param!("pPresentInfo->pNext->pRegions[%i].rectangleCount", index),
                    param!("pPresentInfo->pNext->pRegions[%i].pRectangles", index),
                    region.rectangle_count,
                    region.p_rectangles,
                    !region.p_rectangles.is_null(),
                    false,
                    vuid::UNDEFINED,
                    vuid::UNDEFINED,
                );
            }
        }

        ctx.finish()
    }

    /// Reports swapchains that were presented but are no longer optimal for their surface.
    ///
    /// `result` is the return value of `vkQueuePresentKHR`. It is used for every swapchain
    /// unless `present_info.p_results` gives per-swapchain results.
    ///
    /// # Safety
    ///
    /// - `present_info.p_swapchains` and `present_info.p_results` must be null or valid for
    ///   reads of `present_info.swapchain_count` elements.
    pub unsafe fn record_queue_present(
        &self,
        present_info: &vk::PresentInfoKHR<'_>,
        result: vk::Result,
    ) {
        let mut ctx = self.context("vkQueuePresentKHR");
        let swapchains =
            unsafe { ffi::slice_or_empty(present_info.p_swapchains, present_info.swapchain_count) };
        let results =
            unsafe { ffi::slice_or_empty(present_info.p_results, present_info.swapchain_count) };

        for (index, &swapchain) in swapchains.iter().enumerate() {
            let swapchain_result = results.get(index).copied().unwrap_or(result);

            if swapchain_result == vk::Result::SUBOPTIMAL_KHR {
                ctx.performance_warning_for(
                    ObjectType::Swapchain,
                    swapchain,
                    vuid::SUBOPTIMAL_SWAPCHAIN,
                    format_args!(
                        "vkQueuePresentKHR: VkSwapchainKHR {:#x}: VK_SUBOPTIMAL_KHR was returned. \
                        VK_SUBOPTIMAL_KHR - Presentation will still succeed, subject to the window \
                        resize behavior, but the swapchain is no longer configured optimally for \
                        the surface it targets. Applications should query updated surface \
                        information and recreate their swapchain at the next convenient \
                        opportunity.",
                        swapchain.as_raw(),
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{diagnostics::vuid, DeviceExtensions, ObjectType, Severity};
    use ash::vk::{self, Handle};

    fn swapchain_create_info() -> vk::SwapchainCreateInfoKHR<'static> {
        vk::SwapchainCreateInfoKHR::default()
            .surface(vk::SurfaceKHR::from_raw(1))
            .min_image_count(2)
            .image_format(vk::Format::B8G8R8A8_SRGB)
            .image_color_space(vk::ColorSpaceKHR::SRGB_NONLINEAR)
            .image_extent(vk::Extent2D {
                width: 640,
                height: 480,
            })
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .pre_transform(vk::SurfaceTransformFlagsKHR::IDENTITY)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(vk::PresentModeKHR::FIFO)
            .clipped(true)
    }

    fn swapchain_extensions() -> DeviceExtensions {
        DeviceExtensions {
            khr_swapchain: true,
            ..DeviceExtensions::empty()
        }
    }

    #[test]
    fn create_swapchain() {
        let (sink, validator) = device_validator!(extensions: swapchain_extensions());

        assert!(!unsafe { validator.validate_create_swapchain(&swapchain_create_info()) });
        assert!(sink.diagnostics().is_empty());

        let create_info = swapchain_create_info()
            .image_array_layers(0)
            .image_sharing_mode(vk::SharingMode::CONCURRENT);
        assert!(unsafe { validator.validate_create_swapchain(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkSwapchainCreateInfoKHR-imageSharingMode-01278",
                "VUID-VkSwapchainCreateInfoKHR-imageSharingMode-01277",
                "VUID-VkSwapchainCreateInfoKHR-imageArrayLayers-01275",
            ],
        );
    }

    #[test]
    fn swapchain_extension_required() {
        let (sink, validator) = device_validator!();

        assert!(unsafe { validator.validate_create_swapchain(&swapchain_create_info()) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [vuid::EXTENSION_NOT_ENABLED],
        );
    }

    #[test]
    fn present_regions() {
        let (sink, validator) = device_validator!(extensions: swapchain_extensions());

        let swapchains = [vk::SwapchainKHR::from_raw(10), vk::SwapchainKHR::from_raw(11)];
        let image_indices = [0, 1];
        let rectangles = [vk::RectLayerKHR::default()];
        let regions = [vk::PresentRegionKHR::default().rectangles(&rectangles)];
        let mut present_regions = vk::PresentRegionsKHR::default().regions(&regions);
        let present_info = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .image_indices(&image_indices)
            .push_next(&mut present_regions);

        assert!(unsafe { validator.validate_queue_present(&present_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [vuid::EXTENSION_NOT_ENABLED, vuid::INVALID_USAGE],
        );
    }

    #[test]
    fn suboptimal() {
        let (sink, validator) = device_validator!(extensions: swapchain_extensions());

        let swapchains = [vk::SwapchainKHR::from_raw(10), vk::SwapchainKHR::from_raw(11)];
        let image_indices = [0, 1];
        let mut results = [vk::Result::SUCCESS, vk::Result::SUBOPTIMAL_KHR];
        let present_info = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .image_indices(&image_indices)
            .results(&mut results);

        unsafe { validator.record_queue_present(&present_info, vk::Result::SUBOPTIMAL_KHR) };

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::PerformanceWarning);
        assert_eq!(diagnostics[0].object_type, ObjectType::Swapchain);
        assert_eq!(diagnostics[0].object_handle, 11);
        assert_eq!(diagnostics[0].vuid, vuid::SUBOPTIMAL_SWAPCHAIN);

        // Without per-swapchain results, the call result applies to every swapchain.
        let present_info = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        unsafe { validator.record_queue_present(&present_info, vk::Result::SUBOPTIMAL_KHR) };
        assert_eq!(sink.vuids(Severity::PerformanceWarning).len(), 2);
        assert_eq!(sink.error_count(), 0);
    }
}
