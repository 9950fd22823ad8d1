// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The checks on a single `VkViewport`, shared by pipeline creation and `vkCmdSetViewport`.

use crate::{
    context::ValidationContext,
    diagnostics::{vuid, ObjectType, Severity},
    name::ParameterName,
    validator::DeviceValidator,
};
use ash::vk;

/// Returns whether `value <= limit`, without going through a float conversion of `limit`.
///
/// NaN is never within the limit.
fn f32_le_u32_exact(value: f32, limit: u32) -> bool {
    if value.is_nan() {
        return false;
    }

    if value <= 0.0 {
        return true;
    }

    let int_part = value.trunc();
    let fract = value - int_part;

    // 2^32 is exactly representable.
    if int_part >= 4_294_967_296.0 {
        return false;
    }

    let int_part = int_part as u32;

    int_part < limit || (int_part == limit && fract == 0.0)
}

/// Returns whether `value <= limit as f32`. Above 2^24 the conversion of `limit` rounds.
#[inline]
fn f32_le_u32_direct(value: f32, limit: u32) -> bool {
    value <= limit as f32
}

impl DeviceValidator {
    /// Checks a viewport against the viewport limits of the device, reporting against the given
    /// object.
    ///
    /// A dimension that only fits the limit after the limit is rounded to `f32` produces a
    /// warning rather than an error.
    pub(crate) fn check_viewport(
        &self,
        ctx: &mut ValidationContext<'_>,
        viewport: &vk::Viewport,
        name: &ParameterName,
        object_type: ObjectType,
        object_handle: u64,
    ) -> bool {
        let limits = &self.state.limits;
        let api_name = ctx.api_name();
        let bounds = limits.viewport_bounds_range;
        let mut skip = false;

        let max_width = limits.max_viewport_dimensions[0];
        let mut width_healthy = true;

        if !(viewport.width > 0.0) {
            width_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-width-01770",
                format_args!(
                    "{}: {}.width (={}) is not greater than 0.0.",
                    api_name, name, viewport.width,
                ),
            );
        } else if !(f32_le_u32_exact(viewport.width, max_width)
            || f32_le_u32_direct(viewport.width, max_width))
        {
            width_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-width-01771",
                format_args!(
                    "{}: {}.width (={}) exceeds VkPhysicalDeviceLimits::maxViewportDimensions[0] \
                    (={}).",
                    api_name, name, viewport.width, max_width,
                ),
            );
        } else if !f32_le_u32_exact(viewport.width, max_width) {
            ctx.report(
                Severity::Warning,
                object_type,
                object_handle,
                vuid::NONE,
                format_args!(
                    "{}: {}.width (={}) technically exceeds \
                    VkPhysicalDeviceLimits::maxViewportDimensions[0] (={}), but it is within the \
                    float-converted maxViewportDimensions[0] limit.",
                    api_name, name, viewport.width, max_width,
                ),
            );
        }

        let negative_height = self.state.negative_viewport_height();
        let max_height = limits.max_viewport_dimensions[1];
        let abs_height = viewport.height.abs();
        let mut height_healthy = true;

        if !negative_height && !(viewport.height > 0.0) {
            height_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-height-01772",
                format_args!(
                    "{}: {}.height (={}) is not greater 0.0.",
                    api_name, name, viewport.height,
                ),
            );
        } else if !(f32_le_u32_exact(abs_height, max_height)
            || f32_le_u32_direct(abs_height, max_height))
        {
            height_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-height-01773",
                format_args!(
                    "{}: Absolute value of {}.height (={}) exceeds \
                    VkPhysicalDeviceLimits::maxViewportDimensions[1] (={}).",
                    api_name, name, viewport.height, max_height,
                ),
            );
        } else if !f32_le_u32_exact(abs_height, max_height) {
            height_healthy = false;
            ctx.report(
                Severity::Warning,
                object_type,
                object_handle,
                vuid::NONE,
                format_args!(
                    "{}: Absolute value of {}.height (={}) technically exceeds \
                    VkPhysicalDeviceLimits::maxViewportDimensions[1] (={}), but it is within the \
                    float-converted maxViewportDimensions[1] limit.",
                    api_name, name, viewport.height, max_height,
                ),
            );
        }

        let mut x_healthy = true;

        if !(viewport.x >= bounds[0]) {
            x_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-x-01774",
                format_args!(
                    "{}: {}.x (={}) is less than VkPhysicalDeviceLimits::viewportBoundsRange[0] \
                    (={}).",
                    api_name, name, viewport.x, bounds[0],
                ),
            );
        }

        if x_healthy && width_healthy {
            let right = viewport.x + viewport.width;

            if !(right <= bounds[1]) {
                skip |= ctx.report(
                    Severity::Error,
                    object_type,
                    object_handle,
                    "VUID-VkViewport-x-01232",
                    format_args!(
                        "{0}: {1}.x + {1}.width (={2} + {3} = {4}) is greater than \
                        VkPhysicalDeviceLimits::viewportBoundsRange[1] (={5}).",
                        api_name, name, viewport.x, viewport.width, right, bounds[1],
                    ),
                );
            }
        }

        let mut y_healthy = true;

        if !(viewport.y >= bounds[0]) {
            y_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-y-01775",
                format_args!(
                    "{}: {}.y (={}) is less than VkPhysicalDeviceLimits::viewportBoundsRange[0] \
                    (={}).",
                    api_name, name, viewport.y, bounds[0],
                ),
            );
        } else if negative_height && !(viewport.y <= bounds[1]) {
            y_healthy = false;
            skip |= ctx.report(
                Severity::Error,
                object_type,
                object_handle,
                "VUID-VkViewport-y-01776",
                format_args!(
                    "{}: {}.y (={}) exceeds VkPhysicalDeviceLimits::viewportBoundsRange[1] (={}).",
                    api_name, name, viewport.y, bounds[1],
                ),
            );
        }

        if y_healthy && height_healthy {
            let boundary = viewport.y + viewport.height;

            if !(boundary <= bounds[1]) {
                skip |= ctx.report(
                    Severity::Error,
                    object_type,
                    object_handle,
                    "VUID-VkViewport-y-01233",
                    format_args!(
                        "{0}: {1}.y + {1}.height (={2} + {3} = {4}) exceeds \
                        VkPhysicalDeviceLimits::viewportBoundsRange[1] (={5}).",
                        api_name, name, viewport.y, viewport.height, boundary, bounds[1],
                    ),
                );
            } else if negative_height && !(boundary >= bounds[0]) {
                skip |= ctx.report(
                    Severity::Error,
                    object_type,
                    object_handle,
                    "VUID-VkViewport-y-01777",
                    format_args!(
                        "{0}: {1}.y + {1}.height (={2} + {3} = {4}) is less than \
                        VkPhysicalDeviceLimits::viewportBoundsRange[0] (={5}).",
                        api_name, name, viewport.y, viewport.height, boundary, bounds[0],
                    ),
                );
            }
        }

        if !self.state.extensions.ext_depth_range_unrestricted {
            if !(0.0..=1.0).contains(&viewport.min_depth) {
                skip |= ctx.report(
                    Severity::Error,
                    object_type,
                    object_handle,
                    "VUID-VkViewport-minDepth-01234",
                    format_args!(
                        "{}: VK_EXT_depth_range_unrestricted extension is not enabled and \
                        {}.minDepth (={}) is not within the [0.0, 1.0] range.",
                        api_name, name, viewport.min_depth,
                    ),
                );
            }

            if !(0.0..=1.0).contains(&viewport.max_depth) {
                skip |= ctx.report(
                    Severity::Error,
                    object_type,
                    object_handle,
                    "VUID-VkViewport-maxDepth-01235",
                    format_args!(
                        "{}: VK_EXT_depth_range_unrestricted extension is not enabled and \
                        {}.maxDepth (={}) is not within the [0.0, 1.0] range.",
                        api_name, name, viewport.max_depth,
                    ),
                );
            }
        }

        skip
    }
}
