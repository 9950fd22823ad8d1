// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{
    context::ValidationContext,
    diagnostics::{vuid, ObjectType},
    ffi,
    validator::DeviceValidator,
};
use ash::vk::{self, Handle};

/// The VUIDs of the rules shared by the commands that set per-viewport state.
struct ViewportRangeVuids {
    first: &'static str,
    count: &'static str,
    sum: &'static str,
}

/// The VUIDs of the rules shared by `vkCmdSetScissor` and `vkCmdSetExclusiveScissorNV`.
struct ScissorVuids {
    negative: &'static str,
    x_overflow: &'static str,
    y_overflow: &'static str,
}

impl DeviceValidator {
    /// Without `multiViewport`, only the first viewport can be set, and only one at a time.
    fn check_single_viewport(
        &self,
        ctx: &mut ValidationContext<'_>,
        first: u32,
        count: u32,
        names: (&str, &str),
        vuids: &ViewportRangeVuids,
    ) {
        let api_name = ctx.api_name();

        if first != 0 {
            ctx.error(
                vuids.first,
                format_args!(
                    "{}: The multiViewport feature is disabled, but {} (={}) is not 0.",
                    api_name, names.0, first,
                ),
            );
        }

        if count > 1 {
            ctx.error(
                vuids.count,
                format_args!(
                    "{}: The multiViewport feature is disabled, but {} (={}) is not 1.",
                    api_name, names.1, count,
                ),
            );
        }
    }

    fn check_viewport_sum(
        &self,
        ctx: &mut ValidationContext<'_>,
        first: u32,
        count: u32,
        names: (&str, &str),
        vuids: &ViewportRangeVuids,
    ) {
        let max_viewports = self.state.limits.max_viewports;
        let sum = u64::from(first) + u64::from(count);

        if sum > u64::from(max_viewports) {
            let api_name = ctx.api_name();
            ctx.error(
                vuids.sum,
                format_args!(
                    "{}: {} + {} (={} + {} = {}) is greater than \
                    VkPhysicalDeviceLimits::maxViewports (={}).",
                    api_name, names.0, names.1, first, count, sum, max_viewports,
                ),
            );
        }
    }

    fn check_viewport_range(
        &self,
        ctx: &mut ValidationContext<'_>,
        first: u32,
        count: u32,
        names: (&str, &str),
        vuids: &ViewportRangeVuids,
    ) {
        if self.state.features.core.multi_viewport {
            self.check_viewport_sum(ctx, first, count, names, vuids);
        } else {
            self.check_single_viewport(ctx, first, count, names, vuids);
        }
    }

    /// Validates the parameters of `vkCmdSetViewport`.
    ///
    /// # Safety
    ///
    /// - `viewports` must be null or valid for reads of `viewport_count` elements.
    pub unsafe fn validate_cmd_set_viewport(
        &self,
        command_buffer: vk::CommandBuffer,
        first_viewport: u32,
        viewport_count: u32,
        viewports: *const vk::Viewport,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetViewport")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.array(
            "viewportCount",
            "pViewports",
            viewport_count,
            viewports,
            true,
            true,
            "VUID-vkCmdSetViewport-viewportCount-arraylength",
            "VUID-vkCmdSetViewport-pViewports-parameter",
        );
        self.check_viewport_range(
            &mut ctx,
            first_viewport,
            viewport_count,
            ("firstViewport", "viewportCount"),
            &ViewportRangeVuids {
                first: "VUID-vkCmdSetViewport-firstViewport-01224",
                count: "VUID-vkCmdSetViewport-viewportCount-01225",
                sum: "VUID-vkCmdSetViewport-firstViewport-01223",
            },
        );

        for (index, viewport) in unsafe { ffi::slice_or_empty(viewports, viewport_count) }
            .iter()
            .enumerate()
        {
            self.check_viewport(
                &mut ctx,
                viewport,
                &param!("pViewports[%i]", index),
                ObjectType::CommandBuffer,
                command_buffer.as_raw(),
            );
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdSetScissor`.
    ///
    /// # Safety
    ///
    /// - `scissors` must be null or valid for reads of `scissor_count` elements.
    pub unsafe fn validate_cmd_set_scissor(
        &self,
        command_buffer: vk::CommandBuffer,
        first_scissor: u32,
        scissor_count: u32,
        scissors: *const vk::Rect2D,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetScissor")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.array(
            "scissorCount",
            "pScissors",
            scissor_count,
            scissors,
            true,
            true,
            "VUID-vkCmdSetScissor-scissorCount-arraylength",
            "VUID-vkCmdSetScissor-pScissors-parameter",
        );
        self.check_viewport_range(
            &mut ctx,
            first_scissor,
            scissor_count,
            ("firstScissor", "scissorCount"),
            &ViewportRangeVuids {
                first: "VUID-vkCmdSetScissor-firstScissor-00593",
                count: "VUID-vkCmdSetScissor-scissorCount-00594",
                sum: "VUID-vkCmdSetScissor-firstScissor-00592",
            },
        );
        check_scissors(
            &mut ctx,
            unsafe { ffi::slice_or_empty(scissors, scissor_count) },
            &ScissorVuids {
                negative: "VUID-vkCmdSetScissor-x-00595",
                x_overflow: "VUID-vkCmdSetScissor-offset-00596",
                y_overflow: "VUID-vkCmdSetScissor-offset-00597",
            },
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdSetExclusiveScissorNV`.
    ///
    /// # Safety
    ///
    /// - `exclusive_scissors` must be null or valid for reads of `exclusive_scissor_count`
    ///   elements.
    pub unsafe fn validate_cmd_set_exclusive_scissor_nv(
        &self,
        command_buffer: vk::CommandBuffer,
        first_exclusive_scissor: u32,
        exclusive_scissor_count: u32,
        exclusive_scissors: *const vk::Rect2D,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetExclusiveScissorNV")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(
            self.state.extensions.nv_scissor_exclusive,
            "VK_NV_scissor_exclusive",
        );
        ctx.array(
            "exclusiveScissorCount",
            "pExclusiveScissors",
            exclusive_scissor_count,
            exclusive_scissors,
            true,
            true,
            "VUID-vkCmdSetExclusiveScissorNV-exclusiveScissorCount-arraylength",
            "VUID-vkCmdSetExclusiveScissorNV-pExclusiveScissors-parameter",
        );
        self.check_viewport_range(
            &mut ctx,
            first_exclusive_scissor,
            exclusive_scissor_count,
            ("firstExclusiveScissor", "exclusiveScissorCount"),
            &ViewportRangeVuids {
                first: "VUID-vkCmdSetExclusiveScissorNV-firstExclusiveScissor-02035",
                count: "VUID-vkCmdSetExclusiveScissorNV-exclusiveScissorCount-02036",
                sum: "VUID-vkCmdSetExclusiveScissorNV-firstExclusiveScissor-02034",
            },
        );

        let max_viewports = self.state.limits.max_viewports;

        if first_exclusive_scissor >= max_viewports {
            ctx.error(
                "VUID-vkCmdSetExclusiveScissorNV-firstExclusiveScissor-02033",
                format_args!(
                    "vkCmdSetExclusiveScissorNV: firstExclusiveScissor (={}) must be less than \
                    maxViewports (={}).",
                    first_exclusive_scissor, max_viewports,
                ),
            );
        }

        check_scissors(
            &mut ctx,
            unsafe { ffi::slice_or_empty(exclusive_scissors, exclusive_scissor_count) },
            &ScissorVuids {
                negative: "VUID-vkCmdSetExclusiveScissorNV-x-02037",
                x_overflow: "VUID-vkCmdSetExclusiveScissorNV-offset-02038",
                y_overflow: "VUID-vkCmdSetExclusiveScissorNV-offset-02039",
            },
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdSetViewportShadingRatePaletteNV`.
    ///
    /// # Safety
    ///
    /// - `shading_rate_palettes` must be null or valid for reads of `viewport_count` elements.
    /// - The entry pointers of the palettes must be null or valid for reads.
    pub unsafe fn validate_cmd_set_viewport_shading_rate_palette_nv(
        &self,
        command_buffer: vk::CommandBuffer,
        first_viewport: u32,
        viewport_count: u32,
        shading_rate_palettes: *const vk::ShadingRatePaletteNV<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetViewportShadingRatePaletteNV")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(
            self.state.extensions.nv_shading_rate_image,
            "VK_NV_shading_rate_image",
        );
        ctx.array(
            "viewportCount",
            "pShadingRatePalettes",
            viewport_count,
            shading_rate_palettes,
            true,
            true,
            "VUID-vkCmdSetViewportShadingRatePaletteNV-viewportCount-arraylength",
            "VUID-vkCmdSetViewportShadingRatePaletteNV-pShadingRatePalettes-parameter",
        );

        let palettes = unsafe { ffi::slice_or_empty(shading_rate_palettes, viewport_count) };

        for (index, palette) in palettes.iter().enumerate() {
            unsafe {
                ctx.ranged_enum_array(
                    param!("pShadingRatePalettes[%i].shadingRatePaletteEntryCount", index),
                    param!("pShadingRatePalettes[%i].pShadingRatePaletteEntries", index),
                    palette.shading_rate_palette_entry_count,
                    palette.p_shading_rate_palette_entries,
                    true,
                    true,
                )
            };

            let palette_size = self.state.shading_rate_image.shading_rate_palette_size;

            if palette.shading_rate_palette_entry_count > palette_size {
                ctx.error(
                    "VUID-VkShadingRatePaletteNV-shadingRatePaletteEntryCount-02071",
                    format_args!(
                        "vkCmdSetViewportShadingRatePaletteNV: \
                        pShadingRatePalettes[{}].shadingRatePaletteEntryCount (={}) must be \
                        less than or equal to shadingRatePaletteSize (={}).",
                        index, palette.shading_rate_palette_entry_count, palette_size,
                    ),
                );
            }
        }

        let names = ("firstViewport", "viewportCount");
        let vuids = ViewportRangeVuids {
            first: "VUID-vkCmdSetViewportShadingRatePaletteNV-firstViewport-02068",
            count: "VUID-vkCmdSetViewportShadingRatePaletteNV-viewportCount-02069",
            sum: "VUID-vkCmdSetViewportShadingRatePaletteNV-firstViewport-02067",
        };

        if !self.state.features.core.multi_viewport {
            self.check_single_viewport(&mut ctx, first_viewport, viewport_count, names, &vuids);
        }

        let max_viewports = self.state.limits.max_viewports;

        if first_viewport >= max_viewports {
            ctx.error(
                "VUID-vkCmdSetViewportShadingRatePaletteNV-firstViewport-02066",
                format_args!(
                    "vkCmdSetViewportShadingRatePaletteNV: firstViewport (={}) must be less \
                    than maxViewports (={}).",
                    first_viewport, max_viewports,
                ),
            );
        }

        // Unlike the other commands, the sum is checked with or without `multiViewport`.
        self.check_viewport_sum(&mut ctx, first_viewport, viewport_count, names, &vuids);

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdSetCoarseSampleOrderNV`.
    ///
    /// # Safety
    ///
    /// - `custom_sample_orders` must be null or valid for reads of `custom_sample_order_count`
    ///   elements.
    /// - The sample location pointers of the orders must be null or valid for reads.
    pub unsafe fn validate_cmd_set_coarse_sample_order_nv(
        &self,
        command_buffer: vk::CommandBuffer,
        sample_order_type: vk::CoarseSampleOrderTypeNV,
        custom_sample_order_count: u32,
        custom_sample_orders: *const vk::CoarseSampleOrderCustomNV<'_>,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetCoarseSampleOrderNV")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(
            self.state.extensions.nv_shading_rate_image,
            "VK_NV_shading_rate_image",
        );
        ctx.ranged_enum(
            "sampleOrderType",
            sample_order_type,
            "VUID-vkCmdSetCoarseSampleOrderNV-sampleOrderType-parameter",
        );
        ctx.array(
            "customSampleOrderCount",
            "pCustomSampleOrders",
            custom_sample_order_count,
            custom_sample_orders,
            false,
            true,
            vuid::NONE,
            "VUID-vkCmdSetCoarseSampleOrderNV-pCustomSampleOrders-parameter",
        );

        if sample_order_type != vk::CoarseSampleOrderTypeNV::CUSTOM
            && custom_sample_order_count != 0
        {
            ctx.error(
                "VUID-vkCmdSetCoarseSampleOrderNV-sampleOrderType-02081",
                format_args!(
                    "vkCmdSetCoarseSampleOrderNV: If sampleOrderType is not \
                    VK_COARSE_SAMPLE_ORDER_TYPE_CUSTOM_NV, customSampleOrderCount must be 0.",
                ),
            );
        }

        let orders =
            unsafe { ffi::slice_or_empty(custom_sample_orders, custom_sample_order_count) };

        for (index, order) in orders.iter().enumerate() {
            unsafe {
                self.check_coarse_sample_order(
                    &mut ctx,
                    order,
                    &param!("pCustomSampleOrders[%i]", index),
                )
            };
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdSetLineWidth`.
    pub fn validate_cmd_set_line_width(
        &self,
        command_buffer: vk::CommandBuffer,
        line_width: f32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetLineWidth")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        if !self.state.features.core.wide_lines && line_width != 1.0 {
            ctx.error(
                "VUID-vkCmdSetLineWidth-lineWidth-00788",
                format_args!(
                    "VkPhysicalDeviceFeatures::wideLines is disabled, but lineWidth (={}) is \
                    not 1.0.",
                    line_width,
                ),
            );
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdSetLineStippleEXT`.
    pub fn validate_cmd_set_line_stipple_ext(
        &self,
        command_buffer: vk::CommandBuffer,
        line_stipple_factor: u32,
        _line_stipple_pattern: u16,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdSetLineStippleEXT")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(
            self.state.extensions.ext_line_rasterization,
            "VK_EXT_line_rasterization",
        );

        if !(1..=256).contains(&line_stipple_factor) {
            ctx.error(
                "VUID-vkCmdSetLineStippleEXT-lineStippleFactor-02776",
                format_args!(
                    "vkCmdSetLineStippleEXT::lineStippleFactor={} is not in [1,256].",
                    line_stipple_factor,
                ),
            );
        }

        ctx.finish()
    }
}

/// Scissor offsets must be non-negative, and the far edges must be representable as `i32`.
fn check_scissors(ctx: &mut ValidationContext<'_>, scissors: &[vk::Rect2D], vuids: &ScissorVuids) {
    let api_name = ctx.api_name();

    for (index, scissor) in scissors.iter().enumerate() {
        let vk::Rect2D { offset, extent } = *scissor;

        if offset.x < 0 {
            ctx.error(
                vuids.negative,
                format_args!(
                    "{}: pScissors[{}].offset.x (={}) is negative.",
                    api_name, index, offset.x,
                ),
            );
        }

        if offset.y < 0 {
            ctx.error(
                vuids.negative,
                format_args!(
                    "{}: pScissors[{}].offset.y (={}) is negative.",
                    api_name, index, offset.y,
                ),
            );
        }

        let x_sum = i64::from(offset.x) + i64::from(extent.width);

        if x_sum > i64::from(i32::MAX) {
            ctx.error(
                vuids.x_overflow,
                format_args!(
                    "{}: offset.x + extent.width (={} + {} = {}) of pScissors[{}] will overflow \
                    int32_t.",
                    api_name, offset.x, extent.width, x_sum, index,
                ),
            );
        }

        let y_sum = i64::from(offset.y) + i64::from(extent.height);

        if y_sum > i64::from(i32::MAX) {
            ctx.error(
                vuids.y_overflow,
                format_args!(
                    "{}: offset.y + extent.height (={} + {} = {}) of pScissors[{}] will overflow \
                    int32_t.",
                    api_name, offset.y, extent.height, y_sum, index,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{DeviceExtensions, Features, ObjectType, Severity, ShadingRateImageProperties};
    use ash::vk::{self, Handle};
    use std::ptr;

    fn viewport() -> vk::Viewport {
        vk::Viewport {
            x: 0.0,
            y: 0.0,
            width: 64.0,
            height: 64.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    fn multi_viewport() -> Features {
        Features {
            multi_viewport: true,
            ..Features::none()
        }
    }

    #[test]
    fn two_viewports_without_multi_viewport() {
        let (sink, validator) = device_validator!();
        let viewports = [viewport(), viewport()];

        assert!(unsafe {
            validator.validate_cmd_set_viewport(
                vk::CommandBuffer::from_raw(0x10),
                0,
                2,
                viewports.as_ptr(),
            )
        });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].vuid, "VUID-vkCmdSetViewport-viewportCount-01225");
        assert_eq!(diagnostics[0].object_type, ObjectType::CommandBuffer);
        assert_eq!(diagnostics[0].object_handle, 0x10);
        assert_eq!(
            diagnostics[0].message,
            "vkCmdSetViewport: The multiViewport feature is disabled, but viewportCount (=2) is \
            not 1.",
        );
    }

    #[test]
    fn viewport_range_with_multi_viewport() {
        let (sink, validator) = device_validator!(features: multi_viewport());
        let viewports = [viewport(); 4];

        assert!(!unsafe {
            validator.validate_cmd_set_viewport(
                vk::CommandBuffer::null(),
                12,
                4,
                viewports.as_ptr(),
            )
        });
        assert!(unsafe {
            validator.validate_cmd_set_viewport(
                vk::CommandBuffer::null(),
                13,
                4,
                viewports.as_ptr(),
            )
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-vkCmdSetViewport-firstViewport-01223"],
        );
    }

    #[test]
    fn missing_viewports() {
        let (sink, validator) = device_validator!();

        assert!(unsafe {
            validator.validate_cmd_set_viewport(vk::CommandBuffer::null(), 0, 1, ptr::null())
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-vkCmdSetViewport-pViewports-parameter"],
        );
    }

    #[test]
    fn scissor_offsets() {
        let (sink, validator) = device_validator!(features: multi_viewport());
        let scissors = [
            vk::Rect2D {
                offset: vk::Offset2D { x: -1, y: 0 },
                extent: vk::Extent2D {
                    width: 16,
                    height: 16,
                },
            },
            vk::Rect2D {
                offset: vk::Offset2D { x: 1, y: i32::MAX },
                extent: vk::Extent2D {
                    width: u32::MAX,
                    height: 1,
                },
            },
            vk::Rect2D {
                offset: vk::Offset2D { x: 0, y: 0 },
                extent: vk::Extent2D {
                    width: i32::MAX as u32,
                    height: i32::MAX as u32,
                },
            },
        ];

        assert!(unsafe {
            validator.validate_cmd_set_scissor(vk::CommandBuffer::null(), 0, 3, scissors.as_ptr())
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdSetScissor-x-00595",
                "VUID-vkCmdSetScissor-offset-00596",
                "VUID-vkCmdSetScissor-offset-00597",
            ],
        );
    }

    #[test]
    fn scissor_without_multi_viewport() {
        let (sink, validator) = device_validator!();
        let scissors = [vk::Rect2D::default(); 2];

        assert!(unsafe {
            validator.validate_cmd_set_scissor(vk::CommandBuffer::null(), 1, 2, scissors.as_ptr())
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdSetScissor-firstScissor-00593",
                "VUID-vkCmdSetScissor-scissorCount-00594",
            ],
        );
    }

    #[test]
    fn exclusive_scissor_first_index() {
        let (sink, validator) = device_validator!(
            extensions: DeviceExtensions {
                nv_scissor_exclusive: true,
                ..DeviceExtensions::empty()
            },
            features: multi_viewport(),
        );
        let scissors = [vk::Rect2D::default()];

        assert!(!unsafe {
            validator.validate_cmd_set_exclusive_scissor_nv(
                vk::CommandBuffer::null(),
                15,
                1,
                scissors.as_ptr(),
            )
        });
        assert!(unsafe {
            validator.validate_cmd_set_exclusive_scissor_nv(
                vk::CommandBuffer::null(),
                16,
                1,
                scissors.as_ptr(),
            )
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdSetExclusiveScissorNV-firstExclusiveScissor-02034",
                "VUID-vkCmdSetExclusiveScissorNV-firstExclusiveScissor-02033",
            ],
        );
    }

    #[test]
    fn shading_rate_palette() {
        let (sink, validator) = device_validator!(
            extensions: DeviceExtensions {
                nv_shading_rate_image: true,
                ..DeviceExtensions::empty()
            },
            shading_rate_image: ShadingRateImageProperties {
                shading_rate_texel_size: [16, 16],
                shading_rate_palette_size: 2,
                shading_rate_max_coarse_samples: 16,
            },
        );
        let entries = [
            vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_PIXEL,
            vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_2X2_PIXELS,
            vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_4X4_PIXELS,
        ];
        let palettes =
            [vk::ShadingRatePaletteNV::default().shading_rate_palette_entries(&entries[..2])];

        assert!(!unsafe {
            validator.validate_cmd_set_viewport_shading_rate_palette_nv(
                vk::CommandBuffer::null(),
                0,
                1,
                palettes.as_ptr(),
            )
        });
        assert!(sink.diagnostics().is_empty());

        let palettes =
            [vk::ShadingRatePaletteNV::default().shading_rate_palette_entries(&entries)];

        assert!(unsafe {
            validator.validate_cmd_set_viewport_shading_rate_palette_nv(
                vk::CommandBuffer::null(),
                1,
                1,
                palettes.as_ptr(),
            )
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkShadingRatePaletteNV-shadingRatePaletteEntryCount-02071",
                "VUID-vkCmdSetViewportShadingRatePaletteNV-firstViewport-02068",
            ],
        );
    }

    #[test]
    fn coarse_sample_order_count() {
        let (sink, validator) = device_validator!(
            extensions: DeviceExtensions {
                nv_shading_rate_image: true,
                ..DeviceExtensions::empty()
            },
        );

        assert!(!unsafe {
            validator.validate_cmd_set_coarse_sample_order_nv(
                vk::CommandBuffer::null(),
                vk::CoarseSampleOrderTypeNV::PIXEL_MAJOR,
                0,
                ptr::null(),
            )
        });
        assert!(sink.diagnostics().is_empty());

        let order = vk::CoarseSampleOrderCustomNV::default()
            .shading_rate(vk::ShadingRatePaletteEntryNV::TYPE_1_INVOCATION_PER_PIXEL);

        assert!(unsafe {
            validator.validate_cmd_set_coarse_sample_order_nv(
                vk::CommandBuffer::null(),
                vk::CoarseSampleOrderTypeNV::DEFAULT,
                1,
                &order,
            )
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdSetCoarseSampleOrderNV-sampleOrderType-02081",
                "VUID-VkCoarseSampleOrderCustomNV-shadingRate-02073",
            ],
        );
    }

    #[test]
    fn line_width_and_stipple() {
        let (sink, validator) = device_validator!(
            extensions: DeviceExtensions {
                ext_line_rasterization: true,
                ..DeviceExtensions::empty()
            },
        );

        assert!(!validator.validate_cmd_set_line_width(vk::CommandBuffer::null(), 1.0));
        assert!(validator.validate_cmd_set_line_width(vk::CommandBuffer::null(), 2.0));
        assert!(!validator.validate_cmd_set_line_stipple_ext(vk::CommandBuffer::null(), 256, 0xff));
        assert!(validator.validate_cmd_set_line_stipple_ext(vk::CommandBuffer::null(), 0, 0xff));
        assert!(validator.validate_cmd_set_line_stipple_ext(vk::CommandBuffer::null(), 257, 0xff));

        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-vkCmdSetLineWidth-lineWidth-00788",
                "VUID-vkCmdSetLineStippleEXT-lineStippleFactor-02776",
                "VUID-vkCmdSetLineStippleEXT-lineStippleFactor-02776",
            ],
        );
    }
}
