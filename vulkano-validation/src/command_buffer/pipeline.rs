// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::is_multiple_of_four;
use crate::{
    context::ValidationContext,
    diagnostics::{vuid, ObjectType, Severity},
    validator::DeviceValidator,
};
use ash::vk;
use std::mem;

const AXES: [char; 3] = ['X', 'Y', 'Z'];

impl DeviceValidator {
    /// Validates the parameters of `vkCmdDraw`.
    ///
    /// Zero counts are legal but record a draw that does nothing, which is only worth a
    /// performance warning.
    pub fn validate_cmd_draw(
        &self,
        command_buffer: vk::CommandBuffer,
        vertex_count: u32,
        instance_count: u32,
        _first_vertex: u32,
        _first_instance: u32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDraw")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        for (name, count) in [("vertexCount", vertex_count), ("instanceCount", instance_count)] {
            if count == 0 {
                ctx.report(
                    Severity::PerformanceWarning,
                    ObjectType::Unknown,
                    0,
                    vuid::REQUIRED_PARAMETER,
                    format_args!("vkCmdDraw parameter, uint32_t {}, is 0", name),
                );
            }
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDrawIndirect`.
    pub fn validate_cmd_draw_indirect(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
        _offset: vk::DeviceSize,
        draw_count: u32,
        _stride: u32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDrawIndirect")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.required_handle("buffer", buffer);
        self.check_multi_draw_indirect(
            &mut ctx,
            draw_count,
            "CmdDrawIndirect()",
            vuid::DEVICE_FEATURE,
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDrawIndexedIndirect`.
    pub fn validate_cmd_draw_indexed_indirect(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
        _offset: vk::DeviceSize,
        draw_count: u32,
        _stride: u32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDrawIndexedIndirect")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.required_handle("buffer", buffer);
        self.check_multi_draw_indirect(
            &mut ctx,
            draw_count,
            "CmdDrawIndexedIndirect()",
            vuid::DEVICE_FEATURE,
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDrawMeshTasksNV`.
    pub fn validate_cmd_draw_mesh_tasks_nv(
        &self,
        command_buffer: vk::CommandBuffer,
        task_count: u32,
        _first_task: u32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDrawMeshTasksNV")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(self.state.extensions.nv_mesh_shader, "VK_NV_mesh_shader");

        let max_draw_mesh_tasks_count = self.state.mesh_shader.max_draw_mesh_tasks_count;

        if task_count > max_draw_mesh_tasks_count {
            ctx.error(
                "VUID-vkCmdDrawMeshTasksNV-taskCount-02119",
                format_args!(
                    "vkCmdDrawMeshTasksNV() parameter, uint32_t taskCount ({:#x}), must be less \
                    than or equal to VkPhysicalDeviceMeshShaderPropertiesNV::\
                    maxDrawMeshTasksCount ({:#x}).",
                    task_count, max_draw_mesh_tasks_count,
                ),
            );
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDrawMeshTasksIndirectNV`.
    pub fn validate_cmd_draw_mesh_tasks_indirect_nv(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
        offset: vk::DeviceSize,
        draw_count: u32,
        stride: u32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDrawMeshTasksIndirectNV")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(self.state.extensions.nv_mesh_shader, "VK_NV_mesh_shader");
        ctx.required_handle("buffer", buffer);

        if !is_multiple_of_four(offset) {
            ctx.error(
                "VUID-vkCmdDrawMeshTasksIndirectNV-offset-02710",
                format_args!(
                    "vkCmdDrawMeshTasksIndirectNV() parameter, VkDeviceSize offset ({:#x}), is \
                    not a multiple of 4.",
                    offset,
                ),
            );
        }

        let command_size = mem::size_of::<vk::DrawMeshTasksIndirectCommandNV>() as u64;

        if draw_count > 1
            && (!is_multiple_of_four(u64::from(stride)) || u64::from(stride) < command_size)
        {
            ctx.error(
                "VUID-vkCmdDrawMeshTasksIndirectNV-drawCount-02146",
                format_args!(
                    "vkCmdDrawMeshTasksIndirectNV() parameter, uint32_t stride ({:#x}), is not a \
                    multiple of 4 or smaller than sizeof (VkDrawMeshTasksIndirectCommandNV).",
                    stride,
                ),
            );
        }

        self.check_multi_draw_indirect(
            &mut ctx,
            draw_count,
            "vkCmdDrawMeshTasksIndirectNV()",
            "VUID-vkCmdDrawMeshTasksIndirectNV-drawCount-02718",
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDrawMeshTasksIndirectCountNV`.
    pub fn validate_cmd_draw_mesh_tasks_indirect_count_nv(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
        offset: vk::DeviceSize,
        count_buffer: vk::Buffer,
        count_buffer_offset: vk::DeviceSize,
        _max_draw_count: u32,
        _stride: u32,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDrawMeshTasksIndirectCountNV")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.require_device_extension(self.state.extensions.nv_mesh_shader, "VK_NV_mesh_shader");
        ctx.required_handle("buffer", buffer);
        ctx.required_handle("countBuffer", count_buffer);

        if !is_multiple_of_four(offset) {
            ctx.error(
                "VUID-vkCmdDrawMeshTasksIndirectCountNV-offset-02710",
                format_args!(
                    "vkCmdDrawMeshTasksIndirectCountNV() parameter, VkDeviceSize offset ({:#x}), \
                    is not a multiple of 4.",
                    offset,
                ),
            );
        }

        if !is_multiple_of_four(count_buffer_offset) {
            ctx.error(
                "VUID-vkCmdDrawMeshTasksIndirectCountNV-countBufferOffset-02716",
                format_args!(
                    "vkCmdDrawMeshTasksIndirectCountNV() parameter, VkDeviceSize \
                    countBufferOffset ({:#x}), is not a multiple of 4.",
                    count_buffer_offset,
                ),
            );
        }

        ctx.finish()
    }

    fn check_multi_draw_indirect(
        &self,
        ctx: &mut ValidationContext<'_>,
        draw_count: u32,
        command: &str,
        vuid: &'static str,
    ) {
        if !self.state.features.core.multi_draw_indirect && draw_count > 1 {
            ctx.error_unattached(
                vuid,
                format_args!(
                    "{}: Device feature multiDrawIndirect disabled: count must be 0 or 1 but is \
                    {}",
                    command, draw_count,
                ),
            );
        }
    }

    /// Validates the parameters of `vkCmdDispatch`.
    pub fn validate_cmd_dispatch(
        &self,
        command_buffer: vk::CommandBuffer,
        group_count_x: u32,
        group_count_y: u32,
        group_count_z: u32,
    ) -> bool {
        const VUIDS: [&str; 3] = [
            "VUID-vkCmdDispatch-groupCountX-00386",
            "VUID-vkCmdDispatch-groupCountY-00387",
            "VUID-vkCmdDispatch-groupCountZ-00388",
        ];

        let mut ctx = self
            .context("vkCmdDispatch")
            .with_object(ObjectType::CommandBuffer, command_buffer);
        let limits = self.state.limits.max_compute_work_group_count;
        let group_counts = [group_count_x, group_count_y, group_count_z];

        for axis in 0..3 {
            if group_counts[axis] > limits[axis] {
                ctx.error(
                    VUIDS[axis],
                    format_args!(
                        "vkCmdDispatch(): groupCount{} ({}) exceeds device limit \
                        maxComputeWorkGroupCount[{}] ({}).",
                        AXES[axis], group_counts[axis], axis, limits[axis],
                    ),
                );
            }
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDispatchIndirect`.
    pub fn validate_cmd_dispatch_indirect(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
        offset: vk::DeviceSize,
    ) -> bool {
        let mut ctx = self
            .context("vkCmdDispatchIndirect")
            .with_object(ObjectType::CommandBuffer, command_buffer);

        ctx.required_handle("buffer", buffer);

        if !is_multiple_of_four(offset) {
            ctx.error(
                "VUID-vkCmdDispatchIndirect-offset-02710",
                format_args!(
                    "vkCmdDispatchIndirect(): offset ({:#x}) must be a multiple of 4.",
                    offset,
                ),
            );
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCmdDispatchBase`.
    ///
    /// For each axis, the base group must be below the limit, and the group count must fit in
    /// what remains of it. Testing the base first keeps the subtraction from underflowing.
    pub fn validate_cmd_dispatch_base(
        &self,
        command_buffer: vk::CommandBuffer,
        base_group: [u32; 3],
        group_count: [u32; 3],
    ) -> bool {
        const BASE_VUIDS: [&str; 3] = [
            "VUID-vkCmdDispatchBase-baseGroupX-00421",
            "VUID-vkCmdDispatchBase-baseGroupY-00422",
            "VUID-vkCmdDispatchBase-baseGroupZ-00423",
        ];
        const COUNT_VUIDS: [&str; 3] = [
            "VUID-vkCmdDispatchBase-groupCountX-00424",
            "VUID-vkCmdDispatchBase-groupCountY-00425",
            "VUID-vkCmdDispatchBase-groupCountZ-00426",
        ];

        let mut ctx = self
            .context("vkCmdDispatchBase")
            .with_object(ObjectType::CommandBuffer, command_buffer);
        let limits = self.state.limits.max_compute_work_group_count;

        for axis in 0..3 {
            let (base, count, limit) = (base_group[axis], group_count[axis], limits[axis]);

            if base >= limit {
                ctx.error(
                    BASE_VUIDS[axis],
                    format_args!(
                        "vkCmdDispatchBase(): baseGroup{} ({}) equals or exceeds device limit \
                        maxComputeWorkGroupCount[{}] ({}).",
                        AXES[axis], base, axis, limit,
                    ),
                );
            } else if count > limit - base {
                ctx.error(
                    COUNT_VUIDS[axis],
                    format_args!(
                        "vkCmdDispatchBase(): baseGroup{0} ({1}) + groupCount{0} ({2}) exceeds \
                        device limit maxComputeWorkGroupCount[{3}] ({4}).",
                        AXES[axis], base, count, axis, limit,
                    ),
                );
            }
        }

        ctx.finish()
    }
}
