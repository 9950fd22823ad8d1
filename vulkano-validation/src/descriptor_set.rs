// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Descriptor pools, set layouts and descriptor updates.

use crate::{
    checks::{safe_modulo, FlagKind},
    context::ValidationContext,
    diagnostics::{vuid, ObjectType},
    ffi,
    flags::KnownFlags,
    validator::DeviceValidator,
};
use ash::vk;

const DESCRIPTOR_POOL_CREATE_INFO_NEXT: &[vk::StructureType] =
    stypes![DescriptorPoolInlineUniformBlockCreateInfo];

const DESCRIPTOR_SET_LAYOUT_CREATE_INFO_NEXT: &[vk::StructureType] =
    stypes![DescriptorSetLayoutBindingFlagsCreateInfo];

const WRITE_DESCRIPTOR_SET_NEXT: &[vk::StructureType] = stypes![
    WriteDescriptorSetAccelerationStructureNV,
    WriteDescriptorSetInlineUniformBlock,
];

/// Which member of `VkWriteDescriptorSet` holds the descriptors of a given type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DescriptorSource {
    Image,
    Buffer,
    TexelBufferView,
    Other,
}

impl DescriptorSource {
    fn of(descriptor_type: vk::DescriptorType) -> Self {
        match descriptor_type {
            vk::DescriptorType::SAMPLER
            | vk::DescriptorType::COMBINED_IMAGE_SAMPLER
            | vk::DescriptorType::SAMPLED_IMAGE
            | vk::DescriptorType::STORAGE_IMAGE
            | vk::DescriptorType::INPUT_ATTACHMENT => DescriptorSource::Image,
            vk::DescriptorType::UNIFORM_BUFFER
            | vk::DescriptorType::STORAGE_BUFFER
            | vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC
            | vk::DescriptorType::STORAGE_BUFFER_DYNAMIC => DescriptorSource::Buffer,
            vk::DescriptorType::UNIFORM_TEXEL_BUFFER | vk::DescriptorType::STORAGE_TEXEL_BUFFER => {
                DescriptorSource::TexelBufferView
            }
            _ => DescriptorSource::Other,
        }
    }
}

impl DeviceValidator {
    /// Validates the parameters of `vkCreateDescriptorPool`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_descriptor_pool(
        &self,
        create_info: &vk::DescriptorPoolCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self.context("vkCreateDescriptorPool");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateDescriptorPool-pCreateInfo-parameter",
                "VUID-VkDescriptorPoolCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                DESCRIPTOR_POOL_CREATE_INFO_NEXT,
                "VUID-VkDescriptorPoolCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkDescriptorPoolCreateInfo-flags-parameter",
            vuid::NONE,
        );
        ctx.array(
            "pCreateInfo->poolSizeCount",
            "pCreateInfo->pPoolSizes",
            create_info.pool_size_count,
            create_info.p_pool_sizes,
            true,
            true,
            "VUID-VkDescriptorPoolCreateInfo-poolSizeCount-arraylength",
            "VUID-VkDescriptorPoolCreateInfo-pPoolSizes-parameter",
        );

        if create_info.max_sets == 0 {
            ctx.error_unattached(
                "VUID-VkDescriptorPoolCreateInfo-maxSets-00301",
                format_args!("vkCreateDescriptorPool(): pCreateInfo->maxSets is not greater than 0."),
            );
        }

        let pool_sizes =
            unsafe { ffi::slice_or_empty(create_info.p_pool_sizes, create_info.pool_size_count) };

        for (index, pool_size) in pool_sizes.iter().enumerate() {
            ctx.ranged_enum(
                param!("pCreateInfo->pPoolSizes[%i].type", index),
                pool_size.ty,
                "VUID-VkDescriptorPoolSize-type-parameter",
            );

            if pool_size.descriptor_count == 0 {
                ctx.error_unattached(
                    "VUID-VkDescriptorPoolSize-descriptorCount-00302",
                    format_args!(
                        "vkCreateDescriptorPool(): pCreateInfo->pPoolSizes[{}].descriptorCount is \
                        not greater than 0.",
                        index,
                    ),
                );
            }

            if pool_size.ty == vk::DescriptorType::INLINE_UNIFORM_BLOCK
                && pool_size.descriptor_count % 4 != 0
            {
                ctx.error_unattached(
                    "VUID-VkDescriptorPoolSize-type-02218",
                    format_args!(
                        "vkCreateDescriptorPool(): pCreateInfo->pPoolSizes[{0}].type is \
                        VK_DESCRIPTOR_TYPE_INLINE_UNIFORM_BLOCK_EXT and \
                        pCreateInfo->pPoolSizes[{0}].descriptorCount is not a multiple of 4.",
                        index,
                    ),
                );
            }
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkCreateDescriptorSetLayout`.
    ///
    /// # Safety
    ///
    /// - Every pointer reachable from `create_info` must be null or valid for reads.
    pub unsafe fn validate_create_descriptor_set_layout(
        &self,
        create_info: &vk::DescriptorSetLayoutCreateInfo<'_>,
    ) -> bool {
        let mut ctx = self.context("vkCreateDescriptorSetLayout");

        unsafe {
            ctx.struct_type(
                "pCreateInfo",
                create_info,
                true,
                "VUID-vkCreateDescriptorSetLayout-pCreateInfo-parameter",
                "VUID-VkDescriptorSetLayoutCreateInfo-sType-sType",
            )
        };
        unsafe {
            ctx.struct_pnext(
                "pCreateInfo->pNext",
                create_info.p_next,
                DESCRIPTOR_SET_LAYOUT_CREATE_INFO_NEXT,
                "VUID-VkDescriptorSetLayoutCreateInfo-pNext-pNext",
            )
        };
        ctx.flags(
            "pCreateInfo->flags",
            create_info.flags,
            FlagKind::OptionalMask,
            "VUID-VkDescriptorSetLayoutCreateInfo-flags-parameter",
            vuid::NONE,
        );
        ctx.array(
            "pCreateInfo->bindingCount",
            "pCreateInfo->pBindings",
            create_info.binding_count,
            create_info.p_bindings,
            false,
            true,
            vuid::UNDEFINED,
            "VUID-VkDescriptorSetLayoutCreateInfo-pBindings-parameter",
        );

        let bindings =
            unsafe { ffi::slice_or_empty(create_info.p_bindings, create_info.binding_count) };

        for (index, binding) in bindings.iter().enumerate() {
            ctx.ranged_enum(
                param!("pCreateInfo->pBindings[%i].descriptorType", index),
                binding.descriptor_type,
                "VUID-VkDescriptorSetLayoutBinding-descriptorType-parameter",
            );

            if binding.descriptor_count == 0 {
                continue;
            }

            let uses_samplers = matches!(
                binding.descriptor_type,
                vk::DescriptorType::SAMPLER | vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
            );

            if uses_samplers {
                let samplers = unsafe {
                    ffi::slice_or_empty(binding.p_immutable_samplers, binding.descriptor_count)
                };

                for (sampler_index, &sampler) in samplers.iter().enumerate() {
                    ctx.required_handle(
                        param!(
                            "pCreateInfo->pBindings[%i].pImmutableSamplers[%i]",
                            index,
                            sampler_index,
                        ),
                        sampler,
                    );
                }
            }

            let stage_flags = binding.stage_flags.into_flag_set();

            if !stage_flags.is_empty()
                && !stage_flags.is_subset_of(<vk::ShaderStageFlags as KnownFlags>::ALL)
            {
                ctx.error_unattached(
                    "VUID-VkDescriptorSetLayoutBinding-descriptorCount-00283",
                    format_args!(
                        "vkCreateDescriptorSetLayout(): if pCreateInfo->pBindings[{0}].descriptorCount \
                        is not 0, pCreateInfo->pBindings[{0}].stageFlags must be a valid \
                        combination of VkShaderStageFlagBits values.",
                        index,
                    ),
                );
            }
        }

        ctx.finish()
    }

    /// Validates the parameters of `vkFreeDescriptorSets`.
    ///
    /// Null elements are allowed; only the count and array pointer are checked.
    pub fn validate_free_descriptor_sets(
        &self,
        descriptor_pool: vk::DescriptorPool,
        descriptor_set_count: u32,
        descriptor_sets: *const vk::DescriptorSet,
    ) -> bool {
        let mut ctx = self.context("vkFreeDescriptorSets");

        ctx.required_handle("descriptorPool", descriptor_pool);
        ctx.array(
            "descriptorSetCount",
            "pDescriptorSets",
            descriptor_set_count,
            descriptor_sets,
            true,
            true,
            vuid::UNDEFINED,
            vuid::UNDEFINED,
        );

        ctx.finish()
    }

    /// Validates the parameters of `vkUpdateDescriptorSets`.
    ///
    /// # Safety
    ///
    /// - `descriptor_writes` must be null or valid for reads of `descriptor_write_count`
    ///   elements, and likewise for `descriptor_copies`.
    /// - Every pointer reachable from the elements must be null or valid for reads.
    pub unsafe fn validate_update_descriptor_sets(
        &self,
        descriptor_write_count: u32,
        descriptor_writes: *const vk::WriteDescriptorSet<'_>,
        descriptor_copy_count: u32,
        descriptor_copies: *const vk::CopyDescriptorSet<'_>,
    ) -> bool {
        let mut ctx = self.context("vkUpdateDescriptorSets");

        unsafe {
            ctx.struct_type_array(
                "descriptorWriteCount",
                "pDescriptorWrites",
                descriptor_write_count,
                descriptor_writes,
                false,
                true,
                "VUID-VkWriteDescriptorSet-sType-sType",
                "VUID-vkUpdateDescriptorSets-pDescriptorWrites-parameter",
                vuid::UNDEFINED,
            )
        };
        unsafe {
            ctx.struct_type_array(
                "descriptorCopyCount",
                "pDescriptorCopies",
                descriptor_copy_count,
                descriptor_copies,
                false,
                true,
                "VUID-VkCopyDescriptorSet-sType-sType",
                "VUID-vkUpdateDescriptorSets-pDescriptorCopies-parameter",
                vuid::UNDEFINED,
            )
        };

        let writes = unsafe { ffi::slice_or_empty(descriptor_writes, descriptor_write_count) };

        for (index, write) in writes.iter().enumerate() {
            unsafe {
                ctx.struct_pnext(
                    param!("pDescriptorWrites[%i].pNext", index),
                    write.p_next,
                    WRITE_DESCRIPTOR_SET_NEXT,
                    "VUID-VkWriteDescriptorSet-pNext-pNext",
                )
            };
            ctx.ranged_enum(
                param!("pDescriptorWrites[%i].descriptorType", index),
                write.descriptor_type,
                "VUID-VkWriteDescriptorSet-descriptorType-parameter",
            );
            unsafe { self.validate_descriptor_write(&mut ctx, index, write) };
        }

        let copies = unsafe { ffi::slice_or_empty(descriptor_copies, descriptor_copy_count) };

        for (index, copy) in copies.iter().enumerate() {
            unsafe {
                ctx.struct_pnext(
                    param!("pDescriptorCopies[%i].pNext", index),
                    copy.p_next,
                    &[],
                    "VUID-VkCopyDescriptorSet-pNext-pNext",
                )
            };
            ctx.required_handle(param!("pDescriptorCopies[%i].srcSet", index), copy.src_set);
            ctx.required_handle(param!("pDescriptorCopies[%i].dstSet", index), copy.dst_set);
        }

        ctx.finish()
    }

    /// Checks the member of a write that its descriptor type selects.
    unsafe fn validate_descriptor_write(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        write: &vk::WriteDescriptorSet<'_>,
    ) {
        if write.descriptor_count == 0 {
            ctx.error_unattached(
                "VUID-VkWriteDescriptorSet-descriptorCount-arraylength",
                format_args!(
                    "vkUpdateDescriptorSets(): parameter pDescriptorWrites[{}].descriptorCount \
                    must be greater than 0.",
                    index,
                ),
            );
        }

        ctx.required_handle(param!("pDescriptorWrites[%i].dstSet", index), write.dst_set);

        match DescriptorSource::of(write.descriptor_type) {
            DescriptorSource::Image if write.p_image_info.is_null() => {
                ctx.error_unattached(
                    "VUID-VkWriteDescriptorSet-descriptorType-00322",
                    format_args!(
                        "vkUpdateDescriptorSets(): if pDescriptorWrites[{0}].descriptorType is \
                        VK_DESCRIPTOR_TYPE_SAMPLER, VK_DESCRIPTOR_TYPE_COMBINED_IMAGE_SAMPLER, \
                        VK_DESCRIPTOR_TYPE_SAMPLED_IMAGE, VK_DESCRIPTOR_TYPE_STORAGE_IMAGE or \
                        VK_DESCRIPTOR_TYPE_INPUT_ATTACHMENT, pDescriptorWrites[{0}].pImageInfo \
                        must not be NULL.",
                        index,
                    ),
                );
            }
            // Samplers only read the sampler member.
            DescriptorSource::Image if write.descriptor_type != vk::DescriptorType::SAMPLER => {
                let image_infos =
                    unsafe { ffi::slice_or_empty(write.p_image_info, write.descriptor_count) };

                for (element, image_info) in image_infos.iter().enumerate() {
                    ctx.required_handle(
                        param!("pDescriptorWrites[%i].pImageInfo[%i].imageView", index, element),
                        image_info.image_view,
                    );
                    ctx.ranged_enum(
                        param!("pDescriptorWrites[%i].pImageInfo[%i].imageLayout", index, element),
                        image_info.image_layout,
                        vuid::UNRECOGNIZED_VALUE,
                    );
                }
            }
            DescriptorSource::Buffer if write.p_buffer_info.is_null() => {
                ctx.error_unattached(
                    "VUID-VkWriteDescriptorSet-descriptorType-00324",
                    format_args!(
                        "vkUpdateDescriptorSets(): if pDescriptorWrites[{0}].descriptorType is \
                        VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER, VK_DESCRIPTOR_TYPE_STORAGE_BUFFER, \
                        VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER_DYNAMIC or \
                        VK_DESCRIPTOR_TYPE_STORAGE_BUFFER_DYNAMIC, \
                        pDescriptorWrites[{0}].pBufferInfo must not be NULL.",
                        index,
                    ),
                );
            }
            DescriptorSource::Buffer => {
                let buffer_infos =
                    unsafe { ffi::slice_or_empty(write.p_buffer_info, write.descriptor_count) };

                for (element, buffer_info) in buffer_infos.iter().enumerate() {
                    ctx.required_handle(
                        param!("pDescriptorWrites[%i].pBufferInfo[%i].buffer", index, element),
                        buffer_info.buffer,
                    );
                }

                self.validate_buffer_info_offsets(ctx, index, write.descriptor_type, buffer_infos);
            }
            DescriptorSource::TexelBufferView if write.p_texel_buffer_view.is_null() => {
                ctx.error_unattached(
                    "VUID-VkWriteDescriptorSet-descriptorType-00323",
                    format_args!(
                        "vkUpdateDescriptorSets(): if pDescriptorWrites[{0}].descriptorType is \
                        VK_DESCRIPTOR_TYPE_UNIFORM_TEXEL_BUFFER or \
                        VK_DESCRIPTOR_TYPE_STORAGE_TEXEL_BUFFER, \
                        pDescriptorWrites[{0}].pTexelBufferView must not be NULL.",
                        index,
                    ),
                );
            }
            DescriptorSource::TexelBufferView => {
                let views = unsafe {
                    ffi::slice_or_empty(write.p_texel_buffer_view, write.descriptor_count)
                };

                for (element, &view) in views.iter().enumerate() {
                    ctx.required_handle(
                        param!("pDescriptorWrites[%i].pTexelBufferView[%i]", index, element),
                        view,
                    );
                }
            }
            DescriptorSource::Image | DescriptorSource::Other => (),
        }
    }

    fn validate_buffer_info_offsets(
        &self,
        ctx: &mut ValidationContext<'_>,
        index: usize,
        descriptor_type: vk::DescriptorType,
        buffer_infos: &[vk::DescriptorBufferInfo],
    ) {
        let limits = self.limits();
        let (alignment, limit_name, vuid) = match descriptor_type {
            vk::DescriptorType::UNIFORM_BUFFER | vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC => (
                limits.min_uniform_buffer_offset_alignment,
                "minUniformBufferOffsetAlignment",
                "VUID-VkWriteDescriptorSet-descriptorType-00327",
            ),
            _ => (
                limits.min_storage_buffer_offset_alignment,
                "minStorageBufferOffsetAlignment",
                "VUID-VkWriteDescriptorSet-descriptorType-00328",
            ),
        };

        for (element, buffer_info) in buffer_infos.iter().enumerate() {
            if safe_modulo(buffer_info.offset, alignment) != 0 {
                ctx.error_for(
                    ObjectType::PhysicalDevice,
                    vk::PhysicalDevice::null(),
                    vuid,
                    format_args!(
                        "vkUpdateDescriptorSets(): pDescriptorWrites[{}].pBufferInfo[{}].offset \
                        ({:#x}) must be a multiple of device limit {} {:#x}.",
                        index, element, buffer_info.offset, limit_name, alignment,
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{diagnostics::vuid, ObjectType, Severity};
    use ash::vk::{self, Handle};
    use std::ptr;

    #[test]
    fn descriptor_pool() {
        let (sink, validator) = device_validator!();

        let pool_sizes = [
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: 4,
            },
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::INLINE_UNIFORM_BLOCK,
                descriptor_count: 16,
            },
        ];
        let create_info = vk::DescriptorPoolCreateInfo::default()
            .max_sets(4)
            .pool_sizes(&pool_sizes);
        assert!(!unsafe { validator.validate_create_descriptor_pool(&create_info) });
        assert!(sink.diagnostics().is_empty());

        let pool_sizes = [
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: 0,
            },
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::INLINE_UNIFORM_BLOCK,
                descriptor_count: 6,
            },
        ];
        let create_info = vk::DescriptorPoolCreateInfo::default()
            .max_sets(0)
            .pool_sizes(&pool_sizes);
        assert!(unsafe { validator.validate_create_descriptor_pool(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkDescriptorPoolCreateInfo-maxSets-00301",
                "VUID-VkDescriptorPoolSize-descriptorCount-00302",
                "VUID-VkDescriptorPoolSize-type-02218",
            ],
        );
    }

    #[test]
    fn immutable_samplers() {
        let (sink, validator) = device_validator!();

        let samplers = [vk::Sampler::from_raw(7), vk::Sampler::null()];
        let bindings = [vk::DescriptorSetLayoutBinding {
            binding: 0,
            descriptor_type: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
            descriptor_count: 2,
            stage_flags: vk::ShaderStageFlags::FRAGMENT,
            p_immutable_samplers: samplers.as_ptr(),
            ..Default::default()
        }];
        let create_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);

        assert!(unsafe { validator.validate_create_descriptor_set_layout(&create_info) });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].vuid, vuid::REQUIRED_PARAMETER);
        assert!(diagnostics[0]
            .message
            .contains("pCreateInfo->pBindings[0].pImmutableSamplers[1]"));
    }

    #[test]
    fn unknown_stage_flags() {
        let (sink, validator) = device_validator!();

        let bindings = [
            vk::DescriptorSetLayoutBinding {
                binding: 0,
                descriptor_type: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: 1,
                stage_flags: vk::ShaderStageFlags::from_raw(0x8000_0000),
                ..Default::default()
            },
            // Bindings without descriptors are not checked.
            vk::DescriptorSetLayoutBinding {
                binding: 1,
                descriptor_type: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: 0,
                stage_flags: vk::ShaderStageFlags::from_raw(0x8000_0000),
                ..Default::default()
            },
        ];
        let create_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);

        assert!(unsafe { validator.validate_create_descriptor_set_layout(&create_info) });
        assert_eq!(
            sink.vuids(Severity::Error),
            ["VUID-VkDescriptorSetLayoutBinding-descriptorCount-00283"],
        );
    }

    #[test]
    fn free_descriptor_sets() {
        let (sink, validator) = device_validator!();
        let pool = vk::DescriptorPool::from_raw(3);

        let sets = [vk::DescriptorSet::null(), vk::DescriptorSet::from_raw(5)];
        assert!(!validator.validate_free_descriptor_sets(pool, 2, sets.as_ptr()));
        assert!(validator.validate_free_descriptor_sets(pool, 2, ptr::null()));
        assert!(validator.validate_free_descriptor_sets(pool, 0, sets.as_ptr()));
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn missing_descriptor_arrays() {
        let (sink, validator) = device_validator!();
        let set = vk::DescriptorSet::from_raw(9);

        let mut writes = [
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .descriptor_type(vk::DescriptorType::SAMPLED_IMAGE),
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .descriptor_type(vk::DescriptorType::STORAGE_BUFFER),
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .descriptor_type(vk::DescriptorType::UNIFORM_TEXEL_BUFFER),
        ];
        for write in &mut writes {
            write.descriptor_count = 1;
        }

        assert!(unsafe {
            validator.validate_update_descriptor_sets(3, writes.as_ptr(), 0, ptr::null())
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                "VUID-VkWriteDescriptorSet-descriptorType-00322",
                "VUID-VkWriteDescriptorSet-descriptorType-00324",
                "VUID-VkWriteDescriptorSet-descriptorType-00323",
            ],
        );
    }

    #[test]
    fn image_descriptors() {
        let (sink, validator) = device_validator!();

        let image_infos = [
            vk::DescriptorImageInfo {
                image_view: vk::ImageView::from_raw(1),
                image_layout: vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
                ..Default::default()
            },
            vk::DescriptorImageInfo {
                image_view: vk::ImageView::null(),
                image_layout: vk::ImageLayout::from_raw(0x7777),
                ..Default::default()
            },
        ];
        let writes = [vk::WriteDescriptorSet::default()
            .dst_set(vk::DescriptorSet::null())
            .descriptor_type(vk::DescriptorType::SAMPLED_IMAGE)
            .image_info(&image_infos)];

        assert!(unsafe {
            validator.validate_update_descriptor_sets(1, writes.as_ptr(), 0, ptr::null())
        });
        assert_eq!(
            sink.vuids(Severity::Error),
            [
                vuid::REQUIRED_PARAMETER,
                vuid::REQUIRED_PARAMETER,
                vuid::UNRECOGNIZED_VALUE,
            ],
        );
    }

    #[test]
    fn buffer_offset_alignment() {
        let (sink, validator) = device_validator!(
            limits: vk::PhysicalDeviceLimits {
                min_uniform_buffer_offset_alignment: 256,
                min_storage_buffer_offset_alignment: 64,
                ..crate::tests::default_limits()
            }
        );
        let set = vk::DescriptorSet::from_raw(9);
        let buffer = vk::Buffer::from_raw(4);

        let uniform = [
            vk::DescriptorBufferInfo {
                buffer,
                offset: 512,
                range: vk::WHOLE_SIZE,
            },
            vk::DescriptorBufferInfo {
                buffer,
                offset: 64,
                range: vk::WHOLE_SIZE,
            },
        ];
        let storage = [vk::DescriptorBufferInfo {
            buffer,
            offset: 64,
            range: vk::WHOLE_SIZE,
        }];
        let writes = [
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC)
                .buffer_info(&uniform),
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .descriptor_type(vk::DescriptorType::STORAGE_BUFFER)
                .buffer_info(&storage),
        ];

        assert!(unsafe {
            validator.validate_update_descriptor_sets(2, writes.as_ptr(), 0, ptr::null())
        });

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].vuid,
            "VUID-VkWriteDescriptorSet-descriptorType-00327",
        );
        assert_eq!(diagnostics[0].object_type, ObjectType::PhysicalDevice);
        assert!(diagnostics[0]
            .message
            .contains("pDescriptorWrites[0].pBufferInfo[1].offset (0x40)"));
    }

    #[test]
    fn descriptor_copies() {
        let (sink, validator) = device_validator!();

        let copies = [vk::CopyDescriptorSet::default()
            .src_set(vk::DescriptorSet::from_raw(1))
            .descriptor_count(1)];

        assert!(unsafe {
            validator.validate_update_descriptor_sets(0, ptr::null(), 1, copies.as_ptr())
        });
        assert_eq!(sink.vuids(Severity::Error), [vuid::REQUIRED_PARAMETER]);
    }
}
