// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The validator objects that a layer attaches to its instances and devices.

use crate::{
    context::{ValidationContext, ValidatorConfig},
    device::DeviceState,
    diagnostics::{DiagnosticSink, LogSink, Severity},
    extensions::{DeviceExtensions, InstanceExtensions},
    features::DeviceFeatures,
    render_pass::RenderPassUsageCache,
    NonExhaustive, Version, HEADER_VERSION,
};
use ash::vk;
use std::{fmt, sync::Arc};

/// Parameters to create a new `InstanceValidator`.
#[derive(Clone)]
pub struct ValidatorCreateInfo {
    /// Where diagnostics are delivered.
    ///
    /// The default value is [`LogSink`].
    pub sink: Arc<dyn DiagnosticSink>,

    /// VUIDs whose diagnostics are never delivered. A suppressed error does not make a call
    /// skipped.
    ///
    /// The default value is empty.
    pub suppressed_vuids: Vec<String>,

    /// Diagnostics with a lower severity are not delivered.
    ///
    /// The default value is [`Severity::Info`], which delivers everything.
    pub minimum_severity: Severity,

    /// The header version quoted in the warnings about unknown structures.
    ///
    /// The default value is [`HEADER_VERSION`].
    pub header_version: u32,

    pub _ne: NonExhaustive,
}

impl Default for ValidatorCreateInfo {
    #[inline]
    fn default() -> Self {
        Self {
            sink: Arc::new(LogSink),
            suppressed_vuids: Vec::new(),
            minimum_severity: Severity::Info,
            header_version: HEADER_VERSION,
            _ne: NonExhaustive(()),
        }
    }
}

impl fmt::Debug for ValidatorCreateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorCreateInfo")
            .field("suppressed_vuids", &self.suppressed_vuids)
            .field("minimum_severity", &self.minimum_severity)
            .field("header_version", &self.header_version)
            .finish_non_exhaustive()
    }
}

impl From<ValidatorCreateInfo> for ValidatorConfig {
    fn from(create_info: ValidatorCreateInfo) -> Self {
        let ValidatorCreateInfo {
            sink,
            suppressed_vuids,
            minimum_severity,
            header_version,
            _ne: _,
        } = create_info;

        ValidatorConfig {
            sink,
            suppressed_vuids: suppressed_vuids
                .into_iter()
                .map(String::into_boxed_str)
                .collect(),
            minimum_severity,
            header_version,
        }
    }
}

/// Validates the instance-level calls of one Vulkan instance.
///
/// Before `vkCreateInstance` is recorded, the validator assumes Vulkan 1.0 with no extensions,
/// which is what `vkCreateInstance` itself is validated against.
#[derive(Debug)]
pub struct InstanceValidator {
    pub(crate) config: Arc<ValidatorConfig>,
    pub(crate) extensions: InstanceExtensions,
    pub(crate) api_version: Version,
}

impl InstanceValidator {
    /// Creates a new `InstanceValidator`.
    pub fn new(create_info: ValidatorCreateInfo) -> Self {
        InstanceValidator {
            config: Arc::new(create_info.into()),
            extensions: InstanceExtensions::empty(),
            api_version: Version::V1_0,
        }
    }

    /// Returns the instance extensions recorded by `record_create_instance`.
    #[inline]
    pub fn enabled_extensions(&self) -> &InstanceExtensions {
        &self.extensions
    }

    /// Returns the effective API version recorded by `record_create_instance`.
    #[inline]
    pub fn api_version(&self) -> Version {
        self.api_version
    }

    #[inline]
    pub(crate) fn context(&self, api_name: &'static str) -> ValidationContext<'_> {
        ValidationContext::new(&self.config, api_name)
    }
}

impl Default for InstanceValidator {
    #[inline]
    fn default() -> Self {
        Self::new(ValidatorCreateInfo::default())
    }
}

/// Validates the device-level calls of one Vulkan device.
///
/// Created by [`InstanceValidator::record_create_device`]. Everything but the render pass
/// usage is fixed at creation, so the validator can be shared between threads freely.
#[derive(Debug)]
pub struct DeviceValidator {
    pub(crate) config: Arc<ValidatorConfig>,
    pub(crate) device: vk::Device,
    pub(crate) state: DeviceState,
    pub(crate) render_passes: RenderPassUsageCache,
}

impl DeviceValidator {
    pub(crate) fn new(config: Arc<ValidatorConfig>, device: vk::Device, state: DeviceState) -> Self {
        DeviceValidator {
            config,
            device,
            state,
            render_passes: RenderPassUsageCache::default(),
        }
    }

    /// Returns the device that this validator was created for.
    #[inline]
    pub fn device(&self) -> vk::Device {
        self.device
    }

    /// Returns the API version in force on the device: the lower of the instance and physical
    /// device versions.
    #[inline]
    pub fn api_version(&self) -> Version {
        self.state.api_version
    }

    /// Returns the device extensions that were enabled.
    #[inline]
    pub fn enabled_extensions(&self) -> &DeviceExtensions {
        &self.state.extensions
    }

    /// Returns the features that were enabled.
    #[inline]
    pub fn enabled_features(&self) -> &DeviceFeatures {
        &self.state.features
    }

    /// Returns the limits of the physical device.
    #[inline]
    pub fn limits(&self) -> &vk::PhysicalDeviceLimits {
        &self.state.limits
    }

    #[inline]
    pub(crate) fn context(&self, api_name: &'static str) -> ValidationContext<'_> {
        ValidationContext::new(&self.config, api_name)
    }
}
