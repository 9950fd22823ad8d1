// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

#![doc(html_logo_url = "https://raw.githubusercontent.com/vulkano-rs/vulkano/master/logo.png")]
//! Stateless parameter validation for the Vulkan API.
//!
//! This crate inspects the arguments of Vulkan calls, including the `pNext` extension chains
//! hanging off every input structure, and decides whether a call is well-formed before it
//! reaches the driver. It does not load Vulkan and never calls into it: the caller (usually a
//! layer) hands it the exact `ash::vk` structures it is about to dispatch.
//!
//! # Overview
//!
//! - An [`InstanceValidator`] is created from a [`ValidatorCreateInfo`], which chooses where
//!   diagnostics go (a [`DiagnosticSink`]) and which of them are suppressed.
//!
//! - Instance-level calls are checked on the [`InstanceValidator`]. Once `vkCreateInstance`
//!   returned, [`InstanceValidator::record_create_instance`] captures the enabled instance
//!   extensions and the effective API version.
//!
//! - Once `vkCreateDevice` returned, [`InstanceValidator::record_create_device`] produces a
//!   [`DeviceValidator`] holding the enabled extensions, features, limits and extension
//!   properties of that device. Every device-level command is validated through it.
//!
//! - Each `validate_*` method returns a "skip" verdict: `true` if at least one error was
//!   reported, in which case the call should not be forwarded to the driver. Warnings and
//!   performance warnings are reported but never set the verdict.
//!
//! # Diagnostics
//!
//! Every violation produces exactly one [`Diagnostic`], tagged with a severity, the object it
//! concerns and a Valid Usage ID (VUID). The VUID strings are the ones published by the Vulkan
//! specification, so they can be used in suppression lists. Rules without a published VUID use
//! the strings in the [`vuid`] module.
//!
//! # Safety
//!
//! Vulkan structures are full of raw pointers. Validation methods that read through them are
//! `unsafe`: every pointer reachable from the arguments must either be null or valid for reads
//! of the data it is supposed to point to, exactly as the driver would require.

pub use crate::{
    diagnostics::{
        vuid, CollectingSink, Diagnostic, DiagnosticSink, LogSink, ObjectType, Severity,
    },
    extensions::{DeviceExtensions, InstanceExtensions},
    features::{DeviceFeatures, FeatureChain, Features},
    properties::{
        MeshShaderProperties, PhysicalDeviceProperties, RayTracingProperties,
        ShadingRateImageProperties,
    },
    render_pass::SubpassUsage,
    validator::{DeviceValidator, InstanceValidator, ValidatorCreateInfo},
    version::Version,
};
pub use ash;
use ash::vk;
use std::{error::Error, fmt};

#[macro_use]
mod macros;
mod acceleration_structure;
mod buffer;
mod chain;
mod checks;
mod command_buffer;
mod context;
mod descriptor_set;
mod device;
mod diagnostics;
mod enums;
mod extensions;
mod features;
mod ffi;
mod flags;
mod framebuffer;
mod image;
mod instance;
mod memory;
mod name;
mod pipeline;
mod properties;
mod query;
mod render_pass;
mod sampler;
mod swapchain;
mod validator;
mod version;

/// The patch version of the Vulkan headers that the structure definitions of `ash` were
/// generated from.
///
/// It is embedded in the warnings about unknown structures in `pNext` chains, because such a
/// structure may simply come from a newer header.
pub const HEADER_VERSION: u32 = 281;

/// A helper type for non-exhaustive structs.
///
/// This type cannot be constructed outside this crate. Structures with a field of this type can
/// only be constructed by calling a constructor function or `Default::default()`. The effect is
/// similar to the standard Rust `#[non_exhaustive]` attribute, except that it does not prevent
/// update syntax from being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NonExhaustive(pub(crate) ());

/// Error that can happen when recording the result of an object creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// The creation call did not succeed, so there is nothing to record.
    CreationFailed { result: vk::Result },

    /// A device extension is enabled, but the properties that validation needs for it were not
    /// provided.
    MissingProperties { extension: &'static str },
}

impl Error for RecordError {}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreationFailed { result } => {
                write!(f, "the creation call returned {:?}, nothing was recorded", result)
            }
            Self::MissingProperties { extension } => write!(
                f,
                "the `{}` extension is enabled, but its physical device properties were not \
                provided",
                extension,
            ),
        }
    }
}
