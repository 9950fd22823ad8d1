// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Structured diagnostics and the sinks that receive them.
//!
//! Validation never fails. Instead, every rule violation is turned into a [`Diagnostic`] and
//! handed to the [`DiagnosticSink`] chosen when the validator was created. The default sink,
//! [`LogSink`], forwards everything to the `log` crate.
//!
//! A sink can also be a plain closure:
//!
//! ```
//! use std::sync::Arc;
//! use vulkano_validation::{Diagnostic, DiagnosticSink, Severity};
//!
//! let sink: Arc<dyn DiagnosticSink> = Arc::new(|diagnostic: &Diagnostic| {
//!     if diagnostic.severity == Severity::Error {
//!         eprintln!("{}", diagnostic);
//!     }
//! });
//! ```

use parking_lot::Mutex;
use std::fmt;

/// How serious a diagnostic is.
///
/// Only [`Severity::Error`] sets the skip verdict of a validation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// The call is suspicious, but may be valid.
    Warning,
    /// The call is valid but likely to be slow or pointless.
    PerformanceWarning,
    /// The call violates a valid usage rule.
    Error,
}

impl Severity {
    /// Returns whether a diagnostic of this severity sets the skip verdict.
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::PerformanceWarning => "performance warning",
            Severity::Error => "error",
        })
    }
}

/// The type of the object a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectType {
    #[default]
    Unknown,
    Instance,
    PhysicalDevice,
    Device,
    Queue,
    CommandBuffer,
    Buffer,
    Image,
    Sampler,
    Pipeline,
    RenderPass,
    DescriptorSet,
    Swapchain,
    AccelerationStructure,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Unknown => "VkUnknown",
            ObjectType::Instance => "VkInstance",
            ObjectType::PhysicalDevice => "VkPhysicalDevice",
            ObjectType::Device => "VkDevice",
            ObjectType::Queue => "VkQueue",
            ObjectType::CommandBuffer => "VkCommandBuffer",
            ObjectType::Buffer => "VkBuffer",
            ObjectType::Image => "VkImage",
            ObjectType::Sampler => "VkSampler",
            ObjectType::Pipeline => "VkPipeline",
            ObjectType::RenderPass => "VkRenderPass",
            ObjectType::DescriptorSet => "VkDescriptorSet",
            ObjectType::Swapchain => "VkSwapchainKHR",
            ObjectType::AccelerationStructure => "VkAccelerationStructureNV",
        })
    }
}

/// A single rule violation reported by the validator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub severity: Severity,

    /// The type of `object_handle`.
    pub object_type: ObjectType,

    /// The raw handle of the object concerned, or 0 if none.
    pub object_handle: u64,

    /// The Valid Usage ID of the violated rule.
    pub vuid: &'static str,

    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.vuid, self.message)
    }
}

/// Receives the diagnostics produced by validation.
///
/// Validation can happen on any number of threads at once, so diagnostics coming from different
/// calls may interleave.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    #[inline]
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// A sink that forwards diagnostics to the `log` crate, under the `vulkano_validation` target.
///
/// Errors are logged with `error!`, warnings of both kinds with `warn!`, and informational
/// messages with `info!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        const TARGET: &str = "vulkano_validation";

        match diagnostic.severity {
            Severity::Error => log::error!(target: TARGET, "{}", diagnostic),
            Severity::Warning => log::warn!(target: TARGET, "{}", diagnostic),
            Severity::PerformanceWarning => {
                log::warn!(target: TARGET, "(performance) {}", diagnostic)
            }
            Severity::Info => log::info!(target: TARGET, "{}", diagnostic),
        }
    }
}

/// A sink that stores every diagnostic it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all the diagnostics received so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Returns a copy of all the diagnostics received so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Returns the VUIDs of the received diagnostics that have the given severity, in order.
    pub fn vuids(&self, severity: Severity) -> Vec<&'static str> {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.vuid)
            .collect()
    }

    /// Returns the number of errors received so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().push(diagnostic.clone());
    }
}

/// Identifiers for rules that have no VUID assigned by the Vulkan specification.
pub mod vuid {
    /// Informational messages, and warnings that are not tied to a rule.
    pub const NONE: &str = "UNASSIGNED-GeneralParameterError-Info";
    /// A parameter is used in a way that is not allowed.
    pub const INVALID_USAGE: &str = "UNASSIGNED-GeneralParameterError-InvalidUsage";
    /// A structure has the wrong `sType`.
    pub const INVALID_STRUCT_STYPE: &str = "UNASSIGNED-GeneralParameterError-InvalidStructSType";
    /// A `pNext` chain is malformed.
    pub const INVALID_STRUCT_PNEXT: &str = "UNASSIGNED-GeneralParameterError-InvalidStructPNext";
    /// A required parameter is null.
    pub const REQUIRED_PARAMETER: &str = "UNASSIGNED-GeneralParameterError-RequiredParameter";
    /// A reserved parameter is not zero.
    pub const RESERVED_PARAMETER: &str = "UNASSIGNED-GeneralParameterError-ReservedParameter";
    /// A value is not a known member of its enumeration or flags type.
    pub const UNRECOGNIZED_VALUE: &str = "UNASSIGNED-GeneralParameterError-UnrecognizedValue";
    /// A value exceeds a device limit.
    pub const DEVICE_LIMIT: &str = "UNASSIGNED-GeneralParameterError-DeviceLimit";
    /// A device feature that the call depends on is not enabled.
    pub const DEVICE_FEATURE: &str = "UNASSIGNED-GeneralParameterError-DeviceFeature";
    /// A call returned a failure code.
    pub const FAILURE_CODE: &str = "UNASSIGNED-GeneralParameterError-FailureCode";
    /// An extension that the call depends on is not enabled.
    pub const EXTENSION_NOT_ENABLED: &str = "UNASSIGNED-GeneralParameterError-ExtensionNotEnabled";
    /// A swapchain was reported as suboptimal by a present operation.
    pub const SUBOPTIMAL_SWAPCHAIN: &str =
        "UNASSIGNED-GeneralParameterPerfWarn-SuboptimalSwapchain";
    /// Used where a rule has no identifier at all.
    pub const UNDEFINED: &str = "VUID_Undefined";
}

#[cfg(test)]
mod tests {
    use super::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, ObjectType, Severity};

    fn diagnostic(severity: Severity, vuid: &'static str) -> Diagnostic {
        Diagnostic {
            severity,
            object_type: ObjectType::Buffer,
            object_handle: 0x42,
            vuid,
            message: "vkCreateBuffer: something is wrong".to_owned(),
        }
    }

    #[test]
    fn severity_order() {
        assert!(Severity::Error > Severity::PerformanceWarning);
        assert!(Severity::PerformanceWarning > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn display() {
        let d = diagnostic(Severity::Error, "VUID-VkBufferCreateInfo-size-00912");
        assert_eq!(
            d.to_string(),
            "[VUID-VkBufferCreateInfo-size-00912] vkCreateBuffer: something is wrong",
        );
        assert_eq!(ObjectType::Swapchain.to_string(), "VkSwapchainKHR");
    }

    #[test]
    fn collecting_sink() {
        let sink = CollectingSink::new();
        sink.report(&diagnostic(Severity::Warning, "a"));
        sink.report(&diagnostic(Severity::Error, "b"));
        sink.report(&diagnostic(Severity::Error, "c"));

        assert_eq!(sink.error_count(), 2);
        assert_eq!(sink.vuids(Severity::Error), ["b", "c"]);
        assert_eq!(sink.take().len(), 3);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn log_sink() {
        let _ = env_logger::builder().is_test(true).try_init();

        for severity in [
            Severity::Info,
            Severity::Warning,
            Severity::PerformanceWarning,
            Severity::Error,
        ] {
            LogSink.report(&diagnostic(severity, "x"));
        }
    }
}
