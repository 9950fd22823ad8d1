// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{
    diagnostics::{Diagnostic, DiagnosticSink, ObjectType, Severity},
    HEADER_VERSION,
};
use ash::vk;
use foldhash::HashSet;
use std::{fmt, sync::Arc};

/// The parts of `ValidatorCreateInfo` that validation calls consult.
pub(crate) struct ValidatorConfig {
    pub(crate) sink: Arc<dyn DiagnosticSink>,
    pub(crate) suppressed_vuids: HashSet<Box<str>>,
    pub(crate) minimum_severity: Severity,
    pub(crate) header_version: u32,
}

impl ValidatorConfig {
    #[inline]
    fn is_delivered(&self, severity: Severity, vuid: &str) -> bool {
        severity >= self.minimum_severity && !self.suppressed_vuids.contains(vuid)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            sink: Arc::new(crate::LogSink),
            suppressed_vuids: HashSet::default(),
            minimum_severity: Severity::Info,
            header_version: HEADER_VERSION,
        }
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("suppressed_vuids", &self.suppressed_vuids)
            .field("minimum_severity", &self.minimum_severity)
            .field("header_version", &self.header_version)
            .finish_non_exhaustive()
    }
}

/// The state of a single validation call.
///
/// Every check reports through the context, which remembers whether an error was delivered.
/// That flag is the skip verdict returned to the caller.
pub(crate) struct ValidationContext<'a> {
    config: &'a ValidatorConfig,
    api_name: &'static str,
    object_type: ObjectType,
    object_handle: u64,
    has_error: bool,
}

impl<'a> ValidationContext<'a> {
    #[inline]
    pub(crate) fn new(config: &'a ValidatorConfig, api_name: &'static str) -> Self {
        ValidationContext {
            config,
            api_name,
            object_type: ObjectType::Unknown,
            object_handle: 0,
            has_error: false,
        }
    }

    /// Sets the object that `error` and `warning` report against.
    #[inline]
    pub(crate) fn with_object(mut self, object_type: ObjectType, handle: impl vk::Handle) -> Self {
        self.object_type = object_type;
        self.object_handle = handle.as_raw();
        self
    }

    #[inline]
    pub(crate) fn api_name(&self) -> &'static str {
        self.api_name
    }

    #[inline]
    pub(crate) fn header_version(&self) -> u32 {
        self.config.header_version
    }

    /// Returns whether an error was delivered so far.
    #[inline]
    pub(crate) fn has_error(&self) -> bool {
        self.has_error
    }

    /// Ends the call and returns the skip verdict.
    #[inline]
    pub(crate) fn finish(self) -> bool {
        self.has_error
    }

    /// Reports a diagnostic. Returns whether it was an error that got delivered.
    ///
    /// The message is only formatted if the diagnostic is delivered.
    pub(crate) fn report(
        &mut self,
        severity: Severity,
        object_type: ObjectType,
        object_handle: u64,
        vuid: &'static str,
        message: fmt::Arguments<'_>,
    ) -> bool {
        if !self.config.is_delivered(severity, vuid) {
            return false;
        }

        self.config.sink.report(&Diagnostic {
            severity,
            object_type,
            object_handle,
            vuid,
            message: message.to_string(),
        });

        let is_error = severity.is_error();
        self.has_error |= is_error;

        is_error
    }

    /// Reports an error against the current object.
    #[inline]
    pub(crate) fn error(&mut self, vuid: &'static str, message: fmt::Arguments<'_>) -> bool {
        self.report(
            Severity::Error,
            self.object_type,
            self.object_handle,
            vuid,
            message,
        )
    }

    /// Reports an error that is not tied to any object.
    #[inline]
    pub(crate) fn error_unattached(
        &mut self,
        vuid: &'static str,
        message: fmt::Arguments<'_>,
    ) -> bool {
        self.report(Severity::Error, ObjectType::Unknown, 0, vuid, message)
    }

    /// Reports an error against the given object.
    #[inline]
    pub(crate) fn error_for(
        &mut self,
        object_type: ObjectType,
        handle: impl vk::Handle,
        vuid: &'static str,
        message: fmt::Arguments<'_>,
    ) -> bool {
        self.report(Severity::Error, object_type, handle.as_raw(), vuid, message)
    }

    /// Reports a warning against the current object.
    #[inline]
    pub(crate) fn warning(&mut self, vuid: &'static str, message: fmt::Arguments<'_>) {
        self.report(
            Severity::Warning,
            self.object_type,
            self.object_handle,
            vuid,
            message,
        );
    }

    /// Reports a warning that is not tied to any object.
    #[inline]
    pub(crate) fn warning_unattached(&mut self, vuid: &'static str, message: fmt::Arguments<'_>) {
        self.report(Severity::Warning, ObjectType::Unknown, 0, vuid, message);
    }

    /// Reports a performance warning against the given object.
    #[inline]
    pub(crate) fn performance_warning_for(
        &mut self,
        object_type: ObjectType,
        handle: impl vk::Handle,
        vuid: &'static str,
        message: fmt::Arguments<'_>,
    ) {
        self.report(
            Severity::PerformanceWarning,
            object_type,
            handle.as_raw(),
            vuid,
            message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidationContext, ValidatorConfig};
    use crate::{diagnostics::CollectingSink, ObjectType, Severity};
    use ash::vk::{self, Handle};
    use std::sync::Arc;

    fn config(sink: &Arc<CollectingSink>) -> ValidatorConfig {
        ValidatorConfig {
            sink: sink.clone(),
            ..ValidatorConfig::default()
        }
    }

    #[test]
    fn verdict_follows_errors() {
        let sink = Arc::new(CollectingSink::new());
        let config = config(&sink);
        let mut ctx = ValidationContext::new(&config, "vkTest");

        ctx.warning(crate::vuid::NONE, format_args!("just a warning"));
        assert!(!ctx.has_error());

        assert!(ctx.error(crate::vuid::INVALID_USAGE, format_args!("an error")));
        assert!(ctx.finish());
        assert_eq!(sink.diagnostics().len(), 2);
    }

    #[test]
    fn suppressed_errors_do_not_skip() {
        let sink = Arc::new(CollectingSink::new());
        let mut config = config(&sink);
        config
            .suppressed_vuids
            .insert(crate::vuid::INVALID_USAGE.into());

        let mut ctx = ValidationContext::new(&config, "vkTest");
        assert!(!ctx.error(crate::vuid::INVALID_USAGE, format_args!("an error")));
        assert!(!ctx.finish());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn minimum_severity() {
        let sink = Arc::new(CollectingSink::new());
        let config = ValidatorConfig {
            minimum_severity: Severity::Error,
            ..config(&sink)
        };

        let mut ctx = ValidationContext::new(&config, "vkTest");
        ctx.warning(crate::vuid::NONE, format_args!("hidden"));
        ctx.performance_warning_for(
            ObjectType::Swapchain,
            vk::SwapchainKHR::null(),
            crate::vuid::SUBOPTIMAL_SWAPCHAIN,
            format_args!("hidden"),
        );
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn current_object() {
        let sink = Arc::new(CollectingSink::new());
        let config = config(&sink);
        let mut ctx = ValidationContext::new(&config, "vkTest")
            .with_object(ObjectType::Buffer, vk::Buffer::from_raw(7));

        ctx.error(crate::vuid::NONE, format_args!("x"));
        ctx.error_unattached(crate::vuid::NONE, format_args!("y"));

        let diagnostics = sink.take();
        assert_eq!(diagnostics[0].object_type, ObjectType::Buffer);
        assert_eq!(diagnostics[0].object_handle, 7);
        assert_eq!(diagnostics[1].object_type, ObjectType::Unknown);
        assert_eq!(diagnostics[1].object_handle, 0);
    }
}
