// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use smallvec::SmallVec;
use std::fmt;

/// The name of a parameter, as shown in diagnostics.
///
/// Parameters nested inside arrays are named with a template such as
/// `pCreateInfos[%i].pStages[%i].stage`, whose `%i` placeholders are replaced by the indices in
/// order. The string is only built when a diagnostic is actually emitted.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ParameterName {
    template: &'static str,
    indices: SmallVec<[u32; 4]>,
}

impl ParameterName {
    const PLACEHOLDER: &'static str = "%i";

    #[inline]
    pub(crate) fn new(template: &'static str) -> Self {
        ParameterName {
            template,
            indices: SmallVec::new(),
        }
    }

    #[inline]
    pub(crate) fn with_indices(template: &'static str, indices: &[u32]) -> Self {
        debug_assert_eq!(template.matches(Self::PLACEHOLDER).count(), indices.len());

        ParameterName {
            template,
            indices: SmallVec::from_slice(indices),
        }
    }

    #[inline]
    pub(crate) fn template(&self) -> &'static str {
        self.template
    }
}

impl From<&'static str> for ParameterName {
    #[inline]
    fn from(template: &'static str) -> Self {
        ParameterName::new(template)
    }
}

impl From<&ParameterName> for ParameterName {
    #[inline]
    fn from(name: &ParameterName) -> Self {
        name.clone()
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.template;
        let mut indices = self.indices.iter();

        while let Some(pos) = rest.find(Self::PLACEHOLDER) {
            f.write_str(&rest[..pos])?;

            // A template with more placeholders than indices keeps the placeholder visible.
            match indices.next() {
                Some(index) => write!(f, "{}", index)?,
                None => f.write_str(Self::PLACEHOLDER)?,
            }

            rest = &rest[pos + Self::PLACEHOLDER.len()..];
        }

        f.write_str(rest)
    }
}

impl fmt::Debug for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
