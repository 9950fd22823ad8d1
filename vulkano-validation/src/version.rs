// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use std::{cmp::Ordering, fmt};

/// A Vulkan API version, as packed into `apiVersion` fields.
///
/// The variant bits of the packed value are ignored.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Version {
    pub const V1_0: Version = Version::major_minor(1, 0);
    pub const V1_1: Version = Version::major_minor(1, 1);
    pub const V1_2: Version = Version::major_minor(1, 2);
    pub const V1_3: Version = Version::major_minor(1, 3);

    /// The highest version whose rules this crate knows about.
    pub const HIGHEST_KNOWN: Version = Version::V1_3;

    /// Constructs a `Version` from the given major and minor version numbers.
    #[inline]
    pub const fn major_minor(major: u16, minor: u16) -> Version {
        Version {
            major,
            minor,
            patch: 0,
        }
    }

    /// Unpacks a version number as found in `VkApplicationInfo::apiVersion` and friends.
    #[inline]
    pub const fn from_vulkan_version(value: u32) -> Version {
        Version {
            major: ((value & 0x1fc00000) >> 22) as u16,
            minor: ((value & 0x003ff000) >> 12) as u16,
            patch: (value & 0x00000fff) as u16,
        }
    }

    /// Packs the version back into the Vulkan representation, with a variant of 0.
    ///
    /// Components that do not fit their bit field are truncated.
    #[inline]
    pub const fn into_vulkan_version(self) -> u32 {
        ((self.major as u32 & 0x7f) << 22)
            | ((self.minor as u32 & 0x3ff) << 12)
            | (self.patch as u32 & 0xfff)
    }

    /// Returns the same version with the patch number cleared.
    #[inline]
    pub const fn without_patch(self) -> Version {
        Version::major_minor(self.major, self.minor)
    }

    /// Returns whether the major and minor components name a version this crate knows about.
    #[inline]
    pub fn is_known(self) -> bool {
        let version = self.without_patch();

        version >= Version::V1_0 && version <= Version::HIGHEST_KNOWN
    }

    /// Clamps a requested version to the range of versions this crate validates against.
    ///
    /// Anything below 1.0 is treated as 1.0, and anything above the highest known version is
    /// treated as that version.
    pub fn effective(self) -> Version {
        let version = self.without_patch();

        if version < Version::V1_0 {
            Version::V1_0
        } else {
            version.min(Version::HIGHEST_KNOWN)
        }
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => (),
            o => return o,
        };

        match self.minor.cmp(&other.minor) {
            Ordering::Equal => (),
            o => return o,
        };

        self.patch.cmp(&other.patch)
    }
}
