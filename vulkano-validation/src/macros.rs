// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

/// Builds a `ParameterName` from a template and the indices that fill its `%i` placeholders.
macro_rules! param {
    ($template:literal) => {
        $crate::name::ParameterName::new($template)
    };
    ($template:literal, $($index:expr),+ $(,)?) => {
        $crate::name::ParameterName::with_indices($template, &[$($index as u32),+])
    };
}

/// Implements `KnownValues` for an `ash` enumeration, from the list of its valid values.
macro_rules! known_values {
    {
        $(
            $ty:ty = $name:literal {
                $($value:ident),+ $(,)?
            }
        )+
    } => {
        $(
            impl $crate::enums::KnownValues for $ty {
                const NAME: &'static str = $name;

                #[inline]
                fn is_known(self) -> bool {
                    const VALUES: &[$ty] = &[$(<$ty>::$value),+];

                    VALUES.contains(&self)
                }

                #[inline]
                fn as_raw(self) -> i32 {
                    <$ty>::as_raw(self)
                }
            }
        )+
    };
}

/// Implements `KnownFlags` for an `ash` flags type, from the list of its valid bits.
macro_rules! known_flags {
    {
        $(
            $ty:ty = $name:literal {
                $($bit:ident),+ $(,)?
            }
        )+
    } => {
        $(
            impl $crate::flags::KnownFlags for $ty {
                const NAME: &'static str = $name;
                const ALL: $crate::flags::FlagSet =
                    $crate::flags::FlagSet::from_bits(0 $(| <$ty>::$bit.as_raw() as u64)+);

                #[inline]
                fn into_flag_set(self) -> $crate::flags::FlagSet {
                    $crate::flags::FlagSet::from_bits(self.as_raw() as u64)
                }
            }
        )+
    };
}

/// The structure types of the given `ash` structures, as a slice usable in constants.
macro_rules! stypes {
    [$($ty:ident),* $(,)?] => {
        &[$(<ash::vk::$ty<'static> as ash::vk::TaggedStructure>::STRUCTURE_TYPE),*]
    };
}
