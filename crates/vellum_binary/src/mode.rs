//! Header constants and mode flags.

use std::ops::{BitAnd, BitOr};

/// Magic number opening every binary document.
pub const MAGIC: u32 = 0x4849_13FF;

/// Format major version; a document with a greater major is rejected.
pub const VERSION_MAJOR: u32 = 1;

/// Format minor version.
pub const VERSION_MINOR: u32 = 0;

/// The version word as written: `(major << 16) | minor`.
#[must_use]
pub const fn version_word() -> u32 {
    (VERSION_MAJOR << 16) | VERSION_MINOR
}

/// Mode flags carried in the header's third word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BinaryMode(u32);

impl BinaryMode {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Body is raw-DEFLATE compressed.
    pub const COMPRESS: Self = Self(0x1);
    /// Body compression carries a zlib wrapper. Recognized and rejected.
    pub const ZLIB_HEADER: Self = Self(0x2);
    /// Decode unregistered object classes as proxies instead of failing.
    pub const CREATE_PROXY: Self = Self(0x4);
    /// Time and DateTime payloads are epoch-relative milliseconds. Always
    /// set on encode; its absence marks a legacy layout this crate does not
    /// read.
    pub const DATETIME_AS_TICKS: Self = Self(0x8);

    /// Builds a mode from a raw header word.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw header word.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for BinaryMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for BinaryMode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
