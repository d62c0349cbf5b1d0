//! Build-time backend selection.
//!
//! Exactly one backend is compiled into a build and both export the same
//! native vector types, so everything above this module is backend-agnostic.
//!
//! | Target                          | Backend            |
//! |---------------------------------|--------------------|
//! | x86_64, or x86 with SSE2        | [`BackendKind::Sse2`] and up |
//! | anything else                   | [`BackendKind::Scalar`] |
//! | any target, `force-scalar` feature | [`BackendKind::Scalar`] |
//!
//! SSSE3 and SSE4.1 refinements are picked up from `-C target-feature` /
//! `-C target-cpu`. There is no runtime dispatch.

use std::sync::Once;

use serde::{Deserialize, Serialize};

/// `new(a, b, ..)` constructors for the 2- and 4-lane native types.
macro_rules! lane_ctor {
    ($($name:ident: $lane:ty => ($($arg:ident),+);)*) => {
        $(
            impl $name {
                /// Build from one scalar per lane, in lane order.
                #[inline(always)]
                pub fn new($($arg: $lane),+) -> Self {
                    Self::from_array([$($arg),+])
                }
            }
        )*
    };
}

#[cfg(all(
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    ),
    not(feature = "force-scalar")
))]
mod sse;
#[cfg(all(
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    ),
    not(feature = "force-scalar")
))]
pub use sse::{F32x2, F32x4, I8x16, I16x4, I16x8, I32x4, U8x4, U8x16, U16x4, U16x8, U32x4};

#[cfg(not(all(
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    ),
    not(feature = "force-scalar")
)))]
mod scalar;
#[cfg(not(all(
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    ),
    not(feature = "force-scalar")
)))]
pub use scalar::{F32x2, F32x4, I8x16, I16x4, I16x8, I32x4, U8x4, U8x16, U16x4, U16x8, U32x4};

/// Which instruction set the native vector types compile to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Portable array-backed loops.
    Scalar,
    /// x86 SSE2 baseline.
    Sse2,
    /// SSE2 plus SSSE3 byte shuffles.
    Ssse3,
    /// SSE2 through SSE4.1 (blends, `floor`, 32-bit min/max and multiply).
    #[serde(rename = "sse4.1")]
    Sse41,
}

impl BackendKind {
    /// Short lowercase name, as used in logs and config files.
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Scalar => "scalar",
            BackendKind::Sse2 => "sse2",
            BackendKind::Ssse3 => "ssse3",
            BackendKind::Sse41 => "sse4.1",
        }
    }

    /// True for every hardware backend.
    pub const fn is_simd(self) -> bool {
        !matches!(self, BackendKind::Scalar)
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Backend compiled into this build.
#[cfg(all(
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    ),
    not(feature = "force-scalar")
))]
pub const ACTIVE: BackendKind = if cfg!(target_feature = "sse4.1") {
    BackendKind::Sse41
} else if cfg!(target_feature = "ssse3") {
    BackendKind::Ssse3
} else {
    BackendKind::Sse2
};

/// Backend compiled into this build.
#[cfg(not(all(
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    ),
    not(feature = "force-scalar")
)))]
pub const ACTIVE: BackendKind = BackendKind::Scalar;

/// Backend compiled into this build.
#[inline]
pub const fn active() -> BackendKind {
    ACTIVE
}

/// Log the compiled backend once per process.
pub fn log_active() {
    static LOGGED: Once = Once::new();
    LOGGED.call_once(|| {
        log::info!("[Varna] vector backend: {}", ACTIVE);
        log::debug!(
            "[Varna] force-scalar feature: {}",
            cfg!(feature = "force-scalar")
        );
    });
}
