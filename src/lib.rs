//! Rafaga: Compile-Time Dispatched SIMD Register Abstraction
//!
//! **Rafaga** (Spanish: "gust") lets width-agnostic vector code — fill,
//! compare, arithmetic, bitwise, blend, load/store, shift, gather — be
//! written once and compiled against whichever CPU vector tier a build
//! targets, without the calling code naming an instruction set. This crate
//! ships the widest x86 tier (512-bit AVX-512 registers) together with the
//! dispatch contract every tier implements.
//!
//! # Design Principles
//!
//! - **Selection at build time**: a zero-sized tag per register geometry
//!   plus the element type pick exactly one specialization; nothing is
//!   inspected at runtime
//! - **Fail loud at the boundary of support**: an operation this tier
//!   cannot perform aborts with a recognizable [`CapabilityGap`] payload,
//!   never a silently wrong result
//! - **Registers are plain values**: `Copy`, no allocation, no shared
//!   state; every operation is a pure function over its arguments
//! - **Unsafe isolated in the backend**: lane bookkeeping, masks and tags
//!   are ordinary safe Rust
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(target_arch = "x86_64")]
//! # {
//! use rafaga::backends::avx512::Avx512Backend;
//! use rafaga::backends::SimdBackend;
//! use rafaga::Tier;
//!
//! // Width-agnostic kernel: compiles against any backend that implements
//! // the contract for the element type.
//! unsafe fn clamp_floor<B, T>(v: B::Reg, floor: T) -> B::Reg
//! where
//!     T: rafaga::SimdElement,
//!     B: SimdBackend<T>,
//! {
//!     B::max(v, B::splat(floor))
//! }
//!
//! if Tier::Avx512.ensure().is_ok() {
//!     let v = unsafe { Avx512Backend::splat(-3i32) };
//!     let r = unsafe { clamp_floor::<Avx512Backend, i32>(v, 0) };
//!     assert_eq!(r.extract(0), 0);
//! }
//! # }
//! ```

pub mod backends;
pub mod error;
pub mod mask;
pub mod tag;
#[cfg(target_arch = "x86_64")]
pub mod vector;

pub use error::{CapabilityGap, RafagaError, Result};
pub use mask::BitMask;
pub use tag::{LaneTag, Lanes16, Lanes32, Lanes64, Lanes8, SimdElement};
#[cfg(target_arch = "x86_64")]
pub use vector::Reg512;

/// Instruction-set tier a build can target.
///
/// Ordered from narrowest to widest so tiers compare meaningfully:
/// `Tier::detect() >= Tier::Avx512` asks whether the widest tier can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// Scalar fallback (no vector registers)
    Scalar,
    /// SSE2 (128-bit, x86_64 baseline)
    Sse2,
    /// AVX2 (256-bit)
    Avx2,
    /// AVX-512 (512-bit)
    Avx512,
}

impl Tier {
    /// The tier this build was compiled for.
    ///
    /// Tier selection is a compile-time decision driven by the target
    /// features the build enables (`-C target-feature=+avx512f` or an
    /// equivalent `-C target-cpu`); the operations never branch on it.
    pub const fn compiled() -> Self {
        if cfg!(all(target_arch = "x86_64", target_feature = "avx512f")) {
            Tier::Avx512
        } else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
            Tier::Avx2
        } else if cfg!(all(target_arch = "x86_64", target_feature = "sse2")) {
            Tier::Sse2
        } else {
            Tier::Scalar
        }
    }

    /// Probe the CPU for the widest tier it can run.
    ///
    /// This exists for test harnesses and diagnostics deciding whether a
    /// compiled tier can be exercised on the current machine; the vector
    /// operations themselves never consult it.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx512f") {
                return Tier::Avx512;
            }
            if is_x86_feature_detected!("avx2") {
                return Tier::Avx2;
            }
            if is_x86_feature_detected!("sse2") {
                return Tier::Sse2;
            }
        }
        Tier::Scalar
    }

    /// Check that this tier can run on the current CPU.
    ///
    /// # Errors
    ///
    /// Returns [`RafagaError::UnsupportedTier`] when the CPU lacks the
    /// tier's instruction set.
    pub fn ensure(self) -> Result<()> {
        if Self::detect() >= self {
            Ok(())
        } else {
            Err(RafagaError::UnsupportedTier(self))
        }
    }
}

/// Whether the narrow-lane (byte/word granularity, avx512bw) extension was
/// enabled at compile time.
///
/// This flag gates which specializations of the 512-bit backend exist: with
/// it disabled, byte/word operations other than the whole-register group
/// fall through to the capability-gap fallbacks.
pub const NARROW_LANES_COMPILED: bool =
    cfg!(all(target_arch = "x86_64", target_feature = "avx512bw"));

/// Runtime probe for the narrow-lane extension, for test-skip and
/// diagnostics only.
pub fn narrow_lanes_detected() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        is_x86_feature_detected!("avx512bw")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Check that byte/word granularity can be exercised in this build on this
/// CPU.
///
/// # Errors
///
/// Returns [`RafagaError::NarrowLanesDisabled`] when the build was made
/// without avx512bw, and [`RafagaError::UnsupportedTier`] when the CPU
/// lacks it.
pub fn ensure_narrow_lanes() -> Result<()> {
    if !NARROW_LANES_COMPILED {
        return Err(RafagaError::NarrowLanesDisabled);
    }
    if !narrow_lanes_detected() {
        return Err(RafagaError::UnsupportedTier(Tier::Avx512));
    }
    Ok(())
}
