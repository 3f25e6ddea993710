//! Backend implementations for different SIMD instruction tiers
//!
//! This module defines the operation vocabulary every tier implements and
//! hosts the tier implementations themselves. A backend provides one
//! specialization of each operation per supported register geometry; the
//! element type a call is instantiated with selects the specialization at
//! compile time.
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. Safe
//! callers go through higher-level vector types built on this contract.
//!
//! # Backends
//!
//! - `avx512`: x86_64 maximum SIMD (512-bit registers, bitmask predicates)
//!
//! Narrower tiers (128-bit, 256-bit, scalar) implement the same contract in
//! their own crates/modules and are selected by the build, not at runtime.
//!
//! # Fallback layer
//!
//! Every method of [`SimdBackend`] carries a default body that raises the
//! fatal "not implemented for this hardware tier" condition. A tier
//! overrides exactly the operations its instruction set provides; anything
//! left to the default aborts loudly instead of returning fabricated data.
//! Instantiating the contract with an element type a tier has no impl for
//! at all is a compile error, not a runtime one.

use core::any::type_name;

use crate::error::capability_gap;
use crate::tag::{LaneTag, SimdElement};

#[cfg(target_arch = "x86_64")]
pub mod avx512;

/// Predicate mask an element type's comparisons produce at the current
/// tier.
pub type Mask<T> = <<T as SimdElement>::Tag as LaneTag>::Mask;

/// Operation vocabulary of one instruction tier for element type `T`.
///
/// Associated functions rather than methods: a backend is a zero-sized
/// dispatcher, and the element type parameter is the dispatch tag. Every
/// function is `unsafe` because implementations execute target-specific
/// instructions; callers must only invoke a backend whose tier the running
/// CPU supports (see [`crate::Tier::ensure`]).
pub trait SimdBackend<T: SimdElement> {
    /// Native register for `T` at this tier.
    type Reg: Copy;

    /// `[T; LANES]` for this geometry, in logical lane order.
    type LaneArray;

    /// Broadcast-fill: `value` replicated to every lane.
    unsafe fn splat(_value: T) -> Self::Reg {
        capability_gap("splat", type_name::<T>(), "no specialization at this tier")
    }

    /// Broadcast-fill as a single-call convenience; identical to
    /// [`splat`](Self::splat).
    #[inline]
    unsafe fn create(value: T) -> Self::Reg {
        Self::splat(value)
    }

    /// Explicit fill: lane `i` of the result holds `lanes[i]`.
    ///
    /// Implementations built on the native multi-value set intrinsics must
    /// reorder the arguments those intrinsics consume so the logical
    /// left-to-right order here is preserved; the reorder is covered by the
    /// explicit-fill lane-order tests.
    unsafe fn from_lanes(_lanes: Self::LaneArray) -> Self::Reg {
        capability_gap("from_lanes", type_name::<T>(), "no specialization at this tier")
    }

    /// All-zero register.
    unsafe fn zeroed() -> Self::Reg {
        capability_gap("zeroed", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise equality. Bit `i` of the mask is set where `a` and `b`
    /// agree in lane `i`; bit-pattern equality is sign-independent.
    unsafe fn cmp_eq(_a: Self::Reg, _b: Self::Reg) -> Mask<T> {
        capability_gap("cmp_eq", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise ordered greater-than, using the signed or unsigned
    /// instruction form `T` calls for.
    unsafe fn cmp_gt(_a: Self::Reg, _b: Self::Reg) -> Mask<T> {
        capability_gap("cmp_gt", type_name::<T>(), "no specialization at this tier")
    }

    /// Bitwise or over the whole register; lane geometry is irrelevant.
    unsafe fn bitwise_or(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap("bitwise_or", type_name::<T>(), "no specialization at this tier")
    }

    /// Bitwise and over the whole register.
    unsafe fn bitwise_and(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap("bitwise_and", type_name::<T>(), "no specialization at this tier")
    }

    /// `(!a) & b`, the native andnot operand order.
    unsafe fn bitwise_and_not(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap(
            "bitwise_and_not",
            type_name::<T>(),
            "no specialization at this tier",
        )
    }

    /// Bitwise complement of the whole register.
    unsafe fn bitwise_not(_v: Self::Reg) -> Self::Reg {
        capability_gap("bitwise_not", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise addition, wrapping modulo the lane width.
    unsafe fn add(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap("add", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise subtraction, wrapping modulo the lane width.
    unsafe fn sub(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap("sub", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise multiplication keeping the low half of each product.
    unsafe fn mul(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap("mul", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise maximum, using the signed or unsigned instruction form `T`
    /// calls for. A lanewise minimum is deliberately not part of this
    /// tier's vocabulary.
    unsafe fn max(_a: Self::Reg, _b: Self::Reg) -> Self::Reg {
        capability_gap("max", type_name::<T>(), "no specialization at this tier")
    }

    /// Lanewise logical (zero-filling) right shift by `count` bits.
    unsafe fn shift_right_logical(_v: Self::Reg, _count: u32) -> Self::Reg {
        capability_gap(
            "shift_right_logical",
            type_name::<T>(),
            "no specialization at this tier",
        )
    }

    /// Mask-driven select. Lane `i` of the result takes `b` where bit `i`
    /// of `mask` is set and `a` where it is clear — the convention of the
    /// native mask-blend instructions, pinned by the blend polarity tests.
    unsafe fn blend(_a: Self::Reg, _b: Self::Reg, _mask: Mask<T>) -> Self::Reg {
        capability_gap("blend", type_name::<T>(), "no specialization at this tier")
    }

    /// Write the register's bytes to `mem`; no alignment requirement.
    ///
    /// # Safety
    ///
    /// `mem` must be valid for a 64-byte write.
    unsafe fn store_unaligned(_mem: *mut T, _v: Self::Reg) {
        capability_gap(
            "store_unaligned",
            type_name::<T>(),
            "no specialization at this tier",
        )
    }

    /// Read a full register from `mem`.
    ///
    /// # Safety
    ///
    /// `mem` must be valid for a 64-byte read and aligned to the register's
    /// natural 64-byte boundary; a misaligned address is undefined
    /// behavior, not a checked error.
    unsafe fn load_aligned(_mem: *const T) -> Self::Reg {
        capability_gap(
            "load_aligned",
            type_name::<T>(),
            "no specialization at this tier",
        )
    }

    /// Lane-indexed load: for each lane `i` of `indices`, load one `S` from
    /// `base + indices[i] * SCALE` bytes. Result lanes have the width of
    /// the *index* lanes, with each loaded value masked to `S`'s bit width
    /// so narrower sources do not drag sign bits into the wide lanes.
    ///
    /// # Safety
    ///
    /// Every addressed element must be in bounds for the allocation behind
    /// `base`; out-of-range indices are undefined behavior.
    unsafe fn gather<S: SimdElement, const SCALE: i32>(
        _base: *const S,
        _indices: Self::Reg,
    ) -> Self::Reg {
        capability_gap(
            "gather",
            type_name::<T>(),
            "index granularity not supported at this tier",
        )
    }

    /// Lane permute of `v` by per-lane positions in `indices`.
    unsafe fn shuffle(_v: Self::Reg, _indices: Self::Reg) -> Self::Reg {
        capability_gap("shuffle", type_name::<T>(), "lane permutes are not provided")
    }

    /// In-register transpose of a square lane matrix held in `rows`.
    unsafe fn transpose(_rows: &mut [Self::Reg]) {
        capability_gap(
            "transpose",
            type_name::<T>(),
            "register matrix transpose is not provided",
        )
    }

    /// Whether every bit of `v` selected by the vector mask `mask` is zero.
    /// Operates at a fixed coarse granularity; the lane geometry does not
    /// change the answer.
    unsafe fn test_all_zeros(_v: Self::Reg, _mask: Self::Reg) -> bool {
        capability_gap(
            "test_all_zeros",
            type_name::<T>(),
            "no specialization at this tier",
        )
    }

    /// Whether every bit of `v` selected by the vector mask `mask` is one.
    unsafe fn test_all_ones(_v: Self::Reg, _mask: Self::Reg) -> bool {
        capability_gap(
            "test_all_ones",
            type_name::<T>(),
            "no specialization at this tier",
        )
    }
}
