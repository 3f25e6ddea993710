//! AVX-512 backend (512-bit x86_64 tier)
//!
//! The widest x86 register tier: 64-byte registers subdivided into 64×8,
//! 32×16, 16×32 or 8×64-bit lanes, with predicates held in dedicated mask
//! registers, one bit per lane.
//!
//! # Narrow-lane gating
//!
//! Byte and word granularity needs the avx512bw extension. When a build
//! enables it, the 8/16-bit impls below compile; without it the alternative
//! impls at the bottom of this file compile instead, which keep only the
//! whole-register operations and leave everything else to the
//! capability-gap fallbacks.
//!
//! # Capability gaps at this tier
//!
//! Deliberately unimplemented, aborting via the capability-gap condition
//! rather than emulating: 8-bit and 64-bit lane multiply, 8/16-bit logical
//! shifts, lane shuffles, register matrix transpose, gathers indexed at
//! 8/16/32-bit granularity, and gathers that would sign-extend a narrow
//! source. A lanewise minimum is likewise not part of this tier's
//! vocabulary.
//!
//! # Safety
//!
//! All AVX-512 intrinsics are marked `unsafe` by Rust. This module isolates
//! the unsafe code in the backend and verifies correctness through the lane
//! tests below; callers must only invoke the backend when the running CPU
//! supports the tier (`Tier::Avx512.ensure()`).

use core::any::type_name;
use std::arch::x86_64::*;

use crate::error::capability_gap;
use crate::tag::SimdElement;
use crate::vector::Reg512;

use super::SimdBackend;

/// AVX-512 backend (512-bit SIMD for x86_64)
pub struct Avx512Backend;

// ---------------------------------------------------------------------------
// Whole-register kernels
//
// One body per operation, shared by every lane geometry: these act on the
// full 512 bits and do not care how the register is subdivided.
// ---------------------------------------------------------------------------

#[target_feature(enable = "avx512f")]
unsafe fn zero_512() -> __m512i {
    _mm512_setzero_si512()
}

#[target_feature(enable = "avx512f")]
unsafe fn or_512(a: __m512i, b: __m512i) -> __m512i {
    _mm512_or_si512(a, b)
}

#[target_feature(enable = "avx512f")]
unsafe fn and_512(a: __m512i, b: __m512i) -> __m512i {
    _mm512_and_si512(a, b)
}

#[target_feature(enable = "avx512f")]
unsafe fn andnot_512(a: __m512i, b: __m512i) -> __m512i {
    _mm512_andnot_si512(a, b)
}

// Complement is bit-parallel regardless of lane subdivision; the all-ones
// operand is built at 64-bit granularity.
#[target_feature(enable = "avx512f")]
unsafe fn not_512(a: __m512i) -> __m512i {
    _mm512_andnot_si512(a, _mm512_set1_epi64(-1))
}

#[target_feature(enable = "avx512f")]
unsafe fn storeu_512<T>(mem: *mut T, v: __m512i) {
    _mm512_storeu_si512(mem as *mut __m512i, v)
}

#[target_feature(enable = "avx512f")]
unsafe fn load_512<T>(mem: *const T) -> __m512i {
    _mm512_load_si512(mem as *const __m512i)
}

#[target_feature(enable = "avx512f")]
unsafe fn test_zeros_512(v: __m512i, mask: __m512i) -> bool {
    _mm512_test_epi64_mask(v, mask) == 0
}

#[target_feature(enable = "avx512f")]
unsafe fn test_ones_512(v: __m512i, mask: __m512i) -> bool {
    // All ones under the mask == complement is all zeros under the mask.
    _mm512_test_epi64_mask(not_512(v), mask) == 0
}

// Qword-indexed gather with the loaded values masked down to the source
// width, so a narrow source never drags adjacent bytes into a lane.
#[target_feature(enable = "avx512f")]
unsafe fn gather_qwords<const SCALE: i32>(
    base: *const u8,
    idx: __m512i,
    load_mask: u64,
) -> __m512i {
    _mm512_and_si512(
        _mm512_i64gather_epi64::<SCALE>(idx, base as *const i64),
        _mm512_set1_epi64(load_mask as i64),
    )
}

// ---------------------------------------------------------------------------
// 64 × 8-bit lanes (avx512bw)
// ---------------------------------------------------------------------------

#[cfg(target_feature = "avx512bw")]
impl SimdBackend<i8> for Avx512Backend {
    type Reg = Reg512<i8>;
    type LaneArray = [i8; 64];

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn splat(value: i8) -> Reg512<i8> {
        Reg512::new(_mm512_set1_epi8(value))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn from_lanes(l: [i8; 64]) -> Reg512<i8> {
        // The set intrinsic fills from the highest lane down; feed the
        // lanes in reverse so l[0] lands in lane 0.
        Reg512::new(_mm512_set_epi8(
            l[63], l[62], l[61], l[60], l[59], l[58], l[57], l[56],
            l[55], l[54], l[53], l[52], l[51], l[50], l[49], l[48],
            l[47], l[46], l[45], l[44], l[43], l[42], l[41], l[40],
            l[39], l[38], l[37], l[36], l[35], l[34], l[33], l[32],
            l[31], l[30], l[29], l[28], l[27], l[26], l[25], l[24],
            l[23], l[22], l[21], l[20], l[19], l[18], l[17], l[16],
            l[15], l[14], l[13], l[12], l[11], l[10], l[9], l[8],
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<i8> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_eq(a: Reg512<i8>, b: Reg512<i8>) -> __mmask64 {
        _mm512_cmpeq_epi8_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_gt(a: Reg512<i8>, b: Reg512<i8>) -> __mmask64 {
        _mm512_cmpgt_epi8_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<i8>, b: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<i8>, b: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<i8>, b: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn add(a: Reg512<i8>, b: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(_mm512_add_epi8(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn sub(a: Reg512<i8>, b: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(_mm512_sub_epi8(a.0, b.0))
    }

    unsafe fn mul(_a: Reg512<i8>, _b: Reg512<i8>) -> Reg512<i8> {
        capability_gap("mul", "i8", "8-bit lane multiply is not provided")
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn max(a: Reg512<i8>, b: Reg512<i8>) -> Reg512<i8> {
        Reg512::new(_mm512_max_epi8(a.0, b.0))
    }

    unsafe fn shift_right_logical(_v: Reg512<i8>, _count: u32) -> Reg512<i8> {
        capability_gap(
            "shift_right_logical",
            "i8",
            "8-bit logical shifts are not provided",
        )
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn blend(a: Reg512<i8>, b: Reg512<i8>, mask: __mmask64) -> Reg512<i8> {
        Reg512::new(_mm512_mask_blend_epi8(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut i8, v: Reg512<i8>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const i8) -> Reg512<i8> {
        Reg512::new(load_512(mem))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<i8>, mask: Reg512<i8>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<i8>, mask: Reg512<i8>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

#[cfg(target_feature = "avx512bw")]
impl SimdBackend<u8> for Avx512Backend {
    type Reg = Reg512<u8>;
    type LaneArray = [u8; 64];

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn splat(value: u8) -> Reg512<u8> {
        Reg512::new(_mm512_set1_epi8(value as i8))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn from_lanes(lanes: [u8; 64]) -> Reg512<u8> {
        let l = lanes.map(|v| v as i8);
        Reg512::new(_mm512_set_epi8(
            l[63], l[62], l[61], l[60], l[59], l[58], l[57], l[56],
            l[55], l[54], l[53], l[52], l[51], l[50], l[49], l[48],
            l[47], l[46], l[45], l[44], l[43], l[42], l[41], l[40],
            l[39], l[38], l[37], l[36], l[35], l[34], l[33], l[32],
            l[31], l[30], l[29], l[28], l[27], l[26], l[25], l[24],
            l[23], l[22], l[21], l[20], l[19], l[18], l[17], l[16],
            l[15], l[14], l[13], l[12], l[11], l[10], l[9], l[8],
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<u8> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_eq(a: Reg512<u8>, b: Reg512<u8>) -> __mmask64 {
        _mm512_cmpeq_epi8_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_gt(a: Reg512<u8>, b: Reg512<u8>) -> __mmask64 {
        _mm512_cmpgt_epu8_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<u8>, b: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<u8>, b: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<u8>, b: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn add(a: Reg512<u8>, b: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(_mm512_add_epi8(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn sub(a: Reg512<u8>, b: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(_mm512_sub_epi8(a.0, b.0))
    }

    unsafe fn mul(_a: Reg512<u8>, _b: Reg512<u8>) -> Reg512<u8> {
        capability_gap("mul", "u8", "8-bit lane multiply is not provided")
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn max(a: Reg512<u8>, b: Reg512<u8>) -> Reg512<u8> {
        Reg512::new(_mm512_max_epu8(a.0, b.0))
    }

    unsafe fn shift_right_logical(_v: Reg512<u8>, _count: u32) -> Reg512<u8> {
        capability_gap(
            "shift_right_logical",
            "u8",
            "8-bit logical shifts are not provided",
        )
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn blend(a: Reg512<u8>, b: Reg512<u8>, mask: __mmask64) -> Reg512<u8> {
        Reg512::new(_mm512_mask_blend_epi8(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut u8, v: Reg512<u8>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const u8) -> Reg512<u8> {
        Reg512::new(load_512(mem))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<u8>, mask: Reg512<u8>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<u8>, mask: Reg512<u8>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

// ---------------------------------------------------------------------------
// 32 × 16-bit lanes (avx512bw)
// ---------------------------------------------------------------------------

#[cfg(target_feature = "avx512bw")]
impl SimdBackend<i16> for Avx512Backend {
    type Reg = Reg512<i16>;
    type LaneArray = [i16; 32];

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn splat(value: i16) -> Reg512<i16> {
        Reg512::new(_mm512_set1_epi16(value))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn from_lanes(l: [i16; 32]) -> Reg512<i16> {
        // Reversed for the same reason as the byte form.
        Reg512::new(_mm512_set_epi16(
            l[31], l[30], l[29], l[28], l[27], l[26], l[25], l[24],
            l[23], l[22], l[21], l[20], l[19], l[18], l[17], l[16],
            l[15], l[14], l[13], l[12], l[11], l[10], l[9], l[8],
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<i16> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_eq(a: Reg512<i16>, b: Reg512<i16>) -> __mmask32 {
        _mm512_cmpeq_epi16_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_gt(a: Reg512<i16>, b: Reg512<i16>) -> __mmask32 {
        _mm512_cmpgt_epi16_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn add(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(_mm512_add_epi16(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn sub(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(_mm512_sub_epi16(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn mul(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(_mm512_mullo_epi16(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn max(a: Reg512<i16>, b: Reg512<i16>) -> Reg512<i16> {
        Reg512::new(_mm512_max_epi16(a.0, b.0))
    }

    unsafe fn shift_right_logical(_v: Reg512<i16>, _count: u32) -> Reg512<i16> {
        capability_gap(
            "shift_right_logical",
            "i16",
            "16-bit logical shifts are not provided",
        )
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn blend(a: Reg512<i16>, b: Reg512<i16>, mask: __mmask32) -> Reg512<i16> {
        Reg512::new(_mm512_mask_blend_epi16(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut i16, v: Reg512<i16>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const i16) -> Reg512<i16> {
        Reg512::new(load_512(mem))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<i16>, mask: Reg512<i16>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<i16>, mask: Reg512<i16>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

#[cfg(target_feature = "avx512bw")]
impl SimdBackend<u16> for Avx512Backend {
    type Reg = Reg512<u16>;
    type LaneArray = [u16; 32];

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn splat(value: u16) -> Reg512<u16> {
        Reg512::new(_mm512_set1_epi16(value as i16))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn from_lanes(lanes: [u16; 32]) -> Reg512<u16> {
        let l = lanes.map(|v| v as i16);
        Reg512::new(_mm512_set_epi16(
            l[31], l[30], l[29], l[28], l[27], l[26], l[25], l[24],
            l[23], l[22], l[21], l[20], l[19], l[18], l[17], l[16],
            l[15], l[14], l[13], l[12], l[11], l[10], l[9], l[8],
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<u16> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_eq(a: Reg512<u16>, b: Reg512<u16>) -> __mmask32 {
        _mm512_cmpeq_epi16_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn cmp_gt(a: Reg512<u16>, b: Reg512<u16>) -> __mmask32 {
        _mm512_cmpgt_epu16_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn add(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(_mm512_add_epi16(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn sub(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(_mm512_sub_epi16(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn mul(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(_mm512_mullo_epi16(a.0, b.0))
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn max(a: Reg512<u16>, b: Reg512<u16>) -> Reg512<u16> {
        Reg512::new(_mm512_max_epu16(a.0, b.0))
    }

    unsafe fn shift_right_logical(_v: Reg512<u16>, _count: u32) -> Reg512<u16> {
        capability_gap(
            "shift_right_logical",
            "u16",
            "16-bit logical shifts are not provided",
        )
    }

    #[target_feature(enable = "avx512f", enable = "avx512bw")]
    unsafe fn blend(a: Reg512<u16>, b: Reg512<u16>, mask: __mmask32) -> Reg512<u16> {
        Reg512::new(_mm512_mask_blend_epi16(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut u16, v: Reg512<u16>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const u16) -> Reg512<u16> {
        Reg512::new(load_512(mem))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<u16>, mask: Reg512<u16>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<u16>, mask: Reg512<u16>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

// ---------------------------------------------------------------------------
// 16 × 32-bit lanes (avx512f)
// ---------------------------------------------------------------------------

impl SimdBackend<i32> for Avx512Backend {
    type Reg = Reg512<i32>;
    type LaneArray = [i32; 16];

    #[target_feature(enable = "avx512f")]
    unsafe fn splat(value: i32) -> Reg512<i32> {
        Reg512::new(_mm512_set1_epi32(value))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn from_lanes(l: [i32; 16]) -> Reg512<i32> {
        // Reversed so l[0] lands in lane 0.
        Reg512::new(_mm512_set_epi32(
            l[15], l[14], l[13], l[12], l[11], l[10], l[9], l[8],
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<i32> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_eq(a: Reg512<i32>, b: Reg512<i32>) -> __mmask16 {
        _mm512_cmpeq_epi32_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_gt(a: Reg512<i32>, b: Reg512<i32>) -> __mmask16 {
        _mm512_cmpgt_epi32_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn add(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(_mm512_add_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn sub(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(_mm512_sub_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn mul(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(_mm512_mullo_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn max(a: Reg512<i32>, b: Reg512<i32>) -> Reg512<i32> {
        Reg512::new(_mm512_max_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn shift_right_logical(v: Reg512<i32>, count: u32) -> Reg512<i32> {
        Reg512::new(_mm512_srl_epi32(v.0, _mm_cvtsi32_si128(count as i32)))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn blend(a: Reg512<i32>, b: Reg512<i32>, mask: __mmask16) -> Reg512<i32> {
        Reg512::new(_mm512_mask_blend_epi32(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut i32, v: Reg512<i32>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const i32) -> Reg512<i32> {
        Reg512::new(load_512(mem))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<i32>, mask: Reg512<i32>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<i32>, mask: Reg512<i32>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

impl SimdBackend<u32> for Avx512Backend {
    type Reg = Reg512<u32>;
    type LaneArray = [u32; 16];

    #[target_feature(enable = "avx512f")]
    unsafe fn splat(value: u32) -> Reg512<u32> {
        Reg512::new(_mm512_set1_epi32(value as i32))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn from_lanes(lanes: [u32; 16]) -> Reg512<u32> {
        let l = lanes.map(|v| v as i32);
        Reg512::new(_mm512_set_epi32(
            l[15], l[14], l[13], l[12], l[11], l[10], l[9], l[8],
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<u32> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_eq(a: Reg512<u32>, b: Reg512<u32>) -> __mmask16 {
        _mm512_cmpeq_epi32_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_gt(a: Reg512<u32>, b: Reg512<u32>) -> __mmask16 {
        _mm512_cmpgt_epu32_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn add(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(_mm512_add_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn sub(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(_mm512_sub_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn mul(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(_mm512_mullo_epi32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn max(a: Reg512<u32>, b: Reg512<u32>) -> Reg512<u32> {
        Reg512::new(_mm512_max_epu32(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn shift_right_logical(v: Reg512<u32>, count: u32) -> Reg512<u32> {
        Reg512::new(_mm512_srl_epi32(v.0, _mm_cvtsi32_si128(count as i32)))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn blend(a: Reg512<u32>, b: Reg512<u32>, mask: __mmask16) -> Reg512<u32> {
        Reg512::new(_mm512_mask_blend_epi32(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut u32, v: Reg512<u32>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const u32) -> Reg512<u32> {
        Reg512::new(load_512(mem))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<u32>, mask: Reg512<u32>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<u32>, mask: Reg512<u32>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

// ---------------------------------------------------------------------------
// 8 × 64-bit lanes (avx512f)
// ---------------------------------------------------------------------------

impl SimdBackend<i64> for Avx512Backend {
    type Reg = Reg512<i64>;
    type LaneArray = [i64; 8];

    #[target_feature(enable = "avx512f")]
    unsafe fn splat(value: i64) -> Reg512<i64> {
        Reg512::new(_mm512_set1_epi64(value))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn from_lanes(l: [i64; 8]) -> Reg512<i64> {
        Reg512::new(_mm512_set_epi64(
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<i64> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_eq(a: Reg512<i64>, b: Reg512<i64>) -> __mmask8 {
        _mm512_cmpeq_epi64_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_gt(a: Reg512<i64>, b: Reg512<i64>) -> __mmask8 {
        _mm512_cmpgt_epi64_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<i64>, b: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<i64>, b: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<i64>, b: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn add(a: Reg512<i64>, b: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(_mm512_add_epi64(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn sub(a: Reg512<i64>, b: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(_mm512_sub_epi64(a.0, b.0))
    }

    unsafe fn mul(_a: Reg512<i64>, _b: Reg512<i64>) -> Reg512<i64> {
        capability_gap("mul", "i64", "64-bit lane multiply is not provided")
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn max(a: Reg512<i64>, b: Reg512<i64>) -> Reg512<i64> {
        Reg512::new(_mm512_max_epi64(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn shift_right_logical(v: Reg512<i64>, count: u32) -> Reg512<i64> {
        Reg512::new(_mm512_srl_epi64(v.0, _mm_cvtsi32_si128(count as i32)))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn blend(a: Reg512<i64>, b: Reg512<i64>, mask: __mmask8) -> Reg512<i64> {
        Reg512::new(_mm512_mask_blend_epi64(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut i64, v: Reg512<i64>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const i64) -> Reg512<i64> {
        Reg512::new(load_512(mem))
    }

    unsafe fn gather<S: SimdElement, const SCALE: i32>(
        base: *const S,
        indices: Reg512<i64>,
    ) -> Reg512<i64> {
        match S::GATHER_LOAD_MASK {
            Some(load_mask) => {
                Reg512::new(gather_qwords::<SCALE>(base as *const u8, indices.0, load_mask))
            }
            None => capability_gap(
                "gather",
                type_name::<S>(),
                "sign-extending gather loads are not provided",
            ),
        }
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<i64>, mask: Reg512<i64>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<i64>, mask: Reg512<i64>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

impl SimdBackend<u64> for Avx512Backend {
    type Reg = Reg512<u64>;
    type LaneArray = [u64; 8];

    #[target_feature(enable = "avx512f")]
    unsafe fn splat(value: u64) -> Reg512<u64> {
        Reg512::new(_mm512_set1_epi64(value as i64))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn from_lanes(lanes: [u64; 8]) -> Reg512<u64> {
        let l = lanes.map(|v| v as i64);
        Reg512::new(_mm512_set_epi64(
            l[7], l[6], l[5], l[4], l[3], l[2], l[1], l[0],
        ))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn zeroed() -> Reg512<u64> {
        Reg512::new(zero_512())
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_eq(a: Reg512<u64>, b: Reg512<u64>) -> __mmask8 {
        _mm512_cmpeq_epi64_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn cmp_gt(a: Reg512<u64>, b: Reg512<u64>) -> __mmask8 {
        _mm512_cmpgt_epu64_mask(a.0, b.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_or(a: Reg512<u64>, b: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(or_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and(a: Reg512<u64>, b: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(and_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_and_not(a: Reg512<u64>, b: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(andnot_512(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn bitwise_not(v: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(not_512(v.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn add(a: Reg512<u64>, b: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(_mm512_add_epi64(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn sub(a: Reg512<u64>, b: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(_mm512_sub_epi64(a.0, b.0))
    }

    unsafe fn mul(_a: Reg512<u64>, _b: Reg512<u64>) -> Reg512<u64> {
        capability_gap("mul", "u64", "64-bit lane multiply is not provided")
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn max(a: Reg512<u64>, b: Reg512<u64>) -> Reg512<u64> {
        Reg512::new(_mm512_max_epu64(a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn shift_right_logical(v: Reg512<u64>, count: u32) -> Reg512<u64> {
        Reg512::new(_mm512_srl_epi64(v.0, _mm_cvtsi32_si128(count as i32)))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn blend(a: Reg512<u64>, b: Reg512<u64>, mask: __mmask8) -> Reg512<u64> {
        Reg512::new(_mm512_mask_blend_epi64(mask, a.0, b.0))
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn store_unaligned(mem: *mut u64, v: Reg512<u64>) {
        storeu_512(mem, v.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn load_aligned(mem: *const u64) -> Reg512<u64> {
        Reg512::new(load_512(mem))
    }

    unsafe fn gather<S: SimdElement, const SCALE: i32>(
        base: *const S,
        indices: Reg512<u64>,
    ) -> Reg512<u64> {
        match S::GATHER_LOAD_MASK {
            Some(load_mask) => {
                Reg512::new(gather_qwords::<SCALE>(base as *const u8, indices.0, load_mask))
            }
            None => capability_gap(
                "gather",
                type_name::<S>(),
                "sign-extending gather loads are not provided",
            ),
        }
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_zeros(v: Reg512<u64>, mask: Reg512<u64>) -> bool {
        test_zeros_512(v.0, mask.0)
    }

    #[target_feature(enable = "avx512f")]
    unsafe fn test_all_ones(v: Reg512<u64>, mask: Reg512<u64>) -> bool {
        test_ones_512(v.0, mask.0)
    }
}

// ---------------------------------------------------------------------------
// 8/16-bit lanes without avx512bw
//
// Builds lacking the narrow-lane extension keep only the whole-register
// operations at these geometries; everything lane-structured falls through
// to the capability-gap defaults of the contract.
// ---------------------------------------------------------------------------

#[cfg(not(target_feature = "avx512bw"))]
macro_rules! impl_without_narrow_lanes {
    ($ty:ty, $lanes:literal) => {
        impl SimdBackend<$ty> for Avx512Backend {
            type Reg = Reg512<$ty>;
            type LaneArray = [$ty; $lanes];

            #[target_feature(enable = "avx512f")]
            unsafe fn zeroed() -> Reg512<$ty> {
                Reg512::new(zero_512())
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn bitwise_or(a: Reg512<$ty>, b: Reg512<$ty>) -> Reg512<$ty> {
                Reg512::new(or_512(a.0, b.0))
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn bitwise_and(a: Reg512<$ty>, b: Reg512<$ty>) -> Reg512<$ty> {
                Reg512::new(and_512(a.0, b.0))
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn bitwise_and_not(a: Reg512<$ty>, b: Reg512<$ty>) -> Reg512<$ty> {
                Reg512::new(andnot_512(a.0, b.0))
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn bitwise_not(v: Reg512<$ty>) -> Reg512<$ty> {
                Reg512::new(not_512(v.0))
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn store_unaligned(mem: *mut $ty, v: Reg512<$ty>) {
                storeu_512(mem, v.0)
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn load_aligned(mem: *const $ty) -> Reg512<$ty> {
                Reg512::new(load_512(mem))
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn test_all_zeros(v: Reg512<$ty>, mask: Reg512<$ty>) -> bool {
                test_zeros_512(v.0, mask.0)
            }

            #[target_feature(enable = "avx512f")]
            unsafe fn test_all_ones(v: Reg512<$ty>, mask: Reg512<$ty>) -> bool {
                test_ones_512(v.0, mask.0)
            }
        }
    };
}

#[cfg(not(target_feature = "avx512bw"))]
impl_without_narrow_lanes!(i8, 64);
#[cfg(not(target_feature = "avx512bw"))]
impl_without_narrow_lanes!(u8, 64);
#[cfg(not(target_feature = "avx512bw"))]
impl_without_narrow_lanes!(i16, 32);
#[cfg(not(target_feature = "avx512bw"))]
impl_without_narrow_lanes!(u16, 32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityGap;
    use crate::mask::BitMask;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    /// Helper to run a test only on CPUs that support the 512-bit tier
    fn avx512_test<F>(test_fn: F)
    where
        F: FnOnce(),
    {
        if is_x86_feature_detected!("avx512f") {
            test_fn();
        } else {
            // Skip test on CPUs without AVX-512 support
            println!("Skipping AVX-512 test (CPU does not support avx512f)");
        }
    }

    /// Helper to run a test only when byte/word granularity is compiled in
    /// and present on the CPU
    #[cfg(target_feature = "avx512bw")]
    fn avx512bw_test<F>(test_fn: F)
    where
        F: FnOnce(),
    {
        if is_x86_feature_detected!("avx512bw") {
            test_fn();
        } else {
            println!("Skipping AVX-512BW test (CPU does not support avx512bw)");
        }
    }

    fn assert_capability_gap(expected_op: &str, f: impl FnOnce()) {
        let payload = catch_unwind(AssertUnwindSafe(f)).expect_err("expected a capability-gap abort");
        let gap = payload
            .downcast_ref::<CapabilityGap>()
            .expect("panic payload must be a CapabilityGap");
        assert_eq!(gap.op, expected_op);
    }

    #[test]
    fn test_avx512_splat_fills_every_dword_lane() {
        avx512_test(|| {
            let v = unsafe { Avx512Backend::splat(0x1357_9bdfi32) };
            for lane in 0..16 {
                assert_eq!(v.extract(lane), 0x1357_9bdf, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_splat_fills_every_qword_lane() {
        avx512_test(|| {
            let v = unsafe { Avx512Backend::splat(u64::MAX - 1) };
            for lane in 0..8 {
                assert_eq!(v.extract(lane), u64::MAX - 1, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_create_matches_splat() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::create(-42i32) };
            let b = unsafe { Avx512Backend::splat(-42i32) };
            assert_eq!(a, b);
        });
    }

    #[test]
    fn test_avx512_zeroed_register_is_all_zero() {
        avx512_test(|| {
            let v = unsafe { <Avx512Backend as SimdBackend<i32>>::zeroed() };
            assert_eq!(v.to_bytes(), [0u8; 64]);
        });
    }

    #[test]
    fn test_avx512_from_lanes_preserves_dword_order() {
        avx512_test(|| {
            let lanes: [i32; 16] = core::array::from_fn(|i| i as i32 * 3 - 5);
            let v = unsafe { <Avx512Backend as SimdBackend<i32>>::from_lanes(lanes) };
            for (i, expected) in lanes.iter().enumerate() {
                assert_eq!(v.extract(i), *expected, "lane {i}");
            }
        });
    }

    #[test]
    fn test_avx512_from_lanes_preserves_unsigned_dword_order() {
        avx512_test(|| {
            let lanes: [u32; 16] = core::array::from_fn(|i| u32::MAX - i as u32);
            let v = unsafe { <Avx512Backend as SimdBackend<u32>>::from_lanes(lanes) };
            for (i, expected) in lanes.iter().enumerate() {
                assert_eq!(v.extract(i), *expected, "lane {i}");
            }
        });
    }

    #[test]
    fn test_avx512_from_lanes_preserves_qword_order() {
        avx512_test(|| {
            let lanes: [i64; 8] = [7, -6, 5, -4, 3, -2, 1, i64::MIN];
            let v = unsafe { <Avx512Backend as SimdBackend<i64>>::from_lanes(lanes) };
            for (i, expected) in lanes.iter().enumerate() {
                assert_eq!(v.extract(i), *expected, "lane {i}");
            }
        });
    }

    #[test]
    fn test_avx512_cmp_eq_is_reflexive() {
        avx512_test(|| {
            let lanes: [i32; 16] = core::array::from_fn(|i| i as i32 * 17 - 40);
            let a = unsafe { <Avx512Backend as SimdBackend<i32>>::from_lanes(lanes) };
            let m = unsafe { <Avx512Backend as SimdBackend<i32>>::cmp_eq(a, a) };
            assert_eq!(m, u16::MAX);
        });
    }

    #[test]
    fn test_avx512_cmp_eq_selects_matching_lanes() {
        avx512_test(|| {
            let a: [i32; 16] = core::array::from_fn(|i| i as i32);
            let b: [i32; 16] = core::array::from_fn(|i| {
                if i % 2 == 0 {
                    i as i32
                } else {
                    100 + i as i32
                }
            });
            let va = unsafe { <Avx512Backend as SimdBackend<i32>>::from_lanes(a) };
            let vb = unsafe { <Avx512Backend as SimdBackend<i32>>::from_lanes(b) };
            let m = unsafe { <Avx512Backend as SimdBackend<i32>>::cmp_eq(va, vb) };
            for lane in 0..16u32 {
                assert_eq!(m.test(lane), lane % 2 == 0, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_cmp_gt_uses_signed_order_for_signed_lanes() {
        avx512_test(|| {
            let pos = unsafe { Avx512Backend::splat(1i32) };
            let neg = unsafe { Avx512Backend::splat(-1i32) };
            let gt = unsafe { <Avx512Backend as SimdBackend<i32>>::cmp_gt(pos, neg) };
            let lt = unsafe { <Avx512Backend as SimdBackend<i32>>::cmp_gt(neg, pos) };
            assert_eq!(gt, u16::MAX);
            assert_eq!(lt, 0);
        });
    }

    #[test]
    fn test_avx512_cmp_gt_uses_unsigned_order_for_unsigned_lanes() {
        avx512_test(|| {
            // Bit pattern of -1: the signed compare would call this small.
            let big = unsafe { Avx512Backend::splat(u32::MAX) };
            let one = unsafe { Avx512Backend::splat(1u32) };
            let m = unsafe { <Avx512Backend as SimdBackend<u32>>::cmp_gt(big, one) };
            assert_eq!(m, u16::MAX);
        });
    }

    #[test]
    fn test_avx512_add_wraps_at_dword_width() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(i32::MAX) };
            let b = unsafe { Avx512Backend::splat(1i32) };
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::add(a, b) };
            for lane in 0..16 {
                assert_eq!(r.extract(lane), i32::MIN, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_sub_wraps_at_dword_width() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(i32::MIN) };
            let b = unsafe { Avx512Backend::splat(1i32) };
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::sub(a, b) };
            for lane in 0..16 {
                assert_eq!(r.extract(lane), i32::MAX, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_add_qword_lanewise() {
        avx512_test(|| {
            let a = unsafe {
                <Avx512Backend as SimdBackend<i64>>::from_lanes([1, 2, 3, 4, 5, 6, 7, 8])
            };
            let b = unsafe {
                <Avx512Backend as SimdBackend<i64>>::from_lanes([10, 20, 30, 40, 50, 60, 70, 80])
            };
            let r = unsafe { <Avx512Backend as SimdBackend<i64>>::add(a, b) };
            for lane in 0..8 {
                assert_eq!(r.extract(lane), (lane as i64 + 1) * 11, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_mul_keeps_low_dword() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(0x4000_0000i32) };
            let b = unsafe { Avx512Backend::splat(4i32) };
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::mul(a, b) };
            for lane in 0..16 {
                assert_eq!(r.extract(lane), 0, "lane {lane}");
            }

            let a = unsafe { Avx512Backend::splat(-3i32) };
            let b = unsafe { Avx512Backend::splat(7i32) };
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::mul(a, b) };
            assert_eq!(r.extract(0), -21);
        });
    }

    #[test]
    fn test_avx512_max_respects_signedness() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(-5i32) };
            let b = unsafe { Avx512Backend::splat(3i32) };
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::max(a, b) };
            assert_eq!(r.extract(0), 3);

            // Same bit patterns viewed unsigned: 0xfffffffb wins.
            let a = unsafe { Avx512Backend::splat(-5i32 as u32) };
            let b = unsafe { Avx512Backend::splat(3u32) };
            let r = unsafe { <Avx512Backend as SimdBackend<u32>>::max(a, b) };
            assert_eq!(r.extract(0), -5i32 as u32);
        });
    }

    #[test]
    fn test_avx512_max_qword() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(i64::MIN) };
            let b = unsafe { Avx512Backend::splat(-1i64) };
            let r = unsafe { <Avx512Backend as SimdBackend<i64>>::max(a, b) };
            assert_eq!(r.extract(7), -1);

            let a = unsafe { Avx512Backend::splat(u64::MAX) };
            let b = unsafe { Avx512Backend::splat(1u64) };
            let r = unsafe { <Avx512Backend as SimdBackend<u64>>::max(a, b) };
            assert_eq!(r.extract(0), u64::MAX);
        });
    }

    #[test]
    fn test_avx512_shift_right_logical_is_zero_filling() {
        avx512_test(|| {
            // Logical, not arithmetic: the sign bit is not smeared.
            let v = unsafe { Avx512Backend::splat(-1i32) };
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::shift_right_logical(v, 28) };
            for lane in 0..16 {
                assert_eq!(r.extract(lane), 0xf, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_shift_right_logical_qword() {
        avx512_test(|| {
            let v = unsafe { Avx512Backend::splat(1u64 << 63) };
            let r = unsafe { <Avx512Backend as SimdBackend<u64>>::shift_right_logical(v, 63) };
            for lane in 0..8 {
                assert_eq!(r.extract(lane), 1, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_bitwise_and_not_complements_first_operand() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(0x0f0f_0f0fu32) };
            let b = unsafe { Avx512Backend::splat(0xffff_0000u32) };
            let r = unsafe { <Avx512Backend as SimdBackend<u32>>::bitwise_and_not(a, b) };
            assert_eq!(r.extract(0), 0xf0f0_0000);
        });
    }

    #[test]
    fn test_avx512_bitwise_identities() {
        avx512_test(|| {
            let lanes: [u32; 16] = core::array::from_fn(|i| (i as u32).wrapping_mul(0x9e37_79b9));
            let a = unsafe { <Avx512Backend as SimdBackend<u32>>::from_lanes(lanes) };
            let not_a = unsafe { <Avx512Backend as SimdBackend<u32>>::bitwise_not(a) };
            let ones = unsafe { Avx512Backend::splat(u32::MAX) };

            let and = unsafe { <Avx512Backend as SimdBackend<u32>>::bitwise_and(a, not_a) };
            assert!(unsafe { <Avx512Backend as SimdBackend<u32>>::test_all_zeros(and, ones) });

            let or = unsafe { <Avx512Backend as SimdBackend<u32>>::bitwise_or(a, not_a) };
            assert!(unsafe { <Avx512Backend as SimdBackend<u32>>::test_all_ones(or, ones) });
        });
    }

    #[test]
    fn test_avx512_test_ops_honor_the_mask_operand() {
        avx512_test(|| {
            // Junk in the high qword is ignored when the mask excludes it.
            let v = unsafe {
                <Avx512Backend as SimdBackend<u64>>::from_lanes([0, 0, 0, 0, 0, 0, 0, u64::MAX])
            };
            let low_mask = unsafe {
                <Avx512Backend as SimdBackend<u64>>::from_lanes([
                    u64::MAX,
                    u64::MAX,
                    u64::MAX,
                    u64::MAX,
                    u64::MAX,
                    u64::MAX,
                    u64::MAX,
                    0,
                ])
            };
            assert!(unsafe { <Avx512Backend as SimdBackend<u64>>::test_all_zeros(v, low_mask) });
            let full = unsafe { Avx512Backend::splat(u64::MAX) };
            assert!(!unsafe { <Avx512Backend as SimdBackend<u64>>::test_all_zeros(v, full) });
        });
    }

    #[test]
    fn test_avx512_blend_polarity_dword() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(1i32) };
            let b = unsafe { Avx512Backend::splat(2i32) };
            let mask = <u16 as BitMask>::from_fn(16, |lane| lane % 2 == 0);
            let r = unsafe { <Avx512Backend as SimdBackend<i32>>::blend(a, b, mask) };
            for lane in 0..16 {
                if lane % 2 == 0 {
                    assert_eq!(r.extract(lane), 2, "masked lane {lane} takes the second operand");
                } else {
                    assert_eq!(r.extract(lane), 1, "unmasked lane {lane} keeps the first operand");
                }
            }
        });
    }

    #[test]
    fn test_avx512_blend_polarity_qword() {
        avx512_test(|| {
            let a = unsafe { Avx512Backend::splat(10u64) };
            let b = unsafe { Avx512Backend::splat(20u64) };
            let r = unsafe { <Avx512Backend as SimdBackend<u64>>::blend(a, b, 0b0000_0001) };
            assert_eq!(r.extract(0), 20);
            assert_eq!(r.extract(1), 10);
        });
    }

    #[test]
    fn test_avx512_store_unaligned_round_trip() {
        avx512_test(|| {
            let lanes: [i32; 16] = core::array::from_fn(|i| i as i32 - 8);
            let v = unsafe { <Avx512Backend as SimdBackend<i32>>::from_lanes(lanes) };
            // Offset by one element so the destination is deliberately not
            // register-aligned.
            let mut buf = [0i32; 17];
            unsafe {
                <Avx512Backend as SimdBackend<i32>>::store_unaligned(buf.as_mut_ptr().add(1), v);
            }
            assert_eq!(&buf[1..], &lanes[..]);
        });
    }

    #[test]
    fn test_avx512_load_aligned_round_trip() {
        avx512_test(|| {
            #[repr(C, align(64))]
            struct Aligned([u32; 16]);

            let data = Aligned(core::array::from_fn(|i| i as u32 * 11));
            let v = unsafe { <Avx512Backend as SimdBackend<u32>>::load_aligned(data.0.as_ptr()) };
            for lane in 0..16 {
                assert_eq!(v.extract(lane), lane as u32 * 11, "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_gather_qword_full_width() {
        avx512_test(|| {
            let table: [i64; 16] = core::array::from_fn(|i| -(i as i64) * 1000);
            let idx = unsafe {
                <Avx512Backend as SimdBackend<i64>>::from_lanes([3, 0, 7, 2, 5, 1, 6, 4])
            };
            let r = unsafe {
                <Avx512Backend as SimdBackend<i64>>::gather::<i64, 8>(table.as_ptr(), idx)
            };
            let expected = [-3000, 0, -7000, -2000, -5000, -1000, -6000, -4000];
            for lane in 0..8 {
                assert_eq!(r.extract(lane), expected[lane], "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_gather_masks_narrow_unsigned_source() {
        avx512_test(|| {
            // High-bit-set values show that the load is masked, not
            // sign-extended.
            let table: [u16; 32] = core::array::from_fn(|i| 0x8000 | i as u16);
            let idx = unsafe {
                <Avx512Backend as SimdBackend<u64>>::from_lanes([9, 4, 11, 0, 7, 2, 13, 5])
            };
            let r = unsafe {
                <Avx512Backend as SimdBackend<u64>>::gather::<u16, 2>(table.as_ptr(), idx)
            };
            let expected: [u64; 8] = [9, 4, 11, 0, 7, 2, 13, 5].map(|i: u64| 0x8000 | i);
            for lane in 0..8 {
                assert_eq!(r.extract(lane), expected[lane], "lane {lane}");
            }
        });
    }

    #[test]
    fn test_avx512_gather_rejects_sign_extending_source() {
        let idx: Reg512<i64> = Reg512::from_bytes([0u8; 64]);
        let table = [0i16; 8];
        assert_capability_gap("gather", || {
            let _ = unsafe {
                <Avx512Backend as SimdBackend<i64>>::gather::<i16, 2>(table.as_ptr(), idx)
            };
        });
    }

    #[test]
    fn test_avx512_mul_qword_is_a_capability_gap() {
        let a: Reg512<i64> = Reg512::from_bytes([1u8; 64]);
        assert_capability_gap("mul", || {
            let _ = unsafe { <Avx512Backend as SimdBackend<i64>>::mul(a, a) };
        });
    }

    #[cfg(target_feature = "avx512bw")]
    mod narrow_lanes {
        use super::*;

        #[test]
        fn test_avx512_splat_fills_every_byte_lane() {
            avx512bw_test(|| {
                let v = unsafe { Avx512Backend::splat(-7i8) };
                for lane in 0..64 {
                    assert_eq!(v.extract(lane), -7, "lane {lane}");
                }
            });
        }

        #[test]
        fn test_avx512_from_lanes_preserves_byte_order() {
            avx512bw_test(|| {
                let lanes: [i8; 64] = core::array::from_fn(|i| i as i8 - 32);
                let v = unsafe { <Avx512Backend as SimdBackend<i8>>::from_lanes(lanes) };
                for (i, expected) in lanes.iter().enumerate() {
                    assert_eq!(v.extract(i), *expected, "lane {i}");
                }
            });
        }

        #[test]
        fn test_avx512_from_lanes_preserves_word_order() {
            avx512bw_test(|| {
                let lanes: [u16; 32] = core::array::from_fn(|i| 0x8000 | i as u16);
                let v = unsafe { <Avx512Backend as SimdBackend<u16>>::from_lanes(lanes) };
                for (i, expected) in lanes.iter().enumerate() {
                    assert_eq!(v.extract(i), *expected, "lane {i}");
                }
            });
        }

        #[test]
        fn test_avx512_add_wraps_at_byte_width() {
            avx512bw_test(|| {
                let a = unsafe { Avx512Backend::splat(127i8) };
                let b = unsafe { Avx512Backend::splat(1i8) };
                let r = unsafe { <Avx512Backend as SimdBackend<i8>>::add(a, b) };
                for lane in 0..64 {
                    assert_eq!(r.extract(lane), -128, "lane {lane}");
                }
            });
        }

        #[test]
        fn test_avx512_cmp_gt_unsigned_bytes() {
            avx512bw_test(|| {
                // 200 viewed signed is negative; the unsigned form must
                // still call it larger.
                let big = unsafe { Avx512Backend::splat(200u8) };
                let small = unsafe { Avx512Backend::splat(100u8) };
                let m = unsafe { <Avx512Backend as SimdBackend<u8>>::cmp_gt(big, small) };
                assert_eq!(m, u64::MAX);
            });
        }

        #[test]
        fn test_avx512_max_signed_bytes() {
            avx512bw_test(|| {
                let a = unsafe { Avx512Backend::splat(-5i8) };
                let b = unsafe { Avx512Backend::splat(3i8) };
                let r = unsafe { <Avx512Backend as SimdBackend<i8>>::max(a, b) };
                assert_eq!(r.extract(0), 3);
            });
        }

        #[test]
        fn test_avx512_mul_words_wraps() {
            avx512bw_test(|| {
                let a = unsafe { Avx512Backend::splat(300u16) };
                let b = unsafe { Avx512Backend::splat(300u16) };
                let r = unsafe { <Avx512Backend as SimdBackend<u16>>::mul(a, b) };
                for lane in 0..32 {
                    assert_eq!(r.extract(lane), 90000u32 as u16, "lane {lane}");
                }
            });
        }

        #[test]
        fn test_avx512_cmp_eq_words_selects_matching_lanes() {
            avx512bw_test(|| {
                let a: [i16; 32] = core::array::from_fn(|i| i as i16);
                let b: [i16; 32] = core::array::from_fn(|i| if i < 16 { i as i16 } else { -1 });
                let va = unsafe { <Avx512Backend as SimdBackend<i16>>::from_lanes(a) };
                let vb = unsafe { <Avx512Backend as SimdBackend<i16>>::from_lanes(b) };
                let m = unsafe { <Avx512Backend as SimdBackend<i16>>::cmp_eq(va, vb) };
                assert_eq!(m, 0x0000_ffff);
            });
        }

        #[test]
        fn test_avx512_blend_polarity_bytes() {
            avx512bw_test(|| {
                let a = unsafe { Avx512Backend::splat(1u8) };
                let b = unsafe { Avx512Backend::splat(2u8) };
                let mask = <u64 as BitMask>::from_fn(64, |lane| lane % 2 == 0);
                let r = unsafe { <Avx512Backend as SimdBackend<u8>>::blend(a, b, mask) };
                assert_eq!(r.extract(0), 2);
                assert_eq!(r.extract(1), 1);
                assert_eq!(r.extract(62), 2);
                assert_eq!(r.extract(63), 1);
            });
        }

        #[test]
        fn test_avx512_mul_bytes_is_a_capability_gap() {
            let a: Reg512<i8> = Reg512::from_bytes([1u8; 64]);
            assert_capability_gap("mul", || {
                let _ = unsafe { <Avx512Backend as SimdBackend<i8>>::mul(a, a) };
            });
        }

        #[test]
        fn test_avx512_shift_words_is_a_capability_gap() {
            let v: Reg512<i16> = Reg512::from_bytes([1u8; 64]);
            assert_capability_gap("shift_right_logical", || {
                let _ = unsafe {
                    <Avx512Backend as SimdBackend<i16>>::shift_right_logical(v, 1)
                };
            });
        }
    }

    #[cfg(not(target_feature = "avx512bw"))]
    mod without_narrow_lanes {
        use super::*;

        #[test]
        fn test_avx512_byte_add_gaps_without_narrow_extension() {
            let a: Reg512<i8> = Reg512::from_bytes([1u8; 64]);
            assert_capability_gap("add", || {
                let _ = unsafe { <Avx512Backend as SimdBackend<i8>>::add(a, a) };
            });
        }

        #[test]
        fn test_avx512_word_splat_gaps_without_narrow_extension() {
            assert_capability_gap("splat", || {
                let _ = unsafe { Avx512Backend::splat(1i16) };
            });
        }

        #[test]
        fn test_avx512_byte_whole_register_ops_still_work() {
            avx512_test(|| {
                let z = unsafe { <Avx512Backend as SimdBackend<i8>>::zeroed() };
                assert_eq!(z.to_bytes(), [0u8; 64]);

                let v: Reg512<i8> = Reg512::from_bytes([0xaau8; 64]);
                let n = unsafe { <Avx512Backend as SimdBackend<i8>>::bitwise_not(v) };
                assert_eq!(n.to_bytes(), [0x55u8; 64]);
            });
        }
    }
}
