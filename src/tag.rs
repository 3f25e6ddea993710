//! Compile-time dispatch tags and the element trait table
//!
//! A tag is a zero-sized descriptor of a register geometry: how a 512-bit
//! register is subdivided into lanes. Tags are never inspected at runtime;
//! they exist so trait dispatch can pick the one specialization matching a
//! geometry at compile time, the same way the element types themselves pick
//! between signed and unsigned instruction forms.
//!
//! The [`LaneTag`] impls double as this tier's trait table: each geometry is
//! mapped to the native mask representation its predicates produce. At the
//! 512-bit tier that is always a bitmask register (`u64` down to `u8`);
//! other tiers carry their own table and may map to vector-form masks.

use crate::mask::BitMask;

mod sealed {
    pub trait Sealed {}
}

/// Lane geometry of a 512-bit register.
pub trait LaneTag: sealed::Sealed + Copy + Send + Sync + 'static {
    /// Lanes in a 512-bit register at this granularity.
    const LANES: usize;

    /// Bits per lane.
    const LANE_BITS: usize;

    /// Native predicate mask for this lane count.
    type Mask: BitMask;
}

/// 64 lanes of 8 bits.
#[derive(Clone, Copy, Debug)]
pub struct Lanes64;

/// 32 lanes of 16 bits.
#[derive(Clone, Copy, Debug)]
pub struct Lanes32;

/// 16 lanes of 32 bits.
#[derive(Clone, Copy, Debug)]
pub struct Lanes16;

/// 8 lanes of 64 bits.
#[derive(Clone, Copy, Debug)]
pub struct Lanes8;

impl sealed::Sealed for Lanes64 {}
impl sealed::Sealed for Lanes32 {}
impl sealed::Sealed for Lanes16 {}
impl sealed::Sealed for Lanes8 {}

impl LaneTag for Lanes64 {
    const LANES: usize = 64;
    const LANE_BITS: usize = 8;
    type Mask = u64;
}

impl LaneTag for Lanes32 {
    const LANES: usize = 32;
    const LANE_BITS: usize = 16;
    type Mask = u32;
}

impl LaneTag for Lanes16 {
    const LANES: usize = 16;
    const LANE_BITS: usize = 32;
    type Mask = u16;
}

impl LaneTag for Lanes8 {
    const LANES: usize = 8;
    const LANE_BITS: usize = 64;
    type Mask = u8;
}

// Every geometry must tile the register exactly.
const _: () = assert!(Lanes64::LANES * Lanes64::LANE_BITS == 512);
const _: () = assert!(Lanes32::LANES * Lanes32::LANE_BITS == 512);
const _: () = assert!(Lanes16::LANES * Lanes16::LANE_BITS == 512);
const _: () = assert!(Lanes8::LANES * Lanes8::LANE_BITS == 512);

/// Scalar types that occupy one lane of a 512-bit register.
///
/// The associated tag fixes the geometry; the scalar's own signedness
/// selects between the signed and unsigned instruction forms of the ordered
/// operations (greater-than, max). Equality, addition and the bitwise group
/// are sign-independent and keyed on the geometry alone.
pub trait SimdElement: sealed::Sealed + Copy + PartialEq + core::fmt::Debug + 'static {
    /// Geometry this element occupies in a 512-bit register.
    type Tag: LaneTag;

    /// Whether ordered operations use the signed instruction forms.
    const SIGNED: bool;

    /// Load mask applied after a widening gather of this source type: the
    /// unsigned maximum of the type, so narrow loads do not drag adjacent
    /// bytes (or sign bits) into the wide destination lanes. `None` when
    /// the load would need sign extension, which this tier does not
    /// provide.
    const GATHER_LOAD_MASK: Option<u64>;

    /// Decode one lane from its little-endian byte image. Supports the
    /// lane-extraction test surface.
    fn read_lane(bytes: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($ty:ty, $tag:ty, signed = $signed:expr, gather_mask = $mask:expr) => {
        impl sealed::Sealed for $ty {}

        impl SimdElement for $ty {
            type Tag = $tag;
            const SIGNED: bool = $signed;
            const GATHER_LOAD_MASK: Option<u64> = $mask;

            #[inline]
            fn read_lane(bytes: &[u8]) -> Self {
                Self::from_le_bytes(bytes.try_into().expect("lane byte width"))
            }
        }
    };
}

impl_element!(i8, Lanes64, signed = true, gather_mask = None);
impl_element!(u8, Lanes64, signed = false, gather_mask = Some(0xff));
impl_element!(i16, Lanes32, signed = true, gather_mask = None);
impl_element!(u16, Lanes32, signed = false, gather_mask = Some(0xffff));
impl_element!(i32, Lanes16, signed = true, gather_mask = None);
impl_element!(u32, Lanes16, signed = false, gather_mask = Some(0xffff_ffff));
impl_element!(i64, Lanes8, signed = true, gather_mask = Some(u64::MAX));
impl_element!(u64, Lanes8, signed = false, gather_mask = Some(u64::MAX));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_counts() {
        assert_eq!(Lanes64::LANES, 64);
        assert_eq!(Lanes32::LANES, 32);
        assert_eq!(Lanes16::LANES, 16);
        assert_eq!(Lanes8::LANES, 8);
    }

    #[test]
    fn test_element_geometry() {
        assert_eq!(<<i8 as SimdElement>::Tag as LaneTag>::LANES, 64);
        assert_eq!(<<u16 as SimdElement>::Tag as LaneTag>::LANES, 32);
        assert_eq!(<<i32 as SimdElement>::Tag as LaneTag>::LANES, 16);
        assert_eq!(<<u64 as SimdElement>::Tag as LaneTag>::LANES, 8);
    }

    #[test]
    fn test_signedness_table() {
        assert!(i8::SIGNED);
        assert!(i64::SIGNED);
        assert!(!u8::SIGNED);
        assert!(!u32::SIGNED);
    }

    #[test]
    fn test_gather_load_masks() {
        assert_eq!(u8::GATHER_LOAD_MASK, Some(0xff));
        assert_eq!(u32::GATHER_LOAD_MASK, Some(0xffff_ffff));
        assert_eq!(u64::GATHER_LOAD_MASK, Some(u64::MAX));
        // Signed narrow sources would need sign extension.
        assert_eq!(i8::GATHER_LOAD_MASK, None);
        assert_eq!(i16::GATHER_LOAD_MASK, None);
        assert_eq!(i32::GATHER_LOAD_MASK, None);
        // Full-width signed loads need no extension.
        assert_eq!(i64::GATHER_LOAD_MASK, Some(u64::MAX));
    }

    #[test]
    fn test_read_lane_decodes_little_endian() {
        assert_eq!(i8::read_lane(&[0xff]), -1);
        assert_eq!(u16::read_lane(&[0x34, 0x12]), 0x1234);
        assert_eq!(i32::read_lane(&[0x00, 0x00, 0x00, 0x80]), i32::MIN);
        assert_eq!(u64::read_lane(&[1, 0, 0, 0, 0, 0, 0, 0]), 1);
    }
}
