//! Bit-field codec
//!
//! Packs several small integers into one machine word. A field is a
//! contiguous run of `width` bits starting `shift` bits from the LSB.
//!
//! Writing a value wider than its field truncates it to the field width.
//! Callers that care check [`Field64::fits`] first.

use core::ops::{BitAnd, BitOr, Shl};

/// Read-modify-write one segment of `word`
///
/// Clears the bits kept out by `erase_mask`, then ORs in
/// `(value & add_mask) << shift`. `add_mask` must cover exactly the segment
/// width and `erase_mask` must be the complement of the shifted segment;
/// anything else corrupts the neighbouring fields.
pub fn write_segment<W>(word: &mut W, value: W, erase_mask: W, add_mask: W, shift: u32)
where
    W: Copy + BitAnd<Output = W> + BitOr<Output = W> + Shl<u32, Output = W>,
{
    *word = (*word & erase_mask) | ((value & add_mask) << shift);
}

macro_rules! field_type {
    ($(#[$meta:meta])* $name:ident, $word:ty, $disjoint:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            shift: u32,
            width: u32,
        }

        impl $name {
            /// Describe a field; panics at compile time when used in a
            /// const and the field does not fit the word
            pub const fn new(shift: u32, width: u32) -> Self {
                assert!(width > 0 && shift + width <= <$word>::BITS);
                Self { shift, width }
            }

            pub const fn shift(self) -> u32 {
                self.shift
            }

            pub const fn width(self) -> u32 {
                self.width
            }

            /// Mask of the field value before shifting
            pub const fn add_mask(self) -> $word {
                <$word>::MAX >> (<$word>::BITS - self.width)
            }

            /// Word mask that keeps every bit except this field's
            pub const fn erase_mask(self) -> $word {
                !(self.add_mask() << self.shift)
            }

            /// Extract the field from `word`
            pub const fn read(self, word: $word) -> $word {
                (word >> self.shift) & self.add_mask()
            }

            /// Store `value` in `word`, truncating to the field width
            pub fn write(self, word: &mut $word, value: $word) {
                write_segment(word, value, self.erase_mask(), self.add_mask(), self.shift);
            }

            /// Whether `value` survives a write unchanged
            pub const fn fits(self, value: $word) -> bool {
                value <= self.add_mask()
            }

            pub const fn overlaps(self, other: Self) -> bool {
                (self.add_mask() << self.shift) & (other.add_mask() << other.shift) != 0
            }
        }

        /// Whether no two fields in `fields` share a bit
        pub const fn $disjoint(fields: &[$name]) -> bool {
            let mut i = 0;
            while i < fields.len() {
                let mut j = i + 1;
                while j < fields.len() {
                    if fields[i].overlaps(fields[j]) {
                        return false;
                    }
                    j += 1;
                }
                i += 1;
            }
            true
        }
    };
}

field_type!(
    /// Field within a 16-bit word
    Field16,
    u16,
    disjoint16
);

field_type!(
    /// Field within a 64-bit word
    Field64,
    u64,
    disjoint64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_segment_64() {
        let mut word: u64 = u64::MAX;
        write_segment(&mut word, 0x155, 0xFFC0_0FFF_FFFF_FFFF, 0x3FF, 44);
        assert_eq!((word >> 44) & 0x3FF, 0x155);
        // Neighbours untouched
        assert_eq!(word >> 54, 0x3FF);
        assert_eq!(word & 0xFFF_FFFF_FFFF, 0xFFF_FFFF_FFFF);
    }

    #[test]
    fn test_write_segment_16() {
        let mut word: u16 = 0;
        write_segment(&mut word, 0x7, 0xF0FF, 0xF, 8);
        assert_eq!(word, 0x0700);
    }

    #[test]
    fn test_masks() {
        let field = Field64::new(54, 10);
        assert_eq!(field.add_mask(), 0x3FF);
        assert_eq!(field.erase_mask(), 0x003F_FFFF_FFFF_FFFF);

        let nibble = Field16::new(12, 4);
        assert_eq!(nibble.erase_mask(), 0x0FFF);
    }

    #[test]
    fn test_full_width_field() {
        let field = Field16::new(0, 16);
        assert_eq!(field.add_mask(), u16::MAX);
        let mut word = 0;
        field.write(&mut word, 0xBEEF);
        assert_eq!(word, 0xBEEF);
    }

    #[test]
    fn test_overflow_truncates() {
        let field = Field64::new(4, 10);
        let mut word = 0;
        assert!(!field.fits(1024));
        field.write(&mut word, 1024 + 7);
        assert_eq!(field.read(word), 7);
        assert_eq!(word & 0xF, 0);
    }

    #[test]
    fn test_overlap_detection() {
        let a = Field64::new(0, 4);
        let b = Field64::new(4, 10);
        let c = Field64::new(3, 2);
        assert!(!a.overlaps(b));
        assert!(a.overlaps(c));
        assert!(disjoint64(&[a, b]));
        assert!(!disjoint64(&[a, b, c]));
    }
}
