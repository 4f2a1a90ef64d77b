use crate::errors::FloatError;
use libm::{frexpf, ldexpf};
use std::convert::TryFrom;

/// Mantissa field width in bits.
const MANT_BITS: u32 = 24;
/// Low bits of the scaled fraction, the part that reaches the wire.
const MANT_MASK: u32 = (1 << MANT_BITS) - 1;
/// The mantissa scale, `2^24`.
const MANT_SCALE: f32 = 16_777_216.0;

/// A float in its packed wire form, one signed exponent byte followed
/// by a 24-bit mantissa field.
///
/// Packing scales the fraction from `frexpf` by `2^24` and truncates
/// toward zero. Unpacking reads the mantissa field unsigned, so
/// non-negative floats with in-range exponents round-trip exactly,
/// while negative floats come back as the positive complement
/// `(2^24 - m) / 2^24 * 2^exp`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
pub struct Float24 {
    exp: i8,
    // always < (1 << 24)
    mant: u32,
}

impl Float24 {
    /// Reassembles a value from its 4-byte wire word, the exponent
    /// byte followed by the three mantissa bytes.
    pub fn from_bits(bits: u32) -> Float24 {
        Float24 {
            exp: (bits >> 24) as i8,
            mant: bits & MANT_MASK,
        }
    }

    /// The 4-byte wire word, exponent byte first.
    pub fn to_bits(self) -> u32 { (u32::from(self.exp as u8) << MANT_BITS) | self.mant }

    /// The signed exponent byte.
    pub fn exp(self) -> i8 { self.exp }

    /// The raw mantissa field.
    pub fn mant(self) -> u32 { self.mant }
}

impl TryFrom<f32> for Float24 {
    type Error = FloatError;

    fn try_from(f: f32) -> Result<Float24, FloatError> {
        if !f.is_finite() {
            return Err(FloatError::NonFinite);
        }
        let (frac, exp) = frexpf(f);
        if exp < i32::from(i8::MIN) || exp > i32::from(i8::MAX) {
            return Err(FloatError::ExponentOutOfRange { exp });
        }
        let mant = (frac * MANT_SCALE) as i64;
        Ok(Float24 {
            exp: exp as i8,
            mant: mant as u32 & MANT_MASK,
        })
    }
}

impl From<Float24> for f32 {
    fn from(f: Float24) -> f32 { ldexpf(f.mant as f32 / MANT_SCALE, i32::from(f.exp)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_one() {
        let f = Float24::try_from(1.0f32).unwrap();
        assert_eq!(f.exp(), 1);
        assert_eq!(f.mant(), 0x80_0000);
        assert_eq!(f.to_bits(), 0x0180_0000);
    }

    #[test]
    fn packs_zero() {
        let f = Float24::try_from(0.0f32).unwrap();
        assert_eq!(f.to_bits(), 0);
        assert_eq!(f32::from(f), 0.0);
    }

    #[test]
    fn negative_exponent_byte() {
        let f = Float24::try_from(0.25f32).unwrap();
        assert_eq!(f.exp(), -1);
        assert_eq!(f.to_bits(), 0xFF80_0000);
        assert_eq!(f32::from(f), 0.25);
    }

    #[test]
    fn nonneg_roundtrip_is_exact() {
        for x in &[0.5f32, 0.75, 1.0, 3.14, 123.456, 65_504.0, 1.0e-20, 1.0e20] {
            let f = Float24::try_from(*x).unwrap();
            assert_eq!(f32::from(f), *x);
        }
    }

    #[test]
    fn negative_unpacks_to_complement() {
        // -0.5 * 2^24 wraps to 0x800000, which reads back as +0.5
        assert_eq!(f32::from(Float24::try_from(-1.0f32).unwrap()), 1.0);
        assert_eq!(f32::from(Float24::try_from(-0.75f32).unwrap()), 0.25);
    }

    #[test]
    fn packing_is_deterministic() {
        let a = Float24::try_from(3.14f32).unwrap();
        let b = Float24::try_from(3.14f32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exponent_bounds() {
        assert!(Float24::try_from(ldexpf(1.0, 126)).is_ok());
        assert_eq!(
            Float24::try_from(ldexpf(1.0, 127)),
            Err(FloatError::ExponentOutOfRange { exp: 128 })
        );

        assert!(Float24::try_from(ldexpf(1.0, -129)).is_ok());
        assert_eq!(
            Float24::try_from(ldexpf(1.0, -130)),
            Err(FloatError::ExponentOutOfRange { exp: -129 })
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(Float24::try_from(f32::NAN), Err(FloatError::NonFinite));
        assert_eq!(Float24::try_from(f32::INFINITY), Err(FloatError::NonFinite));
        assert_eq!(Float24::try_from(f32::NEG_INFINITY), Err(FloatError::NonFinite));
    }

    #[test]
    fn wire_word_roundtrip() {
        for bits in &[0u32, 0x0180_0000, 0xFF80_0000, 0xDEAD_BEEF] {
            assert_eq!(Float24::from_bits(*bits).to_bits(), *bits);
        }
    }
}
