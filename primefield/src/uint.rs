//! Helpers on top of [`bigint::Uint`] for the parts of the engines which need
//! runtime-checked decoding, windowed digits or sampling below a runtime modulus.

use crate::{ByteOrder, Error, Result};
use bigint::{Limb, Uint};
use rand_core::RngCore;

/// Operations on [`Uint`] used by the field, curve and MSM engines.
pub trait UintExt: Sized {
    /// Parse a big-endian hexadecimal string of at most `2 * Self::BYTES` digits.
    ///
    /// Unlike the `const` [`Uint::from_be_hex`], shorter strings are zero-extended
    /// and malformed input is reported instead of panicking.
    fn try_from_be_hex(hex: &str) -> Result<Self>;

    /// Decode a byte slice of at most `Self::BYTES` bytes in the given order.
    fn try_from_slice(bytes: &[u8], byte_order: ByteOrder) -> Result<Self>;

    /// Write the low `out.len()` bytes in the given order.
    fn write_bytes(&self, out: &mut [u8], byte_order: ByteOrder);

    /// Extract the `width`-bit digit starting at bit `offset`.
    ///
    /// Bits beyond the end of the integer read as zero. `width` must not exceed
    /// [`Limb::BITS`].
    fn window(&self, offset: u32, width: u32) -> u64;

    /// Sample an integer uniformly from `[0, modulus)` by rejection.
    fn random_mod<R: RngCore + ?Sized>(rng: &mut R, modulus: &Self) -> Self;
}

impl<const LIMBS: usize> UintExt for Uint<LIMBS> {
    fn try_from_be_hex(hex: &str) -> Result<Self> {
        let digits = hex.as_bytes();
        if digits.is_empty() || digits.len() > Self::BYTES * 2 {
            return Err(Error::InvalidEncoding);
        }

        let mut bytes = vec![0u8; Self::BYTES];
        for (i, &digit) in digits.iter().rev().enumerate() {
            let nibble = match digit {
                b'0'..=b'9' => digit - b'0',
                b'a'..=b'f' => digit - b'a' + 10,
                b'A'..=b'F' => digit - b'A' + 10,
                _ => return Err(Error::InvalidEncoding),
            };
            bytes[i / 2] |= nibble << ((i % 2) * 4);
        }

        Ok(Self::from_le_slice(&bytes))
    }

    fn try_from_slice(bytes: &[u8], byte_order: ByteOrder) -> Result<Self> {
        if bytes.len() > Self::BYTES {
            return Err(Error::LengthMismatch {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        let mut padded = vec![0u8; Self::BYTES];
        Ok(match byte_order {
            ByteOrder::LittleEndian => {
                padded[..bytes.len()].copy_from_slice(bytes);
                Self::from_le_slice(&padded)
            }
            ByteOrder::BigEndian => {
                padded[Self::BYTES - bytes.len()..].copy_from_slice(bytes);
                Self::from_be_slice(&padded)
            }
        })
    }

    fn write_bytes(&self, out: &mut [u8], byte_order: ByteOrder) {
        debug_assert!(out.len() <= Self::BYTES);
        let n = out.len();
        match byte_order {
            ByteOrder::LittleEndian => out.copy_from_slice(&self.to_le_bytes()[..n]),
            ByteOrder::BigEndian => out.copy_from_slice(&self.to_be_bytes()[Self::BYTES - n..]),
        }
    }

    #[inline]
    fn window(&self, offset: u32, width: u32) -> u64 {
        debug_assert!(width > 0 && width <= Limb::BITS);
        let low = self.unbounded_shr_vartime(offset).as_words()[0] as u64;
        if width == 64 {
            low
        } else {
            low & ((1 << width) - 1)
        }
    }

    fn random_mod<R: RngCore + ?Sized>(rng: &mut R, modulus: &Self) -> Self {
        let excess = Self::BITS - modulus.bits();
        let mut bytes = vec![0u8; Self::BYTES];
        loop {
            rng.fill_bytes(&mut bytes);
            let candidate = Self::from_le_slice(&bytes).unbounded_shr_vartime(excess);
            if candidate < *modulus {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UintExt;
    use crate::{ByteOrder, Error};
    use bigint::{U64, U256};
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    const BN254_Q: &str = "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47";

    #[test]
    fn hex_matches_const_parser() {
        let x = U256::try_from_be_hex(BN254_Q).unwrap();
        assert_eq!(x, U256::from_be_hex(BN254_Q));
        assert_eq!(x.bits(), 254);
        assert_eq!(U256::try_from_be_hex("1f").unwrap(), U256::from_u64(0x1f));
    }

    #[test]
    fn hex_rejects_malformed_input() {
        assert_eq!(U256::try_from_be_hex("not-hex"), Err(Error::InvalidEncoding));
        assert_eq!(U256::try_from_be_hex(""), Err(Error::InvalidEncoding));
        assert_eq!(U64::try_from_be_hex("10000000000000000"), Err(Error::InvalidEncoding));
        assert_eq!(U256::try_from_be_hex("0x1f"), Err(Error::InvalidEncoding));
    }

    #[test]
    fn window_spans_limbs() {
        let x = U256::from_words([0xf000_0000_0000_0000, 0x5, 0, 0]);
        assert_eq!(x.window(60, 8), 0x5f);
        assert_eq!(x.window(252, 8), 0);
        assert_eq!(x.window(300, 4), 0);
    }

    #[test]
    fn byte_codecs() {
        let x = U256::from_u64(0x0102);
        let mut le = [0u8; 32];
        let mut be = [0u8; 32];
        x.write_bytes(&mut le, ByteOrder::LittleEndian);
        x.write_bytes(&mut be, ByteOrder::BigEndian);
        assert_eq!(&le[..2], &[0x02, 0x01]);
        assert_eq!(&be[30..], &[0x01, 0x02]);
        assert_eq!(U256::try_from_slice(&le, ByteOrder::LittleEndian).unwrap(), x);
        assert_eq!(U256::try_from_slice(&be, ByteOrder::BigEndian).unwrap(), x);
        assert_eq!(U256::try_from_slice(&be[30..], ByteOrder::BigEndian).unwrap(), x);
        assert_eq!(
            U256::try_from_slice(&[0u8; 33], ByteOrder::LittleEndian),
            Err(Error::LengthMismatch {
                expected: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn random_mod_stays_below_modulus() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let m = U256::from_u64(1000);
        for _ in 0..100 {
            assert!(U256::random_mod(&mut rng, &m) < m);
        }
    }
}
