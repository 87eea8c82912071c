//! Field and codec traits shared by the prime field and its extensions.

use crate::{Error, Result};
use core::fmt::Debug;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Arithmetic context for a finite field.
///
/// The context owns the modulus and every derived constant; elements are plain
/// values which only have meaning relative to the context that produced them.
/// Mixing elements from two different contexts is a logic error.
pub trait Field: Clone + Debug + Send + Sync {
    /// Field element. `Default` is the additive identity.
    type Element: Copy
        + Debug
        + Default
        + Eq
        + Send
        + Sync
        + ConditionallySelectable
        + ConstantTimeEq;

    /// Additive identity.
    fn zero(&self) -> Self::Element {
        Self::Element::default()
    }

    /// Multiplicative identity.
    fn one(&self) -> Self::Element;

    /// Embed an integer, reducing it modulo the characteristic.
    fn from_u64(&self, n: u64) -> Self::Element;

    /// Add elements.
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Subtract elements.
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Multiply elements.
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Negate element.
    fn neg(&self, a: &Self::Element) -> Self::Element;

    /// Double element (add it to itself).
    fn double(&self, a: &Self::Element) -> Self::Element {
        self.add(a, a)
    }

    /// Square element.
    fn square(&self, a: &Self::Element) -> Self::Element {
        self.mul(a, a)
    }

    /// Compute `1 / a`.
    ///
    /// Fails with [`Error::DivisionByZero`] when `a` is zero.
    fn invert(&self, a: &Self::Element) -> Result<Self::Element>;

    /// Determine if this element is zero.
    fn is_zero(&self, a: &Self::Element) -> Choice {
        a.ct_eq(&self.zero())
    }

    /// Returns `a^exp`, where `exp` is a little-endian integer exponent.
    ///
    /// **This operation is variable time with respect to the exponent `exp`.**
    fn pow_vartime(&self, a: &Self::Element, exp: &[u64]) -> Self::Element {
        let mut res = self.one();
        for word in exp.iter().rev() {
            for j in (0..64).rev() {
                res = self.square(&res);
                if (word >> j) & 1 == 1 {
                    res = self.mul(&res, a);
                }
            }
        }
        res
    }

    /// Sample a uniformly random element.
    fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> Self::Element;

    /// Invert every element of `values` in place with a single field inversion.
    ///
    /// Fails with [`Error::DivisionByZero`] if any element is zero, in which
    /// case `values` is left untouched.
    fn batch_invert(&self, values: &mut [Self::Element]) -> Result<()> {
        let mut prefix = Vec::with_capacity(values.len());
        let mut acc = self.one();
        for value in values.iter() {
            if bool::from(self.is_zero(value)) {
                return Err(Error::DivisionByZero);
            }
            prefix.push(acc);
            acc = self.mul(&acc, value);
        }

        let mut inv = self.invert(&acc)?;
        for (value, before) in values.iter_mut().zip(prefix).rev() {
            let next = self.mul(&inv, value);
            *value = self.mul(&inv, &before);
            inv = next;
        }

        Ok(())
    }

    /// Size of a canonically encoded element in bytes.
    fn element_size(&self) -> usize;

    /// Write the canonical encoding of `a` into `out`, which must be exactly
    /// [`Field::element_size`] bytes long.
    fn write_element(&self, a: &Self::Element, out: &mut [u8]);

    /// Decode a canonical encoding.
    ///
    /// Fails with [`Error::LengthMismatch`] for a slice of the wrong size and with
    /// [`Error::InvalidEncoding`] for a value outside the field.
    fn read_element(&self, bytes: &[u8]) -> Result<Self::Element>;
}

/// Field whose multiplicative group has a large power-of-two subgroup.
pub trait TwoAdicField: Field {
    /// Largest `S` such that `2^S` divides the multiplicative group order.
    fn two_adicity(&self) -> u32;

    /// Primitive `2^S`-th root of unity.
    fn root_of_unity(&self) -> Self::Element;

    /// Quadratic non-residue from which the root of unity is derived.
    ///
    /// It lies outside every proper 2-power subgroup and so serves as a coset shift.
    fn multiplicative_generator(&self) -> Self::Element;
}

/// Fixed-width byte encoding of values of type `T`.
pub trait Codec<T> {
    /// Width of one encoded record in bytes.
    fn width(&self) -> usize;

    /// Encode `value` into `out`, which is exactly [`Codec::width`] bytes long.
    fn encode(&self, value: &T, out: &mut [u8]);

    /// Decode one record.
    fn decode(&self, bytes: &[u8]) -> Result<T>;
}
