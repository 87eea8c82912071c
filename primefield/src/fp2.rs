//! Quadratic extension `Fp2 = Fp[u] / (u^2 - β)`.

use crate::{Codec, Error, Field, MontyField, MontyFieldElement, Result};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// Element `c0 + c1 * u` of a quadratic extension field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp2Element<const LIMBS: usize> {
    /// Constant coefficient.
    pub c0: MontyFieldElement<LIMBS>,
    /// Coefficient of `u`.
    pub c1: MontyFieldElement<LIMBS>,
}

impl<const LIMBS: usize> DefaultIsZeroes for Fp2Element<LIMBS> {}

impl<const LIMBS: usize> ConditionallySelectable for Fp2Element<LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: MontyFieldElement::conditional_select(&a.c0, &b.c0, choice),
            c1: MontyFieldElement::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<const LIMBS: usize> ConstantTimeEq for Fp2Element<LIMBS> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

/// Arithmetic context for `Fp[u] / (u^2 - β)`.
#[derive(Clone, Copy, Debug)]
pub struct Fp2Field<const LIMBS: usize> {
    base: MontyField<LIMBS>,
    beta: MontyFieldElement<LIMBS>,
    beta_is_minus_one: bool,
}

impl<const LIMBS: usize> Fp2Field<LIMBS> {
    /// Create the extension of `base` by a square root of `beta`.
    ///
    /// Fails with [`Error::InvalidModulus`] unless `beta` is a quadratic non-residue,
    /// as otherwise `u^2 - β` is reducible.
    pub fn new(base: MontyField<LIMBS>, beta: MontyFieldElement<LIMBS>) -> Result<Self> {
        if base.is_square(&beta) {
            return Err(Error::InvalidModulus);
        }

        let beta_is_minus_one = beta == base.neg(&base.one());
        tracing::debug!(beta_is_minus_one, "quadratic extension constructed");

        Ok(Self {
            base,
            beta,
            beta_is_minus_one,
        })
    }

    /// Base field.
    pub fn base(&self) -> &MontyField<LIMBS> {
        &self.base
    }

    /// Non-residue `β = u^2`.
    pub fn beta(&self) -> MontyFieldElement<LIMBS> {
        self.beta
    }

    /// Assemble `c0 + c1 * u`.
    pub fn element(
        &self,
        c0: MontyFieldElement<LIMBS>,
        c1: MontyFieldElement<LIMBS>,
    ) -> Fp2Element<LIMBS> {
        Fp2Element { c0, c1 }
    }

    /// Embed a base field element.
    pub fn from_base(&self, c0: MontyFieldElement<LIMBS>) -> Fp2Element<LIMBS> {
        Fp2Element {
            c0,
            c1: self.base.zero(),
        }
    }

    /// Conjugate `c0 - c1 * u`.
    pub fn conjugate(&self, a: &Fp2Element<LIMBS>) -> Fp2Element<LIMBS> {
        Fp2Element {
            c0: a.c0,
            c1: self.base.neg(&a.c1),
        }
    }

    /// Multiply by a base field element.
    pub fn mul_by_base(
        &self,
        a: &Fp2Element<LIMBS>,
        k: &MontyFieldElement<LIMBS>,
    ) -> Fp2Element<LIMBS> {
        Fp2Element {
            c0: self.base.mul(&a.c0, k),
            c1: self.base.mul(&a.c1, k),
        }
    }

    /// Norm `c0^2 - β c1^2`, which lies in the base field.
    pub fn norm(&self, a: &Fp2Element<LIMBS>) -> MontyFieldElement<LIMBS> {
        let t0 = self.base.square(&a.c0);
        let t1 = self.mul_by_beta(&self.base.square(&a.c1));
        self.base.sub(&t0, &t1)
    }

    #[inline]
    fn mul_by_beta(&self, a: &MontyFieldElement<LIMBS>) -> MontyFieldElement<LIMBS> {
        if self.beta_is_minus_one {
            self.base.neg(a)
        } else {
            self.base.mul(a, &self.beta)
        }
    }
}

impl<const LIMBS: usize> Field for Fp2Field<LIMBS> {
    type Element = Fp2Element<LIMBS>;

    fn one(&self) -> Self::Element {
        self.from_base(self.base.one())
    }

    fn from_u64(&self, n: u64) -> Self::Element {
        self.from_base(self.base.from_u64(n))
    }

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Fp2Element {
            c0: self.base.add(&a.c0, &b.c0),
            c1: self.base.add(&a.c1, &b.c1),
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Fp2Element {
            c0: self.base.sub(&a.c0, &b.c0),
            c1: self.base.sub(&a.c1, &b.c1),
        }
    }

    /// Karatsuba: three base field multiplications.
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let f = &self.base;
        let v0 = f.mul(&a.c0, &b.c0);
        let v1 = f.mul(&a.c1, &b.c1);
        let cross = f.mul(&f.add(&a.c0, &a.c1), &f.add(&b.c0, &b.c1));

        Fp2Element {
            c0: f.add(&v0, &self.mul_by_beta(&v1)),
            c1: f.sub(&f.sub(&cross, &v0), &v1),
        }
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Fp2Element {
            c0: self.base.neg(&a.c0),
            c1: self.base.neg(&a.c1),
        }
    }

    fn square(&self, a: &Self::Element) -> Self::Element {
        let f = &self.base;
        let t0 = f.square(&a.c0);
        let t1 = self.mul_by_beta(&f.square(&a.c1));
        let t2 = f.mul(&a.c0, &a.c1);

        Fp2Element {
            c0: f.add(&t0, &t1),
            c1: f.double(&t2),
        }
    }

    fn invert(&self, a: &Self::Element) -> Result<Self::Element> {
        // (c0 + c1 u)^-1 = (c0 - c1 u) / (c0^2 - β c1^2)
        let norm_inv = self.base.invert(&self.norm(a))?;
        Ok(self.mul_by_base(&self.conjugate(a), &norm_inv))
    }

    fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> Self::Element {
        Fp2Element {
            c0: self.base.random(rng),
            c1: self.base.random(rng),
        }
    }

    fn element_size(&self) -> usize {
        2 * self.base.element_size()
    }

    fn write_element(&self, a: &Self::Element, out: &mut [u8]) {
        let (lo, hi) = out.split_at_mut(self.base.element_size());
        self.base.write_element(&a.c0, lo);
        self.base.write_element(&a.c1, hi);
    }

    fn read_element(&self, bytes: &[u8]) -> Result<Self::Element> {
        if bytes.len() != self.element_size() {
            return Err(Error::LengthMismatch {
                expected: self.element_size(),
                actual: bytes.len(),
            });
        }

        let (lo, hi) = bytes.split_at(self.base.element_size());
        Ok(Fp2Element {
            c0: self.base.read_element(lo)?,
            c1: self.base.read_element(hi)?,
        })
    }
}

impl<const LIMBS: usize> Codec<Fp2Element<LIMBS>> for Fp2Field<LIMBS> {
    fn width(&self) -> usize {
        self.element_size()
    }

    fn encode(&self, value: &Fp2Element<LIMBS>, out: &mut [u8]) {
        self.write_element(value, out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Fp2Element<LIMBS>> {
        self.read_element(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::Fp2Field;
    use crate::{Error, Field, MontyField, Uint};

    /// `u^2 = -1` over GF(19), which is 3 mod 4.
    fn f19_2() -> Fp2Field<1> {
        let base = MontyField::<1>::new(Uint::from_u64(19)).unwrap();
        let beta = base.neg(&base.one());
        Fp2Field::new(base, beta).unwrap()
    }

    /// `u^2 = 3` over GF(17).
    fn f17_2() -> Fp2Field<1> {
        let base = MontyField::<1>::new(Uint::from_u64(17)).unwrap();
        let beta = base.from_u64(3);
        Fp2Field::new(base, beta).unwrap()
    }

    crate::test_field_identity!(f19_2());
    crate::test_field_invert!(f19_2());
    crate::test_field_arithmetic!(f17_2());

    #[test]
    fn rejects_square_beta() {
        let base = MontyField::<1>::new(Uint::from_u64(17)).unwrap();
        let beta = base.from_u64(4);
        assert_eq!(Fp2Field::new(base, beta).unwrap_err(), Error::InvalidModulus);
    }

    #[test]
    fn u_squared_is_beta() {
        let field = f17_2();
        let base = field.base();
        let u = field.element(base.zero(), base.one());
        assert_eq!(field.mul(&u, &u), field.from_base(field.beta()));
        assert_eq!(field.square(&u), field.from_base(field.beta()));
    }

    #[test]
    fn gaussian_product() {
        // (2 + 3i)(4 + 5i) = -7 + 22i over GF(19)
        let field = f19_2();
        let base = field.base();
        let a = field.element(base.from_u64(2), base.from_u64(3));
        let b = field.element(base.from_u64(4), base.from_u64(5));
        let expected = field.element(base.neg(&base.from_u64(7)), base.from_u64(22));
        assert_eq!(field.mul(&a, &b), expected);
    }

    #[test]
    fn encoding_is_c0_then_c1() {
        let field = f19_2();
        let base = field.base();
        let a = field.element(base.from_u64(1), base.from_u64(2));
        let mut bytes = [0u8; 16];
        field.write_element(&a, &mut bytes);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[8], 2);
        assert_eq!(field.read_element(&bytes).unwrap(), a);
    }
}
