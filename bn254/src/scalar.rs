//! The scalar field `Fr`, typed apart from the base field so that scalars and
//! coordinates cannot be mixed up even though both are 4-limb Montgomery values.

use crate::ORDER_HEX;
use primefield::{
    Codec, Field, MontyField, MontyFieldElement, Result, TwoAdicField, Uint,
    rand_core::RngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
    zeroize::DefaultIsZeroes,
};

/// Element of the BN254 scalar field in Montgomery form.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Scalar(MontyFieldElement<4>);

impl Scalar {
    /// Borrow the Montgomery-form representation.
    pub const fn as_montgomery(&self) -> &Uint<4> {
        self.0.as_montgomery()
    }
}

impl DefaultIsZeroes for Scalar {}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(MontyFieldElement::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

/// Arithmetic context for the BN254 scalar field, of prime order `r`.
#[derive(Clone, Copy, Debug)]
pub struct Fr(MontyField<4>);

impl Fr {
    /// Build the field for [`ORDER_HEX`].
    pub fn new() -> Result<Self> {
        MontyField::from_be_hex(ORDER_HEX).map(Self)
    }

    /// The modulus `r`.
    pub fn modulus(&self) -> &Uint<4> {
        self.0.modulus()
    }

    /// Convert a canonical integer below `r` into the field.
    pub fn from_uint(&self, uint: &Uint<4>) -> Result<Scalar> {
        self.0.from_uint(uint).map(Scalar)
    }

    /// Convert any integer into the field, reducing it modulo `r`.
    pub fn from_uint_reduced(&self, uint: &Uint<4>) -> Scalar {
        Scalar(self.0.from_uint_reduced(uint))
    }

    /// Canonical integer for `a`, as consumed by scalar multiplication.
    pub fn to_canonical(&self, a: &Scalar) -> Uint<4> {
        self.0.to_canonical(&a.0)
    }
}

impl Field for Fr {
    type Element = Scalar;

    fn one(&self) -> Scalar {
        Scalar(self.0.one())
    }

    fn from_u64(&self, n: u64) -> Scalar {
        Scalar(self.0.from_u64(n))
    }

    #[inline]
    fn add(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(self.0.add(&a.0, &b.0))
    }

    #[inline]
    fn sub(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(self.0.sub(&a.0, &b.0))
    }

    #[inline]
    fn mul(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(self.0.mul(&a.0, &b.0))
    }

    #[inline]
    fn neg(&self, a: &Scalar) -> Scalar {
        Scalar(self.0.neg(&a.0))
    }

    #[inline]
    fn double(&self, a: &Scalar) -> Scalar {
        Scalar(self.0.double(&a.0))
    }

    #[inline]
    fn square(&self, a: &Scalar) -> Scalar {
        Scalar(self.0.square(&a.0))
    }

    fn invert(&self, a: &Scalar) -> Result<Scalar> {
        self.0.invert(&a.0).map(Scalar)
    }

    fn pow_vartime(&self, a: &Scalar, exp: &[u64]) -> Scalar {
        Scalar(self.0.pow_vartime(&a.0, exp))
    }

    fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> Scalar {
        Scalar(self.0.random(rng))
    }

    fn element_size(&self) -> usize {
        self.0.element_size()
    }

    fn write_element(&self, a: &Scalar, out: &mut [u8]) {
        self.0.write_element(&a.0, out)
    }

    fn read_element(&self, bytes: &[u8]) -> Result<Scalar> {
        self.0.read_element(bytes).map(Scalar)
    }
}

impl TwoAdicField for Fr {
    fn two_adicity(&self) -> u32 {
        self.0.two_adicity()
    }

    fn root_of_unity(&self) -> Scalar {
        Scalar(self.0.root_of_unity())
    }

    fn multiplicative_generator(&self) -> Scalar {
        Scalar(self.0.multiplicative_generator())
    }
}

impl Codec<Scalar> for Fr {
    fn width(&self) -> usize {
        self.element_size()
    }

    fn encode(&self, value: &Scalar, out: &mut [u8]) {
        self.write_element(value, out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Scalar> {
        self.read_element(bytes)
    }
}
