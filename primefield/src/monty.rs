//! Prime fields with a modulus chosen at runtime, whose elements use an internal
//! Montgomery form representation.

mod prime;

use crate::{ByteOrder, Codec, Error, Field, Result, TwoAdicField, uint::UintExt};
use bigint::{
    JacobiSymbol, Odd, Uint,
    modular::{FixedMontyForm, FixedMontyParams},
};
use core::fmt;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// Field element in Montgomery form: the integer `aR mod p` represents `a`,
/// where `R = 2^(64 * LIMBS)`.
///
/// Elements carry no reference to their field; all arithmetic goes through the
/// [`MontyField`] context that produced them.
#[derive(Clone, Copy, Hash)]
pub struct MontyFieldElement<const LIMBS: usize> {
    montgomery: Uint<LIMBS>,
}

impl<const LIMBS: usize> MontyFieldElement<LIMBS> {
    /// Borrow the inner [`Uint`] type which is in Montgomery form.
    ///
    /// # ⚠️ Warning
    ///
    /// This is not the correct function for converting *out* of Montgomery form:
    /// that would be [`MontyField::to_canonical`].
    pub const fn as_montgomery(&self) -> &Uint<LIMBS> {
        &self.montgomery
    }
}

impl<const LIMBS: usize> Default for MontyFieldElement<LIMBS> {
    fn default() -> Self {
        Self {
            montgomery: Uint::ZERO,
        }
    }
}

impl<const LIMBS: usize> DefaultIsZeroes for MontyFieldElement<LIMBS> {}

impl<const LIMBS: usize> ConditionallySelectable for MontyFieldElement<LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            montgomery: Uint::conditional_select(&a.montgomery, &b.montgomery, choice),
        }
    }
}

impl<const LIMBS: usize> ConstantTimeEq for MontyFieldElement<LIMBS> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.montgomery.ct_eq(&other.montgomery)
    }
}

impl<const LIMBS: usize> PartialEq for MontyFieldElement<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const LIMBS: usize> Eq for MontyFieldElement<LIMBS> {}

impl<const LIMBS: usize> fmt::Debug for MontyFieldElement<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MontyFieldElement(0x{:x})", self.montgomery)
    }
}

/// Arithmetic context for the prime field `GF(p)`.
///
/// Construction validates the modulus and precomputes every constant the
/// arithmetic needs, so the per-operation paths never allocate.
#[derive(Clone, Copy, Debug)]
pub struct MontyField<const LIMBS: usize> {
    params: FixedMontyParams<LIMBS>,
    bits: u32,
    byte_order: ByteOrder,
    s: u32,
    t: Uint<LIMBS>,
    generator: MontyFieldElement<LIMBS>,
    root_of_unity: MontyFieldElement<LIMBS>,
}

impl<const LIMBS: usize> MontyField<LIMBS> {
    /// Create the field for `modulus` with little-endian element encoding.
    ///
    /// Fails with [`Error::InvalidModulus`] if the modulus is even, less than 3,
    /// or not a probable prime.
    pub fn new(modulus: Uint<LIMBS>) -> Result<Self> {
        Self::with_byte_order(modulus, ByteOrder::LittleEndian)
    }

    /// Create the field for a big-endian hex-encoded modulus.
    ///
    /// Fails with [`Error::InvalidEncoding`] if `hex` is not a hex string of at
    /// most `16 * LIMBS` digits.
    pub fn from_be_hex(hex: &str) -> Result<Self> {
        Self::new(Uint::try_from_be_hex(hex)?)
    }

    /// Create the field for `modulus` with the given element encoding.
    pub fn with_byte_order(modulus: Uint<LIMBS>, byte_order: ByteOrder) -> Result<Self> {
        if LIMBS == 0 || modulus < Uint::from_u64(3) {
            return Err(Error::InvalidModulus);
        }
        let odd = Odd::new(modulus).into_option().ok_or(Error::InvalidModulus)?;

        let p_minus_1 = modulus.wrapping_sub(&Uint::ONE);
        let s = p_minus_1.trailing_zeros();

        let mut field = Self {
            params: FixedMontyParams::new_vartime(odd),
            bits: modulus.bits(),
            byte_order,
            s,
            t: p_minus_1.unbounded_shr_vartime(s),
            generator: MontyFieldElement::default(),
            root_of_unity: MontyFieldElement::default(),
        };

        if !prime::is_probable_prime(&field) {
            return Err(Error::InvalidModulus);
        }

        let generator = prime::smallest_non_residue(&field).ok_or(Error::InvalidModulus)?;
        field.generator = generator;
        field.root_of_unity = field.wrap(field.lift(&generator).pow_vartime(&field.t));

        tracing::debug!(
            modulus = %field.modulus(),
            bits = field.bits,
            two_adicity = field.s,
            "prime field constructed"
        );

        Ok(field)
    }

    /// The modulus `p`.
    pub fn modulus(&self) -> &Uint<LIMBS> {
        self.params.modulus().as_ref()
    }

    /// Montgomery parameters shared by every element of the field.
    pub fn params(&self) -> &FixedMontyParams<LIMBS> {
        &self.params
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Byte order of the canonical encoding.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// `T = (p - 1) >> S`.
    pub fn t(&self) -> &Uint<LIMBS> {
        &self.t
    }

    /// Convert a canonical integer into the field.
    ///
    /// Fails with [`Error::InvalidEncoding`] if it is not below the modulus.
    pub fn from_uint(&self, uint: &Uint<LIMBS>) -> Result<MontyFieldElement<LIMBS>> {
        if uint >= self.modulus() {
            return Err(Error::InvalidEncoding);
        }
        Ok(self.wrap(FixedMontyForm::new(uint, &self.params)))
    }

    /// Convert any integer into the field, reducing it modulo `p`.
    pub fn from_uint_reduced(&self, uint: &Uint<LIMBS>) -> MontyFieldElement<LIMBS> {
        let reduced = uint.rem_vartime(self.params.modulus().as_nz_ref());
        self.wrap(FixedMontyForm::new(&reduced, &self.params))
    }

    /// Convert a big-endian hex string into the field.
    ///
    /// Fails with [`Error::InvalidEncoding`] on malformed hex or a value which is
    /// not below the modulus.
    pub fn element_from_be_hex(&self, hex: &str) -> Result<MontyFieldElement<LIMBS>> {
        self.from_uint(&Uint::try_from_be_hex(hex)?)
    }

    /// Translate an element out of the Montgomery domain, returning its canonical integer.
    pub fn to_canonical(&self, a: &MontyFieldElement<LIMBS>) -> Uint<LIMBS> {
        self.lift(a).retrieve()
    }

    /// Determine if the canonical value of `a` is odd.
    pub fn is_odd(&self, a: &MontyFieldElement<LIMBS>) -> Choice {
        self.to_canonical(a).is_odd().into()
    }

    /// Determine if `a` is a quadratic residue (zero counts as a residue).
    pub fn is_square(&self, a: &MontyFieldElement<LIMBS>) -> bool {
        !matches!(self.lift(a).jacobi_symbol_vartime(), JacobiSymbol::MinusOne)
    }

    #[inline]
    fn lift(&self, a: &MontyFieldElement<LIMBS>) -> FixedMontyForm<LIMBS> {
        FixedMontyForm::from_montgomery(a.montgomery, &self.params)
    }

    #[inline]
    fn wrap(&self, a: FixedMontyForm<LIMBS>) -> MontyFieldElement<LIMBS> {
        MontyFieldElement {
            montgomery: a.to_montgomery(),
        }
    }
}

impl<const LIMBS: usize> Field for MontyField<LIMBS> {
    type Element = MontyFieldElement<LIMBS>;

    fn one(&self) -> Self::Element {
        MontyFieldElement {
            montgomery: *self.params.one(),
        }
    }

    fn from_u64(&self, n: u64) -> Self::Element {
        self.from_uint_reduced(&Uint::from_u64(n))
    }

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.wrap(self.lift(a).add(&self.lift(b)))
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.wrap(self.lift(a).sub(&self.lift(b)))
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.wrap(self.lift(a).mul(&self.lift(b)))
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        self.wrap(self.lift(a).neg())
    }

    #[inline]
    fn double(&self, a: &Self::Element) -> Self::Element {
        self.wrap(self.lift(a).double())
    }

    #[inline]
    fn square(&self, a: &Self::Element) -> Self::Element {
        self.wrap(self.lift(a).square())
    }

    fn invert(&self, a: &Self::Element) -> Result<Self::Element> {
        self.lift(a)
            .invert()
            .into_option()
            .map(|inv| self.wrap(inv))
            .ok_or(Error::DivisionByZero)
    }

    fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> Self::Element {
        MontyFieldElement {
            montgomery: Uint::random_mod(rng, self.modulus()),
        }
    }

    fn element_size(&self) -> usize {
        self.bits.div_ceil(64) as usize * 8
    }

    fn write_element(&self, a: &Self::Element, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.element_size());
        self.to_canonical(a).write_bytes(out, self.byte_order);
    }

    fn read_element(&self, bytes: &[u8]) -> Result<Self::Element> {
        if bytes.len() != self.element_size() {
            return Err(Error::LengthMismatch {
                expected: self.element_size(),
                actual: bytes.len(),
            });
        }

        self.from_uint(&Uint::try_from_slice(bytes, self.byte_order)?)
    }
}

impl<const LIMBS: usize> TwoAdicField for MontyField<LIMBS> {
    fn two_adicity(&self) -> u32 {
        self.s
    }

    fn root_of_unity(&self) -> Self::Element {
        self.root_of_unity
    }

    fn multiplicative_generator(&self) -> Self::Element {
        self.generator
    }
}

impl<const LIMBS: usize> Codec<MontyFieldElement<LIMBS>> for MontyField<LIMBS> {
    fn width(&self) -> usize {
        self.element_size()
    }

    fn encode(&self, value: &MontyFieldElement<LIMBS>, out: &mut [u8]) {
        self.write_element(value, out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<MontyFieldElement<LIMBS>> {
        self.read_element(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::MontyField;
    use crate::{ByteOrder, Error, Field, TwoAdicField, Uint};

    const BN254_R: &str = "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

    fn f17() -> MontyField<1> {
        MontyField::new(Uint::from_u64(17)).unwrap()
    }

    crate::test_field_identity!(f17());
    crate::test_field_invert!(f17());
    crate::test_field_arithmetic!(MontyField::<4>::from_be_hex(BN254_R).unwrap());

    #[test]
    fn malformed_hex_is_an_error() {
        assert_eq!(
            MontyField::<4>::from_be_hex("not-hex").unwrap_err(),
            Error::InvalidEncoding
        );
        assert_eq!(
            MontyField::<1>::from_be_hex(&"f".repeat(17)).unwrap_err(),
            Error::InvalidEncoding
        );

        let field = f17();
        assert_eq!(field.element_from_be_hex("zz"), Err(Error::InvalidEncoding));
        assert_eq!(field.element_from_be_hex("11"), Err(Error::InvalidEncoding));
        assert_eq!(field.element_from_be_hex("0b").unwrap(), field.from_u64(11));
    }

    #[test]
    fn montgomery_form_round_trips() {
        let field = MontyField::<4>::from_be_hex(BN254_R).unwrap();
        let x = Uint::<4>::from_u64(0xdead_beef);
        let elem = field.from_uint(&x).unwrap();
        assert_ne!(elem.as_montgomery(), &x);
        assert_eq!(field.to_canonical(&elem), x);
        assert_eq!(field.one().as_montgomery(), field.params().one());
        assert_eq!(field.from_uint_reduced(field.modulus()), field.zero());
    }

    #[test]
    fn small_field_scenario() {
        let field = f17();
        let a = field.from_u64(5);
        let b = field.from_u64(9);
        assert_eq!(field.to_canonical(&field.add(&a, &b)), Uint::from_u64(14));
        assert_eq!(field.to_canonical(&field.mul(&a, &b)), Uint::from_u64(11));
        assert_eq!(field.to_canonical(&field.sub(&a, &b)), Uint::from_u64(13));
        assert_eq!(field.to_canonical(&field.neg(&a)), Uint::from_u64(12));
    }

    #[test]
    fn from_u64_reduces() {
        let field = f17();
        assert_eq!(field.from_u64(17), field.zero());
        assert_eq!(field.from_u64(u64::MAX), field.from_u64(u64::MAX % 17));
    }

    #[test]
    fn rejects_bad_moduli() {
        for p in [0u64, 1, 2, 15, 21, 91, 561] {
            assert_eq!(
                MontyField::<1>::new(Uint::from_u64(p)).unwrap_err(),
                Error::InvalidModulus,
                "modulus {p}"
            );
        }
        assert!(MontyField::<1>::new(Uint::from_u64(3)).is_ok());
        assert!(MontyField::<1>::new(Uint::from_u64(0xffff_ffff_0000_0001)).is_ok());
    }

    #[test]
    fn two_adic_constants() {
        let field = f17();
        assert_eq!(field.two_adicity(), 4);
        assert_eq!(field.t(), &Uint::from_u64(1));
        assert_eq!(field.multiplicative_generator(), field.from_u64(3));

        let root = field.root_of_unity();
        let order = [1u64 << field.two_adicity()];
        assert_eq!(field.pow_vartime(&root, &order), field.one());
        assert_ne!(field.pow_vartime(&root, &[order[0] / 2]), field.one());
    }

    #[test]
    fn bn254_scalar_two_adicity() {
        let field = MontyField::<4>::from_be_hex(BN254_R).unwrap();
        assert_eq!(field.two_adicity(), 28);
        assert_eq!(field.multiplicative_generator(), field.from_u64(5));
    }

    #[test]
    fn invert_zero_fails() {
        let field = f17();
        assert_eq!(field.invert(&field.zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn batch_invert_matches_invert() {
        let field = f17();
        let mut values: Vec<_> = (1..17).map(|n| field.from_u64(n)).collect();
        let expected: Vec<_> = values.iter().map(|v| field.invert(v).unwrap()).collect();
        field.batch_invert(&mut values).unwrap();
        assert_eq!(values, expected);

        let mut with_zero = vec![field.from_u64(3), field.zero()];
        let before = with_zero.clone();
        assert_eq!(field.batch_invert(&mut with_zero), Err(Error::DivisionByZero));
        assert_eq!(with_zero, before);
    }

    #[test]
    fn encoding_width_and_order() {
        let le = MontyField::<4>::from_be_hex(BN254_R).unwrap();
        let be = MontyField::<4>::with_byte_order(*le.modulus(), ByteOrder::BigEndian).unwrap();
        assert_eq!(le.element_size(), 32);

        let x = le.from_u64(0x0102);
        let mut bytes = [0u8; 32];
        le.write_element(&x, &mut bytes);
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);
        assert_eq!(le.read_element(&bytes).unwrap(), x);

        be.write_element(&x, &mut bytes);
        assert_eq!(&bytes[29..], &[0x00, 0x01, 0x02]);
        assert_eq!(be.read_element(&bytes).unwrap(), x);
    }

    #[test]
    fn decoding_rejects_non_canonical() {
        let field = f17();
        assert_eq!(field.element_size(), 8);
        assert_eq!(field.read_element(&17u64.to_le_bytes()), Err(Error::InvalidEncoding));
        assert_eq!(
            field.read_element(&[0u8; 4]),
            Err(Error::LengthMismatch {
                expected: 8,
                actual: 4
            })
        );
    }
}
