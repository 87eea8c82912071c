//! Property tests for the prime field and its quadratic extension.

use primefield::{Buffer, Error, Field, Fp2Field, MontyField, Uint, workpool::WorkerPool};
use proptest::{prelude::any, prop_assert_eq, prop_compose, proptest};

const BN254_Q: &str = "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47";

fn fq() -> MontyField<4> {
    MontyField::from_be_hex(BN254_Q).unwrap()
}

fn fq2() -> Fp2Field<4> {
    let base = fq();
    let beta = base.neg(&base.one());
    Fp2Field::new(base, beta).unwrap()
}

prop_compose! {
    fn uint()(words in any::<[u64; 4]>()) -> Uint<4> {
        Uint::from_words(words)
    }
}

proptest! {
    #[test]
    fn add_commutes(a in uint(), b in uint()) {
        let field = fq();
        let (a, b) = (field.from_uint_reduced(&a), field.from_uint_reduced(&b));
        prop_assert_eq!(field.add(&a, &b), field.add(&b, &a));
    }

    #[test]
    fn mul_by_inverse_is_one(a in uint()) {
        let field = fq();
        let a = field.from_uint_reduced(&a);
        match field.invert(&a) {
            Ok(inv) => prop_assert_eq!(field.mul(&a, &inv), field.one()),
            Err(err) => {
                prop_assert_eq!(err, Error::DivisionByZero);
                prop_assert_eq!(a, field.zero());
            }
        }
    }

    #[test]
    fn reduction_matches_rem(a in uint()) {
        let field = fq();
        let expected = a.rem(field.params().modulus().as_nz_ref());
        prop_assert_eq!(field.to_canonical(&field.from_uint_reduced(&a)), expected);
    }

    #[test]
    fn canonical_encoding_round_trips(a in uint()) {
        let field = fq();
        let a = field.from_uint_reduced(&a);
        let mut bytes = [0u8; 32];
        field.write_element(&a, &mut bytes);
        prop_assert_eq!(field.read_element(&bytes).unwrap(), a);
    }

    #[test]
    fn fp2_inverse(c0 in uint(), c1 in uint()) {
        let field = fq2();
        let base = field.base();
        let a = field.element(base.from_uint_reduced(&c0), base.from_uint_reduced(&c1));
        if let Ok(inv) = field.invert(&a) {
            prop_assert_eq!(field.mul(&a, &inv), field.one());
        }
    }

    #[test]
    fn fp2_square_matches_mul(c0 in uint(), c1 in uint()) {
        let field = fq2();
        let base = field.base();
        let a = field.element(base.from_uint_reduced(&c0), base.from_uint_reduced(&c1));
        prop_assert_eq!(field.square(&a), field.mul(&a, &a));
    }
}

#[test]
fn modulus_encodes_as_invalid() {
    let field = fq();
    let bytes = field.modulus().to_le_bytes();
    assert_eq!(field.read_element(&bytes), Err(Error::InvalidEncoding));
}

#[test]
fn fp2_buffer_layout() {
    let pool = WorkerPool::global().unwrap();
    let field = fq2();
    let base = field.base();
    let buffer: Buffer<_> = (0..5u64)
        .map(|i| field.element(base.from_u64(i), base.from_u64(100 + i)))
        .collect();

    let bytes = buffer.to_bytes(pool, &field);
    assert_eq!(bytes.len(), 5 * 64);
    assert_eq!(bytes[2 * 64], 2);
    assert_eq!(bytes[2 * 64 + 32], 102);
    assert_eq!(Buffer::from_bytes(pool, &field, &bytes).unwrap(), buffer);
}
