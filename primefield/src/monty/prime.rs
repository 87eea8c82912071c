//! Primality and non-residue searches run once at field construction.

use super::{MontyField, MontyFieldElement};
use crate::Field;
use bigint::{Uint, modular::FixedMontyForm};

/// Miller-Rabin bases. Deterministic for moduli below 2^64 and a strong
/// probable-prime test beyond.
const BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Upper bound on the quadratic non-residue search.
const MAX_NON_RESIDUE: u64 = 1 << 16;

/// Miller-Rabin test of the field modulus in its own Montgomery domain.
/// Expects `p - 1 = T * 2^S` to be precomputed.
pub(super) fn is_probable_prime<const LIMBS: usize>(field: &MontyField<LIMBS>) -> bool {
    let params = field.params();
    let one = FixedMontyForm::one(params);
    let minus_one = one.neg();

    'bases: for base in BASES {
        let base = Uint::from_u64(base);
        if &base >= field.modulus() {
            continue;
        }

        let mut x = FixedMontyForm::new(&base, params).pow_vartime(&field.t);
        if x == one || x == minus_one {
            continue;
        }

        for _ in 1..field.s {
            x = x.square();
            if x == minus_one {
                continue 'bases;
            }
        }

        return false;
    }

    true
}

/// Smallest integer `g >= 2` with `g^((p - 1) / 2) = -1`.
pub(super) fn smallest_non_residue<const LIMBS: usize>(
    field: &MontyField<LIMBS>,
) -> Option<MontyFieldElement<LIMBS>> {
    (2..MAX_NON_RESIDUE)
        .map(|g| field.from_u64(g))
        .find(|g| !field.is_square(g))
}
