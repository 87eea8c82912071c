//! Field law tests for the BN254 fields.

use bn254::{Fq, Fq2, Fr, MODULUS_HEX};
use primefield::Field;

fn fq2() -> Fq2 {
    let fq = Fq::from_be_hex(MODULUS_HEX).unwrap();
    Fq2::new(fq, fq.neg(&fq.one())).unwrap()
}

mod fr {
    use super::*;

    primefield::test_field_identity!(Fr::new().unwrap());
    primefield::test_field_invert!(Fr::new().unwrap());
    primefield::test_field_arithmetic!(Fr::new().unwrap());
}

mod fq {
    use super::*;

    primefield::test_field_identity!(Fq::from_be_hex(MODULUS_HEX).unwrap());
    primefield::test_field_invert!(Fq::from_be_hex(MODULUS_HEX).unwrap());
    primefield::test_field_arithmetic!(Fq::from_be_hex(MODULUS_HEX).unwrap());
}

mod fq2 {
    use super::fq2;

    primefield::test_field_identity!(fq2());
    primefield::test_field_invert!(fq2());
    primefield::test_field_arithmetic!(fq2());
}
