#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod engine;
mod scalar;

pub use crate::{
    engine::Bn254,
    scalar::{Fr, Scalar},
};
pub use fft::EvaluationDomain;
pub use msm::MsmConfig;
pub use primefield::{self, Error, Result};
pub use weierstrass;

use primefield::{Fp2Element, Fp2Field, MontyField, MontyFieldElement, Uint};
use weierstrass::{AffinePoint, Curve, ProjectivePoint};

/// Base field engine.
pub type Fq = MontyField<4>;

/// Quadratic extension `Fq[u] / (u² + 1)`.
pub type Fq2 = Fp2Field<4>;

/// Element of [`Fq`].
pub type FqElement = MontyFieldElement<4>;

/// Element of [`Fq2`].
pub type Fq2Element = Fp2Element<4>;

/// G1 group engine.
pub type G1 = Curve<Fq>;

/// G2 group engine.
pub type G2 = Curve<Fq2>;

/// Affine G1 point.
pub type G1Affine = AffinePoint<FqElement>;

/// Projective G1 point.
pub type G1Projective = ProjectivePoint<FqElement>;

/// Affine G2 point.
pub type G2Affine = AffinePoint<Fq2Element>;

/// Projective G2 point.
pub type G2Projective = ProjectivePoint<Fq2Element>;

/// Base field modulus serialized as hexadecimal.
///
/// ```text
/// q = 21888242871839275222246405745257275088696311157297823662689037894645226208583
/// ```
pub const MODULUS_HEX: &str = "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47";

/// Order of G1 and G2 (i.e. the scalar field modulus) serialized as hexadecimal.
///
/// ```text
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
/// ```
pub const ORDER_HEX: &str = "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

/// Order of G1 and G2.
pub const ORDER: Uint<4> = Uint::from_be_hex(ORDER_HEX);

/// Names accepted by [`Bn254::from_name`], compared case-insensitively.
pub const NAMES: &[&str] = &["BN254", "BN128", "ALT_BN128"];

/// G2 generator coordinates `(x.c0, x.c1, y.c0, y.c1)`, as in EIP-197.
const G2_GENERATOR_HEX: [&str; 4] = [
    "1800deef121f1e76426a00665e5c4479674322d4f75edadd46debd5cd992f6ed",
    "198e9393920d483a7260bfb731fb5d25f1aa493335a9e71297e485b7aef312c2",
    "12c85ea5db8c6deb4aab71808dcb408fe3d1e7690c43d37b4ce6cc0166fa7daa",
    "090689d0585ff075ec9e99ad690c3395bc4b313370b38ef355acdadcd122975b",
];
