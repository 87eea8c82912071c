#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod affine;
mod point_arithmetic;
mod projective;

pub use crate::{affine::AffinePoint, projective::ProjectivePoint};
pub use primefield::{self, Error, Field, Result};

use primefield::subtle::{Choice, ConstantTimeEq};

/// Shape of the `a` coefficient, selecting the cheapest complete formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveKind {
    /// `a = 0`
    Zero,
    /// `a = -3`
    MinusThree,
    /// Any other `a`.
    Generic,
}

/// Short Weierstrass curve `y^2 = x^3 + a x + b` over a field `F`, together
/// with a distinguished generator.
///
/// Group operations use the complete formulas of Renes-Costello-Batina 2015,
/// which are exception-free for curves of odd order.
#[derive(Clone, Debug)]
pub struct Curve<F: Field> {
    field: F,
    a: F::Element,
    b: F::Element,
    /// `3 * b`
    b3: F::Element,
    kind: CurveKind,
    generator: AffinePoint<F::Element>,
}

impl<F: Field> Curve<F> {
    /// Create a curve from its coefficients and the affine coordinates of its generator.
    ///
    /// Fails with [`Error::PointNotOnCurve`] if the generator does not satisfy the
    /// curve equation.
    pub fn new(
        field: F,
        a: F::Element,
        b: F::Element,
        generator: (F::Element, F::Element),
    ) -> Result<Self> {
        let kind = if bool::from(field.is_zero(&a)) {
            CurveKind::Zero
        } else if a == field.neg(&field.from_u64(3)) {
            CurveKind::MinusThree
        } else {
            CurveKind::Generic
        };

        let b3 = field.mul(&field.from_u64(3), &b);
        let curve = Self {
            field,
            a,
            b,
            b3,
            kind,
            generator: AffinePoint::new(generator.0, generator.1),
        };

        if !bool::from(curve.is_on_curve(&curve.generator)) {
            return Err(Error::PointNotOnCurve);
        }

        tracing::debug!(?kind, "curve constructed");
        Ok(curve)
    }

    /// Field the curve is defined over.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// The `a` coefficient.
    pub fn a(&self) -> &F::Element {
        &self.a
    }

    /// The `b` coefficient.
    pub fn b(&self) -> &F::Element {
        &self.b
    }

    /// Formula family used for this curve.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Base point of the curve.
    pub fn generator(&self) -> AffinePoint<F::Element> {
        self.generator
    }

    /// Additive identity of the group a.k.a. the point at infinity, `(0 : 1 : 0)`.
    pub fn identity(&self) -> ProjectivePoint<F::Element> {
        ProjectivePoint {
            x: self.field.zero(),
            y: self.field.one(),
            z: self.field.zero(),
        }
    }

    /// Right-hand side of the curve equation, `x^3 + a x + b`.
    fn rhs(&self, x: &F::Element) -> F::Element {
        let f = &self.field;
        let x3 = f.mul(&f.square(x), x);
        f.add(&f.add(&x3, &f.mul(&self.a, x)), &self.b)
    }

    /// Does the point satisfy the curve equation? The identity always does.
    pub fn is_on_curve(&self, point: &AffinePoint<F::Element>) -> Choice {
        let lhs = self.field.square(&point.y);
        lhs.ct_eq(&self.rhs(&point.x)) | point.is_identity()
    }

    /// Does the point satisfy the homogenised curve equation
    /// `Y^2 Z = X^3 + a X Z^2 + b Z^3`?
    pub fn is_on_curve_projective(&self, point: &ProjectivePoint<F::Element>) -> Choice {
        let f = &self.field;
        let zz = f.square(&point.z);
        let lhs = f.mul(&f.square(&point.y), &point.z);
        let x3 = f.mul(&f.square(&point.x), &point.x);
        let axzz = f.mul(&f.mul(&self.a, &point.x), &zz);
        let bzzz = f.mul(&self.b, &f.mul(&zz, &point.z));
        let rhs = f.add(&f.add(&x3, &axzz), &bzzz);
        let not_degenerate = !(f.is_zero(&point.x) & f.is_zero(&point.y) & f.is_zero(&point.z));
        lhs.ct_eq(&rhs) & not_degenerate
    }
}
