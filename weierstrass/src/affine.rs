//! Affine curve points.

use crate::{Curve, Error, Field, Result};
use primefield::{
    Codec,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
    zeroize::DefaultIsZeroes,
};

/// Point on a Weierstrass curve in affine coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffinePoint<E> {
    /// x-coordinate
    pub(crate) x: E,

    /// y-coordinate
    pub(crate) y: E,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    ///
    /// This is a proxy for [`Choice`], but uses `u8` instead so the point can
    /// derive comparison traits.
    pub(crate) infinity: u8,
}

impl<E: Copy + Default> AffinePoint<E> {
    /// Point with the given coordinates. Curve membership is not checked.
    pub fn new(x: E, y: E) -> Self {
        Self { x, y, infinity: 0 }
    }

    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity() -> Self {
        Self {
            x: E::default(),
            y: E::default(),
            infinity: 1,
        }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// x-coordinate. Zero for the identity.
    pub fn x(&self) -> E {
        self.x
    }

    /// y-coordinate. Zero for the identity.
    pub fn y(&self) -> E {
        self.y
    }
}

impl<E: ConditionallySelectable> ConditionallySelectable for AffinePoint<E> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: E::conditional_select(&a.x, &b.x, choice),
            y: E::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<E: ConstantTimeEq> ConstantTimeEq for AffinePoint<E> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y) & self.infinity.ct_eq(&other.infinity)
    }
}

impl<E: Copy + Default> DefaultIsZeroes for AffinePoint<E> {}

impl<F: Field> Curve<F> {
    /// Returns `-point`.
    pub fn neg_affine(&self, point: &AffinePoint<F::Element>) -> AffinePoint<F::Element> {
        AffinePoint {
            x: point.x,
            y: self.field.neg(&point.y),
            infinity: point.infinity,
        }
    }

    /// Validate coordinates, failing with [`Error::PointNotOnCurve`].
    pub fn affine_point(&self, x: F::Element, y: F::Element) -> Result<AffinePoint<F::Element>> {
        let point = AffinePoint::new(x, y);
        if bool::from(self.is_on_curve(&point)) {
            Ok(point)
        } else {
            Err(Error::PointNotOnCurve)
        }
    }
}

/// Affine points encode as `x ∥ y`, each coordinate in the field's canonical
/// encoding. The identity encodes as all zero bytes, which is unambiguous since
/// `(0, 0)` lies on the curve only when `b = 0`.
impl<F: Field> Codec<AffinePoint<F::Element>> for Curve<F> {
    fn width(&self) -> usize {
        2 * self.field.element_size()
    }

    fn encode(&self, point: &AffinePoint<F::Element>, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.width());
        if bool::from(point.is_identity()) {
            out.fill(0);
            return;
        }

        let (x, y) = out.split_at_mut(self.field.element_size());
        self.field.write_element(&point.x, x);
        self.field.write_element(&point.y, y);
    }

    fn decode(&self, bytes: &[u8]) -> Result<AffinePoint<F::Element>> {
        if bytes.len() != self.width() {
            return Err(Error::LengthMismatch {
                expected: self.width(),
                actual: bytes.len(),
            });
        }

        if bytes.iter().all(|&b| b == 0) {
            return Ok(AffinePoint::identity());
        }

        let (x, y) = bytes.split_at(self.field.element_size());
        self.affine_point(self.field.read_element(x)?, self.field.read_element(y)?)
    }
}
