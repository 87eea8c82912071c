//! Projective curve points.

#![allow(clippy::needless_range_loop)]

use crate::{AffinePoint, Curve, Field, Result, point_arithmetic};
use primefield::{
    Uint, UintExt,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
};
use workpool::WorkerPool;

/// Point on a Weierstrass curve in projective coordinates `(X : Y : Z)`,
/// representing the affine point `(X/Z, Y/Z)`. The identity has `Z = 0`.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<E> {
    pub(crate) x: E,
    pub(crate) y: E,
    pub(crate) z: E,
}

impl<E: Copy> ProjectivePoint<E> {
    /// Raw `X` coordinate.
    pub fn x(&self) -> E {
        self.x
    }

    /// Raw `Y` coordinate.
    pub fn y(&self) -> E {
        self.y
    }

    /// Raw `Z` coordinate.
    pub fn z(&self) -> E {
        self.z
    }
}

impl<E: ConditionallySelectable> ConditionallySelectable for ProjectivePoint<E> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: E::conditional_select(&a.x, &b.x, choice),
            y: E::conditional_select(&a.y, &b.y, choice),
            z: E::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<F: Field> Curve<F> {
    /// Lift an affine point, mapping the affine identity to `(0 : 1 : 0)`.
    pub fn from_affine(&self, p: &AffinePoint<F::Element>) -> ProjectivePoint<F::Element> {
        let projective = ProjectivePoint {
            x: p.x,
            y: p.y,
            z: self.field.one(),
        };
        ProjectivePoint::conditional_select(&projective, &self.identity(), p.is_identity())
    }

    /// Normalize to affine coordinates with a single field inversion.
    pub fn to_affine(&self, p: &ProjectivePoint<F::Element>) -> AffinePoint<F::Element> {
        let Ok(zinv) = self.field.invert(&p.z) else {
            return AffinePoint::identity();
        };

        AffinePoint::new(self.field.mul(&p.x, &zinv), self.field.mul(&p.y, &zinv))
    }

    /// Normalize many points at once.
    ///
    /// Each worker chunk shares one field inversion between all of its points.
    /// Identity inputs normalize to the affine identity.
    #[tracing::instrument(skip_all, name = "curve::batch_normalize", fields(len = points.len()))]
    pub fn batch_normalize(
        &self,
        pool: &WorkerPool,
        points: &[ProjectivePoint<F::Element>],
    ) -> Result<Vec<AffinePoint<F::Element>>> {
        let f = &self.field;
        let chunks = pool.map_chunks(points.len(), |range| -> Result<Vec<_>> {
            let points = &points[range];
            let one = f.one();

            let mut zs: Vec<F::Element> = points
                .iter()
                .map(|p| F::Element::conditional_select(&p.z, &one, f.is_zero(&p.z)))
                .collect();
            f.batch_invert(&mut zs)?;

            Ok(points
                .iter()
                .zip(&zs)
                .map(|(p, zinv)| {
                    let affine = AffinePoint::new(f.mul(&p.x, zinv), f.mul(&p.y, zinv));
                    AffinePoint::conditional_select(
                        &affine,
                        &AffinePoint::identity(),
                        f.is_zero(&p.z),
                    )
                })
                .collect())
        });

        let mut out = Vec::with_capacity(points.len());
        for chunk in chunks {
            out.extend(chunk?);
        }
        Ok(out)
    }

    /// Is this point the identity?
    pub fn is_identity(&self, p: &ProjectivePoint<F::Element>) -> Choice {
        self.field.is_zero(&p.z)
    }

    /// Constant-time equality of the represented points, independent of the
    /// choice of `Z`.
    pub fn points_ct_eq(
        &self,
        lhs: &ProjectivePoint<F::Element>,
        rhs: &ProjectivePoint<F::Element>,
    ) -> Choice {
        let f = &self.field;
        let x1 = f.mul(&lhs.x, &rhs.z);
        let x2 = f.mul(&rhs.x, &lhs.z);
        let y1 = f.mul(&lhs.y, &rhs.z);
        let y2 = f.mul(&rhs.y, &lhs.z);
        let both_identity = self.is_identity(lhs) & self.is_identity(rhs);
        let neither_identity = !self.is_identity(lhs) & !self.is_identity(rhs);

        both_identity | (neither_identity & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }

    /// Do both points represent the same group element?
    pub fn points_eq(
        &self,
        lhs: &ProjectivePoint<F::Element>,
        rhs: &ProjectivePoint<F::Element>,
    ) -> bool {
        self.points_ct_eq(lhs, rhs).into()
    }

    /// Returns `lhs + rhs`.
    pub fn add(
        &self,
        lhs: &ProjectivePoint<F::Element>,
        rhs: &ProjectivePoint<F::Element>,
    ) -> ProjectivePoint<F::Element> {
        point_arithmetic::add(self, lhs, rhs)
    }

    /// Returns `lhs + rhs` for an affine `rhs`.
    pub fn add_mixed(
        &self,
        lhs: &ProjectivePoint<F::Element>,
        rhs: &AffinePoint<F::Element>,
    ) -> ProjectivePoint<F::Element> {
        point_arithmetic::add_mixed(self, lhs, rhs)
    }

    /// Returns `p + p`.
    pub fn double(&self, p: &ProjectivePoint<F::Element>) -> ProjectivePoint<F::Element> {
        point_arithmetic::double(self, p)
    }

    /// Returns `-p`.
    pub fn neg(&self, p: &ProjectivePoint<F::Element>) -> ProjectivePoint<F::Element> {
        ProjectivePoint {
            x: p.x,
            y: self.field.neg(&p.y),
            z: p.z,
        }
    }

    /// Returns `lhs - rhs`.
    pub fn sub(
        &self,
        lhs: &ProjectivePoint<F::Element>,
        rhs: &ProjectivePoint<F::Element>,
    ) -> ProjectivePoint<F::Element> {
        self.add(lhs, &self.neg(rhs))
    }

    /// Returns `lhs - rhs` for an affine `rhs`.
    pub fn sub_mixed(
        &self,
        lhs: &ProjectivePoint<F::Element>,
        rhs: &AffinePoint<F::Element>,
    ) -> ProjectivePoint<F::Element> {
        self.add_mixed(lhs, &self.neg_affine(rhs))
    }

    /// Sum of all points; the identity for an empty slice.
    pub fn sum(&self, points: &[ProjectivePoint<F::Element>]) -> ProjectivePoint<F::Element> {
        points
            .iter()
            .fold(self.identity(), |acc, p| self.add(&acc, p))
    }

    /// Returns `[k] p` using a fixed 4-bit window over every bit of `k`.
    pub fn mul<const LIMBS: usize>(
        &self,
        p: &ProjectivePoint<F::Element>,
        k: &Uint<LIMBS>,
    ) -> ProjectivePoint<F::Element> {
        let mut pc = [self.identity(); 16];
        pc[1] = *p;

        for i in 2..16 {
            pc[i] = if i % 2 == 0 {
                self.double(&pc[i / 2])
            } else {
                self.add(&pc[i - 1], p)
            };
        }

        let mut q = self.identity();
        let mut pos = Uint::<LIMBS>::BITS - 4;

        loop {
            let slot = k.window(pos, 4) as usize;

            let mut t = self.identity();

            for i in 1..16 {
                t.conditional_assign(
                    &pc[i],
                    Choice::from(((slot ^ i).wrapping_sub(1) >> 8) as u8 & 1),
                );
            }

            q = self.add(&q, &t);

            if pos == 0 {
                break;
            }

            q = self.double(&self.double(&self.double(&self.double(&q))));
            pos -= 4;
        }

        q
    }

    /// Returns `[k] G` for the curve generator `G`.
    pub fn mul_by_generator<const LIMBS: usize>(
        &self,
        k: &Uint<LIMBS>,
    ) -> ProjectivePoint<F::Element> {
        self.mul(&self.from_affine(&self.generator), k)
    }
}
