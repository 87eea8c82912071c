//! Point arithmetic specialised to the short Weierstrass equation's
//! 𝒂-coefficient.
//!
//! All formulas are from [Renes-Costello-Batina 2015]. The comments after each
//! line indicate which algorithm steps are being performed.
//!
//! [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060

use crate::{AffinePoint, Curve, CurveKind, Field, ProjectivePoint};
use primefield::subtle::ConditionallySelectable;

type Point<F> = ProjectivePoint<<F as Field>::Element>;
type Affine<F> = AffinePoint<<F as Field>::Element>;

/// Returns `lhs + rhs`.
pub(crate) fn add<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Point<F>) -> Point<F> {
    match curve.kind {
        CurveKind::Zero => add_a_zero(curve, lhs, rhs),
        CurveKind::MinusThree => add_a_minus_three(curve, lhs, rhs),
        CurveKind::Generic => add_generic(curve, lhs, rhs),
    }
}

/// Returns `lhs + rhs`.
pub(crate) fn add_mixed<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Affine<F>) -> Point<F> {
    let mut ret = match curve.kind {
        CurveKind::Zero => add_mixed_a_zero(curve, lhs, rhs),
        CurveKind::MinusThree => add_mixed_a_minus_three(curve, lhs, rhs),
        CurveKind::Generic => add_mixed_generic(curve, lhs, rhs),
    };
    ret.conditional_assign(lhs, rhs.is_identity());
    ret
}

/// Returns `point + point`.
pub(crate) fn double<F: Field>(curve: &Curve<F>, point: &Point<F>) -> Point<F> {
    match curve.kind {
        CurveKind::Zero => double_a_zero(curve, point),
        CurveKind::MinusThree => double_a_minus_three(curve, point),
        CurveKind::Generic => double_generic(curve, point),
    }
}

/// Algorithm 1
fn add_generic<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Point<F>) -> Point<F> {
    let f = &curve.field;
    let (a, b3) = (&curve.a, &curve.b3);

    let t0 = f.mul(&lhs.x, &rhs.x); // 1
    let t1 = f.mul(&lhs.y, &rhs.y); // 2
    let t2 = f.mul(&lhs.z, &rhs.z); // 3
    let t3 = f.add(&lhs.x, &lhs.y); // 4
    let t4 = f.add(&rhs.x, &rhs.y); // 5
    let t3 = f.mul(&t3, &t4); // 6
    let t4 = f.add(&t0, &t1); // 7
    let t3 = f.sub(&t3, &t4); // 8
    let t4 = f.add(&lhs.x, &lhs.z); // 9
    let t5 = f.add(&rhs.x, &rhs.z); // 10
    let t4 = f.mul(&t4, &t5); // 11
    let t5 = f.add(&t0, &t2); // 12
    let t4 = f.sub(&t4, &t5); // 13
    let t5 = f.add(&lhs.y, &lhs.z); // 14
    let x3 = f.add(&rhs.y, &rhs.z); // 15
    let t5 = f.mul(&t5, &x3); // 16
    let x3 = f.add(&t1, &t2); // 17
    let t5 = f.sub(&t5, &x3); // 18
    let z3 = f.mul(a, &t4); // 19
    let x3 = f.mul(b3, &t2); // 20
    let z3 = f.add(&x3, &z3); // 21
    let x3 = f.sub(&t1, &z3); // 22
    let z3 = f.add(&t1, &z3); // 23
    let y3 = f.mul(&x3, &z3); // 24
    let t1 = f.add(&t0, &t0); // 25
    let t1 = f.add(&t1, &t0); // 26
    let t2 = f.mul(a, &t2); // 27
    let t4 = f.mul(b3, &t4); // 28
    let t1 = f.add(&t1, &t2); // 29
    let t2 = f.sub(&t0, &t2); // 30
    let t2 = f.mul(a, &t2); // 31
    let t4 = f.add(&t4, &t2); // 32
    let t0 = f.mul(&t1, &t4); // 33
    let y3 = f.add(&y3, &t0); // 34
    let t0 = f.mul(&t5, &t4); // 35
    let x3 = f.mul(&t3, &x3); // 36
    let x3 = f.sub(&x3, &t0); // 37
    let t0 = f.mul(&t3, &t1); // 38
    let z3 = f.mul(&t5, &z3); // 39
    let z3 = f.add(&z3, &t0); // 40

    ProjectivePoint {
        x: x3,
        y: y3,
        z: z3,
    }
}

/// Algorithm 2, without the identity fix-up done by [`add_mixed`].
fn add_mixed_generic<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Affine<F>) -> Point<F> {
    let f = &curve.field;
    let (a, b3) = (&curve.a, &curve.b3);

    let t0 = f.mul(&lhs.x, &rhs.x); // 1
    let t1 = f.mul(&lhs.y, &rhs.y); // 2
    let t3 = f.add(&rhs.x, &rhs.y); // 3
    let t4 = f.add(&lhs.x, &lhs.y); // 4
    let t3 = f.mul(&t3, &t4); // 5
    let t4 = f.add(&t0, &t1); // 6
    let t3 = f.sub(&t3, &t4); // 7
    let t4 = f.mul(&rhs.x, &lhs.z); // 8
    let t4 = f.add(&t4, &lhs.x); // 9
    let t5 = f.mul(&rhs.y, &lhs.z); // 10
    let t5 = f.add(&t5, &lhs.y); // 11
    let z3 = f.mul(a, &t4); // 12
    let x3 = f.mul(b3, &lhs.z); // 13
    let z3 = f.add(&x3, &z3); // 14
    let x3 = f.sub(&t1, &z3); // 15
    let z3 = f.add(&t1, &z3); // 16
    let y3 = f.mul(&x3, &z3); // 17
    let t1 = f.add(&t0, &t0); // 18
    let t1 = f.add(&t1, &t0); // 19
    let t2 = f.mul(a, &lhs.z); // 20
    let t4 = f.mul(b3, &t4); // 21
    let t1 = f.add(&t1, &t2); // 22
    let t2 = f.sub(&t0, &t2); // 23
    let t2 = f.mul(a, &t2); // 24
    let t4 = f.add(&t4, &t2); // 25
    let t0 = f.mul(&t1, &t4); // 26
    let y3 = f.add(&y3, &t0); // 27
    let t0 = f.mul(&t5, &t4); // 28
    let x3 = f.mul(&t3, &x3); // 29
    let x3 = f.sub(&x3, &t0); // 30
    let t0 = f.mul(&t3, &t1); // 31
    let z3 = f.mul(&t5, &z3); // 32
    let z3 = f.add(&z3, &t0); // 33

    ProjectivePoint {
        x: x3,
        y: y3,
        z: z3,
    }
}

/// Algorithm 3
fn double_generic<F: Field>(curve: &Curve<F>, point: &Point<F>) -> Point<F> {
    let f = &curve.field;
    let (a, b3) = (&curve.a, &curve.b3);

    let t0 = f.square(&point.x); // 1
    let t1 = f.square(&point.y); // 2
    let t2 = f.square(&point.z); // 3
    let t3 = f.mul(&point.x, &point.y); // 4
    let t3 = f.double(&t3); // 5
    let z3 = f.mul(&point.x, &point.z); // 6
    let z3 = f.double(&z3); // 7
    let x3 = f.mul(a, &z3); // 8
    let y3 = f.mul(b3, &t2); // 9
    let y3 = f.add(&x3, &y3); // 10
    let x3 = f.sub(&t1, &y3); // 11
    let y3 = f.add(&t1, &y3); // 12
    let y3 = f.mul(&x3, &y3); // 13
    let x3 = f.mul(&t3, &x3); // 14
    let z3 = f.mul(b3, &z3); // 15
    let t2 = f.mul(a, &t2); // 16
    let t3 = f.sub(&t0, &t2); // 17
    let t3 = f.mul(a, &t3); // 18
    let t3 = f.add(&t3, &z3); // 19
    let z3 = f.double(&t0); // 20
    let t0 = f.add(&z3, &t0); // 21
    let t0 = f.add(&t0, &t2); // 22
    let t0 = f.mul(&t0, &t3); // 23
    let y3 = f.add(&y3, &t0); // 24
    let t2 = f.mul(&point.y, &point.z); // 25
    let t2 = f.double(&t2); // 26
    let t0 = f.mul(&t2, &t3); // 27
    let x3 = f.sub(&x3, &t0); // 28
    let z3 = f.mul(&t2, &t1); // 29
    let z3 = f.double(&z3); // 30
    let z3 = f.double(&z3); // 31

    ProjectivePoint {
        x: x3,
        y: y3,
        z: z3,
    }
}

/// Algorithm 4
fn add_a_minus_three<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Point<F>) -> Point<F> {
    let f = &curve.field;
    let b = &curve.b;
    debug_assert_eq!(
        curve.a,
        f.neg(&f.from_u64(3)),
        "this implementation is only valid for a = -3"
    );

    let xx = f.mul(&lhs.x, &rhs.x); // 1
    let yy = f.mul(&lhs.y, &rhs.y); // 2
    let zz = f.mul(&lhs.z, &rhs.z); // 3
    let xy_pairs = f.sub(
        &f.mul(&f.add(&lhs.x, &lhs.y), &f.add(&rhs.x, &rhs.y)),
        &f.add(&xx, &yy),
    ); // 4, 5, 6, 7, 8
    let yz_pairs = f.sub(
        &f.mul(&f.add(&lhs.y, &lhs.z), &f.add(&rhs.y, &rhs.z)),
        &f.add(&yy, &zz),
    ); // 9, 10, 11, 12, 13
    let xz_pairs = f.sub(
        &f.mul(&f.add(&lhs.x, &lhs.z), &f.add(&rhs.x, &rhs.z)),
        &f.add(&xx, &zz),
    ); // 14, 15, 16, 17, 18

    let bzz_part = f.sub(&xz_pairs, &f.mul(b, &zz)); // 19, 20
    let bzz3_part = f.add(&f.double(&bzz_part), &bzz_part); // 21, 22
    let yy_m_bzz3 = f.sub(&yy, &bzz3_part); // 23
    let yy_p_bzz3 = f.add(&yy, &bzz3_part); // 24

    let zz3 = f.add(&f.double(&zz), &zz); // 26, 27
    let bxz_part = f.sub(&f.mul(b, &xz_pairs), &f.add(&zz3, &xx)); // 25, 28, 29
    let bxz3_part = f.add(&f.double(&bxz_part), &bxz_part); // 30, 31
    let xx3_m_zz3 = f.sub(&f.add(&f.double(&xx), &xx), &zz3); // 32, 33, 34

    ProjectivePoint {
        x: f.sub(&f.mul(&yy_p_bzz3, &xy_pairs), &f.mul(&yz_pairs, &bxz3_part)), // 35, 39, 40
        y: f.add(&f.mul(&yy_p_bzz3, &yy_m_bzz3), &f.mul(&xx3_m_zz3, &bxz3_part)), // 36, 37, 38
        z: f.add(&f.mul(&yy_m_bzz3, &yz_pairs), &f.mul(&xy_pairs, &xx3_m_zz3)), // 41, 42, 43
    }
}

/// Algorithm 5, without the identity fix-up done by [`add_mixed`].
fn add_mixed_a_minus_three<F: Field>(
    curve: &Curve<F>,
    lhs: &Point<F>,
    rhs: &Affine<F>,
) -> Point<F> {
    let f = &curve.field;
    let b = &curve.b;

    let xx = f.mul(&lhs.x, &rhs.x); // 1
    let yy = f.mul(&lhs.y, &rhs.y); // 2
    let xy_pairs = f.sub(
        &f.mul(&f.add(&lhs.x, &lhs.y), &f.add(&rhs.x, &rhs.y)),
        &f.add(&xx, &yy),
    ); // 3, 4, 5, 6, 7
    let yz_pairs = f.add(&f.mul(&rhs.y, &lhs.z), &lhs.y); // 8, 9 (t4)
    let xz_pairs = f.add(&f.mul(&rhs.x, &lhs.z), &lhs.x); // 10, 11 (y3)

    let bz_part = f.sub(&xz_pairs, &f.mul(b, &lhs.z)); // 12, 13
    let bz3_part = f.add(&f.double(&bz_part), &bz_part); // 14, 15
    let yy_m_bzz3 = f.sub(&yy, &bz3_part); // 16
    let yy_p_bzz3 = f.add(&yy, &bz3_part); // 17

    let z3 = f.add(&f.double(&lhs.z), &lhs.z); // 19, 20
    let bxz_part = f.sub(&f.mul(b, &xz_pairs), &f.add(&z3, &xx)); // 18, 21, 22
    let bxz3_part = f.add(&f.double(&bxz_part), &bxz_part); // 23, 24
    let xx3_m_zz3 = f.sub(&f.add(&f.double(&xx), &xx), &z3); // 25, 26, 27

    ProjectivePoint {
        x: f.sub(&f.mul(&yy_p_bzz3, &xy_pairs), &f.mul(&yz_pairs, &bxz3_part)), // 28, 32, 33
        y: f.add(&f.mul(&yy_p_bzz3, &yy_m_bzz3), &f.mul(&xx3_m_zz3, &bxz3_part)), // 29, 30, 31
        z: f.add(&f.mul(&yy_m_bzz3, &yz_pairs), &f.mul(&xy_pairs, &xx3_m_zz3)), // 34, 35, 36
    }
}

/// Algorithm 6
fn double_a_minus_three<F: Field>(curve: &Curve<F>, point: &Point<F>) -> Point<F> {
    let f = &curve.field;
    let b = &curve.b;

    let xx = f.square(&point.x); // 1
    let yy = f.square(&point.y); // 2
    let zz = f.square(&point.z); // 3
    let xy2 = f.double(&f.mul(&point.x, &point.y)); // 4, 5
    let xz2 = f.double(&f.mul(&point.x, &point.z)); // 6, 7

    let bzz_part = f.sub(&f.mul(b, &zz), &xz2); // 8, 9
    let bzz3_part = f.add(&f.double(&bzz_part), &bzz_part); // 10, 11
    let yy_m_bzz3 = f.sub(&yy, &bzz3_part); // 12
    let yy_p_bzz3 = f.add(&yy, &bzz3_part); // 13
    let y_frag = f.mul(&yy_p_bzz3, &yy_m_bzz3); // 14
    let x_frag = f.mul(&yy_m_bzz3, &xy2); // 15

    let zz3 = f.add(&f.double(&zz), &zz); // 16, 17
    let bxz2_part = f.sub(&f.mul(b, &xz2), &f.add(&zz3, &xx)); // 18, 19, 20
    let bxz6_part = f.add(&f.double(&bxz2_part), &bxz2_part); // 21, 22
    let xx3_m_zz3 = f.sub(&f.add(&f.double(&xx), &xx), &zz3); // 23, 24, 25

    let y = f.add(&y_frag, &f.mul(&xx3_m_zz3, &bxz6_part)); // 26, 27
    let yz2 = f.double(&f.mul(&point.y, &point.z)); // 28, 29
    let x = f.sub(&x_frag, &f.mul(&bxz6_part, &yz2)); // 30, 31
    let z = f.double(&f.double(&f.mul(&yz2, &yy))); // 32, 33, 34

    ProjectivePoint { x, y, z }
}

/// Algorithm 7
fn add_a_zero<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Point<F>) -> Point<F> {
    let f = &curve.field;
    let b3 = &curve.b3;
    debug_assert!(bool::from(f.is_zero(&curve.a)));

    let t0 = f.mul(&lhs.x, &rhs.x); // 1
    let t1 = f.mul(&lhs.y, &rhs.y); // 2
    let t2 = f.mul(&lhs.z, &rhs.z); // 3

    let t3 = f.add(&lhs.x, &lhs.y); // 4
    let t4 = f.add(&rhs.x, &rhs.y); // 5
    let t3 = f.mul(&t3, &t4); // 6

    let t4 = f.add(&t0, &t1); // 7
    let t3 = f.sub(&t3, &t4); // 8
    let t4 = f.add(&lhs.y, &lhs.z); // 9

    let x3 = f.add(&rhs.y, &rhs.z); // 10
    let t4 = f.mul(&t4, &x3); // 11
    let x3 = f.add(&t1, &t2); // 12

    let t4 = f.sub(&t4, &x3); // 13
    let x3 = f.add(&lhs.x, &lhs.z); // 14
    let y3 = f.add(&rhs.x, &rhs.z); // 15

    let x3 = f.mul(&x3, &y3); // 16
    let y3 = f.add(&t0, &t2); // 17
    let y3 = f.sub(&x3, &y3); // 18

    let x3 = f.double(&t0); // 19
    let t0 = f.add(&x3, &t0); // 20
    let t2 = f.mul(b3, &t2); // 21

    let z3 = f.add(&t1, &t2); // 22
    let t1 = f.sub(&t1, &t2); // 23
    let y3 = f.mul(b3, &y3); // 24

    let x3 = f.mul(&t4, &y3); // 25
    let t2 = f.mul(&t3, &t1); // 26
    let x3 = f.sub(&t2, &x3); // 27

    let y3 = f.mul(&y3, &t0); // 28
    let t1 = f.mul(&t1, &z3); // 29
    let y3 = f.add(&t1, &y3); // 30

    let t0 = f.mul(&t0, &t3); // 31
    let z3 = f.mul(&z3, &t4); // 32
    let z3 = f.add(&z3, &t0); // 33

    ProjectivePoint {
        x: x3,
        y: y3,
        z: z3,
    }
}

/// Algorithm 8, without the identity fix-up done by [`add_mixed`].
fn add_mixed_a_zero<F: Field>(curve: &Curve<F>, lhs: &Point<F>, rhs: &Affine<F>) -> Point<F> {
    let f = &curve.field;
    let b3 = &curve.b3;

    let t0 = f.mul(&lhs.x, &rhs.x); // 1
    let t1 = f.mul(&lhs.y, &rhs.y); // 2
    let t3 = f.add(&rhs.x, &rhs.y); // 3

    let t4 = f.add(&lhs.x, &lhs.y); // 4
    let t3 = f.mul(&t3, &t4); // 5
    let t4 = f.add(&t0, &t1); // 6

    let t3 = f.sub(&t3, &t4); // 7
    let t4 = f.mul(&rhs.y, &lhs.z); // 8
    let t4 = f.add(&t4, &lhs.y); // 9

    let y3 = f.mul(&rhs.x, &lhs.z); // 10
    let y3 = f.add(&y3, &lhs.x); // 11
    let x3 = f.double(&t0); // 12

    let t0 = f.add(&x3, &t0); // 13
    let t2 = f.mul(b3, &lhs.z); // 14
    let z3 = f.add(&t1, &t2); // 15

    let t1 = f.sub(&t1, &t2); // 16
    let y3 = f.mul(b3, &y3); // 17
    let x3 = f.mul(&t4, &y3); // 18

    let t2 = f.mul(&t3, &t1); // 19
    let x3 = f.sub(&t2, &x3); // 20
    let y3 = f.mul(&y3, &t0); // 21

    let t1 = f.mul(&t1, &z3); // 22
    let y3 = f.add(&t1, &y3); // 23
    let t0 = f.mul(&t0, &t3); // 24

    let z3 = f.mul(&z3, &t4); // 25
    let z3 = f.add(&z3, &t0); // 26

    ProjectivePoint {
        x: x3,
        y: y3,
        z: z3,
    }
}

/// Algorithm 9
fn double_a_zero<F: Field>(curve: &Curve<F>, point: &Point<F>) -> Point<F> {
    let f = &curve.field;
    let b3 = &curve.b3;

    let t0 = f.square(&point.y); // 1
    let z3 = f.double(&t0); // 2
    let z3 = f.double(&z3); // 3

    let z3 = f.double(&z3); // 4
    let t1 = f.mul(&point.y, &point.z); // 5
    let t2 = f.square(&point.z); // 6

    let t2 = f.mul(b3, &t2); // 7
    let x3 = f.mul(&t2, &z3); // 8
    let y3 = f.add(&t0, &t2); // 9

    let z3 = f.mul(&t1, &z3); // 10
    let t1 = f.double(&t2); // 11
    let t2 = f.add(&t1, &t2); // 12

    let t0 = f.sub(&t0, &t2); // 13
    let y3 = f.mul(&t0, &y3); // 14
    let y3 = f.add(&x3, &y3); // 15

    let t1 = f.mul(&point.x, &point.y); // 16
    let x3 = f.mul(&t0, &t1); // 17
    let x3 = f.double(&x3); // 18

    ProjectivePoint {
        x: x3,
        y: y3,
        z: z3,
    }
}
