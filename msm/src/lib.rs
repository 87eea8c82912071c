#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod pippenger;

pub use primefield::{Error, Result};

use primefield::{Field, Uint};
use weierstrass::{AffinePoint, Curve, ProjectivePoint};
use workpool::WorkerPool;

/// Smallest window width considered.
pub const MIN_WINDOW_BITS: usize = 2;

/// Largest window width considered; bounds the bucket table at `2^16 - 1` points.
pub const MAX_WINDOW_BITS: usize = 16;

/// Tuning knobs for [`multi_exp_affine`] and [`multi_exp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MsmConfig {
    /// Window width in bits. `None` derives it from the input length with
    /// [`window_bits`]. Explicit values are clamped to
    /// `[MIN_WINDOW_BITS, MAX_WINDOW_BITS]`.
    pub window_bits: Option<usize>,
}

impl MsmConfig {
    /// Configuration with a fixed window width.
    pub const fn with_window_bits(bits: usize) -> Self {
        Self {
            window_bits: Some(bits),
        }
    }

    fn window_bits_for(&self, n: usize) -> usize {
        self.window_bits
            .map_or_else(|| window_bits(n), |c| c.clamp(MIN_WINDOW_BITS, MAX_WINDOW_BITS))
    }
}

/// Default window width for `n` terms: `log2(n) - log2(log2(n))`, clamped to
/// `[MIN_WINDOW_BITS, MAX_WINDOW_BITS]`, and 3 below 32 terms.
pub fn window_bits(n: usize) -> usize {
    if n < 32 {
        return 3;
    }

    let log_n = n.ilog2();
    let log_log_n = log_n.ilog2();
    ((log_n - log_log_n) as usize).clamp(MIN_WINDOW_BITS, MAX_WINDOW_BITS)
}

/// Compute `Σ scalars[i]·points[i]` over affine inputs.
///
/// Fails with [`Error::LengthMismatch`] when the slices differ in length. An
/// empty input yields the identity.
#[tracing::instrument(skip_all, name = "msm::multi_exp_affine", fields(n = points.len()))]
pub fn multi_exp_affine<F: Field, const LIMBS: usize>(
    pool: &WorkerPool,
    curve: &Curve<F>,
    points: &[AffinePoint<F::Element>],
    scalars: &[Uint<LIMBS>],
    config: &MsmConfig,
) -> Result<AffinePoint<F::Element>> {
    if points.len() != scalars.len() {
        return Err(Error::LengthMismatch {
            expected: points.len(),
            actual: scalars.len(),
        });
    }
    if points.is_empty() {
        return Ok(AffinePoint::identity());
    }

    let window_bits = config.window_bits_for(points.len());
    let num_bits = pool
        .map_chunks(scalars.len(), |range| {
            scalars[range].iter().map(Uint::bits).max().unwrap_or(0)
        })
        .into_iter()
        .max()
        .unwrap_or(0) as usize;

    tracing::debug!(window_bits, num_bits, chunks = pool.ranges(points.len()).len(), "pippenger");

    let partials = pool.map_chunks(points.len(), |range| {
        pippenger::chunk_sum(curve, &points[range.clone()], &scalars[range], window_bits, num_bits)
    });

    let total = partials
        .iter()
        .fold(curve.identity(), |acc, partial| curve.add(&acc, partial));
    Ok(curve.to_affine(&total))
}

/// Compute `Σ scalars[i]·points[i]` over projective inputs, normalizing them
/// with [`Curve::batch_normalize`] first.
#[tracing::instrument(skip_all, name = "msm::multi_exp", fields(n = points.len()))]
pub fn multi_exp<F: Field, const LIMBS: usize>(
    pool: &WorkerPool,
    curve: &Curve<F>,
    points: &[ProjectivePoint<F::Element>],
    scalars: &[Uint<LIMBS>],
    config: &MsmConfig,
) -> Result<AffinePoint<F::Element>> {
    if points.len() != scalars.len() {
        return Err(Error::LengthMismatch {
            expected: points.len(),
            actual: scalars.len(),
        });
    }

    let affine = curve.batch_normalize(pool, points)?;
    multi_exp_affine(pool, curve, &affine, scalars, config)
}

/// Reference implementation: one scalar multiplication per term, summed in order.
pub fn naive_multi_exp<F: Field, const LIMBS: usize>(
    curve: &Curve<F>,
    points: &[AffinePoint<F::Element>],
    scalars: &[Uint<LIMBS>],
) -> Result<AffinePoint<F::Element>> {
    if points.len() != scalars.len() {
        return Err(Error::LengthMismatch {
            expected: points.len(),
            actual: scalars.len(),
        });
    }

    let total = points
        .iter()
        .zip(scalars)
        .fold(curve.identity(), |acc, (p, k)| {
            curve.add(&acc, &curve.mul(&curve.from_affine(p), k))
        });
    Ok(curve.to_affine(&total))
}
