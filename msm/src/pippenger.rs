//! Bucket method over one contiguous chunk of terms.

use primefield::{Field, Uint, UintExt};
use weierstrass::{AffinePoint, Curve, ProjectivePoint};

/// `Σ scalars[i]·points[i]` for one worker's chunk.
///
/// Windows of `c` bits are processed from the most significant down; each
/// point is added to the bucket of its window digit, and the buckets are
/// collapsed with a running sum so that bucket `d` is counted `d` times.
pub(crate) fn chunk_sum<F: Field, const LIMBS: usize>(
    curve: &Curve<F>,
    points: &[AffinePoint<F::Element>],
    scalars: &[Uint<LIMBS>],
    c: usize,
    num_bits: usize,
) -> ProjectivePoint<F::Element> {
    debug_assert_eq!(points.len(), scalars.len());

    let terms: Vec<(&AffinePoint<F::Element>, &Uint<LIMBS>)> = points
        .iter()
        .zip(scalars)
        .filter(|(_, k)| !bool::from(k.is_zero()))
        .collect();

    let mut total = curve.identity();
    if terms.is_empty() {
        return total;
    }

    // We don't need the zero bucket, so we only allocate 2^c - 1 buckets.
    let mut buckets = vec![curve.identity(); (1 << c) - 1];
    let num_windows = num_bits.div_ceil(c);

    for w in (0..num_windows).rev() {
        for _ in 0..c {
            total = curve.double(&total);
        }

        buckets.fill(curve.identity());
        for (p, k) in &terms {
            let digit = k.window((w * c) as u32, c as u32) as usize;
            if digit != 0 {
                buckets[digit - 1] = curve.add_mixed(&buckets[digit - 1], p);
            }
        }

        // `running_sum` = sum_{j in i..num_buckets} bucket[j], iterating backwards.
        let mut running_sum = curve.identity();
        let mut window_sum = curve.identity();
        for bucket in buckets.iter().rev() {
            running_sum = curve.add(&running_sum, bucket);
            window_sum = curve.add(&window_sum, &running_sum);
        }

        total = curve.add(&total, &window_sum);
    }

    total
}
