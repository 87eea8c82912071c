//! Iterative radix-2 Cooley-Tukey kernel.
//!
//! After the bit-reversal permutation, stage `s` combines blocks of
//! `2^(s+1)` elements. Early stages have many small blocks and hand whole
//! blocks to each worker; late stages have fewer blocks than workers and split
//! the butterflies inside each block instead. Each stage returns only once all
//! of its butterflies are done, so the next stage sees complete outputs.

use primefield::Field;
use workpool::WorkerPool;

/// Reverse the lower `bits` bits of `x`.
#[inline]
fn reverse_bits(x: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    x.reverse_bits() >> (usize::BITS - bits)
}

/// In-place bit-reversal permutation.
pub(crate) fn bit_reverse_permutation<T>(values: &mut [T]) {
    let n = values.len();
    debug_assert!(n.is_power_of_two());
    let log_n = n.trailing_zeros();
    for i in 0..n {
        let j = reverse_bits(i, log_n);
        if i < j {
            values.swap(i, j);
        }
    }
}

/// Butterflies between `lo[j]` and `hi[j]` with twiddle `twiddles[(offset + j) * stride]`.
#[inline]
fn butterflies<F: Field>(
    field: &F,
    lo: &mut [F::Element],
    hi: &mut [F::Element],
    twiddles: &[F::Element],
    offset: usize,
    stride: usize,
) {
    for (j, (a, b)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        let t = field.mul(&twiddles[(offset + j) * stride], b);
        *b = field.sub(a, &t);
        *a = field.add(a, &t);
    }
}

/// Evaluate in place. `twiddles` holds `w^j` for `j < n/2`, where `w` is the
/// root of unity to evaluate at (or its inverse, for interpolation).
pub(crate) fn transform<F: Field>(
    pool: &WorkerPool,
    field: &F,
    values: &mut [F::Element],
    twiddles: &[F::Element],
) {
    let n = values.len();
    debug_assert_eq!(twiddles.len(), n / 2);
    bit_reverse_permutation(values);

    let mut half = 1;
    while half < n {
        let block = 2 * half;
        let stride = n / block;

        if stride >= pool.num_threads() {
            pool.for_each_record_chunk_mut(values, block, |_, chunk| {
                for b in chunk.chunks_exact_mut(block) {
                    let (lo, hi) = b.split_at_mut(half);
                    butterflies(field, lo, hi, twiddles, 0, stride);
                }
            });
        } else {
            for b in values.chunks_exact_mut(block) {
                let (lo, hi) = b.split_at_mut(half);
                pool.for_each_zip_chunk_mut(lo, hi, |offset, lo, hi| {
                    butterflies(field, lo, hi, twiddles, offset, stride);
                });
            }
        }

        half = block;
    }
}

#[cfg(test)]
mod tests {
    use super::{bit_reverse_permutation, reverse_bits};

    #[test]
    fn reverse_small() {
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(0, 0), 0);
    }

    #[test]
    fn permutation_is_involution() {
        let mut v: Vec<usize> = (0..64).collect();
        bit_reverse_permutation(&mut v);
        assert_eq!(v[1], 32);
        assert_eq!(v[6], 24);
        bit_reverse_permutation(&mut v);
        assert_eq!(v, (0..64).collect::<Vec<_>>());
    }
}
