//! Element-wise operations over whole buffers, split across a [`WorkerPool`].
//!
//! Every worker reads shared inputs and writes only its own contiguous output
//! chunk; reductions are merged on the calling thread in chunk order, so the
//! result does not depend on the worker count.

use crate::{Error, Field, Result};
use workpool::WorkerPool;

/// Apply `op` to every element, returning a new vector.
#[tracing::instrument(skip_all, name = "bulk::map", fields(len = input.len()))]
pub fn map<F, Op>(pool: &WorkerPool, field: &F, input: &[F::Element], op: Op) -> Vec<F::Element>
where
    F: Field,
    Op: Fn(&F, &F::Element) -> F::Element + Send + Sync,
{
    let mut out = input.to_vec();
    map_in_place(pool, field, &mut out, op);
    out
}

/// Apply `op` to every element in place.
pub fn map_in_place<F, Op>(pool: &WorkerPool, field: &F, values: &mut [F::Element], op: Op)
where
    F: Field,
    Op: Fn(&F, &F::Element) -> F::Element + Send + Sync,
{
    pool.for_each_chunk_mut(values, |_, chunk| {
        for value in chunk {
            *value = op(field, value);
        }
    });
}

/// Combine two equally long inputs element by element.
///
/// Fails with [`Error::LengthMismatch`] if the lengths differ.
#[tracing::instrument(skip_all, name = "bulk::zip_with", fields(len = a.len()))]
pub fn zip_with<F, Op>(
    pool: &WorkerPool,
    field: &F,
    a: &[F::Element],
    b: &[F::Element],
    op: Op,
) -> Result<Vec<F::Element>>
where
    F: Field,
    Op: Fn(&F, &F::Element, &F::Element) -> F::Element + Send + Sync,
{
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut out = a.to_vec();
    pool.for_each_chunk_mut(&mut out, |offset, chunk| {
        for (value, rhs) in chunk.iter_mut().zip(&b[offset..]) {
            *value = op(field, value, rhs);
        }
    });
    Ok(out)
}

/// Multiply every element by `factor`.
pub fn scale<F: Field>(
    pool: &WorkerPool,
    field: &F,
    input: &[F::Element],
    factor: &F::Element,
) -> Vec<F::Element> {
    map(pool, field, input, |f, x| f.mul(x, factor))
}

/// Sum of all elements; zero for an empty input.
#[tracing::instrument(skip_all, name = "bulk::sum", fields(len = values.len()))]
pub fn sum<F: Field>(pool: &WorkerPool, field: &F, values: &[F::Element]) -> F::Element {
    pool.map_chunks(values.len(), |range| {
        values[range]
            .iter()
            .fold(field.zero(), |acc, x| field.add(&acc, x))
    })
    .iter()
    .fold(field.zero(), |acc, partial| field.add(&acc, partial))
}

/// Invert every element in place: one field inversion per worker chunk.
///
/// Fails with [`Error::DivisionByZero`] if any element is zero, in which case
/// `values` is left untouched.
#[tracing::instrument(skip_all, name = "bulk::batch_invert", fields(len = values.len()))]
pub fn batch_invert<F: Field>(
    pool: &WorkerPool,
    field: &F,
    values: &mut [F::Element],
) -> Result<()> {
    let any_zero = pool
        .map_chunks(values.len(), |range| {
            values[range].iter().any(|v| bool::from(field.is_zero(v)))
        })
        .into_iter()
        .any(|zero| zero);
    if any_zero {
        return Err(Error::DivisionByZero);
    }

    pool.for_each_chunk_mut(values, |_, chunk| {
        let inverted = field.batch_invert(chunk);
        debug_assert!(inverted.is_ok());
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{batch_invert, map, scale, sum, zip_with};
    use crate::{Error, Field, MontyField};
    use workpool::{PoolConfig, WorkerPool};

    const BN254_R: &str = "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

    fn setup() -> (WorkerPool, MontyField<4>) {
        (
            WorkerPool::new(PoolConfig::with_threads(4)).unwrap(),
            MontyField::from_be_hex(BN254_R).unwrap(),
        )
    }

    #[test]
    fn scale_and_sum() {
        let (pool, field) = setup();
        let n = 1000u64;
        let values: Vec<_> = (0..n).map(|i| field.from_u64(i)).collect();
        let half = field.from_u64(n / 2);

        let scaled = scale(&pool, &field, &values, &half);
        assert_eq!(scaled[3], field.from_u64(3 * n / 2));

        // sum_{i<n} i * n/2
        let expected = field.from_u64(n * (n - 1) / 2 * (n / 2));
        assert_eq!(sum(&pool, &field, &scaled), expected);
        assert_eq!(sum(&pool, &field, &[]), field.zero());
    }

    #[test]
    fn map_squares() {
        let (pool, field) = setup();
        let values: Vec<_> = (0..37).map(|i| field.from_u64(i)).collect();
        let squares = map(&pool, &field, &values, |f, x| f.square(x));
        for (i, sq) in squares.iter().enumerate() {
            assert_eq!(*sq, field.from_u64((i * i) as u64));
        }
    }

    #[test]
    fn zip_with_lengths() {
        let (pool, field) = setup();
        let a: Vec<_> = (0..10).map(|i| field.from_u64(i)).collect();
        let b: Vec<_> = (0..10).map(|i| field.from_u64(100 + i)).collect();
        let sums = zip_with(&pool, &field, &a, &b, |f, x, y| f.add(x, y)).unwrap();
        assert_eq!(sums[9], field.from_u64(118));

        assert_eq!(
            zip_with(&pool, &field, &a, &b[..9], |f, x, y| f.add(x, y)),
            Err(Error::LengthMismatch {
                expected: 10,
                actual: 9
            })
        );
    }

    #[test]
    fn batch_invert_in_chunks() {
        let (pool, field) = setup();
        let mut values: Vec<_> = (1..=50).map(|i| field.from_u64(i)).collect();
        batch_invert(&pool, &field, &mut values).unwrap();
        for (i, inv) in values.iter().enumerate() {
            assert_eq!(field.mul(inv, &field.from_u64(i as u64 + 1)), field.one());
        }

        let mut with_zero: Vec<_> = (0..50).map(|i| field.from_u64(i)).collect();
        let before = with_zero.clone();
        assert_eq!(
            batch_invert(&pool, &field, &mut with_zero),
            Err(Error::DivisionByZero)
        );
        assert_eq!(with_zero, before);
    }

    #[test]
    fn sum_independent_of_worker_count() {
        let field = MontyField::<4>::from_be_hex(BN254_R).unwrap();
        let values: Vec<_> = (0..333).map(|i| field.from_u64(i * i + 7)).collect();
        let one = WorkerPool::single_threaded().unwrap();
        let many = WorkerPool::new(PoolConfig::with_threads(7)).unwrap();
        assert_eq!(sum(&one, &field, &values), sum(&many, &field, &values));
    }
}
