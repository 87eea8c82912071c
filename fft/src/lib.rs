#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod radix2;

pub use primefield::{Error, Result, TwoAdicField};

use primefield::Field;
use workpool::WorkerPool;

/// Multiplicative subgroup of order `n = 2^k` in a two-adic field, with the
/// precomputed constants needed to transform polynomials of length `n`.
#[derive(Clone, Debug)]
pub struct EvaluationDomain<F: TwoAdicField> {
    field: F,
    size: usize,
    log_size: u32,
    /// Primitive `n`-th root of unity.
    group_gen: F::Element,
    group_gen_inv: F::Element,
    /// `n^-1`
    size_inv: F::Element,
    /// Offset of the coset used by the coset transforms.
    coset_gen: F::Element,
    coset_gen_inv: F::Element,
    /// `ω^j` for `j < n/2`.
    twiddles: Vec<F::Element>,
    /// `ω^-j` for `j < n/2`.
    inv_twiddles: Vec<F::Element>,
}

impl<F: TwoAdicField> EvaluationDomain<F> {
    /// Domain of `size` points, precomputing twiddles on the global pool.
    pub fn new(field: F, size: usize) -> Result<Self> {
        Self::with_pool(WorkerPool::global()?, field, size)
    }

    /// Domain of `size` points, precomputing twiddles on `pool`.
    ///
    /// Fails with [`Error::InvalidDomainSize`] when `size` is zero, not a power
    /// of two, or larger than the field's 2-adic subgroup.
    #[tracing::instrument(skip_all, name = "EvaluationDomain::new", fields(size = size))]
    pub fn with_pool(pool: &WorkerPool, field: F, size: usize) -> Result<Self> {
        if size == 0 || !size.is_power_of_two() {
            return Err(Error::InvalidDomainSize { size });
        }

        let log_size = size.trailing_zeros();
        let two_adicity = field.two_adicity();
        if log_size > two_adicity {
            return Err(Error::InvalidDomainSize { size });
        }

        let mut group_gen = field.root_of_unity();
        for _ in log_size..two_adicity {
            group_gen = field.square(&group_gen);
        }

        let group_gen_inv = field.invert(&group_gen)?;
        let size_inv = field.invert(&field.from_u64(size as u64))?;
        let coset_gen = field.multiplicative_generator();
        let coset_gen_inv = field.invert(&coset_gen)?;

        let (twiddles, inv_twiddles) = pool.join(
            || powers(pool, &field, &group_gen, size / 2),
            || powers(pool, &field, &group_gen_inv, size / 2),
        );

        tracing::debug!(log_size, two_adicity, "evaluation domain ready");

        Ok(Self {
            field,
            size,
            log_size,
            group_gen,
            group_gen_inv,
            size_inv,
            coset_gen,
            coset_gen_inv,
            twiddles,
            inv_twiddles,
        })
    }

    /// Field the domain lives in.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Number of points `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `log2(n)`
    pub fn log_size(&self) -> u32 {
        self.log_size
    }

    /// Primitive `n`-th root of unity `ω`.
    pub fn group_gen(&self) -> F::Element {
        self.group_gen
    }

    /// `ω^-1`
    pub fn group_gen_inv(&self) -> F::Element {
        self.group_gen_inv
    }

    /// `n^-1`
    pub fn size_inv(&self) -> F::Element {
        self.size_inv
    }

    /// Offset `g` of the coset `g·⟨ω⟩` used by [`Self::coset_fft`].
    pub fn coset_generator(&self) -> F::Element {
        self.coset_gen
    }

    /// The domain points `1, ω, …, ω^(n-1)` in order.
    pub fn elements(&self, pool: &WorkerPool) -> Vec<F::Element> {
        powers(pool, &self.field, &self.group_gen, self.size)
    }

    /// Evaluate the polynomial with the given coefficients (lowest degree first)
    /// at `x` by Horner's rule.
    pub fn evaluate(&self, coeffs: &[F::Element], x: &F::Element) -> F::Element {
        let f = &self.field;
        coeffs
            .iter()
            .rev()
            .fold(f.zero(), |acc, c| f.add(&f.mul(&acc, x), c))
    }

    /// Replace coefficients by the evaluations at [`Self::elements`].
    #[tracing::instrument(skip_all, name = "EvaluationDomain::fft", fields(size = self.size))]
    pub fn fft(&self, pool: &WorkerPool, values: &mut [F::Element]) -> Result<()> {
        self.check_len(values)?;
        radix2::transform(pool, &self.field, values, &self.twiddles);
        Ok(())
    }

    /// Replace evaluations at [`Self::elements`] by the coefficients of the
    /// unique interpolating polynomial of degree below `n`.
    #[tracing::instrument(skip_all, name = "EvaluationDomain::ifft", fields(size = self.size))]
    pub fn ifft(&self, pool: &WorkerPool, values: &mut [F::Element]) -> Result<()> {
        self.check_len(values)?;
        radix2::transform(pool, &self.field, values, &self.inv_twiddles);
        primefield::bulk::map_in_place(pool, &self.field, values, |f, x| f.mul(x, &self.size_inv));
        Ok(())
    }

    /// Evaluate on the coset `g·⟨ω⟩`.
    #[tracing::instrument(skip_all, name = "EvaluationDomain::coset_fft", fields(size = self.size))]
    pub fn coset_fft(&self, pool: &WorkerPool, values: &mut [F::Element]) -> Result<()> {
        self.check_len(values)?;
        distribute_powers(pool, &self.field, values, &self.coset_gen);
        radix2::transform(pool, &self.field, values, &self.twiddles);
        Ok(())
    }

    /// Inverse of [`Self::coset_fft`].
    #[tracing::instrument(
        skip_all,
        name = "EvaluationDomain::coset_ifft",
        fields(size = self.size)
    )]
    pub fn coset_ifft(&self, pool: &WorkerPool, values: &mut [F::Element]) -> Result<()> {
        self.ifft(pool, values)?;
        distribute_powers(pool, &self.field, values, &self.coset_gen_inv);
        Ok(())
    }

    fn check_len(&self, values: &[F::Element]) -> Result<()> {
        if values.len() != self.size {
            return Err(Error::InvalidDomainSize { size: values.len() });
        }
        Ok(())
    }
}

/// `base^i` for `i < n`, each worker chunk starting from its own power.
fn powers<F: Field>(pool: &WorkerPool, field: &F, base: &F::Element, n: usize) -> Vec<F::Element> {
    let mut out = vec![field.zero(); n];
    pool.for_each_chunk_mut(&mut out, |offset, chunk| {
        let mut acc = field.pow_vartime(base, &[offset as u64]);
        for slot in chunk {
            *slot = acc;
            acc = field.mul(&acc, base);
        }
    });
    out
}

/// Multiply `values[i]` by `base^i`.
fn distribute_powers<F: Field>(
    pool: &WorkerPool,
    field: &F,
    values: &mut [F::Element],
    base: &F::Element,
) {
    pool.for_each_chunk_mut(values, |offset, chunk| {
        let mut acc = field.pow_vartime(base, &[offset as u64]);
        for value in chunk {
            *value = field.mul(value, &acc);
            acc = field.mul(&acc, base);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::{EvaluationDomain, powers};
    use primefield::{Error, Field, MontyField, Uint};
    use workpool::{PoolConfig, WorkerPool};

    fn f17() -> MontyField<1> {
        MontyField::new(Uint::from_u64(17)).unwrap()
    }

    #[test]
    fn four_point_domain_over_f17() {
        let pool = WorkerPool::single_threaded().unwrap();
        let f = f17();
        let domain = EvaluationDomain::with_pool(&pool, f, 4).unwrap();
        assert_eq!(domain.group_gen(), f.from_u64(13));
        assert_eq!(domain.size_inv(), f.from_u64(13));
        assert_eq!(domain.log_size(), 2);

        let coeffs: Vec<_> = [1, 2, 3, 4].map(|n| f.from_u64(n)).to_vec();
        let mut values = coeffs.clone();
        domain.fft(&pool, &mut values).unwrap();
        assert_eq!(values, [10, 6, 15, 7].map(|n| f.from_u64(n)).to_vec());

        for (x, y) in domain.elements(&pool).iter().zip(&values) {
            assert_eq!(domain.evaluate(&coeffs, x), *y);
        }

        domain.ifft(&pool, &mut values).unwrap();
        assert_eq!(values, coeffs);
    }

    #[test]
    fn invalid_sizes() {
        let pool = WorkerPool::single_threaded().unwrap();
        for size in [0, 3, 12, 32] {
            assert_eq!(
                EvaluationDomain::with_pool(&pool, f17(), size).unwrap_err(),
                Error::InvalidDomainSize { size }
            );
        }
        assert!(EvaluationDomain::with_pool(&pool, f17(), 16).is_ok());
        assert!(EvaluationDomain::with_pool(&pool, f17(), 1).is_ok());
    }

    #[test]
    fn length_must_match_domain() {
        let pool = WorkerPool::single_threaded().unwrap();
        let f = f17();
        let domain = EvaluationDomain::with_pool(&pool, f, 8).unwrap();
        let mut short = vec![f.one(); 4];
        assert_eq!(
            domain.fft(&pool, &mut short),
            Err(Error::InvalidDomainSize { size: 4 })
        );
        assert_eq!(
            domain.coset_ifft(&pool, &mut short),
            Err(Error::InvalidDomainSize { size: 4 })
        );
    }

    #[test]
    fn chunked_powers() {
        let f = f17();
        let pool = WorkerPool::new(PoolConfig::with_threads(3)).unwrap();
        let three = f.from_u64(3);
        let p = powers(&pool, &f, &three, 16);
        let mut acc = f.one();
        for x in p {
            assert_eq!(x, acc);
            acc = f.mul(&acc, &three);
        }
        assert_eq!(acc, f.one());
    }
}
