//! The BN254 engine bundle.

use crate::{
    EvaluationDomain, Fq, Fq2, Fr, G1, G1Affine, G2, G2Affine, G2_GENERATOR_HEX, MODULUS_HEX,
    MsmConfig, NAMES, ORDER, Scalar,
};
use once_cell::sync::OnceCell;
use primefield::{Error, Field, Result, TwoAdicField, Uint};
use std::sync::Arc;
use workpool::WorkerPool;

/// Field and group engines for BN254, bound to a worker pool.
///
/// Every operation that can be split across threads runs on the bundled pool,
/// so independent bundles (e.g. with different thread counts) can coexist.
/// Evaluation domains are built on first use and shared between clones.
#[derive(Clone, Debug)]
pub struct Bn254 {
    fr: Fr,
    fq: Fq,
    fq2: Fq2,
    g1: G1,
    g2: G2,
    pool: WorkerPool,
    msm: MsmConfig,
    /// Slot `k` holds the domain of size `2^k`.
    domains: Arc<[OnceCell<EvaluationDomain<Fr>>]>,
}

impl Bn254 {
    /// Build the engines, running parallel work on `pool`.
    pub fn new(pool: WorkerPool) -> Result<Self> {
        let fr = Fr::new()?;
        let fq = Fq::from_be_hex(MODULUS_HEX)?;
        let fq2 = Fq2::new(fq, fq.neg(&fq.one()))?;

        let g1 = G1::new(
            fq,
            fq.zero(),
            fq.from_u64(3),
            (fq.from_u64(1), fq.from_u64(2)),
        )?;

        // b' = 3 / (9 + u)
        let xi = fq2.element(fq.from_u64(9), fq.one());
        let b2 = fq2.mul(&fq2.from_base(fq.from_u64(3)), &fq2.invert(&xi)?);
        let [x0, x1, y0, y1] = G2_GENERATOR_HEX;
        let g2_generator = (
            fq2.element(fq.element_from_be_hex(x0)?, fq.element_from_be_hex(x1)?),
            fq2.element(fq.element_from_be_hex(y0)?, fq.element_from_be_hex(y1)?),
        );
        let g2 = G2::new(fq2, fq2.zero(), b2, g2_generator)?;

        tracing::debug!(threads = pool.num_threads(), "bn254 engines ready");

        Ok(Self {
            fr,
            fq,
            fq2,
            g1,
            g2,
            pool,
            msm: MsmConfig::default(),
            domains: (0..=fr.two_adicity()).map(|_| OnceCell::new()).collect(),
        })
    }

    /// Look up the curve by name on the process-wide worker pool.
    ///
    /// Accepts any of [`NAMES`] ignoring ASCII case; anything else fails with
    /// [`Error::UnknownCurve`].
    pub fn from_name(name: &str) -> Result<Self> {
        if !is_known_name(name) {
            return Err(Error::UnknownCurve);
        }
        Self::new(WorkerPool::global()?.clone())
    }

    /// Like [`Bn254::from_name`] but running on `pool`.
    pub fn from_name_with_pool(name: &str, pool: WorkerPool) -> Result<Self> {
        if !is_known_name(name) {
            return Err(Error::UnknownCurve);
        }
        Self::new(pool)
    }

    /// Use `config` for subsequent multi-scalar multiplications.
    pub fn with_msm_config(mut self, config: MsmConfig) -> Self {
        self.msm = config;
        self
    }

    /// Scalar field.
    pub fn fr(&self) -> &Fr {
        &self.fr
    }

    /// Base field.
    pub fn fq(&self) -> &Fq {
        &self.fq
    }

    /// Quadratic extension of the base field.
    pub fn fq2(&self) -> &Fq2 {
        &self.fq2
    }

    /// G1 over `Fq`.
    pub fn g1(&self) -> &G1 {
        &self.g1
    }

    /// G2 over `Fq2`.
    pub fn g2(&self) -> &G2 {
        &self.g2
    }

    /// Worker pool used by the parallel entry points.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Group order `r`.
    pub fn order(&self) -> Uint<4> {
        ORDER
    }

    /// Evaluation domain of `size` points in `Fr`, built on first request.
    ///
    /// Fails with [`Error::InvalidDomainSize`] unless `size` is a power of two no
    /// larger than `2^28`.
    pub fn domain(&self, size: usize) -> Result<&EvaluationDomain<Fr>> {
        let slot = size
            .is_power_of_two()
            .then(|| self.domains.get(size.trailing_zeros() as usize))
            .flatten()
            .ok_or(Error::InvalidDomainSize { size })?;
        slot.get_or_try_init(|| EvaluationDomain::with_pool(&self.pool, self.fr, size))
    }

    /// Forward FFT over the domain whose size is `values.len()`.
    pub fn fft(&self, values: &mut [Scalar]) -> Result<()> {
        self.domain(values.len())?.fft(&self.pool, values)
    }

    /// Inverse FFT over the domain whose size is `values.len()`.
    pub fn ifft(&self, values: &mut [Scalar]) -> Result<()> {
        self.domain(values.len())?.ifft(&self.pool, values)
    }

    /// Canonical integers for Montgomery-form scalars, converted in parallel.
    #[tracing::instrument(skip_all, name = "bn254::to_scalars", fields(len = scalars.len()))]
    pub fn to_scalars(&self, scalars: &[Scalar]) -> Vec<Uint<4>> {
        let mut out = vec![Uint::ZERO; scalars.len()];
        self.pool.for_each_chunk_mut(&mut out, |offset, chunk| {
            for (uint, scalar) in chunk.iter_mut().zip(&scalars[offset..]) {
                *uint = self.fr.to_canonical(scalar);
            }
        });
        out
    }

    /// `Σ scalars[i]·points[i]` in G1.
    pub fn multi_exp_g1(&self, points: &[G1Affine], scalars: &[Scalar]) -> Result<G1Affine> {
        let scalars = self.to_scalars(scalars);
        msm::multi_exp_affine(&self.pool, &self.g1, points, &scalars, &self.msm)
    }

    /// `Σ scalars[i]·points[i]` in G2.
    pub fn multi_exp_g2(&self, points: &[G2Affine], scalars: &[Scalar]) -> Result<G2Affine> {
        let scalars = self.to_scalars(scalars);
        msm::multi_exp_affine(&self.pool, &self.g2, points, &scalars, &self.msm)
    }
}

fn is_known_name(name: &str) -> bool {
    let known = NAMES.iter().any(|n| n.eq_ignore_ascii_case(name));
    if !known {
        tracing::debug!(name, "unknown curve name");
    }
    known
}
