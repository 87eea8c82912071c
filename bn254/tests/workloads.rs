//! End-to-end workloads: bulk arithmetic, FFT/IFFT and G1/G2 MSM over `n`
//! elements, checked against closed forms.

use bn254::{Bn254, G2Affine, Scalar};
use primefield::{Buffer, Field, bulk};
use proptest::{prop_assert_eq, proptest};
use workpool::{PoolConfig, WorkerPool};

fn engine(threads: usize) -> Bn254 {
    Bn254::new(WorkerPool::new(PoolConfig::with_threads(threads)).unwrap()).unwrap()
}

#[test]
fn scale_and_sum() {
    let bn = engine(4);
    let fr = *bn.fr();
    let n = 10_000u64;

    let values: Vec<Scalar> = (1..=n).map(|i| fr.from_u64(i)).collect();
    let multiplier = fr.from_u64(n / 2);
    let scaled = bulk::scale(bn.pool(), &fr, &values, &multiplier);
    let total = bulk::sum(bn.pool(), &fr, &scaled);

    assert_eq!(total, fr.from_u64(n * (n + 1) / 2 * (n / 2)));
}

#[test]
fn fft_ifft_of_consecutive_integers() {
    let bn = engine(4);
    let fr = *bn.fr();
    let n = 1 << 10;

    let mut values: Buffer<Scalar> = (1..=n as u64).map(|i| fr.from_u64(i)).collect();
    bn.fft(&mut values).unwrap();

    // p(1) = 1 + 2 + ... + n
    assert_eq!(values[0], fr.from_u64((n * (n + 1) / 2) as u64));

    bn.ifft(&mut values).unwrap();
    for (i, v) in values.iter().enumerate() {
        assert_eq!(*v, fr.from_u64(i as u64 + 1));
    }
}

#[test]
fn msm_of_generator_copies() {
    let bn = engine(4);
    let fr = *bn.fr();
    let n = 256u64;

    let scalars: Vec<Scalar> = (1..=n).map(|i| fr.from_u64(i)).collect();
    let expected = primefield::Uint::<4>::from_u64(n * (n + 1) / 2);

    let g1_points = vec![bn.g1().generator(); n as usize];
    let g1_sum = bn.multi_exp_g1(&g1_points, &scalars).unwrap();
    assert_eq!(g1_sum, bn.g1().to_affine(&bn.g1().mul_by_generator(&expected)));

    let g2_points = vec![bn.g2().generator(); n as usize];
    let g2_sum = bn.multi_exp_g2(&g2_points, &scalars).unwrap();
    assert_eq!(g2_sum, bn.g2().to_affine(&bn.g2().mul_by_generator(&expected)));
}

#[test]
fn g2_points_through_byte_buffers() {
    let bn = engine(3);
    let g2 = bn.g2();
    let points: Buffer<G2Affine> = (1..=20u64)
        .map(|k| g2.to_affine(&g2.mul_by_generator(&primefield::Uint::<4>::from_u64(k))))
        .collect();

    let bytes = points.to_bytes(bn.pool(), g2);
    assert_eq!(bytes.len(), 20 * 128);
    let decoded: Buffer<G2Affine> = Buffer::from_bytes(bn.pool(), g2, &bytes).unwrap();
    assert_eq!(decoded, points);

    let mut corrupt = bytes.clone();
    corrupt[128 * 7 + 5] ^= 1;
    assert_eq!(
        Buffer::<G2Affine>::from_bytes(bn.pool(), g2, &corrupt).unwrap_err(),
        primefield::Error::PointNotOnCurve
    );
}

#[test]
fn msm_rejects_mismatched_lengths() {
    let bn = engine(2);
    let points = vec![bn.g1().generator(); 3];
    let scalars = vec![bn.fr().one(); 4];
    assert_eq!(
        bn.multi_exp_g1(&points, &scalars),
        Err(primefield::Error::LengthMismatch {
            expected: 3,
            actual: 4
        })
    );
}

proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(4))]

    #[test]
    fn results_independent_of_thread_count(threads in 2usize..9, log_n in 1u32..9) {
        let single = engine(1);
        let multi = engine(threads);
        let fr = *single.fr();
        let n = 1usize << log_n;

        let coeffs: Vec<Scalar> = (0..n as u64).map(|i| fr.from_u64(i * i + 3)).collect();
        let (mut a, mut b) = (coeffs.clone(), coeffs.clone());
        single.fft(&mut a).unwrap();
        multi.fft(&mut b).unwrap();
        prop_assert_eq!(&a, &b);

        let points = vec![single.g1().generator(); n];
        prop_assert_eq!(
            single.multi_exp_g1(&points, &coeffs).unwrap(),
            multi.multi_exp_g1(&points, &coeffs).unwrap()
        );
    }
}
