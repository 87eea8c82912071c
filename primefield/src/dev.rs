/// Write a series of `criterion`-based benchmarks for a [`Field`](crate::Field) implementation.
#[macro_export]
macro_rules! bench_field {
    { $name:ident, $desc:expr, $field:expr } => {
        fn $name(c: &mut ::criterion::Criterion) {
            use $crate::Field as _;

            let field = $field;
            let mut rng =
                <::rand_chacha::ChaCha8Rng as $crate::rand_core::SeedableRng>::seed_from_u64(1);
            let x = core::hint::black_box(field.random(&mut rng));
            let y = core::hint::black_box(field.random(&mut rng));

            let mut group = c.benchmark_group($desc);
            group.bench_function("add", |b| b.iter(|| field.add(&x, &y)));
            group.bench_function("sub", |b| b.iter(|| field.sub(&x, &y)));
            group.bench_function("mul", |b| b.iter(|| field.mul(&x, &y)));
            group.bench_function("neg", |b| b.iter(|| field.neg(&x)));
            group.bench_function("square", |b| b.iter(|| field.square(&x)));
            group.bench_function("invert", |b| b.iter(|| field.invert(&x)));
            group.finish();
        }
    };
}

/// Implement field element identity tests.
#[macro_export]
macro_rules! test_field_identity {
    ($field:expr) => {
        #[test]
        fn zero_is_additive_identity() {
            use $crate::Field as _;
            let field = $field;
            let zero = field.zero();
            let one = field.one();
            assert_eq!(field.add(&zero, &zero), zero);
            assert_eq!(field.add(&one, &zero), one);
            assert_eq!(field.neg(&zero), zero);
        }

        #[test]
        fn one_is_multiplicative_identity() {
            use $crate::Field as _;
            let field = $field;
            let one = field.one();
            let seven = field.from_u64(7);
            assert_eq!(field.mul(&one, &one), one);
            assert_eq!(field.mul(&seven, &one), seven);
        }
    };
}

/// Implement field element inversion tests.
#[macro_export]
macro_rules! test_field_invert {
    ($field:expr) => {
        #[test]
        fn invert() {
            use $crate::Field as _;
            let field = $field;
            let one = field.one();
            assert_eq!(field.invert(&one).unwrap(), one);

            let three = field.add(&field.add(&one, &one), &one);
            let inv_three = field.invert(&three).unwrap();
            assert_eq!(field.mul(&three, &inv_three), one);

            let minus_three = field.neg(&three);
            let inv_minus_three = field.invert(&minus_three).unwrap();
            assert_eq!(inv_minus_three, field.neg(&inv_three));
            assert_eq!(field.mul(&three, &inv_minus_three), field.neg(&one));

            assert_eq!(
                field.invert(&field.zero()),
                Err($crate::Error::DivisionByZero)
            );
        }
    };
}

/// Implement ring law tests over a fixed spread of elements.
#[macro_export]
macro_rules! test_field_arithmetic {
    ($field:expr) => {
        #[test]
        fn ring_laws() {
            use $crate::Field as _;
            let field = $field;
            let mut samples = vec![field.zero(), field.one(), field.neg(&field.one())];
            samples.extend([2u64, 3, 5, 0xdead_beef, u64::MAX].map(|n| field.from_u64(n)));
            let mut rng =
                <::rand_chacha::ChaCha8Rng as $crate::rand_core::SeedableRng>::seed_from_u64(7);
            samples.extend((0..4).map(|_| field.random(&mut rng)));

            for a in &samples {
                assert_eq!(field.sub(a, a), field.zero());
                assert_eq!(field.add(a, &field.neg(a)), field.zero());
                assert_eq!(field.double(a), field.add(a, a));
                assert_eq!(field.square(a), field.mul(a, a));

                for b in &samples {
                    assert_eq!(field.add(a, b), field.add(b, a));
                    assert_eq!(field.mul(a, b), field.mul(b, a));
                    assert_eq!(field.sub(&field.add(a, b), b), *a);

                    for c in samples.iter().take(6) {
                        assert_eq!(
                            field.mul(a, &field.add(b, c)),
                            field.add(&field.mul(a, b), &field.mul(a, c))
                        );
                        assert_eq!(
                            field.mul(&field.mul(a, b), c),
                            field.mul(a, &field.mul(b, c))
                        );
                    }
                }
            }
        }

        #[test]
        fn pow_matches_repeated_mul() {
            use $crate::Field as _;
            let field = $field;
            let base = field.from_u64(3);
            let mut acc = field.one();
            for e in 0u64..20 {
                assert_eq!(field.pow_vartime(&base, &[e]), acc);
                acc = field.mul(&acc, &base);
            }
        }
    };
}
