//! Properties every registered scheme must satisfy.

use proptest::prelude::*;
use ratestep_core::{Contribution, Scheme, Staging, delta};
use ratestep_schemes::{Parameters, Registry};

/// One instance of every built-in scheme, with parameters where required.
fn all_schemes() -> Vec<Box<dyn Scheme>> {
    let registry = Registry::with_builtin();
    let theta: Parameters = toml::from_str("theta = 0.5").unwrap();

    registry
        .names()
        .map(|name| {
            let parameters = if name == "theta" {
                theta.clone()
            } else {
                Parameters::new()
            };
            registry.select(name, &parameters).unwrap()
        })
        .collect()
}

fn arb_contributions() -> impl Strategy<Value = Vec<Contribution<f64>>> {
    prop::collection::vec((-1e3..1e3_f64, 0.0..1e3_f64), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(alpha, beta)| Contribution::new(alpha, beta))
            .collect()
    })
}

#[test]
fn zero_beta_gives_real_time_step() {
    for scheme in all_schemes() {
        for dt in [1e-9, 0.001, 0.5, 1.0, 3600.0] {
            assert_eq!(scheme.dt_eff(dt, 0.0), Ok(dt), "scheme {}", scheme.name());
        }
    }
}

#[test]
fn empty_contributions_give_zero_change() {
    for scheme in all_schemes() {
        for dt in [1e-6, 1.0, 100.0] {
            let staging = Staging::<f64>::new(scheme.as_ref(), &7.0, dt, &[]).unwrap();
            assert_eq!(staging.total(), 0.0, "scheme {}", scheme.name());
        }
    }
}

proptest! {
    #[test]
    fn dt_eff_is_bounded(
        dt in 1e-6..1e3_f64,
        beta in prop_oneof![0.0..1e6_f64, 1e6..f64::MAX],
    ) {
        for scheme in all_schemes() {
            let dt_eff = scheme.dt_eff(dt, beta).unwrap();
            prop_assert!(dt_eff > 0.0, "{}: {dt_eff}", scheme.name());
            prop_assert!(dt_eff <= dt, "{}: {dt_eff} > {dt}", scheme.name());
        }
    }

    #[test]
    fn dt_eff_is_non_increasing_in_beta(
        dt in 1e-6..1e3_f64,
        beta in 0.0..1e3_f64,
        increase in 0.0..1e3_f64,
    ) {
        for scheme in all_schemes() {
            let lower = scheme.dt_eff(dt, beta).unwrap();
            let higher = scheme.dt_eff(dt, beta + increase).unwrap();
            prop_assert!(
                higher <= lower * (1.0 + 1e-12),
                "{}: dt_eff({}) = {higher} > dt_eff({beta}) = {lower}",
                scheme.name(),
                beta + increase,
            );
        }
    }

    #[test]
    fn stages_sum_to_aggregate(
        phi in -1e3..1e3_f64,
        dt in 1e-6..1e2_f64,
        contributions in arb_contributions(),
    ) {
        let aggregate: Contribution<f64> = contributions.iter().copied().sum();
        let scale: f64 = contributions
            .iter()
            .map(|c| c.alpha.abs() + c.beta * phi.abs())
            .sum();

        for scheme in all_schemes() {
            let staging = Staging::new(scheme.as_ref(), &phi, dt, &contributions).unwrap();
            let expected =
                delta(scheme.as_ref(), &phi, dt, &aggregate.alpha, aggregate.beta).unwrap();

            let tolerance = 1e-12 * scale * staging.dt_eff() + f64::MIN_POSITIVE;
            prop_assert!(
                (staging.total() - expected).abs() <= tolerance,
                "{}: staged {} vs aggregate {expected}",
                scheme.name(),
                staging.total(),
            );
        }
    }

    #[test]
    fn repeated_calls_are_identical(
        phi in -1e3..1e3_f64,
        dt in 1e-6..1e2_f64,
        alpha in -1e3..1e3_f64,
        beta in 0.0..1e3_f64,
    ) {
        for scheme in all_schemes() {
            let first = scheme.delta(&phi, dt, &alpha, beta).unwrap();
            let second = scheme.delta(&phi, dt, &alpha, beta).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
