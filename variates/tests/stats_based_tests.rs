// Statistical acceptance tests: the hand-rolled samplers must match the
// moments of their distributions, cross-checked against the rand_distr
// reference implementations. Tolerances are several standard errors wide
// so the tests stay stable across seeds.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;
use variates::{Exponential, Poisson, SeedStream};

fn empirical_mean(draws: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = draws.collect();
    values.iter().sum::<f64>() / values.len() as f64
}

#[test]
fn poisson_empirical_mean_converges_to_lambda() {
    let lambda = 5.8 / 60.0;
    let mut sampler = Poisson::new(lambda, 100, 2021);
    let n = 100_000;
    let mean = empirical_mean((0..n).map(|_| sampler.next() as f64));

    // Standard error of the mean is sqrt(λ/n) ≈ 0.001; allow five of them.
    assert_abs_diff_eq!(mean, lambda, epsilon = 0.005);
}

#[test]
fn poisson_tracks_reference_sampler() {
    let lambda = 2.5;
    let n = 100_000;

    let mut sampler = Poisson::new(lambda, 60, 7);
    let ours = empirical_mean((0..n).map(|_| sampler.next() as f64));

    let reference = rand_distr::Poisson::new(lambda).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let theirs = empirical_mean((0..n).map(|_| reference.sample(&mut rng)));

    assert_abs_diff_eq!(ours, theirs, epsilon = 0.05);
}

#[test]
fn exponential_empirical_mean_converges_to_inverse_rate() {
    let lambda = 0.1; // mean interval of 10 minutes
    let mut sampler = Exponential::new(lambda, 2021);
    let n = 20_000;
    let mean = empirical_mean((0..n).map(|_| sampler.next()));

    // Standard error is (1/λ)/sqrt(n) ≈ 0.07; allow five of them.
    assert_abs_diff_eq!(mean, 1.0 / lambda, epsilon = 0.35);
}

#[test]
fn exponential_tracks_reference_sampler() {
    let lambda = 0.25;
    let n = 20_000;

    let mut sampler = Exponential::new(lambda, 13);
    let ours = empirical_mean((0..n).map(|_| sampler.next()));

    let reference = rand_distr::Exp::new(lambda).unwrap();
    let mut rng = StdRng::seed_from_u64(13);
    let theirs = empirical_mean((0..n).map(|_| reference.sample(&mut rng)));

    assert_abs_diff_eq!(ours, theirs, epsilon = 0.2);
}

#[test]
fn child_streams_are_reproducible_through_the_seed_stream() {
    let build = |seed: u64| {
        let mut seeds = SeedStream::new(seed);
        let mut servers: Vec<Exponential> = (0..4)
            .map(|_| Exponential::new(0.1, seeds.next_seed()))
            .collect();
        servers
            .iter_mut()
            .flat_map(|s| (0..10).map(|_| s.next()).collect::<Vec<f64>>())
            .collect::<Vec<f64>>()
    };

    assert_eq!(build(42), build(42));
    assert_ne!(build(42), build(43));
}
