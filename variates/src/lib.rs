//! Discrete random variates for time-stepped queueing simulations.
//!
//! Two samplers, each owning its own seeded generator so that runs stay
//! reproducible and independent: a truncated [`Poisson`] count sampler
//! (arrivals per time unit) and an [`Exponential`] interval sampler
//! (service durations). [`SeedStream`] derives child seeds from a single
//! parent seed, so one `u64` fully determines an entire simulation run
//! no matter how many streams it fans out into.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Width at which the exponential bisection stops.
const TOLERANCE: f64 = 1e-6;

/// Upper bound for the bisection search; effectively infinity for any
/// rate worth simulating.
const UPPER_BOUND: f64 = 1e100;

/// Poisson count sampler truncated to `[0, max_n]`.
///
/// The probability mass is precomputed with the recurrence
/// `p[0] = e^-λ`, `p[i] = p[i-1] · λ / i` and sampled by walking the
/// cumulative sum against a uniform draw. Counts beyond `max_n` clamp to
/// `max_n`, which biases the tail down slightly; callers must pick
/// `max_n` several standard deviations above `λ` for the bias to be
/// negligible.
pub struct Poisson {
    max_n: usize,
    mass: Vec<f64>,
    rng: StdRng,
}

impl Poisson {
    /// Create a sampler for `lambda` expected events per time unit,
    /// truncated at `max_n`, with its own stream seeded from `seed`.
    pub fn new(lambda: f64, max_n: usize, seed: u64) -> Poisson {
        assert!(
            lambda >= 0.0 && lambda.is_finite(),
            "Poisson rate must be finite and non-negative"
        );
        let mut mass = Vec::with_capacity(max_n + 1);
        mass.push((-lambda).exp());
        for i in 1..=max_n {
            let prev = mass[i - 1];
            mass.push(prev * lambda / i as f64);
        }
        Poisson {
            max_n,
            mass,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of events in one time unit.
    pub fn next(&mut self) -> usize {
        let x: f64 = self.rng.gen();
        let mut cumulative = 0.0;
        for (i, p) in self.mass.iter().enumerate() {
            cumulative += p;
            if x <= cumulative {
                return i;
            }
        }
        // Floating truncation left the tail short of x; clamp.
        self.max_n
    }

    /// The precomputed probability mass over `[0, max_n]`.
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }
}

/// Exponential interval sampler with rate `lambda` (mean `1/lambda`).
///
/// Samples by inverting the CDF with bisection instead of a logarithm:
/// draw uniform `r`, then search `t` with `1 - e^{-λt} = r` until the
/// bracket is narrower than the tolerance. Equivalent to `-ln(1-r)/λ`
/// within that tolerance, and just as reproducible from the seed.
pub struct Exponential {
    lambda: f64,
    rng: StdRng,
}

impl Exponential {
    pub fn new(lambda: f64, seed: u64) -> Exponential {
        assert!(
            lambda > 0.0 && lambda.is_finite(),
            "Exponential rate must be finite and positive"
        );
        Exponential {
            lambda,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The next sampled interval, always non-negative.
    pub fn next(&mut self) -> f64 {
        let r: f64 = self.rng.gen();
        let mut lo = 0.0;
        let mut hi = UPPER_BOUND;
        while hi - lo > TOLERANCE {
            let mid = 0.5 * (lo + hi);
            if 1.0 - (-self.lambda * mid).exp() < r {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

/// Deterministic child-seed derivation from a single parent seed.
///
/// Every consumer of randomness gets its own seeded stream; handing out
/// seeds through one parent stream keeps runs reproducible regardless of
/// how many consumers there are or which thread runs them.
pub struct SeedStream {
    rng: StdRng,
}

impl SeedStream {
    pub fn new(seed: u64) -> SeedStream {
        SeedStream {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}
