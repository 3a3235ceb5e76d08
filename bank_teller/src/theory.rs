//! Steady-state predictions for the M/M/c queue.
//!
//! The whole point of the study is how slowly finite windows approach
//! these values, so the sweep output carries the Erlang-C prediction
//! next to every empirical mean.

use crate::MINUTES_PER_HOUR;

/// Expected steady-state queueing delay in minutes for `num_servers`
/// tellers, arrivals at `customer_rate`/hour and service at
/// `server_rate`/hour per teller.
///
/// Returns `None` for degenerate inputs or an unstable system
/// (`λ >= c·μ`), where no steady state exists.
pub fn steady_state_wait(
    num_servers: usize,
    customer_rate: f64,
    server_rate: f64,
) -> Option<f64> {
    if num_servers == 0 || customer_rate <= 0.0 || server_rate <= 0.0 {
        return None;
    }
    let offered = customer_rate / server_rate; // a = λ/μ, in erlangs
    let c = num_servers as f64;
    if offered >= c {
        return None;
    }

    // Erlang C with the running term a^k / k!, no factorials.
    let mut term = 1.0;
    let mut below = 1.0; // Σ_{k=0}^{c-1} a^k / k!
    for k in 1..num_servers {
        term *= offered / k as f64;
        below += term;
    }
    let at_c = term * offered / c; // a^c / c!
    let tail = at_c * c / (c - offered);
    let p_wait = tail / (below + tail);

    // Wq = P(wait) / (cμ - λ), in hours.
    let wq_hours = p_wait / (c * server_rate - customer_rate);
    Some(wq_hours * MINUTES_PER_HOUR as f64)
}
