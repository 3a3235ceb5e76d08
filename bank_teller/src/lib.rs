//! Multi-teller queueing study.
//!
//! Simulates a bank-teller queue (Poisson arrivals, exponential service,
//! a small pool of identical tellers) in fixed one-minute steps over a
//! finite window, to measure how far empirical mean wait times sit from
//! the steady-state value at realistic horizons. Arrivals in a minute are
//! dispatched to the earliest-available teller; statistics cover every
//! customer who arrived inside the window, even when their service spills
//! past its end.

use thiserror::Error;

// ============================================================================
// Modules
// ============================================================================

pub mod customer;
pub mod helpers;
pub mod output;
pub mod replication;
pub mod simulation;
pub mod stats;
pub mod theory;

pub use customer::Customer;
pub use replication::{replicate, ReplicationSummary};
pub use simulation::Simulation;
pub use stats::RunSummary;

pub const MINUTES_PER_HOUR: usize = 60;

/// Truncation bound for the arrival-count sampler. Arrival counts above
/// this clamp, so configurations must keep the per-minute rate several
/// standard deviations below it (enforced by [`SimConfig::validate`]).
pub const MAX_ARRIVALS_PER_MINUTE: usize = 100;

// ============================================================================
// Configuration
// ============================================================================

/// Immutable configuration for one simulation run.
///
/// Times are simulation minutes with `end_time` exclusive; rates are
/// customers per hour. A zero `customer_rate` is valid (a closed door:
/// the engine still walks the whole window and reports zero customers),
/// everything else must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub start_time: usize,
    pub end_time: usize,
    pub num_servers: usize,
    pub customer_rate: f64,
    pub server_rate: f64,
    pub seed: u64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("simulation window is empty: start {start} >= end {end}")]
    EmptyWindow { start: usize, end: usize },

    #[error("at least one server is required")]
    NoServers,

    #[error("customer rate must be finite and non-negative, got {0}")]
    InvalidCustomerRate(f64),

    #[error("server rate must be finite and positive, got {0}")]
    InvalidServerRate(f64),

    #[error(
        "arrival truncation bound {bound} is too tight for {rate} customers/hour \
         (per-minute mean {mean:.2})"
    )]
    TruncationTooTight { bound: usize, rate: f64, mean: f64 },
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_time >= self.end_time {
            return Err(ConfigError::EmptyWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if self.num_servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if !self.customer_rate.is_finite() || self.customer_rate < 0.0 {
            return Err(ConfigError::InvalidCustomerRate(self.customer_rate));
        }
        if !self.server_rate.is_finite() || self.server_rate <= 0.0 {
            return Err(ConfigError::InvalidServerRate(self.server_rate));
        }
        // Keep the clamped Poisson tail negligible: the bound must sit at
        // least six standard deviations above the per-minute mean.
        let mean = self.arrivals_per_minute();
        if mean + 6.0 * mean.sqrt() > MAX_ARRIVALS_PER_MINUTE as f64 {
            return Err(ConfigError::TruncationTooTight {
                bound: MAX_ARRIVALS_PER_MINUTE,
                rate: self.customer_rate,
                mean,
            });
        }
        Ok(())
    }

    /// Arrival rate in customers per minute.
    pub fn arrivals_per_minute(&self) -> f64 {
        self.customer_rate / MINUTES_PER_HOUR as f64
    }

    /// Mean service duration in minutes.
    pub fn mean_service_minutes(&self) -> f64 {
        MINUTES_PER_HOUR as f64 / self.server_rate
    }

    /// Window length in minutes.
    pub fn total_minutes(&self) -> usize {
        self.end_time - self.start_time
    }

    /// The same configuration under a different seed; used when deriving
    /// per-replication seeds from a parent stream.
    pub fn with_seed(&self, seed: u64) -> SimConfig {
        SimConfig { seed, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SimConfig {
        SimConfig {
            start_time: 0,
            end_time: 480,
            num_servers: 2,
            customer_rate: 5.8,
            server_rate: 6.0,
            seed: 2021,
        }
    }

    #[test]
    fn baseline_config_is_valid() {
        assert_eq!(base().validate(), Ok(()));
    }

    #[test]
    fn zero_customer_rate_is_valid() {
        let config = SimConfig {
            customer_rate: 0.0,
            ..base()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn empty_window_is_rejected() {
        let config = SimConfig {
            start_time: 480,
            end_time: 480,
            ..base()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyWindow {
                start: 480,
                end: 480
            })
        );
    }

    #[test]
    fn zero_servers_are_rejected() {
        let config = SimConfig {
            num_servers: 0,
            ..base()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoServers));
    }

    #[test]
    fn negative_and_non_finite_rates_are_rejected() {
        let negative = SimConfig {
            customer_rate: -1.0,
            ..base()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidCustomerRate(_))
        ));

        let nan = SimConfig {
            server_rate: f64::NAN,
            ..base()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::InvalidServerRate(_))
        ));

        let zero_service = SimConfig {
            server_rate: 0.0,
            ..base()
        };
        assert!(matches!(
            zero_service.validate(),
            Err(ConfigError::InvalidServerRate(_))
        ));
    }

    #[test]
    fn overloaded_arrival_rate_trips_truncation_guard() {
        // 4200/hour is 70/minute; 70 + 6·sqrt(70) > 100.
        let config = SimConfig {
            customer_rate: 4200.0,
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TruncationTooTight { .. })
        ));
    }

    #[test]
    fn derived_quantities() {
        let config = base();
        assert!((config.arrivals_per_minute() - 5.8 / 60.0).abs() < 1e-12);
        assert!((config.mean_service_minutes() - 10.0).abs() < 1e-12);
        assert_eq!(config.total_minutes(), 480);
        assert_eq!(config.with_seed(7).seed, 7);
        assert_eq!(config.with_seed(7).end_time, config.end_time);
    }
}
