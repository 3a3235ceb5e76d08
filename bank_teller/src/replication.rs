//! Cross-run replication.
//!
//! A single short run can see a handful of customers or none at all, so
//! drivers repeat a configuration under derived seeds and average the
//! summaries. Runs are independent, own all their state, and fan out
//! across the rayon pool; seeds are derived sequentially before the
//! fan-out, so the result is identical for any thread count.

use crate::simulation::Simulation;
use crate::stats::RunSummary;
use crate::{ConfigError, SimConfig};
use rayon::prelude::*;
use variates::SeedStream;

/// Aggregate of repeated runs of one configuration.
///
/// Means cover *contributing* runs only (those that saw at least one
/// customer); `contributing_runs` records how many that was, so zero
/// weight is never smuggled into a denominator silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicationSummary {
    pub requested_runs: usize,
    pub contributing_runs: usize,
    /// Window length in minutes, shared by every run.
    pub total_time: usize,
    pub total_servers: usize,
    pub mean_customers: Option<f64>,
    pub mean_wait_time: Option<f64>,
    pub mean_service_time: Option<f64>,
}

/// Run `config` `runs` times under seeds derived from `config.seed` and
/// average the results.
pub fn replicate(config: &SimConfig, runs: usize) -> Result<ReplicationSummary, ConfigError> {
    config.validate()?;
    let mut seeds = SeedStream::new(config.seed);
    let run_seeds: Vec<u64> = (0..runs).map(|_| seeds.next_seed()).collect();

    let summaries = run_seeds
        .into_par_iter()
        .map(|seed| Simulation::new(config.with_seed(seed)).map(Simulation::run))
        .collect::<Result<Vec<RunSummary>, ConfigError>>()?;

    Ok(ReplicationSummary::from_runs(config, &summaries, runs))
}

impl ReplicationSummary {
    fn from_runs(config: &SimConfig, summaries: &[RunSummary], requested_runs: usize) -> Self {
        let contributing: Vec<&RunSummary> = summaries
            .iter()
            .filter(|s| s.total_customers > 0)
            .collect();
        let contributing_runs = contributing.len();

        let (mean_customers, mean_wait_time, mean_service_time) = if contributing_runs == 0 {
            (None, None, None)
        } else {
            let count = contributing_runs as f64;
            let customers = contributing
                .iter()
                .map(|s| s.total_customers as f64)
                .sum::<f64>()
                / count;
            let wait = contributing
                .iter()
                .filter_map(|s| s.average_wait_time())
                .sum::<f64>()
                / count;
            let service = contributing
                .iter()
                .filter_map(|s| s.average_service_time())
                .sum::<f64>()
                / count;
            (Some(customers), Some(wait), Some(service))
        };

        ReplicationSummary {
            requested_runs,
            contributing_runs,
            total_time: config.total_minutes(),
            total_servers: config.num_servers,
            mean_customers,
            mean_wait_time,
            mean_service_time,
        }
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

    fn summary(customers: usize, wait: usize, service: usize) -> RunSummary {
        RunSummary {
            total_time: 480,
            total_customers: customers,
            total_servers: 2,
            total_wait_time: wait,
            total_service_time: service,
        }
    }

    #[test]
    fn empty_runs_are_excluded_from_both_sides_of_the_mean() {
        // One busy run averaging 3 minutes of wait, one empty run: the
        // empty run must not drag the mean toward zero.
        let runs = [summary(10, 30, 100), summary(0, 0, 0)];
        let aggregate = ReplicationSummary::from_runs(&base(), &runs, 2);
        assert_eq!(aggregate.requested_runs, 2);
        assert_eq!(aggregate.contributing_runs, 1);
        assert_eq!(aggregate.mean_customers, Some(10.0));
        assert_eq!(aggregate.mean_wait_time, Some(3.0));
        assert_eq!(aggregate.mean_service_time, Some(10.0));
    }

    #[test]
    fn all_empty_runs_report_no_data() {
        let runs = [summary(0, 0, 0), summary(0, 0, 0)];
        let aggregate = ReplicationSummary::from_runs(&base(), &runs, 2);
        assert_eq!(aggregate.contributing_runs, 0);
        assert_eq!(aggregate.mean_customers, None);
        assert_eq!(aggregate.mean_wait_time, None);
        assert_eq!(aggregate.mean_service_time, None);
    }

    #[test]
    fn means_average_per_run_averages() {
        let runs = [summary(10, 30, 100), summary(20, 20, 180)];
        let aggregate = ReplicationSummary::from_runs(&base(), &runs, 2);
        assert_eq!(aggregate.mean_customers, Some(15.0));
        // (3.0 + 1.0) / 2 and (10.0 + 9.0) / 2
        assert_eq!(aggregate.mean_wait_time, Some(2.0));
        assert_eq!(aggregate.mean_service_time, Some(9.5));
    }

    #[test]
    fn replication_is_deterministic_regardless_of_scheduling() {
        let a = replicate(&base(), 16).unwrap();
        let b = replicate(&base(), 16).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.requested_runs, 16);
        assert!(a.contributing_runs > 0);
        assert!(a.mean_wait_time.is_some());
    }

    #[test]
    fn closed_door_replication_contributes_nothing() {
        let config = SimConfig {
            customer_rate: 0.0,
            ..base()
        };
        let aggregate = replicate(&config, 4).unwrap();
        assert_eq!(aggregate.requested_runs, 4);
        assert_eq!(aggregate.contributing_runs, 0);
        assert_eq!(aggregate.mean_wait_time, None);
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let config = SimConfig {
            num_servers: 0,
            ..base()
        };
        assert!(replicate(&config, 4).is_err());
    }
}
