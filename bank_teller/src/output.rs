//! Structured export of sweep results to CSV and JSON.
//!
//! One sweep runs the same arrival/service rates over a grid of window
//! lengths and teller counts; each grid cell aggregates repeated runs.
//! The CSV is meant for plotting mean wait against window length, with
//! the Erlang-C steady-state value alongside for comparison.

use crate::replication::ReplicationSummary;
use crate::theory;
use crate::{SimConfig, MINUTES_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level container for one sweep's results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutput {
    pub metadata: SweepMetadata,
    pub points: Vec<GridPoint>,
}

/// Enough to reproduce the sweep: rates, parent seed, and when it ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepMetadata {
    pub name: String,
    pub seed: u64,
    pub customer_rate: f64,
    pub server_rate: f64,
    pub timestamp: String,
}

impl SweepMetadata {
    pub fn new(name: &str, seed: u64, customer_rate: f64, server_rate: f64) -> Self {
        SweepMetadata {
            name: name.to_string(),
            seed,
            customer_rate,
            server_rate,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One (window length, teller count) cell of the sweep grid.
///
/// Mean fields are `None` when no replication of the cell saw a
/// customer; `contributing_runs` says how many did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridPoint {
    pub hours: usize,
    pub num_servers: usize,
    pub requested_runs: usize,
    pub contributing_runs: usize,
    pub mean_customers: Option<f64>,
    /// Observed customers per hour, against the configured rate.
    pub actual_customer_rate: Option<f64>,
    pub mean_wait_time: Option<f64>,
    pub mean_service_time: Option<f64>,
    pub steady_state_wait: Option<f64>,
}

impl GridPoint {
    pub fn from_replication(
        config: &SimConfig,
        hours: usize,
        summary: &ReplicationSummary,
    ) -> Self {
        GridPoint {
            hours,
            num_servers: summary.total_servers,
            requested_runs: summary.requested_runs,
            contributing_runs: summary.contributing_runs,
            mean_customers: summary.mean_customers,
            actual_customer_rate: summary.mean_customers.map(|c| c / hours as f64),
            mean_wait_time: summary.mean_wait_time,
            mean_service_time: summary.mean_service_time,
            steady_state_wait: theory::steady_state_wait(
                summary.total_servers,
                config.customer_rate,
                config.server_rate,
            ),
        }
    }

    /// Window length in minutes.
    pub fn total_minutes(&self) -> usize {
        self.hours * MINUTES_PER_HOUR
    }
}

fn field(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

impl SweepOutput {
    /// Write the grid as a flat CSV table.
    pub fn write_points_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record([
            "hours",
            "num_servers",
            "requested_runs",
            "contributing_runs",
            "mean_customers",
            "customer_rate",
            "server_rate",
            "actual_customer_rate",
            "mean_wait_time",
            "mean_service_time",
            "steady_state_wait",
        ])?;

        for point in &self.points {
            wtr.write_record(&[
                point.hours.to_string(),
                point.num_servers.to_string(),
                point.requested_runs.to_string(),
                point.contributing_runs.to_string(),
                field(point.mean_customers),
                format!("{:.4}", self.metadata.customer_rate),
                format!("{:.4}", self.metadata.server_rate),
                field(point.actual_customer_rate),
                field(point.mean_wait_time),
                field(point.mean_service_time),
                field(point.steady_state_wait),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the whole sweep, metadata included, as pretty JSON.
    pub fn write_summary_json<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write `wait_times.csv` and `summary.json` into `dir`.
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<(), Box<dyn std::error::Error>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        self.write_points_csv(dir.join("wait_times.csv"))?;
        self.write_summary_json(dir.join("summary.json"))?;
        Ok(())
    }
}
