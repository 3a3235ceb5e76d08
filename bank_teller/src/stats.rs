//! Per-run statistics.

use crate::MINUTES_PER_HOUR;

/// Totals for one completed run.
///
/// Integer totals are stored and averages derived on demand, so a run
/// with no customers reports `None` instead of a 0/0 artifact, and
/// deriving twice always yields the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Window length in minutes.
    pub total_time: usize,
    pub total_customers: usize,
    pub total_servers: usize,
    pub total_wait_time: usize,
    pub total_service_time: usize,
}

impl RunSummary {
    /// Mean queueing delay in minutes; `None` when no customer arrived.
    pub fn average_wait_time(&self) -> Option<f64> {
        if self.total_customers == 0 {
            return None;
        }
        Some(self.total_wait_time as f64 / self.total_customers as f64)
    }

    /// Mean service duration in minutes; `None` when no customer arrived.
    pub fn average_service_time(&self) -> Option<f64> {
        if self.total_customers == 0 {
            return None;
        }
        Some(self.total_service_time as f64 / self.total_customers as f64)
    }

    /// Observed arrival rate over the window, in customers per hour.
    pub fn customers_per_hour(&self) -> f64 {
        self.total_customers as f64 / (self.total_time as f64 / MINUTES_PER_HOUR as f64)
    }
}
