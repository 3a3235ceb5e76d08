//! The minute-stepped simulation engine.
//!
//! No event queue: time advances in fixed one-minute ticks from
//! `start_time` to `end_time` (exclusive), each tick draws a batch of
//! arrivals, and every arrival is resolved on the spot against the
//! earliest-available teller. The batch-per-minute shape is part of the
//! model, not an approximation to be swapped for continuous arrivals.

use crate::customer::Customer;
use crate::stats::RunSummary;
use crate::{ConfigError, SimConfig, MAX_ARRIVALS_PER_MINUTE};
use variates::{Exponential, Poisson, SeedStream};

pub struct Simulation {
    config: SimConfig,
    arrivals: Poisson,
    /// One independent service-duration stream per teller, all seeded
    /// from the run seed through a seed stream.
    service: Vec<Exponential>,
    /// Minute at which each teller becomes free.
    server_free_at: Vec<usize>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Simulation, ConfigError> {
        config.validate()?;
        let arrivals = Poisson::new(
            config.arrivals_per_minute(),
            MAX_ARRIVALS_PER_MINUTE,
            config.seed,
        );
        let mut seeds = SeedStream::new(config.seed);
        let service_rate = 1.0 / config.mean_service_minutes();
        let service = (0..config.num_servers)
            .map(|_| Exponential::new(service_rate, seeds.next_seed()))
            .collect();
        Ok(Simulation {
            server_free_at: vec![0; config.num_servers],
            config,
            arrivals,
            service,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run to completion. Consumes the engine: a run is a pure function
    /// of configuration and seed, and the streams cannot be rewound.
    pub fn run(self) -> RunSummary {
        self.run_traced(|_, _| {})
    }

    /// Like [`Simulation::run`], additionally handing every resolved
    /// customer (with its 1-based index) to `on_customer` in arrival
    /// order.
    pub fn run_traced(
        mut self,
        mut on_customer: impl FnMut(usize, &Customer),
    ) -> RunSummary {
        let mut total_customers = 0;
        let mut total_wait_time = 0;
        let mut total_service_time = 0;

        for t in self.config.start_time..self.config.end_time {
            let arrivals = self.arrivals.next();
            for _ in 0..arrivals {
                let customer = self.admit(t);
                total_customers += 1;
                total_wait_time += customer.wait_time();
                total_service_time += customer.service_time();
                on_customer(total_customers, &customer);
            }
        }

        RunSummary {
            total_time: self.config.total_minutes(),
            total_customers,
            total_servers: self.config.num_servers,
            total_wait_time,
            total_service_time,
        }
    }

    /// Assign one arriving customer to the earliest-available teller and
    /// resolve their whole visit.
    fn admit(&mut self, arrival_time: usize) -> Customer {
        let (server, served_time) = self.select_server(arrival_time);
        let service_minutes = self.service[server].next().round() as usize;
        let finish_time = served_time + service_minutes;
        self.server_free_at[server] = finish_time;
        Customer {
            arrival_time,
            served_time,
            finish_time,
            server,
        }
    }

    /// Earliest-available-server dispatch: minimize the effective
    /// availability `max(free_at, arrival)`, first index winning ties.
    fn select_server(&self, arrival_time: usize) -> (usize, usize) {
        let mut best_server = 0;
        let mut best_start = usize::MAX;
        for (server, &free_at) in self.server_free_at.iter().enumerate() {
            let available = free_at.max(arrival_time);
            if available < best_start {
                best_server = server;
                best_start = available;
                if available == arrival_time {
                    // Nobody can start before the customer arrives.
                    break;
                }
            }
        }
        (best_server, best_start)
    }
}
