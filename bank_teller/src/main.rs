//! Single bank-day demo.
//!
//! One 8-hour day at the counter: 2 tellers, 5.8 customers/hour walking
//! in, each teller finishing 6 customers/hour. Prints the full
//! per-customer trace, then the day's summary next to the steady-state
//! prediction the day never gets close to.

use bank_teller::helpers::format_clock;
use bank_teller::{theory, SimConfig, Simulation, MINUTES_PER_HOUR};

fn main() {
    println!("=== Bank Teller Queueing Simulation ===\n");

    let config = SimConfig {
        start_time: 8 * MINUTES_PER_HOUR, // 08:00
        end_time: 16 * MINUTES_PER_HOUR,  // 16:00
        num_servers: 2,
        customer_rate: 5.8,
        server_rate: 6.0,
        seed: 2021,
    };

    println!("Configuration:");
    println!("  Tellers: {}", config.num_servers);
    println!("  Arrivals: {} customers/hour", config.customer_rate);
    println!(
        "  Service: {} customers/hour per teller ({} minutes/customer)",
        config.server_rate,
        config.mean_service_minutes()
    );
    println!(
        "  Window: {} - {}",
        format_clock(config.start_time),
        format_clock(config.end_time)
    );
    println!("  Seed: {}\n", config.seed);

    let simulation = Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let summary = simulation.run_traced(|index, customer| {
        println!("Customer {}:", index);
        println!("\tArrival   : {}", format_clock(customer.arrival_time));
        println!(
            "\tServedTime: {} (by teller {}) (WaitTime = {} minutes)",
            format_clock(customer.served_time),
            customer.server,
            customer.wait_time()
        );
        println!(
            "\tFinishTime: {} (ServiceTime = {} minutes)",
            format_clock(customer.finish_time),
            customer.service_time()
        );
    });

    println!();
    println!(
        "Simulation Time    : {} hours",
        summary.total_time / MINUTES_PER_HOUR
    );
    println!(
        "Total Customers    : {} ({:.6} customers/hour)",
        summary.total_customers,
        summary.customers_per_hour()
    );
    println!("Total Tellers      : {}", summary.total_servers);
    match summary.average_wait_time() {
        Some(wait) => println!("Average WaitTime   : {:.6} minutes", wait),
        None => println!("Average WaitTime   : n/a (no customers)"),
    }
    match summary.average_service_time() {
        Some(service) => println!("Average ServiceTime: {:.6} minutes", service),
        None => println!("Average ServiceTime: n/a (no customers)"),
    }

    if let Some(steady) =
        theory::steady_state_wait(config.num_servers, config.customer_rate, config.server_rate)
    {
        println!(
            "\nSteady-state mean wait for these rates is {:.2} minutes; a finite day\n\
             samples far short of it. Run the sweep binary to see the gap close.",
            steady
        );
    }
}
