//! Convergence sweep runner.
//!
//! Executes the teller model over a grid of window lengths and teller
//! counts from a TOML experiment file, averaging repeated runs per cell,
//! and writes the results as CSV + JSON for plotting.
//!
//! Usage:
//!   cargo run --release --bin run_sweep -- experiments/convergence.toml

use bank_teller::output::{GridPoint, SweepMetadata, SweepOutput};
use bank_teller::replication::replicate;
use bank_teller::{SimConfig, MINUTES_PER_HOUR};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level experiment configuration.
#[derive(Debug, Clone, Deserialize)]
struct ExperimentConfig {
    experiment: ExperimentMetadata,
    model: ModelParams,
    output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct ExperimentMetadata {
    name: String,
    description: String,
    base_seed: u64,
    /// Repetition budget per cell: a cell of `h` hours gets
    /// `max(1, budget / h)` runs, so short windows are averaged hard and
    /// long ones run once.
    replication_budget_hours: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelParams {
    customer_rate: f64,
    server_rate: f64,
    hours: Vec<usize>,
    server_counts: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct OutputSettings {
    save_points_csv: bool,
    save_summary_json: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <experiment_config.toml>", args[0]);
        eprintln!("Example: {} experiments/convergence.toml", args[0]);
        std::process::exit(1);
    }

    let config_path = &args[1];
    println!("=== Teller Queue Convergence Sweep ===\n");
    println!("Loading experiment config: {}\n", config_path);

    let config_str = fs::read_to_string(config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let exp: ExperimentConfig = toml::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing TOML config: {}", e);
        std::process::exit(1);
    });

    println!("Experiment: {}", exp.experiment.name);
    println!("Description: {}", exp.experiment.description);
    println!(
        "Grid: {} window lengths x {} teller counts, budget {} hours/cell\n",
        exp.model.hours.len(),
        exp.model.server_counts.len(),
        exp.experiment.replication_budget_hours
    );

    let output_base = PathBuf::from("results").join(&exp.experiment.name);
    fs::create_dir_all(&output_base).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let mut points = Vec::new();
    let mut cell_index = 0u64;

    for &hours in &exp.model.hours {
        for &num_servers in &exp.model.server_counts {
            let runs = (exp.experiment.replication_budget_hours / hours).max(1);
            let config = SimConfig {
                start_time: 0,
                end_time: hours * MINUTES_PER_HOUR,
                num_servers,
                customer_rate: exp.model.customer_rate,
                server_rate: exp.model.server_rate,
                // Distinct parent seed per cell keeps cells independent
                // while the whole sweep stays reproducible.
                seed: exp.experiment.base_seed + cell_index,
            };
            cell_index += 1;

            let cell_start = Instant::now();
            let summary = replicate(&config, runs).unwrap_or_else(|e| {
                eprintln!("Invalid cell configuration: {}", e);
                std::process::exit(1);
            });
            let point = GridPoint::from_replication(&config, hours, &summary);

            println!(
                "  {}h x {} tellers: {} runs ({} contributed) in {:.1}s, mean wait {}",
                hours,
                num_servers,
                runs,
                summary.contributing_runs,
                cell_start.elapsed().as_secs_f64(),
                point
                    .mean_wait_time
                    .map(|w| format!("{:.3} min", w))
                    .unwrap_or_else(|| "n/a".to_string())
            );

            points.push(point);
        }
    }

    let output = SweepOutput {
        metadata: SweepMetadata::new(
            &exp.experiment.name,
            exp.experiment.base_seed,
            exp.model.customer_rate,
            exp.model.server_rate,
        ),
        points,
    };

    if exp.output.save_points_csv {
        output
            .write_points_csv(output_base.join("wait_times.csv"))
            .unwrap_or_else(|e| {
                eprintln!("Error writing CSV: {}", e);
                std::process::exit(1);
            });
    }
    if exp.output.save_summary_json {
        output
            .write_summary_json(output_base.join("summary.json"))
            .unwrap_or_else(|e| {
                eprintln!("Error writing JSON: {}", e);
                std::process::exit(1);
            });
    }

    println!(
        "\nSweep complete in {:.1}s, {} grid cells",
        start.elapsed().as_secs_f64(),
        output.points.len()
    );
    println!("Results saved to: {}", output_base.display());
}
