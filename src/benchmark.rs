//! Random-partition baseline for sanity-checking decoded routes.
//!
//! This is a diagnostic, not a solver: it shuffles the customer locations,
//! cuts the shuffled order into one contiguous chunk per vehicle and keeps the
//! cheapest partition seen. A decoded solution that cannot beat it usually means
//! the sampler returned a poor or infeasible sample.

use crate::decoder::compute_cost;
use crate::error::{Result, VrpError};
use crate::instance::DistanceMatrix;
use crate::solution::{Route, RoutingSolution};
use indicatif::{ProgressBar, ProgressStyle};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// Baseline configuration
#[derive(Debug, Clone)]
pub struct BaselineConfig {
    /// Number of random partitions to evaluate
    pub trials: usize,
    /// Random seed
    pub seed: u64,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        BaselineConfig {
            trials: 10000,
            seed: 42,
            show_progress: false,
        }
    }
}

/// Cost of one random partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineTrial {
    pub trial: usize,
    pub cost: f64,
}

/// Outcome of a baseline run
#[derive(Debug, Clone)]
pub struct BaselineResult {
    pub best: RoutingSolution,
    pub mean_cost: f64,
    pub std_cost: f64,
    pub trials: Vec<BaselineTrial>,
}

impl BaselineResult {
    pub fn best_cost(&self) -> f64 {
        self.best.cost
    }

    /// Relative gap of `cost` to the best random cost, in percent.
    /// Negative values mean `cost` beats the baseline.
    pub fn gap_percent(&self, cost: f64) -> f64 {
        if self.best.cost == 0.0 {
            return 0.0;
        }
        (cost - self.best.cost) / self.best.cost * 100.0
    }

    /// Export one row per trial
    pub fn export_trials_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for trial in &self.trials {
            writer.serialize(trial)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("        Random Baseline Report\n");
        report.push_str("========================================\n\n");
        report.push_str(&format!("Trials: {}\n", self.trials.len()));
        report.push_str(&format!("Best cost: {:.2}\n", self.best.cost));
        report.push_str(&format!("Mean cost: {:.2}\n", self.mean_cost));
        report.push_str(&format!("Std cost: {:.2}\n", self.std_cost));
        report.push_str("\nBest partition:\n");
        for (num, route) in self.best.routes.iter().enumerate() {
            report.push_str(&format!("  Vehicle {}: {:?}\n", num, route));
        }

        report
    }
}

/// Random partition sampler
pub struct RandomBaseline {
    config: BaselineConfig,
}

impl RandomBaseline {
    pub fn new(config: BaselineConfig) -> Self {
        RandomBaseline { config }
    }

    pub fn run(&self, distances: &DistanceMatrix, num_vehicles: usize) -> Result<BaselineResult> {
        if self.config.trials == 0 {
            return Err(VrpError::InvalidParameter("baseline needs at least one trial".to_string()));
        }
        if num_vehicles == 0 {
            return Err(VrpError::InvalidParameter("at least one vehicle is required".to_string()));
        }

        log::info!(
            "Running random baseline: {} trials, {} locations, {} vehicles",
            self.config.trials,
            distances.num_locations(),
            num_vehicles
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let mut order: Vec<usize> = (0..distances.num_locations()).collect();

        let progress = if self.config.show_progress {
            let bar = ProgressBar::new(self.config.trials as u64);
            if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} trials ({eta})") {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut trials = Vec::with_capacity(self.config.trials);
        let mut best: Option<(f64, Vec<Route>)> = None;

        for trial in 0..self.config.trials {
            order.shuffle(&mut rng);
            let routes = partition(&order, num_vehicles);
            let cost = compute_cost(&routes, distances);

            if best.as_ref().map_or(true, |(c, _)| OrderedFloat(cost) < OrderedFloat(*c)) {
                best = Some((cost, routes));
            }

            trials.push(BaselineTrial { trial, cost });
            progress.inc(1);
        }
        progress.finish_and_clear();

        let costs: Vec<f64> = trials.iter().map(|t| t.cost).collect();
        let mean_cost = costs.iter().mean();
        let std_cost = if costs.len() > 1 { costs.iter().std_dev() } else { 0.0 };

        let (_, best_routes) = best.ok_or_else(|| VrpError::InvalidParameter("no trial was run".to_string()))?;
        let best = RoutingSolution::from_routes(best_routes, distances, "RandomBaseline");

        log::info!("Random baseline best cost: {:.2}", best.cost);

        Ok(BaselineResult {
            best,
            mean_cost,
            std_cost,
            trials,
        })
    }
}

/// Cut `order` into `num_vehicles` contiguous chunks whose sizes differ by at
/// most one; the first `len % num_vehicles` chunks get the extra location.
pub fn partition(order: &[usize], num_vehicles: usize) -> Vec<Route> {
    let base = order.len() / num_vehicles;
    let extra = order.len() % num_vehicles;

    let mut routes = Vec::with_capacity(num_vehicles);
    let mut start = 0;
    for vehicle in 0..num_vehicles {
        let len = base + usize::from(vehicle < extra);
        routes.push(order[start..start + len].to_vec());
        start += len;
    }

    routes
}
