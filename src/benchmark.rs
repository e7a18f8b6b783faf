//! Benchmarking module.
//!
//! Runs the nearest neighbor heuristic on many independently generated random
//! instances and collects tour length statistics. Trial `t` seeds its own
//! generator with `base_seed + t`, so results do not depend on whether trials
//! run in parallel.

use crate::error::Result;
use crate::generator::InstanceConfig;
use crate::heuristics::construction::{ConstructionHeuristic, NearestNeighborHeuristic};
use crate::instance::TspInstance;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// Result of a single benchmark trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    pub trial: usize,
    pub seed: u64,
    pub num_points: usize,
    pub start_index: usize,
    pub total_distance: f64,
    pub longest_segment: f64,
    pub mean_segment: f64,
    /// Construction time in seconds
    pub time: f64,
}

/// Aggregated statistics over all trials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub trials: usize,
    pub mean_distance: f64,
    pub std_distance: f64,
    pub best_distance: f64,
    pub worst_distance: f64,
    pub mean_points: f64,
    pub mean_time: f64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of random instances to solve
    pub trials: usize,
    /// Seed of trial 0
    pub base_seed: u64,
    /// How each instance is generated
    pub instance: InstanceConfig,
    /// Run trials on the rayon thread pool
    pub parallel: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            trials: 100,
            base_seed: 42,
            instance: InstanceConfig::default(),
            parallel: true,
            show_progress: false,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<TrialResult>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
        }
    }

    /// Generate one instance from `seed` and solve it
    pub fn run_trial(instance_config: &InstanceConfig, trial: usize, seed: u64) -> Result<TrialResult> {
        let mut config = InstanceConfig {
            seed: Some(seed),
            ..instance_config.clone()
        };
        let mut rng = config.rng();
        let instance = TspInstance::generate(&config, &mut rng)?;
        let solution = NearestNeighborHeuristic::new().construct(&instance.points, &mut rng)?;

        Ok(TrialResult {
            trial,
            seed,
            num_points: instance.dimension(),
            start_index: solution.start_index,
            total_distance: solution.cost,
            longest_segment: solution.longest_segment(),
            mean_segment: solution.mean_segment(),
            time: solution.computation_time,
        })
    }

    /// Run all trials, replacing any earlier results
    pub fn run(&mut self) -> Result<&[TrialResult]> {
        log::info!(
            "Running {} trials (base seed {}, parallel: {})",
            self.config.trials,
            self.config.base_seed,
            self.config.parallel
        );

        let progress = if self.config.show_progress {
            let bar = ProgressBar::new(self.config.trials as u64);
            if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} trials ({elapsed})") {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        let instance_config = &self.config.instance;
        let base_seed = self.config.base_seed;
        let run_one = |trial: usize| {
            let result = Self::run_trial(instance_config, trial, base_seed.wrapping_add(trial as u64));
            progress.inc(1);
            result
        };

        let results: Result<Vec<TrialResult>> = if self.config.parallel {
            (0..self.config.trials).into_par_iter().map(run_one).collect()
        } else {
            (0..self.config.trials).map(run_one).collect()
        };
        progress.finish_and_clear();

        self.results = results?;
        Ok(&self.results)
    }

    /// Compute statistics over recorded trials
    pub fn summary(&self) -> Option<BenchmarkSummary> {
        if self.results.is_empty() {
            return None;
        }

        let costs: Vec<f64> = self.results.iter().map(|r| r.total_distance).collect();
        let points: Vec<f64> = self.results.iter().map(|r| r.num_points as f64).collect();
        let times: Vec<f64> = self.results.iter().map(|r| r.time).collect();

        let std_distance = if costs.len() > 1 {
            costs.iter().std_dev()
        } else {
            0.0
        };

        Some(BenchmarkSummary {
            trials: costs.len(),
            mean_distance: costs.iter().mean(),
            std_distance,
            best_distance: costs.iter().cloned().fold(f64::INFINITY, f64::min),
            worst_distance: costs.iter().cloned().fold(0.0, f64::max),
            mean_points: points.iter().mean(),
            mean_time: times.iter().mean(),
        })
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("   Nearest Neighbor TSP Benchmark\n");
        report.push_str("========================================\n");
        report.push_str(&format!(
            "Generated: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!(
            "Trials: {} | Base seed: {} | Region: {}x{}\n\n",
            self.config.trials,
            self.config.base_seed,
            self.config.instance.region.width,
            self.config.instance.region.height
        ));

        let Some(summary) = self.summary() else {
            report.push_str("No results recorded.\n");
            return report;
        };

        report.push_str(&format!("{:<20} {:>12}\n", "Metric", "Value"));
        report.push_str("-".repeat(33).as_str());
        report.push('\n');
        report.push_str(&format!("{:<20} {:>12.2}\n", "Mean distance", summary.mean_distance));
        report.push_str(&format!("{:<20} {:>12.2}\n", "Std deviation", summary.std_distance));
        report.push_str(&format!("{:<20} {:>12.2}\n", "Best distance", summary.best_distance));
        report.push_str(&format!("{:<20} {:>12.2}\n", "Worst distance", summary.worst_distance));
        report.push_str(&format!("{:<20} {:>12.2}\n", "Mean points", summary.mean_points));
        report.push_str(&format!("{:<20} {:>12.6}\n", "Mean time (s)", summary.mean_time));
        report.push_str("-".repeat(33).as_str());
        report.push('\n');

        report
    }

    /// Get all results
    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }
}
