//! Benchmark driver: sampling, validation and measurement of pairs

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use super::comparison::ComparisonRecord;
use super::config::BenchmarkConfig;
use super::measurement::measure;
use super::sampling::{PairSampler, straight_line_distance};
use super::summary::BenchmarkSummary;
use crate::Error;
use crate::model::{PoiCatalog, StreetGraph};
use crate::routing::{Algorithm, has_path, resolve_point};

/// Why a sampled pair was discarded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PairRejection {
    #[error("no path connects the snapped endpoints")]
    Disconnected,
    #[error("endpoint could not be snapped to the graph")]
    Unresolvable,
    #[error("{algorithm} measurement failed: {reason}")]
    MeasurementFailed { algorithm: Algorithm, reason: String },
}

/// Results of a finished benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    /// Profile the graph was weighted with, if any
    pub profile: Option<String>,
    pub weighting_epoch: u64,
    pub config: BenchmarkConfig,
    pub records: Vec<ComparisonRecord>,
    pub invalid_pairs: usize,
    pub disconnected_pairs: usize,
    pub unresolvable_pairs: usize,
    pub failed_measurements: usize,
    /// The rejection budget ran out before enough pairs were accepted
    pub exhausted: bool,
}

impl BenchmarkReport {
    pub fn summary(&self) -> Option<BenchmarkSummary> {
        BenchmarkSummary::from_records(&self.records)
    }

    fn reject(&mut self, rejection: &PairRejection) {
        self.invalid_pairs += 1;
        match rejection {
            PairRejection::Disconnected => self.disconnected_pairs += 1,
            PairRejection::Unresolvable => self.unresolvable_pairs += 1,
            PairRejection::MeasurementFailed { .. } => self.failed_measurements += 1,
        }
    }
}

/// Dijkstra versus A* comparison over randomly drawn points of interest.
///
/// Holds the graph by shared reference for its whole lifetime, so the
/// weighting cannot change while pairs are measured.
pub struct Benchmark<'a> {
    graph: &'a StreetGraph,
    pois: &'a PoiCatalog,
    config: BenchmarkConfig,
    sampler: PairSampler,
}

impl<'a> Benchmark<'a> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for an empty graph, fewer than two
    /// points of interest or a configuration without timed repetitions
    pub fn new(
        graph: &'a StreetGraph,
        pois: &'a PoiCatalog,
        config: BenchmarkConfig,
    ) -> Result<Self, Error> {
        config.validate()?;
        if graph.is_empty() {
            return Err(Error::InvalidData("street graph has no nodes".to_string()));
        }
        if pois.len() < 2 {
            return Err(Error::InvalidData(format!(
                "need at least two points of interest, got {}",
                pois.len()
            )));
        }

        Ok(Self {
            graph,
            pois,
            sampler: PairSampler::new(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn run(mut self) -> BenchmarkReport {
        let graph = self.graph;
        let pois = self.pois;
        let target = self.config.pairs;
        let timing = self.config.timing();
        let mode = self.config.heuristic;

        info!(
            "Benchmark: {} pairs, {} repetitions ({} warm-up), seed {}, {} points of interest, heuristic {}",
            target,
            timing.repetitions,
            timing.warmup,
            self.config.seed,
            pois.len(),
            mode
        );

        let mut report = BenchmarkReport {
            started_at: Utc::now(),
            seed: self.config.seed,
            profile: graph.weighting().profile.clone(),
            weighting_epoch: graph.weighting_epoch(),
            config: self.config.clone(),
            records: Vec::with_capacity(target),
            invalid_pairs: 0,
            disconnected_pairs: 0,
            unresolvable_pairs: 0,
            failed_measurements: 0,
            exhausted: false,
        };

        while report.records.len() < target {
            if self
                .config
                .max_invalid_pairs
                .is_some_and(|limit| report.invalid_pairs > limit)
            {
                warn!(
                    "Giving up after {} rejected pairs, {} of {} accepted",
                    report.invalid_pairs,
                    report.records.len(),
                    target
                );
                report.exhausted = true;
                break;
            }

            let Some((origin, destination)) = self.sampler.draw(pois) else {
                break;
            };

            let (Ok(from), Ok(to)) = (
                resolve_point(graph, origin.position),
                resolve_point(graph, destination.position),
            ) else {
                report.reject(&PairRejection::Unresolvable);
                continue;
            };

            if !has_path(graph, from, to) {
                debug!("{} -> {}: {}", origin.name, destination.name, PairRejection::Disconnected);
                report.reject(&PairRejection::Disconnected);
                continue;
            }

            let dijkstra = measure(
                graph,
                origin.position,
                destination.position,
                Algorithm::Dijkstra,
                mode,
                timing,
            );
            let astar = measure(
                graph,
                origin.position,
                destination.position,
                Algorithm::AStar,
                mode,
                timing,
            );

            if let Some(failed) = [&dijkstra, &astar].into_iter().find(|m| !m.success) {
                let rejection = PairRejection::MeasurementFailed {
                    algorithm: failed.algorithm,
                    reason: failed.error.clone().unwrap_or_default(),
                };
                debug!("{} -> {}: {}", origin.name, destination.name, rejection);
                report.reject(&rejection);
                continue;
            }

            let record = ComparisonRecord::new(
                origin.name.as_str(),
                destination.name.as_str(),
                straight_line_distance(origin.position, destination.position),
                dijkstra,
                astar,
            );
            debug!(
                "{} -> {} ({}, {:.0} m): speedup {:.2}x, {} vs {} nodes",
                record.origin,
                record.destination,
                record.category,
                record.straight_line_m,
                record.speedup_mean,
                record.dijkstra.explored,
                record.astar.explored
            );
            report.records.push(record);

            let done = report.records.len();
            if done % 10 == 0 || done == target {
                info!("Benchmark progress: {done}/{target}");
            }
        }

        info!(
            "Benchmark finished: {} pairs measured, {} invalid pairs discarded",
            report.records.len(),
            report.invalid_pairs
        );
        report
    }
}
