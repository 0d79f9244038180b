use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use geo::Point;
use stepfree_core::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod export;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "stepfree")]
#[command(about = "Accessibility-aware pedestrian routing and Dijkstra/A* benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one route between two coordinates
    Route {
        /// Street graph JSON document
        #[arg(long)]
        graph: PathBuf,

        /// Origin as `lat,lon`
        #[arg(long, value_parser = parse_coordinate)]
        from: Point<f64>,

        /// Destination as `lat,lon`
        #[arg(long, value_parser = parse_coordinate)]
        to: Point<f64>,

        /// Mobility profile applied before routing
        #[arg(long)]
        profile: Option<String>,

        /// Search algorithm (dijkstra, astar)
        #[arg(long, default_value = "dijkstra")]
        algorithm: Algorithm,

        /// Heuristic scaling for A* (physical, admissible)
        #[arg(long, default_value = "admissible")]
        heuristic: HeuristicMode,

        /// TOML file with extra profiles
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare Dijkstra and A* over random pairs of points of interest
    Bench {
        /// Street graph JSON document
        #[arg(long)]
        graph: PathBuf,

        /// Points of interest CSV (name,lat,lon,category)
        #[arg(long)]
        pois: PathBuf,

        /// TOML file with `[benchmark]` settings and extra profiles
        #[arg(long)]
        config: Option<PathBuf>,

        /// Mobility profile applied before the run
        #[arg(long, default_value = "standard")]
        profile: String,

        /// Number of accepted pairs
        #[arg(long)]
        pairs: Option<usize>,

        /// Timed repetitions per algorithm and pair
        #[arg(long)]
        repetitions: Option<usize>,

        /// Discarded warm-up runs per algorithm and pair
        #[arg(long)]
        warmup: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Heuristic scaling for A* (physical, admissible)
        #[arg(long)]
        heuristic: Option<HeuristicMode>,

        /// Output directory for the CSV and JSON exports
        #[arg(long, default_value = "benchmark_results")]
        out: PathBuf,
    },

    /// List the available mobility profiles
    Profiles {
        /// TOML file with extra profiles
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parses `lat,lon` into a point (x = lon, y = lat)
fn parse_coordinate(s: &str) -> Result<Point<f64>, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon', got '{s}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("invalid latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("invalid longitude: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinate out of range: {lat},{lon}"));
    }
    Ok(Point::new(lon, lat))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route {
            graph,
            from,
            to,
            profile,
            algorithm,
            heuristic,
            config,
        } => {
            let app = AppConfig::load(config.as_deref())?;
            let mut graph = load_graph(&graph)?;
            if let Some(name) = profile {
                let catalog = app.catalog()?;
                apply_profile(&mut graph, catalog.get(&name)?)?;
            }
            run_route(&graph, from, to, algorithm, heuristic)
        }
        Commands::Bench {
            graph,
            pois,
            config,
            profile,
            pairs,
            repetitions,
            warmup,
            seed,
            heuristic,
            out,
        } => {
            let app = AppConfig::load(config.as_deref())?;
            let mut settings = app.benchmark.clone();
            if let Some(pairs) = pairs {
                settings.pairs = pairs;
            }
            if let Some(repetitions) = repetitions {
                settings.repetitions = repetitions;
            }
            if let Some(warmup) = warmup {
                settings.warmup = warmup;
            }
            if let Some(seed) = seed {
                settings.seed = seed;
            }
            if let Some(heuristic) = heuristic {
                settings.heuristic = heuristic;
            }

            let catalog = app.catalog()?;
            let mut graph = load_graph(&graph)?;
            let pois = load_pois_csv(&pois)
                .with_context(|| format!("Failed to load points of interest from {}", pois.display()))?;
            apply_profile(&mut graph, catalog.get(&profile)?)?;

            run_bench(&graph, &pois, settings, &out)
        }
        Commands::Profiles { config } => {
            let app = AppConfig::load(config.as_deref())?;
            for profile in app.catalog()?.iter() {
                println!(
                    "{:<20} no_ramp={:<6} stairs={:<6} incline={:<6} no_crossing={:<6} requires_accessibility={} prefers_marked_crossings={}",
                    profile.name,
                    profile.no_ramp_penalty,
                    profile.stairs_penalty,
                    profile.incline_penalty,
                    profile.no_crossing_penalty,
                    profile.requires_accessibility,
                    profile.prefers_marked_crossings
                );
            }
            Ok(())
        }
    }
}

fn load_graph(path: &Path) -> Result<StreetGraph> {
    let graph = load_graph_json(path)
        .with_context(|| format!("Failed to load street graph from {}", path.display()))?;
    if graph.is_empty() {
        bail!("Street graph {} has no nodes", path.display());
    }
    Ok(graph)
}

fn run_route(
    graph: &StreetGraph,
    from: Point<f64>,
    to: Point<f64>,
    algorithm: Algorithm,
    heuristic: HeuristicMode,
) -> Result<()> {
    let Some(route) = route_between(graph, from, to, algorithm, heuristic)? else {
        bail!(
            "No path from ({}, {}) to ({}, {})",
            from.y(),
            from.x(),
            to.y(),
            to.x()
        );
    };

    println!("algorithm: {algorithm}");
    println!("cost: {:.2}", route.cost);
    println!("nodes: {}", route.nodes.len());
    println!("explored: {}", route.explored);
    for (lat, lon) in &route.points {
        println!("{lat},{lon}");
    }
    Ok(())
}

fn run_bench(
    graph: &StreetGraph,
    pois: &PoiCatalog,
    settings: BenchmarkConfig,
    out: &Path,
) -> Result<()> {
    let report = Benchmark::new(graph, pois, settings)?.run();

    if report.exhausted {
        tracing::warn!(
            "Stopped after {} invalid pairs with {} of {} pairs measured",
            report.invalid_pairs,
            report.records.len(),
            report.config.pairs
        );
    }

    let paths = export::write_all(&report, out)?;
    info!("CSV exported: {}", paths.csv.display());
    info!("JSON exported: {}", paths.json.display());

    match report.summary() {
        Some(summary) => println!("{summary}"),
        None => println!("No results to report"),
    }
    println!("Invalid pairs discarded: {}", report.invalid_pairs);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_lat_lon() {
        let point = parse_coordinate("-22.81, -47.06").unwrap();
        assert_eq!(point.y(), -22.81);
        assert_eq!(point.x(), -47.06);
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        assert!(parse_coordinate("12.5").is_err());
        assert!(parse_coordinate("north,south").is_err());
        assert!(parse_coordinate("95.0,10.0").is_err());
    }

    #[test]
    fn cli_parses_bench_overrides() {
        let cli = Cli::try_parse_from([
            "stepfree", "bench", "--graph", "g.json", "--pois", "p.csv", "--pairs", "5",
            "--heuristic", "physical",
        ])
        .unwrap();
        match cli.command {
            Commands::Bench {
                pairs,
                heuristic,
                profile,
                ..
            } => {
                assert_eq!(pairs, Some(5));
                assert_eq!(heuristic, Some(HeuristicMode::Physical));
                assert_eq!(profile, "standard");
            }
            _ => panic!("expected bench command"),
        }
    }
}
