use petgraph::graph::NodeIndex;
use stepfree_core::bench::{
    Benchmark, BenchmarkConfig, DistanceCategory, PairSampler, TimingStats,
};
use stepfree_core::model::{EdgeTags, MobilityProfile, PoiCatalog};
use stepfree_core::routing::{Algorithm, HeuristicMode, astar, dijkstra};
use stepfree_core::{GraphBuilder, StreetEdge, StreetGraph, StreetNode, apply_profile};

const A: i64 = 1;
const B: i64 = 2;
const C: i64 = 3;
const D: i64 = 4;
const E: i64 = 5;

/// A - B - C - D along the equator, 10 m per edge, nodes ~5.5 m apart
fn line_builder() -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    for (i, id) in [A, B, C, D].into_iter().enumerate() {
        builder.add_node(StreetNode::new(id, 0.0, i as f64 * 0.00005));
    }
    builder
}

fn stairs() -> StreetEdge {
    StreetEdge::new(10.0).with_tags(EdgeTags {
        highway: Some("steps".to_string()),
        ..EdgeTags::default()
    })
}

fn idx(graph: &StreetGraph, id: i64) -> NodeIndex {
    graph.node_index(id).unwrap()
}

fn ids(graph: &StreetGraph, nodes: &[NodeIndex]) -> Vec<i64> {
    graph.path_ids(nodes)
}

#[test]
fn neutral_profile_on_a_line() {
    let mut builder = line_builder();
    for (u, v) in [(A, B), (B, C), (C, D)] {
        builder.add_way(u, v, StreetEdge::new(10.0)).unwrap();
    }
    let mut graph = builder.build();
    apply_profile(&mut graph, &MobilityProfile::neutral("flat")).unwrap();

    let uniform = dijkstra(&graph, idx(&graph, A), idx(&graph, D)).unwrap();
    assert_eq!(ids(&graph, uniform.nodes()), vec![A, B, C, D]);
    assert_eq!(uniform.cost(), Some(30.0));
    assert_eq!(uniform.explored, 4);

    for mode in [HeuristicMode::Physical, HeuristicMode::Admissible] {
        let guided = astar(&graph, idx(&graph, A), idx(&graph, D), mode).unwrap();
        assert_eq!(ids(&graph, guided.nodes()), vec![A, B, C, D]);
        assert_eq!(guided.cost(), Some(30.0));
        assert!(guided.explored <= 4);
    }
}

#[test]
fn stairs_penalty_reroutes_over_the_detour() {
    let mut builder = line_builder();
    builder.add_node(StreetNode::new(E, 0.00005, 0.000075));
    builder.add_way(A, B, StreetEdge::new(10.0)).unwrap();
    builder.add_way(B, C, stairs()).unwrap();
    builder.add_way(C, D, StreetEdge::new(10.0)).unwrap();
    builder.add_way(B, E, StreetEdge::new(15.0)).unwrap();
    builder.add_way(E, C, StreetEdge::new(15.0)).unwrap();
    let mut graph = builder.build();

    // Physically the stairs are the shorter way
    let before = dijkstra(&graph, idx(&graph, A), idx(&graph, D)).unwrap();
    assert_eq!(ids(&graph, before.nodes()), vec![A, B, C, D]);
    assert_eq!(before.cost(), Some(30.0));

    let mut profile = MobilityProfile::neutral("stairs-averse");
    profile.stairs_penalty = 5.0;
    apply_profile(&mut graph, &profile).unwrap();

    let stairs_cost = graph
        .edges_between(idx(&graph, B), idx(&graph, C))
        .map(|e| e.weight().cost())
        .next()
        .unwrap();
    assert_eq!(stairs_cost, 50.0);

    for algorithm in Algorithm::ALL {
        let after = algorithm
            .run(&graph, idx(&graph, A), idx(&graph, D), HeuristicMode::Admissible)
            .unwrap();
        assert_eq!(ids(&graph, after.nodes()), vec![A, B, E, C, D], "{algorithm}");
        assert_eq!(after.cost(), Some(50.0), "{algorithm}");
    }
}

#[test]
fn admissible_astar_never_explores_more_than_dijkstra() {
    // 6 x 6 grid, 0.0001 degrees (~11 m) apart, 12 m edges
    let mut builder = GraphBuilder::new();
    let id = |row: i64, col: i64| row * 6 + col;
    for row in 0..6 {
        for col in 0..6 {
            builder.add_node(StreetNode::new(id(row, col), row as f64 * 0.0001, col as f64 * 0.0001));
        }
    }
    for row in 0..6 {
        for col in 0..6 {
            if col + 1 < 6 {
                builder.add_way(id(row, col), id(row, col + 1), StreetEdge::new(12.0)).unwrap();
            }
            if row + 1 < 6 {
                builder.add_way(id(row, col), id(row + 1, col), StreetEdge::new(12.0)).unwrap();
            }
        }
    }
    let mut graph = builder.build();
    apply_profile(&mut graph, &MobilityProfile::wheelchair()).unwrap();

    let (from, to) = (idx(&graph, id(0, 0)), idx(&graph, id(5, 3)));
    let uniform = dijkstra(&graph, from, to).unwrap();
    let guided = astar(&graph, from, to, HeuristicMode::Admissible).unwrap();

    let (u, g) = (uniform.cost().unwrap(), guided.cost().unwrap());
    assert!((u - g).abs() < 1e-9, "{u} vs {g}");
    assert!(guided.explored <= uniform.explored);
    assert!(guided.explored >= guided.nodes().len());
}

#[test]
fn cross_component_pairs_are_never_accepted() {
    let mut builder = GraphBuilder::new();
    builder.add_node(StreetNode::new(10, 0.0, 0.0));
    builder.add_node(StreetNode::new(11, 0.0, 0.002));
    builder.add_node(StreetNode::new(20, 0.05, 0.0));
    builder.add_node(StreetNode::new(21, 0.05, 0.002));
    builder.add_way(10, 11, StreetEdge::new(225.0)).unwrap();
    builder.add_way(20, 21, StreetEdge::new(225.0)).unwrap();
    let graph = builder.build();

    let mut pois = PoiCatalog::new();
    pois.insert("west-1", 0.0, 0.0, None);
    pois.insert("west-2", 0.0, 0.002, None);
    pois.insert("east-1", 0.05, 0.0, None);
    pois.insert("east-2", 0.05, 0.002, None);

    let config = BenchmarkConfig {
        pairs: 20,
        repetitions: 2,
        warmup: 1,
        ..BenchmarkConfig::default()
    };
    let report = Benchmark::new(&graph, &pois, config).unwrap().run();

    assert_eq!(report.records.len(), 20);
    assert!(report.invalid_pairs > 0);
    assert_eq!(report.invalid_pairs, report.disconnected_pairs);
    for record in &report.records {
        let side = |name: &str| name.split('-').next().unwrap_or_default().to_string();
        assert_eq!(side(&record.origin), side(&record.destination));
        assert_eq!(record.category, DistanceCategory::Medium);
    }
}

#[test]
fn same_seed_reproduces_the_pair_sequence() {
    let pois: PoiCatalog = (0..8)
        .map(|i| (format!("poi-{i}"), 0.0, f64::from(i) * 0.0005))
        .collect();
    let draw = |seed| {
        let mut sampler = PairSampler::new(seed);
        (0..30)
            .map(|_| {
                let (a, b) = sampler.draw(&pois).unwrap();
                (a.name.clone(), b.name.clone())
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(42), draw(42));
}

#[test]
fn category_boundaries() {
    assert_eq!(DistanceCategory::from_meters(200.0), DistanceCategory::Medium);
    assert_eq!(DistanceCategory::from_meters(500.0), DistanceCategory::Long);
    assert_eq!(DistanceCategory::from_meters(199.99), DistanceCategory::Short);
}

#[test]
fn percentiles_of_small_and_constant_samples() {
    assert_eq!(TimingStats::from_samples(&[2.5; 20]).p95_ms, 2.5);
    assert_eq!(TimingStats::from_samples(&[1.0, 9.0, 3.0]).p95_ms, 9.0);
}
