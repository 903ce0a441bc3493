//! 算法基准
//!
//! 固定种子的随机图上测量线性 / 多项式算法的耗时

use criterion::{criterion_group, criterion_main, Criterion};
use graphprobe::algorithm::{
    CriticalElementsFinder, EdmondsKarp, SpanningBuilder, StructureAnalyzer, TransitiveClosure,
};
use graphprobe::{Graph, GraphKind, SearchLimits, VertexId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn random_graph(kind: GraphKind, n: usize, m: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = (0..m).map(|_| {
        (
            format!("v{}", rng.gen_range(0..n)),
            format!("v{}", rng.gen_range(0..n)),
            rng.gen_range(1..100),
        )
    });
    Graph::from_edges(kind, edges)
}

fn bench_structure(c: &mut Criterion) {
    let graph = random_graph(GraphKind::Undirected, 2_000, 8_000, 1);

    c.bench_function("structure_connected_bipartite_cyclic", |b| {
        b.iter(|| {
            let analyzer = StructureAnalyzer::new(black_box(&graph));
            black_box((
                analyzer.is_connected(),
                analyzer.is_bipartite(),
                analyzer.is_cyclic(),
            ))
        });
    });
}

fn bench_critical_elements(c: &mut Criterion) {
    let graph = random_graph(GraphKind::Undirected, 5_000, 7_000, 2);

    c.bench_function("critical_elements_low_link", |b| {
        b.iter(|| black_box(CriticalElementsFinder::new(black_box(&graph)).find()));
    });
}

fn bench_spanning(c: &mut Criterion) {
    let graph = random_graph(GraphKind::Undirected, 2_000, 10_000, 3);

    c.bench_function("mst_kruskal", |b| {
        b.iter(|| black_box(SpanningBuilder::new(black_box(&graph)).minimum_spanning_tree()));
    });
}

fn bench_max_flow(c: &mut Criterion) {
    let graph = random_graph(GraphKind::Directed, 200, 1_500, 4);
    let sink = VertexId::from(graph.vertex_count() - 1);

    c.bench_function("max_flow_edmonds_karp", |b| {
        b.iter(|| {
            let flow = EdmondsKarp::new(black_box(&graph))
                .max_flow(VertexId::new(0), sink)
                .unwrap();
            black_box(flow.value)
        });
    });
}

fn bench_closure(c: &mut Criterion) {
    let graph = random_graph(GraphKind::Directed, 150, 400, 5);
    let limits = SearchLimits::unlimited();

    c.bench_function("transitive_closure_warshall", |b| {
        b.iter(|| black_box(TransitiveClosure::compute(black_box(&graph), &limits).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_structure,
    bench_critical_elements,
    bench_spanning,
    bench_max_flow,
    bench_closure
);
criterion_main!(benches);
