// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Benchmark: exhaustive graph construction, Tarjan and attractor analysis
//! over the binary alphabet.
//!
//! Vertex count is `2^(L+1) - 1` for length bound `L`.
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};

use srs_dry_tests::{binary_alphabet, RuleSetBuilder};
use srs_graph::{AttractorAnalyzer, GraphBuilder, SccDecomposition, TransitionGraph};

fn mixed_engine() -> srs_core::Engine {
    RuleSetBuilder::binary()
        .rule("0|", "|0")
        .rule("00", "|")
        .rule("|", "0")
        .build()
}

fn build(max_length: usize) -> Option<TransitionGraph> {
    let engine = mixed_engine();
    GraphBuilder::new(&engine)
        .build_graph(&binary_alphabet(), max_length)
        .ok()
}

fn bench_build_graph(c: &mut Criterion) {
    let engine = mixed_engine();
    let alphabet = binary_alphabet();
    let mut group = c.benchmark_group("build_graph");
    for &len in &[4usize, 6, 8, 10] {
        group.throughput(Throughput::Elements((1u64 << (len + 1)) - 1));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| criterion::black_box(GraphBuilder::new(&engine).build_graph(&alphabet, len)));
        });
    }
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");
    for &len in &[6usize, 8, 10] {
        let Some(graph) = build(len) else {
            continue;
        };
        group.throughput(Throughput::Elements(graph.vertex_count() as u64));
        group.bench_with_input(BenchmarkId::new("tarjan", len), &graph, |b, g| {
            b.iter(|| criterion::black_box(SccDecomposition::compute(g)));
        });
        group.bench_with_input(BenchmarkId::new("classify", len), &graph, |b, g| {
            b.iter_batched(
                || SccDecomposition::compute(g),
                |scc| {
                    let analyzer = AttractorAnalyzer::with_decomposition(g, scc);
                    criterion::black_box(analyzer.classify_vertices());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_graph, bench_analysis);
criterion_main!(benches);
