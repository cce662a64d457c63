//! Reference networks shared by the test modules.

use crate::graph::graph::{Graph, GraphBuilder};
use crate::graph::node::NodeId;
use rand::Rng;
use rand::rngs::StdRng;

/// Classic Braess network: A->B and C->D congest, A->C and B->D are fixed, B->C is a shortcut.
pub fn braess() -> Graph {
    let mut builder = GraphBuilder::new();
    for name in ["A", "B", "C", "D"] {
        builder.add_node(name);
    }
    builder.add_edge("A", "B", 1.0, 0.0).unwrap();
    builder.add_edge("A", "C", 0.0, 50.0).unwrap();
    builder.add_edge("B", "D", 0.0, 50.0).unwrap();
    builder.add_edge("C", "D", 1.0, 0.0).unwrap();
    builder.add_edge("B", "C", 0.0, 10.0).unwrap();
    builder.build()
}

/// Two parallel S->T routes: one congestible (`a * flow`), one with constant cost `b`.
pub fn parallel_links(a: f64, b: f64) -> Graph {
    let mut builder = GraphBuilder::new();
    builder.add_edge("S", "T", a, 0.0).unwrap();
    builder.add_edge("S", "M", 0.0, b).unwrap();
    builder.add_edge("M", "T", 0.0, 0.0).unwrap();
    builder.build()
}

fn coefficients(rng: &mut StdRng) -> (f64, f64) {
    (rng.gen_range(0..3) as f64, rng.gen_range(0..20) as f64)
}

/// Random layered network from `S` to `T` with a few in-layer links, some of them forming cycles.
pub fn random_layered(rng: &mut StdRng, layers: usize, width: usize) -> (Graph, NodeId, NodeId) {
    let mut builder = GraphBuilder::new();
    let source = builder.add_node("S");
    let names = (0..layers)
        .map(|l| (0..width).map(|w| format!("L{}_{}", l, w)).collect::<Vec<String>>())
        .collect::<Vec<Vec<String>>>();
    names.iter().flatten().for_each(|n| {
        builder.add_node(n);
    });
    let sink = builder.add_node("T");

    for name in &names[0] {
        let (a, b) = coefficients(rng);
        builder.add_edge("S", name, a, b).unwrap();
    }
    for l in 0..layers.saturating_sub(1) {
        for from in &names[l] {
            let forced = rng.gen_range(0..width);
            for (j, to) in names[l + 1].iter().enumerate() {
                if j == forced || rng.gen_bool(0.4) {
                    let (a, b) = coefficients(rng);
                    builder.add_edge(from, to, a, b).unwrap();
                }
            }
        }
    }
    for layer in &names {
        for j in 0..width.saturating_sub(1) {
            if rng.gen_bool(0.2) {
                let (a, b) = coefficients(rng);
                builder.add_edge(&layer[j], &layer[j + 1], a, b).unwrap();
            }
            if rng.gen_bool(0.1) {
                let (a, b) = coefficients(rng);
                builder.add_edge(&layer[j + 1], &layer[j], a, b).unwrap();
            }
        }
    }
    for name in &names[layers - 1] {
        let (a, b) = coefficients(rng);
        builder.add_edge(name, "T", a, b).unwrap();
    }

    (builder.build(), source, sink)
}
