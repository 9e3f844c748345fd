use std::collections::BTreeMap;

use cleave::{GirvanNewman, PartitionSummary, RecursiveBisection, SplitMethod};
use petgraph::graph::UnGraph;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=cleave=debug shows tree growth; =trace shows every candidate.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Two 4-cliques joined by the edge 3-4, plus a pendant vertex 8 on 7.
    let mut edges = Vec::new();
    for offset in [0u32, 4] {
        for i in 0..4 {
            for j in (i + 1)..4 {
                edges.push((offset + i, offset + j));
            }
        }
    }
    edges.push((3, 4));
    edges.push((7, 8));
    let graph = UnGraph::<(), ()>::from_edges(&edges);

    println!(
        "n_nodes={} n_edges={}",
        graph.node_count(),
        graph.edge_count()
    );

    for method in [SplitMethod::Spectral, SplitMethod::Modularity] {
        let report = match RecursiveBisection::new(method, 3).detect_with_report(&graph) {
            Ok(report) => report,
            Err(err) => {
                println!("{method}: {err}");
                continue;
            }
        };
        println!(
            "{method}: depth={} candidates={} merged={:?}",
            report.depth, report.candidates_evaluated, report.merged
        );
        print!("{}", PartitionSummary::new(&graph, &report.assignment)?);
        print_groups(&report.assignment);
    }

    let removal = GirvanNewman::new(2).partition_with_history(&graph)?;
    for (round, removed) in removal.rounds.iter().enumerate() {
        println!("girvan-newman round {round}: removed {removed:?}");
    }
    print!("{}", PartitionSummary::new(&graph, &removal.assignment)?);
    print_groups(&removal.assignment);

    Ok(())
}

fn print_groups(labels: &[usize]) {
    let mut by_comm: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &comm) in labels.iter().enumerate() {
        by_comm.entry(comm).or_default().push(idx);
    }
    for (cid, ids) in by_comm {
        println!("  community {cid}: {ids:?}");
    }
}
