use cleave::community::{collect_assignment, community_count, CombinationSelector, ModularityScorer};
use cleave::{
    betweenness_partition, cluster, modularity, CommunityDetection, Error, GirvanNewman,
    HealthCheck, PartitionSummary, PartitionTree, RecursiveBisection, SplitMethod,
};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use proptest::prelude::*;

fn assert_contiguous(labels: &[usize], n: usize) {
    assert_eq!(labels.len(), n);
    let count = community_count(labels);
    let mut seen = vec![false; count];
    for &c in labels {
        seen[c] = true;
    }
    assert!(seen.iter().all(|&s| s), "ids not contiguous: {labels:?}");
}

fn two_cliques() -> UnGraph<(), ()> {
    let mut edges = Vec::new();
    for offset in [0u32, 4] {
        for i in 0..4 {
            for j in (i + 1)..4 {
                edges.push((offset + i, offset + j));
            }
        }
    }
    UnGraph::<(), ()>::from_edges(&edges)
}

fn path(n: u32) -> UnGraph<(), ()> {
    let edges: Vec<(u32, u32)> = (1..n).map(|i| (i - 1, i)).collect();
    UnGraph::<(), ()>::from_edges(&edges)
}

fn graph_from(n: usize, edges: &[(usize, usize)]) -> UnGraph<(), ()> {
    let mut graph = UnGraph::<(), ()>::with_capacity(n, edges.len());
    let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
    for &(a, b) in edges {
        graph.add_edge(nodes[a], nodes[b], ());
    }
    graph
}

fn small_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..(3 * n)),
        )
    })
}

#[test]
fn disconnected_cliques_split_spectrally() {
    let graph = two_cliques();
    let labels = cluster(&graph, "spectral", 2).unwrap();
    assert_contiguous(&labels, 8);
    assert!(labels[..4].iter().all(|&c| c == labels[0]));
    assert!(labels[4..].iter().all(|&c| c == labels[4]));
    assert_ne!(labels[0], labels[4]);
    assert!(modularity(&graph, &labels) > 0.3);
}

#[test]
fn disconnected_triangles_split_spectrally() {
    let mut edges = Vec::new();
    for base in [0u32, 3, 6, 9] {
        edges.extend([(base, base + 1), (base + 1, base + 2), (base, base + 2)]);
    }
    let graph = UnGraph::<(), ()>::from_edges(&edges);

    let labels = cluster(&graph, "spectral", 3).unwrap();
    assert_contiguous(&labels, 12);
    assert_eq!(community_count(&labels), 3, "{labels:?}");
    for base in (0..12).step_by(3) {
        assert!(labels[base..base + 3].iter().all(|&c| c == labels[base]));
    }

    let report = RecursiveBisection::new(SplitMethod::Spectral, 4)
        .detect_with_report(&graph)
        .unwrap();
    assert!(report.degenerate_splits.is_empty());
    assert_eq!(report.communities, 4);
}

#[test]
fn path_of_five_into_three() {
    let graph = path(5);
    let report = RecursiveBisection::new(SplitMethod::Spectral, 3)
        .detect_with_report(&graph)
        .unwrap();
    assert_eq!(report.depth, 2);
    assert_eq!(report.communities, 3);
    assert_contiguous(&report.assignment, 5);
}

#[test]
fn barbell_bridge_goes_first() {
    let graph = UnGraph::<(), ()>::from_edges(&[
        (0, 1),
        (1, 2),
        (0, 2),
        (3, 4),
        (4, 5),
        (3, 5),
        (2, 3),
    ]);
    let removal = GirvanNewman::new(2).partition_with_history(&graph).unwrap();
    assert_eq!(removal.removed_edges().collect::<Vec<_>>(), vec![(2, 3)]);
    assert_eq!(removal.assignment, vec![0, 0, 0, 1, 1, 1]);

    let summary = PartitionSummary::new(&graph, &removal.assignment).unwrap();
    assert_eq!(summary.sizes, vec![3, 3]);
    assert_eq!(summary.cut_edges, 1);
}

#[test]
fn unknown_method_is_rejected_before_any_work() {
    let graph = UnGraph::<(), ()>::new_undirected();
    assert_eq!(
        cluster(&graph, "louvain", 2),
        Err(Error::UnknownMethod("louvain".into()))
    );
}

#[test]
fn one_community_per_vertex_terminates() {
    let graph = path(6);
    let labels = cluster(&graph, "spectral", 6).unwrap();
    assert_contiguous(&labels, 6);
    assert_eq!(community_count(&labels), 6);
}

#[test]
fn power_of_two_targets_fill_every_leaf() {
    let graph = path(8);
    for k in [1, 2, 4, 8] {
        let report = RecursiveBisection::new(SplitMethod::Spectral, k)
            .detect_with_report(&graph)
            .unwrap();
        assert!(report.degenerate_splits.is_empty());
        assert_eq!(report.communities, k);
        assert_eq!(report.candidates_evaluated, 1);
    }
}

#[test]
fn tree_is_healthy_and_selection_dominates() {
    let graph = path(12);
    let tree = PartitionTree::grow(&graph, &cleave::community::SpectralSplit, 3).unwrap();
    let health = tree.health_check();
    assert!(health.is_healthy(), "{health}");

    let scorer = ModularityScorer::from_graph(&graph);
    let parents = tree.vertex_sets(2);
    let children = tree.vertex_sets(3);
    let selection = CombinationSelector::new(&scorer)
        .select(&parents, &children, 6)
        .unwrap();
    let best = RecursiveBisection::new(SplitMethod::Spectral, 6)
        .detect_with_report(&graph)
        .unwrap();
    assert_eq!(best.assignment, selection.assignment);

    // Any two parents kept whole, the other two split.
    for a in 0..4 {
        for b in (a + 1)..4 {
            let mut subsets = Vec::new();
            for (i, parent) in parents.iter().enumerate() {
                if i == a || i == b {
                    subsets.push(parent.clone());
                } else {
                    subsets.push(children[2 * i].clone());
                    subsets.push(children[2 * i + 1].clone());
                }
            }
            let q = scorer.score(&collect_assignment(12, &subsets));
            assert!(best.modularity >= q - 1e-12, "merged {a},{b}");
        }
    }
}

proptest! {
    #[test]
    fn spectral_assignments_are_contiguous(
        (n, edges) in small_graph(),
        k_seed in 0usize..64,
    ) {
        let graph = graph_from(n, &edges);
        let k = 1 + k_seed % n;
        let detector = RecursiveBisection::new(SplitMethod::Spectral, k);
        let report = detector.detect_with_report(&graph).unwrap();
        assert_contiguous(&report.assignment, n);
        prop_assert!(report.communities <= k);

        // Only single vertices are left unsplit.
        for split in &report.degenerate_splits {
            prop_assert!(split.size < 2, "{}", split);
        }

        if k.is_power_of_two() {
            let tree = detector.build_tree(&graph).unwrap();
            let empty = tree.leaves().iter().filter(|leaf| leaf.subgraph.is_empty()).count();
            prop_assert_eq!(report.communities, k - empty);
        }

        let again = detector.detect(&graph).unwrap();
        prop_assert_eq!(report.assignment, again);
    }

    #[test]
    fn modularity_assignments_are_contiguous_or_too_small(
        (n, edges) in small_graph(),
        k_seed in 0usize..64,
    ) {
        let graph = graph_from(n, &edges);
        let k = 1 + k_seed % n;
        match cluster(&graph, "modularity", k) {
            Ok(labels) => {
                assert_contiguous(&labels, n);
                prop_assert!(community_count(&labels) <= k);
            }
            Err(Error::InsufficientVertices { required, found }) => {
                prop_assert_eq!(required, 3);
                prop_assert_eq!(found, 2);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn betweenness_partition_reaches_target(
        (n, edges) in small_graph(),
        k_seed in 0usize..64,
    ) {
        let graph = graph_from(n, &edges);
        let k = 1 + k_seed % n;
        let removal = GirvanNewman::new(k).partition_with_history(&graph).unwrap();
        assert_contiguous(&removal.assignment, n);
        prop_assert!(removal.components >= k);
        prop_assert_eq!(graph.edge_count(), edges.len());

        // Edges that survived join vertices of the same component.
        let removed: Vec<(usize, usize)> = removal.removed_edges().collect();
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if !removed.contains(&(a, b)) && !removed.contains(&(b, a)) {
                prop_assert_eq!(removal.assignment[a], removal.assignment[b]);
            }
        }

        prop_assert_eq!(betweenness_partition(&graph, k).unwrap(), removal.assignment);
    }
}
