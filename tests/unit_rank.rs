// tests/unit_rank.rs
use fdlgraph_core::error::RankError;
use fdlgraph_core::graph::{Graph, GraphType};
use fdlgraph_core::rank::{self, PageRankParams, RankingAlgorithm};

fn star(graph_type: GraphType) -> Graph {
    Graph::from_edges(graph_type, 5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap()
}

#[test]
fn test_neighbourhood_equals_degree() {
    let g = star(GraphType::Undirected);
    let ranks = rank::rank(&g, RankingAlgorithm::Neighbourhood, PageRankParams::default()).unwrap();
    assert_eq!(ranks, vec![4.0, 1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_pagerank_sums_to_one() {
    let g = star(GraphType::Undirected);
    let ranks =
        rank::rank(&g, RankingAlgorithm::PageRankUndirected, PageRankParams::default()).unwrap();
    let total: f64 = ranks.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(ranks[0] > ranks[1]);
}

#[test]
fn test_pagerank_uniform_on_cycle() {
    let g = Graph::from_edges(GraphType::Directed, 4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    let ranks =
        rank::rank(&g, RankingAlgorithm::PageRankDirected, PageRankParams::default()).unwrap();
    for r in ranks {
        assert!((r - 0.25).abs() < 1e-9);
    }
}

#[test]
fn test_pagerank_variant_must_match_graph_type() {
    let g = star(GraphType::Undirected);
    let err = rank::rank(&g, RankingAlgorithm::PageRankDirected, PageRankParams::default());
    assert!(matches!(err, Err(RankError::GraphTypeMismatch { .. })));
}

#[test]
fn test_eigenvector_is_an_error_not_zeros() {
    let g = star(GraphType::Undirected);
    let err = rank::rank(
        &g,
        RankingAlgorithm::EigenvectorCentrality,
        PageRankParams::default(),
    );
    assert!(matches!(err, Err(RankError::NotImplemented(_))));
}

#[test]
fn test_ranked_vertices_orders_by_score() {
    let ranked = rank::ranked_vertices(&[1.0, 3.0, 3.0, 0.5]);
    let order: Vec<usize> = ranked.iter().map(|&(v, _)| v).collect();
    assert_eq!(order, vec![1, 2, 0, 3]);
}

#[test]
fn test_unknown_algorithm_name() {
    let err = "closeness".parse::<RankingAlgorithm>();
    assert!(matches!(err, Err(RankError::UnknownAlgorithm(_))));
}
