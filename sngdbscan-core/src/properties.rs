//! Property tests over the full clustering pipeline.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    border::assign_border_nodes,
    distance::Euclidean,
    extract::extract_clusters,
    linker::{NeighbourLinker, build_graph},
    points::PointSet,
    result::{NOISE, assign_labels},
    sampling::{SamplingEngine, SelfSampling},
    test_utils::suite_proptest_config,
};

#[derive(Debug, Clone)]
struct Case {
    rows: Vec<Vec<f32>>,
    rate: f64,
    max_distance: f32,
    min_points: usize,
    policy: SelfSampling,
    seed: u64,
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (1_usize..=3, 0_usize..=40).prop_flat_map(|(dimension, items)| {
        (
            prop::collection::vec(
                prop::collection::vec(-10.0_f32..10.0, dimension),
                items,
            ),
            0.05_f64..=1.0,
            0.0_f32..6.0,
            1_usize..6,
            prop_oneof![
                Just(SelfSampling::Exclude),
                Just(SelfSampling::DiscardSelfEdges)
            ],
            any::<u64>(),
        )
            .prop_map(|(rows, rate, max_distance, min_points, policy, seed)| Case {
                rows,
                rate,
                max_distance,
                min_points,
                policy,
                seed,
            })
    })
}

struct Outcome {
    adjacency: Vec<Vec<usize>>,
    symmetric: bool,
    core: Vec<usize>,
    labels: Vec<i32>,
    noise: Vec<usize>,
}

fn run(case: &Case) -> Outcome {
    let points = PointSet::try_from_rows(case.rows.clone()).expect("rows are uniform");
    let sampler = SamplingEngine::new(case.rate).expect("rate is valid");
    let linker = NeighbourLinker::new(&Euclidean, case.max_distance);
    let mut rng = SmallRng::seed_from_u64(case.seed);
    let graph = build_graph(&points, &sampler, case.policy, &linker, &mut rng);
    let core = graph.core_nodes(case.min_points);
    let mut clusters = extract_clusters(&graph, case.min_points);
    let noise = assign_border_nodes(&graph, &mut clusters, &mut rng);
    Outcome {
        adjacency: (0..graph.len())
            .map(|node| graph.neighbours(node).to_vec())
            .collect(),
        symmetric: graph.is_symmetric(),
        core,
        labels: assign_labels(points.len(), &clusters),
        noise,
    }
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn graph_is_symmetric_without_self_edges(case in case_strategy()) {
        let outcome = run(&case);
        prop_assert!(outcome.symmetric);
        for (node, neighbours) in outcome.adjacency.iter().enumerate() {
            prop_assert!(!neighbours.contains(&node));
        }
    }

    #[test]
    fn labels_partition_every_index(case in case_strategy()) {
        let outcome = run(&case);
        prop_assert_eq!(outcome.labels.len(), case.rows.len());
        let noise: Vec<usize> = outcome
            .labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == NOISE)
            .map(|(index, _)| index)
            .collect();
        prop_assert_eq!(&noise, &outcome.noise);

        let clusters = outcome.labels.iter().copied().max().map_or(0, |max| max + 1);
        for label in 0..clusters {
            prop_assert!(outcome.labels.contains(&label), "label {} is unused", label);
        }
    }

    #[test]
    fn core_nodes_are_never_noise(case in case_strategy()) {
        let outcome = run(&case);
        for &node in &outcome.core {
            prop_assert_ne!(outcome.labels[node], NOISE);
        }
    }

    #[test]
    fn clustered_nodes_touch_a_core_node_of_their_cluster(case in case_strategy()) {
        let outcome = run(&case);
        for (node, &label) in outcome.labels.iter().enumerate() {
            if label == NOISE || outcome.core.binary_search(&node).is_ok() {
                continue;
            }
            let anchored = outcome.adjacency[node].iter().any(|&neighbour| {
                outcome.core.binary_search(&neighbour).is_ok()
                    && outcome.labels[neighbour] == label
            });
            prop_assert!(anchored, "border node {} has no core neighbour in {}", node, label);
        }
    }

    #[test]
    fn identical_seeds_reproduce_labels(case in case_strategy()) {
        let first = run(&case);
        let second = run(&case);
        prop_assert_eq!(first.adjacency, second.adjacency);
        prop_assert_eq!(first.labels, second.labels);
    }
}
