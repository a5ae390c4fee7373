//! Tests for the `SngDbscan` clustering API.

mod common;

use common::{jittered_blobs, two_triangles};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use sngdbscan_core::{
    ClusteringResult, Cosine, Manhattan, NOISE, PointSet, SamplingRate, SelfSampling,
    SngDbscanBuilder, adjusted_rand_index, cluster,
};
use sngdbscan_test_support::tracing::RecordingLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn points(rows: Vec<Vec<f32>>) -> PointSet {
    PointSet::try_from_rows(rows).expect("rows are uniform")
}

fn labels_as_sets(result: &ClusteringResult) -> Vec<Vec<usize>> {
    (0..result.cluster_count())
        .map(|cluster| {
            result
                .labels()
                .iter()
                .enumerate()
                .filter(|&(_, &label)| usize::try_from(label).is_ok_and(|label| label == cluster))
                .map(|(index, _)| index)
                .collect()
        })
        .collect()
}

#[rstest]
#[case::exclude(SelfSampling::Exclude, 0)]
#[case::exclude_other_seed(SelfSampling::Exclude, 99)]
#[case::discard(SelfSampling::DiscardSelfEdges, 0)]
#[case::discard_other_seed(SelfSampling::DiscardSelfEdges, 12_345)]
fn full_sampling_separates_two_triangles(#[case] policy: SelfSampling, #[case] seed: u64) {
    let engine = SngDbscanBuilder::new()
        .with_sampling_rate(1.0)
        .with_max_distance(1.5)
        .with_min_points(2)
        .with_self_sampling(policy)
        .build()
        .expect("configuration is valid");
    let result = engine
        .fit_predict_seeded(&points(two_triangles()), seed)
        .expect("clustering succeeds");

    assert_eq!(result.cluster_count(), 2);
    assert_eq!(result.noise_count(), 0);
    assert_eq!(labels_as_sets(&result), vec![vec![0, 1, 2], vec![3, 4, 5]]);
}

#[rstest]
#[case(1.0)]
#[case(0.5)]
#[case(0.1)]
fn isolated_points_are_always_noise(#[case] rate: f64) {
    let mut rows = two_triangles();
    rows.push(vec![500.0, -500.0]);
    let engine = SngDbscanBuilder::new()
        .with_sampling_rate(rate)
        .with_max_distance(1.5)
        .with_min_points(1)
        .build()
        .expect("configuration is valid");
    let points = points(rows);
    for seed in 0..16 {
        let result = engine
            .fit_predict_seeded(&points, seed)
            .expect("clustering succeeds");
        assert_eq!(result.labels()[6], NOISE);
    }
}

#[rstest]
fn vanishing_sampling_rate_leaves_only_noise() {
    let engine = SngDbscanBuilder::new()
        .with_sampling_rate(1e-12)
        .with_max_distance(100.0)
        .with_min_points(1)
        .build()
        .expect("configuration is valid");
    let result = engine
        .fit_predict_seeded(&points(two_triangles()), 4)
        .expect("clustering succeeds");
    assert_eq!(result.labels(), &[NOISE; 6]);
    assert_eq!(result.cluster_count(), 0);
    assert_eq!(result.noise_count(), 6);
    assert!(result.core_indices().is_empty());
}

#[rstest]
fn empty_and_singleton_inputs() {
    let engine = SngDbscanBuilder::new()
        .with_min_points(1)
        .build()
        .expect("configuration is valid");
    let empty = engine
        .fit_predict_seeded(&PointSet::empty(), 0)
        .expect("empty input succeeds");
    assert!(empty.labels().is_empty());

    let single = engine
        .fit_predict_seeded(&points(vec![vec![1.0, 2.0, 3.0]]), 0)
        .expect("singleton succeeds");
    assert_eq!(single.labels(), &[NOISE]);
}

#[rstest]
#[case(SamplingRate::Fixed(0.3))]
#[case(SamplingRate::Logarithmic { factor: 20.0 })]
fn identical_seeds_give_identical_results(#[case] rate: SamplingRate) {
    let (rows, _) = jittered_blobs(&[[0.0, 0.0], [5.0, 5.0], [0.0, 9.0]], 60, 1.0, 8);
    let points = points(rows);
    let engine = SngDbscanBuilder::new()
        .with_sampling(rate)
        .with_max_distance(0.6)
        .with_min_points(3)
        .build()
        .expect("configuration is valid");

    let first = engine.fit_predict_seeded(&points, 21).expect("run succeeds");
    let second = engine
        .fit_predict(&points, &mut SmallRng::seed_from_u64(21))
        .expect("run succeeds");
    assert_eq!(first, second);
}

#[rstest]
fn logarithmic_sampling_recovers_separated_blobs() {
    let (rows, truth) = jittered_blobs(&[[0.0, 0.0], [20.0, 0.0], [0.0, 20.0]], 200, 2.0, 3);
    let engine = SngDbscanBuilder::new()
        .with_log_sampling_factor(20.0)
        .with_max_distance(1.5)
        .with_min_points(4)
        .build()
        .expect("configuration is valid");
    let result = engine
        .fit_predict_seeded(&points(rows), 5)
        .expect("clustering succeeds");
    assert_eq!(result.cluster_count(), 3);
    let ari = adjusted_rand_index(&truth, result.labels()).expect("lengths match");
    assert!(ari > 0.95, "ari {ari} is too low");
}

#[rstest]
fn alternative_metrics_plug_in() {
    let engine = SngDbscanBuilder::new()
        .with_max_distance(2.0)
        .with_min_points(2)
        .with_distance(Manhattan)
        .build()
        .expect("configuration is valid");
    let result = engine
        .fit_predict_seeded(&points(two_triangles()), 0)
        .expect("clustering succeeds");
    assert_eq!(labels_as_sets(&result), vec![vec![0, 1, 2], vec![3, 4, 5]]);

    // Directions: two along x, two along y, one diagonal in between.
    let rows = vec![
        vec![1.0, 0.0],
        vec![3.0, 0.01],
        vec![0.0, 1.0],
        vec![0.01, 4.0],
        vec![1.0, 1.0],
    ];
    let mut rng = SmallRng::seed_from_u64(0);
    let labels = cluster(&rows, 1.0, 0.01, 1, Some(&Cosine), &mut rng).expect("valid input");
    assert_eq!(labels, vec![0, 0, 1, 1, NOISE]);
}

#[rstest]
fn fit_records_pipeline_spans() {
    let engine = SngDbscanBuilder::new()
        .with_max_distance(1.5)
        .with_min_points(2)
        .build()
        .expect("configuration is valid");
    let points = points(two_triangles());

    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, || {
        engine.fit_predict_seeded(&points, 1)
    })
    .expect("clustering succeeds");
    assert_eq!(result.cluster_count(), 2);

    let fit = layer.span_named("core.fit").expect("core.fit span must exist");
    assert_eq!(fit.field("items"), Some("6"));
    assert_eq!(fit.field("dimension"), Some("2"));
    assert_eq!(fit.field("distance"), Some("euclidean"));
    assert_eq!(fit.field("min_points"), Some("2"));
    assert_eq!(fit.field("sampling_rate"), Some("1"));
    assert_eq!(fit.field("sample_size"), Some("5"));

    let build = layer
        .span_named("core.build_graph")
        .expect("core.build_graph span must exist");
    assert_eq!(build.field("policy"), Some("exclude"));
    assert!(layer.span_named("core.extract_clusters").is_some());
    assert!(layer.span_named("core.assign_border").is_some());

    let completed = layer.events_with_message("clustering completed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].level, Level::INFO);
    assert_eq!(completed[0].field("clusters"), Some("2"));
    assert_eq!(completed[0].field("noise"), Some("0"));
    assert_eq!(completed[0].field("edges"), Some("6"));
}

#[rstest]
fn cluster_returns_plain_labels() {
    let mut rng = SmallRng::seed_from_u64(17);
    let labels = cluster(&two_triangles(), 1.0, 1.5, 2, None, &mut rng).expect("valid input");
    assert_eq!(labels.len(), 6);
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[3], labels[5]);
    assert_ne!(labels[0], labels[3]);
    assert!(cluster(&[], 1.0, 1.5, 2, None, &mut rng)
        .expect("empty input succeeds")
        .is_empty());
}
