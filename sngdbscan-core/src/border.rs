//! Border-node attachment.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{extract::Cluster, graph::Graph};

/// Attaches each unclustered node to one cluster it touches and returns the
/// nodes left as noise, in ascending order.
///
/// Membership is read from the clusters as they stood before this pass, so a
/// border node only attaches through a core neighbour and never through
/// another border node. When several clusters are adjacent one is chosen
/// uniformly at random from `rng`; with a single candidate no randomness is
/// consumed.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sngdbscan_core::{Graph, PointSet, assign_border_nodes, extract_clusters};
///
/// let points = PointSet::try_from_rows((0..5).map(|x| vec![x as f32]).collect())?;
/// let mut graph = Graph::new(&points);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.add_edge(0, 2);
/// graph.add_edge(2, 3);
/// let mut clusters = extract_clusters(&graph, 2);
/// let noise = assign_border_nodes(&graph, &mut clusters, &mut SmallRng::seed_from_u64(0));
/// assert_eq!(clusters[0].members(), &[0, 1, 2, 3]);
/// assert_eq!(noise, vec![4]);
/// # Ok::<(), sngdbscan_core::PointSetError>(())
/// ```
#[instrument(
    name = "core.assign_border",
    skip_all,
    fields(items = graph.len(), clusters = clusters.len()),
)]
pub fn assign_border_nodes<R: Rng + ?Sized>(
    graph: &Graph<'_>,
    clusters: &mut [Cluster],
    rng: &mut R,
) -> Vec<usize> {
    let membership = membership(graph.len(), clusters);
    let mut noise = Vec::new();
    let mut adjacent = Vec::new();
    let mut attached = 0_usize;

    for (node, owner) in membership.iter().enumerate() {
        if owner.is_some() {
            continue;
        }
        adjacent.clear();
        adjacent.extend(
            graph
                .neighbours(node)
                .iter()
                .filter_map(|&neighbour| membership[neighbour]),
        );
        adjacent.sort_unstable();
        adjacent.dedup();

        let chosen = match adjacent.as_slice() {
            [] => None,
            [only] => Some(*only),
            many => Some(many[rng.gen_range(0..many.len())]),
        };
        match chosen {
            Some(cluster) => {
                clusters[cluster].push(node);
                attached += 1;
            }
            None => noise.push(node),
        }
    }

    debug!(attached, noise = noise.len(), "border nodes assigned");
    noise
}

fn membership(items: usize, clusters: &[Cluster]) -> Vec<Option<usize>> {
    let mut owners = vec![None; items];
    for (cluster_id, cluster) in clusters.iter().enumerate() {
        for &member in cluster.members() {
            owners[member] = Some(cluster_id);
        }
    }
    owners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract::extract_clusters, points::PointSet};
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    fn points(count: usize) -> PointSet {
        PointSet::try_from_rows((0..count).map(|x| vec![x as f32]).collect())
            .expect("rows are uniform")
    }

    /// Two triangles {0,1,2} and {4,5,6} with node 3 touching both.
    fn bridged<'a>(points: &'a PointSet) -> Graph<'a> {
        let mut graph = Graph::new(points);
        for (left, right) in [(0, 1), (1, 2), (2, 0), (4, 5), (5, 6), (6, 4), (2, 3), (3, 4)] {
            graph.add_edge(left, right);
        }
        graph
    }

    #[rstest]
    fn ambiguous_border_nodes_join_exactly_one_cluster() {
        let points = points(7);
        let graph = bridged(&points);
        let mut clusters = extract_clusters(&graph, 3);
        assert_eq!(clusters.len(), 2);

        let noise = assign_border_nodes(&graph, &mut clusters, &mut SmallRng::seed_from_u64(5));
        assert!(noise.is_empty());
        let owners: Vec<bool> = clusters.iter().map(|c| c.members().contains(&3)).collect();
        assert_eq!(owners.iter().filter(|&&owned| owned).count(), 1);
    }

    #[rstest]
    fn tie_breaks_reach_both_clusters_across_seeds() {
        let points = points(7);
        let graph = bridged(&points);
        let mut winners = [false; 2];
        for seed in 0..64 {
            let mut clusters = extract_clusters(&graph, 3);
            assign_border_nodes(&graph, &mut clusters, &mut SmallRng::seed_from_u64(seed));
            for (index, cluster) in clusters.iter().enumerate() {
                if cluster.members().contains(&3) {
                    winners[index] = true;
                }
            }
        }
        assert_eq!(winners, [true, true]);
    }

    #[rstest]
    fn border_nodes_do_not_chain_through_each_other() {
        let points = points(6);
        let mut graph = Graph::new(&points);
        for (left, right) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)] {
            graph.add_edge(left, right);
        }
        // Only 2 is core; 3 attaches through it but 4 only touches 3.
        let mut clusters = extract_clusters(&graph, 3);
        assert_eq!(clusters.len(), 1);
        let noise = assign_border_nodes(&graph, &mut clusters, &mut SmallRng::seed_from_u64(0));
        assert_eq!(clusters[0].members(), &[2, 0, 1, 3]);
        assert_eq!(noise, vec![4, 5]);
    }
}
