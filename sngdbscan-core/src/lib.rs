//! SNG-DBSCAN core library.
//!
//! Approximate density-based clustering: each point is compared against a
//! random sample of the others instead of the whole dataset, the resulting
//! sampled-neighbourhood graph is split into components of dense ("core")
//! nodes, and the remaining nodes either attach to an adjacent cluster or
//! are labelled noise.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod border;
mod builder;
mod clustering_quality;
mod distance;
mod error;
mod extract;
mod graph;
mod linker;
mod points;
#[cfg(test)]
mod properties;
mod result;
mod sampling;
mod sng_dbscan;
#[cfg(test)]
mod test_utils;

pub use crate::{
    border::assign_border_nodes,
    builder::SngDbscanBuilder,
    clustering_quality::{
        ClusteringQualityError, ClusteringQualityScore, adjusted_rand_index,
        clustering_quality_score, normalized_mutual_information,
    },
    distance::{
        Cosine, Distance, Euclidean, Manhattan, Metric, cosine_distance, euclidean_distance,
        manhattan_distance,
    },
    error::{PointSetError, PointSetErrorCode, Result, SngDbscanError, SngDbscanErrorCode},
    extract::{Cluster, extract_clusters},
    graph::Graph,
    linker::{NeighbourLinker, build_graph},
    points::PointSet,
    result::{ClusteringResult, InvalidLabels, NOISE, assign_labels},
    sampling::{SamplingEngine, SamplingRate, SelfSampling},
    sng_dbscan::{SngDbscan, cluster},
};
