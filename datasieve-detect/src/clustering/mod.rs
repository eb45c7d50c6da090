//! Activation-clustering detector.
//!
//! Mislabeled samples keep the activation signature of their true class.
//! Each class's simulated activations are split into sub-clusters; a
//! sub-cluster whose centroid sits markedly closer to a *different*
//! class's activation centroid than to its own is flagged as misaligned
//! and its members become suspects.

pub mod dbscan;
pub mod kmeans;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use datasieve_core::config::{ClusterAlgorithm, ClusteringConfig};
use datasieve_core::dataset::Dataset;
use datasieve_core::errors::SieveResult;
use datasieve_core::models::{
    ClassDetail, DetectionMethod, DetectionResult, MethodFindings, MisalignedCluster,
};
use datasieve_core::stats;
use datasieve_core::traits::Detector;

pub struct ClusteringDetector {
    config: ClusteringConfig,
}

impl ClusteringDetector {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    /// Cluster every class's activations and flag label-misaligned
    /// sub-clusters.
    pub fn analyze(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.config.validate()?;
        info!(
            samples = dataset.n_samples(),
            classes = dataset.n_classes(),
            algorithm = ?self.config.algorithm,
            "starting activation clustering"
        );

        let activations = crate::activation::simulate(
            dataset.features(),
            self.config.seed,
            self.config.activation_dim,
        );
        let class_activation_centroids = activation_centroids(dataset, &activations);

        let mut suspected = BTreeSet::new();
        let mut confidences = BTreeMap::new();
        let mut class_details = BTreeMap::new();
        let mut misaligned_clusters = Vec::new();
        let mut total_clusters = 0usize;

        for class in 0..dataset.n_classes() {
            let members = dataset.class_members(class);
            if members.is_empty() {
                continue;
            }

            let class_activations: Vec<Vec<f64>> =
                members.iter().map(|&i| activations[i].clone()).collect();
            let clusters = self.split_class(&class_activations, class);
            total_clusters += clusters.len();

            let mut flagged = 0usize;
            for (cluster_id, cluster_members) in clusters {
                // Singletons are noise, never evidence of a poisoned
                // subpopulation.
                if cluster_members.len() < 2 {
                    continue;
                }

                let centroid = match stats::centroid_of(
                    cluster_members.iter().map(|&m| class_activations[m].as_slice()),
                ) {
                    Some(c) => c,
                    None => continue,
                };

                let d_own = match &class_activation_centroids[class] {
                    Some(own) => stats::euclidean(&centroid, own),
                    None => continue,
                };
                let nearest_other = class_activation_centroids
                    .iter()
                    .enumerate()
                    .filter(|(other, c)| *other != class && c.is_some())
                    .map(|(other, c)| {
                        (other, stats::euclidean(&centroid, c.as_deref().unwrap_or(&[])))
                    })
                    .min_by(|a, b| a.1.total_cmp(&b.1));

                let (nearest_class, d_other) = match nearest_other {
                    Some(pair) => pair,
                    None => continue,
                };

                if d_own > 0.0 && d_other < self.config.misalignment_margin * d_own {
                    let margin = (1.0 - d_other / d_own).clamp(0.0, 1.0);
                    let sample_indices: Vec<usize> =
                        cluster_members.iter().map(|&m| members[m]).collect();
                    for &index in &sample_indices {
                        suspected.insert(index);
                        let entry = confidences.entry(index).or_insert(0.0f64);
                        *entry = entry.max(margin);
                    }
                    flagged += sample_indices.len();
                    debug!(
                        class,
                        cluster = cluster_id,
                        size = sample_indices.len(),
                        nearest_class,
                        margin,
                        "misaligned cluster"
                    );
                    misaligned_clusters.push(MisalignedCluster {
                        class,
                        cluster: cluster_id,
                        size: sample_indices.len(),
                        nearest_class,
                        margin,
                        sample_indices,
                    });
                }
            }

            class_details.insert(
                class,
                ClassDetail {
                    samples: members.len(),
                    flagged,
                },
            );
        }

        let poisoning_score = if total_clusters == 0 || misaligned_clusters.is_empty() {
            0.0
        } else {
            let fraction = misaligned_clusters.len() as f64 / total_clusters as f64;
            let avg_margin = misaligned_clusters.iter().map(|c| c.margin).sum::<f64>()
                / misaligned_clusters.len() as f64;
            (100.0 * fraction * (0.5 + avg_margin)).min(100.0)
        };

        Ok(DetectionResult {
            method: DetectionMethod::Clustering,
            poisoning_score,
            suspected_indices: suspected,
            confidence_scores: confidences,
            class_details,
            findings: MethodFindings::Clustering {
                misaligned_clusters,
            },
        })
    }

    /// Partition one class's activations; returns (cluster id, member
    /// positions within the class). DBSCAN noise points are dropped.
    fn split_class(&self, class_activations: &[Vec<f64>], class: usize) -> Vec<(usize, Vec<usize>)> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        match self.config.algorithm {
            ClusterAlgorithm::KMeans => {
                let k = self.config.n_clusters.min(class_activations.len());
                let assignments = kmeans::cluster(
                    class_activations,
                    k,
                    self.config.seed.wrapping_add(class as u64),
                    self.config.max_iterations,
                );
                for (pos, a) in assignments.into_iter().enumerate() {
                    groups.entry(a).or_default().push(pos);
                }
            }
            ClusterAlgorithm::Dbscan => {
                let labels =
                    dbscan::cluster(class_activations, self.config.eps, self.config.min_samples);
                for (pos, l) in labels.into_iter().enumerate() {
                    if l != dbscan::NOISE {
                        groups.entry(l as usize).or_default().push(pos);
                    }
                }
            }
        }
        groups.into_iter().collect()
    }
}

impl Default for ClusteringDetector {
    fn default() -> Self {
        Self::new(ClusteringConfig::default())
    }
}

impl Detector for ClusteringDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Clustering
    }

    fn detect(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.analyze(dataset)
    }
}

/// Per-class centroid of the simulated activations.
fn activation_centroids(dataset: &Dataset, activations: &[Vec<f64>]) -> Vec<Option<Vec<f64>>> {
    (0..dataset.n_classes())
        .map(|class| {
            let members = dataset.class_members(class);
            stats::centroid_of(members.iter().map(|&i| activations[i].as_slice()))
        })
        .collect()
}
