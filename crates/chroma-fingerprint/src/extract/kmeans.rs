//! Deterministic weighted k-means in Lab
//!
//! Seeding is maximin (farthest point): the most frequent color first, then
//! repeatedly the color farthest from every centroid chosen so far. Lloyd
//! iterations follow with squared Euclidean distance. Identical input always
//! gives identical output.

use super::histogram::ColorHistogram;
use crate::color::Lab;

/// A raw cluster before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawCluster {
    pub(crate) centroid: Lab,
    pub(crate) count: u64,
}

fn seed(histogram: &ColorHistogram, k: usize) -> Vec<Lab> {
    // strict comparisons keep the earliest entry on ties
    let mut first = 0;
    for (i, &count) in histogram.counts.iter().enumerate() {
        if count > histogram.counts[first] {
            first = i;
        }
    }

    let mut centroids = Vec::with_capacity(k);
    centroids.push(histogram.lab[first]);
    let mut min_dist: Vec<f64> = histogram
        .lab
        .iter()
        .map(|p| p.distance_squared(histogram.lab[first]))
        .collect();

    while centroids.len() < k {
        let mut next = 0;
        for (i, &d) in min_dist.iter().enumerate() {
            if d > min_dist[next] {
                next = i;
            }
        }
        let chosen = histogram.lab[next];
        centroids.push(chosen);
        for (d, p) in min_dist.iter_mut().zip(&histogram.lab) {
            *d = d.min(p.distance_squared(chosen));
        }
    }
    centroids
}

#[inline]
fn nearest(point: Lab, centroids: &[Lab]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let d = point.distance_squared(c);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// Cluster `histogram` into at most `k` groups.
///
/// When the histogram has no more than `k` distinct colors every color
/// becomes its own cluster. Empty clusters are dropped, so fewer than `k`
/// clusters may come back. Output order follows centroid index; callers
/// sort.
pub(crate) fn kmeans(histogram: &ColorHistogram, k: usize, max_iterations: usize) -> Vec<RawCluster> {
    if histogram.is_empty() || k == 0 {
        return Vec::new();
    }
    if histogram.len() <= k {
        return histogram
            .lab
            .iter()
            .zip(&histogram.counts)
            .map(|(&centroid, &count)| RawCluster { centroid, count })
            .collect();
    }

    let mut centroids = seed(histogram, k);
    let mut assignment = vec![usize::MAX; histogram.len()];
    let mut counts = vec![0u64; k];

    for _ in 0..max_iterations {
        let mut changed = false;
        for (slot, &point) in assignment.iter_mut().zip(&histogram.lab) {
            let cluster = nearest(point, &centroids);
            if *slot != cluster {
                *slot = cluster;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        counts.iter_mut().for_each(|c| *c = 0);
        for ((&cluster, &point), &count) in assignment.iter().zip(&histogram.lab).zip(&histogram.counts) {
            let w = count as f64;
            sums[cluster][0] += w * point.l;
            sums[cluster][1] += w * point.a;
            sums[cluster][2] += w * point.b;
            counts[cluster] += count;
        }
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            // an empty cluster keeps its previous position
            if count > 0 {
                let n = count as f64;
                *centroid = Lab::new(sum[0] / n, sum[1] / n, sum[2] / n);
            }
        }
    }

    centroids
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(centroid, count)| RawCluster { centroid, count })
        .collect()
}
