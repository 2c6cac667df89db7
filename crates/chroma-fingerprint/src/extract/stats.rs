//! Summary statistics of a weighted cluster set.

use super::WeightedCluster;
use crate::color::Lab;

/// Image-level color statistics derived from its dominant colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStatistics {
    /// Weighted mean L
    pub mean_lightness: f64,
    /// Weighted mean a
    pub mean_a: f64,
    /// Weighted mean b
    pub mean_b: f64,
    /// Weighted mean of per-cluster chroma ("saturation")
    pub mean_chroma: f64,
    /// Weighted standard deviation of centroid positions around the mean
    pub diversity: f64,
}

impl ColorStatistics {
    /// Compute statistics, renormalizing weights by their sum.
    ///
    /// Returns `None` for an empty set or one whose weights sum to zero.
    ///
    /// ```
    /// use chroma_fingerprint::{ColorStatistics, Lab, WeightedCluster};
    ///
    /// let clusters = [
    ///     WeightedCluster { centroid: Lab::new(40.0, 0.0, 0.0), weight: 0.5, pixel_count: 1 },
    ///     WeightedCluster { centroid: Lab::new(60.0, 0.0, 0.0), weight: 0.5, pixel_count: 1 },
    /// ];
    /// let stats = ColorStatistics::from_clusters(&clusters).unwrap();
    /// assert!((stats.mean_lightness - 50.0).abs() < 1e-9);
    /// assert!((stats.diversity - 10.0).abs() < 1e-9);
    /// ```
    pub fn from_clusters(clusters: &[WeightedCluster]) -> Option<Self> {
        let total: f64 = clusters.iter().map(|c| c.weight).sum();
        if clusters.is_empty() || total <= 0.0 {
            return None;
        }

        let mut mean = [0.0f64; 3];
        let mut mean_chroma = 0.0;
        for c in clusters {
            let w = c.weight / total;
            mean[0] += w * c.centroid.l;
            mean[1] += w * c.centroid.a;
            mean[2] += w * c.centroid.b;
            mean_chroma += w * c.centroid.chroma();
        }

        let mu = Lab::new(mean[0], mean[1], mean[2]);
        let variance: f64 = clusters
            .iter()
            .map(|c| (c.weight / total) * c.centroid.distance_squared(mu))
            .sum();

        Some(Self {
            mean_lightness: mu.l,
            mean_a: mu.a,
            mean_b: mu.b,
            mean_chroma,
            diversity: variance.sqrt(),
        })
    }

    /// The weighted mean color.
    pub fn mean_lab(&self) -> Lab {
        Lab::new(self.mean_lightness, self.mean_a, self.mean_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(l: f64, a: f64, b: f64, weight: f64) -> WeightedCluster {
        WeightedCluster {
            centroid: Lab::new(l, a, b),
            weight,
            pixel_count: 1,
        }
    }

    #[test]
    fn test_single_cluster() {
        let stats = ColorStatistics::from_clusters(&[cluster(30.0, 3.0, 4.0, 1.0)]).unwrap();
        assert_eq!(stats.mean_lightness, 30.0);
        assert!((stats.mean_chroma - 5.0).abs() < 1e-12);
        assert_eq!(stats.diversity, 0.0);
    }

    #[test]
    fn test_chroma_is_mean_of_chromas_not_chroma_of_mean() {
        // opposite hues cancel in the mean color but not in mean chroma
        let stats = ColorStatistics::from_clusters(&[
            cluster(50.0, 20.0, 0.0, 0.5),
            cluster(50.0, -20.0, 0.0, 0.5),
        ])
        .unwrap();
        assert!(stats.mean_a.abs() < 1e-12);
        assert!((stats.mean_chroma - 20.0).abs() < 1e-12);
        assert!((stats.diversity - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_are_renormalized() {
        let a = ColorStatistics::from_clusters(&[
            cluster(20.0, 0.0, 0.0, 3.0),
            cluster(80.0, 0.0, 0.0, 1.0),
        ])
        .unwrap();
        assert!((a.mean_lightness - 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_none() {
        assert!(ColorStatistics::from_clusters(&[]).is_none());
        assert!(ColorStatistics::from_clusters(&[cluster(50.0, 0.0, 0.0, 0.0)]).is_none());
    }
}
