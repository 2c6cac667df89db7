//! Nearest-palette assignment
//!
//! A palette's score against an image is the weight-averaged distance from
//! each dominant color to its closest palette color:
//!
//! ```text
//! score(P) = Σᵢ wᵢ · minⱼ ΔE00(clusterᵢ, Pⱼ)
//! ```
//!
//! The lowest score wins. Palettes are scanned in ascending id order and a
//! later palette must beat the current best by more than [`TIE_TOLERANCE`],
//! so near-ties resolve to the smaller id.

use std::fmt;

use crate::extract::WeightedCluster;
use crate::palette::{PaletteId, PaletteLibrary, ReferencePalette};

/// Score differences at or below this are treated as ties.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Result of matching one cluster set against the library.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteMatch {
    pub palette_id: PaletteId,
    pub palette_name: String,
    /// Weighted mean ΔE00; lower is a better fit.
    pub distance: f64,
}

impl PaletteMatch {
    pub fn strength(&self) -> MatchStrength {
        MatchStrength::from_distance(self.distance)
    }
}

/// Coarse confidence classes for a match distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchStrength {
    /// Distance below 10
    Strong,
    /// Distance below 20
    Moderate,
    /// Anything else
    Weak,
}

impl MatchStrength {
    pub fn from_distance(distance: f64) -> Self {
        if distance < 10.0 {
            Self::Strong
        } else if distance < 20.0 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

impl fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller misuse of the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// No clusters to match
    EmptyClusterSet,
    /// The library has no palettes
    EmptyPaletteLibrary,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::EmptyClusterSet => write!(f, "cannot match an empty cluster set"),
            MatchError::EmptyPaletteLibrary => write!(f, "palette library is empty"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Weighted CIEDE2000 score of `clusters` against one palette.
pub fn palette_distance(clusters: &[WeightedCluster], palette: &ReferencePalette) -> f64 {
    clusters
        .iter()
        .map(|c| c.weight * palette.nearest_distance(c.centroid))
        .sum()
}

fn check(clusters: &[WeightedCluster], library: &PaletteLibrary) -> Result<(), MatchError> {
    if clusters.is_empty() {
        return Err(MatchError::EmptyClusterSet);
    }
    if library.is_empty() {
        return Err(MatchError::EmptyPaletteLibrary);
    }
    Ok(())
}

/// Index of the best score among `candidates`, scanning in order.
fn best_index(scores: &[(usize, f64)]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (pos, &(_, score)) in scores.iter().enumerate() {
        match best {
            Some(b) if score >= scores[b].1 - TIE_TOLERANCE => {}
            _ => best = Some(pos),
        }
    }
    best
}

fn to_match(palette: &ReferencePalette, distance: f64) -> PaletteMatch {
    PaletteMatch {
        palette_id: palette.id().clone(),
        palette_name: palette.name().to_string(),
        distance,
    }
}

/// Assign a cluster set to its closest library palette.
///
/// ```
/// use chroma_fingerprint::{match_clusters, to_perceptual, PaletteLibrary, WeightedCluster};
///
/// let library = PaletteLibrary::fallback();
/// let navy = WeightedCluster { centroid: to_perceptual([0x00, 0x38, 0x54]), weight: 1.0, pixel_count: 1 };
///
/// let m = match_clusters(&[navy], &library).unwrap();
/// assert_eq!(m.palette_id.as_str(), "009");
/// assert_eq!(m.distance, 0.0);
/// ```
pub fn match_clusters(
    clusters: &[WeightedCluster],
    library: &PaletteLibrary,
) -> Result<PaletteMatch, MatchError> {
    check(clusters, library)?;

    let scores: Vec<(usize, f64)> = library
        .iter()
        .enumerate()
        .map(|(i, p)| (i, palette_distance(clusters, p)))
        .collect();

    let best = best_index(&scores).ok_or(MatchError::EmptyPaletteLibrary)?;
    let (index, distance) = scores[best];
    Ok(to_match(&library.palettes()[index], distance))
}

/// The `n` best palettes, best first, using the same tie rule as
/// [`match_clusters`] at every rank.
pub fn rank_palettes(
    clusters: &[WeightedCluster],
    library: &PaletteLibrary,
    n: usize,
) -> Result<Vec<PaletteMatch>, MatchError> {
    check(clusters, library)?;

    let mut remaining: Vec<(usize, f64)> = library
        .iter()
        .enumerate()
        .map(|(i, p)| (i, palette_distance(clusters, p)))
        .collect();

    let mut ranked = Vec::with_capacity(n.min(remaining.len()));
    while ranked.len() < n {
        let Some(best) = best_index(&remaining) else {
            break;
        };
        // remove() keeps the id order of the rest intact
        let (index, distance) = remaining.remove(best);
        ranked.push(to_match(&library.palettes()[index], distance));
    }
    Ok(ranked)
}
