//! Grouping of image records over time and by category.
//!
//! Everything here is a pure function of the record slice; aggregates are
//! recomputed from scratch on every call.

use crate::models::{AggregateRecord, GroupDistance, ImageRecord, PaletteCount, Season};
use chroma_fingerprint::{Lab, PaletteId};
use std::collections::BTreeMap;

pub fn by_year(record: &ImageRecord) -> i32 {
    record.meta.year
}

pub fn by_decade(record: &ImageRecord) -> i32 {
    record.meta.decade()
}

pub fn by_designer(record: &ImageRecord) -> String {
    record.meta.designer.clone()
}

pub fn by_season(record: &ImageRecord) -> Season {
    record.meta.season
}

/// Group records by `key_fn` and summarise each group.
pub fn aggregate_by<K, F>(records: &[ImageRecord], key_fn: F) -> BTreeMap<K, AggregateRecord<K>>
where
    K: Ord + Clone,
    F: Fn(&ImageRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&ImageRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let aggregate = summarize(key.clone(), &members);
            (key, aggregate)
        })
        .collect()
}

/// Summarise an arbitrary set of records under one key.
///
/// An empty set gives a zero aggregate.
pub fn summarize<K>(key: K, records: &[&ImageRecord]) -> AggregateRecord<K> {
    let n = records.len();
    if n == 0 {
        return AggregateRecord {
            key,
            image_count: 0,
            mean_lightness: 0.0,
            mean_chroma: 0.0,
            mean_diversity: 0.0,
            mean_match_distance: 0.0,
            centroid: Lab::new(0.0, 0.0, 0.0),
            palette_frequency: Vec::new(),
        };
    }

    let count = n as f64;
    let mean = |f: fn(&ImageRecord) -> f64| records.iter().map(|r| f(r)).sum::<f64>() / count;

    AggregateRecord {
        key,
        image_count: n,
        mean_lightness: mean(|r| r.statistics.mean_lightness),
        mean_chroma: mean(|r| r.statistics.mean_chroma),
        mean_diversity: mean(|r| r.statistics.diversity),
        mean_match_distance: mean(|r| r.match_distance),
        centroid: Lab::new(
            mean(|r| r.statistics.mean_lightness),
            mean(|r| r.statistics.mean_a),
            mean(|r| r.statistics.mean_b),
        ),
        palette_frequency: palette_frequency(records.iter().copied()),
    }
}

/// Palette counts, most frequent first, ties by ascending palette id.
pub fn palette_frequency<'a, I>(records: I) -> Vec<PaletteCount>
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    let mut counts: BTreeMap<&PaletteId, (&str, usize)> = BTreeMap::new();
    let mut total = 0usize;
    for record in records {
        counts
            .entry(&record.palette_id)
            .or_insert((record.palette_name.as_str(), 0))
            .1 += 1;
        total += 1;
    }

    let mut frequency: Vec<PaletteCount> = counts
        .into_iter()
        .map(|(id, (name, count))| PaletteCount {
            palette_id: id.clone(),
            palette_name: name.to_string(),
            count,
            share: count as f64 * 100.0 / total as f64,
        })
        .collect();
    // stable: equal counts stay in id order
    frequency.sort_by(|a, b| b.count.cmp(&a.count));
    frequency
}

/// The `n` most frequently assigned palettes over all records.
pub fn top_palettes(records: &[ImageRecord], n: usize) -> Vec<PaletteCount> {
    let mut frequency = palette_frequency(records);
    frequency.truncate(n);
    frequency
}

/// ΔE00 between two group centroids.
///
/// This is a group-to-group distance, unrelated to the per-image match
/// distance.
pub fn group_distance<K>(a: &AggregateRecord<K>, b: &AggregateRecord<K>) -> f64 {
    a.centroid.delta_e(b.centroid)
}

/// Distances between each group and the next one in key order.
pub fn consecutive_distances<K: Clone>(
    groups: &BTreeMap<K, AggregateRecord<K>>,
) -> Vec<GroupDistance<K>> {
    let ordered: Vec<&AggregateRecord<K>> = groups.values().collect();
    ordered
        .windows(2)
        .map(|pair| GroupDistance {
            source: pair[0].key.clone(),
            target: pair[1].key.clone(),
            centroid_distance: group_distance(pair[0], pair[1]),
            source_mean_match_distance: pair[0].mean_match_distance,
            target_mean_match_distance: pair[1].mean_match_distance,
        })
        .collect()
}

/// Designers with at least `min_images` images, largest first, ties by name.
pub fn designer_table(records: &[ImageRecord], min_images: usize) -> Vec<AggregateRecord<String>> {
    let mut designers: Vec<AggregateRecord<String>> = aggregate_by(records, by_designer)
        .into_values()
        .filter(|g| g.image_count >= min_images)
        .collect();
    designers.sort_by(|a, b| b.image_count.cmp(&a.image_count).then_with(|| a.key.cmp(&b.key)));
    designers
}
