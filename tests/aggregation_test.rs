//! Temporal aggregation over a hand-computed record set.

mod common;

use chroma_fingerprint::{delta_e_2000, Lab};
use common::assert_close;
use common::fixtures::{record, RecordSpec};
use pretty_assertions::assert_eq;
use runway_chroma::models::{ImageRecord, Season};
use runway_chroma::services::temporal::{
    aggregate_by, by_decade, by_designer, by_season, by_year, consecutive_distances,
    designer_table, group_distance, top_palettes,
};

/// Four records, two per decade:
///
/// | id | year | designer | season | L  | a   | b  | chroma | div | palette | dist |
/// |----|------|----------|--------|----|-----|----|--------|-----|---------|------|
/// | r1 | 1994 | Atelier  | Spring | 40 | 10  | 0  | 10     | 5   | 003     | 10   |
/// | r2 | 1996 | Atelier  | Fall   | 60 | -10 | 20 | 20     | 15  | 003     | 20   |
/// | r3 | 2001 | Bureau   | Spring | 50 | 0   | 0  | 0      | 10  | 010     | 5    |
/// | r4 | 2003 | Bureau   | Spring | 70 | 20  | 0  | 30     | 20  | 001     | 15   |
fn records() -> Vec<ImageRecord> {
    vec![
        record(RecordSpec {
            id: "r1",
            year: 1994,
            designer: "Atelier",
            season: Season::Spring,
            lab: (40.0, 10.0, 0.0),
            chroma: 10.0,
            diversity: 5.0,
            palette: "003",
            distance: 10.0,
        }),
        record(RecordSpec {
            id: "r2",
            year: 1996,
            designer: "Atelier",
            season: Season::Fall,
            lab: (60.0, -10.0, 20.0),
            chroma: 20.0,
            diversity: 15.0,
            palette: "003",
            distance: 20.0,
        }),
        record(RecordSpec {
            id: "r3",
            year: 2001,
            designer: "Bureau",
            season: Season::Spring,
            lab: (50.0, 0.0, 0.0),
            chroma: 0.0,
            diversity: 10.0,
            palette: "010",
            distance: 5.0,
        }),
        record(RecordSpec {
            id: "r4",
            year: 2003,
            designer: "Bureau",
            season: Season::Spring,
            lab: (70.0, 20.0, 0.0),
            chroma: 30.0,
            diversity: 20.0,
            palette: "001",
            distance: 15.0,
        }),
    ]
}

fn ids(frequency: &[runway_chroma::models::PaletteCount]) -> Vec<(&str, usize)> {
    frequency
        .iter()
        .map(|p| (p.palette_id.as_str(), p.count))
        .collect()
}

#[test]
fn test_decade_aggregates() {
    let decades = aggregate_by(&records(), by_decade);
    assert_eq!(decades.keys().copied().collect::<Vec<_>>(), vec![1990, 2000]);

    let nineties = &decades[&1990];
    assert_eq!(nineties.image_count, 2);
    assert_close(nineties.mean_lightness, 50.0, 1e-12);
    assert_close(nineties.mean_chroma, 15.0, 1e-12);
    assert_close(nineties.mean_diversity, 10.0, 1e-12);
    assert_close(nineties.mean_match_distance, 15.0, 1e-12);
    assert_close(nineties.centroid.l, 50.0, 1e-12);
    assert_close(nineties.centroid.a, 0.0, 1e-12);
    assert_close(nineties.centroid.b, 10.0, 1e-12);
    assert_eq!(ids(&nineties.palette_frequency), vec![("003", 2)]);
    assert_close(nineties.palette_frequency[0].share, 100.0, 1e-12);

    let noughties = &decades[&2000];
    assert_eq!(noughties.image_count, 2);
    assert_close(noughties.mean_lightness, 60.0, 1e-12);
    assert_close(noughties.mean_chroma, 15.0, 1e-12);
    assert_close(noughties.mean_diversity, 15.0, 1e-12);
    assert_close(noughties.mean_match_distance, 10.0, 1e-12);
    assert_close(noughties.centroid.a, 10.0, 1e-12);
    // tie on count, smaller id first
    assert_eq!(ids(&noughties.palette_frequency), vec![("001", 1), ("010", 1)]);
    assert_eq!(
        noughties.dominant_palette().map(|p| p.palette_id.as_str()),
        Some("001")
    );
    common::assert_shares_complete(noughties.palette_frequency.iter().map(|p| p.share));
}

#[test]
fn test_year_and_season_keys() {
    let years = aggregate_by(&records(), by_year);
    assert_eq!(
        years.keys().copied().collect::<Vec<_>>(),
        vec![1994, 1996, 2001, 2003]
    );
    assert!(years.values().all(|g| g.image_count == 1));

    let seasons = aggregate_by(&records(), by_season);
    assert_eq!(seasons[&Season::Spring].image_count, 3);
    assert_eq!(seasons[&Season::Fall].image_count, 1);
    assert_close(seasons[&Season::Spring].mean_lightness, 160.0 / 3.0, 1e-9);
    assert_eq!(
        ids(&seasons[&Season::Spring].palette_frequency),
        vec![("001", 1), ("003", 1), ("010", 1)]
    );

    let designers = aggregate_by(&records(), by_designer);
    assert_eq!(designers["Atelier"].image_count, 2);
}

#[test]
fn test_decade_distance_uses_centroids() {
    let decades = aggregate_by(&records(), by_decade);
    let expected = delta_e_2000(Lab::new(50.0, 0.0, 10.0), Lab::new(60.0, 10.0, 0.0));

    assert_close(group_distance(&decades[&1990], &decades[&2000]), expected, 1e-12);
    assert!(expected > 0.0);

    let distances = consecutive_distances(&decades);
    assert_eq!(distances.len(), 1);
    assert_eq!((distances[0].source, distances[0].target), (1990, 2000));
    assert_close(distances[0].centroid_distance, expected, 1e-12);
    assert_close(distances[0].source_mean_match_distance, 15.0, 1e-12);
    assert_close(distances[0].target_mean_match_distance, 10.0, 1e-12);
}

#[test]
fn test_top_palettes() {
    let top = top_palettes(&records(), 2);
    assert_eq!(ids(&top), vec![("003", 2), ("001", 1)]);
    assert_close(top[0].share, 50.0, 1e-12);
    assert_close(top[1].share, 25.0, 1e-12);
    assert_eq!(top[0].palette_name, "Palette 003");
}

#[test]
fn test_designer_table_threshold() {
    let table = designer_table(&records(), 2);
    let names: Vec<&str> = table.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(names, vec!["Atelier", "Bureau"]);

    assert!(designer_table(&records(), 3).is_empty());
}

#[test]
fn test_aggregation_is_order_independent() {
    let mut reversed = records();
    reversed.reverse();

    assert_eq!(
        aggregate_by(&records(), by_decade),
        aggregate_by(&reversed, by_decade)
    );
    assert_eq!(top_palettes(&records(), 3), top_palettes(&reversed, 3));
}
