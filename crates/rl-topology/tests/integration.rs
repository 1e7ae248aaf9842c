//! Integration tests for rl-topology.

use approx::assert_relative_eq;
use rl_topology::{
    SegmentId, SegmentKind, TopologyError, catalog, cumulative_profile, segment, station_profile,
    validate_catalog,
};

#[test]
fn catalog_has_eight_valid_segments() {
    let segments = catalog();
    assert_eq!(segments.len(), 8);
    validate_catalog(segments).unwrap();
}

#[test]
fn pipe_length_covers_the_slope() {
    for def in catalog() {
        assert!(def.pipe_length_m >= def.distance_m);
        assert!(def.pipe_length_m + 1e-6 >= def.straight_line_length());
    }
}

#[test]
fn pump_and_valve_assignment() {
    for def in catalog() {
        let expected = match def.id.get() {
            1..=4 | 8 => SegmentKind::Pump,
            _ => SegmentKind::ThrottlingValve,
        };
        assert_eq!(def.kind(), expected, "segment {}", def.id);
        assert_eq!(def.is_descending(), (5..=7).contains(&def.id.get()));
    }
}

#[test]
fn out_of_catalog_index_fails_loudly() {
    assert_eq!(
        segment(0).unwrap_err(),
        TopologyError::SegmentOutOfRange { index: 0 }
    );
    assert_eq!(
        segment(9).unwrap_err(),
        TopologyError::SegmentOutOfRange { index: 9 }
    );
}

#[test]
fn profile_is_ordered_and_deterministic() {
    let first = cumulative_profile();
    let second = cumulative_profile();
    assert_eq!(first, second);

    for pair in first.windows(2) {
        assert!(pair[1].distance_m > pair[0].distance_m);
    }
    let ids: Vec<usize> = first.iter().filter_map(|p| p.segment).map(SegmentId::get).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}

#[test]
fn profile_accumulates_catalog_geometry() {
    let profile = cumulative_profile();
    let last = profile.last().unwrap();
    let distance: f64 = catalog().iter().map(|d| d.distance_m).sum();
    let elevation: f64 = catalog().iter().map(|d| d.elevation_change_m).sum();
    assert_relative_eq!(last.distance_m, distance, max_relative = 1e-12);
    assert_relative_eq!(last.elevation_m, elevation, max_relative = 1e-12);
}

#[test]
fn station_profile_ends_where_segments_end() {
    let stations = station_profile();
    let profile = cumulative_profile();
    for point in &profile[1..] {
        let id = point.segment.unwrap();
        let last_station = stations.iter().rev().find(|s| s.segment == id).unwrap();
        assert_relative_eq!(last_station.distance_m, point.distance_m, max_relative = 1e-9);
        assert_relative_eq!(
            last_station.elevation_m,
            point.elevation_m,
            epsilon = 1e-9
        );
    }
}

#[test]
fn catalog_serializes_to_json() {
    let json = serde_json::to_value(segment(5).unwrap()).unwrap();
    assert_eq!(json["id"], 5);
    assert_eq!(json["role"], "descending_throttled");
    assert_eq!(json["pressure_break_tank"], true);
    assert_eq!(json["fittings"].as_array().unwrap().len(), 3);
}
