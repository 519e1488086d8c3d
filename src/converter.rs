use chrono::SecondsFormat;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::options::ConvertOptions;
use crate::position::{Position, RoutePoint, TrackPoint};

/// Positions read from an NMEA log, as a single Point or LineString feature.
pub fn positions_to_feature_collection(
    positions: &[Position],
    opts: &ConvertOptions,
) -> FeatureCollection {
    let coords = positions
        .iter()
        .map(|pos| point_coords(pos, opts.include_elevation))
        .collect();

    collection(build_feature(coords, source_props("nmea")))
}

pub fn route_to_feature_collection(
    points: &[RoutePoint],
    opts: &ConvertOptions,
) -> FeatureCollection {
    let coords = points
        .iter()
        .map(|pt| point_coords(&pt.position, opts.include_elevation))
        .collect();

    let mut props = source_props("route");
    if opts.include_names {
        insert_names(&mut props, points.iter().map(|pt| pt.name.as_str()));
    }

    collection(build_feature(coords, props))
}

pub fn track_to_feature_collection(
    points: &[TrackPoint],
    opts: &ConvertOptions,
) -> FeatureCollection {
    let coords = points
        .iter()
        .map(|pt| point_coords(&pt.position, opts.include_elevation))
        .collect();

    let mut props = source_props("track");
    if opts.include_names {
        insert_names(&mut props, points.iter().map(|pt| pt.name.as_str()));
    }
    if opts.include_time {
        let times = points
            .iter()
            .map(|pt| JsonValue::String(pt.time.to_rfc3339_opts(SecondsFormat::Secs, true)))
            .collect();
        insert_coordinate_property(&mut props, "times", times);
    }

    collection(build_feature(coords, props))
}

fn collection(feature: Option<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: feature.into_iter().collect(),
        foreign_members: None,
    }
}

/// Nothing for no coordinates, a Point for one, a LineString otherwise.
///
/// A single point's coordinate properties are flattened into plain
/// properties (`names: ["A"]` becomes `name: "A"`).
fn build_feature(
    mut coords: Vec<Vec<f64>>,
    mut props: Map<String, JsonValue>,
) -> Option<Feature> {
    let value = match coords.len() {
        0 => return None,
        1 => {
            flatten_coordinate_properties(&mut props);
            Value::Point(coords.remove(0))
        }
        _ => Value::LineString(coords),
    };

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    })
}

fn source_props(source: &str) -> Map<String, JsonValue> {
    let mut props = Map::new();
    props.insert("source".to_string(), JsonValue::String(source.to_string()));
    props
}

/// Build [lon, lat] or [lon, lat, ele] coordinate array.
fn point_coords(pos: &Position, include_elevation: bool) -> Vec<f64> {
    match (include_elevation, pos.elevation) {
        (true, Some(ele)) => vec![pos.longitude, pos.latitude, ele],
        _ => vec![pos.longitude, pos.latitude],
    }
}

fn insert_names<'a>(props: &mut Map<String, JsonValue>, names: impl Iterator<Item = &'a str>) {
    let names: Vec<JsonValue> = names.map(|n| JsonValue::String(n.to_string())).collect();

    // Only include if at least one point is named
    if names.iter().any(|n| n.as_str().is_some_and(|s| !s.is_empty())) {
        insert_coordinate_property(props, "names", names);
    }
}

fn insert_coordinate_property(
    props: &mut Map<String, JsonValue>,
    key: &str,
    values: Vec<JsonValue>,
) {
    let coord_props = props
        .entry("coordinateProperties")
        .or_insert_with(|| JsonValue::Object(Map::new()));
    if let JsonValue::Object(coord_props) = coord_props {
        coord_props.insert(key.to_string(), JsonValue::Array(values));
    }
}

fn flatten_coordinate_properties(props: &mut Map<String, JsonValue>) {
    let Some(JsonValue::Object(coord_props)) = props.remove("coordinateProperties") else {
        return;
    };
    for (key, values) in coord_props {
        let single = key.strip_suffix('s').unwrap_or(&key).to_string();
        if let JsonValue::Array(mut values) = values {
            if !values.is_empty() {
                props.insert(single, values.swap_remove(0));
            }
        }
    }
}
