use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::trace;
use regex::Regex;

use crate::error::GpxError;
use crate::position::{Position, RoutePoint, TrackPoint};
use crate::xml::{Element, XmlNode};

type Result<T> = std::result::Result<T, GpxError>;

pub const GPX: &str = "gpx";
pub const RTE: &str = "rte";
pub const RTEPT: &str = "rtept";
pub const TRK: &str = "trk";
pub const TRKSEG: &str = "trkseg";
pub const TRKPT: &str = "trkpt";

const LAT: &str = "lat";
const LON: &str = "lon";
const ELE: &str = "ele";
const NAME: &str = "name";
const TIME: &str = "time";

/// Elevation used when a point has no `<ele>`.
const SEA_LEVEL: &str = "0";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// `YYYY-MM-DDTHH:MM:SSZ` with every field at its full width.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$")
        .expect("time pattern is valid")
});

/// Where GPX text comes from.
#[derive(Debug, Clone, Copy)]
pub enum GpxSource<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl GpxSource<'_> {
    fn root_element(self) -> Result<Element> {
        match self {
            GpxSource::Text(xml) => Element::parse_root(xml),
            GpxSource::File(path) => {
                let xml = std::fs::read_to_string(path).map_err(|source| GpxError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Element::parse_root(&xml)
            }
        }
    }
}

/// Parse the points of the first `<rte>` of a GPX document.
pub fn parse_route(source: GpxSource<'_>) -> Result<Vec<RoutePoint>> {
    route_points(&source.root_element()?)
}

/// Parse the points of the first `<trk>` of a GPX document, across all of its segments.
pub fn parse_track(source: GpxSource<'_>) -> Result<Vec<TrackPoint>> {
    track_points(&source.root_element()?)
}

pub fn route_points<N: XmlNode>(root: &N) -> Result<Vec<RoutePoint>> {
    let route = require_child(require_root(root)?, RTE)?;

    let points = require_children(route, RTEPT)?
        .into_iter()
        .map(|point| -> Result<RoutePoint> {
            Ok(RoutePoint {
                position: extract_position(point)?,
                name: extract_name(point),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    trace!("read {} route points", points.len());
    Ok(points)
}

/// Track points in document order. Segments are read in turn; a track with no
/// `<trkseg>` may hold its `<trkpt>` elements directly.
pub fn track_points<N: XmlNode>(root: &N) -> Result<Vec<TrackPoint>> {
    let track = require_child(require_root(root)?, TRK)?;

    let segments = track.children_named(TRKSEG);
    let containers = if segments.is_empty() {
        vec![track]
    } else {
        segments
    };

    let mut points = Vec::new();
    for container in containers {
        for point in require_children(container, TRKPT)? {
            points.push(TrackPoint {
                position: extract_position(point)?,
                name: extract_name(point),
                time: extract_time(point)?,
            });
        }
    }

    trace!("read {} track points", points.len());
    Ok(points)
}

pub fn require_root<N: XmlNode>(root: &N) -> Result<&N> {
    if root.name() == GPX {
        Ok(root)
    } else {
        Err(GpxError::missing_element(GPX))
    }
}

/// The first child named `name`.
pub fn require_child<'a, N: XmlNode>(element: &'a N, name: &str) -> Result<&'a N> {
    element
        .children_named(name)
        .into_iter()
        .next()
        .ok_or_else(|| GpxError::missing_element(name))
}

/// Every child named `name`; at least one must exist.
pub fn require_children<'a, N: XmlNode>(element: &'a N, name: &str) -> Result<Vec<&'a N>> {
    let children = element.children_named(name);
    if children.is_empty() {
        Err(GpxError::missing_element(name))
    } else {
        Ok(children)
    }
}

pub fn extract_position<N: XmlNode>(element: &N) -> Result<Position> {
    let lat = element
        .attribute(LAT)
        .ok_or_else(|| GpxError::missing_attribute(LAT))?;
    let lon = element
        .attribute(LON)
        .ok_or_else(|| GpxError::missing_attribute(LON))?;
    let ele = element
        .children_named(ELE)
        .into_iter()
        .next()
        .map_or(SEA_LEVEL, |e| e.leaf_text());

    Ok(Position::from_decimal(lat, lon, ele)?)
}

/// The trimmed `<name>` content, or an empty string.
pub fn extract_name<N: XmlNode>(element: &N) -> String {
    element
        .children_named(NAME)
        .first()
        .map(|name| name.leaf_text().trim().to_string())
        .unwrap_or_default()
}

pub fn extract_time<N: XmlNode>(element: &N) -> Result<DateTime<Utc>> {
    let time = require_child(element, TIME)?.leaf_text();
    let trimmed = time.trim();
    if !TIME_PATTERN.is_match(trimmed) {
        return Err(GpxError::MalformedTimestamp(time.to_string()));
    }
    NaiveDateTime::parse_from_str(trimmed, TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| GpxError::MalformedTimestamp(time.to_string()))
}
