pub mod converter;
pub mod error;
pub mod gpx;
pub mod nmea;
pub mod options;
pub mod position;
pub mod xml;

use geojson::FeatureCollection;
use wasm_bindgen::prelude::*;

use crate::gpx::GpxSource;
use crate::options::ConvertOptions;

pub use crate::error::{GpxError, NmeaError};
pub use crate::position::{Position, RoutePoint, TrackPoint};

/// Convert an NMEA log (one sentence per line) to GeoJSON, returned as a JS object.
/// Lines that do not yield a position are skipped.
#[wasm_bindgen(js_name = nmeaToGeoJson)]
pub fn nmea_to_geojson(log: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    to_js_value(&nmea_collection(log, &opts))
}

/// Convert an NMEA log to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = nmeaToGeoJsonString)]
pub fn nmea_to_geojson_string(log: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    to_json_string(&nmea_collection(log, &opts))
}

/// Convert the route of a GPX document to GeoJSON, returned as a JS object.
#[wasm_bindgen(js_name = gpxRouteToGeoJson)]
pub fn gpx_route_to_geojson(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let points = gpx::parse_route(GpxSource::Text(gpx_string))?;
    to_js_value(&converter::route_to_feature_collection(&points, &opts))
}

/// Convert the route of a GPX document to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = gpxRouteToGeoJsonString)]
pub fn gpx_route_to_geojson_string(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let points = gpx::parse_route(GpxSource::Text(gpx_string))?;
    to_json_string(&converter::route_to_feature_collection(&points, &opts))
}

/// Convert the track of a GPX document to GeoJSON, returned as a JS object.
#[wasm_bindgen(js_name = gpxTrackToGeoJson)]
pub fn gpx_track_to_geojson(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let points = gpx::parse_track(GpxSource::Text(gpx_string))?;
    to_js_value(&converter::track_to_feature_collection(&points, &opts))
}

/// Convert the track of a GPX document to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = gpxTrackToGeoJsonString)]
pub fn gpx_track_to_geojson_string(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let points = gpx::parse_track(GpxSource::Text(gpx_string))?;
    to_json_string(&converter::track_to_feature_collection(&points, &opts))
}

fn nmea_collection(log: &str, opts: &ConvertOptions) -> FeatureCollection {
    let positions = nmea::positions_from_log(log.lines());
    converter::positions_to_feature_collection(&positions, opts)
}

fn to_js_value(fc: &FeatureCollection) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json_string(fc: &FeatureCollection) -> Result<String, JsValue> {
    serde_json::to_string(fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<ConvertOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ConvertOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
