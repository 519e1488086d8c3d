#![cfg(target_arch = "wasm32")]

use geolog_wasm::{gpx_route_to_geojson_string, gpx_track_to_geojson, nmea_to_geojson_string};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

const LOG: &str = "$GPGLL,5057.970,N,00146.328,W,142451,A*3C
$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48
$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

#[wasm_bindgen_test]
fn nmea_string_output() {
    let json = nmea_to_geojson_string(LOG, JsValue::UNDEFINED).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["type"], "FeatureCollection");
    let feature = &value["features"][0];
    assert_eq!(feature["geometry"]["type"], "LineString");
    assert_eq!(feature["geometry"]["coordinates"].as_array().unwrap().len(), 2);
    assert_eq!(feature["properties"]["source"], "nmea");
}

#[wasm_bindgen_test]
fn route_missing_points_is_an_error() {
    let result = gpx_route_to_geojson_string("<gpx><rte/></gpx>", JsValue::NULL);
    let err = result.unwrap_err().dyn_into::<js_sys::Error>().unwrap();
    assert_eq!(String::from(err.message()), "Missing 'rtept' element.");
}

#[wasm_bindgen_test]
fn track_returns_object() {
    let gpx = r#"<gpx><trk><trkseg>
  <trkpt lat="35.0" lon="139.0"><time>2025-01-01T00:00:00Z</time></trkpt>
  <trkpt lat="35.1" lon="139.1"><time>2025-01-01T00:01:00Z</time></trkpt>
</trkseg></trk></gpx>"#;
    let value = gpx_track_to_geojson(gpx, JsValue::UNDEFINED).unwrap();
    assert!(value.is_object());
}
