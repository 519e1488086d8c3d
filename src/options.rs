use serde::Deserialize;

/// Options for GeoJSON output.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Include elevation as the 3rd coordinate value when known (default: true)
    #[serde(default = "default_true")]
    pub include_elevation: bool,

    /// Include track point timestamps in coordinateProperties.times (default: true)
    #[serde(default = "default_true")]
    pub include_time: bool,

    /// Include route/track point names in coordinateProperties.names (default: true)
    #[serde(default = "default_true")]
    pub include_names: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_elevation: true,
            include_time: true,
            include_names: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_true() {
        let opts: ConvertOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.include_elevation);
        assert!(opts.include_time);
        assert!(opts.include_names);
    }

    #[test]
    fn test_camel_case_keys() {
        let opts: ConvertOptions =
            serde_json::from_str(r#"{"includeElevation": false, "includeNames": false}"#).unwrap();
        assert!(!opts.include_elevation);
        assert!(opts.include_time);
        assert!(!opts.include_names);
    }
}
