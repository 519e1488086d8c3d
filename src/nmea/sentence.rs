use std::sync::LazyLock;

use regex::Regex;

use crate::error::NmeaError;

/// `$GP`, a three letter format code, a comma, the payload, `*` and two hex digits.
static SENTENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$GP[A-Z]{3},[A-Za-z0-9_.,-]*\*[0-9A-Fa-f]{2}$")
        .expect("sentence pattern is valid")
});

const TALKER_PREFIX_LEN: usize = 3;
const FORMAT_CODE_LEN: usize = 3;

/// The sentence formats positions can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceFormat {
    /// Geographic position, latitude/longitude.
    Gll,
    /// Fix data, including antenna altitude.
    Gga,
    /// Recommended minimum specific GNSS data.
    Rmc,
}

/// Field indices holding each coordinate component for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub latitude: usize,
    pub lat_hemisphere: usize,
    pub longitude: usize,
    pub lon_hemisphere: usize,
    pub elevation: Option<usize>,
}

impl SentenceFormat {
    pub const ALL: [SentenceFormat; 3] = [Self::Gll, Self::Gga, Self::Rmc];

    /// Exact, case-sensitive lookup of a format code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GLL" => Some(Self::Gll),
            "GGA" => Some(Self::Gga),
            "RMC" => Some(Self::Rmc),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Gll => "GLL",
            Self::Gga => "GGA",
            Self::Rmc => "RMC",
        }
    }

    pub const fn schema(self) -> FieldSchema {
        match self {
            Self::Gll => FieldSchema {
                latitude: 0,
                lat_hemisphere: 1,
                longitude: 2,
                lon_hemisphere: 3,
                elevation: None,
            },
            Self::Gga => FieldSchema {
                latitude: 1,
                lat_hemisphere: 2,
                longitude: 3,
                lon_hemisphere: 4,
                elevation: Some(8),
            },
            Self::Rmc => FieldSchema {
                latitude: 2,
                lat_hemisphere: 3,
                longitude: 4,
                lon_hemisphere: 5,
                elevation: None,
            },
        }
    }
}

/// A well-formed sentence split into its format code and data fields.
///
/// Empty fields are kept, so indices line up with the format's [`FieldSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceData<'a> {
    pub format: &'a str,
    pub fields: Vec<&'a str>,
}

pub fn is_supported_sentence_format(code: &str) -> bool {
    SentenceFormat::from_code(code).is_some()
}

pub fn is_well_formed_sentence(candidate: &str) -> bool {
    SENTENCE_PATTERN.is_match(candidate)
}

/// Split a sentence into format code and fields.
///
/// Only well-formed sentences are accepted; anything else is a caller error
/// reported as [`NmeaError::MalformedSentence`].
pub fn parse_sentence_data(sentence: &str) -> Result<SentenceData<'_>, NmeaError> {
    if !is_well_formed_sentence(sentence) {
        return Err(NmeaError::MalformedSentence);
    }

    let format_end = TALKER_PREFIX_LEN + FORMAT_CODE_LEN;
    let format = &sentence[TALKER_PREFIX_LEN..format_end];
    let checksum_start = sentence.rfind('*').ok_or(NmeaError::MalformedSentence)?;
    // Skip the comma that follows the format code.
    let payload = &sentence[format_end + 1..checksum_start];

    Ok(SentenceData {
        format,
        fields: payload.split(',').collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_formats() {
        assert!(is_supported_sentence_format("GGA"));
        assert!(is_supported_sentence_format("GLL"));
        assert!(is_supported_sentence_format("RMC"));
        assert!(!is_supported_sentence_format("ABC"));
        assert!(!is_supported_sentence_format("gga"));
        assert!(!is_supported_sentence_format("GG"));
        assert!(!is_supported_sentence_format("GGAA"));
        assert!(!is_supported_sentence_format(""));
    }

    #[test]
    fn test_format_codes_round_trip() {
        for format in SentenceFormat::ALL {
            assert_eq!(SentenceFormat::from_code(format.code()), Some(format));
        }
    }

    #[test]
    fn test_schemas() {
        assert_eq!(SentenceFormat::Gga.schema().elevation, Some(8));
        assert_eq!(SentenceFormat::Gll.schema().elevation, None);
        assert_eq!(SentenceFormat::Rmc.schema().latitude, 2);
    }

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed_sentence(
            "$GPGLL,5057.970,N,00146.328,W,142451,A*3C"
        ));
        assert!(is_well_formed_sentence("$GPGLL,*7C"));
        assert!(is_well_formed_sentence("$GPABC,1,-2,x_y*ff"));
    }

    #[test]
    fn test_not_well_formed() {
        assert!(!is_well_formed_sentence(""));
        // wrong talker
        assert!(!is_well_formed_sentence("$GNGLL,5057.970,N*3C"));
        // lowercase format code
        assert!(!is_well_formed_sentence("$GPgll,5057.970,N*3C"));
        // missing comma after the code
        assert!(!is_well_formed_sentence("$GPGLL*3C"));
        // missing checksum
        assert!(!is_well_formed_sentence("$GPGLL,5057.970,N"));
        assert!(!is_well_formed_sentence("$GPGLL,5057.970,N*3"));
        assert!(!is_well_formed_sentence("$GPGLL,5057.970,N*3CA"));
        // characters outside the payload alphabet
        assert!(!is_well_formed_sentence("$GPGLL,50 57,N*3C"));
        assert!(!is_well_formed_sentence("$GPGLL,5057é,N*3C"));
        // surrounding text
        assert!(!is_well_formed_sentence(" $GPGLL,5057.970,N*3C"));
        assert!(!is_well_formed_sentence("$GPGLL,5057.970,N*3C\r"));
    }

    #[test]
    fn test_parse_sentence_data() {
        let data = parse_sentence_data("$GPGLL,5057.970,N,00146.328,W,142451,A*3C").unwrap();
        assert_eq!(data.format, "GLL");
        assert_eq!(data.fields, vec!["5057.970", "N", "00146.328", "W", "142451", "A"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        let data = parse_sentence_data(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        )
        .unwrap();
        assert_eq!(data.fields.len(), 14);
        assert_eq!(data.fields[12], "");
        assert_eq!(data.fields[13], "");

        let data = parse_sentence_data("$GPGLL,,,,*50").unwrap();
        assert_eq!(data.fields, vec!["", "", "", ""]);

        let data = parse_sentence_data("$GPGLL,*7C").unwrap();
        assert_eq!(data.fields, vec![""]);
    }

    #[test]
    fn test_unsupported_format_still_tokenizes() {
        let data = parse_sentence_data("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48").unwrap();
        assert_eq!(data.format, "VTG");
        assert_eq!(data.fields.len(), 8);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            parse_sentence_data("GPGLL,5057.970"),
            Err(NmeaError::MalformedSentence)
        );
    }
}
