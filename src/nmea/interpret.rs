use crate::error::NmeaError;
use crate::position::Position;

use super::sentence::{SentenceData, SentenceFormat};

/// Read the position out of a tokenized sentence using its format's field layout.
///
/// Any field that is missing, empty where a character is required, or rejected
/// by [`Position`] comes back as [`NmeaError::InvalidData`].
pub fn interpret_sentence_data(data: &SentenceData<'_>) -> Result<Position, NmeaError> {
    let format = SentenceFormat::from_code(data.format)
        .ok_or_else(|| NmeaError::UnsupportedFormat(data.format.to_string()))?;
    let schema = format.schema();

    let latitude = field(data, schema.latitude)?;
    let lat_hemisphere = hemisphere(data, schema.lat_hemisphere)?;
    let longitude = field(data, schema.longitude)?;
    let lon_hemisphere = hemisphere(data, schema.lon_hemisphere)?;
    let elevation = schema
        .elevation
        .map(|index| field(data, index))
        .transpose()?;

    Position::from_nmea(latitude, lat_hemisphere, longitude, lon_hemisphere, elevation)
        .map_err(|e| NmeaError::InvalidData(format!("{} sentence: {e}", format.code())))
}

fn field<'a>(data: &SentenceData<'a>, index: usize) -> Result<&'a str, NmeaError> {
    data.fields.get(index).copied().ok_or_else(|| {
        NmeaError::InvalidData(format!(
            "{} sentence has {} fields, expected at least {}",
            data.format,
            data.fields.len(),
            index + 1
        ))
    })
}

fn hemisphere(data: &SentenceData<'_>, index: usize) -> Result<char, NmeaError> {
    field(data, index)?
        .chars()
        .next()
        .ok_or_else(|| NmeaError::InvalidData(format!("empty hemisphere in field {index}")))
}
