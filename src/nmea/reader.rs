use std::io::BufRead;

use log::debug;

use crate::error::NmeaError;
use crate::position::Position;

use super::checksum::{checksum_of, declared_checksum};
use super::interpret::interpret_sentence_data;
use super::sentence::{is_well_formed_sentence, parse_sentence_data};

/// What became of one line of a log.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    /// 1-based.
    pub line_number: usize,
    pub result: Result<Position, NmeaError>,
}

/// Run a single line through grammar, checksum, tokenizer and interpreter.
pub fn read_sentence(line: &str) -> Result<Position, NmeaError> {
    if !is_well_formed_sentence(line) {
        return Err(NmeaError::MalformedSentence);
    }

    let computed = checksum_of(line);
    let declared = declared_checksum(line).ok_or(NmeaError::MalformedSentence)?;
    if declared != computed {
        return Err(NmeaError::ChecksumMismatch { declared, computed });
    }

    let data = parse_sentence_data(line)?;
    interpret_sentence_data(&data)
}

/// Yield an outcome for every line, in order. Nothing here aborts early.
pub fn scan_log<I>(lines: I) -> impl Iterator<Item = LineOutcome>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| LineOutcome {
            line_number: index + 1,
            result: read_sentence(line.as_ref()),
        })
}

/// Positions from every usable sentence in `lines`, in input order.
///
/// Malformed lines, checksum failures, unsupported formats and unusable field
/// data are skipped; the result may be empty but this never fails.
pub fn positions_from_log<I>(lines: I) -> Vec<Position>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut skipped = 0usize;
    let positions: Vec<Position> = scan_log(lines)
        .filter_map(|outcome| match outcome.result {
            Ok(position) => Some(position),
            Err(reason) => {
                debug!("skipping NMEA line {}: {reason}", outcome.line_number);
                skipped += 1;
                None
            }
        })
        .collect();

    debug!(
        "read {} positions from NMEA log ({skipped} lines skipped)",
        positions.len()
    );
    positions
}

/// Like [`positions_from_log`], reading lines until the reader is exhausted.
///
/// Line endings (`\n` or `\r\n`) are stripped; bytes that are not UTF-8 make
/// their line malformed rather than failing the read. Only I/O errors surface.
pub fn positions_from_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<Position>> {
    let mut lines = Vec::new();
    for chunk in reader.split(b'\n') {
        let mut bytes = chunk?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        lines.push(String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(positions_from_log(lines))
}
