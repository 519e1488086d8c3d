//! NMEA 0183 sentence decoding.
//!
//! A line goes through the grammar check, then the checksum, then is split
//! into a [`SentenceData`] and interpreted as a [`Position`](crate::position::Position)
//! according to the field layout of its [`SentenceFormat`].

pub mod checksum;
pub mod interpret;
pub mod reader;
pub mod sentence;

pub use checksum::{checksum_of, declared_checksum, has_correct_checksum};
pub use interpret::interpret_sentence_data;
pub use reader::{LineOutcome, positions_from_log, positions_from_reader, read_sentence, scan_log};
pub use sentence::{
    FieldSchema, SentenceData, SentenceFormat, is_supported_sentence_format,
    is_well_formed_sentence, parse_sentence_data,
};
