/// XOR of every byte after the leading `$` up to, not including, the first `*`.
///
/// A sentence without a `*` is checksummed to its end.
pub fn checksum_of(sentence: &str) -> u8 {
    let bytes = sentence.as_bytes();
    let body = bytes.strip_prefix(b"$").unwrap_or(bytes);
    body.iter()
        .take_while(|&&b| b != b'*')
        .fold(0u8, |acc, &b| acc ^ b)
}

/// The checksum a sentence declares after its last `*`, if that suffix is
/// exactly two hex digits (either case).
pub fn declared_checksum(sentence: &str) -> Option<u8> {
    let (_, suffix) = sentence.rsplit_once('*')?;
    if suffix.len() != 2 || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(suffix, 16).ok()
}

/// Whether the declared checksum matches the computed one. Never panics;
/// a missing or malformed suffix is simply a mismatch.
pub fn has_correct_checksum(sentence: &str) -> bool {
    declared_checksum(sentence) == Some(checksum_of(sentence))
}
