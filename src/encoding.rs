use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// The input could not be decoded with the bank's fixed encoding
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("the input is not valid {encoding} text")]
    Malformed { encoding: &'static str },
    #[error("byte 0x{byte:02X} at offset {offset} is undefined in {encoding}")]
    UndefinedByte {
        encoding: &'static str,
        byte: u8,
        offset: usize,
    },
}

/// Guesses the encoding of the file at `path`
///
/// See [`probe_reader`].
pub fn detect_encoding(path: &Path, tld: Option<&[u8]>) -> io::Result<Option<&'static Encoding>> {
    let file = File::open(path)?;
    probe_reader(BufReader::new(file), tld)
}

/// Feeds the reader line by line into an encoding detector
///
/// Returns `None` if the reader produced no bytes at all, since there is
/// nothing to base a guess on. The `tld` is a hint about the country the
/// document originates from, e.g. `b"pl"`.
pub fn probe_reader<R: BufRead>(mut reader: R, tld: Option<&[u8]>) -> io::Result<Option<&'static Encoding>> {
    let mut detector = EncodingDetector::new();
    let mut line = Vec::new();
    let mut seen = 0;

    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }
        seen += read;
        detector.feed(&line, false);
    }
    detector.feed(&[], true);

    match seen {
        0 => Ok(None),
        _ => Ok(Some(detector.guess(tld, true))),
    }
}

/// Decodes `bytes` strictly with `encoding`
///
/// `undefined` lists bytes the encoding maps to control characters but which
/// have no character assigned in the bank's code page; any of them rejects the
/// input. A byte order mark is not honoured: bank exports are always read with
/// the bank's fixed legacy encoding, whatever the file claims.
pub fn decode(bytes: &[u8], encoding: &'static Encoding, undefined: &[u8]) -> Result<String, DecodeError> {
    if let Some(offset) = bytes.iter().position(|byte| undefined.contains(byte)) {
        return Err(DecodeError::UndefinedByte {
            encoding: encoding.name(),
            byte: bytes[offset],
            offset,
        });
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(DecodeError::Malformed { encoding: encoding.name() })
}
