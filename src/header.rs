/// The column header signature does not occur in the document
#[derive(Debug, thiserror::Error)]
#[error("header not found: no line contains `{signature}`")]
pub struct HeaderError {
    signature: String,
}

/// The 1-based line at which the tabular section of a document begins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderPosition(usize);

impl HeaderPosition {
    /// The 1-based line number of the header row
    pub fn line(&self) -> usize {
        self.0
    }

    /// The number of preamble lines in front of the header row
    pub fn skipped_lines(&self) -> usize {
        self.0 - 1
    }

    /// The part of `text` starting at the header row
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let offset: usize = text
            .split_inclusive('\n')
            .take(self.skipped_lines())
            .map(str::len)
            .sum();
        &text[offset..]
    }
}

/// Finds the first line of `text` containing `signature`
///
/// The signature may be surrounded by other text on the same line. There is no
/// fallback position: a document without the signature is not in the expected
/// format.
pub fn locate_header(text: &str, signature: &str) -> Result<HeaderPosition, HeaderError> {
    text.lines()
        .zip(1..)
        .find(|(line, _)| line.contains(signature))
        .map(|(_, number)| HeaderPosition(number))
        .ok_or_else(|| HeaderError { signature: signature.to_owned() })
}
