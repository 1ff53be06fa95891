use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::{debug, info};

use crate::bank::Bank;
use crate::config::Config;
use crate::encoding::{self, DecodeError};
use crate::header::{self, HeaderError};
use crate::qif::{self, QifRecord};
use crate::table::{Table, TableError};

/// Number of cleaned rows shown at debug level
const PREVIEW_ROWS: usize = 5;

/// Possible errors to occur during a conversion
///
/// All of them abort the run before the output file is created, except for
/// failures while writing the output itself.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("bank '{0}' is not yet implemented")]
    UnimplementedBank(Bank),
    #[error("could not detect the encoding of {}", .0.display())]
    EncodingUndetectable(PathBuf),
    #[error(transparent)]
    Undecodable(#[from] DecodeError),
    #[error(transparent)]
    HeaderNotFound(#[from] HeaderError),
    #[error("error reading the CSV file: {0}")]
    TableParse(#[from] TableError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// The process exit status reported for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Io { .. } => 1,
            ConvertError::EncodingUndetectable(_) | ConvertError::Undecodable(_) => 3,
            ConvertError::HeaderNotFound(_) => 4,
            ConvertError::TableParse(_) => 5,
            ConvertError::UnimplementedBank(_) => 6,
        }
    }
}

/// What a successful conversion did
#[derive(Debug)]
pub struct Summary {
    /// The encoding guessed for the input, which is not used for decoding
    pub detected_encoding: &'static Encoding,
    /// The 1-based line of the column header
    pub header_line: usize,
    /// Rows parsed before cleaning
    pub rows_read: usize,
    /// Transactions written
    pub rows_written: usize,
    pub output: PathBuf,
}

/// Converts the bank export named by `config` into a QIF file
pub fn convert(config: &Config) -> Result<Summary, ConvertError> {
    let bank = config.bank();
    let profile = bank.profile().ok_or(ConvertError::UnimplementedBank(bank))?;
    let input = config.input();
    let read_error = |source: io::Error| io_error(input, source);

    // the guess only gates the run, the bank's own encoding is used for decoding
    let detected_encoding = encoding::detect_encoding(input, Some(profile.tld))
        .map_err(read_error)?
        .ok_or_else(|| ConvertError::EncodingUndetectable(input.to_owned()))?;
    info!(encoding = detected_encoding.name(), "detected encoding");
    info!(%bank, "processing");

    let bytes = fs::read(input).map_err(read_error)?;
    let text = encoding::decode(&bytes, profile.encoding, profile.undefined_bytes)?;

    let header = header::locate_header(&text, &profile.header_signature)?;
    info!(line = header.line(), "data starts");

    let mut table = Table::parse(header.slice(&text), profile.delimiter)?;
    let rows_read = table.len();
    info!(rows = rows_read, "read the CSV file");

    table.clean(&profile.cleaning);
    debug!(columns = ?table.columns(), rows = table.len(), "data after cleaning");
    for row in table.rows().iter().take(PREVIEW_ROWS) {
        debug!(?row);
    }

    let records = QifRecord::from_table(&table, &profile.fields)?;
    let output = config.output();
    qif::write_qif(output, &records).map_err(|source| io_error(output, source))?;
    info!(output = %output.display(), transactions = records.len(), "QIF file written");

    Ok(Summary {
        detected_encoding,
        header_line: header.line(),
        rows_read,
        rows_written: records.len(),
        output: output.to_owned(),
    })
}

fn io_error(path: &Path, source: io::Error) -> ConvertError {
    ConvertError::Io {
        path: path.to_owned(),
        source,
    }
}
