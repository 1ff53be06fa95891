pub use self::{
    bank::{Bank, BankProfile, FieldMap, UnknownBank},
    config::Config,
    convert::{convert, ConvertError, Summary},
    encoding::DecodeError,
    header::{HeaderError, HeaderPosition},
    qif::{QifRecord, QifWriter},
    table::{CleaningRules, Table, TableError},
};

pub mod encoding;
pub mod header;
pub mod qif;

mod bank;
mod config;
mod convert;
mod table;
