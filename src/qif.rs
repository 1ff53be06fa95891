use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::bank::FieldMap;
use crate::table::{Table, TableError};

/// One transaction of a QIF bank account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QifRecord {
    pub date: String,
    pub amount: String,
    pub payee: String,
    pub memo: String,
}

impl QifRecord {
    /// Maps every row of `table` onto a record
    ///
    /// Fails if one of the mapped columns is missing, before anything is
    /// written.
    pub fn from_table(table: &Table, fields: &FieldMap) -> Result<Vec<Self>, TableError> {
        let index = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| TableError::MissingColumn(name.to_owned()))
        };
        let date = index(&fields.date)?;
        let amount = index(&fields.amount)?;
        let payee = index(&fields.payee)?;
        let description = index(&fields.description)?;
        let title = index(&fields.title)?;

        let records = table
            .rows()
            .iter()
            .map(|row| Self {
                date: row[date].clone(),
                amount: row[amount].clone(),
                payee: row[payee].clone(),
                memo: format!("{} | {}", row[description], row[title]),
            })
            .collect();

        Ok(records)
    }
}

/// Writes QIF bank transactions
///
/// The type header is written on construction, so a writer with no records
/// still produces a valid, empty QIF document.
#[derive(Debug)]
pub struct QifWriter<W: Write> {
    inner: W,
}

impl<W: Write> QifWriter<W> {
    pub fn new(mut inner: W) -> io::Result<Self> {
        inner.write_all(b"!Type:Bank\n")?;
        Ok(Self { inner })
    }

    pub fn write_record(&mut self, record: &QifRecord) -> io::Result<()> {
        writeln!(self.inner, "D{}", record.date)?;
        writeln!(self.inner, "T{}", record.amount)?;
        writeln!(self.inner, "P{}", record.payee)?;
        writeln!(self.inner, "M{}", record.memo)?;
        self.inner.write_all(b"^\n")
    }

    /// Flushes and returns the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Creates or truncates `path` and writes `records` to it as UTF-8
pub fn write_qif(path: &Path, records: &[QifRecord]) -> io::Result<()> {
    let mut writer = QifWriter::new(BufWriter::new(File::create(path)?))?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FieldMap {
        FieldMap {
            date: "#Data".to_owned(),
            amount: "#Kwota".to_owned(),
            payee: "#Odbiorca".to_owned(),
            description: "#Opis".to_owned(),
            title: "#Tytuł".to_owned(),
        }
    }

    fn record() -> QifRecord {
        QifRecord {
            date: "2024-01-02".to_owned(),
            amount: "-12,50".to_owned(),
            payee: "Sklep".to_owned(),
            memo: "ZAKUP PRZY UŻYCIU KARTY | Bułki".to_owned(),
        }
    }

    #[test]
    fn records_from_table() {
        let table = Table::parse(
            "#Data;#Opis;#Tytuł;#Odbiorca;#Kwota\n\
             2024-01-02;ZAKUP PRZY UŻYCIU KARTY;Bułki;Sklep;-12,50\n",
            b';',
        )
        .unwrap();

        let records = QifRecord::from_table(&table, &fields()).unwrap();
        assert_eq!(records, [record()]);
    }

    #[test]
    fn missing_column() {
        let table = Table::parse("#Data;#Opis;#Tytuł;#Kwota\n", b';').unwrap();
        let error = QifRecord::from_table(&table, &fields()).unwrap_err();
        assert!(matches!(error, TableError::MissingColumn(column) if column == "#Odbiorca"));
    }

    #[test]
    fn empty_memo_parts_keep_separator() {
        let table = Table::parse("#Data;#Opis;#Tytuł;#Odbiorca;#Kwota\n2024-01-02;;;;1,00\n", b';').unwrap();
        let records = QifRecord::from_table(&table, &fields()).unwrap();
        assert_eq!(records[0].memo, " | ");
        assert_eq!(records[0].payee, "");
    }

    #[test]
    fn write_records() {
        let mut writer = QifWriter::new(Vec::new()).unwrap();
        writer.write_record(&record()).unwrap();
        writer.write_record(&record()).unwrap();
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();

        let block = "D2024-01-02\nT-12,50\nPSklep\nMZAKUP PRZY UŻYCIU KARTY | Bułki\n^\n";
        assert_eq!(output, format!("!Type:Bank\n{}{}", block, block));
    }

    #[test]
    fn write_nothing() {
        let writer = QifWriter::new(Vec::new()).unwrap();
        assert_eq!(writer.finish().unwrap(), b"!Type:Bank\n");
    }
}
