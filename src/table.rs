/// Possible errors to occur while loading the tabular section of a document
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("the table has no `{0}` column")]
    MissingColumn(String),
}

/// The bank specific rules applied by [`Table::clean`]
#[derive(Clone, Debug, Default)]
pub struct CleaningRules {
    /// Rows containing one of these anywhere in any cell are not transactions
    pub markers: Vec<String>,
    /// Columns using spaces as thousands separators
    pub numeric_columns: Vec<String>,
    /// Columns holding free text with irregular whitespace
    pub text_columns: Vec<String>,
}

/// A table of string cells with named columns
///
/// Every row holds exactly one cell per column. Absent cells are empty strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses delimited text whose first record holds the column names
    ///
    /// Records shorter than the header are padded with empty cells, longer
    /// ones are rejected.
    pub fn parse(text: &str, delimiter: u8) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns = reader
            .headers()?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > columns.len() {
                return Err(TableError::TooManyFields {
                    line: record.position().map_or(0, |position| position.line()),
                    expected: columns.len(),
                    found: record.len(),
                });
            }

            let mut row = record.iter().map(str::to_owned).collect::<Vec<_>>();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// The column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows in order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The position of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Applies all cleaning rules, each one to the whole table, in a fixed order
    pub fn clean(&mut self, rules: &CleaningRules) {
        self.drop_empty_rows();
        for marker in &rules.markers {
            self.drop_rows_containing(marker);
        }
        self.drop_last_column();
        for column in &rules.numeric_columns {
            self.strip_spaces(column);
        }
        for column in &rules.text_columns {
            self.collapse_whitespace(column);
        }
    }

    /// Removes rows whose cells are all empty
    ///
    /// Cells holding only whitespace are not empty.
    pub fn drop_empty_rows(&mut self) {
        self.rows
            .retain(|row| row.iter().any(|cell| !cell.is_empty()));
    }

    /// Removes rows with a cell containing `marker`
    pub fn drop_rows_containing(&mut self, marker: &str) {
        self.rows
            .retain(|row| !row.iter().any(|cell| cell.contains(marker)));
    }

    /// Removes the last column
    ///
    /// Exports terminate every line with a delimiter, which yields a trailing
    /// unnamed column.
    pub fn drop_last_column(&mut self) {
        if self.columns.pop().is_some() {
            for row in &mut self.rows {
                row.pop();
            }
        }
    }

    /// Removes spaces and non-breaking spaces from every cell of `column`
    pub fn strip_spaces(&mut self, column: &str) {
        self.map_column(column, |cell| {
            cell.retain(|c| c != ' ' && c != '\u{a0}');
        });
    }

    /// Collapses whitespace runs in every cell of `column` to single spaces and
    /// trims both ends
    pub fn collapse_whitespace(&mut self, column: &str) {
        self.map_column(column, |cell| {
            *cell = cell.split_whitespace().collect::<Vec<_>>().join(" ");
        });
    }

    fn map_column(&mut self, column: &str, f: impl Fn(&mut String)) {
        if let Some(index) = self.column_index(column) {
            self.rows
                .iter_mut()
                .for_each(|row| f(&mut row[index]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CleaningRules {
        CleaningRules {
            markers: vec!["Saldo końcowe".to_owned(), "Niniejszy dokument".to_owned()],
            numeric_columns: vec!["#Kwota".to_owned()],
            text_columns: vec!["#Opis".to_owned()],
        }
    }

    macro_rules! clean_test {
        (
            $name:ident
            $input:literal
            $expected:expr
        ) => {
            #[test]
            fn $name() {
                let mut table = Table::parse($input, b';').unwrap();
                table.clean(&rules());

                assert_eq!(table.columns(), ["#Data", "#Opis", "#Kwota"]);
                let expected: &[[&str; 3]] = &$expected;
                assert_eq!(table.rows(), expected);
            }
        };
    }

    clean_test!(plain_rows
        "#Data;#Opis;#Kwota;\n2024-01-02;Zakup;-12,50;\n2024-01-03;Wpłata;100,00;\n"
        [["2024-01-02", "Zakup", "-12,50"], ["2024-01-03", "Wpłata", "100,00"]]
    );
    clean_test!(empty_rows
        "#Data;#Opis;#Kwota;\n;;;\n2024-01-02;Zakup;-12,50;\n\n;\n"
        [["2024-01-02", "Zakup", "-12,50"]]
    );
    clean_test!(whitespace_rows_are_kept
        "#Data;#Opis;#Kwota;\n2024-01-02;Zakup;-12,50;\n ; ;;\n"
        [["2024-01-02", "Zakup", "-12,50"], [" ", "", ""]]
    );
    clean_test!(closing_balance
        "#Data;#Opis;#Kwota;\n2024-01-02;Zakup;-12,50;\n;;#Saldo końcowe;1 000,00 PLN\n"
        [["2024-01-02", "Zakup", "-12,50"]]
    );
    clean_test!(legal_notice
        "#Data;#Opis;#Kwota;\n2024-01-02;Zakup;-12,50;\nNiniejszy dokument sporządzono automatycznie\n"
        [["2024-01-02", "Zakup", "-12,50"]]
    );
    clean_test!(thousands_separators
        "#Data;#Opis;#Kwota;\n2024-01-02;Zakup;\"-1 234\u{a0}567,89\";\n"
        [["2024-01-02", "Zakup", "-1234567,89"]]
    );
    clean_test!(collapsed_whitespace
        "#Data;#Opis;#Kwota;\n2024-01-02;\"  PRZELEW \t  ZEWNĘTRZNY\n  PRZYCHODZĄCY \";1,00;\n"
        [["2024-01-02", "PRZELEW ZEWNĘTRZNY PRZYCHODZĄCY", "1,00"]]
    );
    clean_test!(short_rows_are_padded
        "#Data;#Opis;#Kwota;\n2024-01-02;Zakup\n"
        [["2024-01-02", "Zakup", ""]]
    );
    clean_test!(no_rows
        "#Data;#Opis;#Kwota;\n"
        []
    );

    #[test]
    fn long_rows_are_rejected() {
        let error = Table::parse("a;b\n1;2;3\n", b';').unwrap_err();
        assert!(matches!(
            error,
            TableError::TooManyFields { line: 2, expected: 2, found: 3 }
        ));
    }

    #[test]
    fn strip_spaces_keeps_other_characters() {
        let mut table = Table::parse("#Kwota\n\" -1\u{a0}2 3,4 5 \"\n", b';').unwrap();
        table.strip_spaces("#Kwota");
        assert_eq!(table.rows(), [["-123,45"]]);
    }

    #[test]
    fn rules_skip_missing_columns() {
        let mut table = Table::parse("a;b;\n  x  ;y;\n", b';').unwrap();
        table.clean(&rules());
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.rows(), [["  x  ", "y"]]);
    }

    #[test]
    fn drop_last_column_of_empty_table() {
        let mut table = Table::parse("", b';').unwrap();
        table.drop_last_column();
        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn column_index() {
        let table = Table::parse("a;b;c\n", b';').unwrap();
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("d"), None);
        assert_eq!(table.len(), 0);
    }
}
