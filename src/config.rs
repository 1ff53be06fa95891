use std::path::{Path, PathBuf};

use crate::bank::Bank;

/// The settings of one conversion run
///
/// Built once at startup and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    input: PathBuf,
    output: PathBuf,
    bank: Bank,
}

impl Config {
    /// Without an explicit output path, the output is written next to the input
    /// with a `qif` extension
    pub fn new(input: PathBuf, output: Option<PathBuf>, bank: Bank) -> Self {
        let output = output.unwrap_or_else(|| input.with_extension("qif"));
        Self { input, output, bank }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_replaces_extension() {
        let config = Config::new("exports/lista_operacji.csv".into(), None, Bank::Mbank);
        assert_eq!(config.output(), Path::new("exports/lista_operacji.qif"));
    }

    #[test]
    fn default_output_without_extension() {
        let config = Config::new("history".into(), None, Bank::Mbank);
        assert_eq!(config.output(), Path::new("history.qif"));
    }

    #[test]
    fn explicit_output() {
        let config = Config::new("a.csv".into(), Some("b.txt".into()), Bank::Alior);
        assert_eq!(config.input(), Path::new("a.csv"));
        assert_eq!(config.output(), Path::new("b.txt"));
        assert_eq!(config.bank(), Bank::Alior);
    }
}
