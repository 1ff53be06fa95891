use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::table::CleaningRules;

/// A bank identifier was not recognized
#[derive(Debug, thiserror::Error)]
#[error("unknown bank `{0}`")]
pub struct UnknownBank(String);

/// The banks whose exports can be requested
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bank {
    /// mBank personal account history
    Mbank,
    /// mBank credit card history
    MbankCredit,
    /// Alior Bank
    Alior,
    /// Santander Bank Polska
    Santander,
}

impl Bank {
    /// All banks in the order they are offered to users
    pub const ALL: [Bank; 4] = [Bank::Mbank, Bank::MbankCredit, Bank::Alior, Bank::Santander];

    /// The identifier used on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Bank::Mbank => "mbank",
            Bank::MbankCredit => "mbank-credit",
            Bank::Alior => "alior",
            Bank::Santander => "santander",
        }
    }

    /// The export profile of this bank, if its format is implemented
    pub fn profile(&self) -> Option<BankProfile> {
        match self {
            Bank::Mbank => Some(BankProfile::mbank()),
            Bank::MbankCredit | Bank::Alior | Bank::Santander => None,
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Bank {
    type Err = UnknownBank;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bank::ALL
            .into_iter()
            .find(|bank| bank.id() == s)
            .ok_or_else(|| UnknownBank(s.to_owned()))
    }
}

/// Which columns feed which QIF fields
#[derive(Clone, Debug)]
pub struct FieldMap {
    pub date: String,
    pub amount: String,
    pub payee: String,
    /// First part of the memo
    pub description: String,
    /// Second part of the memo
    pub title: String,
}

/// Everything that is specific to the export format of one bank
#[derive(Clone, Debug)]
pub struct BankProfile {
    /// The encoding the export is always decoded with
    pub encoding: &'static Encoding,
    /// Bytes without a character in the bank's code page
    pub undefined_bytes: &'static [u8],
    /// Top level domain handed to the encoding detector as a hint
    pub tld: &'static [u8],
    /// The header row, possibly a substring of the actual line
    pub header_signature: String,
    pub delimiter: u8,
    pub cleaning: CleaningRules,
    pub fields: FieldMap,
}

impl BankProfile {
    /// The account history export of mBank
    pub fn mbank() -> Self {
        const DATE_POSTED: &str = "#Data księgowania";
        const DATE: &str = "#Data operacji";
        const DESCRIPTION: &str = "#Opis operacji";
        const TITLE: &str = "#Tytuł";
        const PAYEE: &str = "#Nadawca/Odbiorca";
        const ACCOUNT: &str = "#Numer konta";
        const AMOUNT: &str = "#Kwota";
        const BALANCE: &str = "#Saldo po operacji";

        let header_signature = [DATE_POSTED, DATE, DESCRIPTION, TITLE, PAYEE, ACCOUNT, AMOUNT, BALANCE]
            .iter()
            .map(|column| format!("{};", column))
            .collect();

        Self {
            encoding: encoding_rs::WINDOWS_1250,
            undefined_bytes: &[0x81, 0x83, 0x88, 0x90, 0x98],
            tld: b"pl",
            header_signature,
            delimiter: b';',
            cleaning: CleaningRules {
                markers: vec!["Saldo końcowe".to_owned(), "Niniejszy dokument".to_owned()],
                numeric_columns: vec![BALANCE.to_owned(), AMOUNT.to_owned()],
                text_columns: vec![TITLE.to_owned(), PAYEE.to_owned(), DESCRIPTION.to_owned()],
            },
            fields: FieldMap {
                date: DATE.to_owned(),
                amount: AMOUNT.to_owned(),
                payee: PAYEE.to_owned(),
                description: DESCRIPTION.to_owned(),
                title: TITLE.to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for bank in Bank::ALL {
            assert_eq!(bank.to_string().parse::<Bank>().unwrap(), bank);
        }
        assert!("ing".parse::<Bank>().is_err());
    }

    #[test]
    fn only_mbank_is_implemented() {
        assert!(Bank::Mbank.profile().is_some());
        assert!(Bank::MbankCredit.profile().is_none());
        assert!(Bank::Alior.profile().is_none());
        assert!(Bank::Santander.profile().is_none());
    }

    #[test]
    fn mbank_header_signature() {
        assert_eq!(
            BankProfile::mbank().header_signature,
            "#Data księgowania;#Data operacji;#Opis operacji;#Tytuł;#Nadawca/Odbiorca;#Numer konta;#Kwota;#Saldo po operacji;"
        );
    }
}
