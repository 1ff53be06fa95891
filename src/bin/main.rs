use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bank2qif::{Bank, Config, ConvertError};

/// Convert CSV files with bank reports to QIF format
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Path to the input CSV file
    #[clap(short = 'i', long = "in")]
    input: PathBuf,

    /// Path to the output QIF file, defaults to the input path with a `.qif` extension
    #[clap(short = 'o', long = "out")]
    output: Option<PathBuf>,

    /// The bank that issued the export
    #[clap(short = 'b', long, arg_enum)]
    bank: KnownBank,
}

#[derive(Clone, Copy, Debug, clap::ArgEnum)]
enum KnownBank {
    /// Implemented
    Mbank,
    /// Documented, not yet implemented
    MbankCredit,
    /// Not yet implemented
    Alior,
    /// Not yet implemented
    Santander,
}

impl From<KnownBank> for Bank {
    fn from(bank: KnownBank) -> Self {
        match bank {
            KnownBank::Mbank => Bank::Mbank,
            KnownBank::MbankCredit => Bank::MbankCredit,
            KnownBank::Alior => Bank::Alior,
            KnownBank::Santander => Bank::Santander,
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new(args.input, args.output, args.bank.into());
    let summary = bank2qif::convert(&config)
        .with_context(|| format!("failed to convert {}", config.input().display()))?;

    println!(
        "QIF file with {} transactions written to: {}",
        summary.rows_written,
        summary.output.display()
    );

    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            let code = error
                .downcast_ref::<ConvertError>()
                .map_or(1, ConvertError::exit_code);
            ExitCode::from(code)
        }
    }
}
