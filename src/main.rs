use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tripsplit::application::ledger::TripLedger;
use tripsplit::infrastructure::in_memory::InMemoryTripStore;
use tripsplit::interfaces::csv::settlement_writer::SettlementWriter;
use tripsplit::interfaces::json::trip_reader::TripReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Trip snapshot JSON file with `members` and `expenses`
    input: PathBuf,

    /// Print each member's net balance instead of settlements
    #[arg(long)]
    balances: bool,

    /// Leave out expenses whose split shares do not add up
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = TripReader::from_reader(BufReader::new(file)).into_diagnostic()?;
    let (members, records) = reader.into_parts();

    let mut expenses = Vec::new();
    for record in records {
        match record {
            Ok(expense) => {
                if cli.strict {
                    if let Err(e) = expense.check_shares() {
                        eprintln!("Skipping expense {}: {}", expense.id, e);
                        continue;
                    }
                }
                expenses.push(expense);
            }
            Err(e) => {
                eprintln!("Error reading expense: {}", e);
            }
        }
    }

    // The snapshot is loaded as-is; stale references are the engine's to skip.
    let ledger = TripLedger::new(Box::new(InMemoryTripStore::with_snapshot(
        members, expenses,
    )));

    let stdout = io::stdout();
    let mut writer = SettlementWriter::new(stdout.lock());
    if cli.balances {
        let balances = ledger.balances().await.into_diagnostic()?;
        writer.write_balances(&balances).into_diagnostic()?;
    } else {
        let settlements = ledger.settlements().await.into_diagnostic()?;
        writer.write_settlements(&settlements).into_diagnostic()?;
    }

    Ok(())
}
