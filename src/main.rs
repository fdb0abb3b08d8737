use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use hnstat::query::{self, Query, QueryOptions};
use hnstat::report::TextReport;
use hnstat::{EventLog, TimeRange, DEFAULT_THRESHOLD};

#[derive(Parser)]
#[command(name = "hnstat", version, about = "Distinct and top-K URL counts over a TSV event log")]
struct Cli {
    /// Largest K answered with the bounded selector instead of a full sort
    #[arg(long, global = true, default_value_t = DEFAULT_THRESHOLD)]
    threshold: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the number of distinct URLs
    Distinct {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print the most frequent URLs with their counts
    Top {
        #[arg(value_name = "NB_TOP_QUERIES")]
        nb_queries: usize,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Ignore events before this timestamp (inclusive bound)
    #[arg(long, value_name = "TIMESTAMP")]
    from: Option<u64>,

    /// Ignore events after this timestamp (inclusive bound)
    #[arg(long, value_name = "TIMESTAMP")]
    to: Option<u64>,

    /// Tab-separated `timestamp<TAB>url` file, or `-` for stdin
    #[arg(value_name = "INPUT_FILE")]
    file: PathBuf,
}

fn run(cli: Cli) -> hnstat::Result<()> {
    let (query, common) = match cli.command {
        Command::Distinct { common } => (Query::Distinct, common),
        Command::Top { nb_queries, common } => (Query::Top { k: nb_queries }, common),
    };

    let range = TimeRange::new(common.from, common.to);
    if range.is_empty() {
        log::warn!(
            "--from {:?} is after --to {:?}, no event can match",
            common.from,
            common.to
        );
    }
    let options = QueryOptions {
        range,
        threshold: cli.threshold,
    };

    let input = EventLog::open(&common.file)?;
    let stdout = io::stdout();
    let mut report = TextReport::new(stdout.lock());
    let outcome = query::run(query, &input, &options, &mut report)?;
    report.finish()?;

    log::debug!(
        "{} distinct keys, {} rows reported",
        outcome.distinct,
        outcome.reported
    );
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
