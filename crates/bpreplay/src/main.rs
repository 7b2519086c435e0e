use std::path::PathBuf;

use bpreplay::{Query, Report, read_actions_from, replay};
use breakpoints::{BreakpointStore, StoreConfig};
use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

/// Replay a breakpoint action log and print the resulting breakpoint state
#[derive(Debug, Parser)]
struct Args {
    /// Action log with one JSON encoded action per line
    actions: PathBuf,

    /// Store configuration (JSON)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// List the breakpoints in this source
    #[clap(short, long)]
    source: Option<String>,

    /// Show the breakpoint on this line of `--source`
    #[clap(short, long, requires = "source")]
    line: Option<u32>,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed command line arguments");

    let config = match &args.config {
        Some(path) => StoreConfig::load_from(path).context("loading store configuration")?,
        None => StoreConfig::default(),
    };

    let actions = read_actions_from(&args.actions).context("reading actions")?;
    tracing::debug!(count = actions.len(), "replaying actions");

    let store = BreakpointStore::new(config);
    let snapshot = replay(&store, &actions);
    let report = Report::new(
        &snapshot,
        &Query {
            source: args.source,
            line: args.line,
        },
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        print!("{report}");
    }

    Ok(())
}
