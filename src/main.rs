use std::io;
use std::process::ExitCode;

use clap::Parser;
use tiny_db::{Repl, Table};
use tracing_subscriber::EnvFilter;

/// Tiny single-table database speaking a line protocol on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "db", version, about)]
struct Args {
    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log filter directives, e.g. "tiny_db=trace"
    #[arg(long, env = "TINY_DB_LOG")]
    log_filter: Option<String>,
}

fn init_logging(args: &Args) {
    let filter = match &args.log_filter {
        Some(directives) => EnvFilter::new(directives),
        None if args.verbose => EnvFilter::new("tiny_db=debug,db=debug"),
        None => EnvFilter::new("warn"),
    };

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(Table::new(), stdin.lock(), stdout.lock());

    match repl.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
