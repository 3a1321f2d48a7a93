use std::env;
use std::fs;
use std::process;

use anyhow::{Context, Result};
use log::error;

use roombook::{parse_batch, render, schedule};

mod cli;

/// Written to the output file in place of a schedule when the input cannot
/// be processed.
const INVALID_INPUT: &str = "INVALID INPUT";

fn setup_logging() {
    const LOG_ENV: &str = "ROOMBOOK_LOG";

    if env::var(LOG_ENV).is_err() {
        env::set_var(LOG_ENV, "roombook=info");
    }

    pretty_env_logger::init_custom_env(LOG_ENV);
}

fn run(args: &cli::Args) -> Result<String> {
    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input file {}", args.input.display()))?;

    let batch = parse_batch(&input).context("failed to parse booking request batch")?;
    let schedule = schedule(Some(&batch))?;

    if args.json {
        Ok(serde_json::to_string_pretty(&schedule)?)
    } else {
        Ok(render(&schedule))
    }
}

fn main() {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let (output, failed) = match run(&args) {
        Ok(report) => (report, false),
        Err(err) => {
            error!("{err:#}");
            (INVALID_INPUT.to_string(), true)
        }
    };

    if let Err(err) = fs::write(&args.output, output) {
        eprintln!(
            "failed to write output file {}: {err}",
            args.output.display()
        );
        process::exit(1);
    }

    if failed {
        process::exit(1);
    }
}
