#[path = "mailshape-cli/args.rs"]
mod args;
#[path = "mailshape-cli/output.rs"]
mod output;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use mailshape::{ShapeReport, check_shape};

use std::io::{self, BufRead};

#[cfg(feature = "with-tracing")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let fallback = if verbose { "mailshape=debug" } else { "mailshape=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "with-tracing"))]
fn init_logging(_verbose: bool) {}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut rows: Vec<ShapeReport> = Vec::new();

    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("lecture stdin")?;
            let email = line.trim_end_matches('\r');
            if email.is_empty() {
                continue;
            }
            rows.push(check_shape(email));
        }
    } else if let Some(Commands::Validate { email }) = &cli.cmd {
        rows.push(check_shape(email));
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalides, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
