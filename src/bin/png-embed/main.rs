#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::{debug, warn};

use crate::args::Action;

mod args;
mod chunks;
mod embed;
mod extract;
mod logs;

fn main() -> miette::Result<()> {
    let logs_on = logs::from_env().into_diagnostic()?;

    debug!("parsing arguments");
    let args = args::Args::parse();

    if logs_on {
        if args.verbose > 0 {
            warn!("ignoring logging options from args");
        }
    } else {
        logs::from_args(&args).into_diagnostic()?;
    }

    debug!(?args, "got arguments");

    match args.action {
        Action::Embed(args) => embed::embed(args),
        Action::Extract(args) => extract::extract(args),
        Action::Chunks(args) => chunks::chunks(args),
    }
}
