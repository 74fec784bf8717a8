use std::{env::var, io::Error, io::Result};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

pub fn from_env() -> Result<bool> {
    if var("RUST_LOG").is_ok() {
        // Logs stay off stdout, which carries extracted values
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .map_err(Error::other)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

pub fn from_args(args: &Args) -> Result<()> {
    let verbosity = args.verbose;
    if verbosity == 0 {
        return Ok(());
    }

    let mut builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(match verbosity {
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        });

    if verbosity > 2 {
        use tracing_subscriber::fmt::format::FmtSpan;
        builder = builder.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
    }

    match if verbosity > 3 {
        builder.pretty().try_init()
    } else {
        builder.try_init()
    } {
        Ok(_) => info!("logging initialised"),
        Err(e) => eprintln!("Failed to initialise logging, continuing with none\n{e}"),
    }

    Ok(())
}
