use std::io::{stdout, Write};

use miette::{IntoDiagnostic, WrapErr};
use png_embed::scan;
use tracing::info;

use crate::args::ChunksArgs;

pub(crate) fn chunks(args: ChunksArgs) -> miette::Result<()> {
    info!(input = ?args.input, filter = ?args.types, "list chunks");
    let image = std::fs::read(&args.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.input.display()))?;

    let mut out = stdout().lock();
    for chunk in scan(&image, &args.types).into_diagnostic()? {
        let chunk = chunk.into_diagnostic()?;
        let kind = if chunk.chunk_type.is_critical() {
            "critical"
        } else {
            "ancillary"
        };
        writeln!(
            out,
            "{:>10}  {}  {:>10}  {:08x}  {kind}",
            chunk.offset, chunk.chunk_type, chunk.length, chunk.crc
        )
        .into_diagnostic()?;
    }

    Ok(())
}
