use std::io::{stdout, Write};

use miette::{bail, IntoDiagnostic, WrapErr};
use png_embed::extract_file;
use tracing::info;

use crate::args::ExtractArgs;

pub(crate) fn extract(args: ExtractArgs) -> miette::Result<()> {
    info!(input = ?args.input, "extract tEXt entries");
    let text = extract_file(&args.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("extracting from {}", args.input.display()))?;

    let mut out = stdout().lock();
    if let Some(key) = &args.key {
        let Some(value) = text.get(key.as_bytes()) else {
            bail!("no tEXt entry with key {key:?}");
        };
        out.write_all(value).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
        return Ok(());
    }

    for (key, value) in &text {
        writeln!(
            out,
            "{}={}",
            String::from_utf8_lossy(key),
            String::from_utf8_lossy(value)
        )
        .into_diagnostic()?;
    }

    Ok(())
}
