use std::fs;

use miette::{IntoDiagnostic, WrapErr};
use png_embed::{embed_value, Value};
use tracing::info;

use crate::args::EmbedArgs;

pub(crate) fn embed(args: EmbedArgs) -> miette::Result<()> {
    info!(input = ?args.input, "read image");
    let image = fs::read(&args.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.input.display()))?;

    let value = if args.json {
        let json: serde_json::Value = serde_json::from_str(&args.value)
            .into_diagnostic()
            .wrap_err("parsing --value as JSON")?;
        Value::from(json)
    } else {
        Value::from(args.value)
    };

    info!(key = %args.key, "embed tEXt chunk");
    let out = embed_value(&image, &args.key, value).into_diagnostic()?;

    // Only write once the whole image has been produced
    fs::write(&args.output, &out)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {}", args.output.display()))?;
    info!(output = ?args.output, size = out.len(), "wrote image");

    Ok(())
}
