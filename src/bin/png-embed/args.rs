use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use png_embed::ChunkType;

/// Embed and extract key/value metadata in PNG tEXt chunks.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "png-embed",
    bin_name = "png-embed",
    version,
    after_help = "Want more detail? Try the long '--help' flag!",
    after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
    /// Set diagnostic log level.
    ///
    /// This enables diagnostic logging, which is useful for investigating bugs. Use multiple
    /// times for more detail: -v for warnings, -vv for info, -vvv for debug, -vvvv for trace.
    /// Ignored when RUST_LOG is set.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    Embed(EmbedArgs),
    Extract(ExtractArgs),
    Chunks(ChunksArgs),
}

/// Insert a key/value tEXt chunk right after the IHDR chunk.
#[derive(Debug, Clone, Parser)]
pub struct EmbedArgs {
    /// Input PNG file.
    #[arg(long, short,
        value_hint = ValueHint::FilePath,
        value_name = "PATH",
    )]
    pub input: PathBuf,

    /// Output PNG file.
    #[arg(long, short,
        default_value = "out.png",
        value_hint = ValueHint::FilePath,
        value_name = "PATH",
    )]
    pub output: PathBuf,

    /// Key name for the data to inject.
    #[arg(long, short, default_value = "TEST_KEY")]
    pub key: String,

    /// Value to inject for the key.
    #[arg(long, default_value = "TEST_VALUE")]
    pub value: String,

    /// Parse the value as JSON and store its compact form.
    #[arg(long)]
    pub json: bool,
}

/// Print the tEXt entries of a PNG file.
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Input PNG file.
    #[arg(
        value_hint = ValueHint::FilePath,
        value_name = "PATH",
    )]
    pub input: PathBuf,

    /// Print only the value stored under this key.
    ///
    /// Fails if the key is not present.
    #[arg(long, short)]
    pub key: Option<String>,
}

/// List the chunks of a PNG file.
#[derive(Debug, Clone, Parser)]
pub struct ChunksArgs {
    /// Input PNG file.
    #[arg(
        value_hint = ValueHint::FilePath,
        value_name = "PATH",
    )]
    pub input: PathBuf,

    /// Only list chunks of this type.
    ///
    /// Can be given multiple times.
    #[arg(long = "type", short, value_name = "TYPE")]
    pub types: Vec<ChunkType>,
}
