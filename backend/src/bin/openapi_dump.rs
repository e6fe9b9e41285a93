//! Print the OpenAPI document for client generation and review.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use newsroom::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the newsroom OpenAPI document",
    version
)]
struct CliArgs {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn render(format: Format) -> Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().wrap_err("serialise OpenAPI as JSON"),
        Format::Yaml => doc.to_yaml().wrap_err("serialise OpenAPI as YAML"),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let document = render(args.format)?;
    match args.output {
        Some(path) => fs::write(&path, document)
            .wrap_err_with(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
