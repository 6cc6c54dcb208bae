//! jsm2cjs - rewrite a JSM program tree into CommonJS
//!
//! Reads one Babel JSON AST (`File` or `Program`), runs the transform and
//! writes the rewritten tree as JSON. Parsing and printing source text is
//! left to the JavaScript side of the pipeline.

mod config;

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Parser;
use jsm_ast::Program;
use jsm_transform::{RuleKind, Transformer};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "jsm2cjs", version, about = "Rewrite a JSM module tree into CommonJS")]
struct Cli {
    /// Babel JSON AST to rewrite; reads stdin when omitted
    input: Option<PathBuf>,

    /// Where to write the rewritten tree; writes stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (default: ./jsm2cjs.{toml,yaml,json} if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rewrite only specifiers starting with this literal prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Rewrite only specifiers matching this regex
    #[arg(long, conflicts_with = "prefix")]
    regex: Option<String>,

    /// Remove the matched prefix from rewritten specifiers
    #[arg(long)]
    strip_prefix: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?.with_flags(
        cli.prefix.clone(),
        cli.regex.clone(),
        cli.strip_prefix,
    );
    let options = config.to_options()?;
    info!("Using {} (strip prefix: {})", options.path_pattern, options.strip_prefix);

    let source = read_input(cli.input.as_deref())?;
    let mut program = Program::from_json(&source).context("Failed to read program tree")?;

    let report = Transformer::with_options(options).transform(&mut program)?;
    info!(
        "Rewrote {} import(s), {} lazy getter(s); exporting {:?}",
        report.count(RuleKind::ImportCallBinding),
        report.count(RuleKind::LazyGetterCall),
        report.exports
    );

    let rendered = if cli.pretty {
        program.to_json_pretty()?
    } else {
        program.to_json()?
    };
    write_output(cli.output.as_deref(), &rendered)
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jsm_cli=info,jsm_transform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write stdout")
        }
    }
}
