// SPDX-License-Identifier: PMPL-1.0-or-later

//! qstr-forge: generate qstr headers from preprocessed sources
//!
//! Without `--translation` the output is the `QENUM` listing. With it, the
//! output is the full `QDEF` table plus compressed translations, and the
//! message count goes to `--compression-filename`.

use anyhow::{Context, Result};
use clap::Parser;
use qstr_forge::generate::{generate_data, generate_enums};
use qstr_forge::i18n::MoCatalog;
use qstr_forge::{collect, logging, report};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qstr-forge")]
#[command(version)]
#[command(about = "Process QSTR definitions into headers for compilation")]
#[command(long_about = None)]
struct Cli {
    /// Preprocessed files containing Q(), QCFG() and TRANSLATE() lines
    #[arg(value_name = "INFILES", required = true)]
    infiles: Vec<PathBuf>,

    /// Compiled gettext catalog (.mo) for TRANSLATE() messages
    #[arg(long, requires = "compression_filename")]
    translation: Option<PathBuf>,

    /// Header receiving the message count and substitution cutoff
    #[arg(long, alias = "compression_filename")]
    compression_filename: Option<PathBuf>,

    /// Write the header here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON build summary
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print a build summary to stderr
    #[arg(long)]
    summary: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let collection = collect::collect_files(&cli.infiles).context("collecting qstrs")?;

    let generated = match &cli.translation {
        Some(path) => {
            let catalog = MoCatalog::open(path)
                .with_context(|| format!("loading translations from {}", path.display()))?;
            generate_data(&collection, &catalog)?
        }
        None => generate_enums(&collection),
    };

    match &cli.output {
        Some(path) => std::fs::write(path, &generated.header)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(generated.header.as_bytes())?;
            stdout.flush()?;
        }
    }

    if let (Some(path), Some(content)) = (&cli.compression_filename, &generated.compression_header)
    {
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    }

    if let Some(path) = &cli.report {
        report::write_summary(&generated.summary, path)
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    if cli.summary {
        report::print_summary(&generated.summary);
    }

    Ok(())
}
