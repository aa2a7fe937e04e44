//! Overrides command handler
//!
//! Scans text offline for override directives, to check a PR description
//! before pushing it.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use branchwatch_core::domain::{OverrideFlag, OverrideScan};
use clap::Args;
use colored::*;

/// Arguments of the overrides command
#[derive(Args, Debug)]
pub struct OverridesArgs {
    /// File to scan (stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Honor directives without a workflow name
    #[arg(long)]
    allow_all: bool,
}

/// Handle the overrides command
pub async fn handle_overrides_command(args: OverridesArgs) -> Result<ExitCode> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let scan = OverrideScan::parse(Some(&text), args.allow_all);
    print_scan(&scan);

    Ok(ExitCode::SUCCESS)
}

fn print_scan(scan: &OverrideScan) {
    if scan.is_empty() {
        println!("{}", "No override directives found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} override(s):", scan.flags.len()).bold()
        );
        for flag in &scan.flags {
            match flag {
                OverrideFlag::All => println!("  - {}", "all workflows".cyan().bold()),
                OverrideFlag::Named(name) => println!("  - {}", name.cyan()),
            }
        }
    }

    for diagnostic in &scan.diagnostics {
        println!("{} {}", "warning:".yellow().bold(), diagnostic);
    }
}
