//! List command handler
//!
//! Handles `gxb list`: print the toolchain's target catalog, optionally
//! narrowed by the same filters `gxb build` accepts.

use crate::target;
use crate::toolchain::{CancelToken, DistInfo, Toolchain};
use crate::ui::{Reporter, Table};
use anyhow::{Context, Result};
use colored::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ListArgs {
    pub targets: Vec<String>,
    pub first_class: bool,
    pub json: bool,
    pub timeout: Duration,
    pub verbose: bool,
    pub toolchain: Toolchain,
}

pub fn run_list(args: &ListArgs) -> Result<()> {
    let reporter = if args.json {
        Reporter::quiet()
    } else {
        Reporter::new(args.verbose)
    };

    let (filters, rejected) = target::parse_all(&args.targets);
    for err in &rejected {
        reporter.warn(format!("{err}, ignoring it"));
    }

    let cancel = CancelToken::with_timeout(args.timeout);
    let mut dists = args
        .toolchain
        .list_targets(&filters, &cancel, &reporter)
        .context("list targets")?;
    if args.first_class {
        dists.retain(|d| d.first_class);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dists)?);
        return Ok(());
    }

    render_catalog(&dists);
    Ok(())
}

fn yes_no(flag: bool) -> String {
    if flag {
        "yes".green().to_string()
    } else {
        "no".dimmed().to_string()
    }
}

fn render_catalog(dists: &[DistInfo]) {
    println!(
        "{} {}",
        "🎯".cyan(),
        "Supported Cross-Compilation Targets".bold()
    );
    println!();

    if dists.is_empty() {
        println!("{} No targets to show.", "!".yellow());
        return;
    }

    let mut table = Table::new(&["OS", "ARCH", "CGO", "FIRST-CLASS"]);
    for dist in dists {
        table.add_row(vec![
            dist.os.clone(),
            dist.arch.clone(),
            yes_no(dist.cgo_supported),
            yes_no(dist.first_class),
        ]);
    }
    table.print();

    println!();
    println!(
        "{} targets. Build some with {}",
        dists.len(),
        "gxb build --target <os>[/<arch>]".cyan()
    );
}
