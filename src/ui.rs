//! Terminal reporting.
//!
//! All user-facing output goes through a [`Reporter`], which carries the
//! verbosity settings explicitly instead of a process-wide flag. The
//! reporter also hands out the progress bar used while builds run, and
//! [`Table`] renders aligned listings such as the target catalog.

use colored::*;
use console::{Alignment, measure_text_width, pad_str};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    verbose: bool,
    quiet: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
        }
    }

    /// A reporter that prints nothing to stdout and draws no progress bar.
    /// Warnings and errors still reach stderr.
    pub fn quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    pub fn verbose(&self, msg: impl Display) {
        if self.is_verbose() {
            println!("   {} {}", "verbose:".dimmed(), msg);
        }
    }

    pub fn info(&self, msg: impl Display) {
        if !self.quiet {
            println!("{} {}", "ℹ".blue(), msg);
        }
    }

    pub fn success(&self, msg: impl Display) {
        if !self.quiet {
            println!("{} {}", "✓".green(), msg);
        }
    }

    pub fn warn(&self, msg: impl Display) {
        eprintln!("{} {}", "!".yellow(), msg);
    }

    pub fn error(&self, msg: impl Display) {
        eprintln!("{} {}", "x".red(), msg);
    }

    /// Progress bar for `len` units of work. Hidden in quiet mode.
    pub fn progress(&self, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// Column-aligned table with a bold header row.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }
        widths
    }

    /// Render to lines without trailing whitespace.
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        let line = |cells: &[String], bold: bool| -> String {
            let joined = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| {
                    let padded = pad_str(cell, w, Alignment::Left, None).into_owned();
                    if bold {
                        padded.bold().to_string()
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            format!("  {}", joined.trim_end())
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(&self.headers, true));
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push(format!("  {}", "─".repeat(rule_width).dimmed()));
        for row in &self.rows {
            out.push(line(row, false));
        }
        out
    }

    pub fn print(&self) {
        for line in self.render() {
            println!("{line}");
        }
    }
}
