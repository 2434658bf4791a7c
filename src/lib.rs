//! # gxb - parallel Go cross-compilation
//!
//! gxb builds one Go project for many GOOS/GOARCH targets at once. It asks
//! the `go` toolchain which targets it supports, narrows that list with the
//! user's `OS[/ARCH]` filters, then runs one `go build` per target in
//! parallel and reports each result.
//!
//! ## Quick Start
//!
//! ```bash
//! # Every linux target plus windows/amd64
//! gxb build --target linux --target windows/amd64
//!
//! # See what the toolchain supports
//! gxb list --target darwin
//! ```
//!
//! ## Module Organization
//!
//! - [`target`] - `OS[/ARCH]` filters and catalog narrowing
//! - [`toolchain`] - Target catalog queries against `go tool dist list`
//! - [`build`] - Job construction and parallel dispatch
//! - [`config`] - Build parameters and `gxb.toml`
//! - [`commands`] - CLI command handlers

/// Parallel build dispatch.
pub mod build;

/// CLI command handlers extracted from main.
pub mod commands;

/// Build parameters and `gxb.toml` parsing.
pub mod config;

/// Target filter parsing and matching.
pub mod target;

/// Toolchain catalog queries.
pub mod toolchain;

/// Terminal reporting utilities.
pub mod ui;
