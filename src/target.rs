//! Target filters.
//!
//! A filter selects one OS and, optionally, one architecture out of the
//! toolchain catalog. Filters come from `OS[/ARCH]` strings on the command
//! line or in `gxb.toml`.

use crate::toolchain::DistInfo;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A user request to build for one OS, optionally narrowed to one ARCH.
///
/// An empty `arch` matches every architecture of `os`. Equality ignores the
/// spelling the filter was parsed from.
#[derive(Debug, Clone, Default)]
pub struct TargetFilter {
    pub os: String,
    pub arch: String,
    raw: String,
}

impl PartialEq for TargetFilter {
    fn eq(&self, other: &Self) -> bool {
        self.os == other.os && self.arch == other.arch
    }
}

impl Eq for TargetFilter {}

impl Hash for TargetFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.os.hash(state);
        self.arch.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid target specification: '{0}' (expected OS or OS/ARCH)")]
pub struct ParseTargetError(pub String);

impl TargetFilter {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        let mut filter = Self {
            os: os.into(),
            arch: arch.into(),
            raw: String::new(),
        };
        filter.raw = filter.to_string();
        filter
    }

    /// The string as the user wrote it, before case folding.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, dist: &DistInfo) -> bool {
        if self.arch.is_empty() {
            self.os == dist.os
        } else {
            self.os == dist.os && self.arch == dist.arch
        }
    }
}

impl FromStr for TargetFilter {
    type Err = ParseTargetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(ParseTargetError(raw.to_string()));
        }

        let lower = raw.to_lowercase();
        let parts: Vec<&str> = lower.split('/').collect();

        let (os, arch) = match parts.as_slice() {
            [os] => (*os, ""),
            [os, arch] => (*os, *arch),
            _ => return Err(ParseTargetError(raw.to_string())),
        };
        Ok(Self {
            os: os.to_string(),
            arch: arch.to_string(),
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for TargetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arch.is_empty() {
            write!(f, "{}", self.os)
        } else {
            write!(f, "{}/{}", self.os, self.arch)
        }
    }
}

/// Select the catalog entries matched by `filters`.
///
/// Filter order is the outer loop and catalog order the inner one, so an
/// entry matched by two filters shows up twice. No filters selects everything.
pub fn resolve(filters: &[TargetFilter], catalog: &[DistInfo]) -> Vec<DistInfo> {
    if filters.is_empty() {
        return catalog.to_vec();
    }

    filters
        .iter()
        .flat_map(|filter| catalog.iter().filter(move |dist| filter.matches(dist)))
        .cloned()
        .collect()
}

/// Parse raw target strings, splitting them into usable filters and the
/// strings that failed to parse. Callers warn about the rejects.
pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> (Vec<TargetFilter>, Vec<ParseTargetError>) {
    let mut filters = Vec::new();
    let mut rejected = Vec::new();

    for item in raw {
        match item.as_ref().parse::<TargetFilter>() {
            Ok(filter) => filters.push(filter),
            Err(e) => rejected.push(e),
        }
    }

    (filters, rejected)
}
