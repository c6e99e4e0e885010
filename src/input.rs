//! Domain list collection.
//!
//! Resolves the set of domains to look up from one of three sources, in
//! strict precedence order: explicit `--target` flag, `--list` file, piped
//! standard input. File and stream sources yield one domain per non-empty
//! line. Source errors here are fatal; nothing has been looked up yet.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::cli::Cli;
use crate::errors::{IcpLookupError, Result};

/// Collect the ordered domain list for this run.
///
/// Returns an empty vector when no source was provided at all (the caller
/// prints usage and exits) and an error when a provided source cannot be
/// read.
pub fn collect_domains(cli: &Cli) -> Result<Vec<String>> {
    if let Some(ref target) = cli.target {
        let trimmed = target.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![trimmed.to_string()]);
    }

    if let Some(ref path) = cli.list {
        return domains_from_file(path);
    }

    // Only consume stdin when something is actually piped in; an attached
    // terminal means no input source was provided.
    if !atty::is(atty::Stream::Stdin) {
        return domains_from_reader(io::stdin().lock())
            .map_err(|e| IcpLookupError::StdinRead { source: e });
    }

    Ok(Vec::new())
}

fn domains_from_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .map_err(|e| IcpLookupError::list_file(path.to_string_lossy(), e))?;
    domains_from_reader(BufReader::new(file))
        .map_err(|e| IcpLookupError::list_file(path.to_string_lossy(), e))
}

fn domains_from_reader<R: Read>(reader: R) -> io::Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            domains.push(trimmed.to_string());
        }
    }
    Ok(domains)
}
