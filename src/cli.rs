use std::path::PathBuf;

use clap::Parser;

/// Command-line interface definition.
///
/// Input precedence when several sources are supplied:
/// explicit target > list file > piped standard input.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Look up ICP filing records for domains via the chinaz.com public query pages"
)]
pub struct Cli {
    /// Single target domain (e.g. example.com)
    #[arg(short = 't', long = "target", value_name = "DOMAIN")]
    pub target: Option<String>,

    /// File containing a newline-delimited domain list
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Emit each result as a single-line JSON object instead of labeled text
    #[arg(long)]
    pub json: bool,

    /// Lookup attempts per domain
    #[arg(short = 'r', long = "retries", value_name = "N", default_value_t = 3)]
    pub retries: u32,

    /// Verbose diagnostic tracing on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments from process args.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Is debug tracing enabled?
    pub fn is_debug(&self) -> bool {
        self.debug
    }
}
