mod browser;
mod cli;
mod config;
mod errors;
mod extract;
mod input;
mod lookup;
mod output;
mod scrape;

use std::process::ExitCode;

use browser::BrowserSession;
use cli::Cli;
use config::Config;
use input::collect_domains;
use lookup::lookup_with_retry;
use output::OutputMode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::from_args();

    let mut config = Config::from_env();
    config.merge_with_cli(&cli);
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let domains = match collect_domains(&cli) {
        Ok(domains) => domains,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if domains.is_empty() {
        eprintln!("Usage: icplookup [-t <target.xyz>] [-l <lists.txt>]");
        eprintln!("Run 'icplookup --help' for all options.");
        return ExitCode::FAILURE;
    }

    let mode = if config.output.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let session = match BrowserSession::launch(&config.browser).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    for domain in &domains {
        match lookup_with_retry(&session, domain, &config.lookup).await {
            Ok(record) => match record.render(mode) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => eprintln!("Failed to render result for '{domain}': {e}"),
            },
            Err(e) => {
                // Exhausted retries: log and move on to the next domain.
                eprintln!("Lookup failed for '{domain}' after {} attempts: {e}", config.lookup.retries);
            }
        }
    }

    if let Err(e) = session.shutdown().await {
        if config.lookup.debug {
            eprintln!("Browser shutdown: {e}");
        }
    }

    // The run completed; per-domain failures were already reported.
    ExitCode::SUCCESS
}
