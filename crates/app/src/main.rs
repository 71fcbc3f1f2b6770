use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use textmatch_core::{
    FetchOptions, HttpReferenceFetcher, OverlapChecker, OverlapReport, ReferenceList,
    DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENT,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "textmatch", version)]
struct Cli {
    /// Document to check; only .pdf and .docx files are supported.
    file: PathBuf,

    /// JSON file with the reference URL list, shaped {"urls": [...]}.
    #[arg(long, env = "TEXTMATCH_SOURCES", default_value = "sources.json")]
    sources: PathBuf,

    /// Per-reference fetch timeout in seconds.
    #[arg(long, env = "TEXTMATCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Maximum number of reference fetches in flight.
    #[arg(long, env = "TEXTMATCH_MAX_CONCURRENT", default_value_t = DEFAULT_MAX_CONCURRENT)]
    max_concurrent: usize,

    /// Print the report as JSON instead of the human-readable summary.
    #[arg(long, env = "TEXTMATCH_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "textmatch boot"
    );

    let references = ReferenceList::load(&cli.sources)
        .map_err(|error| anyhow::anyhow!("{}: {error}", cli.sources.display()))?;
    if references.is_empty() {
        warn!(sources = %cli.sources.display(), "reference list is empty; no matches are possible");
    }
    info!(sources = %cli.sources.display(), count = references.len(), "reference list loaded");

    let fetcher = HttpReferenceFetcher::new(FetchOptions {
        timeout: Duration::from_secs(cli.timeout_secs),
        max_concurrent: cli.max_concurrent,
    })
    .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    let checker = OverlapChecker::new(fetcher, references)
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    let file_name = cli
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("path has no usable file name: {}", cli.file.display()))?;
    let bytes = std::fs::read(&cli.file)?;

    let report = checker
        .check_file(file_name, bytes)
        .await
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &OverlapReport) {
    println!("overall: {:.2}%", report.overall_percent);

    if report.matches.is_empty() {
        println!("no references scored above the similarity threshold");
    } else {
        for (position, matched) in report.matches.iter().enumerate() {
            println!(
                "[{}] {} similarity={:.2}%",
                position + 1,
                matched.source,
                matched.similarity * 100.0
            );
        }
    }

    println!("excerpt:\n{}", report.excerpt);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Defaults and environment fallbacks are checked in one test because the
    // process environment is shared across the test harness threads.
    #[test]
    fn cli_knobs_default_to_fetch_constants_and_read_the_environment() {
        let defaults = Cli::try_parse_from(["textmatch", "essay.pdf"]).expect("defaults parse");
        assert_eq!(defaults.timeout_secs, DEFAULT_FETCH_TIMEOUT.as_secs());
        assert_eq!(defaults.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert!(!defaults.json);

        std::env::set_var("TEXTMATCH_TIMEOUT_SECS", "3");
        std::env::set_var("TEXTMATCH_MAX_CONCURRENT", "2");
        std::env::set_var("TEXTMATCH_JSON", "true");
        let tuned = Cli::try_parse_from(["textmatch", "essay.pdf"]).expect("environment parse");
        std::env::remove_var("TEXTMATCH_TIMEOUT_SECS");
        std::env::remove_var("TEXTMATCH_MAX_CONCURRENT");
        std::env::remove_var("TEXTMATCH_JSON");

        assert_eq!(tuned.timeout_secs, 3);
        assert_eq!(tuned.max_concurrent, 2);
        assert!(tuned.json);
    }
}
