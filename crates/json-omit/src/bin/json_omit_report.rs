//! `json-omit-report` — measure how much key omission shrinks fixture batches.
//!
//! Usage:
//!   json-omit-report [--deduped <PATH>] [--with-dupes <PATH>] [--out-dir <DIR>]
//!                    [--key <SPEC>]... [--batch-size <N>]
//!
//! Prints four size summaries to stdout and writes the original and pruned
//! batches as minified JSON into the output directory. Set `RUST_LOG` to
//! adjust log verbosity (default `info`, written to stderr).

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueHint};
use json_omit::report::{run_report, ReportConfig, ReportError, DEFAULT_BATCH_SIZE, DEFAULT_KEYS};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "json-omit-report",
    version,
    about = "Prune keys from fixture batches and report serialized sizes"
)]
struct Cli {
    #[arg(
        long,
        default_value = "data-deduped.json",
        help = "Fixture with deduplicated items (JSON array, nested one level)",
        value_hint = ValueHint::FilePath
    )]
    deduped: PathBuf,
    #[arg(
        long,
        default_value = "data-with-dupes.json",
        help = "Fixture with duplicated items (JSON array, nested one level)",
        value_hint = ValueHint::FilePath
    )]
    with_dupes: PathBuf,
    #[arg(
        long,
        default_value = "output",
        help = "Directory for the four minified output files",
        value_hint = ValueHint::DirPath
    )]
    out_dir: PathBuf,
    #[arg(
        long = "key",
        value_name = "SPEC",
        help = "Key or dotted path to omit (repeatable; defaults to the built-in list)"
    )]
    keys: Vec<String>,
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, help = "Items per batch for the batch-size average")]
    batch_size: usize,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        let keys = if self.keys.is_empty() {
            DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
        } else {
            self.keys
        };
        ReportConfig {
            deduped: self.deduped,
            with_dupes: self.with_dupes,
            out_dir: self.out_dir,
            keys,
            batch_size: self.batch_size,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(config: &ReportConfig) -> Result<(), ReportError> {
    let report = run_report(config)?;
    let text = report.render()?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .map_err(|source| ReportError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    Ok(())
}

fn main() {
    init_tracing();
    let config = Cli::parse().into_config();

    if let Err(e) = run(&config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Cli::parse_from(["json-omit-report"]).into_config();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_explicit_keys_replace_defaults() {
        let config = Cli::parse_from([
            "json-omit-report",
            "--key",
            "a",
            "--key",
            "b.c",
            "--batch-size",
            "10",
            "--out-dir",
            "out",
        ])
        .into_config();
        assert_eq!(config.keys, vec!["a".to_string(), "b.c".to_string()]);
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.out_dir, PathBuf::from("out"));
    }
}
