//! List files recursively, grouped and sorted by content type.
//!
//! Records go to stdout; warnings and diagnostics go to stderr.

mod config;
mod core;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::core::{classify::MagicClassifier, session::Session};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "List FILEs (the current directory by default) recursively, sorted by content-type."
)]
struct Cli {
    /// Files or directories to list.
    #[arg(default_value = ".")]
    roots: Vec<PathBuf>,

    /// Do not ignore entries starting with `.`.
    #[arg(short = 'a', long, visible_alias = "all", overrides_with = "no_include_hidden")]
    include_hidden: bool,

    /// Ignore entries starting with `.` even if the config file says otherwise.
    #[arg(long, visible_alias = "no-all", overrides_with = "include_hidden")]
    no_include_hidden: bool,

    /// Output using the format "<mime>: <file>".
    #[arg(short = 'm', long, visible_alias = "mime", overrides_with = "no_mime_format")]
    mime_format: bool,

    /// Output bare file names.
    #[arg(long, visible_alias = "no-mime", overrides_with = "mime_format")]
    no_mime_format: bool,

    /// Use NUL instead of new-line to terminate output records.
    #[arg(short = '0', long, visible_alias = "null", overrides_with = "no_null_terminator")]
    null_terminator: bool,

    /// Terminate output records with new-line.
    #[arg(long, visible_alias = "no-null", overrides_with = "null_terminator")]
    no_null_terminator: bool,

    /// Warn about root arguments that cannot be opened instead of failing.
    #[arg(
        short = 'i',
        long,
        visible_alias = "ignore-inaccessible",
        overrides_with = "no_ignore_inaccessible_roots"
    )]
    ignore_inaccessible_roots: bool,

    /// Fail on root arguments that cannot be opened.
    #[arg(
        long,
        visible_alias = "no-ignore-inaccessible",
        overrides_with = "ignore_inaccessible_roots"
    )]
    no_ignore_inaccessible_roots: bool,
}

/// Resolve a `--flag` / `--no-flag` pair against the configured value.
fn toggle(on: bool, off: bool, configured: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => configured,
    }
}

impl Cli {
    /// Flags override the config file in either direction.
    fn apply(&self, config: &mut AppConfig) {
        config.include_hidden =
            toggle(self.include_hidden, self.no_include_hidden, config.include_hidden);
        config.mime_format = toggle(self.mime_format, self.no_mime_format, config.mime_format);
        config.null_terminator =
            toggle(self.null_terminator, self.no_null_terminator, config.null_terminator);
        config.ignore_inaccessible_roots = toggle(
            self.ignore_inaccessible_roots,
            self.no_ignore_inaccessible_roots,
            config.ignore_inaccessible_roots,
        );
    }
}

// ───────────────────────────────────────── main ─────────────

fn main() -> Result<()> {
    // Warnings are part of the interface, so they show by default.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr) // never pollute stdout
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    let classifier = MagicClassifier::open()?;
    let mut session = Session::new(config.walk_config(), classifier);
    for root in &cli.roots {
        session.walk(root)?;
    }
    if !session.warnings().is_empty() {
        tracing::debug!(count = session.warnings().len(), "walk finished with warnings");
    }

    let stdout = io::stdout().lock();
    let written = session.finish(BufWriter::new(stdout), config.emit_config())?;
    tracing::debug!(written, "done");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_current_dir() {
        let cli = Cli::parse_from(["lsct"]);
        assert_eq!(cli.roots, vec![PathBuf::from(".")]);
        assert!(!cli.include_hidden && !cli.mime_format);
        assert!(!cli.null_terminator && !cli.ignore_inaccessible_roots);
    }

    #[test]
    fn test_cli_short_and_alias_flags() {
        let cli = Cli::parse_from([
            "lsct",
            "-a",
            "-0",
            "--mime",
            "--ignore-inaccessible",
            "src",
            "docs",
        ]);
        assert!(cli.include_hidden);
        assert!(cli.null_terminator);
        assert!(cli.mime_format);
        assert!(cli.ignore_inaccessible_roots);
        assert_eq!(cli.roots, vec![PathBuf::from("src"), PathBuf::from("docs")]);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["lsct", "--mime-format"]);
        let mut config = AppConfig {
            include_hidden: true,
            ..Default::default()
        };
        cli.apply(&mut config);
        assert!(config.include_hidden);
        assert!(config.mime_format);
        assert!(!config.null_terminator);
    }

    #[test]
    fn test_negation_flags_restore_defaults() {
        let mut config = AppConfig {
            include_hidden: true,
            mime_format: true,
            null_terminator: true,
            ignore_inaccessible_roots: true,
        };
        let cli = Cli::parse_from([
            "lsct",
            "--no-all",
            "--no-mime",
            "--no-null",
            "--no-ignore-inaccessible",
        ]);
        cli.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = AppConfig {
            mime_format: true,
            ..Default::default()
        };
        Cli::parse_from(["lsct"]).apply(&mut config);
        assert!(config.mime_format);
        assert!(!config.include_hidden);
    }

    #[test]
    fn test_last_of_flag_pair_wins() {
        let cli = Cli::parse_from(["lsct", "-a", "--no-include-hidden", "--no-mime", "-m"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(!config.include_hidden);
        assert!(config.mime_format);
    }
}
