//! constify CLI - advisory const/static qualification lint.
//!
//! Consumes translation-unit dumps (`*.ast.json`) produced by a front end,
//! runs the selected analysis mode, and prints diagnostics in plain text or
//! JSON. Exit status is 0 whether or not findings exist; only operational
//! failures (unreadable input, bad configuration) are errors.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use constify_core::{
    init_structured_logging, load_config, print_json, print_plain, AnalysisMode, Constify,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pseudo-constness analyzer for C++-like translation units")]
struct Cli {
    /// A dump file or a directory of dumps
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Analysis mode: function-declarations, variable-declarations,
    /// variable-changes, variable-usages, or pseudo-const
    #[arg(long)]
    mode: Option<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Declaration names or patterns whose findings are suppressed
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Directory names to exclude from scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Include run statistics in the output
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    init_structured_logging();
    let cli = Cli::parse();

    let config_root = if cli.path.is_dir() {
        cli.path.clone()
    } else {
        cli.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    let config = load_config(&config_root).context("Failed to load constify.toml")?;

    // CLI flags win over configuration.
    let mode_name = cli
        .mode
        .or_else(|| config.as_ref().and_then(|c| c.mode.clone()));
    let mode = match mode_name {
        Some(name) => name
            .parse::<AnalysisMode>()
            .context("Invalid analysis mode")?,
        None => AnalysisMode::default(),
    };

    let mut ignore = cli.ignore;
    if let Some(patterns) = config.as_ref().and_then(|c| c.ignore.clone()) {
        ignore.extend(patterns);
    }

    let json = cli.json
        || config
            .as_ref()
            .and_then(|c| c.output.as_ref())
            .and_then(|o| o.format.as_deref())
            == Some("json");

    let result = Constify::new(&cli.path)
        .mode(mode)
        .ignore_patterns(ignore)
        .exclude_dirs(cli.exclude)
        .analyze()
        .with_context(|| format!("Analysis of {} failed", cli.path.display()))?;

    if json {
        let stats = cli.stats.then_some(&result.stats);
        print_json(&result.diagnostics, stats);
    } else {
        print_plain(&result.diagnostics);
        if cli.stats {
            eprintln!(
                "{} unit(s), {} function(s) analyzed: {} variable / {} const-method / {} static-method candidate(s)",
                result.units_analyzed,
                result.stats.functions_visited,
                result.stats.variable_candidates,
                result.stats.const_method_candidates,
                result.stats.static_method_candidates,
            );
        }
    }

    // Findings never alter the exit status; the embedding build decides.
    Ok(())
}
