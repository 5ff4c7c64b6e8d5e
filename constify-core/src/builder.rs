//! Builder pattern API for pseudo-constness analysis.
//!
//! Provides a fluent interface for configuring and running the analysis
//! over a dump file or a tree of dumps:
//!
//! ```rust,ignore
//! use constify_core::prelude::*;
//!
//! let result = Constify::new("/path/to/dumps")
//!     .mode(AnalysisMode::PseudoConst)
//!     .ignore_patterns(["detail"])
//!     .analyze()?;
//!
//! for d in &result.diagnostics {
//!     println!("{}", d.message);
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::info;

use crate::analysis::{analyze_unit, AnalysisMode, AnalysisOutcome, AnalysisStats};
use crate::diagnostics::Diagnostic;
use crate::parse::{parse_unit_file, parse_units};
use crate::scan::gather_dumps_with_excludes;

/// Builder for configuring an analysis run.
#[derive(Debug, Clone)]
pub struct Constify {
    /// A dump file, or the root of a tree of dumps.
    root: PathBuf,
    mode: AnalysisMode,
    /// Findings whose subject name matches any pattern are suppressed.
    ignored_patterns: Vec<String>,
    /// Extra directory names excluded from scanning.
    excluded_dirs: Vec<String>,
}

/// Merged result of analyzing one or more translation units.
#[derive(Debug)]
pub struct AnalysisResult {
    pub units_analyzed: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AnalysisStats,
}

impl Constify {
    /// Create a new analysis builder for the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: AnalysisMode::default(),
            ignored_patterns: Vec::new(),
            excluded_dirs: Vec::new(),
        }
    }

    /// Select the analysis mode.
    pub fn mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add patterns for declaration names to ignore.
    pub fn ignore_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.ignored_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add directory names to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Run the analysis.
    ///
    /// A single dump file is loaded strictly; a directory is scanned and
    /// loaded resiliently. Units are analyzed in parallel, each unit's
    /// analysis itself staying sequential.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let units = if self.root.is_file() {
            let tu = parse_unit_file(&self.root)
                .with_context(|| format!("Failed to load {}", self.root.display()))?;
            vec![(self.root.clone(), tu)]
        } else {
            let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
            let dumps = gather_dumps_with_excludes(&self.root, &excludes)?;
            info!(count = dumps.len(), root = %self.root.display(), "gathered dumps");
            parse_units(&dumps)
        };

        let outcomes: Vec<AnalysisOutcome> = units
            .par_iter()
            .map(|(_, tu)| analyze_unit(tu, self.mode))
            .collect();

        let mut result = AnalysisResult {
            units_analyzed: outcomes.len(),
            diagnostics: Vec::new(),
            stats: AnalysisStats::default(),
        };
        for outcome in outcomes {
            result.stats.functions_visited += outcome.stats.functions_visited;
            result.stats.variable_candidates += outcome.stats.variable_candidates;
            result.stats.variables_disqualified += outcome.stats.variables_disqualified;
            result.stats.const_method_candidates += outcome.stats.const_method_candidates;
            result.stats.static_method_candidates += outcome.stats.static_method_candidates;
            result.diagnostics.extend(
                outcome
                    .diagnostics
                    .into_iter()
                    .filter(|d| !is_ignored(&d.name, &self.ignored_patterns)),
            );
        }
        Ok(result)
    }
}

/// Checks if a declaration name should be ignored based on patterns.
fn is_ignored(name: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|p| p == name || name.ends_with(p.as_str()) || name.contains(p.as_str()))
}
