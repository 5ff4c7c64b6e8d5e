//! Loading translation-unit dumps.
//!
//! A front end serializes the typed AST of each source file to a JSON dump
//! (conventionally `<name>.ast.json`). The strict variants surface typed
//! errors; the batch variant is resilient, logging and skipping malformed
//! dumps so one broken unit never aborts a whole run.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::warn;

use crate::ast::TranslationUnit;
use crate::error::{ConstifyError, ConstifyResult, IoResultExt};

/// Parse one dump from in-memory content.
pub fn parse_unit(path: &Path, content: &str) -> ConstifyResult<TranslationUnit> {
    serde_json::from_str(content).map_err(|e| ConstifyError::parse(path, e.to_string()))
}

/// Read and parse one dump file.
pub fn parse_unit_file(path: &Path) -> ConstifyResult<TranslationUnit> {
    let content = fs::read_to_string(path).with_path(path)?;
    parse_unit(path, &content)
}

/// Parse many dump files in parallel, skipping the ones that fail.
///
/// Units are independent, so the order of results follows the input order
/// and a malformed dump only costs a warning.
pub fn parse_units(paths: &[PathBuf]) -> Vec<(PathBuf, TranslationUnit)> {
    paths
        .par_iter()
        .filter_map(|p| match parse_unit_file(p) {
            Ok(tu) => Some((p.clone(), tu)),
            Err(e) => {
                warn!(path = %p.display(), error = %e, "skipping malformed dump");
                None
            }
        })
        .collect()
}
