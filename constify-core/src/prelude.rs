//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use constify_core::prelude::*;
//! ```

// Core analysis
pub use crate::analysis::{analyze_unit, AnalysisMode, AnalysisOutcome, AnalysisStats};

// AST surface
pub use crate::ast::{AstContext, DeclId, QualType, TranslationUnit};

// Diagnostics
pub use crate::diagnostics::{Diagnostic, DiagnosticBag, Severity};

// Errors
pub use crate::error::{ConstifyError, ConstifyResult};

// Loading and scanning
pub use crate::parse::{parse_unit, parse_unit_file, parse_units};
pub use crate::scan::{gather_dumps, gather_dumps_with_excludes};

// Configuration
pub use crate::config::{load_config, ConstifyConfig};

// Builder API
pub use crate::builder::{AnalysisResult, Constify};
