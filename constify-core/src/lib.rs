//! constify-core: pseudo-constness analysis library.
//!
//! Inspects one translation unit of a C++-like, statically typed program
//! and reports three classes of missed qualification opportunities:
//!
//! - **Pseudo-const variables**: locals, parameters and data members never
//!   mutated through any reachable expression whose declared type is not
//!   const-qualified.
//! - **Pseudo-const methods**: ordinary instance methods that mutate no
//!   member and call no mutating peer.
//! - **Pseudo-static methods**: pseudo-const methods that additionally read
//!   no member, call no instance peer, and never mention the enclosing
//!   instance.
//!
//! The analysis is flow-insensitive and monotonic: one syntactically
//! reachable mutation anywhere in the unit disqualifies a variable for
//! good. Input is a typed AST (loaded from a front-end dump or built
//! in-process), not source text; this crate never parses C++ itself.
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use constify_core::prelude::*;
//!
//! let result = Constify::new("/path/to/dumps")
//!     .mode(AnalysisMode::PseudoConst)
//!     .analyze()?;
//!
//! for d in &result.diagnostics {
//!     println!("{}", d.message);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`ast`]: typed translation-unit tree and the id-indexed oracle view
//! - [`scope`]: per-function mutation/access traversals and summaries
//! - [`collect`]: candidate-declaration collection
//! - [`analysis`]: module-level pass, mode dispatch, verdict state machine
//! - [`diagnostics`]: structured diagnostic records
//! - [`parse`]: translation-unit dump loading
//! - [`scan`]: parallel dump discovery
//! - [`report`]: plain/JSON output
//! - [`builder`]: fluent entry point
//! - [`error`]: typed error handling

pub mod analysis;
pub mod ast;
pub mod builder;
pub mod collect;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod parse;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod scope;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{ConstifyError, ConstifyResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Constify};

// Analysis
pub use analysis::{analyze_unit, AnalysisMode, AnalysisOutcome, AnalysisStats, PseudoConstState};

// AST surface
pub use ast::{
    AstContext, DeclId, FunctionDecl, QualType, RecordDecl, SourceLocation, SourceRange,
    TranslationUnit,
};

// Scope analysis
pub use scope::{ScopeSummary, Usage, UsageRef};

// Declaration collection
pub use collect::{
    context_variables, is_plain_method, member_variables, record_methods, referred_variables,
};

// Diagnostics
pub use diagnostics::{Diagnostic, DiagnosticBag, Severity};

// Configuration
pub use config::{load_config, ConstifyConfig, OutputConfig};

// Logging
pub use logging::init_structured_logging;

// Parsing and scanning
pub use parse::{parse_unit, parse_unit_file, parse_units};
pub use scan::{gather_dumps, gather_dumps_with_excludes};

// Reporting
pub use report::{print_json, print_plain};
