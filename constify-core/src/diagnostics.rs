//! Diagnostic records produced by the analysis.
//!
//! The analysis never prints; it accumulates structured records into a
//! [`DiagnosticBag`] and the embedding driver decides how to render them
//! (see [`crate::report`]). Message texts live here, next to the emit
//! helpers, so every mode produces identical wording.

use serde::Serialize;

use crate::ast::{QualType, SourceLocation};

/// Advisory severity. Warnings come from pseudo-const mode only; the debug
/// modes emit notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Note,
}

/// One rendered diagnostic: severity, anchor location, the subject
/// declaration's name, the optional type argument, and the full message.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub message: String,
}

/// Ordered collection of diagnostics for one analysis run.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diags: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diags.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diags
    }

    fn push(
        &mut self,
        severity: Severity,
        location: SourceLocation,
        name: &str,
        type_name: Option<String>,
        message: String,
    ) {
        self.diags.push(Diagnostic {
            severity,
            location,
            name: name.to_string(),
            type_name,
            message,
        });
    }

    /// "variable 'x' could be declared as const"
    pub fn variable_could_be_const(&mut self, name: &str, loc: SourceLocation) {
        self.push(
            Severity::Warning,
            loc,
            name,
            None,
            format!("variable '{}' could be declared as const", name),
        );
    }

    /// "function 'f' could be declared as const"
    pub fn function_could_be_const(&mut self, name: &str, loc: SourceLocation) {
        self.push(
            Severity::Warning,
            loc,
            name,
            None,
            format!("function '{}' could be declared as const", name),
        );
    }

    /// "function 'f' could be declared as static"
    pub fn function_could_be_static(&mut self, name: &str, loc: SourceLocation) {
        self.push(
            Severity::Warning,
            loc,
            name,
            None,
            format!("function '{}' could be declared as static", name),
        );
    }

    /// "variable 'x' declared here"
    pub fn variable_declared_here(&mut self, name: &str, loc: SourceLocation) {
        self.push(
            Severity::Note,
            loc,
            name,
            None,
            format!("variable '{}' declared here", name),
        );
    }

    /// "function 'f' declared here"
    pub fn function_declared_here(&mut self, name: &str, loc: SourceLocation) {
        self.push(
            Severity::Note,
            loc,
            name,
            None,
            format!("function '{}' declared here", name),
        );
    }

    /// "variable 'x' was used"
    pub fn variable_was_used(&mut self, name: &str, loc: SourceLocation) {
        self.push(
            Severity::Note,
            loc,
            name,
            None,
            format!("variable '{}' was used", name),
        );
    }

    /// "variable 'x' with type 'T' was changed"
    pub fn variable_was_changed(&mut self, name: &str, ty: &QualType, loc: SourceLocation) {
        self.push(
            Severity::Note,
            loc,
            name,
            Some(ty.to_string()),
            format!("variable '{}' with type '{}' was changed", name, ty),
        );
    }
}
