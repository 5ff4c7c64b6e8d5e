//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::analysis::AnalysisStats;
use crate::diagnostics::{Diagnostic, Severity};

/// Prints diagnostics in compiler-style plain text.
pub fn print_plain(diags: &[Diagnostic]) {
    if diags.is_empty() {
        println!("No findings.");
        return;
    }
    for d in diags {
        let severity = match d.severity {
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        println!("{}: {}: {}", d.location, severity, d.message);
    }
}

/// Prints diagnostics (and optionally stats) in JSON format.
///
/// Falls back to a terse line if serialization fails, which should never
/// happen for these types.
pub fn print_json(diags: &[Diagnostic], stats: Option<&AnalysisStats>) {
    let value = match stats {
        Some(s) => json!({ "diagnostics": diags, "stats": s }),
        None => json!({ "diagnostics": diags }),
    };
    match serde_json::to_string_pretty(&value) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{{\"diagnostics\": []}}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceLocation;
    use crate::diagnostics::DiagnosticBag;

    #[test]
    fn test_diagnostics_serialize() {
        let mut bag = DiagnosticBag::new();
        bag.variable_could_be_const(
            "j",
            SourceLocation {
                file: "main.cpp".into(),
                line: 3,
                column: 12,
            },
        );
        let diags = bag.into_vec();
        let value = serde_json::to_value(&diags).unwrap();
        assert_eq!(value[0]["severity"], "warning");
        assert_eq!(value[0]["location"]["file"], "main.cpp");
        assert_eq!(
            value[0]["message"],
            "variable 'j' could be declared as const"
        );
    }
}
