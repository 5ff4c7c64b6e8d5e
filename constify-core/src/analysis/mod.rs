//! Module-level analysis: one pass over a translation unit's function
//! definitions, dispatched by mode.
//!
//! The mode set is closed, so the visitor is a tagged enum rather than a
//! trait hierarchy: each variant owns the state its mode accumulates, the
//! two hooks (`on_function` / `on_method`) fold one definition into that
//! state, and `finish` renders the diagnostics.

pub mod state;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::ast::{AstContext, DeclId, FunctionDecl, Stmt, TranslationUnit};
use crate::collect::{
    context_variables, is_plain_method, member_variables, record_methods,
};
use crate::diagnostics::{Diagnostic, DiagnosticBag};
use crate::error::ConstifyError;
use crate::scope::ScopeSummary;

pub use state::PseudoConstState;

/// Analysis mode selector. The first four are debug aids emitting notes;
/// `PseudoConst` is the production analysis emitting warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    FunctionDeclarations,
    VariableDeclarations,
    VariableChanges,
    VariableUsages,
    #[default]
    PseudoConst,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 5] = [
        AnalysisMode::FunctionDeclarations,
        AnalysisMode::VariableDeclarations,
        AnalysisMode::VariableChanges,
        AnalysisMode::VariableUsages,
        AnalysisMode::PseudoConst,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::FunctionDeclarations => "function-declarations",
            AnalysisMode::VariableDeclarations => "variable-declarations",
            AnalysisMode::VariableChanges => "variable-changes",
            AnalysisMode::VariableUsages => "variable-usages",
            AnalysisMode::PseudoConst => "pseudo-const",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ConstifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                ConstifyError::invalid_argument(format!(
                    "unknown analysis mode '{}' (expected one of: {})",
                    s,
                    Self::ALL.map(|m| m.as_str()).join(", ")
                ))
            })
    }
}

/// Counters describing one analysis run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisStats {
    pub functions_visited: usize,
    pub variable_candidates: usize,
    pub variables_disqualified: usize,
    pub const_method_candidates: usize,
    pub static_method_candidates: usize,
}

/// Diagnostics plus counters for one translation unit.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AnalysisStats,
}

/// Analyze one translation unit in the given mode.
pub fn analyze_unit(tu: &TranslationUnit, mode: AnalysisMode) -> AnalysisOutcome {
    let ctx = AstContext::new(tu);
    let mut visitor = ModuleVisitor::new(mode);
    let mut functions_visited = 0usize;

    for f in ctx.function_definitions() {
        functions_visited += 1;
        debug!(function = %f.name, mode = %mode, "analyzing definition");
        if f.method.is_some() {
            visitor.on_method(&ctx, f);
        } else {
            visitor.on_function(&ctx, f);
        }
    }

    let (diags, mut stats) = visitor.finish(&ctx);
    stats.functions_visited = functions_visited;
    AnalysisOutcome {
        diagnostics: diags.into_vec(),
        stats,
    }
}

/// True iff any subexpression of the body is the enclosing-instance
/// expression, implicit member-access bases included.
fn body_mentions_enclosing_instance(body: &Stmt) -> bool {
    let mut found = false;
    body.for_each_expr(&mut |e| {
        if matches!(e.kind, crate::ast::ExprKind::This) {
            found = true;
        }
    });
    found
}

/// Per-mode accumulated state. One visitor lives for the whole unit.
enum ModuleVisitor {
    FunctionDeclarations {
        functions: Vec<DeclId>,
    },
    VariableDeclarations {
        variables: BTreeSet<DeclId>,
    },
    VariableChanges {
        summaries: Vec<ScopeSummary>,
    },
    VariableUsages {
        summaries: Vec<ScopeSummary>,
    },
    PseudoConst {
        state: PseudoConstState,
        const_candidates: BTreeSet<DeclId>,
        static_candidates: BTreeSet<DeclId>,
    },
}

impl ModuleVisitor {
    fn new(mode: AnalysisMode) -> Self {
        match mode {
            AnalysisMode::FunctionDeclarations => Self::FunctionDeclarations {
                functions: Vec::new(),
            },
            AnalysisMode::VariableDeclarations => Self::VariableDeclarations {
                variables: BTreeSet::new(),
            },
            AnalysisMode::VariableChanges => Self::VariableChanges {
                summaries: Vec::new(),
            },
            AnalysisMode::VariableUsages => Self::VariableUsages {
                summaries: Vec::new(),
            },
            AnalysisMode::PseudoConst => Self::PseudoConst {
                state: PseudoConstState::new(),
                const_candidates: BTreeSet::new(),
                static_candidates: BTreeSet::new(),
            },
        }
    }

    fn on_function(&mut self, ctx: &AstContext, f: &FunctionDecl) {
        let Some(body) = f.body.as_ref() else {
            return;
        };
        match self {
            Self::FunctionDeclarations { functions } => functions.push(f.id),
            Self::VariableDeclarations { variables } => {
                variables.extend(context_variables(ctx, f, false));
            }
            Self::VariableChanges { summaries } | Self::VariableUsages { summaries } => {
                summaries.push(ScopeSummary::analyze(ctx, body));
            }
            Self::PseudoConst { state, .. } => {
                let summary = ScopeSummary::analyze(ctx, body);
                for v in context_variables(ctx, f, false) {
                    state.update_variable(ctx, &summary, v);
                }
            }
        }
    }

    fn on_method(&mut self, ctx: &AstContext, f: &FunctionDecl) {
        let Some(body) = f.body.as_ref() else {
            return;
        };
        let Some(info) = f.method.as_ref() else {
            return;
        };
        match self {
            Self::FunctionDeclarations { functions } => functions.push(f.id),
            Self::VariableDeclarations { variables } => {
                variables.extend(context_variables(ctx, f, !is_plain_method(f)));
                if let Some(record) = ctx.record(info.record) {
                    variables.extend(member_variables(record));
                }
            }
            Self::VariableChanges { summaries } | Self::VariableUsages { summaries } => {
                summaries.push(ScopeSummary::analyze(ctx, body));
            }
            Self::PseudoConst {
                state,
                const_candidates,
                static_candidates,
            } => {
                let Some(record) = ctx.record(info.record) else {
                    return;
                };
                let summary = ScopeSummary::analyze(ctx, body);
                let members = member_variables(record);

                // Variables first.
                for v in context_variables(ctx, f, !is_plain_method(f)) {
                    state.update_variable(ctx, &summary, v);
                }
                for v in &members {
                    state.update_variable(ctx, &summary, *v);
                }

                // Then the method itself.
                if !(is_plain_method(f)
                    && !info.is_virtual
                    && !info.is_static
                    && info.is_user_provided)
                {
                    return;
                }
                let peers = record_methods(record);

                let member_changes = members
                    .iter()
                    .filter(|v| summary.was_changed(**v))
                    .count();
                let mutating_peer_refs = peers
                    .iter()
                    .filter(|m| {
                        is_mutating_method(ctx, **m) && summary.was_referenced(**m)
                    })
                    .count();
                if member_changes != 0 || mutating_peer_refs != 0 {
                    return;
                }

                // Mutates nothing; it might even be static.
                let member_reads = members
                    .iter()
                    .filter(|v| summary.was_referenced(**v))
                    .count();
                let instance_peer_refs = peers
                    .iter()
                    .filter(|m| {
                        is_instance_method(ctx, **m) && summary.was_referenced(**m)
                    })
                    .count();
                if member_reads == 0
                    && instance_peer_refs == 0
                    && !body_mentions_enclosing_instance(body)
                {
                    static_candidates.insert(f.id);
                } else if !info.is_const {
                    const_candidates.insert(f.id);
                }
            }
        }
    }

    fn finish(self, ctx: &AstContext) -> (DiagnosticBag, AnalysisStats) {
        let mut diags = DiagnosticBag::new();
        let mut stats = AnalysisStats::default();
        match self {
            Self::FunctionDeclarations { functions } => {
                for id in functions {
                    if let (Some(name), Some(loc)) = (ctx.decl_name(id), ctx.decl_loc(id)) {
                        diags.function_declared_here(name, loc.clone());
                    }
                }
            }
            Self::VariableDeclarations { variables } => {
                for id in variables {
                    if let (Some(name), Some(loc)) = (ctx.decl_name(id), ctx.decl_loc(id)) {
                        diags.variable_declared_here(name, loc.clone());
                    }
                }
            }
            Self::VariableChanges { summaries } => {
                for summary in &summaries {
                    summary.dump_changes(ctx, &mut diags);
                }
            }
            Self::VariableUsages { summaries } => {
                for summary in &summaries {
                    summary.dump_accesses(ctx, &mut diags);
                }
            }
            Self::PseudoConst {
                state,
                const_candidates,
                static_candidates,
            } => {
                stats.variable_candidates = state.candidate_count();
                stats.variables_disqualified = state.disqualified_count();
                stats.const_method_candidates = const_candidates.len();
                stats.static_method_candidates = static_candidates.len();

                for id in state.candidates() {
                    if !ctx.decl_in_main_file(id) {
                        continue;
                    }
                    if let (Some(name), Some(loc)) = (ctx.decl_name(id), ctx.decl_loc(id)) {
                        diags.variable_could_be_const(name, loc.clone());
                    }
                }
                for id in const_candidates {
                    if !ctx.decl_in_main_file(id) {
                        continue;
                    }
                    if let (Some(name), Some(loc)) = (ctx.decl_name(id), ctx.decl_loc(id)) {
                        diags.function_could_be_const(name, loc.clone());
                    }
                }
                for id in static_candidates {
                    if !ctx.decl_in_main_file(id) {
                        continue;
                    }
                    if let (Some(name), Some(loc)) = (ctx.decl_name(id), ctx.decl_loc(id)) {
                        diags.function_could_be_static(name, loc.clone());
                    }
                }
            }
        }
        (diags, stats)
    }
}

/// A peer that can mutate the object: neither static nor const.
fn is_mutating_method(ctx: &AstContext, id: DeclId) -> bool {
    ctx.function(id)
        .and_then(|f| f.method.as_ref())
        .is_some_and(|m| !m.is_static && !m.is_const)
}

/// Any instance peer, const ones included.
fn is_instance_method(ctx: &AstContext, id: DeclId) -> bool {
    ctx.function(id)
        .and_then(|f| f.method.as_ref())
        .is_some_and(|m| !m.is_static)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in AnalysisMode::ALL {
            assert_eq!(mode.as_str().parse::<AnalysisMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode_is_fatal() {
        let err = "pseudo-static".parse::<AnalysisMode>().unwrap_err();
        assert!(matches!(err, ConstifyError::InvalidArgument { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(AnalysisMode::default(), AnalysisMode::PseudoConst);
    }
}
