//! Scope-level usage and mutation analysis.
//!
//! One function body in, one [`ScopeSummary`] out: which declarations the
//! scope changed and which it referenced, each with the list of usage
//! records observed. The summary is flow-insensitive; any syntactically
//! reachable mutation counts.

mod accesses;
mod changes;
pub mod extract;

use std::collections::BTreeMap;

use crate::ast::{AstContext, DeclId, QualType, SourceRange, Stmt};
use crate::diagnostics::DiagnosticBag;

pub use extract::{extract_usage, Usage};

/// One observation of a declaration: the type it was observed through and
/// the source range of the observing expression.
#[derive(Debug, Clone)]
pub struct UsageRef {
    pub ty: QualType,
    pub range: SourceRange,
}

/// Usage records per declaration, in insertion order per declaration and
/// id order across declarations (deterministic dumps).
pub type UsageRefs = Vec<UsageRef>;
pub type UsageRefsMap = BTreeMap<DeclId, UsageRefs>;

/// The result of analyzing one scope: `changed` and `used` collected by two
/// independent traversals of the same body.
#[derive(Debug, Default)]
pub struct ScopeSummary {
    changed: UsageRefsMap,
    used: UsageRefsMap,
}

impl ScopeSummary {
    /// Run both traversals over `body`.
    pub fn analyze(ctx: &AstContext, body: &Stmt) -> Self {
        Self {
            changed: changes::ChangeCollector::new(ctx).collect(body),
            used: accesses::AccessCollector::new(ctx).collect(body),
        }
    }

    /// Was a mutating syntactic form observed against this declaration?
    pub fn was_changed(&self, decl: DeclId) -> bool {
        self.changed.contains_key(&decl)
    }

    /// Was this declaration referenced anywhere in the scope?
    pub fn was_referenced(&self, decl: DeclId) -> bool {
        self.used.contains_key(&decl)
    }

    /// The mutation records for a declaration.
    pub fn changes_of(&self, decl: DeclId) -> Option<&UsageRefs> {
        self.changed.get(&decl)
    }

    /// The access records for a declaration.
    pub fn uses_of(&self, decl: DeclId) -> Option<&UsageRefs> {
        self.used.get(&decl)
    }

    /// Emit one mutation-trace note per recorded change. Traces are not
    /// filtered to the main file; only production warnings are.
    pub fn dump_changes(&self, ctx: &AstContext, diags: &mut DiagnosticBag) {
        for (decl, refs) in &self.changed {
            let name = ctx.decl_name(*decl).unwrap_or("<unknown>");
            for r in refs {
                diags.variable_was_changed(name, &r.ty, r.range.begin.clone());
            }
        }
    }

    /// Emit one access-trace note per recorded use, unfiltered like
    /// [`Self::dump_changes`].
    pub fn dump_accesses(&self, ctx: &AstContext, diags: &mut DiagnosticBag) {
        for (decl, refs) in &self.used {
            let name = ctx.decl_name(*decl).unwrap_or("<unknown>");
            for r in refs {
                diags.variable_was_used(name, r.range.begin.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::ast::AstContext;

    #[test]
    fn test_declaration_can_be_both_changed_and_used() {
        let mut b = AstBuilder::new("main.cpp");
        let j = b.var("j", int_ty());
        // j = j + 1 reads and writes j.
        let rhs = binary(crate::ast::BinOp::Add, decl_ref(&j), lit(1));
        let body = block(vec![
            decl_stmt(j.clone()),
            expr_stmt(assign(decl_ref(&j), rhs)),
        ]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let f = ctx.function_definitions().next().unwrap();
        let summary = ScopeSummary::analyze(&ctx, f.body.as_ref().unwrap());
        assert!(summary.was_changed(j.id));
        assert!(summary.was_referenced(j.id));
        // Two reads (LHS and RHS references), one write.
        assert_eq!(summary.uses_of(j.id).unwrap().len(), 2);
        assert_eq!(summary.changes_of(j.id).unwrap().len(), 1);
    }

    #[test]
    fn test_summary_is_empty_for_pure_body() {
        let mut b = AstBuilder::new("main.cpp");
        let body = block(vec![ret_stmt(lit(3))]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let f = ctx.function_definitions().next().unwrap();
        let summary = ScopeSummary::analyze(&ctx, f.body.as_ref().unwrap());
        assert!(summary.changed.is_empty());
        assert!(summary.used.is_empty());
    }
}
