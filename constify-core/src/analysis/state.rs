//! Pseudo-constness state: the monotone two-set fold over all scopes.
//!
//! Once a variable is disqualified it never re-enters the candidate set;
//! every insertion goes through [`PseudoConstState::update_variable`], the
//! single chokepoint that enforces the invariant.

use std::collections::BTreeSet;

use crate::ast::{AstContext, DeclId};
use crate::collect::referred_variables;
use crate::scope::ScopeSummary;

/// Accumulated variable verdicts for one translation unit.
#[derive(Debug, Default)]
pub struct PseudoConstState {
    /// Provisionally pseudo-const declarations.
    candidates: BTreeSet<DeclId>,
    /// Definitively mutated declarations.
    disqualified: BTreeSet<DeclId>,
}

impl PseudoConstState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scope's verdict for `v` into the state.
    ///
    /// A mutation disqualifies `v` and everything it refers to through
    /// reference-initialization chains. An unmutated sighting makes `v` a
    /// candidate unless it was disqualified earlier or is already
    /// const-qualified (nothing to report then).
    pub fn update_variable(&mut self, ctx: &AstContext, summary: &ScopeSummary, v: DeclId) {
        if summary.was_changed(v) {
            for u in referred_variables(ctx, v) {
                self.register_change(u);
            }
        } else if !self.disqualified.contains(&v) {
            if let Some(ty) = ctx.declared_type(v) {
                if !ty.non_reference().is_const_qualified() {
                    self.candidates.insert(v);
                }
            }
        }
    }

    fn register_change(&mut self, v: DeclId) {
        self.candidates.remove(&v);
        self.disqualified.insert(v);
    }

    /// Final candidates, in id order.
    pub fn candidates(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.candidates.iter().copied()
    }

    pub fn is_candidate(&self, v: DeclId) -> bool {
        self.candidates.contains(&v)
    }

    pub fn is_disqualified(&self, v: DeclId) -> bool {
        self.disqualified.contains(&v)
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn disqualified_count(&self) -> usize {
        self.disqualified.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::ast::{AstContext, QualType};
    use crate::scope::ScopeSummary;

    fn summary_for(ctx: &AstContext) -> ScopeSummary {
        let f = ctx.function_definitions().next().unwrap();
        ScopeSummary::analyze(ctx, f.body.as_ref().unwrap())
    }

    #[test]
    fn test_unchanged_variable_becomes_candidate() {
        let mut b = AstBuilder::new("main.cpp");
        let j = b.var_init("j", int_ty(), lit(0));
        let body = block(vec![decl_stmt(j.clone())]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);
        let summary = summary_for(&ctx);

        let mut state = PseudoConstState::new();
        state.update_variable(&ctx, &summary, j.id);
        assert!(state.is_candidate(j.id));
    }

    #[test]
    fn test_const_variable_is_ignored() {
        let mut b = AstBuilder::new("main.cpp");
        let k = b.var_init("k", int_ty().into_const(), lit(3));
        let body = block(vec![decl_stmt(k.clone())]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);
        let summary = summary_for(&ctx);

        let mut state = PseudoConstState::new();
        state.update_variable(&ctx, &summary, k.id);
        assert!(!state.is_candidate(k.id));
        assert!(!state.is_disqualified(k.id));
    }

    #[test]
    fn test_const_reference_target_is_ignored() {
        // T const& r: the non-reference type is const, nothing to report.
        let mut b = AstBuilder::new("main.cpp");
        let x = b.var("x", int_ty());
        let r = b.var_init(
            "r",
            QualType::reference(int_ty().into_const()),
            decl_ref(&x),
        );
        let body = block(vec![decl_stmt(x.clone()), decl_stmt(r.clone())]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);
        let summary = summary_for(&ctx);

        let mut state = PseudoConstState::new();
        state.update_variable(&ctx, &summary, r.id);
        assert!(!state.is_candidate(r.id));
    }

    #[test]
    fn test_disqualification_is_monotone() {
        let mut b = AstBuilder::new("main.cpp");
        let j = b.var_init("j", int_ty(), lit(0));
        let changed_body = block(vec![
            decl_stmt(j.clone()),
            expr_stmt(assign(decl_ref(&j), lit(1))),
        ]);
        let f = b.function("f", Vec::new(), Some(changed_body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);
        let changed = summary_for(&ctx);
        let clean = ScopeSummary::default();

        let mut state = PseudoConstState::new();
        state.update_variable(&ctx, &changed, j.id);
        assert!(state.is_disqualified(j.id));

        // A later scope that only observes j cannot resurrect it.
        state.update_variable(&ctx, &clean, j.id);
        assert!(state.is_disqualified(j.id));
        assert!(!state.is_candidate(j.id));
    }

    #[test]
    fn test_changing_reference_disqualifies_referent() {
        let mut b = AstBuilder::new("main.cpp");
        let x = b.var("x", int_ty());
        let r = b.var_init("r", QualType::reference(int_ty()), decl_ref(&x));
        let body = block(vec![
            decl_stmt(x.clone()),
            decl_stmt(r.clone()),
            expr_stmt(assign(decl_ref(&r), lit(3))),
        ]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);
        let summary = summary_for(&ctx);

        let mut state = PseudoConstState::new();
        state.update_variable(&ctx, &summary, x.id);
        state.update_variable(&ctx, &summary, r.id);
        assert!(state.is_disqualified(x.id));
        assert!(state.is_disqualified(r.id));
        assert_eq!(state.candidate_count(), 0);
    }
}
