//! Usage extraction from an expression subtree.
//!
//! Both scope traversals funnel through this extractor: given the
//! expression a rule fired on, find which declaration the usage lands on
//! and through which type it was observed.
//!
//! The working type is an explicit fill-once accumulator: the first source
//! encountered top-down wins (explicit seed, then a cast's target type, an
//! address-of/dereference result type, finally the reference's own type).
//! The bound declaration is overwritten as the walk descends, so the
//! deepest variable-like declaration is reported.

use crate::ast::{AstContext, DeclId, Expr, ExprKind, QualType, SourceRange};

/// One extracted usage: the declaration it targets, the type it was
/// observed through, and the range of the whole expression handed in.
#[derive(Debug, Clone)]
pub struct Usage {
    pub decl: DeclId,
    pub ty: QualType,
    pub range: SourceRange,
}

/// Walk `expr` and report the deepest variable-like declaration it
/// mentions, or `None` when the subtree binds no variable or data member.
pub fn extract_usage(ctx: &AstContext, expr: &Expr, seed: Option<QualType>) -> Option<Usage> {
    let mut extractor = UsageExtractor {
        ctx,
        decl: None,
        ty: seed,
    };
    extractor.walk(expr);
    extractor.decl.map(|decl| Usage {
        decl,
        ty: extractor.ty.unwrap_or_else(|| expr.ty.clone()),
        range: expr.range.clone(),
    })
}

struct UsageExtractor<'a, 'tu> {
    ctx: &'a AstContext<'tu>,
    decl: Option<DeclId>,
    ty: Option<QualType>,
}

impl UsageExtractor<'_, '_> {
    fn set_type(&mut self, ty: &QualType) {
        if self.ty.is_none() {
            self.ty = Some(ty.clone());
        }
    }

    fn bind(&mut self, id: DeclId) {
        // Function and record targets are silently ignored.
        if self.ctx.is_variable_like(id) {
            self.decl = Some(id);
        }
    }

    fn walk(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::DeclRef(id) => {
                self.bind(*id);
                self.set_type(&e.ty);
            }
            ExprKind::Member { base, member } => {
                self.bind(*member);
                self.set_type(&e.ty);
                self.walk(base);
            }
            ExprKind::Cast(operand) => {
                self.set_type(&e.ty);
                self.walk(operand);
            }
            ExprKind::Unary { op, operand } if op.is_addr_of_or_deref() => {
                self.set_type(&e.ty);
                self.walk(operand);
            }
            _ => {
                for c in e.children() {
                    self.walk(c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::{
        assign, decl_ref, int_ty, lit, member, this_member, unary, AstBuilder,
    };
    use crate::ast::{Stmt, UnOp};

    #[test]
    fn test_plain_decl_ref() {
        let mut b = AstBuilder::new("main.cpp");
        let v = b.var("j", int_ty());
        let body = Stmt::Compound(vec![Stmt::Expr(decl_ref(&v))]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let u = extract_usage(&ctx, &decl_ref(&v), None).unwrap();
        assert_eq!(u.decl, v.id);
        assert_eq!(u.ty, int_ty());
    }

    #[test]
    fn test_seed_wins_over_expression_type() {
        let mut b = AstBuilder::new("main.cpp");
        let v = b.var("j", int_ty());
        let body = Stmt::Compound(vec![Stmt::Expr(decl_ref(&v))]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let seed = QualType::named("long");
        let u = extract_usage(&ctx, &decl_ref(&v), Some(seed.clone())).unwrap();
        assert_eq!(u.ty, seed);
    }

    #[test]
    fn test_member_base_is_deepest() {
        // `s.m` binds s, not the field: the base reference is deeper.
        let mut b = AstBuilder::new("main.cpp");
        let m = b.field("m", int_ty());
        let rid = b.id();
        let record = b.record(rid, "P", vec![m.clone()], Vec::new());
        let s = b.var("s", QualType::named("P"));
        let access = member(decl_ref(&s), &m);
        let body = Stmt::Compound(vec![Stmt::Decl(s.clone()), Stmt::Expr(access.clone())]);
        let f = b.function("h", Vec::new(), Some(body));
        b.add_record(record);
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let u = extract_usage(&ctx, &access, None).unwrap();
        assert_eq!(u.decl, s.id);
        // The member access supplied the first type.
        assert_eq!(u.ty, int_ty());
    }

    #[test]
    fn test_implicit_member_binds_field() {
        let mut b = AstBuilder::new("main.cpp");
        let m = b.field("m", int_ty());
        let rid = b.id();
        let record = b.record(rid, "C", vec![m.clone()], Vec::new());
        b.add_record(record);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let record = match &tu.decls[0] {
            crate::ast::TopLevelDecl::Record(r) => r,
            _ => unreachable!(),
        };
        let access = this_member(record, &m);
        let u = extract_usage(&ctx, &access, None).unwrap();
        assert_eq!(u.decl, m.id);
    }

    #[test]
    fn test_no_binding_yields_none() {
        let mut b = AstBuilder::new("main.cpp");
        let tu = {
            let f = b.function("f", Vec::new(), None);
            b.add_function(f);
            b.finish()
        };
        let ctx = AstContext::new(&tu);
        assert!(extract_usage(&ctx, &lit(3), None).is_none());
    }

    #[test]
    fn test_deref_sets_type_first() {
        let mut b = AstBuilder::new("main.cpp");
        let p = b.var("p", QualType::pointer(int_ty()));
        let body = Stmt::Compound(vec![Stmt::Decl(p.clone())]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let deref = unary(UnOp::Deref, decl_ref(&p), int_ty());
        let u = extract_usage(&ctx, &deref, None).unwrap();
        assert_eq!(u.decl, p.id);
        // Deref result type, not the pointer type of the reference.
        assert_eq!(u.ty, int_ty());
    }

    #[test]
    fn test_assignment_subtree_reports_deepest() {
        let mut b = AstBuilder::new("main.cpp");
        let j = b.var("j", int_ty());
        let body = Stmt::Compound(vec![Stmt::Decl(j.clone())]);
        let f = b.function("f", Vec::new(), Some(body));
        b.add_function(f);
        let tu = b.finish();
        let ctx = AstContext::new(&tu);

        let e = assign(decl_ref(&j), lit(1));
        let u = extract_usage(&ctx, &e, None).unwrap();
        assert_eq!(u.decl, j.id);
    }
}
