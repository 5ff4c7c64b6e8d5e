//! Access traversal: collect every declaration a scope reads.
//!
//! Two forms count as an access: a direct variable reference, and a member
//! access whose base is the enclosing-instance expression (member methods
//! included, so peer-method references are observable by the module
//! analyzer).

use crate::ast::{AstContext, Expr, ExprKind, Stmt};

use super::extract::extract_usage;
use super::{UsageRef, UsageRefsMap};

pub(super) struct AccessCollector<'a, 'tu> {
    ctx: &'a AstContext<'tu>,
    results: UsageRefsMap,
}

impl<'a, 'tu> AccessCollector<'a, 'tu> {
    pub(super) fn new(ctx: &'a AstContext<'tu>) -> Self {
        Self {
            ctx,
            results: UsageRefsMap::new(),
        }
    }

    pub(super) fn collect(mut self, body: &Stmt) -> UsageRefsMap {
        self.visit_stmt(body);
        self.results
    }

    fn visit_stmt(&mut self, s: &Stmt) {
        for e in s.child_exprs() {
            self.visit_expr(e);
        }
        for c in s.child_stmts() {
            self.visit_stmt(c);
        }
    }

    fn visit_expr(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::DeclRef(_) => {
                if let Some(u) = extract_usage(self.ctx, e, None) {
                    self.results
                        .entry(u.decl)
                        .or_default()
                        .push(UsageRef {
                            ty: u.ty,
                            range: u.range,
                        });
                }
            }
            ExprKind::Member { base, member } if matches!(base.kind, ExprKind::This) => {
                self.results
                    .entry(*member)
                    .or_default()
                    .push(UsageRef {
                        ty: e.ty.clone(),
                        range: e.range.clone(),
                    });
            }
            _ => {}
        }

        for c in e.children() {
            self.visit_expr(c);
        }
    }
}
