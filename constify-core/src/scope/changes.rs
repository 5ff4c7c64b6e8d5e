//! Mutation traversal: collect every variable a scope syntactically changes.
//!
//! The rules fire independently per node; all of them funnel the target
//! expression through the usage extractor. Unknown constructs contribute
//! nothing but are still descended into.

use crate::ast::{AstContext, Expr, ExprKind, FunctionDecl, QualType, Stmt, VarDecl};

use super::extract::extract_usage;
use super::{UsageRef, UsageRefsMap};

pub(super) struct ChangeCollector<'a, 'tu> {
    ctx: &'a AstContext<'tu>,
    results: UsageRefsMap,
}

impl<'a, 'tu> ChangeCollector<'a, 'tu> {
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

    fn add(&mut self, target: &Expr, seed: Option<QualType>) {
        if let Some(u) = extract_usage(self.ctx, target, seed) {
            self.results
                .entry(u.decl)
                .or_default()
                .push(UsageRef {
                    ty: u.ty,
                    range: u.range,
                });
        }
    }

    fn visit_stmt(&mut self, s: &Stmt) {
        if let Stmt::Decl(v) = s {
            self.visit_var_decl(v);
        }
        for e in s.child_exprs() {
            self.visit_expr(e);
        }
        for c in s.child_stmts() {
            self.visit_stmt(c);
        }
    }

    /// Binding an initializer to a non-const reference (or pointer) local
    /// can mutate the initializer's target: apply the reference-argument
    /// rule to the binding.
    fn visit_var_decl(&mut self, v: &VarDecl) {
        if let Some(init) = &v.init {
            if v.ty.has_non_const_pointee() {
                let pointee = v.ty.pointee().cloned();
                self.add(init, pointee);
            }
        }
    }

    fn visit_expr(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::Binary { op, lhs, .. } if op.is_assignment() => {
                self.add(lhs, None);
            }
            ExprKind::Unary { op, operand } if op.is_increment_or_decrement() => {
                self.add(operand, None);
            }
            ExprKind::Call { callee, args } => {
                if let ExprKind::DeclRef(id) = callee.kind {
                    if let Some(f) = self.ctx.function(id) {
                        self.check_reference_params(f, args, 0);
                    }
                }
            }
            ExprKind::MemberCall { callee, args } => {
                if let ExprKind::Member { base, member } = &callee.kind {
                    if let Some(f) = self.ctx.function(*member) {
                        if let Some(m) = &f.method {
                            if !m.is_static && !m.is_const {
                                self.add(base, None);
                            }
                        }
                        self.check_reference_params(f, args, 0);
                    }
                }
            }
            ExprKind::OperatorCall {
                operator,
                is_member,
                args,
            } => {
                if let Some(f) = self.ctx.function(*operator) {
                    if *is_member {
                        if let Some(m) = &f.method {
                            if !m.is_static && !m.is_const {
                                if let Some(object) = args.first() {
                                    self.add(object, None);
                                }
                            }
                        }
                        // Argument 0 is the object; parameters start at 1.
                        self.check_reference_params(f, args, 1);
                    } else {
                        self.check_reference_params(f, args, 0);
                    }
                }
            }
            ExprKind::Construct { ctor, args } => {
                if let Some(f) = self.ctx.function(*ctor) {
                    self.check_reference_params(f, args, 0);
                }
            }
            ExprKind::PlacementNew {
                placement_args,
                ctor,
                init_args,
            } => {
                for a in placement_args {
                    self.add(a, None);
                }
                if let Some(ctor) = ctor {
                    if let Some(f) = self.ctx.function(*ctor) {
                        self.check_reference_params(f, init_args, 0);
                    }
                }
            }
            _ => {}
        }

        for c in e.children() {
            self.visit_expr(c);
        }
    }

    /// Arguments bound to reference or pointer parameters with a non-const
    /// pointee are potentially mutated. Argument/parameter count mismatches
    /// (variadic calls) iterate the shorter of the two lists.
    fn check_reference_params(&mut self, f: &FunctionDecl, args: &[Expr], arg_offset: usize) {
        let positional = args.len().saturating_sub(arg_offset);
        let count = positional.min(f.params.len());
        for i in 0..count {
            let param = &f.params[i];
            if param.ty.has_non_const_pointee() {
                let pointee = param.ty.pointee().cloned();
                self.add(&args[i + arg_offset], pointee);
            }
        }
    }
}
