//! Statement and expression tree.
//!
//! Expression nodes carry the type the front end computed for them and
//! their full source range. The kind set is closed: it is exactly the set
//! of constructs the mutation and access rules discriminate, plus the
//! carriers (literals, casts, initializer lists) traversals descend
//! through.

use serde::{Deserialize, Serialize};

use super::decl::{DeclId, SourceRange, VarDecl};
use super::types::QualType;

/// A statement in a function body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Compound(Vec<Stmt>),
    Expr(Expr),
    /// Local variable declaration.
    Decl(VarDecl),
    Return(Option<Expr>),
    If {
        cond: Expr,
        then_body: Box<Stmt>,
        else_body: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
}

impl Stmt {
    /// Direct sub-statements of this node.
    pub fn child_stmts(&self) -> Vec<&Stmt> {
        match self {
            Stmt::Compound(stmts) => stmts.iter().collect(),
            Stmt::If {
                then_body,
                else_body,
                ..
            } => {
                let mut out: Vec<&Stmt> = vec![then_body];
                if let Some(e) = else_body {
                    out.push(e);
                }
                out
            }
            Stmt::While { body, .. } => vec![body],
            _ => Vec::new(),
        }
    }

    /// Direct expressions of this node (not recursing into sub-statements).
    pub fn child_exprs(&self) -> Vec<&Expr> {
        match self {
            Stmt::Expr(e) => vec![e],
            Stmt::Decl(v) => v.init.iter().collect(),
            Stmt::Return(Some(e)) => vec![e],
            Stmt::Return(None) => Vec::new(),
            Stmt::If { cond, .. } => vec![cond],
            Stmt::While { cond, .. } => vec![cond],
            Stmt::Compound(_) => Vec::new(),
        }
    }

    /// Visit every expression node in this subtree, pre-order.
    pub fn for_each_expr<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        for e in self.child_exprs() {
            e.for_each(f);
        }
        for s in self.child_stmts() {
            s.for_each_expr(f);
        }
    }

    /// All local variable declarations in this subtree, in source order.
    pub fn local_decls(&self) -> Vec<&VarDecl> {
        let mut out = Vec::new();
        self.collect_local_decls(&mut out);
        out
    }

    fn collect_local_decls<'a>(&'a self, out: &mut Vec<&'a VarDecl>) {
        if let Stmt::Decl(v) = self {
            out.push(v);
        }
        for s in self.child_stmts() {
            s.collect_local_decls(out);
        }
    }
}

/// An expression node: a kind, the computed type, and the source extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: QualType,
    pub range: SourceRange,
}

/// Structural kind of an expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Direct reference to a declaration (variable, parameter, function).
    DeclRef(DeclId),
    /// Member access `base.member` / `base->member`. Unqualified member
    /// references inside a method are represented with a `This` base.
    Member { base: Box<Expr>, member: DeclId },
    /// The enclosing-instance expression inside a method body.
    This,
    IntLiteral(i64),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// A call whose callee is an arbitrary expression. The parameter rules
    /// fire only when the callee resolves to a direct function declaration.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// A call through a member access: `obj.method(args)`. The implicit
    /// object is the base of the callee member expression, not an argument.
    MemberCall {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// An overloaded operator call after resolution. For a member operator
    /// the object occupies argument position 0 and parameter indexing is
    /// shifted by one.
    OperatorCall {
        operator: DeclId,
        is_member: bool,
        args: Vec<Expr>,
    },
    /// Direct-initialized object construction.
    Construct { ctor: DeclId, args: Vec<Expr> },
    /// Placement allocation. Placement arguments are conservatively treated
    /// as mutated; initializer arguments follow the constructor rule.
    PlacementNew {
        placement_args: Vec<Expr>,
        ctor: Option<DeclId>,
        init_args: Vec<Expr>,
    },
    /// Explicit or implicit cast; the target type is the node's `ty`.
    Cast(Box<Expr>),
    /// Brace initializer list.
    InitList(Vec<Expr>),
}

impl Expr {
    /// Direct sub-expressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::DeclRef(_) | ExprKind::This | ExprKind::IntLiteral(_) => Vec::new(),
            ExprKind::Member { base, .. } => vec![base],
            ExprKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            ExprKind::Unary { operand, .. } => vec![operand],
            ExprKind::Cast(operand) => vec![operand],
            ExprKind::Call { callee, args } | ExprKind::MemberCall { callee, args } => {
                std::iter::once(callee.as_ref()).chain(args.iter()).collect()
            }
            ExprKind::OperatorCall { args, .. } => args.iter().collect(),
            ExprKind::Construct { args, .. } => args.iter().collect(),
            ExprKind::PlacementNew {
                placement_args,
                init_args,
                ..
            } => placement_args.iter().chain(init_args.iter()).collect(),
            ExprKind::InitList(items) => items.iter().collect(),
        }
    }

    /// Visit this node and every sub-expression, pre-order.
    pub fn for_each<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        for c in self.children() {
            c.for_each(f);
        }
    }

    /// True iff this subtree contains the enclosing-instance expression,
    /// including the implicit bases of unqualified member accesses.
    pub fn mentions_this(&self) -> bool {
        let mut found = false;
        self.for_each(&mut |e| {
            if matches!(e.kind, ExprKind::This) {
                found = true;
            }
        });
        found
    }
}

/// Binary operators. Only the assignment group matters to the mutation
/// rules; the rest exist so bodies can be represented faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    LogicalAnd,
    LogicalOr,
}

impl BinOp {
    /// True for plain and compound assignment.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinOp::Assign
                | BinOp::AddAssign
                | BinOp::SubAssign
                | BinOp::MulAssign
                | BinOp::DivAssign
                | BinOp::RemAssign
                | BinOp::ShlAssign
                | BinOp::ShrAssign
                | BinOp::AndAssign
                | BinOp::OrAssign
                | BinOp::XorAssign
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
    AddrOf,
    Deref,
    Neg,
    Not,
}

impl UnOp {
    /// True for the four increment/decrement forms.
    pub fn is_increment_or_decrement(self) -> bool {
        matches!(
            self,
            UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec
        )
    }

    /// True for the operators whose result type seeds the usage extractor.
    pub fn is_addr_of_or_deref(self) -> bool {
        matches!(self, UnOp::AddrOf | UnOp::Deref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::decl::SourceRange;

    fn int_expr(kind: ExprKind) -> Expr {
        Expr {
            kind,
            ty: QualType::named("int"),
            range: SourceRange::default(),
        }
    }

    #[test]
    fn test_assignment_discrimination() {
        assert!(BinOp::Assign.is_assignment());
        assert!(BinOp::ShlAssign.is_assignment());
        assert!(!BinOp::Add.is_assignment());
        assert!(!BinOp::Eq.is_assignment());
    }

    #[test]
    fn test_inc_dec_discrimination() {
        assert!(UnOp::PreInc.is_increment_or_decrement());
        assert!(UnOp::PostDec.is_increment_or_decrement());
        assert!(!UnOp::AddrOf.is_increment_or_decrement());
        assert!(UnOp::Deref.is_addr_of_or_deref());
    }

    #[test]
    fn test_mentions_this_through_member_base() {
        let this = Expr {
            kind: ExprKind::This,
            ty: QualType::pointer(QualType::named("C")),
            range: SourceRange::default(),
        };
        let member = int_expr(ExprKind::Member {
            base: Box::new(this),
            member: DeclId(7),
        });
        assert!(member.mentions_this());

        let plain = int_expr(ExprKind::DeclRef(DeclId(1)));
        assert!(!plain.mentions_this());
    }

    #[test]
    fn test_local_decls_recurse_into_branches() {
        let var = VarDecl {
            id: DeclId(3),
            name: "k".into(),
            ty: QualType::named("int"),
            init: None,
            loc: Default::default(),
        };
        let body = Stmt::Compound(vec![Stmt::If {
            cond: int_expr(ExprKind::IntLiteral(1)),
            then_body: Box::new(Stmt::Decl(var)),
            else_body: None,
        }]);
        let locals = body.local_decls();
        assert_eq!(locals.len(), 1);
        assert_eq!(locals[0].name, "k");
    }
}
