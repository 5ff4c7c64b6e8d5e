//! Programmatic construction of translation units.
//!
//! Front ends that live in-process (and the test suite) build trees through
//! [`AstBuilder`] instead of serializing a dump: the builder allocates
//! canonical ids and main-file source locations, the free helpers below
//! assemble typed expression nodes without spelling out every field.

use super::decl::{
    DeclId, FieldDecl, FunctionDecl, MethodInfo, MethodKind, RecordDecl, SourceLocation,
    SourceRange, TopLevelDecl, TranslationUnit, VarDecl,
};
use super::expr::{BinOp, Expr, ExprKind, Stmt, UnOp};
use super::types::QualType;

/// Incrementally builds a [`TranslationUnit`], allocating canonical ids and
/// one source line per declaration.
pub struct AstBuilder {
    main_file: String,
    next_id: u32,
    next_line: u32,
    decls: Vec<TopLevelDecl>,
}

impl AstBuilder {
    pub fn new(main_file: impl Into<String>) -> Self {
        Self {
            main_file: main_file.into(),
            next_id: 0,
            next_line: 0,
            decls: Vec::new(),
        }
    }

    /// Allocate a fresh canonical id.
    pub fn id(&mut self) -> DeclId {
        let id = DeclId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A fresh location in the main file.
    pub fn loc(&mut self) -> SourceLocation {
        self.next_line += 1;
        SourceLocation {
            file: self.main_file.clone(),
            line: self.next_line,
            column: 1,
        }
    }

    /// A fresh location in an included file.
    pub fn header_loc(&mut self, file: impl Into<String>) -> SourceLocation {
        self.next_line += 1;
        SourceLocation {
            file: file.into(),
            line: self.next_line,
            column: 1,
        }
    }

    /// A parameter or local without an initializer.
    pub fn var(&mut self, name: impl Into<String>, ty: QualType) -> VarDecl {
        let id = self.id();
        let loc = self.loc();
        VarDecl {
            id,
            name: name.into(),
            ty,
            init: None,
            loc,
        }
    }

    /// A local with an initializer.
    pub fn var_init(&mut self, name: impl Into<String>, ty: QualType, init: Expr) -> VarDecl {
        let mut v = self.var(name, ty);
        v.init = Some(init);
        v
    }

    /// A data member.
    pub fn field(&mut self, name: impl Into<String>, ty: QualType) -> FieldDecl {
        let id = self.id();
        let loc = self.loc();
        FieldDecl {
            id,
            name: name.into(),
            ty,
            loc,
        }
    }

    /// A free function returning `void`.
    pub fn function(
        &mut self,
        name: impl Into<String>,
        params: Vec<VarDecl>,
        body: Option<Stmt>,
    ) -> FunctionDecl {
        let id = self.id();
        let loc = self.loc();
        FunctionDecl {
            id,
            name: name.into(),
            params,
            ret: QualType::named("void"),
            body,
            method: None,
            loc,
        }
    }

    /// A method of `record` with the given traits.
    pub fn method(
        &mut self,
        record: DeclId,
        name: impl Into<String>,
        params: Vec<VarDecl>,
        body: Option<Stmt>,
        info: MethodInfo,
    ) -> FunctionDecl {
        let mut f = self.function(name, params, body);
        debug_assert_eq!(info.record, record);
        f.method = Some(info);
        f
    }

    /// A record assembled from previously built parts. The record id must
    /// have been allocated up front so methods could name it.
    pub fn record(
        &mut self,
        id: DeclId,
        name: impl Into<String>,
        fields: Vec<FieldDecl>,
        methods: Vec<FunctionDecl>,
    ) -> RecordDecl {
        let loc = self.loc();
        RecordDecl {
            id,
            name: name.into(),
            fields,
            static_members: Vec::new(),
            methods,
            loc,
        }
    }

    pub fn add_function(&mut self, f: FunctionDecl) {
        self.decls.push(TopLevelDecl::Function(f));
    }

    pub fn add_record(&mut self, r: RecordDecl) {
        self.decls.push(TopLevelDecl::Record(r));
    }

    pub fn finish(self) -> TranslationUnit {
        TranslationUnit {
            main_file: self.main_file,
            decls: self.decls,
        }
    }
}

/// Default method traits: ordinary, user-provided instance method.
pub fn method_info(record: DeclId) -> MethodInfo {
    MethodInfo {
        record,
        kind: MethodKind::Ordinary,
        is_virtual: false,
        is_static: false,
        is_const: false,
        is_user_provided: true,
    }
}

pub fn int_ty() -> QualType {
    QualType::named("int")
}

/// An expression node with a default range.
pub fn expr(kind: ExprKind, ty: QualType) -> Expr {
    Expr {
        kind,
        ty,
        range: SourceRange::default(),
    }
}

pub fn lit(value: i64) -> Expr {
    expr(ExprKind::IntLiteral(value), int_ty())
}

/// Reference to a variable or parameter.
pub fn decl_ref(v: &VarDecl) -> Expr {
    expr(ExprKind::DeclRef(v.id), v.ty.clone())
}

/// Reference to a function as a callee expression.
pub fn func_ref(f: &FunctionDecl) -> Expr {
    expr(ExprKind::DeclRef(f.id), QualType::named(format!("{} ()", f.ret)))
}

/// `base.field`
pub fn member(base: Expr, field: &FieldDecl) -> Expr {
    expr(
        ExprKind::Member {
            base: Box::new(base),
            member: field.id,
        },
        field.ty.clone(),
    )
}

/// The enclosing-instance expression of a method of `record`.
pub fn this_expr(record: &RecordDecl) -> Expr {
    expr(
        ExprKind::This,
        QualType::pointer(QualType::named(record.name.clone())),
    )
}

/// Implicit member access `field` (lowered to `this->field`).
pub fn this_member(record: &RecordDecl, field: &FieldDecl) -> Expr {
    member(this_expr(record), field)
}

pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let ty = lhs.ty.clone();
    expr(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        ty,
    )
}

/// `lhs = rhs`
pub fn assign(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Assign, lhs, rhs)
}

pub fn unary(op: UnOp, operand: Expr, ty: QualType) -> Expr {
    expr(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        ty,
    )
}

/// `++operand`
pub fn pre_inc(operand: Expr) -> Expr {
    let ty = operand.ty.clone();
    unary(UnOp::PreInc, operand, ty)
}

/// Call of a directly named function.
pub fn call(f: &FunctionDecl, args: Vec<Expr>) -> Expr {
    let ret = f.ret.clone();
    expr(
        ExprKind::Call {
            callee: Box::new(func_ref(f)),
            args,
        },
        ret,
    )
}

/// `base.method(args)`
pub fn method_call(base: Expr, m: &FunctionDecl, args: Vec<Expr>) -> Expr {
    let callee = expr(
        ExprKind::Member {
            base: Box::new(base),
            member: m.id,
        },
        QualType::named(format!("{} ()", m.ret)),
    );
    expr(
        ExprKind::MemberCall {
            callee: Box::new(callee),
            args,
        },
        m.ret.clone(),
    )
}

/// Direct-initialization `T(args)` through `ctor`.
pub fn construct(ctor: &FunctionDecl, record_name: &str, args: Vec<Expr>) -> Expr {
    expr(
        ExprKind::Construct {
            ctor: ctor.id,
            args,
        },
        QualType::named(record_name),
    )
}

pub fn expr_stmt(e: Expr) -> Stmt {
    Stmt::Expr(e)
}

pub fn ret_stmt(e: Expr) -> Stmt {
    Stmt::Return(Some(e))
}

pub fn decl_stmt(v: VarDecl) -> Stmt {
    Stmt::Decl(v)
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::Compound(stmts)
}
