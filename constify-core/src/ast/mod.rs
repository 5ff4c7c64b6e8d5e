//! Typed AST consumed by the analysis.
//!
//! The tree is the concrete form of the oracle contract: declarations with
//! canonical ids, expressions with computed types and source ranges, and
//! the lookup surface in [`context`]. It is produced by an external front
//! end (loaded from a dump via [`crate::parse`]) or built in-process with
//! [`build`].

pub mod build;
pub mod context;
pub mod decl;
pub mod expr;
pub mod types;

pub use context::AstContext;
pub use decl::{
    DeclId, FieldDecl, FunctionDecl, MethodInfo, MethodKind, RecordDecl, SourceLocation,
    SourceRange, TopLevelDecl, TranslationUnit, VarDecl,
};
pub use expr::{BinOp, Expr, ExprKind, Stmt, UnOp};
pub use types::{QualType, TypeKind};
