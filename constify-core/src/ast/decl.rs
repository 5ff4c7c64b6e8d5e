//! Declaration tree of one translation unit.
//!
//! This is the input contract of the analysis: a front end (or an embedder
//! building trees programmatically, see [`crate::ast::build`]) hands over one
//! [`TranslationUnit`] per source file. Every declaration carries a
//! [`DeclId`], the canonical identity the oracle assigns so that
//! redeclarations map to the same id. All analysis maps and sets are keyed
//! by it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expr::Stmt;
use super::types::QualType;

/// Canonical declaration identity. Stable across redeclarations of the same
/// entity within a translation unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DeclId(pub u32);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in a source file. `file` distinguishes the main file from
/// included headers for diagnostic filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The full extent of an expression in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

/// The AST of one top-level source file plus its transitively included
/// declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// The source file at the root of the unit; declarations located
    /// elsewhere are analyzed but never reported.
    pub main_file: String,
    /// Top-level declarations in declaration order.
    pub decls: Vec<TopLevelDecl>,
}

/// A declaration at translation-unit scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TopLevelDecl {
    Record(RecordDecl),
    Function(FunctionDecl),
}

/// A class or struct definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDecl {
    pub id: DeclId,
    pub name: String,
    /// Non-static data members, in declaration order.
    pub fields: Vec<FieldDecl>,
    /// Static data members. Reference-typed statics participate in the
    /// member-variable analysis; the rest do not.
    pub static_members: Vec<FieldDecl>,
    /// Methods declared in this record, in declaration order. A method with
    /// a body here is a definition.
    pub methods: Vec<FunctionDecl>,
    pub loc: SourceLocation,
}

/// A data member of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub id: DeclId,
    pub name: String,
    pub ty: QualType,
    pub loc: SourceLocation,
}

/// A free function or a method. Methods carry [`MethodInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub id: DeclId,
    pub name: String,
    pub params: Vec<VarDecl>,
    pub ret: QualType,
    /// Present for function definitions; a declaration without a body is
    /// skipped by the module analyzer.
    pub body: Option<Stmt>,
    /// Present when this function is a member of a record.
    pub method: Option<MethodInfo>,
    pub loc: SourceLocation,
}

impl FunctionDecl {
    /// True for a definition (a declaration that carries a body).
    pub fn is_definition(&self) -> bool {
        self.body.is_some()
    }
}

/// Member-function facts the analysis needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodInfo {
    /// Canonical id of the enclosing record.
    pub record: DeclId,
    pub kind: MethodKind,
    pub is_virtual: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub is_user_provided: bool,
}

/// Discriminates the special member kinds the analysis must exclude from
/// method verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Ordinary,
    Constructor,
    Destructor,
    Conversion,
    CopyAssignment,
}

/// A parameter or local variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub id: DeclId,
    pub name: String,
    pub ty: QualType,
    /// Initializer expression, when present. For reference-typed locals
    /// this is also the syntactic binding the alias analysis reads.
    pub init: Option<super::expr::Expr>,
    pub loc: SourceLocation,
}
