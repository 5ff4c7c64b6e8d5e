//! Id-indexed view over one translation unit.
//!
//! [`AstContext`] is the oracle surface the analysis queries: canonical-id
//! lookups for functions, records, fields and variables, the main-file
//! predicate, and function-definition iteration in declaration order.

use std::collections::HashMap;

use super::decl::{
    DeclId, FieldDecl, FunctionDecl, RecordDecl, SourceLocation, TopLevelDecl, TranslationUnit,
    VarDecl,
};
use super::types::QualType;

/// Lookup tables over a [`TranslationUnit`]. Built once per unit; read-only
/// for the duration of the analysis.
pub struct AstContext<'a> {
    tu: &'a TranslationUnit,
    functions: HashMap<DeclId, &'a FunctionDecl>,
    records: HashMap<DeclId, &'a RecordDecl>,
    fields: HashMap<DeclId, &'a FieldDecl>,
    variables: HashMap<DeclId, &'a VarDecl>,
    /// Function definitions in declaration order.
    definitions: Vec<&'a FunctionDecl>,
}

impl<'a> AstContext<'a> {
    pub fn new(tu: &'a TranslationUnit) -> Self {
        let mut ctx = Self {
            tu,
            functions: HashMap::new(),
            records: HashMap::new(),
            fields: HashMap::new(),
            variables: HashMap::new(),
            definitions: Vec::new(),
        };
        for decl in &tu.decls {
            match decl {
                TopLevelDecl::Function(f) => ctx.index_function(f),
                TopLevelDecl::Record(r) => {
                    ctx.records.insert(r.id, r);
                    for field in r.fields.iter().chain(r.static_members.iter()) {
                        ctx.fields.insert(field.id, field);
                    }
                    for m in &r.methods {
                        ctx.index_function(m);
                    }
                }
            }
        }
        ctx
    }

    fn index_function(&mut self, f: &'a FunctionDecl) {
        self.functions.insert(f.id, f);
        for p in &f.params {
            self.variables.insert(p.id, p);
        }
        if let Some(body) = &f.body {
            for v in body.local_decls() {
                self.variables.insert(v.id, v);
            }
            self.definitions.push(f);
        }
    }

    pub fn translation_unit(&self) -> &'a TranslationUnit {
        self.tu
    }

    pub fn function(&self, id: DeclId) -> Option<&'a FunctionDecl> {
        self.functions.get(&id).copied()
    }

    pub fn record(&self, id: DeclId) -> Option<&'a RecordDecl> {
        self.records.get(&id).copied()
    }

    pub fn field(&self, id: DeclId) -> Option<&'a FieldDecl> {
        self.fields.get(&id).copied()
    }

    pub fn variable(&self, id: DeclId) -> Option<&'a VarDecl> {
        self.variables.get(&id).copied()
    }

    /// True when the id names a variable, parameter, or data member; the
    /// usage extractor binds only these.
    pub fn is_variable_like(&self, id: DeclId) -> bool {
        self.variables.contains_key(&id) || self.fields.contains_key(&id)
    }

    /// The declared type of a variable-like declaration.
    pub fn declared_type(&self, id: DeclId) -> Option<&'a QualType> {
        self.variable(id)
            .map(|v| &v.ty)
            .or_else(|| self.field(id).map(|f| &f.ty))
    }

    /// The name of any indexed declaration.
    pub fn decl_name(&self, id: DeclId) -> Option<&'a str> {
        self.variable(id)
            .map(|v| v.name.as_str())
            .or_else(|| self.field(id).map(|f| f.name.as_str()))
            .or_else(|| self.function(id).map(|f| f.name.as_str()))
            .or_else(|| self.record(id).map(|r| r.name.as_str()))
    }

    /// The source location of any indexed declaration.
    pub fn decl_loc(&self, id: DeclId) -> Option<&'a SourceLocation> {
        self.variable(id)
            .map(|v| &v.loc)
            .or_else(|| self.field(id).map(|f| &f.loc))
            .or_else(|| self.function(id).map(|f| &f.loc))
            .or_else(|| self.record(id).map(|r| &r.loc))
    }

    /// Main-file predicate for diagnostic filtering.
    pub fn is_from_main_file(&self, loc: &SourceLocation) -> bool {
        loc.file == self.tu.main_file
    }

    /// True when the declaration's own location is in the main file.
    pub fn decl_in_main_file(&self, id: DeclId) -> bool {
        self.decl_loc(id)
            .is_some_and(|loc| self.is_from_main_file(loc))
    }

    /// Function definitions in translation-unit declaration order.
    /// Declarations without bodies never appear here.
    pub fn function_definitions(&self) -> impl Iterator<Item = &'a FunctionDecl> + '_ {
        self.definitions.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::AstBuilder;

    #[test]
    fn test_indexes_locals_and_params() {
        let mut b = AstBuilder::new("main.cpp");
        let p = b.var("arg", QualType::named("int"));
        let local = b.var("k", QualType::named("int"));
        let body = crate::ast::Stmt::Compound(vec![crate::ast::Stmt::Decl(local.clone())]);
        let f = b.function("f", vec![p.clone()], Some(body));
        let fid = f.id;
        b.add_function(f);
        let tu = b.finish();

        let ctx = AstContext::new(&tu);
        assert!(ctx.variable(p.id).is_some());
        assert!(ctx.variable(local.id).is_some());
        assert!(ctx.is_variable_like(local.id));
        assert!(!ctx.is_variable_like(fid));
        assert_eq!(ctx.decl_name(local.id), Some("k"));
        assert_eq!(ctx.function_definitions().count(), 1);
    }

    #[test]
    fn test_skips_bodyless_definitions() {
        let mut b = AstBuilder::new("main.cpp");
        let f = b.function("declared_only", Vec::new(), None);
        b.add_function(f);
        let tu = b.finish();

        let ctx = AstContext::new(&tu);
        assert_eq!(ctx.function_definitions().count(), 0);
        assert!(ctx.function(DeclId(0)).is_some());
    }

    #[test]
    fn test_main_file_predicate() {
        let mut b = AstBuilder::new("main.cpp");
        let in_main = b.loc();
        let in_header = b.header_loc("lib.hpp");
        let tu = b.finish();

        let ctx = AstContext::new(&tu);
        assert!(ctx.is_from_main_file(&in_main));
        assert!(!ctx.is_from_main_file(&in_header));
    }
}
