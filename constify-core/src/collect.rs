//! Declaration collection: the candidate sets a function's analysis ranges
//! over.
//!
//! Context variables are the parameters and locals visible from a function
//! body. For methods the module analyzer additionally ranges over the
//! enclosing record's member variables; reference-typed static members are
//! counted among them because mutation through such a member hits shared
//! state.

use std::collections::BTreeSet;

use crate::ast::{
    AstContext, DeclId, ExprKind, FieldDecl, FunctionDecl, MethodKind, RecordDecl,
};

/// Parameters and locals of `f`, in declaration order. With
/// `include_members` set (non-plain methods) the enclosing record's fields
/// are appended so member mutation in constructors and other special
/// members still flows into the variable state.
pub fn context_variables(
    ctx: &AstContext,
    f: &FunctionDecl,
    include_members: bool,
) -> Vec<DeclId> {
    let mut out: Vec<DeclId> = f.params.iter().map(|p| p.id).collect();
    if let Some(body) = &f.body {
        out.extend(body.local_decls().iter().map(|v| v.id));
    }
    if include_members {
        if let Some(record) = f.method.as_ref().and_then(|m| ctx.record(m.record)) {
            out.extend(member_variables(record));
        }
    }
    out
}

/// The member variables relevant to method-level analysis: every non-static
/// data member plus reference-typed static members.
pub fn member_variables(record: &RecordDecl) -> Vec<DeclId> {
    record
        .fields
        .iter()
        .map(|f: &FieldDecl| f.id)
        .chain(
            record
                .static_members
                .iter()
                .filter(|f| f.ty.is_reference())
                .map(|f| f.id),
        )
        .collect()
}

/// All methods declared in `record`, static ones included; callers filter
/// by the trait they need.
pub fn record_methods(record: &RecordDecl) -> Vec<DeclId> {
    record.methods.iter().map(|m| m.id).collect()
}

/// A plain method is user-provided, not virtual, and none of the special
/// member kinds. Only plain methods are eligible for const/static verdicts.
pub fn is_plain_method(f: &FunctionDecl) -> bool {
    f.method.as_ref().is_some_and(|m| {
        m.is_user_provided && !m.is_virtual && m.kind == MethodKind::Ordinary
    })
}

/// The declarations `v` stands for when mutated.
///
/// A non-reference declaration is its own single referent. A reference is a
/// syntactic alias: it stands for itself plus, transitively, everything the
/// variables and members named in its initializer stand for.
pub fn referred_variables(ctx: &AstContext, v: DeclId) -> BTreeSet<DeclId> {
    let mut out = BTreeSet::new();
    let mut pending = vec![v];
    while let Some(d) = pending.pop() {
        if !out.insert(d) {
            continue;
        }
        let Some(var) = ctx.variable(d) else {
            continue;
        };
        if !var.ty.is_reference() {
            continue;
        }
        if let Some(init) = &var.init {
            init.for_each(&mut |e| match e.kind {
                ExprKind::DeclRef(id) if ctx.is_variable_like(id) => pending.push(id),
                ExprKind::Member { member, .. } if ctx.field(member).is_some() => {
                    pending.push(member)
                }
                _ => {}
            });
        }
    }
    out
}
