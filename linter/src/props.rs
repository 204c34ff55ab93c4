// props.rs — Property set builder
//
// Reduces a component's property-type declaration sites (runtime propTypes
// objects, static type annotations, accessors and incremental member
// writes) into a `PropertyDecl`: one resolved entry list, a union of
// independently resolved lists, or `Opaque`.
//
// Preconditions: sites are in source order; `table` was built from the
//                program the sites borrow from.
// Postconditions: a `Resolved` list contains every declared property; any
//                 construct that cannot be enumerated yields `Opaque`.
// Failure modes: none. Unrecognised shapes degrade to `Opaque`.
// Side effects: emits `tracing` debug events at bail-outs.

use std::collections::HashSet;

use crate::ast::*;
use crate::config::Options;
use crate::model::{upsert, DeclSite, PropertyDecl, PropertyEntry, PropertySet, Resolution};
use crate::scope::{BindingTable, TypeTarget};
use crate::union;
use crate::visit::{self, Visitor};

/// Generic type wrappers that do not change the shape of their argument.
const TRANSPARENT_TYPES: &[&str] = &["Readonly", "$ReadOnly", "$Exact"];

pub struct PropsBuilder<'t, 'a> {
    table: &'t BindingTable<'a>,
    options: &'t Options,
}

impl<'t, 'a> PropsBuilder<'t, 'a> {
    pub fn new(table: &'t BindingTable<'a>, options: &'t Options) -> Self {
        PropsBuilder { table, options }
    }

    /// Fold all sites, in order, into one property declaration.
    ///
    /// No sites at all is an empty resolved set.
    pub fn build(&self, sites: &[DeclSite<'a>]) -> PropertyDecl {
        let mut acc: Option<PropertyDecl> = None;
        for site in sites {
            let next = match *site {
                DeclSite::Method(_) => {
                    tracing::debug!(reason = "plain method", "propTypes site ignored");
                    continue;
                }
                DeclSite::MemberWrite { name, value, span } => {
                    let entry = PropertyEntry {
                        name: name.to_string(),
                        optional: !is_required(value),
                        span,
                    };
                    acc = Some(union::write_entry(
                        acc.unwrap_or_else(PropertyDecl::empty),
                        entry,
                    ));
                    continue;
                }
                DeclSite::Dynamic(_) => {
                    tracing::debug!(reason = "computed member write", "propTypes opaque");
                    PropertyDecl::opaque()
                }
                DeclSite::Value(expr) => self.reduce_value(expr, &mut HashSet::new()),
                DeclSite::Type(ty) => self.reduce_type(ty, &mut HashSet::new()),
                DeclSite::Accessor(function) => match sole_return(function) {
                    Some(expr) => self.reduce_value(expr, &mut HashSet::new()),
                    None => {
                        tracing::debug!(reason = "accessor without a sole return", "propTypes opaque");
                        PropertyDecl::opaque()
                    }
                },
            };
            acc = Some(match acc {
                None => next,
                Some(prev) => union::merge(prev, next),
            });
        }
        acc.unwrap_or_else(PropertyDecl::empty)
    }

    // ── Runtime declarations ──

    fn reduce_value(&self, expr: &'a Expr, visiting: &mut HashSet<&'a str>) -> PropertyDecl {
        match &expr.kind {
            ExprKind::Object(members) => PropertyDecl::Single(object_props(members)),
            ExprKind::Call { callee, args } => {
                let wrapper = callee
                    .dotted_name()
                    .is_some_and(|name| self.options.is_wrapper(&name));
                match args.first() {
                    Some(arg) if wrapper && !matches!(arg.kind, ExprKind::Spread(_)) => {
                        self.reduce_value(arg, visiting)
                    }
                    _ => {
                        tracing::debug!(reason = "unrecognised call", "propTypes opaque");
                        PropertyDecl::opaque()
                    }
                }
            }
            ExprKind::Ident(name) => {
                if !visiting.insert(name.as_str()) {
                    return PropertyDecl::opaque();
                }
                match self.table.resolve_value(name) {
                    Some(init) => self.reduce_value(init, visiting),
                    None => {
                        tracing::debug!(name = name.as_str(), reason = "unresolved binding", "propTypes opaque");
                        PropertyDecl::opaque()
                    }
                }
            }
            ExprKind::Cast { expr: inner, .. } => self.reduce_value(inner, visiting),
            _ => PropertyDecl::opaque(),
        }
    }

    // ── Static type declarations ──

    fn reduce_type(&self, ty: &'a TypeExpr, visiting: &mut HashSet<&'a str>) -> PropertyDecl {
        match &ty.kind {
            TypeKind::Object(obj) => PropertyDecl::Single(object_type_props(obj)),
            TypeKind::Ref { name, args } => {
                if TRANSPARENT_TYPES.contains(&name.as_str()) {
                    return match args.as_slice() {
                        [inner] => self.reduce_type(inner, visiting),
                        _ => PropertyDecl::opaque(),
                    };
                }
                if !args.is_empty() || !visiting.insert(name.as_str()) {
                    return PropertyDecl::opaque();
                }
                match self.table.resolve_type(name) {
                    Some(TypeTarget::Type(target)) => self.reduce_type(target, visiting),
                    Some(TypeTarget::Interface(iface)) if iface.extends.is_empty() => {
                        PropertyDecl::Single(object_type_props(&iface.body))
                    }
                    Some(TypeTarget::Interface(_)) => {
                        tracing::debug!(name = name.as_str(), reason = "interface extends", "props type opaque");
                        PropertyDecl::opaque()
                    }
                    None => {
                        tracing::debug!(name = name.as_str(), reason = "unresolved type", "props type opaque");
                        PropertyDecl::opaque()
                    }
                }
            }
            TypeKind::Union(parts) => union::flatten(
                parts
                    .iter()
                    .map(|part| self.reduce_type(part, &mut visiting.clone())),
            ),
            TypeKind::Intersection(parts) => {
                let mut merged = Vec::new();
                for part in parts {
                    match self.reduce_type(part, visiting) {
                        PropertyDecl::Single(Resolution::Resolved(entries)) => {
                            for entry in entries {
                                upsert(&mut merged, entry);
                            }
                        }
                        _ => return PropertyDecl::opaque(),
                    }
                }
                PropertyDecl::Single(Resolution::Resolved(merged))
            }
            _ => PropertyDecl::opaque(),
        }
    }
}

fn object_props(members: &[ObjectMember]) -> PropertySet {
    let mut entries = Vec::new();
    for member in members {
        let (name, optional) = match &member.kind {
            ObjectMemberKind::Property { key, value } => (key.name(), !is_required(value)),
            ObjectMemberKind::Shorthand(id) => (Some(id.name.as_str()), true),
            ObjectMemberKind::Method { key, .. }
            | ObjectMemberKind::Getter { key, .. }
            | ObjectMemberKind::Setter { key, .. } => (key.name(), true),
            ObjectMemberKind::Spread(_) => {
                tracing::debug!(reason = "spread", "propTypes opaque");
                return Resolution::Opaque;
            }
        };
        let Some(name) = name else {
            tracing::debug!(reason = "computed key", "propTypes opaque");
            return Resolution::Opaque;
        };
        upsert(
            &mut entries,
            PropertyEntry {
                name: name.to_string(),
                optional,
                span: member.span,
            },
        );
    }
    Resolution::Resolved(entries)
}

fn object_type_props(obj: &ObjectType) -> PropertySet {
    let mut entries = Vec::new();
    for member in &obj.members {
        match &member.kind {
            TypeMemberKind::Property { key, optional, .. } => {
                let Some(name) = key.name() else {
                    return Resolution::Opaque;
                };
                upsert(
                    &mut entries,
                    PropertyEntry {
                        name: name.to_string(),
                        optional: *optional,
                        span: member.span,
                    },
                );
            }
            TypeMemberKind::Index | TypeMemberKind::Call | TypeMemberKind::Spread(_) => {
                tracing::debug!(reason = "non-enumerable type member", "props type opaque");
                return Resolution::Opaque;
            }
        }
    }
    Resolution::Resolved(entries)
}

/// `PropTypes.x.isRequired`: the outermost member access is `isRequired`.
pub fn is_required(value: &Expr) -> bool {
    match &value.kind {
        ExprKind::Member { property, .. } => property.static_name() == Some("isRequired"),
        ExprKind::Cast { expr, .. } => is_required(expr),
        _ => false,
    }
}

// ── Accessors ──

/// The expression returned by a function's only `return`, when that return
/// is the last top-level statement of the body (or the arrow expression body).
pub fn sole_return(function: &Function) -> Option<&Expr> {
    match &function.body {
        FunctionBody::Expr(expr) => Some(expr),
        FunctionBody::Block(body) => {
            let mut counter = ReturnCounter::default();
            visit::walk_stmts(&mut counter, body);
            match body.last().map(|s| &s.kind) {
                Some(StmtKind::Return(Some(expr))) if counter.count == 1 => Some(expr),
                _ => None,
            }
        }
    }
}

/// Counts `return` statements of one function, not of nested ones.
#[derive(Default)]
struct ReturnCounter {
    count: usize,
}

impl<'a> Visitor<'a> for ReturnCounter {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if matches!(stmt.kind, StmtKind::Return(_)) {
            self.count += 1;
        }
        visit::walk_stmt(self, stmt);
    }

    fn visit_function(&mut self, _function: &'a Function) {}

    fn visit_class(&mut self, _class: &'a Class) {}
}
