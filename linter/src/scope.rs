// scope.rs — Top-level binding table
//
// Builds a name → definition table for the value and type namespaces of a
// program, then resolves identifier and type references to their unique
// static definition, following alias chains transitively.
//
// Preconditions: `program` is an AST from the parser.
// Postconditions: every top-level name maps to exactly one binding; names
//                 declared twice or reassigned anywhere map to `Ambiguous`.
// Failure modes: none. Unresolvable references resolve to `None`.
// Side effects: none.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::ast::*;
use crate::visit::{self, Visitor};

// ── Bindings ────────────────────────────────────────────────────────────────

/// What a value-namespace name is bound to.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    /// Unique initialiser: `const x = <expr>`.
    Init(&'a Expr),
    /// Declared with no usable initialiser: `let x;`, destructuring,
    /// function and class declarations.
    Uninit,
    /// Imported, or initialised from `require(...)`.
    External,
    /// Declared more than once, or reassigned.
    Ambiguous,
}

/// What a type-namespace name is bound to.
#[derive(Debug, Clone, Copy)]
pub enum TypeBinding<'a> {
    Alias(&'a TypeExpr),
    Interface(&'a Interface),
    External,
    Ambiguous,
}

/// End of a resolved type-reference chain.
#[derive(Debug, Clone, Copy)]
pub enum TypeTarget<'a> {
    Type(&'a TypeExpr),
    Interface(&'a Interface),
}

#[derive(Debug, Default)]
pub struct BindingTable<'a> {
    values: HashMap<&'a str, Binding<'a>>,
    types: HashMap<&'a str, TypeBinding<'a>>,
}

impl<'a> BindingTable<'a> {
    /// Build the table from a program's top-level statements.
    pub fn build(program: &'a Program) -> Self {
        let mut table = BindingTable::default();
        for stmt in &program.body {
            table.declare_stmt(stmt);
        }

        let mut scan = AssignmentScan::default();
        visit::walk_stmts(&mut scan, &program.body);
        for name in scan.assigned {
            if let Some(binding) = table.values.get_mut(name) {
                tracing::trace!(name, "binding reassigned");
                *binding = Binding::Ambiguous;
            }
        }
        table
    }

    pub fn value(&self, name: &str) -> Option<Binding<'a>> {
        self.values.get(name).copied()
    }

    pub fn type_binding(&self, name: &str) -> Option<TypeBinding<'a>> {
        self.types.get(name).copied()
    }

    /// Resolve a value identifier to its unique non-identifier initialiser.
    ///
    /// `const a = b; const b = {...}` resolves `a` to the object literal.
    /// Cycles, reassignments, imports and missing names yield `None`.
    pub fn resolve_value(&self, name: &str) -> Option<&'a Expr> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = name;
        loop {
            if !seen.insert(current) {
                tracing::trace!(name, "binding cycle");
                return None;
            }
            match self.values.get(current).copied()? {
                Binding::Init(expr) => match &expr.kind {
                    ExprKind::Ident(next) => current = next.as_str(),
                    _ => return Some(expr),
                },
                _ => return None,
            }
        }
    }

    /// Resolve a type name through alias chains (`type A = B`).
    pub fn resolve_type(&self, name: &str) -> Option<TypeTarget<'a>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = name;
        loop {
            if !seen.insert(current) {
                tracing::trace!(name, "type alias cycle");
                return None;
            }
            match self.types.get(current).copied()? {
                TypeBinding::Alias(ty) => match &ty.kind {
                    TypeKind::Ref { name: next, args } if args.is_empty() => {
                        current = next.as_str()
                    }
                    _ => return Some(TypeTarget::Type(ty)),
                },
                TypeBinding::Interface(iface) => return Some(TypeTarget::Interface(iface)),
                _ => return None,
            }
        }
    }

    // ── Construction ──

    fn declare_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.kind {
            StmtKind::Var(decl) => {
                for d in &decl.declarators {
                    match (&d.pattern.kind, &d.init) {
                        (PatternKind::Ident(id), Some(init)) if is_external_init(init) => {
                            self.declare_value(&id.name, Binding::External)
                        }
                        (PatternKind::Ident(id), Some(init)) => {
                            self.declare_value(&id.name, Binding::Init(init))
                        }
                        _ => {
                            let mut names = Vec::new();
                            pattern_names(&d.pattern, &mut names);
                            for name in names {
                                self.declare_value(name, Binding::Uninit);
                            }
                        }
                    }
                }
            }
            StmtKind::Function(f) => {
                if let Some(name) = &f.name {
                    self.declare_value(&name.name, Binding::Uninit);
                }
            }
            StmtKind::Class(c) => {
                if let Some(name) = &c.name {
                    self.declare_value(&name.name, Binding::Uninit);
                }
            }
            StmtKind::TypeAlias(alias) => {
                self.declare_type(&alias.name.name, TypeBinding::Alias(&alias.ty))
            }
            StmtKind::Interface(iface) => {
                self.declare_type(&iface.name.name, TypeBinding::Interface(iface))
            }
            StmtKind::Import(import) => {
                for local in &import.locals {
                    if !import.type_only {
                        self.declare_value(&local.name, Binding::External);
                    }
                    self.declare_type(&local.name, TypeBinding::External);
                }
            }
            StmtKind::Export(inner) => self.declare_stmt(inner),
            StmtKind::ExportDefault(ExportDefault::Function(f)) => {
                if let Some(name) = &f.name {
                    self.declare_value(&name.name, Binding::Uninit);
                }
            }
            StmtKind::ExportDefault(ExportDefault::Class(c)) => {
                if let Some(name) = &c.name {
                    self.declare_value(&name.name, Binding::Uninit);
                }
            }
            _ => {}
        }
    }

    fn declare_value(&mut self, name: &'a str, binding: Binding<'a>) {
        match self.values.entry(name) {
            Entry::Occupied(mut slot) => {
                slot.insert(Binding::Ambiguous);
            }
            Entry::Vacant(slot) => {
                slot.insert(binding);
            }
        }
    }

    fn declare_type(&mut self, name: &'a str, binding: TypeBinding<'a>) {
        match self.types.entry(name) {
            Entry::Occupied(mut slot) => {
                slot.insert(TypeBinding::Ambiguous);
            }
            Entry::Vacant(slot) => {
                slot.insert(binding);
            }
        }
    }
}

/// `require("x")`, `require("x").foo`, `require("x")(...)`.
fn is_external_init(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Call { callee, .. } => {
            matches!(&callee.kind, ExprKind::Ident(name) if name == "require")
                || is_external_init(callee)
        }
        ExprKind::Member { object, .. } => is_external_init(object),
        _ => false,
    }
}

fn pattern_names<'a>(pattern: &'a Pattern, out: &mut Vec<&'a str>) {
    match &pattern.kind {
        PatternKind::Ident(id) => out.push(&id.name),
        PatternKind::Object(props) => {
            for prop in props {
                match prop {
                    ObjectPatternProp::Prop {
                        value: Some(value), ..
                    } => pattern_names(value, out),
                    ObjectPatternProp::Prop {
                        key: PropKey::Named(name),
                        value: None,
                        ..
                    } => out.push(name),
                    ObjectPatternProp::Prop { .. } => {}
                    ObjectPatternProp::Rest(inner) => pattern_names(inner, out),
                }
            }
        }
        PatternKind::Array(items) => {
            for item in items.iter().flatten() {
                pattern_names(item, out);
            }
        }
        PatternKind::Rest(inner) | PatternKind::Assign(inner, _) => pattern_names(inner, out),
    }
}

// ── Reassignment scan ──

/// Collects every identifier that is the target of an assignment or update
/// anywhere in the program, at any depth.
#[derive(Default)]
struct AssignmentScan<'a> {
    assigned: Vec<&'a str>,
}

impl<'a> AssignmentScan<'a> {
    fn collect_target(&mut self, target: &'a Expr) {
        match &target.kind {
            ExprKind::Ident(name) => self.assigned.push(name),
            ExprKind::Object(members) => {
                for m in members {
                    match &m.kind {
                        ObjectMemberKind::Shorthand(id) => self.assigned.push(&id.name),
                        ObjectMemberKind::Property { value, .. } => self.collect_target(value),
                        ObjectMemberKind::Spread(inner) => self.collect_target(inner),
                        _ => {}
                    }
                }
            }
            ExprKind::Array(items) => {
                for item in items.iter().flatten() {
                    self.collect_target(item);
                }
            }
            ExprKind::Spread(inner) | ExprKind::Cast { expr: inner, .. } => {
                self.collect_target(inner)
            }
            ExprKind::Assign { target, .. } => self.collect_target(target),
            _ => {}
        }
    }
}

impl<'a> Visitor<'a> for AssignmentScan<'a> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        match &expr.kind {
            ExprKind::Assign { target, .. } => self.collect_target(target),
            ExprKind::Update { arg } => self.collect_target(arg),
            _ => {}
        }
        visit::walk_expr(self, expr);
    }
}
