// components.rs — Component registry
//
// Finds the components of a program (function, class and factory style)
// and gathers the syntax sites that declare their property types and
// default values. `Name.propTypes` / `Name.defaultProps` writes anywhere at
// the top level attach to the component of that name, before or after its
// definition.
//
// Preconditions: `program` parsed without errors.
// Postconditions: each component's sites are in source order; names that
//                 only carry declaration writes are `NotAComponent`.
// Failure modes: none.
// Side effects: emits `tracing` trace events per detected component.

use std::collections::HashMap;

use crate::ast::*;
use crate::config::Options;
use crate::model::{Component, ComponentKind, DeclSite};
use crate::visit::{self, Visitor};

/// Base classes that make a class a component.
const COMPONENT_BASES: &[&str] = &[
    "Component",
    "PureComponent",
    "React.Component",
    "React.PureComponent",
];

/// Annotation types whose first argument is a function component's props.
const FUNCTION_COMPONENT_TYPES: &[&str] = &[
    "FC",
    "FunctionComponent",
    "SFC",
    "VFC",
    "React.FC",
    "React.FunctionComponent",
    "React.SFC",
    "React.VFC",
];

const PROP_TYPES: &str = "propTypes";
const DEFAULT_PROPS: &str = "defaultProps";

/// Detect every component of `program`, in order of first appearance.
pub fn collect<'a>(program: &'a Program, options: &Options) -> Vec<Component<'a>> {
    let mut registry = Registry {
        options,
        entries: Vec::new(),
        index: HashMap::new(),
    };
    for stmt in &program.body {
        registry.detect_stmt(stmt);
    }
    for stmt in &program.body {
        registry.attach_write(stmt);
    }
    registry.finish()
}

// ── Registry ──

#[derive(Clone, Copy)]
enum Side {
    Props,
    Defaults,
}

impl Side {
    fn from_name(name: &str) -> Option<Side> {
        match name {
            PROP_TYPES => Some(Side::Props),
            DEFAULT_PROPS => Some(Side::Defaults),
            _ => None,
        }
    }
}

/// A component under construction. Sites carry their source offset so
/// hoisted writes can be ordered afterwards.
struct Entry<'a> {
    name: String,
    kind: ComponentKind,
    span: Span,
    props: Vec<(usize, DeclSite<'a>)>,
    defaults: Vec<(usize, DeclSite<'a>)>,
}

impl<'a> Entry<'a> {
    fn push(&mut self, side: Side, at: usize, site: DeclSite<'a>) {
        match side {
            Side::Props => self.props.push((at, site)),
            Side::Defaults => self.defaults.push((at, site)),
        }
    }
}

struct Registry<'o, 'a> {
    options: &'o Options,
    entries: Vec<Entry<'a>>,
    index: HashMap<String, usize>,
}

impl<'o, 'a> Registry<'o, 'a> {
    fn register(&mut self, name: String, kind: ComponentKind, span: Span) -> Option<&mut Entry<'a>> {
        if self.index.contains_key(&name) {
            tracing::debug!(name = name.as_str(), "duplicate component name ignored");
            return None;
        }
        tracing::trace!(name = name.as_str(), kind = kind.as_str(), "component detected");
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Entry {
            name,
            kind,
            span,
            props: Vec::new(),
            defaults: Vec::new(),
        });
        self.entries.last_mut()
    }

    /// Entry for a name receiving declaration writes; unknown names become
    /// `NotAComponent`.
    fn owner(&mut self, name: String, span: Span) -> &mut Entry<'a> {
        let slot = match self.index.get(&name) {
            Some(&slot) => slot,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(Entry {
                    name,
                    kind: ComponentKind::NotAComponent,
                    span,
                    props: Vec::new(),
                    defaults: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot]
    }

    fn finish(self) -> Vec<Component<'a>> {
        self.entries
            .into_iter()
            .map(|mut entry| {
                entry.props.sort_by_key(|(at, _)| *at);
                entry.defaults.sort_by_key(|(at, _)| *at);
                Component {
                    name: entry.name,
                    kind: entry.kind,
                    span: entry.span,
                    prop_sites: entry.props.into_iter().map(|(_, site)| site).collect(),
                    default_sites: entry.defaults.into_iter().map(|(_, site)| site).collect(),
                }
            })
            .collect()
    }

    // ── Detection ──

    fn detect_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.kind {
            StmtKind::Function(f) => {
                if let Some(name) = &f.name {
                    self.function_component(name.name.clone(), f, None);
                }
            }
            StmtKind::Class(c) => {
                if let Some(name) = &c.name {
                    self.class_component(name.name.clone(), c);
                }
            }
            StmtKind::Var(decl) => {
                for d in &decl.declarators {
                    if let (PatternKind::Ident(id), Some(init)) = (&d.pattern.kind, &d.init) {
                        self.detect_value(id.name.clone(), init, d.type_ann.as_ref());
                    }
                }
            }
            StmtKind::Export(inner) => self.detect_stmt(inner),
            StmtKind::ExportDefault(d) => match d {
                ExportDefault::Function(f) => {
                    let name = f.name.as_ref().map_or("default", |id| id.name.as_str());
                    self.function_component(name.to_string(), f, None);
                }
                ExportDefault::Class(c) => {
                    let name = c.name.as_ref().map_or("default", |id| id.name.as_str());
                    self.class_component(name.to_string(), c);
                }
                ExportDefault::Expr(e) => self.detect_value("default".to_string(), e, None),
            },
            StmtKind::Expr(Expr {
                kind: ExprKind::Assign { target, value },
                ..
            }) => {
                if let Some(path) = target.dotted_name() {
                    self.detect_value(path, value, None);
                }
            }
            _ => {}
        }
    }

    fn detect_value(&mut self, name: String, expr: &'a Expr, annotation: Option<&'a TypeExpr>) {
        match &expr.kind {
            ExprKind::Function(f) => self.function_component(name, f, annotation),
            ExprKind::Class(c) => self.class_component(name, c),
            ExprKind::Call { callee, args } => {
                let factory = callee
                    .dotted_name()
                    .is_some_and(|callee| self.options.is_create_class(&callee));
                if factory {
                    self.factory_component(name, expr.span, args);
                }
            }
            ExprKind::Cast { expr: inner, .. } => self.detect_value(name, inner, annotation),
            _ => {}
        }
    }

    fn function_component(&mut self, name: String, f: &'a Function, annotation: Option<&'a TypeExpr>) {
        if !returns_jsx(f) {
            return;
        }
        let Some(entry) = self.register(name, ComponentKind::Function, f.span) else {
            return;
        };
        if let Some(TypeExpr {
            kind: TypeKind::Ref { name, args },
            ..
        }) = annotation
        {
            if FUNCTION_COMPONENT_TYPES.contains(&name.as_str()) {
                if let Some(props) = args.first() {
                    entry.push(Side::Props, props.span.start, DeclSite::Type(props));
                }
            }
        }
        if let Some(ty) = f.params.first().and_then(|p| p.type_ann.as_ref()) {
            entry.push(Side::Props, ty.span.start, DeclSite::Type(ty));
        }
    }

    fn class_component(&mut self, name: String, c: &'a Class) {
        let extends_component = c
            .super_class
            .as_ref()
            .and_then(|sup| sup.dotted_name())
            .is_some_and(|sup| COMPONENT_BASES.contains(&sup.as_str()));
        if !extends_component {
            return;
        }
        let Some(entry) = self.register(name, ComponentKind::Class, c.span) else {
            return;
        };
        if let Some(ty) = c.super_type_args.first() {
            entry.push(Side::Props, ty.span.start, DeclSite::Type(ty));
        }
        for member in &c.members {
            let Some(key) = member.key.name() else {
                continue;
            };
            let at = member.span.start;
            if !member.is_static {
                if let (
                    "props",
                    ClassMemberKind::Field {
                        type_ann: Some(ty), ..
                    },
                ) = (key, &member.kind)
                {
                    entry.push(Side::Props, at, DeclSite::Type(ty));
                }
                continue;
            }
            let Some(side) = Side::from_name(key) else {
                continue;
            };
            let site = match &member.kind {
                ClassMemberKind::Field { value: Some(v), .. } => DeclSite::Value(v),
                ClassMemberKind::Getter(f) => DeclSite::Accessor(f),
                ClassMemberKind::Method(f) => DeclSite::Method(f),
                ClassMemberKind::Field { value: None, .. } | ClassMemberKind::Setter(_) => continue,
            };
            entry.push(side, at, site);
        }
    }

    fn factory_component(&mut self, name: String, span: Span, args: &'a [Expr]) {
        let Some(entry) = self.register(name, ComponentKind::Factory, span) else {
            return;
        };
        let Some(Expr {
            kind: ExprKind::Object(members),
            ..
        }) = args.first()
        else {
            return;
        };
        for member in members {
            let at = member.span.start;
            match &member.kind {
                ObjectMemberKind::Property { key, value } if key.name() == Some(PROP_TYPES) => {
                    entry.push(Side::Props, at, DeclSite::Value(value));
                }
                ObjectMemberKind::Getter { key, function } if key.name() == Some(PROP_TYPES) => {
                    entry.push(Side::Props, at, DeclSite::Accessor(function));
                }
                ObjectMemberKind::Method { key, function } if key.name() == Some("getDefaultProps") => {
                    entry.push(Side::Defaults, at, DeclSite::Accessor(function));
                }
                ObjectMemberKind::Property {
                    key,
                    value:
                        Expr {
                            kind: ExprKind::Function(function),
                            ..
                        },
                } if key.name() == Some("getDefaultProps") => {
                    entry.push(Side::Defaults, at, DeclSite::Accessor(function));
                }
                _ => {}
            }
        }
    }

    // ── Declaration writes ──

    /// `Name.propTypes = e`, `Name.propTypes.foo = e`, `Name.propTypes["foo"] = e`
    /// and the `defaultProps` forms.
    fn attach_write(&mut self, stmt: &'a Stmt) {
        let StmtKind::Expr(assign @ Expr {
            kind: ExprKind::Assign { target, value },
            ..
        }) = &stmt.kind
        else {
            return;
        };
        let ExprKind::Member { object, property } = &target.kind else {
            return;
        };
        let at = assign.span.start;

        if let Some(side) = property.static_name().and_then(Side::from_name) {
            if let Some(owner) = object.dotted_name() {
                self.owner(owner, assign.span).push(side, at, DeclSite::Value(value));
            }
            return;
        }

        let ExprKind::Member {
            object: owner,
            property: side_prop,
        } = &object.kind
        else {
            return;
        };
        let (Some(side), Some(owner)) = (
            side_prop.static_name().and_then(Side::from_name),
            owner.dotted_name(),
        ) else {
            return;
        };
        let site = match property.static_name() {
            Some(name) => DeclSite::MemberWrite {
                name,
                value,
                span: assign.span,
            },
            None => DeclSite::Dynamic(assign.span),
        };
        self.owner(owner, assign.span).push(side, at, site);
    }
}

// ── JSX detection ──

/// Whether any of the function's own return values (or its expression
/// body) can be JSX.
fn returns_jsx(f: &Function) -> bool {
    match &f.body {
        FunctionBody::Expr(expr) => is_jsx(expr),
        FunctionBody::Block(body) => {
            let mut returns = ReturnCollector::default();
            visit::walk_stmts(&mut returns, body);
            returns.values.into_iter().any(is_jsx)
        }
    }
}

fn is_jsx(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Jsx(_) => true,
        ExprKind::Conditional {
            consequent,
            alternate,
            ..
        } => is_jsx(consequent) || is_jsx(alternate),
        ExprKind::Binary { left, right } => is_jsx(left) || is_jsx(right),
        ExprKind::Cast { expr, .. } => is_jsx(expr),
        ExprKind::Sequence(exprs) => exprs.last().is_some_and(is_jsx),
        _ => false,
    }
}

/// Return values of one function body, skipping nested functions and classes.
#[derive(Default)]
struct ReturnCollector<'a> {
    values: Vec<&'a Expr>,
}

impl<'a> Visitor<'a> for ReturnCollector<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if let StmtKind::Return(Some(value)) = &stmt.kind {
            self.values.push(value);
        }
        visit::walk_stmt(self, stmt);
    }

    fn visit_function(&mut self, _function: &'a Function) {}

    fn visit_class(&mut self, _class: &'a Class) {}
}
