// visit.rs — AST traversal
//
// Default-walking visitor over statements, expressions, functions and
// classes. Implementors override the hooks they care about and call the
// matching `walk_*` function to continue into children.
//
// Preconditions: none.
// Postconditions: every reachable node is offered to the visitor in source order.
// Failure modes: none.
// Side effects: none beyond what the visitor does.

use crate::ast::*;

pub trait Visitor<'a>: Sized {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_function(&mut self, function: &'a Function) {
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &'a Class) {
        walk_class(self, class);
    }
}

pub fn walk_stmts<'a, V: Visitor<'a>>(v: &mut V, stmts: &'a [Stmt]) {
    for stmt in stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'a, V: Visitor<'a>>(v: &mut V, stmt: &'a Stmt) {
    match &stmt.kind {
        StmtKind::Var(decl) => {
            for d in &decl.declarators {
                walk_pattern(v, &d.pattern);
                if let Some(init) = &d.init {
                    v.visit_expr(init);
                }
            }
        }
        StmtKind::Function(f) => v.visit_function(f),
        StmtKind::Class(c) => v.visit_class(c),
        StmtKind::Export(inner) => v.visit_stmt(inner),
        StmtKind::ExportDefault(d) => match d {
            ExportDefault::Function(f) => v.visit_function(f),
            ExportDefault::Class(c) => v.visit_class(c),
            ExportDefault::Expr(e) => v.visit_expr(e),
        },
        StmtKind::Expr(e) | StmtKind::Throw(e) => v.visit_expr(e),
        StmtKind::Return(e) => {
            if let Some(e) = e {
                v.visit_expr(e);
            }
        }
        StmtKind::If {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test);
            v.visit_stmt(consequent);
            if let Some(alt) = alternate {
                v.visit_stmt(alt);
            }
        }
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            v.visit_expr(discriminant);
            for case in cases {
                if let Some(test) = &case.test {
                    v.visit_expr(test);
                }
                walk_stmts(v, &case.body);
            }
        }
        StmtKind::Block(body) => walk_stmts(v, body),
        StmtKind::Loop { head, body } => {
            for e in head {
                v.visit_expr(e);
            }
            v.visit_stmt(body);
        }
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            walk_stmts(v, block);
            if let Some(h) = handler {
                walk_stmts(v, h);
            }
            if let Some(f) = finalizer {
                walk_stmts(v, f);
            }
        }
        StmtKind::TypeAlias(_)
        | StmtKind::Interface(_)
        | StmtKind::Import(_)
        | StmtKind::ExportNamed
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Empty => {}
    }
}

/// Patterns only matter for the default expressions they carry.
pub fn walk_pattern<'a, V: Visitor<'a>>(v: &mut V, pattern: &'a Pattern) {
    match &pattern.kind {
        PatternKind::Ident(_) => {}
        PatternKind::Object(props) => {
            for prop in props {
                match prop {
                    ObjectPatternProp::Prop {
                        key,
                        value,
                        default,
                    } => {
                        walk_key(v, key);
                        if let Some(value) = value {
                            walk_pattern(v, value);
                        }
                        if let Some(default) = default {
                            v.visit_expr(default);
                        }
                    }
                    ObjectPatternProp::Rest(inner) => walk_pattern(v, inner),
                }
            }
        }
        PatternKind::Array(items) => {
            for item in items.iter().flatten() {
                walk_pattern(v, item);
            }
        }
        PatternKind::Rest(inner) => walk_pattern(v, inner),
        PatternKind::Assign(inner, default) => {
            walk_pattern(v, inner);
            v.visit_expr(default);
        }
    }
}

pub fn walk_function<'a, V: Visitor<'a>>(v: &mut V, function: &'a Function) {
    for param in &function.params {
        walk_pattern(v, &param.pattern);
    }
    match &function.body {
        FunctionBody::Block(body) => walk_stmts(v, body),
        FunctionBody::Expr(e) => v.visit_expr(e),
    }
}

pub fn walk_class<'a, V: Visitor<'a>>(v: &mut V, class: &'a Class) {
    if let Some(sc) = &class.super_class {
        v.visit_expr(sc);
    }
    for member in &class.members {
        walk_key(v, &member.key);
        match &member.kind {
            ClassMemberKind::Method(f) | ClassMemberKind::Getter(f) | ClassMemberKind::Setter(f) => {
                v.visit_function(f)
            }
            ClassMemberKind::Field { value, .. } => {
                if let Some(value) = value {
                    v.visit_expr(value);
                }
            }
        }
    }
}

fn walk_key<'a, V: Visitor<'a>>(v: &mut V, key: &'a PropKey) {
    if let PropKey::Computed(e) = key {
        v.visit_expr(e);
    }
}

pub fn walk_expr<'a, V: Visitor<'a>>(v: &mut V, expr: &'a Expr) {
    match &expr.kind {
        ExprKind::Ident(_)
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::Null
        | ExprKind::Bool(_)
        | ExprKind::Number(_)
        | ExprKind::Str(_)
        | ExprKind::Template
        | ExprKind::Regex
        | ExprKind::Yield(None) => {}
        ExprKind::Array(items) => {
            for item in items.iter().flatten() {
                v.visit_expr(item);
            }
        }
        ExprKind::Object(members) => {
            for member in members {
                match &member.kind {
                    ObjectMemberKind::Property { key, value } => {
                        walk_key(v, key);
                        v.visit_expr(value);
                    }
                    ObjectMemberKind::Shorthand(_) => {}
                    ObjectMemberKind::Method { key, function }
                    | ObjectMemberKind::Getter { key, function }
                    | ObjectMemberKind::Setter { key, function } => {
                        walk_key(v, key);
                        v.visit_function(function);
                    }
                    ObjectMemberKind::Spread(e) => v.visit_expr(e),
                }
            }
        }
        ExprKind::Function(f) => v.visit_function(f),
        ExprKind::Class(c) => v.visit_class(c),
        ExprKind::Member { object, property } => {
            v.visit_expr(object);
            if let MemberProp::Computed(e) = property {
                v.visit_expr(e);
            }
        }
        ExprKind::Call { callee, args } | ExprKind::New { callee, args } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        ExprKind::Unary { arg }
        | ExprKind::Update { arg }
        | ExprKind::Spread(arg)
        | ExprKind::Yield(Some(arg)) => v.visit_expr(arg),
        ExprKind::Sequence(exprs) => {
            for e in exprs {
                v.visit_expr(e);
            }
        }
        ExprKind::Binary { left, right } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test);
            v.visit_expr(consequent);
            v.visit_expr(alternate);
        }
        ExprKind::Assign { target, value } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        ExprKind::Cast { expr, .. } => v.visit_expr(expr),
        ExprKind::Jsx(el) => walk_jsx(v, el),
    }
}

fn walk_jsx<'a, V: Visitor<'a>>(v: &mut V, el: &'a JsxElement) {
    for attr in &el.attributes {
        match attr {
            JsxAttr::Named { value, .. } => {
                if let Some(value) = value {
                    v.visit_expr(value);
                }
            }
            JsxAttr::Spread(e) => v.visit_expr(e),
        }
    }
    for child in &el.children {
        match child {
            JsxChild::Text | JsxChild::Expr(None) => {}
            JsxChild::Element(inner) => walk_jsx(v, inner),
            JsxChild::Expr(Some(e)) => v.visit_expr(e),
        }
    }
}
