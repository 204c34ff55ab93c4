// model.rs — Property contract data model
//
// Normal forms produced by the property and default builders, the
// declaration-site variants fed into them, and the violations produced by
// the contract checker.
//
// Preconditions: none (types only).
// Postconditions: a `Resolved` entry list holds every member present in
//                 source; anything less is `Opaque`.
// Failure modes: none.
// Side effects: none.

use crate::ast::{Expr, Function, Span, TypeExpr};

// ── Resolution state ────────────────────────────────────────────────────────

/// Outcome of reducing a declaration to an enumerable list.
///
/// `Opaque` means the declaration could not be proven exhaustive; callers
/// skip instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    Opaque,
}

impl<T> Resolution<T> {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Resolution::Opaque)
    }

    pub fn as_resolved(&self) -> Option<&T> {
        match self {
            Resolution::Resolved(v) => Some(v),
            Resolution::Opaque => None,
        }
    }
}

// ── Entries ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub name: String,
    /// `false` when explicitly marked required.
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultEntry {
    pub name: String,
    pub span: Span,
}

/// Anything addressable by property name; used for by-name merging.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for PropertyEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for DefaultEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Insert or override an entry by name, keeping the first position.
pub fn upsert<T: Named>(entries: &mut Vec<T>, entry: T) {
    match entries.iter_mut().find(|e| e.name() == entry.name()) {
        Some(slot) => *slot = entry,
        None => entries.push(entry),
    }
}

pub type PropertySet = Resolution<Vec<PropertyEntry>>;
pub type DefaultSet = Resolution<Vec<DefaultEntry>>;

/// Property side of a component: one shape, or a union of shapes each
/// resolved on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDecl {
    Single(PropertySet),
    Union(Vec<PropertySet>),
}

impl PropertyDecl {
    pub fn opaque() -> Self {
        PropertyDecl::Single(Resolution::Opaque)
    }

    pub fn empty() -> Self {
        PropertyDecl::Single(Resolution::Resolved(Vec::new()))
    }
}

// ── Declaration sites ───────────────────────────────────────────────────────

/// One syntactic place that contributes to a component's property-type or
/// default-value declaration.
#[derive(Debug, Clone, Copy)]
pub enum DeclSite<'a> {
    /// Expression assigned to the declaration: `X.propTypes = expr`,
    /// `static defaultProps = expr`, `propTypes: expr` in a factory object.
    Value(&'a Expr),
    /// Static type: `props: T`, `Component<T>`, `(props: T) => ...`.
    Type(&'a TypeExpr),
    /// Accessor whose sole return is the declaration:
    /// `static get propTypes()`, `getDefaultProps()`.
    Accessor(&'a Function),
    /// Plain method sharing the declaration name: `static defaultProps() {}`.
    /// Never a source; builders skip it.
    Method(&'a Function),
    /// Incremental write: `X.propTypes.foo = expr`, `X.defaultProps["foo"] = expr`.
    MemberWrite {
        name: &'a str,
        value: &'a Expr,
        span: Span,
    },
    /// Write under a key that is not statically known: `X.defaultProps[k] = v`.
    Dynamic(Span),
}

// ── Components ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Function,
    Class,
    Factory,
    NotAComponent,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Function => "function",
            ComponentKind::Class => "class",
            ComponentKind::Factory => "factory",
            ComponentKind::NotAComponent => "not-a-component",
        }
    }
}

/// A detected component with its declaration sites in source order.
#[derive(Debug, Clone)]
pub struct Component<'a> {
    pub name: String,
    pub kind: ComponentKind,
    pub span: Span,
    pub prop_sites: Vec<DeclSite<'a>>,
    pub default_sites: Vec<DeclSite<'a>>,
}

// ── Violations ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    MissingDefault,
    DefaultOnRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub name: String,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::span::Span as _;

    fn entry(name: &str, start: usize) -> DefaultEntry {
        DefaultEntry {
            name: name.to_string(),
            span: Span::new((), start..start + 1),
        }
    }

    #[test]
    fn upsert_overrides_in_place() {
        let mut entries = vec![entry("a", 0), entry("b", 2)];
        upsert(&mut entries, entry("a", 10));
        upsert(&mut entries, entry("c", 20));
        let names: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.span.start)).collect();
        assert_eq!(names, vec![("a", 10), ("b", 2), ("c", 20)]);
    }

    #[test]
    fn resolution_accessors() {
        let r: DefaultSet = Resolution::Resolved(vec![entry("a", 0)]);
        assert!(!r.is_opaque());
        assert_eq!(r.as_resolved().map(Vec::len), Some(1));
        let o: DefaultSet = Resolution::Opaque;
        assert!(o.is_opaque());
        assert!(o.as_resolved().is_none());
    }
}
