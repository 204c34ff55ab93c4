// defaults.rs — Default set builder
//
// Reduces a component's default-value declaration sites into a
// `DefaultSet`. Mirrors the property set builder: object literals,
// identifiers, transparent wrapper calls, accessors and incremental member
// writes resolve; spreads, unknown calls and unresolved bindings are opaque.
//
// Preconditions: sites are in source order.
// Postconditions: no sites at all is `Resolved([])`, never `Opaque`.
// Failure modes: none.
// Side effects: emits `tracing` debug events at bail-outs.

use std::collections::HashSet;

use crate::ast::*;
use crate::config::Options;
use crate::model::{upsert, DeclSite, DefaultEntry, DefaultSet, Resolution};
use crate::props::sole_return;
use crate::scope::BindingTable;

pub struct DefaultsBuilder<'t, 'a> {
    table: &'t BindingTable<'a>,
    options: &'t Options,
}

impl<'t, 'a> DefaultsBuilder<'t, 'a> {
    pub fn new(table: &'t BindingTable<'a>, options: &'t Options) -> Self {
        DefaultsBuilder { table, options }
    }

    pub fn build(&self, sites: &[DeclSite<'a>]) -> DefaultSet {
        let mut acc: Option<DefaultSet> = None;
        for site in sites {
            let next = match *site {
                DeclSite::Method(_) => {
                    tracing::debug!(reason = "plain method", "defaultProps site ignored");
                    continue;
                }
                DeclSite::Type(_) => continue,
                DeclSite::Dynamic(_) => {
                    tracing::debug!(reason = "computed member write", "defaultProps opaque");
                    Resolution::Opaque
                }
                DeclSite::MemberWrite { name, span, .. } => Resolution::Resolved(vec![DefaultEntry {
                    name: name.to_string(),
                    span,
                }]),
                DeclSite::Value(expr) => self.reduce(expr, &mut HashSet::new()),
                DeclSite::Accessor(function) => match sole_return(function) {
                    Some(expr) => self.reduce(expr, &mut HashSet::new()),
                    None => {
                        tracing::debug!(
                            reason = "accessor without a sole return",
                            "defaultProps opaque"
                        );
                        Resolution::Opaque
                    }
                },
            };
            acc = Some(match (acc, next) {
                (None, next) => next,
                (Some(Resolution::Resolved(mut entries)), Resolution::Resolved(more)) => {
                    for entry in more {
                        upsert(&mut entries, entry);
                    }
                    Resolution::Resolved(entries)
                }
                (Some(_), _) => Resolution::Opaque,
            });
        }
        acc.unwrap_or(Resolution::Resolved(Vec::new()))
    }

    fn reduce(&self, expr: &'a Expr, visiting: &mut HashSet<&'a str>) -> DefaultSet {
        match &expr.kind {
            ExprKind::Object(members) => object_defaults(members),
            ExprKind::Call { callee, args } => {
                let wrapper = callee
                    .dotted_name()
                    .is_some_and(|name| self.options.is_wrapper(&name));
                match args.first() {
                    Some(arg) if wrapper && !matches!(arg.kind, ExprKind::Spread(_)) => {
                        self.reduce(arg, visiting)
                    }
                    _ => {
                        tracing::debug!(reason = "unrecognised call", "defaultProps opaque");
                        Resolution::Opaque
                    }
                }
            }
            ExprKind::Ident(name) => {
                if !visiting.insert(name.as_str()) {
                    return Resolution::Opaque;
                }
                match self.table.resolve_value(name) {
                    Some(init) => self.reduce(init, visiting),
                    None => {
                        tracing::debug!(name = name.as_str(), reason = "unresolved binding", "defaultProps opaque");
                        Resolution::Opaque
                    }
                }
            }
            ExprKind::Cast { expr: inner, .. } => self.reduce(inner, visiting),
            _ => Resolution::Opaque,
        }
    }
}

fn object_defaults(members: &[ObjectMember]) -> DefaultSet {
    let mut entries = Vec::new();
    for member in members {
        let name = match &member.kind {
            ObjectMemberKind::Property { key, .. }
            | ObjectMemberKind::Method { key, .. }
            | ObjectMemberKind::Getter { key, .. }
            | ObjectMemberKind::Setter { key, .. } => key.name(),
            ObjectMemberKind::Shorthand(id) => Some(id.name.as_str()),
            ObjectMemberKind::Spread(_) => {
                tracing::debug!(reason = "spread", "defaultProps opaque");
                return Resolution::Opaque;
            }
        };
        let Some(name) = name else {
            tracing::debug!(reason = "computed key", "defaultProps opaque");
            return Resolution::Opaque;
        };
        upsert(
            &mut entries,
            DefaultEntry {
                name: name.to_string(),
                span: member.span,
            },
        );
    }
    Resolution::Resolved(entries)
}
