// check.rs — Contract checker
//
// Diffs each resolved property shape of a component against its default
// set under the active policy and produces violations.
//
// Preconditions: `component` borrows from the program `table` was built from.
// Postconditions: an opaque property side or default side yields no
//                 violations; otherwise each optional entry without a
//                 default yields exactly one `MissingDefault`.
// Failure modes: none.
// Side effects: emits `tracing` debug events for skipped components.

use crate::config::Options;
use crate::defaults::DefaultsBuilder;
use crate::model::{
    Component, ComponentKind, DefaultSet, PropertyDecl, Resolution, Violation, ViolationKind,
};
use crate::props::PropsBuilder;
use crate::scope::BindingTable;
use crate::union;

/// Build both sides of a component's declaration and check them.
pub fn check_component<'a>(
    component: &Component<'a>,
    table: &BindingTable<'a>,
    options: &Options,
) -> Vec<Violation> {
    let _span = tracing::debug_span!(
        "component",
        name = component.name.as_str(),
        kind = component.kind.as_str()
    )
    .entered();

    match component.kind {
        ComponentKind::NotAComponent => return Vec::new(),
        ComponentKind::Function if options.ignore_functional_components => {
            tracing::debug!(reason = "functional components ignored", "component skipped");
            return Vec::new();
        }
        _ => {}
    }

    let props = PropsBuilder::new(table, options).build(&component.prop_sites);
    let defaults = DefaultsBuilder::new(table, options).build(&component.default_sites);
    check_contract(
        &component.name,
        &props,
        &defaults,
        options.forbid_default_for_required,
    )
}

/// Diff property shapes against defaults.
///
/// Each resolved shape is checked on its own against the shared default
/// set; a name missing from several union members is reported once per
/// member, at that member's own entry.
pub fn check_contract(
    component: &str,
    props: &PropertyDecl,
    defaults: &DefaultSet,
    forbid_default_for_required: bool,
) -> Vec<Violation> {
    let shapes = union::shapes(props, component);
    if shapes.is_empty() {
        return Vec::new();
    }
    let Resolution::Resolved(defaults) = defaults else {
        tracing::debug!(component, reason = "opaque defaultProps", "component skipped");
        return Vec::new();
    };

    let mut violations = Vec::new();
    for shape in shapes {
        for entry in shape {
            let has_default = defaults.iter().any(|d| d.name == entry.name);
            if entry.optional && !has_default {
                violations.push(Violation {
                    kind: ViolationKind::MissingDefault,
                    name: entry.name.clone(),
                    span: entry.span,
                });
            }
            if forbid_default_for_required && !entry.optional && has_default {
                violations.push(Violation {
                    kind: ViolationKind::DefaultOnRequired,
                    name: entry.name.clone(),
                    span: entry.span,
                });
            }
        }
    }
    violations
}
