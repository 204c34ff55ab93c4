// union.rs — Union reconciler
//
// Keeps each shape of a union-typed property declaration as its own
// resolution, combines several declaration sites into one declaration,
// and yields the shapes the contract checker should examine.
//
// Preconditions: inputs come from the property set builder.
// Postconditions: an opaque union member never poisons its siblings; an
//                 opaque single declaration yields no shapes.
// Failure modes: none.
// Side effects: emits `tracing` debug events for dropped shapes.

use crate::model::{upsert, PropertyDecl, PropertyEntry, Resolution};

/// Collect reduced union parts into one union, flattening nested unions.
pub fn flatten(parts: impl IntoIterator<Item = PropertyDecl>) -> PropertyDecl {
    let mut members = Vec::new();
    for part in parts {
        match part {
            PropertyDecl::Single(set) => members.push(set),
            PropertyDecl::Union(inner) => members.extend(inner),
        }
    }
    PropertyDecl::Union(members)
}

/// Combine the declaration built so far with the next site's declaration.
///
/// Resolved entries merge by name in source order. A single resolved set
/// merged with a union is applied to every union member. Two unions of the
/// same arity (a class generic and its `props: T` field naming one alias)
/// combine member by member. Any opaque single declaration poisons the
/// result, as do two unions of different arity.
pub fn merge(prev: PropertyDecl, next: PropertyDecl) -> PropertyDecl {
    use PropertyDecl::{Single, Union};
    use Resolution::{Opaque, Resolved};

    match (prev, next) {
        (Single(Opaque), _) | (_, Single(Opaque)) => Single(Opaque),
        (Single(Resolved(mut base)), Single(Resolved(more))) => {
            for entry in more {
                upsert(&mut base, entry);
            }
            Single(Resolved(base))
        }
        (Single(Resolved(base)), Union(members)) => Union(
            members
                .into_iter()
                .map(|member| match member {
                    Resolved(entries) => {
                        let mut merged = base.clone();
                        for entry in entries {
                            upsert(&mut merged, entry);
                        }
                        Resolved(merged)
                    }
                    Opaque => Opaque,
                })
                .collect(),
        ),
        (Union(members), Single(Resolved(more))) => Union(
            members
                .into_iter()
                .map(|member| match member {
                    Resolved(mut entries) => {
                        for entry in more.iter().cloned() {
                            upsert(&mut entries, entry);
                        }
                        Resolved(entries)
                    }
                    Opaque => Opaque,
                })
                .collect(),
        ),
        (Union(left), Union(right)) if left.len() == right.len() => Union(
            left.into_iter()
                .zip(right)
                .map(|pair| match pair {
                    (Resolved(mut entries), Resolved(more)) => {
                        for entry in more {
                            upsert(&mut entries, entry);
                        }
                        Resolved(entries)
                    }
                    _ => Opaque,
                })
                .collect(),
        ),
        (Union(_), Union(_)) => {
            tracing::debug!(reason = "union declarations of different arity", "propTypes opaque");
            Single(Opaque)
        }
    }
}

/// Apply an incremental member write to every resolved shape.
pub fn write_entry(decl: PropertyDecl, entry: PropertyEntry) -> PropertyDecl {
    merge(decl, PropertyDecl::Single(Resolution::Resolved(vec![entry])))
}

/// Shapes to check: the single resolved set, or every resolved union member.
pub fn shapes<'d>(decl: &'d PropertyDecl, component: &str) -> Vec<&'d [PropertyEntry]> {
    match decl {
        PropertyDecl::Single(Resolution::Resolved(entries)) => vec![entries.as_slice()],
        PropertyDecl::Single(Resolution::Opaque) => {
            tracing::debug!(component, reason = "opaque propTypes", "component skipped");
            Vec::new()
        }
        PropertyDecl::Union(members) => members
            .iter()
            .enumerate()
            .filter_map(|(index, member)| match member {
                Resolution::Resolved(entries) => Some(entries.as_slice()),
                Resolution::Opaque => {
                    tracing::debug!(component, index, reason = "opaque union member", "shape dropped");
                    None
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::span::Span as _;

    use crate::ast::Span;

    fn entry(name: &str, optional: bool) -> PropertyEntry {
        PropertyEntry {
            name: name.to_string(),
            optional,
            span: Span::new((), 0..1),
        }
    }

    fn resolved(entries: &[(&str, bool)]) -> Resolution<Vec<PropertyEntry>> {
        Resolution::Resolved(entries.iter().map(|(n, o)| entry(n, *o)).collect())
    }

    fn shape_names(decl: &PropertyDecl) -> Vec<Vec<String>> {
        shapes(decl, "C")
            .into_iter()
            .map(|s| s.iter().map(|e| e.name.clone()).collect())
            .collect()
    }

    #[test]
    fn flatten_nested_unions() {
        let decl = flatten(vec![
            PropertyDecl::Single(resolved(&[("a", true)])),
            PropertyDecl::Union(vec![resolved(&[("b", true)]), Resolution::Opaque]),
        ]);
        let PropertyDecl::Union(members) = &decl else {
            panic!("expected union")
        };
        assert_eq!(members.len(), 3);
        assert_eq!(shape_names(&decl), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn opaque_member_does_not_poison_siblings() {
        let decl = PropertyDecl::Union(vec![Resolution::Opaque, resolved(&[("two", true)])]);
        assert_eq!(shape_names(&decl), vec![vec!["two"]]);
    }

    #[test]
    fn opaque_single_has_no_shapes() {
        assert!(shapes(&PropertyDecl::opaque(), "C").is_empty());
    }

    #[test]
    fn merge_single_sets_by_name() {
        let merged = merge(
            PropertyDecl::Single(resolved(&[("a", true), ("b", true)])),
            PropertyDecl::Single(resolved(&[("b", false), ("c", true)])),
        );
        assert_eq!(
            merged,
            PropertyDecl::Single(resolved(&[("a", true), ("b", false), ("c", true)]))
        );
    }

    #[test]
    fn merge_base_into_union_members() {
        let merged = merge(
            PropertyDecl::Single(resolved(&[("base", true)])),
            PropertyDecl::Union(vec![resolved(&[("x", true)]), Resolution::Opaque]),
        );
        assert_eq!(
            merged,
            PropertyDecl::Union(vec![resolved(&[("base", true), ("x", true)]), Resolution::Opaque])
        );
    }

    #[test]
    fn opaque_site_poisons_side() {
        let merged = merge(
            PropertyDecl::Single(resolved(&[("a", true)])),
            PropertyDecl::opaque(),
        );
        assert_eq!(merged, PropertyDecl::opaque());
    }

    #[test]
    fn same_arity_unions_merge_member_by_member() {
        let u = || {
            PropertyDecl::Union(vec![
                resolved(&[("one", true)]),
                resolved(&[("two", true)]),
                Resolution::Opaque,
            ])
        };
        let merged = merge(u(), u());
        assert_eq!(merged, u());
        assert_eq!(shape_names(&merged), vec![vec!["one"], vec!["two"]]);
    }

    #[test]
    fn unions_of_different_arity_are_opaque() {
        let one = PropertyDecl::Union(vec![resolved(&[("a", true)])]);
        let two = PropertyDecl::Union(vec![resolved(&[("a", true)]), resolved(&[("b", true)])]);
        assert_eq!(merge(one, two), PropertyDecl::opaque());
    }

    #[test]
    fn write_entry_reaches_every_member() {
        let decl = PropertyDecl::Union(vec![resolved(&[("a", true)]), resolved(&[("b", true)])]);
        let written = write_entry(decl, entry("c", false));
        assert_eq!(shape_names(&written), vec![vec!["a", "c"], vec!["b", "c"]]);
    }
}
