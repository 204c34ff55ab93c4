// Property-based tests for the default-props contract.
//
// Four categories:
// 1. Completeness: fully resolvable components report exactly the optional
//    props without defaults
// 2. Required-with-default policy: adds one finding per required prop with
//    a default and leaves the rest untouched
// 3. Soundness: a spread on either side silences the component
// 4. Idempotence and robustness: identical output on re-runs; arbitrary input
//    never panics
//
// Uses proptest with explicit configuration to prevent CI flakiness.

use proplint::config::Options;
use proplint::diag::codes;
use proplint::lint::lint_source;
use proptest::prelude::*;

// ── Component generator ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Prop {
    name: String,
    required: bool,
    has_default: bool,
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Function,
    Class,
    Factory,
}

fn arb_props() -> impl Strategy<Value = Vec<Prop>> {
    prop::collection::btree_map("[a-z]{1,6}", (any::<bool>(), any::<bool>()), 0..8).prop_map(
        |map| {
            map.into_iter()
                // `p` prefix keeps generated names clear of reserved words.
                .map(|(name, (required, has_default))| Prop {
                    name: format!("p{name}"),
                    required,
                    has_default,
                })
                .collect()
        },
    )
}

fn arb_style() -> impl Strategy<Value = Style> {
    prop_oneof![Just(Style::Function), Just(Style::Class), Just(Style::Factory)]
}

fn prop_types_body(props: &[Prop], spread: bool) -> String {
    let mut body = String::new();
    if spread {
        body.push_str("  ...shared,\n");
    }
    for p in props {
        let marker = if p.required { ".isRequired" } else { "" };
        body.push_str(&format!("  {}: PropTypes.string{},\n", p.name, marker));
    }
    body
}

fn defaults_body(props: &[Prop], spread: bool) -> String {
    let mut body = String::new();
    if spread {
        body.push_str("  ...fallback,\n");
    }
    for p in props.iter().filter(|p| p.has_default) {
        body.push_str(&format!("  {}: 'x',\n", p.name));
    }
    body
}

fn render_component(style: Style, props: &[Prop], spread_props: bool, spread_defaults: bool) -> String {
    let types = prop_types_body(props, spread_props);
    let defaults = defaults_body(props, spread_defaults);
    match style {
        Style::Function => format!(
            "function C(props) {{\n  return <div />;\n}}\nC.propTypes = {{\n{types}}};\nC.defaultProps = {{\n{defaults}}};\n"
        ),
        Style::Class => format!(
            "class C extends React.Component {{\n  static propTypes = {{\n{types}  }};\n  static defaultProps = {{\n{defaults}  }};\n  render() {{\n    return <div />;\n  }}\n}}\n"
        ),
        Style::Factory => format!(
            "const C = createReactClass({{\n  propTypes: {{\n{types}  }},\n  getDefaultProps() {{\n    return {{\n{defaults}    }};\n  }},\n  render() {{\n    return <div />;\n  }}\n}});\n"
        ),
    }
}

fn count_codes(source: &str, options: &Options) -> (usize, usize) {
    let diagnostics = lint_source(source, options)
        .unwrap_or_else(|e| panic!("lint failed: {e:?}\n--- source ---\n{source}"));
    let missing = diagnostics
        .iter()
        .filter(|d| d.code == Some(codes::SHOULD_HAVE_DEFAULT))
        .count();
    let required = diagnostics
        .iter()
        .filter(|d| d.code == Some(codes::NO_DEFAULT_WITH_REQUIRED))
        .count();
    assert_eq!(missing + required, diagnostics.len());
    (missing, required)
}

// ── Contract properties ─────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 200,
        .. ProptestConfig::default()
    })]

    #[test]
    fn completeness_under_full_resolution(props in arb_props(), style in arb_style()) {
        let source = render_component(style, &props, false, false);
        let expected = props.iter().filter(|p| !p.required && !p.has_default).count();
        prop_assert_eq!(count_codes(&source, &Options::default()), (expected, 0));
    }

    #[test]
    fn forbid_policy_adds_required_with_default(props in arb_props(), style in arb_style()) {
        let source = render_component(style, &props, false, false);
        let missing = props.iter().filter(|p| !p.required && !p.has_default).count();
        let required = props.iter().filter(|p| p.required && p.has_default).count();
        let options = Options {
            forbid_default_for_required: true,
            ..Options::default()
        };
        prop_assert_eq!(count_codes(&source, &options), (missing, required));
    }

    #[test]
    fn spread_on_either_side_is_silent(
        props in arb_props(),
        style in arb_style(),
        spread_props in any::<bool>(),
    ) {
        let source = render_component(style, &props, spread_props, !spread_props);
        let options = Options {
            forbid_default_for_required: true,
            ..Options::default()
        };
        prop_assert_eq!(count_codes(&source, &options), (0, 0));
    }

    #[test]
    fn rerun_is_identical(props in arb_props(), style in arb_style()) {
        let source = render_component(style, &props, false, false);
        let first = lint_source(&source, &Options::default()).expect("lint failed");
        let second = lint_source(&source, &Options::default()).expect("lint failed");
        prop_assert_eq!(first, second);
    }
}

// ── Robustness ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 100,
        .. ProptestConfig::default()
    })]

    #[test]
    fn arbitrary_input_never_panics(source in "[ -~\n]{0,80}") {
        let _ = lint_source(&source, &Options::default());
    }
}
