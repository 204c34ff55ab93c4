// Rule scenarios: whole-source lint runs with expected findings.
//
// Each case lints a complete component source through the library API and
// compares (rule, prop name, line, column) tuples. Sources cover the
// runtime propTypes forms, class fields and accessors, factory components,
// Flow/TypeScript annotations, unions, and the conservative bail-outs.

use proplint::config::Options;
use proplint::diag::LineIndex;
use proplint::lint::lint_source;

// ── Helpers ─────────────────────────────────────────────────────────────────

type Finding = (&'static str, String, usize, usize);

fn findings(source: &str, options: &Options) -> Vec<Finding> {
    let diagnostics = lint_source(source, options)
        .unwrap_or_else(|e| panic!("lint failed: {e:?}\n--- source ---\n{source}"));
    let index = LineIndex::new(source);
    diagnostics
        .iter()
        .map(|d| {
            let name = d
                .message
                .split('"')
                .nth(1)
                .unwrap_or_default()
                .to_string();
            let (line, column) = index.line_col(d.span.start);
            (d.rule.unwrap_or("?"), name, line, column)
        })
        .collect()
}

fn valid(source: &str) {
    valid_with(source, &Options::default());
}

fn valid_with(source: &str, options: &Options) {
    let got = findings(source, options);
    assert!(got.is_empty(), "expected no findings, got {got:?}\n--- source ---\n{source}");
}

fn invalid(source: &str, expected: &[(&str, &str, usize, usize)]) {
    invalid_with(source, &Options::default(), expected);
}

fn invalid_with(source: &str, options: &Options, expected: &[(&str, &str, usize, usize)]) {
    let got = findings(source, options);
    let got: Vec<(&str, &str, usize, usize)> = got
        .iter()
        .map(|(rule, name, line, col)| (*rule, name.as_str(), *line, *col))
        .collect();
    assert_eq!(got, expected, "\n--- source ---\n{source}");
}

fn ignore_functional() -> Options {
    Options {
        ignore_functional_components: true,
        ..Options::default()
    }
}

fn forbid_required() -> Options {
    Options {
        forbid_default_for_required: true,
        ..Options::default()
    }
}

fn wrappers(names: &[&str]) -> Options {
    Options {
        prop_wrapper_functions: names.iter().map(|n| n.to_string()).collect(),
        ..Options::default()
    }
}

const MISSING: &str = "shouldHaveDefault";
const REQUIRED: &str = "noDefaultWithRequired";

// ── Function components ─────────────────────────────────────────────────────

#[test]
fn stateless_all_required_is_valid() {
    valid(
        "function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = {\n\
         \x20 foo: PropTypes.string.isRequired,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };",
    );
}

#[test]
fn stateless_optional_with_default_is_valid() {
    valid(
        "function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         MyStatelessComponent.defaultProps = {\n\
         \x20 foo: \"foo\"\n\
         };",
    );
}

#[test]
fn stateless_optional_without_default() {
    invalid(
        "function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };",
        &[(MISSING, "foo", 5, 3)],
    );
}

#[test]
fn wrapper_call_is_transparent() {
    let src = "function MyStatelessComponent({ foo, bar }) {\n\
               \x20 return <div>{foo}{bar}</div>;\n\
               }\n\
               MyStatelessComponent.propTypes = forbidExtraProps({\n\
               \x20 foo: PropTypes.string,\n\
               \x20 bar: PropTypes.string.isRequired\n\
               });";
    invalid_with(src, &wrappers(&["forbidExtraProps"]), &[(MISSING, "foo", 5, 3)]);
    // Without the wrapper configured the call is opaque.
    valid(src);
}

#[test]
fn wrapper_around_binding() {
    invalid_with(
        "function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         const propTypes = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         MyStatelessComponent.propTypes = forbidExtraProps(propTypes);",
        &wrappers(&["forbidExtraProps"]),
        &[(MISSING, "foo", 5, 3)],
    );
}

#[test]
fn incremental_write_reported_at_assignment() {
    invalid(
        "function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         MyStatelessComponent.propTypes.baz = React.propTypes.string;",
        &[(MISSING, "foo", 5, 3), (MISSING, "baz", 8, 1)],
    );
}

#[test]
fn incremental_writes_on_both_sides_are_valid() {
    valid(
        "function MyStatelessComponent({ foo }) {\n\
         \x20 return <div>{foo}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = {};\n\
         MyStatelessComponent.propTypes.foo = PropTypes.string;\n\
         MyStatelessComponent.defaultProps = {};\n\
         MyStatelessComponent.defaultProps.foo = \"foo\";",
    );
}

#[test]
fn props_through_binding_reported_at_binding() {
    invalid(
        "const types = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = types;",
        &[(MISSING, "foo", 2, 3)],
    );
}

#[test]
fn defaults_through_binding() {
    invalid(
        "const defaults = {\n\
         \x20 foo: \"foo\"\n\
         };\n\
         const types = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string\n\
         };\n\
         function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = types;\n\
         MyStatelessComponent.defaultProps = defaults;",
        &[(MISSING, "bar", 6, 3)],
    );
}

#[test]
fn destructuring_defaults_do_not_count() {
    invalid(
        "var Greetings = ({ foo = \"foo\" }) => {\n\
         \x20 return <div>Hello {this.props.foo}</div>;\n\
         }\n\
         Greetings.propTypes = {\n\
         \x20 foo: PropTypes.string\n\
         };",
        &[(MISSING, "foo", 5, 3)],
    );
}

#[test]
fn hoisted_declaration_with_export_default() {
    invalid(
        "Foo.propTypes = {\n\
         \x20 a: PropTypes.string,\n\
         }\n\
         \n\
         export default function Foo(props) {\n\
         \x20 return <p>{props.a}</p>\n\
         };",
        &[(MISSING, "a", 2, 3)],
    );
}

#[test]
fn switch_returning_jsx() {
    invalid(
        "import PropTypes from 'prop-types';\n\
         import React from 'react';\n\
         const MyComponent = (props) => {\n\
         \x20 switch (props.usedProp) {\n\
         \x20   case 1:\n\
         \x20     return (<div />);\n\
         \x20   default:\n\
         \x20     return <div />;\n\
         \x20 }\n\
         };\n\
         MyComponent.propTypes = {\n\
         \x20 usedProp: PropTypes.string,\n\
         };\n\
         export default MyComponent;",
        &[(MISSING, "usedProp", 12, 3)],
    );
}

#[test]
fn ignore_functional_components_option() {
    valid_with(
        "import PropTypes from 'prop-types';\n\
         import React from 'react';\n\
         export const MyComponent = ({ foo, bar }) => {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         };\n\
         MyComponent.propTypes = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         export default MyComponent;",
        &ignore_functional(),
    );
}

#[test]
fn block_comments_around_declarations() {
    invalid(
        "/**\n\
         \x20* Greets someone.\n\
         \x20*/\n\
         function Hello({ foo }) {\n\
         \x20 /* inline */ return <div>{foo}</div>; // trailing\n\
         }\n\
         Hello.propTypes = {\n\
         \x20 /** The name. */\n\
         \x20 foo: PropTypes.string\n\
         };",
        &[(MISSING, "foo", 9, 3)],
    );
}

#[test]
fn unrelated_syntax_does_not_block_the_check() {
    invalid(
        "const MASK = 1 << 4;\n\
         const pattern = /^[a-z]+$/i;\n\
         function* ids() { let i = 0; while (true) yield i++; }\n\
         class Store { #items = []; }\n\
         function Hello(props) {\n\
         \x20 const flags = (props.bits >>> 1, props.bits >> 2);\n\
         \x20 outer: for (;;) { break outer; }\n\
         \x20 return <div>{pattern.test(props.name) ? MASK : flags}</div>;\n\
         }\n\
         Hello.propTypes = { name: PropTypes.string };",
        &[(MISSING, "name", 10, 21)],
    );
}

// ── Bail-outs ───────────────────────────────────────────────────────────────

#[test]
fn required_defaults_are_opaque() {
    valid(
        "const defaults = require(\"./defaults\");\n\
         const types = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string\n\
         };\n\
         function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }\n\
         MyStatelessComponent.propTypes = types;\n\
         MyStatelessComponent.defaultProps = defaults;",
    );
}

#[test]
fn write_onto_external_defaults_stays_opaque() {
    valid(
        "MyStatelessComponent.propTypes = {\n\
         \x20 foo: PropTypes.string\n\
         };\n\
         MyStatelessComponent.defaultProps = require(\"./defaults\").foo;\n\
         MyStatelessComponent.defaultProps.bar = \"bar\";\n\
         function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }",
    );
}

#[test]
fn imported_defaults_are_opaque() {
    valid(
        "import { foo } from \"./defaults\";\n\
         MyStatelessComponent.propTypes = {\n\
         \x20 foo: PropTypes.string\n\
         };\n\
         MyStatelessComponent.defaultProps = foo;\n\
         function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }",
    );
}

#[test]
fn spread_in_props_or_defaults_is_opaque() {
    valid(
        "MyStatelessComponent.propTypes = {\n\
         \x20 ...stuff,\n\
         \x20 foo: PropTypes.string\n\
         };\n\
         MyStatelessComponent.defaultProps = {\n\
         \x20foo: \"foo\"\n\
         };\n\
         function MyStatelessComponent({ foo, bar }) {\n\
         \x20 return <div>{foo}{bar}</div>;\n\
         }",
    );
    valid(
        "class Greeting extends React.Component {\n\
         \x20 render() {\n\
         \x20   return (\n\
         \x20     <h1>Hello, {this.props.foo} {this.props.bar}</h1>\n\
         \x20   );\n\
         \x20 }\n\
         }\n\
         Greeting.propTypes = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         Greeting.defaultProps = {\n\
         \x20 ...defaults,\n\
         \x20 bar: \"bar\"\n\
         };",
    );
}

#[test]
fn reassigned_binding_is_opaque() {
    valid(
        "let defaults = { foo: 'x' };\n\
         defaults = other;\n\
         function C(props) { return <div />; }\n\
         C.propTypes = { foo: PropTypes.string, bar: PropTypes.string };\n\
         C.defaultProps = defaults;",
    );
}

#[test]
fn declarations_without_component_are_ignored() {
    valid("Greeting.propTypes = {\n  bar: PropTypes.string\n};");
    valid(
        "const component = rowsOfType(GuestlistEntry, (rowData, ownProps) => ({\n\
         \x20   ...rowData,\n\
         \x20   onPress: () => ownProps.onPress(rowData.id),\n\
         }));",
    );
}

// ── Factory components ──────────────────────────────────────────────────────

#[test]
fn create_class_prop_types() {
    let src = "var Greeting = createReactClass({\n\
               \x20 render: function() {\n\
               \x20   return <div>Hello {this.props.foo} {this.props.bar}</div>;\n\
               \x20 },\n\
               \x20 propTypes: {\n\
               \x20   foo: PropTypes.string,\n\
               \x20   bar: PropTypes.string.isRequired\n\
               \x20 }\n\
               });";
    invalid(src, &[(MISSING, "foo", 6, 5)]);
    invalid_with(src, &ignore_functional(), &[(MISSING, "foo", 6, 5)]);
}

#[test]
fn create_class_get_default_props() {
    invalid(
        "var Greeting = createReactClass({\n\
         \x20 render: function() {\n\
         \x20   return <div>Hello {this.props.foo} {this.props.bar}</div>;\n\
         \x20 },\n\
         \x20 propTypes: {\n\
         \x20   foo: PropTypes.string,\n\
         \x20   bar: PropTypes.string\n\
         \x20 },\n\
         \x20 getDefaultProps: function() {\n\
         \x20   return {\n\
         \x20     foo: \"foo\"\n\
         \x20   };\n\
         \x20 }\n\
         });",
        &[(MISSING, "bar", 7, 5)],
    );
}

// ── Class components ────────────────────────────────────────────────────────

#[test]
fn class_with_assigned_prop_types() {
    invalid(
        "class Greeting extends React.Component {\n\
         \x20 render() {\n\
         \x20   return (\n\
         \x20     <h1>Hello, {this.props.foo} {this.props.bar}</h1>\n\
         \x20   );\n\
         \x20 }\n\
         }\n\
         Greeting.propTypes = {\n\
         \x20 bar: PropTypes.string.isRequired\n\
         };\n\
         Greeting.propTypes.foo = PropTypes.string;",
        &[(MISSING, "foo", 11, 1)],
    );
}

#[test]
fn class_incremental_default_write() {
    invalid(
        "class Greeting extends React.Component {\n\
         \x20 render() {\n\
         \x20   return (\n\
         \x20     <h1>Hello, {this.props.foo} {this.props.bar}</h1>\n\
         \x20   );\n\
         \x20 }\n\
         }\n\
         Greeting.propTypes = {\n\
         \x20 bar: PropTypes.string\n\
         };\n\
         Greeting.propTypes.foo = PropTypes.string;\n\
         Greeting.defaultProps = {};\n\
         Greeting.defaultProps.foo = \"foo\";",
        &[(MISSING, "bar", 9, 3)],
    );
}

#[test]
fn static_getters() {
    invalid(
        "class Hello extends React.Component {\n\
         \x20 static get propTypes() {\n\
         \x20   return {\n\
         \x20     foo: PropTypes.string,\n\
         \x20     bar: PropTypes.string\n\
         \x20   };\n\
         \x20 }\n\
         \x20 static get defaultProps() {\n\
         \x20   return {\n\
         \x20     bar: \"world\"\n\
         \x20   };\n\
         \x20 }\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.name}</div>;\n\
         \x20 }\n\
         }",
        &[(MISSING, "foo", 4, 7)],
    );
}

#[test]
fn static_getter_returning_binding() {
    invalid(
        "const props = {\n\
         \x20 foo: PropTypes.string\n\
         };\n\
         class Hello extends React.Component {\n\
         \x20 static get propTypes() {\n\
         \x20   return props;\n\
         \x20 }\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.name}</div>;\n\
         \x20 }\n\
         }",
        &[(MISSING, "foo", 2, 3)],
    );
}

#[test]
fn plain_static_method_is_not_a_default_source() {
    invalid(
        "class Hello extends React.Component {\n\
         \x20 static get propTypes() {\n\
         \x20   return {\n\
         \x20     name: PropTypes.string\n\
         \x20   };\n\
         \x20 }\n\
         \x20 static defaultProps() {\n\
         \x20   return {\n\
         \x20     name: 'John'\n\
         \x20   };\n\
         \x20 }\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.name}</div>;\n\
         \x20 }\n\
         }",
        &[(MISSING, "name", 4, 7)],
    );
}

#[test]
fn quoted_keys() {
    invalid(
        "class Hello extends React.Component {\n\
         \x20 static get propTypes() {\n\
         \x20   return {\n\
         \x20     'first-name': PropTypes.string\n\
         \x20   };\n\
         \x20 }\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props['first-name']}</div>;\n\
         \x20 }\n\
         }",
        &[(MISSING, "first-name", 4, 7)],
    );
    valid(
        "function Hello(props) {\n\
         \x20 return <div>Hello {props.bar}</div>;\n\
         }\n\
         Hello.propTypes = {\n\
         \x20 bar: PropTypes.string\n\
         };\n\
         Hello.defaultProps = {\n\
         \x20 \"bar\": \"bar\"\n\
         };",
    );
}

#[test]
fn static_class_fields() {
    invalid(
        "class Greeting extends React.Component {\n\
         \x20 render() {\n\
         \x20   return (\n\
         \x20     <h1>Hello, {this.props.foo} {this.props.bar}</h1>\n\
         \x20   );\n\
         \x20 }\n\
         \x20 static propTypes = {\n\
         \x20   foo: PropTypes.string,\n\
         \x20   bar: PropTypes.string\n\
         \x20 };\n\
         \x20 static defaultProps = {\n\
         \x20   foo: \"foo\"\n\
         \x20 };\n\
         }",
        &[(MISSING, "bar", 9, 5)],
    );
}

#[test]
fn static_fields_through_bindings() {
    invalid(
        "const props = {\n\
         \x20 foo: PropTypes.string,\n\
         \x20 bar: PropTypes.string\n\
         };\n\
         const defaults = {\n\
         \x20 foo: \"foo\"\n\
         };\n\
         class Greeting extends React.Component {\n\
         \x20 render() {\n\
         \x20   return (\n\
         \x20     <h1>Hello, {this.props.foo} {this.props.bar}</h1>\n\
         \x20   );\n\
         \x20 }\n\
         \x20 static propTypes = props;\n\
         \x20 static defaultProps = defaults;\n\
         }",
        &[(MISSING, "bar", 3, 3)],
    );
}

#[test]
fn member_path_component() {
    invalid(
        "let Greetings = {};\n\
         Greetings.Hello = class extends React.Component {\n\
         \x20 render () {\n\
         \x20   return <div>Hello {this.props.foo}</div>;\n\
         \x20 }\n\
         }\n\
         Greetings.Hello.propTypes = {\n\
         \x20 foo: PropTypes.string\n\
         };",
        &[(MISSING, "foo", 8, 3)],
    );
}

// ── Static types ────────────────────────────────────────────────────────────

#[test]
fn flow_props_field() {
    invalid(
        "class Hello extends React.Component {\n\
         \x20 props: {\n\
         \x20   foo?: string,\n\
         \x20   bar?: string\n\
         \x20 };\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.foo}</div>;\n\
         \x20 }\n\
         }\n\
         Hello.defaultProps = {\n\
         \x20 foo: \"foo\"\n\
         };",
        &[(MISSING, "bar", 4, 5)],
    );
}

#[test]
fn type_only_default_props_is_not_a_source() {
    invalid(
        "type Props = {\n\
         \x20 foo?: string\n\
         };\n\
         class Hello extends React.Component {\n\
         \x20 props: Props;\n\
         \x20 static defaultProps: { foo: string };\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.foo}</div>;\n\
         \x20 }\n\
         }",
        &[(MISSING, "foo", 2, 3)],
    );
}

#[test]
fn inline_parameter_types() {
    invalid(
        "function Hello(props: { foo?: string, bar?: string }) {\n\
         \x20 return <div>Hello {props.foo}</div>;\n\
         }",
        &[(MISSING, "foo", 1, 25), (MISSING, "bar", 1, 39)],
    );
    invalid(
        "function Hello({ foo = \"foo\" }: { foo?: string }) {\n\
         \x20 return <div>Hello {foo}</div>;\n\
         }",
        &[(MISSING, "foo", 1, 35)],
    );
    invalid(
        "const Hello = function(props: { foo?: string, bar?: string }) {\n\
         \x20 return <div>Hello {props.foo}</div>;\n\
         };\n\
         Hello.defaultProps = { foo: \"foo\" };",
        &[(MISSING, "bar", 1, 47)],
    );
}

#[test]
fn imported_types_are_opaque() {
    valid(
        "import type Props from \"fake\";\n\
         class Hello extends React.Component {\n\
         \x20 props: Props;\n\
         \x20 render () {\n\
         \x20   return <div>Hello {this.props.name.firstname}</div>;\n\
         \x20 }\n\
         }",
    );
    valid(
        "import type ImportedProps from \"fake\";\n\
         type NestedProps = ImportedProps;\n\
         type Props = NestedProps;\n\
         function Hello(props: Props) {\n\
         \x20 return <div>Hello {props.name.firstname}</div>;\n\
         }",
    );
    valid(
        "type Props = any;\n\
         const Hello = function({ foo }: Props) {\n\
         \x20 return <div>Hello {foo}</div>;\n\
         };",
    );
}

#[test]
fn union_members_checked_independently() {
    invalid(
        "function Hello(props: { one?: string } | { two?: string }) {\n\
         \x20 return <div>Hello {props.foo}</div>;\n\
         }",
        &[(MISSING, "one", 1, 25), (MISSING, "two", 1, 44)],
    );
    invalid(
        "type Props = {\n\
         \x20 foo: string,\n\
         \x20 bar?: string\n\
         };\n\
         type Props2 = {\n\
         \x20 foo: string,\n\
         \x20 baz?: string\n\
         }\n\
         function Hello(props: Props | Props2) {\n\
         \x20 return <div>Hello {props.foo}</div>;\n\
         }\n\
         Hello.defaultProps = {\n\
         \x20 bar: \"bar\"\n\
         };",
        &[(MISSING, "baz", 7, 3)],
    );
}

#[test]
fn opaque_union_member_dropped() {
    invalid(
        "type HelloProps = {\n\
         \x20 two?: string,\n\
         \x20 three: string\n\
         };\n\
         function Hello(props: ExternalProps | HelloProps) {\n\
         \x20 return <div>Hello {props.foo}</div>;\n\
         }",
        &[(MISSING, "two", 2, 3)],
    );
}

#[test]
fn class_generic_props() {
    invalid(
        "type HelloProps = {\n\
         \x20 foo: string,\n\
         \x20 bar?: string\n\
         };\n\
         type HelloState = {\n\
         \x20 dummyState: string\n\
         };\n\
         class Hello extends Component<HelloProps, HelloState> {\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.foo}</div>;\n\
         \x20 }\n\
         }",
        &[(MISSING, "bar", 3, 3)],
    );
    valid_with(
        "type HelloProps = {\n\
         \x20 foo: string,\n\
         \x20 bar?: string\n\
         };\n\
         class Hello extends React.Component<HelloProps> {\n\
         \x20 static defaultProps = {\n\
         \x20   bar: \"bar\"\n\
         \x20 }\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.foo}</div>;\n\
         \x20 }\n\
         }",
        &forbid_required(),
    );
}

#[test]
fn class_union_props_through_generic_and_field() {
    let expected = [(MISSING, "one", 1, 12), (MISSING, "two", 2, 12)];
    invalid(
        "type A = { one?: string };\n\
         type B = { two?: string };\n\
         type Props = A | B;\n\
         class Hello extends React.Component<Props> {\n\
         \x20 props: Props;\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.one}</div>;\n\
         \x20 }\n\
         }",
        &expected,
    );
    invalid(
        "type A = { one?: string };\n\
         type B = { two?: string };\n\
         type Props = A | B;\n\
         class Hello extends React.Component<Props> {\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.one}</div>;\n\
         \x20 }\n\
         }",
        &expected,
    );
}

#[test]
fn flow_variance_prefix() {
    invalid(
        "type Props = {\n\
         \x20 +name?: string,\n\
         };\n\
         function Hello(props: Props) {\n\
         \x20 return <div>Hello {props.name}</div>;\n\
         }",
        &[(MISSING, "name", 2, 3)],
    );
}

#[test]
fn typescript_fc_with_interface() {
    valid(
        "import React from \"react\";\n\
         interface Props {\n\
         \x20 name: string;\n\
         }\n\
         const MyComponent: React.FC<Props> = ({ name }) => {\n\
         \x20 return <div>{name}</div>;\n\
         };\n\
         export default MyComponent;",
    );
    invalid(
        "interface Props {\n\
         \x20 name?: string;\n\
         }\n\
         const MyComponent: React.FC<Props> = ({ name }) => {\n\
         \x20 return <div>{name}</div>;\n\
         };",
        &[(MISSING, "name", 2, 3)],
    );
}

// ── forbidDefaultForRequired ────────────────────────────────────────────────

#[test]
fn required_with_default_forbidden() {
    let src = "class Hello extends React.Component {\n\
               \x20 render() {\n\
               \x20   return <div>Hello {this.props.foo}</div>;\n\
               \x20 }\n\
               }\n\
               Hello.propTypes = {\n\
               \x20 foo: PropTypes.string.isRequired\n\
               };\n\
               Hello.defaultProps = {\n\
               \x20 foo: 'bar'\n\
               };";
    valid(src);
    invalid_with(src, &forbid_required(), &[(REQUIRED, "foo", 7, 3)]);
}

#[test]
fn required_with_default_forbidden_in_accessors() {
    invalid_with(
        "class Hello extends React.Component {\n\
         \x20 static get propTypes () {\n\
         \x20   return {\n\
         \x20     foo: PropTypes.string.isRequired\n\
         \x20   };\n\
         \x20 }\n\
         \x20 static get defaultProps() {\n\
         \x20   return {\n\
         \x20     foo: 'bar'\n\
         \x20   };\n\
         \x20 }\n\
         \x20 render() {\n\
         \x20   return <div>Hello {this.props.foo}</div>;\n\
         \x20 }\n\
         }",
        &forbid_required(),
        &[(REQUIRED, "foo", 4, 7)],
    );
}
