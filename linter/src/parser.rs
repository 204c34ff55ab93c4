// Parser for JavaScript / TypeScript / Flow component sources.
//
// Parses a token stream (from the lexer) into the AST subset defined in
// `ast.rs`. Uses chumsky combinators. Semicolons are optional everywhere,
// which approximates automatic semicolon insertion for the common cases.
//
// Preconditions: input is a valid token stream from `lexer::lex()`.
// Postconditions: returns an AST plus any parse errors (non-fatal).
// Failure modes: syntax errors produce `Rich` diagnostics; the program is
//                `None` when the input cannot be parsed as a whole.
// Side effects: none.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::ast::*;
use crate::lexer::{Keyword, Token};

/// Result of parsing: AST plus any errors.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Option<Program>,
    pub errors: Vec<Rich<'static, Token, SimpleSpan>>,
}

/// Parse a source string. Lexes then parses.
///
/// Returns an AST (if parsing succeeded) plus any errors.
pub fn parse(source: &str) -> ParseResult {
    let lex_result = crate::lexer::lex(source);
    let len = source.len();

    // Convert lexer output to chumsky stream.
    let token_iter = lex_result.tokens.into_iter().map(|(tok, span)| {
        let cspan: SimpleSpan = (span.start..span.end).into();
        (tok, cspan)
    });
    let eoi: SimpleSpan = (len..len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let parser = program_parser(source);
    let (program, parse_errors) = parser.parse(stream).into_output_errors();

    // Merge lex errors + parse errors.
    let mut all_errors: Vec<Rich<'static, Token, SimpleSpan>> = lex_result
        .errors
        .into_iter()
        .map(|e| {
            let span: SimpleSpan = (e.span.start..e.span.end).into();
            Rich::custom(span, e.message)
        })
        .collect();
    all_errors.extend(parse_errors.into_iter().map(|e| e.into_owned()));

    ParseResult {
        program,
        errors: all_errors,
    }
}

/// Postfix operation applied to a primary expression.
#[derive(Debug, Clone)]
enum Suffix {
    Member(MemberProp),
    Call(Vec<Expr>),
}

fn merge(start: Span, end: Span) -> Span {
    (start.start..end.end).into()
}

fn with_default(pattern: Pattern, default: Option<Expr>, span: Span) -> Pattern {
    match default {
        Some(default) => Pattern {
            kind: PatternKind::Assign(Box::new(pattern), Box::new(default)),
            span,
        },
        None => pattern,
    }
}

fn collapse(mut parts: Vec<TypeExpr>, span: Span, wrap: fn(Vec<TypeExpr>) -> TypeKind) -> TypeExpr {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        TypeExpr {
            kind: wrap(parts),
            span,
        }
    }
}

// ── Main parser builder ──
//
// All grammar rules are built inside `program_parser` so that the `source`
// reference is captured once and shared by all combinators. This avoids
// complex lifetime annotations on per-rule helper functions.

fn program_parser<'tokens, 'src: 'tokens, I>(
    source: &'src str,
) -> impl Parser<'tokens, I, Program, extra::Err<Rich<'tokens, Token, SimpleSpan>>> + 'src
where
    'tokens: 'src,
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    let text = move |span: SimpleSpan| {
        source
            .get(span.start..span.end)
            .unwrap_or_default()
            .to_string()
    };
    let kw = |k: Keyword| just(Token::Keyword(k));
    let semi = just(Token::Semi).or_not().ignored();

    // ── Names ──

    let ident = just(Token::Ident).map_with(move |_, e| {
        let span: SimpleSpan = e.span();
        Ident {
            name: text(span),
            span,
        }
    });

    // Property names after `.` and in key position may be reserved words.
    let name_token = select! {
        Token::Ident => (),
        Token::Keyword(_) => (),
    }
    .map_with(move |_, e| {
        let span: SimpleSpan = e.span();
        Ident {
            name: text(span),
            span,
        }
    });

    // `#name` keeps its sigil so a private member never matches a public name.
    let private_name = just(Token::Hash)
        .ignore_then(name_token.clone())
        .map_with(|id: Ident, e| Ident {
            name: format!("#{}", id.name),
            span: e.span(),
        });

    // Contextual keyword: an identifier with fixed text.
    let word_ident = ident.clone();
    let word = move |w: &'static str| {
        word_ident
            .clone()
            .filter(move |id: &Ident| id.name == w)
            .ignored()
    };

    let string = select! { Token::Str(s) => s };

    let number_key = select! {
        Token::Number(_) = e => {
            let span: SimpleSpan = e.span();
            span
        },
    }
    .map(move |span| PropKey::Named(text(span)));

    let named_key = name_token
        .clone()
        .or(private_name.clone())
        .map(|id| PropKey::Named(id.name))
        .or(string.clone().map(PropKey::Named))
        .or(number_key)
        .boxed();

    // ── Type expressions ──

    let ty = recursive(|ty| {
        let type_args = ty
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::Lt), just(Token::Gt));

        let dotted = name_token
            .clone()
            .separated_by(just(Token::Dot))
            .at_least(1)
            .collect::<Vec<Ident>>()
            .map(|parts| {
                parts
                    .into_iter()
                    .map(|p| p.name)
                    .collect::<Vec<_>>()
                    .join(".")
            });

        let type_ref = dotted
            .clone()
            .then(type_args.or_not())
            .map(|(name, args)| TypeKind::Ref {
                name,
                args: args.unwrap_or_default(),
            });

        let generic_decl = name_token
            .clone()
            .then(kw(Keyword::Extends).ignore_then(ty.clone()).or_not())
            .then(just(Token::Eq).ignore_then(ty.clone()).or_not())
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::Lt), just(Token::Gt))
            .ignored();

        // `name: T`, `name?: T`, `...rest: T`, or an unnamed Flow parameter `T`.
        let fn_param = just(Token::Ellipsis)
            .or_not()
            .ignore_then(
                name_token
                    .clone()
                    .then(just(Token::Question).or_not())
                    .then(just(Token::Colon))
                    .or_not(),
            )
            .ignore_then(ty.clone());

        let fn_params = fn_param
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .ignored();

        let fn_type = generic_decl
            .clone()
            .or_not()
            .ignore_then(fn_params.clone())
            .then_ignore(just(Token::FatArrow))
            .then_ignore(ty.clone())
            .to(TypeKind::Function);

        // Flow variance (`+`/`-`) and TS `readonly` never change the name.
        let modifier = just(Token::Plus)
            .or(just(Token::Minus))
            .ignored()
            .or(word("readonly").then_ignore(named_key.clone().rewind()));

        let prop_member = modifier
            .repeated()
            .ignore_then(named_key.clone())
            .then(just(Token::Question).or_not().map(|q| q.is_some()))
            .then(choice((
                just(Token::Colon).ignore_then(ty.clone()).map(Some),
                generic_decl
                    .clone()
                    .or_not()
                    .ignore_then(fn_params.clone())
                    .then_ignore(just(Token::Colon).ignore_then(ty.clone()).or_not())
                    .to(None),
            )))
            .map(|((key, optional), ty)| TypeMemberKind::Property { key, optional, ty });

        let index_member = just(Token::LBracket)
            .then(none_of([Token::RBracket]).repeated())
            .then(just(Token::RBracket))
            .then(just(Token::Question).or_not())
            .then(just(Token::Colon))
            .then(ty.clone())
            .to(TypeMemberKind::Index);

        let call_member = generic_decl
            .clone()
            .or_not()
            .ignore_then(fn_params.clone())
            .then(just(Token::Colon))
            .then(ty.clone())
            .to(TypeMemberKind::Call);

        let spread_member = just(Token::Ellipsis)
            .ignore_then(ty.clone())
            .map(TypeMemberKind::Spread);

        let member = choice((spread_member, index_member, call_member, prop_member))
            .map_with(|kind, e| TypeMember {
                kind,
                span: e.span(),
            })
            .then_ignore(just(Token::Comma).or(just(Token::Semi)).or_not());

        let object_type = just(Token::LBrace)
            .ignore_then(just(Token::Pipe).or_not())
            .then(member.repeated().collect::<Vec<_>>())
            .then_ignore(just(Token::Pipe).or_not())
            .then_ignore(just(Token::RBrace))
            .map(|(exact, members)| {
                TypeKind::Object(ObjectType {
                    members,
                    exact: exact.is_some(),
                })
            });

        let literal = select! {
            Token::Str(_) => (),
            Token::Number(_) => (),
            Token::Template => (),
        }
        .or(just(Token::Minus).then(select! { Token::Number(_) => () }).ignored())
        .to(TypeKind::Literal);

        let typeof_type = kw(Keyword::Typeof)
            .ignore_then(dotted)
            .map(TypeKind::Typeof);

        let tuple = ty
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(TypeKind::Tuple);

        let nullable = just(Token::Question)
            .ignore_then(ty.clone())
            .map(|inner| TypeKind::Nullable(Box::new(inner)));

        let paren = ty
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen));

        let primary = choice((
            object_type,
            fn_type,
            tuple,
            literal,
            typeof_type,
            nullable,
            type_ref,
        ))
        .map_with(|kind, e| TypeExpr {
            kind,
            span: e.span(),
        })
        .or(paren);

        let array_suffix = just(Token::LBracket)
            .ignore_then(ty.clone().or_not())
            .then_ignore(just(Token::RBracket))
            .map_with(|_, e| {
                let span: SimpleSpan = e.span();
                span
            });

        let postfix = primary
            .then(array_suffix.repeated().collect::<Vec<_>>())
            .map(|(inner, suffixes)| {
                suffixes.into_iter().fold(inner, |acc, end| TypeExpr {
                    span: merge(acc.span, end),
                    kind: TypeKind::Array(Box::new(acc)),
                })
            });

        let intersection = just(Token::Amp)
            .or_not()
            .ignore_then(
                postfix
                    .separated_by(just(Token::Amp))
                    .at_least(1)
                    .collect::<Vec<_>>(),
            )
            .map_with(|parts, e| collapse(parts, e.span(), TypeKind::Intersection));

        // A `|` directly before `}` closes a Flow exact object instead.
        let union_bar = just(Token::Pipe).then_ignore(just(Token::RBrace).not());

        union_bar
            .clone()
            .or_not()
            .ignore_then(
                intersection
                    .separated_by(union_bar)
                    .at_least(1)
                    .collect::<Vec<_>>(),
            )
            .map_with(|parts, e| collapse(parts, e.span(), TypeKind::Union))
    })
    .boxed();

    let type_ann = just(Token::Colon).ignore_then(ty.clone()).boxed();

    let type_args = ty
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::Lt), just(Token::Gt))
        .boxed();

    let type_params_decl = name_token
        .clone()
        .then(kw(Keyword::Extends).ignore_then(ty.clone()).or_not())
        .then(just(Token::Eq).ignore_then(ty.clone()).or_not())
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::Lt), just(Token::Gt))
        .ignored()
        .boxed();

    // ── Forward declarations ──

    let mut expr = Recursive::declare();
    let mut stmt = Recursive::declare();

    let block = stmt
        .clone()
        .repeated()
        .collect::<Vec<Stmt>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .boxed();

    let computed_key = expr
        .clone()
        .delimited_by(just(Token::LBracket), just(Token::RBracket))
        .map(|key| PropKey::Computed(Box::new(key)));

    let any_key = named_key.clone().or(computed_key).boxed();

    // ── Patterns ──

    let pattern = recursive(|pat| {
        let default = just(Token::Eq).ignore_then(expr.clone());

        let object_prop = choice((
            just(Token::Ellipsis)
                .ignore_then(pat.clone())
                .map(ObjectPatternProp::Rest),
            any_key
                .clone()
                .then(just(Token::Colon).ignore_then(pat.clone()).or_not())
                .then(default.clone().or_not())
                .map(|((key, value), default)| ObjectPatternProp::Prop {
                    key,
                    value,
                    default,
                }),
        ));

        let object = object_prop
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map(PatternKind::Object);

        let element = pat
            .clone()
            .then(default.or_not())
            .map_with(|(pattern, default), e| with_default(pattern, default, e.span()));

        let array = element
            .or_not()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(PatternKind::Array);

        let rest = just(Token::Ellipsis)
            .ignore_then(pat)
            .map(|inner| PatternKind::Rest(Box::new(inner)));

        choice((ident.clone().map(PatternKind::Ident), object, array, rest)).map_with(
            |kind, e| Pattern {
                kind,
                span: e.span(),
            },
        )
    })
    .boxed();

    // ── Functions ──

    let param = pattern
        .clone()
        .then_ignore(just(Token::Question).or_not())
        .then(type_ann.clone().or_not())
        .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
        .map_with(|((pattern, type_ann), default), e| {
            let span: SimpleSpan = e.span();
            Param {
                pattern: with_default(pattern, default, span),
                type_ann,
                span,
            }
        });

    let params = param
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .boxed();

    let function = word("async")
        .or_not()
        .ignore_then(kw(Keyword::Function))
        .ignore_then(just(Token::Star).or_not())
        .ignore_then(ident.clone().or_not())
        .then_ignore(type_params_decl.clone().or_not())
        .then(params.clone())
        .then(type_ann.clone().or_not())
        .then(block.clone())
        .map_with(|(((name, params), return_type), body), e| Function {
            name,
            params,
            return_type,
            body: FunctionBody::Block(body),
            is_arrow: false,
            span: e.span(),
        })
        .boxed();

    let single_param = ident.clone().map_with(|id, e| {
        let span: SimpleSpan = e.span();
        vec![Param {
            pattern: Pattern {
                kind: PatternKind::Ident(id),
                span,
            },
            type_ann: None,
            span,
        }]
    });

    let arrow_head = choice((
        single_param
            .then_ignore(just(Token::FatArrow))
            .map(|params| (params, None)),
        type_params_decl
            .clone()
            .or_not()
            .ignore_then(params.clone())
            .then(type_ann.clone().or_not())
            .then_ignore(just(Token::FatArrow)),
    ));

    let arrow_body = block
        .clone()
        .map(FunctionBody::Block)
        .or(expr.clone().map(|body| FunctionBody::Expr(Box::new(body))));

    let arrow = word("async")
        .then_ignore(just(Token::FatArrow).not())
        .or_not()
        .ignore_then(arrow_head)
        .then(arrow_body)
        .map_with(|((params, return_type), body), e| Function {
            name: None,
            params,
            return_type,
            body,
            is_arrow: true,
            span: e.span(),
        })
        .boxed();

    // Parameter list + body shared by class and object methods.
    let method_tail = type_params_decl
        .clone()
        .or_not()
        .ignore_then(params.clone())
        .then(type_ann.clone().or_not())
        .then(block.clone())
        .map_with(|((params, return_type), body), e| Function {
            name: None,
            params,
            return_type,
            body: FunctionBody::Block(body),
            is_arrow: false,
            span: e.span(),
        })
        .boxed();

    // `get`/`set` only act as accessor markers when a key follows.
    let accessor_kind = word("get")
        .to(true)
        .or(word("set").to(false))
        .then_ignore(any_key.clone().rewind());

    // ── Classes ──

    let modifier = choice((
        word("public"),
        word("private"),
        word("protected"),
        word("readonly"),
        word("abstract"),
        word("override"),
        word("declare"),
        word("async"),
    ))
    .then_ignore(any_key.clone().rewind());

    let class_member_body = choice((
        accessor_kind
            .clone()
            .then(any_key.clone())
            .then(method_tail.clone())
            .map(|((is_get, key), f)| {
                let kind = if is_get {
                    ClassMemberKind::Getter(f)
                } else {
                    ClassMemberKind::Setter(f)
                };
                (key, kind)
            }),
        just(Token::Star)
            .or_not()
            .ignore_then(any_key.clone())
            .then_ignore(just(Token::Question).or_not())
            .then(method_tail.clone())
            .map(|(key, f)| (key, ClassMemberKind::Method(f))),
        any_key
            .clone()
            .then_ignore(just(Token::Question).or(just(Token::Bang)).or_not())
            .then(type_ann.clone().or_not())
            .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
            .map(|((key, type_ann), value)| (key, ClassMemberKind::Field { type_ann, value })),
    ));

    let static_kw = word("static").then_ignore(any_key.clone().rewind());

    let class_member = static_kw
        .or_not()
        .then_ignore(modifier.repeated())
        .then(class_member_body)
        .then_ignore(semi.clone())
        .map_with(|(is_static, (key, kind)), e| ClassMember {
            key,
            is_static: is_static.is_some(),
            kind,
            span: e.span(),
        });

    let class_body = class_member
        .map(Some)
        .or(just(Token::Semi).to(None))
        .repeated()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .map(|members| members.into_iter().flatten().collect::<Vec<_>>());

    // `extends React.Component`: a dotted name, optionally with type arguments.
    let super_expr = ident
        .clone()
        .map(|id| Expr {
            span: id.span,
            kind: ExprKind::Ident(id.name),
        })
        .foldl(
            just(Token::Dot).ignore_then(name_token.clone()).repeated(),
            |object, prop| Expr {
                span: merge(object.span, prop.span),
                kind: ExprKind::Member {
                    object: Box::new(object),
                    property: MemberProp::Named(prop),
                },
            },
        );

    let class = kw(Keyword::Class)
        .ignore_then(ident.clone().or_not())
        .then_ignore(type_params_decl.clone().or_not())
        .then(
            kw(Keyword::Extends)
                .ignore_then(super_expr)
                .then(type_args.clone().or_not())
                .or_not(),
        )
        .then_ignore(
            word("implements")
                .then(
                    ty.clone()
                        .separated_by(just(Token::Comma))
                        .at_least(1)
                        .collect::<Vec<_>>(),
                )
                .or_not(),
        )
        .then(class_body)
        .map_with(|((name, heritage), members), e| {
            let (super_class, super_type_args) = match heritage {
                Some((sc, args)) => (Some(Box::new(sc)), args.unwrap_or_default()),
                None => (None, Vec::new()),
            };
            Class {
                name,
                super_class,
                super_type_args,
                members,
                span: e.span(),
            }
        })
        .boxed();

    // ── JSX ──

    let jsx_name = name_token
        .clone()
        .separated_by(choice((
            just(Token::Dot),
            just(Token::Colon),
            just(Token::Minus),
        )))
        .at_least(1)
        .collect::<Vec<_>>()
        .map_with(move |_, e| text(e.span()));

    let jsx = recursive(|jsx| {
        let attr_value = choice((
            string.clone().map_with(|s, e| Expr {
                kind: ExprKind::Str(s),
                span: e.span(),
            }),
            expr.clone()
                .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            jsx.clone().map_with(|el, e| Expr {
                kind: ExprKind::Jsx(Box::new(el)),
                span: e.span(),
            }),
        ));

        let attr = choice((
            just(Token::Ellipsis)
                .ignore_then(expr.clone())
                .delimited_by(just(Token::LBrace), just(Token::RBrace))
                .map(JsxAttr::Spread),
            jsx_name
                .clone()
                .then(just(Token::Eq).ignore_then(attr_value).or_not())
                .map(|(name, value)| JsxAttr::Named { name, value }),
        ));

        let child = choice((
            jsx.clone().map(JsxChild::Element),
            expr.clone()
                .or_not()
                .delimited_by(just(Token::LBrace), just(Token::RBrace))
                .map(JsxChild::Expr),
            none_of([Token::Lt, Token::LBrace, Token::RBrace]).to(JsxChild::Text),
        ));

        let closing = just(Token::Lt)
            .then(just(Token::Slash))
            .then(jsx_name.clone().or_not())
            .then(just(Token::Gt))
            .ignored();

        just(Token::Lt)
            .then_ignore(just(Token::Slash).not())
            .ignore_then(jsx_name.clone().or_not())
            .then(attr.repeated().collect::<Vec<_>>())
            .then(choice((
                just(Token::Slash).then(just(Token::Gt)).to(None),
                just(Token::Gt)
                    .ignore_then(child.repeated().collect::<Vec<_>>())
                    .then_ignore(closing)
                    .map(Some),
            )))
            .map(|((name, attributes), children)| JsxElement {
                name: name.unwrap_or_default(),
                attributes,
                children: children.unwrap_or_default(),
            })
    })
    .boxed();

    // ── Expressions ──

    let literal = select! {
        Token::Str(s) => ExprKind::Str(s),
        Token::Number(n) => ExprKind::Number(n),
        Token::Template => ExprKind::Template,
        Token::Regex => ExprKind::Regex,
        Token::Keyword(Keyword::True) => ExprKind::Bool(true),
        Token::Keyword(Keyword::False) => ExprKind::Bool(false),
        Token::Keyword(Keyword::Null) => ExprKind::Null,
        Token::Keyword(Keyword::This) => ExprKind::This,
        Token::Keyword(Keyword::Super) => ExprKind::Super,
    };

    let spread_or_expr = just(Token::Ellipsis)
        .ignore_then(expr.clone())
        .map_with(|inner, e| Expr {
            kind: ExprKind::Spread(Box::new(inner)),
            span: e.span(),
        })
        .or(expr.clone())
        .boxed();

    let array = spread_or_expr
        .clone()
        .or_not()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBracket), just(Token::RBracket))
        .map(|mut items: Vec<Option<Expr>>| {
            if items.len() == 1 && items[0].is_none() {
                items.clear();
            }
            ExprKind::Array(items)
        });

    let object_member = choice((
        just(Token::Ellipsis)
            .ignore_then(expr.clone())
            .map(ObjectMemberKind::Spread),
        accessor_kind
            .then(any_key.clone())
            .then(method_tail.clone())
            .map(|((is_get, key), function)| {
                if is_get {
                    ObjectMemberKind::Getter { key, function }
                } else {
                    ObjectMemberKind::Setter { key, function }
                }
            }),
        word("async")
            .then_ignore(any_key.clone().rewind())
            .or_not()
            .ignore_then(just(Token::Star).or_not())
            .ignore_then(any_key.clone())
            .then(method_tail.clone())
            .map(|(key, function)| ObjectMemberKind::Method { key, function }),
        any_key
            .clone()
            .then_ignore(just(Token::Colon))
            .then(expr.clone())
            .map(|(key, value)| ObjectMemberKind::Property { key, value }),
        ident
            .clone()
            .then_ignore(just(Token::Eq).ignore_then(expr.clone()).or_not())
            .map(ObjectMemberKind::Shorthand),
    ))
    .map_with(|kind, e| ObjectMember {
        kind,
        span: e.span(),
    });

    let object = object_member
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .map(ExprKind::Object);

    // `(expr)` keeps the inner node and span; `(a, b)` is a sequence and
    // Flow `(expr: T)` becomes a cast.
    let paren = expr
        .clone()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>()
        .then(type_ann.clone().or_not())
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .map_with(|(mut exprs, ty), e| {
            let inner = if exprs.len() == 1 {
                exprs.swap_remove(0)
            } else {
                Expr {
                    kind: ExprKind::Sequence(exprs),
                    span: e.span(),
                }
            };
            (inner, ty)
        })
        .map_with(|(inner, ty), e| match ty {
            Some(ty) => Expr {
                kind: ExprKind::Cast {
                    expr: Box::new(inner),
                    ty: Some(ty),
                },
                span: e.span(),
            },
            None => inner,
        });

    let primary = choice((
        jsx.clone().map(|el| ExprKind::Jsx(Box::new(el))),
        function.clone().map(|f| ExprKind::Function(Box::new(f))),
        class.clone().map(|c| ExprKind::Class(Box::new(c))),
        literal,
        ident.clone().map(|id| ExprKind::Ident(id.name)),
        array,
        object,
    ))
    .map_with(|kind, e| Expr {
        kind,
        span: e.span(),
    })
    .or(paren)
    .boxed();

    let args = spread_or_expr
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LParen), just(Token::RParen));

    let suffix = choice((
        just(Token::Dot)
            .or(just(Token::QuestionDot))
            .ignore_then(private_name.or(name_token.clone()))
            .map(|id| Suffix::Member(MemberProp::Named(id))),
        just(Token::QuestionDot)
            .or_not()
            .ignore_then(
                expr.clone()
                    .delimited_by(just(Token::LBracket), just(Token::RBracket)),
            )
            .map(|key| Suffix::Member(MemberProp::Computed(Box::new(key)))),
        just(Token::QuestionDot)
            .or_not()
            .ignore_then(args)
            .map(Suffix::Call),
        just(Token::Template).to(Suffix::Call(Vec::new())),
    ))
    .map_with(|suffix, e| {
        let span: SimpleSpan = e.span();
        (suffix, span)
    });

    let postfix = primary
        .foldl(suffix.repeated(), |object, (suffix, end)| {
            let span = merge(object.span, end);
            let kind = match suffix {
                Suffix::Member(property) => ExprKind::Member {
                    object: Box::new(object),
                    property,
                },
                Suffix::Call(args) => ExprKind::Call {
                    callee: Box::new(object),
                    args,
                },
            };
            Expr { kind, span }
        })
        .boxed();

    let unary = recursive(|unary| {
        let prefix = choice((
            just(Token::Bang),
            just(Token::Minus),
            just(Token::Plus),
            just(Token::Tilde),
            just(Token::PlusPlus),
            just(Token::MinusMinus),
            kw(Keyword::Typeof),
            kw(Keyword::Void),
            kw(Keyword::Delete),
            kw(Keyword::Await),
        ));

        let prefixed = prefix.then(unary).map_with(|(op, arg), e| {
            let arg = Box::new(arg);
            let kind = if matches!(op, Token::PlusPlus | Token::MinusMinus) {
                ExprKind::Update { arg }
            } else {
                ExprKind::Unary { arg }
            };
            Expr {
                kind,
                span: e.span(),
            }
        });

        let new_expr = kw(Keyword::New)
            .ignore_then(postfix.clone())
            .map_with(|target: Expr, e| {
                let kind = match target.kind {
                    ExprKind::Call { callee, args } => ExprKind::New { callee, args },
                    other => ExprKind::New {
                        callee: Box::new(Expr {
                            kind: other,
                            span: target.span,
                        }),
                        args: Vec::new(),
                    },
                };
                Expr {
                    kind,
                    span: e.span(),
                }
            });

        let update = postfix
            .clone()
            .then(just(Token::PlusPlus).or(just(Token::MinusMinus)).or_not())
            .map_with(|(arg, op), e| match op {
                Some(_) => Expr {
                    kind: ExprKind::Update { arg: Box::new(arg) },
                    span: e.span(),
                },
                None => arg,
            });

        choice((prefixed, new_expr, update))
    })
    .boxed();

    let cast_suffix = word("as")
        .or(word("satisfies"))
        .ignore_then(ty.clone())
        .map_with(|ty, e| {
            let span: SimpleSpan = e.span();
            (ty, span)
        });

    let operand = unary
        .foldl(cast_suffix.repeated(), |inner, (ty, end)| Expr {
            span: merge(inner.span, end),
            kind: ExprKind::Cast {
                expr: Box::new(inner),
                ty: Some(ty),
            },
        })
        .boxed();

    // `>>` and `>>>` arrive as runs of `Gt`.
    let shift_right = just(Token::Gt)
        .then(just(Token::Gt))
        .then(just(Token::Gt).or_not())
        .to(Token::Gt);

    let binop = choice((
        just(Token::BinOp),
        just(Token::Lt),
        shift_right,
        just(Token::Gt),
        just(Token::Plus),
        just(Token::Minus),
        just(Token::Star),
        just(Token::Slash),
        just(Token::Pipe),
        just(Token::Amp),
        kw(Keyword::In),
        kw(Keyword::Instanceof),
    ));

    let binary = operand
        .clone()
        .foldl(binop.ignore_then(operand).repeated(), |left, right| Expr {
            span: merge(left.span, right.span),
            kind: ExprKind::Binary {
                left: Box::new(left),
                right: Box::new(right),
            },
        })
        .boxed();

    let conditional = binary
        .then(
            just(Token::Question)
                .ignore_then(expr.clone())
                .then_ignore(just(Token::Colon))
                .then(expr.clone())
                .or_not(),
        )
        .map_with(|(test, branches), e| match branches {
            Some((consequent, alternate)) => Expr {
                kind: ExprKind::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                },
                span: e.span(),
            },
            None => test,
        });

    let assign_op = just(Token::Eq).or(just(Token::CompoundAssign));

    let yield_expr = kw(Keyword::Yield)
        .ignore_then(just(Token::Star).or_not())
        .ignore_then(expr.clone().or_not())
        .map_with(|arg, e| Expr {
            kind: ExprKind::Yield(arg.map(Box::new)),
            span: e.span(),
        });

    expr.define(
        choice((
            yield_expr,
            arrow.map_with(|f, e| Expr {
                kind: ExprKind::Function(Box::new(f)),
                span: e.span(),
            }),
            conditional
                .then(assign_op.ignore_then(expr.clone()).or_not())
                .map_with(|(target, value), e| match value {
                    Some(value) => Expr {
                        kind: ExprKind::Assign {
                            target: Box::new(target),
                            value: Box::new(value),
                        },
                        span: e.span(),
                    },
                    None => target,
                }),
        ))
        .boxed(),
    );

    // ── Declarations ──

    let var_kind = select! {
        Token::Keyword(Keyword::Var) => VarKind::Var,
        Token::Keyword(Keyword::Let) => VarKind::Let,
        Token::Keyword(Keyword::Const) => VarKind::Const,
    };

    let declarator = pattern
        .clone()
        .then_ignore(just(Token::Bang).or_not())
        .then(type_ann.clone().or_not())
        .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
        .map_with(|((pattern, type_ann), init), e| Declarator {
            pattern,
            type_ann,
            init,
            span: e.span(),
        });

    let var_decl = var_kind
        .then(
            declarator
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map(|(kind, declarators)| StmtKind::Var(VarDecl { kind, declarators }))
        .boxed();

    let type_alias = word("declare")
        .or_not()
        .ignore_then(word("type"))
        .ignore_then(ident.clone())
        .then_ignore(type_params_decl.clone().or_not())
        .then_ignore(just(Token::Eq))
        .then(ty.clone())
        .map(|(name, ty)| StmtKind::TypeAlias(TypeAlias { name, ty }))
        .boxed();

    let interface_body = ty.clone().try_map(|t, span| match t.kind {
        TypeKind::Object(body) => Ok(body),
        _ => Err(Rich::custom(span, "expected interface body")),
    });

    let interface = word("declare")
        .or_not()
        .ignore_then(word("interface"))
        .ignore_then(ident.clone())
        .then_ignore(type_params_decl.clone().or_not())
        .then(
            kw(Keyword::Extends)
                .ignore_then(
                    ty.clone()
                        .separated_by(just(Token::Comma))
                        .at_least(1)
                        .collect::<Vec<_>>(),
                )
                .or_not(),
        )
        .then(interface_body)
        .map_with(|((name, extends), body), e| {
            StmtKind::Interface(Interface {
                name,
                extends: extends.unwrap_or_default(),
                body,
                span: e.span(),
            })
        })
        .boxed();

    let declaration = choice((
        var_decl.clone(),
        type_alias.clone(),
        interface.clone(),
        function.clone().map(StmtKind::Function),
        class.clone().map(StmtKind::Class),
    ))
    .then_ignore(semi.clone())
    .map_with(|kind, e| Stmt {
        kind,
        span: e.span(),
    });

    // ── Modules ──

    let import_spec = word("type")
        .then_ignore(name_token.clone().rewind())
        .or_not()
        .ignore_then(name_token.clone())
        .then(word("as").ignore_then(ident.clone()).or_not())
        .map(|(imported, local)| local.unwrap_or(imported));

    let named_imports = import_spec
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace));

    let namespace_import = just(Token::Star)
        .ignore_then(word("as"))
        .ignore_then(ident.clone())
        .map(|id| vec![id]);

    let import_clause = choice((
        namespace_import.clone(),
        named_imports.clone(),
        ident
            .clone()
            .then(
                just(Token::Comma)
                    .ignore_then(namespace_import.or(named_imports))
                    .or_not(),
            )
            .map(|(default, rest)| {
                let mut locals = vec![default];
                locals.extend(rest.unwrap_or_default());
                locals
            }),
    ));

    let import = kw(Keyword::Import)
        .ignore_then(
            word("type")
                .or(kw(Keyword::Typeof).ignored())
                .then_ignore(
                    choice((
                        just(Token::Ident).ignored(),
                        just(Token::LBrace).ignored(),
                        just(Token::Star).ignored(),
                    ))
                    .rewind(),
                )
                .or_not(),
        )
        .then(import_clause.then_ignore(word("from")).or_not())
        .then(string.clone())
        .map(|((type_only, locals), source)| {
            StmtKind::Import(ImportDecl {
                locals: locals.unwrap_or_default(),
                source,
                type_only: type_only.is_some(),
            })
        });

    let export_default = kw(Keyword::Export)
        .ignore_then(kw(Keyword::Default))
        .ignore_then(choice((
            function.clone().map(ExportDefault::Function),
            class.clone().map(ExportDefault::Class),
            expr.clone().map(ExportDefault::Expr),
        )))
        .map(StmtKind::ExportDefault);

    let export_decl = kw(Keyword::Export)
        .ignore_then(declaration)
        .map(|decl| StmtKind::Export(Box::new(decl)));

    let export_named = kw(Keyword::Export)
        .ignore_then(word("type").or_not())
        .ignore_then(choice((
            just(Token::Star)
                .then(word("as").then(name_token.clone()).or_not())
                .ignored(),
            name_token
                .clone()
                .then(word("as").then(name_token.clone()).or_not())
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::LBrace), just(Token::RBrace))
                .ignored(),
        )))
        .then(word("from").then(string.clone()).or_not())
        .to(StmtKind::ExportNamed);

    // ── Statements ──

    let paren_expr = expr
        .clone()
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .boxed();

    let return_stmt = kw(Keyword::Return)
        .ignore_then(expr.clone().or_not())
        .map(StmtKind::Return);

    let if_stmt = kw(Keyword::If)
        .ignore_then(paren_expr.clone())
        .then(stmt.clone())
        .then(kw(Keyword::Else).ignore_then(stmt.clone()).or_not())
        .map(|((test, consequent), alternate)| StmtKind::If {
            test,
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        });

    let case = choice((
        kw(Keyword::Case).ignore_then(expr.clone()).map(Some),
        kw(Keyword::Default).to(None),
    ))
    .then_ignore(just(Token::Colon))
    .then(stmt.clone().repeated().collect::<Vec<_>>())
    .map(|(test, body)| SwitchCase { test, body });

    let switch_stmt = kw(Keyword::Switch)
        .ignore_then(paren_expr.clone())
        .then(
            case.repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::LBrace), just(Token::RBrace)),
        )
        .map(|(discriminant, cases)| StmtKind::Switch {
            discriminant,
            cases,
        });

    // `for (...)` heads are skipped as balanced token trees.
    let token_tree = recursive(|tt| {
        choice((
            tt.clone()
                .repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .ignored(),
            tt.clone()
                .repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::LBrace), just(Token::RBrace))
                .ignored(),
            tt.repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::LBracket), just(Token::RBracket))
                .ignored(),
            none_of([
                Token::LParen,
                Token::RParen,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
            ])
            .ignored(),
        ))
    });

    let for_stmt = kw(Keyword::For)
        .ignore_then(kw(Keyword::Await).or_not())
        .ignore_then(
            token_tree
                .repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        )
        .ignore_then(stmt.clone())
        .map(|body| StmtKind::Loop {
            head: Vec::new(),
            body: Box::new(body),
        });

    let while_stmt = kw(Keyword::While)
        .ignore_then(paren_expr.clone())
        .then(stmt.clone())
        .map(|(test, body)| StmtKind::Loop {
            head: vec![test],
            body: Box::new(body),
        });

    let do_while_stmt = kw(Keyword::Do)
        .ignore_then(stmt.clone())
        .then_ignore(kw(Keyword::While))
        .then(paren_expr)
        .map(|(body, test)| StmtKind::Loop {
            head: vec![test],
            body: Box::new(body),
        });

    let try_stmt = kw(Keyword::Try)
        .ignore_then(block.clone())
        .then(
            kw(Keyword::Catch)
                .ignore_then(
                    pattern
                        .clone()
                        .then(type_ann.clone().or_not())
                        .delimited_by(just(Token::LParen), just(Token::RParen))
                        .or_not(),
                )
                .ignore_then(block.clone())
                .or_not(),
        )
        .then(kw(Keyword::Finally).ignore_then(block.clone()).or_not())
        .map(|((block, handler), finalizer)| StmtKind::Try {
            block,
            handler,
            finalizer,
        });

    let throw_stmt = kw(Keyword::Throw)
        .ignore_then(expr.clone())
        .map(StmtKind::Throw);

    let jump_stmt = kw(Keyword::Break)
        .to(StmtKind::Break)
        .or(kw(Keyword::Continue).to(StmtKind::Continue))
        .then_ignore(ident.clone().or_not());

    stmt.define(
        choice((
            block.clone().map(StmtKind::Block),
            var_decl.then_ignore(semi.clone()),
            function.map(StmtKind::Function),
            class.map(StmtKind::Class),
            type_alias.then_ignore(semi.clone()),
            interface,
            import.then_ignore(semi.clone()),
            export_default.then_ignore(semi.clone()),
            export_decl,
            export_named.then_ignore(semi.clone()),
            return_stmt.then_ignore(semi.clone()),
            if_stmt,
            switch_stmt,
            for_stmt,
            while_stmt,
            do_while_stmt.then_ignore(semi.clone()),
            try_stmt,
            throw_stmt.then_ignore(semi.clone()),
            jump_stmt.then_ignore(semi.clone()),
            just(Token::Semi).to(StmtKind::Empty),
            // Labels are dropped; only the labelled statement is kept.
            ident
                .clone()
                .then_ignore(just(Token::Colon))
                .ignore_then(stmt.clone())
                .map(|body: Stmt| body.kind),
            expr.clone().then_ignore(semi).map(StmtKind::Expr),
        ))
        .map_with(|kind, e| Stmt {
            kind,
            span: e.span(),
        })
        .boxed(),
    );

    // ── Program ──

    stmt.repeated()
        .collect::<Vec<_>>()
        .map_with(|body, e| Program {
            body,
            span: e.span(),
        })
}

// ── Tests ──
