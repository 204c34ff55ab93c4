// Lexer for JavaScript / TypeScript / Flow component sources.
//
// Tokenizes the subset of ECMAScript (plus type annotations and JSX) that the
// parser understands. Uses the `logos` crate for DFA-based lexing.
//
// Preconditions: input is valid UTF-8.
// Postconditions: returns all tokens with byte-offset spans, plus any lex errors.
// Failure modes: unrecognized characters and unterminated block comments
//                produce `LexError`; lexing continues.
// Side effects: none.

use logos::{FilterResult, Logos};
use std::fmt;

/// Byte-offset span in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A lexer error with location.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: Span,
    pub message: String,
}

/// Result of lexing: tokens plus any errors (non-fatal).
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<(Token, Span)>,
    pub errors: Vec<LexError>,
}

/// Reserved words the grammar depends on.
///
/// Contextual words (`type`, `interface`, `get`, `static`, `as`, ...) are not
/// listed here; they lex as `Token::Ident` and are matched by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    Yield,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Await => "await",
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::Let => "let",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::Yield => "yield",
        }
    }
}

/// Source tokens.
///
/// Identifiers carry no value — use the span to retrieve the text from the
/// source. String literals carry their decoded contents because quoted object
/// keys name properties.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+|//[^\n]*")]
pub enum Token {
    /// `/* ... */`. Never emitted: the callback skips to the closing `*/`.
    #[token("/*", skip_block_comment)]
    BlockComment,

    // ── Keywords ──
    #[token("await", |_| Keyword::Await)]
    #[token("break", |_| Keyword::Break)]
    #[token("case", |_| Keyword::Case)]
    #[token("catch", |_| Keyword::Catch)]
    #[token("class", |_| Keyword::Class)]
    #[token("const", |_| Keyword::Const)]
    #[token("continue", |_| Keyword::Continue)]
    #[token("default", |_| Keyword::Default)]
    #[token("delete", |_| Keyword::Delete)]
    #[token("do", |_| Keyword::Do)]
    #[token("else", |_| Keyword::Else)]
    #[token("export", |_| Keyword::Export)]
    #[token("extends", |_| Keyword::Extends)]
    #[token("false", |_| Keyword::False)]
    #[token("finally", |_| Keyword::Finally)]
    #[token("for", |_| Keyword::For)]
    #[token("function", |_| Keyword::Function)]
    #[token("if", |_| Keyword::If)]
    #[token("import", |_| Keyword::Import)]
    #[token("in", |_| Keyword::In)]
    #[token("instanceof", |_| Keyword::Instanceof)]
    #[token("let", |_| Keyword::Let)]
    #[token("new", |_| Keyword::New)]
    #[token("null", |_| Keyword::Null)]
    #[token("return", |_| Keyword::Return)]
    #[token("super", |_| Keyword::Super)]
    #[token("switch", |_| Keyword::Switch)]
    #[token("this", |_| Keyword::This)]
    #[token("throw", |_| Keyword::Throw)]
    #[token("true", |_| Keyword::True)]
    #[token("try", |_| Keyword::Try)]
    #[token("typeof", |_| Keyword::Typeof)]
    #[token("var", |_| Keyword::Var)]
    #[token("void", |_| Keyword::Void)]
    #[token("while", |_| Keyword::While)]
    #[token("yield", |_| Keyword::Yield)]
    Keyword(Keyword),

    // ── Brackets ──
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ── Punctuation ──
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("?.")]
    QuestionDot,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("=>")]
    FatArrow,
    #[token("@")]
    At,
    #[token("#")]
    Hash,

    // ── Assignment ──
    #[token("=")]
    Eq,
    /// Compound assignment (`+=`, `??=`, ...). Only the fact of assignment matters.
    #[regex(r"(\+|-|\*\*|\*|/|%|&&|\|\||\?\?|&|\||\^|<<|>>|>>>)=")]
    CompoundAssign,

    // ── Operators ──
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("/")]
    Slash,
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,
    #[token("!")]
    Bang,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("~")]
    Tilde,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    /// Remaining binary operators; the linter never evaluates them.
    ///
    /// `>>` and `>>>` stay as separate `Gt` tokens so that nested type
    /// arguments (`Array<Array<T>>`) close correctly; the parser joins them.
    #[regex(r"===|!==|==|!=|<=|>=|<<|&&|\|\||\?\?|\*\*|%|\^")]
    BinOp,

    // ── Literals ──
    /// Numeric literal (decimal, exponent, hex, numeric separators, bigint suffix).
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?n?", parse_number)]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"0[xX][0-9a-fA-F_]+n?", parse_hex)]
    Number(f64),

    /// Single- or double-quoted string with escapes decoded.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, parse_string)]
    Str(String),

    /// Template literal. Contents are never inspected.
    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    /// Regular expression literal. Produced by `lex` from a `/` in operand
    /// position, never by the DFA directly.
    Regex,

    // ── Identifier ──
    //
    // Placed after keywords — logos prioritises fixed `#[token]` matches
    // over regex for the same length, so `class` matches Keyword, not Ident.
    /// Identifier: `[A-Za-z_$][A-Za-z0-9_$]*`
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(kw) => write!(f, "{}", kw.as_str()),
            Token::BlockComment => write!(f, "/* */"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Semi => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Ellipsis => write!(f, "..."),
            Token::QuestionDot => write!(f, "?."),
            Token::Question => write!(f, "?"),
            Token::Colon => write!(f, ":"),
            Token::FatArrow => write!(f, "=>"),
            Token::At => write!(f, "@"),
            Token::Hash => write!(f, "#"),
            Token::Eq => write!(f, "="),
            Token::CompoundAssign => write!(f, "<assign-op>"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Slash => write!(f, "/"),
            Token::Pipe => write!(f, "|"),
            Token::Amp => write!(f, "&"),
            Token::Bang => write!(f, "!"),
            Token::Minus => write!(f, "-"),
            Token::Plus => write!(f, "+"),
            Token::Star => write!(f, "*"),
            Token::Tilde => write!(f, "~"),
            Token::PlusPlus => write!(f, "++"),
            Token::MinusMinus => write!(f, "--"),
            Token::BinOp => write!(f, "<operator>"),
            Token::Number(v) => write!(f, "{v}"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Template => write!(f, "<template>"),
            Token::Regex => write!(f, "<regex>"),
            Token::Ident => write!(f, "<ident>"),
        }
    }
}

// ── Callbacks ──

fn skip_block_comment(lex: &mut logos::Lexer<'_, Token>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

fn parse_number(lex: &mut logos::Lexer<'_, Token>) -> Option<f64> {
    let cleaned: String = lex
        .slice()
        .chars()
        .filter(|c| *c != '_' && *c != 'n')
        .collect();
    cleaned.parse().ok()
}

fn parse_hex(lex: &mut logos::Lexer<'_, Token>) -> Option<f64> {
    let digits: String = lex.slice()[2..]
        .chars()
        .filter(|c| *c != '_' && *c != 'n')
        .collect();
    u64::from_str_radix(&digits, 16).ok().map(|v| v as f64)
}

fn parse_string(lex: &mut logos::Lexer<'_, Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1]; // strip quotes
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                '0' => result.push('\0'),
                // \' \" \\ and every other escaped character stand for themselves.
                other => result.push(other),
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

/// Whether a `/` after `prev` starts a regular expression literal rather
/// than a division or a JSX closing slash.
fn regex_allowed(prev: Option<&Token>) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    matches!(
        prev,
        Token::LParen
            | Token::LBracket
            | Token::LBrace
            | Token::Comma
            | Token::Semi
            | Token::Colon
            | Token::Question
            | Token::Eq
            | Token::CompoundAssign
            | Token::FatArrow
            | Token::Bang
            | Token::Tilde
            | Token::Amp
            | Token::Pipe
            | Token::Plus
            | Token::Minus
            | Token::Star
            | Token::BinOp
            | Token::Keyword(
                Keyword::Return
                    | Keyword::Typeof
                    | Keyword::Case
                    | Keyword::Do
                    | Keyword::Else
                    | Keyword::In
                    | Keyword::Instanceof
                    | Keyword::New
                    | Keyword::Delete
                    | Keyword::Void
                    | Keyword::Throw
                    | Keyword::Yield
                    | Keyword::Await
            )
    )
}

/// Byte length of the regular expression literal (flags included) at the
/// start of `rest`, or `None` if the line ends before the closing `/`.
fn regex_literal_len(rest: &str) -> Option<usize> {
    let mut in_class = false;
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        match c {
            '\n' | '\r' => return None,
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let body = i + 1;
                let flags = rest[body..]
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len() - body);
                return Some(body + flags);
            }
            _ => {}
        }
    }
    None
}

// ── Public API ──

/// Lex a source string into tokens.
///
/// Returns all successfully parsed tokens together with any errors for
/// unrecognised characters. Lexing is non-fatal: errors are collected and
/// the lexer continues past bad characters.
pub fn lex(source: &str) -> LexResult {
    let mut lexer = Token::lexer(source);
    let mut tokens: Vec<(Token, Span)> = Vec::new();
    let mut errors = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let mut span = Span {
            start: range.start,
            end: range.end,
        };
        match result {
            Ok(Token::Slash) if regex_allowed(tokens.last().map(|(t, _)| t)) => {
                match source.get(span.start..).and_then(regex_literal_len) {
                    Some(len) => {
                        lexer.bump(len - 1);
                        span.end = span.start + len;
                        tokens.push((Token::Regex, span));
                    }
                    None => tokens.push((Token::Slash, span)),
                }
            }
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let text = source.get(span.start..span.end).unwrap_or_default();
                let message = if text.starts_with("/*") {
                    "unterminated block comment".to_string()
                } else {
                    format!("unexpected character: {text:?}")
                };
                errors.push(LexError { span, message });
            }
        }
    }

    LexResult { tokens, errors }
}

// ── Tests ──
