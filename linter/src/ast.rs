// AST node types for JavaScript / TypeScript / Flow component sources.
//
// Covers the statically relevant subset: declarations, classes, functions,
// object literals, member/call chains, JSX, and type annotations.
// Every node carries a `SimpleSpan` for diagnostics in downstream phases.
//
// Preconditions: produced by the parser from a valid or partially-valid token stream.
// Postconditions: each node's span covers the source range of the construct.
// Failure modes: none (data-only module).
// Side effects: none.

use chumsky::span::SimpleSpan;

/// Byte-offset span (alias for chumsky's `SimpleSpan`).
pub type Span = SimpleSpan;

// ── Root ──

/// A complete source file: a sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

// ── Identifier ──

/// An identifier with its source text and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

// ── Statements ──

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Var(VarDecl),
    Function(Function),
    Class(Class),
    TypeAlias(TypeAlias),
    Interface(Interface),
    Import(ImportDecl),
    /// `export <declaration>`
    Export(Box<Stmt>),
    /// `export default <function | class | expression>`
    ExportDefault(ExportDefault),
    /// `export { a, b as c }`, `export * from "x"`: no local bindings.
    ExportNamed,
    Expr(Expr),
    Return(Option<Expr>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Block(Vec<Stmt>),
    /// `for`, `for..in`, `for..of`, `while`, `do..while`. Heads are kept
    /// only for assignment scanning.
    Loop {
        head: Vec<Expr>,
        body: Box<Stmt>,
    },
    Try {
        block: Vec<Stmt>,
        handler: Option<Vec<Stmt>>,
        finalizer: Option<Vec<Stmt>>,
    },
    Throw(Expr),
    Break,
    Continue,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default:`.
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefault {
    Function(Function),
    Class(Class),
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub pattern: Pattern,
    pub type_ann: Option<TypeExpr>,
    pub init: Option<Expr>,
    pub span: Span,
}

/// `import a, { b as c } from "x"`, `import type T from "x"`, `import "x"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Local names introduced by the import.
    pub locals: Vec<Ident>,
    pub source: String,
    pub type_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: Ident,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: Ident,
    pub extends: Vec<TypeExpr>,
    pub body: ObjectType,
    pub span: Span,
}

// ── Patterns ──

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Ident(Ident),
    Object(Vec<ObjectPatternProp>),
    Array(Vec<Option<Pattern>>),
    Rest(Box<Pattern>),
    /// `pattern = default`
    Assign(Box<Pattern>, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProp {
    /// `key`, `key: pattern`, `key = default`
    Prop {
        key: PropKey,
        value: Option<Pattern>,
        default: Option<Expr>,
    },
    Rest(Pattern),
}

// ── Functions and classes ──

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<Ident>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: FunctionBody,
    pub is_arrow: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Vec<Stmt>),
    /// Arrow function with a concise expression body.
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub pattern: Pattern,
    pub type_ann: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Option<Ident>,
    pub super_class: Option<Box<Expr>>,
    /// Type arguments of the superclass: `extends Component<Props, State>`.
    pub super_type_args: Vec<TypeExpr>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub key: PropKey,
    pub is_static: bool,
    pub kind: ClassMemberKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMemberKind {
    Method(Function),
    Getter(Function),
    Setter(Function),
    /// Field declaration: `props: Props;`, `static propTypes = {...}`.
    Field {
        type_ann: Option<TypeExpr>,
        value: Option<Expr>,
    },
}

// ── Property keys ──

#[derive(Debug, Clone, PartialEq)]
pub enum PropKey {
    /// Identifier, keyword, string, or numeric key. Quotes are removed.
    Named(String),
    /// `[expr]`
    Computed(Box<Expr>),
}

impl PropKey {
    pub fn name(&self) -> Option<&str> {
        match self {
            PropKey::Named(name) => Some(name),
            PropKey::Computed(_) => None,
        }
    }
}

// ── Expressions ──

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Ident(String),
    This,
    Super,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Template,
    /// Regular expression literal. Pattern and flags are never inspected.
    Regex,
    Array(Vec<Option<Expr>>),
    Object(Vec<ObjectMember>),
    Function(Box<Function>),
    Class(Box<Class>),
    Member {
        object: Box<Expr>,
        property: MemberProp,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        arg: Box<Expr>,
    },
    /// Binary and logical operators. Operands only; the operator is never evaluated.
    Binary {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Update {
        arg: Box<Expr>,
    },
    Spread(Box<Expr>),
    /// `(a, b)`
    Sequence(Vec<Expr>),
    /// `yield expr`, `yield* expr`, bare `yield`.
    Yield(Option<Box<Expr>>),
    /// `expr as T`, `expr!`, `(expr: T)`.
    Cast {
        expr: Box<Expr>,
        ty: Option<TypeExpr>,
    },
    Jsx(Box<JsxElement>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProp {
    Named(Ident),
    Computed(Box<Expr>),
}

impl MemberProp {
    /// Static property name: `a.b` → `b`, `a["b"]` → `b`.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            MemberProp::Named(id) => Some(&id.name),
            MemberProp::Computed(expr) => match &expr.kind {
                ExprKind::Str(s) => Some(s),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMember {
    pub kind: ObjectMemberKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMemberKind {
    Property { key: PropKey, value: Expr },
    Shorthand(Ident),
    Method { key: PropKey, function: Function },
    Getter { key: PropKey, function: Function },
    Setter { key: PropKey, function: Function },
    Spread(Expr),
}

impl Expr {
    /// Dotted path of an identifier/member chain: `React.Component` → `"React.Component"`.
    pub fn dotted_name(&self) -> Option<String> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name.clone()),
            ExprKind::This => Some("this".to_string()),
            ExprKind::Member { object, property } => {
                let head = object.dotted_name()?;
                let tail = property.static_name()?;
                Some(format!("{head}.{tail}"))
            }
            _ => None,
        }
    }
}

// ── JSX ──

#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    /// Tag name; empty for fragments.
    pub name: String,
    pub attributes: Vec<JsxAttr>,
    pub children: Vec<JsxChild>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttr {
    Named { name: String, value: Option<Expr> },
    Spread(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    Text,
    Element(JsxElement),
    Expr(Option<Expr>),
}

// ── Type expressions ──

#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Object(ObjectType),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// Named reference, possibly dotted, with type arguments: `React.FC<Props>`.
    Ref {
        name: String,
        args: Vec<TypeExpr>,
    },
    Literal,
    Function,
    Array(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    Typeof(String),
    /// Flow `?T`
    Nullable(Box<TypeExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub members: Vec<TypeMember>,
    /// Flow exact object `{| ... |}`.
    pub exact: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeMember {
    pub kind: TypeMemberKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeMemberKind {
    /// `+name?: T`, `readonly name: T`, `name?(): T`. Variance and `readonly`
    /// are dropped by the parser.
    Property {
        key: PropKey,
        optional: bool,
        ty: Option<TypeExpr>,
    },
    /// `[key: string]: T`
    Index,
    /// `(...args): T`
    Call,
    /// `...OtherType`
    Spread(TypeExpr),
}
