// lint.rs — Per-file lint driver
//
// Runs the phases for one source text: parse, binding table, component
// registry, contract check, and conversion of violations to diagnostics.
//
// Preconditions: `options` is already merged from file and command line.
// Postconditions: diagnostics are ordered by source position; the order is
//                 stable across runs on the same input.
// Failure modes: unreadable files (`LintError::Io`); sources with syntax
//                errors (`LintError::Syntax`), which yield no lint findings.
// Side effects: reads the file in `read_source`; emits `tracing` events.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::check::check_component;
use crate::components;
use crate::config::Options;
use crate::diag::{codes, DiagLevel, Diagnostic};
use crate::parser::parse;
use crate::scope::BindingTable;

// ── Error type ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum LintError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source did not parse; carries the syntax diagnostics.
    Syntax(Vec<Diagnostic>),
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            LintError::Syntax(diagnostics) => {
                write!(f, "{} syntax error(s)", diagnostics.len())
            }
        }
    }
}

impl std::error::Error for LintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LintError::Io { source, .. } => Some(source),
            LintError::Syntax(_) => None,
        }
    }
}

// ── Driver ─────────────────────────────────────────────────────────────────

pub fn read_source(path: &Path) -> Result<String, LintError> {
    std::fs::read_to_string(path).map_err(|e| LintError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Lint one source text.
pub fn lint_source(source: &str, options: &Options) -> Result<Vec<Diagnostic>, LintError> {
    let parsed = parse(source);
    if !parsed.errors.is_empty() {
        return Err(LintError::Syntax(
            parsed.errors.iter().map(Diagnostic::from_parse_error).collect(),
        ));
    }
    let Some(program) = parsed.program else {
        use chumsky::span::Span as _;
        let span = crate::ast::Span::new((), 0..0);
        return Err(LintError::Syntax(vec![Diagnostic::new(
            DiagLevel::Error,
            span,
            "parse failed with no output",
        )
        .with_code(codes::SYNTAX)]));
    };

    let table = BindingTable::build(&program);
    let components = components::collect(&program, options);
    tracing::debug!(
        statements = program.body.len(),
        components = components.len(),
        "registry built"
    );

    let mut diagnostics: Vec<Diagnostic> = components
        .iter()
        .flat_map(|component| check_component(component, &table, options))
        .map(|violation| Diagnostic::from_violation(&violation))
        .collect();
    diagnostics.sort_by_key(|d| d.span.start);
    Ok(diagnostics)
}
