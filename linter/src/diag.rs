// diag.rs — Diagnostics model
//
// Shared diagnostic types for lint findings and syntax errors, the stable
// code table, and the byte-offset to line/column mapping used by reports.
//
// Preconditions: spans passed to `LineIndex` come from the indexed source.
// Postconditions: line and column numbers are 1-based; columns count chars.
// Failure modes: none.
// Side effects: none.

use std::fmt;

use chumsky::error::Rich;
use serde::Serialize;

use crate::ast::Span;
use crate::lexer::Token;
use crate::model::{Violation, ViolationKind};

// ── Diagnostic code ──────────────────────────────────────────────────────

/// A stable diagnostic code (e.g., `P0001`).
///
/// Once assigned, a code must never be reassigned to a different meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DiagCode(pub &'static str);

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub mod codes {
    use super::DiagCode;

    /// Optional property without a default.
    pub const SHOULD_HAVE_DEFAULT: DiagCode = DiagCode("P0001");
    /// Required property with a default (only under `forbidDefaultForRequired`).
    pub const NO_DEFAULT_WITH_REQUIRED: DiagCode = DiagCode("P0002");
    /// Source could not be parsed.
    pub const SYNTAX: DiagCode = DiagCode("P0100");
}

// ── Severity level ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagLevel {
    Error,
    Warning,
}

impl DiagLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagLevel::Error => "error",
            DiagLevel::Warning => "warning",
        }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// One finding in one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: Option<DiagCode>,
    /// Message id of the lint rule (`shouldHaveDefault`), if any.
    pub rule: Option<&'static str>,
    pub level: DiagLevel,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with no code, rule or hint.
    pub fn new(level: DiagLevel, span: Span, message: impl Into<String>) -> Self {
        Self {
            code: None,
            rule: None,
            level,
            span,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_code(mut self, code: DiagCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn from_violation(violation: &Violation) -> Self {
        match violation.kind {
            ViolationKind::MissingDefault => Diagnostic::new(
                DiagLevel::Warning,
                violation.span,
                format!(
                    "propType \"{}\" is not required, but has no corresponding defaultProps declaration.",
                    violation.name
                ),
            )
            .with_code(codes::SHOULD_HAVE_DEFAULT)
            .with_rule("shouldHaveDefault"),
            ViolationKind::DefaultOnRequired => Diagnostic::new(
                DiagLevel::Warning,
                violation.span,
                format!(
                    "propType \"{}\" is required and should not have a defaultProps declaration.",
                    violation.name
                ),
            )
            .with_code(codes::NO_DEFAULT_WITH_REQUIRED)
            .with_rule("noDefaultWithRequired"),
        }
    }

    pub fn from_parse_error(error: &Rich<'_, Token, Span>) -> Self {
        Diagnostic::new(DiagLevel::Error, *error.span(), error.to_string()).with_code(codes::SYNTAX)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.level.as_str();
        if let Some(code) = &self.code {
            write!(f, "{}[{}]: {}", level, code, self.message)?;
        } else {
            write!(f, "{}: {}", level, self.message)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

// ── Line index ───────────────────────────────────────────────────────────

/// Maps byte offsets to 1-based line and column.
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex {
            source,
            line_starts,
        }
    }

    /// Line and column of `offset`; offsets past the end clamp to the end.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map_or(offset - start, |prefix| prefix.chars().count());
        (line + 1, column + 1)
    }
}
