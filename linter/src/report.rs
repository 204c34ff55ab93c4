// report.rs — Lint report rendering
//
// Turns per-file diagnostics into the `text` and `json` output formats.
// Each file record carries a SHA-256 of the linted source so results can be
// keyed against the exact content they were computed from.
//
// Preconditions: diagnostics' spans index into the source they came with.
// Postconditions: rendering is deterministic for identical inputs.
// Failure modes: JSON serialisation errors are returned to the caller.
// Side effects: none.

use serde::Serialize;

use crate::diag::{DiagCode, DiagLevel, Diagnostic, LineIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// One diagnostic with its position resolved to line/column.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub code: Option<DiagCode>,
    pub rule: Option<&'static str>,
    pub level: DiagLevel,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub sha256: String,
    pub diagnostics: Vec<ReportEntry>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, source: &str, diagnostics: &[Diagnostic]) -> Self {
        let index = LineIndex::new(source);
        let diagnostics = diagnostics
            .iter()
            .map(|d| {
                let (line, column) = index.line_col(d.span.start);
                let (end_line, end_column) = index.line_col(d.span.end);
                ReportEntry {
                    code: d.code,
                    rule: d.rule,
                    level: d.level,
                    message: d.message.clone(),
                    line,
                    column,
                    end_line,
                    end_column,
                }
            })
            .collect();
        FileReport {
            path: path.into(),
            sha256: source_hash_hex(source),
            diagnostics,
        }
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagLevel::Warning)
            .count()
    }
}

/// SHA-256 of the raw source text, lowercase hex.
pub fn source_hash_hex(source: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
    }
    s
}

// ── Renderers ──────────────────────────────────────────────────────────────

/// `path:line:col: warning[P0001]: message`, one line per diagnostic.
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for d in &report.diagnostics {
            out.push_str(&format!("{}:{}:{}: {}", report.path, d.line, d.column, d.level.as_str()));
            if let Some(code) = d.code {
                out.push_str(&format!("[{}]", code));
            }
            out.push_str(&format!(": {}\n", d.message));
        }
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'r> {
    version: &'static str,
    files: &'r [FileReport],
}

pub fn render_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        files: reports,
    })
}
