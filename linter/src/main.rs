use clap::Parser;
use std::path::PathBuf;

use proplint::config::Options;
use proplint::lint::{lint_source, read_source, LintError};
use proplint::report::{render_json, render_text, FileReport, Format};

#[derive(Parser, Debug)]
#[command(
    name = "proplint",
    version,
    about = "Checks that optional React props declare defaults (require-default-props)"
)]
struct Cli {
    /// Source files to lint (.js, .jsx, .ts, .tsx)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip function and arrow components
    #[arg(long)]
    ignore_functional_components: bool,

    /// Also report required props that declare a default
    #[arg(long)]
    forbid_default_for_required: bool,

    /// Transparent wrapper function name (repeatable)
    #[arg(long = "wrapper", value_name = "NAME")]
    wrappers: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print debug logs to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    proplint::logging::init_tracing(cli.verbose);

    // ── Options ──
    let mut options = match &cli.config {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("proplint: error: {}", e);
                std::process::exit(2);
            }
        },
        None => Options::default(),
    };
    options.ignore_functional_components |= cli.ignore_functional_components;
    options.forbid_default_for_required |= cli.forbid_default_for_required;
    options.prop_wrapper_functions.extend(cli.wrappers.iter().cloned());

    // ── Lint each file ──
    let mut reports = Vec::new();
    let mut failed = false;
    for path in &cli.files {
        let _span = tracing::info_span!("file", path = %path.display()).entered();
        let display = path.display().to_string();
        let source = match read_source(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("proplint: error: {}", e);
                failed = true;
                continue;
            }
        };
        match lint_source(&source, &options) {
            Ok(diagnostics) => reports.push(FileReport::new(display, &source, &diagnostics)),
            Err(LintError::Syntax(diagnostics)) => {
                let report = FileReport::new(display, &source, &diagnostics);
                eprint!("{}", render_text(std::slice::from_ref(&report)));
                failed = true;
            }
            Err(e) => {
                eprintln!("proplint: error: {}", e);
                failed = true;
            }
        }
    }

    // ── Report ──
    match cli.format {
        Format::Text => print!("{}", render_text(&reports)),
        Format::Json => match render_json(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("proplint: error: {}", e);
                std::process::exit(2);
            }
        },
    }

    if failed {
        std::process::exit(2);
    }
    let warnings: usize = reports.iter().map(FileReport::warning_count).sum();
    if warnings > 0 {
        if cli.verbose {
            eprintln!("proplint: {} warning(s) in {} file(s)", warnings, reports.len());
        }
        std::process::exit(1);
    }
}
