// proplint — default-props contract linter for React components
//
// Library root. Phases in order: lexer, parser, scope, components,
// props/defaults/union, check, then diag/report for output.

pub mod ast;
pub mod check;
pub mod components;
pub mod config;
pub mod defaults;
pub mod diag;
pub mod lexer;
pub mod lint;
pub mod logging;
pub mod model;
pub mod parser;
pub mod props;
pub mod report;
pub mod scope;
pub mod union;
pub mod visit;
