// ABOUTME: Host-side error types; in-language failures are Value::Err values

use thiserror::Error;

/// Reader diagnostics. These surface through the REPL and through the
/// `load`/`parse` builtins (wrapped into an Err value there).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error near '{0}'")]
    Syntax(String),

    #[error("unexpected trailing input near '{0}'")]
    Trailing(String),
}
