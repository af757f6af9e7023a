// ABOUTME: Configuration and constants for the interpreter

use std::env;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "Lispy Version 1.0.0";
pub const WELCOME_FOOTER: &str = "Press Ctrl+c to Exit";

/// REPL prompt.
pub const PROMPT: &str = "lisp> ";

/// Environment variable naming the directory the standard library is
/// loaded from at startup.
pub const HOME_ENV: &str = "LISPY_HOME";

/// File name of the standard library within [`HOME_ENV`].
pub const STDLIB_FILE: &str = "stdlib.lsp";

/// Resolves the standard library path: `$LISPY_HOME/stdlib.lsp`,
/// defaulting the directory to the current one.
pub fn stdlib_path() -> PathBuf {
    let home = env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(STDLIB_FILE)
}
