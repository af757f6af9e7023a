// ABOUTME: Syntax highlighter for the REPL line editor
// Implements rustyline's Highlighter trait, adding ANSI colors for
// delimiters, reserved symbols, numbers, strings, and comments

use crate::parser::is_symbol_char;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_RESERVED: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_BOOLEAN: &str = "\x1b[33m"; // Yellow
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)

/// Binding and control forms.
const RESERVED: &[&str] = &["def", "=", "\\", "fun", "defmacro", "if"];

/// The rest of the builtin roster.
const BUILTINS: &[&str] = &[
    "list", "head", "tail", "eval", "join", "load", "parse", "read", "error", "+", "-", "*", "/",
    "%", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!",
];

#[derive(Completer, Helper, Hinter, Validator)]
pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn paint(out: &mut String, color: &str, text: &str) {
    out.push_str(color);
    out.push_str(text);
    out.push_str(COLOR_RESET);
}

fn highlight_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            // Comment: everything to the end of the line
            ';' => {
                let rest: String = chars[i..].iter().collect();
                paint(&mut out, COLOR_COMMENT, &rest);
                break;
            }

            '"' => {
                let start = i;
                i += 1;
                let mut in_escape = false;
                while i < chars.len() {
                    if in_escape {
                        in_escape = false;
                    } else if chars[i] == '\\' {
                        in_escape = true;
                    } else if chars[i] == '"' {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                paint(&mut out, COLOR_STRING, &token);
            }

            '(' | ')' | '{' | '}' | '[' | ']' => {
                paint(&mut out, COLOR_PARENS, &c.to_string());
                i += 1;
            }

            _ if c.is_ascii_digit()
                || (c == '.' && next_is(&chars, i, |d| d.is_ascii_digit()))
                || (c == '-' && next_is(&chars, i, |d| d.is_ascii_digit() || d == '.')) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                paint(&mut out, COLOR_NUMBER, &token);
            }

            _ if is_symbol_char(c) => {
                let start = i;
                while i < chars.len() && is_symbol_char(chars[i]) {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                match classify(&token) {
                    Some(color) => paint(&mut out, color, &token),
                    None => out.push_str(&token),
                }
            }

            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn classify(token: &str) -> Option<&'static str> {
    if token == "true" || token == "false" {
        return Some(COLOR_BOOLEAN);
    }
    if RESERVED.contains(&token) {
        return Some(COLOR_RESERVED);
    }
    if BUILTINS.contains(&token) {
        return Some(COLOR_BUILTIN);
    }
    None
}

fn next_is(chars: &[char], i: usize, pred: impl Fn(char) -> bool) -> bool {
    chars.get(i + 1).copied().is_some_and(pred)
}
