// ABOUTME: The reader: nom combinators turning source text into a tagged syntax tree

use crate::error::ParseError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{cut, opt, recognize},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};

/// One node of the reader's syntax tree: a tag naming the grammar rule,
/// the matched text for leaves, and ordered children for branches.
/// Bracket literals (tag `char`) and comments appear as children and
/// are skipped during ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub tag: &'static str,
    pub contents: String,
    pub children: Vec<Ast>,
}

impl Ast {
    fn leaf(tag: &'static str, contents: &str) -> Ast {
        Ast {
            tag,
            contents: contents.to_string(),
            children: Vec::new(),
        }
    }

    fn node(tag: &'static str, children: Vec<Ast>) -> Ast {
        Ast {
            tag,
            contents: String::new(),
            children,
        }
    }
}

/// Opaque handle to the reader. The grammar itself lives in the
/// combinator functions below; the handle is constructed once at
/// startup and threaded through evaluation so `load` and `parse` never
/// reach for module-level parser state.
#[derive(Debug, Default)]
pub struct Reader;

impl Reader {
    pub fn new() -> Self {
        Reader
    }

    /// Parses a whole program: `expr*` to end of input. Returns the
    /// root node (tag `program`) or a human-readable diagnostic.
    pub fn parse(&self, src: &str) -> Result<Ast, ParseError> {
        match many0(preceded(multispace0, parse_expr)).parse(src) {
            Ok((rest, exprs)) => {
                let rest = rest.trim_start();
                if rest.is_empty() {
                    Ok(Ast::node("program", exprs))
                } else {
                    Err(ParseError::Trailing(snippet(rest)))
                }
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                Err(ParseError::Syntax(snippet(e.input)))
            }
            Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax(String::new())),
        }
    }
}

fn snippet(input: &str) -> String {
    let end = input
        .char_indices()
        .nth(24)
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let mut s = input[..end].to_string();
    if end < input.len() {
        s.push_str("...");
    }
    s
}

pub(crate) fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&%|".contains(c)
}

fn nom_error(input: &str, kind: nom::error::ErrorKind) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, kind))
}

/// float : /-?[0-9]*\.[0-9]+/
fn parse_float(input: &str) -> IResult<&str, Ast> {
    recognize((opt(char('-')), digit0, char('.'), digit1))
        .map(|s: &str| Ast::leaf("float", s))
        .parse(input)
}

/// integer : /-?[0-9]+/
fn parse_integer(input: &str) -> IResult<&str, Ast> {
    recognize((opt(char('-')), digit1))
        .map(|s: &str| Ast::leaf("integer", s))
        .parse(input)
}

/// bool : /(true|false)/ — not glued onto a longer symbol
fn parse_bool(input: &str) -> IResult<&str, Ast> {
    let (rest, lit) = alt((tag("true"), tag("false"))).parse(input)?;
    if rest.chars().next().is_some_and(is_symbol_char) {
        return Err(nom_error(input, nom::error::ErrorKind::Tag));
    }
    Ok((rest, Ast::leaf("bool", lit)))
}

/// string : /"(\\.|[^"])*"/ — contents keep the surrounding quotes;
/// ingestion strips and unescapes them
fn parse_string(input: &str) -> IResult<&str, Ast> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => return Err(nom_error(input, nom::error::ErrorKind::Char)),
    }

    let mut in_escape = false;
    for (i, c) in chars {
        if in_escape {
            in_escape = false;
            continue;
        }
        match c {
            '\\' => in_escape = true,
            '"' => {
                let end = i + 1;
                return Ok((&input[end..], Ast::leaf("string", &input[..end])));
            }
            _ => {}
        }
    }

    // Unterminated literal: not recoverable by another alternative.
    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// comment : /;[^\r\n]*/
fn parse_comment(input: &str) -> IResult<&str, Ast> {
    let (rest, _) = char(';')(input)?;
    let (rest, text) = take_while(|c| c != '\n' && c != '\r')(rest)?;
    Ok((rest, Ast::leaf("comment", &input[..1 + text.len()])))
}

/// symbol : /[a-zA-Z0-9_+\-*\/\\=<>!&%|]+/
fn parse_symbol(input: &str) -> IResult<&str, Ast> {
    take_while1(is_symbol_char)
        .map(|s: &str| Ast::leaf("symbol", s))
        .parse(input)
}

fn parse_delimited<'a>(
    input: &'a str,
    rule: &'static str,
    open: char,
    close: char,
) -> IResult<&'a str, Ast> {
    let (rest, _) = char(open)(input)?;
    let (rest, exprs) = many0(preceded(multispace0, parse_expr)).parse(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = cut(char(close)).parse(rest)?;

    let mut children = Vec::with_capacity(exprs.len() + 2);
    children.push(Ast::leaf("char", &open.to_string()));
    children.extend(exprs);
    children.push(Ast::leaf("char", &close.to_string()));
    Ok((rest, Ast::node(rule, children)))
}

/// sexpr : '(' expr* ')'
fn parse_sexpr(input: &str) -> IResult<&str, Ast> {
    parse_delimited(input, "sexpr", '(', ')')
}

/// qexpr : '{' expr* '}'
fn parse_qexpr(input: &str) -> IResult<&str, Ast> {
    parse_delimited(input, "qexpr", '{', '}')
}

/// list : '[' expr* ']' — sugar for `(list …)`, applied at ingestion
fn parse_list(input: &str) -> IResult<&str, Ast> {
    parse_delimited(input, "list", '[', ']')
}

fn parse_expr(input: &str) -> IResult<&str, Ast> {
    alt((
        parse_float,
        parse_integer,
        parse_bool,
        parse_string,
        parse_comment,
        parse_symbol,
        parse_sexpr,
        parse_qexpr,
        parse_list,
    ))
    .parse(input)
}

/// Undoes C-style escapes in a string literal's body. Unknown escape
/// sequences pass the escaped character through unchanged.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0C'),
            Some('v') => out.push('\x0B'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Re-applies the escapes [`unescape`] understands; used by the printer.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\x0B' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}
