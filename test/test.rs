//! Expectation files.
//!
//! Each entry is one line, `NAME: FIELD | FIELD ...`, where the fields are
//! rendered strings of the entry `NAME`. `#` starts a comment, a comment on
//! an entry line holds flags for the runner, e.g. `# +mode64 -mode16`.
//! Whitespace runs inside fields are not significant.

use std::{fmt, str::Lines};

use super::utils::{Diff, SEPARATOR};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ParserError {
    file: String,
    line: usize,
    msg: String,
}

impl ParserError {
    fn new(file: &str, line: usize, msg: String) -> Self {
        Self {
            file: file.to_owned(),
            line,
            msg,
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "error: {}, {}:{}", self.msg, self.file, self.line)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Test<'a> {
    pub line: usize,
    pub name: &'a str,
    pub fields: Vec<&'a str>,
    pub comment: &'a str,
}

pub struct Parser<'a> {
    file: &'a str,
    lines: Lines<'a>,
    line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(file: &'a str, src: &'a str) -> Self {
        Self {
            file,
            lines: src.lines(),
            line: 0,
        }
    }

    fn error<T>(&self, msg: String) -> Result<T, String> {
        Err(ParserError::new(self.file, self.line, msg).to_string())
    }

    /// Reads the next entry into `out`, returns `false` at the end of input.
    pub fn parse(&mut self, out: &mut Test<'a>) -> Result<bool, String> {
        while let Some(cur) = self.lines.next() {
            self.line += 1;

            let (cur, comment) = cur.split_once('#').unwrap_or((cur, ""));
            let cur = cur.trim();
            if cur.is_empty() {
                continue;
            }

            let (name, tail) = match cur.split_once(':') {
                Some((name, tail)) => (name.trim(), tail),
                None => return self.error(format!("missing \":\" after \"{cur}\"")),
            };
            if name.is_empty() || name.contains(char::is_whitespace) {
                return self.error(format!("invalid name \"{name}\""));
            }

            out.line = self.line;
            out.name = name;
            out.comment = comment.trim();
            out.fields.clear();
            out.fields.extend(tail.split(SEPARATOR.trim()).map(str::trim));
            return Ok(true);
        }
        Ok(false)
    }
}

pub fn parse_flags(s: &str) -> impl Iterator<Item = (&str, bool)> {
    s.split_whitespace().filter_map(|i| {
        let state = match i.chars().next() {
            Some('+') => true,
            Some('-') => false,
            _ => return None,
        };
        let name = &i[1..];
        Some((name, state))
    })
}

fn push_field(out: &mut String, s: &str) {
    for (i, s) in s.split_whitespace().enumerate() {
        if i != 0 {
            out.push(' ');
        }
        out.push_str(s);
    }
}

fn fields_to_string<S: AsRef<str>>(fields: &[S]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i != 0 {
            out.push_str(SEPARATOR);
        }
        push_field(&mut out, field.as_ref());
    }
    out
}

pub trait Runner {
    /// Renders the fields of the entry `test.name`.
    fn render(&mut self, test: &Test) -> Result<Vec<String>, String>;

    fn run(&mut self, file: &str, tests: &str) -> Result<(), String> {
        let mut test = Test::default();
        let mut parser = Parser::new(file, tests);
        let mut failed = 0;
        let mut count = 0;
        while parser.parse(&mut test)? {
            count += 1;
            let expect = fields_to_string(&test.fields);
            let result = match self.render(&test) {
                Ok(fields) => fields_to_string(&fields),
                Err(msg) => {
                    failed += 1;
                    eprintln!("error: {msg}, {}:{}", file, test.line);
                    continue;
                }
            };
            if result != expect {
                failed += 1;
                eprintln!("error: invalid output, {}:{}", file, test.line);
                let diff = Diff::new(file, test.line, test.name, &expect, &result);
                eprintln!("{diff}");
            }
        }
        if count == 0 {
            Err(format!("no tests in {file}"))
        } else if failed == 0 {
            Ok(())
        } else {
            Err(format!("failed {failed} tests"))
        }
    }
}
