use std::fmt;

/// Field separator of a rendered entry.
pub(crate) const SEPARATOR: &str = " | ";

struct Field<'a>(&'a str);

impl fmt::Display for Field<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            fmt.write_str("<empty>")
        } else {
            fmt.write_str(self.0)
        }
    }
}

/// Field by field difference of two rendered entries.
pub struct Diff<'a> {
    file: &'a str,
    line: usize,
    name: &'a str,
    expect: &'a str,
    result: &'a str,
}

impl<'a> Diff<'a> {
    pub fn new(
        file: &'a str,
        line: usize,
        name: &'a str,
        expect: &'a str,
        result: &'a str,
    ) -> Self {
        Self {
            file,
            line,
            name,
            expect,
            result,
        }
    }
}

impl fmt::Display for Diff<'_> {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        use diff::Result as E;

        writeln!(out, "  --> {}:{}", self.file, self.line)?;
        writeln!(out, "   = {}", self.name)?;

        let expect = self.expect.replace(SEPARATOR, "\n");
        let result = self.result.replace(SEPARATOR, "\n");
        // numbered by field index
        let mut left = 0;
        let mut right = 0;
        for diff in diff::lines(&expect, &result) {
            match diff {
                E::Left(l) => {
                    writeln!(out, "{left:3} - {}", Field(l))?;
                    left += 1;
                }
                E::Both(l, _) => {
                    writeln!(out, "{left:3} | {}", Field(l))?;
                    left += 1;
                    right = left;
                }
                E::Right(r) => {
                    writeln!(out, "{right:3} + {}", Field(r))?;
                    right += 1;
                }
            }
        }
        Ok(())
    }
}
