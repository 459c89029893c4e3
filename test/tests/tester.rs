use opinfo_test::{
    test::{Parser, Runner, Test},
    Diff,
};

#[test]
fn parse_flags() {
    let src = " +a\t+b  -abc-foo -foo  +bar+foo";
    let mut flags = opinfo_test::test::parse_flags(src);
    assert_eq!(flags.next(), Some(("a", true)));
    assert_eq!(flags.next(), Some(("b", true)));
    assert_eq!(flags.next(), Some(("abc-foo", false)));
    assert_eq!(flags.next(), Some(("foo", false)));
    assert_eq!(flags.next(), Some(("bar+foo", true)));
    assert_eq!(flags.next(), None);
}

#[test]
fn parse() -> Result<(), String> {
    let src = r#"# comment
        Nop:    NP 90 | NOP # +mode64

        Add_rm8_r8:   00 /r  |  ADD r/m8, r8
        Empty:
    "#;

    let mut parser = Parser::new("input", src);
    let mut test = Test::default();

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.line, 2);
    assert_eq!(test.name, "Nop");
    assert_eq!(test.fields, ["NP 90", "NOP"]);
    assert_eq!(test.comment, "+mode64");

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.line, 4);
    assert_eq!(test.name, "Add_rm8_r8");
    assert_eq!(test.fields, ["00 /r", "ADD r/m8, r8"]);
    assert_eq!(test.comment, "");

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.name, "Empty");
    assert_eq!(test.fields, [""]);

    assert!(!parser.parse(&mut test)?);

    Ok(())
}

#[test]
fn parse_errors() {
    let mut test = Test::default();

    let mut parser = Parser::new("input", "\n  no separator\n");
    let err = parser.parse(&mut test).unwrap_err();
    assert_eq!(err, "error: missing \":\" after \"no separator\", input:2");

    let mut parser = Parser::new("input", "two words: x");
    assert!(parser.parse(&mut test).is_err());
}

struct Upper;

impl Runner for Upper {
    fn render(&mut self, test: &Test) -> Result<Vec<String>, String> {
        match test.name {
            "unknown" => Err("unknown entry".to_owned()),
            name => Ok(vec![name.to_owned(), name.to_uppercase()]),
        }
    }
}

#[test]
fn runner() {
    assert_eq!(Upper.run("input", "abc: abc | ABC\nx: x |   X"), Ok(()));
    assert!(Upper.run("input", "abc: abc | abc").is_err());
    assert!(Upper.run("input", "unknown: a | A").is_err());
    assert!(Upper.run("input", "# nothing").is_err());
}

#[test]
fn diff() {
    let diff = Diff::new("input", 3, "Nop", "NP 90 | NOP", "90 | NOP").to_string();
    let lines: Vec<_> = diff.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "  --> input:3");
    assert_eq!(lines[1], "   = Nop");
    assert!(lines.contains(&"  0 - NP 90"));
    assert!(lines.contains(&"  0 + 90"));
    assert_eq!(lines[4], "  1 | NOP");
}
