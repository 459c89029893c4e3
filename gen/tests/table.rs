use std::{env, fs, path::Path};

use opinfo_core::{enums::EncodingKind, layout};
use opinfo_gen::{parse_record, parse_table, ErrorKind, Table};

const TAIL: &str = "
DeclareByte db legacy op=00
DeclareWord dw legacy op=00
";

fn table(body: &str) -> String {
    format!("INVALID invalid legacy op=00\n{body}{TAIL}")
}

fn record_error(line: &str) -> String {
    match parse_record(line) {
        Ok(record) => panic!("{line}: accepted as {record:?}"),
        Err(msg) => msg,
    }
}

/// Line and message of a rejected table.
fn parse_error(src: &str) -> (usize, String) {
    let err = match parse_table(Path::new("input.table"), src) {
        Ok(records) => panic!("accepted {} records", records.len()),
        Err(err) => err,
    };
    match err.kind() {
        ErrorKind::Parse(line, msg) => (*line, msg.clone()),
        kind => panic!("unexpected error {kind:?}"),
    }
}

fn validate_error(src: &str) -> String {
    let err = match parse_table(Path::new("input.table"), src) {
        Ok(records) => panic!("accepted {} records", records.len()),
        Err(err) => err,
    };
    match err.kind() {
        ErrorKind::Validate(msg) => msg.clone(),
        kind => panic!("unexpected error {kind:?}"),
    }
}

#[test]
fn record() {
    let record = parse_record("Add_rm8_r8 add legacy op=00 ops=Eb,Gb allow=xacquire_xrelease_lock")
        .unwrap();
    assert_eq!(record.name, "Add_rm8_r8");
    assert_eq!(record.const_name(), "ADD_RM8_R8");
    assert_eq!(record.mnemonic, "add");
    assert_eq!(record.encoding, EncodingKind::Legacy);
    assert_eq!(record.op_count, 2);
    assert_eq!(layout::word3::OP0.get(record.packed.word3()), 1);
    assert_eq!(layout::word3::OP1.get(record.packed.word3()), 5);
    assert_eq!(layout::word3::OP2.get(record.packed.word3()), 0);

    let record = parse_record("Pfadd pfadd 3dnow op=9E").unwrap();
    assert_eq!(record.op_count, 2);
    assert_eq!(layout::word1::OPCODE.get(record.packed.word1()), 0x9e);
}

#[test]
fn implicit_operand() {
    let msg = record_error("X x legacy op=00 ops=Eb,none,none");
    assert_eq!(msg, "operand kind \"none\" is implicit");
    let msg = record_error("X x evex op=58 ops=none");
    assert_eq!(msg, "operand kind \"none\" is implicit");
}

#[test]
fn unknown_key() {
    assert_eq!(record_error("X x legacy op=00 foo=1"), "unexpected legacy key \"foo\"");
    // keys of another encoding
    assert_eq!(record_error("X x legacy op=00 tuple=Tuple2"), "unexpected legacy key \"tuple\"");
    assert_eq!(record_error("X x vex op=00 os=32"), "unexpected vex key \"os\"");
    assert_eq!(record_error("X x 3dnow op=00 mp=66"), "unexpected 3dnow key \"mp\"");
    assert_eq!(record_error("X x legacy op=00 k1"), "unexpected legacy flag \"k1\"");
}

#[test]
fn unknown_value() {
    assert_eq!(record_error("X x legacy op=00 mp=F4"), "invalid mp value \"F4\"");
    assert_eq!(record_error("X x legacy op=00 table=0F39"), "invalid table value \"0F39\"");
    assert_eq!(record_error("X x xop op=00 table=0F"), "invalid table value \"0F\"");
    assert_eq!(record_error("X x legacy op=00 mode=32"), "invalid mode value \"32\"");
    assert_eq!(record_error("X x vex op=00 w=W2"), "invalid w value \"W2\"");
    assert_eq!(record_error("X x legacy op=00 group=8"), "invalid group value \"8\"");
    assert_eq!(record_error("X x legacy op=10000"), "invalid op value \"10000\"");
    assert_eq!(record_error("X x mvex op=00"), "invalid encoding value \"mvex\"");
}

#[test]
fn operand_slots() {
    assert_eq!(
        record_error("X x legacy op=00 ops=Eb,Gb,Ib,Id,M"),
        "5 operands given, legacy encoding has 4 slots"
    );
    assert!(parse_record("X x vex op=00 ops=VX,HX,WX,Is4X,Ib").is_ok());
    assert_eq!(
        record_error("X x 3dnow op=00 ops=Eb"),
        "3dnow operands are fixed"
    );
}

#[test]
fn foreign_operand_kind() {
    assert_eq!(
        record_error("X x legacy op=00 ops=VY"),
        "operand kind \"VY\" is not a legacy operand kind"
    );
    assert_eq!(
        record_error("X x evex op=00 ops=VZ,Ed"),
        "operand kind \"Ed\" is not a evex operand kind"
    );
}

#[test]
fn malformed_record() {
    assert_eq!(record_error("X x legacy op=00 op=01"), "duplicate key \"op\"");
    assert_eq!(record_error("X x legacy ops=Eb"), "missing opcode");
    assert_eq!(record_error("1x x legacy op=00"), "invalid name \"1x\"");
    assert_eq!(record_error("X x"), "missing encoding");
}

#[test]
fn table_ok() {
    let src = table("# comment\n\nAdd_rm8_r8 add legacy op=00 ops=Eb,Gb # trailing\n");
    let records = parse_table(Path::new("input.table"), &src).unwrap();
    let names: Vec<_> = records.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["INVALID", "Add_rm8_r8", "DeclareByte", "DeclareWord"]);
}

#[test]
fn table_line_numbers() {
    let src = table("\n# comment\nAdd_rm8_r8 add legacy op=00 ops=Eb,VY\n");
    let (line, msg) = parse_error(&src);
    assert_eq!(line, 4);
    assert_eq!(msg, "operand kind \"VY\" is not a legacy operand kind");
}

#[test]
fn duplicate_name() {
    let src = table("Foo foo legacy op=00\nFoo foo legacy op=01\n");
    assert_eq!(parse_error(&src), (3, "duplicate name \"Foo\"".to_owned()));

    // both would be emitted as `FOO`
    let src = table("Foo foo legacy op=00\nFOO foo legacy op=01\n");
    assert_eq!(parse_error(&src), (3, "duplicate name \"FOO\"".to_owned()));
}

#[test]
fn identity_order() {
    let src = format!("Nop nop legacy op=90\nINVALID invalid legacy op=00\n{TAIL}");
    assert_eq!(validate_error(&src), "first record must be INVALID");

    let src = "INVALID invalid legacy op=00\nNop nop legacy op=90\n";
    assert_eq!(validate_error(src), "missing DeclareByte record");

    let src = format!("{}Nop nop legacy op=90\n", table(""));
    assert_eq!(validate_error(&src), "instruction Nop follows DeclareByte");

    assert_eq!(validate_error(""), "first record must be INVALID");
}

#[test]
fn generate() {
    let dir = env::temp_dir().join(format!("opinfo-gen-{}", std::process::id()));
    let source = dir.join("input.table");
    fs::create_dir_all(&dir).unwrap();
    fs::write(&source, table("Add_rm8_r8 add legacy op=00 ops=Eb,Gb\n")).unwrap();

    let records = Table::new(&source, dir.join("out")).generate().unwrap();
    assert_eq!(records.len(), 4);

    let code = fs::read_to_string(dir.join("out/generated_code.rs")).unwrap();
    assert!(code.contains("pub const ADD_RM8_R8: Code = Code(1);"));
    assert!(code.contains("pub(crate) const CODE_COUNT: usize = 4;"));
    let data = fs::read_to_string(dir.join("out/generated_table.rs")).unwrap();
    assert_eq!(data.matches("PackedOpCode::new(").count(), 4);

    let err = Table::new(dir.join("missing.table"), dir.join("out"))
        .generate()
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SourceFile(_)));

    fs::remove_dir_all(&dir).unwrap();
}
