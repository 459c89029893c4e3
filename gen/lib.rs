use std::{
    collections::HashSet,
    fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use opinfo_core::{
    enums::*,
    flags::Field,
    layout::{self, Common},
    PackedOpCode,
};

/// First identity, the invalid instruction.
pub const INVALID_NAME: &str = "INVALID";
/// First data-declaration pseudo-op, every later identity is one too.
pub const DECLARE_BYTE_NAME: &str = "DeclareByte";

#[derive(Debug)]
pub enum ErrorKind {
    SourceFile(io::Error),
    OutputDir(io::Error),
    OutputFile(io::Error),
    Parse(usize, String),
    Validate(String),
    Generate(io::Error),
}

#[derive(Debug)]
pub struct Error {
    path: PathBuf,
    kind: ErrorKind,
}

impl Error {
    fn new<S: Into<PathBuf>>(path: S, kind: ErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use ErrorKind as E;

        let path = self.path.display();
        match &self.kind {
            E::SourceFile(error) => {
                write!(fmt, "failed to read source file \"{path}\", {error}")
            }
            E::OutputDir(error) => {
                write!(fmt, "failed to create output directory \"{path}\", {error}")
            }
            E::OutputFile(error) => {
                write!(fmt, "failed to create output file \"{path}\", {error}")
            }
            E::Parse(line, msg) => write!(fmt, "error: {msg}, {path}:{line}"),
            E::Validate(msg) => write!(fmt, "error: {msg}, {path}"),
            E::Generate(error) => {
                write!(fmt, "failed to generate output file \"{path}\", {error}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// One opcode form of the table, packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub mnemonic: String,
    pub encoding: EncodingKind,
    pub op_count: u8,
    pub packed: PackedOpCode,
}

impl Record {
    /// Name of the identity constant, e.g. `EVEX_VPGATHERDD_XMM_K1_VM32X`.
    pub fn const_name(&self) -> String {
        self.name.to_uppercase()
    }
}

fn parse_value<T>(key: &str, value: &str, from: fn(&str) -> Option<T>) -> Result<T, String> {
    from(value).ok_or_else(|| format!("invalid {key} value \"{value}\""))
}

fn parse_hex(key: &str, value: &str, max: u32) -> Result<u32, String> {
    match u32::from_str_radix(value, 16) {
        Ok(i) if i <= max => Ok(i),
        _ => Err(format!("invalid {key} value \"{value}\"")),
    }
}

struct Builder {
    encoding: EncodingKind,
    common: Option<Common>,
    word1: u32,
    word2: u32,
    word3: u32,
    op_count: u8,
    has_opcode: bool,
    keys: Vec<String>,
}

impl Builder {
    fn new(encoding: EncodingKind) -> Self {
        let mut word2 = 0;
        match encoding {
            EncodingKind::Vex => {
                word2 = layout::vex::VECTOR_LENGTH.set(word2, VexVectorLength::L128.raw());
            }
            EncodingKind::Xop => {
                word2 = layout::xop::VECTOR_LENGTH.set(word2, XopVectorLength::L128.raw());
            }
            _ => {}
        }
        let op_count = match encoding {
            EncodingKind::D3now => 2,
            _ => 0,
        };
        Self {
            encoding,
            common: Common::of(encoding),
            word1: layout::word1::ENCODING.set(0, encoding.raw()),
            word2,
            word3: 0,
            op_count,
            has_opcode: false,
            keys: Vec::new(),
        }
    }

    fn set2(&mut self, field: Field, value: u32) {
        self.word2 = field.set(self.word2, value);
    }

    fn set_ops(&mut self, value: &str) -> Result<(), String> {
        if self.encoding == EncodingKind::D3now {
            return Err("3dnow operands are fixed".to_owned());
        }
        let names: Vec<&str> = value.split(',').filter(|i| !i.is_empty()).collect();
        if names.len() > self.encoding.op_slots() {
            return Err(format!(
                "{} operands given, {} encoding has {} slots",
                names.len(),
                self.encoding,
                self.encoding.op_slots()
            ));
        }
        for (i, name) in names.iter().enumerate() {
            let index = self.encoding.op_kind_index(name).ok_or_else(|| {
                format!("operand kind \"{name}\" is not a {} operand kind", self.encoding)
            })?;
            // unused slots are `none`, a listed operand must fill its slot
            if index == 0 {
                return Err(format!("operand kind \"{name}\" is implicit"));
            }
            self.word3 = layout::word3::OPS[i].set(self.word3, index);
        }
        self.op_count = names.len() as u8;
        Ok(())
    }

    fn set_table(&mut self, field: Field, value: &str) -> Result<(), String> {
        let raw = match self.encoding {
            EncodingKind::Legacy => LegacyOpCodeTable::from_name(value).map(LegacyOpCodeTable::raw),
            EncodingKind::Vex => VexOpCodeTable::from_name(value).map(VexOpCodeTable::raw),
            EncodingKind::Evex => EvexOpCodeTable::from_name(value).map(EvexOpCodeTable::raw),
            EncodingKind::Xop => XopOpCodeTable::from_name(value).map(XopOpCodeTable::raw),
            EncodingKind::D3now => None,
        };
        let raw = raw.ok_or_else(|| format!("invalid table value \"{value}\""))?;
        self.set2(field, raw);
        Ok(())
    }

    fn set_flag(&mut self, key: &str) -> Result<(), String> {
        use layout::{evex, legacy};
        use EncodingKind as E;

        let field = match (self.encoding, key) {
            (E::Legacy, "np") => legacy::HAS_MANDATORY_PREFIX,
            (E::Legacy, "fwait") => legacy::FWAIT,
            (E::Evex, "lig") => evex::LIG,
            (E::Evex, "b") => evex::BROADCAST,
            (E::Evex, "er") => evex::ROUNDING_CONTROL,
            (E::Evex, "sae") => evex::SAE,
            (E::Evex, "k1") => evex::OPMASK,
            (E::Evex, "z") => evex::ZEROING,
            _ => return Err(format!("unexpected {} flag \"{key}\"", self.encoding)),
        };
        self.set2(field, 1);
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        use layout::{d3now, evex, legacy, vex, xop};
        use EncodingKind as E;

        match (self.encoding, key, self.common) {
            (_, "op", _) => {
                let opcode = parse_hex(key, value, layout::word1::OPCODE.max())?;
                self.word1 = layout::word1::OPCODE.set(self.word1, opcode);
                self.has_opcode = true;
            }
            (_, "ops", _) => self.set_ops(value)?,
            (E::D3now, "mode", _) => {
                let mode = parse_value(key, value, Encodable::from_name)?;
                self.set2(d3now::ENCODABLE, mode.raw());
            }
            (_, "mode", Some(common)) => {
                let mode = parse_value(key, value, Encodable::from_name)?;
                self.set2(common.encodable, mode.raw());
            }
            (_, "mp", Some(common)) => {
                let mp = parse_value(key, value, MandatoryPrefixByte::from_name)?;
                self.set2(common.mandatory_prefix_byte, mp.raw());
            }
            (_, "table", Some(common)) => self.set_table(common.table, value)?,
            (_, "group", Some(common)) => {
                let group = parse_hex(key, value, common.group.max())?;
                self.set2(common.has_group_index, 1);
                self.set2(common.group, group);
            }
            (E::Legacy, "allow", _) => {
                let allow = parse_value(key, value, AllowedPrefixes::from_name)?;
                self.set2(legacy::ALLOWED_PREFIXES, allow.raw());
            }
            (E::Legacy, "os", _) => {
                let size = parse_value(key, value, OperandSize::from_name)?;
                self.set2(legacy::OPERAND_SIZE, size.raw());
            }
            (E::Legacy, "as", _) => {
                let size = parse_value(key, value, AddressSize::from_name)?;
                self.set2(legacy::ADDRESS_SIZE, size.raw());
            }
            (E::Vex, "l", _) => {
                let l = parse_value(key, value, VexVectorLength::from_name)?;
                self.set2(vex::VECTOR_LENGTH, l.raw());
            }
            (E::Xop, "l", _) => {
                let l = parse_value(key, value, XopVectorLength::from_name)?;
                self.set2(xop::VECTOR_LENGTH, l.raw());
            }
            (E::Vex | E::Evex | E::Xop, "w", _) => {
                let w = parse_value(key, value, WBit::from_name)?;
                let field = match self.encoding {
                    E::Vex => vex::W,
                    E::Evex => evex::W,
                    _ => xop::W,
                };
                self.set2(field, w.raw());
            }
            (E::Evex, "tuple", _) => {
                let tuple = parse_value(key, value, TupleType::from_name)?;
                self.set2(evex::TUPLE_TYPE, tuple.raw());
            }
            (E::Evex, "ll", _) => {
                let ll = parse_hex(key, value, evex::VECTOR_LENGTH.max())?;
                self.set2(evex::VECTOR_LENGTH, ll);
            }
            _ => return Err(format!("unexpected {} key \"{key}\"", self.encoding)),
        }
        Ok(())
    }

    fn token(&mut self, token: &str) -> Result<(), String> {
        let key = token.split_once('=').map_or(token, |(key, _)| key);
        if self.keys.iter().any(|i| i == key) {
            return Err(format!("duplicate key \"{key}\""));
        }
        self.keys.push(key.to_owned());

        match token.split_once('=') {
            Some((key, value)) => self.set(key, value),
            None => self.set_flag(key),
        }
    }

    fn finish(self) -> Result<(PackedOpCode, u8), String> {
        if !self.has_opcode {
            return Err("missing opcode".to_owned());
        }
        let packed = PackedOpCode::new(self.word1, self.word2, self.word3);
        Ok((packed, self.op_count))
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses one table line, `NAME MNEMONIC ENCODING key=value... flag...`.
pub fn parse_record(line: &str) -> Result<Record, String> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or("missing name")?;
    if !is_ident(name) {
        return Err(format!("invalid name \"{name}\""));
    }
    let mnemonic = tokens.next().ok_or("missing mnemonic")?;
    let encoding = tokens.next().ok_or("missing encoding")?;
    let encoding = parse_value("encoding", encoding, EncodingKind::from_name)?;

    let mut builder = Builder::new(encoding);
    for token in tokens {
        builder.token(token)?;
    }
    let (packed, op_count) = builder.finish()?;

    Ok(Record {
        name: name.to_owned(),
        mnemonic: mnemonic.to_owned(),
        encoding,
        op_count,
        packed,
    })
}

/// Parses a whole table, checking the identity order requirements.
pub fn parse_table(path: &Path, src: &str) -> Result<Vec<Record>, Error> {
    let mut records = Vec::new();
    let mut names = HashSet::new();
    for (i, line) in src.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(line, _)| line).trim();
        if line.is_empty() {
            continue;
        }
        let record =
            parse_record(line).map_err(|msg| Error::new(path, ErrorKind::Parse(i + 1, msg)))?;
        // constants are emitted upper-cased
        if !names.insert(record.const_name()) {
            let msg = format!("duplicate name \"{}\"", record.name);
            return Err(Error::new(path, ErrorKind::Parse(i + 1, msg)));
        }
        records.push(record);
    }

    let validate = |msg: String| Err(Error::new(path, ErrorKind::Validate(msg)));
    match records.first() {
        Some(first) if first.name == INVALID_NAME => {}
        _ => return validate(format!("first record must be {INVALID_NAME}")),
    }
    let declare = match records.iter().position(|i| i.name == DECLARE_BYTE_NAME) {
        Some(i) => i,
        None => return validate(format!("missing {DECLARE_BYTE_NAME} record")),
    };
    if let Some(record) = records[declare..].iter().find(|i| !i.name.starts_with("Declare")) {
        return validate(format!(
            "instruction {} follows {DECLARE_BYTE_NAME}",
            record.name
        ));
    }
    if records.len() > u16::MAX as usize {
        return validate(format!("too many records ({})", records.len()));
    }

    Ok(records)
}

fn create_file(path: &Path) -> Result<File, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| Error::new(parent, ErrorKind::OutputDir(error)))?;
    }
    File::create(path).map_err(|error| Error::new(path, ErrorKind::OutputFile(error)))
}

fn gen_code<W: Write>(mut out: W, records: &[Record]) -> io::Result<()> {
    let out = &mut out;
    writeln!(out, "// generated from the opcode table, do not edit")?;
    writeln!(out)?;
    for (i, record) in records.iter().enumerate() {
        writeln!(out, "pub const {}: Code = Code({i});", record.const_name())?;
    }

    writeln!(out)?;
    writeln!(out, "pub(crate) const CODE_COUNT: usize = {};", records.len())?;

    writeln!(out)?;
    writeln!(out, "pub(crate) static NAMES: [&str; CODE_COUNT] = [")?;
    for record in records {
        writeln!(out, "    {:?},", record.name)?;
    }
    writeln!(out, "];")?;

    writeln!(out)?;
    writeln!(out, "pub(crate) static MNEMONICS: [&str; CODE_COUNT] = [")?;
    for record in records {
        writeln!(out, "    {:?},", record.mnemonic)?;
    }
    writeln!(out, "];")?;

    writeln!(out)?;
    writeln!(out, "pub(crate) static OP_COUNTS: [u8; CODE_COUNT] = [")?;
    for record in records {
        writeln!(out, "    {}, // {}", record.op_count, record.name)?;
    }
    writeln!(out, "];")?;
    out.flush()
}

fn gen_table<W: Write>(mut out: W, records: &[Record]) -> io::Result<()> {
    let out = &mut out;
    writeln!(out, "// generated from the opcode table, do not edit")?;
    writeln!(out)?;
    writeln!(
        out,
        "pub(crate) static OP_CODE_DATA: [PackedOpCode; code::CODE_COUNT] = ["
    )?;
    for record in records {
        let [w1, w2, w3] = record.packed.words;
        writeln!(
            out,
            "    PackedOpCode::new(0x{w1:08x}, 0x{w2:08x}, 0x{w3:08x}), // {}",
            record.name
        )?;
    }
    writeln!(out, "];")?;
    out.flush()
}

pub struct Table {
    source: PathBuf,
    code_output: PathBuf,
    table_output: PathBuf,
}

impl Table {
    pub fn new(source: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Self {
        let out_dir = out_dir.as_ref();
        Self {
            source: source.as_ref().into(),
            code_output: out_dir.join("generated_code.rs"),
            table_output: out_dir.join("generated_table.rs"),
        }
    }

    pub fn generate(self) -> Result<Vec<Record>, Error> {
        let source = &self.source;

        println!("cargo:rerun-if-changed={}", source.display());

        let src = fs::read_to_string(source)
            .map_err(|error| Error::new(source, ErrorKind::SourceFile(error)))?;
        let records = parse_table(source, &src)?;

        let out = create_file(&self.code_output).map(BufWriter::new)?;
        gen_code(out, &records)
            .map_err(|error| Error::new(&self.code_output, ErrorKind::Generate(error)))?;

        let out = create_file(&self.table_output).map(BufWriter::new)?;
        gen_table(out, &records)
            .map_err(|error| Error::new(&self.table_output, ErrorKind::Generate(error)))?;

        Ok(records)
    }
}
