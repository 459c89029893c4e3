use std::{fmt, str::FromStr};

use bpaf::*;
use opinfo_x86::EncodingKind;

#[derive(Copy, Clone, Debug)]
pub enum Color {
    Off,
    On,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Table,
    Csv,
}

impl fmt::Display for Format {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Format::Table => "table",
            Format::Csv => "csv",
        };
        fmt.write_str(s)
    }
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Format::Table),
            "csv" => Ok(Format::Csv),
            _ => Err("invalid output format"),
        }
    }
}

/// Output column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Code,
    Name,
    Encoding,
    OpCode,
    Instruction,
    Modes,
    Table,
    Prefix,
    Tuple,
    Ops,
}

impl Column {
    pub const DEFAULT: &'static [Column] = &[Column::Name, Column::OpCode, Column::Instruction];

    pub fn title(&self) -> &'static str {
        match self {
            Column::Code => "code",
            Column::Name => "name",
            Column::Encoding => "encoding",
            Column::OpCode => "opcode",
            Column::Instruction => "instruction",
            Column::Modes => "modes",
            Column::Table => "table",
            Column::Prefix => "prefix",
            Column::Tuple => "tuple",
            Column::Ops => "ops",
        }
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "code" => Column::Code,
            "name" => Column::Name,
            "encoding" => Column::Encoding,
            "opcode" => Column::OpCode,
            "instruction" => Column::Instruction,
            "modes" => Column::Modes,
            "table" => Column::Table,
            "prefix" => Column::Prefix,
            "tuple" => Column::Tuple,
            "ops" => Column::Ops,
            _ => return Err(format!("invalid column {s}")),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Cli {
    pub encodings: Vec<EncodingKind>,
    pub mnemonic: Option<String>,
    pub bitness: Option<u32>,
    pub pseudo: bool,
    pub format: Format,
    pub columns: Vec<Column>,
    pub header: bool,
    #[cfg_attr(not(feature = "color"), allow(dead_code))]
    pub color: Color,
    pub names: Vec<String>,
}

/// Bitness accepted by `OpCodeInfo::is_available_in_mode`.
pub fn is_bitness(bits: u32) -> bool {
    matches!(bits, 16 | 32 | 64)
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(|i| i.trim()).filter(|i| !i.is_empty())
}

fn options() -> OptionParser<Cli> {
    let encodings = short('e')
        .long("encoding")
        .help("Only show opcodes of encoding KIND [legacy, vex, evex, xop, 3dnow]")
        .argument::<String>("KIND")
        .many()
        .parse(|v| {
            let mut encodings = Vec::new();
            for s in v.iter().flat_map(|i| split_list(i)) {
                match EncodingKind::from_name(s) {
                    Some(kind) => encodings.push(kind),
                    None => return Err(format!("invalid encoding {s}")),
                }
            }
            Ok(encodings)
        });

    let mnemonic = short('m')
        .long("mnemonic")
        .help("Only show opcodes whose mnemonic contains TEXT")
        .argument::<String>("TEXT")
        .map(|s| s.to_lowercase())
        .optional();

    let bitness = short('b')
        .long("bitness")
        .help("Only show opcodes available in BITS mode [16, 32, 64]")
        .argument::<u32>("BITS")
        .guard(|bits| is_bitness(*bits), "bitness must be 16, 32 or 64")
        .optional();

    let pseudo = long("pseudo")
        .help("Include INVALID and the data-declaration pseudo-ops")
        .switch();

    let format = short('f')
        .long("format")
        .help("Output format [default: table, valid formats: table, csv]")
        .argument::<Format>("FORMAT")
        .fallback(Format::Table);

    let columns = short('c')
        .long("columns")
        .help("Comma separated list of columns [default: name,opcode,instruction, valid columns: code, name, encoding, opcode, instruction, modes, table, prefix, tuple, ops]")
        .argument::<String>("LIST")
        .parse(|s| split_list(&s).map(Column::from_str).collect::<Result<Vec<_>, _>>())
        .fallback(Column::DEFAULT.to_vec());

    let header = long("no-header")
        .help("Do not print the column titles")
        .switch()
        .map(|i| !i);

    #[cfg(feature = "color")]
    let auto_color =
        supports_color::on(supports_color::Stream::Stdout).map_or(Color::Off, |_| Color::On);

    #[cfg(not(feature = "color"))]
    let auto_color = Color::Off;

    let color = long("color")
        .help("Enable or disable color output [default: auto, valid modes: off, on, auto]")
        .argument::<String>("MODE")
        .parse(move |s| match s.as_str() {
            "off" => Ok(Color::Off),
            "on" => Ok(Color::On),
            "auto" => Ok(auto_color),
            _ => Err(format!("invalid color {s}")),
        })
        .fallback(auto_color);

    let names = positional::<String>("NAME")
        .help("Only show the opcodes named NAME, case insensitive")
        .many();

    construct!(Cli {
        encodings,
        mnemonic,
        bitness,
        pseudo,
        format,
        columns,
        header,
        color,
        names,
    })
    .to_options()
    .version(env!("CARGO_PKG_VERSION"))
    .descr("Show encoding metadata of x86/x64 opcode forms")
}

pub fn parse_cli() -> Cli {
    options().run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitness() {
        assert!(is_bitness(16));
        assert!(is_bitness(32));
        assert!(is_bitness(64));
        assert!(!is_bitness(0));
        assert!(!is_bitness(8));
        assert!(!is_bitness(128));
    }

    #[test]
    fn bitness_is_checked_before_filtering() {
        let cli = options().run_inner(&["-m", "zzz", "-b", "64"]).unwrap();
        assert_eq!(cli.bitness, Some(64));
        assert_eq!(cli.mnemonic.as_deref(), Some("zzz"));
        assert!(options().run_inner(&["-m", "zzz", "-b", "8"]).is_err());
    }

    #[test]
    fn columns() {
        assert_eq!("opcode".parse::<Column>(), Ok(Column::OpCode));
        assert!("bytes".parse::<Column>().is_err());
        assert_eq!("csv".parse::<Format>(), Ok(Format::Csv));
    }
}
