#[macro_use]
extern crate log;

mod cli;

use std::{
    error::Error,
    io::{self, BufWriter, Write},
};

use opinfo_x86::{op_code_infos, OpCodeInfo};

#[cfg(feature = "color")]
use crate::cli::Color;

use crate::cli::{Cli, Column, Format};

fn modes(info: &OpCodeInfo) -> String {
    let mut out = Vec::new();
    for (bits, on) in [(16, info.mode16()), (32, info.mode32()), (64, info.mode64())] {
        if on {
            out.push(bits.to_string());
        }
    }
    out.join("/")
}

fn prefixes(info: &OpCodeInfo) -> String {
    let list = [
        ("lock", info.can_use_lock_prefix()),
        ("xacquire", info.can_use_xacquire_prefix()),
        ("xrelease", info.can_use_xrelease_prefix()),
        ("rep", info.can_use_rep_prefix()),
        ("repne", info.can_use_repne_prefix()),
        ("bnd", info.can_use_bnd_prefix()),
        ("ht", info.can_use_hint_taken_prefix()),
        ("notrack", info.can_use_notrack_prefix()),
    ];
    let out: Vec<_> = list.iter().filter(|i| i.1).map(|i| i.0).collect();
    out.join(" ")
}

fn value(info: &OpCodeInfo, column: Column) -> String {
    match column {
        Column::Code => info.code().value().to_string(),
        Column::Name => info.code().name().to_owned(),
        Column::Encoding => info.encoding().to_string(),
        Column::OpCode => info.op_code_string().to_owned(),
        Column::Instruction => info.instruction_string().to_owned(),
        Column::Modes => modes(info),
        Column::Table => info.table().to_string(),
        Column::Prefix => prefixes(info),
        Column::Tuple => info.tuple_type().to_string(),
        Column::Ops => {
            let ops: Vec<_> = info.op_kinds().iter().map(|i| i.name()).collect();
            ops.join(" ")
        }
    }
}

struct Printer<'a> {
    cli: &'a Cli,
    rows: Vec<Vec<String>>,
}

impl<'a> Printer<'a> {
    fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, info: &OpCodeInfo) {
        let row = self.cli.columns.iter().map(|&c| value(info, c)).collect();
        self.rows.push(row);
    }

    #[cfg(feature = "color")]
    fn print_styled(&self, out: &mut dyn Write, column: Column, s: &str) -> io::Result<()> {
        use owo_colors::OwoColorize;

        match self.cli.color {
            Color::Off => write!(out, "{s}"),
            Color::On => match column {
                Column::Name => write!(out, "{}", s.yellow()),
                Column::OpCode => write!(out, "{}", s.blue()),
                Column::Instruction => write!(out, "{}", s.green()),
                Column::Encoding | Column::Table => write!(out, "{}", s.magenta()),
                _ => write!(out, "{s}"),
            },
        }
    }

    #[cfg(not(feature = "color"))]
    fn print_styled(&self, out: &mut dyn Write, _: Column, s: &str) -> io::Result<()> {
        write!(out, "{s}")
    }

    fn print_table(&self, out: &mut dyn Write) -> io::Result<()> {
        let columns = &self.cli.columns;
        let mut width: Vec<usize> = if self.cli.header {
            columns.iter().map(|i| i.title().len()).collect()
        } else {
            vec![0; columns.len()]
        };
        for row in &self.rows {
            for (w, s) in width.iter_mut().zip(row) {
                *w = (*w).max(s.len());
            }
        }

        if self.cli.header {
            let last = columns.len().saturating_sub(1);
            for (i, column) in columns.iter().enumerate() {
                if i == last {
                    write!(out, "{}", column.title())?;
                } else {
                    write!(out, "{:w$}  ", column.title(), w = width[i])?;
                }
            }
            writeln!(out)?;
        }

        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            for (i, s) in row.iter().enumerate() {
                // pad outside of the escape sequences
                self.print_styled(out, columns[i], s)?;
                if i != last {
                    write!(out, "{:w$}", "", w = width[i] - s.len() + 2)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn print_csv(&self, out: &mut dyn Write) -> io::Result<()> {
        fn field(s: &str) -> String {
            if s.contains([',', '"']) {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.to_owned()
            }
        }

        if self.cli.header {
            let titles: Vec<_> = self.cli.columns.iter().map(|i| i.title()).collect();
            writeln!(out, "{}", titles.join(","))?;
        }
        for row in &self.rows {
            let fields: Vec<_> = row.iter().map(|i| field(i)).collect();
            writeln!(out, "{}", fields.join(","))?;
        }
        Ok(())
    }
}

fn is_selected(cli: &Cli, info: &OpCodeInfo) -> Result<bool, Box<dyn Error>> {
    if !cli.pseudo && !info.is_instruction() {
        return Ok(false);
    }
    if !cli.encodings.is_empty() && !cli.encodings.contains(&info.encoding()) {
        return Ok(false);
    }
    if let Some(mnemonic) = &cli.mnemonic {
        if !info.mnemonic().contains(mnemonic.as_str()) {
            return Ok(false);
        }
    }
    if let Some(bitness) = cli.bitness {
        if !info.is_available_in_mode(bitness)? {
            return Ok(false);
        }
    }
    if !cli.names.is_empty() {
        let name = info.code().name();
        if !cli.names.iter().any(|i| i.eq_ignore_ascii_case(name)) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = cli::parse_cli();
    debug!("{cli:?}");

    let infos = op_code_infos();
    let mut printer = Printer::new(&cli);
    for info in infos {
        if is_selected(&cli, info)? {
            printer.push(info);
        }
    }
    info!("{} of {} opcodes selected", printer.rows.len(), infos.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cli.format {
        Format::Table => printer.print_table(&mut out)?,
        Format::Csv => printer.print_csv(&mut out)?,
    }
    out.flush()?;
    Ok(())
}
