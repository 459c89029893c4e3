//! Canonical opcode and instruction syntax.

use core::fmt::{self, Write};

use opinfo_core::enums::EncodingKind;

use crate::{
    enums::{LKind, MandatoryPrefix, OpCodeOperandKind as K, OpCodeTableKind},
    info::OpCodeInfo,
};

/// Space separated output.
struct Words {
    out: String,
}

impl Words {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn push(&mut self, word: impl fmt::Display) {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
        // writing into a `String` never fails
        let _ = write!(self.out, "{word}");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn pseudo_op(info: &OpCodeInfo) -> String {
    format!("<{}>", info.mnemonic())
}

fn has_op(info: &OpCodeInfo, kind: K) -> bool {
    info.op_kinds().contains(&kind)
}

fn op_code_bytes(words: &mut Words, op_code: u32) {
    if op_code > 0xff {
        words.push(format_args!("{:02X}", op_code >> 8));
    }
    words.push(format_args!("{:02X}", op_code & 0xff));
}

fn legacy(info: &OpCodeInfo) -> String {
    let mut words = Words::new();
    if info.fwait() {
        words.push("9B");
    }
    match info.mandatory_prefix() {
        MandatoryPrefix::None => {}
        MandatoryPrefix::PNP => words.push("NP"),
        mp => words.push(mp.name()),
    }
    match info.operand_size() {
        16 => words.push("o16"),
        32 => words.push("o32"),
        64 => words.push("REX.W"),
        _ => {}
    }
    match info.address_size() {
        16 => words.push("a16"),
        32 => words.push("a32"),
        64 => words.push("a64"),
        _ => {}
    }
    match info.table() {
        OpCodeTableKind::T0F => words.push("0F"),
        OpCodeTableKind::T0F38 => words.push("0F 38"),
        OpCodeTableKind::T0F3A => words.push("0F 3A"),
        _ => {}
    }

    let op_code = info.op_code();
    if op_code > 0xff {
        words.push(format_args!("{:02X}", op_code >> 8));
    }
    if has_op(info, K::R32Opcode) {
        words.push(format_args!("{:02X}+rd", op_code & 0xff));
    } else if has_op(info, K::R64Opcode) {
        words.push(format_args!("{:02X}+ro", op_code & 0xff));
    } else {
        words.push(format_args!("{:02X}", op_code & 0xff));
    }

    if info.is_group() {
        words.push(format_args!("/{}", info.group_index()));
    } else if info.op_kinds().iter().any(|i| i.uses_modrm()) {
        words.push("/r");
    }
    for op in info.op_kinds() {
        match op {
            K::Imm8 => words.push("ib"),
            K::Imm32 => words.push("id"),
            _ => {}
        }
    }
    words.finish()
}

fn vector_length(info: &OpCodeInfo) -> String {
    match (info.encoding(), info.lkind()) {
        (EncodingKind::Evex, _) if info.is_lig() => "LIG".to_owned(),
        (EncodingKind::Evex, _) => format!("{}", 128 << info.l()),
        (_, LKind::None) => "LIG".to_owned(),
        (_, LKind::LZ) => "LZ".to_owned(),
        (_, LKind::L0) => format!("L{}", info.l()),
        (_, LKind::L128) => format!("{}", 128 << info.l()),
    }
}

fn w_bit(info: &OpCodeInfo) -> String {
    if info.is_wig() {
        "WIG".to_owned()
    } else {
        // WIG32 opcodes are shown with the value used outside of 64-bit mode
        format!("W{}", info.w())
    }
}

fn vector(info: &OpCodeInfo) -> String {
    let mut header = String::from(match info.encoding() {
        EncodingKind::Vex => "VEX",
        EncodingKind::Evex => "EVEX",
        _ => "XOP",
    });
    let _ = write!(header, ".{}", vector_length(info));
    match info.mandatory_prefix() {
        MandatoryPrefix::None | MandatoryPrefix::PNP => {}
        mp => {
            let _ = write!(header, ".{}", mp.name());
        }
    }
    let table = match info.table() {
        OpCodeTableKind::T0F => "0F",
        OpCodeTableKind::T0F38 => "0F38",
        OpCodeTableKind::T0F3A => "0F3A",
        OpCodeTableKind::Xop8 => "X8",
        OpCodeTableKind::Xop9 => "X9",
        OpCodeTableKind::XopA => "XA",
        OpCodeTableKind::Normal => "",
    };
    let _ = write!(header, ".{}.{}", table, w_bit(info));

    let mut words = Words::new();
    words.push(header);
    op_code_bytes(&mut words, info.op_code());

    let ops = info.op_kinds();
    let vsib = info.encoding() == EncodingKind::Evex && ops.iter().any(|i| i.is_vsib());
    if info.is_group() {
        words.push(format_args!("/{}", info.group_index()));
    }
    if vsib {
        words.push("/vsib");
    } else if !info.is_group() && ops.iter().any(|i| i.uses_modrm()) {
        words.push("/r");
    }
    if ops.iter().any(|i| matches!(i, K::XmmIs4 | K::YmmIs4)) {
        words.push("/is4");
    }
    if ops.contains(&K::Imm8) {
        words.push("ib");
    }
    words.finish()
}

fn d3now(info: &OpCodeInfo) -> String {
    format!("0F 0F /r {:02X}", info.op_code())
}

/// Opcode syntax of `info`, all other fields must be resolved.
pub(crate) fn op_code_string(info: &OpCodeInfo) -> String {
    if !info.is_instruction() {
        return pseudo_op(info);
    }
    match info.encoding() {
        EncodingKind::Legacy => legacy(info),
        EncodingKind::Vex | EncodingKind::Evex | EncodingKind::Xop => vector(info),
        EncodingKind::D3now => d3now(info),
    }
}

fn operand(op: K, reg: &mut u32) -> String {
    let mut vec = |class: &str, mem: &str| {
        *reg += 1;
        format!("{class}{reg}{mem}")
    };
    let s = match op {
        K::None => "",
        K::R8OrMem => "r/m8",
        K::R16OrMem => "r/m16",
        K::R32OrMem => "r/m32",
        K::R64OrMem => "r/m64",
        K::R8Reg => "r8",
        K::R16Reg => "r16",
        K::R32Reg | K::R32Opcode | K::R32Vvvv => "r32",
        K::R64Reg | K::R64Opcode | K::R64Vvvv => "r64",
        K::Imm8 => "imm8",
        K::Imm32 => "imm32",
        K::Mem => "m",
        K::MmReg => return vec("mm", ""),
        K::MmOrMem => return vec("mm", "/m64"),
        K::XmmReg | K::XmmVvvv | K::XmmIs4 => return vec("xmm", ""),
        K::YmmReg | K::YmmVvvv | K::YmmIs4 => return vec("ymm", ""),
        K::ZmmReg | K::ZmmVvvv => return vec("zmm", ""),
        K::XmmOrMem => return vec("xmm", "/m128"),
        K::YmmOrMem => return vec("ymm", "/m256"),
        K::ZmmOrMem => return vec("zmm", "/m512"),
        K::MemVsib32x => "vm32x",
        K::MemVsib32y => "vm32y",
        K::MemVsib32z => "vm32z",
        K::MemVsib64x => "vm64x",
        K::MemVsib64y => "vm64y",
        K::MemVsib64z => "vm64z",
    };
    s.to_owned()
}

/// Instruction syntax of `info`, all other fields must be resolved.
pub(crate) fn instruction_string(info: &OpCodeInfo) -> String {
    if !info.is_instruction() {
        return pseudo_op(info);
    }

    let mut reg = 0;
    let mut ops: Vec<String> = info
        .op_kinds()
        .iter()
        .map(|&op| operand(op, &mut reg))
        .collect();

    if info.encoding() == EncodingKind::Evex {
        if let Some(first) = ops.first_mut() {
            if info.can_use_op_mask_register() {
                first.push_str(" {k1}");
            }
            if info.can_use_zeroing_masking() {
                first.push_str("{z}");
            }
        }
        if info.can_broadcast() {
            let last_mem = info.op_kinds().iter().rposition(|i| {
                matches!(i, K::XmmOrMem | K::YmmOrMem | K::ZmmOrMem)
            });
            if let Some(i) = last_mem {
                let _ = write!(ops[i], "/m{}bcst", 32 << info.w());
            }
        }
        if let Some(last) = ops.last_mut() {
            if info.can_use_rounding_control() {
                last.push_str("{er}");
            } else if info.can_suppress_all_exceptions() {
                last.push_str("{sae}");
            }
        }
    }

    let mnemonic = info.mnemonic().to_uppercase();
    if ops.is_empty() {
        mnemonic
    } else {
        format!("{} {}", mnemonic, ops.join(", "))
    }
}
