//! Operand-kind index tables, one per encoding.
//!
//! A record only ever indexes the table of its own encoding.

use opinfo_core::enums::{EvexOpKind, LegacyOpKind, VexOpKind, XopOpKind};

use crate::enums::OpCodeOperandKind as K;

#[rustfmt::skip]
static LEGACY: [K; LegacyOpKind::COUNT] = [
    K::None,
    K::R8OrMem,
    K::R16OrMem,
    K::R32OrMem,
    K::R64OrMem,
    K::R8Reg,
    K::R16Reg,
    K::R32Reg,
    K::R64Reg,
    K::R32Opcode,
    K::R64Opcode,
    K::Imm8,
    K::Imm32,
    K::XmmReg,
    K::XmmOrMem,
    K::Mem,
];

#[rustfmt::skip]
static VEX: [K; VexOpKind::COUNT] = [
    K::None,
    K::R32OrMem,
    K::R64OrMem,
    K::R32Reg,
    K::R64Reg,
    K::R32Vvvv,
    K::XmmVvvv,
    K::YmmVvvv,
    K::Imm8,
    K::XmmIs4,
    K::YmmIs4,
    K::Mem,
    K::XmmReg,
    K::YmmReg,
    K::XmmOrMem,
    K::YmmOrMem,
];

#[rustfmt::skip]
static EVEX: [K; EvexOpKind::COUNT] = [
    K::None,
    K::XmmReg,
    K::YmmReg,
    K::ZmmReg,
    K::XmmVvvv,
    K::YmmVvvv,
    K::ZmmVvvv,
    K::XmmOrMem,
    K::YmmOrMem,
    K::ZmmOrMem,
    K::MemVsib32x,
    K::MemVsib32y,
    K::MemVsib32z,
    K::MemVsib64x,
    K::MemVsib64y,
    K::MemVsib64z,
];

#[rustfmt::skip]
static XOP: [K; XopOpKind::COUNT] = [
    K::None,
    K::R32OrMem,
    K::R64OrMem,
    K::R32Reg,
    K::R64Reg,
    K::R32Vvvv,
    K::R64Vvvv,
    K::XmmVvvv,
    K::YmmVvvv,
    K::Imm8,
    K::XmmIs4,
    K::YmmIs4,
    K::XmmReg,
    K::YmmReg,
    K::XmmOrMem,
    K::YmmOrMem,
];

/// Fixed operands of every 3DNow! opcode: `mm, mm/m64`.
pub(crate) const D3NOW: [K; 2] = [K::MmReg, K::MmOrMem];

pub(crate) fn legacy(kind: LegacyOpKind) -> K {
    LEGACY[kind as usize]
}

pub(crate) fn vex(kind: VexOpKind) -> K {
    VEX[kind as usize]
}

pub(crate) fn evex(kind: EvexOpKind) -> K {
    EVEX[kind as usize]
}

pub(crate) fn xop(kind: XopOpKind) -> K {
    XOP[kind as usize]
}
