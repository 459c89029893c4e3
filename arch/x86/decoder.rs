//! Opcode-record resolver.

use opinfo_core::{enums::*, error::ConfigError, PackedOpCode};

use crate::{
    enums::{LKind, MandatoryPrefix, OpCodeTableKind},
    info::{flags, OpCodeInfo},
    non_zero_opmask::requires_non_zero_op_mask,
    op_kinds,
    printer,
    raw::{D3nowFields, EvexFields, LegacyFields, RawOpCode, VexFields, XopFields},
    Code,
};

fn mode_flags(encodable: Encodable) -> u32 {
    match encodable {
        Encodable::Any => flags::ALL_MODES,
        Encodable::Only1632 => flags::MODE16 | flags::MODE32,
        Encodable::Only64 => flags::MODE64,
    }
}

fn prefix_flags(allowed: AllowedPrefixes) -> u32 {
    match allowed {
        AllowedPrefixes::None => 0,
        AllowedPrefixes::Bnd => flags::BND,
        AllowedPrefixes::BndNotrack => flags::BND | flags::NOTRACK,
        AllowedPrefixes::HintTakenBnd => flags::HINT_TAKEN | flags::BND,
        AllowedPrefixes::Lock => flags::LOCK,
        AllowedPrefixes::Rep => flags::REP,
        AllowedPrefixes::RepRepne => flags::REP | flags::REPNE,
        AllowedPrefixes::XacquireXreleaseLock => flags::XACQUIRE | flags::XRELEASE | flags::LOCK,
        AllowedPrefixes::Xrelease => flags::XRELEASE,
    }
}

fn w_flags(w: WBit) -> u32 {
    match w {
        WBit::W0 => 0,
        WBit::W1 => flags::W,
        WBit::WIG => flags::WIG,
        WBit::WIG32 => flags::WIG32,
    }
}

// VEX, EVEX and XOP always have a prefix byte, no byte is shown as `NP`.
fn vector_prefix(mp: MandatoryPrefixByte) -> MandatoryPrefix {
    match mp {
        MandatoryPrefixByte::None => MandatoryPrefix::PNP,
        MandatoryPrefixByte::P66 => MandatoryPrefix::P66,
        MandatoryPrefixByte::PF3 => MandatoryPrefix::PF3,
        MandatoryPrefixByte::PF2 => MandatoryPrefix::PF2,
    }
}

fn group_index(group: Option<u8>) -> i8 {
    group.map_or(-1, |i| i as i8)
}

impl OpCodeInfo {
    fn set_modes(&mut self, encodable: Encodable) {
        // pseudo-ops are accepted in every mode
        let modes = if self.is_instruction() {
            mode_flags(encodable)
        } else {
            flags::ALL_MODES
        };
        self.flags.set(modes);
    }

    fn resolve_legacy(&mut self, raw: LegacyFields) {
        for (op, kind) in self.op_kinds.iter_mut().zip(raw.ops) {
            *op = op_kinds::legacy(kind);
        }

        self.mandatory_prefix = match raw.mandatory_prefix {
            MandatoryPrefixByte::None if raw.has_mandatory_prefix => MandatoryPrefix::PNP,
            MandatoryPrefixByte::None => MandatoryPrefix::None,
            MandatoryPrefixByte::P66 => MandatoryPrefix::P66,
            MandatoryPrefixByte::PF3 => MandatoryPrefix::PF3,
            MandatoryPrefixByte::PF2 => MandatoryPrefix::PF2,
        };
        self.table = match raw.table {
            LegacyOpCodeTable::Normal => OpCodeTableKind::Normal,
            LegacyOpCodeTable::Table0F => OpCodeTableKind::T0F,
            LegacyOpCodeTable::Table0F38 => OpCodeTableKind::T0F38,
            LegacyOpCodeTable::Table0F3A => OpCodeTableKind::T0F3A,
        };
        self.group_index = group_index(raw.group);
        self.set_modes(raw.encodable);
        self.flags
            .set(prefix_flags(raw.allowed_prefixes))
            .set_if(flags::FWAIT, raw.fwait);
        self.operand_size = raw.operand_size.bits();
        self.address_size = raw.address_size.bits();
    }

    fn resolve_vex(&mut self, raw: VexFields) {
        for (op, kind) in self.op_kinds.iter_mut().zip(raw.ops) {
            *op = op_kinds::vex(kind);
        }

        self.mandatory_prefix = vector_prefix(raw.mandatory_prefix);
        self.table = match raw.table {
            VexOpCodeTable::Table0F => OpCodeTableKind::T0F,
            VexOpCodeTable::Table0F38 => OpCodeTableKind::T0F38,
            VexOpCodeTable::Table0F3A => OpCodeTableKind::T0F3A,
        };
        self.group_index = group_index(raw.group);
        self.set_modes(raw.encodable);

        let (lkind, l) = match raw.vector_length {
            VexVectorLength::LZ => (LKind::LZ, 0),
            VexVectorLength::L0 => (LKind::L0, 0),
            VexVectorLength::L1 => (LKind::L0, 1),
            VexVectorLength::L128 => (LKind::L128, 0),
            VexVectorLength::L256 => (LKind::L128, 1),
            VexVectorLength::LIG => (LKind::None, 0),
        };
        self.lkind = lkind;
        self.l = l;
        self.flags
            .set_if(flags::LIG, raw.vector_length == VexVectorLength::LIG)
            .set(w_flags(raw.w));
    }

    fn resolve_evex(&mut self, raw: EvexFields) {
        for (op, kind) in self.op_kinds.iter_mut().zip(raw.ops) {
            *op = op_kinds::evex(kind);
        }

        self.mandatory_prefix = vector_prefix(raw.mandatory_prefix);
        self.table = match raw.table {
            EvexOpCodeTable::Table0F => OpCodeTableKind::T0F,
            EvexOpCodeTable::Table0F38 => OpCodeTableKind::T0F38,
            EvexOpCodeTable::Table0F3A => OpCodeTableKind::T0F3A,
        };
        self.group_index = group_index(raw.group);
        self.tuple_type = raw.tuple_type;
        self.set_modes(raw.encodable);

        // `L'L` is kept raw, it holds the rounding mode when `{er}` is used
        self.l = raw.ll;
        self.lkind = LKind::L128;
        self.flags
            .set(w_flags(raw.w))
            .set_if(flags::LIG, raw.lig)
            .set_if(flags::BROADCAST, raw.broadcast)
            .set_if(flags::ROUNDING_CONTROL, raw.rounding_control)
            .set_if(flags::SUPPRESS_ALL_EXCEPTIONS, raw.sae)
            .set_if(flags::OP_MASK_REGISTER, raw.opmask)
            .set_if(flags::ZEROING_MASKING, raw.zeroing)
            .set_if(
                flags::NON_ZERO_OP_MASK_REGISTER,
                requires_non_zero_op_mask(self.code),
            );
    }

    fn resolve_xop(&mut self, raw: XopFields) {
        for (op, kind) in self.op_kinds.iter_mut().zip(raw.ops) {
            *op = op_kinds::xop(kind);
        }

        self.mandatory_prefix = vector_prefix(raw.mandatory_prefix);
        self.table = match raw.table {
            XopOpCodeTable::Xop8 => OpCodeTableKind::Xop8,
            XopOpCodeTable::Xop9 => OpCodeTableKind::Xop9,
            XopOpCodeTable::XopA => OpCodeTableKind::XopA,
        };
        self.group_index = group_index(raw.group);
        self.set_modes(raw.encodable);

        let (lkind, l) = match raw.vector_length {
            XopVectorLength::L128 => (LKind::L128, 0),
            XopVectorLength::L256 => (LKind::L128, 1),
            XopVectorLength::L0 => (LKind::L0, 0),
            XopVectorLength::L1 => (LKind::L0, 1),
        };
        self.lkind = lkind;
        self.l = l;
        self.flags.set(w_flags(raw.w));
    }

    fn resolve_d3now(&mut self, raw: D3nowFields) {
        self.op_kinds[..op_kinds::D3NOW.len()].copy_from_slice(&op_kinds::D3NOW);
        self.mandatory_prefix = MandatoryPrefix::None;
        self.table = OpCodeTableKind::T0F;
        self.group_index = -1;
        self.set_modes(raw.encodable);
    }
}

/// Resolves the packed record of `code`.
///
/// Fails if any sub-field holds a value outside of its enumeration.
pub fn decode(code: Code, packed: &PackedOpCode) -> Result<OpCodeInfo, ConfigError> {
    let (op_code, raw) = RawOpCode::parse(code.value(), code.is_instruction(), packed)?;
    let mut info = OpCodeInfo::new(code, op_code, raw.encoding());
    match raw {
        RawOpCode::Legacy(raw) => info.resolve_legacy(raw),
        RawOpCode::Vex(raw) => info.resolve_vex(raw),
        RawOpCode::Evex(raw) => info.resolve_evex(raw),
        RawOpCode::Xop(raw) => info.resolve_xop(raw),
        RawOpCode::D3now(raw) => info.resolve_d3now(raw),
    }
    info.op_code_string = printer::op_code_string(&info);
    info.instruction_string = printer::instruction_string(&info);
    Ok(info)
}
