use core::fmt;

use opinfo_core::{
    enums::{EncodingKind, TupleType},
    error::UsageError,
    flags::Flags,
    MAX_OP_COUNT,
};

use crate::{
    enums::{LKind, MandatoryPrefix, OpCodeOperandKind, OpCodeTableKind},
    Code,
};

pub(crate) mod flags {
    pub const MODE16: u32 = 1 << 0;
    pub const MODE32: u32 = 1 << 1;
    pub const MODE64: u32 = 1 << 2;
    pub const FWAIT: u32 = 1 << 3;
    pub const LIG: u32 = 1 << 4;
    pub const WIG: u32 = 1 << 5;
    pub const WIG32: u32 = 1 << 6;
    pub const W: u32 = 1 << 7;
    pub const BROADCAST: u32 = 1 << 8;
    pub const ROUNDING_CONTROL: u32 = 1 << 9;
    pub const SUPPRESS_ALL_EXCEPTIONS: u32 = 1 << 10;
    pub const OP_MASK_REGISTER: u32 = 1 << 11;
    pub const ZEROING_MASKING: u32 = 1 << 12;
    pub const LOCK: u32 = 1 << 13;
    pub const XACQUIRE: u32 = 1 << 14;
    pub const XRELEASE: u32 = 1 << 15;
    pub const REP: u32 = 1 << 16;
    pub const REPNE: u32 = 1 << 17;
    pub const BND: u32 = 1 << 18;
    pub const HINT_TAKEN: u32 = 1 << 19;
    pub const NOTRACK: u32 = 1 << 20;
    pub const NO_INSTRUCTION: u32 = 1 << 21;
    pub const NON_ZERO_OP_MASK_REGISTER: u32 = 1 << 22;

    pub const ALL_MODES: u32 = MODE16 | MODE32 | MODE64;
}

/// Resolved metadata of one opcode form.
///
/// Built once per [`Code`] when the static table is first accessed, see
/// [`Code::op_code`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpCodeInfo {
    pub(crate) code: Code,
    pub(crate) op_code: u16,
    pub(crate) encoding: EncodingKind,
    pub(crate) flags: Flags,
    pub(crate) operand_size: u8,
    pub(crate) address_size: u8,
    pub(crate) l: u8,
    pub(crate) lkind: LKind,
    pub(crate) tuple_type: TupleType,
    pub(crate) table: OpCodeTableKind,
    pub(crate) mandatory_prefix: MandatoryPrefix,
    pub(crate) group_index: i8,
    pub(crate) op_kinds: [OpCodeOperandKind; MAX_OP_COUNT],
    pub(crate) op_code_string: String,
    pub(crate) instruction_string: String,
}

impl OpCodeInfo {
    pub(crate) fn new(code: Code, op_code: u16, encoding: EncodingKind) -> Self {
        let mut flags = Flags::empty();
        flags.set_if(flags::NO_INSTRUCTION, !code.is_instruction());
        Self {
            code,
            op_code,
            encoding,
            flags,
            operand_size: 0,
            address_size: 0,
            l: 0,
            lkind: LKind::None,
            tuple_type: TupleType::None,
            table: OpCodeTableKind::Normal,
            mandatory_prefix: MandatoryPrefix::None,
            group_index: -1,
            op_kinds: [OpCodeOperandKind::None; MAX_OP_COUNT],
            op_code_string: String::new(),
            instruction_string: String::new(),
        }
    }

    fn has(&self, flags: u32) -> bool {
        self.flags.any(flags)
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn mnemonic(&self) -> &'static str {
        self.code.mnemonic()
    }

    pub fn encoding(&self) -> EncodingKind {
        self.encoding
    }

    /// `false` for `INVALID` and the data-declaration pseudo-ops.
    pub fn is_instruction(&self) -> bool {
        !self.has(flags::NO_INSTRUCTION)
    }

    pub fn mode16(&self) -> bool {
        self.has(flags::MODE16)
    }

    pub fn mode32(&self) -> bool {
        self.has(flags::MODE32)
    }

    pub fn mode64(&self) -> bool {
        self.has(flags::MODE64)
    }

    /// The instruction is preceded by an `FWAIT` (`9B`) byte.
    pub fn fwait(&self) -> bool {
        self.has(flags::FWAIT)
    }

    /// Operand size in bits, `0` if determined by the prefixes and mode.
    pub fn operand_size(&self) -> u32 {
        self.operand_size as u32
    }

    /// Address size in bits, `0` if determined by the prefixes and mode.
    pub fn address_size(&self) -> u32 {
        self.address_size as u32
    }

    /// `L` bit of VEX and XOP, raw `L'L` of EVEX.
    pub fn l(&self) -> u32 {
        self.l as u32
    }

    pub fn lkind(&self) -> LKind {
        self.lkind
    }

    /// `W` bit, check [`is_wig`](Self::is_wig) and
    /// [`is_wig32`](Self::is_wig32) to know if the processor reads it.
    pub fn w(&self) -> u32 {
        self.has(flags::W) as u32
    }

    /// The vector length is ignored.
    pub fn is_lig(&self) -> bool {
        self.has(flags::LIG)
    }

    /// The `W` bit is ignored in all modes.
    pub fn is_wig(&self) -> bool {
        self.has(flags::WIG)
    }

    /// The `W` bit is ignored outside of 64-bit mode.
    pub fn is_wig32(&self) -> bool {
        self.has(flags::WIG32)
    }

    /// EVEX tuple type, `None` for other encodings.
    pub fn tuple_type(&self) -> TupleType {
        self.tuple_type
    }

    pub fn can_broadcast(&self) -> bool {
        self.has(flags::BROADCAST)
    }

    pub fn can_use_rounding_control(&self) -> bool {
        self.has(flags::ROUNDING_CONTROL)
    }

    pub fn can_suppress_all_exceptions(&self) -> bool {
        self.has(flags::SUPPRESS_ALL_EXCEPTIONS)
    }

    pub fn can_use_op_mask_register(&self) -> bool {
        self.has(flags::OP_MASK_REGISTER)
    }

    /// The opmask register must not be `k0`.
    pub fn require_non_zero_op_mask_register(&self) -> bool {
        self.has(flags::NON_ZERO_OP_MASK_REGISTER)
    }

    pub fn can_use_zeroing_masking(&self) -> bool {
        self.has(flags::ZEROING_MASKING)
    }

    pub fn can_use_lock_prefix(&self) -> bool {
        self.has(flags::LOCK)
    }

    pub fn can_use_xacquire_prefix(&self) -> bool {
        self.has(flags::XACQUIRE)
    }

    pub fn can_use_xrelease_prefix(&self) -> bool {
        self.has(flags::XRELEASE)
    }

    pub fn can_use_rep_prefix(&self) -> bool {
        self.has(flags::REP)
    }

    pub fn can_use_repne_prefix(&self) -> bool {
        self.has(flags::REPNE)
    }

    pub fn can_use_bnd_prefix(&self) -> bool {
        self.has(flags::BND)
    }

    pub fn can_use_hint_taken_prefix(&self) -> bool {
        self.has(flags::HINT_TAKEN)
    }

    pub fn can_use_notrack_prefix(&self) -> bool {
        self.has(flags::NOTRACK)
    }

    pub fn table(&self) -> OpCodeTableKind {
        self.table
    }

    pub fn mandatory_prefix(&self) -> MandatoryPrefix {
        self.mandatory_prefix
    }

    /// Opcode byte, or two bytes for forms like `0F 01 D8`.
    pub fn op_code(&self) -> u32 {
        self.op_code as u32
    }

    pub fn is_group(&self) -> bool {
        self.group_index >= 0
    }

    /// `ModRM.reg` value of a group opcode, `-1` otherwise.
    pub fn group_index(&self) -> i32 {
        self.group_index as i32
    }

    pub fn op_count(&self) -> usize {
        self.code.op_count()
    }

    pub fn op0_kind(&self) -> OpCodeOperandKind {
        self.op_kinds[0]
    }

    pub fn op1_kind(&self) -> OpCodeOperandKind {
        self.op_kinds[1]
    }

    pub fn op2_kind(&self) -> OpCodeOperandKind {
        self.op_kinds[2]
    }

    pub fn op3_kind(&self) -> OpCodeOperandKind {
        self.op_kinds[3]
    }

    pub fn op4_kind(&self) -> OpCodeOperandKind {
        self.op_kinds[4]
    }

    /// Operand kind in slot `index`.
    ///
    /// Slots at or after [`op_count`](Self::op_count) are not meaningful
    /// but can still be read.
    pub fn op_kind(&self, index: usize) -> Result<OpCodeOperandKind, UsageError> {
        self.op_kinds
            .get(index)
            .copied()
            .ok_or(UsageError::OperandIndex(index))
    }

    /// Kinds of the used operand slots.
    pub fn op_kinds(&self) -> &[OpCodeOperandKind] {
        &self.op_kinds[..self.op_count()]
    }

    /// Checks if the opcode can be encoded in a `bitness` mode.
    pub fn is_available_in_mode(&self, bitness: u32) -> Result<bool, UsageError> {
        match bitness {
            16 => Ok(self.mode16()),
            32 => Ok(self.mode32()),
            64 => Ok(self.mode64()),
            _ => Err(UsageError::Bitness(bitness)),
        }
    }

    /// Opcode syntax, e.g. `EVEX.512.66.0F38.W0 90 /vsib`.
    pub fn op_code_string(&self) -> &str {
        &self.op_code_string
    }

    /// Instruction syntax, e.g. `VPGATHERDD zmm1 {k1}, vm32z`.
    pub fn instruction_string(&self) -> &str {
        &self.instruction_string
    }
}

impl fmt::Display for OpCodeInfo {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&self.instruction_string)
    }
}
