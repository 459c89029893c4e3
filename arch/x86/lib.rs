//! x86/x64 opcode metadata.
//!
//! Every opcode form has a [`Code`]. Its packed record is resolved once
//! into an [`OpCodeInfo`] holding the encoding details of the form: prefixes,
//! opcode map, vector length and `W` handling, EVEX capabilities, operand
//! kinds and the canonical opcode and instruction syntax.
//!
//! ```
//! use opinfo_x86::code;
//!
//! let info = code::EVEX_VPGATHERDD_ZMM_K1_VM32Z.op_code();
//! assert!(info.require_non_zero_op_mask_register());
//! assert_eq!(info.op_code_string(), "EVEX.512.66.0F38.W0 90 /vsib");
//! ```

#[macro_use]
extern crate log;

mod decoder;
mod enums;
mod generated;
mod info;
mod non_zero_opmask;
mod op_kinds;
mod printer;
mod raw;
mod table;

use core::fmt;

pub use opinfo_core::{
    enums::{EncodingKind, TupleType},
    error::{ConfigError, FieldName, UsageError},
    PackedOpCode,
};

pub use self::{
    decoder::decode,
    enums::{LKind, MandatoryPrefix, OpCodeOperandKind, OpCodeTableKind},
    generated::code,
    info::OpCodeInfo,
    table::{op_code_infos, try_build_table},
};

/// Identity of an opcode form.
///
/// Values are dense, `0` is [`code::INVALID`] and the data-declaration
/// pseudo-ops starting at [`code::DECLAREBYTE`] are last.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(u16);

impl Code {
    pub const fn value(self) -> u16 {
        self.0
    }

    pub fn from_u16(value: u16) -> Option<Self> {
        if (value as usize) < code::CODE_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// All identities in table order.
    pub fn values() -> impl Iterator<Item = Code> + Clone {
        (0..code::CODE_COUNT as u16).map(Code)
    }

    /// Number of identities.
    pub const fn count() -> usize {
        code::CODE_COUNT
    }

    /// Name of the form, e.g. `Add_rm8_r8`.
    pub fn name(self) -> &'static str {
        code::NAMES[self.0 as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        code::MNEMONICS[self.0 as usize]
    }

    /// Number of used operand slots.
    pub fn op_count(self) -> usize {
        code::OP_COUNTS[self.0 as usize] as usize
    }

    /// `false` for `INVALID` and the data-declaration pseudo-ops.
    pub fn is_instruction(self) -> bool {
        self != code::INVALID && self < code::DECLAREBYTE
    }

    /// Packed record of the form.
    pub fn packed(self) -> &'static PackedOpCode {
        &generated::OP_CODE_DATA[self.0 as usize]
    }

    /// Resolved metadata of the form.
    ///
    /// # Panics
    ///
    /// The first call panics if the static table holds an invalid record.
    pub fn op_code(self) -> &'static OpCodeInfo {
        &op_code_infos()[self.0 as usize]
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}
