#![cfg_attr(not(feature = "std"), no_std)]

pub mod enums;
pub mod error;
pub mod flags;
pub mod layout;
pub mod macros;
pub mod utils;

/// Number of operand-kind slots in a packed record.
pub const MAX_OP_COUNT: usize = 5;

/// Raw packed opcode record.
///
/// `words[0]` holds the encoding kind and the opcode, `words[1]` the
/// encoding specific flags and `words[2]` the operand-kind indices. See
/// [`layout`] for the bit positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedOpCode {
    pub words: [u32; 3],
}

impl PackedOpCode {
    pub const fn new(word1: u32, word2: u32, word3: u32) -> Self {
        Self {
            words: [word1, word2, word3],
        }
    }

    pub const fn word1(&self) -> u32 {
        self.words[0]
    }

    pub const fn word2(&self) -> u32 {
        self.words[1]
    }

    pub const fn word3(&self) -> u32 {
        self.words[2]
    }
}
