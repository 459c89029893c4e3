//! Bit positions of the sub-fields in the three packed words.
//!
//! Shared by the table producer and the decoder. Changing any position
//! requires regenerating the static table.

use crate::{enums::EncodingKind, flags::Field};

/// Sub-fields present in the legacy, VEX, EVEX and XOP layouts.
#[derive(Copy, Clone, Debug)]
pub struct Common {
    pub mandatory_prefix_byte: Field,
    pub table: Field,
    pub has_group_index: Field,
    pub group: Field,
    pub encodable: Field,
}

/// First word, common to all encodings.
pub mod word1 {
    use super::Field;

    pub const ENCODING: Field = Field::new(0, 3);
    pub const OPCODE: Field = Field::new(16, 16);

    pub const FIELDS: &[Field] = &[ENCODING, OPCODE];
}

/// Third word, operand-kind indices.
pub mod word3 {
    use super::Field;

    pub const OP_KIND_BITS: u8 = 4;

    pub const OP0: Field = Field::new(0, OP_KIND_BITS);
    pub const OP1: Field = Field::new(4, OP_KIND_BITS);
    pub const OP2: Field = Field::new(8, OP_KIND_BITS);
    pub const OP3: Field = Field::new(12, OP_KIND_BITS);
    pub const OP4: Field = Field::new(16, OP_KIND_BITS);

    pub const OPS: [Field; crate::MAX_OP_COUNT] = [OP0, OP1, OP2, OP3, OP4];
}

/// Second word of a legacy encoded opcode.
pub mod legacy {
    use super::Field;

    pub const MANDATORY_PREFIX_BYTE: Field = Field::new(0, 2);
    pub const HAS_MANDATORY_PREFIX: Field = Field::bit(2);
    pub const TABLE: Field = Field::new(3, 2);
    pub const HAS_GROUP_INDEX: Field = Field::bit(5);
    pub const GROUP: Field = Field::new(6, 3);
    pub const ENCODABLE: Field = Field::new(9, 2);
    pub const ALLOWED_PREFIXES: Field = Field::new(11, 4);
    pub const FWAIT: Field = Field::bit(15);
    pub const OPERAND_SIZE: Field = Field::new(16, 2);
    pub const ADDRESS_SIZE: Field = Field::new(18, 2);

    pub const COMMON: super::Common = super::Common {
        mandatory_prefix_byte: MANDATORY_PREFIX_BYTE,
        table: TABLE,
        has_group_index: HAS_GROUP_INDEX,
        group: GROUP,
        encodable: ENCODABLE,
    };

    pub const FIELDS: &[Field] = &[
        MANDATORY_PREFIX_BYTE,
        HAS_MANDATORY_PREFIX,
        TABLE,
        HAS_GROUP_INDEX,
        GROUP,
        ENCODABLE,
        ALLOWED_PREFIXES,
        FWAIT,
        OPERAND_SIZE,
        ADDRESS_SIZE,
    ];
}

/// Second word of a VEX encoded opcode.
pub mod vex {
    use super::Field;

    pub const MANDATORY_PREFIX_BYTE: Field = Field::new(0, 2);
    pub const TABLE: Field = Field::new(2, 2);
    pub const HAS_GROUP_INDEX: Field = Field::bit(4);
    pub const GROUP: Field = Field::new(5, 3);
    pub const ENCODABLE: Field = Field::new(8, 2);
    pub const VECTOR_LENGTH: Field = Field::new(10, 3);
    pub const W: Field = Field::new(13, 2);

    pub const COMMON: super::Common = super::Common {
        mandatory_prefix_byte: MANDATORY_PREFIX_BYTE,
        table: TABLE,
        has_group_index: HAS_GROUP_INDEX,
        group: GROUP,
        encodable: ENCODABLE,
    };

    pub const FIELDS: &[Field] = &[
        MANDATORY_PREFIX_BYTE,
        TABLE,
        HAS_GROUP_INDEX,
        GROUP,
        ENCODABLE,
        VECTOR_LENGTH,
        W,
    ];
}

/// Second word of an EVEX encoded opcode.
pub mod evex {
    use super::Field;

    pub const MANDATORY_PREFIX_BYTE: Field = Field::new(0, 2);
    pub const TABLE: Field = Field::new(2, 2);
    pub const HAS_GROUP_INDEX: Field = Field::bit(4);
    pub const GROUP: Field = Field::new(5, 3);
    pub const ENCODABLE: Field = Field::new(8, 2);
    pub const TUPLE_TYPE: Field = Field::new(10, 5);
    pub const VECTOR_LENGTH: Field = Field::new(15, 2);
    pub const W: Field = Field::new(17, 2);
    pub const LIG: Field = Field::bit(19);
    pub const BROADCAST: Field = Field::bit(20);
    pub const ROUNDING_CONTROL: Field = Field::bit(21);
    pub const SAE: Field = Field::bit(22);
    pub const OPMASK: Field = Field::bit(23);
    pub const ZEROING: Field = Field::bit(24);

    pub const COMMON: super::Common = super::Common {
        mandatory_prefix_byte: MANDATORY_PREFIX_BYTE,
        table: TABLE,
        has_group_index: HAS_GROUP_INDEX,
        group: GROUP,
        encodable: ENCODABLE,
    };

    pub const FIELDS: &[Field] = &[
        MANDATORY_PREFIX_BYTE,
        TABLE,
        HAS_GROUP_INDEX,
        GROUP,
        ENCODABLE,
        TUPLE_TYPE,
        VECTOR_LENGTH,
        W,
        LIG,
        BROADCAST,
        ROUNDING_CONTROL,
        SAE,
        OPMASK,
        ZEROING,
    ];
}

/// Second word of an XOP encoded opcode.
pub mod xop {
    use super::Field;

    pub const MANDATORY_PREFIX_BYTE: Field = Field::new(0, 2);
    pub const TABLE: Field = Field::new(2, 2);
    pub const HAS_GROUP_INDEX: Field = Field::bit(4);
    pub const GROUP: Field = Field::new(5, 3);
    pub const ENCODABLE: Field = Field::new(8, 2);
    pub const VECTOR_LENGTH: Field = Field::new(10, 2);
    pub const W: Field = Field::new(12, 2);

    pub const COMMON: super::Common = super::Common {
        mandatory_prefix_byte: MANDATORY_PREFIX_BYTE,
        table: TABLE,
        has_group_index: HAS_GROUP_INDEX,
        group: GROUP,
        encodable: ENCODABLE,
    };

    pub const FIELDS: &[Field] = &[
        MANDATORY_PREFIX_BYTE,
        TABLE,
        HAS_GROUP_INDEX,
        GROUP,
        ENCODABLE,
        VECTOR_LENGTH,
        W,
    ];
}

impl Common {
    /// Common sub-fields of `encoding`, `None` for 3DNow! which only
    /// stores the encodable field.
    pub const fn of(encoding: EncodingKind) -> Option<Common> {
        match encoding {
            EncodingKind::Legacy => Some(legacy::COMMON),
            EncodingKind::Vex => Some(vex::COMMON),
            EncodingKind::Evex => Some(evex::COMMON),
            EncodingKind::Xop => Some(xop::COMMON),
            EncodingKind::D3now => None,
        }
    }
}

/// Second word of a 3DNow! opcode.
pub mod d3now {
    use super::Field;

    pub const ENCODABLE: Field = Field::new(0, 2);

    pub const FIELDS: &[Field] = &[ENCODABLE];
}
