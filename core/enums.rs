//! Sub-field enumerations stored in packed opcode records.
//!
//! Raw values are positions in the enumeration and must stay stable: the
//! table producer writes them and the decoder reads them back.

use crate::macros::define_enum;

define_enum! {
    /// Instruction encoding scheme.
    pub enum EncodingKind {
        Legacy = "legacy",
        Vex = "vex",
        Evex = "evex",
        Xop = "xop",
        D3now = "3dnow",
    }
}

define_enum! {
    pub enum MandatoryPrefixByte {
        None = "none",
        P66 = "66",
        PF3 = "F3",
        PF2 = "F2",
    }
}

define_enum! {
    pub enum LegacyOpCodeTable {
        Normal = "normal",
        Table0F = "0F",
        Table0F38 = "0F38",
        Table0F3A = "0F3A",
    }
}

define_enum! {
    pub enum VexOpCodeTable {
        Table0F = "0F",
        Table0F38 = "0F38",
        Table0F3A = "0F3A",
    }
}

define_enum! {
    pub enum EvexOpCodeTable {
        Table0F = "0F",
        Table0F38 = "0F38",
        Table0F3A = "0F3A",
    }
}

define_enum! {
    pub enum XopOpCodeTable {
        Xop8 = "X8",
        Xop9 = "X9",
        XopA = "XA",
    }
}

define_enum! {
    /// Processor modes an opcode can be encoded in.
    pub enum Encodable {
        Any = "any",
        Only1632 = "1632",
        Only64 = "64",
    }
}

define_enum! {
    /// Legacy prefixes accepted in front of a legacy opcode.
    pub enum AllowedPrefixes {
        None = "none",
        Bnd = "bnd",
        BndNotrack = "bnd_notrack",
        HintTakenBnd = "hnt_bnd",
        Lock = "lock",
        Rep = "rep",
        RepRepne = "rep_repne",
        XacquireXreleaseLock = "xacquire_xrelease_lock",
        Xrelease = "xrelease",
    }
}

define_enum! {
    pub enum OperandSize {
        None = "none",
        Size16 = "16",
        Size32 = "32",
        Size64 = "64",
    }
}

define_enum! {
    pub enum AddressSize {
        None = "none",
        Size16 = "16",
        Size32 = "32",
        Size64 = "64",
    }
}

impl OperandSize {
    /// Size in bits, `0` if the size is set by the prefixes.
    pub const fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Size16 => 16,
            Self::Size32 => 32,
            Self::Size64 => 64,
        }
    }
}

impl AddressSize {
    /// Size in bits, `0` if the size is set by the prefixes.
    pub const fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Size16 => 16,
            Self::Size32 => 32,
            Self::Size64 => 64,
        }
    }
}

define_enum! {
    pub enum VexVectorLength {
        LZ = "LZ",
        L0 = "L0",
        L1 = "L1",
        L128 = "128",
        L256 = "256",
        LIG = "LIG",
    }
}

define_enum! {
    pub enum XopVectorLength {
        L128 = "128",
        L256 = "256",
        L0 = "L0",
        L1 = "L1",
    }
}

define_enum! {
    pub enum WBit {
        W0 = "W0",
        W1 = "W1",
        WIG = "WIG",
        WIG32 = "WIG32",
    }
}

define_enum! {
    /// EVEX memory operand scaling class (`disp8 * N` compression).
    pub enum TupleType {
        None = "none",
        Full128 = "Full_128",
        Full256 = "Full_256",
        Full512 = "Full_512",
        Half128 = "Half_128",
        Half256 = "Half_256",
        Half512 = "Half_512",
        FullMem128 = "Full_Mem_128",
        FullMem256 = "Full_Mem_256",
        FullMem512 = "Full_Mem_512",
        Tuple1Scalar = "Tuple1_Scalar",
        Tuple1Scalar1 = "Tuple1_Scalar_1",
        Tuple1Scalar2 = "Tuple1_Scalar_2",
        Tuple1Scalar4 = "Tuple1_Scalar_4",
        Tuple1Scalar8 = "Tuple1_Scalar_8",
        Tuple1Fixed = "Tuple1_Fixed",
        Tuple1Fixed4 = "Tuple1_Fixed_4",
        Tuple1Fixed8 = "Tuple1_Fixed_8",
        Tuple2 = "Tuple2",
        Tuple4 = "Tuple4",
        Tuple8 = "Tuple8",
        Tuple1x4 = "Tuple1_4X",
        HalfMem128 = "Half_Mem_128",
        HalfMem256 = "Half_Mem_256",
        HalfMem512 = "Half_Mem_512",
        QuarterMem128 = "Quarter_Mem_128",
        QuarterMem256 = "Quarter_Mem_256",
        QuarterMem512 = "Quarter_Mem_512",
        EighthMem128 = "Eighth_Mem_128",
        EighthMem256 = "Eighth_Mem_256",
        EighthMem512 = "Eighth_Mem_512",
        Mem128 = "Mem128",
    }
}

impl Default for TupleType {
    fn default() -> Self {
        Self::None
    }
}

// Operand-kind indices, one enumeration per encoding. The names follow the
// usual operand notation of opcode maps: E = ModRM r/m, G = ModRM reg,
// H = VEX.vvvv, V/W = vector ModRM reg/rm, Z = register in the opcode byte.

define_enum! {
    pub enum LegacyOpKind {
        None = "none",
        Eb = "Eb",
        Ew = "Ew",
        Ed = "Ed",
        Eq = "Eq",
        Gb = "Gb",
        Gw = "Gw",
        Gd = "Gd",
        Gq = "Gq",
        Zd = "Zd",
        Zq = "Zq",
        Ib = "Ib",
        Id = "Id",
        VX = "VX",
        WX = "WX",
        M = "M",
    }
}

define_enum! {
    pub enum VexOpKind {
        None = "none",
        Ed = "Ed",
        Eq = "Eq",
        Gd = "Gd",
        Gq = "Gq",
        Hd = "Hd",
        HX = "HX",
        HY = "HY",
        Ib = "Ib",
        Is4X = "Is4X",
        Is4Y = "Is4Y",
        M = "M",
        VX = "VX",
        VY = "VY",
        WX = "WX",
        WY = "WY",
    }
}

define_enum! {
    pub enum EvexOpKind {
        None = "none",
        VX = "VX",
        VY = "VY",
        VZ = "VZ",
        HX = "HX",
        HY = "HY",
        HZ = "HZ",
        WX = "WX",
        WY = "WY",
        WZ = "WZ",
        VM32X = "VM32X",
        VM32Y = "VM32Y",
        VM32Z = "VM32Z",
        VM64X = "VM64X",
        VM64Y = "VM64Y",
        VM64Z = "VM64Z",
    }
}

define_enum! {
    pub enum XopOpKind {
        None = "none",
        Ed = "Ed",
        Eq = "Eq",
        Gd = "Gd",
        Gq = "Gq",
        Hd = "Hd",
        Hq = "Hq",
        HX = "HX",
        HY = "HY",
        Ib = "Ib",
        Is4X = "Is4X",
        Is4Y = "Is4Y",
        VX = "VX",
        VY = "VY",
        WX = "WX",
        WY = "WY",
    }
}

impl EncodingKind {
    /// Number of meaningful operand-kind slots for the encoding.
    pub const fn op_slots(self) -> usize {
        match self {
            Self::Legacy => 4,
            Self::Vex => 5,
            Self::Evex => 4,
            Self::Xop => 4,
            Self::D3now => 2,
        }
    }

    /// Raw operand-kind index for `name`, if the encoding has such a kind.
    pub fn op_kind_index(self, name: &str) -> Option<u32> {
        match self {
            Self::Legacy => LegacyOpKind::from_name(name).map(LegacyOpKind::raw),
            Self::Vex => VexOpKind::from_name(name).map(VexOpKind::raw),
            Self::Evex => EvexOpKind::from_name(name).map(EvexOpKind::raw),
            Self::Xop => XopOpKind::from_name(name).map(XopOpKind::raw),
            Self::D3now => None,
        }
    }
}
