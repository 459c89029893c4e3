use opinfo_core::macros::define_enum;

define_enum! {
    /// Mandatory prefix of an opcode, as shown in its opcode string.
    pub enum MandatoryPrefix {
        /// No mandatory prefix.
        None = "none",
        /// Mandatory prefix that is not a `66`, `F3` or `F2` byte, shown as `NP`.
        PNP = "NP",
        P66 = "66",
        PF3 = "F3",
        PF2 = "F2",
    }
}

define_enum! {
    /// Opcode map an opcode lives in.
    pub enum OpCodeTableKind {
        Normal = "normal",
        T0F = "0F",
        T0F38 = "0F38",
        T0F3A = "0F3A",
        Xop8 = "XOP8",
        Xop9 = "XOP9",
        XopA = "XOPA",
    }
}

define_enum! {
    /// How the `L` value of a VEX, EVEX or XOP opcode is shown.
    pub enum LKind {
        None = "none",
        /// `.LZ`, `L` is zero.
        LZ = "LZ",
        /// `.L0` or `.L1`.
        L0 = "L0",
        /// `.128`, `.256` or `.512`.
        L128 = "L128",
    }
}

define_enum! {
    /// Resolved operand kind of an opcode form.
    pub enum OpCodeOperandKind {
        None = "none",
        R8OrMem = "r8_or_mem",
        R16OrMem = "r16_or_mem",
        R32OrMem = "r32_or_mem",
        R64OrMem = "r64_or_mem",
        R8Reg = "r8_reg",
        R16Reg = "r16_reg",
        R32Reg = "r32_reg",
        R64Reg = "r64_reg",
        R32Opcode = "r32_opcode",
        R64Opcode = "r64_opcode",
        R32Vvvv = "r32_vvvv",
        R64Vvvv = "r64_vvvv",
        Imm8 = "imm8",
        Imm32 = "imm32",
        Mem = "mem",
        MmReg = "mm_reg",
        MmOrMem = "mm_or_mem",
        XmmReg = "xmm_reg",
        YmmReg = "ymm_reg",
        ZmmReg = "zmm_reg",
        XmmVvvv = "xmm_vvvv",
        YmmVvvv = "ymm_vvvv",
        ZmmVvvv = "zmm_vvvv",
        XmmOrMem = "xmm_or_mem",
        YmmOrMem = "ymm_or_mem",
        ZmmOrMem = "zmm_or_mem",
        XmmIs4 = "xmm_is4",
        YmmIs4 = "ymm_is4",
        MemVsib32x = "mem_vsib32x",
        MemVsib32y = "mem_vsib32y",
        MemVsib32z = "mem_vsib32z",
        MemVsib64x = "mem_vsib64x",
        MemVsib64y = "mem_vsib64y",
        MemVsib64z = "mem_vsib64z",
    }
}

impl Default for OpCodeOperandKind {
    fn default() -> Self {
        Self::None
    }
}

impl OpCodeOperandKind {
    /// Operand is encoded in the `reg` or `r/m` field of the ModRM byte.
    pub const fn uses_modrm(self) -> bool {
        !matches!(
            self,
            Self::None
                | Self::R32Opcode
                | Self::R64Opcode
                | Self::R32Vvvv
                | Self::R64Vvvv
                | Self::Imm8
                | Self::Imm32
                | Self::XmmVvvv
                | Self::YmmVvvv
                | Self::ZmmVvvv
                | Self::XmmIs4
                | Self::YmmIs4
        )
    }

    /// Operand is a VSIB memory operand.
    pub const fn is_vsib(self) -> bool {
        matches!(
            self,
            Self::MemVsib32x
                | Self::MemVsib32y
                | Self::MemVsib32z
                | Self::MemVsib64x
                | Self::MemVsib64y
                | Self::MemVsib64z
        )
    }

    /// Operand can be a memory location.
    pub const fn can_be_memory(self) -> bool {
        matches!(
            self,
            Self::R8OrMem
                | Self::R16OrMem
                | Self::R32OrMem
                | Self::R64OrMem
                | Self::Mem
                | Self::MmOrMem
                | Self::XmmOrMem
                | Self::YmmOrMem
                | Self::ZmmOrMem
        ) || self.is_vsib()
    }
}
