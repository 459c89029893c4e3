//! Field extraction from packed opcode records.
//!
//! A record is split into a tagged [`RawOpCode`] with one payload per
//! encoding. Every sub-field is checked against its enumeration here, so
//! the resolver only deals with well-formed values.

use opinfo_core::{
    enums::*,
    error::{ConfigError, FieldName},
    flags::Field,
    layout::{self, Common},
    PackedOpCode,
};

pub(crate) struct LegacyFields {
    pub mandatory_prefix: MandatoryPrefixByte,
    pub has_mandatory_prefix: bool,
    pub table: LegacyOpCodeTable,
    pub group: Option<u8>,
    pub encodable: Encodable,
    pub allowed_prefixes: AllowedPrefixes,
    pub fwait: bool,
    pub operand_size: OperandSize,
    pub address_size: AddressSize,
    pub ops: [LegacyOpKind; 4],
}

pub(crate) struct VexFields {
    pub mandatory_prefix: MandatoryPrefixByte,
    pub table: VexOpCodeTable,
    pub group: Option<u8>,
    pub encodable: Encodable,
    pub vector_length: VexVectorLength,
    pub w: WBit,
    pub ops: [VexOpKind; 5],
}

pub(crate) struct EvexFields {
    pub mandatory_prefix: MandatoryPrefixByte,
    pub table: EvexOpCodeTable,
    pub group: Option<u8>,
    pub encodable: Encodable,
    pub tuple_type: TupleType,
    pub ll: u8,
    pub w: WBit,
    pub lig: bool,
    pub broadcast: bool,
    pub rounding_control: bool,
    pub sae: bool,
    pub opmask: bool,
    pub zeroing: bool,
    pub ops: [EvexOpKind; 4],
}

pub(crate) struct XopFields {
    pub mandatory_prefix: MandatoryPrefixByte,
    pub table: XopOpCodeTable,
    pub group: Option<u8>,
    pub encodable: Encodable,
    pub vector_length: XopVectorLength,
    pub w: WBit,
    pub ops: [XopOpKind; 4],
}

pub(crate) struct D3nowFields {
    pub encodable: Encodable,
}

pub(crate) enum RawOpCode {
    Legacy(LegacyFields),
    Vex(VexFields),
    Evex(EvexFields),
    Xop(XopFields),
    D3now(D3nowFields),
}

struct Reader {
    code: u16,
    instruction: bool,
    word2: u32,
    word3: u32,
}

impl Reader {
    fn error(&self, field: FieldName, value: u32) -> ConfigError {
        ConfigError::new(self.code, field, value)
    }

    fn field<T>(
        &self,
        field: Field,
        name: FieldName,
        from: fn(u32) -> Option<T>,
    ) -> Result<T, ConfigError> {
        let value = field.get(self.word2);
        from(value).ok_or_else(|| self.error(name, value))
    }

    fn bit(&self, field: Field) -> bool {
        field.is_set(self.word2)
    }

    fn group(&self, common: &Common) -> Option<u8> {
        if self.bit(common.has_group_index) {
            Some(common.group.get(self.word2) as u8)
        } else {
            None
        }
    }

    fn mandatory_prefix(&self, common: &Common) -> Result<MandatoryPrefixByte, ConfigError> {
        self.field(
            common.mandatory_prefix_byte,
            FieldName::MandatoryPrefixByte,
            MandatoryPrefixByte::from_raw,
        )
    }

    // Pseudo-ops are available in every mode, their encodable field is
    // never consulted.
    fn encodable(&self, field: Field) -> Result<Encodable, ConfigError> {
        if !self.instruction {
            return Ok(Encodable::Any);
        }
        self.field(field, FieldName::Encodable, Encodable::from_raw)
    }

    fn w(&self, field: Field) -> WBit {
        // two bits, every value is a `WBit`
        WBit::ALL[field.get(self.word2) as usize]
    }

    fn ops<T: Copy, const N: usize>(
        &self,
        none: T,
        from: fn(u32) -> Option<T>,
    ) -> Result<[T; N], ConfigError> {
        let mut ops = [none; N];
        for (i, (op, field)) in ops.iter_mut().zip(layout::word3::OPS).enumerate() {
            let value = field.get(self.word3);
            *op = from(value).ok_or_else(|| self.error(FieldName::OpKind(i as u8), value))?;
        }
        Ok(ops)
    }

    fn legacy(&self) -> Result<LegacyFields, ConfigError> {
        use layout::legacy::*;

        Ok(LegacyFields {
            mandatory_prefix: self.mandatory_prefix(&COMMON)?,
            has_mandatory_prefix: self.bit(HAS_MANDATORY_PREFIX),
            table: self.field(TABLE, FieldName::Table, LegacyOpCodeTable::from_raw)?,
            group: self.group(&COMMON),
            encodable: self.encodable(ENCODABLE)?,
            allowed_prefixes: self.field(
                ALLOWED_PREFIXES,
                FieldName::AllowedPrefixes,
                AllowedPrefixes::from_raw,
            )?,
            fwait: self.bit(FWAIT),
            operand_size: self.field(OPERAND_SIZE, FieldName::OperandSize, OperandSize::from_raw)?,
            address_size: self.field(ADDRESS_SIZE, FieldName::AddressSize, AddressSize::from_raw)?,
            ops: self.ops(LegacyOpKind::None, LegacyOpKind::from_raw)?,
        })
    }

    fn vex(&self) -> Result<VexFields, ConfigError> {
        use layout::vex::*;

        Ok(VexFields {
            mandatory_prefix: self.mandatory_prefix(&COMMON)?,
            table: self.field(TABLE, FieldName::Table, VexOpCodeTable::from_raw)?,
            group: self.group(&COMMON),
            encodable: self.encodable(ENCODABLE)?,
            vector_length: self.field(
                VECTOR_LENGTH,
                FieldName::VectorLength,
                VexVectorLength::from_raw,
            )?,
            w: self.w(W),
            ops: self.ops(VexOpKind::None, VexOpKind::from_raw)?,
        })
    }

    fn evex(&self) -> Result<EvexFields, ConfigError> {
        use layout::evex::*;

        Ok(EvexFields {
            mandatory_prefix: self.mandatory_prefix(&COMMON)?,
            table: self.field(TABLE, FieldName::Table, EvexOpCodeTable::from_raw)?,
            group: self.group(&COMMON),
            encodable: self.encodable(ENCODABLE)?,
            tuple_type: self.field(TUPLE_TYPE, FieldName::TupleType, TupleType::from_raw)?,
            ll: VECTOR_LENGTH.get(self.word2) as u8,
            w: self.w(W),
            lig: self.bit(LIG),
            broadcast: self.bit(BROADCAST),
            rounding_control: self.bit(ROUNDING_CONTROL),
            sae: self.bit(SAE),
            opmask: self.bit(OPMASK),
            zeroing: self.bit(ZEROING),
            ops: self.ops(EvexOpKind::None, EvexOpKind::from_raw)?,
        })
    }

    fn xop(&self) -> Result<XopFields, ConfigError> {
        use layout::xop::*;

        Ok(XopFields {
            mandatory_prefix: self.mandatory_prefix(&COMMON)?,
            table: self.field(TABLE, FieldName::Table, XopOpCodeTable::from_raw)?,
            group: self.group(&COMMON),
            encodable: self.encodable(ENCODABLE)?,
            vector_length: self.field(
                VECTOR_LENGTH,
                FieldName::VectorLength,
                XopVectorLength::from_raw,
            )?,
            w: self.w(W),
            ops: self.ops(XopOpKind::None, XopOpKind::from_raw)?,
        })
    }

    fn d3now(&self) -> Result<D3nowFields, ConfigError> {
        Ok(D3nowFields {
            encodable: self.encodable(layout::d3now::ENCODABLE)?,
        })
    }
}

impl RawOpCode {
    /// Splits `packed` into its encoding specific sub-fields.
    ///
    /// `instruction` is false for pseudo-ops, see [`crate::Code::is_instruction`].
    pub(crate) fn parse(
        code: u16,
        instruction: bool,
        packed: &PackedOpCode,
    ) -> Result<(u16, RawOpCode), ConfigError> {
        let word1 = packed.word1();
        let opcode = layout::word1::OPCODE.get(word1) as u16;
        let encoding = layout::word1::ENCODING.get(word1);
        let encoding = EncodingKind::from_raw(encoding)
            .ok_or_else(|| ConfigError::new(code, FieldName::Encoding, encoding))?;

        let reader = Reader {
            code,
            instruction,
            word2: packed.word2(),
            word3: packed.word3(),
        };
        let raw = match encoding {
            EncodingKind::Legacy => RawOpCode::Legacy(reader.legacy()?),
            EncodingKind::Vex => RawOpCode::Vex(reader.vex()?),
            EncodingKind::Evex => RawOpCode::Evex(reader.evex()?),
            EncodingKind::Xop => RawOpCode::Xop(reader.xop()?),
            EncodingKind::D3now => RawOpCode::D3now(reader.d3now()?),
        };
        Ok((opcode, raw))
    }

    pub(crate) fn encoding(&self) -> EncodingKind {
        match self {
            Self::Legacy(_) => EncodingKind::Legacy,
            Self::Vex(_) => EncodingKind::Vex,
            Self::Evex(_) => EncodingKind::Evex,
            Self::Xop(_) => EncodingKind::Xop,
            Self::D3now(_) => EncodingKind::D3now,
        }
    }
}
